use credlify::constants::IGNORE_FILE;
use credlify::error::Error;
use credlify::ignore::parse_ignore_file;
use std::fs::File;
use std::io::Write;
use tempfile::TempDir;

#[test]
fn test_parse_ignore_file() {
    let temp_dir = TempDir::new().unwrap();
    let ignore_path = temp_dir.path().join(IGNORE_FILE);

    // Without an ignore file only the defaults apply
    let glob_set = parse_ignore_file(&ignore_path).unwrap();
    assert!(glob_set.is_match("sub/.DS_Store"));
    assert!(glob_set.is_match(IGNORE_FILE));
    assert!(!glob_set.is_match("config.js"));

    let mut file = File::create(&ignore_path).unwrap();
    writeln!(file, "# drafts\n\n*.bak\ndrafts/**").unwrap();

    let glob_set = parse_ignore_file(&ignore_path).unwrap();
    assert!(glob_set.is_match("gulpfile.js.bak"));
    assert!(glob_set.is_match("drafts/notes.md"));
    assert!(glob_set.is_match("sub/.DS_Store"));
    assert!(!glob_set.is_match("config.js"));
}

#[test]
fn test_invalid_pattern() {
    let temp_dir = TempDir::new().unwrap();
    let ignore_path = temp_dir.path().join(IGNORE_FILE);
    std::fs::write(&ignore_path, "a[\n").unwrap();

    assert!(matches!(parse_ignore_file(&ignore_path), Err(Error::IgnoreError(_))));
}
