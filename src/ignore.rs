//! Ignore pattern handling for template directories.
//! A `.credlifyignore` file lists globs of template paths that are never
//! enumerated, similar to .gitignore functionality.

use crate::constants::IGNORE_FILE;
use crate::error::{Error, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;
use std::{fs::read_to_string, path::Path};

/// Patterns ignored in every template directory.
pub const DEFAULT_IGNORE_PATTERNS: &[&str] =
    &["**/.DS_Store", "**/Thumbs.db", "**/.git/**", IGNORE_FILE];

fn add_pattern(builder: &mut GlobSetBuilder, pattern: &str) -> Result<()> {
    let glob = Glob::new(pattern)
        .map_err(|e| Error::IgnoreError(format!("{} loading failed: {}", IGNORE_FILE, e)))?;
    builder.add(glob);
    Ok(())
}

/// Reads the ignore file and combines it with the default patterns.
///
/// # Arguments
/// * `ignore_path` - Path to the .credlifyignore file
///
/// # Returns
/// * `Result<GlobSet>` - Set of compiled glob patterns for path matching
///
/// # Notes
/// - If the ignore file doesn't exist, only the defaults are returned
/// - Blank lines and lines starting with `#` are skipped
/// - Invalid patterns result in an `IgnoreError`
pub fn parse_ignore_file<P: AsRef<Path>>(ignore_path: P) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();

    for pattern in DEFAULT_IGNORE_PATTERNS {
        add_pattern(&mut builder, pattern)?;
    }

    if let Ok(contents) = read_to_string(ignore_path.as_ref()) {
        for line in contents.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            add_pattern(&mut builder, line)?;
        }
    } else {
        debug!("{} does not exist", IGNORE_FILE);
    }

    builder
        .build()
        .map_err(|e| Error::IgnoreError(format!("{} loading failed: {}", IGNORE_FILE, e)))
}
