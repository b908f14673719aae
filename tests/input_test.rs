use credlify::error::Error;
use credlify::input::{parse_yes_no, sanitize_path, validate_path, FieldKind, UserInput, FIELDS};

#[test]
fn test_sanitize_path() {
    assert_eq!(sanitize_path("src"), "src");
    assert_eq!(sanitize_path("/src/"), "src");
    assert_eq!(sanitize_path("  //assets/js// \t"), "assets/js");
    assert_eq!(sanitize_path("a / b"), "a / b");
    assert_eq!(sanitize_path(" / "), "");
}

#[test]
fn test_sanitize_path_is_idempotent() {
    for path in ["", "src", "/src/", " / a/b / ", "\t//x//\n", "a//b", "///"] {
        let once = sanitize_path(path);
        assert_eq!(sanitize_path(&once), once, "path: {path:?}");
    }
}

#[test]
fn test_validate_path() {
    assert!(validate_path("src").is_ok());
    assert!(validate_path("assets/js").is_ok());
    assert!(validate_path("").is_err());
    for bad in ["a\\b", "c:", "a*", "a?", "a\"", "a<", "a>", "a|b", "a\nb"] {
        assert!(validate_path(bad).is_err(), "path: {bad:?}");
    }
}

#[test]
fn test_parse_yes_no() {
    assert_eq!(parse_yes_no("yes"), Some(true));
    assert_eq!(parse_yes_no("Y"), Some(true));
    assert_eq!(parse_yes_no("no"), Some(false));
    assert_eq!(parse_yes_no("N"), Some(false));
    assert_eq!(parse_yes_no("nope"), None);
    assert_eq!(parse_yes_no(""), None);
}

#[test]
fn test_field_defaults_are_valid() {
    for field in FIELDS.iter() {
        assert!(field.validate(field.default).is_ok(), "field: {}", field.key);
    }
    assert_eq!(FIELDS.iter().filter(|f| f.kind == FieldKind::YesNo).count(), 1);
}

#[test]
fn test_set_path_sanitizes_and_validates() {
    let mut input = UserInput::new();
    input.set_path("destJs", "/assets/js/").unwrap();
    assert_eq!(input.get("destJs"), Some("assets/js"));

    let err = input.set_path("src", "bad|path").unwrap_err();
    assert!(matches!(err, Error::ValidationError(_)));
    assert!(input.get("src").is_none());
}

#[test]
fn test_apply_package() {
    let mut input = UserInput::new();
    input.apply_package("my-app", "An app", "MIT");
    input.set_license_text("License body");

    assert_eq!(input.render("%%[appName]%%|%%[description]%%|%%[license]%%"), "my-app|An app|MIT");
    assert_eq!(input.render("%%[licenseText]%%"), "License body");
}
