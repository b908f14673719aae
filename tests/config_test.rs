use credlify::config::{evaluate_config, parse_config, PathGroup, ProjectConfig};
use credlify::error::Error;
use credlify::input::UserInput;
use credlify::template::EmbeddedStore;

fn input(pairs: &[(&str, &str)]) -> UserInput {
    let mut input = UserInput::new();
    for (key, value) in pairs {
        input.set(*key, *value);
    }
    input
}

const LITERAL: &str = r#"
const CONFIG = {
    PATH: {
        SRC: {
            ROOT: "%%[src]%%",
            SASS: "%%[srcSass]%%",
            JS: "%%[srcJs]%%"
        },
        DEST: {
            ROOT: "%%[dest]%%",
            SASS: "%%[destSass]%%",
            JS: "%%[destJs]%%"
        }
    }
};
"#;

#[test]
fn test_round_trip_strips_trailing_slash() {
    let input = input(&[
        ("src", "source/"),
        ("srcJs", "js"),
        ("srcSass", "sass"),
        ("dest", "dist"),
        ("destJs", "assets/js"),
        ("destSass", "assets/css"),
    ]);
    let config = parse_config(&input.render(LITERAL)).unwrap();

    assert_eq!(config.src.root, "source");
    assert_eq!(config.src.js, "source/js");
    assert_eq!(config.src.sass, "source/sass");
    assert_eq!(config.dest.root, "dist");
    assert_eq!(config.dest.js, "dist/assets/js");
    assert_eq!(config.dest.sass, "dist/assets/css");
}

#[test]
fn test_json_config() {
    let content = r#"{
        "PATH": {
            "SRC": { "ROOT": "src", "JS": "js", "SASS": "sass" },
            "DEST": { "ROOT": "dist/", "JS": "/js", "SASS": "css" }
        }
    }"#;
    let config = parse_config(content).unwrap();

    assert_eq!(
        config,
        ProjectConfig {
            src: PathGroup {
                root: "src".to_string(),
                js: "src/js".to_string(),
                sass: "src/sass".to_string(),
            },
            dest: PathGroup {
                root: "dist".to_string(),
                js: "dist/js".to_string(),
                sass: "dist/css".to_string(),
            },
        }
    );
}

#[test]
fn test_unresolved_placeholder_is_an_error() {
    let input = input(&[("src", "src"), ("srcJs", "js"), ("srcSass", "sass")]);
    let result = parse_config(&input.render(LITERAL));

    match result {
        Err(Error::ConfigEvaluationError(msg)) => assert!(msg.contains("dest")),
        other => panic!("Expected ConfigEvaluationError, got {:?}", other),
    }
}

#[test]
fn test_missing_group_or_key() {
    let content = r#"const CONFIG = { PATH: { SRC: { ROOT: "src", JS: "js", SASS: "sass" } } };"#;
    assert!(matches!(parse_config(content), Err(Error::ConfigEvaluationError(_))));

    let content = r#"{ SRC: { ROOT: "src", JS: "js" }, DEST: { ROOT: "d", JS: "j", SASS: "s" } }"#;
    match parse_config(content) {
        Err(Error::ConfigEvaluationError(msg)) => assert!(msg.contains("PATH.SRC.SASS")),
        other => panic!("Expected ConfigEvaluationError, got {:?}", other),
    }

    assert!(matches!(parse_config("not a config"), Err(Error::ConfigEvaluationError(_))));
}

#[test]
fn test_evaluate_builtin_config_template() {
    let input = input(&[
        ("src", "src"),
        ("srcJs", "js"),
        ("srcSass", "sass"),
        ("dest", "dist"),
        ("destJs", "assets/js"),
        ("destSass", "assets/css"),
    ]);
    let config = evaluate_config(&EmbeddedStore::new(), &input).unwrap();

    assert_eq!(config.src.js, "src/js");
    assert_eq!(config.src.sass, "src/sass");
    assert_eq!(config.dest.root, "dist");
    assert_eq!(config.dest.js, "dist/assets/js");
    assert_eq!(config.dest.sass, "dist/assets/css");
}

fn builtin_answers(src_js: &str, dest_js: &str) -> UserInput {
    input(&[
        ("src", "src"),
        ("srcJs", src_js),
        ("srcSass", "sass"),
        ("dest", "dist"),
        ("destJs", dest_js),
        ("destSass", "assets/css"),
    ])
}

#[test]
fn test_double_slash_in_path_is_not_a_comment() {
    let config =
        evaluate_config(&EmbeddedStore::new(), &builtin_answers("js//modules", "assets/js"))
            .unwrap();

    assert_eq!(config.src.js, "src/js//modules");
    assert_eq!(config.dest.js, "dist/assets/js");
}

#[test]
fn test_braces_in_path_values() {
    let config =
        evaluate_config(&EmbeddedStore::new(), &builtin_answers("{js}", "out/}")).unwrap();
    assert_eq!(config.src.js, "src/{js}");
    assert_eq!(config.dest.js, "dist/out/}");

    let content = r#"const CONFIG = { PATH: {
        SRC: { ROOT: "src", JS: "{js}", SASS: "sass" },
        DEST: { ROOT: "dist", JS: "js", SASS: "/* css */" }
    } };"#;
    let config = parse_config(content).unwrap();
    assert_eq!(config.src.js, "src/{js}");
    assert_eq!(config.dest.sass, "dist/* css */");
}

#[test]
fn test_group_names_inside_strings_are_ignored() {
    let content = r#"const NOTE = "SRC: { ROOT: 'wrong', JS: 'x', SASS: 'y' }";
        const CONFIG = { PATH: {
            SRC: { ROOT: "src", JS: "js", SASS: "sass" },
            DEST: { ROOT: "dist", JS: "js", SASS: "css" }
        } };"#;
    let config = parse_config(content).unwrap();
    assert_eq!(config.src.root, "src");
}
