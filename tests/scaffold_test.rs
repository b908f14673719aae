use credlify::error::{Error, Result};
use credlify::input::{Field, UserInput};
use credlify::license::OfflineLicenseLookup;
use credlify::manifest::Manifest;
use credlify::processor::{Materializer, Steps};
use credlify::prompt::{collect_input, Prompter};
use credlify::scaffold::{scaffold, ManifestOptions};
use credlify::template::{DirectoryStore, EmbeddedStore, TemplateStore};
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const MANIFEST: &str = "{\n  \"name\": \"app\",\n  \"license\": \"MIT\"\n}\n";

struct NoPrompt;

impl Prompter for NoPrompt {
    fn text(&self, field: &Field) -> Result<String> {
        Err(Error::PromptError(format!("unexpected prompt for '{}'", field.key)))
    }
}

fn answers() -> UserInput {
    let preloaded = json!({
        "src": "src",
        "dest": "dist",
        "srcJs": "js",
        "destJs": "assets/js",
        "srcSass": "sass",
        "destSass": "assets/css",
        "serverTask": false,
    });
    collect_input(&NoPrompt, &preloaded).unwrap()
}

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("package.json"), MANIFEST).unwrap();
    dir
}

fn run(store: &dyn TemplateStore, root: &Path, options: ManifestOptions) -> Result<()> {
    let mut manifest = Manifest::locate(root)?;
    let mut input = answers();
    let materializer = Materializer::new(store, root, Steps::default());
    scaffold(&materializer, &mut manifest, &mut input, &OfflineLicenseLookup, options).map(|_| ())
}

fn manifest_text(root: &Path) -> String {
    fs::read_to_string(root.join("package.json")).unwrap()
}

#[test]
fn test_existing_source_directory_leaves_manifest_untouched() {
    let project = project();
    let root = project.path();
    fs::create_dir(root.join("src")).unwrap();

    let result = run(&EmbeddedStore::new(), root, ManifestOptions::default());

    assert!(matches!(result, Err(Error::DirectoryExistsError { kind: "Source", .. })));
    assert_eq!(manifest_text(root), MANIFEST);
    assert!(!root.join("dist").exists());
    assert!(!root.join("config.js").exists());
}

#[test]
fn test_config_failure_leaves_manifest_untouched() {
    let templates = TempDir::new().unwrap();
    fs::write(templates.path().join("args.js"), "args").unwrap();
    let store = DirectoryStore::new(templates.path()).unwrap();
    let project = project();

    let result = run(&store, project.path(), ManifestOptions::default());

    assert!(matches!(result, Err(Error::ConfigEvaluationError(_))));
    assert_eq!(manifest_text(project.path()), MANIFEST);
    assert!(!project.path().join("args.js").exists());
}

#[test]
fn test_collision_leaves_manifest_untouched() {
    let project = project();
    fs::write(project.path().join("webpack.config.js"), "mine").unwrap();

    let result = run(&EmbeddedStore::new(), project.path(), ManifestOptions::default());

    assert!(matches!(result, Err(Error::CollisionError { .. })));
    assert_eq!(manifest_text(project.path()), MANIFEST);
}

#[test]
fn test_successful_run_patches_manifest() {
    let project = project();
    let root = project.path();

    run(&EmbeddedStore::new(), root, ManifestOptions::default()).unwrap();

    let manifest: serde_json::Value = serde_json::from_str(&manifest_text(root)).unwrap();
    assert_eq!(manifest["type"], "module");
    assert_eq!(manifest["imports"]["#root/*"], "./*.js");
    assert!(root.join("src/js/index.js").is_file());
    assert!(fs::read_to_string(root.join("dist/index.html")).unwrap().contains("<title>app</title>"));
    // Offline lookup degrades to an empty license text
    assert_eq!(fs::read_to_string(root.join("LICENSE")).unwrap(), "\n");
}

#[test]
fn test_validate_only_rejects_incomplete_manifest() {
    let project = project();
    let options = ManifestOptions { validate_only: true, indent: None };

    let result = run(&EmbeddedStore::new(), project.path(), options);

    assert!(matches!(result, Err(Error::ManifestInvalid { .. })));
    assert_eq!(manifest_text(project.path()), MANIFEST);
    assert!(!project.path().join("src").exists());
}
