//! credlify's main application entry point and orchestration logic.
//! Handles command-line argument parsing, the scaffolding flow,
//! and coordinates interactions between the different modules.

use std::path::Path;

use credlify::{
    cli::{get_args, Args},
    constants::{DEPENDENCIES, DEV_DEPENDENCIES},
    error::{default_error_handler, Result},
    installer::DependencyInstaller,
    license::{LicenseLookup, OfflineLicenseLookup, SpdxLicenseLookup},
    logger::init_logger,
    manifest::Manifest,
    processor::Materializer,
    prompt::{collect_input, load_answers_from_stdin, DialoguerPrompter},
    scaffold::{scaffold, ManifestOptions},
    template::{DirectoryStore, EmbeddedStore, TemplateStore},
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

fn license_lookup(offline: bool) -> Box<dyn LicenseLookup> {
    if offline {
        return Box::new(OfflineLicenseLookup);
    }
    match SpdxLicenseLookup::new() {
        Ok(lookup) => Box::new(lookup),
        Err(e) => {
            log::warn!("{}", e);
            Box::new(OfflineLicenseLookup)
        }
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Locates package.json (fatal when missing or invalid)
/// 2. Collects answers from stdin and/or prompts
/// 3. Checks collisions, config and root directories before any write
/// 4. Validates or patches package.json
/// 5. Creates the directory structure and copies templates
/// 6. Installs dependencies
fn run(args: Args) -> Result<()> {
    let root = match &args.root {
        Some(root) => root.clone(),
        None => std::env::current_dir()?,
    };
    let mut manifest = Manifest::locate(&root)?;

    let store: Box<dyn TemplateStore> = match &args.templates {
        Some(dir) => Box::new(DirectoryStore::new(dir)?),
        None => Box::new(EmbeddedStore::new()),
    };

    let preloaded =
        if args.stdin { load_answers_from_stdin()? } else { serde_json::Value::Null };
    let mut input = collect_input(&DialoguerPrompter::new(), &preloaded)?;

    let materializer = Materializer::new(&*store, &root, args.steps());
    let options = ManifestOptions { validate_only: args.no_manifest, indent: args.indent };
    let lookup = license_lookup(args.offline);
    let report = scaffold(&materializer, &mut manifest, &mut input, &*lookup, options)?;
    if !report.failures.is_empty() {
        eprintln!("{} template file(s) could not be created.", report.failures.len());
    }

    if args.no_deps {
        println!("Skipped dependency installation");
    } else {
        let installer = DependencyInstaller::new(
            args.package_manager
                .clone()
                .unwrap_or_else(|| DependencyInstaller::default_program().to_string()),
        );
        let (regular, dev) = installer.install_all(DEPENDENCIES, DEV_DEPENDENCIES)?;
        if !regular.success() || !dev.success() {
            eprintln!("Dependency installation did not complete successfully.");
        }
    }

    println!("Project scaffolding completed in {}.", display_root(&root));
    Ok(())
}

fn display_root(root: &Path) -> String {
    root.canonicalize().unwrap_or_else(|_| root.to_path_buf()).display().to_string()
}
