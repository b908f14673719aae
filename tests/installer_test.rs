use credlify::constants::{DEPENDENCIES, DEV_DEPENDENCIES};
use credlify::error::Error;
use credlify::installer::{filter_packages, install_args, DependencyInstaller, InstallOutcome};

#[test]
fn test_filter_packages() {
    let packages = ["gulp", " webpack ", "bad name", "", "rm -rf", "@babel/core"];
    assert_eq!(filter_packages(&packages), vec!["gulp", "webpack", "@babel/core"]);
}

#[test]
fn test_install_args() {
    assert_eq!(
        install_args(&["gulp", "del"], false),
        Some(vec!["install".to_string(), "--save".to_string(), "gulp".to_string(), "del".to_string()])
    );
    assert_eq!(
        install_args(&["gulp"], true),
        Some(vec!["install".to_string(), "--save-dev".to_string(), "gulp".to_string()])
    );
    assert_eq!(install_args(&["a b", "  "], true), None);
    assert_eq!(install_args::<&str>(&[], false), None);
}

#[test]
fn test_builtin_package_lists_are_clean() {
    assert_eq!(filter_packages(DEPENDENCIES).len(), DEPENDENCIES.len());
    assert_eq!(filter_packages(DEV_DEPENDENCIES).len(), DEV_DEPENDENCIES.len());
}

#[test]
fn test_empty_list_is_skipped() {
    // The program does not exist, so running it would fail
    let installer = DependencyInstaller::new("credlify-missing-package-manager");
    let outcome = installer.install(&["has space"], false).unwrap();

    assert_eq!(outcome, InstallOutcome::Skipped);
    assert!(outcome.success());
}

#[test]
fn test_missing_program() {
    let installer = DependencyInstaller::new("credlify-missing-package-manager");
    let result = installer.install(&["gulp"], true);

    match result {
        Err(Error::ProcessError { program, .. }) => {
            assert_eq!(program, "credlify-missing-package-manager")
        }
        other => panic!("Expected ProcessError, got {:?}", other),
    }
}

#[cfg(unix)]
#[test]
fn test_exit_status_is_reported() {
    let installer = DependencyInstaller::new("true");
    let (regular, dev) = installer.install_all(&["gulp"], &["del"]).unwrap();
    assert!(regular.success());
    assert!(dev.success());

    let installer = DependencyInstaller::new("false");
    let outcome = installer.install(&["gulp"], false).unwrap();
    assert!(matches!(outcome, InstallOutcome::Finished(_)));
    assert!(!outcome.success());
}

#[test]
fn test_default_program() {
    let installer = DependencyInstaller::default();
    assert_eq!(installer.program(), DependencyInstaller::default_program());
}
