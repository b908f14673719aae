//! Dependency installation through an external package manager.

use crate::error::{Error, Result};
use log::{debug, warn};
use std::process::{Command, ExitStatus, Stdio};

/// Outcome of one install call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    /// Nothing left to install after filtering.
    Skipped,
    /// The package manager ran and exited with this status.
    Finished(ExitStatus),
}

impl InstallOutcome {
    pub fn success(&self) -> bool {
        match self {
            InstallOutcome::Skipped => true,
            InstallOutcome::Finished(status) => status.success(),
        }
    }
}

/// Drops empty names and names containing whitespace.
pub fn filter_packages<S: AsRef<str>>(packages: &[S]) -> Vec<String> {
    packages
        .iter()
        .map(|name| name.as_ref().trim())
        .filter(|name| {
            let keep = !name.is_empty() && !name.contains(char::is_whitespace);
            if !keep && !name.is_empty() {
                warn!("Skipping invalid package name '{}'", name);
            }
            keep
        })
        .map(str::to_string)
        .collect()
}

/// Builds the `install --save[-dev] <names...>` arguments, or `None` when
/// there is nothing to install.
pub fn install_args<S: AsRef<str>>(packages: &[S], dev: bool) -> Option<Vec<String>> {
    let packages = filter_packages(packages);
    if packages.is_empty() {
        return None;
    }
    let flag = if dev { "--save-dev" } else { "--save" };
    let mut args = vec!["install".to_string(), flag.to_string()];
    args.extend(packages);
    Some(args)
}

/// Runs the package manager's install command.
pub struct DependencyInstaller {
    program: String,
}

impl DependencyInstaller {
    pub fn new<S: Into<String>>(program: S) -> Self {
        Self { program: program.into() }
    }

    /// Default package manager executable for this platform.
    pub fn default_program() -> &'static str {
        if cfg!(windows) {
            "npm.cmd"
        } else {
            "npm"
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Installs `packages`, passing the package manager's stdio through.
    ///
    /// # Errors
    /// * `Error::ProcessError` if the program cannot be started
    pub fn install<S: AsRef<str>>(&self, packages: &[S], dev: bool) -> Result<InstallOutcome> {
        let Some(args) = install_args(packages, dev) else {
            debug!("No packages to install, skipping");
            return Ok(InstallOutcome::Skipped);
        };

        debug!("Running {} {}", self.program, args.join(" "));
        let status = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| Error::ProcessError { program: self.program.clone(), source })?;

        if !status.success() {
            warn!("'{} {}' exited with {}", self.program, args[..2].join(" "), status);
        }
        Ok(InstallOutcome::Finished(status))
    }

    /// Installs regular dependencies, then development dependencies.
    ///
    /// The second call starts only after the first one exited, so the two
    /// never modify the manifest at the same time.
    pub fn install_all<S: AsRef<str>>(
        &self,
        dependencies: &[S],
        dev_dependencies: &[S],
    ) -> Result<(InstallOutcome, InstallOutcome)> {
        println!("Installing dependencies...");
        let regular = self.install(dependencies, false)?;
        let dev = self.install(dev_dependencies, true)?;
        Ok((regular, dev))
    }
}

impl Default for DependencyInstaller {
    fn default() -> Self {
        DependencyInstaller::new(Self::default_program())
    }
}
