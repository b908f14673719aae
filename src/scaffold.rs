//! Scaffolding flow shared by the binary and its tests.
//! Every check that can abort the run happens before `package.json` or any
//! project file is touched.

use crate::error::Result;
use crate::input::UserInput;
use crate::license::{resolve_license_text, LicenseLookup};
use crate::manifest::{Indent, Manifest};
use crate::processor::{CopyReport, Materializer};
use log::debug;

/// How the manifest step treats missing fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManifestOptions {
    /// Fail on missing fields instead of adding them.
    pub validate_only: bool,
    /// Indentation for the rewritten file; detected when `None`.
    pub indent: Option<Indent>,
}

/// Validates or patches the manifest.
///
/// # Returns
/// * `Result<bool>` - Whether the manifest file was rewritten
///
/// # Errors
/// * `Error::ManifestInvalid` if required fields are missing and
///   `validate_only` is set, or if the fields cannot be added
pub fn update_manifest(manifest: &mut Manifest, options: ManifestOptions) -> Result<bool> {
    if options.validate_only {
        manifest.validate()?;
        return Ok(false);
    }
    if !manifest.patch()? {
        debug!("Manifest already has the required fields");
        return Ok(false);
    }
    manifest.save(options.indent)?;
    println!("Updated: '{}'", manifest.path().display());
    Ok(true)
}

/// Scaffolds the project for already collected `input`.
///
/// # Flow
/// 1. Adds the package metadata from the manifest
/// 2. Runs the pre-write checks (collisions, config, root directories)
/// 3. Validates or patches the manifest
/// 4. Resolves the license text when template files are written
/// 5. Creates directories and files
///
/// # Errors
/// Any step-level error. Errors from step 2 leave the manifest and the
/// project untouched.
pub fn scaffold(
    materializer: &Materializer,
    manifest: &mut Manifest,
    input: &mut UserInput,
    lookup: &dyn LicenseLookup,
    options: ManifestOptions,
) -> Result<CopyReport> {
    input.apply_package(
        manifest.field("name"),
        manifest.field("description"),
        manifest.field("license"),
    );

    let config = materializer.prepare(input)?;
    update_manifest(manifest, options)?;

    if materializer.steps().files {
        input.set_license_text(resolve_license_text(lookup, manifest.field("license")));
    }

    materializer.materialize(input, config.as_ref())
}
