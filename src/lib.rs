//! credlify scaffolds a front-end build pipeline into an existing npm project.
//! It renders a fixed template set with the user's answers, creates the
//! source/destination directory skeleton, patches `package.json` and installs
//! the build dependencies.

/// Command-line interface module for the credlify application
pub mod cli;

/// Project path configuration read from the rendered config template
pub mod config;

/// Common constants: template markers, well-known files and package lists
pub mod constants;

/// Error types and handling for the credlify application
pub mod error;

/// Template directory ignore patterns
/// Processes .credlifyignore files to exclude specific template paths
pub mod ignore;

/// Package manager invocation
pub mod installer;

/// User answers and the placeholder values derived from them
pub mod input;

/// License text lookup
pub mod license;

/// Logger setup
pub mod logger;

/// package.json lookup, validation and patching
pub mod manifest;

/// `%%[name]%%` placeholder substitution
pub mod placeholder;

/// Core materialization: collision scan, directory structure, template copy
pub mod processor;

/// User input and interaction handling
pub mod prompt;

/// End-to-end scaffolding flow: checks, manifest update, materialization
pub mod scaffold;

/// Template stores: built-in set and template directories
pub mod template;
