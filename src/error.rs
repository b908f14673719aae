//! Error handling for credlify.
//! Defines the step-level errors that abort a run and the file-level
//! errors that are reported and skipped.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Step-level errors.
///
/// Every variant aborts the remaining pipeline: once one of these is
/// returned, no later step runs.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// A template requested from the store does not exist.
    #[error("Template '{path}' not found.")]
    TemplateNotFound { path: String },

    /// Represents validation failures in user input
    #[error("Validation error: {0}.")]
    ValidationError(String),

    /// One or more template destinations already exist in the project.
    #[error(
        "The following files already exist:\n\n{}\n\nExiting to avoid breaking anything.",
        .paths.join("\n")
    )]
    CollisionError { paths: Vec<String> },

    /// The source or destination root directory already exists.
    #[error("{kind} directory '{path}' already exists, exiting to avoid breaking anything.")]
    DirectoryExistsError { kind: &'static str, path: String },

    #[error("No package.json file found in '{root}' or any parent directory, run 'npm init' first.")]
    ManifestMissing { root: String },

    #[error("Invalid package.json at '{path}': {reason}.")]
    ManifestInvalid { path: String, reason: String },

    /// The configuration template could not be turned into path data.
    #[error("Config evaluation error: {0}.")]
    ConfigEvaluationError(String),

    /// Directory structure generation finished with failures.
    #[error("Project structure generation failed:\n{}", .failures.join("\n"))]
    StructureError { failures: Vec<String> },

    /// Interactive input failed or was cancelled.
    #[error("Prompt error: {0}.")]
    PromptError(String),

    /// The package manager could not be started.
    #[error("Failed to run '{program}': {source}.")]
    ProcessError {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("License lookup error: {0}.")]
    LicenseError(String),

    /// Represents errors in processing .credlifyignore files
    #[error("Ignore file error: {0}.")]
    IgnoreError(String),
}

/// File-level errors raised while copying templates.
///
/// These never abort the batch: the file is skipped and the error is
/// recorded in the copy report.
#[derive(Error, Debug)]
pub enum FileError {
    #[error("Template file '{template}' could not be copied")]
    Read {
        template: String,
        #[source]
        source: Error,
    },

    #[error("File at '{}' already exists", .path.display())]
    AlreadyExists { path: PathBuf },

    #[error("Could not create file at '{}'", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FileError {
    /// Classifies a failed exclusive-create write by its cause.
    pub fn from_write(path: PathBuf, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::AlreadyExists {
            FileError::AlreadyExists { path }
        } else {
            FileError::Write { path, source }
        }
    }
}

/// Convenience type alias for Results with Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{}", err);
    std::process::exit(1);
}
