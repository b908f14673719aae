//! Command-line interface implementation for credlify.
//! Provides argument parsing using clap.

use crate::manifest::Indent;
use crate::processor::Steps;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments structure for credlify.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "credlify: scaffold a gulp/webpack/sass build pipeline into an npm project",
    long_about = None
)]
pub struct Args {
    /// Project root directory (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Use the templates in this directory instead of the built-in set
    #[arg(long, value_name = "DIR")]
    pub templates: Option<PathBuf>,

    /// Skip creating the source/destination directory structure
    #[arg(long)]
    pub no_dirs: bool,

    /// Skip copying template files
    #[arg(long)]
    pub no_files: bool,

    /// Skip installing dependencies
    #[arg(long)]
    pub no_deps: bool,

    /// Do not patch package.json; fail if required fields are missing
    #[arg(long)]
    pub no_manifest: bool,

    /// Indentation used when rewriting package.json ('tab' or a number of spaces).
    /// Detected from the existing file when omitted.
    #[arg(long, value_name = "INDENT")]
    pub indent: Option<Indent>,

    /// Package manager executable used to install dependencies
    #[arg(long, value_name = "PROGRAM")]
    pub package_manager: Option<String>,

    /// Read answers as a JSON object from stdin; missing answers are prompted
    #[arg(short, long)]
    pub stdin: bool,

    /// Do not fetch the license text over the network
    #[arg(long)]
    pub offline: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Materialization steps selected by the flags.
    pub fn steps(&self) -> Steps {
        Steps { dirs: !self.no_dirs, files: !self.no_files }
    }
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With clap's default error handling for invalid arguments, and after
///   printing help or version
pub fn get_args() -> Args {
    Args::parse()
}
