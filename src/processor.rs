//! Project materialization.
//! Turns the template set and the user input into files and directories in
//! the target project without ever overwriting anything that already exists.

use crate::config::{evaluate_config, ProjectConfig};
use crate::constants::{
    CAPTURED_GITKEEP, CAPTURED_INDEX, JS_ENTRY, MODULE_PLACEHOLDER_DIR, SASS_ENTRY,
};
use crate::error::{Error, FileError, Result};
use crate::input::UserInput;
use crate::placeholder::placeholders;
use crate::template::{destination_path, TemplateKind, TemplateStore};
use indexmap::IndexMap;
use log::{debug, error, warn};
use std::fs::{DirBuilder, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Which materialization steps run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Steps {
    pub dirs: bool,
    pub files: bool,
}

impl Default for Steps {
    fn default() -> Self {
        Self { dirs: true, files: true }
    }
}

/// A single file system change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOperation {
    /// Create a directory and any missing parents.
    CreateDir { target: PathBuf },
    /// Create a file that must not exist yet.
    CreateFile { target: PathBuf, content: String },
}

impl FileOperation {
    pub fn target(&self) -> &Path {
        match self {
            FileOperation::CreateDir { target } | FileOperation::CreateFile { target, .. } => {
                target
            }
        }
    }

    pub fn apply(&self) -> io::Result<()> {
        match self {
            FileOperation::CreateDir { target } => create_dir(target),
            FileOperation::CreateFile { target, content } => write_new_file(target, content),
        }
    }
}

/// Creates `path` with parents, succeeding if it already exists.
pub fn create_dir(path: &Path) -> io::Result<()> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }
    builder.create(path)
}

/// Writes `content` to a new file, failing if `path` already exists.
pub fn write_new_file(path: &Path, content: &str) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }
    let mut file = options.open(path)?;
    file.write_all(content.as_bytes())
}

/// Applies every operation, returning one outcome per operation in order.
///
/// A failing operation does not prevent the others from running.
pub fn settle_all(operations: &[FileOperation]) -> Vec<io::Result<()>> {
    operations.iter().map(FileOperation::apply).collect()
}

fn failure_messages(operations: &[FileOperation], outcomes: Vec<io::Result<()>>) -> Vec<String> {
    operations
        .iter()
        .zip(outcomes)
        .filter_map(|(operation, outcome)| {
            outcome
                .err()
                .map(|e| format!("Could not create '{}': {}", operation.target().display(), e))
        })
        .collect()
}

/// Result of the template copy pass.
#[derive(Debug, Default)]
pub struct CopyReport {
    /// Files written into the project, in template order.
    pub written: Vec<PathBuf>,
    /// Rendered captured templates keyed by their unprefixed name.
    pub captured: IndexMap<String, String>,
    /// Per-file failures; the batch continued past each of them.
    pub failures: Vec<FileError>,
}

/// Materializes templates into one project root.
pub struct Materializer<'a> {
    store: &'a dyn TemplateStore,
    root: PathBuf,
    steps: Steps,
}

impl<'a> Materializer<'a> {
    pub fn new<P: AsRef<Path>>(store: &'a dyn TemplateStore, root: P, steps: Steps) -> Self {
        Self { store, root: root.as_ref().to_path_buf(), steps }
    }

    pub fn steps(&self) -> Steps {
        self.steps
    }

    /// Checks every template destination before anything is written.
    ///
    /// All destinations are checked so the user sees every collision at once.
    /// Nothing is checked when the copy step is disabled.
    ///
    /// # Errors
    /// * `Error::CollisionError` listing each existing destination
    pub fn preflight(&self) -> Result<()> {
        if !self.steps.files {
            return Ok(());
        }

        let collisions: Vec<String> = self
            .store
            .list_templates()
            .iter()
            .filter_map(|relative| {
                let target = destination_path(relative, &self.root)?;
                let exists = target.symlink_metadata().is_ok();
                exists.then(|| {
                    target.strip_prefix(&self.root).unwrap_or(target.as_path()).display().to_string()
                })
            })
            .collect();

        if collisions.is_empty() {
            debug!("Pre-flight scan found no collisions");
            Ok(())
        } else {
            Err(Error::CollisionError { paths: collisions })
        }
    }

    fn subdirectories(&self, config: &ProjectConfig) -> Vec<PathBuf> {
        vec![
            self.root.join(&config.src.js).join(MODULE_PLACEHOLDER_DIR),
            self.root.join(&config.src.sass),
            self.root.join(&config.dest.js),
            self.root.join(&config.dest.sass),
        ]
    }

    /// Fails if the source or destination root already exists.
    ///
    /// # Errors
    /// * `Error::DirectoryExistsError` naming the first existing root
    pub fn check_roots(&self, config: &ProjectConfig) -> Result<()> {
        for (kind, root) in [("Source", &config.src.root), ("Destination", &config.dest.root)] {
            let path = self.root.join(root);
            if path.exists() {
                return Err(Error::DirectoryExistsError { kind, path: path.display().to_string() });
            }
        }
        Ok(())
    }

    /// Creates the source and destination directory trees.
    ///
    /// Roots are created first, then the four subdirectories. Every failure is
    /// collected before deciding.
    ///
    /// # Errors
    /// * `Error::DirectoryExistsError` if either root already exists; nothing
    ///   is created in that case
    /// * `Error::StructureError` with every failed creation
    pub fn create_structure(&self, config: &ProjectConfig) -> Result<()> {
        self.check_roots(config)?;
        println!("Creating source/destination directories...");

        let src_root = self.root.join(&config.src.root);
        let dest_root = self.root.join(&config.dest.root);

        let roots = [
            FileOperation::CreateDir { target: src_root },
            FileOperation::CreateDir { target: dest_root },
        ];
        let mut failures = failure_messages(&roots, settle_all(&roots));

        let subdirectories: Vec<FileOperation> = self
            .subdirectories(config)
            .into_iter()
            .map(|target| FileOperation::CreateDir { target })
            .collect();
        failures.extend(failure_messages(&subdirectories, settle_all(&subdirectories)));

        self.finish_step(failures)
    }

    /// Writes the entry points and captured files into the created structure.
    ///
    /// Captured files are skipped when the copy pass did not capture them.
    ///
    /// # Errors
    /// * `Error::StructureError` with every failed write
    pub fn populate_structure(
        &self,
        config: &ProjectConfig,
        captured: &IndexMap<String, String>,
    ) -> Result<()> {
        let src_js = self.root.join(&config.src.js);
        let mut operations = vec![
            FileOperation::CreateFile { target: src_js.join(JS_ENTRY), content: String::new() },
            FileOperation::CreateFile {
                target: self.root.join(&config.src.sass).join(SASS_ENTRY),
                content: String::new(),
            },
        ];

        let captured_targets = [
            (CAPTURED_GITKEEP, src_js.join(MODULE_PLACEHOLDER_DIR).join(CAPTURED_GITKEEP)),
            (CAPTURED_INDEX, self.root.join(&config.dest.root).join(CAPTURED_INDEX)),
        ];
        for (name, target) in captured_targets {
            match captured.get(name) {
                Some(content) => {
                    operations.push(FileOperation::CreateFile { target, content: content.clone() })
                }
                None => debug!("No captured '{}' template, skipping {}", name, target.display()),
            }
        }

        let failures = failure_messages(&operations, settle_all(&operations));
        self.finish_step(failures)
    }

    fn finish_step(&self, failures: Vec<String>) -> Result<()> {
        if failures.is_empty() {
            return Ok(());
        }
        for failure in &failures {
            error!("{}", failure);
        }
        Err(Error::StructureError { failures })
    }

    /// Renders every template and writes or captures it.
    ///
    /// A template that cannot be read or written is reported and skipped; the
    /// pass always visits every template.
    pub fn copy_templates(&self, input: &UserInput) -> CopyReport {
        println!("Creating build pipeline files...");
        let mut report = CopyReport::default();

        for relative in self.store.list_templates() {
            let template = match self.store.load(&relative) {
                Ok(template) => template,
                Err(source) => {
                    let failure = FileError::Read { template: relative, source };
                    warn!("{}", failure);
                    report.failures.push(failure);
                    continue;
                }
            };

            let content = input.render(&template.raw_content);
            let unresolved = placeholders(&content);
            if !unresolved.is_empty() {
                debug!("Template '{}' keeps unresolved placeholders {:?}", relative, unresolved);
            }

            let name = template.target_name();
            if template.kind() == TemplateKind::Captured {
                debug!("Captured template '{}'", name);
                report.captured.insert(name.to_string(), content);
                continue;
            }

            let target = self.root.join(name);
            match self.write_template(&target, &content) {
                Ok(()) => {
                    println!("Created: '{}'", target.display());
                    report.written.push(target);
                }
                Err(source) => {
                    let failure = FileError::from_write(target, source);
                    warn!("{}", failure);
                    report.failures.push(failure);
                }
            }
        }

        report
    }

    fn write_template(&self, target: &Path, content: &str) -> io::Result<()> {
        if let Some(parent) = target.parent() {
            if parent != self.root.as_path() {
                create_dir(parent)?;
            }
        }
        write_new_file(target, content)
    }

    /// Runs every check that can abort the run before anything is written:
    /// the pre-flight scan, config evaluation and the root directory checks.
    ///
    /// # Returns
    /// * `Result<Option<ProjectConfig>>` - The evaluated config, or `None`
    ///   when the directory step is disabled
    ///
    /// # Errors
    /// Any step-level error raised by those checks.
    pub fn prepare(&self, input: &UserInput) -> Result<Option<ProjectConfig>> {
        self.preflight()?;
        if !self.steps.dirs {
            return Ok(None);
        }
        let config = evaluate_config(self.store, input)?;
        self.check_roots(&config)?;
        Ok(Some(config))
    }

    /// Writes the project: directory structure, template copy, then the
    /// structure's files. `config` comes from [`Materializer::prepare`].
    ///
    /// # Errors
    /// Any step-level error; the following steps do not run.
    pub fn materialize(
        &self,
        input: &UserInput,
        config: Option<&ProjectConfig>,
    ) -> Result<CopyReport> {
        match config {
            Some(config) => self.create_structure(config)?,
            None => println!("Skipped project structure generation"),
        }

        let report = if self.steps.files {
            self.copy_templates(input)
        } else {
            println!("Skipped template file creation");
            CopyReport::default()
        };

        if let Some(config) = config {
            self.populate_structure(config, &report.captured)?;
        }

        Ok(report)
    }

    /// Prepares and materializes in one go.
    pub fn run(&self, input: &UserInput) -> Result<CopyReport> {
        let config = self.prepare(input)?;
        self.materialize(input, config.as_ref())
    }
}
