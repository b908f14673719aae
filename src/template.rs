//! Template enumeration and loading.
//! Templates come either from the set embedded in the binary or from a
//! directory on disk; both are exposed through [`TemplateStore`].

use crate::constants::{IGNORE_FILE, TEMPLATE_MARKER};
use crate::error::{Error, Result};
use crate::ignore::parse_ignore_file;
use log::debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// How a template is materialized, decided from its file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    /// No marker: written at its relative path.
    Direct,
    /// One leading marker: the marker is stripped, then written.
    RootRelative,
    /// Two leading markers: rendered but kept in memory for well-known files.
    Captured,
}

impl TemplateKind {
    pub fn classify(relative_path: &str) -> Self {
        let mut chars = relative_path.chars();
        match (chars.next(), chars.next()) {
            (Some(TEMPLATE_MARKER), Some(TEMPLATE_MARKER)) => TemplateKind::Captured,
            (Some(TEMPLATE_MARKER), _) => TemplateKind::RootRelative,
            _ => TemplateKind::Direct,
        }
    }

    /// Returns the template path with this kind's markers removed.
    pub fn strip<'a>(&self, relative_path: &'a str) -> &'a str {
        let markers = match self {
            TemplateKind::Direct => 0,
            TemplateKind::RootRelative => 1,
            TemplateKind::Captured => 2,
        };
        &relative_path[markers * TEMPLATE_MARKER.len_utf8()..]
    }
}

/// A template loaded from a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    pub relative_path: String,
    pub raw_content: String,
}

impl TemplateFile {
    pub fn kind(&self) -> TemplateKind {
        TemplateKind::classify(&self.relative_path)
    }

    /// Name of the template without its markers.
    pub fn target_name(&self) -> &str {
        self.kind().strip(&self.relative_path)
    }
}

/// Where a template ends up inside the project, or `None` when it is captured.
pub fn destination_path<P: AsRef<Path>>(relative_path: &str, project_root: P) -> Option<PathBuf> {
    match TemplateKind::classify(relative_path) {
        TemplateKind::Captured => None,
        kind => Some(project_root.as_ref().join(kind.strip(relative_path))),
    }
}

/// Source of template files.
///
/// `list_templates` must return the same order on every call, since both the
/// pre-flight scan and the copy pass iterate it.
pub trait TemplateStore {
    /// Relative paths of all templates, in a stable order.
    fn list_templates(&self) -> Vec<String>;

    /// Raw text of one template.
    fn load_template(&self, relative_path: &str) -> Result<String>;

    fn load(&self, relative_path: &str) -> Result<TemplateFile> {
        Ok(TemplateFile {
            relative_path: relative_path.to_string(),
            raw_content: self.load_template(relative_path)?,
        })
    }
}

/// Templates read from a directory on disk.
pub struct DirectoryStore {
    root: PathBuf,
    templates: Vec<String>,
}

impl DirectoryStore {
    /// Walks `root` once and records every template file it contains.
    ///
    /// # Errors
    /// * `Error::TemplateNotFound` if `root` is not a directory
    /// * `Error::IgnoreError` if the ignore file holds an invalid glob
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(Error::TemplateNotFound { path: root.display().to_string() });
        }

        let ignored = parse_ignore_file(root.join(IGNORE_FILE))?;
        let mut templates = Vec::new();

        for entry in WalkDir::new(&root).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| Error::IoError(e.into()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(&root)
                .map_err(|e| Error::IoError(io::Error::other(e)))?;
            let relative = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");

            if ignored.is_match(&relative) {
                debug!("Skipping template '{}' matched by ignore patterns", relative);
                continue;
            }
            templates.push(relative);
        }

        debug!("Found {} templates in '{}'", templates.len(), root.display());
        Ok(Self { root, templates })
    }
}

impl TemplateStore for DirectoryStore {
    fn list_templates(&self) -> Vec<String> {
        self.templates.clone()
    }

    fn load_template(&self, relative_path: &str) -> Result<String> {
        fs::read_to_string(self.root.join(relative_path)).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => {
                Error::TemplateNotFound { path: relative_path.to_string() }
            }
            _ => Error::IoError(e),
        })
    }
}

/// Built-in template set, embedded at compile time.
const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    ("LICENSE", include_str!("../templates/LICENSE")),
    ("_.gitignore", include_str!("../templates/_.gitignore")),
    ("__.gitkeep", include_str!("../templates/__.gitkeep")),
    ("__index.html", include_str!("../templates/__index.html")),
    ("args.js", include_str!("../templates/args.js")),
    ("babel.config.js", include_str!("../templates/babel.config.js")),
    ("config.js", include_str!("../templates/config.js")),
    ("gulpfile.babel.js", include_str!("../templates/gulpfile.babel.js")),
    ("webpack.config.js", include_str!("../templates/webpack.config.js")),
];

/// Templates compiled into the binary.
pub struct EmbeddedStore {
    templates: Vec<(&'static str, &'static str)>,
}

impl EmbeddedStore {
    pub fn new() -> Self {
        let mut templates = BUILTIN_TEMPLATES.to_vec();
        templates.sort_by(|a, b| a.0.cmp(b.0));
        Self { templates }
    }
}

impl Default for EmbeddedStore {
    fn default() -> Self {
        EmbeddedStore::new()
    }
}

impl TemplateStore for EmbeddedStore {
    fn list_templates(&self) -> Vec<String> {
        self.templates.iter().map(|(name, _)| name.to_string()).collect()
    }

    fn load_template(&self, relative_path: &str) -> Result<String> {
        self.templates
            .iter()
            .find(|(name, _)| *name == relative_path)
            .map(|(_, content)| content.to_string())
            .ok_or_else(|| Error::TemplateNotFound { path: relative_path.to_string() })
    }
}
