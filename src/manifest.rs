//! `package.json` lookup, validation and patching.
//! The generated build files are ES modules importing `#root/...`, so the
//! manifest must declare `"type": "module"` and the matching import alias.

use crate::constants::{MANIFEST_FILE, MANIFEST_IMPORT_ALIAS, MANIFEST_MODULE_TYPE};
use crate::error::{Error, Result};
use log::debug;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Indentation style of the manifest file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    Spaces(usize),
    Tab,
}

impl Default for Indent {
    fn default() -> Self {
        Indent::Spaces(2)
    }
}

impl FromStr for Indent {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tab" | "tabs" | "\t" => Ok(Indent::Tab),
            other => other
                .parse::<usize>()
                .ok()
                .filter(|n| (1..=16).contains(n))
                .map(Indent::Spaces)
                .ok_or_else(|| format!("invalid indent '{}', use 'tab' or 1-16 spaces", s)),
        }
    }
}

impl Indent {
    /// Detects the indentation of the first indented line in `content`.
    pub fn detect(content: &str) -> Option<Indent> {
        content.lines().find_map(|line| {
            if line.starts_with('\t') {
                Some(Indent::Tab)
            } else {
                let spaces = line.len() - line.trim_start_matches(' ').len();
                (spaces > 0 && line.len() > spaces).then_some(Indent::Spaces(spaces))
            }
        })
    }

    fn unit(&self) -> Vec<u8> {
        match self {
            Indent::Spaces(n) => vec![b' '; *n],
            Indent::Tab => vec![b'\t'],
        }
    }
}

/// Finds the nearest manifest in `start` or one of its ancestors.
pub fn find_manifest<P: AsRef<Path>>(start: P) -> Option<PathBuf> {
    start
        .as_ref()
        .ancestors()
        .map(|dir| dir.join(MANIFEST_FILE))
        .find(|candidate| candidate.is_file())
}

/// A parsed `package.json`, keeping the original key order.
#[derive(Debug)]
pub struct Manifest {
    path: PathBuf,
    data: Map<String, Value>,
    indent: Indent,
    trailing_newline: bool,
}

impl Manifest {
    /// Locates and loads the nearest manifest above `root`.
    ///
    /// # Errors
    /// * `Error::ManifestMissing` if no manifest exists in `root` or its ancestors
    /// * `Error::ManifestInvalid` if the file is not a JSON object
    pub fn locate<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();
        let path = find_manifest(root)
            .ok_or_else(|| Error::ManifestMissing { root: root.display().to_string() })?;
        Self::load(path)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = fs::read_to_string(&path)?;
        Self::parse(path, &content)
    }

    fn parse(path: PathBuf, content: &str) -> Result<Self> {
        let invalid = |reason: String| Error::ManifestInvalid {
            path: path.display().to_string(),
            reason,
        };
        let data = match serde_json::from_str::<Value>(content) {
            Ok(Value::Object(data)) => data,
            Ok(_) => return Err(invalid("expected a JSON object".to_string())),
            Err(e) => return Err(invalid(e.to_string())),
        };
        debug!("Loaded manifest {}", path.display());

        Ok(Self {
            indent: Indent::detect(content).unwrap_or_default(),
            trailing_newline: content.ends_with('\n'),
            path,
            data,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Indentation detected in the file.
    pub fn indent(&self) -> Indent {
        self.indent
    }

    /// String value of a top-level field, or an empty string.
    pub fn field(&self, key: &str) -> &str {
        self.data.get(key).and_then(Value::as_str).unwrap_or_default()
    }

    /// Required fields that are absent or hold the wrong value.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.data.get("type").and_then(Value::as_str) != Some(MANIFEST_MODULE_TYPE) {
            missing.push("type");
        }
        let (alias, target) = MANIFEST_IMPORT_ALIAS;
        let has_alias = self
            .data
            .get("imports")
            .and_then(|imports| imports.get(alias))
            .and_then(Value::as_str)
            == Some(target);
        if !has_alias {
            missing.push("imports");
        }
        missing
    }

    /// Fails unless every required field is already present.
    pub fn validate(&self) -> Result<()> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            return Ok(());
        }
        Err(Error::ManifestInvalid {
            path: self.path.display().to_string(),
            reason: format!(
                "missing required fields ({}), run without --no-manifest to add them",
                missing.join(", ")
            ),
        })
    }

    /// Injects the required fields, keeping existing keys in place.
    ///
    /// # Returns
    /// * `Result<bool>` - Whether the manifest changed
    ///
    /// # Errors
    /// * `Error::ManifestInvalid` if `imports` exists but is not an object
    pub fn patch(&mut self) -> Result<bool> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            return Ok(false);
        }

        if missing.contains(&"type") {
            self.data.insert("type".to_string(), Value::from(MANIFEST_MODULE_TYPE));
        }
        if missing.contains(&"imports") {
            let (alias, target) = MANIFEST_IMPORT_ALIAS;
            let imports =
                self.data.entry("imports").or_insert_with(|| Value::Object(Map::new()));
            match imports.as_object_mut() {
                Some(imports) => {
                    imports.insert(alias.to_string(), Value::from(target));
                }
                None => {
                    return Err(Error::ManifestInvalid {
                        path: self.path.display().to_string(),
                        reason: "'imports' must be an object".to_string(),
                    })
                }
            }
        }
        Ok(true)
    }

    /// Serializes the manifest with the given indentation.
    pub fn render(&self, indent: Indent) -> Result<String> {
        let unit = indent.unit();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(&unit);
        let mut buf = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.data
            .serialize(&mut serializer)
            .map_err(|e| Error::IoError(e.into()))?;

        let mut content = String::from_utf8(buf)
            .map_err(|e| Error::IoError(std::io::Error::other(e)))?;
        if self.trailing_newline {
            content.push('\n');
        }
        Ok(content)
    }

    /// Writes the manifest back, using `indent` or the detected indentation.
    pub fn save(&self, indent: Option<Indent>) -> Result<()> {
        let content = self.render(indent.unwrap_or(self.indent))?;
        fs::write(&self.path, content)?;
        debug!("Updated manifest {}", self.path.display());
        Ok(())
    }
}
