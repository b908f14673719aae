//! User supplied values and the fields derived from them.
//! Everything that ends up in a `%%[name]%%` placeholder lives in [`UserInput`].

use crate::error::{Error, Result};
use crate::placeholder::substitute;
use indexmap::IndexMap;

/// Live reload gulp task inserted into the generated gulpfile on request.
const SERVER_TASK: &str = include_str!("snippets/server-task.js");

const SERVER_IMPORT: &str = "\nimport liveServer from \"live-server\";";

const SERVER_TASK_NAME: &str = "\"server\", ";

const INVALID_PATH: &str =
    "Path may not contain any of the following characters: \\:*?\"<>| or newlines";

const INVALID_YES_NO: &str = "Choose 'yes' or 'no'";

/// Kind of answer a field expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Path,
    YesNo,
}

/// A question asked by the prompt front-end.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub key: &'static str,
    pub message: &'static str,
    pub default: &'static str,
    pub kind: FieldKind,
}

impl Field {
    /// Checks a raw answer for this field.
    pub fn validate(&self, value: &str) -> std::result::Result<(), String> {
        match self.kind {
            FieldKind::Path => validate_path(value),
            FieldKind::YesNo => match parse_yes_no(value) {
                Some(_) => Ok(()),
                None => Err(INVALID_YES_NO.to_string()),
            },
        }
    }
}

/// Questions asked for every project, in prompt order.
pub const FIELDS: [Field; 7] = [
    Field {
        key: "src",
        message: "Source directory (relative to project root)",
        default: "src",
        kind: FieldKind::Path,
    },
    Field {
        key: "dest",
        message: "Destination directory (relative to project root)",
        default: "dist",
        kind: FieldKind::Path,
    },
    Field {
        key: "srcJs",
        message: "JavaScript source directory (relative to source)",
        default: "js",
        kind: FieldKind::Path,
    },
    Field {
        key: "destJs",
        message: "JavaScript bundle destination directory (relative to destination)",
        default: "assets/js",
        kind: FieldKind::Path,
    },
    Field {
        key: "srcSass",
        message: "SASS source directory (relative to source)",
        default: "sass",
        kind: FieldKind::Path,
    },
    Field {
        key: "destSass",
        message: "Stylesheet bundle destination directory (relative to destination)",
        default: "assets/css",
        kind: FieldKind::Path,
    },
    Field {
        key: "serverTask",
        message: "Add optional live server gulp task ('yes' or 'no')",
        default: "yes",
        kind: FieldKind::YesNo,
    },
];

/// Removes leading and trailing slashes and whitespace from a relative path.
pub fn sanitize_path(path: &str) -> String {
    path.trim_matches(|c: char| c == '/' || c.is_whitespace()).to_string()
}

/// Rejects empty paths and paths containing `\ : * ? " < > |` or a newline.
pub fn validate_path(path: &str) -> std::result::Result<(), String> {
    let forbidden = |c: char| matches!(c, '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\n');
    if path.is_empty() || path.contains(forbidden) {
        Err(INVALID_PATH.to_string())
    } else {
        Ok(())
    }
}

/// Parses `y`, `n`, `yes` or `no` in any letter case.
pub fn parse_yes_no(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Placeholder values for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserInput {
    values: IndexMap<String, String>,
}

impl UserInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.values.insert(key.into(), value.into());
    }

    pub fn values(&self) -> &IndexMap<String, String> {
        &self.values
    }

    /// Validates and sanitizes a path answer before storing it.
    ///
    /// # Errors
    /// * `Error::ValidationError` if the path has forbidden characters or is
    ///   empty once sanitized
    pub fn set_path(&mut self, key: &str, raw: &str) -> Result<()> {
        validate_path(raw).map_err(|msg| Error::ValidationError(format!("{}: {}", key, msg)))?;
        let path = sanitize_path(raw);
        if path.is_empty() {
            return Err(Error::ValidationError(format!("{}: path must not be empty", key)));
        }
        self.set(key, path);
        Ok(())
    }

    /// Stores one answer according to the field kind.
    pub fn set_answer(&mut self, field: &Field, raw: &str) -> Result<()> {
        match field.kind {
            FieldKind::Path => self.set_path(field.key, raw),
            FieldKind::YesNo => {
                field
                    .validate(raw)
                    .map_err(|msg| Error::ValidationError(format!("{}: {}", field.key, msg)))?;
                self.set(field.key, raw.to_lowercase());
                Ok(())
            }
        }
    }

    /// Expands the `serverTask` answer into the gulpfile fragments.
    ///
    /// Must run after the path fields are set: the task body references
    /// `%%[dest]%%`.
    pub fn apply_server_task(&mut self) {
        let enabled = self.get("serverTask").and_then(parse_yes_no).unwrap_or(false);
        if enabled {
            let task = self.render(SERVER_TASK);
            self.set("serverImport", SERVER_IMPORT);
            self.set("serverTask", task);
            self.set("serverTaskName", SERVER_TASK_NAME);
        } else {
            self.set("serverImport", "");
            self.set("serverTask", "");
            self.set("serverTaskName", "");
        }
    }

    /// Adds the package metadata fields read from the manifest.
    pub fn apply_package(&mut self, name: &str, description: &str, license: &str) {
        self.set("appName", name);
        self.set("description", description);
        self.set("license", license);
    }

    pub fn set_license_text<S: Into<String>>(&mut self, text: S) {
        self.set("licenseText", text);
    }

    /// Substitutes these values into `text`.
    pub fn render(&self, text: &str) -> String {
        substitute(text, &self.values)
    }
}
