//! Project path configuration.
//! The configuration template is rendered with the user input like any other
//! template, then read back as data to learn where the source and destination
//! directories live.

use crate::constants::CONFIG_TEMPLATE;
use crate::error::{Error, Result};
use crate::input::UserInput;
use crate::placeholder::placeholders;
use crate::template::TemplateStore;
use indexmap::IndexMap;
use log::debug;
use regex::Regex;
use serde::Deserialize;
use std::ops::Range;
use std::sync::LazyLock;

static GROUP_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(SRC|DEST)\s*:\s*\{").expect("group pattern is valid"));

static ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\b([A-Z][A-Z0-9_]*)\s*:\s*(?:"([^"]*)"|'([^']*)')"#)
        .expect("entry pattern is valid")
});

/// Root, JS and stylesheet paths of one side of the build.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PathGroup {
    #[serde(rename = "ROOT")]
    pub root: String,
    #[serde(rename = "JS")]
    pub js: String,
    #[serde(rename = "SASS")]
    pub sass: String,
}

impl PathGroup {
    /// Strips trailing slashes from the root and prefixes the other paths with it.
    fn normalize(self) -> Self {
        let root = self.root.trim_end_matches('/').to_string();
        let join = |path: &str| {
            let path = path.trim_start_matches('/');
            if root.is_empty() {
                path.to_string()
            } else {
                format!("{}/{}", root, path)
            }
        };
        let js = join(&self.js);
        let sass = join(&self.sass);
        Self { root, js, sass }
    }

    fn from_entries(group: &str, entries: &IndexMap<String, String>) -> Result<Self> {
        let get = |key: &str| {
            entries.get(key).cloned().ok_or_else(|| {
                Error::ConfigEvaluationError(format!("missing PATH.{}.{}", group, key))
            })
        };
        Ok(Self { root: get("ROOT")?, js: get("JS")?, sass: get("SASS")? })
    }

    fn check_resolved(&self, group: &str) -> Result<()> {
        for (key, value) in [("ROOT", &self.root), ("JS", &self.js), ("SASS", &self.sass)] {
            if let Some(name) = placeholders(value).first() {
                return Err(Error::ConfigEvaluationError(format!(
                    "PATH.{}.{} has no value for placeholder '{}'",
                    group, key, name
                )));
            }
        }
        Ok(())
    }
}

/// Resolved project paths, relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    pub src: PathGroup,
    pub dest: PathGroup,
}

#[derive(Deserialize)]
struct RawConfig {
    #[serde(rename = "PATH")]
    path: RawPaths,
}

#[derive(Deserialize)]
struct RawPaths {
    #[serde(rename = "SRC")]
    src: PathGroup,
    #[serde(rename = "DEST")]
    dest: PathGroup,
}

fn is_quote(c: char) -> bool {
    matches!(c, '"' | '\'' | '`')
}

/// Removes `//` and `/* */` comments outside string literals.
fn strip_comments(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();
    let mut quote: Option<char> = None;

    while let Some(c) = chars.next() {
        if let Some(q) = quote {
            out.push(c);
            if c == '\\' {
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            } else if c == q {
                quote = None;
            }
            continue;
        }

        match (c, chars.peek().copied()) {
            ('/', Some('/')) => {
                while chars.next_if(|next| *next != '\n').is_some() {}
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        break;
                    }
                    prev = next;
                }
                out.push(' ');
            }
            _ => {
                if is_quote(c) {
                    quote = Some(c);
                }
                out.push(c);
            }
        }
    }
    out
}

/// Marks every byte of `content` that belongs to a string literal, quotes included.
fn quoted_bytes(content: &str) -> Vec<bool> {
    let mut quoted = vec![false; content.len()];
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in content.char_indices() {
        match quote {
            Some(q) => {
                quoted[i..i + c.len_utf8()].fill(true);
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == q {
                    quote = None;
                }
            }
            None if is_quote(c) => {
                quoted[i] = true;
                quote = Some(c);
            }
            None => {}
        }
    }
    quoted
}

/// Byte range of the body of the object opened at `open`, braces excluded.
fn object_body(content: &str, quoted: &[bool], open: usize) -> Option<Range<usize>> {
    let mut depth = 0usize;
    for (offset, c) in content[open..].char_indices() {
        let i = open + offset;
        if quoted[i] {
            continue;
        }
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + 1..i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Reads the `SRC`/`DEST` groups out of an object literal such as the one in
/// `config.js`. Only `KEY: "value"` entries are recognised.
fn scan_literal(content: &str) -> Result<RawPaths> {
    let content = strip_comments(content);
    let quoted = quoted_bytes(&content);
    let mut groups: IndexMap<String, IndexMap<String, String>> = IndexMap::new();

    for caps in GROUP_START.captures_iter(&content) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if quoted[whole.start()] || groups.contains_key(name.as_str()) {
            continue;
        }
        let Some(body) = object_body(&content, &quoted, whole.end() - 1) else {
            continue;
        };

        let entries: IndexMap<String, String> = ENTRY
            .captures_iter(&content[body.clone()])
            .filter(|entry| entry.get(0).is_some_and(|m| !quoted[body.start + m.start()]))
            .map(|entry| {
                let value = entry.get(2).or_else(|| entry.get(3)).map_or("", |m| m.as_str());
                (entry[1].to_string(), value.to_string())
            })
            .collect();
        groups.insert(name.as_str().to_string(), entries);
    }

    let group = |name: &str| {
        groups
            .get(name)
            .ok_or_else(|| Error::ConfigEvaluationError(format!("missing PATH.{} group", name)))
            .and_then(|entries| PathGroup::from_entries(name, entries))
    };

    Ok(RawPaths { src: group("SRC")?, dest: group("DEST")? })
}

/// Parses rendered configuration text into project paths.
///
/// JSON of the form `{"PATH": {"SRC": {...}, "DEST": {...}}}` is tried first,
/// then the object-literal form.
///
/// # Errors
/// * `Error::ConfigEvaluationError` if a group or path is missing, or a path
///   still holds an unresolved placeholder
pub fn parse_config(content: &str) -> Result<ProjectConfig> {
    let raw = match serde_json::from_str::<RawConfig>(content) {
        Ok(raw) => raw.path,
        Err(_) => scan_literal(content)?,
    };

    raw.src.check_resolved("SRC")?;
    raw.dest.check_resolved("DEST")?;

    Ok(ProjectConfig { src: raw.src.normalize(), dest: raw.dest.normalize() })
}

/// Renders the configuration template with `input` and parses the result.
///
/// # Errors
/// * `Error::ConfigEvaluationError` if the template cannot be loaded or parsed
pub fn evaluate_config(store: &dyn TemplateStore, input: &UserInput) -> Result<ProjectConfig> {
    let raw = store.load_template(CONFIG_TEMPLATE).map_err(|e| {
        Error::ConfigEvaluationError(format!("config data could not be loaded ({})", e))
    })?;
    let config = parse_config(&input.render(&raw))?;
    debug!("Evaluated project config: {:?}", config);
    Ok(config)
}
