//! Placeholder substitution for template text.

use crate::constants::PLACEHOLDER_PATTERN;
use indexmap::IndexMap;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PLACEHOLDER_PATTERN).expect("placeholder pattern is valid"));

/// Replaces every `%%[name]%%` token in `text` with `values[name]`.
///
/// Tokens without a value are left untouched. Replacement happens in a single
/// left-to-right pass, so placeholders inside substituted values are not
/// expanded again. Names are case-sensitive.
///
/// # Example
/// ```
/// use credlify::placeholder::substitute;
/// use indexmap::IndexMap;
///
/// let mut values = IndexMap::new();
/// values.insert("x".to_string(), "1".to_string());
/// assert_eq!(substitute("a %%[x]%% b", &values), "a 1 b");
/// assert_eq!(substitute("a %%[y]%% b", &values), "a %%[y]%% b");
/// ```
pub fn substitute(text: &str, values: &IndexMap<String, String>) -> String {
    PLACEHOLDER
        .replace_all(text, |caps: &Captures| match values.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Returns the placeholder names used in `text`, in order of appearance.
pub fn placeholders(text: &str) -> Vec<&str> {
    PLACEHOLDER
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}
