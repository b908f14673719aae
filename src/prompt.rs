//! Interactive prompting for the project settings.
//! Answers can be preloaded from a JSON object; only the remaining fields are asked.

use crate::error::{Error, Result};
use crate::input::{Field, UserInput, FIELDS};
use dialoguer::Input;
use std::io::Read;

/// Asks the user for one field value.
pub trait Prompter {
    /// Returns the raw answer for `field`. Implementations should only return
    /// answers accepted by `field.validate`.
    fn text(&self, field: &Field) -> Result<String>;
}

/// Terminal prompter backed by dialoguer.
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        DialoguerPrompter::new()
    }
}

impl Prompter for DialoguerPrompter {
    fn text(&self, field: &Field) -> Result<String> {
        let field = *field;
        Input::<String>::new()
            .with_prompt(field.message)
            .default(field.default.to_string())
            .validate_with(move |input: &String| field.validate(input))
            .interact_text()
            .map_err(|e| Error::PromptError(format!("input cancelled ({})", e)))
    }
}

/// Parses preloaded answers. Empty input means no answers.
///
/// # Errors
/// * `Error::ValidationError` if the content is not valid JSON
pub fn get_default_answers(content: &str) -> Result<serde_json::Value> {
    if content.is_empty() {
        return Ok(serde_json::Value::Null);
    }
    serde_json::from_str(content).map_err(|e| {
        Error::ValidationError(format!("Failed to parse answers as JSON: {}", e))
    })
}

/// Reads preloaded answers from stdin.
pub fn load_answers_from_stdin() -> Result<serde_json::Value> {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    get_default_answers(buffer.trim())
}

/// Preloaded answer for `field`. A missing or null value means "ask".
fn preloaded_answer(field: &Field, preloaded: &serde_json::Value) -> Result<Option<String>> {
    match preloaded.get(field.key) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s.clone())),
        Some(serde_json::Value::Bool(true)) => Ok(Some("yes".to_string())),
        Some(serde_json::Value::Bool(false)) => Ok(Some("no".to_string())),
        Some(other) => Err(Error::ValidationError(format!(
            "{}: expected a string or boolean answer, got {}",
            field.key, other
        ))),
    }
}

/// Collects every field, taking preloaded answers first and prompting for the rest.
///
/// # Arguments
/// * `prompt` - Prompter used for fields missing from `preloaded`
/// * `preloaded` - JSON object of answers keyed by field name, or null
///
/// # Returns
/// * `Result<UserInput>` - Sanitized answers with the server task expanded
///
/// # Errors
/// * `Error::ValidationError` if a preloaded answer is invalid or is not a
///   string or boolean
/// * `Error::PromptError` if prompting fails or is cancelled
pub fn collect_input(prompt: &dyn Prompter, preloaded: &serde_json::Value) -> Result<UserInput> {
    let mut input = UserInput::new();

    for field in FIELDS.iter() {
        let raw = match preloaded_answer(field, preloaded)? {
            Some(answer) => answer,
            None => prompt.text(field)?,
        };
        input.set_answer(field, &raw)?;
    }

    input.apply_server_task();
    Ok(input)
}
