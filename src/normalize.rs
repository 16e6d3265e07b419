//! Response Normalization
//!
//! Turns the model's raw text reply into canonical recipes. Models do not
//! always honour the object-vs-array instruction and often wrap their JSON in
//! Markdown fences, so both are tolerated here.

use crate::error::GenerationError;
use crate::recipe::{
    DEFAULT_COOK_TIME, DEFAULT_DESCRIPTION, DEFAULT_DIFFICULTY, DEFAULT_TIPS, Recipe,
    default_name,
};
use serde_json::{Map, Value};

const FENCE: &str = "```";

/// Remove Markdown code fence markers, with or without a language tag
pub fn strip_code_fences(raw: &str) -> String {
    let mut output = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(pos) = rest.find(FENCE) {
        output.push_str(&rest[..pos]);
        rest = &rest[pos + FENCE.len()..];

        // language tag, e.g. ```json
        let tag_len = rest
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(rest.len());
        rest = &rest[tag_len..];

        if let Some(stripped) = rest.strip_prefix("\r\n") {
            rest = stripped;
        } else if let Some(stripped) = rest.strip_prefix('\n') {
            rest = stripped;
        }
    }
    output.push_str(rest);

    output.trim().to_string()
}

/// Parse a raw model reply into recipes
///
/// Only a top-level syntax failure aborts; each element is defaulted
/// independently.
pub fn normalize(raw: &str) -> Result<Vec<Recipe>, GenerationError> {
    let cleaned = strip_code_fences(raw);
    let parsed: Value =
        serde_json::from_str(&cleaned).map_err(|e| GenerationError::Parse(e.to_string()))?;

    let elements = match parsed {
        Value::Array(items) => items,
        Value::Object(_) => vec![parsed],
        other => {
            return Err(GenerationError::Parse(format!(
                "expected a recipe object or array, got {}",
                json_kind(&other)
            )));
        }
    };

    Ok(elements
        .iter()
        .enumerate()
        .map(|(index, element)| recipe_from_value(index, element))
        .collect())
}

fn recipe_from_value(index: usize, value: &Value) -> Recipe {
    let Some(fields) = value.as_object() else {
        return Recipe::placeholder(index);
    };

    Recipe {
        name: text_field(fields, "name").unwrap_or_else(|| default_name(index)),
        description: text_field(fields, "description")
            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
        ingredients: list_field(fields, "ingredients"),
        steps: list_field(fields, "steps"),
        cook_time: text_field(fields, "cookTime").unwrap_or_else(|| DEFAULT_COOK_TIME.to_string()),
        difficulty: text_field(fields, "difficulty")
            .unwrap_or_else(|| DEFAULT_DIFFICULTY.to_string()),
        tips: text_field(fields, "tips").unwrap_or_else(|| DEFAULT_TIPS.to_string()),
    }
}

/// Non-empty string or number; anything else counts as missing
fn text_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn list_field(fields: &Map<String, Value>, key: &str) -> Vec<String> {
    let Some(Value::Array(items)) = fields.get(key) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
