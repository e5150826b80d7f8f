use serde_json::Value;

use crate::input::json_type_name;
use crate::rules::{Candidate, FieldSchema, ValueKind};

pub(crate) const REQUIRED: &str = "Required";
const NOT_A_NUMBER: &str = "Expected number, received nan";
const NOT_AN_INTEGER: &str = "Expected integer, received float";

/// Run a text field's checks, returning the (possibly trimmed) value or
/// the first failing message.
pub(crate) fn evaluate_text(
    schema: &FieldSchema,
    raw: Option<&Value>,
) -> Result<String, String> {
    let raw = raw.ok_or_else(|| REQUIRED.to_string())?;
    let text = raw
        .as_str()
        .ok_or_else(|| format!("Expected string, received {}", json_type_name(raw)))?;
    let text = if matches!(schema.kind, ValueKind::Text { trim: true }) {
        text.trim()
    } else {
        text
    };
    first_failure(schema, Candidate::Text(text))?;
    Ok(text.to_string())
}

/// Run an integer field's checks, returning the coerced value or the first
/// failing message.
pub(crate) fn evaluate_integer(
    schema: &FieldSchema,
    raw: Option<&Value>,
) -> Result<i64, String> {
    let raw = raw.ok_or_else(|| REQUIRED.to_string())?;
    let value = coerce_integer(raw)?;
    first_failure(schema, Candidate::Integer(value))?;
    Ok(value)
}

fn first_failure(schema: &FieldSchema, candidate: Candidate<'_>) -> Result<(), String> {
    match schema.checks.iter().find(|check| !check.rule.holds(candidate)) {
        Some(check) => Err(check.message()),
        None => Ok(()),
    }
}

fn coerce_integer(raw: &Value) -> Result<i64, String> {
    let number = match raw {
        Value::Number(number) => number.as_f64().ok_or_else(|| NOT_A_NUMBER.to_string())?,
        Value::String(text) => {
            let text = text.trim();
            if text.is_empty() {
                return Err(NOT_A_NUMBER.to_string());
            }
            text.parse::<f64>().map_err(|_| NOT_A_NUMBER.to_string())?
        }
        other => {
            return Err(format!(
                "Expected number, received {}",
                json_type_name(other)
            ))
        }
    };

    if !number.is_finite() {
        return Err(NOT_A_NUMBER.to_string());
    }
    if number.fract() != 0.0 {
        return Err(NOT_AN_INTEGER.to_string());
    }
    // Saturates for magnitudes beyond i64; range checks reject those anyway.
    Ok(number as i64)
}
