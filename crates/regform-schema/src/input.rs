use std::collections::BTreeMap;
use std::path::Path;

use serde_json::Value;

use crate::config::read_bounded_file;
use crate::error::{Result, SchemaError};
use crate::field::Field;

/// Default upper bound on a submission file's size.
pub const MAX_SUBMISSION_FILE_SIZE: usize = 16 * 1024;

/// Raw, untyped field values as captured from the form.
///
/// Nothing is checked here; a missing field and a `null` field are both
/// treated as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrationInput {
    values: BTreeMap<Field, Value>,
}

impl RegistrationInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    pub fn with(mut self, field: Field, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: Field, value: impl Into<Value>) {
        let value = value.into();
        if value.is_null() {
            self.values.remove(&field);
        } else {
            self.values.insert(field, value);
        }
    }

    pub fn remove(&mut self, field: Field) -> Option<Value> {
        self.values.remove(&field)
    }

    pub fn get(&self, field: Field) -> Option<&Value> {
        self.values.get(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Parse a JSON object keyed by field wire names.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_json_value(value)
    }

    /// Load a JSON submission from a file, capped at
    /// [`MAX_SUBMISSION_FILE_SIZE`].
    pub fn from_file(path: &Path) -> Result<Self> {
        Self::from_file_with_limit(path, MAX_SUBMISSION_FILE_SIZE)
    }

    /// Load a JSON submission from a file.
    ///
    /// Symlinks, non-regular files and files over `max_bytes` are refused.
    pub fn from_file_with_limit(path: &Path, max_bytes: usize) -> Result<Self> {
        let content = read_bounded_file(path, max_bytes, "submission")?;
        Self::from_json_str(&content)
    }

    /// Build an input from a JSON object. Unknown keys are dropped.
    pub fn from_json_value(value: Value) -> Result<Self> {
        let object = match value {
            Value::Object(object) => object,
            other => {
                return Err(SchemaError::InvalidInput(format!(
                    "expected a JSON object, received {}",
                    json_type_name(&other)
                )))
            }
        };

        let mut input = Self::new();
        for (key, value) in object {
            match key.parse::<Field>() {
                Ok(field) => input.set(field, value),
                Err(_) => tracing::debug!(key = %key, "dropping unknown input key"),
            }
        }
        Ok(input)
    }
}

impl<V: Into<Value>> FromIterator<(Field, V)> for RegistrationInput {
    fn from_iter<I: IntoIterator<Item = (Field, V)>>(iter: I) -> Self {
        let mut input = Self::new();
        for (field, value) in iter {
            input.set(field, value);
        }
        input
    }
}

/// Type names as they appear in validation messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
