use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SchemaError};

/// Default upper bound on config file size.
pub const MAX_CONFIG_FILE_SIZE: usize = 64 * 1024;

/// Five digits, optionally followed by a hyphen or whitespace and four more.
pub const DEFAULT_ZIP_PATTERN: &str = r"^[0-9]{5}(?:[-\s][0-9]{4})?$";

/// Inclusive character-count bounds for a text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthBounds {
    pub min: usize,
    pub max: usize,
}

/// Inclusive bounds for the age field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeBounds {
    pub min: u32,
    pub max: u32,
}

/// Tunable bounds for the registration schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchemaConfig {
    /// Bounds applied to first and last name.
    pub name_length: LengthBounds,
    /// Bounds applied to password and its confirmation.
    pub password_length: LengthBounds,
    pub age: AgeBounds,
    pub zip_pattern: String,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            name_length: LengthBounds { min: 2, max: 30 },
            password_length: LengthBounds { min: 5, max: 30 },
            age: AgeBounds { min: 18, max: 120 },
            zip_pattern: DEFAULT_ZIP_PATTERN.to_string(),
        }
    }
}

impl SchemaConfig {
    /// Parse a config from a JSON string. Missing keys take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a config from a JSON file, capped at [`MAX_CONFIG_FILE_SIZE`].
    pub fn from_file(path: &Path) -> Result<Self> {
        Self::from_file_with_limit(path, MAX_CONFIG_FILE_SIZE)
    }

    /// Load a config from a JSON file.
    ///
    /// Symlinks, non-regular files and files over `max_bytes` are refused.
    pub fn from_file_with_limit(path: &Path, max_bytes: usize) -> Result<Self> {
        let content = read_bounded_file(path, max_bytes, "config")?;
        let config = Self::from_json_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded schema config");
        Ok(config)
    }

    pub(crate) fn check_bounds(&self) -> Result<()> {
        check_length("name_length", self.name_length)?;
        check_length("password_length", self.password_length)?;
        if self.age.min == 0 {
            return Err(SchemaError::InvalidConfig(
                "age.min must be greater than zero".to_string(),
            ));
        }
        if self.age.min > self.age.max {
            return Err(SchemaError::InvalidConfig(format!(
                "age.min ({}) exceeds age.max ({})",
                self.age.min, self.age.max
            )));
        }
        Ok(())
    }
}

/// Read a regular file of at most `max_bytes` into a string.
///
/// `what` names the file in error messages (`config`, `submission`).
pub(crate) fn read_bounded_file(path: &Path, max_bytes: usize, what: &str) -> Result<String> {
    let metadata = std::fs::symlink_metadata(path)
        .map_err(|err| SchemaError::LoadFailed(format!("{}: {err}", path.display())))?;
    let file_type = metadata.file_type();

    if file_type.is_symlink() {
        return Err(SchemaError::LoadFailed(format!(
            "refusing to load {what} symlink: {}",
            path.display()
        )));
    }
    if !file_type.is_file() {
        return Err(SchemaError::LoadFailed(format!(
            "not a regular file: {}",
            path.display()
        )));
    }
    if metadata.len() > max_bytes as u64 {
        return Err(SchemaError::LoadFailed(format!(
            "{what} file too large ({} bytes): {}",
            metadata.len(),
            path.display()
        )));
    }

    let file = std::fs::File::open(path).map_err(|err| {
        SchemaError::LoadFailed(format!("failed opening {what} {}: {err}", path.display()))
    })?;
    let read_limit = u64::try_from(max_bytes.saturating_add(1)).unwrap_or(u64::MAX);
    let mut content = String::new();
    file.take(read_limit)
        .read_to_string(&mut content)
        .map_err(|err| {
            SchemaError::LoadFailed(format!("failed reading {what} {}: {err}", path.display()))
        })?;
    if content.len() > max_bytes {
        return Err(SchemaError::LoadFailed(format!(
            "{what} file too large while reading: {}",
            path.display()
        )));
    }
    Ok(content)
}

fn check_length(name: &str, bounds: LengthBounds) -> Result<()> {
    if bounds.max == 0 {
        return Err(SchemaError::InvalidConfig(format!(
            "{name}.max must be greater than zero"
        )));
    }
    if bounds.min > bounds.max {
        return Err(SchemaError::InvalidConfig(format!(
            "{name}.min ({}) exceeds {name}.max ({})",
            bounds.min, bounds.max
        )));
    }
    Ok(())
}
