use std::path::Path;

use regform_schema::{RegistrationSchema, SchemaConfig};

use crate::exit::{schema_error, CliResult};

/// Environment variable naming the schema config file.
pub const CONFIG_ENV: &str = "REGFORM_CONFIG";

/// Load the config at `path`, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> CliResult<SchemaConfig> {
    match path {
        Some(path) => SchemaConfig::from_file(path)
            .map_err(|err| schema_error(&format!("failed loading {}", path.display()), err)),
        None => Ok(SchemaConfig::default()),
    }
}

pub fn load_schema(path: Option<&Path>) -> CliResult<RegistrationSchema> {
    let config = load_config(path)?;
    let schema = RegistrationSchema::from_config(&config)
        .map_err(|err| schema_error("invalid schema config", err))?;
    if let Some(path) = path {
        tracing::info!(path = %path.display(), "using schema config");
    }
    Ok(schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exit::USAGE;

    #[test]
    fn no_path_means_defaults() {
        assert_eq!(load_config(None).unwrap(), SchemaConfig::default());
        assert!(load_schema(None).is_ok());
    }

    #[test]
    fn missing_file_is_a_usage_error() {
        let err = load_schema(Some(Path::new("/nonexistent/regform.json"))).unwrap_err();
        assert_eq!(err.code, USAGE);
    }
}
