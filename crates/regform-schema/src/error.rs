/// Errors raised while building a schema or reading an input document.
///
/// Per-field validation failures are not represented here; they are
/// reported through [`crate::FieldErrors`].
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// A config or submission file could not be loaded.
    #[error("failed to load file: {0}")]
    LoadFailed(String),

    /// A rule pattern could not be compiled.
    #[error("failed to compile pattern: {0}")]
    CompileFailed(String),

    /// The config describes bounds that no value could satisfy.
    #[error("invalid schema config: {0}")]
    InvalidConfig(String),

    /// The document is not valid JSON.
    #[error("document is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The input document does not have the shape of a form submission.
    #[error("invalid input document: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, SchemaError>;
