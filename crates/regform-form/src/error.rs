/// Errors raised while emitting an accepted record.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// The sink's writer failed.
    #[error("sink I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The record could not be serialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur during a form submission.
///
/// Rejected input is not an error; see [`crate::Submission::Rejected`].
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// The record was accepted but the sink refused it.
    #[error("failed to emit record: {0}")]
    Sink(#[from] SinkError),
}

pub type Result<T> = std::result::Result<T, FormError>;
