//! Declarative validation for registration form records.
//!
//! A [`RegistrationSchema`] holds per-field rules plus cross-field
//! refinements. Validating a raw [`RegistrationInput`] yields either a
//! normalized [`RegistrationRecord`] or a [`FieldErrors`] map carrying the
//! first failing rule's message for each invalid field.
//!
//! Validation failures are values, never panics. [`SchemaError`] is
//! reserved for problems with the schema itself or with malformed input
//! documents.

pub mod config;
pub mod error;
mod evaluate;
pub mod field;
pub mod field_errors;
pub mod input;
pub mod record;
pub mod rules;
pub mod schema;

pub use config::{
    AgeBounds, LengthBounds, SchemaConfig, DEFAULT_ZIP_PATTERN, MAX_CONFIG_FILE_SIZE,
};
pub use error::{Result, SchemaError};
pub use field::{Field, InputKind, UnknownField};
pub use field_errors::{FieldError, FieldErrors};
pub use input::{RegistrationInput, MAX_SUBMISSION_FILE_SIZE};
pub use record::RegistrationRecord;
pub use rules::{Candidate, Check, FieldSchema, Refinement, Rule, ValueKind};
pub use schema::RegistrationSchema;

/// Validate `input` against the default registration schema.
pub fn validate(
    input: &RegistrationInput,
) -> std::result::Result<RegistrationRecord, FieldErrors> {
    RegistrationSchema::default().validate(input)
}
