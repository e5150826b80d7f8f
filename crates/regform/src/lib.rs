//! Registration form validation.
//!
//! regform validates registration submissions (name, email, age, zip code,
//! password and its confirmation) against a declarative schema and hands
//! accepted records to a sink.
//!
//! # Crate Structure
//!
//! - [`schema`]: Fields, rules, config and the validator
//! - [`form`]: Form error state, submissions and record sinks

/// Re-export schema types.
pub mod schema {
    pub use regform_schema::*;
}

/// Re-export form types.
pub mod form {
    pub use regform_form::*;
}

pub use regform_form::{RegistrationForm, Submission};
pub use regform_schema::{validate, Field, FieldErrors, RegistrationInput, RegistrationRecord};
