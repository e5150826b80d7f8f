//! The registration form component.
//!
//! [`RegistrationForm`] wraps a [`regform_schema::RegistrationSchema`] with
//! the transient error state a form keeps between submit attempts, and
//! hands accepted records to a [`RecordSink`].

pub mod error;
pub mod form;
pub mod sink;

pub use error::{FormError, Result, SinkError};
pub use form::{FieldView, RegistrationForm, Submission};
pub use sink::{JsonLinesSink, RecordSink, TracingSink};
