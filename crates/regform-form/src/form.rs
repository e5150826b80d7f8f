use regform_schema::{
    Field, FieldErrors, InputKind, RegistrationInput, RegistrationRecord, RegistrationSchema,
};

use crate::error::Result;
use crate::sink::RecordSink;

/// Outcome of one submit attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Accepted(RegistrationRecord),
    Rejected(FieldErrors),
}

impl Submission {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Submission::Accepted(_))
    }
}

/// One field as it should be rendered: label, input kind and the error
/// from the last attempt, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldView<'a> {
    pub field: Field,
    pub label: &'static str,
    pub kind: InputKind,
    pub error: Option<&'a str>,
}

/// A registration form bound to a schema and a record sink.
///
/// The form keeps only the errors from the most recent attempt; each
/// submit replaces them wholesale.
pub struct RegistrationForm<S: RecordSink> {
    schema: RegistrationSchema,
    sink: S,
    errors: FieldErrors,
    attempts: u32,
}

impl<S: RecordSink> RegistrationForm<S> {
    /// Form using the default schema.
    pub fn new(sink: S) -> Self {
        Self::with_schema(RegistrationSchema::default(), sink)
    }

    pub fn with_schema(schema: RegistrationSchema, sink: S) -> Self {
        Self {
            schema,
            sink,
            errors: FieldErrors::new(),
            attempts: 0,
        }
    }

    /// Validate `input`; on acceptance hand the record to the sink.
    ///
    /// Only a sink failure is an `Err`. The error state is already cleared
    /// by then, since the input itself was valid.
    pub fn submit(&mut self, input: &RegistrationInput) -> Result<Submission> {
        self.attempts = self.attempts.saturating_add(1);

        match self.schema.validate(input) {
            Ok(record) => {
                self.errors = FieldErrors::new();
                self.sink.emit(&record)?;
                tracing::debug!(attempt = self.attempts, "submission accepted");
                Ok(Submission::Accepted(record))
            }
            Err(errors) => {
                tracing::debug!(
                    attempt = self.attempts,
                    invalid = errors.len(),
                    "submission rejected"
                );
                self.errors = errors.clone();
                Ok(Submission::Rejected(errors))
            }
        }
    }

    pub fn error_for(&self, field: Field) -> Option<&str> {
        self.errors.get(field)
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// True when the last attempt left no errors (or nothing was submitted yet).
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Every field in form order, ready to render.
    pub fn fields(&self) -> impl Iterator<Item = FieldView<'_>> + '_ {
        Field::ALL.into_iter().map(move |field| FieldView {
            field,
            label: field.label(),
            kind: field.input_kind(),
            error: self.errors.get(field),
        })
    }

    pub fn schema(&self) -> &RegistrationSchema {
        &self.schema
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
