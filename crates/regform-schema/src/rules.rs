use std::fmt;
use std::sync::LazyLock;

use ::validator::ValidateEmail;
use regex::Regex;

use crate::field::Field;

/// Dotted host name ending in an alphabetic top-level label.
static EMAIL_DOMAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$").expect("valid regex")
});

/// How a raw value is coerced before its checks run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// A string, optionally trimmed before checking.
    Text { trim: bool },
    /// A whole number. Numeric strings are coerced.
    Integer,
}

/// A single field-level constraint.
#[derive(Debug, Clone)]
pub enum Rule {
    MinLength(usize),
    MaxLength(usize),
    Email,
    Pattern(Regex),
    Positive,
    Min(i64),
    Max(i64),
}

/// A value after coercion, as seen by [`Rule::holds`].
#[derive(Debug, Clone, Copy)]
pub enum Candidate<'a> {
    Text(&'a str),
    Integer(i64),
}

impl Rule {
    /// Evaluate the rule. Text rules applied to numbers (and the reverse)
    /// do not constrain anything and hold.
    pub fn holds(&self, candidate: Candidate<'_>) -> bool {
        match (self, candidate) {
            (Rule::MinLength(min), Candidate::Text(text)) => text.chars().count() >= *min,
            (Rule::MaxLength(max), Candidate::Text(text)) => text.chars().count() <= *max,
            (Rule::Email, Candidate::Text(text)) => is_email(text),
            (Rule::Pattern(pattern), Candidate::Text(text)) => pattern.is_match(text),
            (Rule::Positive, Candidate::Integer(value)) => value > 0,
            (Rule::Min(min), Candidate::Integer(value)) => value >= *min,
            (Rule::Max(max), Candidate::Integer(value)) => value <= *max,
            _ => true,
        }
    }

    pub fn default_message(&self) -> String {
        match self {
            Rule::MinLength(min) => format!("String must contain at least {min} character(s)"),
            Rule::MaxLength(max) => format!("String must contain at most {max} character(s)"),
            Rule::Email => "Invalid email".to_string(),
            Rule::Pattern(_) => "Invalid".to_string(),
            Rule::Positive => "Number must be greater than 0".to_string(),
            Rule::Min(min) => format!("Number must be greater than or equal to {min}"),
            Rule::Max(max) => format!("Number must be less than or equal to {max}"),
        }
    }

    /// Short human-readable form, e.g. `min length 2`.
    pub fn describe(&self) -> String {
        match self {
            Rule::MinLength(min) => format!("min length {min}"),
            Rule::MaxLength(max) => format!("max length {max}"),
            Rule::Email => "email address".to_string(),
            Rule::Pattern(pattern) => format!("matches {}", pattern.as_str()),
            Rule::Positive => "positive".to_string(),
            Rule::Min(min) => format!(">= {min}"),
            Rule::Max(max) => format!("<= {max}"),
        }
    }
}

/// Address syntax plus a dotted domain: `user@localhost` and IP literals
/// are refused.
fn is_email(text: &str) -> bool {
    text.validate_email()
        && text
            .rsplit_once('@')
            .is_some_and(|(_, domain)| EMAIL_DOMAIN_RE.is_match(domain))
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// A rule paired with the message reported when it fails.
#[derive(Debug, Clone)]
pub struct Check {
    pub rule: Rule,
    message: Option<String>,
}

impl Check {
    pub fn new(rule: Rule) -> Self {
        Self {
            rule,
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn message(&self) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| self.rule.default_message())
    }
}

impl From<Rule> for Check {
    fn from(rule: Rule) -> Self {
        Self::new(rule)
    }
}

/// Ordered checks for one field. Evaluation stops at the first failure.
#[derive(Debug, Clone)]
pub struct FieldSchema {
    pub field: Field,
    pub kind: ValueKind,
    pub checks: Vec<Check>,
}

impl FieldSchema {
    pub fn text(field: Field) -> Self {
        Self {
            field,
            kind: ValueKind::Text { trim: false },
            checks: Vec::new(),
        }
    }

    pub fn trimmed_text(field: Field) -> Self {
        Self {
            field,
            kind: ValueKind::Text { trim: true },
            checks: Vec::new(),
        }
    }

    pub fn integer(field: Field) -> Self {
        Self {
            field,
            kind: ValueKind::Integer,
            checks: Vec::new(),
        }
    }

    pub fn check(mut self, check: impl Into<Check>) -> Self {
        self.checks.push(check.into());
        self
    }
}

/// Cross-field equality constraint, evaluated once every field passes.
///
/// A failure is reported on `target` only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refinement {
    pub left: Field,
    pub right: Field,
    pub target: Field,
    pub message: String,
}

impl Refinement {
    pub fn equal(left: Field, right: Field, message: impl Into<String>) -> Self {
        Self {
            left,
            right,
            target: right,
            message: message.into(),
        }
    }

    pub fn on(mut self, target: Field) -> Self {
        self.target = target;
        self
    }

    pub fn describe(&self) -> String {
        format!("equals {}", self.left)
    }
}
