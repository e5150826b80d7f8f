use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the seven registration form fields, in form order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Age,
    ZipCode,
    Password,
    ConfirmPassword,
}

/// How a field is presented to the person filling in the form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Text,
    Email,
    Number,
    Password,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::FirstName,
        Field::LastName,
        Field::Email,
        Field::Age,
        Field::ZipCode,
        Field::Password,
        Field::ConfirmPassword,
    ];

    /// Wire name used in JSON documents and error maps.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Email => "email",
            Field::Age => "age",
            Field::ZipCode => "zipCode",
            Field::Password => "password",
            Field::ConfirmPassword => "confirmPassword",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::FirstName => "First Name",
            Field::LastName => "Last Name",
            Field::Email => "Email",
            Field::Age => "Age",
            Field::ZipCode => "Zip code",
            Field::Password => "Password",
            Field::ConfirmPassword => "Confirm Password",
        }
    }

    pub fn input_kind(self) -> InputKind {
        match self {
            Field::Email => InputKind::Email,
            Field::Age => InputKind::Number,
            Field::Password | Field::ConfirmPassword => InputKind::Password,
            Field::FirstName | Field::LastName | Field::ZipCode => InputKind::Text,
        }
    }

    pub fn is_secret(self) -> bool {
        self.input_kind() == InputKind::Password
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A wire name that does not name any form field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown form field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}
