use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

use crate::field::Field;

const MASK: &str = "********";

/// A registration that passed every field rule and refinement.
///
/// Strings are trimmed where the schema trims them and `age` is numeric.
/// Only [`crate::RegistrationSchema::validate`] produces records.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRecord {
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) email: String,
    pub(crate) age: i64,
    pub(crate) zip_code: String,
    pub(crate) password: String,
    pub(crate) confirm_password: String,
}

impl RegistrationRecord {
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn age(&self) -> i64 {
        self.age
    }

    pub fn zip_code(&self) -> &str {
        &self.zip_code
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn confirm_password(&self) -> &str {
        &self.confirm_password
    }

    /// Display value for `field`, with password fields masked.
    pub fn display_value(&self, field: Field) -> String {
        if field.is_secret() {
            MASK.to_string()
        } else {
            self.value_of(field).into_owned()
        }
    }

    /// Unmasked value of `field`.
    pub(crate) fn value_of(&self, field: Field) -> Cow<'_, str> {
        match field {
            Field::FirstName => Cow::Borrowed(&self.first_name),
            Field::LastName => Cow::Borrowed(&self.last_name),
            Field::Email => Cow::Borrowed(&self.email),
            Field::Age => Cow::Owned(self.age.to_string()),
            Field::ZipCode => Cow::Borrowed(&self.zip_code),
            Field::Password => Cow::Borrowed(&self.password),
            Field::ConfirmPassword => Cow::Borrowed(&self.confirm_password),
        }
    }
}

impl fmt::Debug for RegistrationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationRecord")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("age", &self.age)
            .field("zip_code", &self.zip_code)
            .field("password", &MASK)
            .field("confirm_password", &MASK)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RegistrationRecord {
        RegistrationRecord {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            age: 36,
            zip_code: "12345".to_string(),
            password: "engine42".to_string(),
            confirm_password: "engine42".to_string(),
        }
    }

    #[test]
    fn serializes_with_wire_names() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["firstName"], "Ada");
        assert_eq!(value["zipCode"], "12345");
        assert_eq!(value["age"], 36);
        assert_eq!(value["confirmPassword"], "engine42");
    }

    #[test]
    fn debug_and_display_values_mask_passwords() {
        let record = sample();
        let debug = format!("{record:?}");
        assert!(!debug.contains("engine42"));
        assert!(debug.contains("Lovelace"));
        assert_eq!(record.display_value(Field::Password), MASK);
        assert_eq!(record.display_value(Field::Age), "36");
        assert_eq!(record.value_of(Field::Password), "engine42");
    }
}
