use std::sync::LazyLock;

use regex::Regex;

use crate::config::{SchemaConfig, DEFAULT_ZIP_PATTERN};
use crate::error::{Result, SchemaError};
use crate::evaluate::{evaluate_integer, evaluate_text};
use crate::field::Field;
use crate::field_errors::FieldErrors;
use crate::input::RegistrationInput;
use crate::record::RegistrationRecord;
use crate::rules::{Check, FieldSchema, Refinement, Rule};

pub const TOO_YOUNG: &str = "No one can possibly be that young!";
pub const TOO_OLD: &str = "No one can possibly be that old!";
pub const ZIP_FORMAT: &str = "Must be 5 digit zip. Optional 4 digit extension allowed.";
pub const PASSWORD_MISMATCH: &str = "Password does not match";

static DEFAULT_ZIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DEFAULT_ZIP_PATTERN).expect("valid regex"));

/// Field rules plus cross-field refinements for a registration record.
#[derive(Debug, Clone)]
pub struct RegistrationSchema {
    /// One entry per field, in `Field::ALL` order.
    fields: [FieldSchema; 7],
    refinements: Vec<Refinement>,
}

impl RegistrationSchema {
    /// Schema with the default bounds.
    pub fn new() -> Self {
        build(&SchemaConfig::default(), DEFAULT_ZIP_RE.clone())
    }

    /// Compile a schema from explicit config.
    pub fn from_config(config: &SchemaConfig) -> Result<Self> {
        config.check_bounds()?;

        let zip = if config.zip_pattern == DEFAULT_ZIP_PATTERN {
            DEFAULT_ZIP_RE.clone()
        } else {
            Regex::new(&config.zip_pattern)
                .map_err(|err| SchemaError::CompileFailed(err.to_string()))?
        };

        Ok(build(config, zip))
    }

    /// Per-field rules in form order.
    pub fn rules(&self) -> &[FieldSchema] {
        &self.fields
    }

    pub fn refinements(&self) -> &[Refinement] {
        &self.refinements
    }

    pub fn field_schema(&self, field: Field) -> &FieldSchema {
        &self.fields[field as usize]
    }

    /// Validate `input`, returning the normalized record or the first
    /// failing message for every invalid field.
    ///
    /// Refinements run only when every field passes on its own.
    pub fn validate(
        &self,
        input: &RegistrationInput,
    ) -> std::result::Result<RegistrationRecord, FieldErrors> {
        let mut errors = FieldErrors::new();
        let mut text = |field: Field| {
            let outcome = evaluate_text(self.field_schema(field), input.get(field));
            keep(&mut errors, field, outcome)
        };

        let first_name = text(Field::FirstName);
        let last_name = text(Field::LastName);
        let email = text(Field::Email);
        let zip_code = text(Field::ZipCode);
        let password = text(Field::Password);
        let confirm_password = text(Field::ConfirmPassword);
        let age = evaluate_integer(self.field_schema(Field::Age), input.get(Field::Age));
        let age = keep(&mut errors, Field::Age, age);

        let (
            Some(first_name),
            Some(last_name),
            Some(email),
            Some(age),
            Some(zip_code),
            Some(password),
            Some(confirm_password),
        ) = (first_name, last_name, email, age, zip_code, password, confirm_password)
        else {
            return Err(rejected(errors));
        };

        let record = RegistrationRecord {
            first_name,
            last_name,
            email,
            age,
            zip_code,
            password,
            confirm_password,
        };

        for refinement in &self.refinements {
            if record.value_of(refinement.left) != record.value_of(refinement.right) {
                errors.insert(refinement.target, refinement.message.clone());
            }
        }
        if !errors.is_empty() {
            return Err(rejected(errors));
        }

        Ok(record)
    }
}

impl Default for RegistrationSchema {
    fn default() -> Self {
        Self::new()
    }
}

fn keep<T>(
    errors: &mut FieldErrors,
    field: Field,
    outcome: std::result::Result<T, String>,
) -> Option<T> {
    match outcome {
        Ok(value) => Some(value),
        Err(message) => {
            errors.insert(field, message);
            None
        }
    }
}

fn rejected(errors: FieldErrors) -> FieldErrors {
    tracing::debug!(
        invalid = errors.len(),
        fields = %errors.fields().map(Field::as_str).collect::<Vec<_>>().join(","),
        "registration rejected"
    );
    errors
}

fn build(config: &SchemaConfig, zip: Regex) -> RegistrationSchema {
    let name = config.name_length;
    let password = config.password_length;
    let age = config.age;

    let name_rules = |field| {
        FieldSchema::trimmed_text(field)
            .check(Rule::MinLength(name.min))
            .check(Rule::MaxLength(name.max))
    };
    let password_rules = |field| {
        FieldSchema::trimmed_text(field)
            .check(Rule::MinLength(password.min))
            .check(Rule::MaxLength(password.max))
    };

    let fields = [
        name_rules(Field::FirstName),
        name_rules(Field::LastName),
        FieldSchema::trimmed_text(Field::Email).check(Rule::Email),
        FieldSchema::integer(Field::Age)
            .check(Check::new(Rule::Positive).with_message(TOO_YOUNG))
            .check(Rule::Min(i64::from(age.min)))
            .check(Check::new(Rule::Max(i64::from(age.max))).with_message(TOO_OLD)),
        FieldSchema::text(Field::ZipCode)
            .check(Check::new(Rule::Pattern(zip)).with_message(ZIP_FORMAT)),
        password_rules(Field::Password),
        password_rules(Field::ConfirmPassword),
    ];

    let refinements = vec![Refinement::equal(
        Field::Password,
        Field::ConfirmPassword,
        PASSWORD_MISMATCH,
    )];

    RegistrationSchema {
        fields,
        refinements,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::config::{AgeBounds, LengthBounds};
    use crate::evaluate::REQUIRED;

    fn valid_input() -> RegistrationInput {
        RegistrationInput::new()
            .with(Field::FirstName, "Ada")
            .with(Field::LastName, "Lovelace")
            .with(Field::Email, "ada@example.com")
            .with(Field::Age, 36)
            .with(Field::ZipCode, "12345")
            .with(Field::Password, "engine42")
            .with(Field::ConfirmPassword, "engine42")
    }

    fn error_for(input: RegistrationInput, field: Field) -> Option<String> {
        RegistrationSchema::new()
            .validate(&input)
            .err()
            .and_then(|errors| errors.get(field).map(str::to_string))
    }

    #[test]
    fn accepts_valid_input_and_trims_strings() {
        let input = valid_input()
            .with(Field::FirstName, "  Ada ")
            .with(Field::LastName, "\tLovelace\n")
            .with(Field::Email, "  user@example.com  ")
            .with(Field::Password, " engine42 ")
            .with(Field::ConfirmPassword, "engine42  ");

        let record = RegistrationSchema::new().validate(&input).unwrap();
        assert_eq!(record.first_name(), "Ada");
        assert_eq!(record.last_name(), "Lovelace");
        assert_eq!(record.email(), "user@example.com");
        assert_eq!(record.age(), 36);
        assert_eq!(record.zip_code(), "12345");
        assert_eq!(record.password(), "engine42");
        assert_eq!(record.confirm_password(), "engine42");
    }

    #[test]
    fn free_function_uses_default_schema() {
        assert!(crate::validate(&valid_input()).is_ok());
    }

    #[test]
    fn password_mismatch_is_reported_on_confirmation_only() {
        let input = valid_input().with(Field::ConfirmPassword, "engine43");
        let errors = RegistrationSchema::new().validate(&input).unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::ConfirmPassword), Some(PASSWORD_MISMATCH));
        assert!(!errors.contains(Field::Password));
    }

    #[test]
    fn refinement_waits_for_field_rules() {
        let input = valid_input()
            .with(Field::ConfirmPassword, "other-pass")
            .with(Field::FirstName, "A");
        let errors = RegistrationSchema::new().validate(&input).unwrap_err();

        assert!(errors.contains(Field::FirstName));
        assert!(!errors.contains(Field::ConfirmPassword));
    }

    #[test]
    fn invalid_age_alone_blocks_the_record() {
        let input = valid_input()
            .with(Field::Age, "forty")
            .with(Field::ConfirmPassword, "other-pass");
        let errors = RegistrationSchema::new().validate(&input).unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::Age), Some("Expected number, received nan"));
    }

    #[test]
    fn refinement_compares_normalized_values() {
        let input = valid_input()
            .with(Field::Password, "  engine42")
            .with(Field::ConfirmPassword, "engine42\t");
        let record = RegistrationSchema::new().validate(&input).unwrap();
        assert_eq!(record.password(), record.confirm_password());
    }

    #[test]
    fn zip_code_formats() {
        for zip in ["12345", "12345-6789", "12345 6789"] {
            assert_eq!(
                error_for(valid_input().with(Field::ZipCode, zip), Field::ZipCode),
                None,
                "{zip}"
            );
        }
        for zip in ["1234", "12345-67", "123456", "abcde", " 12345", "١٢٣٤٥"] {
            assert_eq!(
                error_for(valid_input().with(Field::ZipCode, zip), Field::ZipCode).as_deref(),
                Some(ZIP_FORMAT),
                "{zip}"
            );
        }
    }

    #[test]
    fn age_bounds() {
        assert_eq!(
            error_for(valid_input().with(Field::Age, 17), Field::Age).as_deref(),
            Some("Number must be greater than or equal to 18")
        );
        assert_eq!(error_for(valid_input().with(Field::Age, 18), Field::Age), None);
        assert_eq!(error_for(valid_input().with(Field::Age, 120), Field::Age), None);
        assert_eq!(
            error_for(valid_input().with(Field::Age, 121), Field::Age).as_deref(),
            Some(TOO_OLD)
        );
        assert_eq!(
            error_for(valid_input().with(Field::Age, 0), Field::Age).as_deref(),
            Some(TOO_YOUNG)
        );
        assert_eq!(
            error_for(valid_input().with(Field::Age, -3), Field::Age).as_deref(),
            Some(TOO_YOUNG)
        );
    }

    #[test]
    fn non_numeric_age_is_a_field_error() {
        assert_eq!(
            error_for(valid_input().with(Field::Age, "forty"), Field::Age).as_deref(),
            Some("Expected number, received nan")
        );
        let record = RegistrationSchema::new()
            .validate(&valid_input().with(Field::Age, "42"))
            .unwrap();
        assert_eq!(record.age(), 42);
    }

    #[test]
    fn first_name_length_bounds() {
        assert_eq!(
            error_for(valid_input().with(Field::FirstName, "A"), Field::FirstName).as_deref(),
            Some("String must contain at least 2 character(s)")
        );
        assert_eq!(error_for(valid_input().with(Field::FirstName, "Al"), Field::FirstName), None);
        assert_eq!(
            error_for(valid_input().with(Field::FirstName, "A".repeat(31)), Field::FirstName)
                .as_deref(),
            Some("String must contain at most 30 character(s)")
        );
    }

    #[test]
    fn email_syntax() {
        assert_eq!(
            error_for(valid_input().with(Field::Email, "not-an-email"), Field::Email).as_deref(),
            Some("Invalid email")
        );
        assert_eq!(
            error_for(valid_input().with(Field::Email, " user@example.com "), Field::Email),
            None
        );
        for address in ["a@b", "user@localhost", "user@example.c", "user@[127.0.0.1]"] {
            assert_eq!(
                error_for(valid_input().with(Field::Email, address), Field::Email).as_deref(),
                Some("Invalid email"),
                "{address}"
            );
        }
    }

    #[test]
    fn empty_input_reports_every_field() {
        let errors = RegistrationSchema::new()
            .validate(&RegistrationInput::new())
            .unwrap_err();
        assert_eq!(errors.len(), Field::ALL.len());
        assert!(errors.iter().all(|(_, message)| message == REQUIRED));
    }

    #[test]
    fn only_invalid_fields_are_reported() {
        let input = RegistrationInput::from_json_value(json!({
            "firstName": "Ada",
            "lastName": "L",
            "email": "ada@example.com",
            "age": "17",
            "zipCode": "12345",
            "password": "engine42",
            "confirmPassword": "engine42"
        }))
        .unwrap();
        let errors = RegistrationSchema::new().validate(&input).unwrap_err();
        let fields: Vec<Field> = errors.fields().collect();
        assert_eq!(fields, vec![Field::LastName, Field::Age]);
    }

    #[test]
    fn config_bounds_are_applied() {
        let config = SchemaConfig {
            name_length: LengthBounds { min: 1, max: 3 },
            age: AgeBounds { min: 21, max: 65 },
            ..SchemaConfig::default()
        };
        let schema = RegistrationSchema::from_config(&config).unwrap();

        let short_names = valid_input()
            .with(Field::FirstName, "A")
            .with(Field::LastName, "Lov");
        assert!(schema.validate(&short_names).is_ok());
        let errors = schema
            .validate(&valid_input().with(Field::LastName, "Lovelace").with(Field::Age, 20))
            .unwrap_err();
        assert_eq!(
            errors.get(Field::LastName),
            Some("String must contain at most 3 character(s)")
        );
        assert_eq!(
            errors.get(Field::Age),
            Some("Number must be greater than or equal to 21")
        );
    }

    #[test]
    fn custom_zip_pattern_compiles_or_fails() {
        let config = SchemaConfig {
            zip_pattern: r"^[0-9]{4}$".to_string(),
            ..SchemaConfig::default()
        };
        let schema = RegistrationSchema::from_config(&config).unwrap();
        assert!(schema.validate(&valid_input().with(Field::ZipCode, "1234")).is_ok());

        let broken = SchemaConfig {
            zip_pattern: "([0-9".to_string(),
            ..SchemaConfig::default()
        };
        assert!(matches!(
            RegistrationSchema::from_config(&broken),
            Err(SchemaError::CompileFailed(_))
        ));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = SchemaConfig {
            age: AgeBounds { min: 90, max: 30 },
            ..SchemaConfig::default()
        };
        assert!(matches!(
            RegistrationSchema::from_config(&config),
            Err(SchemaError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rules_are_listed_in_form_order() {
        let schema = RegistrationSchema::new();
        let fields: Vec<Field> = schema.rules().iter().map(|rule| rule.field).collect();
        assert_eq!(fields, Field::ALL.to_vec());
        assert_eq!(schema.refinements().len(), 1);
        assert_eq!(schema.field_schema(Field::Age).checks.len(), 3);
        for field in Field::ALL {
            assert_eq!(schema.field_schema(field).field, field);
        }
    }
}
