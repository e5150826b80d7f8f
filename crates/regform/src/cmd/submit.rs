use std::path::Path;

use regform_form::{RegistrationForm, Submission, TracingSink};
use regform_schema::{Field, RegistrationInput};

use crate::cmd::{FieldArgs, SubmitArgs};
use crate::config::load_schema;
use crate::exit::{form_error, schema_error, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_field_errors, print_record, OutputFormat};

pub fn run(args: SubmitArgs, format: OutputFormat, config: Option<&Path>) -> CliResult<i32> {
    let schema = load_schema(config)?;
    let input = resolve_input(&args)?;

    let mut form = RegistrationForm::with_schema(schema, TracingSink);
    let submission = form
        .submit(&input)
        .map_err(|err| form_error("submit failed", err))?;

    match submission {
        Submission::Accepted(record) => {
            print_record(&record, format);
            Ok(SUCCESS)
        }
        Submission::Rejected(errors) => {
            tracing::warn!(invalid = errors.len(), "registration rejected");
            print_field_errors(&errors, format);
            Ok(DATA_INVALID)
        }
    }
}

fn resolve_input(args: &SubmitArgs) -> CliResult<RegistrationInput> {
    if let Some(json) = &args.json {
        return RegistrationInput::from_json_str(json)
            .map_err(|err| schema_error("--json is not a valid submission", err));
    }
    if let Some(path) = &args.file {
        return RegistrationInput::from_file(path).map_err(|err| {
            schema_error(&format!("{} is not a valid submission", path.display()), err)
        });
    }
    Ok(input_from_fields(&args.fields))
}

pub(crate) fn input_from_fields(fields: &FieldArgs) -> RegistrationInput {
    let values = [
        (Field::FirstName, &fields.first_name),
        (Field::LastName, &fields.last_name),
        (Field::Email, &fields.email),
        (Field::Age, &fields.age),
        (Field::ZipCode, &fields.zip_code),
        (Field::Password, &fields.password),
        (Field::ConfirmPassword, &fields.confirm_password),
    ];

    values
        .into_iter()
        .filter_map(|(field, value)| value.clone().map(|value| (field, value)))
        .collect()
}
