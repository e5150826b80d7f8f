use std::io::{self, BufRead, Write};
use std::path::Path;

use regform_form::{RecordSink, RegistrationForm, Submission, TracingSink};
use regform_schema::{FieldErrors, RegistrationInput, RegistrationRecord};

use crate::cmd::FillArgs;
use crate::config::load_schema;
use crate::exit::{form_error, io_error, CliError, CliResult, DATA_INVALID, FAILURE, SUCCESS};
use crate::output::{print_field_errors, print_record, OutputFormat};

#[derive(Debug)]
enum FillOutcome {
    Accepted(RegistrationRecord),
    GaveUp(FieldErrors),
}

pub fn run(args: FillArgs, format: OutputFormat, config: Option<&Path>) -> CliResult<i32> {
    let schema = load_schema(config)?;
    let mut form = RegistrationForm::with_schema(schema, TracingSink);

    let outcome = {
        let stdin = io::stdin();
        let stdout = io::stdout();
        fill_form(
            &mut form,
            &mut stdin.lock(),
            &mut stdout.lock(),
            args.max_attempts,
        )?
    };

    match outcome {
        FillOutcome::Accepted(record) => {
            print_record(&record, format);
            Ok(SUCCESS)
        }
        FillOutcome::GaveUp(errors) => {
            tracing::warn!(attempts = form.attempts(), "giving up on registration");
            print_field_errors(&errors, format);
            Ok(DATA_INVALID)
        }
    }
}

fn fill_form<S, R, W>(
    form: &mut RegistrationForm<S>,
    reader: &mut R,
    writer: &mut W,
    max_attempts: u32,
) -> CliResult<FillOutcome>
where
    S: RecordSink,
    R: BufRead,
    W: Write,
{
    loop {
        let input = prompt_fields(form, reader, writer)?;
        match form
            .submit(&input)
            .map_err(|err| form_error("submit failed", err))?
        {
            Submission::Accepted(record) => {
                say(writer, "Registration accepted.")?;
                return Ok(FillOutcome::Accepted(record));
            }
            Submission::Rejected(errors) => {
                if form.attempts() >= max_attempts {
                    say(writer, "Too many invalid attempts.")?;
                    return Ok(FillOutcome::GaveUp(errors));
                }
                say(writer, "Please correct the fields marked with '!'.")?;
            }
        }
    }
}

fn prompt_fields<S, R, W>(
    form: &RegistrationForm<S>,
    reader: &mut R,
    writer: &mut W,
) -> CliResult<RegistrationInput>
where
    S: RecordSink,
    R: BufRead,
    W: Write,
{
    let mut input = RegistrationInput::new();
    for view in form.fields() {
        if let Some(error) = view.error {
            say(writer, &format!("  ! {error}"))?;
        }
        write!(writer, "{}: ", view.label)
            .and_then(|()| writer.flush())
            .map_err(|err| io_error("failed writing prompt", err))?;

        let mut line = String::new();
        let read = reader
            .read_line(&mut line)
            .map_err(|err| io_error("failed reading input", err))?;
        if read == 0 {
            return Err(CliError::new(
                FAILURE,
                "input ended before the form was submitted",
            ));
        }
        let value = line.strip_suffix('\n').unwrap_or(&line);
        let value = value.strip_suffix('\r').unwrap_or(value);
        input.set(view.field, value);
    }
    Ok(input)
}

fn say<W: Write>(writer: &mut W, line: &str) -> CliResult<()> {
    writeln!(writer, "{line}").map_err(|err| io_error("failed writing prompt", err))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use regform_schema::Field;

    use super::*;

    const VALID: &str = "Ada\nLovelace\n ada@example.com \n36\n12345\nengine42\nengine42\n";

    type Transcript = (CliResult<FillOutcome>, String, Vec<RegistrationRecord>);

    fn run_fill(script: &str, max_attempts: u32) -> Transcript {
        let mut form = RegistrationForm::new(Vec::new());
        let mut reader = Cursor::new(script.as_bytes().to_vec());
        let mut writer = Vec::new();
        let outcome = fill_form(&mut form, &mut reader, &mut writer, max_attempts);
        (
            outcome,
            String::from_utf8(writer).unwrap(),
            form.into_sink(),
        )
    }

    #[test]
    fn valid_answers_are_accepted_first_time() {
        let (outcome, transcript, records) = run_fill(VALID, 3);

        assert!(matches!(outcome, Ok(FillOutcome::Accepted(_))));
        assert!(transcript.contains("First Name: "));
        assert!(transcript.contains("Confirm Password: "));
        assert!(transcript.ends_with("Registration accepted.\n"));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].email(), "ada@example.com");
    }

    #[test]
    fn errors_are_shown_on_the_next_attempt() {
        let rejected = "A\nLovelace\nada@example.com\n36\n12345\nengine42\nengine42\n";
        let script = format!("{rejected}{VALID}");
        let (outcome, transcript, records) = run_fill(&script, 3);

        assert!(matches!(outcome, Ok(FillOutcome::Accepted(_))));
        assert!(transcript.contains("  ! String must contain at least 2 character(s)"));
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn gives_up_after_max_attempts() {
        let bad = "Ada\nLovelace\nada@example.com\n36\n12345\nengine42\nengine43\n";
        let script = bad.repeat(2);
        let (outcome, transcript, records) = run_fill(&script, 2);

        match outcome {
            Ok(FillOutcome::GaveUp(errors)) => {
                assert_eq!(errors.get(Field::ConfirmPassword), Some("Password does not match"));
            }
            other => panic!("expected to give up, got {other:?}"),
        }
        assert!(transcript.contains("Too many invalid attempts."));
        assert!(records.is_empty());
    }

    #[test]
    fn end_of_input_is_a_failure() {
        let (outcome, _, _) = run_fill("Ada\nLovelace\n", 3);
        let err = outcome.unwrap_err();
        assert_eq!(err.code, FAILURE);
    }

    #[test]
    fn crlf_line_endings_are_stripped() {
        let script = VALID.replace('\n', "\r\n");
        let (outcome, _, records) = run_fill(&script, 1);
        assert!(matches!(outcome, Ok(FillOutcome::Accepted(_))));
        assert_eq!(records[0].zip_code(), "12345");
    }
}
