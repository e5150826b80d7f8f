use std::path::Path;

use regform_schema::{Field, RegistrationInput, RegistrationSchema, SchemaConfig};
use serde::Serialize;

use crate::cmd::DoctorArgs;
use crate::config::CONFIG_ENV;
use crate::exit::{CliResult, HEALTH_CHECK_FAILED, SUCCESS};
use crate::output::OutputFormat;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum CheckStatus {
    Pass,
    Fail,
    Info,
    Skip,
}

#[derive(Debug, Serialize)]
struct CheckResult {
    name: &'static str,
    status: CheckStatus,
    detail: String,
}

#[derive(Debug, Serialize)]
struct DoctorOutput {
    checks: Vec<CheckResult>,
    overall: &'static str,
}

pub fn run(_args: DoctorArgs, format: OutputFormat, config: Option<&Path>) -> CliResult<i32> {
    let (config_check, loaded) = config_file_check(config);
    let mut checks = vec![config_check];
    checks.push(schema_compile_check(loaded.as_ref()));
    checks.push(sample_submission_check());
    checks.push(compiled_features_check());

    let has_fail = checks.iter().any(|c| c.status == CheckStatus::Fail);
    let output = DoctorOutput {
        checks,
        overall: if has_fail { "fail" } else { "pass" },
    };

    print_doctor(&output, format);

    if has_fail {
        Ok(HEALTH_CHECK_FAILED)
    } else {
        Ok(SUCCESS)
    }
}

fn print_doctor(output: &DoctorOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(output).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table | OutputFormat::Pretty => {
            println!("regform doctor\n");
            for c in &output.checks {
                println!(
                    "  [{:>4}] {:<18} {}",
                    status_text(c.status),
                    c.name,
                    c.detail
                );
            }
            if output.overall == "pass" {
                println!("\n  Result: all checks passed");
            } else {
                println!("\n  Result: one or more checks failed");
            }
        }
        OutputFormat::Raw => {
            println!("{}", output.overall);
        }
    }
}

fn status_text(status: CheckStatus) -> &'static str {
    match status {
        CheckStatus::Pass => "PASS",
        CheckStatus::Fail => "FAIL",
        CheckStatus::Info => "INFO",
        CheckStatus::Skip => "SKIP",
    }
}

fn config_file_check(path: Option<&Path>) -> (CheckResult, Option<SchemaConfig>) {
    let Some(path) = path else {
        return (
            CheckResult {
                name: "config_file",
                status: CheckStatus::Skip,
                detail: format!("no --config given and {CONFIG_ENV} not set; using defaults"),
            },
            Some(SchemaConfig::default()),
        );
    };

    match SchemaConfig::from_file(path) {
        Ok(config) => (
            CheckResult {
                name: "config_file",
                status: CheckStatus::Pass,
                detail: format!("{} loaded", path.display()),
            },
            Some(config),
        ),
        Err(err) => (
            CheckResult {
                name: "config_file",
                status: CheckStatus::Fail,
                detail: err.to_string(),
            },
            None,
        ),
    }
}

fn schema_compile_check(config: Option<&SchemaConfig>) -> CheckResult {
    let Some(config) = config else {
        return CheckResult {
            name: "schema_compile",
            status: CheckStatus::Skip,
            detail: "config not loaded".to_string(),
        };
    };

    match RegistrationSchema::from_config(config) {
        Ok(schema) => {
            let checks: usize = schema.rules().iter().map(|rule| rule.checks.len()).sum();
            CheckResult {
                name: "schema_compile",
                status: CheckStatus::Pass,
                detail: format!(
                    "{checks} field rules, {} refinements",
                    schema.refinements().len()
                ),
            }
        }
        Err(err) => CheckResult {
            name: "schema_compile",
            status: CheckStatus::Fail,
            detail: err.to_string(),
        },
    }
}

/// Runs a known-good submission through the default schema.
fn sample_submission_check() -> CheckResult {
    let sample = RegistrationInput::new()
        .with(Field::FirstName, "Sample")
        .with(Field::LastName, "Person")
        .with(Field::Email, "sample@example.com")
        .with(Field::Age, 30)
        .with(Field::ZipCode, "12345-6789")
        .with(Field::Password, "sample-pass")
        .with(Field::ConfirmPassword, "sample-pass");

    match RegistrationSchema::default().validate(&sample) {
        Ok(_) => CheckResult {
            name: "sample_submission",
            status: CheckStatus::Pass,
            detail: "default schema accepts a known-good record".to_string(),
        },
        Err(errors) => CheckResult {
            name: "sample_submission",
            status: CheckStatus::Fail,
            detail: errors.to_string(),
        },
    }
}

fn compiled_features_check() -> CheckResult {
    let mut features = Vec::new();
    if cfg!(feature = "cli") {
        features.push("cli");
    }

    CheckResult {
        name: "compiled_features",
        status: CheckStatus::Info,
        detail: features.join(", "),
    }
}
