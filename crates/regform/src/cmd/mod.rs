use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod doctor;
pub mod fill;
pub mod schema;
pub mod submit;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate one registration and print the record or the field errors.
    Submit(SubmitArgs),
    /// Fill in the registration form interactively.
    Fill(FillArgs),
    /// Print the active validation rules.
    Schema(SchemaArgs),
    /// Run local health checks.
    Doctor(DoctorArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat, config: Option<PathBuf>) -> CliResult<i32> {
    let config = config.as_deref();
    match command {
        Command::Submit(args) => submit::run(args, format, config),
        Command::Fill(args) => fill::run(args, format, config),
        Command::Schema(args) => schema::run(args, format, config),
        Command::Doctor(args) => doctor::run(args, format, config),
        Command::Version(args) => version::run(args),
    }
}

const FIELD_FLAGS: [&str; 7] = [
    "first_name",
    "last_name",
    "email",
    "age",
    "zip_code",
    "password",
    "confirm_password",
];

/// Field values given one flag per field.
#[derive(Args, Debug, Default)]
pub struct FieldArgs {
    /// First name.
    #[arg(long, env = "REGFORM_FIRST_NAME")]
    pub first_name: Option<String>,
    /// Last name.
    #[arg(long, env = "REGFORM_LAST_NAME")]
    pub last_name: Option<String>,
    /// Email address.
    #[arg(long, env = "REGFORM_EMAIL")]
    pub email: Option<String>,
    /// Age in years.
    #[arg(long, env = "REGFORM_AGE", allow_hyphen_values = true)]
    pub age: Option<String>,
    /// Zip code (12345 or 12345-6789).
    #[arg(long, env = "REGFORM_ZIP_CODE")]
    pub zip_code: Option<String>,
    /// Password.
    #[arg(long, env = "REGFORM_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
    /// Password confirmation.
    #[arg(long, env = "REGFORM_CONFIRM_PASSWORD", hide_env_values = true)]
    pub confirm_password: Option<String>,
}

#[derive(Args, Debug)]
pub struct SubmitArgs {
    #[command(flatten)]
    pub fields: FieldArgs,
    /// Submission as a JSON object keyed by field name.
    #[arg(long, conflicts_with = "file", conflicts_with_all = FIELD_FLAGS)]
    pub json: Option<String>,
    /// Read the JSON submission from a file.
    #[arg(long, conflicts_with = "json", conflicts_with_all = FIELD_FLAGS)]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct FillArgs {
    /// Give up after this many rejected attempts.
    #[arg(long, default_value = "3", value_parser = clap::value_parser!(u32).range(1..))]
    pub max_attempts: u32,
}

#[derive(Args, Debug, Default)]
pub struct SchemaArgs {}

#[derive(Args, Debug, Default)]
pub struct DoctorArgs {}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
