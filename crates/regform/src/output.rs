use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use regform_schema::{Field, FieldErrors, RegistrationRecord, RegistrationSchema, ValueKind};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum SubmissionOutput<'a> {
    Accepted { record: &'a RegistrationRecord },
    Rejected { errors: &'a FieldErrors },
}

#[derive(Serialize)]
struct RuleOutput {
    field: &'static str,
    kind: &'static str,
    rule: String,
    message: String,
}

pub fn print_record(record: &RegistrationRecord, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&SubmissionOutput::Accepted { record }),
        OutputFormat::Table => {
            let mut table = new_table(vec!["FIELD", "VALUE"]);
            for field in Field::ALL {
                table.add_row(vec![field.label().to_string(), record.display_value(field)]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            let pairs: Vec<String> = Field::ALL
                .into_iter()
                .map(|field| format!("{}={}", field, record.display_value(field)))
                .collect();
            println!("accepted {}", pairs.join(" "));
        }
        OutputFormat::Raw => {
            println!(
                "{}",
                serde_json::to_string(record).unwrap_or_else(|_| "{}".to_string())
            );
        }
    }
}

pub fn print_field_errors(errors: &FieldErrors, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&SubmissionOutput::Rejected { errors }),
        OutputFormat::Table => {
            let mut table = new_table(vec!["FIELD", "ERROR"]);
            for (field, message) in errors.iter() {
                table.add_row(vec![field.label().to_string(), message.to_string()]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for (field, message) in errors.iter() {
                println!("{}: {message}", field.label());
            }
        }
        OutputFormat::Raw => {
            for (field, message) in errors.iter() {
                println!("{field}\t{message}");
            }
        }
    }
}

pub fn print_rules(schema: &RegistrationSchema, format: OutputFormat) {
    let rows = rule_rows(schema);
    match format {
        OutputFormat::Json => print_json(&rows),
        OutputFormat::Table => {
            let mut table = new_table(vec!["FIELD", "KIND", "RULE", "MESSAGE"]);
            for row in &rows {
                table.add_row(vec![
                    row.field.to_string(),
                    row.kind.to_string(),
                    row.rule.clone(),
                    row.message.clone(),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty | OutputFormat::Raw => {
            for row in &rows {
                println!("{} [{}] {}: {}", row.field, row.kind, row.rule, row.message);
            }
        }
    }
}

fn rule_rows(schema: &RegistrationSchema) -> Vec<RuleOutput> {
    let mut rows = Vec::new();
    for field_schema in schema.rules() {
        let kind = kind_name(field_schema.kind);
        for check in &field_schema.checks {
            rows.push(RuleOutput {
                field: field_schema.field.as_str(),
                kind,
                rule: check.rule.describe(),
                message: check.message(),
            });
        }
    }
    for refinement in schema.refinements() {
        rows.push(RuleOutput {
            field: refinement.target.as_str(),
            kind: "refinement",
            rule: refinement.describe(),
            message: refinement.message.clone(),
        });
    }
    rows
}

fn kind_name(kind: ValueKind) -> &'static str {
    match kind {
        ValueKind::Text { trim: true } => "trimmed text",
        ValueKind::Text { trim: false } => "text",
        ValueKind::Integer => "integer",
    }
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}
