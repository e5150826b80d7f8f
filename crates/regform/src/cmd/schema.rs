use std::path::Path;

use crate::cmd::SchemaArgs;
use crate::config::load_schema;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_rules, OutputFormat};

pub fn run(_args: SchemaArgs, format: OutputFormat, config: Option<&Path>) -> CliResult<i32> {
    let schema = load_schema(config)?;
    print_rules(&schema, format);
    Ok(SUCCESS)
}
