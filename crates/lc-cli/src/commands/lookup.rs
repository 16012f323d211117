//! `lcgen lookup`: evaluates one constant in-process

use super::common::Session;
use crate::cli::CliConfig;
use crate::{CliError, Result};
use clap::Args;
use lc_core::lookup::LookupError;
use lc_core::{ConstantsFactory, ReturnCategory, Value};
use serde_json::json;
use std::path::PathBuf;

#[derive(Debug, Clone, Args)]
pub struct LookupArgs {
    /// Interface manifest (TOML)
    pub manifest: PathBuf,

    /// Interface name (qualified or simple)
    pub interface: String,

    /// Locale name, e.g. `default` or `en_US`
    pub locale: String,

    /// Return type: boolean, int, double, float, string, string_array or string_map
    pub category: String,

    /// Method name
    pub name: String,

    /// Directories searched for .properties files, in order
    #[arg(short = 'p', long = "properties")]
    pub properties: Vec<PathBuf>,
}

pub fn lookup_command(args: LookupArgs, config: &CliConfig) -> Result<serde_json::Value> {
    let category: ReturnCategory = args
        .category
        .parse()
        .map_err(|err: lc_core::model::UnsupportedReturnType| CliError::InvalidInput(err.to_string()))?;
    let session = Session::open(&args.manifest, &args.properties, config)?;
    let output = session.process_one(&args.interface)?;

    let factory = ConstantsFactory::new(&output, session.options.lookup_cache);
    let instance = factory.create(&args.locale).ok_or_else(|| {
        CliError::InvalidInput(format!(
            "{} has no implementation for locale '{}' (available: {})",
            output.interface,
            args.locale,
            factory.locales().collect::<Vec<_>>().join(", ")
        ))
    })?;

    let value = if output.lookup.is_some() {
        instance.lookup(category, &args.name)?
    } else {
        instance
            .call(&args.name, category)
            .ok_or_else(|| LookupError::NotFound {
                name: args.name.clone(),
                interface: output.interface.clone(),
                category,
            })?
    };
    Ok(value_to_json(&value))
}

pub fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Boolean(value) => json!(value),
        Value::Int(value) => json!(value),
        Value::Double(value) => json!(value),
        Value::Float(value) => json!(value),
        Value::String(value) => json!(value),
        Value::StringArray(values) => json!(values.as_ref()),
        Value::StringMap(entries) => serde_json::Value::Object(
            entries
                .iter()
                .map(|(key, value)| (key.clone(), json!(value)))
                .collect(),
        ),
    }
}
