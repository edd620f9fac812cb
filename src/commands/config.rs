//! Implementation of the `wikidoc config` command.
//!
//! Values are read from the effective configuration, so defaults show up
//! even when `.wikidoc.toml` leaves them out.

use anyhow::{Context, Result, anyhow};
use toml::Value;

use crate::config::{WikiConfig, find_config_path};

/// The effective configuration as a TOML value.
fn effective_config() -> Result<Value> {
    let (config, _) = WikiConfig::discover()?;
    Value::try_from(&config).context("Failed to serialize config")
}

/// Get a value from the config using dot notation (e.g., "articles.root").
pub fn get(key: &str) -> Result<()> {
    let config = effective_config()?;
    let value = get_nested_value(&config, key)?;
    println!("{}", format_value(value));
    Ok(())
}

/// List all config values.
pub fn list() -> Result<()> {
    let config = effective_config()?;
    for line in config_lines(&config, "") {
        println!("{line}");
    }
    Ok(())
}

/// Print the path to the config file.
pub fn path() -> Result<()> {
    let config_path = find_config_path()?;
    println!("{}", config_path.display());
    Ok(())
}

/// Walk a dotted key (e.g. `channels.resources`) through nested tables.
fn get_nested_value<'a>(value: &'a Value, key: &str) -> Result<&'a Value> {
    key.split('.').try_fold(value, |current, part| {
        current
            .as_table()
            .and_then(|table| table.get(part))
            .ok_or_else(|| anyhow!("Key '{}' not found in config", key))
    })
}

/// Display form of a config value: strings bare, tables inline.
fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Table(table) => {
            let items: Vec<String> = table
                .iter()
                .map(|(k, v)| format!("{} = {}", k, format_value_quoted(v)))
                .collect();
            format!("{{{}}}", items.join(", "))
        }
        other => other.to_string(),
    }
}

fn format_value_quoted(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{}\"", s),
        _ => format_value(value),
    }
}

/// Flatten all config values into `key = value` lines with full key paths.
fn config_lines(value: &Value, prefix: &str) -> Vec<String> {
    let mut lines = Vec::new();
    if let Value::Table(table) = value {
        for (key, val) in table {
            let full_key = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{}.{}", prefix, key)
            };
            match val {
                Value::Table(_) => lines.extend(config_lines(val, &full_key)),
                _ => lines.push(format!("{} = {}", full_key, format_value_quoted(val))),
            }
        }
    }
    lines
}
