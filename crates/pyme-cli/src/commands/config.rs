//! `pyme config` handlers and TOML dotted-key helpers.

use std::io::Write;
use std::path::PathBuf;

use crate::cli::ConfigAction;
use crate::config::{PROJECT_NAME, PymeConfig};
use crate::error::{Error, Result};

/// Dispatch a config subcommand.
pub fn handle_config_command<W: Write>(
    out: &mut W,
    config_path: Option<&str>,
    action: ConfigAction,
) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_config_path(out, config_path),
        ConfigAction::Get { key } => cmd_config_get(out, config_path, &key),
        ConfigAction::Set { key, value } => cmd_config_set(out, config_path, &key, &value),
        ConfigAction::Init { file, force } => {
            cmd_config_init(out, file.as_deref().or(config_path), force)
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Show the resolved config file path.
pub fn cmd_config_path<W: Write>(out: &mut W, config_path: Option<&str>) -> Result<()> {
    let path = PymeConfig::resolve_config_path(config_path)
        .ok_or_else(|| Error::config("Could not determine config directory for this platform"))?;
    writeln!(out, "{}", path.display())?;
    if !path.exists() {
        eprintln!("(file does not exist; run `{PROJECT_NAME} config init` to create it)");
    }
    Ok(())
}

/// Print a configuration value by dotted key.
pub fn cmd_config_get<W: Write>(out: &mut W, config_path: Option<&str>, key: &str) -> Result<()> {
    let config = PymeConfig::load(config_path)?;
    let value = toml::Value::try_from(&config).map_err(|e| Error::config(e.to_string()))?;
    let found = get_nested_value(&value, key)
        .ok_or_else(|| Error::config(format!("Key '{key}' not found in configuration")))?;
    writeln!(out, "{}", format_toml_value(found))?;
    Ok(())
}

/// Set a value by dotted key in an existing config file.
///
/// The edited document must still load as a [`PymeConfig`], so an invalid
/// RUT or region is rejected before anything is written.
pub fn cmd_config_set<W: Write>(
    out: &mut W,
    config_path: Option<&str>,
    key: &str,
    value: &str,
) -> Result<()> {
    let path = PymeConfig::resolve_config_path(config_path)
        .ok_or_else(|| Error::config("Could not determine config directory"))?;

    if !path.exists() {
        return Err(Error::config(format!(
            "Config file does not exist at {}. Run `{PROJECT_NAME} config init` first.",
            path.display()
        )));
    }
    let content = std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
    let mut doc: toml::Value = toml::from_str(&content)
        .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;

    let detected = parse_value(get_nested_value(&doc, key), value);
    let toml_str = match render_checked(doc.clone(), key, detected.clone()) {
        Ok(s) => s,
        // A new `company.rut = 760864285` is a string, not an integer.
        Err(_) if !detected.is_str() => {
            render_checked(doc, key, toml::Value::String(value.to_string()))?
        }
        Err(e) => return Err(e),
    };
    std::fs::write(&path, toml_str).map_err(|e| Error::io_with_path(e, &path))?;

    tracing::info!(key = %key, path = %path.display(), "Config value set");
    writeln!(out, "Set {key} = {value} in {}", path.display())?;
    Ok(())
}

/// Apply `key = value` and render the document, provided it still loads.
fn render_checked(mut doc: toml::Value, key: &str, value: toml::Value) -> Result<String> {
    set_nested_value(&mut doc, key, value)?;
    let toml_str = toml::to_string_pretty(&doc).map_err(|e| Error::config(e.to_string()))?;
    PymeConfig::from_toml_str(&toml_str)
        .map_err(|e| Error::config(format!("Invalid value for {key}: {e}")))?;
    Ok(toml_str)
}

/// Write a default configuration file.
pub fn cmd_config_init<W: Write>(out: &mut W, file: Option<&str>, force: bool) -> Result<()> {
    let path = match file {
        Some(p) => PathBuf::from(p),
        None => PymeConfig::default_config_path()
            .ok_or_else(|| Error::config("Could not determine config directory"))?,
    };

    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }

    let toml_str = PymeConfig::default().to_toml_string()?;
    std::fs::write(&path, &toml_str).map_err(|e| Error::io_with_path(e, &path))?;

    writeln!(out, "Config file created at {}", path.display())?;
    Ok(())
}

// ============================================================================
// TOML dotted-key helpers
// ============================================================================

/// Navigate a dotted key path in a TOML value tree.
pub fn get_nested_value<'a>(value: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    key.split('.')
        .try_fold(value, |current, part| current.as_table()?.get(part))
}

/// Set a value at a dotted key path, creating intermediate tables as needed.
pub fn set_nested_value(root: &mut toml::Value, key: &str, value: toml::Value) -> Result<()> {
    let mut parts: Vec<&str> = key.split('.').collect();
    let last = match parts.pop() {
        Some(last) if !last.is_empty() => last,
        _ => return Err(Error::config("Empty key path")),
    };

    let mut current = root;
    for part in parts {
        let table = current
            .as_table_mut()
            .ok_or_else(|| Error::config("Cannot navigate into a non-table value"))?;
        current = table
            .entry(part.to_string())
            .or_insert_with(|| toml::Value::Table(toml::map::Map::new()));
    }

    current
        .as_table_mut()
        .ok_or_else(|| Error::config("Cannot set key on a non-table value"))?
        .insert(last.to_string(), value);
    Ok(())
}

/// Parse a command-line value into a TOML value.
///
/// A key that already holds a string stays a string, so a RUT typed as
/// `760864285` is not turned into an integer. Otherwise the type is
/// detected: bool, integer, float, then string.
pub fn parse_value(existing: Option<&toml::Value>, s: &str) -> toml::Value {
    if matches!(existing, Some(toml::Value::String(_))) {
        return toml::Value::String(s.to_string());
    }
    if s == "true" {
        return toml::Value::Boolean(true);
    }
    if s == "false" {
        return toml::Value::Boolean(false);
    }
    if let Ok(i) = s.parse::<i64>() {
        return toml::Value::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return toml::Value::Float(f);
    }
    toml::Value::String(s.to_string())
}

/// Format a TOML value for display on stdout.
pub fn format_toml_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(dt) => dt.to_string(),
        toml::Value::Array(_) | toml::Value::Table(_) => {
            toml::to_string_pretty(value).unwrap_or_else(|_| format!("{value:?}"))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
