//! Settings loading from configuration files.
//!
//! This module provides functions to load [`Settings`] from TOML files, JSON
//! files, and to apply environment variable overrides.
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Load from a TOML or JSON file (overriding defaults).
//! 3. Apply environment variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! | Env Var | Setting |
//! |---|---|
//! | `LINGUIST_DEBUG` | `debug` |
//! | `LINGUIST_LANGUAGE` | `language` |
//! | `LINGUIST_SOURCE_LANGUAGE` | `source_language` |
//! | `LINGUIST_CATALOGUE_DIR` | `catalogue_dir` |
//! | `LINGUIST_CATALOGUE_PREFIX` | `catalogue_prefix` |
//! | `LINGUIST_LOAD_UNFINISHED` | `load_unfinished` |
//! | `LINGUIST_STRICT` | `strict` |
//! | `LINGUIST_LOG_LEVEL` | `log_level` |
//!
//! ## Examples
//!
//! ```rust,no_run
//! use linguist_rs_core::settings_loader;
//!
//! let settings = settings_loader::from_toml_file("linguist.toml").unwrap();
//! let settings = settings_loader::from_json_file_with_env("linguist.json").unwrap();
//! ```

use std::path::{Path, PathBuf};

use crate::error::LinguistError;
use crate::settings::Settings;

/// Loads settings from a TOML string.
///
/// Any fields not present in the TOML keep their default values.
///
/// # Errors
///
/// Returns an error if the TOML is malformed or cannot be deserialized.
pub fn from_toml_str(toml_str: &str) -> Result<Settings, LinguistError> {
    let value: serde_json::Value = toml::from_str(toml_str)
        .map_err(|e| LinguistError::ConfigurationError(format!("Failed to parse TOML: {e}")))?;
    merge_over_defaults(value, "TOML")
}

/// Loads settings from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the TOML is malformed.
pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Settings, LinguistError> {
    from_toml_str(&read_config(path.as_ref())?)
}

/// Loads settings from a TOML file and then applies environment variable overrides.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the TOML is malformed.
pub fn from_toml_file_with_env(path: impl AsRef<Path>) -> Result<Settings, LinguistError> {
    let mut settings = from_toml_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from a JSON string.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or cannot be deserialized.
pub fn from_json_str(json_str: &str) -> Result<Settings, LinguistError> {
    let json_value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| LinguistError::ConfigurationError(format!("Failed to parse JSON: {e}")))?;
    merge_over_defaults(json_value, "JSON")
}

/// Loads settings from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the JSON is malformed.
pub fn from_json_file(path: impl AsRef<Path>) -> Result<Settings, LinguistError> {
    from_json_str(&read_config(path.as_ref())?)
}

/// Loads settings from a JSON file and then applies environment variable overrides.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the JSON is malformed.
pub fn from_json_file_with_env(path: impl AsRef<Path>) -> Result<Settings, LinguistError> {
    let mut settings = from_json_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from a file, choosing the format by extension.
///
/// `.json` files are read as JSON; everything else is read as TOML.
/// Environment overrides are applied afterwards.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn from_file_with_env(path: impl AsRef<Path>) -> Result<Settings, LinguistError> {
    let path = path.as_ref();
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        from_json_file_with_env(path)
    } else {
        from_toml_file_with_env(path)
    }
}

/// Loads settings from just environment variables (starting from defaults).
pub fn from_env() -> Settings {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Applies environment variable overrides to a settings struct.
///
/// Boolean variables accept "true"/"1"/"yes"; anything else means false.
pub fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(val) = std::env::var("LINGUIST_DEBUG") {
        settings.debug = parse_bool(&val);
    }

    if let Ok(val) = std::env::var("LINGUIST_LANGUAGE") {
        settings.language = val;
    }

    if let Ok(val) = std::env::var("LINGUIST_SOURCE_LANGUAGE") {
        settings.source_language = val;
    }

    if let Ok(val) = std::env::var("LINGUIST_CATALOGUE_DIR") {
        settings.catalogue_dir = PathBuf::from(val);
    }

    if let Ok(val) = std::env::var("LINGUIST_CATALOGUE_PREFIX") {
        settings.catalogue_prefix = val;
    }

    if let Ok(val) = std::env::var("LINGUIST_LOAD_UNFINISHED") {
        settings.load_unfinished = parse_bool(&val);
    }

    if let Ok(val) = std::env::var("LINGUIST_STRICT") {
        settings.strict = parse_bool(&val);
    }

    if let Ok(val) = std::env::var("LINGUIST_LOG_LEVEL") {
        settings.log_level = val;
    }
}

// ============================================================
// Helpers
// ============================================================

fn parse_bool(val: &str) -> bool {
    matches!(val.to_lowercase().as_str(), "true" | "1" | "yes")
}

fn read_config(path: &Path) -> Result<String, LinguistError> {
    std::fs::read_to_string(path).map_err(|e| {
        LinguistError::ConfigurationError(format!(
            "Failed to read settings file '{}': {e}",
            path.display()
        ))
    })
}

/// Overlays the keys present in `value` on the default settings.
fn merge_over_defaults(
    value: serde_json::Value,
    format: &str,
) -> Result<Settings, LinguistError> {
    let serde_json::Value::Object(overrides) = value else {
        return Err(LinguistError::ConfigurationError(format!(
            "{format} settings must be a table of keys"
        )));
    };
    let mut merged = match serde_json::to_value(Settings::default()) {
        Ok(serde_json::Value::Object(defaults)) => defaults,
        _ => serde_json::Map::new(),
    };
    merged.extend(overrides);

    serde_json::from_value(serde_json::Value::Object(merged)).map_err(|e| {
        LinguistError::ConfigurationError(format!(
            "Failed to deserialize settings from {format}: {e}"
        ))
    })
}
