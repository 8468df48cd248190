//! Settings loading from configuration files.
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Load from a TOML file (missing keys keep their defaults).
//! 3. Apply environment variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! | Env Var | Setting |
//! |---|---|
//! | `ZORM_DEBUG` | `debug` |
//! | `ZORM_LOG_LEVEL` | `log_level` |
//! | `ZORM_DB_ENGINE` | `database.engine` |
//!
//! ## Examples
//!
//! ```rust,no_run
//! use zorm_core::settings_loader;
//!
//! let settings = settings_loader::from_toml_file_with_env("config/zorm.toml").unwrap();
//! ```

use std::path::Path;

use crate::error::{ZormError, ZormResult};
use crate::settings::Settings;

/// Loads settings from a TOML string.
///
/// Keys missing from the TOML keep their default values; unknown keys are
/// rejected so a misspelt `[database]` entry does not silently select the
/// default dialect.
///
/// # Errors
///
/// Returns [`ZormError::ConfigurationError`] if the TOML is malformed, has
/// an unknown key, or a value of the wrong type.
pub fn from_toml_str(toml_str: &str) -> ZormResult<Settings> {
    toml::from_str(toml_str)
        .map_err(|e| ZormError::ConfigurationError(format!("invalid zorm settings: {e}")))
}

/// Loads settings from a TOML file.
///
/// # Errors
///
/// Returns [`ZormError::IoError`] if the file cannot be read, or the
/// errors of [`from_toml_str`].
pub fn from_toml_file(path: impl AsRef<Path>) -> ZormResult<Settings> {
    let content = std::fs::read_to_string(path)?;
    from_toml_str(&content)
}

/// Loads settings from a TOML file and then applies environment variable overrides.
///
/// # Errors
///
/// Same as [`from_toml_file`].
pub fn from_toml_file_with_env(path: impl AsRef<Path>) -> ZormResult<Settings> {
    let mut settings = from_toml_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from just environment variables (starting from defaults).
pub fn from_env() -> Settings {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Applies environment variable overrides to a settings struct.
///
/// `ZORM_DEBUG` accepts "true"/"1"/"yes"; anything else means false. A
/// blank `ZORM_DB_ENGINE` is ignored.
pub fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(val) = std::env::var("ZORM_DEBUG") {
        settings.debug = matches!(val.to_lowercase().as_str(), "true" | "1" | "yes");
    }

    if let Ok(val) = std::env::var("ZORM_LOG_LEVEL") {
        settings.log_level = val;
    }

    if let Ok(val) = std::env::var("ZORM_DB_ENGINE") {
        let val = val.trim();
        if !val.is_empty() {
            settings.database.engine = val.to_string();
        }
    }
}
