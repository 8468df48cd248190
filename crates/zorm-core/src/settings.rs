//! Settings for zorm.
//!
//! [`Settings`] holds the handful of knobs the compiler needs: which SQL
//! dialect to target and how to log. [`SETTINGS`] is an optional global
//! slot for applications that prefer configuring once at startup.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{ZormError, ZormResult};

/// Database dialect configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseSettings {
    /// The database engine (e.g. `mysql`, `sqlite`, or a dotted path ending
    /// in one of those).
    pub engine: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            engine: "mysql".to_string(),
        }
    }
}

/// The complete set of zorm settings.
///
/// # Examples
///
/// ```
/// use zorm_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert!(!settings.debug);
/// assert_eq!(settings.database.engine, "mysql");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Whether debug mode is enabled (human-readable logs).
    pub debug: bool,
    /// The log level filter (e.g. "info", "debug", "zorm_db=trace").
    pub log_level: String,
    /// Dialect selection.
    pub database: DatabaseSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: false,
            log_level: "info".to_string(),
            database: DatabaseSettings::default(),
        }
    }
}

/// A lazily-initialized, globally-accessible settings container.
///
/// Call [`configure`](LazySettings::configure) once at startup; readers
/// that run before that see the defaults via
/// [`get_or_default`](LazySettings::get_or_default).
pub struct LazySettings {
    inner: OnceLock<Settings>,
}

impl Default for LazySettings {
    fn default() -> Self {
        Self::new()
    }
}

impl LazySettings {
    /// Creates a new, unconfigured `LazySettings`.
    pub const fn new() -> Self {
        Self {
            inner: OnceLock::new(),
        }
    }

    /// Configures the global settings.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if settings were already configured.
    pub fn configure(&self, settings: Settings) -> ZormResult<()> {
        self.inner.set(settings).map_err(|_| {
            ZormError::ConfigurationError("Settings have already been configured".to_string())
        })
    }

    /// Returns the configured settings, if any.
    pub fn get(&self) -> Option<&Settings> {
        self.inner.get()
    }

    /// Returns the configured settings, installing the defaults if nothing
    /// was configured yet.
    pub fn get_or_default(&self) -> &Settings {
        self.inner.get_or_init(Settings::default)
    }

    /// Returns `true` if settings have been configured.
    pub fn is_configured(&self) -> bool {
        self.inner.get().is_some()
    }
}

/// The global settings instance.
pub static SETTINGS: LazySettings = LazySettings::new();
