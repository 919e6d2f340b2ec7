//! Settings for linguist-rs.
//!
//! This module provides the [`Settings`] struct, which holds runtime
//! configuration for catalogue loading and lookup, and [`LazySettings`], a
//! globally-accessible, lazily-initialized settings instance.

use std::path::PathBuf;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// The complete set of runtime settings.
///
/// # Examples
///
/// ```
/// use linguist_rs_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert_eq!(settings.source_language, "en");
/// assert!(!settings.load_unfinished);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // ── Core ─────────────────────────────────────────────────────────

    /// Whether debug mode is enabled (pretty logs instead of JSON).
    pub debug: bool,

    // ── Catalogues ───────────────────────────────────────────────────

    /// The language whose catalogue should be loaded (e.g. "fi", "fi_FI").
    pub language: String,
    /// The language the source strings are written in. Reported by
    /// `i18n::get_language` while no language is active.
    pub source_language: String,
    /// Directory searched for catalogue files.
    pub catalogue_dir: PathBuf,
    /// File name prefix of catalogue files (`{prefix}_{language}.ts`).
    pub catalogue_prefix: String,
    /// Whether non-empty `unfinished` translations are used at lookup time.
    pub load_unfinished: bool,

    // ── Validation ───────────────────────────────────────────────────

    /// Treat warnings as errors when checking catalogues.
    pub strict: bool,

    // ── Logging ──────────────────────────────────────────────────────

    /// The log level (e.g. "info", "debug", "warn").
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            // Core
            debug: true,

            // Catalogues
            language: "en".to_string(),
            source_language: "en".to_string(),
            catalogue_dir: PathBuf::from("i18n"),
            catalogue_prefix: "app".to_string(),
            load_unfinished: false,

            // Validation
            strict: false,

            // Logging
            log_level: "info".to_string(),
        }
    }
}

/// A lazily-initialized, globally-accessible settings container.
///
/// Call [`configure`](LazySettings::configure) once at startup to set the
/// settings, then use [`get`](LazySettings::get) to access them.
///
/// # Panics
///
/// [`get`](LazySettings::get) panics if settings have not been configured.
/// [`configure`](LazySettings::configure) panics if called more than once.
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

    /// Configures the global settings. Must be called exactly once.
    ///
    /// # Panics
    ///
    /// Panics if settings have already been configured.
    pub fn configure(&self, settings: Settings) {
        self.inner
            .set(settings)
            .expect("Settings have already been configured");
    }

    /// Configures the global settings unless already configured.
    ///
    /// Returns `true` if these settings were installed.
    pub fn try_configure(&self, settings: Settings) -> bool {
        self.inner.set(settings).is_ok()
    }

    /// Returns a reference to the configured settings.
    ///
    /// # Panics
    ///
    /// Panics if settings have not been configured.
    pub fn get(&self) -> &Settings {
        self.inner
            .get()
            .expect("Settings have not been configured. Call SETTINGS.configure() first.")
    }

    /// Returns the configured settings, or `None` before configuration.
    pub fn try_get(&self) -> Option<&Settings> {
        self.inner.get()
    }

    /// Returns `true` if settings have been configured.
    pub fn is_configured(&self) -> bool {
        self.inner.get().is_some()
    }
}

/// The global settings instance.
pub static SETTINGS: LazySettings = LazySettings::new();
