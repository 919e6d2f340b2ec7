//! # linguist-rs-core
//!
//! Core types for working with Qt Linguist translation catalogues (`.ts` files).
//! This crate has no framework dependencies and provides the foundation for the
//! management CLI.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`settings`] - Runtime settings and global configuration
//! - [`settings_loader`] - Loading settings from TOML, JSON, and the environment
//! - [`i18n`] - Catalogue model, XML parser/writer, plural rules, and lookup
//! - [`logging`] - Tracing-based logging integration

pub mod error;
pub mod i18n;
pub mod logging;
pub mod settings;
pub mod settings_loader;

// Re-export the most commonly used types at the crate root.
pub use error::{LinguistError, LinguistResult};
pub use i18n::catalog::Catalogue;
pub use i18n::model::{Context, Message, TranslationStatus, TranslationText, TsDocument};
pub use i18n::plural::PluralRule;
pub use settings::{Settings, SETTINGS};
