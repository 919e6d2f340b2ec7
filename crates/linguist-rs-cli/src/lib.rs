//! # linguist-rs-cli
//!
//! Management commands for Qt Linguist catalogues.
//!
//! This crate provides:
//!
//! - **Management commands** - A framework for defining and registering CLI
//!   commands ([`ManagementCommand`], [`CommandRegistry`])
//! - **Built-in commands** - `check`, `lookup`, `stats`, `normalize`, and `export`
//! - **Entry point** - [`run`], which loads settings, configures logging, and
//!   dispatches to a command; the `linguist-rs` binary is a thin wrapper
//!
//! ## Quick Start
//!
//! ```rust
//! use linguist_rs_cli::build_registry;
//!
//! let registry = build_registry();
//! let names = registry.names();
//! assert!(names.contains(&"check"));
//! assert!(names.contains(&"lookup"));
//! ```

// These clippy lints are intentionally allowed:
// - doc_markdown: backtick requirements for documentation items are too strict
// - unused_async: command handlers keep consistent async signatures
#![allow(clippy::doc_markdown)]
#![allow(clippy::unused_async)]

pub mod command;
pub mod commands;

pub use command::{CommandRegistry, ManagementCommand};

use linguist_rs_core::{logging, settings_loader, LinguistResult, Settings, SETTINGS};

/// Creates a registry holding every built-in command.
pub fn build_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    commands::register_builtin_commands(&mut registry);
    registry
}

/// Loads settings from the global `--settings` file, or from defaults, with
/// `LINGUIST_*` environment overrides applied on top.
pub fn load_settings(matches: &clap::ArgMatches) -> LinguistResult<Settings> {
    match matches.get_one::<String>("settings") {
        Some(path) => settings_loader::from_file_with_env(path),
        None => Ok(settings_loader::from_env()),
    }
}

/// Runs the command selected by `matches`.
///
/// Loads settings, installs the logging subscriber, publishes the settings
/// to [`SETTINGS`] if nothing else has, and dispatches to the command.
pub async fn run(registry: &CommandRegistry, matches: &clap::ArgMatches) -> LinguistResult<()> {
    let settings = load_settings(matches)?;
    logging::setup_logging(&settings);
    SETTINGS.try_configure(settings.clone());
    registry.execute(matches, &settings).await
}
