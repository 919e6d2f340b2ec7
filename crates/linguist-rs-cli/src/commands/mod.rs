//! Built-in management commands.
//!
//! Each command implements [`ManagementCommand`](crate::command::ManagementCommand)
//! and keeps its logic in a plain function so it can be tested without a
//! runtime or stdout.

pub mod check;
pub mod export;
pub mod lookup;
pub mod normalize;
pub mod stats;

pub use check::CheckCommand;
pub use export::ExportCommand;
pub use lookup::LookupCommand;
pub use normalize::NormalizeCommand;
pub use stats::StatsCommand;

use std::path::{Path, PathBuf};

use linguist_rs_core::i18n::{loader, parser};
use linguist_rs_core::{LinguistError, LinguistResult, Settings, TsDocument};

use crate::command::CommandRegistry;

/// Registers all built-in management commands into the given registry.
pub fn register_builtin_commands(registry: &mut CommandRegistry) {
    registry.register(Box::new(CheckCommand));
    registry.register(Box::new(LookupCommand));
    registry.register(Box::new(StatsCommand));
    registry.register(Box::new(NormalizeCommand));
    registry.register(Box::new(ExportCommand));
}

/// The optional positional `file` argument shared by the commands.
pub(crate) fn file_arg() -> clap::Arg {
    clap::Arg::new("file")
        .value_name("FILE")
        .value_parser(clap::value_parser!(PathBuf))
        .help("Catalogue file; defaults to the catalogue for the configured language")
}

/// Resolves the catalogue to operate on: the `file` argument, or the
/// catalogue found for `settings.language` in `settings.catalogue_dir`.
pub(crate) fn catalogue_path(
    matches: &clap::ArgMatches,
    settings: &Settings,
) -> LinguistResult<PathBuf> {
    if let Some(path) = matches.get_one::<PathBuf>("file") {
        return Ok(path.clone());
    }
    loader::find_catalogue(
        &settings.catalogue_dir,
        &settings.catalogue_prefix,
        &settings.language,
    )
    .ok_or_else(|| LinguistError::CatalogueNotFound {
        dir: settings.catalogue_dir.clone(),
        language: settings.language.clone(),
    })
}

/// Parses a catalogue file on the blocking pool.
pub(crate) async fn read_document(path: &Path) -> LinguistResult<TsDocument> {
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || parser::parse_file(path))
        .await
        .map_err(|e| LinguistError::CommandError(e.to_string()))?
}

/// Prints command output to stdout without blocking the runtime.
pub(crate) async fn print_stdout(text: String) -> LinguistResult<()> {
    tokio::task::spawn_blocking(move || {
        println!("{text}");
    })
    .await
    .map_err(|e| LinguistError::CommandError(e.to_string()))
}
