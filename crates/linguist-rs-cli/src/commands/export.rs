//! The `export` management command.
//!
//! Dumps the active catalogue as JSON: only the entries a runtime lookup
//! would resolve, sorted by context, source, and comment.

use async_trait::async_trait;
use linguist_rs_core::i18n::catalog::{Catalogue, CatalogueEntry};
use linguist_rs_core::{LinguistError, PluralRule, Settings};
use serde::Serialize;

use crate::command::ManagementCommand;
use crate::commands::{catalogue_path, file_arg, print_stdout, read_document};

/// Dumps the active catalogue as JSON.
pub struct ExportCommand;

#[derive(Serialize)]
struct Export<'a> {
    language: &'a str,
    plural_rule: PluralRule,
    plural_forms: usize,
    entries: Vec<&'a CatalogueEntry>,
}

/// Serializes the active entries of a catalogue.
pub fn export_json(catalogue: &Catalogue, pretty: bool) -> Result<String, LinguistError> {
    let mut entries: Vec<&CatalogueEntry> = catalogue.entries().collect();
    entries.sort_by(|a, b| {
        (&a.context, &a.source, &a.comment).cmp(&(&b.context, &b.source, &b.comment))
    });
    let export = Export {
        language: catalogue.language(),
        plural_rule: catalogue.plural_rule(),
        plural_forms: catalogue.plural_rule().form_count(),
        entries,
    };
    let json = if pretty {
        serde_json::to_string_pretty(&export)?
    } else {
        serde_json::to_string(&export)?
    };
    Ok(json)
}

#[async_trait]
impl ManagementCommand for ExportCommand {
    fn name(&self) -> &'static str {
        "export"
    }

    fn about(&self) -> &'static str {
        "Dump the active catalogue as JSON"
    }

    fn arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(file_arg())
            .arg(
                clap::Arg::new("pretty")
                    .long("pretty")
                    .action(clap::ArgAction::SetTrue)
                    .help("Use pretty-printed JSON output"),
            )
            .arg(
                clap::Arg::new("output")
                    .long("output")
                    .short('o')
                    .value_parser(clap::value_parser!(std::path::PathBuf))
                    .help("Output file path (default: stdout)"),
            )
            .arg(
                clap::Arg::new("unfinished")
                    .long("unfinished")
                    .action(clap::ArgAction::SetTrue)
                    .help("Include non-empty unfinished translations"),
            )
    }

    async fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
    ) -> Result<(), LinguistError> {
        let path = catalogue_path(matches, settings)?;
        let doc = read_document(&path).await?;
        let load_unfinished = settings.load_unfinished || matches.get_flag("unfinished");
        let catalogue = Catalogue::from_document(&doc, load_unfinished);
        let json = export_json(&catalogue, matches.get_flag("pretty"))?;

        match matches.get_one::<std::path::PathBuf>("output") {
            Some(output) => {
                tokio::fs::write(output, &json)
                    .await
                    .map_err(|e| LinguistError::io(output, e))?;
                tracing::info!(
                    entries = catalogue.len(),
                    output = %output.display(),
                    "Catalogue exported"
                );
                Ok(())
            }
            None => print_stdout(json).await,
        }
    }
}
