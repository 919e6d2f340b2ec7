//! The `lookup` management command.
//!
//! Resolves one message the way the runtime would and prints the result.

use std::path::Path;

use async_trait::async_trait;
use linguist_rs_core::i18n::catalog::{Catalogue, LookupRequest};
use linguist_rs_core::{LinguistError, Settings};

use crate::command::ManagementCommand;
use crate::commands::{catalogue_path, file_arg, print_stdout, read_document};

/// Prints the resolved translation of one message.
pub struct LookupCommand;

/// Loads the catalogue at `path` and resolves `request` against it.
pub async fn resolve(
    path: &Path,
    request: &LookupRequest<'_>,
    load_unfinished: bool,
) -> Result<String, LinguistError> {
    let doc = read_document(path).await?;
    let catalogue = Catalogue::from_document(&doc, load_unfinished);
    if catalogue.find(request.context, request.source, request.comment).is_none() {
        tracing::info!(
            context = request.context,
            source = request.source,
            "no active translation, using source text"
        );
    }
    Ok(catalogue.lookup(request))
}

#[async_trait]
impl ManagementCommand for LookupCommand {
    fn name(&self) -> &'static str {
        "lookup"
    }

    fn about(&self) -> &'static str {
        "Resolve a message in a catalogue"
    }

    fn arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(file_arg())
            .arg(
                clap::Arg::new("context")
                    .long("context")
                    .short('c')
                    .required(true)
                    .help("Context name, e.g. FeatureListForm"),
            )
            .arg(
                clap::Arg::new("source")
                    .long("source")
                    .short('s')
                    .required(true)
                    .help("Source text"),
            )
            .arg(
                clap::Arg::new("comment")
                    .long("comment")
                    .help("Disambiguating comment"),
            )
            .arg(
                clap::Arg::new("count")
                    .short('n')
                    .long("count")
                    .value_parser(clap::value_parser!(u64))
                    .help("Plural quantity substituted for %n"),
            )
            .arg(
                clap::Arg::new("arg")
                    .long("arg")
                    .short('a')
                    .action(clap::ArgAction::Append)
                    .help("Positional argument for %1, %2, ... (repeatable)"),
            )
            .arg(
                clap::Arg::new("unfinished")
                    .long("unfinished")
                    .action(clap::ArgAction::SetTrue)
                    .help("Also use unfinished translations"),
            )
    }

    async fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
    ) -> Result<(), LinguistError> {
        let path = catalogue_path(matches, settings)?;
        let context = matches
            .get_one::<String>("context")
            .ok_or_else(|| LinguistError::CommandError("--context is required".to_string()))?;
        let source = matches
            .get_one::<String>("source")
            .ok_or_else(|| LinguistError::CommandError("--source is required".to_string()))?;
        let args: Vec<&str> = matches
            .get_many::<String>("arg")
            .map_or_else(Vec::new, |values| values.map(String::as_str).collect());

        let mut request = LookupRequest::new(context, source).args(&args);
        request.comment = matches.get_one::<String>("comment").map(String::as_str);
        request.count = matches.get_one::<u64>("count").copied();

        let load_unfinished = settings.load_unfinished || matches.get_flag("unfinished");
        let text = resolve(&path, &request, load_unfinished).await?;
        print_stdout(text).await
    }
}
