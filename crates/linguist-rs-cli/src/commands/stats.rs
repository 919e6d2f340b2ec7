//! The `stats` management command.
//!
//! Prints translation progress, overall and per context.

use std::fmt::Write as _;

use async_trait::async_trait;
use linguist_rs_core::i18n::stats::CatalogueStats;
use linguist_rs_core::{LinguistError, Settings};

use crate::command::ManagementCommand;
use crate::commands::{catalogue_path, file_arg, print_stdout, read_document};

/// Prints completion statistics for a catalogue.
pub struct StatsCommand;

/// Renders statistics as a text report, or as JSON when `json` is set.
///
/// The text report lists the `top` contexts with the most unfinished
/// messages.
pub fn render_stats(stats: &CatalogueStats, json: bool, top: usize) -> Result<String, LinguistError> {
    if json {
        return Ok(serde_json::to_string_pretty(stats)?);
    }

    let totals = &stats.totals;
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "Language:    {}", stats.language);
    let _ = writeln!(out, "Contexts:    {}", stats.contexts.len());
    let _ = writeln!(out, "Messages:    {}", totals.total());
    let _ = writeln!(out, "Finished:    {}", totals.finished);
    let _ = writeln!(out, "Unfinished:  {}", totals.unfinished);
    let _ = writeln!(out, "Vanished:    {}", totals.vanished);
    let _ = writeln!(out, "Plural:      {}", totals.plural);
    let _ = write!(out, "Completion:  {:.1}%", stats.completion_percent());

    let incomplete = stats.incomplete_contexts();
    if top > 0 && !incomplete.is_empty() {
        let _ = write!(out, "\n\nMost unfinished contexts:");
        for context in incomplete.into_iter().take(top) {
            let _ = write!(
                out,
                "\n  {:<40} {:>4} unfinished ({:.1}%)",
                context.name,
                context.counts.unfinished,
                context.counts.completion_percent()
            );
        }
    }
    Ok(out)
}

#[async_trait]
impl ManagementCommand for StatsCommand {
    fn name(&self) -> &'static str {
        "stats"
    }

    fn about(&self) -> &'static str {
        "Show translation progress"
    }

    fn arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(file_arg())
            .arg(
                clap::Arg::new("json")
                    .long("json")
                    .action(clap::ArgAction::SetTrue)
                    .help("Print statistics as JSON"),
            )
            .arg(
                clap::Arg::new("top")
                    .long("top")
                    .value_parser(clap::value_parser!(usize))
                    .default_value("5")
                    .help("Number of unfinished contexts to list"),
            )
    }

    async fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
    ) -> Result<(), LinguistError> {
        let path = catalogue_path(matches, settings)?;
        let doc = read_document(&path).await?;
        let stats = CatalogueStats::from_document(&doc);
        let top = matches.get_one::<usize>("top").copied().unwrap_or(5);
        let report = render_stats(&stats, matches.get_flag("json"), top)?;
        print_stdout(report).await
    }
}
