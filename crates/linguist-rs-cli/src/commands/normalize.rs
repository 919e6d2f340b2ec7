//! The `normalize` management command.
//!
//! Parses a catalogue and writes it back in canonical form: `lupdate`-style
//! indentation, consistent escaping, and self-closing empty translations.

use std::path::Path;

use async_trait::async_trait;
use linguist_rs_core::i18n::writer;
use linguist_rs_core::{LinguistError, Settings};

use crate::command::ManagementCommand;
use crate::commands::{catalogue_path, file_arg, print_stdout, read_document};

/// Re-serializes a catalogue.
pub struct NormalizeCommand;

/// Normalizes the catalogue at `input`.
///
/// Writes to `output` when given and returns the normalized XML either way.
pub async fn normalize(input: &Path, output: Option<&Path>) -> Result<String, LinguistError> {
    let doc = read_document(input).await?;
    let xml = writer::to_string(&doc)?;

    if let Some(path) = output {
        tokio::fs::write(path, &xml)
            .await
            .map_err(|e| LinguistError::io(path, e))?;
        tracing::info!(
            input = %input.display(),
            output = %path.display(),
            messages = doc.message_count(),
            "Catalogue normalized"
        );
    }
    Ok(xml)
}

#[async_trait]
impl ManagementCommand for NormalizeCommand {
    fn name(&self) -> &'static str {
        "normalize"
    }

    fn about(&self) -> &'static str {
        "Rewrite a catalogue in canonical form"
    }

    fn arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(file_arg())
            .arg(
                clap::Arg::new("output")
                    .long("output")
                    .short('o')
                    .value_parser(clap::value_parser!(std::path::PathBuf))
                    .help("Output file path (default: stdout)"),
            )
            .arg(
                clap::Arg::new("in-place")
                    .long("in-place")
                    .short('i')
                    .action(clap::ArgAction::SetTrue)
                    .conflicts_with("output")
                    .help("Overwrite the input file"),
            )
    }

    async fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
    ) -> Result<(), LinguistError> {
        let input = catalogue_path(matches, settings)?;
        let output = if matches.get_flag("in-place") {
            Some(input.clone())
        } else {
            matches.get_one::<std::path::PathBuf>("output").cloned()
        };

        let xml = normalize(&input, output.as_deref()).await?;
        if output.is_none() {
            print_stdout(xml.trim_end().to_string()).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MESSY: &str = "<?xml version=\"1.0\" ?><!DOCTYPE TS><TS version=\"2.1\" language=\"fi\">\
<context><name>About</name><message><source>Developed by</source>\
<translation>Kehittänyt</translation></message>\
<message><source>QField app directory</source><translation type=\"unfinished\"></translation></message>\
</context></TS>";

    #[tokio::test]
    async fn test_normalize_to_string() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("app_fi.ts");
        std::fs::write(&input, MESSY).unwrap();

        let xml = normalize(&input, None).await.unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<!DOCTYPE TS>\n"));
        assert!(xml.contains("\n        <name>About</name>\n"));
        assert!(xml.contains("<translation type=\"unfinished\"/>"));
    }

    #[tokio::test]
    async fn test_normalize_to_file_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("app_fi.ts");
        let output = dir.path().join("out.ts");
        std::fs::write(&input, MESSY).unwrap();

        let first = normalize(&input, Some(&output)).await.unwrap();
        assert_eq!(tokio::fs::read_to_string(&output).await.unwrap(), first);
        let second = normalize(&output, None).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_normalize_invalid_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("broken.ts");
        std::fs::write(&input, "<TS><context></TS>").unwrap();
        let err = normalize(&input, None).await.unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn test_in_place_conflicts_with_output() {
        let cmd = NormalizeCommand.arguments(clap::Command::new("normalize"));
        assert!(cmd
            .try_get_matches_from(["normalize", "a.ts", "-i", "-o", "b.ts"])
            .is_err());
    }
}
