//! The `check` management command.
//!
//! Validates a catalogue: placeholder consistency, plural form counts,
//! duplicate keys, and empty translations.

use async_trait::async_trait;
use linguist_rs_core::i18n::validate::{count_at_least, validate, Issue, Severity};
use linguist_rs_core::{LinguistError, PluralRule, Settings, TsDocument};

use crate::command::ManagementCommand;
use crate::commands::{catalogue_path, file_arg, read_document};

/// Validates a catalogue and fails if blocking issues are found.
pub struct CheckCommand;

/// Validates `doc` with the plural rule of `language`, or of the document's
/// own language when `language` is `None`.
pub fn run_checks(doc: &TsDocument, language: Option<&str>) -> Vec<Issue> {
    let rule = PluralRule::for_language(language.unwrap_or(&doc.language));
    validate(doc, rule)
}

/// Number of issues that fail the check. In strict mode warnings count too.
pub fn failing_issues(issues: &[Issue], strict: bool) -> usize {
    let threshold = if strict {
        Severity::Warning
    } else {
        Severity::Error
    };
    count_at_least(issues, threshold)
}

#[async_trait]
impl ManagementCommand for CheckCommand {
    fn name(&self) -> &'static str {
        "check"
    }

    fn about(&self) -> &'static str {
        "Validate a catalogue"
    }

    fn arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(file_arg())
            .arg(
                clap::Arg::new("strict")
                    .long("strict")
                    .action(clap::ArgAction::SetTrue)
                    .help("Treat warnings as errors"),
            )
            .arg(
                clap::Arg::new("language")
                    .long("language")
                    .short('l')
                    .help("Plural rules to check against (default: the catalogue's language)"),
            )
    }

    async fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
    ) -> Result<(), LinguistError> {
        let path = catalogue_path(matches, settings)?;
        let doc = read_document(&path).await?;
        let language = matches.get_one::<String>("language").map(String::as_str);
        let strict = settings.strict || matches.get_flag("strict");

        let issues = run_checks(&doc, language);
        if issues.is_empty() {
            tracing::info!(path = %path.display(), "Catalogue check identified no issues");
            return Ok(());
        }

        for issue in &issues {
            match issue.level {
                Severity::Error => tracing::error!("{} {issue}", issue.level),
                Severity::Warning => tracing::warn!("{} {issue}", issue.level),
                Severity::Info => tracing::info!("{} {issue}", issue.level),
            }
        }

        let errors = count_at_least(&issues, Severity::Error);
        let warnings = issues.iter().filter(|i| i.level == Severity::Warning).count();
        tracing::info!(
            "Catalogue check identified {} issue(s) ({} error(s), {} warning(s))",
            issues.len(),
            errors,
            warnings
        );

        let failing = failing_issues(&issues, strict);
        if failing > 0 {
            return Err(LinguistError::Validation { errors: failing });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linguist_rs_core::Message;

    fn doc_with_warning() -> TsDocument {
        let mut doc = TsDocument::new("fi");
        doc.context_mut("About").messages.push(Message::new("Changelog", ""));
        doc
    }

    #[test]
    fn test_run_checks_uses_document_language() {
        let mut doc = TsDocument::new("fi");
        doc.context_mut("A").messages.push(Message::plural(
            "%n files",
            vec!["%n tiedosto".into(), "%n tiedostoa".into()],
        ));
        assert!(run_checks(&doc, None).is_empty());
        let issues = run_checks(&doc, Some("ru"));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].id, "plural.E001");
    }

    #[test]
    fn test_failing_issues_strict() {
        let issues = run_checks(&doc_with_warning(), None);
        assert_eq!(failing_issues(&issues, false), 0);
        assert_eq!(failing_issues(&issues, true), 1);
    }

    #[test]
    fn test_command_metadata() {
        let cmd = CheckCommand;
        assert_eq!(cmd.name(), "check");
        assert_eq!(cmd.about(), "Validate a catalogue");
    }
}
