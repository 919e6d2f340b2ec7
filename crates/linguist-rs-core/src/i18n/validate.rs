//! Catalogue validation.
//!
//! [`validate`] checks a parsed document for problems that would produce
//! wrong output at runtime: placeholders the source never supplies, plural
//! messages with the wrong number of forms, and duplicate keys.
//!
//! | Id | Level | Condition |
//! |----|-------|-----------|
//! | `placeholder.E001` | Error | Translation uses a `%k` argument absent from the source |
//! | `plural.E001` | Error | Plural message has the wrong number of forms |
//! | `plural.W001` | Warning | Plural source has no `%n` |
//! | `duplicate.E001` | Error | Two active messages share source and comment |
//! | `translation.W001` | Warning | Finished translation is empty |
//! | `context.W001` | Warning | Context has no messages |
//!
//! ## Examples
//!
//! ```
//! use linguist_rs_core::i18n::model::{Message, TsDocument};
//! use linguist_rs_core::i18n::plural::PluralRule;
//! use linguist_rs_core::i18n::validate::{validate, Severity};
//!
//! let mut doc = TsDocument::new("fi");
//! doc.context_mut("AndroidProjectSource")
//!     .messages
//!     .push(Message::new("File does not exist", "Tiedostoa %1 ei ole olemassa"));
//!
//! let issues = validate(&doc, PluralRule::for_language("fi"));
//! assert_eq!(issues.len(), 1);
//! assert_eq!(issues[0].id, "placeholder.E001");
//! assert_eq!(issues[0].level, Severity::Error);
//! ```

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::i18n::model::{Context, Message, TranslationStatus, TranslationText, TsDocument};
use crate::i18n::placeholder::{arg_placeholders, placeholders, Placeholder};
use crate::i18n::plural::PluralRule;

/// Severity level for a validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message.
    Info = 0,
    /// A potential problem.
    Warning = 1,
    /// A definite problem that should be fixed.
    Error = 2,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARNING"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// A problem found in a catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    /// The severity level.
    pub level: Severity,
    /// Stable identifier, e.g. `"plural.E001"`.
    pub id: &'static str,
    /// The context the issue belongs to.
    pub context: String,
    /// The source text of the offending message, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Human-readable description.
    pub msg: String,
}

impl Issue {
    fn new(
        level: Severity,
        id: &'static str,
        context: &Context,
        message: Option<&Message>,
        msg: impl Into<String>,
    ) -> Self {
        Self {
            level,
            id,
            context: context.name.clone(),
            source: message.map(|m| m.source.clone()),
            msg: msg.into(),
        }
    }

    /// Whether this issue blocks the catalogue from being used as-is.
    pub fn is_serious(&self) -> bool {
        self.level >= Severity::Error
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ({}) {}", self.context, self.id, self.msg)?;
        if let Some(source) = &self.source {
            write!(f, " [source: {source:?}]")?;
        }
        Ok(())
    }
}

/// Checks a document against the plural rule of its language.
pub fn validate(doc: &TsDocument, rule: PluralRule) -> Vec<Issue> {
    let mut issues = Vec::new();
    for context in &doc.contexts {
        if context.messages.is_empty() {
            issues.push(Issue::new(
                Severity::Warning,
                "context.W001",
                context,
                None,
                "Context has no messages.",
            ));
        }
        check_duplicates(context, &mut issues);
        for message in &context.messages {
            check_message(context, message, rule, &mut issues);
        }
    }
    tracing::debug!(
        language = %doc.language,
        issues = issues.len(),
        "validated catalogue"
    );
    issues
}

fn check_duplicates(context: &Context, issues: &mut Vec<Issue>) {
    let mut seen = HashSet::new();
    for message in &context.messages {
        if message.translation.status.is_retired() {
            continue;
        }
        if !seen.insert((message.source.as_str(), message.comment_str())) {
            issues.push(Issue::new(
                Severity::Error,
                "duplicate.E001",
                context,
                Some(message),
                format!(
                    "Duplicate message with comment '{}'.",
                    message.comment_str()
                ),
            ));
        }
    }
}

fn check_message(context: &Context, message: &Message, rule: PluralRule, issues: &mut Vec<Issue>) {
    let status = message.translation.status;
    if status.is_retired() {
        return;
    }

    if message.numerus {
        if !placeholders(&message.source).contains(&Placeholder::Count) {
            issues.push(Issue::new(
                Severity::Warning,
                "plural.W001",
                context,
                Some(message),
                "Plural message source does not use %n.",
            ));
        }
        let forms = match &message.translation.text {
            TranslationText::Single(_) => 1,
            TranslationText::Plural(forms) => forms.len(),
        };
        let allowed_empty = status == TranslationStatus::Unfinished && forms == 0;
        if forms != rule.form_count() && !allowed_empty {
            issues.push(Issue::new(
                Severity::Error,
                "plural.E001",
                context,
                Some(message),
                format!(
                    "Expected {} plural form(s) for rule '{rule}', found {forms}.",
                    rule.form_count()
                ),
            ));
        }
    }

    if status != TranslationStatus::Finished {
        return;
    }

    if message.translation.text.is_empty() {
        issues.push(Issue::new(
            Severity::Warning,
            "translation.W001",
            context,
            Some(message),
            "Finished translation is empty.",
        ));
    }

    let available = arg_placeholders(&message.source);
    for variant in message.translation.text.variants() {
        let extra: Vec<String> = arg_placeholders(variant)
            .difference(&available)
            .map(ToString::to_string)
            .collect();
        if !extra.is_empty() {
            issues.push(Issue::new(
                Severity::Error,
                "placeholder.E001",
                context,
                Some(message),
                format!(
                    "Translation uses {} which the source does not provide.",
                    extra.join(", ")
                ),
            ));
        }
    }
}

/// Number of issues at or above `level`.
pub fn count_at_least(issues: &[Issue], level: Severity) -> usize {
    issues.iter().filter(|i| i.level >= level).count()
}
