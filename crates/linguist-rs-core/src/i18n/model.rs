//! Typed model of a Qt Linguist `.ts` document.
//!
//! A [`TsDocument`] holds an ordered list of [`Context`]s, each holding an
//! ordered list of [`Message`]s. Order is preserved so that a parsed document
//! can be written back out without reshuffling entries.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LinguistError;

/// The default `.ts` format version written by current Qt tooling.
pub const DEFAULT_TS_VERSION: &str = "2.1";

/// A complete translation catalogue document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TsDocument {
    /// Format version from the root `version` attribute.
    pub version: String,
    /// Target language code (e.g. "fi").
    pub language: String,
    /// Optional source language code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_language: Option<String>,
    /// Contexts in document order.
    pub contexts: Vec<Context>,
}

impl Default for TsDocument {
    fn default() -> Self {
        Self {
            version: DEFAULT_TS_VERSION.to_string(),
            language: String::new(),
            source_language: None,
            contexts: Vec::new(),
        }
    }
}

impl TsDocument {
    /// Creates an empty document for the given target language.
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            ..Self::default()
        }
    }

    /// Returns the context with the given name, if present.
    pub fn context(&self, name: &str) -> Option<&Context> {
        self.contexts.iter().find(|c| c.name == name)
    }

    /// Returns the context with the given name, creating it at the end if absent.
    pub fn context_mut(&mut self, name: &str) -> &mut Context {
        let index = match self.contexts.iter().position(|c| c.name == name) {
            Some(index) => index,
            None => {
                self.contexts.push(Context::new(name));
                self.contexts.len() - 1
            }
        };
        &mut self.contexts[index]
    }

    /// Iterates over every `(context, message)` pair in document order.
    pub fn messages(&self) -> impl Iterator<Item = (&Context, &Message)> {
        self.contexts
            .iter()
            .flat_map(|ctx| ctx.messages.iter().map(move |msg| (ctx, msg)))
    }

    /// Total number of messages across all contexts.
    pub fn message_count(&self) -> usize {
        self.contexts.iter().map(|c| c.messages.len()).sum()
    }
}

/// A named group of messages originating from one UI component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    /// The context name (usually a class or QML component name).
    pub name: String,
    /// Messages in document order.
    pub messages: Vec<Message>,
}

impl Context {
    /// Creates an empty context.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            messages: Vec::new(),
        }
    }

    /// Finds a message by source text and disambiguating comment.
    pub fn find(&self, source: &str, comment: &str) -> Option<&Message> {
        self.messages
            .iter()
            .find(|m| m.source == source && m.comment_str() == comment)
    }
}

/// A source file reference recorded by the extraction tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// File name, relative to the catalogue.
    pub filename: Option<String>,
    /// Line number (absolute, or relative as a signed offset like "+3").
    pub line: Option<String>,
}

/// One translatable unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Optional message id (`id` attribute).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Whether this is a plural (`numerus="yes"`) message.
    #[serde(default)]
    pub numerus: bool,
    /// Source file references.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<Location>,
    /// The source-language text.
    pub source: String,
    /// Previous source text before the last update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_source: Option<String>,
    /// Disambiguating comment; part of the lookup key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Previous disambiguating comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_comment: Option<String>,
    /// Developer note for translators.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_comment: Option<String>,
    /// Translator's own note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translator_comment: Option<String>,
    /// The translation and its status.
    pub translation: Translation,
}

impl Message {
    /// Creates a finished singular message.
    pub fn new(source: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            translation: Translation::finished(translation),
            ..Self::default()
        }
    }

    /// Creates a finished plural message with the given forms.
    pub fn plural(source: impl Into<String>, forms: Vec<String>) -> Self {
        Self {
            numerus: true,
            source: source.into(),
            translation: Translation {
                status: TranslationStatus::Finished,
                text: TranslationText::Plural(forms),
            },
            ..Self::default()
        }
    }

    /// Sets the disambiguating comment.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Sets the translation status.
    #[must_use]
    pub fn with_status(mut self, status: TranslationStatus) -> Self {
        self.translation.status = status;
        self
    }

    /// The comment, or the empty string when absent.
    pub fn comment_str(&self) -> &str {
        self.comment.as_deref().unwrap_or("")
    }
}

/// Translation status from the `type` attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationStatus {
    /// Approved translation (no `type` attribute).
    #[default]
    Finished,
    /// Not yet approved; lookups fall back to the source.
    Unfinished,
    /// No longer referenced by the sources; kept for translation memory.
    Vanished,
    /// Legacy spelling of `vanished` from older tooling.
    Obsolete,
}

impl TranslationStatus {
    /// The value of the `type` attribute, or `None` for finished entries.
    pub const fn attribute(self) -> Option<&'static str> {
        match self {
            Self::Finished => None,
            Self::Unfinished => Some("unfinished"),
            Self::Vanished => Some("vanished"),
            Self::Obsolete => Some("obsolete"),
        }
    }

    /// Whether the entry is retained only for reference.
    pub const fn is_retired(self) -> bool {
        matches!(self, Self::Vanished | Self::Obsolete)
    }
}

impl fmt::Display for TranslationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.attribute().unwrap_or("finished"))
    }
}

impl FromStr for TranslationStatus {
    type Err = LinguistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "finished" => Ok(Self::Finished),
            "unfinished" => Ok(Self::Unfinished),
            "vanished" => Ok(Self::Vanished),
            "obsolete" => Ok(Self::Obsolete),
            other => Err(LinguistError::Parse(format!(
                "unknown translation type '{other}'"
            ))),
        }
    }
}

/// Translated text: one string, or one string per plural form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TranslationText {
    /// Text for a singular message.
    Single(String),
    /// Ordered `<numerusform>` variants for a plural message.
    Plural(Vec<String>),
}

impl Default for TranslationText {
    fn default() -> Self {
        Self::Single(String::new())
    }
}

impl TranslationText {
    /// Whether no text has been provided.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(s) => s.is_empty(),
            Self::Plural(forms) => forms.iter().all(String::is_empty),
        }
    }

    /// Iterates over every provided variant.
    pub fn variants(&self) -> impl Iterator<Item = &str> {
        let slice: &[String] = match self {
            Self::Single(s) => std::slice::from_ref(s),
            Self::Plural(forms) => forms,
        };
        slice.iter().map(String::as_str)
    }
}

/// A `<translation>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    /// The status from the `type` attribute.
    pub status: TranslationStatus,
    /// The translated text.
    pub text: TranslationText,
}

impl Translation {
    /// A finished singular translation.
    pub fn finished(text: impl Into<String>) -> Self {
        Self {
            status: TranslationStatus::Finished,
            text: TranslationText::Single(text.into()),
        }
    }

    /// An unfinished translation with empty text.
    pub fn unfinished() -> Self {
        Self {
            status: TranslationStatus::Unfinished,
            text: TranslationText::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_str() {
        assert_eq!(
            "unfinished".parse::<TranslationStatus>().unwrap(),
            TranslationStatus::Unfinished
        );
        assert_eq!(
            "vanished".parse::<TranslationStatus>().unwrap(),
            TranslationStatus::Vanished
        );
        assert_eq!(
            "".parse::<TranslationStatus>().unwrap(),
            TranslationStatus::Finished
        );
        assert!("bogus".parse::<TranslationStatus>().is_err());
    }

    #[test]
    fn test_status_attribute_and_display() {
        assert_eq!(TranslationStatus::Finished.attribute(), None);
        assert_eq!(TranslationStatus::Obsolete.to_string(), "obsolete");
        assert_eq!(TranslationStatus::Finished.to_string(), "finished");
        assert!(TranslationStatus::Vanished.is_retired());
        assert!(!TranslationStatus::Unfinished.is_retired());
    }

    #[test]
    fn test_context_mut_creates_once() {
        let mut doc = TsDocument::new("fi");
        doc.context_mut("About").messages.push(Message::new("Changelog", "Muutosloki"));
        doc.context_mut("About").messages.push(Message::new("Developed by", "Kehittänyt"));
        assert_eq!(doc.contexts.len(), 1);
        assert_eq!(doc.message_count(), 2);
    }

    #[test]
    fn test_context_find_uses_comment() {
        let mut ctx = Context::new("FeatureForm");
        ctx.messages.push(Message::new("Open", "Avaa").with_comment("verb"));
        ctx.messages.push(Message::new("Open", "Auki"));
        assert_eq!(
            ctx.find("Open", "verb").map(|m| &m.translation.text),
            Some(&TranslationText::Single("Avaa".into()))
        );
        assert_eq!(
            ctx.find("Open", "").map(|m| &m.translation.text),
            Some(&TranslationText::Single("Auki".into()))
        );
    }

    #[test]
    fn test_translation_text_is_empty() {
        assert!(TranslationText::default().is_empty());
        assert!(TranslationText::Plural(vec![String::new(), String::new()]).is_empty());
        assert!(!TranslationText::Plural(vec!["a".into()]).is_empty());
    }

    #[test]
    fn test_variants_iterates_forms() {
        let text = TranslationText::Plural(vec!["a".into(), "b".into()]);
        assert_eq!(text.variants().collect::<Vec<_>>(), vec!["a", "b"]);
        let single = TranslationText::Single("x".into());
        assert_eq!(single.variants().count(), 1);
    }

    #[test]
    fn test_messages_iterator_order() {
        let mut doc = TsDocument::new("fi");
        doc.context_mut("A").messages.push(Message::new("1", "yksi"));
        doc.context_mut("B").messages.push(Message::new("2", "kaksi"));
        let pairs: Vec<_> = doc
            .messages()
            .map(|(c, m)| (c.name.as_str(), m.source.as_str()))
            .collect();
        assert_eq!(pairs, vec![("A", "1"), ("B", "2")]);
    }
}
