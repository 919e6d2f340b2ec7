//! Translation progress statistics.

use serde::Serialize;

use crate::i18n::model::{Context, TranslationStatus, TsDocument};

/// Message counts for one context or for a whole document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
    /// Approved translations.
    pub finished: usize,
    /// Translations awaiting work or review.
    pub unfinished: usize,
    /// Retired messages (`vanished` or `obsolete`).
    pub vanished: usize,
    /// Messages marked `numerus="yes"`, of any status.
    pub plural: usize,
}

impl Counts {
    fn add_context(&mut self, context: &Context) {
        for message in &context.messages {
            match message.translation.status {
                TranslationStatus::Finished => self.finished += 1,
                TranslationStatus::Unfinished => self.unfinished += 1,
                TranslationStatus::Vanished | TranslationStatus::Obsolete => self.vanished += 1,
            }
            if message.numerus {
                self.plural += 1;
            }
        }
    }

    /// All messages, including retired ones.
    pub const fn total(&self) -> usize {
        self.finished + self.unfinished + self.vanished
    }

    /// Share of active messages that are finished, in percent.
    ///
    /// Returns 100 when there are no active messages.
    #[allow(clippy::cast_precision_loss)]
    pub fn completion_percent(&self) -> f64 {
        let active = self.finished + self.unfinished;
        if active == 0 {
            100.0
        } else {
            self.finished as f64 * 100.0 / active as f64
        }
    }
}

/// Per-context entry in [`CatalogueStats`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextStats {
    /// The context name.
    pub name: String,
    /// Counts for this context.
    #[serde(flatten)]
    pub counts: Counts,
}

/// Statistics for a parsed catalogue.
///
/// # Examples
///
/// ```
/// use linguist_rs_core::i18n::model::{Message, TranslationStatus, TsDocument};
/// use linguist_rs_core::i18n::stats::CatalogueStats;
///
/// let mut doc = TsDocument::new("fi");
/// let about = doc.context_mut("About");
/// about.messages.push(Message::new("Changelog", "Muutosloki"));
/// about.messages.push(Message::new("Sponsor", "").with_status(TranslationStatus::Unfinished));
///
/// let stats = CatalogueStats::from_document(&doc);
/// assert_eq!(stats.totals.finished, 1);
/// assert_eq!(stats.completion_percent(), 50.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogueStats {
    /// Target language of the document.
    pub language: String,
    /// Counts across the whole document.
    pub totals: Counts,
    /// Counts per context, in document order.
    pub contexts: Vec<ContextStats>,
}

impl CatalogueStats {
    /// Counts the messages of a document.
    pub fn from_document(doc: &TsDocument) -> Self {
        let mut totals = Counts::default();
        let contexts = doc
            .contexts
            .iter()
            .map(|context| {
                let mut counts = Counts::default();
                counts.add_context(context);
                totals.add_context(context);
                ContextStats {
                    name: context.name.clone(),
                    counts,
                }
            })
            .collect();
        Self {
            language: doc.language.clone(),
            totals,
            contexts,
        }
    }

    /// Completion of the whole document, in percent.
    pub fn completion_percent(&self) -> f64 {
        self.totals.completion_percent()
    }

    /// Contexts that still have unfinished messages, most unfinished first.
    pub fn incomplete_contexts(&self) -> Vec<&ContextStats> {
        let mut incomplete: Vec<&ContextStats> = self
            .contexts
            .iter()
            .filter(|c| c.counts.unfinished > 0)
            .collect();
        incomplete.sort_by(|a, b| {
            b.counts
                .unfinished
                .cmp(&a.counts.unfinished)
                .then_with(|| a.name.cmp(&b.name))
        });
        incomplete
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::model::Message;

    fn sample() -> TsDocument {
        let mut doc = TsDocument::new("fi");
        let about = doc.context_mut("About");
        about.messages.push(Message::new("Changelog", "Muutosloki"));
        about
            .messages
            .push(Message::new("Old", "Vanha").with_status(TranslationStatus::Vanished));
        let list = doc.context_mut("FeatureListForm");
        list.messages.push(Message::plural(
            "Successfully deleted %n feature(s)",
            vec!["a".into(), "b".into()],
        ));
        list.messages.push(Message::new("Merge", "").with_status(TranslationStatus::Unfinished));
        list.messages
            .push(Message::new("Obsolete", "x").with_status(TranslationStatus::Obsolete));
        let chooser = doc.context_mut("BluetoothDeviceChooser");
        chooser.messages.push(Message::new("Scan", "").with_status(TranslationStatus::Unfinished));
        chooser.messages.push(Message::new("Stop", "").with_status(TranslationStatus::Unfinished));
        doc
    }

    #[test]
    fn test_totals() {
        let stats = CatalogueStats::from_document(&sample());
        assert_eq!(
            stats.totals,
            Counts {
                finished: 2,
                unfinished: 3,
                vanished: 2,
                plural: 1,
            }
        );
        assert_eq!(stats.totals.total(), 7);
        assert!((stats.completion_percent() - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_per_context() {
        let stats = CatalogueStats::from_document(&sample());
        assert_eq!(stats.contexts.len(), 3);
        assert_eq!(stats.contexts[0].name, "About");
        assert_eq!(stats.contexts[0].counts.finished, 1);
        assert_eq!(stats.contexts[0].counts.vanished, 1);
        assert!((stats.contexts[0].counts.completion_percent() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_incomplete_contexts_sorted() {
        let stats = CatalogueStats::from_document(&sample());
        let names: Vec<_> = stats
            .incomplete_contexts()
            .into_iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["BluetoothDeviceChooser", "FeatureListForm"]);
    }

    #[test]
    fn test_empty_document_is_complete() {
        let stats = CatalogueStats::from_document(&TsDocument::new("fi"));
        assert!((stats.completion_percent() - 100.0).abs() < f64::EPSILON);
        assert!(stats.contexts.is_empty());
    }

    #[test]
    fn test_serializes_flattened_counts() {
        let stats = CatalogueStats::from_document(&sample());
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["language"], "fi");
        assert_eq!(json["totals"]["unfinished"], 3);
        assert_eq!(json["contexts"][1]["name"], "FeatureListForm");
        assert_eq!(json["contexts"][1]["plural"], 1);
    }
}
