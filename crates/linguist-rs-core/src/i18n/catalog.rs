//! The active translation catalogue used for lookups.
//!
//! A [`Catalogue`] is built once from a parsed [`TsDocument`] and never
//! mutated during lookups, so it can be shared between threads behind an
//! `Arc` without synchronization.
//!
//! # Invariants
//!
//! 1. **Only active entries are loaded**: `vanished` and `obsolete` entries
//!    are never loaded. `unfinished` entries are loaded only when requested
//!    and only when their text is non-empty. Empty translations are skipped.
//!
//! 2. **Lookups never fail**: the `tr*` family falls back to the source
//!    string, with the count and arguments still substituted.
//!
//! 3. **Comment fallback**: a lookup with a non-empty comment that misses is
//!    retried with the empty comment.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Missing context | Context not in catalogue | Source text, trace log |
//! | Missing key | Source/comment not in context | Source text, trace log |
//! | Missing plural form | Fewer forms than the rule needs | Last form is used |
//! | Missing argument | `%3` with two args | Token left as-is |

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, OnceLock, RwLock};

use serde::Serialize;

use crate::i18n::model::{TranslationStatus, TranslationText, TsDocument};
use crate::i18n::placeholder::{substitute, substitute_count};
use crate::i18n::plural::PluralRule;

/// One active translation in a [`Catalogue`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogueEntry {
    /// The originating context.
    pub context: String,
    /// The source-language text.
    pub source: String,
    /// The disambiguating comment (empty when absent).
    #[serde(skip_serializing_if = "String::is_empty")]
    pub comment: String,
    /// The translated text.
    pub text: TranslationText,
}

/// A lookup request: the full set of inputs to a catalogue lookup.
///
/// # Examples
///
/// ```
/// use linguist_rs_core::i18n::catalog::{Catalogue, LookupRequest};
///
/// let catalogue = Catalogue::new("fi");
/// let request = LookupRequest::new("AndroidProjectSource", "File %1 does not exist")
///     .args(&["data.gpkg"]);
/// assert_eq!(catalogue.lookup(&request), "File data.gpkg does not exist");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LookupRequest<'a> {
    /// The context name.
    pub context: &'a str,
    /// The source text.
    pub source: &'a str,
    /// The disambiguating comment.
    pub comment: Option<&'a str>,
    /// The plural quantity substituted for `%n`.
    pub count: Option<u64>,
    /// Positional arguments substituted for `%1`, `%2`, ...
    pub args: &'a [&'a str],
}

impl<'a> LookupRequest<'a> {
    /// Creates a request for a context and source string.
    pub const fn new(context: &'a str, source: &'a str) -> Self {
        Self {
            context,
            source,
            comment: None,
            count: None,
            args: &[],
        }
    }

    /// Sets the disambiguating comment.
    #[must_use]
    pub const fn comment(mut self, comment: &'a str) -> Self {
        self.comment = Some(comment);
        self
    }

    /// Sets the plural quantity.
    #[must_use]
    pub const fn count(mut self, count: u64) -> Self {
        self.count = Some(count);
        self
    }

    /// Sets the positional arguments.
    #[must_use]
    pub const fn args(mut self, args: &'a [&'a str]) -> Self {
        self.args = args;
        self
    }
}

/// An immutable translation catalogue for one language.
///
/// # Example
///
/// ```
/// use linguist_rs_core::i18n::catalog::Catalogue;
/// use linguist_rs_core::i18n::model::TranslationText;
///
/// let mut catalogue = Catalogue::new("fi");
/// catalogue.insert("BluetoothDeviceChooser", "Scanning done", "",
///     TranslationText::Single("Skannaus suoritettu".into()));
/// catalogue.insert("FeatureListForm", "Successfully deleted %n feature(s)", "",
///     TranslationText::Plural(vec![
///         "%n kohteen poistaminen onnistui".into(),
///         "%n kohteen poistaminen onnistui".into(),
///     ]));
///
/// assert_eq!(catalogue.tr("BluetoothDeviceChooser", "Scanning done", None),
///            "Skannaus suoritettu");
/// assert_eq!(catalogue.tr_n("FeatureListForm", "Successfully deleted %n feature(s)", None, 1),
///            "1 kohteen poistaminen onnistui");
/// assert_eq!(catalogue.tr("About", "Changelog", None), "Changelog");
/// ```
#[derive(Debug, Clone)]
pub struct Catalogue {
    language: String,
    plural_rule: PluralRule,
    entries: HashMap<String, CatalogueEntry>,
    contexts: HashSet<String>,
}

fn entry_key(context: &str, source: &str, comment: &str) -> String {
    format!("{context}\x04{comment}\x04{source}")
}

impl Catalogue {
    /// Creates an empty catalogue for a language.
    pub fn new(language: impl Into<String>) -> Self {
        let language = language.into();
        Self {
            plural_rule: PluralRule::for_language(&language),
            language,
            entries: HashMap::new(),
            contexts: HashSet::new(),
        }
    }

    /// Builds the active catalogue from a parsed document.
    ///
    /// When `load_unfinished` is set, non-empty `unfinished` translations are
    /// loaded too.
    pub fn from_document(doc: &TsDocument, load_unfinished: bool) -> Self {
        let mut catalogue = Self::new(doc.language.clone());
        let mut skipped = 0usize;

        for (context, message) in doc.messages() {
            let active = match message.translation.status {
                TranslationStatus::Finished => true,
                TranslationStatus::Unfinished => load_unfinished,
                TranslationStatus::Vanished | TranslationStatus::Obsolete => false,
            };
            if !active || message.translation.text.is_empty() {
                skipped += 1;
                continue;
            }
            let inserted = catalogue.insert(
                &context.name,
                &message.source,
                message.comment_str(),
                message.translation.text.clone(),
            );
            if !inserted {
                tracing::debug!(
                    context = %context.name,
                    source = %message.source,
                    "duplicate message ignored, first occurrence wins"
                );
            }
        }

        tracing::debug!(
            language = %catalogue.language,
            loaded = catalogue.len(),
            skipped,
            "built catalogue"
        );
        catalogue
    }

    /// Adds a translation. Returns `false` if the key was already present,
    /// in which case the existing entry is kept.
    pub fn insert(
        &mut self,
        context: &str,
        source: &str,
        comment: &str,
        text: TranslationText,
    ) -> bool {
        let key = entry_key(context, source, comment);
        if self.entries.contains_key(&key) {
            return false;
        }
        self.contexts.insert(context.to_string());
        self.entries.insert(
            key,
            CatalogueEntry {
                context: context.to_string(),
                source: source.to_string(),
                comment: comment.to_string(),
                text,
            },
        );
        true
    }

    /// The target language code.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// The plural rule used to select `<numerusform>` variants.
    pub const fn plural_rule(&self) -> PluralRule {
        self.plural_rule
    }

    /// Overrides the plural rule derived from the language code.
    pub fn set_plural_rule(&mut self, rule: PluralRule) {
        self.plural_rule = rule;
    }

    /// Number of active entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalogue has no active entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether any entry belongs to `context`.
    pub fn has_context(&self, context: &str) -> bool {
        self.contexts.contains(context)
    }

    /// Iterates over all active entries in unspecified order.
    pub fn entries(&self) -> impl Iterator<Item = &CatalogueEntry> {
        self.entries.values()
    }

    /// Finds the entry for a key, retrying with the empty comment.
    pub fn find(&self, context: &str, source: &str, comment: Option<&str>) -> Option<&CatalogueEntry> {
        let comment = comment.unwrap_or("");
        let found = self
            .entries
            .get(&entry_key(context, source, comment))
            .or_else(|| {
                if comment.is_empty() {
                    None
                } else {
                    self.entries.get(&entry_key(context, source, ""))
                }
            });
        if found.is_none() {
            if self.has_context(context) {
                tracing::trace!(context, source, comment, "missing translation");
            } else {
                tracing::trace!(context, "missing context");
            }
        }
        found
    }

    /// Returns the translation of a singular message, if one is active.
    ///
    /// For a plural entry the first form is returned.
    pub fn translate(&self, context: &str, source: &str, comment: Option<&str>) -> Option<&str> {
        let entry = self.find(context, source, comment)?;
        let text = match &entry.text {
            TranslationText::Single(text) => text.as_str(),
            TranslationText::Plural(forms) => forms.first()?.as_str(),
        };
        (!text.is_empty()).then_some(text)
    }

    /// Returns the plural form for `count`, before `%n` substitution.
    pub fn translate_plural(
        &self,
        context: &str,
        source: &str,
        comment: Option<&str>,
        count: u64,
    ) -> Option<&str> {
        let entry = self.find(context, source, comment)?;
        let text = match &entry.text {
            TranslationText::Single(text) => text.as_str(),
            TranslationText::Plural(forms) => {
                let index = self.plural_rule.form_index(count);
                forms.get(index).or_else(|| forms.last())?.as_str()
            }
        };
        (!text.is_empty()).then_some(text)
    }

    /// Translates a singular message, falling back to the source text.
    pub fn tr<'a>(&'a self, context: &str, source: &'a str, comment: Option<&str>) -> Cow<'a, str> {
        self.translate(context, source, comment)
            .map_or(Cow::Borrowed(source), Cow::Borrowed)
    }

    /// Translates a plural message and substitutes `count` for `%n`.
    ///
    /// Falls back to the source text, with `%n` still substituted.
    pub fn tr_n(&self, context: &str, source: &str, comment: Option<&str>, count: u64) -> String {
        let text = self
            .translate_plural(context, source, comment, count)
            .unwrap_or(source);
        substitute_count(text, count).into_owned()
    }

    /// Performs a complete lookup: translation or fallback, then `%n` and
    /// positional arguments in one pass.
    pub fn lookup(&self, request: &LookupRequest<'_>) -> String {
        let text = match request.count {
            Some(count) => {
                self.translate_plural(request.context, request.source, request.comment, count)
            }
            None => self.translate(request.context, request.source, request.comment),
        }
        .unwrap_or(request.source);
        substitute(text, request.count, request.args).into_owned()
    }
}

impl From<&TsDocument> for Catalogue {
    fn from(doc: &TsDocument) -> Self {
        Self::from_document(doc, false)
    }
}

// ── Installed catalogues ─────────────────────────────────────────────────

/// The global catalogue registry, keyed by language code.
fn installed() -> &'static RwLock<HashMap<String, Arc<Catalogue>>> {
    static CATALOGUES: OnceLock<RwLock<HashMap<String, Arc<Catalogue>>>> = OnceLock::new();
    CATALOGUES.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Installs a catalogue under its language code, replacing any previous one.
///
/// Returns the shared handle that lookups will use.
pub fn install(catalogue: Catalogue) -> Arc<Catalogue> {
    let catalogue = Arc::new(catalogue);
    let language = catalogue.language().to_string();
    tracing::debug!(language = %language, entries = catalogue.len(), "installed catalogue");
    installed()
        .write()
        .expect("catalogue lock poisoned")
        .insert(language, Arc::clone(&catalogue));
    catalogue
}

/// Removes the catalogue for a language, returning it if one was installed.
pub fn uninstall(language: &str) -> Option<Arc<Catalogue>> {
    installed()
        .write()
        .expect("catalogue lock poisoned")
        .remove(language)
}

/// Returns the installed catalogue for a language.
pub fn get(language: &str) -> Option<Arc<Catalogue>> {
    installed()
        .read()
        .expect("catalogue lock poisoned")
        .get(language)
        .cloned()
}

/// Returns `true` if a catalogue is installed for the language.
pub fn has_language(language: &str) -> bool {
    installed()
        .read()
        .expect("catalogue lock poisoned")
        .contains_key(language)
}

/// Returns the installed language codes, sorted.
pub fn installed_languages() -> Vec<String> {
    let mut languages: Vec<String> = installed()
        .read()
        .expect("catalogue lock poisoned")
        .keys()
        .cloned()
        .collect();
    languages.sort();
    languages
}

/// Removes every installed catalogue.
pub fn clear_all() {
    installed().write().expect("catalogue lock poisoned").clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::model::{Message, Translation};

    fn finnish() -> TsDocument {
        let mut doc = TsDocument::new("fi");
        let chooser = doc.context_mut("BluetoothDeviceChooser");
        chooser
            .messages
            .push(Message::new("Scanning done", "Skannaus suoritettu"));
        chooser.messages.push(
            Message::new("Scan", "Skannaa").with_status(TranslationStatus::Vanished),
        );
        chooser.messages.push(Message {
            translation: Translation::unfinished(),
            ..Message::new("Pairing", "")
        });
        chooser.messages.push(
            Message::new("Connect", "Yhdistä (luonnos)").with_status(TranslationStatus::Unfinished),
        );
        let list = doc.context_mut("FeatureListForm");
        list.messages.push(Message::plural(
            "Successfully deleted %n feature(s)",
            vec![
                "%n kohteen poistaminen onnistui".into(),
                "%n kohteen poistaminen onnistui (monta)".into(),
            ],
        ));
        list.messages.push(
            Message::new("Open", "Avaa lomake").with_comment("form"),
        );
        list.messages.push(Message::new("Open", "Avaa"));
        list.messages.push(Message::new(
            "Limit the search to the field '%1'",
            "Rajaa hakukenttään '%1'",
        ));
        doc
    }

    #[test]
    fn test_finished_lookup() {
        let catalogue = Catalogue::from(&finnish());
        assert_eq!(
            catalogue.translate("BluetoothDeviceChooser", "Scanning done", None),
            Some("Skannaus suoritettu")
        );
    }

    #[test]
    fn test_vanished_never_loaded() {
        let catalogue = Catalogue::from_document(&finnish(), true);
        assert_eq!(catalogue.translate("BluetoothDeviceChooser", "Scan", None), None);
        assert_eq!(catalogue.tr("BluetoothDeviceChooser", "Scan", None), "Scan");
    }

    #[test]
    fn test_unfinished_falls_back_by_default() {
        let catalogue = Catalogue::from(&finnish());
        assert_eq!(catalogue.tr("BluetoothDeviceChooser", "Connect", None), "Connect");
        assert_eq!(catalogue.tr("BluetoothDeviceChooser", "Pairing", None), "Pairing");
    }

    #[test]
    fn test_unfinished_loaded_on_request() {
        let catalogue = Catalogue::from_document(&finnish(), true);
        assert_eq!(
            catalogue.tr("BluetoothDeviceChooser", "Connect", None),
            "Yhdistä (luonnos)"
        );
        // Empty unfinished text is still skipped.
        assert_eq!(catalogue.tr("BluetoothDeviceChooser", "Pairing", None), "Pairing");
    }

    #[test]
    fn test_plural_forms() {
        let catalogue = Catalogue::from(&finnish());
        let source = "Successfully deleted %n feature(s)";
        assert_eq!(
            catalogue.tr_n("FeatureListForm", source, None, 1),
            "1 kohteen poistaminen onnistui"
        );
        assert_eq!(
            catalogue.tr_n("FeatureListForm", source, None, 3),
            "3 kohteen poistaminen onnistui (monta)"
        );
        assert_eq!(
            catalogue.translate_plural("FeatureListForm", source, None, 0),
            Some("%n kohteen poistaminen onnistui (monta)")
        );
    }

    #[test]
    fn test_plural_fallback_substitutes_source() {
        let catalogue = Catalogue::from(&finnish());
        assert_eq!(
            catalogue.tr_n("FeatureListForm", "Merged %n feature(s)", None, 4),
            "Merged 4 feature(s)"
        );
    }

    #[test]
    fn test_plural_form_clamped_to_last() {
        let mut catalogue = Catalogue::new("ru");
        catalogue.insert(
            "Ctx",
            "%n files",
            "",
            TranslationText::Plural(vec!["%n файл".into(), "%n файла".into()]),
        );
        // Russian wants form 2 for 5, only two forms exist.
        assert_eq!(catalogue.tr_n("Ctx", "%n files", None, 5), "5 файла");
    }

    #[test]
    fn test_comment_disambiguates_and_falls_back() {
        let catalogue = Catalogue::from(&finnish());
        assert_eq!(catalogue.tr("FeatureListForm", "Open", Some("form")), "Avaa lomake");
        assert_eq!(catalogue.tr("FeatureListForm", "Open", None), "Avaa");
        assert_eq!(catalogue.tr("FeatureListForm", "Open", Some("unknown")), "Avaa");
    }

    #[test]
    fn test_lookup_with_args() {
        let catalogue = Catalogue::from(&finnish());
        let request = LookupRequest::new("FeatureListForm", "Limit the search to the field '%1'")
            .args(&["nimi"]);
        assert_eq!(catalogue.lookup(&request), "Rajaa hakukenttään 'nimi'");
    }

    #[test]
    fn test_lookup_with_count_and_missing_key() {
        let catalogue = Catalogue::from(&finnish());
        let request = LookupRequest::new("Nowhere", "Copied %n file(s) to %1")
            .count(2)
            .args(&["/tmp"]);
        assert_eq!(catalogue.lookup(&request), "Copied 2 file(s) to /tmp");
    }

    #[test]
    fn test_lookup_substitutes_in_one_pass() {
        let mut catalogue = Catalogue::new("fi");
        catalogue.insert("Ctx", "%n of %1", "", TranslationText::Single("%%n / %1".into()));
        let request = LookupRequest::new("Ctx", "%n of %1").count(2).args(&["A", "B"]);
        assert_eq!(catalogue.lookup(&request), "%2 / A");
    }

    #[test]
    fn test_duplicate_first_wins() {
        let mut catalogue = Catalogue::new("fi");
        assert!(catalogue.insert("A", "x", "", TranslationText::Single("first".into())));
        assert!(!catalogue.insert("A", "x", "", TranslationText::Single("second".into())));
        assert_eq!(catalogue.tr("A", "x", None), "first");
        assert_eq!(catalogue.len(), 1);
    }

    #[test]
    fn test_metadata() {
        let catalogue = Catalogue::from(&finnish());
        assert_eq!(catalogue.language(), "fi");
        assert_eq!(catalogue.plural_rule(), PluralRule::OneOther);
        assert!(catalogue.has_context("FeatureListForm"));
        assert!(!catalogue.has_context("About"));
        assert_eq!(catalogue.len(), 5);
        assert!(!catalogue.is_empty());
        assert_eq!(catalogue.entries().count(), 5);
    }

    #[test]
    fn test_install_and_uninstall() {
        let mut catalogue = Catalogue::new("catalog_test_lang");
        catalogue.insert("A", "x", "", TranslationText::Single("y".into()));
        install(catalogue);
        assert!(has_language("catalog_test_lang"));
        assert!(installed_languages().contains(&"catalog_test_lang".to_string()));
        assert_eq!(get("catalog_test_lang").map(|c| c.len()), Some(1));

        let removed = uninstall("catalog_test_lang");
        assert!(removed.is_some());
        assert!(!has_language("catalog_test_lang"));
        assert!(get("catalog_test_lang").is_none());
    }

    #[test]
    fn test_install_replaces() {
        let mut first = Catalogue::new("catalog_replace_lang");
        first.insert("A", "x", "", TranslationText::Single("one".into()));
        install(first);
        let mut second = Catalogue::new("catalog_replace_lang");
        second.insert("A", "x", "", TranslationText::Single("two".into()));
        install(second);
        let current = get("catalog_replace_lang").unwrap();
        assert_eq!(current.tr("A", "x", None), "two");
        uninstall("catalog_replace_lang");
    }

    #[test]
    fn test_catalogue_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Catalogue>();
    }
}
