//! Qt Linguist catalogue runtime.
//!
//! This module provides:
//!
//! - **Model, parser, writer**: a typed view of `.ts` documents that
//!   round-trips through XML.
//! - **Catalogue**: an immutable lookup table built from a document, with
//!   plural-form selection and placeholder substitution.
//! - **Language activation**: a process-wide registry of installed
//!   catalogues plus a thread-local active language, used by `tr()`,
//!   `tr_c()`, `tr_n()`, and `tr_lazy()`.
//! - **Tooling**: validation and completion statistics.
//!
//! ## Quick Start
//!
//! ```
//! use linguist_rs_core::i18n::{self, catalog::Catalogue, parser};
//!
//! let xml = r#"<TS version="2.1" language="qs_doc">
//! <context>
//!     <name>BluetoothDeviceChooser</name>
//!     <message>
//!         <source>Scanning done</source>
//!         <translation>Skannaus suoritettu</translation>
//!     </message>
//! </context>
//! </TS>"#;
//!
//! let doc = parser::parse_str(xml).unwrap();
//! i18n::catalog::install(Catalogue::from(&doc));
//!
//! i18n::activate("qs_doc");
//! assert_eq!(i18n::tr("BluetoothDeviceChooser", "Scanning done"), "Skannaus suoritettu");
//!
//! i18n::deactivate();
//! assert_eq!(i18n::tr("BluetoothDeviceChooser", "Scanning done"), "Scanning done");
//! ```

pub mod catalog;
pub mod lazy;
pub mod loader;
pub mod model;
pub mod parser;
pub mod placeholder;
pub mod plural;
pub mod stats;
pub mod validate;
pub mod writer;

use std::cell::RefCell;

use catalog::LookupRequest;

use crate::settings::SETTINGS;

/// Language reported by [`get_language`] when none is active and no
/// settings are configured.
pub const DEFAULT_LANGUAGE: &str = "en";

// ── Thread-local language state ──────────────────────────────────────────

thread_local! {
    static CURRENT_LANGUAGE: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Activates the given language code for the current thread.
///
/// Subsequent `tr*` calls on this thread use the catalogue installed for
/// that language. Activating a language with no installed catalogue is
/// allowed; lookups then return source text.
///
/// # Examples
///
/// ```
/// use linguist_rs_core::i18n;
///
/// i18n::activate("fi");
/// assert_eq!(i18n::get_language(), "fi");
/// i18n::deactivate();
/// ```
pub fn activate(language_code: &str) {
    CURRENT_LANGUAGE.with(|cell| {
        *cell.borrow_mut() = Some(language_code.to_string());
    });
}

/// Deactivates the current thread's language, reverting to the source language.
pub fn deactivate() {
    CURRENT_LANGUAGE.with(|cell| {
        *cell.borrow_mut() = None;
    });
}

/// Returns the language code active on the current thread.
///
/// With no active language this is `source_language` from the global
/// [`SETTINGS`], or `"en"` before settings are configured.
pub fn get_language() -> String {
    CURRENT_LANGUAGE
        .with(|cell| cell.borrow().clone())
        .unwrap_or_else(source_language)
}

fn source_language() -> String {
    SETTINGS.try_get().map_or_else(
        || DEFAULT_LANGUAGE.to_string(),
        |settings| settings.source_language.clone(),
    )
}

/// Resolves a lookup request against the active language's catalogue.
///
/// Falls back to the source text, with count and arguments substituted, when
/// no catalogue is installed or the key is missing.
pub fn translate(request: &LookupRequest<'_>) -> String {
    if let Some(catalogue) = catalog::get(&get_language()) {
        return catalogue.lookup(request);
    }
    placeholder::substitute(request.source, request.count, request.args).into_owned()
}

/// Translates `source` within `context`.
///
/// # Examples
///
/// ```
/// use linguist_rs_core::i18n;
///
/// i18n::deactivate();
/// assert_eq!(i18n::tr("About", "Changelog"), "Changelog");
/// ```
pub fn tr(context: &str, source: &str) -> String {
    translate(&LookupRequest::new(context, source))
}

/// Translates `source` within `context`, disambiguated by `comment`.
pub fn tr_c(context: &str, source: &str, comment: &str) -> String {
    translate(&LookupRequest::new(context, source).comment(comment))
}

/// Translates a plural message and substitutes `count` for `%n`.
pub fn tr_n(context: &str, source: &str, comment: Option<&str>, count: u64) -> String {
    let mut request = LookupRequest::new(context, source).count(count);
    request.comment = comment;
    translate(&request)
}

/// Translates `source` and substitutes positional arguments.
///
/// # Examples
///
/// ```
/// use linguist_rs_core::i18n;
///
/// i18n::deactivate();
/// assert_eq!(
///     i18n::tr_args("AndroidProjectSource", "File %1 does not exist", &["a.qgz"]),
///     "File a.qgz does not exist"
/// );
/// ```
pub fn tr_args(context: &str, source: &str, args: &[&str]) -> String {
    translate(&LookupRequest::new(context, source).args(args))
}

/// Returns a lazy translation that resolves when the value is displayed.
///
/// The active language at display time decides the result.
pub fn tr_lazy(context: &str, source: &str) -> lazy::LazyString {
    lazy::LazyString::new(context, source)
}
