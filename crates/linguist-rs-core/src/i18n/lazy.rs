//! Lazy translation strings.
//!
//! [`LazyString`] defers the lookup until the string is displayed, so
//! labels declared once can follow the language active at render time.

use std::fmt;

use super::catalog::LookupRequest;

/// A lazily-translated string.
///
/// # Examples
///
/// ```
/// use linguist_rs_core::i18n;
/// use linguist_rs_core::i18n::lazy::LazyString;
///
/// let lazy = LazyString::new("About", "Changelog");
/// i18n::deactivate();
/// assert_eq!(lazy.to_string(), "Changelog");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LazyString {
    context: String,
    source: String,
    comment: Option<String>,
    count: Option<u64>,
}

impl LazyString {
    /// Creates a lazy lookup for a context and source string.
    pub fn new(context: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            source: source.into(),
            comment: None,
            count: None,
        }
    }

    /// Sets the disambiguating comment.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Sets the plural quantity.
    #[must_use]
    pub const fn with_count(mut self, count: u64) -> Self {
        self.count = Some(count);
        self
    }

    /// The context name.
    pub fn context(&self) -> &str {
        &self.context
    }

    /// The untranslated source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Evaluates the translation using the current thread's active language.
    pub fn evaluate(&self) -> String {
        let request = LookupRequest {
            context: &self.context,
            source: &self.source,
            comment: self.comment.as_deref(),
            count: self.count,
            args: &[],
        };
        super::translate(&request)
    }
}

impl fmt::Display for LazyString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.evaluate())
    }
}

impl fmt::Debug for LazyString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyString")
            .field("context", &self.context)
            .field("source", &self.source)
            .field("comment", &self.comment)
            .field("count", &self.count)
            .finish()
    }
}

impl PartialEq<str> for LazyString {
    fn eq(&self, other: &str) -> bool {
        self.evaluate() == other
    }
}

impl From<LazyString> for String {
    fn from(lazy: LazyString) -> Self {
        lazy.evaluate()
    }
}
