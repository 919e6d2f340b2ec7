//! Placeholder scanning and substitution.
//!
//! Catalogue text uses `%1`..`%99` for positional arguments and `%n` for the
//! plural quantity. Either may carry an `L` marker (`%L1`, `%Ln`) asking for
//! locale-aware number formatting; here the marker is accepted and the value
//! is substituted as-is.
//!
//! Substitution is single-pass: replacement text is never rescanned, so an
//! argument containing `%2` stays literal.

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"%L?(n|[0-9]{1,2})").expect("valid placeholder regex"));

/// A placeholder token found in catalogue text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Placeholder {
    /// The plural quantity, `%n` or `%Ln`.
    Count,
    /// A positional argument, `%1`..`%99` (optionally `%L1`).
    Arg(u8),
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count => f.write_str("%n"),
            Self::Arg(k) => write!(f, "%{k}"),
        }
    }
}

fn classify(caps: &Captures<'_>) -> Option<Placeholder> {
    match &caps[1] {
        "n" => Some(Placeholder::Count),
        digits => match digits.parse::<u8>() {
            Ok(0) | Err(_) => None,
            Ok(k) => Some(Placeholder::Arg(k)),
        },
    }
}

/// Returns the set of placeholders used in `text`.
///
/// # Examples
///
/// ```
/// use linguist_rs_core::i18n::placeholder::{placeholders, Placeholder};
///
/// let found = placeholders("Copied %n file(s) to '%1'");
/// assert!(found.contains(&Placeholder::Count));
/// assert!(found.contains(&Placeholder::Arg(1)));
/// ```
pub fn placeholders(text: &str) -> BTreeSet<Placeholder> {
    PLACEHOLDER_RE
        .captures_iter(text)
        .filter_map(|caps| classify(&caps))
        .collect()
}

/// Returns only the positional-argument placeholders used in `text`.
pub fn arg_placeholders(text: &str) -> BTreeSet<Placeholder> {
    placeholders(text)
        .into_iter()
        .filter(|p| matches!(p, Placeholder::Arg(_)))
        .collect()
}

/// Replaces `%n` and `%Ln` with the decimal value of `count`.
pub fn substitute_count(text: &str, count: u64) -> Cow<'_, str> {
    let value = count.to_string();
    PLACEHOLDER_RE.replace_all(text, |caps: &Captures<'_>| match classify(caps) {
        Some(Placeholder::Count) => value.clone(),
        _ => caps[0].to_string(),
    })
}

/// Replaces `%k` and `%Lk` with `args[k - 1]`.
///
/// Placeholders without a matching argument are left verbatim, and `%n` is
/// never touched.
///
/// # Examples
///
/// ```
/// use linguist_rs_core::i18n::placeholder::substitute_args;
///
/// assert_eq!(
///     substitute_args("Tiedostoa %1 ei ole olemassa", &["data.gpkg"]),
///     "Tiedostoa data.gpkg ei ole olemassa"
/// );
/// assert_eq!(substitute_args("%1 / %2", &["a"]), "a / %2");
/// ```
pub fn substitute_args<'a, S: AsRef<str>>(text: &'a str, args: &[S]) -> Cow<'a, str> {
    if args.is_empty() {
        return Cow::Borrowed(text);
    }
    PLACEHOLDER_RE.replace_all(text, |caps: &Captures<'_>| match classify(caps) {
        Some(Placeholder::Arg(k)) => args
            .get(usize::from(k) - 1)
            .map_or_else(|| caps[0].to_string(), |arg| arg.as_ref().to_string()),
        _ => caps[0].to_string(),
    })
}

/// Replaces `%n` with `count` (when given) and `%k` with `args[k - 1]` in a
/// single scan of `text`.
///
/// Tokens without a value are left verbatim.
///
/// # Examples
///
/// ```
/// use linguist_rs_core::i18n::placeholder::substitute;
///
/// assert_eq!(substitute("%n kohdetta tasolla %1", Some(3), &["Puisto"]), "3 kohdetta tasolla Puisto");
/// assert_eq!(substitute("%n / %1", None, &["a"]), "%n / a");
/// ```
pub fn substitute<'a, S: AsRef<str>>(text: &'a str, count: Option<u64>, args: &[S]) -> Cow<'a, str> {
    if count.is_none() && args.is_empty() {
        return Cow::Borrowed(text);
    }
    let count = count.map(|n| n.to_string());
    PLACEHOLDER_RE.replace_all(text, |caps: &Captures<'_>| {
        let value = match classify(caps) {
            Some(Placeholder::Count) => count.clone(),
            Some(Placeholder::Arg(k)) => args
                .get(usize::from(k) - 1)
                .map(|arg| arg.as_ref().to_string()),
            None => None,
        };
        value.unwrap_or_else(|| caps[0].to_string())
    })
}
