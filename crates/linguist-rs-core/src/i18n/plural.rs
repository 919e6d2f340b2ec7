//! Plural-form selection by language.
//!
//! Each [`PluralRule`] is a family of languages sharing the same number of
//! `<numerusform>` variants and the same mapping from a count to a variant
//! index. The families and their member languages follow the numerus tables
//! used by Qt Linguist tooling, so a catalogue produced for Qt selects the
//! same form here.
//!
//! # Invariants
//!
//! `form_index(n) < form_count()` for every rule and every `n`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A plural rule family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PluralRule {
    /// One form for every count (Japanese, Chinese, Korean, ...).
    Invariant,
    /// `n == 1` selects form 0, everything else form 1 (English, Finnish, ...).
    #[default]
    OneOther,
    /// `n <= 1` selects form 0, everything else form 1 (French, Brazilian Portuguese, ...).
    ZeroOneOther,
    /// Russian, Ukrainian, Belarusian, and the South Slavic languages.
    EastSlavic,
    /// Polish.
    Polish,
    /// Czech and Slovak.
    Czech,
    /// Lithuanian.
    Lithuanian,
    /// Latvian: singular, plural, and a separate form for zero.
    Latvian,
    /// Romanian.
    Romanian,
    /// Slovenian: four forms keyed on `n % 100`.
    Slovenian,
    /// Irish: one, two, other.
    Irish,
    /// Welsh: one, two, eight/eleven, other.
    Welsh,
    /// Arabic: six forms.
    Arabic,
}

const INVARIANT: &[&str] = &[
    "bi", "bo", "dz", "fa", "fj", "gn", "hu", "id", "ja", "jv", "ko", "ms", "my", "na", "om",
    "su", "th", "tr", "tt", "vi", "yo", "za", "zh",
];

const ZERO_ONE_OTHER: &[&str] = &[
    "ak", "am", "br", "fil", "fr", "ln", "mg", "oc", "pt_br", "ti", "tl", "wa",
];

const EAST_SLAVIC: &[&str] = &["be", "bs", "hr", "ru", "sh", "sr", "uk"];

impl PluralRule {
    /// Returns the rule for a language code such as `"fi"`, `"fi_FI"`, or `"pt-BR"`.
    ///
    /// The full code is tried first, then the primary subtag. Unknown
    /// languages use [`PluralRule::OneOther`].
    pub fn for_language(code: &str) -> Self {
        let normalized = code.trim().to_lowercase().replace('-', "_");
        if let Some(rule) = Self::lookup(&normalized) {
            return rule;
        }
        let primary = normalized.split('_').next().unwrap_or_default();
        Self::lookup(primary).unwrap_or_default()
    }

    fn lookup(code: &str) -> Option<Self> {
        if code.is_empty() {
            return None;
        }
        if INVARIANT.contains(&code) {
            return Some(Self::Invariant);
        }
        if ZERO_ONE_OTHER.contains(&code) {
            return Some(Self::ZeroOneOther);
        }
        if EAST_SLAVIC.contains(&code) {
            return Some(Self::EastSlavic);
        }
        let rule = match code {
            "pl" => Self::Polish,
            "cs" | "sk" => Self::Czech,
            "lt" => Self::Lithuanian,
            "lv" => Self::Latvian,
            "ro" | "mo" => Self::Romanian,
            "sl" => Self::Slovenian,
            "ga" => Self::Irish,
            "cy" => Self::Welsh,
            "ar" => Self::Arabic,
            _ if code.contains('_') => return None,
            _ => Self::OneOther,
        };
        Some(rule)
    }

    /// Number of `<numerusform>` variants a catalogue must provide.
    pub const fn form_count(self) -> usize {
        match self {
            Self::Invariant => 1,
            Self::OneOther | Self::ZeroOneOther => 2,
            Self::EastSlavic
            | Self::Polish
            | Self::Czech
            | Self::Lithuanian
            | Self::Latvian
            | Self::Romanian
            | Self::Irish => 3,
            Self::Slovenian | Self::Welsh => 4,
            Self::Arabic => 6,
        }
    }

    /// Index of the variant to use for the count `n`.
    pub const fn form_index(self, n: u64) -> usize {
        let n10 = n % 10;
        let n100 = n % 100;
        let few = n10 >= 2 && n10 <= 4 && (n100 < 10 || n100 >= 20);
        match self {
            Self::Invariant => 0,
            Self::OneOther => {
                if n == 1 {
                    0
                } else {
                    1
                }
            }
            Self::ZeroOneOther => {
                if n <= 1 {
                    0
                } else {
                    1
                }
            }
            Self::EastSlavic => {
                if n10 == 1 && n100 != 11 {
                    0
                } else if few {
                    1
                } else {
                    2
                }
            }
            Self::Polish => {
                if n == 1 {
                    0
                } else if few {
                    1
                } else {
                    2
                }
            }
            Self::Czech => {
                if n == 1 {
                    0
                } else if n >= 2 && n <= 4 {
                    1
                } else {
                    2
                }
            }
            Self::Lithuanian => {
                if n10 == 1 && n100 != 11 {
                    0
                } else if n10 >= 2 && (n100 < 10 || n100 >= 20) {
                    1
                } else {
                    2
                }
            }
            Self::Latvian => {
                if n10 == 1 && n100 != 11 {
                    0
                } else if n != 0 {
                    1
                } else {
                    2
                }
            }
            Self::Romanian => {
                if n == 1 {
                    0
                } else if n == 0 || (n100 >= 1 && n100 <= 19) {
                    1
                } else {
                    2
                }
            }
            Self::Slovenian => match n100 {
                1 => 0,
                2 => 1,
                3 | 4 => 2,
                _ => 3,
            },
            Self::Irish => match n {
                1 => 0,
                2 => 1,
                _ => 2,
            },
            Self::Welsh => match n {
                1 => 0,
                2 => 1,
                8 | 11 => 2,
                _ => 3,
            },
            Self::Arabic => {
                if n == 0 {
                    0
                } else if n == 1 {
                    1
                } else if n == 2 {
                    2
                } else if n100 >= 3 && n100 <= 10 {
                    3
                } else if n100 >= 11 {
                    4
                } else {
                    5
                }
            }
        }
    }

    /// Stable lowercase name of the rule family.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Invariant => "invariant",
            Self::OneOther => "one_other",
            Self::ZeroOneOther => "zero_one_other",
            Self::EastSlavic => "east_slavic",
            Self::Polish => "polish",
            Self::Czech => "czech",
            Self::Lithuanian => "lithuanian",
            Self::Latvian => "latvian",
            Self::Romanian => "romanian",
            Self::Slovenian => "slovenian",
            Self::Irish => "irish",
            Self::Welsh => "welsh",
            Self::Arabic => "arabic",
        }
    }
}

impl fmt::Display for PluralRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
