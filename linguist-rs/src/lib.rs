//! # linguist-rs
//!
//! Qt Linguist translation catalogues for Rust.
//!
//! This is the meta-crate that re-exports the sub-crates. Depend on
//! `linguist-rs` to get everything, or on individual crates for finer-grained
//! control.
//!
//! ```
//! use linguist_rs::prelude::*;
//!
//! let doc = parse_str(r#"<TS version="2.1" language="fi">
//! <context>
//!     <name>BluetoothDeviceChooser</name>
//!     <message>
//!         <source>Scanning done</source>
//!         <translation>Skannaus suoritettu</translation>
//!     </message>
//! </context>
//! </TS>"#).unwrap();
//!
//! let catalogue = Catalogue::from(&doc);
//! assert_eq!(catalogue.tr("BluetoothDeviceChooser", "Scanning done", None), "Skannaus suoritettu");
//! ```

/// Model, parser, writer, catalogue lookup, settings, and error types.
pub use linguist_rs_core as core;

/// Management commands (CLI).
#[cfg(feature = "cli")]
pub use linguist_rs_cli as cli;

/// Re-export of `serde` for convenience.
pub use serde;

/// Re-export of `serde_json` for convenience.
pub use serde_json;

/// Re-export of `tracing` for convenience.
pub use tracing;

/// Re-export of `tracing_subscriber` for convenience.
pub use tracing_subscriber;

/// The most commonly used types and functions.
pub mod prelude {
    pub use linguist_rs_core::i18n::catalog::{Catalogue, LookupRequest};
    pub use linguist_rs_core::i18n::parser::{parse_file, parse_str};
    pub use linguist_rs_core::i18n::writer::{to_string, write_file};
    pub use linguist_rs_core::i18n::{activate, deactivate, get_language, tr, tr_c, tr_n};
    pub use linguist_rs_core::{
        LinguistError, LinguistResult, Message, PluralRule, Settings, TranslationStatus,
        TranslationText, TsDocument,
    };

    #[cfg(feature = "cli")]
    pub use linguist_rs_cli::{CommandRegistry, ManagementCommand};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_roundtrip() {
        let mut doc = TsDocument::new("fi");
        doc.context_mut("About")
            .messages
            .push(Message::new("Changelog", "Muutosloki"));
        let xml = to_string(&doc).unwrap();
        assert_eq!(parse_str(&xml).unwrap(), doc);
        assert_eq!(PluralRule::for_language("fi").form_count(), 2);
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_reexport() {
        let registry = crate::cli::build_registry();
        assert_eq!(registry.len(), 5);
    }
}
