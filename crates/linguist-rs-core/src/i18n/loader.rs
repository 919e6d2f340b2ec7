//! Locating and loading catalogue files.
//!
//! Catalogue files are named `{prefix}_{language}.ts` and live in one
//! directory. A language with a region suffix (`fi_FI`, `pt-BR`) falls back
//! to shorter codes until a file is found.

use std::path::{Path, PathBuf};

use crate::error::{LinguistError, LinguistResult};
use crate::i18n::catalog::Catalogue;
use crate::i18n::parser;
use crate::logging::catalogue_span;
use crate::settings::Settings;

/// Parses a catalogue file and builds the active catalogue from it.
///
/// `settings.load_unfinished` decides whether unfinished entries are used.
///
/// # Errors
///
/// Returns [`LinguistError::Io`] if the file cannot be read and
/// [`LinguistError::Parse`] if it is not a valid `.ts` document.
pub fn load_file(path: impl AsRef<Path>, settings: &Settings) -> LinguistResult<Catalogue> {
    let path = path.as_ref();
    let span = catalogue_span(path);
    let _guard = span.enter();

    let doc = parser::parse_file(path)?;
    let catalogue = Catalogue::from_document(&doc, settings.load_unfinished);
    tracing::info!(
        language = %catalogue.language(),
        messages = doc.message_count(),
        active = catalogue.len(),
        "loaded catalogue"
    );
    Ok(catalogue)
}

/// Candidate language codes for `language`, most specific first.
fn language_candidates(language: &str) -> Vec<&str> {
    let mut candidates = vec![language];
    let mut current = language;
    while let Some(pos) = current.rfind(['_', '-']) {
        current = &current[..pos];
        if current.is_empty() {
            break;
        }
        candidates.push(current);
    }
    candidates
}

fn file_name(prefix: &str, language: &str) -> String {
    if prefix.is_empty() {
        format!("{language}.ts")
    } else {
        format!("{prefix}_{language}.ts")
    }
}

/// Finds the catalogue file for a language in `dir`.
///
/// Tries `{prefix}_{language}.ts`, then the same name with trailing subtags
/// removed one at a time.
///
/// # Examples
///
/// ```no_run
/// use linguist_rs_core::i18n::loader::find_catalogue;
///
/// // Resolves to i18n/qfield_fi.ts when no qfield_fi_FI.ts exists.
/// let path = find_catalogue("i18n", "qfield", "fi_FI");
/// ```
pub fn find_catalogue(dir: impl AsRef<Path>, prefix: &str, language: &str) -> Option<PathBuf> {
    let dir = dir.as_ref();
    let found = language_candidates(language)
        .into_iter()
        .map(|candidate| dir.join(file_name(prefix, candidate)))
        .find(|path| path.is_file());
    match &found {
        Some(path) => tracing::debug!(language, path = %path.display(), "found catalogue"),
        None => tracing::debug!(language, dir = %dir.display(), "no catalogue found"),
    }
    found
}

/// Loads the catalogue for `settings.language` from `settings.catalogue_dir`.
///
/// # Errors
///
/// Returns [`LinguistError::CatalogueNotFound`] if no file matches, and any
/// error from [`load_file`].
pub fn load_for_language(settings: &Settings) -> LinguistResult<Catalogue> {
    let path = find_catalogue(
        &settings.catalogue_dir,
        &settings.catalogue_prefix,
        &settings.language,
    )
    .ok_or_else(|| LinguistError::CatalogueNotFound {
        dir: settings.catalogue_dir.clone(),
        language: settings.language.clone(),
    })?;
    load_file(path, settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FINNISH: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE TS>
<TS version="2.1" language="fi">
<context>
    <name>BluetoothDeviceChooser</name>
    <message>
        <source>Scanning done</source>
        <translation>Skannaus suoritettu</translation>
    </message>
    <message>
        <source>Scanning</source>
        <translation type="unfinished">Skannataan</translation>
    </message>
</context>
</TS>
"#;

    fn settings_for(dir: &Path, language: &str) -> Settings {
        Settings {
            catalogue_dir: dir.to_path_buf(),
            catalogue_prefix: "qfield".to_string(),
            language: language.to_string(),
            ..Settings::default()
        }
    }

    #[test]
    fn test_language_candidates() {
        assert_eq!(language_candidates("fi"), vec!["fi"]);
        assert_eq!(language_candidates("fi_FI"), vec!["fi_FI", "fi"]);
        assert_eq!(
            language_candidates("sr_Latn-RS"),
            vec!["sr_Latn-RS", "sr_Latn", "sr"]
        );
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name("qfield", "fi"), "qfield_fi.ts");
        assert_eq!(file_name("", "fi"), "fi.ts");
    }

    #[test]
    fn test_find_catalogue_exact_and_stripped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("qfield_fi.ts"), FINNISH).unwrap();

        let exact = find_catalogue(dir.path(), "qfield", "fi").unwrap();
        assert!(exact.ends_with("qfield_fi.ts"));

        let stripped = find_catalogue(dir.path(), "qfield", "fi_FI").unwrap();
        assert_eq!(stripped, exact);

        assert!(find_catalogue(dir.path(), "qfield", "sv").is_none());
        assert!(find_catalogue(dir.path(), "other", "fi").is_none());
    }

    #[test]
    fn test_find_catalogue_prefers_specific() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("qfield_pt.ts"), FINNISH).unwrap();
        std::fs::write(dir.path().join("qfield_pt_BR.ts"), FINNISH).unwrap();
        let found = find_catalogue(dir.path(), "qfield", "pt_BR").unwrap();
        assert!(found.ends_with("qfield_pt_BR.ts"));
    }

    #[test]
    fn test_load_for_language() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("qfield_fi.ts"), FINNISH).unwrap();

        let catalogue = load_for_language(&settings_for(dir.path(), "fi_FI")).unwrap();
        assert_eq!(catalogue.language(), "fi");
        assert_eq!(
            catalogue.tr("BluetoothDeviceChooser", "Scanning done", None),
            "Skannaus suoritettu"
        );
        assert_eq!(catalogue.tr("BluetoothDeviceChooser", "Scanning", None), "Scanning");
    }

    #[test]
    fn test_load_unfinished_setting() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qfield_fi.ts");
        std::fs::write(&path, FINNISH).unwrap();

        let settings = Settings {
            load_unfinished: true,
            ..settings_for(dir.path(), "fi")
        };
        let catalogue = load_file(&path, &settings).unwrap();
        assert_eq!(catalogue.tr("BluetoothDeviceChooser", "Scanning", None), "Skannataan");
    }

    #[test]
    fn test_load_for_language_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_for_language(&settings_for(dir.path(), "de")).unwrap_err();
        assert!(matches!(err, LinguistError::CatalogueNotFound { ref language, .. } if language == "de"));
    }

    #[test]
    fn test_load_file_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ts");
        std::fs::write(&path, "<TS><context>").unwrap();
        let err = load_file(&path, &Settings::default()).unwrap_err();
        assert!(matches!(err, LinguistError::Parse(_)));
    }
}
