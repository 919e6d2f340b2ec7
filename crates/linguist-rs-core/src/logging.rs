//! Logging integration for linguist-rs.
//!
//! Provides helpers for configuring [`tracing`]-based logging from
//! [`Settings`](crate::settings::Settings) and for creating per-catalogue spans.

use std::path::Path;

use crate::settings::Settings;

/// Sets up the global tracing subscriber based on the given settings.
///
/// The log level is read from `settings.log_level` (e.g. "debug", "info", "warn",
/// "error"). In debug mode a pretty, human-readable format is used; otherwise
/// a structured JSON format is used. Installing a second subscriber is a no-op.
pub fn setup_logging(settings: &Settings) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if settings.debug {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true)
            .with_writer(std::io::stderr)
            .pretty()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .json()
            .try_init()
            .ok();
    }
}

/// Creates a tracing span covering the loading of one catalogue file.
///
/// # Examples
///
/// ```
/// use linguist_rs_core::logging::catalogue_span;
///
/// let span = catalogue_span("i18n/app_fi.ts");
/// let _guard = span.enter();
/// tracing::info!("loading catalogue");
/// ```
pub fn catalogue_span(path: impl AsRef<Path>) -> tracing::Span {
    tracing::info_span!("catalogue", path = %path.as_ref().display())
}
