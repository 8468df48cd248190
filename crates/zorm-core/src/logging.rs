//! Logging integration for zorm.
//!
//! The compiler emits [`tracing`] events; this module wires a subscriber
//! from [`Settings`](crate::settings::Settings) for applications that do not
//! install their own.

use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

use crate::settings::Settings;

/// Installs a global tracing subscriber configured from `settings`.
///
/// Debug mode prints pretty, multi-line events and lowers `zorm_db` to
/// `debug` so every compiled fragment is shown. Otherwise events are
/// written as flattened JSON carrying the current `query` span. Returns
/// `false` when another subscriber is already installed.
pub fn setup_logging(settings: &Settings) -> bool {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(log_filter(settings))
        .with_target(true);

    if settings.debug {
        builder
            .pretty()
            .with_file(true)
            .with_line_number(true)
            .try_init()
            .is_ok()
    } else {
        builder
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false)
            .try_init()
            .is_ok()
    }
}

/// Builds the event filter for `settings`.
///
/// An unparsable `log_level` falls back to `info`.
pub fn log_filter(settings: &Settings) -> EnvFilter {
    let filter = EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    if !settings.debug {
        return filter;
    }
    match "zorm_db=debug".parse::<Directive>() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

/// Creates a tracing span for building one statement against `table`.
///
/// # Examples
///
/// ```
/// use zorm_core::logging::query_span;
///
/// let span = query_span("user");
/// let _guard = span.enter();
/// tracing::debug!("compiling filters");
/// ```
pub fn query_span(table: &str) -> tracing::Span {
    tracing::info_span!("query", table = table)
}
