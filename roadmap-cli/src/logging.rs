//! Logging initialisation for the roadmap CLI.
//!
//! Installs a global `tracing` subscriber on stderr, keeping stdout free for
//! prompts, traces and graph output. Events from crates using the `log` facade
//! are bridged into the same subscriber.

use std::{env, io, sync::OnceLock};

use thiserror::Error;
use tracing_log::LogTracer;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable selecting `human` or `json` log output.
pub const LOG_FORMAT_ENV: &str = "ROADMAP_LOG_FORMAT";

static INITIALISED: OnceLock<()> = OnceLock::new();

/// Log output formats accepted through [`LOG_FORMAT_ENV`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LogFormat {
    /// Compact human-readable lines.
    #[default]
    Human,
    /// One JSON object per event, including the active span list.
    Json,
}

/// Errors raised while initialising structured logging.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The format variable was set but not valid UTF-8.
    #[error("environment variable `{name}` contained invalid UTF-8: {source}")]
    InvalidUnicode {
        /// Name of the offending environment variable.
        name: &'static str,
        /// Underlying lookup failure.
        #[source]
        source: env::VarError,
    },
    /// Unsupported log format requested via `ROADMAP_LOG_FORMAT`.
    #[error("unsupported log format `{provided}`; expected `human` or `json`")]
    UnsupportedFormat {
        /// Normalised value supplied by the user.
        provided: String,
    },
}

/// Install global structured logging unless it is already configured.
///
/// Output goes to stderr. `RUST_LOG` controls the level and defaults to
/// `info`; `ROADMAP_LOG_FORMAT=json` switches to JSON lines. Losing the race
/// for the global subscriber to another component is not an error.
///
/// # Errors
/// Returns [`LoggingError`] if the format variable is not valid UTF-8 or names
/// an unsupported format.
pub fn init_logging() -> Result<(), LoggingError> {
    if INITIALISED.get().is_some() {
        return Ok(());
    }

    let format = match env::var(LOG_FORMAT_ENV) {
        Ok(raw) => parse_log_format(&raw)?,
        Err(env::VarError::NotPresent) => LogFormat::default(),
        Err(err @ env::VarError::NotUnicode(_)) => {
            return Err(LoggingError::InvalidUnicode {
                name: LOG_FORMAT_ENV,
                source: err,
            });
        }
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(io::stderr);
    let fmt_layer = match format {
        LogFormat::Human => fmt_layer.compact().boxed(),
        LogFormat::Json => fmt_layer
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .boxed(),
    };

    // Another logger may already own the `log` slot.
    let _ = LogTracer::init();

    if let Err(err) = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
    {
        tracing::debug!(error = %err, "keeping existing global subscriber");
    }
    let _ = INITIALISED.set(());
    Ok(())
}

/// Parses a `ROADMAP_LOG_FORMAT` value, ignoring case and surrounding space.
///
/// # Errors
/// Returns [`LoggingError::UnsupportedFormat`] for anything other than
/// `human` or `json`.
pub fn parse_log_format(raw: &str) -> Result<LogFormat, LoggingError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "human" => Ok(LogFormat::Human),
        "json" => Ok(LogFormat::Json),
        other => Err(LoggingError::UnsupportedFormat {
            provided: other.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::lower("human", LogFormat::Human)]
    #[case::upper("HUMAN", LogFormat::Human)]
    #[case::padded(" json ", LogFormat::Json)]
    #[case::mixed("Json", LogFormat::Json)]
    fn accepts_supported_formats(#[case] raw: &str, #[case] expected: LogFormat) {
        assert_eq!(parse_log_format(raw).expect("format must parse"), expected);
    }

    #[rstest]
    #[case::unknown("xml", "xml")]
    #[case::empty("  ", "")]
    fn rejects_unknown_formats(#[case] raw: &str, #[case] normalised: &str) {
        match parse_log_format(raw).expect_err("format must be rejected") {
            LoggingError::UnsupportedFormat { provided } => assert_eq!(provided, normalised),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn init_logging_is_idempotent() {
        init_logging().expect("logging must initialise");
        init_logging().expect("subsequent calls must be no-ops");
    }
}
