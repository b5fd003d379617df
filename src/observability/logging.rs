//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber from the `Logging` settings section
//! - Translate `LogLevel` entries (`Information`, `Warning`, ...) into filter directives
//! - Pick the output format (compact, pretty, JSON)
//!
//! # Design Decisions
//! - `RUST_LOG` wins over settings when it is set and valid
//! - Developer mode always uses the pretty format

use tracing_subscriber::{
    filter::ParseError, fmt, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError,
    EnvFilter,
};

use crate::config::{LogFormat, LoggingSettings};

/// `LogLevel` key applying to every target not listed separately.
pub const DEFAULT_CATEGORY: &str = "Default";

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("unknown log level {level:?} for {category}")]
    UnknownLevel { category: String, level: String },

    #[error("invalid log filter: {0}")]
    Filter(#[from] ParseError),

    #[error("failed to install log subscriber: {0}")]
    Init(#[from] TryInitError),
}

/// Map a level name to a tracing filter level.
fn level_directive(level: &str) -> Option<&'static str> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Some("trace"),
        "debug" => Some("debug"),
        "information" | "info" => Some("info"),
        "warning" | "warn" => Some("warn"),
        "error" | "critical" => Some("error"),
        "none" | "off" => Some("off"),
        _ => None,
    }
}

/// Build an `EnvFilter` directive string from `Logging.LogLevel`.
pub fn filter_directives(settings: &LoggingSettings) -> Result<String, LoggingError> {
    let mut default = "info";
    let mut targets = Vec::new();

    for (category, level) in &settings.log_level {
        let directive = level_directive(level).ok_or_else(|| LoggingError::UnknownLevel {
            category: category.clone(),
            level: level.clone(),
        })?;

        if category.eq_ignore_ascii_case(DEFAULT_CATEGORY) {
            default = directive;
        } else {
            targets.push(format!("{category}={directive}"));
        }
    }

    let mut directives = vec![default.to_string()];
    directives.extend(targets);
    Ok(directives.join(","))
}

/// Install the global subscriber.
pub fn init_logging(settings: &LoggingSettings, developer_mode: bool) -> Result<(), LoggingError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(filter_directives(settings)?)?,
    };

    let format = if developer_mode {
        LogFormat::Pretty
    } else {
        settings.format
    };

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Compact => registry.with(fmt::layer().compact()).try_init()?,
        LogFormat::Pretty => registry.with(fmt::layer().pretty()).try_init()?,
        LogFormat::Json => registry.with(fmt::layer().json()).try_init()?,
    }

    Ok(())
}
