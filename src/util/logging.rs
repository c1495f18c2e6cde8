//! Structured logging setup for swiftcube
//!
//! Logging goes through the `tracing` ecosystem and is always written to stderr,
//! so that `inspect` output on stdout stays machine-readable.
//!
//! # Example
//!
//! ```no_run
//! use swiftcube::util::logging;
//!
//! // Initialize from SWIFTCUBE_LOG_LEVEL / SWIFTCUBE_LOG_JSON
//! logging::init_from_env();
//!
//! use tracing::{debug, info};
//!
//! info!("Rendering started");
//! debug!(file = "Point.swift", "Extracting declaration");
//! ```

use std::env;
use std::io;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Ensures logging is only initialized once
static INIT: Once = Once::new();

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum log level to display
    pub level: Level,

    /// Use JSON output format
    pub use_json: bool,

    /// Include the module target (e.g., swiftcube::extractor) in logs
    pub include_target: bool,

    /// Include file and line number information
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: false,
            include_location: false,
        }
    }
}

impl LoggingConfig {
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// JSON output with targets and source locations
    pub fn structured() -> Self {
        Self {
            level: Level::INFO,
            use_json: true,
            include_target: true,
            include_location: true,
        }
    }
}

/// Parses a log level from a string, case-insensitively
///
/// Unknown values fall back to `Level::INFO`.
///
/// ```
/// use swiftcube::util::logging::parse_level;
/// use tracing::Level;
///
/// assert_eq!(parse_level("debug"), Level::DEBUG);
/// assert_eq!(parse_level("WARN"), Level::WARN);
/// assert_eq!(parse_level("loud"), Level::INFO);
/// ```
pub fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::INFO
        }
    }
}

fn build_filter(level: Level) -> EnvFilter {
    let filter = EnvFilter::from_default_env();
    match format!("swiftcube={}", level).parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

/// Initializes the logging system
///
/// Only the first call has any effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = build_filter(config.level);

        if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location),
                )
                .init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location),
                )
                .init();
        }
    });
}

/// Initializes logging from `SWIFTCUBE_LOG_LEVEL` and `SWIFTCUBE_LOG_JSON`
///
/// JSON output carries targets and source locations. `RUST_LOG` is honored as
/// well for per-module filtering.
pub fn init_from_env() {
    init_logging(config_from_env(None));
}

/// Like [`init_from_env`], with an explicit level taking precedence over the environment
pub fn init_with_level(level_override: Option<&str>) {
    init_logging(config_from_env(level_override));
}

fn config_from_env(level_override: Option<&str>) -> LoggingConfig {
    let level_str = match level_override {
        Some(level) => level.to_string(),
        None => env::var("SWIFTCUBE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
    };

    let use_json = env::var("SWIFTCUBE_LOG_JSON")
        .ok()
        .and_then(|v| v.parse::<bool>().ok())
        .unwrap_or(false);

    let level = parse_level(&level_str);
    if use_json {
        LoggingConfig {
            level,
            ..LoggingConfig::structured()
        }
    } else {
        LoggingConfig::with_level(level)
    }
}
