//! Utility modules for swiftcube
//!
//! Currently this is the structured logging setup.

pub mod logging;

pub use logging::{init_from_env, init_logging, LoggingConfig};
