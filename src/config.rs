//! Configuration management for swiftcube
//!
//! Settings are loaded from environment variables with sensible defaults.
//! Command-line flags override whatever the environment provides.
//!
//! # Environment Variables
//!
//! - `SWIFTCUBE_SOURCE_EXTENSION`: Extension appended to bare input names - default: "swift"
//! - `SWIFTCUBE_OUTPUT_DIR`: Directory for generated cube pages - default: current directory
//! - `SWIFTCUBE_MEMBER_SCOPE`: Member scope (top-level|any-depth) - default: "top-level"
//! - `SWIFTCUBE_MAX_INPUT_SIZE`: Maximum input size in bytes - default: "1048576" (1MB)
//! - `SWIFTCUBE_LOG_LEVEL`: Logging level - default: "info"
//!
//! # Example
//!
//! ```no_run
//! use swiftcube::SwiftcubeConfig;
//!
//! let config = SwiftcubeConfig::default();
//! config.validate().expect("Invalid configuration");
//! let extractor = config.extractor();
//! ```

use crate::extractor::{DeclarationExtractor, ExtractorConfig, MemberScope};
use crate::fs::FileSystem;
use crate::source::{SourceLocator, DEFAULT_MAX_INPUT_SIZE, DEFAULT_SOURCE_EXTENSION};
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_LOG_LEVEL: &str = "info";
const MAX_INPUT_SIZE_CEILING: u64 = 64 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0}")]
    InvalidMemberScope(String),

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

#[derive(Debug, Clone)]
pub struct SwiftcubeConfig {
    /// Extension appended to input names that lack it (without the dot)
    pub source_extension: String,

    /// Where generated pages go; `None` means the current directory
    pub output_dir: Option<PathBuf>,

    pub member_scope: MemberScope,

    /// Inputs larger than this are rejected before reading
    pub max_input_size: u64,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for SwiftcubeConfig {
    /// Loads from `SWIFTCUBE_*` environment variables, falling back to defaults
    ///
    /// An unparsable member scope falls back to the default here; use
    /// [`SwiftcubeConfig::from_env`] to surface it as an error.
    fn default() -> Self {
        let source_extension = env::var("SWIFTCUBE_SOURCE_EXTENSION")
            .map(|v| v.trim_start_matches('.').to_string())
            .unwrap_or_else(|_| DEFAULT_SOURCE_EXTENSION.to_string());

        let output_dir = env::var("SWIFTCUBE_OUTPUT_DIR")
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let member_scope = env::var("SWIFTCUBE_MEMBER_SCOPE")
            .ok()
            .and_then(|v| v.parse::<MemberScope>().ok())
            .unwrap_or_default();

        let max_input_size = env::var("SWIFTCUBE_MAX_INPUT_SIZE")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_MAX_INPUT_SIZE);

        let log_level = env::var("SWIFTCUBE_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        Self {
            source_extension,
            output_dir,
            member_scope,
            max_input_size,
            log_level,
        }
    }
}

impl SwiftcubeConfig {
    /// Like `default()`, but rejects an unrecognized `SWIFTCUBE_MEMBER_SCOPE`
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Ok(raw) = env::var("SWIFTCUBE_MEMBER_SCOPE") {
            config.member_scope = raw
                .parse::<MemberScope>()
                .map_err(ConfigError::InvalidMemberScope)?;
        }
        Ok(config)
    }

    /// Checks numeric ranges and the log level
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_input_size == 0 {
            return Err(ConfigError::ValidationFailed(
                "Max input size must be at least 1 byte".to_string(),
            ));
        }
        if self.max_input_size > MAX_INPUT_SIZE_CEILING {
            return Err(ConfigError::ValidationFailed(
                "Max input size cannot exceed 64MB".to_string(),
            ));
        }

        if self.source_extension.contains(|c: char| c == '/' || c == '\\') {
            return Err(ConfigError::ValidationFailed(format!(
                "Invalid source extension: {}",
                self.source_extension
            )));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }

    pub fn extractor(&self) -> DeclarationExtractor {
        DeclarationExtractor::with_config(ExtractorConfig {
            member_scope: self.member_scope,
        })
    }

    pub fn source_locator<F: FileSystem>(&self, fs: F) -> SourceLocator<F> {
        SourceLocator::new(fs)
            .with_extension(self.source_extension.clone())
            .with_max_input_size(self.max_input_size)
    }

    pub fn to_display_map(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();

        map.insert(
            "source_extension".to_string(),
            self.source_extension.clone(),
        );
        if let Some(ref dir) = self.output_dir {
            map.insert("output_dir".to_string(), dir.display().to_string());
        }
        map.insert(
            "member_scope".to_string(),
            self.member_scope.as_str().to_string(),
        );
        map.insert(
            "max_input_size".to_string(),
            self.max_input_size.to_string(),
        );
        map.insert("log_level".to_string(), self.log_level.clone());

        map
    }
}

impl fmt::Display for SwiftcubeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Swiftcube Configuration:")?;
        writeln!(f, "  Source Extension: .{}", self.source_extension)?;
        match self.output_dir {
            Some(ref dir) => writeln!(f, "  Output Dir: {}", dir.display())?,
            None => writeln!(f, "  Output Dir: (current directory)")?,
        }
        writeln!(f, "  Member Scope: {}", self.member_scope)?;
        writeln!(f, "  Max Input Size: {} bytes", self.max_input_size)?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    /// Helper to temporarily set environment variables for testing
    struct EnvGuard {
        key: String,
        old_value: Option<String>,
    }

    impl EnvGuard {
        fn set(key: &str, value: &str) -> Self {
            let old_value = env::var(key).ok();
            env::set_var(key, value);
            Self {
                key: key.to_string(),
                old_value,
            }
        }

        fn remove(key: &str) -> Self {
            let old_value = env::var(key).ok();
            env::remove_var(key);
            Self {
                key: key.to_string(),
                old_value,
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.old_value {
                Some(v) => env::set_var(&self.key, v),
                None => env::remove_var(&self.key),
            }
        }
    }

    fn clear_env() -> Vec<EnvGuard> {
        [
            "SWIFTCUBE_SOURCE_EXTENSION",
            "SWIFTCUBE_OUTPUT_DIR",
            "SWIFTCUBE_MEMBER_SCOPE",
            "SWIFTCUBE_MAX_INPUT_SIZE",
            "SWIFTCUBE_LOG_LEVEL",
        ]
        .iter()
        .map(|k| EnvGuard::remove(k))
        .collect()
    }

    #[test]
    #[serial]
    fn test_default_configuration() {
        let _guards = clear_env();

        let config = SwiftcubeConfig::default();

        assert_eq!(config.source_extension, DEFAULT_SOURCE_EXTENSION);
        assert!(config.output_dir.is_none());
        assert_eq!(config.member_scope, MemberScope::TopLevel);
        assert_eq!(config.max_input_size, DEFAULT_MAX_INPUT_SIZE);
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_environment_variable_parsing() {
        let _cleared = clear_env();
        let _guards = vec![
            EnvGuard::set("SWIFTCUBE_SOURCE_EXTENSION", ".txt"),
            EnvGuard::set("SWIFTCUBE_OUTPUT_DIR", "/tmp/cubes"),
            EnvGuard::set("SWIFTCUBE_MEMBER_SCOPE", "any-depth"),
            EnvGuard::set("SWIFTCUBE_MAX_INPUT_SIZE", "2048"),
            EnvGuard::set("SWIFTCUBE_LOG_LEVEL", "DEBUG"),
        ];

        let config = SwiftcubeConfig::default();

        assert_eq!(config.source_extension, "txt");
        assert_eq!(config.output_dir, Some(PathBuf::from("/tmp/cubes")));
        assert_eq!(config.member_scope, MemberScope::AnyDepth);
        assert_eq!(config.max_input_size, 2048);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_bad_scope() {
        let _cleared = clear_env();
        let _guard = EnvGuard::set("SWIFTCUBE_MEMBER_SCOPE", "sideways");

        assert_eq!(
            SwiftcubeConfig::default().member_scope,
            MemberScope::TopLevel
        );
        let err = SwiftcubeConfig::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidMemberScope(_)));
        assert!(err.to_string().contains("sideways"));
    }

    #[test]
    #[serial]
    fn test_validation_invalid_values() {
        let _cleared = clear_env();

        let mut config = SwiftcubeConfig::default();
        config.max_input_size = 0;
        assert!(config.validate().is_err());

        let mut config = SwiftcubeConfig::default();
        config.log_level = "loud".to_string();
        assert!(config.validate().is_err());

        let mut config = SwiftcubeConfig::default();
        config.source_extension = "a/b".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_extractor_uses_scope() {
        let _cleared = clear_env();
        let source = "struct S {\n    func f() {\n        let local = 1\n    }\n}";

        let mut config = SwiftcubeConfig::default();
        assert!(config.extractor().extract(source).unwrap().properties.is_empty());

        config.member_scope = MemberScope::AnyDepth;
        let record = config.extractor().extract(source).unwrap();
        assert_eq!(record.properties, vec!["let local = 1"]);
    }

    #[test]
    #[serial]
    fn test_config_display_and_map() {
        let _cleared = clear_env();
        let config = SwiftcubeConfig::default();

        let display = format!("{}", config);
        assert!(display.contains("Swiftcube Configuration:"));
        assert!(display.contains("Member Scope: top-level"));

        let map = config.to_display_map();
        assert_eq!(map.get("source_extension"), Some(&"swift".to_string()));
        assert!(!map.contains_key("output_dir"));
    }
}
