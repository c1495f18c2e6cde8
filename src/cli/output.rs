//! Output formatting for extracted declarations
//!
//! Provides JSON, YAML and human-readable renderings of a [`DeclarationRecord`].
//!
//! # Example
//!
//! ```
//! use swiftcube::cli::output::{OutputFormat, OutputFormatter};
//!
//! let record = swiftcube::extract("struct Point { var x: Int }").unwrap();
//! let output = OutputFormatter::new(OutputFormat::Json).format(&record).unwrap();
//! assert!(output.contains("\"name\": \"Point\""));
//! ```

use anyhow::{Context, Result};

use crate::config::SwiftcubeConfig;
use crate::extractor::DeclarationRecord;

const RULE: &str = "\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format
    Yaml,
    /// Human-readable tree
    Human,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self, record: &DeclarationRecord) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_json(record),
            OutputFormat::Yaml => self.format_yaml(record),
            OutputFormat::Human => self.format_human(record),
        }
    }

    pub fn format_config(&self, config: &SwiftcubeConfig) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(&config.to_display_map())
                .context("Failed to serialize config to JSON"),
            OutputFormat::Yaml => serde_yaml::to_string(&config.to_display_map())
                .context("Failed to serialize config to YAML"),
            OutputFormat::Human => Ok(config.to_string()),
        }
    }

    fn format_json(&self, record: &DeclarationRecord) -> Result<String> {
        serde_json::to_string_pretty(record).context("Failed to serialize declaration to JSON")
    }

    fn format_yaml(&self, record: &DeclarationRecord) -> Result<String> {
        serde_yaml::to_string(record).context("Failed to serialize declaration to YAML")
    }

    fn format_human(&self, record: &DeclarationRecord) -> Result<String> {
        let mut output = String::new();

        output.push_str(&format!(
            "\u{2713} {} {}\n",
            record.kind.label(),
            record.name
        ));
        output.push_str(RULE);
        output.push_str("\n\n");

        push_section(&mut output, "Supertypes", &record.supertypes);
        push_section(&mut output, "Properties", &record.properties);
        push_section(&mut output, "Methods", &record.methods);
        push_section(&mut output, "Initializers", &record.initializers);

        output.push_str(&format!("{} members\n", record.member_count()));

        Ok(output)
    }
}

fn push_section(output: &mut String, title: &str, entries: &[String]) {
    output.push_str(&format!("{}:\n", title));
    if entries.is_empty() {
        output.push_str("\u{2514}\u{2500} (none)\n\n");
        return;
    }
    for (i, entry) in entries.iter().enumerate() {
        let connector = if i == entries.len() - 1 {
            "\u{2514}"
        } else {
            "\u{251C}"
        };
        output.push_str(&format!("{}\u{2500} {}\n", connector, entry));
    }
    output.push('\n');
}
