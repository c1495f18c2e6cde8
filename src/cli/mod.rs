pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, Commands, ConfigArgs, ExtractionArgs, InspectArgs, RenderArgs};
pub use output::{OutputFormat, OutputFormatter};
