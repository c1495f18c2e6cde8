use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Structural extraction and 3D cube visualization for Swift declarations
#[derive(Parser, Debug)]
#[command(
    name = "swiftcube",
    about = "Structural extraction and 3D cube visualization for Swift declarations",
    version,
    author,
    long_about = "swiftcube scans a Swift source file holding a single struct or class \
                  declaration, extracts its name, supertypes, properties, methods and \
                  initializers, and renders them as an interactive 3D cube web page."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Render declarations as 3D cube HTML pages",
        long_about = "Extracts the declaration in each file and writes \
                      <keyword>_<Name>_3d_cube.html into the working directory \
                      (or into --output-dir).\n\n\
                      Examples:\n  \
                      swiftcube render Point\n  \
                      swiftcube render Animal.swift Point.swift -o site/"
    )]
    Render(RenderArgs),

    #[command(
        about = "Print the extracted declaration",
        long_about = "Extracts the declaration in a file and prints it to stdout.\n\n\
                      Examples:\n  \
                      swiftcube inspect Point\n  \
                      swiftcube inspect Animal.swift --format json"
    )]
    Inspect(InspectArgs),

    #[command(
        about = "Show the effective configuration",
        long_about = "Prints the configuration assembled from SWIFTCUBE_* environment \
                      variables and defaults.\n\n\
                      Examples:\n  \
                      swiftcube config\n  \
                      swiftcube config --format json"
    )]
    Config(ConfigArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct RenderArgs {
    #[arg(
        value_name = "FILES",
        required = true,
        help = "Source files (the .swift extension may be omitted)"
    )]
    pub files: Vec<PathBuf>,

    #[arg(
        short = 'o',
        long,
        value_name = "DIR",
        help = "Directory for generated pages (defaults to the current directory)"
    )]
    pub output_dir: Option<PathBuf>,

    #[arg(
        long,
        value_name = "LANG",
        default_value = "en",
        help = "Value of the page's lang attribute"
    )]
    pub lang: String,

    #[command(flatten)]
    pub extraction: ExtractionArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct InspectArgs {
    #[arg(value_name = "FILE", help = "Source file (the .swift extension may be omitted)")]
    pub file: PathBuf,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[command(flatten)]
    pub extraction: ExtractionArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct ConfigArgs {
    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

/// Flags shared by every command that extracts a declaration
#[derive(Parser, Debug, Clone, Default)]
pub struct ExtractionArgs {
    #[arg(
        long,
        help = "Report members at any nesting depth instead of only the declaration body"
    )]
    pub any_depth: bool,

    #[arg(
        long,
        value_name = "EXT",
        help = "Extension appended to inputs that lack it (default: swift)"
    )]
    pub extension: Option<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
