//! swiftcube - structural extraction and 3D visualization of Swift declarations
//!
//! Given the source text of a single Swift `struct` or `class` declaration, the
//! extractor produces a [`DeclarationRecord`]: the kind, name, supertypes, stored
//! properties, method signatures and initializer signatures. Recognition is a
//! brace-aware structural scan, not a parse; it never type-checks anything.
//!
//! # Example
//!
//! ```
//! use swiftcube::{extract, CubeRenderer, DeclarationKind};
//!
//! let record = extract("struct Point: Equatable, Hashable { var x: Int; var y: Int }").unwrap();
//! assert_eq!(record.kind, DeclarationKind::ValueType);
//! assert_eq!(record.name, "Point");
//! assert_eq!(record.supertypes, vec!["Equatable", "Hashable"]);
//! assert_eq!(record.properties, vec!["var x: Int", "var y: Int"]);
//!
//! let html = CubeRenderer::new().render(&record);
//! assert!(html.contains("Struct Point"));
//! ```
//!
//! # Project Structure
//!
//! - [`extractor`]: source scanning and declaration recognition
//! - [`source`]: input path resolution and loading
//! - [`render`]: the 3D cube page
//! - [`cli`]: command-line parsing, handlers and structured output

pub mod cli;
pub mod config;
pub mod extractor;
pub mod fs;
pub mod render;
pub mod source;
pub mod util;

pub use cli::output::{OutputFormat, OutputFormatter};
pub use config::{ConfigError, SwiftcubeConfig};
pub use extractor::{
    extract, DeclarationExtractor, DeclarationKind, DeclarationRecord, ExtractError,
    ExtractorConfig, MemberScope,
};
pub use render::CubeRenderer;
pub use source::{SourceError, SourceFile, SourceLocator};
pub use util::{init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
