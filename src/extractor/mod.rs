//! Structural extraction of Swift struct and class declarations
//!
//! The extractor reads the text of one declaration unit and produces a
//! DeclarationRecord: kind, name, supertypes, properties, methods and
//! initializers. It performs no I/O and keeps no state between calls.

pub mod declaration;
pub mod error;
pub(crate) mod patterns;
pub mod record;
pub mod scanner;

pub use declaration::{extract, DeclarationExtractor, ExtractorConfig, MemberScope};
pub use error::ExtractError;
pub use record::{DeclarationKind, DeclarationRecord};
pub use scanner::Segment;
