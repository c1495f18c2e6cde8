use thiserror::Error;

/// Fatal extraction failures
///
/// Only kind and name resolution can fail. Everything else is best-effort and
/// degrades to an empty collection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("Could not determine declaration kind: no `struct` or `class` keyword found")]
    NoDeclarationFound,
    #[error("Could not determine declaration name: no identifier follows `{keyword}`")]
    NameNotFound { keyword: &'static str },
}
