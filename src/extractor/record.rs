//! Declaration record types
//!
//! A [`DeclarationRecord`] is the only thing the extractor hands to its callers.
//! It is built once, never mutated, and serializes cleanly for the structured
//! output formats.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a declaration is a value type (`struct`) or a reference type (`class`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeclarationKind {
    #[serde(rename = "struct")]
    ValueType,
    #[serde(rename = "class")]
    ReferenceType,
}

impl DeclarationKind {
    /// Source keyword introducing this kind of declaration
    pub fn keyword(&self) -> &'static str {
        match self {
            DeclarationKind::ValueType => "struct",
            DeclarationKind::ReferenceType => "class",
        }
    }

    /// Capitalized keyword, used for titles
    pub fn label(&self) -> &'static str {
        match self {
            DeclarationKind::ValueType => "Struct",
            DeclarationKind::ReferenceType => "Class",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "struct" => Some(DeclarationKind::ValueType),
            "class" => Some(DeclarationKind::ReferenceType),
            _ => None,
        }
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Structural description of a single struct or class declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationRecord {
    pub kind: DeclarationKind,
    pub name: String,
    /// Declared superclass and conformances, in source order
    pub supertypes: Vec<String>,
    /// Verbatim trimmed stored-property declarations
    pub properties: Vec<String>,
    /// Normalized method signatures, e.g. `speak() -> String`
    pub methods: Vec<String>,
    /// Normalized initializer signatures, e.g. `init(name: String)`
    pub initializers: Vec<String>,
}

impl DeclarationRecord {
    /// Total number of recognized members
    pub fn member_count(&self) -> usize {
        self.properties.len() + self.methods.len() + self.initializers.len()
    }

    /// `struct Point` / `class Animal`
    pub fn header(&self) -> String {
        format!("{} {}", self.kind.keyword(), self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DeclarationRecord {
        DeclarationRecord {
            kind: DeclarationKind::ValueType,
            name: "Point".to_string(),
            supertypes: vec!["Equatable".to_string()],
            properties: vec!["var x: Int".to_string(), "var y: Int".to_string()],
            methods: vec!["length() -> Double".to_string()],
            initializers: vec![],
        }
    }

    #[test]
    fn test_kind_keywords() {
        assert_eq!(DeclarationKind::ValueType.keyword(), "struct");
        assert_eq!(DeclarationKind::ReferenceType.keyword(), "class");
        assert_eq!(DeclarationKind::ReferenceType.label(), "Class");
        assert_eq!(DeclarationKind::ValueType.to_string(), "struct");
    }

    #[test]
    fn test_kind_from_keyword() {
        assert_eq!(
            DeclarationKind::from_keyword("class"),
            Some(DeclarationKind::ReferenceType)
        );
        assert_eq!(
            DeclarationKind::from_keyword("struct"),
            Some(DeclarationKind::ValueType)
        );
        assert_eq!(DeclarationKind::from_keyword("enum"), None);
    }

    #[test]
    fn test_kind_serializes_as_keyword() {
        let json = serde_json::to_string(&DeclarationKind::ReferenceType).unwrap();
        assert_eq!(json, "\"class\"");
    }

    #[test]
    fn test_record_json_shape() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["kind"], "struct");
        assert_eq!(value["name"], "Point");
        assert_eq!(value["properties"][1], "var y: Int");
        assert!(value["initializers"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_member_count_and_header() {
        let record = sample();
        assert_eq!(record.member_count(), 3);
        assert_eq!(record.header(), "struct Point");
    }
}
