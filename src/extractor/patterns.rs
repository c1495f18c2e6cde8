//! Compiled recognition patterns and small delimiter helpers
//!
//! All patterns run against the masked `code` view of a segment, so comments and
//! string contents are already blanked out.

use crate::extractor::record::DeclarationKind;
use regex::Regex;
use std::sync::OnceLock;

/// Declaration modifiers and attributes that may precede a member keyword
const MODIFIER: &str = r"(?:@\w+(?:\([^)]*\))?|(?:private|fileprivate|internal|public|open|package)(?:\(\s*set\s*\))?|static|class|final|lazy|weak|unowned(?:\(\s*(?:safe|unsafe)\s*\))?|override|dynamic|mutating|nonmutating|convenience|required|optional|nonisolated|isolated|distributed)";

pub(crate) fn kind_keyword() -> &'static Regex {
    static KIND: OnceLock<Regex> = OnceLock::new();
    KIND.get_or_init(|| Regex::new(r"\b(class|struct)\b").expect("valid kind regex"))
}

/// `<keyword>\s+<identifier>` for the given kind
pub(crate) fn header(kind: DeclarationKind) -> &'static Regex {
    static STRUCT_HEADER: OnceLock<Regex> = OnceLock::new();
    static CLASS_HEADER: OnceLock<Regex> = OnceLock::new();

    let cell = match kind {
        DeclarationKind::ValueType => &STRUCT_HEADER,
        DeclarationKind::ReferenceType => &CLASS_HEADER,
    };
    cell.get_or_init(|| {
        Regex::new(&format!(r"\b{}\s+(\w+)", kind.keyword())).expect("valid header regex")
    })
}

pub(crate) fn property() -> &'static Regex {
    static PROPERTY: OnceLock<Regex> = OnceLock::new();
    PROPERTY.get_or_init(|| {
        Regex::new(&format!(r"^(?:{MODIFIER}\s+)*(?:var|let)\s+(\w+)"))
            .expect("valid property regex")
    })
}

/// Matches up to and including the opening parenthesis of the parameter list
pub(crate) fn method() -> &'static Regex {
    static METHOD: OnceLock<Regex> = OnceLock::new();
    METHOD.get_or_init(|| {
        Regex::new(&format!(
            r"^(?:{MODIFIER}\s+)*func\s+(\w+)\s*(<[^(]*>)?\s*\("
        ))
        .expect("valid method regex")
    })
}

/// Matches up to and including the opening parenthesis of the parameter list
pub(crate) fn initializer() -> &'static Regex {
    static INITIALIZER: OnceLock<Regex> = OnceLock::new();
    INITIALIZER.get_or_init(|| {
        Regex::new(&format!(r"^(?:{MODIFIER}\s+)*init\s*[?!]?\s*(?:<[^(]*>)?\s*\("))
            .expect("valid initializer regex")
    })
}

/// Any segment that starts with the initializer keyword, with or without a parameter list
pub(crate) fn initializer_keyword() -> &'static Regex {
    static INIT_KEYWORD: OnceLock<Regex> = OnceLock::new();
    INIT_KEYWORD.get_or_init(|| {
        Regex::new(&format!(r"^(?:{MODIFIER}\s+)*init\b")).expect("valid init keyword regex")
    })
}

pub(crate) fn where_clause() -> &'static Regex {
    static WHERE: OnceLock<Regex> = OnceLock::new();
    WHERE.get_or_init(|| Regex::new(r"\bwhere\b").expect("valid where regex"))
}

pub(crate) fn effect() -> &'static Regex {
    static EFFECT: OnceLock<Regex> = OnceLock::new();
    EFFECT.get_or_init(|| Regex::new(r"\b(async|rethrows|throws)\b").expect("valid effect regex"))
}

/// Returns the index of the delimiter closing the one at `open`
pub(crate) fn matching_close(code: &str, open: usize) -> Option<usize> {
    let bytes = code.as_bytes();
    let (opener, closer) = match bytes.get(open)? {
        b'(' => (b'(', b')'),
        b'<' => (b'<', b'>'),
        b'[' => (b'[', b']'),
        _ => return None,
    };

    let mut depth = 0usize;
    for (i, &b) in bytes.iter().enumerate().skip(open) {
        if b == opener {
            depth += 1;
        } else if b == closer {
            // `->` inside a generic clause is not a closing angle bracket
            if closer == b'>' && i > 0 && bytes[i - 1] == b'-' {
                continue;
            }
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}

/// Splits on commas that are not nested inside `<>`, `()` or `[]`
pub(crate) fn split_top_level(text: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut current = String::new();
    let mut prev = '\0';

    for c in text.chars() {
        match c {
            '<' | '(' | '[' => depth += 1,
            '>' if prev != '-' => depth -= 1,
            ')' | ']' => depth -= 1,
            ',' if depth <= 0 => {
                parts.push(std::mem::take(&mut current));
                prev = c;
                continue;
            }
            _ => {}
        }
        current.push(c);
        prev = c;
    }
    parts.push(current);

    parts
        .into_iter()
        .map(|p| collapse_whitespace(&p))
        .filter(|p| !p.is_empty())
        .collect()
}

/// Collapses every whitespace run (including line breaks) into a single space
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
