//! Presentation of extracted declarations
//!
//! The cube renderer produces a self-contained HTML page. Structured formats
//! (JSON, YAML, human text) live in `cli::output`.

pub mod cube;

pub use cube::CubeRenderer;

/// Escapes text for inclusion in HTML element content or attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
