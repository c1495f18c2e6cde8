//! Declaration extractor - structural recognition of a single struct or class
//!
//! Recognition runs in a fixed order over the scanned segments:
//!
//! 1. kind: the first segment with a `struct` or `class` keyword (the defining segment)
//! 2. name: the first identifier following that keyword
//! 3. supertypes: the `: A, B` clause of the defining segment
//! 4. members: properties, methods and initializers of the declaration body
//!
//! Only kind and name are mandatory. Everything else degrades to an empty list.

use crate::extractor::error::ExtractError;
use crate::extractor::patterns;
use crate::extractor::record::{DeclarationKind, DeclarationRecord};
use crate::extractor::scanner::{self, Segment};
use std::fmt;
use std::ops::Range;
use std::str::FromStr;
use tracing::{debug, trace};

/// Which segments are considered member declarations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MemberScope {
    /// Only the declaration's immediate body, skipping nested types, method bodies and closures
    #[default]
    TopLevel,
    /// Every segment except the defining one, regardless of nesting
    AnyDepth,
}

impl MemberScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberScope::TopLevel => "top-level",
            MemberScope::AnyDepth => "any-depth",
        }
    }
}

impl FromStr for MemberScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "top-level" | "toplevel" => Ok(MemberScope::TopLevel),
            "any-depth" | "anydepth" => Ok(MemberScope::AnyDepth),
            _ => Err(format!(
                "Invalid member scope: {}. Valid options: top-level, any-depth",
                s
            )),
        }
    }
}

impl fmt::Display for MemberScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractorConfig {
    pub member_scope: MemberScope,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Member {
    Property(String),
    Method(String),
    Initializer(String),
}

/// Extracts a [`DeclarationRecord`] from the text of one declaration unit
///
/// The extractor holds no state between calls and can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct DeclarationExtractor {
    config: ExtractorConfig,
}

impl DeclarationExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ExtractorConfig) -> Self {
        Self { config }
    }

    pub fn with_scope(member_scope: MemberScope) -> Self {
        Self::with_config(ExtractorConfig { member_scope })
    }

    /// Runs every recognition rule over `source`
    ///
    /// Returns a complete record, or an error if no kind or name can be resolved.
    pub fn extract(&self, source: &str) -> Result<DeclarationRecord, ExtractError> {
        let segments = scanner::scan(source);
        trace!(segments = segments.len(), "Scanned source");

        let (defining, kind) = resolve_kind(&segments)?;
        let name = resolve_name(&segments, kind)?;
        let supertypes = extract_supertypes(&segments[defining], kind, &name);

        let mut record = DeclarationRecord {
            kind,
            name,
            supertypes,
            properties: Vec::new(),
            methods: Vec::new(),
            initializers: Vec::new(),
        };

        for segment in self.member_segments(&segments, defining) {
            match classify(segment) {
                Some(Member::Property(text)) => {
                    debug!(line = segment.line, property = %text, "Recognized property");
                    record.properties.push(text);
                }
                Some(Member::Method(signature)) => {
                    debug!(line = segment.line, method = %signature, "Recognized method");
                    record.methods.push(signature);
                }
                Some(Member::Initializer(signature)) => {
                    debug!(line = segment.line, initializer = %signature, "Recognized initializer");
                    record.initializers.push(signature);
                }
                None => {}
            }
        }

        debug!(
            kind = %record.kind,
            name = %record.name,
            supertypes = record.supertypes.len(),
            properties = record.properties.len(),
            methods = record.methods.len(),
            initializers = record.initializers.len(),
            "Extracted declaration"
        );

        Ok(record)
    }

    fn member_segments<'s>(&self, segments: &'s [Segment], defining: usize) -> Vec<&'s Segment> {
        match self.config.member_scope {
            MemberScope::AnyDepth => segments
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != defining)
                .map(|(_, s)| s)
                .collect(),
            MemberScope::TopLevel => top_level_members(segments, defining),
        }
    }
}

/// Extracts with the default configuration
pub fn extract(source: &str) -> Result<DeclarationRecord, ExtractError> {
    DeclarationExtractor::new().extract(source)
}

fn resolve_kind(segments: &[Segment]) -> Result<(usize, DeclarationKind), ExtractError> {
    segments
        .iter()
        .enumerate()
        .find_map(|(i, segment)| {
            let caps = patterns::kind_keyword().captures(&segment.code)?;
            DeclarationKind::from_keyword(&caps[1]).map(|kind| (i, kind))
        })
        .ok_or(ExtractError::NoDeclarationFound)
}

fn resolve_name(segments: &[Segment], kind: DeclarationKind) -> Result<String, ExtractError> {
    segments
        .iter()
        .find_map(|segment| {
            patterns::header(kind)
                .captures(&segment.code)
                .map(|caps| caps[1].to_string())
        })
        .ok_or(ExtractError::NameNotFound {
            keyword: kind.keyword(),
        })
}

fn extract_supertypes(defining: &Segment, kind: DeclarationKind, name: &str) -> Vec<String> {
    let code = defining.code.as_str();
    let Some(ident) = patterns::header(kind)
        .captures(code)
        .and_then(|caps| caps.get(1))
    else {
        return Vec::new();
    };
    if ident.as_str() != name {
        return Vec::new();
    }

    let mut pos = skip_whitespace(code, ident.end());
    if code[pos..].starts_with('<') {
        match patterns::matching_close(code, pos) {
            Some(close) => pos = skip_whitespace(code, close + 1),
            None => return Vec::new(),
        }
    }
    if !code[pos..].starts_with(':') {
        return Vec::new();
    }

    let start = pos + 1;
    let end = patterns::where_clause()
        .find(&code[start..])
        .map(|m| start + m.start())
        .unwrap_or(code.len());

    patterns::split_top_level(view(defining, start..end))
}

/// Segments forming the declaration's immediate body
///
/// The body is the block opened by the defining segment, or by a header
/// continuation line (such as a wrapped `where` clause) before any member
/// appears. An empty body yields nothing, even when more code follows it. If
/// no block opens before a member declaration, the input is a flat fragment
/// and the segments at the header's own depth are used.
fn top_level_members(segments: &[Segment], defining: usize) -> Vec<&Segment> {
    let header_depth = segments[defining].depth;
    let rest = &segments[defining + 1..];

    let body_start = if segments[defining].opens_block {
        Some(0)
    } else {
        rest.iter()
            .take_while(|s| s.depth == header_depth && classify(s).is_none())
            .position(|s| s.opens_block)
            .map(|k| k + 1)
    };

    match body_start {
        Some(k) => rest[k..]
            .iter()
            .take_while(|s| s.depth > header_depth)
            .filter(|s| s.depth == header_depth + 1)
            .collect(),
        None => rest
            .iter()
            .take_while(|s| s.depth >= header_depth)
            .filter(|s| s.depth == header_depth)
            .collect(),
    }
}

/// Classifies a segment as at most one kind of member
///
/// Initializers take precedence: a segment starting with `init` is never a method.
fn classify(segment: &Segment) -> Option<Member> {
    let code = segment.code.as_str();

    if let Some(head) = patterns::initializer().find(code) {
        let params = parameters(segment, head.end() - 1)?;
        return Some(Member::Initializer(format!("init({})", params.text)));
    }
    if patterns::initializer_keyword().is_match(code) {
        return None;
    }

    if let Some(caps) = patterns::method().captures(code) {
        let head = caps.get(0)?;
        let params = parameters(segment, head.end() - 1)?;
        let generics = caps
            .get(2)
            .map(|g| patterns::collapse_whitespace(view(segment, g.range())))
            .unwrap_or_default();
        let signature = format!(
            "{}{}({}){}",
            &caps[1],
            generics,
            params.text,
            signature_tail(segment, params.close + 1)
        );
        return Some(Member::Method(signature));
    }

    if patterns::property().is_match(code) {
        return Some(Member::Property(property_text(segment)));
    }

    None
}

/// Source text of a property declaration, kept on one line
///
/// A trailing `=` is dropped when the initializer is a closure cut off at its `{`.
/// Text spanning lines inside parentheses is comment-free and whitespace-collapsed.
fn property_text(segment: &Segment) -> String {
    let closure = segment.opens_block && segment.code.ends_with('=');
    let end = segment.code.len() - usize::from(closure);

    if segment.text.contains('\n') {
        patterns::collapse_whitespace(view(segment, 0..end))
    } else if closure {
        segment.text[..end].trim_end().to_string()
    } else {
        segment.text.clone()
    }
}

struct Parameters {
    text: String,
    close: usize,
}

fn parameters(segment: &Segment, open: usize) -> Option<Parameters> {
    let close = patterns::matching_close(&segment.code, open)?;
    Some(Parameters {
        text: patterns::collapse_whitespace(view(segment, open + 1..close)),
        close,
    })
}

/// Effects and return annotation following the parameter list, e.g. ` async throws -> Data`
fn signature_tail(segment: &Segment, from: usize) -> String {
    let code = segment.code.as_str();
    if from >= code.len() {
        return String::new();
    }

    let end = patterns::where_clause()
        .find(&code[from..])
        .map(|m| from + m.start())
        .unwrap_or(code.len());
    let tail = &code[from..end];
    let arrow = tail.find("->");

    let mut out = String::new();
    let effects = &tail[..arrow.unwrap_or(tail.len())];
    for effect in patterns::effect().find_iter(effects) {
        out.push(' ');
        out.push_str(effect.as_str());
    }

    if let Some(arrow) = arrow {
        let return_type =
            patterns::collapse_whitespace(view(segment, from + arrow + 2..end));
        if !return_type.is_empty() {
            out.push_str(" -> ");
            out.push_str(&return_type);
        }
    }

    out
}

/// Comment-free source for a byte range found in the masked code
fn view(segment: &Segment, range: Range<usize>) -> &str {
    segment
        .uncommented
        .get(range.clone())
        .unwrap_or_else(|| &segment.code[range])
}

fn skip_whitespace(code: &str, from: usize) -> usize {
    code[from..]
        .find(|c: char| !c.is_whitespace())
        .map(|offset| from + offset)
        .unwrap_or(code.len())
}
