//! Brace-aware segmentation of Swift source text
//!
//! The scanner is a minimal tokenizer. It knows just enough about Swift to tell
//! code apart from comments and string literals, so that braces, semicolons and
//! keywords inside them never influence recognition.
//!
//! Output is an ordered list of [`Segment`]s. A segment is a physical line, cut
//! further at `;`, `{` and `}` when they appear in code. A newline inside an open
//! parenthesis does not cut, so multi-line parameter lists stay in one segment.
//! Blank segments are dropped, so an empty block leaves no segment behind; the
//! `opens_block` flag on the segment before it is the only trace it leaves.

/// One statement-sized slice of the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// 1-based line on which the segment starts
    pub line: usize,
    /// Brace depth at the start of the segment
    pub depth: usize,
    /// Verbatim source, starting at the first code byte, trailing whitespace trimmed
    pub text: String,
    /// Same byte range as `text` with comments and string contents blanked
    pub code: String,
    /// Same byte range as `text` with only comments blanked
    pub uncommented: String,
    /// A `{` follows this segment with nothing but whitespace or comments in between
    pub opens_block: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    LineComment,
    BlockComment(usize),
    Str,
    MultiLineStr,
}

/// Splits `source` into segments
pub fn scan(source: &str) -> Vec<Segment> {
    Scanner::new(source).run()
}

struct Scanner<'a> {
    source: &'a str,
    bytes: &'a [u8],
    /// comments and string contents blanked
    code: Vec<u8>,
    /// comments blanked
    uncommented: Vec<u8>,
    segments: Vec<Segment>,
    /// last segment not yet followed by `;`, `{` or `}`
    open_tail: Option<usize>,
    depth: usize,
    parens: usize,
    line: usize,
    start: usize,
    start_line: usize,
    start_depth: usize,
}

impl<'a> Scanner<'a> {
    fn new(source: &'a str) -> Self {
        let bytes = source.as_bytes();
        Self {
            source,
            bytes,
            code: bytes.to_vec(),
            uncommented: bytes.to_vec(),
            segments: Vec::new(),
            open_tail: None,
            depth: 0,
            parens: 0,
            line: 1,
            start: 0,
            start_line: 1,
            start_depth: 0,
        }
    }

    fn run(mut self) -> Vec<Segment> {
        let mut state = State::Code;
        let mut i = 0;

        while i < self.bytes.len() {
            let b = self.bytes[i];

            if b == b'\n' {
                if matches!(state, State::LineComment | State::Str) {
                    state = State::Code;
                }
                let keep_open = state == State::Code && self.parens > 0;
                if !keep_open {
                    self.flush(i);
                }
                self.line += 1;
                i += 1;
                if !keep_open {
                    self.restart(i);
                }
                continue;
            }

            match state {
                State::Code => match b {
                    b'/' if self.peek(i + 1) == Some(b'/') => {
                        self.blank_comment(i, 2);
                        state = State::LineComment;
                        i += 2;
                    }
                    b'/' if self.peek(i + 1) == Some(b'*') => {
                        self.blank_comment(i, 2);
                        state = State::BlockComment(1);
                        i += 2;
                    }
                    b'"' if self.bytes[i..].starts_with(b"\"\"\"") => {
                        state = State::MultiLineStr;
                        i += 3;
                    }
                    b'"' => {
                        state = State::Str;
                        i += 1;
                    }
                    b'(' => {
                        self.parens += 1;
                        i += 1;
                    }
                    b')' => {
                        self.parens = self.parens.saturating_sub(1);
                        i += 1;
                    }
                    b';' => {
                        self.flush(i);
                        self.open_tail = None;
                        i += 1;
                        self.restart(i);
                    }
                    b'{' => {
                        self.flush(i);
                        if let Some(idx) = self.open_tail.take() {
                            self.segments[idx].opens_block = true;
                        }
                        self.depth += 1;
                        self.parens = 0;
                        i += 1;
                        self.restart(i);
                    }
                    b'}' => {
                        self.flush(i);
                        self.open_tail = None;
                        self.depth = self.depth.saturating_sub(1);
                        self.parens = 0;
                        i += 1;
                        self.restart(i);
                    }
                    _ => i += 1,
                },
                State::LineComment => {
                    self.blank_comment(i, 1);
                    i += 1;
                }
                State::BlockComment(nesting) => {
                    if self.bytes[i..].starts_with(b"*/") {
                        self.blank_comment(i, 2);
                        state = if nesting == 1 {
                            State::Code
                        } else {
                            State::BlockComment(nesting - 1)
                        };
                        i += 2;
                    } else if self.bytes[i..].starts_with(b"/*") {
                        self.blank_comment(i, 2);
                        state = State::BlockComment(nesting + 1);
                        i += 2;
                    } else {
                        self.blank_comment(i, 1);
                        i += 1;
                    }
                }
                State::Str => {
                    if b == b'\\' && self.peek(i + 1).is_some_and(|n| n != b'\n') {
                        let len = 1 + self.char_len(i + 1);
                        self.blank_string(i, len);
                        i += len;
                    } else if b == b'"' {
                        state = State::Code;
                        i += 1;
                    } else {
                        self.blank_string(i, 1);
                        i += 1;
                    }
                }
                State::MultiLineStr => {
                    if self.bytes[i..].starts_with(b"\"\"\"") {
                        state = State::Code;
                        i += 3;
                    } else if b == b'\\' && self.peek(i + 1).is_some_and(|n| n != b'\n') {
                        let len = 1 + self.char_len(i + 1);
                        self.blank_string(i, len);
                        i += len;
                    } else {
                        self.blank_string(i, 1);
                        i += 1;
                    }
                }
            }
        }

        self.flush(self.bytes.len());
        self.segments
    }

    fn peek(&self, i: usize) -> Option<u8> {
        self.bytes.get(i).copied()
    }

    /// Byte length of the UTF-8 character starting at `i`
    fn char_len(&self, i: usize) -> usize {
        self.source
            .get(i..)
            .and_then(|rest| rest.chars().next())
            .map(char::len_utf8)
            .unwrap_or(1)
    }

    fn blank_comment(&mut self, at: usize, len: usize) {
        for i in at..(at + len).min(self.bytes.len()) {
            self.code[i] = b' ';
            self.uncommented[i] = b' ';
        }
    }

    fn blank_string(&mut self, at: usize, len: usize) {
        for i in at..(at + len).min(self.bytes.len()) {
            // line breaks stay so multi-line literals keep their shape
            if self.bytes[i] != b'\n' {
                self.code[i] = b' ';
            }
        }
    }

    fn restart(&mut self, at: usize) {
        self.start = at;
        self.start_line = self.line;
        self.start_depth = self.depth;
    }

    fn flush(&mut self, end: usize) {
        let range = &self.code[self.start..end];
        let Some(first) = range.iter().position(|b| !b.is_ascii_whitespace()) else {
            return;
        };
        let last = range
            .iter()
            .rposition(|b| !b.is_ascii_whitespace())
            .unwrap_or(first);

        let from = self.start + first;
        let code_end = self.start + last + 1;
        let text = self.source[from..end].trim_end().to_string();

        self.segments.push(Segment {
            line: self.start_line,
            depth: self.start_depth,
            text,
            code: String::from_utf8_lossy(&self.code[from..code_end]).into_owned(),
            uncommented: String::from_utf8_lossy(&self.uncommented[from..code_end]).into_owned(),
            opens_block: false,
        });
        self.open_tail = Some(self.segments.len() - 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(segments: &[Segment]) -> Vec<&str> {
        segments.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn test_lines_become_segments() {
        let segments = scan("struct A\n\nvar x: Int\n");
        assert_eq!(texts(&segments), vec!["struct A", "var x: Int"]);
        assert_eq!(segments[0].line, 1);
        assert_eq!(segments[1].line, 3);
    }

    #[test]
    fn test_braces_and_semicolons_cut() {
        let segments = scan("struct Point: Equatable { var x: Int; var y: Int }");
        assert_eq!(
            texts(&segments),
            vec!["struct Point: Equatable", "var x: Int", "var y: Int"]
        );
        assert_eq!(segments[0].depth, 0);
        assert_eq!(segments[1].depth, 1);
        assert_eq!(segments[2].depth, 1);
    }

    #[test]
    fn test_depth_tracks_nesting() {
        let source = "class A {\n    func f() {\n        let y = 1\n    }\n    var z = 2\n}\n";
        let segments = scan(source);
        let depths: Vec<(usize, &str)> = segments
            .iter()
            .map(|s| (s.depth, s.text.as_str()))
            .collect();
        assert_eq!(
            depths,
            vec![
                (0, "class A"),
                (1, "func f()"),
                (2, "let y = 1"),
                (1, "var z = 2"),
            ]
        );
    }

    #[test]
    fn test_opens_block_marks_segment_before_brace() {
        let segments = scan("class A { }\nstruct B\n// note\n{\n    var x = 1; var y = 2\n}\n");
        let flags: Vec<(&str, bool)> = segments
            .iter()
            .map(|s| (s.text.as_str(), s.opens_block))
            .collect();
        assert_eq!(
            flags,
            vec![
                ("class A", true),
                ("struct B", true),
                ("var x = 1", false),
                ("var y = 2", false),
            ]
        );
    }

    #[test]
    fn test_closing_brace_ends_open_tail() {
        let segments = scan("func f() {}\n{\n");
        assert_eq!(segments.len(), 1);
        assert!(segments[0].opens_block);

        let segments = scan("var x = 1 }\n{\n");
        assert!(!segments[0].opens_block);
    }

    #[test]
    fn test_comment_only_lines_are_dropped() {
        let segments = scan("// struct Fake {\n/* class\n Other { */\nclass Real");
        assert_eq!(texts(&segments), vec!["class Real"]);
        assert_eq!(segments[0].depth, 0);
    }

    #[test]
    fn test_nested_block_comments() {
        let segments = scan("/* outer /* inner */ still comment { */ struct S");
        assert_eq!(texts(&segments), vec!["struct S"]);
    }

    #[test]
    fn test_trailing_comment_kept_in_text_but_masked_in_code() {
        let segments = scan("var x: Int // the { x }");
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text, "var x: Int // the { x }");
        assert_eq!(segments[0].code, "var x: Int");
        assert_eq!(segments[0].depth, 0);
    }

    #[test]
    fn test_string_contents_masked() {
        let segments = scan(r#"let s = "struct { ; } \" class""#);
        assert_eq!(segments.len(), 1);
        assert!(!segments[0].code.contains("struct"));
        assert!(!segments[0].code.contains("class"));
        assert!(segments[0].uncommented.contains("struct { ; }"));
    }

    #[test]
    fn test_multiline_string_does_not_open_blocks() {
        let source = "let s = \"\"\"\n{ class\n\"\"\"\nvar after = 1";
        let segments = scan(source);
        let last = segments.last().unwrap();
        assert_eq!(last.text, "var after = 1");
        assert_eq!(last.depth, 0);
        assert!(segments.iter().all(|s| !s.code.contains("class")));
    }

    #[test]
    fn test_open_parenthesis_joins_lines() {
        let source = "func f(\n    a: Int,\n    b: Int\n) -> Int\nvar x = 1";
        let segments = scan(source);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].line, 1);
        assert!(segments[0].text.contains("b: Int"));
        assert_eq!(segments[1].line, 5);
    }

    #[test]
    fn test_unbalanced_closing_brace_saturates() {
        let segments = scan("}\n}\nstruct S");
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].depth, 0);
    }

    #[test]
    fn test_non_ascii_in_comments_and_strings() {
        let segments = scan("let s = \"héllo\" // naïve\nstruct Ünicode");
        assert_eq!(segments[0].text, "let s = \"héllo\" // naïve");
        assert_eq!(segments[1].text, "struct Ünicode");
        assert_eq!(segments[0].code.len(), segments[0].uncommented.len());
    }

    #[test]
    fn test_escaped_multibyte_character_keeps_views_aligned() {
        let segments = scan("let s = \"a\\é\"; var t = 1");
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].code.len(), segments[0].text.len());
        assert_eq!(segments[1].text, "var t = 1");
    }

    #[test]
    fn test_empty_input() {
        assert!(scan("").is_empty());
        assert!(scan("\n\n   \n").is_empty());
    }
}
