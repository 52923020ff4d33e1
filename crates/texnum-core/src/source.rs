//! Source positions and the mapping from working text back to the original file.
//!
//! Rules never scan the file exactly as it sits on disk. The host may strip
//! comments, expand macros or normalise whitespace first; the result is the
//! *working text*. Every [`Advisory`] must nevertheless point into the
//! *original* text, so a [`Document`] carries both plus a [`SourceMap`] that
//! translates working positions into source positions.

use crate::advisory::Advisory;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A zero-based line index and byte column.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A half-open range: `start` is inclusive, `end` is exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

/// Translates a position in the working text to a position in the original source.
///
/// Closures of type `Fn(Position) -> Position` implement this trait, which is
/// usually the easiest way to plug in a host-provided mapping.
pub trait SourceMap: Send + Sync {
    fn to_source(&self, working: Position) -> Position;
}

/// The mapping used when the working text is the original text, or differs
/// from it only after every mapped column (e.g. stripped line comments).
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityMap;

impl SourceMap for IdentityMap {
    fn to_source(&self, working: Position) -> Position {
        working
    }
}

impl<F> SourceMap for F
where
    F: Fn(Position) -> Position + Send + Sync,
{
    fn to_source(&self, working: Position) -> Position {
        self(working)
    }
}

/// A document under evaluation.
pub struct Document {
    resource: String,
    original: String,
    working: String,
    /// Byte offset of the first character of each original line.
    line_starts: Vec<usize>,
    map: Box<dyn SourceMap>,
}

impl Document {
    /// Creates a document whose working text is the original text.
    pub fn new(resource: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        Self::with_working_text(resource, text.clone(), text, IdentityMap)
    }

    /// Creates a document from an original text, a transformed working text
    /// and the mapping between the two.
    pub fn with_working_text(
        resource: impl Into<String>,
        original: impl Into<String>,
        working: impl Into<String>,
        map: impl SourceMap + 'static,
    ) -> Self {
        let original = original.into();
        let line_starts = std::iter::once(0)
            .chain(original.match_indices('\n').map(|(idx, _)| idx + 1))
            .collect();
        Self {
            resource: resource.into(),
            original,
            working: working.into(),
            line_starts,
            map: Box::new(map),
        }
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn original_text(&self) -> &str {
        &self.original
    }

    pub fn working_text(&self) -> &str {
        &self.working
    }

    /// Lines of the working text, in order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.working.lines()
    }

    /// Text of an original line without its line ending, or `""` past the end.
    pub fn original_line(&self, line: usize) -> &str {
        let Some(&start) = self.line_starts.get(line) else {
            return "";
        };
        let end = self
            .line_starts
            .get(line + 1)
            .copied()
            .unwrap_or(self.original.len());
        self.original[start..end].trim_end_matches(['\n', '\r'])
    }

    /// Byte offset of a source position from the start of the original text.
    ///
    /// Columns past the end of their line are clamped to the line end; lines
    /// past the end of the document map to the document length.
    pub fn original_offset(&self, position: Position) -> usize {
        match self.line_starts.get(position.line) {
            Some(&start) => start + position.column.min(self.original_line(position.line).len()),
            None => self.original.len(),
        }
    }

    pub fn to_source(&self, working: Position) -> Position {
        self.map.to_source(working)
    }

    /// Maps the byte span `start..end` of working line `line` into the source.
    pub fn map_range(&self, line: usize, start: usize, end: usize) -> Range {
        Range::new(
            self.to_source(Position::new(line, start)),
            self.to_source(Position::new(line, end)),
        )
    }

    /// Builds an advisory over a source range, capturing the original line
    /// text and base offset at the range start for rendering.
    pub fn advisory(&self, rule_id: &str, range: Range, message: &str) -> Advisory {
        Advisory {
            rule_id: rule_id.to_string(),
            range,
            message: message.to_string(),
            resource: self.resource.clone(),
            line: self.original_line(range.start.line).to_string(),
            offset: self.original_offset(range.start),
        }
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("resource", &self.resource)
            .field("lines", &self.line_starts.len())
            .finish_non_exhaustive()
    }
}

/// Removes `%` line comments from `text`.
///
/// Only text after an unescaped `%` is dropped, so every column before a
/// comment keeps its position and [`IdentityMap`] remains exact.
pub fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        let body_len = line.trim_end_matches(['\n', '\r']).len();
        let (body, ending) = line.split_at(body_len);
        match comment_start(body) {
            Some(idx) => out.push_str(&body[..idx]),
            None => out.push_str(body),
        }
        out.push_str(ending);
    }
    out
}

fn comment_start(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'%' => return Some(i),
            _ => i += 1,
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_original_line_and_offset() {
        let doc = Document::new("a.tex", "first\r\nsecond\nthird");
        assert_eq!(doc.original_line(0), "first");
        assert_eq!(doc.original_line(1), "second");
        assert_eq!(doc.original_line(2), "third");
        assert_eq!(doc.original_line(3), "");
        assert_eq!(doc.original_offset(Position::new(1, 2)), 9);
        assert_eq!(doc.original_offset(Position::new(2, 99)), 19);
        assert_eq!(doc.original_offset(Position::new(7, 0)), 19);
    }

    #[test]
    fn test_closure_source_map() {
        let doc = Document::with_working_text(
            "a.tex",
            "  padded",
            "padded",
            |p: Position| Position::new(p.line, p.column + 2),
        );
        let range = doc.map_range(0, 0, 3);
        assert_eq!(range.start, Position::new(0, 2));
        assert_eq!(range.end, Position::new(0, 5));

        let advisory = doc.advisory("x", range, "msg");
        assert_eq!(advisory.line, "  padded");
        assert_eq!(advisory.offset, 2);
    }

    #[test]
    fn test_strip_comments_keeps_columns() {
        let text = "We saw 3 cats. % 4 dogs\n50\\% of 7\r\n% whole line\n";
        let stripped = strip_comments(text);
        assert_eq!(stripped, "We saw 3 cats. \n50\\% of 7\r\n\n");
    }

    #[test]
    fn test_strip_comments_escaped_backslash() {
        // `\\%` is a line break followed by a real comment.
        assert_eq!(strip_comments(r"a \\% b"), r"a \\");
    }
}
