use std::fmt;
use std::ops::Range;

/// A location in a BL source file.
///
/// Lines and columns are 1-based; `offset` is the 0-based byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
    pub offset: u32,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            line: 1,
            column: 1,
            offset: 0,
        }
    }
}

/// The source range covered by a token, `start` inclusive and `end` exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Span {
    pub file: String,
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(file: impl Into<String>, start: Position, end: Position) -> Self {
        Self {
            file: file.into(),
            start,
            end,
        }
    }

    /// Span for tokens built by hand (tests, synthesized end-of-input).
    pub fn dummy() -> Self {
        Self {
            file: String::new(),
            start: Position::default(),
            end: Position::default(),
        }
    }

    /// Byte range of the span, never empty so a label always has something to point at.
    pub fn byte_range(&self) -> Range<usize> {
        let start = self.start.offset as usize;
        let end = (self.end.offset as usize).max(start + 1);
        start..end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.start)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
