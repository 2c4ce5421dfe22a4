use bl_common::{Position, Span};

/// Character reader over BL source text that keeps line/column/offset
/// bookkeeping for spans.
pub struct Cursor<'src> {
    source: &'src str,
    file: String,
    pos: Position,
}

impl<'src> Cursor<'src> {
    pub fn new(source: &'src str, file: impl Into<String>) -> Self {
        Self {
            source,
            file: file.into(),
            pos: Position::default(),
        }
    }

    pub fn position(&self) -> Position {
        self.pos
    }

    fn rest(&self) -> &'src str {
        &self.source[self.pos.offset as usize..]
    }

    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos.offset += ch.len_utf8() as u32;
        if ch == '\n' {
            self.pos.line += 1;
            self.pos.column = 1;
        } else {
            self.pos.column += 1;
        }
        Some(ch)
    }

    pub fn is_eof(&self) -> bool {
        self.rest().is_empty()
    }

    pub fn eat_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&predicate) {
            self.advance();
        }
    }

    /// Source text between `start` and the current position.
    pub fn text_from(&self, start: Position) -> &'src str {
        &self.source[start.offset as usize..self.pos.offset as usize]
    }

    pub fn span_from(&self, start: Position) -> Span {
        Span::new(self.file.clone(), start, self.pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_lines_and_columns() {
        let mut cursor = Cursor::new("ab\ncd", "t.bl");
        cursor.advance();
        cursor.advance();
        cursor.advance();
        let pos = cursor.position();
        assert_eq!((pos.line, pos.column, pos.offset), (2, 1, 3));
        assert_eq!(cursor.peek(), Some('c'));
    }

    #[test]
    fn eat_while_stops_at_predicate_boundary() {
        let mut cursor = Cursor::new("next-is-wall DO", "t.bl");
        let start = cursor.position();
        cursor.eat_while(|c| c.is_ascii_alphanumeric() || c == '-');
        assert_eq!(cursor.text_from(start), "next-is-wall");
        assert!(!cursor.is_eof());
    }
}
