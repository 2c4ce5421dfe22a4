use bl_common::DiagnosticBag;

use super::cursor::Cursor;
use super::token::{Token, TokenKind, TokenQueue};

/// Splits BL source into tokens.
///
/// A token is a maximal run of letters, digits and `-`, or any other
/// single non-whitespace character. Whitespace only separates tokens.
/// Unrecognized lexemes become `Error` tokens plus an error diagnostic;
/// the parser rejects them wherever they show up.
pub struct Tokenizer<'src> {
    cursor: Cursor<'src>,
    diagnostics: DiagnosticBag,
}

impl<'src> Tokenizer<'src> {
    pub fn new(source: &'src str, file: impl Into<String>) -> Self {
        Self {
            cursor: Cursor::new(source, file),
            diagnostics: DiagnosticBag::new(),
        }
    }

    /// Tokenize the entire source. The queue always ends with one `Eof` token.
    pub fn tokenize(mut self) -> (TokenQueue, DiagnosticBag) {
        let mut tokens = TokenQueue::new();
        loop {
            let token = self.next_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push_back(token);
            if is_eof {
                break;
            }
        }
        (tokens, self.diagnostics)
    }

    fn next_token(&mut self) -> Token {
        self.cursor.eat_while(|c| c.is_whitespace());

        let start = self.cursor.position();
        let Some(first) = self.cursor.advance() else {
            return Token::eof(self.cursor.span_from(start));
        };
        if is_word_char(first) {
            self.cursor.eat_while(is_word_char);
        }

        let token = Token::new(self.cursor.text_from(start), self.cursor.span_from(start));
        if token.kind == TokenKind::Error {
            self.diagnostics.error(
                format!("illegal token \"{}\"", token.lexeme),
                token.span.clone(),
            );
        }
        token
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-'
}
