use std::collections::VecDeque;
use std::fmt;

use bl_common::Span;

/// Lexeme of the token that terminates every token stream.
pub const END_OF_INPUT: &str = "### END OF INPUT ###";

/// Condition literals as they appear in source.
const CONDITIONS: [&str; 10] = [
    "next-is-empty",
    "next-is-not-empty",
    "next-is-wall",
    "next-is-not-wall",
    "next-is-friend",
    "next-is-not-friend",
    "next-is-enemy",
    "next-is-not-enemy",
    "random",
    "true",
];

/// Tokens are consumed from the front; the last one is always `Eof`.
pub type TokenQueue = VecDeque<Token>;

/// A single token produced by the tokenizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    /// Classify `lexeme` and build a token for it.
    pub fn new(lexeme: impl Into<String>, span: Span) -> Self {
        let lexeme = lexeme.into();
        Self {
            kind: TokenKind::classify(&lexeme),
            lexeme,
            span,
        }
    }

    pub fn eof(span: Span) -> Self {
        Self {
            kind: TokenKind::Eof,
            lexeme: END_OF_INPUT.to_string(),
            span,
        }
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.kind == TokenKind::Keyword(keyword)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => f.write_str("end of input"),
            _ => write!(f, "\"{}\"", self.lexeme),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword(Keyword),
    Condition,
    Identifier,
    /// Anything the language does not recognize, e.g. `$` or `9lives`.
    Error,
    Eof,
}

impl TokenKind {
    fn classify(lexeme: &str) -> TokenKind {
        if let Some(keyword) = Keyword::from_lexeme(lexeme) {
            TokenKind::Keyword(keyword)
        } else if is_condition(lexeme) {
            TokenKind::Condition
        } else if is_identifier(lexeme) {
            TokenKind::Identifier
        } else {
            TokenKind::Error
        }
    }
}

/// Reserved words of BL. Keywords are upper case; `if` is an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Program,
    Is,
    Instruction,
    Begin,
    End,
    If,
    Then,
    Else,
    While,
    Do,
}

impl Keyword {
    pub fn from_lexeme(s: &str) -> Option<Keyword> {
        match s {
            "PROGRAM" => Some(Keyword::Program),
            "IS" => Some(Keyword::Is),
            "INSTRUCTION" => Some(Keyword::Instruction),
            "BEGIN" => Some(Keyword::Begin),
            "END" => Some(Keyword::End),
            "IF" => Some(Keyword::If),
            "THEN" => Some(Keyword::Then),
            "ELSE" => Some(Keyword::Else),
            "WHILE" => Some(Keyword::While),
            "DO" => Some(Keyword::Do),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Program => "PROGRAM",
            Keyword::Is => "IS",
            Keyword::Instruction => "INSTRUCTION",
            Keyword::Begin => "BEGIN",
            Keyword::End => "END",
            Keyword::If => "IF",
            Keyword::Then => "THEN",
            Keyword::Else => "ELSE",
            Keyword::While => "WHILE",
            Keyword::Do => "DO",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn is_keyword(s: &str) -> bool {
    Keyword::from_lexeme(s).is_some()
}

pub fn is_condition(s: &str) -> bool {
    CONDITIONS.contains(&s)
}

/// A letter followed by letters, digits and `-`, that is not a keyword
/// or a condition.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    starts_with_letter
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
        && !is_keyword(s)
        && !is_condition(s)
}
