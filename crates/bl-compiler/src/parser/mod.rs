mod program;
mod statements;

use std::mem;

use bl_common::DiagnosticBag;

use crate::ast::{Condition, Program, Statement};
use crate::error::{CompileError, ParseError, ParseResult};
use crate::lexer::{Keyword, Token, TokenKind, TokenQueue, Tokenizer};

/// How many IF/WHILE statements may enclose one another.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Recursive descent parser for BL.
///
/// Works directly on the caller's token queue: every successful parse
/// removes exactly the tokens it consumed from the front, and never
/// consumes the trailing end-of-input token. There is no error recovery;
/// the first grammar violation is returned. Warnings are collected on the
/// side and do not stop the parse.
pub struct Parser<'t> {
    tokens: &'t mut TokenQueue,
    depth: usize,
    diagnostics: DiagnosticBag,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t mut TokenQueue) -> Self {
        Self {
            tokens,
            depth: 0,
            diagnostics: DiagnosticBag::new(),
        }
    }

    /// Warnings reported so far, leaving the parser's bag empty.
    pub fn take_diagnostics(&mut self) -> DiagnosticBag {
        mem::take(&mut self.diagnostics)
    }

    /// Parse exactly one statement from the front of the queue.
    pub fn parse_statement(&mut self) -> ParseResult<Statement> {
        self.check_end_of_input()?;
        self.statement()
    }

    /// Parse statements until `ELSE`, `END` or end of input, which is
    /// left in the queue. Returns a (possibly empty) block.
    pub fn parse_block(&mut self) -> ParseResult<Statement> {
        self.check_end_of_input()?;
        self.block()
    }

    /// Parse a block that must run to the end of input. The block can
    /// only stop early at an `ELSE` or `END` that closes nothing.
    pub fn parse_statements(&mut self) -> ParseResult<Statement> {
        self.check_end_of_input()?;
        let block = self.block()?;
        if !self.at_eof() {
            let token = self.front()?;
            return Err(ParseError::UnmatchedCloser {
                found: token.to_string(),
                span: token.span.clone(),
            });
        }
        Ok(block)
    }

    /// Parse a whole `PROGRAM ... END name` followed by end of input.
    pub fn parse_program(&mut self) -> ParseResult<Program> {
        self.check_end_of_input()?;
        self.program()
    }

    // ========================================================================
    // Token manipulation helpers
    // ========================================================================

    fn check_end_of_input(&self) -> ParseResult<()> {
        match self.tokens.back() {
            Some(token) if token.kind == TokenKind::Eof => Ok(()),
            _ => Err(ParseError::MissingEndOfInput),
        }
    }

    fn front(&self) -> ParseResult<&Token> {
        self.tokens.front().ok_or(ParseError::MissingEndOfInput)
    }

    fn at_keyword(&self, keyword: Keyword) -> bool {
        self.tokens.front().is_some_and(|t| t.is_keyword(keyword))
    }

    fn at_eof(&self) -> bool {
        self.tokens
            .front()
            .map_or(true, |t| t.kind == TokenKind::Eof)
    }

    /// Remove the front token. Callers check what it is first, so this
    /// never removes the end-of-input token.
    fn dequeue(&mut self) -> ParseResult<Token> {
        debug_assert!(!self.at_eof(), "parser consumed the end-of-input token");
        self.tokens.pop_front().ok_or(ParseError::MissingEndOfInput)
    }

    /// Run `parse` one nesting level deeper, failing once the limit is hit.
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
                span: self.front()?.span.clone(),
            });
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// An `Expected` error pointing at the front token.
    fn error_expected(&self, expected: impl Into<String>) -> ParseError {
        match self.tokens.front() {
            Some(token) => ParseError::Expected {
                expected: expected.into(),
                found: token.to_string(),
                span: token.span.clone(),
            },
            None => ParseError::MissingEndOfInput,
        }
    }

    /// Consume the given keyword, or fail naming it.
    fn expect_keyword(&mut self, keyword: Keyword) -> ParseResult<Token> {
        if self.at_keyword(keyword) {
            self.dequeue()
        } else {
            Err(self.error_expected(keyword.as_str()))
        }
    }

    fn expect_identifier(&mut self, what: &str) -> ParseResult<Token> {
        if self.front()?.kind == TokenKind::Identifier {
            self.dequeue()
        } else {
            Err(self.error_expected(what))
        }
    }

    /// Consume a condition token and convert it.
    fn expect_condition(&mut self) -> ParseResult<Condition> {
        let token = self.front()?;
        let condition = match token.kind {
            TokenKind::Condition => Condition::from_token(&token.lexeme),
            _ => None,
        };
        let Some(condition) = condition else {
            return Err(ParseError::InvalidCondition {
                found: token.to_string(),
                span: token.span.clone(),
            });
        };
        self.dequeue()?;
        Ok(condition)
    }
}

impl Statement {
    /// Parse one statement from the front of `tokens`.
    pub fn parse(tokens: &mut TokenQueue) -> ParseResult<Statement> {
        Parser::new(tokens).parse_statement()
    }

    /// Parse a block from the front of `tokens`.
    pub fn parse_block(tokens: &mut TokenQueue) -> ParseResult<Statement> {
        Parser::new(tokens).parse_block()
    }
}

impl Program {
    pub fn parse(tokens: &mut TokenQueue) -> ParseResult<Program> {
        Parser::new(tokens).parse_program()
    }
}

/// Tokenize `source`, failing on any illegal token.
pub fn tokenize_source(source: &str, file: &str) -> Result<TokenQueue, CompileError> {
    let (tokens, diagnostics) = Tokenizer::new(source, file).tokenize();
    if diagnostics.has_errors() {
        return Err(CompileError::Tokenize(diagnostics.into_diagnostics()));
    }
    Ok(tokens)
}

/// Parse a source file holding a bare sequence of statements.
pub fn parse_statement_source(source: &str, file: &str) -> Result<Statement, CompileError> {
    let mut tokens = tokenize_source(source, file)?;
    Ok(Parser::new(&mut tokens).parse_statements()?)
}

/// Parse a source file holding a complete program.
pub fn parse_program_source(source: &str, file: &str) -> Result<Program, CompileError> {
    let mut tokens = tokenize_source(source, file)?;
    Ok(Parser::new(&mut tokens).parse_program()?)
}
