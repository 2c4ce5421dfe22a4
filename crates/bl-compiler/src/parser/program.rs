use std::collections::HashMap;

use bl_common::{Diagnostic, Opcode, Span};

use crate::ast::{Context, Program, Statement};
use crate::error::{ParseError, ParseResult};
use crate::lexer::{Keyword, Token};
use crate::passes::called_names;

use super::Parser;

impl Parser<'_> {
    /// ```text
    /// PROGRAM <id> IS
    ///   (INSTRUCTION <id> IS <block> END <id>)*
    /// BEGIN
    ///   <block>
    /// END <id>
    /// ```
    pub(super) fn program(&mut self) -> ParseResult<Program> {
        self.expect_keyword(Keyword::Program)?;
        let name = self.expect_identifier("program name")?;
        self.expect_keyword(Keyword::Is)?;

        let mut context = Context::new();
        let mut defined_at: HashMap<String, Span> = HashMap::new();
        while self.at_keyword(Keyword::Instruction) {
            let (instr, body) = self.instruction()?;
            if let Some(first) = defined_at.get(&instr.lexeme) {
                return Err(ParseError::DuplicateInstruction {
                    name: instr.lexeme,
                    span: instr.span,
                    first_defined_at: first.clone(),
                });
            }
            defined_at.insert(instr.lexeme.clone(), instr.span);
            context.insert(instr.lexeme, body);
        }

        self.expect_keyword(Keyword::Begin)?;
        let body = self.block()?;
        self.expect_keyword(Keyword::End)?;
        self.expect_closing_name(&name)?;
        self.expect_end()?;

        // Instruction bodies cannot call each other, so only the main
        // body can use an instruction.
        let called = called_names(&body);
        for instr in context.keys().filter(|n| !called.contains(n.as_str())) {
            if let Some(span) = defined_at.remove(instr) {
                self.diagnostics.report(
                    Diagnostic::warning(format!("instruction \"{}\" is never called", instr))
                        .with_span(span)
                        .with_suggestion("call it between BEGIN and END, or remove it"),
                );
            }
        }

        Ok(Program::new(name.lexeme, context, body))
    }

    /// `INSTRUCTION <id> IS <block> END <id>`; returns the name token and body.
    fn instruction(&mut self) -> ParseResult<(Token, Statement)> {
        self.expect_keyword(Keyword::Instruction)?;
        let name = self.expect_identifier("instruction name")?;
        if Opcode::is_primitive_name(&name.lexeme) {
            return Err(ParseError::PrimitiveRedefinition {
                name: name.lexeme,
                span: name.span,
            });
        }
        self.expect_keyword(Keyword::Is)?;
        let body = self.block()?;
        self.expect_keyword(Keyword::End)?;
        self.expect_closing_name(&name)?;
        Ok((name, body))
    }

    fn expect_closing_name(&mut self, opened: &Token) -> ParseResult<()> {
        let closing = self.expect_identifier(&format!("\"{}\"", opened.lexeme))?;
        if closing.lexeme != opened.lexeme {
            return Err(ParseError::MismatchedName {
                expected: opened.lexeme.clone(),
                found: closing.lexeme,
                span: closing.span,
                opened_at: opened.span.clone(),
            });
        }
        Ok(())
    }

    /// Require that only the end-of-input token is left.
    pub(super) fn expect_end(&self) -> ParseResult<()> {
        if self.at_eof() {
            return Ok(());
        }
        let token = self.front()?;
        Err(ParseError::TrailingInput {
            found: token.to_string(),
            span: token.span.clone(),
        })
    }
}
