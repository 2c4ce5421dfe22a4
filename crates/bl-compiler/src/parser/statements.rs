use crate::ast::Statement;
use crate::error::ParseResult;
use crate::lexer::{Keyword, TokenKind};

use super::Parser;

impl Parser<'_> {
    /// statement := if | while | call
    pub(super) fn statement(&mut self) -> ParseResult<Statement> {
        let kind = self.front()?.kind;
        match kind {
            TokenKind::Keyword(Keyword::If) => self.nested(Self::parse_if),
            TokenKind::Keyword(Keyword::While) => self.nested(Self::parse_while),
            TokenKind::Identifier => self.parse_call(),
            _ => Err(self.error_expected("IF, WHILE, or identifier")),
        }
    }

    /// block := statement*, ended (not consumed) by ELSE, END or end of input
    pub(super) fn block(&mut self) -> ParseResult<Statement> {
        let mut children = Vec::new();
        while !self.at_block_end() {
            children.push(self.statement()?);
        }
        Ok(Statement::Block(children))
    }

    fn at_block_end(&self) -> bool {
        self.at_keyword(Keyword::Else) || self.at_keyword(Keyword::End) || self.at_eof()
    }

    /// `IF <condition> THEN <block> [ELSE <block>] END IF`
    fn parse_if(&mut self) -> ParseResult<Statement> {
        self.expect_keyword(Keyword::If)?;
        let condition = self.expect_condition()?;
        self.expect_keyword(Keyword::Then)?;
        let then_body = self.block()?;

        let stmt = if self.at_keyword(Keyword::Else) {
            self.dequeue()?;
            let else_body = self.block()?;
            Statement::if_else(condition, then_body, else_body)
        } else if self.at_keyword(Keyword::End) {
            Statement::if_then(condition, then_body)
        } else {
            return Err(self.error_expected("ELSE or END"));
        };

        self.expect_keyword(Keyword::End)?;
        self.expect_keyword(Keyword::If)?;
        Ok(stmt)
    }

    /// `WHILE <condition> DO <block> END WHILE`
    fn parse_while(&mut self) -> ParseResult<Statement> {
        self.expect_keyword(Keyword::While)?;
        let condition = self.expect_condition()?;
        self.expect_keyword(Keyword::Do)?;
        let body = self.block()?;
        self.expect_keyword(Keyword::End)?;
        self.expect_keyword(Keyword::While)?;
        Ok(Statement::while_do(condition, body))
    }

    /// A bare identifier. Whether it names anything is decided at code generation.
    fn parse_call(&mut self) -> ParseResult<Statement> {
        let name = self.expect_identifier("identifier")?;
        Ok(Statement::Call(name.lexeme))
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{Condition, Statement};
    use crate::error::{CompileError, ParseError};
    use crate::lexer::{Token, TokenQueue, Tokenizer, END_OF_INPUT};
    use crate::parser::{parse_statement_source, MAX_NESTING_DEPTH};
    use bl_common::Span;

    fn tokens(source: &str) -> TokenQueue {
        let (tokens, diags) = Tokenizer::new(source, "test.bl").tokenize();
        assert!(!diags.has_errors(), "{:?}", diags.diagnostics());
        tokens
    }

    /// Token queue from raw lexemes, the way a caller without a tokenizer would build one.
    fn raw(lexemes: &[&str]) -> TokenQueue {
        lexemes
            .iter()
            .map(|&l| {
                if l == END_OF_INPUT {
                    Token::eof(Span::dummy())
                } else {
                    Token::new(l, Span::dummy())
                }
            })
            .collect()
    }

    fn remaining(tokens: &TokenQueue) -> Vec<&str> {
        tokens.iter().map(|t| t.lexeme.as_str()).collect()
    }

    fn expected_message(source: &str) -> String {
        let mut toks = tokens(source);
        Statement::parse(&mut toks).unwrap_err().to_string()
    }

    #[test]
    fn parses_if_from_raw_tokens() {
        let mut toks = raw(&["IF", "next-is-empty", "THEN", "move", "END", "IF", END_OF_INPUT]);
        let stmt = Statement::parse(&mut toks).unwrap();
        assert_eq!(
            stmt,
            Statement::if_then(
                Condition::NextIsEmpty,
                Statement::block(vec![Statement::call("move")])
            )
        );
        assert_eq!(remaining(&toks), vec![END_OF_INPUT]);
    }

    #[test]
    fn if_else_keeps_branch_order() {
        let mut toks = tokens("IF next-is-wall THEN turnleft ELSE move skip END IF");
        let stmt = Statement::parse(&mut toks).unwrap();
        assert_eq!(
            stmt,
            Statement::if_else(
                Condition::NextIsWall,
                Statement::block(vec![Statement::call("turnleft")]),
                Statement::block(vec![Statement::call("move"), Statement::call("skip")]),
            )
        );
    }

    #[test]
    fn while_requires_closing_while() {
        let mut toks = tokens("WHILE true DO infect END WHILE move");
        let stmt = Statement::parse(&mut toks).unwrap();
        assert_eq!(
            stmt,
            Statement::while_do(
                Condition::True,
                Statement::block(vec![Statement::call("infect")])
            )
        );
        assert_eq!(remaining(&toks), vec!["move", END_OF_INPUT]);

        assert_eq!(
            expected_message("WHILE true DO infect END"),
            "expected WHILE, found end of input"
        );
    }

    #[test]
    fn parse_consumes_only_one_statement() {
        let mut toks = tokens("move turnleft");
        assert_eq!(Statement::parse(&mut toks).unwrap(), Statement::call("move"));
        assert_eq!(remaining(&toks), vec!["turnleft", END_OF_INPUT]);
    }

    #[test]
    fn block_stops_before_sentinels() {
        for source in ["END IF", "ELSE move", ""] {
            let mut toks = tokens(source);
            let before = toks.len();
            let block = Statement::parse_block(&mut toks).unwrap();
            assert_eq!(block, Statement::default());
            assert_eq!(toks.len(), before, "consumed tokens for {:?}", source);
        }
    }

    #[test]
    fn block_collects_statements_in_order() {
        let mut toks = tokens("move IF random THEN skip END IF turnright END");
        let block = Statement::parse_block(&mut toks).unwrap();
        assert_eq!(
            block,
            Statement::block(vec![
                Statement::call("move"),
                Statement::if_then(
                    Condition::Random,
                    Statement::block(vec![Statement::call("skip")])
                ),
                Statement::call("turnright"),
            ])
        );
        assert_eq!(remaining(&toks), vec!["END", END_OF_INPUT]);
    }

    #[test]
    fn nested_statements() {
        let mut toks = tokens(
            "WHILE next-is-not-wall DO
                IF next-is-enemy THEN infect
                ELSE IF next-is-empty THEN move END IF
                END IF
             END WHILE",
        );
        let stmt = Statement::parse(&mut toks).unwrap();
        let Statement::While { condition, body } = stmt else {
            panic!("expected WHILE");
        };
        assert_eq!(condition, Condition::NextIsNotWall);
        let Statement::Block(children) = *body else {
            panic!("expected BLOCK body");
        };
        assert_eq!(children.len(), 1);
        assert!(matches!(
            children[0],
            Statement::IfElse {
                condition: Condition::NextIsEnemy,
                ..
            }
        ));
    }

    #[test]
    fn rejects_bad_statement_start() {
        assert_eq!(
            expected_message("THEN move"),
            "expected IF, WHILE, or identifier, found \"THEN\""
        );
        assert_eq!(
            expected_message("next-is-empty"),
            "expected IF, WHILE, or identifier, found \"next-is-empty\""
        );
    }

    #[test]
    fn rejects_bad_condition() {
        let mut toks = tokens("IF move THEN skip END IF");
        let err = Statement::parse(&mut toks).unwrap_err();
        assert!(matches!(
            err,
            ParseError::InvalidCondition { ref found, .. } if found == "\"move\""
        ));
    }

    #[test]
    fn reports_missing_keywords() {
        assert_eq!(
            expected_message("IF true move END IF"),
            "expected THEN, found \"move\""
        );
        assert_eq!(
            expected_message("IF true THEN move"),
            "expected ELSE or END, found end of input"
        );
        assert_eq!(
            expected_message("IF true THEN move ELSE skip ELSE"),
            "expected END, found \"ELSE\""
        );
        assert_eq!(
            expected_message("IF true THEN move END WHILE"),
            "expected IF, found \"WHILE\""
        );
        assert_eq!(
            expected_message("WHILE true move END WHILE"),
            "expected DO, found \"move\""
        );
    }

    #[test]
    fn error_span_points_at_offending_token() {
        let mut toks = tokens("IF true\nTHEN move\nEND WHILE");
        let err = Statement::parse(&mut toks).unwrap_err();
        let span = err.span().unwrap();
        assert_eq!((span.start.line, span.start.column), (3, 5));
    }

    #[test]
    fn nesting_depth_is_limited() {
        let deep = |levels: usize| {
            format!(
                "{}move{}",
                "WHILE true DO ".repeat(levels),
                " END WHILE".repeat(levels)
            )
        };

        let stmt = parse_statement_source(&deep(MAX_NESTING_DEPTH), "deep.bl").unwrap();
        assert_eq!(stmt.length_of_block(), Ok(1));

        for levels in [MAX_NESTING_DEPTH + 1, 20_000] {
            match parse_statement_source(&deep(levels), "deep.bl") {
                Err(CompileError::Parse(ParseError::NestingTooDeep { limit, span })) => {
                    assert_eq!(limit, MAX_NESTING_DEPTH);
                    assert_eq!(span.start.column as usize, 14 * MAX_NESTING_DEPTH + 1);
                }
                other => panic!("expected nesting error, got {:?}", other.map(|_| ())),
            }
        }
    }

    #[test]
    fn stray_closer_in_statement_file() {
        for (source, found) in [("move END IF", "\"END\""), ("ELSE skip", "\"ELSE\"")] {
            let err = parse_statement_source(source, "s.bl").unwrap_err();
            assert_eq!(err.to_string(), format!("{} does not close any IF or WHILE", found));
        }
    }

    #[test]
    fn stream_without_end_marker_is_rejected() {
        let mut toks = raw(&["move"]);
        assert_eq!(
            Statement::parse(&mut toks),
            Err(ParseError::MissingEndOfInput)
        );
        let mut empty = TokenQueue::new();
        assert_eq!(
            Statement::parse_block(&mut empty),
            Err(ParseError::MissingEndOfInput)
        );
    }
}
