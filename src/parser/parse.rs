//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and the token-level helpers
//! shared by every grammar area.
//!
//! # Parser Architecture
//!
//! The parser is a recursive descent parser with one method per grammar
//! production. Methods are split across the area modules with `impl Parser`
//! blocks:
//! - `names`, `literals`: leaves
//! - `types`: types, type arguments and type parameters
//! - `expressions`: the precedence ladder and primaries
//! - `statements`: blocks, local declarations and control flow
//! - `classes`, `modifiers`: type declarations, members and modifier lists
//! - `toplevel`: compilation units, packages and imports
//!
//! # Speculation
//!
//! A few constructs can only be told apart after reading ahead (casts,
//! lambdas, local variable declarations). Those are parsed speculatively with
//! [`Parser::attempt`], which saves a scanner [`Checkpoint`] and rewinds to it
//! when the speculative parse fails with a grammar error.
//!
//!
//! # Nesting
//!
//! Expressions, statements, class bodies, array initializers and type
//! arguments recurse into each other. [`Parser::nested`] counts how deep the
//! parser currently is and rejects input nested deeper than
//! [`MAX_NESTING`] with a grammar error instead of exhausting the stack.
//!
//! [`Checkpoint`]: crate::parser::scanner::Checkpoint

use crate::parser::error::{ParseError, ParseResult};
use crate::parser::location::Location;
use crate::parser::scanner::Scanner;
use crate::parser::token::{Token, TokenKind};
use tracing::debug;

/// Deepest nesting of recursive constructs the parser accepts.
pub const MAX_NESTING: usize = 100;

/// Recursive descent parser over one source unit
pub struct Parser {
    pub(crate) scanner: Scanner,
    depth: usize,
}

impl Parser {
    /// Create a parser and scan the first token.
    pub fn new(mut scanner: Scanner) -> ParseResult<Self> {
        scanner.next()?;
        Ok(Self { scanner, depth: 0 })
    }

    /// Parser over in-memory source text.
    pub fn from_source(name: impl Into<String>, text: &str) -> ParseResult<Self> {
        Self::new(Scanner::new(name, text))
    }

    /// Fail unless every token has been consumed.
    pub fn expect_end(&mut self) -> ParseResult<()> {
        if self.is_at_end() {
            Ok(())
        } else {
            Err(self.error_here(format!("Expected end of input, found {}", self.peek())))
        }
    }

    // ===== Helper methods =====

    pub(crate) fn peek(&self) -> &Token {
        self.scanner.current_token()
    }

    pub(crate) fn kind(&self) -> TokenKind {
        self.peek().kind
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.kind() == kind
    }

    pub(crate) fn check_any(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind())
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.check(TokenKind::EndOfInput)
    }

    /// Consume the current token and return it.
    pub(crate) fn advance(&mut self) -> ParseResult<Token> {
        let token = self.peek().clone();
        self.scanner.next()?;
        Ok(token)
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> ParseResult<bool> {
        if self.check(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Consume a token of the given kind; `context` completes the message
    /// (`Expected ';' after return value, found ...`).
    pub(crate) fn expect_token(&mut self, kind: TokenKind, context: &str) -> ParseResult<Token> {
        if self.check(kind) {
            self.advance()
        } else {
            Err(self.error_here(format!("Expected {kind} {context}, found {}", self.peek())))
        }
    }

    pub(crate) fn expect_identifier(&mut self, context: &str) -> ParseResult<Token> {
        self.expect_token(TokenKind::Identifier, context)
    }

    /// Kind of the token `n` positions after the current one.
    pub(crate) fn peek_ahead(&mut self, n: usize) -> ParseResult<TokenKind> {
        let saved = self.scanner.checkpoint();
        let mut result = Ok(self.kind());
        for _ in 0..n {
            result = self.scanner.next().map(|token| token.kind);
            if result.is_err() {
                break;
            }
        }
        self.scanner.rewind(saved);
        result
    }

    pub(crate) fn current_location(&self) -> Location {
        self.peek().location.clone()
    }

    /// Grammar error at the current token.
    pub(crate) fn error_here(&self, message: impl Into<String>) -> ParseError {
        ParseError::grammar(message, self.current_location())
    }

    pub(crate) fn unexpected(&self, expected: &str) -> ParseError {
        self.error_here(format!("Expected {expected}, found {}", self.peek()))
    }

    // ===== Scanner mode and speculation =====

    /// Run `parse` with the scanner's type context set, restoring the previous
    /// flag afterwards whether `parse` succeeds or not.
    pub(crate) fn in_type_context<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        let previous = self.scanner.set_type_context(true);
        let result = parse(self);
        self.scanner.set_type_context(previous);
        result
    }

    /// Parse `< ... >` in type context. `parse` starts after the `<` and must
    /// stop in front of the closing `>`, which is consumed once the outer
    /// context is back in place so the following token scans normally.
    pub(crate) fn angle_bracketed<T>(
        &mut self,
        what: &str,
        parse: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        let inner = self.in_type_context(|p| {
            p.expect_token(TokenKind::Lt, &format!("to open {what}"))?;
            let inner = parse(p)?;
            if !p.check(TokenKind::Gt) {
                return Err(p.error_here(format!("Expected '>' to close {what}, found {}", p.peek())));
            }
            Ok(inner)
        })?;
        self.advance()?;
        Ok(inner)
    }

    /// Speculatively run `parse`. On a grammar error the scanner is rewound
    /// and `None` is returned; lexical errors are real errors and propagate.
    pub(crate) fn attempt<T>(
        &mut self,
        what: &str,
        parse: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<Option<T>> {
        let saved = self.scanner.checkpoint();
        match parse(self) {
            Ok(value) => Ok(Some(value)),
            Err(ParseError::Grammar { message, location }) => {
                debug!(%what, at = %location, %message, "speculative parse rewound");
                self.scanner.rewind(saved);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Run `parse` one nesting level deeper. The level is released whether
    /// `parse` succeeds or not, so a rewound speculation leaves it balanced.
    pub(crate) fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        if self.depth >= MAX_NESTING {
            return Err(self.error_here(format!("input is nested deeper than {MAX_NESTING} levels")));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Run `probe` and rewind unconditionally. A grammar error counts as
    /// `false`.
    pub(crate) fn lookahead(
        &mut self,
        probe: impl FnOnce(&mut Self) -> ParseResult<bool>,
    ) -> ParseResult<bool> {
        let saved = self.scanner.checkpoint();
        let result = probe(self);
        self.scanner.rewind(saved);
        match result {
            Ok(matched) => Ok(matched),
            Err(ParseError::Grammar { .. }) => Ok(false),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_scans_first_token() {
        let parser = Parser::from_source("test", "class A {}").unwrap();
        assert_eq!(parser.kind(), TokenKind::Class);
    }

    #[test]
    fn test_expect_token_message() {
        let mut parser = Parser::from_source("test", "x").unwrap();
        let err = parser.expect_token(TokenKind::Semicolon, "after statement").unwrap_err();
        assert_eq!(err.to_string(), "Expected ';' after statement, found identifier 'x'");
        assert_eq!(err.location().unwrap().column(), 1);
    }

    #[test]
    fn test_peek_ahead_does_not_consume() {
        let mut parser = Parser::from_source("test", "a . b").unwrap();
        assert_eq!(parser.peek_ahead(2).unwrap(), TokenKind::Identifier);
        assert_eq!(parser.peek_ahead(3).unwrap(), TokenKind::EndOfInput);
        assert_eq!(parser.peek().text, "a");
    }

    #[test]
    fn test_attempt_rewinds_on_grammar_error() {
        let mut parser = Parser::from_source("test", "a b c").unwrap();
        let result = parser
            .attempt("two identifiers then a semicolon", |p| {
                p.expect_identifier("first")?;
                p.expect_identifier("second")?;
                p.expect_token(TokenKind::Semicolon, "third")
            })
            .unwrap();

        assert!(result.is_none());
        assert_eq!(parser.peek().text, "a");
    }

    #[test]
    fn test_nesting_limit() {
        let mut parser = Parser::from_source("test", "x").unwrap();

        fn descend(p: &mut Parser, levels: usize) -> ParseResult<usize> {
            if levels == 0 {
                return Ok(p.depth);
            }
            p.nested(|p| descend(p, levels - 1))
        }

        assert_eq!(descend(&mut parser, MAX_NESTING).unwrap(), MAX_NESTING);
        assert_eq!(parser.depth, 0);

        let err = descend(&mut parser, MAX_NESTING + 1).unwrap_err();
        assert!(err.is_grammar());
        assert_eq!(parser.depth, 0);
    }

    #[test]
    fn test_type_context_restored_after_error() {
        let mut parser = Parser::from_source("test", "<a;").unwrap();
        let err = parser.angle_bracketed("type arguments", |p| p.expect_identifier("in list"));
        assert!(err.is_err());
        assert!(!parser.scanner.type_context());
    }

    #[test]
    fn test_angle_bracketed_rescans_after_close() {
        let mut parser = Parser::from_source("test", "<a> >> b").unwrap();
        parser
            .angle_bracketed("type arguments", |p| p.expect_identifier("in list"))
            .unwrap();
        assert_eq!(parser.kind(), TokenKind::GtGt);
    }
}
