//! Identifiers and dotted names
//!
//! ```text
//! Identifier     ::= IDENT
//! QualifiedName  ::= Identifier { "." Identifier }
//! ExpressionName ::= Identifier { "." Identifier }
//! ```
//!
//! Both dotted forms share a shape (a parent of identifier leaves); they
//! differ in rule only. Expression names are ambiguous between variables,
//! fields and packages and are built by the expression parser once it knows
//! the name is not followed by an invocation.

use crate::parser::ast::{Node, Rule, Value, ValueKind};
use crate::parser::error::ParseResult;
use crate::parser::location::Location;
use crate::parser::parse::Parser;
use crate::parser::token::{Token, TokenKind};

impl Parser {
    pub fn parse_identifier(&mut self) -> ParseResult<Node> {
        let token = self.expect_identifier("here")?;
        Ok(identifier_node(token))
    }

    /// Parse a dotted name such as `java.util.List`.
    pub fn parse_qualified_name(&mut self) -> ParseResult<Node> {
        self.parse_dotted(Rule::QualifiedName)
    }

    /// Dotted name in expression position, e.g. a resource in `try (r)`.
    pub fn parse_expression_name(&mut self) -> ParseResult<Node> {
        self.parse_dotted(Rule::ExpressionName)
    }

    fn parse_dotted(&mut self, rule: Rule) -> ParseResult<Node> {
        let location = self.current_location();
        let mut parts = vec![self.parse_identifier()?];
        while self.check(TokenKind::Dot) && self.peek_ahead(1)? == TokenKind::Identifier {
            self.advance()?;
            parts.push(self.parse_identifier()?);
        }
        Ok(dotted(rule, location, parts))
    }
}

pub(crate) fn identifier_node(token: Token) -> Node {
    Node::leaf(
        Rule::Identifier,
        token.location,
        Value::new(ValueKind::Identifier, token.text),
    )
}

/// Parent of identifier leaves.
pub(crate) fn dotted(rule: Rule, location: Location, parts: Vec<Node>) -> Node {
    Node::parent(rule, location, None, parts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_name() {
        let mut parser = Parser::from_source("test", "java.util.List;").unwrap();
        let name = parser.parse_qualified_name().unwrap();

        assert_eq!(name.rule(), Rule::QualifiedName);
        assert_eq!(name.dotted_name().as_deref(), Some("java.util.List"));
        assert!(parser.check(TokenKind::Semicolon));
    }

    #[test]
    fn test_qualified_name_stops_before_star() {
        let mut parser = Parser::from_source("test", "java.util.*").unwrap();
        let name = parser.parse_qualified_name().unwrap();

        assert_eq!(name.len(), 2);
        assert!(parser.check(TokenKind::Dot));
    }

    #[test]
    fn test_identifier_error() {
        let mut parser = Parser::from_source("test", "42").unwrap();
        let err = parser.parse_identifier().unwrap_err();
        assert_eq!(err.to_string(), "Expected identifier here, found integer literal 42");
    }
}
