//! Literal parsing
//!
//! The scanner has already validated every literal lexeme, so this area only
//! classifies the token and keeps its text in a [`Value`] leaf.

use crate::parser::ast::{Node, Rule, Value, ValueKind};
use crate::parser::error::ParseResult;
use crate::parser::parse::Parser;
use crate::parser::token::TokenKind;

impl Parser {
    pub fn parse_literal(&mut self) -> ParseResult<Node> {
        let kind = match self.kind() {
            TokenKind::IntegerLiteral => ValueKind::Integer,
            TokenKind::FloatingLiteral => ValueKind::Floating,
            TokenKind::CharacterLiteral => ValueKind::Character,
            TokenKind::StringLiteral => ValueKind::String,
            TokenKind::TextBlock => ValueKind::TextBlock,
            TokenKind::True | TokenKind::False => ValueKind::Boolean,
            TokenKind::Null => ValueKind::Null,
            _ => return Err(self.unexpected("literal")),
        };

        let token = self.advance()?;
        Ok(Node::leaf(Rule::Literal, token.location, Value::new(kind, token.text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literal(source: &str) -> Value {
        let mut parser = Parser::from_source("test", source).unwrap();
        let node = parser.parse_literal().unwrap();
        node.value().cloned().unwrap()
    }

    #[test]
    fn test_literal_values() {
        assert_eq!(literal("1234").as_integer(), Some(1234));
        assert_eq!(literal("1234.5").as_float(), Some(1234.5));
        assert_eq!(literal("'c'").as_char(), Some('c'));
        assert_eq!(literal(r#""\t\n""#).as_string().as_deref(), Some("\t\n"));
        assert_eq!(literal(r#""""#).as_string().as_deref(), Some(""));
        assert_eq!(literal("false").as_bool(), Some(false));
        assert_eq!(literal("null").kind(), ValueKind::Null);
    }

    #[test]
    fn test_not_a_literal() {
        let mut parser = Parser::from_source("test", "x").unwrap();
        let err = parser.parse_literal().unwrap_err();
        assert!(err.is_grammar());
        assert_eq!(err.to_string(), "Expected literal, found identifier 'x'");
    }
}
