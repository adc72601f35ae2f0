//! Type parsing implementation
//!
//! # Grammar
//!
//! ```text
//! Type           ::= (PrimitiveType | ClassType) { "[" "]" }
//! ClassType      ::= TypeSegment { "." TypeSegment }
//! TypeSegment    ::= Identifier [TypeArguments]
//! ResultType     ::= Type | void
//! TypeArguments  ::= "<" TypeArgument { "," TypeArgument } ">"
//! TypeArgument   ::= Type | "?" [ (extends | super) Type ]
//! TypeParameters ::= "<" TypeParameter { "," TypeParameter } ">"
//! TypeParameter  ::= Identifier [ extends ClassType { "&" ClassType } ]
//! ```
//!
//! Everything between angle brackets is scanned in type context so that
//! `List<List<String>>` closes with two `>` tokens.

use crate::parser::ast::{ListKind, Node, Operator, Rule, Value, ValueKind};
use crate::parser::error::ParseResult;
use crate::parser::parse::Parser;
use crate::parser::token::TokenKind;

impl Parser {
    pub fn parse_type(&mut self) -> ParseResult<Node> {
        let base = if self.kind().is_primitive_type() {
            self.parse_primitive_type()?
        } else if self.check(TokenKind::Identifier) {
            self.parse_class_type()?
        } else {
            return Err(self.unexpected("type"));
        };

        let ty = self.parse_dims(base)?;
        Ok(Node::wrap(Rule::Type, ty))
    }

    /// `void` or a type, for method results.
    pub fn parse_result_type(&mut self) -> ParseResult<Node> {
        if self.check(TokenKind::Void) {
            let token = self.advance()?;
            return Ok(Node::leaf(
                Rule::VoidType,
                token.location,
                Value::new(ValueKind::Keyword, token.text),
            ));
        }
        self.parse_type()
    }

    pub fn parse_primitive_type(&mut self) -> ParseResult<Node> {
        if !self.kind().is_primitive_type() {
            return Err(self.unexpected("primitive type"));
        }
        let token = self.advance()?;
        Ok(Node::leaf(
            Rule::PrimitiveType,
            token.location,
            Value::new(ValueKind::Keyword, token.text),
        ))
    }

    pub fn parse_class_type(&mut self) -> ParseResult<Node> {
        self.class_type(false)
    }

    /// Class type after `new`, where the last segment may use `<>`.
    pub(crate) fn parse_creation_type(&mut self) -> ParseResult<Node> {
        self.class_type(true)
    }

    fn class_type(&mut self, diamond: bool) -> ParseResult<Node> {
        let location = self.current_location();
        let mut segments = vec![self.type_segment(diamond)?];

        while self.check(TokenKind::Dot) && self.peek_ahead(1)? == TokenKind::Identifier {
            self.advance()?;
            segments.push(self.type_segment(diamond)?);
        }

        Ok(Node::parent(Rule::ClassType, location, None, segments))
    }

    fn type_segment(&mut self, diamond: bool) -> ParseResult<Node> {
        let location = self.current_location();
        let mut children = vec![self.parse_identifier()?];

        if self.check(TokenKind::Lt) {
            if diamond && self.peek_ahead(1)? == TokenKind::Gt {
                let open = self.advance()?;
                self.advance()?;
                children.push(Node::list(
                    Rule::TypeArguments,
                    open.location,
                    ListKind::TypeArguments,
                    Vec::new(),
                ));
            } else {
                children.push(self.parse_type_arguments()?);
            }
        }

        Ok(Node::parent(Rule::TypeSegment, location, None, children))
    }

    /// Wrap `element` in one array type per `[]` pair that follows.
    pub(crate) fn parse_dims(&mut self, mut element: Node) -> ParseResult<Node> {
        while self.check(TokenKind::LBracket) && self.peek_ahead(1)? == TokenKind::RBracket {
            self.advance()?;
            self.advance()?;
            let location = element.location().clone();
            element = Node::unary(Rule::ArrayType, location, Operator::Array, element);
        }
        Ok(element)
    }

    pub fn parse_type_arguments(&mut self) -> ParseResult<Node> {
        let location = self.current_location();
        let arguments = self.angle_bracketed("type arguments", |p| {
            p.nested(|p| {
                let mut arguments = vec![p.parse_type_argument()?];
                while p.match_token(TokenKind::Comma)? {
                    arguments.push(p.parse_type_argument()?);
                }
                Ok(arguments)
            })
        })?;

        Ok(Node::list(
            Rule::TypeArguments,
            location,
            ListKind::TypeArguments,
            arguments,
        ))
    }

    fn parse_type_argument(&mut self) -> ParseResult<Node> {
        if !self.check(TokenKind::Question) {
            return self.parse_type();
        }

        let location = self.advance()?.location;
        if self.match_token(TokenKind::Extends)? {
            let bound = self.parse_type()?;
            Ok(Node::unary(Rule::Wildcard, location, Operator::WildcardExtends, bound))
        } else if self.match_token(TokenKind::Super)? {
            let bound = self.parse_type()?;
            Ok(Node::unary(Rule::Wildcard, location, Operator::WildcardSuper, bound))
        } else {
            Ok(Node::parent(Rule::Wildcard, location, None, Vec::new()))
        }
    }

    pub fn parse_type_parameters(&mut self) -> ParseResult<Node> {
        let location = self.current_location();
        let parameters = self.angle_bracketed("type parameters", |p| {
            let mut parameters = vec![p.parse_type_parameter()?];
            while p.match_token(TokenKind::Comma)? {
                parameters.push(p.parse_type_parameter()?);
            }
            Ok(parameters)
        })?;

        Ok(Node::list(
            Rule::TypeParameters,
            location,
            ListKind::TypeParameters,
            parameters,
        ))
    }

    fn parse_type_parameter(&mut self) -> ParseResult<Node> {
        let location = self.current_location();
        let mut children = vec![self.parse_identifier()?];

        if self.check(TokenKind::Extends) {
            let bounds_location = self.advance()?.location;
            let mut bounds = vec![self.parse_class_type()?];
            while self.match_token(TokenKind::Amp)? {
                bounds.push(self.parse_class_type()?);
            }
            children.push(Node::list(
                Rule::TypeBound,
                bounds_location,
                ListKind::TypeBounds,
                bounds,
            ));
        }

        Ok(Node::parent(Rule::TypeParameter, location, None, children))
    }

    /// Comma-separated class types (`implements`, `throws`, ...).
    pub(crate) fn parse_type_list(&mut self, kind: ListKind) -> ParseResult<Node> {
        let location = self.current_location();
        let mut types = vec![self.parse_class_type()?];
        while self.match_token(TokenKind::Comma)? {
            types.push(self.parse_class_type()?);
        }
        Ok(Node::list(Rule::TypeList, location, kind, types))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_type(source: &str) -> (Node, Parser) {
        let mut parser = Parser::from_source("test", source).unwrap();
        let ty = parser.parse_type().unwrap();
        (ty, parser)
    }

    #[test]
    fn test_primitive_array_type() {
        let (ty, _) = parse_type("int[][]");
        let array = ty.collapsed();

        assert_eq!(array.rule(), Rule::ArrayType);
        assert_eq!(array.operator(), Some(Operator::Array));
        let inner = array.child(0).unwrap();
        assert_eq!(inner.rule(), Rule::ArrayType);
        assert_eq!(inner.child(0).and_then(Node::text), Some("int"));
    }

    #[test]
    fn test_nested_type_arguments() {
        let (ty, mut parser) = parse_type("Map<Class<?>, List<Integer>> x");
        parser.expect_identifier("after type").unwrap();
        parser.expect_end().unwrap();

        let class_type = ty.collapsed();
        assert_eq!(class_type.rule(), Rule::ClassType);
        let segment = class_type.child(0).unwrap();
        assert_eq!(segment.identifier(), Some("Map"));

        let arguments = segment.find_list(ListKind::TypeArguments).unwrap();
        assert_eq!(arguments.len(), 2);
        assert!(!parser.scanner.type_context());
    }

    #[test]
    fn test_triple_close() {
        let (ty, mut parser) = parse_type("A<B<C<D>>> x");
        assert_eq!(parser.expect_identifier("after type").unwrap().text, "x");
        assert_eq!(ty.collapsed().dotted_name().as_deref(), Some("A"));
    }

    #[test]
    fn test_shift_after_type_arguments() {
        let mut parser = Parser::from_source("test", "List<T> >> 2").unwrap();
        parser.parse_type().unwrap();
        assert!(parser.check(TokenKind::GtGt));
    }

    #[test]
    fn test_wildcards() {
        let (ty, _) = parse_type("Map<? extends K, ? super V>");
        let segment = ty.collapsed().child(0).cloned().unwrap();
        let arguments = segment.find_list(ListKind::TypeArguments).unwrap();

        assert_eq!(arguments.child(0).and_then(Node::operator), Some(Operator::WildcardExtends));
        assert_eq!(arguments.child(1).and_then(Node::operator), Some(Operator::WildcardSuper));
    }

    #[test]
    fn test_type_parameters() {
        let mut parser = Parser::from_source("test", "<T extends Comparable<T> & Serializable, U>").unwrap();
        let parameters = parser.parse_type_parameters().unwrap();

        assert_eq!(parameters.list_kind(), Some(ListKind::TypeParameters));
        assert_eq!(parameters.len(), 2);
        let bounds = parameters.child(0).unwrap().find_list(ListKind::TypeBounds).unwrap();
        assert_eq!(bounds.len(), 2);
        parser.expect_end().unwrap();
    }

    #[test]
    fn test_qualified_class_type() {
        let (ty, _) = parse_type("java.util.Map.Entry<K, V>");
        assert_eq!(ty.collapsed().dotted_name().as_deref(), Some("java.util.Map.Entry"));
    }

    #[test]
    fn test_unclosed_type_arguments() {
        let mut parser = Parser::from_source("test", "List<String;").unwrap();
        let err = parser.parse_type().unwrap_err();
        assert_eq!(err.to_string(), "Expected '>' to close type arguments, found ';'");
        assert_eq!(err.location().unwrap().column(), 12);
        assert!(!parser.scanner.type_context());
    }
}
