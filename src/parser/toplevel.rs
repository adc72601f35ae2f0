//! Compilation units
//!
//! ```text
//! CompilationUnit    ::= [PackageDeclaration] { ImportDeclaration } { TypeDeclaration | ";" } EOF
//! PackageDeclaration ::= package QualifiedName ";"
//! ImportDeclaration  ::= import [static] QualifiedName [ "." "*" ] ";"
//! ```

use crate::parser::ast::{ListKind, Node, Operator, Rule};
use crate::parser::error::ParseResult;
use crate::parser::expressions::present;
use crate::parser::parse::Parser;
use crate::parser::token::TokenKind;
use tracing::debug;

impl Parser {
    /// Parse a whole source unit. Fails unless every token is consumed.
    pub fn parse_compilation_unit(&mut self) -> ParseResult<Node> {
        let location = self.current_location();
        debug!(file = location.file_name(), "parsing compilation unit");

        let package = if self.check(TokenKind::Package) {
            Some(self.parse_package_declaration()?)
        } else {
            None
        };

        let imports_location = self.current_location();
        let mut imports = Vec::new();
        while self.check(TokenKind::Import) {
            imports.push(self.parse_import_declaration()?);
        }

        let types_location = self.current_location();
        let mut types = Vec::new();
        while !self.is_at_end() {
            if self.match_token(TokenKind::Semicolon)? {
                continue;
            }
            types.push(self.parse_type_declaration()?);
        }
        self.expect_end()?;

        debug!(
            imports = imports.len(),
            types = types.len(),
            "parsed compilation unit"
        );

        Ok(Node::parent(
            Rule::CompilationUnit,
            location,
            None,
            present([
                package,
                Some(Node::list(
                    Rule::ImportDeclarations,
                    imports_location,
                    ListKind::Imports,
                    imports,
                )),
                Some(Node::list(
                    Rule::TypeDeclarations,
                    types_location,
                    ListKind::TypeDeclarations,
                    types,
                )),
            ]),
        ))
    }

    fn parse_package_declaration(&mut self) -> ParseResult<Node> {
        let location = self.advance()?.location;
        let name = self.parse_qualified_name()?;
        self.expect_token(TokenKind::Semicolon, "after package name")?;
        Ok(Node::parent(Rule::PackageDeclaration, location, None, vec![name]))
    }

    /// `import [static] a.b.C [.*] ;`
    fn parse_import_declaration(&mut self) -> ParseResult<Node> {
        let location = self.advance()?.location;
        let is_static = self.match_token(TokenKind::Static)?;
        let name = self.parse_qualified_name()?;

        let on_demand = self.check(TokenKind::Dot) && self.peek_ahead(1)? == TokenKind::Star;
        if on_demand {
            self.advance()?;
            self.advance()?;
        }
        self.expect_token(TokenKind::Semicolon, "after import")?;

        let op = match (is_static, on_demand) {
            (false, false) => None,
            (true, false) => Some(Operator::Static),
            (false, true) => Some(Operator::OnDemand),
            (true, true) => Some(Operator::StaticOnDemand),
        };
        Ok(Node::parent(Rule::ImportDeclaration, location, op, vec![name]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(source: &str) -> Node {
        let mut parser = Parser::from_source("Test.java", source).unwrap();
        parser.parse_compilation_unit().unwrap().collapsed()
    }

    #[test]
    fn test_empty_unit() {
        let unit = unit("");
        assert_eq!(unit.rule(), Rule::CompilationUnit);
        assert!(unit.find(Rule::PackageDeclaration).is_none());
        assert_eq!(unit.find_list(ListKind::Imports).map(Node::len), Some(0));
        assert_eq!(unit.find_list(ListKind::TypeDeclarations).map(Node::len), Some(0));
    }

    #[test]
    fn test_package_and_imports() {
        let unit = unit(
            "package org.example.app;
             import java.util.List;
             import java.util.*;
             import static java.lang.Math.max;
             import static java.lang.Math.*;
             public class App {}
             ;
             interface Plugin {}",
        );

        let package = unit.find(Rule::PackageDeclaration).unwrap();
        assert_eq!(package.child(0).and_then(Node::dotted_name).as_deref(), Some("org.example.app"));

        let imports = unit.find_list(ListKind::Imports).unwrap();
        let ops: Vec<_> = imports.children().into_iter().map(Node::operator).collect();
        assert_eq!(
            ops,
            vec![
                None,
                Some(Operator::OnDemand),
                Some(Operator::Static),
                Some(Operator::StaticOnDemand),
            ]
        );
        assert_eq!(
            imports.child(1).and_then(|i| i.child(0)).and_then(Node::dotted_name).as_deref(),
            Some("java.util")
        );

        let types = unit.find_list(ListKind::TypeDeclarations).unwrap();
        assert_eq!(types.len(), 2);
    }

    #[test]
    fn test_trailing_garbage() {
        let mut parser = Parser::from_source("Test.java", "class A {} }").unwrap();
        let err = parser.parse_compilation_unit().unwrap_err();
        assert_eq!(err.to_string(), "Expected 'class', 'interface' or 'enum', found '}'");
        assert_eq!(err.location().unwrap().column(), 12);
    }
}
