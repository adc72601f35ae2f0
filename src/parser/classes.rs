//! Class, interface and enum declarations
//!
//! # Grammar
//!
//! ```text
//! ClassDeclaration     ::= Modifiers class Identifier [TypeParameters]
//!                          [extends ClassType] [implements TypeList] ClassBody
//! InterfaceDeclaration ::= Modifiers interface Identifier [TypeParameters]
//!                          [extends TypeList] InterfaceBody
//! EnumDeclaration      ::= Modifiers enum Identifier [implements TypeList] EnumBody
//! ClassBodyDeclaration ::= ";" | [static] Block | Modifiers MemberDeclaration
//! FormalParameter      ::= VariableModifiers Type ["..."] Identifier
//! ConstructorBody      ::= "{" [ExplicitConstructorInvocation] { BlockStatement } "}"
//! ```
//!
//! Member modifiers are parsed before it is known what kind of member
//! follows; they are specialized once the member's shape is clear.

use crate::parser::ast::{ListKind, ModifierSite, Node, Operator, Rule};
use crate::parser::error::{ParseError, ParseResult};
use crate::parser::expressions::present;
use crate::parser::location::Location;
use crate::parser::modifiers::specialize_modifiers;
use crate::parser::names::identifier_node;
use crate::parser::parse::Parser;
use crate::parser::token::TokenKind;

/// Which body a member appears in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Class,
    Interface,
}

impl Parser {
    /// Class, interface or enum declaration, modifiers included.
    pub fn parse_type_declaration(&mut self) -> ParseResult<Node> {
        let modifiers = self.parse_modifiers()?;
        self.parse_type_declaration_rest(modifiers)
    }

    fn parse_type_declaration_rest(&mut self, modifiers: Node) -> ParseResult<Node> {
        match self.kind() {
            TokenKind::Class => self.parse_class_declaration(modifiers),
            TokenKind::Interface => self.parse_interface_declaration(modifiers),
            TokenKind::Enum => self.parse_enum_declaration(modifiers),
            _ => Err(self.unexpected("'class', 'interface' or 'enum'")),
        }
    }

    fn parse_class_declaration(&mut self, modifiers: Node) -> ParseResult<Node> {
        let location = modifiers.location().clone();
        let modifiers = specialize_modifiers(modifiers, ModifierSite::Class)?;
        self.advance()?;

        let name = identifier_node(self.expect_identifier("after 'class'")?);
        let type_parameters = self.parse_optional_type_parameters()?;

        let superclass = if self.check(TokenKind::Extends) {
            let extends = self.advance()?.location;
            let ty = self.parse_class_type()?;
            Some(Node::parent(Rule::Superclass, extends, None, vec![ty]))
        } else {
            None
        };

        let interfaces = if self.match_token(TokenKind::Implements)? {
            Some(self.parse_type_list(ListKind::Interfaces)?)
        } else {
            None
        };

        let body = self.parse_class_body()?;

        Ok(Node::parent(
            Rule::ClassDeclaration,
            location,
            None,
            present([
                Some(modifiers),
                Some(name),
                type_parameters,
                superclass,
                interfaces,
                Some(body),
            ]),
        ))
    }

    fn parse_interface_declaration(&mut self, modifiers: Node) -> ParseResult<Node> {
        let location = modifiers.location().clone();
        let modifiers = specialize_modifiers(modifiers, ModifierSite::Interface)?;
        self.advance()?;

        let name = identifier_node(self.expect_identifier("after 'interface'")?);
        let type_parameters = self.parse_optional_type_parameters()?;

        let extends = if self.match_token(TokenKind::Extends)? {
            Some(self.parse_type_list(ListKind::ExtendsInterfaces)?)
        } else {
            None
        };

        let body = self.parse_interface_body()?;

        Ok(Node::parent(
            Rule::InterfaceDeclaration,
            location,
            None,
            present([Some(modifiers), Some(name), type_parameters, extends, Some(body)]),
        ))
    }

    fn parse_enum_declaration(&mut self, modifiers: Node) -> ParseResult<Node> {
        let location = modifiers.location().clone();
        let modifiers = specialize_modifiers(modifiers, ModifierSite::Enum)?;
        self.advance()?;

        let name = identifier_node(self.expect_identifier("after 'enum'")?);
        let interfaces = if self.match_token(TokenKind::Implements)? {
            Some(self.parse_type_list(ListKind::Interfaces)?)
        } else {
            None
        };

        let body = self.parse_enum_body()?;

        Ok(Node::parent(
            Rule::EnumDeclaration,
            location,
            None,
            present([Some(modifiers), Some(name), interfaces, Some(body)]),
        ))
    }

    fn parse_optional_type_parameters(&mut self) -> ParseResult<Option<Node>> {
        if self.check(TokenKind::Lt) {
            self.parse_type_parameters().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Parse `{ members }` of a class or anonymous class.
    pub fn parse_class_body(&mut self) -> ParseResult<Node> {
        let location = self
            .expect_token(TokenKind::LBrace, "to open class body")?
            .location;

        let members = self.nested(Self::parse_class_members)?;
        self.expect_token(TokenKind::RBrace, "to close class body")?;

        Ok(Node::list(Rule::ClassBody, location, ListKind::ClassMembers, members))
    }

    fn parse_class_members(&mut self) -> ParseResult<Vec<Node>> {
        let mut members = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            if let Some(member) = self.parse_class_body_declaration()? {
                members.push(member);
            }
        }
        Ok(members)
    }

    /// One member of a class body. A stray `;` yields `None`.
    pub fn parse_class_body_declaration(&mut self) -> ParseResult<Option<Node>> {
        if self.match_token(TokenKind::Semicolon)? {
            return Ok(None);
        }

        let location = self.current_location();
        if self.check(TokenKind::LBrace) {
            let block = self.parse_block()?;
            return Ok(Some(Node::parent(Rule::Initializer, location, None, vec![block])));
        }
        if self.check(TokenKind::Static) && self.peek_ahead(1)? == TokenKind::LBrace {
            self.advance()?;
            let block = self.parse_block()?;
            return Ok(Some(Node::parent(
                Rule::Initializer,
                location,
                Some(Operator::Static),
                vec![block],
            )));
        }

        let modifiers = self.parse_modifiers()?;
        self.parse_member_declaration(modifiers, BodyKind::Class).map(Some)
    }

    pub fn parse_interface_body(&mut self) -> ParseResult<Node> {
        let location = self
            .expect_token(TokenKind::LBrace, "to open interface body")?
            .location;

        let mut members = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            if self.match_token(TokenKind::Semicolon)? {
                continue;
            }
            let modifiers = self.parse_modifiers()?;
            members.push(self.parse_member_declaration(modifiers, BodyKind::Interface)?);
        }
        self.expect_token(TokenKind::RBrace, "to close interface body")?;

        Ok(Node::list(
            Rule::InterfaceBody,
            location,
            ListKind::InterfaceMembers,
            members,
        ))
    }

    /// Nested type, constructor, method, or field/constant after the
    /// member's modifiers.
    fn parse_member_declaration(&mut self, modifiers: Node, body: BodyKind) -> ParseResult<Node> {
        if self.check_any(&[TokenKind::Class, TokenKind::Interface, TokenKind::Enum]) {
            return self.parse_type_declaration_rest(modifiers);
        }

        let location = modifiers.location().clone();
        let type_parameters = self.parse_optional_type_parameters()?;

        if body == BodyKind::Class
            && self.check(TokenKind::Identifier)
            && self.peek_ahead(1)? == TokenKind::LParen
        {
            return self.parse_constructor_declaration(location, modifiers, type_parameters);
        }

        let result_type = self.parse_result_type()?;

        if self.check(TokenKind::Identifier) && self.peek_ahead(1)? == TokenKind::LParen {
            let site = match body {
                BodyKind::Class => ModifierSite::Method,
                BodyKind::Interface => ModifierSite::InterfaceMethod,
            };
            let modifiers = specialize_modifiers(modifiers, site)?;
            return self.parse_method_rest(location, modifiers, type_parameters, result_type);
        }

        if type_parameters.is_some() {
            return Err(self.unexpected("method name and '(' after type parameters"));
        }
        if result_type.rule() == Rule::VoidType {
            return Err(ParseError::grammar(
                "'void' is only allowed as a method result type",
                result_type.location().clone(),
            ));
        }

        let (rule, site) = match body {
            BodyKind::Class => (Rule::FieldDeclaration, ModifierSite::Field),
            BodyKind::Interface => (Rule::ConstantDeclaration, ModifierSite::InterfaceConstant),
        };
        let modifiers = specialize_modifiers(modifiers, site)?;
        let declarators = self.parse_variable_declarators()?;
        self.expect_token(TokenKind::Semicolon, "after field declaration")?;

        Ok(Node::parent(rule, location, None, vec![modifiers, result_type, declarators]))
    }

    /// Method from its name onward; modifiers are already specialized.
    fn parse_method_rest(
        &mut self,
        location: Location,
        modifiers: Node,
        type_parameters: Option<Node>,
        result_type: Node,
    ) -> ParseResult<Node> {
        let name = self.parse_identifier()?;
        let parameters = self.parse_formal_parameters()?;
        // `int values()[]` declares an array result
        let result_type = self.parse_dims(result_type)?;
        let throws = self.parse_throws()?;

        let body = if self.check(TokenKind::LBrace) {
            Some(self.parse_block()?)
        } else {
            self.expect_token(TokenKind::Semicolon, "or method body after method header")?;
            None
        };

        Ok(Node::parent(
            Rule::MethodDeclaration,
            location,
            None,
            present([
                Some(modifiers),
                type_parameters,
                Some(result_type),
                Some(name),
                Some(parameters),
                throws,
                body,
            ]),
        ))
    }

    fn parse_constructor_declaration(
        &mut self,
        location: Location,
        modifiers: Node,
        type_parameters: Option<Node>,
    ) -> ParseResult<Node> {
        let modifiers = specialize_modifiers(modifiers, ModifierSite::Constructor)?;
        let name = self.parse_identifier()?;
        let parameters = self.parse_formal_parameters()?;
        let throws = self.parse_throws()?;
        let body = self.parse_constructor_body()?;

        Ok(Node::parent(
            Rule::ConstructorDeclaration,
            location,
            None,
            present([
                Some(modifiers),
                type_parameters,
                Some(name),
                Some(parameters),
                throws,
                Some(body),
            ]),
        ))
    }

    fn parse_throws(&mut self) -> ParseResult<Option<Node>> {
        if self.match_token(TokenKind::Throws)? {
            self.parse_type_list(ListKind::Throws).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Parse formal parameter list: (Type name, final Type... rest)
    pub fn parse_formal_parameters(&mut self) -> ParseResult<Node> {
        let location = self
            .expect_token(TokenKind::LParen, "to open parameter list")?
            .location;

        let mut parameters = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                let parameter = self.parse_formal_parameter()?;
                let variadic = parameter.operator() == Some(Operator::Variadic);
                let parameter_location = parameter.location().clone();
                parameters.push(parameter);

                if !self.match_token(TokenKind::Comma)? {
                    break;
                }
                if variadic {
                    return Err(ParseError::grammar(
                        "variadic parameter must be the last parameter",
                        parameter_location,
                    ));
                }
            }
        }
        self.expect_token(TokenKind::RParen, "to close parameter list")?;

        Ok(Node::list(
            Rule::FormalParameters,
            location,
            ListKind::FormalParameters,
            parameters,
        ))
    }

    pub(crate) fn parse_formal_parameter(&mut self) -> ParseResult<Node> {
        let location = self.current_location();
        let modifiers = self.parse_variable_modifiers()?;
        let ty = self.parse_type()?;
        let op = if self.match_token(TokenKind::Ellipsis)? {
            Some(Operator::Variadic)
        } else {
            None
        };
        let name = self.parse_identifier()?;

        Ok(Node::parent(Rule::FormalParameter, location, op, vec![modifiers, ty, name]))
    }

    fn parse_constructor_body(&mut self) -> ParseResult<Node> {
        let location = self
            .expect_token(TokenKind::LBrace, "to open constructor body")?
            .location;

        let invocation = self.parse_explicit_constructor_invocation()?;
        let statements_location = self.current_location();
        let statements = self.parse_block_statements(&[TokenKind::RBrace])?;
        self.expect_token(TokenKind::RBrace, "to close constructor body")?;

        let statements = Node::list(
            Rule::StatementList,
            statements_location,
            ListKind::BlockStatements,
            statements,
        );
        Ok(Node::parent(
            Rule::ConstructorBody,
            location,
            None,
            present([invocation, Some(statements)]),
        ))
    }

    /// `this(...)`, `super(...)` or `primary.super(...)` opening a
    /// constructor body, if present.
    fn parse_explicit_constructor_invocation(&mut self) -> ParseResult<Option<Node>> {
        let location = self.current_location();

        let unqualified = self.lookahead(|p| {
            if p.check(TokenKind::Lt) {
                p.parse_type_arguments()?;
            }
            Ok(p.check_any(&[TokenKind::This, TokenKind::Super])
                && p.peek_ahead(1)? == TokenKind::LParen)
        })?;

        if unqualified {
            let type_arguments = if self.check(TokenKind::Lt) {
                Some(self.parse_type_arguments()?)
            } else {
                None
            };
            let keyword = self.advance()?;
            let op = if keyword.is(TokenKind::This) {
                Operator::This
            } else {
                Operator::Super
            };
            let arguments = self.parse_arguments()?;
            self.expect_token(TokenKind::Semicolon, "after constructor invocation")?;

            return Ok(Some(Node::parent(
                Rule::ExplicitConstructorInvocation,
                location,
                Some(op),
                present([type_arguments, Some(arguments)]),
            )));
        }

        if !self.at_qualified_super()? {
            return Ok(None);
        }
        let Some((primary, type_arguments)) =
            self.attempt("qualified superclass constructor invocation", Self::qualified_super_head)?
        else {
            return Ok(None);
        };
        let arguments = self.parse_arguments()?;
        self.expect_token(TokenKind::Semicolon, "after constructor invocation")?;

        Ok(Some(Node::parent(
            Rule::ExplicitConstructorInvocation,
            location,
            Some(Operator::QualifiedSuper),
            present([Some(primary), type_arguments, Some(arguments)]),
        )))
    }

    /// Token scan over the first statement: true when a `.` at bracket depth
    /// zero is followed by `super (` or by type arguments. Only then is the
    /// statement worth parsing as a qualified `super(...)`.
    fn at_qualified_super(&mut self) -> ParseResult<bool> {
        self.lookahead(|p| {
            let mut depth = 0usize;
            loop {
                match p.kind() {
                    TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => depth += 1,
                    TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                        if depth == 0 {
                            return Ok(false);
                        }
                        depth -= 1;
                    }
                    TokenKind::Semicolon if depth == 0 => return Ok(false),
                    TokenKind::EndOfInput => return Ok(false),
                    TokenKind::Dot if depth == 0 => match p.peek_ahead(1)? {
                        TokenKind::Lt => return Ok(true),
                        TokenKind::Super if p.peek_ahead(2)? == TokenKind::LParen => return Ok(true),
                        _ => {}
                    },
                    _ => {}
                }
                p.advance()?;
            }
        })
    }

    /// `Primary . [TypeArguments] super` in front of `(`
    fn qualified_super_head(&mut self) -> ParseResult<(Node, Option<Node>)> {
        let primary = self.parse_primary_unchecked()?;
        self.expect_token(TokenKind::Dot, "before 'super'")?;
        let type_arguments = if self.check(TokenKind::Lt) {
            Some(self.parse_type_arguments()?)
        } else {
            None
        };
        self.expect_token(TokenKind::Super, "in qualified constructor invocation")?;
        if !self.check(TokenKind::LParen) {
            return Err(self.unexpected("'(' after 'super'"));
        }
        Ok((primary, type_arguments))
    }

    fn parse_enum_body(&mut self) -> ParseResult<Node> {
        let location = self
            .expect_token(TokenKind::LBrace, "to open enum body")?
            .location;

        let constants_location = self.current_location();
        let mut constants = Vec::new();
        while self.check(TokenKind::Identifier) {
            constants.push(self.parse_enum_constant()?);
            if !self.match_token(TokenKind::Comma)? {
                break;
            }
        }

        let members_location = self.current_location();
        let members = if self.match_token(TokenKind::Semicolon)? {
            self.parse_class_members()?
        } else {
            Vec::new()
        };
        self.expect_token(TokenKind::RBrace, "to close enum body")?;

        Ok(Node::parent(
            Rule::EnumBody,
            location,
            None,
            vec![
                Node::list(
                    Rule::EnumConstants,
                    constants_location,
                    ListKind::EnumConstants,
                    constants,
                ),
                Node::list(Rule::ClassBody, members_location, ListKind::ClassMembers, members),
            ],
        ))
    }

    fn parse_enum_constant(&mut self) -> ParseResult<Node> {
        let location = self.current_location();
        let name = self.parse_identifier()?;
        let arguments = if self.check(TokenKind::LParen) {
            Some(self.parse_arguments()?)
        } else {
            None
        };
        let body = if self.check(TokenKind::LBrace) {
            Some(self.parse_class_body()?)
        } else {
            None
        };
        let op = body.as_ref().map(|_| Operator::AnonymousClass);

        Ok(Node::parent(
            Rule::EnumConstant,
            location,
            op,
            present([Some(name), arguments, body]),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declaration(source: &str) -> Node {
        let mut parser = Parser::from_source("test", source).unwrap();
        let node = parser.parse_type_declaration().unwrap();
        parser.expect_end().unwrap();
        node.collapsed()
    }

    fn declaration_error(source: &str) -> ParseError {
        let mut parser = Parser::from_source("test", source).unwrap();
        parser
            .parse_type_declaration()
            .and_then(|_| parser.expect_end())
            .expect_err("expected a syntax error")
    }

    fn members(class: &Node) -> Vec<&Node> {
        class
            .find_list(ListKind::ClassMembers)
            .map(Node::children)
            .unwrap_or_default()
    }

    #[test]
    fn test_class_header() {
        let class = declaration(
            "public final class Box<T extends Number> extends Base implements Comparable<Box<T>>, Cloneable {}",
        );
        assert_eq!(class.rule(), Rule::ClassDeclaration);
        assert_eq!(class.identifier(), Some("Box"));
        assert_eq!(class.find_list(ListKind::ClassModifiers).map(Node::len), Some(2));
        assert!(class.find_list(ListKind::TypeParameters).is_some());
        assert_eq!(
            class.find(Rule::Superclass).and_then(|s| s.child(0)).and_then(Node::dotted_name).as_deref(),
            Some("Base")
        );
        assert_eq!(class.find_list(ListKind::Interfaces).map(Node::len), Some(2));
    }

    #[test]
    fn test_class_members() {
        let class = declaration(
            "class A {
                private int count = 0, limit;
                static { init(); }
                { count = 1; }
                ;
                A(int count) { this.count = count; }
                public <T> T first(List<T> items) throws IOException { return items.get(0); }
                abstract int[] values()[];
                static class Inner {}
            }",
        );
        let members = members(&class);
        let rules: Vec<_> = members.iter().map(|m| m.rule()).collect();
        assert_eq!(
            rules,
            vec![
                Rule::FieldDeclaration,
                Rule::Initializer,
                Rule::Initializer,
                Rule::ConstructorDeclaration,
                Rule::MethodDeclaration,
                Rule::MethodDeclaration,
                Rule::ClassDeclaration,
            ]
        );

        assert_eq!(members[1].operator(), Some(Operator::Static));
        assert_eq!(members[2].operator(), None);

        let generic = members[4];
        assert!(generic.find_list(ListKind::TypeParameters).is_some());
        assert_eq!(generic.find_list(ListKind::Throws).map(Node::len), Some(1));
        assert!(generic.find(Rule::Block).is_some());

        let abstract_method = members[5];
        assert!(abstract_method.find(Rule::Block).is_none());
        let result = abstract_method.find(Rule::ArrayType).unwrap();
        assert_eq!(result.child(0).map(Node::rule), Some(Rule::ArrayType));
    }

    #[test]
    fn test_varargs() {
        let class = declaration("class A { void log(String format, Object... args) {} }");
        let parameters = members(&class)[0].find_list(ListKind::FormalParameters).unwrap();
        assert_eq!(parameters.child(1).and_then(Node::operator), Some(Operator::Variadic));

        let err = declaration_error("class A { void log(Object... args, int x) {} }");
        assert_eq!(err.to_string(), "variadic parameter must be the last parameter");
        assert_eq!(err.location().unwrap().column(), 20);
    }

    #[test]
    fn test_explicit_constructor_invocations() {
        let class = declaration(
            "class A {
                A() { this(0); }
                A(int x) { <String>super(x); run(); }
                A(Outer o) { o.super(); }
                A(long x) { run(); }
            }",
        );
        let members = members(&class);
        let invocation = |i: usize| {
            members[i]
                .find(Rule::ConstructorBody)
                .and_then(|body| body.find(Rule::ExplicitConstructorInvocation))
                .and_then(Node::operator)
        };

        assert_eq!(invocation(0), Some(Operator::This));
        assert_eq!(invocation(1), Some(Operator::Super));
        assert_eq!(invocation(2), Some(Operator::QualifiedSuper));
        assert_eq!(invocation(3), None);

        let body = members[1].find(Rule::ConstructorBody).unwrap();
        assert_eq!(body.find_list(ListKind::BlockStatements).map(Node::len), Some(1));
    }

    #[test]
    fn test_qualified_super_forms() {
        let class = declaration(
            "class A {
                A(Outer[] o) { o[0].super(); }
                A(Outer o) { make(o, 1).<String>super(o); }
                A() { o.run(x.y); }
            }",
        );
        let members = members(&class);
        let invocation = |i: usize| {
            members[i]
                .find(Rule::ConstructorBody)
                .and_then(|body| body.find(Rule::ExplicitConstructorInvocation))
                .and_then(Node::operator)
        };

        assert_eq!(invocation(0), Some(Operator::QualifiedSuper));
        assert_eq!(invocation(1), Some(Operator::QualifiedSuper));
        assert_eq!(invocation(2), None);
    }

    #[test]
    fn test_nested_constructor_bodies() {
        // every constructor body starts with a statement holding the next level
        let mut body = String::from("run();");
        for level in 0..12 {
            body = format!("new Object() {{ class L{level} {{ L{level}() {{ {body} }} }} }}.hashCode();");
        }
        let class = declaration(&format!("class A {{ A() {{ {body} }} }}"));

        let body = members(&class)[0].find(Rule::ConstructorBody).unwrap();
        assert!(body.find(Rule::ExplicitConstructorInvocation).is_none());

        fn constructors(node: &Node) -> usize {
            let own = usize::from(node.rule() == Rule::ConstructorDeclaration);
            own + node.children().into_iter().map(constructors).sum::<usize>()
        }
        assert_eq!(constructors(&class), 13);
    }

    #[test]
    fn test_interface_members() {
        let interface = declaration(
            "public interface Shape extends Comparable<Shape> {
                double PI = 3.14;
                double area();
                default String describe() { return \"shape\"; }
                static <T> T identity(T value) { return value; }
            }",
        );
        assert_eq!(interface.rule(), Rule::InterfaceDeclaration);
        assert_eq!(interface.find_list(ListKind::ExtendsInterfaces).map(Node::len), Some(1));

        let body = interface.find_list(ListKind::InterfaceMembers).unwrap();
        assert_eq!(body.len(), 4);
        assert_eq!(body.child(0).map(Node::rule), Some(Rule::ConstantDeclaration));
        let default_method = body.child(2).unwrap();
        assert_eq!(
            default_method.child(0).and_then(Node::list_kind),
            Some(ListKind::InterfaceMethodModifiers)
        );
    }

    #[test]
    fn test_enum_declaration() {
        let declaration = declaration(
            "enum Planet implements Named {
                MERCURY(3.3e23), EARTH(5.9e24) { String named() { return \"home\"; } },;
                private final double mass;
                Planet(double mass) { this.mass = mass; }
            }",
        );
        let body = declaration.find(Rule::EnumBody).unwrap();
        let constants = body.find_list(ListKind::EnumConstants).unwrap();
        assert_eq!(constants.len(), 2);
        assert_eq!(constants.child(0).and_then(Node::operator), None);
        assert_eq!(constants.child(1).and_then(Node::operator), Some(Operator::AnonymousClass));
        assert_eq!(body.find_list(ListKind::ClassMembers).map(Node::len), Some(2));
    }

    #[test]
    fn test_bare_enum() {
        let declaration = declaration("enum Color { RED, GREEN }");
        let body = declaration.find(Rule::EnumBody).unwrap();
        assert_eq!(body.find_list(ListKind::EnumConstants).map(Node::len), Some(2));
        assert_eq!(body.find_list(ListKind::ClassMembers).map(Node::len), Some(0));
    }

    #[test]
    fn test_member_modifier_errors() {
        let err = declaration_error("class A { transient void run() {} }");
        assert_eq!(err.to_string(), "modifier 'transient' is not allowed on method declarations");

        let err = declaration_error("class A { abstract A() {} }");
        assert_eq!(err.to_string(), "modifier 'abstract' is not allowed on constructor declarations");

        let err = declaration_error("interface I { protected int X = 1; }");
        assert_eq!(
            err.to_string(),
            "modifier 'protected' is not allowed on interface constant declarations"
        );

        let err = declaration_error("volatile class A {}");
        assert_eq!(err.to_string(), "modifier 'volatile' is not allowed on class declarations");
    }

    #[test]
    fn test_void_field() {
        let err = declaration_error("class A { void x; }");
        assert!(err.to_string().contains("'void'"));
    }
}
