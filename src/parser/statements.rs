//! Statement parsing implementation
//!
//! This module handles blocks and every statement form:
//!
//! - Local declarations: `int x = 42;`, `final var it = list.iterator();`, local classes
//! - Control flow: `if`, `while`, `do`, `for`, enhanced `for`, `switch`
//! - Jumps: `return`, `break`, `continue`, `throw`
//! - `try`/`catch`/`finally`, with or without resources
//! - `synchronized`, `assert`, labeled statements and expression statements
//!
//! # Grammar
//!
//! ```text
//! Block          ::= "{" { BlockStatement } "}"
//! BlockStatement ::= LocalVariableDeclaration ";" | LocalClassDeclaration | Statement
//! Statement      ::= Block | ";" | ExpressionStatement | IfStatement | ...
//! ```
//!
//! A local variable declaration is recognised by looking ahead for a type
//! followed by an identifier; everything else starting with a name is an
//! expression statement.

use crate::parser::ast::{ListKind, Node, Operator, Rule};
use crate::parser::error::{ParseError, ParseResult};
use crate::parser::expressions::{is_statement_expression, present};
use crate::parser::parse::Parser;
use crate::parser::token::TokenKind;

impl Parser {
    /// Parse `{ ... }`
    pub fn parse_block(&mut self) -> ParseResult<Node> {
        let location = self.expect_token(TokenKind::LBrace, "to open block")?.location;
        let statements = self.parse_block_statements(&[TokenKind::RBrace])?;
        self.expect_token(TokenKind::RBrace, "to close block")?;

        Ok(Node::list(Rule::Block, location, ListKind::BlockStatements, statements))
    }

    /// Parse block statements up to (not including) one of `terminators`.
    pub(crate) fn parse_block_statements(&mut self, terminators: &[TokenKind]) -> ParseResult<Vec<Node>> {
        let mut statements = Vec::new();

        while !self.check_any(terminators) && !self.is_at_end() {
            statements.push(self.parse_block_statement()?);
        }

        Ok(statements)
    }

    pub fn parse_block_statement(&mut self) -> ParseResult<Node> {
        let kind = self.kind();

        let inner = if matches!(kind, TokenKind::Class | TokenKind::Interface | TokenKind::Enum)
            || (kind.is_modifier() && kind != TokenKind::Synchronized && self.at_local_class()?)
        {
            self.parse_type_declaration()?
        } else if self.at_local_variable()? {
            let declaration = self.parse_local_variable_declaration()?;
            self.expect_token(TokenKind::Semicolon, "after variable declaration")?;
            declaration
        } else {
            self.parse_statement()?
        };

        Ok(Node::wrap(Rule::BlockStatement, inner))
    }

    fn at_local_class(&mut self) -> ParseResult<bool> {
        self.lookahead(|p| {
            while p.kind().is_modifier() {
                p.advance()?;
            }
            Ok(p.check_any(&[TokenKind::Class, TokenKind::Interface, TokenKind::Enum]))
        })
    }

    /// A local variable declaration starts here: `final`, or a type directly
    /// followed by an identifier.
    pub(crate) fn at_local_variable(&mut self) -> ParseResult<bool> {
        if self.check(TokenKind::Final) {
            return Ok(true);
        }
        if !self.check(TokenKind::Identifier) && !self.kind().is_primitive_type() {
            return Ok(false);
        }
        self.lookahead(|p| {
            p.parse_type()?;
            Ok(p.check(TokenKind::Identifier))
        })
    }

    pub fn parse_local_variable_declaration(&mut self) -> ParseResult<Node> {
        let location = self.current_location();
        let modifiers = self.parse_variable_modifiers()?;
        let ty = self.parse_type()?;
        let declarators = self.parse_variable_declarators()?;

        Ok(Node::parent(
            Rule::LocalVariableDeclaration,
            location,
            None,
            vec![modifiers, ty, declarators],
        ))
    }

    /// `a = 1, b, c = {1, 2}`
    pub(crate) fn parse_variable_declarators(&mut self) -> ParseResult<Node> {
        let location = self.current_location();
        let mut declarators = vec![self.parse_variable_declarator()?];
        while self.match_token(TokenKind::Comma)? {
            declarators.push(self.parse_variable_declarator()?);
        }

        Ok(Node::list(
            Rule::VariableDeclarators,
            location,
            ListKind::VariableDeclarators,
            declarators,
        ))
    }

    fn parse_variable_declarator(&mut self) -> ParseResult<Node> {
        let location = self.current_location();
        let mut children = vec![self.parse_identifier()?];
        if self.match_token(TokenKind::Eq)? {
            children.push(self.parse_variable_initializer()?);
        }
        Ok(Node::parent(Rule::VariableDeclarator, location, None, children))
    }

    /// Parse a statement
    pub fn parse_statement(&mut self) -> ParseResult<Node> {
        self.nested(Self::parse_unnested_statement)
    }

    fn parse_unnested_statement(&mut self) -> ParseResult<Node> {
        let location = self.current_location();

        let statement = match self.kind() {
            TokenKind::LBrace => self.parse_block()?,
            TokenKind::Semicolon => {
                self.advance()?;
                Node::parent(Rule::EmptyStatement, location, None, Vec::new())
            }
            TokenKind::If => self.parse_if_statement()?,
            TokenKind::While => self.parse_while_statement()?,
            TokenKind::Do => self.parse_do_statement()?,
            TokenKind::For => self.parse_for_statement()?,
            TokenKind::Switch => self.parse_switch_statement()?,
            TokenKind::Break => self.parse_jump(Rule::BreakStatement)?,
            TokenKind::Continue => self.parse_jump(Rule::ContinueStatement)?,
            TokenKind::Return => self.parse_return_statement()?,
            TokenKind::Throw => self.parse_throw_statement()?,
            TokenKind::Synchronized => self.parse_synchronized_statement()?,
            TokenKind::Try => self.parse_try_statement()?,
            TokenKind::Assert => self.parse_assert_statement()?,
            TokenKind::Identifier if self.peek_ahead(1)? == TokenKind::Colon => {
                self.parse_labeled_statement()?
            }
            _ => self.parse_expression_statement()?,
        };

        Ok(Node::wrap(Rule::Statement, statement))
    }

    /// `( expr )` after a control keyword
    fn parse_condition(&mut self, keyword: &str) -> ParseResult<Node> {
        self.expect_token(TokenKind::LParen, &format!("after {keyword}"))?;
        let condition = self.parse_expression()?;
        self.expect_token(TokenKind::RParen, &format!("after {keyword} condition"))?;
        Ok(condition)
    }

    fn parse_if_statement(&mut self) -> ParseResult<Node> {
        let location = self.advance()?.location;
        let condition = self.parse_condition("'if'")?;
        let then_branch = self.parse_statement()?;

        if self.match_token(TokenKind::Else)? {
            let else_branch = self.parse_statement()?;
            return Ok(Node::parent(
                Rule::IfStatement,
                location,
                Some(Operator::IfElse),
                vec![condition, then_branch, else_branch],
            ));
        }

        Ok(Node::parent(
            Rule::IfStatement,
            location,
            Some(Operator::If),
            vec![condition, then_branch],
        ))
    }

    fn parse_while_statement(&mut self) -> ParseResult<Node> {
        let location = self.advance()?.location;
        let condition = self.parse_condition("'while'")?;
        let body = self.parse_statement()?;
        Ok(Node::parent(Rule::WhileStatement, location, None, vec![condition, body]))
    }

    fn parse_do_statement(&mut self) -> ParseResult<Node> {
        let location = self.advance()?.location;
        let body = self.parse_statement()?;
        self.expect_token(TokenKind::While, "after do body")?;
        let condition = self.parse_condition("'while'")?;
        self.expect_token(TokenKind::Semicolon, "after do-while")?;
        Ok(Node::parent(Rule::DoStatement, location, None, vec![body, condition]))
    }

    fn parse_for_statement(&mut self) -> ParseResult<Node> {
        let location = self.advance()?.location;
        self.expect_token(TokenKind::LParen, "after 'for'")?;

        if let Some((modifiers, ty, name)) = self.attempt("enhanced for", Self::enhanced_for_head)? {
            let iterable = self.parse_expression()?;
            self.expect_token(TokenKind::RParen, "to close for header")?;
            let body = self.parse_statement()?;
            return Ok(Node::parent(
                Rule::EnhancedForStatement,
                location,
                None,
                vec![modifiers, ty, name, iterable, body],
            ));
        }

        let init_location = self.current_location();
        let init = if self.check(TokenKind::Semicolon) {
            Vec::new()
        } else if self.at_local_variable()? {
            vec![self.parse_local_variable_declaration()?]
        } else {
            self.parse_statement_expressions()?
        };
        self.expect_token(TokenKind::Semicolon, "after for initializer")?;

        let condition_location = self.current_location();
        let condition = if self.check(TokenKind::Semicolon) {
            Vec::new()
        } else {
            vec![self.parse_expression()?]
        };
        self.expect_token(TokenKind::Semicolon, "after for condition")?;

        let update_location = self.current_location();
        let update = if self.check(TokenKind::RParen) {
            Vec::new()
        } else {
            self.parse_statement_expressions()?
        };
        self.expect_token(TokenKind::RParen, "to close for header")?;

        let body = self.parse_statement()?;

        Ok(Node::parent(
            Rule::ForStatement,
            location,
            None,
            vec![
                Node::list(Rule::ForInit, init_location, ListKind::ForInit, init),
                Node::parent(Rule::ForCondition, condition_location, None, condition),
                Node::list(Rule::ForUpdate, update_location, ListKind::ForUpdate, update),
                body,
            ],
        ))
    }

    /// `[final] Type name :`
    fn enhanced_for_head(&mut self) -> ParseResult<(Node, Node, Node)> {
        let modifiers = self.parse_variable_modifiers()?;
        let ty = self.parse_type()?;
        let name = self.parse_identifier()?;
        self.expect_token(TokenKind::Colon, "in enhanced for")?;
        Ok((modifiers, ty, name))
    }

    fn parse_switch_statement(&mut self) -> ParseResult<Node> {
        let location = self.advance()?.location;
        let selector = self.parse_condition("'switch'")?;

        let block_location = self
            .expect_token(TokenKind::LBrace, "to open switch block")?
            .location;
        let mut groups = Vec::new();
        while !self.check(TokenKind::RBrace) {
            groups.push(self.parse_switch_group()?);
        }
        self.expect_token(TokenKind::RBrace, "to close switch block")?;

        let block = Node::list(Rule::SwitchBlock, block_location, ListKind::SwitchGroups, groups);
        Ok(Node::parent(Rule::SwitchStatement, location, None, vec![selector, block]))
    }

    /// One or more labels followed by the statements they guard.
    fn parse_switch_group(&mut self) -> ParseResult<Node> {
        let location = self.current_location();

        let mut labels = Vec::new();
        while self.check_any(&[TokenKind::Case, TokenKind::Default]) {
            labels.push(self.parse_switch_label()?);
        }
        if labels.is_empty() {
            return Err(self.unexpected("'case' or 'default'"));
        }

        let statements_location = self.current_location();
        let statements = self.parse_block_statements(&[
            TokenKind::Case,
            TokenKind::Default,
            TokenKind::RBrace,
        ])?;

        Ok(Node::parent(
            Rule::SwitchGroup,
            location.clone(),
            None,
            vec![
                Node::list(Rule::SwitchLabels, location, ListKind::SwitchLabels, labels),
                Node::list(
                    Rule::StatementList,
                    statements_location,
                    ListKind::BlockStatements,
                    statements,
                ),
            ],
        ))
    }

    fn parse_switch_label(&mut self) -> ParseResult<Node> {
        let keyword = self.advance()?;

        if keyword.is(TokenKind::Default) {
            self.expect_token(TokenKind::Colon, "after 'default'")?;
            return Ok(Node::parent(
                Rule::SwitchLabel,
                keyword.location,
                Some(Operator::Default),
                Vec::new(),
            ));
        }

        let mut values = vec![self.parse_expression()?];
        while self.match_token(TokenKind::Comma)? {
            values.push(self.parse_expression()?);
        }
        self.expect_token(TokenKind::Colon, "after case label")?;

        Ok(Node::parent(
            Rule::SwitchLabel,
            keyword.location,
            Some(Operator::Case),
            values,
        ))
    }

    /// `break [label];` and `continue [label];`
    fn parse_jump(&mut self, rule: Rule) -> ParseResult<Node> {
        let keyword = self.advance()?;

        let mut children = Vec::new();
        if self.check(TokenKind::Identifier) {
            children.push(self.parse_identifier()?);
        }
        self.expect_token(TokenKind::Semicolon, &format!("after '{}'", keyword.text))?;

        Ok(Node::parent(rule, keyword.location, None, children))
    }

    fn parse_return_statement(&mut self) -> ParseResult<Node> {
        let location = self.advance()?.location;

        let mut children = Vec::new();
        if !self.check(TokenKind::Semicolon) {
            children.push(self.parse_expression()?);
        }
        self.expect_token(TokenKind::Semicolon, "after return")?;

        Ok(Node::parent(Rule::ReturnStatement, location, None, children))
    }

    fn parse_throw_statement(&mut self) -> ParseResult<Node> {
        let location = self.advance()?.location;
        let exception = self.parse_expression()?;
        self.expect_token(TokenKind::Semicolon, "after thrown expression")?;
        Ok(Node::parent(Rule::ThrowStatement, location, None, vec![exception]))
    }

    fn parse_synchronized_statement(&mut self) -> ParseResult<Node> {
        let location = self.advance()?.location;
        let lock = self.parse_condition("'synchronized'")?;
        let body = self.parse_block()?;
        Ok(Node::parent(Rule::SynchronizedStatement, location, None, vec![lock, body]))
    }

    fn parse_try_statement(&mut self) -> ParseResult<Node> {
        let location = self.advance()?.location;

        let resources = if self.check(TokenKind::LParen) {
            Some(self.parse_resources()?)
        } else {
            None
        };
        let block = self.parse_block()?;

        let catches_location = self.current_location();
        let mut catches = Vec::new();
        while self.check(TokenKind::Catch) {
            catches.push(self.parse_catch_clause()?);
        }

        let finally = if self.check(TokenKind::Finally) {
            let finally_location = self.advance()?.location;
            let body = self.parse_block()?;
            Some(Node::parent(Rule::FinallyClause, finally_location, None, vec![body]))
        } else {
            None
        };

        if resources.is_none() && catches.is_empty() && finally.is_none() {
            return Err(self.unexpected("'catch' or 'finally' after try block"));
        }

        let op = if resources.is_some() {
            Operator::TryWithResources
        } else {
            Operator::Try
        };
        let catches = (!catches.is_empty()).then(|| {
            Node::list(Rule::CatchClauses, catches_location, ListKind::CatchClauses, catches)
        });

        Ok(Node::parent(
            Rule::TryStatement,
            location,
            Some(op),
            present([resources, Some(block), catches, finally]),
        ))
    }

    /// `( Resource { ; Resource } [;] )`
    fn parse_resources(&mut self) -> ParseResult<Node> {
        let location = self
            .expect_token(TokenKind::LParen, "to open resource list")?
            .location;

        let mut resources = vec![self.parse_resource()?];
        while self.match_token(TokenKind::Semicolon)? {
            if self.check(TokenKind::RParen) {
                break;
            }
            resources.push(self.parse_resource()?);
        }
        self.expect_token(TokenKind::RParen, "to close resource list")?;

        Ok(Node::list(Rule::Resources, location, ListKind::Resources, resources))
    }

    fn parse_resource(&mut self) -> ParseResult<Node> {
        let location = self.current_location();

        if !self.at_local_variable()? {
            let name = self.parse_expression_name()?;
            return Ok(Node::parent(Rule::Resource, location, None, vec![name]));
        }

        let modifiers = self.parse_variable_modifiers()?;
        let ty = self.parse_type()?;
        let name = self.parse_identifier()?;
        self.expect_token(TokenKind::Eq, "in resource declaration")?;
        let value = self.parse_expression()?;

        Ok(Node::parent(
            Rule::Resource,
            location,
            None,
            vec![modifiers, ty, name, value],
        ))
    }

    /// `catch ( [final] A | B e ) { ... }`
    fn parse_catch_clause(&mut self) -> ParseResult<Node> {
        let location = self.advance()?.location;
        self.expect_token(TokenKind::LParen, "after 'catch'")?;

        let modifiers = self.parse_variable_modifiers()?;
        let types_location = self.current_location();
        let mut types = vec![self.parse_class_type()?];
        while self.match_token(TokenKind::Pipe)? {
            types.push(self.parse_class_type()?);
        }
        let name = self.parse_identifier()?;
        self.expect_token(TokenKind::RParen, "after catch parameter")?;
        let body = self.parse_block()?;

        Ok(Node::parent(
            Rule::CatchClause,
            location,
            None,
            vec![
                modifiers,
                Node::list(Rule::CatchType, types_location, ListKind::CatchTypes, types),
                name,
                body,
            ],
        ))
    }

    fn parse_labeled_statement(&mut self) -> ParseResult<Node> {
        let location = self.current_location();
        let label = self.parse_identifier()?;
        self.expect_token(TokenKind::Colon, "after label")?;
        let body = self.parse_statement()?;
        Ok(Node::parent(Rule::LabeledStatement, location, None, vec![label, body]))
    }

    fn parse_assert_statement(&mut self) -> ParseResult<Node> {
        let location = self.advance()?.location;

        let mut children = vec![self.parse_expression()?];
        if self.match_token(TokenKind::Colon)? {
            children.push(self.parse_expression()?);
        }
        self.expect_token(TokenKind::Semicolon, "after assertion")?;

        Ok(Node::parent(Rule::AssertStatement, location, None, children))
    }

    fn parse_expression_statement(&mut self) -> ParseResult<Node> {
        let location = self.current_location();
        let expr = self.parse_statement_expression()?;
        self.expect_token(TokenKind::Semicolon, "after expression")?;
        Ok(Node::parent(Rule::ExpressionStatement, location, None, vec![expr]))
    }

    fn parse_statement_expression(&mut self) -> ParseResult<Node> {
        let location = self.current_location();
        let expr = self.parse_expression()?;
        if !is_statement_expression(&expr) {
            return Err(ParseError::grammar("not a statement", location));
        }
        Ok(expr)
    }

    /// Comma-separated statement expressions, as in a `for` header.
    fn parse_statement_expressions(&mut self) -> ParseResult<Vec<Node>> {
        let mut expressions = vec![self.parse_statement_expression()?];
        while self.match_token(TokenKind::Comma)? {
            expressions.push(self.parse_statement_expression()?);
        }
        Ok(expressions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statement(source: &str) -> Node {
        let mut parser = Parser::from_source("test", source).unwrap();
        let node = parser.parse_block_statement().unwrap();
        parser.expect_end().unwrap();
        node.collapsed()
    }

    fn statement_error(source: &str) -> ParseError {
        let mut parser = Parser::from_source("test", source).unwrap();
        parser
            .parse_block_statement()
            .and_then(|_| parser.expect_end())
            .expect_err("expected a syntax error")
    }

    #[test]
    fn test_local_variable_declaration() {
        let declaration = statement("int x = 1, y;");
        assert_eq!(declaration.rule(), Rule::LocalVariableDeclaration);

        let modifiers = declaration.child(0).unwrap();
        assert_eq!(modifiers.list_kind(), Some(ListKind::VariableModifiers));
        assert!(modifiers.is_empty());

        let declarators = declaration.find_list(ListKind::VariableDeclarators).unwrap();
        assert_eq!(declarators.len(), 2);
        assert_eq!(declarators.child(0).map(Node::len), Some(2));
        assert_eq!(declarators.child(1).map(Node::len), Some(1));
    }

    #[test]
    fn test_generic_local_variable() {
        let declaration = statement("final Map<String, List<Integer>> index = new HashMap<>();");
        assert_eq!(declaration.rule(), Rule::LocalVariableDeclaration);
        assert_eq!(declaration.child(0).map(Node::len), Some(1));
        assert_eq!(declaration.child(1).and_then(Node::dotted_name).as_deref(), Some("Map"));
    }

    #[test]
    fn test_array_initializer_declarator() {
        let declaration = statement("int[][] grid = {{1, 2}, {3}};");
        let declarator = declaration
            .find_list(ListKind::VariableDeclarators)
            .and_then(|list| list.child(0))
            .unwrap();
        let initializer = declarator.child(1).unwrap();
        assert_eq!(initializer.list_kind(), Some(ListKind::ArrayElements));
        assert_eq!(initializer.len(), 2);
    }

    #[test]
    fn test_comparison_is_not_a_declaration() {
        let err = statement_error("a < b;");
        assert_eq!(err.to_string(), "not a statement");
        assert_eq!(err.location().unwrap().column(), 1);
    }

    #[test]
    fn test_expression_statement() {
        let statement = statement("count += items.size();");
        assert_eq!(statement.rule(), Rule::ExpressionStatement);
        assert_eq!(statement.child(0).and_then(Node::operator), Some(Operator::AddAssign));
    }

    #[test]
    fn test_if_else_binds_to_nearest_if() {
        let outer = statement("if (a) if (b) x(); else y();");
        assert_eq!(outer.operator(), Some(Operator::If));

        let inner = outer.child(1).unwrap();
        assert_eq!(inner.operator(), Some(Operator::IfElse));
        assert_eq!(inner.len(), 3);
    }

    #[test]
    fn test_for_statement() {
        let for_statement = statement("for (int i = 0, j = n; i < j; i++, j--) swap(i, j);");
        assert_eq!(for_statement.rule(), Rule::ForStatement);
        assert_eq!(for_statement.find_list(ListKind::ForInit).map(Node::len), Some(1));
        assert_eq!(for_statement.find(Rule::ForCondition).map(Node::len), Some(1));
        assert_eq!(for_statement.find_list(ListKind::ForUpdate).map(Node::len), Some(2));

        let forever = statement("for (;;) ;");
        assert_eq!(forever.find_list(ListKind::ForInit).map(Node::len), Some(0));
        assert_eq!(forever.find(Rule::ForCondition).map(Node::len), Some(0));
        assert_eq!(forever.child(3).map(Node::rule), Some(Rule::EmptyStatement));
    }

    #[test]
    fn test_enhanced_for() {
        let loop_ = statement("for (final String name : names) total += name.length();");
        assert_eq!(loop_.rule(), Rule::EnhancedForStatement);
        assert_eq!(loop_.len(), 5);
        assert_eq!(loop_.child(2).and_then(Node::text), Some("name"));
    }

    #[test]
    fn test_switch_groups() {
        let switch = statement(
            "switch (c) { case 'a': case 'b', 'c': n++; break; default: n = 0; }",
        );
        let block = switch.find_list(ListKind::SwitchGroups).unwrap();
        assert_eq!(block.len(), 2);

        let first = block.child(0).unwrap();
        let labels = first.find_list(ListKind::SwitchLabels).unwrap();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels.child(1).map(Node::len), Some(2));
        assert_eq!(first.find_list(ListKind::BlockStatements).map(Node::len), Some(2));

        let default = block.child(1).and_then(|group| group.child(0)).and_then(|l| l.child(0));
        assert_eq!(default.and_then(Node::operator), Some(Operator::Default));
    }

    #[test]
    fn test_try_forms() {
        let plain = statement("try { run(); } catch (IOException | RuntimeException e) { log(e); } finally { close(); }");
        assert_eq!(plain.operator(), Some(Operator::Try));
        let catches = plain.find_list(ListKind::CatchClauses).unwrap();
        let types = catches.child(0).and_then(|c| c.find_list(ListKind::CatchTypes));
        assert_eq!(types.map(Node::len), Some(2));
        assert!(plain.find(Rule::FinallyClause).is_some());

        let resources = statement("try (var in = open(); out) { copy(in, out); }");
        assert_eq!(resources.operator(), Some(Operator::TryWithResources));
        assert_eq!(resources.find_list(ListKind::Resources).map(Node::len), Some(2));

        let trailing = statement("try (Reader r = open();) { }");
        assert_eq!(trailing.find_list(ListKind::Resources).map(Node::len), Some(1));
    }

    #[test]
    fn test_try_needs_catch_or_finally() {
        let err = statement_error("try { run(); } x();");
        assert_eq!(
            err.to_string(),
            "Expected 'catch' or 'finally' after try block, found identifier 'x'"
        );
    }

    #[test]
    fn test_jumps_and_labels() {
        let labeled = statement("outer: while (true) { break outer; }");
        assert_eq!(labeled.rule(), Rule::LabeledStatement);
        assert_eq!(labeled.child(0).and_then(Node::text), Some("outer"));

        let body = labeled.child(1).and_then(|w| w.child(1)).unwrap();
        let jump = body.child(0).unwrap();
        assert_eq!(jump.rule(), Rule::BreakStatement);
        assert_eq!(jump.child(0).and_then(Node::text), Some("outer"));

        assert_eq!(statement("continue;").len(), 0);
        assert_eq!(statement("return;").rule(), Rule::ReturnStatement);
    }

    #[test]
    fn test_do_while() {
        let loop_ = statement("do { i--; } while (i > 0);");
        assert_eq!(loop_.rule(), Rule::DoStatement);
        assert_eq!(loop_.child(0).map(Node::rule), Some(Rule::Block));
    }

    #[test]
    fn test_assert_and_synchronized() {
        let assertion = statement("assert x > 0 : \"positive\";");
        assert_eq!(assertion.len(), 2);

        let sync = statement("synchronized (lock) { count++; }");
        assert_eq!(sync.rule(), Rule::SynchronizedStatement);
    }

    #[test]
    fn test_local_class() {
        let local = statement("final class Point { int x; }");
        assert_eq!(local.rule(), Rule::ClassDeclaration);
        assert_eq!(local.identifier(), Some("Point"));
    }

    #[test]
    fn test_constructor_call_outside_constructor() {
        let err = statement_error("this(1);");
        assert!(err.to_string().contains("first statement of a constructor"));
    }

    #[test]
    fn test_unclosed_block() {
        let err = statement_error("{ x();");
        assert_eq!(err.to_string(), "Expected '}' to close block, found end of input");
    }
}
