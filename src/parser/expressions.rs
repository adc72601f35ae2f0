//! Expression parsing implementation
//!
//! The precedence ladder, loosest first:
//!
//! ```text
//! Expression     ::= LambdaExpression | Assignment
//! Assignment     ::= Conditional [ AssignOp Assignment ]
//! Conditional    ::= LogicalOr [ "?" Expression ":" (Conditional | Lambda) ]
//! LogicalOr      ::= LogicalXor { "||" LogicalXor }
//! LogicalXor     ::= LogicalAnd { "^^" LogicalAnd }
//! LogicalAnd     ::= Relational { "&&" Relational }
//! Relational     ::= Compare { ("<" | ">" | "<=" | ">=") Compare | instanceof Type }
//! Compare        ::= BitwiseOr { ("==" | "!=") BitwiseOr }
//! BitwiseOr      ::= BitwiseXor { "|" BitwiseXor }
//! BitwiseXor     ::= BitwiseAnd { "^" BitwiseAnd }
//! BitwiseAnd     ::= Shift { "&" Shift }
//! Shift          ::= Additive { ("<<" | ">>" | ">>>") Additive }
//! Additive       ::= Multiplicative { ("+" | "-") Multiplicative }
//! Multiplicative ::= Cast { ("*" | "/" | "%") Cast }
//! Cast           ::= "(" Type ")" Cast | Unary
//! Unary          ::= ("+" | "-" | "!" | "~" | "++" | "--") Cast | Primary [ "++" | "--" ]
//! Primary        ::= PrimaryPrefix { Selector }
//! ```
//!
//! Binary levels loop and lean left; assignment and conditional recurse and
//! lean right. Every level returns a node of its own rule, wrapping the
//! operand when no operator of the level was found.
//!
//! Method invocations, method references and field accesses have several
//! alternatives that differ in what precedes the `.` or `::`. The parser
//! decides which prefix it has seen and calls the builder function for that
//! alternative.

use crate::parser::ast::{ListKind, Node, Operator, Rule, Value, ValueKind};
use crate::parser::error::{ParseError, ParseResult};
use crate::parser::location::Location;
use crate::parser::names::{dotted, identifier_node};
use crate::parser::parse::Parser;
use crate::parser::token::TokenKind;

type Level = &'static [(TokenKind, Operator)];

const LOGICAL_OR: Level = &[(TokenKind::OrOr, Operator::LogicalOr)];
const LOGICAL_XOR: Level = &[(TokenKind::CaretCaret, Operator::LogicalXor)];
const LOGICAL_AND: Level = &[(TokenKind::AndAnd, Operator::LogicalAnd)];
const RELATIONAL: Level = &[
    (TokenKind::Lt, Operator::Less),
    (TokenKind::Gt, Operator::Greater),
    (TokenKind::Le, Operator::LessEqual),
    (TokenKind::Ge, Operator::GreaterEqual),
];
const COMPARE: Level = &[
    (TokenKind::EqEq, Operator::Equal),
    (TokenKind::NotEq, Operator::NotEqual),
];
const BITWISE_OR: Level = &[(TokenKind::Pipe, Operator::BitOr)];
const BITWISE_XOR: Level = &[(TokenKind::Caret, Operator::BitXor)];
const BITWISE_AND: Level = &[(TokenKind::Amp, Operator::BitAnd)];
const SHIFT: Level = &[
    (TokenKind::LtLt, Operator::Shl),
    (TokenKind::GtGt, Operator::Shr),
    (TokenKind::GtGtGt, Operator::UShr),
];
const ADDITIVE: Level = &[
    (TokenKind::Plus, Operator::Add),
    (TokenKind::Minus, Operator::Sub),
];
const MULTIPLICATIVE: Level = &[
    (TokenKind::Star, Operator::Mul),
    (TokenKind::Slash, Operator::Div),
    (TokenKind::Percent, Operator::Rem),
];

fn level_operator(level: Level, kind: TokenKind) -> Option<Operator> {
    level
        .iter()
        .find(|(token, _)| *token == kind)
        .map(|(_, op)| *op)
}

fn assignment_operator(kind: TokenKind) -> Option<Operator> {
    let op = match kind {
        TokenKind::Eq => Operator::Assign,
        TokenKind::PlusEq => Operator::AddAssign,
        TokenKind::MinusEq => Operator::SubAssign,
        TokenKind::StarEq => Operator::MulAssign,
        TokenKind::SlashEq => Operator::DivAssign,
        TokenKind::PercentEq => Operator::RemAssign,
        TokenKind::AmpEq => Operator::AndAssign,
        TokenKind::PipeEq => Operator::OrAssign,
        TokenKind::CaretEq => Operator::XorAssign,
        TokenKind::LtLtEq => Operator::ShlAssign,
        TokenKind::GtGtEq => Operator::ShrAssign,
        TokenKind::GtGtGtEq => Operator::UShrAssign,
        _ => return None,
    };
    Some(op)
}

fn prefix_operator(kind: TokenKind) -> Option<Operator> {
    let op = match kind {
        TokenKind::Plus => Operator::Plus,
        TokenKind::Minus => Operator::Negate,
        TokenKind::Bang => Operator::Not,
        TokenKind::Tilde => Operator::BitNot,
        TokenKind::PlusPlus => Operator::PreIncrement,
        TokenKind::MinusMinus => Operator::PreDecrement,
        _ => return None,
    };
    Some(op)
}

impl Parser {
    /// Parse expression (top-level entry point)
    pub fn parse_expression(&mut self) -> ParseResult<Node> {
        self.nested(|p| {
            let inner = if p.at_lambda()? {
                p.parse_lambda()?
            } else {
                p.parse_assignment()?
            };
            Ok(Node::wrap(Rule::Expression, inner))
        })
    }

    /// Parse assignment (right-associative)
    fn parse_assignment(&mut self) -> ParseResult<Node> {
        let target = self.parse_conditional()?;

        let Some(op) = assignment_operator(self.kind()) else {
            return Ok(Node::wrap(Rule::AssignmentExpression, target));
        };
        let target = narrow_left_hand_side(target)?;
        self.advance()?;

        let value = if self.at_lambda()? {
            self.parse_lambda()?
        } else {
            self.parse_assignment()?
        };
        Ok(Node::binary(Rule::AssignmentExpression, op, target, value))
    }

    /// Parse conditional: condition ? when_true : when_false
    fn parse_conditional(&mut self) -> ParseResult<Node> {
        let condition = self.parse_logical_or()?;

        if !self.match_token(TokenKind::Question)? {
            return Ok(Node::wrap(Rule::ConditionalExpression, condition));
        }

        let when_true = self.parse_expression()?;
        self.expect_token(TokenKind::Colon, "in conditional expression")?;
        let when_false = if self.at_lambda()? {
            self.parse_lambda()?
        } else {
            self.parse_conditional()?
        };

        let location = condition.location().clone();
        Ok(Node::parent(
            Rule::ConditionalExpression,
            location,
            Some(Operator::Conditional),
            vec![condition, when_true, when_false],
        ))
    }

    /// One left-associative level: operands from `operand`, operators from
    /// `level`.
    fn parse_binary_level(
        &mut self,
        rule: Rule,
        level: Level,
        operand: fn(&mut Self) -> ParseResult<Node>,
    ) -> ParseResult<Node> {
        let mut left = operand(self)?;
        let mut matched = false;

        while let Some(op) = level_operator(level, self.kind()) {
            self.advance()?;
            let right = operand(self)?;
            left = Node::binary(rule, op, left, right);
            matched = true;
        }

        Ok(if matched { left } else { Node::wrap(rule, left) })
    }

    fn parse_logical_or(&mut self) -> ParseResult<Node> {
        self.parse_binary_level(Rule::LogicalOrExpression, LOGICAL_OR, Self::parse_logical_xor)
    }

    fn parse_logical_xor(&mut self) -> ParseResult<Node> {
        self.parse_binary_level(Rule::LogicalXorExpression, LOGICAL_XOR, Self::parse_logical_and)
    }

    fn parse_logical_and(&mut self) -> ParseResult<Node> {
        self.parse_binary_level(Rule::LogicalAndExpression, LOGICAL_AND, Self::parse_relational)
    }

    /// Relational operators, plus `instanceof` whose right operand is a type.
    fn parse_relational(&mut self) -> ParseResult<Node> {
        let mut left = self.parse_compare()?;
        let mut matched = false;

        loop {
            if self.match_token(TokenKind::InstanceOf)? {
                let ty = self.parse_type()?;
                left = Node::binary(Rule::RelationalExpression, Operator::InstanceOf, left, ty);
            } else if let Some(op) = level_operator(RELATIONAL, self.kind()) {
                self.advance()?;
                let right = self.parse_compare()?;
                left = Node::binary(Rule::RelationalExpression, op, left, right);
            } else {
                break;
            }
            matched = true;
        }

        Ok(if matched {
            left
        } else {
            Node::wrap(Rule::RelationalExpression, left)
        })
    }

    fn parse_compare(&mut self) -> ParseResult<Node> {
        self.parse_binary_level(Rule::CompareExpression, COMPARE, Self::parse_bitwise_or)
    }

    fn parse_bitwise_or(&mut self) -> ParseResult<Node> {
        self.parse_binary_level(Rule::BitwiseOrExpression, BITWISE_OR, Self::parse_bitwise_xor)
    }

    fn parse_bitwise_xor(&mut self) -> ParseResult<Node> {
        self.parse_binary_level(Rule::BitwiseXorExpression, BITWISE_XOR, Self::parse_bitwise_and)
    }

    fn parse_bitwise_and(&mut self) -> ParseResult<Node> {
        self.parse_binary_level(Rule::BitwiseAndExpression, BITWISE_AND, Self::parse_shift)
    }

    fn parse_shift(&mut self) -> ParseResult<Node> {
        self.parse_binary_level(Rule::ShiftExpression, SHIFT, Self::parse_additive)
    }

    fn parse_additive(&mut self) -> ParseResult<Node> {
        self.parse_binary_level(Rule::AdditiveExpression, ADDITIVE, Self::parse_multiplicative)
    }

    fn parse_multiplicative(&mut self) -> ParseResult<Node> {
        self.parse_binary_level(Rule::MultiplicativeExpression, MULTIPLICATIVE, Self::parse_cast)
    }

    /// Parse cast: (Type) operand
    fn parse_cast(&mut self) -> ParseResult<Node> {
        if self.check(TokenKind::LParen) {
            if let Some((location, ty, primitive)) = self.attempt("cast", Self::cast_head)? {
                let operand = if !primitive && self.at_lambda()? {
                    self.parse_lambda()?
                } else {
                    self.nested(Self::parse_cast)?
                };
                return Ok(Node::parent(
                    Rule::CastExpression,
                    location,
                    Some(Operator::Cast),
                    vec![ty, operand],
                ));
            }
        }

        Ok(Node::wrap(Rule::CastExpression, self.parse_unary()?))
    }

    /// `( Type )` when it is followed by something a cast can apply to.
    /// A primitive type always makes a cast; a reference type only when the
    /// next token starts an operand other than `+` or `-`.
    fn cast_head(&mut self) -> ParseResult<(Location, Node, bool)> {
        let location = self.expect_token(TokenKind::LParen, "to open cast")?.location;
        let primitive = self.kind().is_primitive_type();
        let ty = self.parse_type()?;
        self.expect_token(TokenKind::RParen, "after cast type")?;

        if !primitive && !self.starts_cast_operand() {
            return Err(self.error_here("parenthesized expression, not a cast"));
        }
        Ok((location, ty, primitive))
    }

    fn starts_cast_operand(&self) -> bool {
        let kind = self.kind();
        kind.is_literal()
            || kind.is_primitive_type()
            || matches!(
                kind,
                TokenKind::Identifier
                    | TokenKind::LParen
                    | TokenKind::Bang
                    | TokenKind::Tilde
                    | TokenKind::This
                    | TokenKind::Super
                    | TokenKind::New
                    | TokenKind::Void
            )
    }

    /// Parse unary (+ - ! ~ ++ --) and postfix (++ --)
    fn parse_unary(&mut self) -> ParseResult<Node> {
        if let Some(op) = prefix_operator(self.kind()) {
            let location = self.advance()?.location;
            let mut operand = self.nested(Self::parse_cast)?;
            if matches!(op, Operator::PreIncrement | Operator::PreDecrement) {
                operand = narrow_left_hand_side(operand)?;
            }
            return Ok(Node::unary(Rule::UnaryExpression, location, op, operand));
        }

        let primary = self.parse_primary()?;
        let op = match self.kind() {
            TokenKind::PlusPlus => Some(Operator::PostIncrement),
            TokenKind::MinusMinus => Some(Operator::PostDecrement),
            _ => None,
        };

        let expr = match op {
            Some(op) => {
                let location = primary.location().clone();
                let target = narrow_left_hand_side(primary)?;
                self.advance()?;
                Node::unary(Rule::PostfixExpression, location, op, target)
            }
            None => primary,
        };
        Ok(Node::wrap(Rule::UnaryExpression, expr))
    }

    /// Parse primary with its selectors.
    pub fn parse_primary(&mut self) -> ParseResult<Node> {
        let primary = self.parse_primary_unchecked()?;

        let qualified_super = self.check(TokenKind::Dot)
            && match self.peek_ahead(1)? {
                TokenKind::Super => self.peek_ahead(2)? == TokenKind::LParen,
                TokenKind::Lt => self.at_generic_super()?,
                _ => false,
            };
        if qualified_super {
            return Err(self.error_here(
                "qualified superclass constructor invocation is only allowed as the first statement of a constructor body",
            ));
        }
        Ok(primary)
    }

    /// Parse primary, stopping in front of `. super (`.
    pub(crate) fn parse_primary_unchecked(&mut self) -> ParseResult<Node> {
        let prefix = self.parse_primary_prefix()?;
        let expr = self.parse_selectors(prefix)?;
        Ok(Node::wrap(Rule::PrimaryExpression, expr))
    }

    fn parse_primary_prefix(&mut self) -> ParseResult<Node> {
        let location = self.current_location();

        match self.kind() {
            kind if kind.is_literal() => self.parse_literal(),
            TokenKind::This => {
                let token = self.advance()?;
                if self.check(TokenKind::LParen) {
                    return Err(ParseError::grammar(
                        "'this(...)' is only allowed as the first statement of a constructor body",
                        location,
                    ));
                }
                Ok(Node::leaf(Rule::This, location, Value::new(ValueKind::Keyword, token.text)))
            }
            TokenKind::Super => {
                self.advance()?;
                self.parse_super_suffix(location, None)
            }
            TokenKind::LParen => {
                self.advance()?;
                let inner = self.parse_expression()?;
                self.expect_token(TokenKind::RParen, "to close parenthesized expression")?;
                Ok(Node::parent(Rule::ParenthesizedExpression, location, None, vec![inner]))
            }
            TokenKind::New => self.parse_creation(),
            TokenKind::Void => {
                let ty = self.parse_result_type()?;
                self.parse_type_suffix(location, ty)
            }
            kind if kind.is_primitive_type() => {
                let base = self.parse_primitive_type()?;
                let ty = self.parse_dims(base)?;
                self.parse_type_suffix(location, ty)
            }
            TokenKind::Identifier => self.parse_name_prefix(),
            _ => Err(self.unexpected("expression")),
        }
    }

    /// Forms that start with a name: simple and qualified invocations,
    /// `Name.this`, `Name.class`, `Name.super...`, `Name::m`,
    /// `Type<Args>::m` and plain expression names.
    fn parse_name_prefix(&mut self) -> ParseResult<Node> {
        let location = self.current_location();

        if self.at_name_with_type_arguments()? {
            let head = self.attempt(
                "method reference on a parameterized type",
                Self::parameterized_reference_head,
            )?;
            if let Some(ty) = head {
                return self.parse_type_suffix(location, ty);
            }
        }

        let first = self.parse_identifier()?;

        if self.check(TokenKind::LParen) {
            let arguments = self.parse_arguments()?;
            return Ok(name_invocation(location, first, arguments));
        }

        let mut parts = vec![first];
        while self.check(TokenKind::Dot)
            && self.peek_ahead(1)? == TokenKind::Identifier
            && self.peek_ahead(2)? != TokenKind::LParen
        {
            self.advance()?;
            parts.push(self.parse_identifier()?);
        }

        if self.check(TokenKind::Dot) {
            match self.peek_ahead(1)? {
                TokenKind::Identifier => {
                    self.advance()?;
                    let method = self.parse_identifier()?;
                    let arguments = self.parse_arguments()?;
                    let name = dotted(Rule::ExpressionName, location.clone(), parts);
                    return Ok(qualified_invocation(location, name, None, method, arguments));
                }
                TokenKind::Lt if !self.at_generic_super()? => {
                    self.advance()?;
                    let type_arguments = self.parse_type_arguments()?;
                    let method = identifier_node(self.expect_identifier("after type arguments")?);
                    let arguments = self.parse_arguments()?;
                    let name = dotted(Rule::ExpressionName, location.clone(), parts);
                    return Ok(qualified_invocation(
                        location,
                        name,
                        Some(type_arguments),
                        method,
                        arguments,
                    ));
                }
                TokenKind::This => {
                    self.advance()?;
                    self.advance()?;
                    let name = dotted(Rule::QualifiedName, location.clone(), parts);
                    return Ok(Node::parent(Rule::QualifiedThis, location, None, vec![name]));
                }
                TokenKind::Class => {
                    self.advance()?;
                    self.advance()?;
                    let ty = class_type_from(location.clone(), parts);
                    return Ok(Node::parent(Rule::ClassLiteral, location, None, vec![ty]));
                }
                TokenKind::Super if self.peek_ahead(2)? != TokenKind::LParen => {
                    self.advance()?;
                    self.advance()?;
                    let name = dotted(Rule::QualifiedName, location.clone(), parts);
                    return self.parse_super_suffix(location, Some(name));
                }
                _ => {}
            }
        } else if self.check(TokenKind::LBracket) && self.peek_ahead(1)? == TokenKind::RBracket {
            let ty = self.parse_dims(class_type_from(location.clone(), parts))?;
            return self.parse_type_suffix(location, ty);
        } else if self.match_token(TokenKind::ColonColon)? {
            let (type_arguments, member) = self.parse_reference_member()?;
            return Ok(match member {
                Some(method) => {
                    let name = dotted(Rule::ExpressionName, location.clone(), parts);
                    name_reference(location, name, type_arguments, method)
                }
                None => {
                    let ty = class_type_from(location.clone(), parts);
                    constructor_reference(location, ty, type_arguments)
                }
            });
        }

        Ok(dotted(Rule::ExpressionName, location, parts))
    }

    /// True in front of `a.b.c<`, a dotted name directly followed by `<`.
    fn at_name_with_type_arguments(&mut self) -> ParseResult<bool> {
        self.lookahead(|p| {
            p.expect_identifier("in name")?;
            while p.check(TokenKind::Dot) && p.peek_ahead(1)? == TokenKind::Identifier {
                p.advance()?;
                p.advance()?;
            }
            Ok(p.check(TokenKind::Lt))
        })
    }

    /// `ClassType<Args>[]...` in front of `::`
    fn parameterized_reference_head(&mut self) -> ParseResult<Node> {
        let ty = self.parse_class_type()?;
        let ty = self.parse_dims(ty)?;
        if !self.check(TokenKind::ColonColon) {
            return Err(self.unexpected("'::' after parameterized type"));
        }
        Ok(ty)
    }

    /// After `super` (or `TypeName.super`): invocation, field access or
    /// method reference.
    fn parse_super_suffix(&mut self, location: Location, qualifier: Option<Node>) -> ParseResult<Node> {
        if self.match_token(TokenKind::ColonColon)? {
            let (type_arguments, member) = self.parse_reference_member()?;
            let Some(method) = member else {
                return Err(ParseError::grammar("'super::new' is not a method reference", location));
            };
            return Ok(match qualifier {
                Some(type_name) => type_super_reference(location, type_name, type_arguments, method),
                None => super_reference(location, type_arguments, method),
            });
        }

        if self.check(TokenKind::LParen) {
            return Err(self.error_here(
                "superclass constructor invocation is only allowed as the first statement of a constructor body",
            ));
        }

        self.expect_token(TokenKind::Dot, "after 'super'")?;
        let type_arguments = if self.check(TokenKind::Lt) {
            Some(self.parse_type_arguments()?)
        } else {
            None
        };
        let member = identifier_node(self.expect_identifier("after 'super.'")?);

        if type_arguments.is_some() || self.check(TokenKind::LParen) {
            let arguments = self.parse_arguments()?;
            return Ok(match qualifier {
                Some(type_name) => {
                    type_super_invocation(location, type_name, type_arguments, member, arguments)
                }
                None => super_invocation(location, type_arguments, member, arguments),
            });
        }

        Ok(match qualifier {
            Some(type_name) => type_super_field(location, type_name, member),
            None => super_field(location, member),
        })
    }

    /// After a type in expression position:
    /// `.class` or `::`.
    fn parse_type_suffix(&mut self, location: Location, ty: Node) -> ParseResult<Node> {
        if self.check(TokenKind::Dot) && self.peek_ahead(1)? == TokenKind::Class {
            self.advance()?;
            self.advance()?;
            return Ok(Node::parent(Rule::ClassLiteral, location, None, vec![ty]));
        }

        if ty.rule() != Rule::VoidType && self.match_token(TokenKind::ColonColon)? {
            let (type_arguments, member) = self.parse_reference_member()?;
            return Ok(match member {
                Some(method) => type_reference(location, ty, type_arguments, method),
                None => constructor_reference(location, ty, type_arguments),
            });
        }

        Err(self.unexpected("'.class' or '::' after type"))
    }

    /// True in front of `. <TypeArguments> super`, which belongs to a
    /// qualified constructor invocation rather than a generic call.
    fn at_generic_super(&mut self) -> ParseResult<bool> {
        self.lookahead(|p| {
            p.expect_token(TokenKind::Dot, "before type arguments")?;
            p.parse_type_arguments()?;
            Ok(p.check(TokenKind::Super))
        })
    }

    /// Member part of a method reference, after `::`. `None` stands for
    /// `new`.
    fn parse_reference_member(&mut self) -> ParseResult<(Option<Node>, Option<Node>)> {
        let type_arguments = if self.check(TokenKind::Lt) {
            Some(self.parse_type_arguments()?)
        } else {
            None
        };

        if self.match_token(TokenKind::New)? {
            return Ok((type_arguments, None));
        }
        let method = identifier_node(self.expect_identifier("or 'new' after '::'")?);
        Ok((type_arguments, Some(method)))
    }

    /// Postfix selectors: `.m(args)`, `.<T>m(args)`, `.field`, `[index]`
    /// and `::m`.
    fn parse_selectors(&mut self, mut expr: Node) -> ParseResult<Node> {
        loop {
            let location = expr.location().clone();

            match self.kind() {
                TokenKind::Dot => match self.peek_ahead(1)? {
                    TokenKind::Identifier => {
                        self.advance()?;
                        let member = self.parse_identifier()?;
                        expr = if self.check(TokenKind::LParen) {
                            let arguments = self.parse_arguments()?;
                            primary_invocation(location, expr, None, member, arguments)
                        } else {
                            primary_field(location, expr, member)
                        };
                    }
                    TokenKind::Lt if !self.at_generic_super()? => {
                        self.advance()?;
                        let type_arguments = self.parse_type_arguments()?;
                        let member = identifier_node(self.expect_identifier("after type arguments")?);
                        let arguments = self.parse_arguments()?;
                        expr = primary_invocation(location, expr, Some(type_arguments), member, arguments);
                    }
                    _ => break,
                },
                TokenKind::LBracket => {
                    self.advance()?;
                    let index = self.parse_expression()?;
                    self.expect_token(TokenKind::RBracket, "to close array index")?;
                    expr = Node::parent(Rule::ArrayAccess, location, None, vec![expr, index]);
                }
                TokenKind::ColonColon => {
                    self.advance()?;
                    let (type_arguments, member) = self.parse_reference_member()?;
                    let Some(method) = member else {
                        return Err(ParseError::grammar(
                            "'::new' needs a class or array type on its left",
                            location,
                        ));
                    };
                    expr = primary_reference(location, expr, type_arguments, method);
                }
                _ => break,
            }
        }

        Ok(expr)
    }

    /// Parse `new`: class instance creation or array creation.
    fn parse_creation(&mut self) -> ParseResult<Node> {
        let location = self.expect_token(TokenKind::New, "to start creation")?.location;

        let type_arguments = if self.check(TokenKind::Lt) {
            Some(self.parse_type_arguments()?)
        } else {
            None
        };

        let base = if self.kind().is_primitive_type() {
            self.parse_primitive_type()?
        } else {
            self.parse_creation_type()?
        };

        if self.check(TokenKind::LBracket) {
            if type_arguments.is_some() {
                return Err(ParseError::grammar(
                    "array creation cannot have constructor type arguments",
                    location,
                ));
            }
            return self.parse_array_creation(location, base);
        }

        if base.rule() == Rule::PrimitiveType {
            return Err(self.unexpected("'[' after primitive type in array creation"));
        }

        let arguments = self.parse_arguments()?;
        let body = if self.check(TokenKind::LBrace) {
            Some(self.parse_class_body()?)
        } else {
            None
        };
        let op = body.as_ref().map(|_| Operator::AnonymousClass);

        Ok(Node::parent(
            Rule::ClassInstanceCreation,
            location,
            op,
            present([type_arguments, Some(base), Some(arguments), body]),
        ))
    }

    /// `new T[n][m][]` or `new T[][] { ... }`; `new` and `T` are consumed.
    fn parse_array_creation(&mut self, location: Location, base: Node) -> ParseResult<Node> {
        if self.peek_ahead(1)? == TokenKind::RBracket {
            let ty = self.parse_dims(base)?;
            let initializer = self.parse_array_initializer()?;
            return Ok(Node::parent(
                Rule::ArrayCreation,
                location,
                Some(Operator::ArrayWithInitializer),
                vec![Node::wrap(Rule::Type, ty), initializer],
            ));
        }

        let dims_location = self.current_location();
        let mut dims = Vec::new();
        while self.check(TokenKind::LBracket) && self.peek_ahead(1)? != TokenKind::RBracket {
            self.advance()?;
            dims.push(self.parse_expression()?);
            self.expect_token(TokenKind::RBracket, "to close array dimension")?;
        }
        // Trailing `[]` pairs belong to the component type.
        let component = self.parse_dims(base)?;

        Ok(Node::parent(
            Rule::ArrayCreation,
            location,
            Some(Operator::ArrayWithDims),
            vec![
                Node::wrap(Rule::Type, component),
                Node::list(Rule::DimExprs, dims_location, ListKind::DimExprs, dims),
            ],
        ))
    }

    pub fn parse_array_initializer(&mut self) -> ParseResult<Node> {
        let location = self
            .expect_token(TokenKind::LBrace, "to open array initializer")?
            .location;

        let elements = self.nested(|p| {
            let mut elements = Vec::new();
            while !p.check(TokenKind::RBrace) {
                elements.push(p.parse_variable_initializer()?);
                if !p.match_token(TokenKind::Comma)? {
                    break;
                }
            }
            Ok(elements)
        })?;
        self.expect_token(TokenKind::RBrace, "to close array initializer")?;

        Ok(Node::list(
            Rule::ArrayInitializer,
            location,
            ListKind::ArrayElements,
            elements,
        ))
    }

    /// Expression or nested array initializer.
    pub(crate) fn parse_variable_initializer(&mut self) -> ParseResult<Node> {
        if self.check(TokenKind::LBrace) {
            self.parse_array_initializer()
        } else {
            self.parse_expression()
        }
    }

    /// Parse argument list: (expr, expr, ...)
    pub fn parse_arguments(&mut self) -> ParseResult<Node> {
        let location = self
            .expect_token(TokenKind::LParen, "to open argument list")?
            .location;

        let mut arguments = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                arguments.push(self.parse_expression()?);
                if !self.match_token(TokenKind::Comma)? {
                    break;
                }
            }
        }
        self.expect_token(TokenKind::RParen, "to close argument list")?;

        Ok(Node::list(Rule::ArgumentList, location, ListKind::Arguments, arguments))
    }

    /// True when a lambda starts here: `x ->` or a balanced parameter list
    /// followed by `->`.
    pub(crate) fn at_lambda(&mut self) -> ParseResult<bool> {
        match self.kind() {
            TokenKind::Identifier => Ok(self.peek_ahead(1)? == TokenKind::Arrow),
            TokenKind::LParen => self.lookahead(|p| {
                let mut depth = 0usize;
                loop {
                    match p.kind() {
                        TokenKind::LParen => depth += 1,
                        TokenKind::RParen => {
                            depth -= 1;
                            if depth == 0 {
                                p.advance()?;
                                return Ok(p.check(TokenKind::Arrow));
                            }
                        }
                        TokenKind::EndOfInput => return Ok(false),
                        _ => {}
                    }
                    p.advance()?;
                }
            }),
            _ => Ok(false),
        }
    }

    pub fn parse_lambda(&mut self) -> ParseResult<Node> {
        let location = self.current_location();
        let parameters = self.parse_lambda_parameters()?;
        self.expect_token(TokenKind::Arrow, "after lambda parameters")?;

        let (op, body) = if self.check(TokenKind::LBrace) {
            (Operator::BlockBody, self.parse_block()?)
        } else {
            (Operator::ExpressionBody, self.parse_expression()?)
        };

        Ok(Node::parent(
            Rule::LambdaExpression,
            location,
            Some(op),
            vec![parameters, body],
        ))
    }

    fn parse_lambda_parameters(&mut self) -> ParseResult<Node> {
        let location = self.current_location();

        if self.check(TokenKind::Identifier) {
            let parameter = self.parse_identifier()?;
            return Ok(Node::list(
                Rule::LambdaParameters,
                location,
                ListKind::LambdaParameters,
                vec![parameter],
            ));
        }

        self.expect_token(TokenKind::LParen, "to open lambda parameters")?;
        let mut parameters = Vec::new();
        if !self.check(TokenKind::RParen) {
            // `(a, b)` names only, or `(int a, String b)` typed
            let inferred = self.check(TokenKind::Identifier)
                && matches!(self.peek_ahead(1)?, TokenKind::Comma | TokenKind::RParen);
            loop {
                parameters.push(if inferred {
                    self.parse_identifier()?
                } else {
                    self.parse_formal_parameter()?
                });
                if !self.match_token(TokenKind::Comma)? {
                    break;
                }
            }
        }
        self.expect_token(TokenKind::RParen, "to close lambda parameters")?;

        Ok(Node::list(
            Rule::LambdaParameters,
            location,
            ListKind::LambdaParameters,
            parameters,
        ))
    }
}

/// Narrow an already parsed expression to an assignable target: walk down
/// through operator-less wrappers and parentheses to a variable name, field
/// access or array access.
pub(crate) fn narrow_left_hand_side(expr: Node) -> ParseResult<Node> {
    let location = expr.location().clone();
    let mut current = expr;

    loop {
        let descend = match current.rule() {
            Rule::ExpressionName | Rule::FieldAccess | Rule::ArrayAccess => {
                return Ok(Node::wrap(Rule::LeftHandSide, current));
            }
            Rule::ParenthesizedExpression => true,
            _ => current.is_collapsible_wrapper(),
        };

        let found = current.rule();
        match descend.then(|| current.take_only_child()).flatten() {
            Some(child) => current = child,
            None => {
                return Err(ParseError::grammar(
                    format!("Expected a variable, field access or array access, found {found}"),
                    location,
                ));
            }
        }
    }
}

/// Whether an expression may stand alone as a statement.
pub(crate) fn is_statement_expression(expr: &Node) -> bool {
    let mut current = expr;
    while current.is_collapsible_wrapper() {
        match current.child(0) {
            Some(child) => current = child,
            None => break,
        }
    }

    match current.rule() {
        Rule::AssignmentExpression => current.operator().is_some(),
        Rule::UnaryExpression => matches!(
            current.operator(),
            Some(Operator::PreIncrement | Operator::PreDecrement)
        ),
        Rule::PostfixExpression | Rule::MethodInvocation | Rule::ClassInstanceCreation => true,
        _ => false,
    }
}

/// Class type spelled by a dotted name, one segment per identifier.
fn class_type_from(location: Location, parts: Vec<Node>) -> Node {
    let segments = parts
        .into_iter()
        .map(|part| {
            let segment_location = part.location().clone();
            Node::parent(Rule::TypeSegment, segment_location, None, vec![part])
        })
        .collect();
    Node::parent(Rule::ClassType, location, None, segments)
}

/// Children from optional parts, in order.
pub(crate) fn present<const N: usize>(parts: [Option<Node>; N]) -> Vec<Node> {
    parts.into_iter().flatten().collect()
}

// Builders, one per alternative.

fn name_invocation(location: Location, method: Node, arguments: Node) -> Node {
    Node::parent(
        Rule::MethodInvocation,
        location,
        Some(Operator::NameInvocation),
        vec![method, arguments],
    )
}

fn qualified_invocation(
    location: Location,
    name: Node,
    type_arguments: Option<Node>,
    method: Node,
    arguments: Node,
) -> Node {
    Node::parent(
        Rule::MethodInvocation,
        location,
        Some(Operator::QualifiedInvocation),
        present([Some(name), type_arguments, Some(method), Some(arguments)]),
    )
}

fn primary_invocation(
    location: Location,
    primary: Node,
    type_arguments: Option<Node>,
    method: Node,
    arguments: Node,
) -> Node {
    Node::parent(
        Rule::MethodInvocation,
        location,
        Some(Operator::PrimaryInvocation),
        present([Some(primary), type_arguments, Some(method), Some(arguments)]),
    )
}

fn super_invocation(
    location: Location,
    type_arguments: Option<Node>,
    method: Node,
    arguments: Node,
) -> Node {
    Node::parent(
        Rule::MethodInvocation,
        location,
        Some(Operator::SuperInvocation),
        present([type_arguments, Some(method), Some(arguments)]),
    )
}

fn type_super_invocation(
    location: Location,
    type_name: Node,
    type_arguments: Option<Node>,
    method: Node,
    arguments: Node,
) -> Node {
    Node::parent(
        Rule::MethodInvocation,
        location,
        Some(Operator::TypeSuperInvocation),
        present([Some(type_name), type_arguments, Some(method), Some(arguments)]),
    )
}

fn name_reference(location: Location, name: Node, type_arguments: Option<Node>, method: Node) -> Node {
    Node::parent(
        Rule::MethodReference,
        location,
        Some(Operator::NameReference),
        present([Some(name), type_arguments, Some(method)]),
    )
}

fn primary_reference(
    location: Location,
    primary: Node,
    type_arguments: Option<Node>,
    method: Node,
) -> Node {
    Node::parent(
        Rule::MethodReference,
        location,
        Some(Operator::PrimaryReference),
        present([Some(primary), type_arguments, Some(method)]),
    )
}

fn type_reference(location: Location, ty: Node, type_arguments: Option<Node>, method: Node) -> Node {
    Node::parent(
        Rule::MethodReference,
        location,
        Some(Operator::TypeReference),
        present([Some(ty), type_arguments, Some(method)]),
    )
}

fn super_reference(location: Location, type_arguments: Option<Node>, method: Node) -> Node {
    Node::parent(
        Rule::MethodReference,
        location,
        Some(Operator::SuperReference),
        present([type_arguments, Some(method)]),
    )
}

fn type_super_reference(
    location: Location,
    type_name: Node,
    type_arguments: Option<Node>,
    method: Node,
) -> Node {
    Node::parent(
        Rule::MethodReference,
        location,
        Some(Operator::TypeSuperReference),
        present([Some(type_name), type_arguments, Some(method)]),
    )
}

fn constructor_reference(location: Location, ty: Node, type_arguments: Option<Node>) -> Node {
    Node::parent(
        Rule::MethodReference,
        location,
        Some(Operator::ConstructorReference),
        present([Some(ty), type_arguments]),
    )
}

fn primary_field(location: Location, primary: Node, field: Node) -> Node {
    Node::parent(
        Rule::FieldAccess,
        location,
        Some(Operator::PrimaryField),
        vec![primary, field],
    )
}

fn super_field(location: Location, field: Node) -> Node {
    Node::parent(Rule::FieldAccess, location, Some(Operator::SuperField), vec![field])
}

fn type_super_field(location: Location, type_name: Node, field: Node) -> Node {
    Node::parent(
        Rule::FieldAccess,
        location,
        Some(Operator::TypeSuperField),
        vec![type_name, field],
    )
}
