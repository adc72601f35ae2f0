//! Closed enumerations that tag AST nodes: the grammar [`Rule`] a node was
//! built for, the [`Operator`] (or alternative) that was matched, and the
//! [`ListKind`] of flat repetitions.

use std::fmt;

/// Grammar productions. Every [`super::Node`] records the rule it was built
/// for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    // Names
    Identifier,
    QualifiedName,
    ExpressionName,

    // Literals
    Literal,

    // Types
    Type,
    PrimitiveType,
    VoidType,
    ClassType,
    TypeSegment,
    ArrayType,
    TypeArguments,
    Wildcard,
    TypeParameters,
    TypeParameter,
    TypeBound,
    TypeList,

    // Expressions
    Expression,
    LambdaExpression,
    LambdaParameters,
    AssignmentExpression,
    LeftHandSide,
    ConditionalExpression,
    LogicalOrExpression,
    LogicalXorExpression,
    LogicalAndExpression,
    RelationalExpression,
    CompareExpression,
    BitwiseOrExpression,
    BitwiseXorExpression,
    BitwiseAndExpression,
    ShiftExpression,
    AdditiveExpression,
    MultiplicativeExpression,
    CastExpression,
    UnaryExpression,
    PostfixExpression,
    PrimaryExpression,
    ParenthesizedExpression,
    This,
    QualifiedThis,
    ClassLiteral,
    ClassInstanceCreation,
    ArrayCreation,
    DimExprs,
    ArrayInitializer,
    FieldAccess,
    ArrayAccess,
    MethodInvocation,
    MethodReference,
    ArgumentList,

    // Statements
    Block,
    StatementList,
    BlockStatement,
    Statement,
    LocalVariableDeclaration,
    VariableDeclarators,
    VariableDeclarator,
    EmptyStatement,
    ExpressionStatement,
    IfStatement,
    WhileStatement,
    DoStatement,
    ForStatement,
    ForInit,
    ForCondition,
    ForUpdate,
    EnhancedForStatement,
    SwitchStatement,
    SwitchBlock,
    SwitchGroup,
    SwitchLabels,
    SwitchLabel,
    BreakStatement,
    ContinueStatement,
    ReturnStatement,
    ThrowStatement,
    SynchronizedStatement,
    TryStatement,
    Resources,
    Resource,
    CatchClauses,
    CatchClause,
    CatchType,
    FinallyClause,
    LabeledStatement,
    AssertStatement,
    ExplicitConstructorInvocation,

    // Classes
    Modifiers,
    Modifier,
    ClassDeclaration,
    InterfaceDeclaration,
    EnumDeclaration,
    Superclass,
    ClassBody,
    InterfaceBody,
    EnumBody,
    EnumConstants,
    EnumConstant,
    FieldDeclaration,
    ConstantDeclaration,
    MethodDeclaration,
    ConstructorDeclaration,
    ConstructorBody,
    FormalParameters,
    FormalParameter,
    Initializer,

    // Top level
    CompilationUnit,
    PackageDeclaration,
    ImportDeclarations,
    ImportDeclaration,
    TypeDeclarations,
}

impl Rule {
    /// Grammar-level wrappers that collapse removes when they carry no
    /// operator and a single child.
    pub fn is_collapsible(self) -> bool {
        matches!(
            self,
            Rule::Expression
                | Rule::AssignmentExpression
                | Rule::ConditionalExpression
                | Rule::LogicalOrExpression
                | Rule::LogicalXorExpression
                | Rule::LogicalAndExpression
                | Rule::RelationalExpression
                | Rule::CompareExpression
                | Rule::BitwiseOrExpression
                | Rule::BitwiseXorExpression
                | Rule::BitwiseAndExpression
                | Rule::ShiftExpression
                | Rule::AdditiveExpression
                | Rule::MultiplicativeExpression
                | Rule::CastExpression
                | Rule::UnaryExpression
                | Rule::PrimaryExpression
                | Rule::Statement
                | Rule::BlockStatement
                | Rule::Type
        )
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Operator or matched alternative recorded on unary, binary and parent
/// nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    // Assignment
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    RemAssign,
    AndAssign,
    OrAssign,
    XorAssign,
    ShlAssign,
    ShrAssign,
    UShrAssign,

    // Binary ladder
    Conditional,
    LogicalOr,
    LogicalXor,
    LogicalAnd,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    InstanceOf,
    Equal,
    NotEqual,
    BitOr,
    BitXor,
    BitAnd,
    Shl,
    Shr,
    UShr,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Cast,

    // Prefix and postfix
    Plus,
    Negate,
    Not,
    BitNot,
    PreIncrement,
    PreDecrement,
    PostIncrement,
    PostDecrement,

    // Types
    Array,
    WildcardExtends,
    WildcardSuper,

    // Method invocation alternatives
    NameInvocation,
    QualifiedInvocation,
    PrimaryInvocation,
    SuperInvocation,
    TypeSuperInvocation,

    // Method reference alternatives
    NameReference,
    PrimaryReference,
    TypeReference,
    SuperReference,
    TypeSuperReference,
    ConstructorReference,

    // Field access alternatives
    PrimaryField,
    SuperField,
    TypeSuperField,

    // Creation
    AnonymousClass,
    ArrayWithDims,
    ArrayWithInitializer,

    // Lambda bodies
    ExpressionBody,
    BlockBody,

    // Statements and declarations
    If,
    IfElse,
    Try,
    TryWithResources,
    Case,
    Default,
    This,
    Super,
    QualifiedSuper,
    Variadic,
    Static,
    OnDemand,
    StaticOnDemand,
}

impl Operator {
    /// Source spelling for operators that have one.
    pub fn symbol(self) -> Option<&'static str> {
        use Operator::*;
        let symbol = match self {
            Assign => "=",
            AddAssign => "+=",
            SubAssign => "-=",
            MulAssign => "*=",
            DivAssign => "/=",
            RemAssign => "%=",
            AndAssign => "&=",
            OrAssign => "|=",
            XorAssign => "^=",
            ShlAssign => "<<=",
            ShrAssign => ">>=",
            UShrAssign => ">>>=",
            Conditional => "?:",
            LogicalOr => "||",
            LogicalXor => "^^",
            LogicalAnd => "&&",
            Less => "<",
            Greater => ">",
            LessEqual => "<=",
            GreaterEqual => ">=",
            InstanceOf => "instanceof",
            Equal => "==",
            NotEqual => "!=",
            BitOr => "|",
            BitXor => "^",
            BitAnd => "&",
            Shl => "<<",
            Shr => ">>",
            UShr => ">>>",
            Add | Plus => "+",
            Sub | Negate => "-",
            Mul => "*",
            Div => "/",
            Rem => "%",
            Not => "!",
            BitNot => "~",
            PreIncrement | PostIncrement => "++",
            PreDecrement | PostDecrement => "--",
            Array => "[]",
            _ => return None,
        };
        Some(symbol)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.symbol() {
            Some(symbol) => f.write_str(symbol),
            None => fmt::Debug::fmt(self, f),
        }
    }
}

/// Kinds of flat repetitions produced by the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    // Modifier lists: generic, then one per declaration site
    Modifiers,
    ClassModifiers,
    InterfaceModifiers,
    EnumModifiers,
    FieldModifiers,
    MethodModifiers,
    ConstructorModifiers,
    InterfaceMethodModifiers,
    ConstantModifiers,
    VariableModifiers,

    TypeArguments,
    TypeParameters,
    TypeBounds,
    Interfaces,
    ExtendsInterfaces,
    Throws,
    CatchTypes,

    Arguments,
    DimExprs,
    ArrayElements,
    LambdaParameters,

    BlockStatements,
    SwitchGroups,
    SwitchLabels,
    CatchClauses,
    Resources,
    ForInit,
    ForUpdate,
    VariableDeclarators,

    FormalParameters,
    ClassMembers,
    InterfaceMembers,
    EnumConstants,

    Imports,
    TypeDeclarations,
}

impl ListKind {
    pub fn is_modifier_list(self) -> bool {
        matches!(
            self,
            ListKind::Modifiers
                | ListKind::ClassModifiers
                | ListKind::InterfaceModifiers
                | ListKind::EnumModifiers
                | ListKind::FieldModifiers
                | ListKind::MethodModifiers
                | ListKind::ConstructorModifiers
                | ListKind::InterfaceMethodModifiers
                | ListKind::ConstantModifiers
                | ListKind::VariableModifiers
        )
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
