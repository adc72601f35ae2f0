//! Token kinds and the [`Token`] value produced by the scanner
//!
//! [`TokenKind`] is a closed, payload-free enumeration; the exact lexeme and
//! its [`Location`] travel alongside it in [`Token`].

use super::location::Location;
use rustc_hash::FxHashMap;
use std::fmt;

/// Every kind of token the scanner can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Synthetic
    StartOfInput,
    EndOfInput,

    // Literals
    IntegerLiteral,
    FloatingLiteral,
    CharacterLiteral,
    StringLiteral,
    TextBlock,

    // Identifiers
    Identifier,

    // Keywords
    Abstract,
    Assert,
    Boolean,
    Break,
    Byte,
    Case,
    Catch,
    Char,
    Class,
    Const,
    Continue,
    Default,
    Do,
    Double,
    Else,
    Enum,
    Extends,
    False,
    Final,
    Finally,
    Float,
    For,
    Goto,
    If,
    Implements,
    Import,
    InstanceOf,
    Int,
    Interface,
    Long,
    Native,
    New,
    Null,
    Package,
    Private,
    Protected,
    Public,
    Return,
    Short,
    Static,
    Strictfp,
    Super,
    Switch,
    Synchronized,
    This,
    Throw,
    Throws,
    Transient,
    True,
    Try,
    Void,
    Volatile,
    While,

    // Punctuation
    LParen,     // (
    RParen,     // )
    LBrace,     // {
    RBrace,     // }
    LBracket,   // [
    RBracket,   // ]
    Semicolon,  // ;
    Comma,      // ,
    Dot,        // .
    Ellipsis,   // ...
    At,         // @
    ColonColon, // ::
    Arrow,      // ->
    Question,   // ?
    Colon,      // :

    // Operators
    Eq,       // =
    EqEq,     // ==
    NotEq,    // !=
    Lt,       // <
    Le,       // <=
    Gt,       // >
    Ge,       // >=
    Bang,     // !
    Tilde,    // ~
    AndAnd,   // &&
    OrOr,     // ||
    CaretCaret, // ^^
    PlusPlus,   // ++
    MinusMinus, // --
    Plus,     // +
    Minus,    // -
    Star,     // *
    Slash,    // /
    Percent,  // %
    Amp,      // &
    Pipe,     // |
    Caret,    // ^
    LtLt,     // <<
    GtGt,     // >>
    GtGtGt,   // >>>
    PlusEq,   // +=
    MinusEq,  // -=
    StarEq,   // *=
    SlashEq,  // /=
    PercentEq, // %=
    AmpEq,    // &=
    PipeEq,   // |=
    CaretEq,  // ^=
    LtLtEq,   // <<=
    GtGtEq,   // >>=
    GtGtGtEq, // >>>=
}

/// Keyword spellings, matched against identifier-shaped lexemes.
const KEYWORDS: &[(&str, TokenKind)] = &[
    ("abstract", TokenKind::Abstract),
    ("assert", TokenKind::Assert),
    ("boolean", TokenKind::Boolean),
    ("break", TokenKind::Break),
    ("byte", TokenKind::Byte),
    ("case", TokenKind::Case),
    ("catch", TokenKind::Catch),
    ("char", TokenKind::Char),
    ("class", TokenKind::Class),
    ("const", TokenKind::Const),
    ("continue", TokenKind::Continue),
    ("default", TokenKind::Default),
    ("do", TokenKind::Do),
    ("double", TokenKind::Double),
    ("else", TokenKind::Else),
    ("enum", TokenKind::Enum),
    ("extends", TokenKind::Extends),
    ("false", TokenKind::False),
    ("final", TokenKind::Final),
    ("finally", TokenKind::Finally),
    ("float", TokenKind::Float),
    ("for", TokenKind::For),
    ("goto", TokenKind::Goto),
    ("if", TokenKind::If),
    ("implements", TokenKind::Implements),
    ("import", TokenKind::Import),
    ("instanceof", TokenKind::InstanceOf),
    ("int", TokenKind::Int),
    ("interface", TokenKind::Interface),
    ("long", TokenKind::Long),
    ("native", TokenKind::Native),
    ("new", TokenKind::New),
    ("null", TokenKind::Null),
    ("package", TokenKind::Package),
    ("private", TokenKind::Private),
    ("protected", TokenKind::Protected),
    ("public", TokenKind::Public),
    ("return", TokenKind::Return),
    ("short", TokenKind::Short),
    ("static", TokenKind::Static),
    ("strictfp", TokenKind::Strictfp),
    ("super", TokenKind::Super),
    ("switch", TokenKind::Switch),
    ("synchronized", TokenKind::Synchronized),
    ("this", TokenKind::This),
    ("throw", TokenKind::Throw),
    ("throws", TokenKind::Throws),
    ("transient", TokenKind::Transient),
    ("true", TokenKind::True),
    ("try", TokenKind::Try),
    ("void", TokenKind::Void),
    ("volatile", TokenKind::Volatile),
    ("while", TokenKind::While),
];

/// Build the keyword lookup table used by the scanner.
pub(crate) fn keyword_table() -> FxHashMap<&'static str, TokenKind> {
    KEYWORDS.iter().copied().collect()
}

impl TokenKind {
    /// Fixed spelling of keywords and operators; `None` for kinds whose text
    /// varies (literals, identifiers) and for the synthetic markers.
    pub fn spelling(self) -> Option<&'static str> {
        use TokenKind::*;

        if let Some((text, _)) = KEYWORDS.iter().find(|(_, kind)| *kind == self) {
            return Some(text);
        }

        let text = match self {
            LParen => "(",
            RParen => ")",
            LBrace => "{",
            RBrace => "}",
            LBracket => "[",
            RBracket => "]",
            Semicolon => ";",
            Comma => ",",
            Dot => ".",
            Ellipsis => "...",
            At => "@",
            ColonColon => "::",
            Arrow => "->",
            Question => "?",
            Colon => ":",
            Eq => "=",
            EqEq => "==",
            NotEq => "!=",
            Lt => "<",
            Le => "<=",
            Gt => ">",
            Ge => ">=",
            Bang => "!",
            Tilde => "~",
            AndAnd => "&&",
            OrOr => "||",
            CaretCaret => "^^",
            PlusPlus => "++",
            MinusMinus => "--",
            Plus => "+",
            Minus => "-",
            Star => "*",
            Slash => "/",
            Percent => "%",
            Amp => "&",
            Pipe => "|",
            Caret => "^",
            LtLt => "<<",
            GtGt => ">>",
            GtGtGt => ">>>",
            PlusEq => "+=",
            MinusEq => "-=",
            StarEq => "*=",
            SlashEq => "/=",
            PercentEq => "%=",
            AmpEq => "&=",
            PipeEq => "|=",
            CaretEq => "^=",
            LtLtEq => "<<=",
            GtGtEq => ">>=",
            GtGtGtEq => ">>>=",
            _ => return None,
        };
        Some(text)
    }

    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::IntegerLiteral
                | TokenKind::FloatingLiteral
                | TokenKind::CharacterLiteral
                | TokenKind::StringLiteral
                | TokenKind::TextBlock
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Null
        )
    }

    pub fn is_primitive_type(self) -> bool {
        matches!(
            self,
            TokenKind::Boolean
                | TokenKind::Byte
                | TokenKind::Short
                | TokenKind::Int
                | TokenKind::Long
                | TokenKind::Char
                | TokenKind::Float
                | TokenKind::Double
        )
    }

    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            TokenKind::Public
                | TokenKind::Protected
                | TokenKind::Private
                | TokenKind::Static
                | TokenKind::Final
                | TokenKind::Abstract
                | TokenKind::Native
                | TokenKind::Synchronized
                | TokenKind::Transient
                | TokenKind::Volatile
                | TokenKind::Strictfp
                | TokenKind::Default
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::StartOfInput => write!(f, "start of input"),
            TokenKind::EndOfInput => write!(f, "end of input"),
            TokenKind::IntegerLiteral => write!(f, "integer literal"),
            TokenKind::FloatingLiteral => write!(f, "floating-point literal"),
            TokenKind::CharacterLiteral => write!(f, "character literal"),
            TokenKind::StringLiteral => write!(f, "string literal"),
            TokenKind::TextBlock => write!(f, "text block"),
            TokenKind::Identifier => write!(f, "identifier"),
            other => match other.spelling() {
                Some(text) => write!(f, "'{}'", text),
                None => write!(f, "{:?}", other),
            },
        }
    }
}

/// A classified lexeme.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Exact source text of the lexeme.
    pub text: String,
    pub location: Location,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, location: Location) -> Self {
        Self {
            kind,
            text: text.into(),
            location,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Identifier => write!(f, "identifier '{}'", self.text),
            TokenKind::IntegerLiteral
            | TokenKind::FloatingLiteral
            | TokenKind::CharacterLiteral
            | TokenKind::StringLiteral => write!(f, "{} {}", self.kind, self.text),
            kind => write!(f, "{}", kind),
        }
    }
}
