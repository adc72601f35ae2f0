//! Declaration modifiers and the sites that accept them

use super::kinds::ListKind;
use crate::parser::token::TokenKind;
use std::fmt;

/// A storage or visibility keyword in a modifier list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Static,
    Final,
    Abstract,
    Native,
    Synchronized,
    Transient,
    Volatile,
    Strictfp,
    Default,
}

impl Modifier {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        let modifier = match kind {
            TokenKind::Public => Modifier::Public,
            TokenKind::Protected => Modifier::Protected,
            TokenKind::Private => Modifier::Private,
            TokenKind::Static => Modifier::Static,
            TokenKind::Final => Modifier::Final,
            TokenKind::Abstract => Modifier::Abstract,
            TokenKind::Native => Modifier::Native,
            TokenKind::Synchronized => Modifier::Synchronized,
            TokenKind::Transient => Modifier::Transient,
            TokenKind::Volatile => Modifier::Volatile,
            TokenKind::Strictfp => Modifier::Strictfp,
            TokenKind::Default => Modifier::Default,
            _ => return None,
        };
        Some(modifier)
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Modifier::Public => "public",
            Modifier::Protected => "protected",
            Modifier::Private => "private",
            Modifier::Static => "static",
            Modifier::Final => "final",
            Modifier::Abstract => "abstract",
            Modifier::Native => "native",
            Modifier::Synchronized => "synchronized",
            Modifier::Transient => "transient",
            Modifier::Volatile => "volatile",
            Modifier::Strictfp => "strictfp",
            Modifier::Default => "default",
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Declaration sites, each with its own subset of legal modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifierSite {
    Class,
    Interface,
    Enum,
    Field,
    Method,
    Constructor,
    InterfaceMethod,
    InterfaceConstant,
    Variable,
}

impl ModifierSite {
    /// List kind of a modifier list specialized for this site.
    pub fn list_kind(self) -> ListKind {
        match self {
            ModifierSite::Class => ListKind::ClassModifiers,
            ModifierSite::Interface => ListKind::InterfaceModifiers,
            ModifierSite::Enum => ListKind::EnumModifiers,
            ModifierSite::Field => ListKind::FieldModifiers,
            ModifierSite::Method => ListKind::MethodModifiers,
            ModifierSite::Constructor => ListKind::ConstructorModifiers,
            ModifierSite::InterfaceMethod => ListKind::InterfaceMethodModifiers,
            ModifierSite::InterfaceConstant => ListKind::ConstantModifiers,
            ModifierSite::Variable => ListKind::VariableModifiers,
        }
    }

    pub fn allowed(self) -> &'static [Modifier] {
        use Modifier::*;
        match self {
            ModifierSite::Class => &[Public, Protected, Private, Abstract, Static, Final, Strictfp],
            ModifierSite::Interface => &[Public, Protected, Private, Abstract, Static, Strictfp],
            ModifierSite::Enum => &[Public, Protected, Private, Static, Strictfp],
            ModifierSite::Field => &[Public, Protected, Private, Static, Final, Transient, Volatile],
            ModifierSite::Method => &[
                Public,
                Protected,
                Private,
                Abstract,
                Static,
                Final,
                Synchronized,
                Native,
                Strictfp,
            ],
            ModifierSite::Constructor => &[Public, Protected, Private],
            ModifierSite::InterfaceMethod => &[Public, Private, Abstract, Default, Static, Strictfp],
            ModifierSite::InterfaceConstant => &[Public, Static, Final],
            ModifierSite::Variable => &[Final],
        }
    }

    pub fn permits(self, modifier: Modifier) -> bool {
        self.allowed().contains(&modifier)
    }
}

impl fmt::Display for ModifierSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModifierSite::Class => "class",
            ModifierSite::Interface => "interface",
            ModifierSite::Enum => "enum",
            ModifierSite::Field => "field",
            ModifierSite::Method => "method",
            ModifierSite::Constructor => "constructor",
            ModifierSite::InterfaceMethod => "interface method",
            ModifierSite::InterfaceConstant => "interface constant",
            ModifierSite::Variable => "variable",
        };
        f.write_str(name)
    }
}
