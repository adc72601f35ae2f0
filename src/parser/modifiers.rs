//! Modifier lists
//!
//! Modifiers are parsed the same way at every declaration site: a run of
//! modifier keywords in any order. Once the parser knows which kind of
//! declaration follows, [`specialize_modifiers`] checks the run against the
//! site's subset and retags the list with the site's [`ListKind`].

use crate::parser::ast::{ListKind, Modifier, ModifierSite, Node, Rule};
use crate::parser::error::{ParseError, ParseResult};
use crate::parser::parse::Parser;
use rustc_hash::FxHashSet;

impl Parser {
    /// Parse a generic modifier list (possibly empty).
    pub fn parse_modifiers(&mut self) -> ParseResult<Node> {
        let location = self.current_location();

        let mut modifiers = Vec::new();
        while let Some(modifier) = Modifier::from_token(self.kind()) {
            let token = self.advance()?;
            modifiers.push(Node::modifier_leaf(token.location, modifier));
        }

        Ok(Node::list(Rule::Modifiers, location, ListKind::Modifiers, modifiers))
    }

    /// Modifiers of a local variable, parameter or catch parameter.
    pub(crate) fn parse_variable_modifiers(&mut self) -> ParseResult<Node> {
        let modifiers = self.parse_modifiers()?;
        specialize_modifiers(modifiers, ModifierSite::Variable)
    }
}

/// Check a generic modifier list against `site` and retag it with the
/// site's list kind.
pub fn specialize_modifiers(mut list: Node, site: ModifierSite) -> ParseResult<Node> {
    if !list.list_kind().is_some_and(ListKind::is_modifier_list) {
        return Err(ParseError::grammar(
            format!("{} is not a modifier list", list.rule()),
            list.location().clone(),
        ));
    }

    let mut seen = FxHashSet::default();

    for node in list.children() {
        let Some(modifier) = node.modifier() else {
            continue;
        };
        if !site.permits(modifier) {
            return Err(ParseError::grammar(
                format!("modifier '{modifier}' is not allowed on {site} declarations"),
                node.location().clone(),
            ));
        }
        if !seen.insert(modifier) {
            return Err(ParseError::grammar(
                format!("duplicate modifier '{modifier}'"),
                node.location().clone(),
            ));
        }
    }

    list.set_list_kind(site.list_kind());
    Ok(list)
}
