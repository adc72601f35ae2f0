//! Abstract syntax tree produced by the parser
//!
//! Every grammar production builds one [`Node`]. The node records the
//! [`Rule`] it was built for, the [`Location`] of its first token and a
//! [`NodeBody`] that fixes its shape:
//!
//! - value and modifier leaves,
//! - fixed-arity unary and binary nodes,
//! - variable-arity parent nodes,
//! - typed list nodes for flat repetitions.
//!
//! Each level of the expression ladder (and a few statement levels) wraps
//! its result in a node of its own rule even when no operator was matched.
//! [`Node::collapse`] removes those wrappers once the tree is complete.

mod collapse;
mod kinds;
mod modifier;
mod printer;
mod value;

pub use kinds::{ListKind, Operator, Rule};
pub use modifier::{Modifier, ModifierSite};
pub use value::{Value, ValueKind};

use super::location::Location;

/// One syntax tree node.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    rule: Rule,
    location: Location,
    body: NodeBody,
}

/// Shape of a node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeBody {
    Value(Value),
    Modifier(Modifier),
    Unary {
        op: Option<Operator>,
        operand: Box<Node>,
    },
    Binary {
        op: Option<Operator>,
        left: Box<Node>,
        right: Box<Node>,
    },
    Parent {
        op: Option<Operator>,
        children: Vec<Node>,
    },
    List {
        kind: ListKind,
        children: Vec<Node>,
    },
}

impl Default for NodeBody {
    fn default() -> Self {
        NodeBody::Parent {
            op: None,
            children: Vec::new(),
        }
    }
}

impl Node {
    pub fn leaf(rule: Rule, location: Location, value: Value) -> Self {
        Self {
            rule,
            location,
            body: NodeBody::Value(value),
        }
    }

    pub fn modifier_leaf(location: Location, modifier: Modifier) -> Self {
        Self {
            rule: Rule::Modifier,
            location,
            body: NodeBody::Modifier(modifier),
        }
    }

    pub fn unary(rule: Rule, location: Location, op: Operator, operand: Node) -> Self {
        Self {
            rule,
            location,
            body: NodeBody::Unary {
                op: Some(op),
                operand: Box::new(operand),
            },
        }
    }

    /// Operator-less single-child wrapper located at its child.
    pub fn wrap(rule: Rule, operand: Node) -> Self {
        Self {
            rule,
            location: operand.location.clone(),
            body: NodeBody::Unary {
                op: None,
                operand: Box::new(operand),
            },
        }
    }

    /// Binary node located at its left operand.
    pub fn binary(rule: Rule, op: Operator, left: Node, right: Node) -> Self {
        Self {
            rule,
            location: left.location.clone(),
            body: NodeBody::Binary {
                op: Some(op),
                left: Box::new(left),
                right: Box::new(right),
            },
        }
    }

    pub fn parent(rule: Rule, location: Location, op: Option<Operator>, children: Vec<Node>) -> Self {
        Self {
            rule,
            location,
            body: NodeBody::Parent { op, children },
        }
    }

    pub fn list(rule: Rule, location: Location, kind: ListKind, children: Vec<Node>) -> Self {
        Self {
            rule,
            location,
            body: NodeBody::List { kind, children },
        }
    }

    pub fn rule(&self) -> Rule {
        self.rule
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn body(&self) -> &NodeBody {
        &self.body
    }

    /// Operator or matched alternative, if the node records one.
    pub fn operator(&self) -> Option<Operator> {
        match &self.body {
            NodeBody::Unary { op, .. } | NodeBody::Binary { op, .. } | NodeBody::Parent { op, .. } => *op,
            _ => None,
        }
    }

    pub fn list_kind(&self) -> Option<ListKind> {
        match &self.body {
            NodeBody::List { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    pub fn value(&self) -> Option<&Value> {
        match &self.body {
            NodeBody::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn modifier(&self) -> Option<Modifier> {
        match &self.body {
            NodeBody::Modifier(modifier) => Some(*modifier),
            _ => None,
        }
    }

    /// Source text of a value leaf.
    pub fn text(&self) -> Option<&str> {
        self.value().map(Value::text)
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.body, NodeBody::Value(_) | NodeBody::Modifier(_))
    }

    /// Children in source order, whatever the node's shape.
    pub fn children(&self) -> Vec<&Node> {
        match &self.body {
            NodeBody::Value(_) | NodeBody::Modifier(_) => Vec::new(),
            NodeBody::Unary { operand, .. } => vec![operand.as_ref()],
            NodeBody::Binary { left, right, .. } => vec![left.as_ref(), right.as_ref()],
            NodeBody::Parent { children, .. } | NodeBody::List { children, .. } => {
                children.iter().collect()
            }
        }
    }

    pub(crate) fn children_mut(&mut self) -> Vec<&mut Node> {
        match &mut self.body {
            NodeBody::Value(_) | NodeBody::Modifier(_) => Vec::new(),
            NodeBody::Unary { operand, .. } => vec![operand.as_mut()],
            NodeBody::Binary { left, right, .. } => vec![left.as_mut(), right.as_mut()],
            NodeBody::Parent { children, .. } | NodeBody::List { children, .. } => {
                children.iter_mut().collect()
            }
        }
    }

    pub fn len(&self) -> usize {
        match &self.body {
            NodeBody::Value(_) | NodeBody::Modifier(_) => 0,
            NodeBody::Unary { .. } => 1,
            NodeBody::Binary { .. } => 2,
            NodeBody::Parent { children, .. } | NodeBody::List { children, .. } => children.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn child(&self, index: usize) -> Option<&Node> {
        match &self.body {
            NodeBody::Value(_) | NodeBody::Modifier(_) => None,
            NodeBody::Unary { operand, .. } => (index == 0).then_some(operand.as_ref()),
            NodeBody::Binary { left, right, .. } => match index {
                0 => Some(left.as_ref()),
                1 => Some(right.as_ref()),
                _ => None,
            },
            NodeBody::Parent { children, .. } | NodeBody::List { children, .. } => children.get(index),
        }
    }

    /// First direct child built for `rule`.
    pub fn find(&self, rule: Rule) -> Option<&Node> {
        self.children().into_iter().find(|child| child.rule == rule)
    }

    /// First direct child that is a list of the given kind.
    pub fn find_list(&self, kind: ListKind) -> Option<&Node> {
        self.children()
            .into_iter()
            .find(|child| child.list_kind() == Some(kind))
    }

    /// Name of an identifier leaf, or of the first identifier child.
    pub fn identifier(&self) -> Option<&str> {
        if self.rule == Rule::Identifier {
            return self.text();
        }
        self.find(Rule::Identifier).and_then(Node::text)
    }

    /// Dotted spelling of a name node (`java.util.List`). Type arguments
    /// of class type segments are left out.
    pub fn dotted_name(&self) -> Option<String> {
        if self.rule == Rule::Identifier {
            return self.text().map(str::to_string);
        }

        let parts = self
            .children()
            .into_iter()
            .filter(|child| {
                matches!(
                    child.rule,
                    Rule::Identifier
                        | Rule::QualifiedName
                        | Rule::ExpressionName
                        | Rule::TypeSegment
                        | Rule::ClassType
                )
            })
            .map(Node::dotted_name)
            .collect::<Option<Vec<_>>>()?;

        if parts.is_empty() {
            None
        } else {
            Some(parts.join("."))
        }
    }

    /// Number of nodes in the subtree, this one included.
    pub fn size(&self) -> usize {
        1 + self.children().into_iter().map(Node::size).sum::<usize>()
    }

    /// Change the kind of a list node. Other shapes are left alone.
    pub(crate) fn set_list_kind(&mut self, kind: ListKind) {
        if let NodeBody::List { kind: current, .. } = &mut self.body {
            *current = kind;
        }
    }

    /// Single child of an operator-less wrapper, moved out of this node.
    /// The node is left with an empty body.
    pub(crate) fn take_only_child(&mut self) -> Option<Node> {
        match std::mem::take(&mut self.body) {
            NodeBody::Unary { op: None, operand } => Some(*operand),
            NodeBody::Parent { op: None, mut children } if children.len() == 1 => children.pop(),
            other => {
                self.body = other;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::location::SourceText;
    use std::sync::Arc;

    fn loc(column: usize) -> Location {
        Location::new(Arc::new(SourceText::new("test", "a.b.c")), 1, column)
    }

    fn ident(name: &str, column: usize) -> Node {
        Node::leaf(Rule::Identifier, loc(column), Value::new(ValueKind::Identifier, name))
    }

    #[test]
    fn test_dotted_name() {
        let name = Node::parent(
            Rule::QualifiedName,
            loc(1),
            None,
            vec![ident("a", 1), ident("b", 3), ident("c", 5)],
        );
        assert_eq!(name.dotted_name().as_deref(), Some("a.b.c"));
        assert_eq!(name.identifier(), Some("a"));
        assert_eq!(name.len(), 3);
    }

    #[test]
    fn test_uniform_children() {
        let sum = Node::binary(
            Rule::AdditiveExpression,
            Operator::Add,
            ident("a", 1),
            ident("b", 3),
        );
        assert_eq!(sum.operator(), Some(Operator::Add));
        assert_eq!(sum.children().len(), 2);
        assert_eq!(sum.child(1).and_then(Node::text), Some("b"));
        assert!(sum.child(2).is_none());
        assert_eq!(sum.location().column(), 1);
        assert_eq!(sum.size(), 3);
    }

    #[test]
    fn test_take_only_child_keeps_operator_nodes() {
        let mut negated = Node::unary(Rule::UnaryExpression, loc(1), Operator::Negate, ident("a", 2));
        assert!(negated.take_only_child().is_none());
        assert_eq!(negated.operator(), Some(Operator::Negate));

        let mut wrapper = Node::wrap(Rule::PrimaryExpression, ident("a", 1));
        assert_eq!(wrapper.take_only_child().and_then(|n| n.text().map(str::to_string)).as_deref(), Some("a"));
    }
}
