//! Removal of operator-less grammar wrappers
//!
//! The parser builds one node per ladder level, so `x` as an expression is
//! `Expression > AssignmentExpression > ... > PrimaryExpression > x`.
//! Collapse rewrites every child slot to the first descendant that is not a
//! collapsible wrapper. Nodes with an operator, nodes with several children
//! and list nodes always survive.

use super::Node;
use tracing::debug;

impl Node {
    /// A single-child, operator-less node of a collapsible rule.
    pub fn is_collapsible_wrapper(&self) -> bool {
        self.rule().is_collapsible()
            && self.list_kind().is_none()
            && !self.is_leaf()
            && self.operator().is_none()
            && self.len() == 1
    }

    /// Collapse the subtree below this node in place and return the number
    /// of wrappers removed. The node itself is kept.
    pub fn collapse(&mut self) -> usize {
        let removed = collapse_children(self);
        debug!(rule = %self.rule(), removed, "collapsed tree");
        removed
    }

    /// Collapse the subtree and lift this node too when it is a wrapper.
    pub fn collapsed(mut self) -> Node {
        lift(&mut self);
        self.collapse();
        self
    }
}

fn collapse_children(node: &mut Node) -> usize {
    let mut removed = 0;
    for slot in node.children_mut() {
        removed += lift(slot);
        removed += collapse_children(slot);
    }
    removed
}

/// Replace `slot` by its first non-wrapper descendant.
fn lift(slot: &mut Node) -> usize {
    let mut removed = 0;
    while slot.is_collapsible_wrapper() {
        match slot.take_only_child() {
            Some(child) => {
                *slot = child;
                removed += 1;
            }
            None => break,
        }
    }
    removed
}
