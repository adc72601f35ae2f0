//! Indented tree rendering of a [`Node`], used by the command line tool and
//! handy in failing tests.
//!
//! ```text
//! AdditiveExpression + 1:1
//!   Literal 1 1:1
//!   Literal 2 1:5
//! ```

use super::{Node, NodeBody};
use std::fmt;

impl Node {
    fn write_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        write!(f, "{:indent$}{}", "", self.rule(), indent = depth * 2)?;

        match self.body() {
            NodeBody::Value(value) => write!(f, " {}", value.text())?,
            NodeBody::Modifier(modifier) => write!(f, " {modifier}")?,
            NodeBody::List { kind, .. } => write!(f, " [{kind}]")?,
            _ => {
                if let Some(op) = self.operator() {
                    write!(f, " {op}")?;
                }
            }
        }
        writeln!(f, " {}:{}", self.location().line(), self.location().column())?;

        for child in self.children() {
            child.write_tree(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_tree(f, 0)
    }
}
