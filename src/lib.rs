//! # Introduction
//!
//! javelin is the front end of a compiler for a Java-family language: it
//! turns source text into a typed abstract syntax tree, or into a single
//! precise diagnostic.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Scanner → Parser → AST → Collapse
//! ```
//!
//! 1. [`parser::scanner`]: pull-based tokenizer. The parser switches it into
//!    *type context* while reading type arguments so that `>>` closes two
//!    argument lists instead of forming a shift operator.
//! 2. [`parser::Parser`]: recursive descent over the whole grammar, one
//!    method per production, with checkpoint/rewind for the few constructs
//!    that need speculation.
//! 3. [`parser::ast`]: the node model. Every production builds a node of its
//!    own rule; [`Node::collapse`] then removes operator-less single-child
//!    wrappers so the tree keeps only meaningful structure.
//!
//! ## Quick start
//!
//! ```
//! use javelin::{parse_source, Rule};
//!
//! let unit = parse_source("Hello.java", "class Hello { int x = 1 + 2; }").unwrap();
//! assert_eq!(unit.rule(), Rule::CompilationUnit);
//! ```

pub mod parser;

pub use parser::ast::{ListKind, Modifier, ModifierSite, Node, NodeBody, Operator, Rule, Value, ValueKind};
pub use parser::error::{ParseError, ParseResult};
pub use parser::location::Location;
pub use parser::scanner::Scanner;
pub use parser::token::{Token, TokenKind};
pub use parser::Parser;

use std::path::Path;
use tracing::debug;

/// Parse in-memory source into a collapsed compilation unit.
pub fn parse_source(name: &str, text: &str) -> ParseResult<Node> {
    parse_with(Scanner::new(name, text))
}

/// Read and parse a file into a collapsed compilation unit.
pub fn parse_file(path: impl AsRef<Path>) -> ParseResult<Node> {
    parse_with(Scanner::open(path)?)
}

fn parse_with(scanner: Scanner) -> ParseResult<Node> {
    let mut parser = Parser::new(scanner)?;
    let mut unit = parser.parse_compilation_unit()?;
    let removed = unit.collapse();
    debug!(nodes = unit.size(), removed, "front end finished");
    Ok(unit)
}
