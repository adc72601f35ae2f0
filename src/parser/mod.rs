//! Java-family source code front end
//!
//! This module transforms source text into an abstract syntax tree:
//! - [`scanner`]: tokenization (source text → tokens), pulled one token at a time
//! - [`parse`]: the [`Parser`] and its token-level helpers
//! - [`ast`]: node model, debug printer and the collapse pass
//! - [`error`], [`location`]: diagnostics
//!
//! The grammar is split into areas, each adding `impl Parser` methods:
//! names, literals, types, expressions, statements, classes, modifiers and
//! compilation units.
//!
//! # Supported language
//!
//! - Types: primitives, class types with type arguments and wildcards, arrays, generics
//! - Declarations: classes, interfaces, enums, fields, methods, constructors, initializers
//! - Statements: every classic statement form including `try`-with-resources and labels
//! - Expressions: the full operator ladder (with `^^`), casts, lambdas, method references
//! - No annotations, no modules, no switch expressions or records
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser. No external parser generator
//! dependencies.

pub mod ast;
pub mod error;
pub mod location;
pub mod parse;
pub mod scanner;
pub mod token;

mod classes;
mod expressions;
mod literals;
mod modifiers;
mod names;
mod statements;
mod toplevel;
mod types;

pub use modifiers::specialize_modifiers;
pub use parse::Parser;
