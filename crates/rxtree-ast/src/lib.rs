// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! A regular expression AST with a mutation-safe path engine.
//!
//! # Overview
//!
//! - **Parsing**: Parse pattern source into an arena-backed [`Ast`] with
//!   [`parse`] or [`parse_with_flags`].
//! - **Traversal**: Walk the tree with a [`Visitor`] via [`traverse`]. Each
//!   callback receives a [`NodePath`] that can insert, remove, replace and
//!   update nodes while the walk is in progress.
//! - **Code Generation**: Convert the tree back to pattern text with
//!   [`generate`] or the [`Codegen`] trait.
//!
//! # Quick Start
//!
//! ```
//! use rxtree_ast::{generate, parse};
//!
//! let ast = parse("/[a-z]+(?:x|y)/i").expect("parse error");
//! assert_eq!(generate(&ast), "/[a-z]+(?:x|y)/i");
//! ```

pub mod codegen;
mod error_bridges;
pub mod nodes;
pub mod parser;
pub mod path;
pub mod visitor;

pub use codegen::{generate, generate_node, Codegen, CodegenState};
pub use nodes::{
    AssertionKind, Ast, CharKind, ChildField, Children, IntoNodeId, Node, NodeId, NodeKind,
    NodeType, Quantifier, QuantifierKind, Reference, SpanTable, DEFAULT_COLLECTION,
};
pub use parser::{
    parse, parse_with_flags, prettify_error, split_literal, validate_flags, ParserError,
};
pub use path::{
    NodePath, PathError, PathId, PathRecord, PathResult, TraversalContext, TraversalFrame,
};
pub use visitor::{traverse, traverse_with, VisitResult, Visitor};
