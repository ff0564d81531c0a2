//! rxtree: regular expression transforms over a mutation-safe AST
//!
//! Parses patterns into an arena tree, runs mechanical rewrite passes over
//! it with the path engine, and regenerates pattern text.

// Core infrastructure - re-exported from rxtree-core
pub use rxtree_core::config;
pub use rxtree_core::error;
pub use rxtree_core::output;
pub use rxtree_core::text;

// Tree, parser and path engine
pub use rxtree_ast as ast;

// Front door
pub mod cli;

// Rewrite passes
pub mod passes;

