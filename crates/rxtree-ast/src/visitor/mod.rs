// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Visitor infrastructure for AST traversal.
//!
//! Implement [`Visitor`] and run it with [`traverse`]:
//!
//! ```
//! use rxtree_ast::{generate, parse, traverse, NodeKind, NodePath, PathResult, VisitResult, Visitor};
//!
//! struct DropDigits;
//!
//! impl Visitor for DropDigits {
//!     fn visit_char(&mut self, path: &mut NodePath<'_>) -> PathResult<VisitResult> {
//!         let digit = matches!(
//!             path.kind(),
//!             Some(NodeKind::Char { value, .. }) if value.chars().all(|c| c.is_ascii_digit())
//!         );
//!         if digit {
//!             path.remove();
//!         }
//!         Ok(VisitResult::Continue)
//!     }
//! }
//!
//! let mut ast = parse("/a1b2/").unwrap();
//! traverse(&mut ast, &mut DropDigits).unwrap();
//! assert_eq!(generate(&ast), "/ab/");
//! ```

mod dispatch;
mod traits;

pub use dispatch::{traverse, traverse_with};
pub use traits::{VisitResult, Visitor};
