// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Visitor trait definitions for AST traversal.

use crate::path::{NodePath, PathResult};

/// Result of visiting a node - controls traversal behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VisitResult {
    /// Continue traversal into children.
    ///
    /// After visiting children, `leave_*` will be called for this node.
    #[default]
    Continue,

    /// Skip children, continue with siblings.
    ///
    /// The driver will not descend into this node's children, but `leave_*`
    /// will still be called for this node.
    SkipChildren,

    /// Stop traversal entirely.
    ///
    /// No further `visit_*` or `leave_*` methods will be called.
    Stop,
}

/// Macro to generate visitor trait method signatures.
///
/// This macro generates pairs of `visit_*` and `leave_*` methods with default
/// implementations that continue and do nothing, respectively.
macro_rules! visitor_methods {
    (
        $(
            $(#[$meta:meta])*
            $base_name:ident : $node_type:literal
        ),* $(,)?
    ) => {
        paste::paste! {
            $(
                $(#[$meta])*
                #[doc = concat!("Visit a `", $node_type, "` node.")]
                #[doc = ""]
                #[doc = "Called before descending into children. Return `VisitResult` to control traversal."]
                #[allow(unused_variables)]
                fn [<visit_ $base_name>](&mut self, path: &mut NodePath<'_>) -> PathResult<VisitResult> {
                    Ok(VisitResult::Continue)
                }

                $(#[$meta])*
                #[doc = concat!("Leave a `", $node_type, "` node.")]
                #[doc = ""]
                #[doc = "Called after all children have been visited, unless the node was removed."]
                #[allow(unused_variables)]
                fn [<leave_ $base_name>](&mut self, path: &mut NodePath<'_>) -> PathResult<()> {
                    Ok(())
                }
            )*
        }
    };
}

/// Mutating visitor for AST traversal.
///
/// Every callback receives the [`NodePath`] of the node being visited and
/// may edit the tree through it. `visit_node` and `leave_node` run for every
/// node, around the kind-specific callbacks. An error aborts the traversal.
pub trait Visitor {
    /// Called for every node before the kind-specific `visit_*`.
    ///
    /// Anything but `Continue` is used as the visit result and the
    /// kind-specific callback is skipped.
    #[allow(unused_variables)]
    fn visit_node(&mut self, path: &mut NodePath<'_>) -> PathResult<VisitResult> {
        Ok(VisitResult::Continue)
    }

    /// Called for every node after the kind-specific `leave_*`.
    #[allow(unused_variables)]
    fn leave_node(&mut self, path: &mut NodePath<'_>) -> PathResult<()> {
        Ok(())
    }

    visitor_methods! {
        regexp: "RegExp",
        alternative: "Alternative",
        disjunction: "Disjunction",
        char: "Char",
        character_class: "CharacterClass",
        class_range: "ClassRange",
        group: "Group",
        backreference: "Backreference",
        repetition: "Repetition",
        assertion: "Assertion",
    }
}
