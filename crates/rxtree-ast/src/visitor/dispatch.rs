// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! The traversal driver.
//!
//! The driver walks the tree depth first and hands each node's
//! [`NodePath`] to the visitor:
//!
//! - **Pre-order**: `visit_*` is called before descending into children
//! - **Post-order**: `leave_*` is called after all children have been visited
//! - **Source order**: Children are visited left to right
//!
//! # Collections
//!
//! Before iterating a collection the driver pushes a frame with cursor 0 and
//! reads the cursor and the collection length afresh on every step, so
//! edits made through paths (which shift the cursor) are honored. The frame
//! is popped when the loop ends, including on error.
//!
//! # Control Flow
//!
//! - `VisitResult::Continue` - traverse into children
//! - `VisitResult::SkipChildren` - skip children but still call `leave_*`
//! - `VisitResult::Stop` - halt traversal immediately (no `leave_*` called)
//!
//! A node whose path was removed by its visitor is neither descended into
//! nor left.

use tracing::trace;

use super::traits::{VisitResult, Visitor};
use crate::nodes::{Ast, ChildField, NodeId, NodeType};
use crate::path::{NodePath, PathId, PathResult, TraversalContext};

/// Traverse `ast` with a fresh [`TraversalContext`].
pub fn traverse<V: Visitor + ?Sized>(ast: &mut Ast, visitor: &mut V) -> PathResult<VisitResult> {
    let mut cx = TraversalContext::new();
    traverse_with(ast, &mut cx, visitor)
}

/// Traverse `ast` using `cx`, which is reset first.
///
/// Returns `Stop` if the visitor stopped the walk, `Continue` otherwise.
pub fn traverse_with<V: Visitor + ?Sized>(
    ast: &mut Ast,
    cx: &mut TraversalContext,
    visitor: &mut V,
) -> PathResult<VisitResult> {
    cx.init_registry();
    let Some(root) = cx.get_for_node(ast.root(), None, None, None) else {
        return Ok(VisitResult::Continue);
    };
    walk(ast, cx, visitor, root)
}

fn walk<V: Visitor + ?Sized>(
    ast: &mut Ast,
    cx: &mut TraversalContext,
    visitor: &mut V,
    path: PathId,
) -> PathResult<VisitResult> {
    let Some(node) = cx.node_of(path) else {
        return Ok(VisitResult::Continue);
    };
    trace!(%node, node_type = %ast.node(node).node_type(), "visit");

    let result = {
        let mut np = NodePath::new(ast, cx, path);
        match visitor.visit_node(&mut np)? {
            // visit_node may have removed or replaced the node.
            VisitResult::Continue => match np.node_type() {
                Some(node_type) => visit_kind(visitor, node_type, &mut np)?,
                None => VisitResult::Continue,
            },
            other => other,
        }
    };

    match result {
        VisitResult::Stop => return Ok(VisitResult::Stop),
        VisitResult::SkipChildren => {}
        VisitResult::Continue => {
            if cx.is_removed(path) {
                return Ok(VisitResult::Continue);
            }
            if walk_children(ast, cx, visitor, path)? == VisitResult::Stop {
                return Ok(VisitResult::Stop);
            }
        }
    }

    // The visitor may have replaced the node; leave what is there now.
    let Some(node) = cx.node_of(path) else {
        return Ok(VisitResult::Continue);
    };
    let node_type = ast.node(node).node_type();
    let mut np = NodePath::new(ast, cx, path);
    leave_kind(visitor, node_type, &mut np)?;
    if !np.is_removed() {
        visitor.leave_node(&mut np)?;
    }
    Ok(VisitResult::Continue)
}

fn walk_children<V: Visitor + ?Sized>(
    ast: &mut Ast,
    cx: &mut TraversalContext,
    visitor: &mut V,
    path: PathId,
) -> PathResult<VisitResult> {
    let Some(node) = cx.node_of(path) else {
        return Ok(VisitResult::Continue);
    };
    match ast.node(node).child_field() {
        ChildField::None => Ok(VisitResult::Continue),
        ChildField::Scalar(property) => match ast.node(node).scalar(property).flatten() {
            Some(child) => {
                let child = cx.ensure_path(child, Some(path), Some(property), None);
                walk(ast, cx, visitor, child)
            }
            None => Ok(VisitResult::Continue),
        },
        ChildField::Collection(property) => {
            cx.push_frame(node, property);
            let result = walk_collection(ast, cx, visitor, path, node, property);
            cx.pop_frame();
            result
        }
    }
}

fn walk_collection<V: Visitor + ?Sized>(
    ast: &mut Ast,
    cx: &mut TraversalContext,
    visitor: &mut V,
    path: PathId,
    owner: NodeId,
    property: &'static str,
) -> PathResult<VisitResult> {
    loop {
        if cx.is_removed(path) {
            break;
        }
        let Some(cursor) = cx.get_traversing_index() else {
            break;
        };
        let Ok(index) = usize::try_from(cursor) else {
            cx.update_traversing_index(1);
            continue;
        };
        let Some(child) = ast
            .node(owner)
            .collection(property)
            .and_then(|items| items.get(index).copied())
        else {
            break;
        };

        let child = cx.ensure_path(child, Some(path), Some(property), Some(index));
        if walk(ast, cx, visitor, child)? == VisitResult::Stop {
            return Ok(VisitResult::Stop);
        }
        cx.update_traversing_index(1);
    }
    Ok(VisitResult::Continue)
}

fn visit_kind<V: Visitor + ?Sized>(
    visitor: &mut V,
    node_type: NodeType,
    path: &mut NodePath<'_>,
) -> PathResult<VisitResult> {
    match node_type {
        NodeType::RegExp => visitor.visit_regexp(path),
        NodeType::Alternative => visitor.visit_alternative(path),
        NodeType::Disjunction => visitor.visit_disjunction(path),
        NodeType::Char => visitor.visit_char(path),
        NodeType::CharacterClass => visitor.visit_character_class(path),
        NodeType::ClassRange => visitor.visit_class_range(path),
        NodeType::Group => visitor.visit_group(path),
        NodeType::Backreference => visitor.visit_backreference(path),
        NodeType::Repetition => visitor.visit_repetition(path),
        NodeType::Assertion => visitor.visit_assertion(path),
    }
}

fn leave_kind<V: Visitor + ?Sized>(
    visitor: &mut V,
    node_type: NodeType,
    path: &mut NodePath<'_>,
) -> PathResult<()> {
    match node_type {
        NodeType::RegExp => visitor.leave_regexp(path),
        NodeType::Alternative => visitor.leave_alternative(path),
        NodeType::Disjunction => visitor.leave_disjunction(path),
        NodeType::Char => visitor.leave_char(path),
        NodeType::CharacterClass => visitor.leave_character_class(path),
        NodeType::ClassRange => visitor.leave_class_range(path),
        NodeType::Group => visitor.leave_group(path),
        NodeType::Backreference => visitor.leave_backreference(path),
        NodeType::Repetition => visitor.leave_repetition(path),
        NodeType::Assertion => visitor.leave_assertion(path),
    }
}
