// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! AST nodes.
//!
//! Nodes live in an [`Ast`] arena and refer to their children by [`NodeId`].
//! A node never refers to its parent; parent linkage is tracked by paths
//! (see [`crate::path`]).

mod arena;
mod kind;

use crate::path::{PathError, PathResult};

pub use arena::{Ast, NodeId, SpanTable};
pub use kind::{
    AssertionKind, CharKind, ChildField, NodeKind, NodeType, Quantifier, QuantifierKind,
    Reference, DEFAULT_COLLECTION,
};

/// Child storage of a node, shaped by its kind's [`ChildField`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Children {
    Leaf,
    Scalar(Option<NodeId>),
    Collection(Vec<NodeId>),
}

impl Children {
    fn empty_for(field: ChildField) -> Self {
        match field {
            ChildField::None => Children::Leaf,
            ChildField::Scalar(_) => Children::Scalar(None),
            ChildField::Collection(_) => Children::Collection(Vec::new()),
        }
    }
}

/// A single AST node: kind data plus children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    children: Children,
}

impl Node {
    /// Create a node with empty children for its kind.
    pub fn new(kind: NodeKind) -> Self {
        let children = Children::empty_for(kind.child_field());
        Node { kind, children }
    }

    /// Create a node whose scalar field holds `child`.
    ///
    /// For a kind without a scalar field the child is dropped.
    pub fn with_child(kind: NodeKind, child: Option<NodeId>) -> Self {
        let mut node = Node::new(kind);
        if let Children::Scalar(slot) = &mut node.children {
            *slot = child;
        }
        node
    }

    /// Create a node whose collection field holds `children`.
    ///
    /// For a kind without a collection field the children are dropped.
    pub fn with_children(kind: NodeKind, children: Vec<NodeId>) -> Self {
        let mut node = Node::new(kind);
        if let Children::Collection(items) = &mut node.children {
            *items = children;
        }
        node
    }

    /// A simple literal character.
    pub fn char(value: impl Into<String>) -> Self {
        Node::new(NodeKind::simple_char(value))
    }

    pub fn alternative(expressions: Vec<NodeId>) -> Self {
        Node::with_children(NodeKind::Alternative, expressions)
    }

    pub fn disjunction(alternatives: Vec<NodeId>) -> Self {
        Node::with_children(NodeKind::Disjunction, alternatives)
    }

    pub fn class(negative: bool, expressions: Vec<NodeId>) -> Self {
        Node::with_children(NodeKind::CharacterClass { negative }, expressions)
    }

    pub fn group(capturing: bool, expression: Option<NodeId>) -> Self {
        Node::with_child(
            NodeKind::Group {
                capturing,
                name: None,
                number: None,
            },
            expression,
        )
    }

    pub fn repetition(quantifier: Quantifier, expression: Option<NodeId>) -> Self {
        Node::with_child(NodeKind::Repetition { quantifier }, expression)
    }

    pub fn node_type(&self) -> NodeType {
        self.kind.node_type()
    }

    pub fn child_field(&self) -> ChildField {
        self.kind.child_field()
    }

    pub fn children(&self) -> &Children {
        &self.children
    }

    /// The scalar field named `property`.
    ///
    /// Returns `None` if this node has no such scalar field, `Some(None)` if
    /// the field exists but is empty.
    pub fn scalar(&self, property: &str) -> Option<Option<NodeId>> {
        match (self.child_field(), &self.children) {
            (ChildField::Scalar(name), Children::Scalar(slot)) if name == property => Some(*slot),
            _ => None,
        }
    }

    /// The collection field named `property`, if this node has one.
    pub fn collection(&self, property: &str) -> Option<&[NodeId]> {
        match (self.child_field(), &self.children) {
            (ChildField::Collection(name), Children::Collection(items)) if name == property => {
                Some(items)
            }
            _ => None,
        }
    }

    pub(crate) fn scalar_mut(&mut self, property: &str) -> Option<&mut Option<NodeId>> {
        match (self.kind.child_field(), &mut self.children) {
            (ChildField::Scalar(name), Children::Scalar(slot)) if name == property => Some(slot),
            _ => None,
        }
    }

    pub(crate) fn collection_mut(&mut self, property: &str) -> Option<&mut Vec<NodeId>> {
        match (self.kind.child_field(), &mut self.children) {
            (ChildField::Collection(name), Children::Collection(items)) if name == property => {
                Some(items)
            }
            _ => None,
        }
    }

    /// Ids of all present children, in order.
    pub fn child_ids(&self) -> Vec<NodeId> {
        match &self.children {
            Children::Leaf => Vec::new(),
            Children::Scalar(slot) => slot.iter().copied().collect(),
            Children::Collection(items) => items.clone(),
        }
    }
}

/// Anything that can be placed into a child slot.
///
/// A [`Node`] is allocated into the arena; a [`NodeId`] must already belong
/// to it.
pub trait IntoNodeId {
    fn into_node_id(self, ast: &mut Ast) -> PathResult<NodeId>;
}

impl IntoNodeId for NodeId {
    fn into_node_id(self, ast: &mut Ast) -> PathResult<NodeId> {
        match ast.get(self) {
            Some(_) => Ok(self),
            None => Err(PathError::UnknownNode {
                node: self,
                len: ast.len(),
            }),
        }
    }
}

impl IntoNodeId for Node {
    fn into_node_id(self, ast: &mut Ast) -> PathResult<NodeId> {
        Ok(ast.alloc(self))
    }
}
