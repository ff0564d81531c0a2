// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Node arena, node identity and source spans.
//!
//! # Node Identity
//!
//! [`NodeId`] is the index of a node in its [`Ast`]. Ids assigned by the
//! parser follow pre-order (parent before children, left to right); nodes
//! allocated later by transformations take the next free index.
//!
//! ```text
//! Given pattern: /a(b)/
//!   NodeId(0) -> RegExp
//!   NodeId(1) -> Alternative
//!   NodeId(2) -> Char "a"
//!   NodeId(3) -> Group #1
//!   NodeId(4) -> Alternative
//!   NodeId(5) -> Char "b"
//! ```
//!
//! Nodes are never freed. A node detached by a transformation stays in the
//! arena but is no longer reachable from the root.

use std::collections::HashMap;

use rxtree_core::text::Span;
use serde_json::{Map, Value};

use super::{Children, Node};

// ============================================================================
// Node Identity
// ============================================================================

/// A stable identifier for a node in an [`Ast`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Create a new NodeId with the given value.
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw u32 value.
    pub fn as_u32(&self) -> u32 {
        self.0
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

// ============================================================================
// Span Table
// ============================================================================

/// A table mapping [`NodeId`]s to their source [`Span`]s.
///
/// Only parsed nodes have spans. Offsets index into the text handed to the
/// parser, including the `/.../` delimiters of a literal.
#[derive(Debug, Clone, Default)]
pub struct SpanTable {
    spans: HashMap<NodeId, Span>,
}

impl SpanTable {
    /// Create a new empty SpanTable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a span for a node.
    pub fn insert(&mut self, node_id: NodeId, span: Span) {
        self.spans.insert(node_id, span);
    }

    /// Get the span for a node, if recorded.
    pub fn get(&self, node_id: NodeId) -> Option<Span> {
        self.spans.get(&node_id).copied()
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

// ============================================================================
// Arena
// ============================================================================

/// Owning arena of nodes plus the root pointer.
#[derive(Debug, Clone, Default)]
pub struct Ast {
    nodes: Vec<Node>,
    root: Option<NodeId>,
    spans: SpanTable,
}

impl Ast {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate `node` and return its id.
    pub fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Borrow a node.
    ///
    /// # Panics
    /// Panics if `id` was not allocated by this arena.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub(crate) fn set_children(&mut self, id: NodeId, children: Children) {
        self.node_mut(id).children = children;
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn set_root(&mut self, root: Option<NodeId>) {
        self.root = root;
    }

    /// Number of allocated nodes, reachable or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn spans(&self) -> &SpanTable {
        &self.spans
    }

    pub(crate) fn spans_mut(&mut self) -> &mut SpanTable {
        &mut self.spans
    }

    /// Source span of a parsed node.
    pub fn span(&self, id: NodeId) -> Option<Span> {
        self.spans.get(id)
    }

    /// Encode the subtree at `id` as JSON.
    ///
    /// The object carries `type`, the kind's data fields and the child field
    /// (`null` for an empty scalar slot).
    pub fn to_json(&self, id: NodeId) -> Value {
        let Some(node) = self.get(id) else {
            return Value::Null;
        };
        let mut object = match serde_json::to_value(&node.kind) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };
        object.insert(
            "type".to_string(),
            Value::String(node.kind.type_name().to_string()),
        );
        if let Some(field) = node.child_field().name() {
            let value = match &node.children {
                Children::Leaf => Value::Null,
                Children::Scalar(slot) => slot.map_or(Value::Null, |child| self.to_json(child)),
                Children::Collection(items) => {
                    Value::Array(items.iter().map(|child| self.to_json(*child)).collect())
                }
            };
            object.insert(field.to_string(), value);
        }
        Value::Object(object)
    }

    /// Encode the whole tree, `null` when there is no root.
    pub fn root_json(&self) -> Value {
        self.root.map_or(Value::Null, |root| self.to_json(root))
    }
}
