// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! [`NodePath`]: navigation and mutation of one node in place.
//!
//! # Mutation during traversal
//!
//! All collection edits go through one primitive that splices the
//! collection, shifts the cursor of the frame iterating that collection
//! (when the edit lands at or before it), and reindexes every sibling path.
//! With cursor `c`:
//!
//! ```text
//! insert at i <= c  -> c + 1   (current element moved right)
//! remove at i <= c  -> c - 1   (later elements moved left)
//! edit at i > c     -> c       (not yet visited)
//! ```
//!
//! Scalar slot edits and replacements never touch cursors or indices.

use serde_json::Value;
use tracing::debug;

use super::context::{PathId, TraversalContext};
use super::{PathError, PathResult};
use crate::codegen::generate_node;
use crate::nodes::{
    Ast, ChildField, IntoNodeId, Node, NodeId, NodeKind, NodeType, DEFAULT_COLLECTION,
};

/// A handle onto one node, borrowed from the tree and its traversal context.
pub struct NodePath<'a> {
    ast: &'a mut Ast,
    cx: &'a mut TraversalContext,
    id: PathId,
}

enum CollectionEdit {
    Insert(NodeId),
    Remove,
}

impl<'a> NodePath<'a> {
    pub fn new(ast: &'a mut Ast, cx: &'a mut TraversalContext, id: PathId) -> Self {
        NodePath { ast, cx, id }
    }

    /// Path of the tree's root, registering it if needed.
    pub fn root(ast: &'a mut Ast, cx: &'a mut TraversalContext) -> Option<Self> {
        let id = cx.get_for_node(ast.root(), None, None, None)?;
        Some(NodePath { ast, cx, id })
    }

    /// Reborrow as a handle onto another path of the same session.
    pub fn at(&mut self, id: PathId) -> NodePath<'_> {
        NodePath {
            ast: &mut *self.ast,
            cx: &mut *self.cx,
            id,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn id(&self) -> PathId {
        self.id
    }

    pub fn node_id(&self) -> Option<NodeId> {
        self.cx.node_of(self.id)
    }

    pub fn node(&self) -> Option<&Node> {
        self.node_id().and_then(|id| self.ast.get(id))
    }

    pub fn kind(&self) -> Option<&NodeKind> {
        self.node().map(|node| &node.kind)
    }

    pub fn node_type(&self) -> Option<NodeType> {
        self.node().map(Node::node_type)
    }

    pub fn parent_path(&self) -> Option<PathId> {
        self.cx.record(self.id).and_then(|record| record.parent)
    }

    /// Node of the parent path.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent_path().and_then(|parent| self.cx.node_of(parent))
    }

    pub fn property(&self) -> Option<&'static str> {
        self.cx.record(self.id).and_then(|record| record.property)
    }

    pub fn index(&self) -> Option<usize> {
        self.cx.record(self.id).and_then(|record| record.index)
    }

    pub fn is_removed(&self) -> bool {
        self.cx.is_removed(self.id)
    }

    pub fn ast(&self) -> &Ast {
        &*self.ast
    }

    pub fn context(&self) -> &TraversalContext {
        &*self.cx
    }

    /// Allocate a node for later insertion.
    pub fn alloc(&mut self, node: Node) -> NodeId {
        self.ast.alloc(node)
    }

    fn live_node(&self) -> PathResult<NodeId> {
        self.node_id().ok_or(PathError::Removed)
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    pub fn get_parent(&mut self) -> Option<NodePath<'_>> {
        let parent = self.parent_path()?;
        Some(self.at(parent))
    }

    /// The `n`-th child.
    ///
    /// A scalar field only has child 0; a collection has children
    /// `0..len`. Leaves, empty slots and removed paths have none.
    pub fn get_child(&mut self, n: usize) -> Option<NodePath<'_>> {
        let owner = self.node_id()?;
        let node = self.ast.node(owner);
        let id = match node.child_field() {
            ChildField::None => return None,
            ChildField::Scalar(property) => {
                if n != 0 {
                    return None;
                }
                let child = node.scalar(property).flatten()?;
                self.cx.ensure_path(child, Some(self.id), Some(property), None)
            }
            ChildField::Collection(property) => {
                let child = *node.collection(property)?.get(n)?;
                self.cx.ensure_path(child, Some(self.id), Some(property), Some(n))
            }
        };
        Some(self.at(id))
    }

    pub fn get_previous_sibling(&mut self) -> Option<NodePath<'_>> {
        let index = self.index()?.checked_sub(1)?;
        self.sibling_at(index)
    }

    pub fn get_next_sibling(&mut self) -> Option<NodePath<'_>> {
        let index = self.index()? + 1;
        self.sibling_at(index)
    }

    fn sibling_at(&mut self, index: usize) -> Option<NodePath<'_>> {
        let parent_path = self.parent_path()?;
        let parent = self.cx.node_of(parent_path)?;
        let property = self.property()?;
        let sibling = *self.ast.node(parent).collection(property)?.get(index)?;
        let id = self
            .cx
            .ensure_path(sibling, Some(parent_path), Some(property), Some(index));
        Some(self.at(id))
    }

    // ========================================================================
    // Structural mutation
    // ========================================================================

    /// Insert `node` at `index` of this node's `expressions` collection.
    pub fn insert_child_at(&mut self, node: impl IntoNodeId, index: usize) -> PathResult<PathId> {
        self.insert_child_at_in(node, index, DEFAULT_COLLECTION)
    }

    /// Insert `node` at `index` of this node's `property` collection.
    ///
    /// An index past the end appends. Every sibling path is reindexed and
    /// an active cursor over the collection is shifted when `index` is at
    /// or before it.
    pub fn insert_child_at_in(
        &mut self,
        node: impl IntoNodeId,
        index: usize,
        property: &str,
    ) -> PathResult<PathId> {
        let owner = self.live_node()?;
        let property = self.collection_field(owner, property)?;
        let child = node.into_node_id(self.ast)?;
        let at = edit_collection(
            self.ast,
            self.cx,
            self.id,
            owner,
            property,
            index,
            CollectionEdit::Insert(child),
        );
        debug!(%owner, %child, property, index = at, "inserted child");
        Ok(self.cx.ensure_path(child, Some(self.id), Some(property), Some(at)))
    }

    pub fn append_child(&mut self, node: impl IntoNodeId) -> PathResult<PathId> {
        self.append_child_in(node, DEFAULT_COLLECTION)
    }

    pub fn append_child_in(&mut self, node: impl IntoNodeId, property: &str) -> PathResult<PathId> {
        let owner = self.live_node()?;
        let property = self.collection_field(owner, property)?;
        let len = self.ast.node(owner).collection(property).map_or(0, <[NodeId]>::len);
        self.insert_child_at_in(node, len, property)
    }

    /// Write `node` into a child slot of this node.
    ///
    /// `property` defaults to the node's own child field. For a collection,
    /// `Some(index)` overwrites that slot (or appends at `len`) and `None`
    /// appends. For a scalar field `index` is ignored. A child that is
    /// overwritten has its path retired.
    pub fn set_child(
        &mut self,
        node: impl IntoNodeId,
        index: Option<usize>,
        property: Option<&str>,
    ) -> PathResult<PathId> {
        let owner = self.live_node()?;
        let field = self.ast.node(owner).child_field();
        let requested = property.or(field.name()).unwrap_or(DEFAULT_COLLECTION);
        match field {
            ChildField::Scalar(name) if name == requested => {
                let child = node.into_node_id(self.ast)?;
                let previous = self
                    .ast
                    .node_mut(owner)
                    .scalar_mut(name)
                    .and_then(|slot| slot.replace(child));
                self.retire_detached(previous, child);
                debug!(%owner, %child, property = name, "set scalar child");
                Ok(self.cx.ensure_path(child, Some(self.id), Some(name), None))
            }
            ChildField::Collection(name) if name == requested => {
                let len = self.ast.node(owner).collection(name).map_or(0, <[NodeId]>::len);
                match index {
                    Some(index) if index < len => {
                        let child = node.into_node_id(self.ast)?;
                        let previous = self
                            .ast
                            .node_mut(owner)
                            .collection_mut(name)
                            .map(|items| std::mem::replace(&mut items[index], child));
                        self.retire_detached(previous, child);
                        debug!(%owner, %child, property = name, index, "set collection child");
                        Ok(self.cx.ensure_path(child, Some(self.id), Some(name), Some(index)))
                    }
                    Some(index) if index > len => Err(PathError::IndexOutOfBounds {
                        property: name.to_string(),
                        index,
                        len,
                    }),
                    _ => self.insert_child_at_in(node, len, name),
                }
            }
            _ => Err(PathError::StructuralMutation {
                node_type: self.ast.node(owner).kind.type_name(),
                property: requested.to_string(),
            }),
        }
    }

    /// Detach this node from its slot and mark the path removed.
    ///
    /// Calling it again is a no-op. The root is only marked removed; the
    /// tree keeps its root pointer.
    pub fn remove(&mut self) {
        let Some(node) = self.node_id() else {
            return;
        };
        let parent_path = self.parent_path();
        let owner = parent_path.and_then(|parent| self.cx.node_of(parent));
        let property = self.property();

        match (parent_path, owner, property) {
            (Some(parent_path), Some(owner), Some(property)) => {
                let field = self.ast.node(owner).child_field();
                match field {
                    ChildField::Collection(name) if name == property => {
                        if let Some(position) = self.position_in(owner, name, node) {
                            edit_collection(
                                self.ast,
                                self.cx,
                                parent_path,
                                owner,
                                name,
                                position,
                                CollectionEdit::Remove,
                            );
                        }
                    }
                    ChildField::Scalar(name) if name == property => {
                        if let Some(slot) = self.ast.node_mut(owner).scalar_mut(name) {
                            if *slot == Some(node) {
                                *slot = None;
                            }
                        }
                    }
                    _ => {}
                }
                debug!(%node, %owner, property, "removed node");
            }
            _ => debug!(%node, "removed root"),
        }

        self.cx.retire(self.id);
    }

    /// Put `node` in this path's slot; the path then refers to `node`.
    ///
    /// Replacing the root re-roots the tree. If `node` already had a path,
    /// that path is retired.
    pub fn replace(&mut self, node: impl IntoNodeId) -> PathResult<PathId> {
        let old = self.live_node()?;
        let new = node.into_node_id(self.ast)?;
        if new == old {
            return Ok(self.id);
        }

        match (self.parent(), self.property()) {
            (Some(owner), Some(property)) => {
                let field = self.ast.node(owner).child_field();
                match field {
                    ChildField::Collection(name) if name == property => {
                        if let Some(position) = self.position_in(owner, name, old) {
                            if let Some(items) = self.ast.node_mut(owner).collection_mut(name) {
                                items[position] = new;
                            }
                            if let Some(record) = self.cx.record_mut(self.id) {
                                record.index = Some(position);
                            }
                        }
                    }
                    ChildField::Scalar(name) if name == property => {
                        if let Some(slot) = self.ast.node_mut(owner).scalar_mut(name) {
                            *slot = Some(new);
                        }
                    }
                    _ => {}
                }
            }
            _ => {
                if self.ast.root() == Some(old) {
                    self.ast.set_root(Some(new));
                }
            }
        }

        self.cx.rebind(self.id, old, new);
        debug!(%old, %new, path = %self.id, "replaced node");
        Ok(self.id)
    }

    /// Edit this node's data fields in place.
    ///
    /// The edit may not change which child field the kind declares; such an
    /// edit is reverted and reported as [`PathError::ShapeMismatch`].
    pub fn update(&mut self, edit: impl FnOnce(&mut NodeKind)) -> PathResult<()> {
        let id = self.live_node()?;
        let node = self.ast.node_mut(id);
        let before = node.kind.clone();
        edit(&mut node.kind);
        if node.kind.child_field() != before.child_field() {
            let attempted = node.kind.type_name();
            node.kind = before;
            return Err(PathError::ShapeMismatch {
                node_type: node.kind.type_name(),
                attempted,
            });
        }
        debug!(node = %id, kind = node.kind.type_name(), "updated node");
        Ok(())
    }

    // ========================================================================
    // Encoding
    // ========================================================================

    /// JSON encoding of the subtree, `null` once removed.
    pub fn json_encode(&self) -> Value {
        self.node_id().map_or(Value::Null, |id| self.ast.to_json(id))
    }

    /// Generated pattern text of the subtree.
    pub fn source(&self) -> Option<String> {
        self.node_id().map(|id| generate_node(self.ast(), id))
    }

    /// Whether `other` generates the same pattern text as this path.
    pub fn has_equal_source(&self, other: PathId) -> bool {
        let Some(other) = self.cx.node_of(other) else {
            return false;
        };
        self.source()
            .is_some_and(|source| source == generate_node(self.ast(), other))
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn collection_field(&self, owner: NodeId, property: &str) -> PathResult<&'static str> {
        let node = self.ast.node(owner);
        match node.child_field() {
            ChildField::Collection(name) if name == property => Ok(name),
            _ => Err(PathError::StructuralMutation {
                node_type: node.kind.type_name(),
                property: property.to_string(),
            }),
        }
    }

    /// Where `node` sits in `owner.property`, trusting the recorded index
    /// first.
    fn position_in(&self, owner: NodeId, property: &str, node: NodeId) -> Option<usize> {
        let items = self.ast.node(owner).collection(property)?;
        match self.index() {
            Some(index) if items.get(index) == Some(&node) => Some(index),
            _ => items.iter().position(|item| *item == node),
        }
    }

    fn retire_detached(&mut self, previous: Option<NodeId>, placed: NodeId) {
        let Some(previous) = previous.filter(|previous| *previous != placed) else {
            return;
        };
        if let Some(path) = self.cx.path_for_node(previous) {
            self.cx.retire(path);
        }
    }
}

/// Splice `owner.property` and keep cursors and sibling indices consistent.
///
/// Returns the index the edit applied at.
fn edit_collection(
    ast: &mut Ast,
    cx: &mut TraversalContext,
    owner_path: PathId,
    owner: NodeId,
    property: &'static str,
    index: usize,
    edit: CollectionEdit,
) -> usize {
    let Some(items) = ast.node_mut(owner).collection_mut(property) else {
        return index;
    };
    let at = match edit {
        CollectionEdit::Insert(child) => {
            let at = index.min(items.len());
            items.insert(at, child);
            cx.shift_cursor(owner, property, at, 1);
            at
        }
        CollectionEdit::Remove => {
            if index >= items.len() {
                return index;
            }
            items.remove(index);
            cx.shift_cursor(owner, property, index, -1);
            index
        }
    };

    let siblings = items.clone();
    for (position, sibling) in siblings.into_iter().enumerate() {
        cx.ensure_path(sibling, Some(owner_path), Some(property), Some(position));
    }
    at
}
