// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Path registry and traversing index stack.

use std::collections::HashMap;

use tracing::trace;

use crate::nodes::NodeId;

/// Handle to a path record in a [`TraversalContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PathId(u32);

impl PathId {
    pub fn as_u32(&self) -> u32 {
        self.0
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PathId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PathId({})", self.0)
    }
}

/// Position metadata of one path.
///
/// `node` is `None` once the path was removed; that state is terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRecord {
    pub(crate) node: Option<NodeId>,
    pub(crate) parent: Option<PathId>,
    pub(crate) property: Option<&'static str>,
    pub(crate) index: Option<usize>,
}

impl PathRecord {
    pub fn node(&self) -> Option<NodeId> {
        self.node
    }

    pub fn parent(&self) -> Option<PathId> {
        self.parent
    }

    pub fn property(&self) -> Option<&'static str> {
        self.property
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn is_removed(&self) -> bool {
        self.node.is_none()
    }

    pub(crate) fn retire(&mut self) {
        self.node = None;
        self.property = None;
        self.index = None;
    }
}

/// One active collection iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraversalFrame {
    pub owner: NodeId,
    pub property: &'static str,
    pub cursor: isize,
}

/// Registry plus traversing index stack for one traversal session.
///
/// The registry maps each live node to its one path. The stack holds one
/// frame per collection being iterated, innermost last.
#[derive(Debug, Default)]
pub struct TraversalContext {
    paths: Vec<PathRecord>,
    registry: HashMap<NodeId, PathId>,
    traversing: Vec<TraversalFrame>,
}

impl TraversalContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every registered path and frame.
    pub fn init_registry(&mut self) {
        self.paths.clear();
        self.registry.clear();
        self.traversing.clear();
    }

    /// Path for `node`, creating and registering one if needed.
    ///
    /// An existing path has its linkage refreshed: `parent` and `property`
    /// when supplied, and `index` whenever `property` is supplied, since an
    /// index only means something relative to its field.
    pub fn get_for_node(
        &mut self,
        node: impl Into<Option<NodeId>>,
        parent: Option<PathId>,
        property: Option<&'static str>,
        index: Option<usize>,
    ) -> Option<PathId> {
        let node = node.into()?;
        Some(self.ensure_path(node, parent, property, index))
    }

    pub(crate) fn ensure_path(
        &mut self,
        node: NodeId,
        parent: Option<PathId>,
        property: Option<&'static str>,
        index: Option<usize>,
    ) -> PathId {
        if let Some(&id) = self.registry.get(&node) {
            let record = &mut self.paths[id.index()];
            if parent.is_some() {
                record.parent = parent;
            }
            if property.is_some() {
                record.property = property;
                record.index = index;
            }
            return id;
        }

        let id = PathId(self.paths.len() as u32);
        self.paths.push(PathRecord {
            node: Some(node),
            parent,
            property,
            index,
        });
        self.registry.insert(node, id);
        trace!(%node, path = %id, "registered path");
        id
    }

    /// Registered path for `node`, without creating one.
    pub fn path_for_node(&self, node: NodeId) -> Option<PathId> {
        self.registry.get(&node).copied()
    }

    pub fn record(&self, id: PathId) -> Option<&PathRecord> {
        self.paths.get(id.index())
    }

    pub(crate) fn record_mut(&mut self, id: PathId) -> Option<&mut PathRecord> {
        self.paths.get_mut(id.index())
    }

    /// Node of a path, `None` if unknown or removed.
    pub fn node_of(&self, id: PathId) -> Option<NodeId> {
        self.record(id).and_then(|record| record.node)
    }

    pub fn is_removed(&self, id: PathId) -> bool {
        self.record(id).is_none_or(PathRecord::is_removed)
    }

    /// Number of paths minted this session.
    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    /// Point `node` at path `id`, retiring any other path it had.
    pub(crate) fn rebind(&mut self, id: PathId, old: NodeId, node: NodeId) {
        if self.registry.get(&old) == Some(&id) {
            self.registry.remove(&old);
        }
        if let Some(previous) = self.registry.insert(node, id) {
            if previous != id {
                if let Some(record) = self.record_mut(previous) {
                    record.retire();
                }
            }
        }
        if let Some(record) = self.record_mut(id) {
            record.node = Some(node);
        }
    }

    /// Mark path `id` removed and forget its node.
    pub(crate) fn retire(&mut self, id: PathId) {
        if let Some(node) = self.node_of(id) {
            if self.registry.get(&node) == Some(&id) {
                self.registry.remove(&node);
            }
        }
        if let Some(record) = self.record_mut(id) {
            record.retire();
        }
    }

    // ------------------------------------------------------------------------
    // Traversing index stack
    // ------------------------------------------------------------------------

    /// Enter iteration of `owner`'s `property` collection at cursor 0.
    pub fn push_frame(&mut self, owner: NodeId, property: &'static str) {
        self.traversing.push(TraversalFrame {
            owner,
            property,
            cursor: 0,
        });
    }

    pub fn pop_frame(&mut self) -> Option<TraversalFrame> {
        self.traversing.pop()
    }

    /// Add `delta` to the innermost cursor, returning the new value.
    pub fn update_traversing_index(&mut self, delta: isize) -> Option<isize> {
        let frame = self.traversing.last_mut()?;
        frame.cursor += delta;
        Some(frame.cursor)
    }

    /// The innermost cursor.
    pub fn get_traversing_index(&self) -> Option<isize> {
        self.traversing.last().map(|frame| frame.cursor)
    }

    pub fn frames(&self) -> &[TraversalFrame] {
        &self.traversing
    }

    /// Keep the cursor over `owner.property` aligned after an edit at
    /// `index`.
    ///
    /// Only the innermost frame iterating that collection moves, and only
    /// when the edit is at or before its cursor.
    pub(crate) fn shift_cursor(&mut self, owner: NodeId, property: &str, index: usize, delta: isize) {
        let Some(frame) = self
            .traversing
            .iter_mut()
            .rev()
            .find(|frame| frame.owner == owner && frame.property == property)
        else {
            return;
        };
        if (index as isize) <= frame.cursor {
            frame.cursor += delta;
            trace!(%owner, property, index, cursor = frame.cursor, "shifted cursor");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_for_node_memoizes() {
        let mut cx = TraversalContext::new();
        let a = cx.get_for_node(NodeId(3), None, None, None);
        let b = cx.get_for_node(NodeId(3), None, None, None);
        assert!(a.is_some());
        assert_eq!(a, b);
        assert_eq!(cx.path_count(), 1);
    }

    #[test]
    fn absent_node_gives_absent_path() {
        let mut cx = TraversalContext::new();
        assert_eq!(cx.get_for_node(None, None, None, None), None);
        assert_eq!(cx.path_count(), 0);
    }

    #[test]
    fn linkage_refreshes_only_when_supplied() {
        let mut cx = TraversalContext::new();
        let parent = cx.ensure_path(NodeId(0), None, None, None);
        let id = cx.ensure_path(NodeId(1), Some(parent), Some("expressions"), Some(2));

        cx.ensure_path(NodeId(1), None, None, None);
        let record = cx.record(id).unwrap();
        assert_eq!(record.parent(), Some(parent));
        assert_eq!(record.index(), Some(2));

        cx.ensure_path(NodeId(1), None, Some("expression"), None);
        let record = cx.record(id).unwrap();
        assert_eq!(record.property(), Some("expression"));
        assert_eq!(record.index(), None);
    }

    #[test]
    fn init_registry_clears_everything() {
        let mut cx = TraversalContext::new();
        cx.ensure_path(NodeId(0), None, None, None);
        cx.push_frame(NodeId(0), "expressions");
        cx.init_registry();
        assert_eq!(cx.path_count(), 0);
        assert_eq!(cx.path_for_node(NodeId(0)), None);
        assert_eq!(cx.get_traversing_index(), None);
    }

    #[test]
    fn stack_updates_top_frame() {
        let mut cx = TraversalContext::new();
        assert_eq!(cx.update_traversing_index(1), None);
        cx.push_frame(NodeId(0), "expressions");
        cx.push_frame(NodeId(1), "expressions");
        assert_eq!(cx.update_traversing_index(2), Some(2));
        let inner = cx.pop_frame().unwrap();
        assert_eq!(inner.cursor, 2);
        assert_eq!(cx.get_traversing_index(), Some(0));
    }

    #[test]
    fn shift_cursor_targets_matching_frame() {
        let mut cx = TraversalContext::new();
        cx.push_frame(NodeId(0), "alternatives");
        cx.update_traversing_index(3);
        cx.push_frame(NodeId(5), "expressions");
        cx.update_traversing_index(1);

        cx.shift_cursor(NodeId(0), "alternatives", 1, -1);
        assert_eq!(cx.frames()[0].cursor, 2);
        assert_eq!(cx.frames()[1].cursor, 1);

        cx.shift_cursor(NodeId(5), "expressions", 4, 1);
        assert_eq!(cx.frames()[1].cursor, 1);

        cx.shift_cursor(NodeId(9), "expressions", 0, 1);
        assert_eq!(cx.get_traversing_index(), Some(1));
    }

    #[test]
    fn rebind_retires_previous_path() {
        let mut cx = TraversalContext::new();
        let slot = cx.ensure_path(NodeId(1), None, None, None);
        let other = cx.ensure_path(NodeId(2), None, None, None);
        cx.rebind(slot, NodeId(1), NodeId(2));
        assert_eq!(cx.path_for_node(NodeId(2)), Some(slot));
        assert_eq!(cx.path_for_node(NodeId(1)), None);
        assert!(cx.is_removed(other));
        assert_eq!(cx.node_of(slot), Some(NodeId(2)));
    }
}
