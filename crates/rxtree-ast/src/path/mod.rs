// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Paths: stable handles onto AST nodes that stay correct under mutation.
//!
//! A [`NodePath`] pairs a node with its position (parent path, field name,
//! collection index). Paths are memoized per node in a [`TraversalContext`],
//! which also holds the cursor stack of every collection the driver is
//! currently iterating. Structural edits made through a `NodePath` keep
//! sibling indices and those cursors consistent, so a visitor can insert,
//! remove or replace nodes while the tree is being walked.

mod context;
mod node_path;

pub use context::{PathId, PathRecord, TraversalContext, TraversalFrame};
pub use node_path::NodePath;

use thiserror::Error;

use crate::nodes::NodeId;

/// Errors raised by path operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// The target node has no collection (or child field) by that name.
    #[error("{node_type} node has no child field '{property}'")]
    StructuralMutation {
        node_type: &'static str,
        property: String,
    },

    /// The path's node was removed.
    #[error("path refers to a removed node")]
    Removed,

    /// An update tried to change which child field the node declares.
    #[error("update would change the child layout of {node_type} to that of {attempted}")]
    ShapeMismatch {
        node_type: &'static str,
        attempted: &'static str,
    },

    /// A node id that this arena never allocated.
    #[error("node {node} is not in the arena ({len} nodes)")]
    UnknownNode { node: NodeId, len: usize },

    /// A collection slot past the end was addressed.
    #[error("index {index} is out of bounds for '{property}' of length {len}")]
    IndexOutOfBounds {
        property: String,
        index: usize,
        len: usize,
    },
}

pub type PathResult<T> = Result<T, PathError>;
