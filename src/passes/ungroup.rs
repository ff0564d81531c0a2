//! `ungroup`: unwrap non-capturing groups that hold a single term.

use rxtree_ast::{
    Ast, CharKind, NodeId, NodeKind, NodePath, NodeType, PathResult, Visitor, DEFAULT_COLLECTION,
};
use tracing::debug;

use super::Pass;

/// Replaces `(?:t)` with `t` when `t` is one term.
///
/// Groups run in post-order, so nested wrappers collapse in one run. A group
/// under a quantifier is kept unless its term can take the quantifier, and
/// groups around digits and brace characters are kept because the bare
/// character could merge with a neighbor into an escape or quantifier.
#[derive(Debug, Default)]
pub struct Ungroup {
    ungrouped: usize,
}

impl Ungroup {
    pub const NAME: &'static str = "ungroup";

    /// Groups unwrapped by the last run.
    pub fn ungrouped(&self) -> usize {
        self.ungrouped
    }
}

fn single_term(path: &mut NodePath<'_>) -> Option<NodeId> {
    if !matches!(
        path.kind(),
        Some(NodeKind::Group {
            capturing: false,
            ..
        })
    ) {
        return None;
    }
    let under_quantifier = path
        .get_parent()
        .and_then(|parent| parent.node_type())
        .is_some_and(|parent| parent == NodeType::Repetition);

    let body = path.get_child(0)?.node_id()?;
    let ast = path.ast();
    let body = ast.node(body);
    if body.node_type() != NodeType::Alternative {
        return None;
    }
    let Some(&[term]) = body.collection(DEFAULT_COLLECTION) else {
        return None;
    };

    let kind = &ast.node(term).kind;
    if under_quantifier && !quantifiable(kind) {
        return None;
    }
    if fuses_with_neighbors(kind) {
        return None;
    }
    Some(term)
}

fn quantifiable(kind: &NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::Char { .. }
            | NodeKind::CharacterClass { .. }
            | NodeKind::Group { .. }
            | NodeKind::Backreference { .. }
    )
}

fn fuses_with_neighbors(kind: &NodeKind) -> bool {
    match kind {
        NodeKind::Char {
            value,
            kind: CharKind::Simple,
        } => value
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '{' | '}' | ',')),
        _ => false,
    }
}

impl Visitor for Ungroup {
    fn leave_group(&mut self, path: &mut NodePath<'_>) -> PathResult<()> {
        let Some(term) = single_term(path) else {
            return Ok(());
        };
        debug!(path = %path.id(), %term, "ungroup");
        path.replace(term)?;
        self.ungrouped += 1;
        Ok(())
    }
}

impl Pass for Ungroup {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn init(&mut self, _ast: &Ast) {
        self.ungrouped = 0;
    }
}
