//! `strip-chars`: remove simple characters found in a strip set.

use std::collections::BTreeSet;

use rxtree_ast::{
    generate_node, parse_with_flags, Ast, CharKind, NodeId, NodeKind, NodePath, NodeType,
    PathResult, VisitResult, Visitor,
};
use tracing::debug;

use super::Pass;

/// Removes every simple `Char` whose value is one of the configured
/// characters. Escaped, meta and class-range characters are left alone.
///
/// A char is kept when its neighbors would read back as different tokens
/// once it is gone, as in `\1b0` (a backreference `\10`) or `a{b2}` (a
/// quantifier `{2}`).
#[derive(Debug, Default)]
pub struct StripChars {
    chars: BTreeSet<char>,
    removed: usize,
}

impl StripChars {
    pub const NAME: &'static str = "strip-chars";

    pub fn new(chars: &str) -> Self {
        StripChars {
            chars: chars.chars().collect(),
            removed: 0,
        }
    }

    /// Characters removed by the last run.
    pub fn removed(&self) -> usize {
        self.removed
    }

    fn matches(&self, kind: Option<&NodeKind>) -> bool {
        let Some(NodeKind::Char {
            value,
            kind: CharKind::Simple,
        }) = kind
        else {
            return false;
        };
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => self.chars.contains(&c),
            _ => false,
        }
    }
}

/// The collection that loses a rendered slot when `path` is removed, and
/// the slot's index. A char under a quantifier takes the quantifier with it.
fn gap(path: &NodePath<'_>) -> Option<(NodeId, usize)> {
    let cx = path.context();
    let parent = path.parent_path()?;
    let owner = cx.node_of(parent)?;
    match path.ast().node(owner).node_type() {
        NodeType::Alternative | NodeType::CharacterClass => Some((owner, path.index()?)),
        NodeType::Repetition => {
            let record = cx.record(parent)?;
            let outer = cx.node_of(record.parent()?)?;
            let index = record.index()?;
            (path.ast().node(outer).node_type() == NodeType::Alternative).then_some((outer, index))
        }
        _ => None,
    }
}

type Token = (String, NodeType, Option<CharKind>);

/// Source and shape of a rendered term, `None` when it renders nothing.
fn token(ast: &Ast, id: NodeId) -> Option<Token> {
    let source = generate_node(ast, id);
    if source.is_empty() {
        return None;
    }
    let node = ast.node(id);
    let char_kind = match &node.kind {
        NodeKind::Char { kind, .. } => Some(*kind),
        _ => None,
    };
    Some((source, node.node_type(), char_kind))
}

/// Whether the items of `owner` other than `index` parse back to the same
/// tokens when written side by side.
fn joins_cleanly(ast: &Ast, owner: NodeId, index: usize) -> bool {
    let node = ast.node(owner);
    let remaining: Vec<NodeId> = node
        .child_ids()
        .into_iter()
        .enumerate()
        .filter_map(|(i, id)| (i != index).then_some(id))
        .collect();
    let expected: Vec<Token> = remaining.iter().filter_map(|id| token(ast, *id)).collect();
    let text: String = remaining.iter().map(|id| generate_node(ast, *id)).collect();

    let negative = match node.kind {
        NodeKind::CharacterClass { negative } => Some(negative),
        _ => None,
    };
    let source = match negative {
        Some(true) => format!("[^{}]", text),
        Some(false) => format!("[{}]", text),
        None => text,
    };

    let Ok(reparsed) = parse_with_flags(&source, "") else {
        return false;
    };
    let Some(body) = reparsed
        .root()
        .and_then(|root| reparsed.node(root).scalar("body").flatten())
    else {
        return false;
    };
    let mut items = reparsed.node(body).child_ids();
    if let Some(negative) = negative {
        let &[class] = items.as_slice() else {
            return false;
        };
        if reparsed.node(class).kind != (NodeKind::CharacterClass { negative }) {
            return false;
        }
        items = reparsed.node(class).child_ids();
    }

    let actual: Vec<Token> = items.iter().filter_map(|id| token(&reparsed, *id)).collect();
    actual == expected
}

impl Visitor for StripChars {
    fn visit_char(&mut self, path: &mut NodePath<'_>) -> PathResult<VisitResult> {
        if !self.matches(path.kind()) {
            return Ok(VisitResult::Continue);
        }
        if let Some((owner, index)) = gap(path) {
            if !joins_cleanly(path.ast(), owner, index) {
                debug!(path = %path.id(), "keep char, neighbors would fuse");
                return Ok(VisitResult::Continue);
            }
        }
        debug!(path = %path.id(), "strip char");
        path.remove();
        self.removed += 1;
        Ok(VisitResult::Continue)
    }
}

impl Pass for StripChars {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn should_run(&self, _ast: &Ast) -> bool {
        !self.chars.is_empty()
    }

    fn init(&mut self, _ast: &Ast) {
        self.removed = 0;
    }
}
