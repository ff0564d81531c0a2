// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Deflated parse trees and their inflation into an [`Ast`].
//!
//! The grammar builds an owned tree with no ids. Inflation allocates every
//! node into the arena in pre-order, so ids are deterministic for a given
//! source, records spans, and numbers capturing groups by the position of
//! their opening parenthesis.

use rxtree_core::text::Span;

use crate::nodes::{Ast, CharKind, Children, Node, NodeId, NodeKind};

#[derive(Debug)]
pub(crate) enum DeflatedChildren {
    Leaf,
    Scalar(Option<Box<Deflated>>),
    Collection(Vec<Deflated>),
}

#[derive(Debug)]
pub(crate) struct Deflated {
    pub(crate) kind: NodeKind,
    pub(crate) span: Span,
    pub(crate) children: DeflatedChildren,
}

impl Deflated {
    pub(crate) fn leaf(kind: NodeKind, start: usize, end: usize) -> Self {
        Deflated {
            kind,
            span: Span::new(start, end),
            children: DeflatedChildren::Leaf,
        }
    }

    pub(crate) fn scalar(kind: NodeKind, child: Option<Deflated>, start: usize, end: usize) -> Self {
        Deflated {
            kind,
            span: Span::new(start, end),
            children: DeflatedChildren::Scalar(child.map(Box::new)),
        }
    }

    pub(crate) fn collection(
        kind: NodeKind,
        children: Vec<Deflated>,
        start: usize,
        end: usize,
    ) -> Self {
        Deflated {
            kind,
            span: Span::new(start, end),
            children: DeflatedChildren::Collection(children),
        }
    }

    pub(crate) fn char(value: &str, kind: CharKind, start: usize, end: usize) -> Self {
        Deflated::leaf(
            NodeKind::Char {
                value: value.to_string(),
                kind,
            },
            start,
            end,
        )
    }

    /// Value and kind of a char node.
    pub(crate) fn as_char(&self) -> Option<(&str, CharKind)> {
        match &self.kind {
            NodeKind::Char { value, kind } => Some((value, *kind)),
            _ => None,
        }
    }

    pub(crate) fn inflate(self, ctx: &mut InflateCtx<'_>) -> NodeId {
        let Deflated {
            mut kind,
            span,
            children,
        } = self;

        if let NodeKind::Group {
            capturing: true,
            number,
            ..
        } = &mut kind
        {
            ctx.groups += 1;
            *number = Some(ctx.groups);
        }

        let id = ctx.ast.alloc(Node::new(kind));
        ctx.ast.spans_mut().insert(id, span.shifted(ctx.shift));

        let children = match children {
            DeflatedChildren::Leaf => Children::Leaf,
            DeflatedChildren::Scalar(child) => {
                Children::Scalar(child.map(|child| (*child).inflate(ctx)))
            }
            DeflatedChildren::Collection(items) => {
                Children::Collection(items.into_iter().map(|item| item.inflate(ctx)).collect())
            }
        };
        ctx.ast.set_children(id, children);
        id
    }
}

pub(crate) struct InflateCtx<'a> {
    ast: &'a mut Ast,
    /// Offset of the pattern body within the parsed text.
    shift: usize,
    groups: u32,
}

impl<'a> InflateCtx<'a> {
    pub(crate) fn new(ast: &'a mut Ast, shift: usize) -> Self {
        InflateCtx {
            ast,
            shift,
            groups: 0,
        }
    }
}
