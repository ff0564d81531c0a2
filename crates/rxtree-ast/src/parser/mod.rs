// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Pattern parsing.
//!
//! [`parse`] accepts either a literal (`/body/flags`) or a bare body;
//! [`parse_with_flags`] takes the body and flags separately. Both produce an
//! [`Ast`] whose root is a `RegExp` node with the body in its `body` field.

mod errors;
mod grammar;
mod inflate;

pub use errors::ParserError;

use rxtree_core::text::Span;
use tracing::debug;

use crate::nodes::{Ast, Children, Node, NodeKind};
use inflate::InflateCtx;

/// Flags accepted after a pattern.
pub const VALID_FLAGS: &str = "dgimsuyv";

/// Parse `source` as a `/body/flags` literal, or as a bare body without
/// flags when it is not delimited.
///
/// # Example
///
/// ```
/// use rxtree_ast::{generate, parse};
///
/// let ast = parse("/a(b|c)+/g").unwrap();
/// assert_eq!(generate(&ast), "/a(b|c)+/g");
/// ```
pub fn parse(source: &str) -> Result<Ast, ParserError> {
    match split_literal(source) {
        Some((body, flags)) => build(body, flags, 1),
        None => build(source, "", 0),
    }
}

/// Parse a bare pattern body with explicit flags.
pub fn parse_with_flags(body: &str, flags: &str) -> Result<Ast, ParserError> {
    build(body, flags, 0)
}

/// Split `/body/flags` at the first and last slash; `None` for a bare body.
pub fn split_literal(source: &str) -> Option<(&str, &str)> {
    let rest = source.strip_prefix('/')?;
    let close = rest.rfind('/')?;
    Some((&rest[..close], &rest[close + 1..]))
}

/// Check `flags` against [`VALID_FLAGS`]: no unknown or repeated flags, and
/// not both `u` and `v`.
pub fn validate_flags(flags: &str) -> Result<(), ParserError> {
    let mut seen = Vec::with_capacity(flags.len());
    for flag in flags.chars() {
        if !VALID_FLAGS.contains(flag) || seen.contains(&flag) {
            return Err(ParserError::InvalidFlags(flags.to_string()));
        }
        seen.push(flag);
    }
    if seen.contains(&'u') && seen.contains(&'v') {
        return Err(ParserError::InvalidFlags(flags.to_string()));
    }
    Ok(())
}

fn build(body: &str, flags: &str, shift: usize) -> Result<Ast, ParserError> {
    validate_flags(flags)?;
    let deflated =
        grammar::parse_body(body).map_err(|err| ParserError::from_grammar(err, shift))?;

    let mut ast = Ast::new();
    let root = ast.alloc(Node::new(NodeKind::RegExp {
        flags: flags.to_string(),
    }));
    let total = if shift == 0 {
        body.len()
    } else {
        body.len() + flags.len() + 2
    };
    ast.spans_mut().insert(root, Span::new(0, total));

    let body_id = {
        let mut ctx = InflateCtx::new(&mut ast, shift);
        deflated.inflate(&mut ctx)
    };
    ast.set_children(root, Children::Scalar(Some(body_id)));
    ast.set_root(Some(root));

    debug!(nodes = ast.len(), flags, "parsed pattern");
    Ok(ast)
}

// ============================================================================
// Error formatting
// ============================================================================

/// Formats a parser error into a human-readable string with source context.
///
/// `source` must be the text that was parsed; `label` names it in the
/// header.
pub fn prettify_error(err: &ParserError, source: &str, label: &str) -> String {
    match err {
        ParserError::Syntax {
            offset, expected, ..
        } => {
            use annotate_snippets::{Level, Renderer, Snippet};

            let start = (*offset).min(source.len());
            let end = source[start..]
                .chars()
                .next()
                .map_or(start, |c| start + c.len_utf8());
            let end = end.max(start + 1).min(source.len() + 1);
            Renderer::plain()
                .render(
                    Level::Error.title(label).snippet(
                        Snippet::source(source)
                            .line_start(1)
                            .fold(false)
                            .annotations(vec![Level::Error
                                .span(start..end)
                                .label(&format!("expected {}", expected))]),
                    ),
                )
                .to_string()
        }
        e => format!("Parse error for {}: {}", label, e),
    }
}
