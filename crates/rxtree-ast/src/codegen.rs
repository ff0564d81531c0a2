// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Pattern text generation.
//!
//! Empty child slots generate nothing, so a tree edited by removals always
//! prints as a well-formed pattern of what remains.

use std::fmt;

use crate::nodes::{AssertionKind, Ast, Children, Node, NodeId, NodeKind, Reference};

/// Token buffer filled by [`Codegen`].
#[derive(Debug, Default)]
pub struct CodegenState {
    tokens: String,
}

impl CodegenState {
    pub fn add_token(&mut self, token: &str) {
        self.tokens.push_str(token);
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn into_string(self) -> String {
        self.tokens
    }
}

impl fmt::Display for CodegenState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens)
    }
}

/// Generate pattern text for a node, resolving children through the arena.
pub trait Codegen {
    fn codegen(&self, ast: &Ast, state: &mut CodegenState);
}

impl Codegen for NodeId {
    fn codegen(&self, ast: &Ast, state: &mut CodegenState) {
        if let Some(node) = ast.get(*self) {
            node.codegen(ast, state);
        }
    }
}

impl Codegen for Option<NodeId> {
    fn codegen(&self, ast: &Ast, state: &mut CodegenState) {
        if let Some(id) = self {
            id.codegen(ast, state);
        }
    }
}

impl Codegen for Node {
    fn codegen(&self, ast: &Ast, state: &mut CodegenState) {
        match &self.kind {
            NodeKind::RegExp { flags } => {
                state.add_token("/");
                self.codegen_children(ast, state, "");
                state.add_token("/");
                state.add_token(flags);
            }
            NodeKind::Alternative => self.codegen_children(ast, state, ""),
            NodeKind::Disjunction => self.codegen_children(ast, state, "|"),
            NodeKind::Char { value, .. } => state.add_token(value),
            NodeKind::CharacterClass { negative } => {
                state.add_token(if *negative { "[^" } else { "[" });
                self.codegen_children(ast, state, "");
                state.add_token("]");
            }
            NodeKind::ClassRange { from, to } => {
                state.add_token(from);
                state.add_token("-");
                state.add_token(to);
            }
            NodeKind::Group {
                capturing, name, ..
            } => {
                match (capturing, name) {
                    (true, Some(name)) => {
                        state.add_token("(?<");
                        state.add_token(name);
                        state.add_token(">");
                    }
                    (true, None) => state.add_token("("),
                    (false, _) => state.add_token("(?:"),
                }
                self.codegen_children(ast, state, "");
                state.add_token(")");
            }
            NodeKind::Backreference { reference } => match reference {
                Reference::Number(number) => state.add_token(&format!("\\{}", number)),
                Reference::Name(name) => {
                    state.add_token("\\k<");
                    state.add_token(name);
                    state.add_token(">");
                }
            },
            NodeKind::Repetition { quantifier } => {
                // A quantifier without its operand is not a token.
                if let Children::Scalar(Some(expression)) = self.children() {
                    expression.codegen(ast, state);
                    state.add_token(&quantifier.to_string());
                }
            }
            NodeKind::Assertion { kind, negative } => match kind {
                AssertionKind::Start => state.add_token("^"),
                AssertionKind::End => state.add_token("$"),
                AssertionKind::WordBoundary => {
                    state.add_token(if *negative { "\\B" } else { "\\b" })
                }
                AssertionKind::Lookahead | AssertionKind::Lookbehind => {
                    let open = match (kind, negative) {
                        (AssertionKind::Lookahead, false) => "(?=",
                        (AssertionKind::Lookahead, true) => "(?!",
                        (_, false) => "(?<=",
                        (_, true) => "(?<!",
                    };
                    state.add_token(open);
                    self.codegen_children(ast, state, "");
                    state.add_token(")");
                }
            },
        }
    }
}

impl Node {
    fn codegen_children(&self, ast: &Ast, state: &mut CodegenState, separator: &str) {
        match self.children() {
            Children::Leaf => {}
            Children::Scalar(slot) => slot.codegen(ast, state),
            Children::Collection(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        state.add_token(separator);
                    }
                    item.codegen(ast, state);
                }
            }
        }
    }
}

/// Generate the pattern text of the whole tree.
///
/// A tree without a root generates the empty string.
pub fn generate(ast: &Ast) -> String {
    let mut state = CodegenState::default();
    ast.root().codegen(ast, &mut state);
    state.into_string()
}

/// Generate the pattern text of the subtree at `id`.
pub fn generate_node(ast: &Ast, id: NodeId) -> String {
    let mut state = CodegenState::default();
    id.codegen(ast, &mut state);
    state.into_string()
}
