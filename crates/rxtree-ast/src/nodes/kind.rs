// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Node kinds and their child field declarations.
//!
//! Every [`NodeKind`] declares at most one child-holding field through
//! [`ChildField`]: a scalar field holding one child, or a named collection
//! holding an ordered sequence of children. Everything else on a kind is
//! plain data.

use std::fmt;

use serde::Serialize;

/// Conventional name of a collection field.
pub const DEFAULT_COLLECTION: &str = "expressions";

/// Child field declared by a node kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChildField {
    /// Leaf kind, no children.
    None,
    /// Single child held under the given field name.
    Scalar(&'static str),
    /// Ordered children held under the given field name.
    Collection(&'static str),
}

impl ChildField {
    /// Field name, if the kind has one.
    pub fn name(&self) -> Option<&'static str> {
        match self {
            ChildField::None => None,
            ChildField::Scalar(name) | ChildField::Collection(name) => Some(name),
        }
    }
}

/// Discriminant of a [`NodeKind`], used for dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeType {
    RegExp,
    Alternative,
    Disjunction,
    Char,
    CharacterClass,
    ClassRange,
    Group,
    Backreference,
    Repetition,
    Assertion,
}

impl NodeType {
    /// Name used in JSON encoding and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            NodeType::RegExp => "RegExp",
            NodeType::Alternative => "Alternative",
            NodeType::Disjunction => "Disjunction",
            NodeType::Char => "Char",
            NodeType::CharacterClass => "CharacterClass",
            NodeType::ClassRange => "ClassRange",
            NodeType::Group => "Group",
            NodeType::Backreference => "Backreference",
            NodeType::Repetition => "Repetition",
            NodeType::Assertion => "Assertion",
        }
    }

    /// Child field declared by nodes of this type.
    pub fn child_field(&self) -> ChildField {
        match self {
            NodeType::RegExp => ChildField::Scalar("body"),
            NodeType::Alternative => ChildField::Collection(DEFAULT_COLLECTION),
            NodeType::Disjunction => ChildField::Collection("alternatives"),
            NodeType::CharacterClass => ChildField::Collection(DEFAULT_COLLECTION),
            NodeType::Group | NodeType::Repetition => ChildField::Scalar("expression"),
            NodeType::Assertion => ChildField::Scalar("assertion"),
            NodeType::Char | NodeType::ClassRange | NodeType::Backreference => ChildField::None,
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a [`NodeKind::Char`] was written in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CharKind {
    /// A literal character.
    Simple,
    /// `.` or a class escape such as `\d`.
    Meta,
    /// `\cX`.
    Control,
    /// `\xHH`.
    Hex,
    /// `\uHHHH` or `\u{H..}`.
    Unicode,
    /// `\0`.
    Octal,
    /// Any other escaped character.
    Escaped,
}

/// What an [`NodeKind::Assertion`] asserts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssertionKind {
    /// `^`
    Start,
    /// `$`
    End,
    /// `\b`, or `\B` when negative.
    WordBoundary,
    /// `(?= )`, or `(?! )` when negative.
    Lookahead,
    /// `(?<= )`, or `(?<! )` when negative.
    Lookbehind,
}

/// Target of a backreference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Reference {
    Number(u32),
    Name(String),
}

/// Repetition count of a quantifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantifierKind {
    /// `*`
    ZeroOrMore,
    /// `+`
    OneOrMore,
    /// `?`
    ZeroOrOne,
    /// `{n}`
    Exact { count: u32 },
    /// `{n,}` or `{n,m}`
    Range { from: u32, to: Option<u32> },
}

/// A quantifier with its greediness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Quantifier {
    pub kind: QuantifierKind,
    pub greedy: bool,
}

impl Quantifier {
    pub fn greedy(kind: QuantifierKind) -> Self {
        Quantifier { kind, greedy: true }
    }

    pub fn lazy(kind: QuantifierKind) -> Self {
        Quantifier {
            kind,
            greedy: false,
        }
    }
}

impl fmt::Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            QuantifierKind::ZeroOrMore => f.write_str("*")?,
            QuantifierKind::OneOrMore => f.write_str("+")?,
            QuantifierKind::ZeroOrOne => f.write_str("?")?,
            QuantifierKind::Exact { count } => write!(f, "{{{}}}", count)?,
            QuantifierKind::Range { from, to: None } => write!(f, "{{{},}}", from)?,
            QuantifierKind::Range { from, to: Some(to) } => write!(f, "{{{},{}}}", from, to)?,
        }
        if !self.greedy {
            f.write_str("?")?;
        }
        Ok(())
    }
}

/// Kind-specific data of a node.
///
/// Children are not stored here; see [`crate::nodes::Node`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum NodeKind {
    RegExp {
        flags: String,
    },
    Alternative,
    Disjunction,
    Char {
        /// Source text of the character, escapes included.
        value: String,
        kind: CharKind,
    },
    CharacterClass {
        negative: bool,
    },
    ClassRange {
        from: String,
        to: String,
    },
    Group {
        capturing: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        number: Option<u32>,
    },
    Backreference {
        reference: Reference,
    },
    Repetition {
        quantifier: Quantifier,
    },
    Assertion {
        kind: AssertionKind,
        negative: bool,
    },
}

impl NodeKind {
    pub fn node_type(&self) -> NodeType {
        match self {
            NodeKind::RegExp { .. } => NodeType::RegExp,
            NodeKind::Alternative => NodeType::Alternative,
            NodeKind::Disjunction => NodeType::Disjunction,
            NodeKind::Char { .. } => NodeType::Char,
            NodeKind::CharacterClass { .. } => NodeType::CharacterClass,
            NodeKind::ClassRange { .. } => NodeType::ClassRange,
            NodeKind::Group { .. } => NodeType::Group,
            NodeKind::Backreference { .. } => NodeType::Backreference,
            NodeKind::Repetition { .. } => NodeType::Repetition,
            NodeKind::Assertion { .. } => NodeType::Assertion,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.node_type().name()
    }

    pub fn child_field(&self) -> ChildField {
        self.node_type().child_field()
    }

    /// A simple literal character.
    pub fn simple_char(value: impl Into<String>) -> Self {
        NodeKind::Char {
            value: value.into(),
            kind: CharKind::Simple,
        }
    }
}
