// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use peg::error::ParseError;
use peg::str::LineCol;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParserError {
    #[error("syntax error at {line}:{column}: expected {expected}")]
    Syntax {
        /// Byte offset into the text handed to the parser.
        offset: usize,
        line: usize,
        column: usize,
        expected: String,
    },
    #[error("invalid flags '{0}'")]
    InvalidFlags(String),
}

impl ParserError {
    /// Convert a grammar failure on a pattern body that starts `shift`
    /// bytes into the parsed text.
    pub(crate) fn from_grammar(err: ParseError<LineCol>, shift: usize) -> Self {
        let location = err.location;
        ParserError::Syntax {
            offset: location.offset + shift,
            line: location.line,
            column: if location.line == 1 {
                location.column + shift
            } else {
                location.column
            },
            expected: err.expected.to_string(),
        }
    }

    /// Byte offset of a syntax error.
    pub fn offset(&self) -> Option<usize> {
        match self {
            ParserError::Syntax { offset, .. } => Some(*offset),
            ParserError::InvalidFlags(_) => None,
        }
    }
}
