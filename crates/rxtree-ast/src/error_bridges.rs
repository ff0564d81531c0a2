// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Error bridge implementations for AST-layer errors.
//!
//! This module provides `impl From<X> for RxError` conversions for the
//! parser and path errors defined in this crate.

use rxtree_core::error::RxError;

use crate::parser::ParserError;
use crate::path::PathError;

// ============================================================================
// Bridge: ParserError -> RxError
// ============================================================================

impl From<ParserError> for RxError {
    fn from(err: ParserError) -> Self {
        match err {
            ParserError::Syntax {
                offset,
                ref expected,
                ..
            } => RxError::Syntax {
                message: format!("expected {}", expected),
                offset,
            },
            ParserError::InvalidFlags(flags) => RxError::InvalidFlags { flags },
        }
    }
}

// ============================================================================
// Bridge: PathError -> RxError
// ============================================================================

/// Path errors outside a named pass are engine bugs from the caller's view.
impl From<PathError> for RxError {
    fn from(err: PathError) -> Self {
        RxError::internal(err.to_string())
    }
}
