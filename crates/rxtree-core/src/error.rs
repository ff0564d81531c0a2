//! Error types and error code constants for rxtree.
//!
//! This module provides a unified error type (`RxError`) that bridges
//! domain-specific errors from the parser and the path engine into a common
//! format suitable for JSON output.
//!
//! ## Error Code Mapping
//!
//! - `2`: Invalid arguments (bad input from caller, unknown pass)
//! - `3`: Syntax errors (pattern or flags could not be parsed)
//! - `4`: Transform errors (a pass attempted an invalid structural edit)
//! - `5`: Configuration errors (unreadable or malformed config file)
//! - `10`: Internal errors (bugs, unexpected state)
//!
//! ## Design
//!
//! - **Unified type**: `RxError` is the single error type for CLI output
//! - **Bridging**: `impl From<X> for RxError` lives next to the CLI, where
//!   both the parser and engine error types are visible
//! - **Code mapping**: `OutputErrorCode` provides stable integer codes for JSON

use std::fmt;

use thiserror::Error;

// ============================================================================
// Output Error Codes
// ============================================================================

/// Error codes for JSON output.
///
/// These codes map to CLI exit codes and appear in JSON error responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OutputErrorCode {
    /// Invalid arguments from caller (bad input, unknown pass name).
    InvalidArguments = 2,
    /// Pattern or flags failed to parse.
    SyntaxError = 3,
    /// A transformation pass failed.
    TransformError = 4,
    /// Configuration could not be loaded.
    ConfigError = 5,
    /// Internal errors (bugs, unexpected state).
    InternalError = 10,
}

impl OutputErrorCode {
    /// Get the numeric code value.
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for OutputErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ============================================================================
// Unified Error Type
// ============================================================================

/// Unified error type for CLI output.
#[derive(Debug, Error)]
pub enum RxError {
    /// Invalid arguments from caller.
    #[error("invalid arguments: {message}")]
    InvalidArguments {
        message: String,
        details: Option<serde_json::Value>,
    },

    /// Pattern source failed to parse.
    #[error("syntax error at offset {offset}: {message}")]
    Syntax { message: String, offset: usize },

    /// Flags were not a valid flag set.
    #[error("invalid flags '{flags}'")]
    InvalidFlags { flags: String },

    /// A pass attempted an edit the target node cannot support.
    #[error("transform error in pass '{pass}': {message}")]
    Transform { pass: String, message: String },

    /// Configuration file could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),

    /// Internal error (bug or unexpected state).
    #[error("internal error: {message}")]
    InternalError { message: String },
}

// ============================================================================
// Error Code Mapping
// ============================================================================

impl From<&RxError> for OutputErrorCode {
    fn from(err: &RxError) -> Self {
        match err {
            RxError::InvalidArguments { .. } => OutputErrorCode::InvalidArguments,
            RxError::Syntax { .. } => OutputErrorCode::SyntaxError,
            RxError::InvalidFlags { .. } => OutputErrorCode::SyntaxError,
            RxError::Transform { .. } => OutputErrorCode::TransformError,
            RxError::Config(_) => OutputErrorCode::ConfigError,
            RxError::InternalError { .. } => OutputErrorCode::InternalError,
        }
    }
}

impl From<RxError> for OutputErrorCode {
    fn from(err: RxError) -> Self {
        OutputErrorCode::from(&err)
    }
}

impl RxError {
    /// Create an invalid arguments error.
    pub fn invalid_args(message: impl Into<String>) -> Self {
        RxError::InvalidArguments {
            message: message.into(),
            details: None,
        }
    }

    /// Create an invalid arguments error with JSON details.
    pub fn invalid_args_with_details(
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        RxError::InvalidArguments {
            message: message.into(),
            details: Some(details),
        }
    }

    /// Create a transform error attributed to `pass`.
    pub fn transform(pass: impl Into<String>, message: impl Into<String>) -> Self {
        RxError::Transform {
            pass: pass.into(),
            message: message.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        RxError::InternalError {
            message: message.into(),
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> OutputErrorCode {
        OutputErrorCode::from(self)
    }
}

// ============================================================================
// Tests
// ============================================================================
