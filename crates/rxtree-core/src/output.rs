//! JSON output types and serialization for CLI responses.
//!
//! ## Design Principles
//!
//! 1. **Structured JSON:** every CLI response is valid JSON
//! 2. **Status first:** every response has `status` as first field
//! 3. **Deterministic:** same input -> same output (field order, array ordering)
//! 4. **Versioned:** schema version in response enables forward compatibility

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::error::{OutputErrorCode, RxError};

/// Current schema version for all responses.
pub const SCHEMA_VERSION: &str = "1";

/// Response for the `parse` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseResponse {
    /// Status: "ok".
    pub status: String,
    /// Schema version for compatibility.
    pub schema_version: String,
    /// The pattern as given on the command line.
    pub pattern: String,
    /// The AST, encoded node by node.
    pub ast: serde_json::Value,
}

impl ParseResponse {
    /// Create a parse response.
    pub fn new(pattern: impl Into<String>, ast: serde_json::Value) -> Self {
        ParseResponse {
            status: "ok".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            pattern: pattern.into(),
            ast,
        }
    }
}

/// Response for the `generate` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Status: "ok".
    pub status: String,
    /// Schema version for compatibility.
    pub schema_version: String,
    /// The pattern as given on the command line.
    pub pattern: String,
    /// Pattern text regenerated from the parsed tree.
    pub output: String,
}

impl GenerateResponse {
    /// Create a generate response.
    pub fn new(pattern: impl Into<String>, output: impl Into<String>) -> Self {
        GenerateResponse {
            status: "ok".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            pattern: pattern.into(),
            output: output.into(),
        }
    }
}

/// Outcome of one pass within a `transform` run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassSummary {
    /// Pass name.
    pub name: String,
    /// False when the pass declined to run on this tree.
    pub ran: bool,
}

/// Response for the `transform` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformResponse {
    /// Status: "ok".
    pub status: String,
    /// Schema version for compatibility.
    pub schema_version: String,
    /// The pattern as given on the command line.
    pub pattern: String,
    /// Pattern text after all passes ran.
    pub output: String,
    /// Per-pass outcome, in run order.
    pub passes: Vec<PassSummary>,
    /// True when `output` differs from the regenerated input.
    pub changed: bool,
}

impl TransformResponse {
    /// Create a transform response.
    pub fn new(
        pattern: impl Into<String>,
        output: impl Into<String>,
        passes: Vec<PassSummary>,
        changed: bool,
    ) -> Self {
        TransformResponse {
            status: "ok".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            pattern: pattern.into(),
            output: output.into(),
            passes,
            changed,
        }
    }
}

/// Error details within an error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Numeric error code.
    pub code: u8,
    /// Human-readable message.
    pub message: String,
    /// Error-specific structured data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorInfo {
    /// Create from an RxError.
    pub fn from_error(err: &RxError) -> Self {
        let code = OutputErrorCode::from(err).code();
        let message = err.to_string();

        let details = match err {
            RxError::InvalidArguments { details, .. } => details.clone(),
            RxError::Syntax { offset, .. } => Some(serde_json::json!({ "offset": offset })),
            RxError::Transform { pass, .. } => Some(serde_json::json!({ "pass": pass })),
            _ => None,
        };

        ErrorInfo {
            code,
            message,
            details,
        }
    }
}

/// Error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Status: "error".
    pub status: String,
    /// Schema version for compatibility.
    pub schema_version: String,
    /// Error details.
    pub error: ErrorInfo,
}

impl ErrorResponse {
    /// Create an error response from an RxError.
    pub fn from_error(err: &RxError) -> Self {
        ErrorResponse {
            status: "error".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            error: ErrorInfo::from_error(err),
        }
    }
}

/// Emit a response as pretty-printed JSON to a writer.
pub fn emit_response<T: Serialize>(response: &T, writer: &mut impl Write) -> io::Result<()> {
    let json = serde_json::to_string_pretty(response)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(writer, "{}", json)
}

/// Emit a response as compact JSON (single line) to a writer.
pub fn emit_response_compact<T: Serialize>(
    response: &T,
    writer: &mut impl Write,
) -> io::Result<()> {
    let json = serde_json::to_string(response)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(writer, "{}", json)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_is_first_field() {
        let response = GenerateResponse::new("/ab/", "/ab/");
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.starts_with("{\"status\":\"ok\""));
    }

    #[test]
    fn transform_response_serializes_passes() {
        let response = TransformResponse::new(
            "/abcd/",
            "/ad/",
            vec![PassSummary {
                name: "strip-chars".to_string(),
                ran: true,
            }],
            true,
        );
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["output"], "/ad/");
        assert_eq!(value["passes"][0]["name"], "strip-chars");
        assert_eq!(value["changed"], true);
        assert_eq!(value["schema_version"], SCHEMA_VERSION);
    }

    #[test]
    fn error_response_carries_code_and_details() {
        let err = RxError::Syntax {
            message: "expected ')'".to_string(),
            offset: 2,
        };
        let response = ErrorResponse::from_error(&err);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["error"]["code"], 3);
        assert_eq!(value["error"]["details"]["offset"], 2);
    }

    #[test]
    fn error_info_omits_missing_details() {
        let err = RxError::internal("boom");
        let json = serde_json::to_string(&ErrorInfo::from_error(&err)).unwrap();
        assert!(!json.contains("details"));
    }

    #[test]
    fn emit_response_writes_trailing_newline() {
        let mut out = Vec::new();
        emit_response_compact(&GenerateResponse::new("a", "a"), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("}\n"));
        assert_eq!(text.lines().count(), 1);
    }
}
