//! JSON output types for CLI responses.
//!
//! Successful batches produce a [`GenerateResponse`]; failures produce an
//! [`ErrorResponse`]. Both carry `status` and `schema_version` so build
//! scripts can parse either without guessing.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::error::{GenError, OutputErrorCode};

/// Version of the JSON output schema.
pub const SCHEMA_VERSION: &str = "1";

/// Outcome for a single generated file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileResult {
    /// Input source path.
    pub input: String,
    /// Written output path.
    pub output: String,
    /// Type declarations rewritten in the file.
    pub classes: usize,
    /// Accessor method bodies rewritten in the file.
    pub accessors: usize,
    /// Updater fields synthesized in the file.
    pub updaters: usize,
}

/// Response for a completed batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Status: "ok".
    pub status: String,
    /// Schema version for compatibility.
    pub schema_version: String,
    /// One entry per input file, in processing order.
    pub files: Vec<FileResult>,
}

impl GenerateResponse {
    /// Create a success response from per-file results.
    pub fn new(files: Vec<FileResult>) -> Self {
        GenerateResponse {
            status: "ok".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            files,
        }
    }
}

/// Error details inside an [`ErrorResponse`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Numeric error code, also the process exit code.
    pub code: u8,
    /// Human-readable message.
    pub message: String,
    /// Error-specific structured data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorInfo {
    /// Create from a GenError.
    pub fn from_error(err: &GenError) -> Self {
        let code = OutputErrorCode::from(err).code();
        let message = err.to_string();

        let details = match err {
            GenError::Parse { file, line, col } => {
                Some(serde_json::json!({ "file": file, "line": line, "col": col }))
            }
            GenError::UnrecognizedAccessorConvention {
                class,
                method,
                prefix,
            } => Some(serde_json::json!({
                "class": class,
                "method": method,
                "prefix": prefix
            })),
            GenError::UnrecognizedUpdaterField { class, field } => {
                Some(serde_json::json!({ "class": class, "field": field }))
            }
            GenError::Read { path, .. }
            | GenError::Write { path, .. }
            | GenError::Config { path, .. } => {
                Some(serde_json::json!({ "path": path.display().to_string() }))
            }
            GenError::Edit { file, .. } => Some(serde_json::json!({ "file": file })),
            GenError::InvalidArguments { .. } => None,
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
    /// Files written before the failure.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub written: Vec<String>,
    /// Error information.
    pub error: ErrorInfo,
}

impl ErrorResponse {
    /// Create an error response from a GenError.
    pub fn from_error(err: &GenError, written: Vec<String>) -> Self {
        ErrorResponse {
            status: "error".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            written,
            error: ErrorInfo::from_error(err),
        }
    }
}

/// Emit a response as pretty JSON to a writer.
pub fn emit_response<T: Serialize>(response: &T, writer: &mut impl Write) -> io::Result<()> {
    let json = serde_json::to_string_pretty(response)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(writer, "{}", json)
}
