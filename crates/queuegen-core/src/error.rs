//! Error types and error code constants for queuegen.
//!
//! `GenError` is the single error type that flows out of the generator. Every
//! variant is fatal: the generator runs unattended inside a build, so any
//! ambiguity stops the batch instead of emitting questionable concurrency code.
//!
//! ## Error Code Mapping
//!
//! - `2`: Invalid arguments (bad input from caller)
//! - `3`: Input errors (unreadable or unparsable source file, bad config)
//! - `4`: Write errors (output directory or file unwritable)
//! - `6`: Rewrite violations (source breaks the accessor naming conventions)
//! - `10`: Internal errors (conflicting edits, unexpected state)

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::patch::BatchEditError;

// ============================================================================
// Output Error Codes
// ============================================================================

/// Error codes for JSON output and process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OutputErrorCode {
    /// Invalid arguments from caller.
    InvalidArguments = 2,
    /// Source file could not be read or parsed, or config is invalid.
    InputError = 3,
    /// Output could not be written.
    WriteError = 4,
    /// Source violates the conventions the rewrite depends on.
    RewriteViolation = 6,
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

/// Unified error type for the generator.
#[derive(Debug, Error)]
pub enum GenError {
    /// Invalid arguments from caller.
    #[error("invalid arguments: {message}")]
    InvalidArguments { message: String },

    /// The parser rejected the source file.
    #[error("parse error in {file} at {line}:{col}")]
    Parse { file: String, line: u32, col: u32 },

    /// An accessor-eligible method uses a prefix outside the known convention.
    #[error("unrecognized accessor convention '{prefix}' on method {class}.{method}")]
    UnrecognizedAccessorConvention {
        class: String,
        method: String,
        prefix: String,
    },

    /// A field needs an updater but is neither the producer nor consumer node.
    #[error("unrecognized updater field {class}.{field}")]
    UnrecognizedUpdaterField { class: String, field: String },

    /// An input file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output directory or an output file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file could not be loaded.
    #[error("config error in {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    /// Edits collected by a pass conflict with each other.
    #[error("edit error in {file}: {source}")]
    Edit {
        file: String,
        #[source]
        source: BatchEditError,
    },
}

// ============================================================================
// Error Code Mapping
// ============================================================================

impl From<&GenError> for OutputErrorCode {
    fn from(err: &GenError) -> Self {
        match err {
            GenError::InvalidArguments { .. } => OutputErrorCode::InvalidArguments,
            GenError::Parse { .. } => OutputErrorCode::InputError,
            GenError::Config { .. } => OutputErrorCode::InputError,
            GenError::UnrecognizedAccessorConvention { .. } => OutputErrorCode::RewriteViolation,
            GenError::UnrecognizedUpdaterField { .. } => OutputErrorCode::RewriteViolation,
            GenError::Read { .. } => OutputErrorCode::InputError,
            GenError::Write { .. } => OutputErrorCode::WriteError,
            GenError::Edit { .. } => OutputErrorCode::InternalError,
        }
    }
}

impl From<GenError> for OutputErrorCode {
    fn from(err: GenError) -> Self {
        OutputErrorCode::from(&err)
    }
}

// ============================================================================
// Convenience Constructors
// ============================================================================

impl GenError {
    /// Create an invalid arguments error.
    pub fn invalid_args(message: impl Into<String>) -> Self {
        GenError::InvalidArguments {
            message: message.into(),
        }
    }

    /// Wrap a read failure with the path it happened on.
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenError::Read {
            path: path.into(),
            source,
        }
    }

    /// Wrap a write failure with the path it happened on.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenError::Write {
            path: path.into(),
            source,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> OutputErrorCode {
        OutputErrorCode::from(self)
    }
}

/// Result alias used throughout the generator.
pub type GenResult<T> = Result<T, GenError>;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::Span;

    mod error_code_mapping {
        use super::*;

        #[test]
        fn accessor_convention_maps_to_rewrite_violation() {
            let err = GenError::UnrecognizedAccessorConvention {
                class: "Foo".to_string(),
                method: "zzFoo".to_string(),
                prefix: "zz".to_string(),
            };
            assert_eq!(err.error_code(), OutputErrorCode::RewriteViolation);
            assert_eq!(err.error_code().code(), 6);
        }

        #[test]
        fn updater_field_maps_to_rewrite_violation() {
            let err = GenError::UnrecognizedUpdaterField {
                class: "Foo".to_string(),
                field: "head".to_string(),
            };
            assert_eq!(err.error_code(), OutputErrorCode::RewriteViolation);
        }

        #[test]
        fn parse_maps_to_input_error() {
            let err = GenError::Parse {
                file: "Foo.java".to_string(),
                line: 3,
                col: 7,
            };
            assert_eq!(err.error_code().code(), 3);
        }

        #[test]
        fn invalid_arguments_maps_to_invalid_arguments() {
            let err = GenError::invalid_args("no input files");
            assert_eq!(err.error_code(), OutputErrorCode::InvalidArguments);
            assert_eq!(err.error_code().code(), 2);
        }

        #[test]
        fn write_failure_maps_to_write_error() {
            let err = GenError::write(
                "/nonexistent/queuegen/out/Foo.java",
                std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
            );
            assert_eq!(err.error_code(), OutputErrorCode::WriteError);
        }

        #[test]
        fn read_failure_maps_to_input_error() {
            let err = GenError::read(
                "MpscLinkedQueue.java",
                std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
            );
            assert_eq!(err.error_code(), OutputErrorCode::InputError);
        }

        #[test]
        fn edit_conflict_maps_to_internal_error() {
            let err = GenError::Edit {
                file: "Foo.java".to_string(),
                source: BatchEditError::OverlappingEdits {
                    edit1_span: Span::new(0, 4),
                    edit2_span: Span::new(2, 6),
                },
            };
            assert_eq!(err.error_code().code(), 10);
        }
    }

    mod error_display {
        use super::*;

        #[test]
        fn parse_display() {
            let err = GenError::Parse {
                file: "Foo.java".to_string(),
                line: 3,
                col: 7,
            };
            assert_eq!(err.to_string(), "parse error in Foo.java at 3:7");
        }

        #[test]
        fn accessor_convention_display() {
            let err = GenError::UnrecognizedAccessorConvention {
                class: "Foo".to_string(),
                method: "zzFoo".to_string(),
                prefix: "zz".to_string(),
            };
            assert_eq!(
                err.to_string(),
                "unrecognized accessor convention 'zz' on method Foo.zzFoo"
            );
        }

        #[test]
        fn display_shows_code() {
            assert_eq!(format!("{}", OutputErrorCode::RewriteViolation), "6");
            assert_eq!(format!("{}", OutputErrorCode::InternalError), "10");
        }
    }
}
