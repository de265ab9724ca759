//! Typed errors for the recoverable, per-record failure paths.
//!
//! Run-level failures (input I/O, export) travel as `anyhow::Error` with context.

use thiserror::Error;

/// A source path could not be expressed relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("path `{path}` is not under project root `{root}`")]
    OutsideRoot { path: String, root: String },
}

/// A parameter descriptor did not have the `parameter <name> : <type>` layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    #[error("malformed parameter descriptor `{raw}`: {reason}")]
    MalformedParameter { raw: String, reason: &'static str },
}

/// A call-site annotation did not carry a numeric row/column.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallSiteError {
    #[error("call-site annotation `{raw}` has no field {index}")]
    MissingField { raw: String, index: usize },

    #[error("call-site annotation `{raw}`: field {index} (`{field}`) is not a number")]
    NotANumber {
        raw: String,
        index: usize,
        field: String,
    },
}
