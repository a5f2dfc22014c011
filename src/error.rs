//! Error types for the settlement controller.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all failure conditions the controller can report. Business
//! rejections from the remote endpoint are not errors; they surface as
//! [`FetchOutcome::Rejected`](crate::controller::FetchOutcome).

use thiserror::Error;

/// The main error type for the settlement controller.
///
/// # Example
///
/// ```
/// use fnf_settlement::error::ControllerError;
///
/// let error = ControllerError::SchemaNotFound {
///     path: "/missing/doctype.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Schema file not found: /missing/doctype.yaml");
/// ```
#[derive(Debug, Error)]
pub enum ControllerError {
    /// A schema file was not found at the specified path.
    #[error("Schema file not found: {path}")]
    SchemaNotFound {
        /// The path that was not found.
        path: String,
    },

    /// A schema file could not be parsed.
    #[error("Failed to parse schema file '{path}': {message}")]
    SchemaParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A table field references a child doctype with no loaded schema.
    #[error("Child schema not found for doctype '{doctype}'")]
    ChildSchemaNotFound {
        /// The child doctype named by the table field.
        doctype: String,
    },

    /// The remote endpoint could not be called or returned an unreadable
    /// response.
    #[error("Remote call failed: {message}")]
    RemoteCall {
        /// A description of the transport or decoding failure.
        message: String,
    },

    /// A row-level handler was dispatched with an index past the end of
    /// the payables table.
    #[error("Payable row {index} not found")]
    RowNotFound {
        /// The out-of-range row index.
        index: usize,
    },
}

/// A type alias for Results that return ControllerError.
pub type ControllerResult<T> = Result<T, ControllerError>;
