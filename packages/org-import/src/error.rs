//! Typed errors for the import library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so callers can match
//! on the failure and render their own notice.

use thiserror::Error;

use crate::types::ColumnKind;

/// Errors produced by the pure normalizer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    /// Header row has no column matching the expected patterns
    #[error(
        "file must contain columns similar to 'OrganizationName' and 'URL' \
         (no {kind} column matching {patterns:?})"
    )]
    MissingColumn {
        kind: ColumnKind,
        patterns: &'static [&'static str],
    },

    /// Input is structurally unusable (no header row)
    #[error("malformed input: {reason}")]
    MalformedInput { reason: String },
}

/// Errors that can occur while importing a file.
#[derive(Debug, Error)]
pub enum ImportError {
    /// File extension is not one we can decode
    #[error("unsupported file format: {extension:?} (expected .csv, .xlsx or .xls)")]
    UnsupportedFormat { extension: String },

    /// Decoded rows could not be normalized
    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    /// Delimited text decoder failed
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// Spreadsheet decoder failed (bad signature, corrupt archive)
    #[error("failed to parse spreadsheet: {0}")]
    Spreadsheet(#[from] calamine::Error),

    /// Reading the file failed
    #[error("error reading file: {0}")]
    Io(#[from] std::io::Error),
}

/// Validation failures for manual entry, session edits and submission.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a valid email")]
    InvalidEmail,

    #[error("No organizations to submit")]
    NoOrganizations,

    #[error("Select at least one designation or enter a custom designation.")]
    NoDesignations,

    #[error("No valid organizations with proper URLs to submit. Ensure URLs start with http/https.")]
    NoEligibleLinks,

    #[error("Organization Name is required")]
    EmptyName,

    #[error("A URL is required")]
    EmptyLink,

    #[error("No valid organizations found in file")]
    NoValidRows,

    #[error("no organization at index {index} (list has {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Result type alias for normalizer operations.
pub type NormalizeResult<T> = std::result::Result<T, NormalizeError>;

/// Result type alias for import operations.
pub type ImportResult<T> = std::result::Result<T, ImportError>;

/// Result type alias for validation.
pub type ValidationResult<T> = std::result::Result<T, ValidationError>;
