//! Error types for snobed.

use thiserror::Error;

/// Result type alias for feature table operations.
pub type Result<T> = std::result::Result<T, FeatureError>;

/// Errors raised while building, transforming or exporting feature tables.
#[derive(Debug, Error)]
pub enum FeatureError {
    /// The input does not have the fixed 9-column GFF3 layout.
    #[error("Schema error: {0}")]
    Schema(String),

    /// An operation needs a derived column that has not been computed yet.
    #[error("Missing column '{0}': annotate the table with gene names first")]
    MissingColumn(String),

    /// A row could not be interpreted.
    #[error("Invalid record at line {line}: {msg}")]
    InvalidRecord {
        /// 1-based line (or row) number
        line: usize,
        /// Error message
        msg: String,
    },

    /// A filter value that cannot be compared against its column.
    #[error("Invalid value '{value}' for column '{column}'")]
    InvalidFilterValue { column: String, value: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
