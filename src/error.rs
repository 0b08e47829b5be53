//! Error types for bgpeepr.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for bgpeepr operations.
///
/// An organization pattern that matches nothing is not an error; see
/// [`AsnMatches::is_empty`](crate::AsnMatches::is_empty).
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Organization pattern is not a valid regular expression
    #[error("invalid organization pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Dataset download failed
    #[error("download error: {0}")]
    Download(String),

    /// Local dataset path does not exist
    #[error("local file '{}' does not exist", .0.display())]
    LocalFileMissing(PathBuf),

    /// JSON export error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV export error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for bgpeepr operations.
pub type Result<T> = std::result::Result<T, Error>;
