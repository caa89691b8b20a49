use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn a source file into a [`LaunchDataset`](super::model::LaunchDataset).
///
/// Fatal when it happens at startup; from File → Open it only sets the
/// status line.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("row {row}, column '{column}': {message}")]
    InvalidValue {
        row: usize,
        column: String,
        message: String,
    },

    #[error("malformed input: {0}")]
    Malformed(String),

    #[error("CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

/// A site selector that does not name any site of the loaded dataset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown launch site '{0}'")]
pub struct UnknownSiteError(pub String);
