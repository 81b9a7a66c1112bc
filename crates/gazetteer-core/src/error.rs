// crates/gazetteer-core/src/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors of a gazetteer build.
///
/// Problems with a single source line are never reported here; those are
/// counted as [`DiscardReason`](crate::DiscardReason)s and the run continues.
#[derive(Debug, Error)]
pub enum GazetteerError {
    /// A required input file could not be opened.
    #[error("input file not found: {}: {source}", .path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The tab-delimited reader hit an I/O failure mid-file.
    #[error("failed to read records: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// An output collection could not be written.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, GazetteerError>;
