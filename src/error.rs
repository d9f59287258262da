// Error types
// Everything the catalog can fail with, as one enum the tool layer can match on

use std::path::PathBuf;
use thiserror::Error;

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// The dataset file could not be opened (missing, unreadable, not SQLite)
    #[error("failed to open parts database at {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Preparing or running a statement failed
    #[error("query failed: {0}")]
    Query(#[from] rusqlite::Error),

    /// The statement guard refused to run a statement
    #[error("statement rejected: {0}")]
    Rejected(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("unknown tool: {0}")]
    UnknownTool(String),
}
