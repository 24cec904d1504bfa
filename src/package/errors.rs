//! Package error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while writing or reading a deck package
#[derive(Debug, Error)]
pub enum PackageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Media file not found: {0}")]
    MissingMedia(PathBuf),

    #[error("Media path has no file name: {0}")]
    InvalidMediaPath(PathBuf),

    #[error("Invalid package: {0}")]
    InvalidPackage(String),
}

pub type Result<T> = std::result::Result<T, PackageError>;
