use slidecraft_core::storage::StorageError;
use slidecraft_core::{ExportError, ImportError};
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced to the user by the host shell.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid deck: {0}")]
    Import(#[from] ImportError),
    #[error("Export failed: {0}")]
    Export(#[from] ExportError),
    #[error("Storage failed: {0}")]
    Storage(#[from] StorageError),
    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid action list: {0}")]
    Actions(serde_json::Error),
}

pub type AppResult<T> = Result<T, AppError>;
