//! Error types for workspace operations.

use std::path::PathBuf;
use thiserror::Error;

use montage_models::ToolError;

/// Result type for workspace operations.
pub type WorkspaceResult<T> = Result<T, WorkspaceError>;

/// Errors that can occur while resolving or mutating workspaces.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("Workspace directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("Source is already a symlink alias: {0}")]
    AlreadyMigrated(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<WorkspaceError> for ToolError {
    fn from(e: WorkspaceError) -> Self {
        ToolError::internal(e.to_string())
    }
}
