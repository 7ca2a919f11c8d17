//! Error types for media operations.

use std::path::PathBuf;
use thiserror::Error;

use montage_models::ToolError;

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors that can occur while invoking the media tools.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("FFmpeg not found in PATH")]
    FfmpegNotFound,

    #[error("FFprobe not found in PATH")]
    FfprobeNotFound,

    #[error("FFmpeg command failed: {message}")]
    FfmpegFailed {
        message: String,
        stderr: Option<String>,
        exit_code: Option<i32>,
    },

    #[error("FFprobe command failed: {message}")]
    FfprobeFailed {
        message: String,
        stderr: Option<String>,
    },

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Operation timed out after {0} seconds")]
    Timeout(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid video file: {0}")]
    InvalidVideo(String),
}

impl MediaError {
    /// Create an FFmpeg failure error.
    pub fn ffmpeg_failed(
        message: impl Into<String>,
        stderr: Option<String>,
        exit_code: Option<i32>,
    ) -> Self {
        Self::FfmpegFailed {
            message: message.into(),
            stderr,
            exit_code,
        }
    }
}

impl From<MediaError> for ToolError {
    fn from(e: MediaError) -> Self {
        match e {
            MediaError::FileNotFound(path) => {
                ToolError::not_found(format!("File {}", path.display()))
            }
            MediaError::FfmpegFailed {
                message,
                stderr,
                exit_code: _,
            } => ToolError::external(message, stderr),
            MediaError::FfprobeFailed { message, stderr } => ToolError::external(message, stderr),
            MediaError::FfmpegNotFound | MediaError::FfprobeNotFound => {
                ToolError::external(e.to_string(), None)
            }
            MediaError::Timeout(_) => ToolError::external(e.to_string(), None),
            other => ToolError::internal(other.to_string()),
        }
    }
}
