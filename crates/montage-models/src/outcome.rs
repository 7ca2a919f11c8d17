//! Tagged operation results.
//!
//! Every pipeline returns `Result<String, ToolError>`: a human-readable
//! success message (which may embed warnings) or a typed error. Internal
//! callers can branch on the error kind; the agent adapter renders either
//! side back to a single display string for the dispatch layer.

use thiserror::Error;

/// Result type for every exposed operation.
pub type ToolResult = Result<String, ToolError>;

/// Typed failure for an operation.
///
/// None of these abort the hosting process; the adapter converts each to
/// a display string.
#[derive(Debug, Error)]
pub enum ToolError {
    /// A referenced input asset does not exist in the resolved workspace.
    #[error("{0} not found")]
    NotFound(String),

    /// The caller-supplied argument combination is invalid or unparsable.
    #[error("{0}")]
    Parameter(String),

    /// The external tool exited non-zero; its stderr text is carried verbatim.
    #[error("{message}")]
    External {
        message: String,
        stderr: Option<String>,
    },

    /// Anything else that escaped a pipeline.
    #[error("{0}")]
    Internal(String),
}

impl ToolError {
    /// Shorthand for a not-found error naming the missing thing.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// Shorthand for a parameter error.
    pub fn parameter(message: impl Into<String>) -> Self {
        Self::Parameter(message.into())
    }

    /// Shorthand for an external-tool failure.
    pub fn external(message: impl Into<String>, stderr: Option<String>) -> Self {
        Self::External {
            message: message.into(),
            stderr,
        }
    }

    /// Shorthand for an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_message() {
        let err = ToolError::not_found("Video file clip.mp4");
        assert_eq!(err.to_string(), "Video file clip.mp4 not found");

        let err = ToolError::parameter("Rotation angle must be 90, 180, or 270");
        assert_eq!(err.to_string(), "Rotation angle must be 90, 180, or 270");
    }

    #[test]
    fn test_external_keeps_stderr() {
        let err = ToolError::external("Error cutting video", Some("boom".into()));
        match err {
            ToolError::External { stderr, .. } => assert_eq!(stderr.as_deref(), Some("boom")),
            _ => panic!("wrong variant"),
        }
    }
}
