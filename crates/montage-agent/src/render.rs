//! Render operation outcomes to display strings.

use montage_models::{ToolError, ToolResult};

/// Flatten a pipeline outcome into the single string the dispatch layer
/// hands back. Errors render as `Error: ...`; an external failure carries
/// the tool's stderr so the caller can see what FFmpeg complained about.
pub fn render_result(result: ToolResult) -> String {
    match result {
        Ok(message) => message,
        Err(error) => render_error(&error),
    }
}

pub fn render_error(error: &ToolError) -> String {
    match error {
        ToolError::External {
            message,
            stderr: Some(stderr),
        } if !stderr.trim().is_empty() => {
            format!("Error: {message}: {}", stderr.trim())
        }
        other => format!("Error: {other}"),
    }
}
