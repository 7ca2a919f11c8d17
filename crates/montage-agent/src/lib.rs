//! Tool-call adapter over the media pipelines.
//!
//! Hosts that drive the media toolset through named calls with JSON
//! arguments use this crate: it advertises per-tool schemas, deserializes
//! arguments into typed params, runs the matching pipeline with an
//! explicit user key, and flattens every outcome into a display string.

pub mod config;
pub mod dispatch;
pub mod params;
pub mod render;
pub mod schema;

pub use config::AgentConfig;
pub use dispatch::{dispatch, ToolCall, TOOL_NAMES};
pub use render::{render_error, render_result};
pub use schema::{tool_schemas, ToolSchema};

use montage_media::MediaTools;
use montage_workspace::WorkspaceResolver;

/// Build the media toolset from configuration.
pub fn build_tools(config: &AgentConfig) -> MediaTools {
    let tools = MediaTools::new(WorkspaceResolver::new(config.media_root.clone()));
    match config.ffmpeg_timeout_secs {
        Some(secs) => tools.with_timeout(secs),
        None => tools,
    }
}
