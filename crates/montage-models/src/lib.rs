//! Shared data models for the Montage media agent.
//!
//! This crate provides the types shared between the workspace, media, and
//! agent crates:
//! - Media info records produced by probing
//! - Media extension allowlists
//! - Quality tiers and output-format codec pairings
//! - Frame-position parsing (numeric offsets and "last frame" sentinels)
//! - The tagged operation result (`ToolError` / `ToolResult`)

pub mod extensions;
pub mod media_info;
pub mod outcome;
pub mod position;
pub mod quality;

pub use extensions::{
    is_image_file, is_media_file, is_video_file, IMAGE_EXTENSIONS, MEDIA_EXTENSIONS,
    VIDEO_EXTENSIONS,
};
pub use media_info::MediaInfo;
pub use outcome::{ToolError, ToolResult};
pub use position::{DropTarget, FramePosition};
pub use quality::{OutputFormat, QualityTier};
