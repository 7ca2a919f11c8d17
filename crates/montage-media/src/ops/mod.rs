//! Operation pipelines.
//!
//! One module per exposed operation; each is an `impl MediaTools` block.
//! Common shape: resolve the input(s), validate parameters, allocate a
//! unique output name in the resolved workspace, build and run the
//! FFmpeg invocation(s), and return a human-readable message. Every
//! failure comes back as a typed `ToolError`; nothing raises past the
//! pipeline boundary.

pub mod autocrop;
pub mod concat;
pub mod cut;
pub mod delete;
pub mod framedrop;
pub mod frame;
pub mod list;
pub mod recode;
pub mod reframe;
pub mod resize;
pub mod rotate;
pub mod scenes;
pub mod trim;
