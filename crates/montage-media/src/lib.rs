//! FFmpeg-backed media operations.
//!
//! Wraps the external `ffmpeg`/`ffprobe` binaries behind a typed command
//! builder and a facade (`MediaTools`) exposing the operation pipelines:
//! cutting, concatenation, frame extraction, resizing, aspect changes,
//! rotation, recoding, black-bar cropping, black-frame trimming, scene
//! splitting, single-frame drops, bulk deletion, and workspace listings.
//!
//! External tools are discovered on `PATH` at invocation time; transform
//! passes run with quiet stderr while diagnostic passes keep the verbose
//! stream their parsers read.

pub mod analysis;
pub mod cache;
pub mod command;
pub mod error;
pub mod ops;
pub mod probe;
pub mod tools;

pub use analysis::{
    detect_black_periods, detect_crop, detect_scene_changes, BlackPeriod, CropWindow,
};
pub use cache::MediaInfoCache;
pub use command::{check_ffmpeg, check_ffprobe, FfmpegCommand, FfmpegRunner, ToolOutput};
pub use error::{MediaError, MediaResult};
pub use probe::probe_media;
pub use tools::MediaTools;
