//! Probed media file information.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Frame rate assumed when a file cannot be probed or carries no rate.
pub const DEFAULT_FPS: f64 = 30.0;

/// Metadata for a single media asset, as reported by the probe tool.
///
/// Instances are advisory: a zeroed record (see [`MediaInfo::unavailable`])
/// is returned when probing fails, and most pipelines proceed regardless.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MediaInfo {
    /// Duration in seconds
    pub duration: f64,
    /// File size in bytes
    pub size: u64,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Frame rate (fps)
    pub fps: f64,
    /// Derived frame count: `floor(duration * fps)`
    pub frame_count: u64,
}

impl MediaInfo {
    /// Build a record from probed values, deriving the frame count.
    pub fn new(duration: f64, size: u64, width: u32, height: u32, fps: f64) -> Self {
        Self {
            duration,
            size,
            width,
            height,
            fps,
            frame_count: derive_frame_count(duration, fps),
        }
    }

    /// The degraded record used when probing fails: all zeroes except the
    /// default frame rate.
    pub fn unavailable() -> Self {
        Self {
            duration: 0.0,
            size: 0,
            width: 0,
            height: 0,
            fps: DEFAULT_FPS,
            frame_count: 0,
        }
    }

    /// Size in megabytes, for display.
    pub fn size_mb(&self) -> f64 {
        self.size as f64 / 1024.0 / 1024.0
    }

    /// Duration of a single frame in seconds (`1 / fps`).
    pub fn frame_duration(&self) -> f64 {
        if self.fps > 0.0 {
            1.0 / self.fps
        } else {
            1.0 / DEFAULT_FPS
        }
    }
}

impl Default for MediaInfo {
    fn default() -> Self {
        Self::unavailable()
    }
}

/// Derive a frame count from duration and frame rate.
pub fn derive_frame_count(duration: f64, fps: f64) -> u64 {
    if duration <= 0.0 || fps <= 0.0 {
        return 0;
    }
    (duration * fps).floor() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_count_is_floor() {
        assert_eq!(derive_frame_count(10.0, 30.0), 300);
        assert_eq!(derive_frame_count(1.999, 30.0), 59);
        assert_eq!(derive_frame_count(0.0, 30.0), 0);
    }

    #[test]
    fn test_unavailable_record() {
        let info = MediaInfo::unavailable();
        assert_eq!(info.duration, 0.0);
        assert_eq!(info.size, 0);
        assert!((info.fps - DEFAULT_FPS).abs() < f64::EPSILON);
        assert_eq!(info.frame_count, 0);
    }

    #[test]
    fn test_frame_duration() {
        let info = MediaInfo::new(10.0, 0, 1920, 1080, 25.0);
        assert!((info.frame_duration() - 0.04).abs() < 1e-9);
    }
}
