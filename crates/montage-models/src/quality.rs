//! Quality tiers and output-format codec pairing for recoding.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default video codec (H.264)
pub const DEFAULT_VIDEO_CODEC: &str = "libx264";
/// Default audio codec
pub const DEFAULT_AUDIO_CODEC: &str = "aac";
/// Default encoding preset
pub const DEFAULT_PRESET: &str = "fast";

/// Named compression-quality tier.
///
/// Unrecognized tier names fall back to `Medium` (see [`QualityTier::parse`]);
/// recoding never fails on the quality argument alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    High,
    Medium,
    Low,
    /// Medium quality scaled to 720p height.
    P720,
    /// Medium quality scaled to 1080p height.
    P1080,
}

impl QualityTier {
    /// Parse a tier name, falling back to `Medium` for anything unrecognized.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Self::High,
            "medium" => Self::Medium,
            "low" => Self::Low,
            "720p" => Self::P720,
            "1080p" => Self::P1080,
            _ => Self::Medium,
        }
    }

    /// CRF value for this tier (lower is better quality).
    pub fn crf(self) -> u8 {
        match self {
            Self::High => 18,
            Self::Medium | Self::P720 | Self::P1080 => 23,
            Self::Low => 28,
        }
    }

    /// Scale filter for resolution-targeting tiers, if any.
    pub fn scale_filter(self) -> Option<&'static str> {
        match self {
            Self::P720 => Some("scale=-2:720"),
            Self::P1080 => Some("scale=-2:1080"),
            _ => None,
        }
    }
}

/// Requested output container format.
///
/// Known formats pin a codec pairing; anything else is passed through with
/// no codec overrides and FFmpeg picks defaults for the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    Mp4,
    Mov,
    Mkv,
    Webm,
    Avi,
    /// Unrecognized format, kept verbatim for the output extension.
    Other(String),
}

impl OutputFormat {
    pub fn parse(s: &str) -> Self {
        match s.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
            "mp4" => Self::Mp4,
            "mov" => Self::Mov,
            "mkv" => Self::Mkv,
            "webm" => Self::Webm,
            "avi" => Self::Avi,
            other => Self::Other(other.to_string()),
        }
    }

    /// File extension for the output (no dot).
    pub fn extension(&self) -> &str {
        match self {
            Self::Mp4 => "mp4",
            Self::Mov => "mov",
            Self::Mkv => "mkv",
            Self::Webm => "webm",
            Self::Avi => "avi",
            Self::Other(ext) => ext,
        }
    }

    /// Codec pairing `(video, audio)` for known containers.
    pub fn codecs(&self) -> Option<(&'static str, &'static str)> {
        match self {
            Self::Mp4 | Self::Mov | Self::Mkv => Some((DEFAULT_VIDEO_CODEC, DEFAULT_AUDIO_CODEC)),
            Self::Webm => Some(("libvpx-vp9", "libopus")),
            Self::Avi => Some(("mpeg4", "libmp3lame")),
            Self::Other(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_parse_with_fallback() {
        assert_eq!(QualityTier::parse("high"), QualityTier::High);
        assert_eq!(QualityTier::parse("720P"), QualityTier::P720);
        assert_eq!(QualityTier::parse("potato"), QualityTier::Medium);
        assert_eq!(QualityTier::parse(""), QualityTier::Medium);
    }

    #[test]
    fn test_tier_crf_ordering() {
        assert!(QualityTier::High.crf() < QualityTier::Medium.crf());
        assert!(QualityTier::Medium.crf() < QualityTier::Low.crf());
    }

    #[test]
    fn test_resolution_tiers_scale() {
        assert_eq!(QualityTier::P720.scale_filter(), Some("scale=-2:720"));
        assert_eq!(QualityTier::High.scale_filter(), None);
    }

    #[test]
    fn test_format_codecs() {
        assert_eq!(OutputFormat::parse("mp4").codecs(), Some(("libx264", "aac")));
        assert_eq!(OutputFormat::parse("webm").codecs(), Some(("libvpx-vp9", "libopus")));
        assert_eq!(OutputFormat::parse("ts").codecs(), None);
        assert_eq!(OutputFormat::parse(".MKV").extension(), "mkv");
    }
}
