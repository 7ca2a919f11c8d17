//! Environment-driven configuration.

use std::path::PathBuf;

use tracing::warn;

/// Name of the variable pointing at the media root directory.
pub const MEDIA_ROOT_VAR: &str = "MONTAGE_MEDIA_ROOT";
/// Name of the variable bounding external-tool wall-clock time.
pub const FFMPEG_TIMEOUT_VAR: &str = "MONTAGE_FFMPEG_TIMEOUT_SECS";

/// Agent configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Root directory holding per-user workspaces.
    pub media_root: PathBuf,
    /// Optional wall-clock cap for each FFmpeg invocation.
    pub ffmpeg_timeout_secs: Option<u64>,
}

impl AgentConfig {
    /// Read configuration from the environment, loading `.env` first.
    ///
    /// `MONTAGE_MEDIA_ROOT` defaults to `videos` relative to the working
    /// directory; an unparsable `MONTAGE_FFMPEG_TIMEOUT_SECS` is ignored
    /// with a warning rather than failing startup.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let media_root = std::env::var(MEDIA_ROOT_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("videos"));

        let ffmpeg_timeout_secs = std::env::var(FFMPEG_TIMEOUT_VAR)
            .ok()
            .and_then(|raw| parse_timeout(&raw));

        Self {
            media_root,
            ffmpeg_timeout_secs,
        }
    }
}

fn parse_timeout(raw: &str) -> Option<u64> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Some(secs),
        _ => {
            warn!(value = %raw, "Ignoring unparsable {FFMPEG_TIMEOUT_VAR}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timeout() {
        assert_eq!(parse_timeout("120"), Some(120));
        assert_eq!(parse_timeout(" 30 "), Some(30));
        assert_eq!(parse_timeout("0"), None);
        assert_eq!(parse_timeout("fast"), None);
        assert_eq!(parse_timeout("-5"), None);
    }
}
