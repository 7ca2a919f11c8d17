//! Frame position parsing for extraction and frame-drop requests.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::outcome::ToolError;

/// Words accepted as "the last frame" when extracting.
const LAST_SENTINELS: &[&str] = &["last", "end", "final"];

/// A point in a clip, either a numeric offset in seconds or the last frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FramePosition {
    /// Offset from the start, in seconds.
    Seconds(f64),
    /// The final frame, sought from end-of-stream.
    Last,
}

impl FromStr for FramePosition {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if LAST_SENTINELS.contains(&s.to_ascii_lowercase().as_str()) {
            return Ok(Self::Last);
        }
        let secs: f64 = s.parse().map_err(|_| {
            ToolError::parameter(format!(
                "Timestamp must be a number of seconds or one of 'last'/'end'/'final', got '{s}'"
            ))
        })?;
        if secs < 0.0 {
            return Err(ToolError::parameter("Timestamp must not be negative"));
        }
        Ok(Self::Seconds(secs))
    }
}

/// Which frame a frame-drop request targets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DropTarget {
    First,
    Last,
    Middle,
    /// A 0-based interior frame index.
    Index(u64),
}

impl FromStr for DropTarget {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" => Ok(Self::First),
            "last" => Ok(Self::Last),
            "middle" => Ok(Self::Middle),
            other => other.parse::<u64>().map(Self::Index).map_err(|_| {
                ToolError::parameter(format!(
                    "Frame position must be 'first', 'last', 'middle', or a frame index, got '{s}'"
                ))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seconds() {
        assert_eq!("12.5".parse::<FramePosition>().unwrap(), FramePosition::Seconds(12.5));
        assert_eq!("0".parse::<FramePosition>().unwrap(), FramePosition::Seconds(0.0));
    }

    #[test]
    fn test_parse_last_sentinels() {
        for word in ["last", "END", "Final"] {
            assert_eq!(word.parse::<FramePosition>().unwrap(), FramePosition::Last);
        }
    }

    #[test]
    fn test_rejects_garbage_and_negative() {
        assert!("noon".parse::<FramePosition>().is_err());
        assert!("-3".parse::<FramePosition>().is_err());
    }

    #[test]
    fn test_drop_target_parsing() {
        assert_eq!("first".parse::<DropTarget>().unwrap(), DropTarget::First);
        assert_eq!("Middle".parse::<DropTarget>().unwrap(), DropTarget::Middle);
        assert_eq!("42".parse::<DropTarget>().unwrap(), DropTarget::Index(42));
        assert!("eleventh".parse::<DropTarget>().is_err());
    }
}
