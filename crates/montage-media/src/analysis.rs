//! Diagnostic passes over FFmpeg's stderr output.
//!
//! Black-period detection, scene-change detection, and crop suggestion
//! all run a decode pass with a detection filter and parse the filter's
//! info-level log lines from the error stream. The parsers are pure
//! functions over the captured text.

use std::path::Path;
use tracing::debug;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::MediaResult;

/// A contiguous time range detected as visually black/uniform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackPeriod {
    /// Start offset in seconds
    pub start: f64,
    /// End offset in seconds
    pub end: f64,
}

impl BlackPeriod {
    pub fn duration(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }
}

/// A crop window suggested by cropdetect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropWindow {
    pub width: u32,
    pub height: u32,
    pub x: u32,
    pub y: u32,
}

impl CropWindow {
    /// Whether the suggestion barely differs from the source frame.
    ///
    /// A crop is worth applying only when it removes at least 8 px on
    /// some axis; anything less is noise from the detector.
    pub fn is_trivial(&self, src_width: u32, src_height: u32) -> bool {
        if self.width == 0 || self.height == 0 {
            return true;
        }
        let trimmed_w = src_width.saturating_sub(self.width);
        let trimmed_h = src_height.saturating_sub(self.height);
        trimmed_w < 8 && trimmed_h < 8
    }

    /// The crop filter string for this window.
    pub fn filter(&self) -> String {
        format!("crop={}:{}:{}:{}", self.width, self.height, self.x, self.y)
    }
}

/// Run blackdetect over the whole clip.
///
/// `pix_th` is the per-pixel black threshold (0.0-1.0); `min_duration`
/// is the shortest run reported, in seconds.
pub async fn detect_black_periods(
    runner: &FfmpegRunner,
    path: impl AsRef<Path>,
    pix_th: f64,
    min_duration: f64,
) -> MediaResult<Vec<BlackPeriod>> {
    let cmd = FfmpegCommand::analysis(path.as_ref())
        .video_filter(format!("blackdetect=d={min_duration:.3}:pix_th={pix_th:.2}"))
        .no_audio();

    let output = runner.run_checked(&cmd).await?;
    let periods = parse_black_periods(&output.stderr);
    debug!(
        path = %path.as_ref().display(),
        periods = periods.len(),
        "Black detection complete"
    );
    Ok(periods)
}

/// Run scene-change detection at the given sensitivity.
///
/// Lower sensitivity yields more cuts. Returns the ascending, deduplicated
/// timestamps of detected changes (time zero is NOT included; callers add
/// it when building boundaries).
pub async fn detect_scene_changes(
    runner: &FfmpegRunner,
    path: impl AsRef<Path>,
    sensitivity: f64,
) -> MediaResult<Vec<f64>> {
    let cmd = FfmpegCommand::analysis(path.as_ref())
        .video_filter(format!("select='gt(scene,{sensitivity:.3})',showinfo"))
        .no_audio();

    let output = runner.run_checked(&cmd).await?;
    let times = parse_scene_times(&output.stderr);
    debug!(
        path = %path.as_ref().display(),
        cuts = times.len(),
        sensitivity,
        "Scene detection complete"
    );
    Ok(times)
}

/// Run cropdetect with the given black-level limit and return the last
/// suggestion, if the pass produced one.
pub async fn detect_crop(
    runner: &FfmpegRunner,
    path: impl AsRef<Path>,
    limit: u32,
) -> MediaResult<Option<CropWindow>> {
    let cmd = FfmpegCommand::analysis(path.as_ref())
        .video_filter(format!("cropdetect=limit={limit}:round=2:reset=0"))
        .no_audio();

    let output = runner.run_checked(&cmd).await?;
    Ok(parse_crop_suggestion(&output.stderr))
}

/// Parse blackdetect report lines.
///
/// Lines look like:
/// `[blackdetect @ 0x...] black_start:0 black_end:1.2 black_duration:1.2`
pub fn parse_black_periods(stderr: &str) -> Vec<BlackPeriod> {
    let mut periods = Vec::new();
    for line in stderr.lines() {
        if !line.contains("black_start:") {
            continue;
        }
        let mut start = None;
        let mut end = None;
        for token in line.split_whitespace() {
            if let Some(v) = token.strip_prefix("black_start:") {
                start = v.parse::<f64>().ok();
            } else if let Some(v) = token.strip_prefix("black_end:") {
                end = v.parse::<f64>().ok();
            }
        }
        if let (Some(start), Some(end)) = (start, end) {
            if end > start {
                periods.push(BlackPeriod { start, end });
            }
        }
    }
    periods.sort_by(|a, b| a.start.total_cmp(&b.start));
    periods
}

/// Parse showinfo frame timestamps from a scene-select pass.
///
/// Only frames passing the select filter are reported:
/// `[Parsed_showinfo_1 @ 0x...] n:3 pts:112612 pts_time:4.504 ...`
pub fn parse_scene_times(stderr: &str) -> Vec<f64> {
    let mut times: Vec<f64> = stderr
        .lines()
        .filter(|line| line.contains("Parsed_showinfo") || line.contains("pts_time:"))
        .flat_map(|line| line.split_whitespace())
        .filter_map(|token| token.strip_prefix("pts_time:"))
        .filter_map(|v| v.parse::<f64>().ok())
        .filter(|t| *t > 0.0)
        .collect();

    times.sort_by(|a, b| a.total_cmp(b));
    times.dedup_by(|a, b| (*a - *b).abs() < 1e-6);
    times
}

/// Parse the last crop suggestion from a cropdetect pass.
///
/// Suggestion lines end with `crop=W:H:X:Y`.
pub fn parse_crop_suggestion(stderr: &str) -> Option<CropWindow> {
    let token = stderr
        .lines()
        .rev()
        .find_map(|line| line.split_whitespace().find_map(|t| t.strip_prefix("crop=")))?;

    let mut parts = token.split(':');
    let width = parts.next()?.parse().ok()?;
    let height = parts.next()?.parse().ok()?;
    let x = parts.next()?.parse().ok()?;
    let y = parts.next()?.parse().ok()?;
    Some(CropWindow {
        width,
        height,
        x,
        y,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACKDETECT_STDERR: &str = "\
[blackdetect @ 0x55d] black_start:0 black_end:1.2 black_duration:1.2
frame=  100 fps=0.0 q=-0.0 size=N/A
[blackdetect @ 0x55d] black_start:8.75 black_end:10 black_duration:1.25
";

    const SHOWINFO_STDERR: &str = "\
[Parsed_showinfo_1 @ 0x1] n:0 pts:0 pts_time:0 duration_time:0.04
[Parsed_showinfo_1 @ 0x1] n:1 pts:112612 pts_time:4.504 duration_time:0.04
[Parsed_showinfo_1 @ 0x1] n:2 pts:225224 pts_time:9.009 duration_time:0.04
[Parsed_showinfo_1 @ 0x1] n:3 pts:225224 pts_time:9.009 duration_time:0.04
";

    const CROPDETECT_STDERR: &str = "\
[Parsed_cropdetect_0 @ 0x2] x1:0 x2:1919 y1:139 y2:940 w:1920 h:800 x:0 y:140 pts:12 t:0.48 crop=1920:784:0:148
[Parsed_cropdetect_0 @ 0x2] x1:0 x2:1919 y1:139 y2:940 w:1920 h:800 x:0 y:140 pts:24 t:0.96 crop=1920:800:0:140
";

    #[test]
    fn test_parse_black_periods() {
        let periods = parse_black_periods(BLACKDETECT_STDERR);
        assert_eq!(periods.len(), 2);
        assert_eq!(periods[0], BlackPeriod { start: 0.0, end: 1.2 });
        assert!((periods[1].duration() - 1.25).abs() < 1e-9);
    }

    #[test]
    fn test_parse_black_periods_empty() {
        assert!(parse_black_periods("frame= 100 fps=0.0\n").is_empty());
    }

    #[test]
    fn test_parse_scene_times_dedups_and_drops_zero() {
        let times = parse_scene_times(SHOWINFO_STDERR);
        assert_eq!(times, vec![4.504, 9.009]);
    }

    #[test]
    fn test_parse_crop_takes_last_suggestion() {
        let win = parse_crop_suggestion(CROPDETECT_STDERR).unwrap();
        assert_eq!(
            win,
            CropWindow {
                width: 1920,
                height: 800,
                x: 0,
                y: 140
            }
        );
    }

    #[test]
    fn test_crop_triviality() {
        let full = CropWindow {
            width: 1920,
            height: 1078,
            x: 0,
            y: 1,
        };
        assert!(full.is_trivial(1920, 1080));

        let bars = CropWindow {
            width: 1920,
            height: 800,
            x: 0,
            y: 140,
        };
        assert!(!bars.is_trivial(1920, 1080));
        assert!(CropWindow { width: 0, height: 0, x: 0, y: 0 }.is_trivial(1920, 1080));
    }
}
