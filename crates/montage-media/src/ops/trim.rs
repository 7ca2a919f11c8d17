//! Trim black lead-in and tail sections off a clip.

use tracing::info;

use montage_models::{quality, QualityTier, ToolError, ToolResult};

use crate::analysis::{detect_black_periods, BlackPeriod};
use crate::command::FfmpegCommand;
use crate::tools::MediaTools;

/// Tolerance when matching black runs against the clip's boundaries.
const EDGE_EPSILON: f64 = 0.1;

impl MediaTools {
    /// Remove black frames from the start and end of `filename`.
    ///
    /// Only black runs touching the clip boundaries are trimmed; interior
    /// black sections are left alone. When neither boundary has a black
    /// run the call succeeds without producing an output.
    pub async fn trim_black_frames(
        &self,
        filename: &str,
        output_name: &str,
        user_key: Option<&str>,
    ) -> ToolResult {
        let input = self.resolve_input(filename, user_key)?;
        let info = self.cache().get(&input).await;

        let periods = detect_black_periods(&self.runner(), &input, 0.10, 0.1).await?;
        let Some((trim_in, trim_out)) = trim_window(&periods, info.duration, EDGE_EPSILON) else {
            return Ok(format!(
                "No black sections detected at the start or end of {filename}; nothing to trim."
            ));
        };

        if trim_in >= trim_out {
            return Ok(format!(
                "{filename} appears to be entirely black; refusing to trim it down to nothing."
            ));
        }

        let (out_path, final_name) = self.allocate_output(output_name, user_key)?;
        let cmd = FfmpegCommand::new(&input, &out_path)
            .seek(trim_in)
            .duration(trim_out - trim_in)
            .video_codec(quality::DEFAULT_VIDEO_CODEC)
            .preset(quality::DEFAULT_PRESET)
            .crf(QualityTier::Medium.crf())
            .audio_codec(quality::DEFAULT_AUDIO_CODEC);

        let output = self.runner().run(&cmd).await?;
        if !output.success() {
            return Err(ToolError::external(
                format!("Error trimming {filename}"),
                Some(output.stderr),
            ));
        }

        info!(
            trim_in,
            trim_out,
            output = %out_path.display(),
            "Black-frame trim complete"
        );

        let mut message = format!(
            "Successfully trimmed {filename} to [{trim_in:.2}s, {trim_out:.2}s), saved as {final_name}."
        );
        if let Some(warning) = Self::small_output_warning(&out_path) {
            message.push_str(&warning);
        }
        Ok(message)
    }
}

/// Compute the keep-window implied by boundary black runs.
///
/// Returns `None` when no run touches either boundary. The returned window
/// may be empty (in >= out) when the whole clip is black.
pub fn trim_window(periods: &[BlackPeriod], duration: f64, eps: f64) -> Option<(f64, f64)> {
    let mut trim_in = None;
    let mut trim_out = None;

    for period in periods {
        if period.start <= eps {
            let candidate = period.end;
            if trim_in.map_or(true, |current| candidate > current) {
                trim_in = Some(candidate);
            }
        }
        if period.end >= duration - eps {
            let candidate = period.start;
            if trim_out.map_or(true, |current| candidate < current) {
                trim_out = Some(candidate);
            }
        }
    }

    if trim_in.is_none() && trim_out.is_none() {
        return None;
    }
    Some((trim_in.unwrap_or(0.0), trim_out.unwrap_or(duration)))
}
