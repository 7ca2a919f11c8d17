//! Split a clip into per-scene segments.

use std::path::Path;

use tracing::{info, warn};

use montage_models::{quality, QualityTier, ToolError, ToolResult};

use crate::analysis::{detect_black_periods, detect_scene_changes};
use crate::command::FfmpegCommand;
use crate::tools::MediaTools;

/// Segments shorter than this are collapsed into their neighbor.
const MIN_SEGMENT_SECS: f64 = 0.05;

impl MediaTools {
    /// Split `filename` at detected scene changes.
    ///
    /// Each segment is re-encoded (never stream-copied, so cut points land
    /// exactly on the detected frames) and then cleaned up: a residual black
    /// lead-in from the transition is trimmed off, and segments longer than
    /// a second additionally drop their first encoded frame, which often
    /// still blends the two scenes.
    pub async fn split_scenes(
        &self,
        filename: &str,
        sensitivity: f64,
        user_key: Option<&str>,
    ) -> ToolResult {
        if !(0.0..1.0).contains(&sensitivity) || sensitivity == 0.0 {
            return Err(ToolError::parameter(format!(
                "Sensitivity must be between 0 and 1 (exclusive), got {sensitivity}"
            )));
        }

        let input = self.resolve_input(filename, user_key)?;
        let info = self.cache().get(&input).await;
        // The probed duration is the final segment boundary; without it the
        // trailing scene would be silently dropped.
        if info.duration <= 0.0 {
            return Err(ToolError::internal(format!(
                "Could not determine the duration of {filename}"
            )));
        }
        let runner = self.runner();

        let cuts = detect_scene_changes(&runner, &input, sensitivity).await?;
        if cuts.is_empty() {
            return Ok(format!(
                "No scene changes detected in {filename} at sensitivity {sensitivity}. \
                 Try a lower sensitivity for more cuts."
            ));
        }

        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "scene".to_string());

        let mut boundaries = vec![0.0];
        boundaries.extend(cuts);
        boundaries.push(info.duration);

        let mut created = Vec::new();
        for (index, window) in boundaries.windows(2).enumerate() {
            let (start, end) = (window[0], window[1]);
            if end <= start + MIN_SEGMENT_SECS {
                continue;
            }

            let desired = format!("{stem}_scene_{}.mp4", index + 1);
            let (seg_path, seg_name) = self.allocate_output(&desired, user_key)?;

            let cmd = FfmpegCommand::new(&input, &seg_path)
                .seek(start)
                .duration(end - start)
                .video_codec(quality::DEFAULT_VIDEO_CODEC)
                .preset(quality::DEFAULT_PRESET)
                .crf(QualityTier::Medium.crf())
                .audio_codec(quality::DEFAULT_AUDIO_CODEC);

            let output = runner.run(&cmd).await?;
            if !output.success() {
                return Err(ToolError::external(
                    format!("Error splitting scene {} of {filename}", index + 1),
                    Some(output.stderr),
                ));
            }

            if let Err(err) = self.cleanup_segment(&seg_path, info.fps).await {
                warn!(segment = %seg_path.display(), error = %err, "Segment cleanup failed");
            }

            created.push(seg_name);
        }

        info!(segments = created.len(), "Scene split complete");

        Ok(format!(
            "Split {filename} into {} scene(s): {}",
            created.len(),
            created.join(", ")
        ))
    }

    /// Trim residual transition artifacts off the front of a fresh segment.
    ///
    /// Rewrites the segment in place via a sibling temp file and an atomic
    /// rename, so a failure partway leaves the original segment intact.
    async fn cleanup_segment(&self, segment: &Path, fps: f64) -> Result<(), ToolError> {
        let runner = self.runner();
        let seg_info = self.cache().get(segment).await;
        if seg_info.duration <= 0.0 {
            return Ok(());
        }

        // Aggressive thresholds: transition residue is near-black, not pure.
        let periods = detect_black_periods(&runner, segment, 0.15, 0.05).await?;
        let mut trim_in = periods
            .iter()
            .find(|p| p.start <= 0.05)
            .map(|p| p.end)
            .unwrap_or(0.0);

        if seg_info.duration > 1.0 && fps > 0.0 {
            trim_in += 1.0 / fps;
        }

        if trim_in <= 0.0 || trim_in >= seg_info.duration {
            return Ok(());
        }

        let ext = segment
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_else(|| "mp4".to_string());
        let tmp = segment.with_extension(format!("temp.{ext}"));

        let cmd = FfmpegCommand::new(segment, &tmp)
            .seek(trim_in)
            .video_codec(quality::DEFAULT_VIDEO_CODEC)
            .preset(quality::DEFAULT_PRESET)
            .crf(QualityTier::Medium.crf())
            .audio_codec(quality::DEFAULT_AUDIO_CODEC);

        let output = runner.run(&cmd).await?;
        if !output.success() {
            let _ = std::fs::remove_file(&tmp);
            return Err(ToolError::external(
                "Error cleaning up scene segment",
                Some(output.stderr),
            ));
        }

        montage_workspace::atomic_replace(&tmp, segment)?;
        self.cache().invalidate(segment);
        Ok(())
    }
}
