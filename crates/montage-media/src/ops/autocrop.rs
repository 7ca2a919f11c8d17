//! Automatic black-bar removal.

use tracing::info;

use montage_models::{quality, QualityTier, ToolError, ToolResult};

use crate::analysis::{detect_crop, CropWindow};
use crate::command::FfmpegCommand;
use crate::tools::MediaTools;

/// Cropdetect black-level limits to sweep, strictest first.
///
/// High limits find hard black bars; low ones catch dark-grey letterboxing
/// from lossy encodes. The first non-trivial suggestion wins.
const CROP_LIMITS: [u32; 5] = [96, 64, 48, 32, 24];

impl MediaTools {
    /// Detect and remove letterbox/pillarbox bars from `filename`.
    ///
    /// Sweeps cropdetect across several black-level limits and applies the
    /// first suggestion that actually removes pixels. When no bars are
    /// found the call succeeds with an advisory message.
    pub async fn auto_crop_video(
        &self,
        filename: &str,
        output_name: &str,
        user_key: Option<&str>,
    ) -> ToolResult {
        let input = self.resolve_input(filename, user_key)?;
        let info = self.cache().get(&input).await;
        let runner = self.runner();

        let mut chosen: Option<CropWindow> = None;
        for limit in CROP_LIMITS {
            if let Some(win) = detect_crop(&runner, &input, limit).await? {
                if !win.is_trivial(info.width, info.height) {
                    info!(limit, crop = %win.filter(), "Crop suggestion accepted");
                    chosen = Some(win);
                    break;
                }
            }
        }

        let Some(win) = chosen else {
            return Ok(format!(
                "No significant black bars detected in {filename}; nothing to crop. \
                 For a fixed framing use change_aspect_ratio with the crop method."
            ));
        };

        let (out_path, final_name) = self.allocate_output(output_name, user_key)?;
        let cmd = FfmpegCommand::new(&input, &out_path)
            .video_filter(win.filter())
            .video_codec(quality::DEFAULT_VIDEO_CODEC)
            .preset(quality::DEFAULT_PRESET)
            .crf(QualityTier::Medium.crf())
            .audio_codec("copy");

        let output = self.runner().run(&cmd).await?;
        if !output.success() {
            return Err(ToolError::external(
                format!("Error cropping {filename}"),
                Some(output.stderr),
            ));
        }

        let mut message = format!(
            "Successfully cropped {filename} to {}x{} (removed black bars), saved as {final_name}.",
            win.width, win.height
        );
        if let Some(warning) = Self::small_output_warning(&out_path) {
            message.push_str(&warning);
        }
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use montage_workspace::WorkspaceResolver;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_input_is_not_found() {
        let root = TempDir::new().unwrap();
        let tools = MediaTools::new(WorkspaceResolver::new(root.path()));

        let err = tools
            .auto_crop_video("ghost.mp4", "cropped.mp4", Some("u1"))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::NotFound(_)));
    }
}
