//! Rotate a clip by a quarter-turn multiple.

use montage_models::{quality, ToolError, ToolResult};

use crate::command::FfmpegCommand;
use crate::tools::MediaTools;

impl MediaTools {
    /// Rotate `filename` clockwise by `degrees` (90, 180, or 270 only)
    /// into `output_name`.
    pub async fn rotate_video(
        &self,
        filename: &str,
        degrees: i64,
        output_name: &str,
        user_key: Option<&str>,
    ) -> ToolResult {
        let filter = transpose_filter(degrees)?;

        let input = self.resolve_input(filename, user_key)?;
        let (out_path, final_name) = self.allocate_output(output_name, user_key)?;

        let cmd = FfmpegCommand::new(&input, &out_path)
            .video_filter(filter)
            .video_codec(quality::DEFAULT_VIDEO_CODEC)
            .preset(quality::DEFAULT_PRESET)
            .crf(23)
            .audio_codec("copy");

        let output = self.runner().run(&cmd).await?;
        if !output.success() {
            return Err(ToolError::external(
                format!("Error rotating {filename}"),
                Some(output.stderr),
            ));
        }

        Ok(format!(
            "Successfully rotated {filename} by {degrees} degrees, saved as {final_name}."
        ))
    }
}

/// Map a rotation angle to its transpose filter; 180 composes two
/// quarter-turns.
fn transpose_filter(degrees: i64) -> Result<&'static str, ToolError> {
    match degrees {
        90 => Ok("transpose=1"),
        180 => Ok("transpose=1,transpose=1"),
        270 => Ok("transpose=2"),
        other => Err(ToolError::parameter(format!(
            "Rotation angle must be 90, 180, or 270 degrees, got {other}"
        ))),
    }
}
