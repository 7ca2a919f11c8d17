//! Resize a clip.

use montage_models::{quality, ToolError, ToolResult};

use crate::command::FfmpegCommand;
use crate::tools::MediaTools;

impl MediaTools {
    /// Resize `filename` into `output_name`.
    ///
    /// Exactly one sizing mode must be supplied: explicit width+height,
    /// width-only (aspect preserved), height-only (aspect preserved), or
    /// a proportional scale factor.
    pub async fn resize_video(
        &self,
        filename: &str,
        width: Option<u32>,
        height: Option<u32>,
        scale: Option<f64>,
        output_name: &str,
        user_key: Option<&str>,
    ) -> ToolResult {
        let filter = scale_filter(width, height, scale)?;
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
                format!("Error resizing {filename}"),
                Some(output.stderr),
            ));
        }

        let mut message = format!("Successfully resized {filename}, saved as {final_name}.");
        if let Some(warning) = Self::small_output_warning(&out_path) {
            message.push_str(&warning);
        }
        Ok(message)
    }
}

/// Build the scale filter for the requested sizing mode.
///
/// `-2` keeps the other axis aspect-true and even (encoders require even
/// dimensions).
fn scale_filter(
    width: Option<u32>,
    height: Option<u32>,
    scale: Option<f64>,
) -> Result<String, ToolError> {
    match (width, height, scale) {
        (Some(w), Some(h), None) => Ok(format!("scale={w}:{h}")),
        (Some(w), None, None) => Ok(format!("scale={w}:-2")),
        (None, Some(h), None) => Ok(format!("scale=-2:{h}")),
        (None, None, Some(f)) if f > 0.0 => {
            Ok(format!("scale=trunc(iw*{f}/2)*2:trunc(ih*{f}/2)*2"))
        }
        (None, None, Some(_)) => Err(ToolError::parameter("Scale factor must be positive")),
        (None, None, None) => Err(ToolError::parameter(
            "Provide width and height, width only, height only, or a scale factor",
        )),
        _ => Err(ToolError::parameter(
            "Provide exactly one of: width+height, width, height, or scale factor",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_sizing_mode() {
        assert_eq!(scale_filter(Some(1280), Some(720), None).unwrap(), "scale=1280:720");
        assert_eq!(scale_filter(Some(1280), None, None).unwrap(), "scale=1280:-2");
        assert_eq!(scale_filter(None, Some(720), None).unwrap(), "scale=-2:720");
        assert_eq!(
            scale_filter(None, None, Some(0.5)).unwrap(),
            "scale=trunc(iw*0.5/2)*2:trunc(ih*0.5/2)*2"
        );
    }

    #[test]
    fn test_no_mode_rejected() {
        assert!(scale_filter(None, None, None).is_err());
    }

    #[test]
    fn test_conflicting_modes_rejected() {
        assert!(scale_filter(Some(1280), None, Some(0.5)).is_err());
        assert!(scale_filter(Some(1280), Some(720), Some(0.5)).is_err());
    }

    #[test]
    fn test_nonpositive_factor_rejected() {
        assert!(scale_filter(None, None, Some(0.0)).is_err());
        assert!(scale_filter(None, None, Some(-2.0)).is_err());
    }
}
