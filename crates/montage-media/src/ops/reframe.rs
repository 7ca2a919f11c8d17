//! Change a clip's aspect ratio by padding or cropping.

use montage_models::{quality, ToolError, ToolResult};

use crate::command::FfmpegCommand;
use crate::tools::MediaTools;

/// How the frame is fitted to the target ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReframeMethod {
    /// Center the frame on a letterboxed/pillarboxed canvas.
    Pad,
    /// Crop the frame to the target ratio.
    Crop,
}

impl MediaTools {
    /// Reframe `filename` to the `ratio` (`"W:H"`) using `method`
    /// (`"pad"` or `"crop"`), writing `output_name`.
    pub async fn change_aspect_ratio(
        &self,
        filename: &str,
        ratio: &str,
        method: &str,
        output_name: &str,
        user_key: Option<&str>,
    ) -> ToolResult {
        let (w, h) = parse_ratio(ratio)?;
        let method = parse_method(method)?;

        let input = self.resolve_input(filename, user_key)?;
        let (out_path, final_name) = self.allocate_output(output_name, user_key)?;

        let filter = match method {
            ReframeMethod::Pad => pad_filter(w, h),
            ReframeMethod::Crop => crop_filter(w, h),
        };

        let cmd = FfmpegCommand::new(&input, &out_path)
            .video_filter(filter)
            .video_codec(quality::DEFAULT_VIDEO_CODEC)
            .preset(quality::DEFAULT_PRESET)
            .crf(23)
            .audio_codec("copy");

        let output = self.runner().run(&cmd).await?;
        if !output.success() {
            return Err(ToolError::external(
                format!("Error changing aspect ratio of {filename}"),
                Some(output.stderr),
            ));
        }

        let verb = match method {
            ReframeMethod::Pad => "padded",
            ReframeMethod::Crop => "cropped",
        };
        Ok(format!(
            "Successfully {verb} {filename} to {w}:{h}, saved as {final_name}."
        ))
    }
}

/// Parse a `"W:H"` ratio into positive integers.
fn parse_ratio(ratio: &str) -> Result<(u32, u32), ToolError> {
    let invalid =
        || ToolError::parameter(format!("Aspect ratio must look like '16:9', got '{ratio}'"));

    let (w, h) = ratio.trim().split_once(':').ok_or_else(invalid)?;
    let w: u32 = w.trim().parse().map_err(|_| invalid())?;
    let h: u32 = h.trim().parse().map_err(|_| invalid())?;
    if w == 0 || h == 0 {
        return Err(invalid());
    }
    Ok((w, h))
}

fn parse_method(method: &str) -> Result<ReframeMethod, ToolError> {
    match method.trim().to_ascii_lowercase().as_str() {
        "pad" => Ok(ReframeMethod::Pad),
        "crop" => Ok(ReframeMethod::Crop),
        other => Err(ToolError::parameter(format!(
            "Aspect method must be 'pad' or 'crop', got '{other}'"
        ))),
    }
}

/// Canvas grown to the target ratio, frame centered; commas inside
/// expressions are escaped so they survive the filter parser.
fn pad_filter(w: u32, h: u32) -> String {
    format!(
        "pad=ceil(max(iw\\,ih*{w}/{h})/2)*2:ceil(max(ih\\,iw*{h}/{w})/2)*2:(ow-iw)/2:(oh-ih)/2"
    )
}

/// Frame cropped down to the target ratio, centered.
fn crop_filter(w: u32, h: u32) -> String {
    format!("crop=trunc(min(iw\\,ih*{w}/{h})/2)*2:trunc(min(ih\\,iw*{h}/{w})/2)*2")
}
