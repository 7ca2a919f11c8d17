//! Tool-call dispatch.
//!
//! Maps a named call with JSON arguments onto the matching pipeline and
//! flattens the outcome to a display string. The user key rides along as
//! an explicit argument on every arm; nothing here holds per-user state.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::info;

use montage_media::MediaTools;

use crate::params::*;
use crate::render::render_result;

/// One requested tool invocation.
#[derive(Debug, Clone)]
pub struct ToolCall {
    /// Tool name, e.g. `cut_video`.
    pub name: String,
    /// JSON arguments matching the tool's param struct.
    pub args: Value,
}

impl ToolCall {
    pub fn new(name: impl Into<String>, args: Value) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

/// Names of every dispatchable tool.
pub const TOOL_NAMES: [&str; 15] = [
    "cut_video",
    "concatenate_videos",
    "extract_frame",
    "resize_video",
    "change_aspect_ratio",
    "rotate_video",
    "convert_video",
    "auto_crop_video",
    "trim_black_frames",
    "split_scenes",
    "drop_frame",
    "delete_files",
    "list_videos",
    "list_images",
    "get_video_info",
];

/// Execute one tool call against the given toolset.
///
/// Always returns a display string; malformed arguments and unknown tool
/// names render as `Error: ...` like any pipeline failure.
pub async fn dispatch(tools: &MediaTools, call: &ToolCall, user_key: Option<&str>) -> String {
    info!(tool = %call.name, user = user_key.unwrap_or("<anonymous>"), "Dispatching tool call");

    match call.name.as_str() {
        "cut_video" => match parse_args::<CutParams>(&call.name, &call.args) {
            Ok(p) => render_result(
                tools
                    .cut_video(&p.filename, p.start_time, p.duration, &p.output_filename, user_key)
                    .await,
            ),
            Err(e) => e,
        },
        "concatenate_videos" => match parse_args::<ConcatParams>(&call.name, &call.args) {
            Ok(p) => render_result(
                tools
                    .concatenate_videos(&p.filenames, &p.output_filename, p.preserve_order, user_key)
                    .await,
            ),
            Err(e) => e,
        },
        "extract_frame" => match parse_args::<ExtractFrameParams>(&call.name, &call.args) {
            Ok(p) => render_result(
                tools
                    .extract_frame(&p.filename, &p.timestamp, &p.output_filename, user_key)
                    .await,
            ),
            Err(e) => e,
        },
        "resize_video" => match parse_args::<ResizeParams>(&call.name, &call.args) {
            Ok(p) => render_result(
                tools
                    .resize_video(&p.filename, p.width, p.height, p.scale, &p.output_filename, user_key)
                    .await,
            ),
            Err(e) => e,
        },
        "change_aspect_ratio" => match parse_args::<AspectParams>(&call.name, &call.args) {
            Ok(p) => render_result(
                tools
                    .change_aspect_ratio(&p.filename, &p.ratio, &p.method, &p.output_filename, user_key)
                    .await,
            ),
            Err(e) => e,
        },
        "rotate_video" => match parse_args::<RotateParams>(&call.name, &call.args) {
            Ok(p) => render_result(
                tools
                    .rotate_video(&p.filename, p.degrees, &p.output_filename, user_key)
                    .await,
            ),
            Err(e) => e,
        },
        "convert_video" => match parse_args::<ConvertParams>(&call.name, &call.args) {
            Ok(p) => render_result(
                tools
                    .convert_video(
                        &p.filename,
                        &p.format,
                        &p.quality,
                        p.output_filename.as_deref(),
                        user_key,
                    )
                    .await,
            ),
            Err(e) => e,
        },
        "auto_crop_video" => match parse_args::<AutoCropParams>(&call.name, &call.args) {
            Ok(p) => render_result(
                tools
                    .auto_crop_video(&p.filename, &p.output_filename, user_key)
                    .await,
            ),
            Err(e) => e,
        },
        "trim_black_frames" => match parse_args::<TrimParams>(&call.name, &call.args) {
            Ok(p) => render_result(
                tools
                    .trim_black_frames(&p.filename, &p.output_filename, user_key)
                    .await,
            ),
            Err(e) => e,
        },
        "split_scenes" => match parse_args::<SceneSplitParams>(&call.name, &call.args) {
            Ok(p) => render_result(tools.split_scenes(&p.filename, p.sensitivity, user_key).await),
            Err(e) => e,
        },
        "drop_frame" => match parse_args::<DropFrameParams>(&call.name, &call.args) {
            Ok(p) => render_result(tools.drop_frame(&p.filename, &p.frame, user_key).await),
            Err(e) => e,
        },
        "delete_files" => match parse_args::<DeleteParams>(&call.name, &call.args) {
            Ok(p) => render_result(tools.delete_files(&p.pattern, user_key)),
            Err(e) => e,
        },
        "list_videos" => render_result(tools.list_videos(user_key).await),
        "list_images" => render_result(tools.list_images(user_key).await),
        "get_video_info" => match parse_args::<InfoParams>(&call.name, &call.args) {
            Ok(p) => render_result(tools.media_info(&p.filename, user_key).await),
            Err(e) => e,
        },
        unknown => format!("Error: Unknown tool {unknown}"),
    }
}

fn parse_args<T: DeserializeOwned>(tool: &str, args: &Value) -> Result<T, String> {
    serde_json::from_value(args.clone())
        .map_err(|e| format!("Error: Invalid arguments for {tool}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_names_are_unique() {
        let mut names = TOOL_NAMES.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), TOOL_NAMES.len());
    }
}
