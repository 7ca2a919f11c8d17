//! Typed argument structs for each exposed tool.
//!
//! Deserialized from the caller's JSON arguments; the `JsonSchema` derives
//! feed the advertised tool schemas.

use schemars::JsonSchema;
use serde::Deserialize;

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CutParams {
    /// Source video filename in the workspace.
    pub filename: String,
    /// Cut start offset in seconds.
    pub start_time: f64,
    /// Cut length in seconds.
    pub duration: f64,
    /// Name for the new clip.
    pub output_filename: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ConcatParams {
    /// Source filenames; joined in lexicographic order unless preserved.
    pub filenames: Vec<String>,
    /// Name for the joined clip.
    pub output_filename: String,
    /// Keep the given order instead of sorting.
    #[serde(default)]
    pub preserve_order: bool,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ExtractFrameParams {
    pub filename: String,
    /// Offset in seconds, or `last` for the final frame.
    pub timestamp: String,
    /// Name for the extracted image.
    pub output_filename: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ResizeParams {
    pub filename: String,
    /// Target width in pixels.
    pub width: Option<u32>,
    /// Target height in pixels.
    pub height: Option<u32>,
    /// Uniform scale factor; exclusive with width/height.
    pub scale: Option<f64>,
    pub output_filename: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct AspectParams {
    pub filename: String,
    /// Target ratio, e.g. `16:9` or `9:16`.
    pub ratio: String,
    /// `pad` (default) letter/pillarboxes; `crop` trims to fit.
    #[serde(default = "default_aspect_method")]
    pub method: String,
    pub output_filename: String,
}

fn default_aspect_method() -> String {
    "pad".to_string()
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RotateParams {
    pub filename: String,
    /// Clockwise rotation: 90, 180, or 270.
    pub degrees: i64,
    pub output_filename: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ConvertParams {
    pub filename: String,
    /// Target container, e.g. `mp4`, `webm`, `mkv`.
    pub format: String,
    /// Quality tier: `high`, `medium`, `low`, `720p`, `1080p`.
    #[serde(default = "default_quality")]
    pub quality: String,
    /// Defaults to the source stem with the new extension.
    pub output_filename: Option<String>,
}

fn default_quality() -> String {
    "medium".to_string()
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct AutoCropParams {
    pub filename: String,
    pub output_filename: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct TrimParams {
    pub filename: String,
    pub output_filename: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SceneSplitParams {
    pub filename: String,
    /// Scene-change threshold in (0, 1); lower finds more cuts.
    #[serde(default = "default_sensitivity")]
    pub sensitivity: f64,
}

fn default_sensitivity() -> f64 {
    0.4
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct DropFrameParams {
    pub filename: String,
    /// `first`, `last`, `middle`, or a 0-based frame index.
    pub frame: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct DeleteParams {
    /// Glob (`*.mp4`), phrase (`all mov files`), or literal filename.
    pub pattern: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct InfoParams {
    pub filename: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_in() {
        let params: ConcatParams =
            serde_json::from_value(serde_json::json!({
                "filenames": ["a.mp4", "b.mp4"],
                "output_filename": "joined.mp4"
            }))
            .unwrap();
        assert!(!params.preserve_order);

        let params: SceneSplitParams =
            serde_json::from_value(serde_json::json!({ "filename": "clip.mp4" })).unwrap();
        assert!((params.sensitivity - 0.4).abs() < 1e-9);

        let params: AspectParams = serde_json::from_value(serde_json::json!({
            "filename": "clip.mp4",
            "ratio": "9:16",
            "output_filename": "vertical.mp4"
        }))
        .unwrap();
        assert_eq!(params.method, "pad");
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result: Result<DeleteParams, _> = serde_json::from_value(serde_json::json!({
            "pattern": "*.mp4",
            "force": true
        }));
        assert!(result.is_err());
    }
}
