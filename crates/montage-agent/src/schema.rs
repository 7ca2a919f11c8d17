//! Advertised JSON schemas for the tool surface.

use schemars::{schema_for, JsonSchema};
use serde_json::Value;

use crate::params::*;

/// One advertised tool: its name and argument schema.
#[derive(Debug, Clone)]
pub struct ToolSchema {
    pub name: &'static str,
    pub parameters: Value,
}

/// Build the full advertised tool list.
///
/// Listing tools take no arguments and advertise an empty object schema.
pub fn tool_schemas() -> Vec<ToolSchema> {
    vec![
        schema::<CutParams>("cut_video"),
        schema::<ConcatParams>("concatenate_videos"),
        schema::<ExtractFrameParams>("extract_frame"),
        schema::<ResizeParams>("resize_video"),
        schema::<AspectParams>("change_aspect_ratio"),
        schema::<RotateParams>("rotate_video"),
        schema::<ConvertParams>("convert_video"),
        schema::<AutoCropParams>("auto_crop_video"),
        schema::<TrimParams>("trim_black_frames"),
        schema::<SceneSplitParams>("split_scenes"),
        schema::<DropFrameParams>("drop_frame"),
        schema::<DeleteParams>("delete_files"),
        empty_schema("list_videos"),
        empty_schema("list_images"),
        schema::<InfoParams>("get_video_info"),
    ]
}

fn schema<T: JsonSchema>(name: &'static str) -> ToolSchema {
    let root = schema_for!(T);
    ToolSchema {
        name,
        parameters: serde_json::to_value(root).unwrap_or(Value::Null),
    }
}

fn empty_schema(name: &'static str) -> ToolSchema {
    ToolSchema {
        name,
        parameters: serde_json::json!({ "type": "object", "properties": {} }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::TOOL_NAMES;

    #[test]
    fn test_every_dispatchable_tool_has_a_schema() {
        let schemas = tool_schemas();
        assert_eq!(schemas.len(), TOOL_NAMES.len());
        for name in TOOL_NAMES {
            assert!(
                schemas.iter().any(|s| s.name == name),
                "missing schema for {name}"
            );
        }
    }

    #[test]
    fn test_cut_schema_mentions_required_fields() {
        let schemas = tool_schemas();
        let cut = schemas.iter().find(|s| s.name == "cut_video").unwrap();
        let text = cut.parameters.to_string();
        assert!(text.contains("start_time"));
        assert!(text.contains("output_filename"));
    }
}
