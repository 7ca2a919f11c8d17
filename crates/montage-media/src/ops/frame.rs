//! Extract a single frame as an image.

use tracing::info;

use montage_models::{FramePosition, ToolError, ToolResult};

use crate::command::FfmpegCommand;
use crate::tools::MediaTools;

impl MediaTools {
    /// Extract one frame of `filename` at `timestamp` into `output_name`.
    ///
    /// `timestamp` is seconds from the start, or one of the "last frame"
    /// sentinel words, which seeks from end-of-stream instead of
    /// validating against the probed duration.
    pub async fn extract_frame(
        &self,
        filename: &str,
        timestamp: &str,
        output_name: &str,
        user_key: Option<&str>,
    ) -> ToolResult {
        let position: FramePosition = timestamp.parse()?;
        let input = self.resolve_input(filename, user_key)?;

        if let FramePosition::Seconds(secs) = position {
            let total = self.cache().get(&input).await.duration;
            if total > 0.0 && secs >= total {
                return Err(ToolError::parameter(format!(
                    "Timestamp {secs}s is beyond video duration ({total:.2}s); the video is only {total:.2} seconds long"
                )));
            }
        }

        let (out_path, final_name) = self.allocate_output(output_name, user_key)?;

        let cmd = match position {
            FramePosition::Seconds(secs) => FfmpegCommand::new(&input, &out_path).seek(secs),
            FramePosition::Last => FfmpegCommand::new(&input, &out_path).seek_from_end(0.1),
        }
        .single_frame();

        let output = self.runner().run(&cmd).await?;
        if !output.success() {
            return Err(ToolError::external(
                format!("Error extracting frame from {filename}"),
                Some(output.stderr),
            ));
        }

        info!(input = %input.display(), output = %out_path.display(), "Frame extracted");

        let at = match position {
            FramePosition::Seconds(secs) => format!("{secs}s"),
            FramePosition::Last => "the last frame".to_string(),
        };
        Ok(format!(
            "Successfully extracted frame from {filename} at {at}, saved as {final_name}."
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use montage_models::MediaInfo;
    use montage_workspace::WorkspaceResolver;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_timestamp_beyond_duration_produces_no_output() {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("u1");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("clip.mp4"), b"x").unwrap();

        let tools = MediaTools::new(WorkspaceResolver::new(root.path()));
        tools
            .cache()
            .insert(dir.join("clip.mp4"), MediaInfo::new(10.0, 1, 640, 480, 30.0));

        let err = tools
            .extract_frame("clip.mp4", "12.0", "frame.png", Some("u1"))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Parameter(_)));
        assert!(err.to_string().contains("beyond video duration"));
        assert!(!dir.join("frame.png").exists());
    }

    #[tokio::test]
    async fn test_unparsable_timestamp_is_parameter_error() {
        let root = TempDir::new().unwrap();
        let tools = MediaTools::new(WorkspaceResolver::new(root.path()));

        let err = tools
            .extract_frame("clip.mp4", "noon", "frame.png", None)
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Parameter(_)));
    }

    #[tokio::test]
    async fn test_missing_input_is_not_found() {
        let root = TempDir::new().unwrap();
        let tools = MediaTools::new(WorkspaceResolver::new(root.path()));

        let err = tools
            .extract_frame("ghost.mp4", "3.0", "frame.png", Some("u1"))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::NotFound(_)));
    }
}
