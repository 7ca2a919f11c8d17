//! Cut a time segment out of a clip.

use tracing::info;

use montage_models::{ToolError, ToolResult};

use crate::command::FfmpegCommand;
use crate::tools::MediaTools;

impl MediaTools {
    /// Cut a segment of `filename` starting at `start` seconds for
    /// `duration` seconds into a new asset named `output_name`.
    ///
    /// A start at or beyond the probed duration is rejected. A span that
    /// overflows the end is clamped to "from start to end" and the cut
    /// still runs, with a warning in the result text.
    pub async fn cut_video(
        &self,
        filename: &str,
        start: f64,
        duration: f64,
        output_name: &str,
        user_key: Option<&str>,
    ) -> ToolResult {
        if start < 0.0 || duration <= 0.0 {
            return Err(ToolError::parameter(
                "Start must be >= 0 and duration must be positive",
            ));
        }

        let input = self.resolve_input(filename, user_key)?;

        // Duration probing is best-effort; an unprobeable clip skips
        // validation and lets the transform speak for itself.
        let total = self.cache().get(&input).await.duration;
        let warning = validate_span(start, duration, total)?.unwrap_or_default();

        let (out_path, final_name) = self.allocate_output(output_name, user_key)?;

        let cmd = FfmpegCommand::new(&input, &out_path)
            .seek(start)
            .duration(duration)
            .codec_copy();

        let output = self.runner().run(&cmd).await?;
        if !output.success() {
            return Err(ToolError::external(
                format!("Error cutting video {filename}"),
                Some(output.stderr),
            ));
        }

        info!(input = %input.display(), output = %out_path.display(), "Cut complete");

        let mut message = format!(
            "Successfully cut {filename} from {start}s for {duration}s, saved as {final_name}.{warning}"
        );
        if let Some(size_warning) = Self::small_output_warning(&out_path) {
            message.push_str(&size_warning);
        }
        Ok(message)
    }
}

/// Validate the requested span against the probed total duration.
///
/// A non-positive `total` (unprobeable clip) skips validation. Returns
/// the overflow warning text when the span is clamped to the video end.
fn validate_span(start: f64, duration: f64, total: f64) -> Result<Option<String>, ToolError> {
    if total <= 0.0 {
        return Ok(None);
    }
    if start >= total {
        return Err(ToolError::parameter(format!(
            "Start time {start}s is beyond video duration ({total:.2}s)"
        )));
    }
    if start + duration > total {
        return Ok(Some(format!(
            " Warning: requested duration extends beyond the video end; cut from {start}s to end of video ({total:.2}s)."
        )));
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use montage_models::MediaInfo;
    use montage_workspace::WorkspaceResolver;
    use tempfile::TempDir;

    #[test]
    fn test_span_within_duration() {
        assert_eq!(validate_span(2.0, 3.0, 10.0).unwrap(), None);
    }

    #[test]
    fn test_span_start_beyond_duration() {
        let err = validate_span(12.0, 5.0, 10.0).unwrap_err();
        assert!(matches!(err, ToolError::Parameter(_)));
        assert!(err.to_string().contains("beyond video duration"));
        // Exactly at the end is rejected too.
        assert!(validate_span(10.0, 1.0, 10.0).is_err());
    }

    #[test]
    fn test_span_overflow_warns_and_proceeds() {
        let warning = validate_span(5.0, 30.0, 10.0).unwrap().unwrap();
        assert!(warning.contains("extends beyond the video end"));
    }

    #[test]
    fn test_span_unprobeable_total_skips_validation() {
        assert_eq!(validate_span(500.0, 30.0, 0.0).unwrap(), None);
    }

    #[tokio::test]
    async fn test_start_beyond_duration_produces_no_output() {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("u1");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("clip.mp4"), b"x").unwrap();

        let tools = MediaTools::new(WorkspaceResolver::new(root.path()));
        tools
            .cache()
            .insert(dir.join("clip.mp4"), MediaInfo::new(10.0, 1, 640, 480, 30.0));

        let err = tools
            .cut_video("clip.mp4", 12.0, 5.0, "out.mp4", Some("u1"))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Parameter(_)));
        assert!(!dir.join("out.mp4").exists());
    }

    #[tokio::test]
    async fn test_missing_input_is_not_found() {
        let root = TempDir::new().unwrap();
        let tools = MediaTools::new(WorkspaceResolver::new(root.path()));

        let err = tools
            .cut_video("ghost.mp4", 0.0, 5.0, "out.mp4", Some("u1"))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::NotFound(_)));
        assert!(!root.path().join("u1/out.mp4").exists());
    }

    #[tokio::test]
    async fn test_bad_span_is_parameter_error() {
        let root = TempDir::new().unwrap();
        let tools = MediaTools::new(WorkspaceResolver::new(root.path()));

        let err = tools
            .cut_video("clip.mp4", -1.0, 5.0, "out.mp4", None)
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Parameter(_)));

        let err = tools
            .cut_video("clip.mp4", 0.0, 0.0, "out.mp4", None)
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Parameter(_)));
    }
}
