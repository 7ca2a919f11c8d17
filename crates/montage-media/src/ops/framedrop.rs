//! Drop a single frame from a clip, updating it in place.

use std::io::Write;
use std::path::Path;

use tracing::info;

use montage_models::{quality, DropTarget, QualityTier, ToolError, ToolResult};

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::tools::MediaTools;

impl MediaTools {
    /// Remove one frame from `filename`, replacing the file atomically.
    ///
    /// `target` names the frame: `first`, `last`, `middle`, or a 0-based
    /// index. Edge frames are removed with a single trim pass; an interior
    /// frame splits the clip into before/after parts that are re-encoded
    /// and re-joined around the gap.
    pub async fn drop_frame(&self, filename: &str, target: &str, user_key: Option<&str>) -> ToolResult {
        let target: DropTarget = target.parse()?;
        let input = self.resolve_input(filename, user_key)?;
        let info = self.cache().get(&input).await;

        if info.frame_count == 0 {
            return Err(ToolError::internal(format!(
                "Could not determine the frame count of {filename}"
            )));
        }

        let index = match target {
            DropTarget::First => 0,
            DropTarget::Last => info.frame_count - 1,
            DropTarget::Middle => info.frame_count / 2,
            DropTarget::Index(n) => {
                if n >= info.frame_count {
                    return Err(ToolError::parameter(format!(
                        "Frame index {n} is out of range; {filename} has {} frames",
                        info.frame_count
                    )));
                }
                n
            }
        };

        let frame_dur = info.frame_duration();
        let runner = self.runner();
        let tmp = temp_sibling(&input);

        if index == 0 {
            let cmd = encode_settings(FfmpegCommand::new(&input, &tmp).seek(frame_dur));
            run_or_cleanup(&runner, &cmd, &tmp).await?;
        } else if index == info.frame_count - 1 {
            let cmd = encode_settings(
                FfmpegCommand::new(&input, &tmp).duration((info.duration - frame_dur).max(0.0)),
            );
            run_or_cleanup(&runner, &cmd, &tmp).await?;
        } else {
            self.drop_interior_frame(&runner, &input, &tmp, index, frame_dur)
                .await?;
        }

        montage_workspace::atomic_replace(&tmp, &input)?;
        self.cache().invalidate(&input);

        info!(file = %input.display(), index, "Frame dropped in place");

        Ok(format!(
            "Dropped frame {index} from {filename}; the file was updated in place."
        ))
    }

    /// Cut around an interior frame and re-join the two parts.
    async fn drop_interior_frame(
        &self,
        runner: &FfmpegRunner,
        input: &Path,
        tmp: &Path,
        index: u64,
        frame_dur: f64,
    ) -> Result<(), ToolError> {
        let parts_dir = tempfile::tempdir()
            .map_err(|e| ToolError::internal(format!("Failed to create temp directory: {e}")))?;
        let before = parts_dir.path().join("before.mp4");
        let after = parts_dir.path().join("after.mp4");

        let cut_at = index as f64 * frame_dur;
        let resume_at = (index + 1) as f64 * frame_dur;

        let cmd = encode_settings(FfmpegCommand::new(input, &before).duration(cut_at));
        run_or_cleanup(runner, &cmd, &before).await?;

        let cmd = encode_settings(FfmpegCommand::new(input, &after).seek(resume_at));
        run_or_cleanup(runner, &cmd, &after).await?;

        let list_path = parts_dir.path().join("parts.txt");
        let mut list = std::fs::File::create(&list_path)
            .map_err(|e| ToolError::internal(format!("Failed to write concat list: {e}")))?;
        for part in [&before, &after] {
            writeln!(list, "file '{}'", part.display())
                .map_err(|e| ToolError::internal(format!("Failed to write concat list: {e}")))?;
        }

        let mut args: Vec<String> = ["-y", "-v", "error", "-f", "concat", "-safe", "0", "-i"]
            .map(String::from)
            .to_vec();
        args.push(list_path.to_string_lossy().into_owned());
        args.push("-c".to_string());
        args.push("copy".to_string());
        args.push(tmp.to_string_lossy().into_owned());

        let output = runner.run_raw(&args).await?;
        if !output.success() {
            let _ = std::fs::remove_file(tmp);
            return Err(ToolError::external(
                "Error re-joining video parts",
                Some(output.stderr),
            ));
        }
        Ok(())
    }
}

fn encode_settings(cmd: FfmpegCommand) -> FfmpegCommand {
    cmd.video_codec(quality::DEFAULT_VIDEO_CODEC)
        .preset(quality::DEFAULT_PRESET)
        .crf(QualityTier::Medium.crf())
        .audio_codec(quality::DEFAULT_AUDIO_CODEC)
}

/// Sibling temp path so the final rename never crosses filesystems.
fn temp_sibling(path: &Path) -> std::path::PathBuf {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "mp4".to_string());
    path.with_extension(format!("temp.{ext}"))
}

async fn run_or_cleanup(
    runner: &FfmpegRunner,
    cmd: &FfmpegCommand,
    out: &Path,
) -> Result<(), ToolError> {
    let output = runner.run(cmd).await?;
    if !output.success() {
        let _ = std::fs::remove_file(out);
        return Err(ToolError::external(
            "Error encoding video part",
            Some(output.stderr),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use montage_workspace::WorkspaceResolver;
    use tempfile::TempDir;

    #[test]
    fn test_temp_sibling_keeps_directory() {
        let tmp = temp_sibling(Path::new("/work/u1/clip.mp4"));
        assert_eq!(tmp, Path::new("/work/u1/clip.temp.mp4"));
    }

    #[tokio::test]
    async fn test_bad_target_rejected_before_resolution() {
        let root = TempDir::new().unwrap();
        let tools = MediaTools::new(WorkspaceResolver::new(root.path()));

        // Input is also missing, but the unparsable target wins.
        let err = tools
            .drop_frame("ghost.mp4", "sideways", Some("u1"))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Parameter(_)));
    }

    #[tokio::test]
    async fn test_unprobeable_file_reports_frame_count_failure() {
        let root = TempDir::new().unwrap();
        std::fs::create_dir_all(root.path().join("u1")).unwrap();
        std::fs::write(root.path().join("u1/fake.mp4"), b"not a real video").unwrap();

        let tools = MediaTools::new(WorkspaceResolver::new(root.path()));
        let err = tools
            .drop_frame("fake.mp4", "first", Some("u1"))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Internal(_)));
        assert!(err.to_string().contains("frame count"));
    }
}
