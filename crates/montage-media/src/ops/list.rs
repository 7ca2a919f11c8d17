//! Workspace listings and per-file info.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local};

use montage_models::{is_image_file, is_video_file, ToolError, ToolResult};

use crate::tools::MediaTools;

impl MediaTools {
    /// List the workspace's video files, newest first.
    pub async fn list_videos(&self, user_key: Option<&str>) -> ToolResult {
        let files = self.workspace_files(user_key, |p| is_video_file(p))?;
        if files.is_empty() {
            return Ok("No video files found.".to_string());
        }

        let mut lines = Vec::with_capacity(files.len());
        for (path, mtime) in files {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let info = self.cache().get(&path).await;
            let size_mb = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(info.size) as f64
                / 1024.0
                / 1024.0;
            lines.push(format!(
                "- {name}: {:.1}s, {} frames, {:.2} fps, {size_mb:.1}MB, {}x{}, modified: {}",
                info.duration,
                info.frame_count,
                info.fps,
                info.width,
                info.height,
                format_mtime(mtime),
            ));
        }

        Ok(format!("Videos in workspace:\n{}", lines.join("\n")))
    }

    /// List the workspace's image files, newest first.
    pub async fn list_images(&self, user_key: Option<&str>) -> ToolResult {
        let files = self.workspace_files(user_key, |p| is_image_file(p))?;
        if files.is_empty() {
            return Ok("No image files found.".to_string());
        }

        let mut lines = Vec::with_capacity(files.len());
        for (path, mtime) in files {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let info = self.cache().get(&path).await;
            // Probes can fail on images; the on-disk size is authoritative.
            let size_mb =
                std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0) as f64 / 1024.0 / 1024.0;
            lines.push(format!(
                "- {name}: {}x{}, {size_mb:.1}MB, modified: {}",
                info.width,
                info.height,
                format_mtime(mtime),
            ));
        }

        Ok(format!("Images in workspace:\n{}", lines.join("\n")))
    }

    /// Full probe report for one file.
    pub async fn media_info(&self, filename: &str, user_key: Option<&str>) -> ToolResult {
        let path = self.resolve_input(filename, user_key)?;
        let info = self.cache().get(&path).await;
        let size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(info.size);

        Ok(format!(
            "Video info for {filename}: Duration: {:.2}s, Size: {size} bytes ({:.1} MB), \
             Resolution: {}x{}, {:.2} fps, {} frames",
            info.duration,
            size as f64 / 1024.0 / 1024.0,
            info.width,
            info.height,
            info.fps,
            info.frame_count,
        ))
    }

    /// Collect workspace files passing `filter`, newest mtime first.
    fn workspace_files(
        &self,
        user_key: Option<&str>,
        filter: impl Fn(&Path) -> bool,
    ) -> Result<Vec<(PathBuf, Option<SystemTime>)>, ToolError> {
        let dir = self.resolver().resolve_directory(user_key);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let entries = std::fs::read_dir(&dir)
            .map_err(|e| ToolError::internal(format!("Failed to read workspace: {e}")))?;

        let mut files: Vec<(PathBuf, Option<SystemTime>)> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && filter(path))
            .map(|path| {
                let mtime = std::fs::metadata(&path).and_then(|m| m.modified()).ok();
                (path, mtime)
            })
            .collect();

        files.sort_by(|a, b| b.1.cmp(&a.1));
        Ok(files)
    }
}

fn format_mtime(mtime: Option<SystemTime>) -> String {
    match mtime {
        Some(time) => DateTime::<Local>::from(time)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => "unknown".to_string(),
    }
}
