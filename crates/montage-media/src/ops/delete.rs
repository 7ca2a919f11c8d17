//! Bulk file deletion by pattern.

use globset::{Glob, GlobSetBuilder};
use tracing::{info, warn};

use montage_models::{is_media_file, ToolError, ToolResult, IMAGE_EXTENSIONS, VIDEO_EXTENSIONS};

use crate::tools::MediaTools;

impl MediaTools {
    /// Delete workspace files matching `pattern`.
    ///
    /// Accepts glob patterns (`*.mp4`), phrases (`all mov files`,
    /// `all images`, `all videos`), or a literal filename. Only files with
    /// a recognized media extension are ever removed, whatever the pattern
    /// matches; deletion does not recurse into subdirectories.
    pub fn delete_files(&self, pattern: &str, user_key: Option<&str>) -> ToolResult {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return Err(ToolError::parameter("Delete pattern must not be empty"));
        }

        let mut builder = GlobSetBuilder::new();
        for glob in patterns_from_phrase(pattern) {
            let glob = Glob::new(&glob)
                .map_err(|e| ToolError::parameter(format!("Invalid pattern {glob:?}: {e}")))?;
            builder.add(glob);
        }
        let set = builder
            .build()
            .map_err(|e| ToolError::parameter(format!("Invalid pattern {pattern:?}: {e}")))?;

        let dir = self.resolver().resolve_directory(user_key);
        if !dir.is_dir() {
            return Ok(format!("No files matched {pattern}."));
        }

        let mut deleted = Vec::new();
        let entries = std::fs::read_dir(&dir)
            .map_err(|e| ToolError::internal(format!("Failed to read workspace: {e}")))?;
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() || !is_media_file(&path) {
                continue;
            }
            let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
                continue;
            };
            if !set.is_match(&name) {
                continue;
            }
            match std::fs::remove_file(&path) {
                Ok(()) => deleted.push(name),
                Err(e) => warn!(file = %path.display(), error = %e, "Failed to delete file"),
            }
        }

        if deleted.is_empty() {
            return Ok(format!("No files matched {pattern}."));
        }

        deleted.sort();
        info!(count = deleted.len(), pattern, "Bulk delete complete");
        Ok(format!(
            "Deleted {} file(s): {}",
            deleted.len(),
            deleted.join(", ")
        ))
    }
}

/// Expand a natural-language delete phrase into glob patterns.
fn patterns_from_phrase(input: &str) -> Vec<String> {
    let lower = input.to_lowercase();
    let lower = lower.trim();

    if lower == "all images" || lower == "all image files" {
        return IMAGE_EXTENSIONS.iter().map(|e| format!("*.{e}")).collect();
    }
    if lower == "all videos" || lower == "all video files" {
        return VIDEO_EXTENSIONS.iter().map(|e| format!("*.{e}")).collect();
    }
    if let Some(rest) = lower.strip_prefix("all ") {
        if let Some(ext) = rest.strip_suffix(" files") {
            let ext = ext.trim_start_matches('.');
            if !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()) {
                return vec![format!("*.{ext}")];
            }
        }
    }

    vec![input.to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use montage_workspace::WorkspaceResolver;
    use tempfile::TempDir;

    #[test]
    fn test_phrase_expansion() {
        assert_eq!(patterns_from_phrase("all mov files"), vec!["*.mov"]);
        assert_eq!(patterns_from_phrase("All MOV Files"), vec!["*.mov"]);
        assert_eq!(patterns_from_phrase("*.mp4"), vec!["*.mp4"]);
        assert_eq!(patterns_from_phrase("clip.mp4"), vec!["clip.mp4"]);
        assert_eq!(
            patterns_from_phrase("all images").len(),
            IMAGE_EXTENSIONS.len()
        );
        assert_eq!(
            patterns_from_phrase("all videos").len(),
            VIDEO_EXTENSIONS.len()
        );
    }

    #[test]
    fn test_delete_respects_media_allowlist() {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("u1");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("a.mp4"), b"x").unwrap();
        std::fs::write(dir.join("b.mp4"), b"x").unwrap();
        std::fs::write(dir.join("notes.txt"), b"x").unwrap();
        // A glob that would match everything must still skip non-media.
        let tools = MediaTools::new(WorkspaceResolver::new(root.path()));

        let msg = tools.delete_files("*", Some("u1")).unwrap();
        assert!(msg.contains("Deleted 2 file(s)"));
        assert!(dir.join("notes.txt").exists());
        assert!(!dir.join("a.mp4").exists());
    }

    #[test]
    fn test_delete_by_extension_phrase() {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("u1");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("a.mov"), b"x").unwrap();
        std::fs::write(dir.join("b.mp4"), b"x").unwrap();
        let tools = MediaTools::new(WorkspaceResolver::new(root.path()));

        let msg = tools.delete_files("all mov files", Some("u1")).unwrap();
        assert_eq!(msg, "Deleted 1 file(s): a.mov");
        assert!(dir.join("b.mp4").exists());
    }

    #[test]
    fn test_no_matches() {
        let root = TempDir::new().unwrap();
        std::fs::create_dir_all(root.path().join("u1")).unwrap();
        let tools = MediaTools::new(WorkspaceResolver::new(root.path()));

        let msg = tools.delete_files("*.webm", Some("u1")).unwrap();
        assert!(msg.starts_with("No files matched"));
    }

    #[test]
    fn test_invalid_glob_is_parameter_error() {
        let root = TempDir::new().unwrap();
        let tools = MediaTools::new(WorkspaceResolver::new(root.path()));

        let err = tools.delete_files("a[", Some("u1")).unwrap_err();
        assert!(matches!(err, ToolError::Parameter(_)));
    }
}
