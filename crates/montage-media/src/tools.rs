//! The `MediaTools` facade: shared context for every operation pipeline.

use std::path::{Path, PathBuf};

use montage_models::ToolError;
use montage_workspace::{allocate_unique_name, WorkspaceResolver};

use crate::cache::MediaInfoCache;
use crate::command::FfmpegRunner;

/// Output files under this size get a "very small" warning appended.
pub(crate) const SUSPICIOUS_OUTPUT_BYTES: u64 = 1000;

/// Shared context for the operation pipelines.
///
/// Holds the workspace resolver, the media info cache, and the runner
/// configuration. The user key is passed into every call explicitly;
/// nothing here is request-scoped.
#[derive(Debug)]
pub struct MediaTools {
    resolver: WorkspaceResolver,
    cache: MediaInfoCache,
    timeout_secs: Option<u64>,
}

impl MediaTools {
    /// Create a toolset over the given workspace resolver.
    pub fn new(resolver: WorkspaceResolver) -> Self {
        Self {
            resolver,
            cache: MediaInfoCache::new(),
            timeout_secs: None,
        }
    }

    /// Apply a wall-clock timeout to every external invocation.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn resolver(&self) -> &WorkspaceResolver {
        &self.resolver
    }

    pub fn cache(&self) -> &MediaInfoCache {
        &self.cache
    }

    pub(crate) fn runner(&self) -> FfmpegRunner {
        match self.timeout_secs {
            Some(secs) => FfmpegRunner::new().with_timeout(secs),
            None => FfmpegRunner::new(),
        }
    }

    /// Resolve an input asset or produce the uniform not-found error.
    pub(crate) fn resolve_input(
        &self,
        filename: &str,
        user_key: Option<&str>,
    ) -> Result<PathBuf, ToolError> {
        self.resolver
            .find_input_file(filename, user_key)
            .ok_or_else(|| ToolError::not_found(format!("Video file {filename}")))
    }

    /// Allocate a unique output path in the user's workspace.
    ///
    /// Returns the full path and the (possibly suffixed) final filename.
    pub(crate) fn allocate_output(
        &self,
        desired: &str,
        user_key: Option<&str>,
    ) -> Result<(PathBuf, String), ToolError> {
        let dir = self.resolver.ensure_directory(user_key)?;
        Ok(allocate_in(&dir, desired))
    }

    /// Warning text for an implausibly small output file, if it applies.
    pub(crate) fn small_output_warning(path: &Path) -> Option<String> {
        let size = std::fs::metadata(path).ok()?.len();
        if size < SUSPICIOUS_OUTPUT_BYTES {
            Some(format!(
                " Warning: output file is very small ({size} bytes); check the parameters."
            ))
        } else {
            None
        }
    }
}

/// Allocate a unique name inside an already-resolved directory.
pub(crate) fn allocate_in(dir: &Path, desired: &str) -> (PathBuf, String) {
    let name = allocate_unique_name(dir, desired);
    (dir.join(&name), name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_input_not_found_message() {
        let root = TempDir::new().unwrap();
        let tools = MediaTools::new(WorkspaceResolver::new(root.path()));

        let err = tools.resolve_input("ghost.mp4", Some("u1")).unwrap_err();
        assert_eq!(err.to_string(), "Video file ghost.mp4 not found");
    }

    #[test]
    fn test_allocate_output_creates_workspace() {
        let root = TempDir::new().unwrap();
        let tools = MediaTools::new(WorkspaceResolver::new(root.path()));

        let (path, name) = tools.allocate_output("out.mp4", Some("u1")).unwrap();
        assert_eq!(name, "out.mp4");
        assert_eq!(path, root.path().join("u1/out.mp4"));
        assert!(root.path().join("u1").is_dir());
    }

    #[test]
    fn test_small_output_warning() {
        let dir = TempDir::new().unwrap();
        let tiny = dir.path().join("tiny.mp4");
        std::fs::write(&tiny, b"x").unwrap();
        assert!(MediaTools::small_output_warning(&tiny).is_some());

        let big = dir.path().join("big.mp4");
        std::fs::write(&big, vec![0u8; 4096]).unwrap();
        assert!(MediaTools::small_output_warning(&big).is_none());
    }
}
