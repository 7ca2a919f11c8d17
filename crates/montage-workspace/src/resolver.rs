//! Mapping user keys to workspace directories and resolving input files.

use std::path::{Path, PathBuf};
use tracing::debug;

use montage_models::is_video_file;

use crate::error::WorkspaceResult;

/// User-key values treated as "no identity presented".
const ANONYMOUS_SENTINELS: &[&str] = &["", "none"];

/// Resolves opaque user keys to directories under a root media directory.
#[derive(Debug, Clone)]
pub struct WorkspaceResolver {
    root: PathBuf,
}

impl WorkspaceResolver {
    /// Create a resolver over the given root media directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root media directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve the workspace directory for a user key.
    ///
    /// A present, non-sentinel key maps to `root/<key>` whether or not the
    /// directory exists yet (it is created lazily on first write via
    /// [`Self::ensure_directory`]).
    ///
    /// An absent or sentinel key falls back to a best-effort heuristic for
    /// anonymous/development sessions: the first immediate subdirectory of
    /// the root that contains at least one video file, else the root
    /// itself. With several populated user directories the answer is
    /// ambiguous; callers must not treat it as authoritative.
    pub fn resolve_directory(&self, user_key: Option<&str>) -> PathBuf {
        if let Some(key) = user_key {
            let key = key.trim();
            if !ANONYMOUS_SENTINELS.contains(&key.to_ascii_lowercase().as_str()) {
                return self.root.join(key);
            }
        }
        self.anonymous_fallback()
    }

    /// Resolve and lazily create the workspace directory for a write.
    pub fn ensure_directory(&self, user_key: Option<&str>) -> WorkspaceResult<PathBuf> {
        let dir = self.resolve_directory(user_key);
        if !dir.exists() {
            debug!(dir = %dir.display(), "Creating workspace directory");
            std::fs::create_dir_all(&dir)?;
        }
        Ok(dir)
    }

    /// Locate an input file.
    ///
    /// Resolution order: the literal path as given (accepted wherever it
    /// points, if it exists), then the filename joined under the resolved
    /// workspace. Nothing else is searched.
    pub fn find_input_file(&self, filename: &str, user_key: Option<&str>) -> Option<PathBuf> {
        let literal = Path::new(filename);
        if literal.is_file() {
            return Some(literal.to_path_buf());
        }

        let candidate = self.resolve_directory(user_key).join(filename);
        if candidate.is_file() {
            return Some(candidate);
        }

        None
    }

    fn anonymous_fallback(&self) -> PathBuf {
        let Ok(entries) = std::fs::read_dir(&self.root) else {
            return self.root.clone();
        };

        for entry in entries.flatten() {
            let dir = entry.path();
            if !dir.is_dir() {
                continue;
            }
            if directory_has_video(&dir) {
                debug!(dir = %dir.display(), "Anonymous fallback picked workspace");
                return dir;
            }
        }

        self.root.clone()
    }
}

fn directory_has_video(dir: &Path) -> bool {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return false;
    };
    entries
        .flatten()
        .any(|e| e.path().is_file() && is_video_file(e.path()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn resolver() -> (TempDir, WorkspaceResolver) {
        let root = TempDir::new().unwrap();
        let resolver = WorkspaceResolver::new(root.path());
        (root, resolver)
    }

    #[test]
    fn test_known_key_maps_under_root() {
        let (root, resolver) = resolver();
        let dir = resolver.resolve_directory(Some("user-a"));
        assert_eq!(dir, root.path().join("user-a"));
    }

    #[test]
    fn test_ensure_directory_creates_lazily() {
        let (root, resolver) = resolver();
        assert!(!root.path().join("user-a").exists());
        let dir = resolver.ensure_directory(Some("user-a")).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_anonymous_falls_back_to_video_directory() {
        let (root, resolver) = resolver();
        fs::create_dir(root.path().join("empty")).unwrap();
        fs::create_dir(root.path().join("populated")).unwrap();
        fs::write(root.path().join("populated/clip.mp4"), b"x").unwrap();
        fs::write(root.path().join("empty/notes.txt"), b"x").unwrap();

        let dir = resolver.resolve_directory(None);
        assert_eq!(dir, root.path().join("populated"));
    }

    #[test]
    fn test_anonymous_falls_back_to_root_when_no_videos() {
        let (root, resolver) = resolver();
        fs::create_dir(root.path().join("empty")).unwrap();
        assert_eq!(resolver.resolve_directory(Some("none")), root.path());
        assert_eq!(resolver.resolve_directory(Some("")), root.path());
    }

    #[test]
    fn test_find_input_prefers_literal_path() {
        let (root, resolver) = resolver();
        let outside = TempDir::new().unwrap();
        let literal = outside.path().join("elsewhere.mp4");
        fs::write(&literal, b"x").unwrap();

        let found = resolver.find_input_file(literal.to_str().unwrap(), Some("user-a"));
        assert_eq!(found, Some(literal));
        drop(root);
    }

    #[test]
    fn test_find_input_in_workspace() {
        let (root, resolver) = resolver();
        fs::create_dir(root.path().join("user-a")).unwrap();
        fs::write(root.path().join("user-a/clip.mp4"), b"x").unwrap();

        let found = resolver.find_input_file("clip.mp4", Some("user-a"));
        assert_eq!(found, Some(root.path().join("user-a/clip.mp4")));
    }

    #[test]
    fn test_find_input_not_found() {
        let (_root, resolver) = resolver();
        assert!(resolver.find_input_file("ghost.mp4", Some("user-a")).is_none());
    }
}
