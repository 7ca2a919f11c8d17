//! Filesystem primitives: atomic replacement and cross-device moves.

use std::path::Path;
use tracing::{debug, warn};

use crate::error::{WorkspaceError, WorkspaceResult};

/// Atomically promote a finished temporary file onto `dst`.
///
/// `tmp` must live on the same filesystem as `dst` (pipelines write their
/// temporaries as siblings of the final path). A reader of `dst` sees
/// either the old content or the new, never a truncated file.
pub fn atomic_replace(tmp: impl AsRef<Path>, dst: impl AsRef<Path>) -> WorkspaceResult<()> {
    let tmp = tmp.as_ref();
    let dst = dst.as_ref();

    std::fs::rename(tmp, dst).map_err(|e| {
        // Leave no temporary behind on failure.
        let _ = std::fs::remove_file(tmp);
        WorkspaceError::Io(e)
    })?;

    debug!(dst = %dst.display(), "Promoted temporary file");
    Ok(())
}

/// Move a file from `src` to `dst`, handling cross-device moves.
///
/// Tries a fast rename first; on EXDEV falls back to copying to a
/// temporary sibling of `dst` and promoting it, then deleting `src`.
pub fn move_file(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> WorkspaceResult<()> {
    let src = src.as_ref();
    let dst = dst.as_ref();

    if let Some(parent) = dst.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    match std::fs::rename(src, dst) {
        Ok(()) => Ok(()),
        Err(e) if is_cross_device_error(&e) => {
            debug!(
                src = %src.display(),
                dst = %dst.display(),
                "Cross-device rename, falling back to copy+delete"
            );
            copy_and_delete(src, dst)
        }
        Err(e) => Err(WorkspaceError::Io(e)),
    }
}

/// Check if an IO error is EXDEV (cross-device link).
fn is_cross_device_error(e: &std::io::Error) -> bool {
    // EXDEV is error code 18 on Linux/macOS
    e.raw_os_error() == Some(18)
}

fn copy_and_delete(src: &Path, dst: &Path) -> WorkspaceResult<()> {
    let tmp_dst = dst.with_extension("tmp");

    std::fs::copy(src, &tmp_dst)?;
    atomic_replace(&tmp_dst, dst)?;

    // Best effort; the move already succeeded from the caller's view.
    if let Err(e) = std::fs::remove_file(src) {
        warn!(src = %src.display(), error = %e, "Failed to remove source after move");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_replace_swaps_content() {
        let dir = TempDir::new().unwrap();
        let dst = dir.path().join("clip.mp4");
        let tmp = dir.path().join("clip.temp.mp4");
        fs::write(&dst, b"old").unwrap();
        fs::write(&tmp, b"new").unwrap();

        atomic_replace(&tmp, &dst).unwrap();

        assert!(!tmp.exists());
        assert_eq!(fs::read(&dst).unwrap(), b"new");
    }

    #[test]
    fn test_move_file_same_filesystem() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("a.mp4");
        let dst = dir.path().join("sub").join("b.mp4");
        fs::write(&src, b"content").unwrap();

        move_file(&src, &dst).unwrap();

        assert!(!src.exists());
        assert_eq!(fs::read(&dst).unwrap(), b"content");
    }

    #[test]
    fn test_is_cross_device_error() {
        assert!(is_cross_device_error(&std::io::Error::from_raw_os_error(18)));
        assert!(!is_cross_device_error(&std::io::Error::from_raw_os_error(2)));
    }
}
