//! Anonymous-to-authorized workspace migration.
//!
//! When an anonymous user signs in, their browser-keyed workspace is
//! merged into the authorized user's workspace and replaced with a
//! symlink alias so the stale anonymous key keeps resolving.

use std::path::Path;
use tracing::info;

use crate::error::{WorkspaceError, WorkspaceResult};
use crate::fs::move_file;
use crate::naming::allocate_unique_name;

/// Outcome of a completed migration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    /// Number of files moved into the target workspace.
    pub files_moved: usize,
    /// Whether the source directory was replaced with a symlink alias.
    pub alias_created: bool,
}

/// Merge every file from `root/<source_key>` into `root/<target_key>`.
///
/// Name collisions in the target are resolved with the unique-name
/// allocator, the emptied source directory is removed, and a symlink
/// `root/<source_key>` -> `<target_key>` is left behind. A source that is
/// already a symlink is reported as [`WorkspaceError::AlreadyMigrated`].
pub fn migrate_workspace(
    root: impl AsRef<Path>,
    source_key: &str,
    target_key: &str,
) -> WorkspaceResult<MigrationReport> {
    let root = root.as_ref();
    let source = root.join(source_key);
    let target = root.join(target_key);

    if source.is_symlink() {
        return Err(WorkspaceError::AlreadyMigrated(source));
    }
    if !source.is_dir() {
        return Err(WorkspaceError::DirectoryNotFound(source));
    }

    std::fs::create_dir_all(&target)?;

    let mut files_moved = 0;
    for entry in std::fs::read_dir(&source)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        let unique = allocate_unique_name(&target, &name);
        move_file(&path, target.join(&unique))?;
        info!(from = %name, to = %unique, "Moved asset");
        files_moved += 1;
    }

    // Only an emptied source is removed; leftover subdirectories keep it
    // (and the alias is skipped).
    let mut alias_created = false;
    if std::fs::read_dir(&source)?.next().is_none() {
        std::fs::remove_dir(&source)?;
        symlink_dir(Path::new(target_key), &source)?;
        alias_created = true;
        info!(source = source_key, target = target_key, "Created workspace alias");
    }

    info!(files_moved, alias_created, "Migration complete");
    Ok(MigrationReport {
        files_moved,
        alias_created,
    })
}

#[cfg(unix)]
fn symlink_dir(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink_dir(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::windows::fs::symlink_dir(target, link)
}
