//! Per-user media workspace resolution.
//!
//! A workspace is a directory under the root media directory holding one
//! user's assets. This crate maps opaque user keys to workspace
//! directories, resolves input filenames within them, allocates unique
//! output names, and provides the atomic-replace primitive used by
//! in-place pipelines. It also hosts the anonymous-to-authorized
//! workspace migration used by operators (`montage-migrate` binary).
//!
//! All filesystem access here is synchronous: every call is a handful of
//! metadata operations on local paths.

pub mod error;
pub mod fs;
pub mod migrate;
pub mod naming;
pub mod resolver;

pub use error::{WorkspaceError, WorkspaceResult};
pub use fs::{atomic_replace, move_file};
pub use migrate::{migrate_workspace, MigrationReport};
pub use naming::allocate_unique_name;
pub use resolver::WorkspaceResolver;
