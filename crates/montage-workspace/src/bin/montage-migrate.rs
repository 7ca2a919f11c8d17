//! Operator utility: merge an anonymous workspace into an authorized one.
//!
//! Usage: `montage-migrate <anonymous_folder> <authorized_uid>`
//!
//! The root media directory comes from `MONTAGE_MEDIA_ROOT` (default
//! `videos`), matching the agent's configuration.

use anyhow::{bail, Context};
use tracing_subscriber::EnvFilter;

use montage_workspace::migrate_workspace;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [source_key, target_key] = args.as_slice() else {
        bail!("usage: montage-migrate <anonymous_folder> <authorized_uid>");
    };

    let root = std::env::var("MONTAGE_MEDIA_ROOT").unwrap_or_else(|_| "videos".to_string());

    let report = migrate_workspace(&root, source_key, target_key)
        .with_context(|| format!("migrating {source_key} to {target_key} under {root}"))?;

    println!(
        "Migration complete: {} file(s) moved{}",
        report.files_moved,
        if report.alias_created {
            ", alias created"
        } else {
            ""
        }
    );
    Ok(())
}
