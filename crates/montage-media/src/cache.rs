//! Process-wide media info memoization.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

use montage_models::MediaInfo;

use crate::probe::probe_media;

/// Memoizes probe results keyed by resolved file path.
///
/// An explicit object rather than a global so hosts and tests control its
/// lifetime. A hit is returned without any freshness check; the one
/// pipeline that rewrites a file in place drops its entry explicitly.
#[derive(Debug, Default)]
pub struct MediaInfoCache {
    inner: Mutex<HashMap<PathBuf, MediaInfo>>,
}

impl MediaInfoCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch info for a path, probing on miss.
    ///
    /// Probe failures degrade to the zeroed record (metadata is advisory)
    /// and are not cached, so a file that appears later probes fresh.
    pub async fn get(&self, path: impl AsRef<Path>) -> MediaInfo {
        let path = path.as_ref();

        if let Some(hit) = self.lookup(path) {
            return hit;
        }

        match probe_media(path).await {
            Ok(info) => {
                debug!(
                    path = %path.display(),
                    duration = info.duration,
                    fps = info.fps,
                    "Cached probe result"
                );
                self.inner
                    .lock()
                    .expect("info cache poisoned")
                    .insert(path.to_path_buf(), info.clone());
                info
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Probe failed, using defaults");
                MediaInfo::unavailable()
            }
        }
    }

    /// Seed an entry directly, bypassing the probe.
    #[cfg(test)]
    pub(crate) fn insert(&self, path: impl AsRef<Path>, info: MediaInfo) {
        self.inner
            .lock()
            .expect("info cache poisoned")
            .insert(path.as_ref().to_path_buf(), info);
    }

    /// Drop the entry for a path that was rewritten in place.
    pub fn invalidate(&self, path: impl AsRef<Path>) {
        self.inner
            .lock()
            .expect("info cache poisoned")
            .remove(path.as_ref());
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.inner.lock().expect("info cache poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup(&self, path: &Path) -> Option<MediaInfo> {
        self.inner
            .lock()
            .expect("info cache poisoned")
            .get(path)
            .cloned()
    }
}
