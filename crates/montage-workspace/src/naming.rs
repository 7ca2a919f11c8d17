//! Unique output-name allocation.

use std::path::Path;

/// Find a filename under `dir` that does not collide with an existing file.
///
/// If `desired` is free it is returned as-is; otherwise `stem_1.ext`,
/// `stem_2.ext`, ... are probed in order and the first free variant wins.
/// The check-then-write window is not atomic: two concurrent callers can
/// compute the same name, an accepted risk (requests for one user are
/// serialized above this layer).
pub fn allocate_unique_name(dir: impl AsRef<Path>, desired: &str) -> String {
    let dir = dir.as_ref();
    if !dir.join(desired).exists() {
        return desired.to_string();
    }

    let (stem, ext) = split_name(desired);
    let mut counter = 1u32;
    loop {
        let candidate = if ext.is_empty() {
            format!("{stem}_{counter}")
        } else {
            format!("{stem}_{counter}.{ext}")
        };
        if !dir.join(&candidate).exists() {
            return candidate;
        }
        counter += 1;
    }
}

/// Split a filename into stem and extension (no dot).
fn split_name(name: &str) -> (&str, &str) {
    match name.rsplit_once('.') {
        // A leading dot is a hidden file, not an extension.
        Some((stem, ext)) if !stem.is_empty() => (stem, ext),
        _ => (name, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_free_name_returned_unchanged() {
        let dir = TempDir::new().unwrap();
        assert_eq!(allocate_unique_name(dir.path(), "out.mp4"), "out.mp4");
    }

    #[test]
    fn test_suffixes_increase() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("out.mp4"), b"").unwrap();
        assert_eq!(allocate_unique_name(dir.path(), "out.mp4"), "out_1.mp4");

        fs::write(dir.path().join("out_1.mp4"), b"").unwrap();
        assert_eq!(allocate_unique_name(dir.path(), "out.mp4"), "out_2.mp4");
    }

    #[test]
    fn test_extensionless_name() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("raw"), b"").unwrap();
        assert_eq!(allocate_unique_name(dir.path(), "raw"), "raw_1");
    }

    #[test]
    fn test_hidden_file_not_split() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".env"), b"").unwrap();
        assert_eq!(allocate_unique_name(dir.path(), ".env"), ".env_1");
    }
}
