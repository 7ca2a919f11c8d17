//! Media extension allowlists.
//!
//! Every destructive or listing operation restricts itself to these
//! extensions. Bulk deletion in particular never touches a file outside
//! [`MEDIA_EXTENSIONS`], whatever pattern the caller supplies.

use std::path::Path;

/// Recognized video extensions (lowercase, no dot).
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv", "wmv", "flv", "webm"];

/// Recognized image extensions (lowercase, no dot).
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp"];

/// Union of video and image extensions.
pub const MEDIA_EXTENSIONS: &[&str] = &[
    "mp4", "avi", "mov", "mkv", "wmv", "flv", "webm", "png", "jpg", "jpeg", "gif", "bmp", "webp",
];

fn extension_lower(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

fn has_extension_in(path: &Path, allowed: &[&str]) -> bool {
    extension_lower(path).is_some_and(|ext| allowed.contains(&ext.as_str()))
}

/// Whether the path carries a recognized video extension.
pub fn is_video_file(path: impl AsRef<Path>) -> bool {
    has_extension_in(path.as_ref(), VIDEO_EXTENSIONS)
}

/// Whether the path carries a recognized image extension.
pub fn is_image_file(path: impl AsRef<Path>) -> bool {
    has_extension_in(path.as_ref(), IMAGE_EXTENSIONS)
}

/// Whether the path carries any recognized media extension.
pub fn is_media_file(path: impl AsRef<Path>) -> bool {
    has_extension_in(path.as_ref(), MEDIA_EXTENSIONS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_extensions_case_insensitive() {
        assert!(is_video_file("clip.mp4"));
        assert!(is_video_file("CLIP.MP4"));
        assert!(is_video_file("a/b/clip.MkV"));
        assert!(!is_video_file("clip.png"));
        assert!(!is_video_file("clip"));
    }

    #[test]
    fn test_image_extensions() {
        assert!(is_image_file("frame.png"));
        assert!(is_image_file("frame.JPEG"));
        assert!(!is_image_file("frame.mp4"));
    }

    #[test]
    fn test_media_union() {
        assert!(is_media_file("clip.mov"));
        assert!(is_media_file("frame.gif"));
        assert!(!is_media_file("notes.txt"));
        assert!(!is_media_file("script.sh"));
    }
}
