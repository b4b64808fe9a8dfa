// src/video_file.rs

use crate::config::VIDEO_EXTENSIONS;
use std::path::{Path, PathBuf};

/// Whether a file looks like a video, judged by its extension alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Other,
}

/// A file found while scanning, together with its classification.
#[derive(Debug, Clone)]
pub struct VideoFile {
    /// The path as it was enumerated.
    pub path: PathBuf,
    pub kind: MediaKind,
}

impl VideoFile {
    /// Classifies `path` by comparing its extension, case-insensitively,
    /// against [`VIDEO_EXTENSIONS`].
    pub fn classify(path: PathBuf) -> Self {
        let kind = if has_video_extension(&path) {
            MediaKind::Video
        } else {
            MediaKind::Other
        };
        VideoFile { path, kind }
    }

    pub fn is_video(&self) -> bool {
        self.kind == MediaKind::Video
    }
}

fn has_video_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| VIDEO_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// The allow-list formatted for messages, e.g. `.avi, .mkv`.
pub fn supported_extensions() -> String {
    VIDEO_EXTENSIONS
        .iter()
        .map(|ext| format!(".{}", ext))
        .collect::<Vec<_>>()
        .join(", ")
}
