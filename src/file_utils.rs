// src/file_utils.rs

use crate::error::AppError;
use crate::video_file::{supported_extensions, VideoFile};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Collects the candidate videos at `root`.
///
/// If `root` is a file it must itself be a video, and it is the only candidate.
/// If it is a directory, files are gathered from up to `max_depth` levels:
/// a depth of 1 means only the directory's own entries.
///
/// Entries that cannot be read (permissions, I/O) are skipped rather than
/// failing the whole scan. Order is not significant.
///
/// # Errors
///
/// Returns an error if:
/// * `root` is a file without a recognized video extension.
/// * `root` is neither a file nor a directory.
pub fn collect_videos(root: &Path, max_depth: usize) -> Result<Vec<PathBuf>, AppError> {
    if root.is_file() {
        let file = VideoFile::classify(root.to_path_buf());
        if !file.is_video() {
            return Err(AppError::UnsupportedFileType {
                path: file.path,
                supported: supported_extensions(),
            });
        }
        return Ok(vec![file.path]);
    }

    if !root.is_dir() {
        return Err(AppError::InvalidPath(root.to_path_buf()));
    }

    let walker = WalkDir::new(root)
        .min_depth(1) // Contents of the folder, not the folder itself.
        .max_depth(max_depth.max(1));

    let mut video_files = Vec::new();
    for entry_result in walker {
        let entry = match entry_result {
            Ok(entry) => entry,
            Err(e) => {
                log::debug!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let file = VideoFile::classify(path.to_path_buf());
        if file.is_video() {
            video_files.push(file.path);
        }
    }
    Ok(video_files)
}
