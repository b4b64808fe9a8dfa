// src/media_tool.rs

use crate::config::{FFMPEG_EXECUTABLE_NAME, FFPROBE_EXECUTABLE_NAME};
use crate::error::AppError;
use std::{
    env,
    path::{Path, PathBuf},
};

/// Locations of the external media executables, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaTool {
    pub ffmpeg: PathBuf,
    /// ffprobe found next to ffmpeg, if any. Only needed for JSON probing.
    pub ffprobe: Option<PathBuf>,
}

impl MediaTool {
    /// Builds a `MediaTool` from a known ffmpeg path, picking up a sibling ffprobe.
    pub fn from_ffmpeg(ffmpeg: PathBuf) -> Self {
        let ffprobe = ffmpeg
            .parent()
            .map(|dir| dir.join(FFPROBE_EXECUTABLE_NAME))
            .filter(|p| p.is_file());
        MediaTool { ffmpeg, ffprobe }
    }
}

/// Finds ffmpeg.
///
/// Locations are tried in this order:
/// 1. `explicit`, relative to `work_dir` and then as given. A directory is
///    joined with the executable name.
/// 2. `work_dir`.
/// 3. `ignore_dir`, the directory holding the ignore list.
/// 4. Next to the application executable, then in a `tools` subdirectory.
/// 5. The directories on `PATH`.
///
/// # Errors
///
/// Returns [`AppError::MediaToolNotFound`] if none of the locations hold ffmpeg.
pub fn resolve_media_tool(
    explicit: Option<&str>,
    work_dir: &Path,
    ignore_dir: Option<&Path>,
) -> Result<MediaTool, AppError> {
    let mut paths_to_check: Vec<PathBuf> = Vec::new();

    if let Some(explicit) = explicit {
        let given = PathBuf::from(explicit);
        for base in [work_dir.join(&given), given] {
            if base.is_dir() {
                paths_to_check.push(base.join(FFMPEG_EXECUTABLE_NAME));
            } else {
                paths_to_check.push(base);
            }
        }
    }

    paths_to_check.push(work_dir.join(FFMPEG_EXECUTABLE_NAME));
    if let Some(ignore_dir) = ignore_dir {
        paths_to_check.push(work_dir.join(ignore_dir).join(FFMPEG_EXECUTABLE_NAME));
    }

    if let Ok(current_exe_path) = env::current_exe() {
        if let Some(exe_dir) = current_exe_path.parent() {
            paths_to_check.push(exe_dir.join(FFMPEG_EXECUTABLE_NAME));
            paths_to_check.push(exe_dir.join("tools").join(FFMPEG_EXECUTABLE_NAME));
        }
    }

    if let Some(path_var) = env::var_os("PATH") {
        paths_to_check
            .extend(env::split_paths(&path_var).map(|dir| dir.join(FFMPEG_EXECUTABLE_NAME)));
    }

    let found = paths_to_check.into_iter().find(|p| p.is_file());
    match found {
        Some(ffmpeg) => {
            log::debug!("Using media tool at '{}'", ffmpeg.display());
            Ok(MediaTool::from_ffmpeg(ffmpeg))
        }
        None => Err(AppError::MediaToolNotFound {
            name: FFMPEG_EXECUTABLE_NAME.to_string(),
        }),
    }
}
