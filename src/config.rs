// src/config.rs

use crate::cli::{parse_search_depth, Cli, ProbeMode, WallpaperBackend};
use crate::error::AppError;
use crate::media_tool::{resolve_media_tool, MediaTool};
use std::{
    env,
    path::{Path, PathBuf},
};

/// A list of recognized video file extensions (all lowercase, without the dot).
pub const VIDEO_EXTENSIONS: &[&str] = &[
    "avi", "avchd", "flv", "m4p", "m4v", "mkv", "mp2", "mp4", "mpeg", "mpe", "mpg", "mpv", "mov",
    "qt", "webm", "wmv",
];
/// The filename of the flat list of videos that could not be probed.
pub const IGNORE_FILE_NAME: &str = "IgnoreVideos.txt";
/// The filename of the extracted frame, written to the working directory.
pub const WALLPAPER_FILE_NAME: &str = "wallpaper.png";
/// How many candidates are probed before giving up.
pub const ATTEMPT_LIMIT: usize = 100;
/// Search depth used when none (or an invalid one) is given.
pub const DEFAULT_SEARCH_DEPTH: usize = 1;

/// Environment variable consulted when no video path is passed.
pub const PATH_ENV_VAR: &str = "VIDEO_WALLPAPER_PATH";
/// Environment variable consulted when no media tool location is passed.
pub const FFMPEG_ENV_VAR: &str = "VIDEO_WALLPAPER_FFMPEG";

/// The name of the ffmpeg executable, which is platform-dependent.
#[cfg(windows)]
pub const FFMPEG_EXECUTABLE_NAME: &str = "ffmpeg.exe";
#[cfg(not(windows))]
pub const FFMPEG_EXECUTABLE_NAME: &str = "ffmpeg";

/// The name of the ffprobe executable, which is platform-dependent.
#[cfg(windows)]
pub const FFPROBE_EXECUTABLE_NAME: &str = "ffprobe.exe";
#[cfg(not(windows))]
pub const FFPROBE_EXECUTABLE_NAME: &str = "ffprobe";

/// Everything a run needs, resolved once at startup and handed to the
/// components that use it.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// File or directory to pick a video from.
    pub video_path: PathBuf,
    /// How many directory levels to scan (1 = top level only).
    pub search_depth: usize,
    /// Flat list of videos excluded from selection.
    pub ignore_file: PathBuf,
    /// Where the extracted frame is written. Always absolute.
    pub artifact_path: PathBuf,
    pub media_tool: MediaTool,
    pub probe_mode: ProbeMode,
    pub wallpaper_backend: WallpaperBackend,
    pub wallpaper_command: Option<String>,
    /// Fixed seed for the random source, if any.
    pub seed: Option<u64>,
}

impl AppConfig {
    /// Resolves the configuration from the parsed arguments and the
    /// environment, relative to `work_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if no video path is given or if the media tools
    /// needed for `cli.probe` cannot be found.
    pub fn resolve(cli: Cli, work_dir: &Path) -> Result<Self, AppError> {
        let video_path = cli
            .path
            .or_else(|| env::var(PATH_ENV_VAR).ok())
            .filter(|s| !s.trim().is_empty())
            .map(|s| expand_path(&s))
            .ok_or(AppError::MissingPath)?;

        let search_depth = parse_search_depth(cli.search_depth.as_deref());

        let ignore_file = match cli.ignore_file {
            Some(path) => path,
            None => PathBuf::from(IGNORE_FILE_NAME),
        };

        let tool_override = cli.media_tool.or_else(|| env::var(FFMPEG_ENV_VAR).ok());
        let tool_override = tool_override.map(|s| expand_path(&s));
        let ignore_dir = ignore_file.parent().filter(|dir| !dir.as_os_str().is_empty());
        let media_tool = resolve_media_tool(
            tool_override.as_deref().and_then(|p| p.to_str()),
            work_dir,
            ignore_dir,
        )?;
        if cli.probe == ProbeMode::Json && media_tool.ffprobe.is_none() {
            return Err(AppError::MediaToolNotFound {
                name: FFPROBE_EXECUTABLE_NAME.to_string(),
            });
        }

        Ok(AppConfig {
            video_path,
            search_depth,
            ignore_file,
            artifact_path: work_dir.join(WALLPAPER_FILE_NAME),
            media_tool,
            probe_mode: cli.probe,
            wallpaper_backend: cli.wallpaper,
            wallpaper_command: cli.wallpaper_command,
            seed: cli.seed,
        })
    }
}

/// Expands `~` and environment variables, keeping the input unchanged if
/// expansion fails.
fn expand_path(raw: &str) -> PathBuf {
    match shellexpand::full(raw) {
        Ok(expanded) => PathBuf::from(expanded.into_owned()),
        Err(e) => {
            log::warn!("Could not expand '{}': {}", raw, e);
            PathBuf::from(raw)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs::File;

    fn work_dir_with_ffmpeg() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join(FFMPEG_EXECUTABLE_NAME)).unwrap();
        dir
    }

    #[test]
    fn test_resolve_defaults() {
        let dir = work_dir_with_ffmpeg();
        let cli = Cli::try_parse_from(["video_wallpaper", "/videos", "oops"]).unwrap();

        let config = AppConfig::resolve(cli, dir.path()).unwrap();
        assert_eq!(config.video_path, PathBuf::from("/videos"));
        assert_eq!(config.search_depth, DEFAULT_SEARCH_DEPTH);
        assert_eq!(config.ignore_file, PathBuf::from(IGNORE_FILE_NAME));
        assert_eq!(config.artifact_path, dir.path().join(WALLPAPER_FILE_NAME));
        assert!(config.artifact_path.is_absolute());
        assert_eq!(config.media_tool.ffmpeg, dir.path().join(FFMPEG_EXECUTABLE_NAME));
        assert_eq!(config.wallpaper_backend, WallpaperBackend::Native);
    }

    #[test]
    fn test_resolve_json_probe_needs_ffprobe() {
        let dir = work_dir_with_ffmpeg();
        let cli = Cli::try_parse_from(["video_wallpaper", "/videos", "--probe", "json"]).unwrap();

        let err = AppConfig::resolve(cli, dir.path()).unwrap_err();
        assert!(matches!(
            err,
            AppError::MediaToolNotFound { ref name } if name == FFPROBE_EXECUTABLE_NAME
        ));
    }

    #[test]
    fn test_expand_path_keeps_plain_paths() {
        assert_eq!(expand_path("/a/b.mp4"), PathBuf::from("/a/b.mp4"));
    }

    #[test]
    fn test_resolve_finds_ffmpeg_beside_ignore_file() {
        let work = tempfile::tempdir().unwrap();
        let lists = tempfile::tempdir().unwrap();
        File::create(lists.path().join(FFMPEG_EXECUTABLE_NAME)).unwrap();
        let ignore_file = lists.path().join(IGNORE_FILE_NAME);
        let cli = Cli::try_parse_from([
            "video_wallpaper",
            "/videos",
            "--ignore-file",
            ignore_file.to_str().unwrap(),
        ])
        .unwrap();

        let config = AppConfig::resolve(cli, work.path()).unwrap();
        assert_eq!(config.ignore_file, ignore_file);
        assert_eq!(config.media_tool.ffmpeg, lists.path().join(FFMPEG_EXECUTABLE_NAME));
    }
}
