// src/cli.rs

use crate::config::DEFAULT_SEARCH_DEPTH;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about = "Sets the desktop background to a random frame of a random video.",
    long_about = None
)]
pub struct Cli {
    /// Video file or folder to pick from.
    pub path: Option<String>,

    /// How many folder levels to search (1 = only the given folder).
    pub search_depth: Option<String>,

    /// Location of ffmpeg, either the executable or its folder.
    pub media_tool: Option<String>,

    /// List of videos to skip. Unreadable videos are appended to it.
    #[clap(long, value_name = "FILE")]
    pub ignore_file: Option<PathBuf>,

    /// How video durations are read.
    #[clap(long, value_enum, default_value_t = ProbeMode::Banner)]
    pub probe: ProbeMode,

    /// How the desktop background is applied.
    #[clap(long, value_enum, default_value_t = WallpaperBackend::Native)]
    pub wallpaper: WallpaperBackend,

    /// Command used by `--wallpaper command`. `{}` is replaced by the image path.
    #[clap(long, value_name = "CMD")]
    pub wallpaper_command: Option<String>,

    /// Wait for Enter before exiting on an error (for double-click launches).
    #[clap(long, action = clap::ArgAction::SetTrue)]
    pub pause_on_error: bool,

    /// Seed the random source, making a run repeatable.
    #[clap(long)]
    pub seed: Option<u64>,

    /// Print debug output, including media tool command lines.
    #[clap(short, long, action = clap::ArgAction::SetTrue)]
    pub verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProbeMode {
    /// Parse `Duration:` from the ffmpeg banner on stderr.
    Banner,
    /// Read `format.duration` from ffprobe's JSON output.
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum WallpaperBackend {
    /// Native desktop API.
    Native,
    /// A desktop-environment command given with `--wallpaper-command`.
    Command,
    /// Only log the image path.
    #[value(name = "none")]
    LogOnly,
}

/// Parses the search depth argument, falling back to the default for anything
/// that is not an integer of at least 1.
pub fn parse_search_depth(raw: Option<&str>) -> usize {
    let Some(raw) = raw else {
        return DEFAULT_SEARCH_DEPTH;
    };
    match raw.trim().parse::<usize>() {
        Ok(depth) if depth >= 1 => depth,
        _ => {
            log::warn!(
                "Invalid search depth '{}'. Using default value of {}",
                raw,
                DEFAULT_SEARCH_DEPTH
            );
            DEFAULT_SEARCH_DEPTH
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_arguments() {
        let cli = Cli::try_parse_from(["video_wallpaper", "/videos", "3", "/opt/ffmpeg"]).unwrap();
        assert_eq!(cli.path.as_deref(), Some("/videos"));
        assert_eq!(cli.search_depth.as_deref(), Some("3"));
        assert_eq!(cli.media_tool.as_deref(), Some("/opt/ffmpeg"));
        assert_eq!(cli.probe, ProbeMode::Banner);
        assert_eq!(cli.wallpaper, WallpaperBackend::Native);
        assert!(!cli.pause_on_error);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "video_wallpaper",
            "/videos",
            "--probe",
            "json",
            "--wallpaper",
            "command",
            "--wallpaper-command",
            "feh --bg-fill {}",
            "--seed",
            "42",
            "--pause-on-error",
        ])
        .unwrap();
        assert_eq!(cli.probe, ProbeMode::Json);
        assert_eq!(cli.wallpaper, WallpaperBackend::Command);
        assert_eq!(cli.wallpaper_command.as_deref(), Some("feh --bg-fill {}"));
        assert_eq!(cli.seed, Some(42));
        assert!(cli.pause_on_error);
    }

    #[test]
    fn test_parse_search_depth() {
        assert_eq!(parse_search_depth(None), 1);
        assert_eq!(parse_search_depth(Some("4")), 4);
        assert_eq!(parse_search_depth(Some(" 2 ")), 2);
        // Invalid values fall back instead of failing.
        assert_eq!(parse_search_depth(Some("0")), 1);
        assert_eq!(parse_search_depth(Some("-3")), 1);
        assert_eq!(parse_search_depth(Some("deep")), 1);
    }
}
