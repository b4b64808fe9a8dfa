// src/frame_extractor.rs

use crate::cli::ProbeMode;
use crate::config::FFPROBE_EXECUTABLE_NAME;
use crate::error::AppError;
use crate::media_tool::MediaTool;
use regex::Regex;
use serde::Deserialize;
use std::{
    fs, io,
    path::Path,
    process::{Command, Output, Stdio},
    sync::LazyLock,
    time::Duration,
};

static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Duration:\s*(\d+):(\d{2}):(\d{2}(?:\.\d+)?)").expect("valid duration regex")
});

/// What the selector needs from a media backend.
pub trait FrameSource {
    /// Returns the video's duration, or `None` if it cannot be read.
    ///
    /// An `Err` means the backend itself is broken (e.g. the tool cannot be
    /// started), not that the video is bad.
    fn probe_duration(&self, video: &Path) -> Result<Option<Duration>, AppError>;

    /// Writes the frame at `timestamp` to `output`, replacing any previous file.
    fn extract_frame(&self, video: &Path, timestamp: Duration, output: &Path)
        -> Result<(), AppError>;
}

/// [`FrameSource`] backed by the ffmpeg/ffprobe executables.
#[derive(Debug, Clone)]
pub struct FfmpegExtractor {
    tool: MediaTool,
    mode: ProbeMode,
}

// Internal structs for parsing ffprobe JSON output.
#[derive(Deserialize, Debug)]
struct FfprobeOutput {
    #[serde(default)]
    format: FfprobeFormat,
}

#[derive(Deserialize, Debug, Default)]
struct FfprobeFormat {
    duration: Option<String>, // Overall duration in seconds (string format).
}

impl FfmpegExtractor {
    pub fn new(tool: MediaTool, mode: ProbeMode) -> Self {
        FfmpegExtractor { tool, mode }
    }

    fn probe_banner(&self, video: &Path) -> Result<Option<Duration>, AppError> {
        // Without an output file ffmpeg always exits with an error, so only
        // the diagnostic text is looked at.
        let mut command = Command::new(&self.tool.ffmpeg);
        command.arg("-hide_banner").arg("-i").arg(video);
        let output = run_captured(&mut command, &self.tool.ffmpeg)?;

        let diagnostics = String::from_utf8_lossy(&output.stderr);
        Ok(parse_banner_duration(&diagnostics))
    }

    fn probe_json(&self, video: &Path) -> Result<Option<Duration>, AppError> {
        let ffprobe = self.tool.ffprobe.as_ref().ok_or_else(|| AppError::MediaToolNotFound {
            name: FFPROBE_EXECUTABLE_NAME.to_string(),
        })?;

        let mut command = Command::new(ffprobe);
        command
            .args(["-v", "quiet", "-print_format", "json", "-show_format"])
            .arg(video);
        let output = run_captured(&mut command, ffprobe)?;

        let json_str = String::from_utf8_lossy(&output.stdout);
        Ok(parse_json_duration(&json_str))
    }
}

impl FrameSource for FfmpegExtractor {
    fn probe_duration(&self, video: &Path) -> Result<Option<Duration>, AppError> {
        match self.mode {
            ProbeMode::Banner => self.probe_banner(video),
            ProbeMode::Json => self.probe_json(video),
        }
    }

    fn extract_frame(
        &self,
        video: &Path,
        timestamp: Duration,
        output: &Path,
    ) -> Result<(), AppError> {
        // A stale image from an earlier run must not pass for a fresh one.
        match fs::remove_file(output) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(AppError::ExtractionFailed {
                    path: output.to_path_buf(),
                    reason: format!("cannot replace the existing file: {}", e),
                })
            }
        }

        let mut command = Command::new(&self.tool.ffmpeg);
        command
            .arg("-y")
            .arg("-ss")
            .arg(seek_argument(timestamp))
            .arg("-i")
            .arg(video)
            .args(["-frames:v", "1", "-f", "image2"])
            .arg(output);
        let result = run_captured(&mut command, &self.tool.ffmpeg)?;
        log::debug!("ffmpeg exited with {}", result.status);

        let diagnostics = String::from_utf8_lossy(&result.stderr);
        if reports_open_failure(&diagnostics) {
            return Err(AppError::ExtractionFailed {
                path: output.to_path_buf(),
                reason: "Please run this program with write permissions to its current directory."
                    .to_string(),
            });
        }

        match fs::metadata(output) {
            Ok(meta) if meta.is_file() && meta.len() > 0 => Ok(()),
            _ => Err(AppError::ExtractionFailed {
                path: output.to_path_buf(),
                reason: "no image was written".to_string(),
            }),
        }
    }
}

/// Formats `timestamp` for `-ss`, truncated to milliseconds so it never
/// rounds up past the end of the video.
fn seek_argument(timestamp: Duration) -> String {
    format!("{}.{:03}", timestamp.as_secs(), timestamp.subsec_millis())
}

/// Runs `command` to completion with stdout and stderr captured.
fn run_captured(command: &mut Command, program: &Path) -> Result<Output, AppError> {
    log::debug!("Running {:?}", command);
    command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|source| AppError::ToolLaunch {
            program: program.to_path_buf(),
            source,
        })
}

/// Finds `Duration: HH:MM:SS.ff` in ffmpeg's diagnostic output.
pub fn parse_banner_duration(diagnostics: &str) -> Option<Duration> {
    let caps = DURATION_RE.captures(diagnostics)?;
    let hours: u64 = caps[1].parse().ok()?;
    let minutes: u64 = caps[2].parse().ok()?;
    let seconds: f64 = caps[3].parse().ok()?;
    Some(Duration::from_secs(hours * 3600 + minutes * 60) + Duration::from_secs_f64(seconds))
}

/// Reads `format.duration` (seconds) from ffprobe's JSON output.
pub fn parse_json_duration(json_str: &str) -> Option<Duration> {
    let parsed: FfprobeOutput = match serde_json::from_str(json_str) {
        Ok(parsed) => parsed,
        Err(e) => {
            log::debug!("Failed to parse ffprobe JSON output: {}", e);
            return None;
        }
    };
    let secs = parsed.format.duration?.trim().parse::<f64>().ok()?;
    if !secs.is_finite() || secs < 0.0 {
        return None;
    }
    Some(Duration::from_secs_f64(secs))
}

fn reports_open_failure(diagnostics: &str) -> bool {
    diagnostics.to_lowercase().contains("could not open file")
}
