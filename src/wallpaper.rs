// src/wallpaper.rs

use crate::cli::WallpaperBackend;
use crate::error::AppError;
use std::path::Path;
use std::process::Command;

/// Applies an image as the desktop background.
pub trait WallpaperSetter {
    fn apply(&self, image: &Path) -> Result<(), AppError>;
}

/// Uses the platform's own API (SystemParametersInfo on Windows, the
/// desktop environment's settings elsewhere). The setting is persisted and
/// broadcast to the desktop.
pub struct NativeSetter;

impl WallpaperSetter for NativeSetter {
    fn apply(&self, image: &Path) -> Result<(), AppError> {
        let image_str = image.to_str().ok_or_else(|| {
            AppError::WallpaperApply(format!("path is not valid UTF-8: {}", image.display()))
        })?;
        wallpaper::set_from_path(image_str).map_err(|e| AppError::WallpaperApply(e.to_string()))
    }
}

/// Runs a desktop-environment command such as `feh --bg-fill {}` or
/// `swww img {}`. `{}` is replaced by the image path; without it the path is
/// appended as the last argument.
pub struct CommandSetter {
    command_line: String,
}

impl CommandSetter {
    pub fn new(command_line: impl Into<String>) -> Self {
        CommandSetter {
            command_line: command_line.into(),
        }
    }

    /// Splits the command line on whitespace and substitutes the image path.
    fn build_args(&self, image: &Path) -> Vec<String> {
        let image = image.to_string_lossy();
        let mut args: Vec<String> = self
            .command_line
            .split_whitespace()
            .map(|part| part.replace("{}", &image))
            .collect();
        if !self.command_line.contains("{}") {
            args.push(image.into_owned());
        }
        args
    }
}

impl WallpaperSetter for CommandSetter {
    fn apply(&self, image: &Path) -> Result<(), AppError> {
        let args = self.build_args(image);
        let Some((program, rest)) = args.split_first() else {
            return Err(AppError::WallpaperApply(
                "empty wallpaper command".to_string(),
            ));
        };

        log::debug!("Running wallpaper command: {:?}", args);
        let output = Command::new(program)
            .args(rest)
            .output()
            .map_err(|e| AppError::WallpaperApply(format!("failed to run {}: {}", program, e)))?;

        if !output.status.success() {
            return Err(AppError::WallpaperApply(format!(
                "{} failed ({}): {}",
                program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(())
    }
}

/// For platforms without a supported call: only reports the image path.
pub struct LogOnlySetter;

impl WallpaperSetter for LogOnlySetter {
    fn apply(&self, image: &Path) -> Result<(), AppError> {
        log::info!(
            "Wallpaper not applied automatically; image is at {}",
            image.display()
        );
        Ok(())
    }
}

/// Picks the setter for the configured backend.
pub fn setter_for(
    backend: WallpaperBackend,
    command_line: Option<&str>,
) -> Box<dyn WallpaperSetter> {
    match (backend, command_line) {
        (WallpaperBackend::Native, _) => Box::new(NativeSetter),
        (WallpaperBackend::Command, Some(command_line)) => {
            Box::new(CommandSetter::new(command_line))
        }
        (WallpaperBackend::Command, None) => {
            log::warn!(
                "--wallpaper command needs --wallpaper-command; only logging the image path"
            );
            Box::new(LogOnlySetter)
        }
        (WallpaperBackend::LogOnly, _) => Box::new(LogOnlySetter),
    }
}
