// src/error.rs

use std::{io::Error as IoError, path::PathBuf};

use thiserror::Error;

/// Every way a run can stop early.
///
/// An unreadable candidate video is not represented here: the selector
/// records it in the ignore list and moves on.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Usage ---
    #[error("Please provide the file/folder path as a command line argument.")]
    MissingPath,

    #[error("{} is not a valid file or directory.", .0.display())]
    InvalidPath(PathBuf),

    #[error("Unsupported file type: {}. Supported types are {supported}", .path.display())]
    UnsupportedFileType { path: PathBuf, supported: String },

    // --- Environment ---
    #[error("{name} not found.\nIt must be in the working directory, next to this program, on PATH, or its location passed as the 3rd argument.")]
    MediaToolNotFound { name: String },

    #[error("Failed to run '{}': {source}", .program.display())]
    ToolLaunch {
        program: PathBuf,
        #[source]
        source: IoError,
    },

    #[error("Error writing to {}: {source}", .path.display())]
    IgnoreFileWrite {
        path: PathBuf,
        #[source]
        source: IoError,
    },

    #[error("Failed to set the desktop background: {0}")]
    WallpaperApply(String),

    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    // --- Content ---
    #[error("No usable video found.\nCheck the specified path and {} if it exists.", .ignore_file.display())]
    NoUsableVideo { ignore_file: PathBuf },

    #[error("No usable video found after {0} attempts. Giving up...")]
    AttemptsExhausted(usize),

    #[error("The media tool was not able to output {}: {reason}", .path.display())]
    ExtractionFailed { path: PathBuf, reason: String },
}
