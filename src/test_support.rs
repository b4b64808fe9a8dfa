// src/test_support.rs

use crate::error::AppError;
use crate::frame_extractor::FrameSource;
use crate::wallpaper::WallpaperSetter;
use std::{
    cell::RefCell,
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

/// Answers probes from a table and writes a dummy image on extraction.
/// Paths missing from the table are unreadable.
pub struct FakeSource {
    durations: HashMap<PathBuf, Duration>,
    pub probed: RefCell<Vec<PathBuf>>,
    pub extracted: RefCell<Vec<(PathBuf, Duration)>>,
}

impl FakeSource {
    pub fn new<P: AsRef<Path>>(durations: &[(P, u64)]) -> Self {
        FakeSource {
            durations: durations
                .iter()
                .map(|(p, secs)| (p.as_ref().to_path_buf(), Duration::from_secs(*secs)))
                .collect(),
            probed: RefCell::new(Vec::new()),
            extracted: RefCell::new(Vec::new()),
        }
    }

    pub fn probe_count(&self, video: &Path) -> usize {
        self.probed.borrow().iter().filter(|p| p.as_path() == video).count()
    }
}

impl FrameSource for FakeSource {
    fn probe_duration(&self, video: &Path) -> Result<Option<Duration>, AppError> {
        self.probed.borrow_mut().push(video.to_path_buf());
        Ok(self.durations.get(video).copied())
    }

    fn extract_frame(
        &self,
        video: &Path,
        timestamp: Duration,
        output: &Path,
    ) -> Result<(), AppError> {
        self.extracted
            .borrow_mut()
            .push((video.to_path_buf(), timestamp));
        fs::write(output, b"png")?;
        Ok(())
    }
}

/// Remembers every image it was asked to apply.
#[derive(Default)]
pub struct RecordingSetter {
    pub applied: RefCell<Vec<PathBuf>>,
}

impl WallpaperSetter for RecordingSetter {
    fn apply(&self, image: &Path) -> Result<(), AppError> {
        self.applied.borrow_mut().push(image.to_path_buf());
        Ok(())
    }
}
