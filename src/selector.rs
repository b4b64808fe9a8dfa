// src/selector.rs

use crate::error::AppError;
use crate::frame_extractor::FrameSource;
use crate::ignore_list::IgnoreList;
use crate::ui::format_timestamp;
use rand::prelude::*;
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

/// Result of probing one candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProbeOutcome {
    Duration(Duration),
    Unreadable,
}

/// One pass through the retry loop. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionAttempt {
    pub path: PathBuf,
    pub outcome: ProbeOutcome,
}

/// A video whose duration could be read.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedVideo {
    pub path: PathBuf,
    pub duration: Duration,
}

/// The still image produced for this run.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub video: PathBuf,
    pub timestamp: Duration,
    pub duration: Duration,
    pub image: PathBuf,
}

/// Picks random candidates until one can be probed, then extracts a random
/// frame from it.
///
/// Rejected candidates are written to the ignore list and never drawn again
/// in the same run. At most `attempt_limit` candidates are probed.
pub struct Selector<'a, S: FrameSource + ?Sized> {
    source: &'a S,
    attempt_limit: usize,
}

impl<'a, S: FrameSource + ?Sized> Selector<'a, S> {
    pub fn new(source: &'a S, attempt_limit: usize) -> Self {
        Selector {
            source,
            attempt_limit,
        }
    }

    /// Probes a single candidate.
    pub fn attempt(&self, path: PathBuf) -> Result<SelectionAttempt, AppError> {
        let outcome = match self.source.probe_duration(&path)? {
            Some(duration) if !duration.is_zero() => ProbeOutcome::Duration(duration),
            _ => ProbeOutcome::Unreadable,
        };
        Ok(SelectionAttempt { path, outcome })
    }

    /// Runs the retry loop over `candidates`.
    ///
    /// # Errors
    ///
    /// * [`AppError::NoUsableVideo`] if the candidates run out.
    /// * [`AppError::AttemptsExhausted`] if the attempt limit is reached first.
    /// * [`AppError::IgnoreFileWrite`] if a rejected video cannot be recorded.
    /// * Any backend error from the [`FrameSource`]; those are not retried.
    pub fn select<R: Rng + ?Sized>(
        &self,
        candidates: Vec<PathBuf>,
        ignore: &mut IgnoreList,
        rng: &mut R,
    ) -> Result<SelectedVideo, AppError> {
        let mut remaining = candidates;

        for _ in 0..self.attempt_limit {
            if remaining.is_empty() {
                return Err(AppError::NoUsableVideo {
                    ignore_file: ignore.path().to_path_buf(),
                });
            }

            let index = rng.random_range(0..remaining.len());
            let path = remaining.swap_remove(index);
            log::info!("{}", path.display());

            let attempt = self.attempt(path)?;
            match attempt.outcome {
                ProbeOutcome::Duration(duration) => {
                    return Ok(SelectedVideo {
                        path: attempt.path,
                        duration,
                    });
                }
                ProbeOutcome::Unreadable => {
                    log::info!(
                        "Unreadable video duration :(    Logging above file to {}",
                        ignore.path().display()
                    );
                    ignore.append(&attempt.path)?;
                }
            }
        }

        Err(AppError::AttemptsExhausted(self.attempt_limit))
    }

    /// Extracts the frame at a random point of `selected` into `output`.
    /// This is attempted once; a failure here is an environment problem.
    pub fn extract<R: Rng + ?Sized>(
        &self,
        selected: SelectedVideo,
        output: &Path,
        rng: &mut R,
    ) -> Result<Artifact, AppError> {
        let timestamp = random_timestamp(rng, selected.duration);
        log::info!(
            "  Selected time {} ({}%)\n     from total {}",
            format_timestamp(timestamp),
            percent_of(timestamp, selected.duration),
            format_timestamp(selected.duration)
        );

        self.source.extract_frame(&selected.path, timestamp, output)?;

        Ok(Artifact {
            video: selected.path,
            timestamp,
            duration: selected.duration,
            image: output.to_path_buf(),
        })
    }

    /// [`Self::select`] followed by [`Self::extract`].
    pub fn run<R: Rng + ?Sized>(
        &self,
        candidates: Vec<PathBuf>,
        ignore: &mut IgnoreList,
        output: &Path,
        rng: &mut R,
    ) -> Result<Artifact, AppError> {
        let selected = self.select(candidates, ignore, rng)?;
        self.extract(selected, output, rng)
    }
}

/// Draws a timestamp uniformly from `[0, duration)`.
pub fn random_timestamp<R: Rng + ?Sized>(rng: &mut R, duration: Duration) -> Duration {
    let total = duration.as_secs_f64();
    if total <= 0.0 {
        return Duration::ZERO;
    }
    let secs = rng.random_range(0.0..total);
    // Float rounding must not land exactly on the end.
    Duration::from_secs_f64(secs).min(duration.saturating_sub(Duration::from_nanos(1)))
}

fn percent_of(part: Duration, whole: Duration) -> u32 {
    if whole.is_zero() {
        return 0;
    }
    (100.0 * part.as_secs_f64() / whole.as_secs_f64()) as u32
}
