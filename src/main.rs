// src/main.rs

use clap::Parser;
use rand::prelude::*;
use std::env;
use std::process;

// Module declarations
mod cli;
mod config;
mod error;
mod file_utils;
mod frame_extractor;
mod ignore_list;
mod media_tool;
mod selector;
mod ui;
mod video_file;
mod wallpaper;

#[cfg(test)]
mod test_support;

// Crate imports for convenience
use crate::cli::Cli;
use crate::config::{AppConfig, ATTEMPT_LIMIT};
use crate::error::AppError;
use crate::file_utils::collect_videos;
use crate::frame_extractor::{FfmpegExtractor, FrameSource};
use crate::ignore_list::IgnoreList;
use crate::selector::{Artifact, Selector};
use crate::ui::{format_timestamp, pause_before_exit};
use crate::wallpaper::{setter_for, WallpaperSetter};

fn main() {
    dotenvy::dotenv().ok();
    let cli_args = Cli::parse();
    init_logger(cli_args.verbose);

    let pause_on_error = cli_args.pause_on_error;
    if let Err(err) = run_app(cli_args) {
        eprintln!("\nError: {}", err);
        if pause_on_error {
            pause_before_exit();
        }
        process::exit(1);
    }
}

fn init_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn run_app(cli_args: Cli) -> Result<(), AppError> {
    let work_dir = env::current_dir()?;
    let config = AppConfig::resolve(cli_args, &work_dir)?;

    let extractor = FfmpegExtractor::new(config.media_tool.clone(), config.probe_mode);
    let setter = setter_for(config.wallpaper_backend, config.wallpaper_command.as_deref());

    let seed = config.seed.unwrap_or_else(rand::random);
    log::debug!("Random seed: {}", seed);
    let mut rng = StdRng::seed_from_u64(seed);

    run_pipeline(&config, &extractor, setter.as_ref(), &mut rng)?;
    Ok(())
}

/// Catalog → ignore filtering → selection → extraction → wallpaper.
///
/// The wallpaper is only touched once extraction has produced an image.
/// A failure to apply it is logged, not returned.
fn run_pipeline<S, R>(
    config: &AppConfig,
    source: &S,
    setter: &dyn WallpaperSetter,
    rng: &mut R,
) -> Result<Artifact, AppError>
where
    S: FrameSource + ?Sized,
    R: Rng + ?Sized,
{
    let candidates = collect_videos(&config.video_path, config.search_depth)?;
    log::debug!(
        "Found {} video(s) in '{}'",
        candidates.len(),
        config.video_path.display()
    );

    let mut ignore = IgnoreList::load(&config.ignore_file)?;
    log::debug!(
        "Loaded {} ignored video(s) from '{}'",
        ignore.len(),
        ignore.path().display()
    );
    let candidates = ignore.filter_candidates(candidates);

    let artifact = Selector::new(source, ATTEMPT_LIMIT).run(
        candidates,
        &mut ignore,
        &config.artifact_path,
        rng,
    )?;

    match setter.apply(&artifact.image) {
        Ok(()) => log::info!(
            "Wallpaper set to {} at {}",
            artifact.video.display(),
            format_timestamp(artifact.timestamp)
        ),
        Err(e) => log::warn!("{}", e),
    }
    Ok(artifact)
}
