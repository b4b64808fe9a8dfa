// src/ui.rs

use dialoguer::Input;
use std::time::Duration;

/// Formats a duration as `HH:MM:SS.fff`.
pub fn format_timestamp(duration: Duration) -> String {
    let total_millis = duration.as_millis();
    let hours = total_millis / 3_600_000;
    let minutes = (total_millis % 3_600_000) / 60_000;
    let seconds = (total_millis % 60_000) / 1000;
    let millis = total_millis % 1000;
    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
}

/// Keeps the console window open until the user presses Enter.
/// Used when the program was started by double-clicking it.
pub fn pause_before_exit() {
    if let Err(e) = Input::<String>::new()
        .with_prompt("Press Enter to close the console window...")
        .allow_empty(true)
        .interact()
    {
        log::debug!("Could not wait for Enter: {}", e);
    }
}
