//! Timing table for a meditation run.
//!
//! Everything is expressed in time-units of one second. Stage dwell times are
//! not stored anywhere: they are computed from the number of guide lines of
//! the stage, so editing the guide script keeps visuals and text aligned.

use std::time::Duration;

use crate::guide::script;
use crate::scale::Scale;

/// Length of one time-unit in milliseconds.
pub const TIME_UNIT_MS: u64 = 1_000;

/// How long each guide line stays on screen.
pub const GUIDE_LINE_UNITS: u64 = 4;

/// How long each closing message stays on screen.
pub const FINAL_MESSAGE_UNITS: u64 = 3;

/// Pause between reaching `Completed` and starting the audio fade.
pub const COMPLETION_PAUSE_UNITS: u64 = 3;

/// Length of the closing audio fade.
pub const AUDIO_FADE_UNITS: u64 = 2;

/// Upper bound the entry screen waits for audio preloading.
pub const PRELOAD_TIMEOUT_UNITS: u64 = 3;

/// Length of a camera move between two scales.
pub const CAMERA_TRANSITION_UNITS: u64 = 5;

/// Converts a number of time-units into a duration.
pub const fn units(count: u64) -> Duration {
    Duration::from_millis(TIME_UNIT_MS * count)
}

/// Display time of a single guide line.
pub const fn guide_line_duration() -> Duration {
    units(GUIDE_LINE_UNITS)
}

/// Dwell time of a scale: one guide line duration per line of its script.
pub fn stage_duration(scale: Scale) -> Duration {
    guide_line_duration() * script::line_count(scale) as u32
}

/// Total time spent in the four scales before the reflection begins.
pub fn time_to_reflection() -> Duration {
    Scale::ALL.iter().map(|scale| stage_duration(*scale)).sum()
}

/// Offset from run start at which the given scale becomes active.
pub fn stage_start(scale: Scale) -> Duration {
    Scale::ALL
        .iter()
        .take_while(|candidate| **candidate != scale)
        .map(|candidate| stage_duration(*candidate))
        .sum()
}
