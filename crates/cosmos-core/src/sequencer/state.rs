use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::navigation::Route;
use crate::scale::Scale;

/// States of a meditation run, in the only order they can occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    Earth,
    Solar,
    Galaxy,
    Universe,
    Reflecting,
    Completed,
}

impl RunState {
    pub fn from_scale(scale: Scale) -> Self {
        match scale {
            Scale::Earth => RunState::Earth,
            Scale::Solar => RunState::Solar,
            Scale::Galaxy => RunState::Galaxy,
            Scale::Universe => RunState::Universe,
        }
    }

    /// The scale shown in this state, if the state is a scale.
    pub fn scale(self) -> Option<Scale> {
        match self {
            RunState::Earth => Some(Scale::Earth),
            RunState::Solar => Some(Scale::Solar),
            RunState::Galaxy => Some(Scale::Galaxy),
            RunState::Universe => Some(Scale::Universe),
            RunState::Reflecting | RunState::Completed => None,
        }
    }

    /// The manual music toggle is offered from Earth through Reflecting.
    pub fn allows_audio_toggle(self) -> bool {
        self != RunState::Completed
    }
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RunState::Earth => "earth",
            RunState::Solar => "solar",
            RunState::Galaxy => "galaxy",
            RunState::Universe => "universe",
            RunState::Reflecting => "reflecting",
            RunState::Completed => "completed",
        };
        f.write_str(name)
    }
}

/// Notifications emitted by the sequencer for renderers and the router.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum SequencerEvent {
    StateEntered(RunState),
    /// The session's scale changed; scene and guide must follow.
    ScaleChanged(Scale),
    /// A closing message became current.
    FinalMessage(usize),
    AudioFadeStarted,
    AudioReleased,
    SessionReset,
    Navigate(Route),
}

/// Pending work of the sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SequencerTimer {
    /// End of the current scale's dwell.
    Advance,
    /// Next step of the closing message carousel.
    FinalMessage,
    BeginFadeOut,
    FinishRun,
}

/// Point-in-time summary of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSnapshot {
    pub state: RunState,
    pub final_message_index: Option<usize>,
    /// When the next scheduled step fires.
    pub next_transition: Option<Duration>,
    pub audio_available: bool,
    pub is_playing: bool,
    pub finished: bool,
}
