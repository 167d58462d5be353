//! The reference schedule of a run.

use std::time::Duration;

use cosmos_core::audio::AudioAsset;
use cosmos_core::clock::{Clock, ManualClock};
use cosmos_core::sequencer::{Sequencer, SequencerEvent};
use cosmos_core::Session;
use cosmos_infrastructure::SilentAudioBackend;
use serde::Serialize;

/// A sequencer event and when it happened, relative to the run start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    #[serde(rename = "atMs", serialize_with = "as_millis")]
    pub at: Duration,
    pub event: SequencerEvent,
}

fn as_millis<S: serde::Serializer>(at: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(at.as_millis() as u64)
}

/// Simulates a full run on a manual clock with silent audio.
pub fn reference_timeline() -> Vec<TimelineEntry> {
    let clock = ManualClock::new();
    let mut session = Session::new();
    session.set_worry("reference");
    session.start();

    let mut sequencer = Sequencer::new();
    let mut timeline: Vec<TimelineEntry> = sequencer
        .start(
            clock.now(),
            &mut session,
            &SilentAudioBackend::new(),
            &AudioAsset::default(),
        )
        .into_iter()
        .map(|event| TimelineEntry {
            at: Duration::ZERO,
            event,
        })
        .collect();

    while let Some(due) = sequencer.next_transition() {
        clock.set(due);
        let at = clock.now();
        timeline.extend(
            sequencer
                .poll(at, &mut session)
                .into_iter()
                .map(|event| TimelineEntry { at, event }),
        );
    }
    timeline
}
