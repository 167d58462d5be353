use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::{RunState, Sequencer, SequencerEvent};
use crate::audio::{AudioAsset, AudioBackend, AudioPlayer, PlaybackEvent};
use crate::clock::{Clock, ManualClock};
use crate::error::{CosmosError, Result};
use crate::navigation::Route;
use crate::scale::Scale;
use crate::session::Session;
use crate::timing::{time_to_reflection, units};

// Mock audio engine shared between the backend and the test
#[derive(Default)]
struct PlayerLog {
    opened: usize,
    playing: bool,
    plays: usize,
    stops: usize,
    unloads: usize,
    fades: Vec<(f32, f32, Duration)>,
    pending: Vec<PlaybackEvent>,
}

struct MockPlayer(Arc<Mutex<PlayerLog>>);

impl AudioPlayer for MockPlayer {
    fn play(&mut self) -> Result<()> {
        let mut log = self.0.lock().unwrap();
        log.playing = true;
        log.plays += 1;
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.0.lock().unwrap().playing = false;
        Ok(())
    }

    fn stop(&mut self) {
        let mut log = self.0.lock().unwrap();
        log.playing = false;
        log.stops += 1;
    }

    fn is_playing(&self) -> bool {
        self.0.lock().unwrap().playing
    }

    fn volume(&self) -> f32 {
        0.6
    }

    fn fade(&mut self, from: f32, to: f32, over: Duration) {
        self.0.lock().unwrap().fades.push((from, to, over));
    }

    fn unload(&mut self) {
        self.0.lock().unwrap().unloads += 1;
    }

    fn take_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.0.lock().unwrap().pending)
    }
}

#[derive(Default, Clone)]
struct MockBackend {
    log: Arc<Mutex<PlayerLog>>,
}

impl AudioBackend for MockBackend {
    fn open(&self, _asset: &AudioAsset) -> Result<Box<dyn AudioPlayer>> {
        self.log.lock().unwrap().opened += 1;
        Ok(Box::new(MockPlayer(self.log.clone())))
    }
}

struct FailingBackend;

impl AudioBackend for FailingBackend {
    fn open(&self, asset: &AudioAsset) -> Result<Box<dyn AudioPlayer>> {
        Err(CosmosError::asset_not_found(asset.path.display().to_string()))
    }
}

struct Harness {
    clock: ManualClock,
    session: Session,
    sequencer: Sequencer,
    events: Vec<(Duration, SequencerEvent)>,
}

impl Harness {
    fn start(backend: &dyn AudioBackend) -> Self {
        let clock = ManualClock::new();
        let mut session = Session::new();
        session.set_worry("deadline stress");
        session.start();

        let mut sequencer = Sequencer::new();
        let events = sequencer
            .start(clock.now(), &mut session, backend, &AudioAsset::default())
            .into_iter()
            .map(|event| (Duration::ZERO, event))
            .collect();

        Self {
            clock,
            session,
            sequencer,
            events,
        }
    }

    /// Advances one unit at a time, recording events with their poll time.
    fn advance_units(&mut self, count: u64) {
        for _ in 0..count {
            self.clock.advance(units(1));
            let now = self.clock.now();
            for event in self.sequencer.poll(now, &mut self.session) {
                self.events.push((now, event));
            }
        }
    }

    fn states(&self) -> Vec<RunState> {
        self.events
            .iter()
            .filter_map(|(_, event)| match event {
                SequencerEvent::StateEntered(state) => Some(*state),
                _ => None,
            })
            .collect()
    }

    fn time_of(&self, wanted: &SequencerEvent) -> Option<Duration> {
        self.events
            .iter()
            .find(|(_, event)| event == wanted)
            .map(|(at, _)| *at)
    }

    fn count(&self, wanted: &SequencerEvent) -> usize {
        self.events.iter().filter(|(_, event)| event == wanted).count()
    }
}

#[test]
fn test_visits_every_state_once_in_order() {
    let backend = MockBackend::default();
    let mut harness = Harness::start(&backend);
    harness.advance_units(200);

    assert_eq!(
        harness.states(),
        vec![
            RunState::Earth,
            RunState::Solar,
            RunState::Galaxy,
            RunState::Universe,
            RunState::Reflecting,
            RunState::Completed,
        ]
    );
}

#[test]
fn test_scale_changes_follow_the_timing_table() {
    let backend = MockBackend::default();
    let mut harness = Harness::start(&backend);
    harness.advance_units(100);

    assert_eq!(
        harness.time_of(&SequencerEvent::ScaleChanged(Scale::Solar)),
        Some(units(16))
    );
    assert_eq!(
        harness.time_of(&SequencerEvent::ScaleChanged(Scale::Galaxy)),
        Some(units(32))
    );
    assert_eq!(
        harness.time_of(&SequencerEvent::ScaleChanged(Scale::Universe)),
        Some(units(52))
    );
    assert_eq!(
        harness.time_of(&SequencerEvent::StateEntered(RunState::Reflecting)),
        Some(time_to_reflection())
    );
    assert_eq!(time_to_reflection(), units(72));
}

#[test]
fn test_session_scale_tracks_the_run() {
    let backend = MockBackend::default();
    let mut harness = Harness::start(&backend);
    assert_eq!(harness.session.scale(), Scale::Earth);

    harness.advance_units(16);
    assert_eq!(harness.session.scale(), Scale::Solar);

    harness.advance_units(40);
    assert_eq!(harness.session.scale(), Scale::Universe);

    // Reflection happens outside the scale enumeration
    harness.advance_units(20);
    assert_eq!(harness.sequencer.state(), RunState::Reflecting);
    assert_eq!(harness.session.scale(), Scale::Universe);
}

#[test]
fn test_final_message_carousel() {
    let backend = MockBackend::default();
    let mut harness = Harness::start(&backend);
    harness.advance_units(100);

    for (index, at) in [72, 75, 78, 81, 84].into_iter().enumerate() {
        assert_eq!(
            harness.time_of(&SequencerEvent::FinalMessage(index)),
            Some(units(at))
        );
    }
    assert_eq!(harness.count(&SequencerEvent::FinalMessage(5)), 0);
    assert_eq!(
        harness.time_of(&SequencerEvent::StateEntered(RunState::Completed)),
        Some(units(87))
    );
}

#[test]
fn test_completion_fades_releases_resets_and_navigates_once() {
    let backend = MockBackend::default();
    let mut harness = Harness::start(&backend);
    harness.advance_units(200);

    assert_eq!(
        harness.time_of(&SequencerEvent::AudioFadeStarted),
        Some(units(90))
    );
    assert_eq!(harness.time_of(&SequencerEvent::AudioReleased), Some(units(92)));
    assert_eq!(harness.count(&SequencerEvent::SessionReset), 1);
    assert_eq!(harness.count(&SequencerEvent::Navigate(Route::Entry)), 1);
    assert_eq!(
        harness.count(&SequencerEvent::StateEntered(RunState::Completed)),
        1
    );

    assert_eq!(harness.session, Session::new());
    assert!(harness.sequencer.is_finished());
    assert_eq!(harness.sequencer.next_transition(), None);

    let log = backend.log.lock().unwrap();
    assert_eq!(log.fades, vec![(0.6, 0.0, units(2))]);
    assert_eq!(log.stops, 1);
    assert_eq!(log.unloads, 1);
}

#[test]
fn test_single_late_poll_matches_step_by_step() {
    let backend = MockBackend::default();
    let mut harness = Harness::start(&backend);

    harness.clock.advance(units(500));
    let events = harness
        .sequencer
        .poll(harness.clock.now(), &mut harness.session);

    let states: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            SequencerEvent::StateEntered(state) => Some(*state),
            _ => None,
        })
        .collect();
    assert_eq!(
        states,
        vec![
            RunState::Solar,
            RunState::Galaxy,
            RunState::Universe,
            RunState::Reflecting,
            RunState::Completed,
        ]
    );
    assert_eq!(events.last(), Some(&SequencerEvent::Navigate(Route::Entry)));
}

#[test]
fn test_unmount_during_galaxy_cancels_everything() {
    let backend = MockBackend::default();
    let mut harness = Harness::start(&backend);
    harness.advance_units(40);
    assert_eq!(harness.sequencer.state(), RunState::Galaxy);

    assert!(harness.sequencer.unmount());
    let recorded = harness.events.len();

    harness.advance_units(300);
    assert_eq!(harness.events.len(), recorded);
    assert_eq!(harness.sequencer.state(), RunState::Galaxy);
    assert_eq!(harness.sequencer.next_transition(), None);
    assert!(!harness.sequencer.unmount());

    let log = backend.log.lock().unwrap();
    assert_eq!(log.stops, 1);
    assert_eq!(log.unloads, 1);
}

#[test]
fn test_drop_releases_audio() {
    let backend = MockBackend::default();
    let harness = Harness::start(&backend);
    drop(harness);

    let log = backend.log.lock().unwrap();
    assert_eq!(log.unloads, 1);
    assert!(!log.playing);
}

#[test]
fn test_playback_starts_once_with_earth() {
    let backend = MockBackend::default();
    let mut harness = Harness::start(&backend);
    assert!(harness.sequencer.is_playing());

    harness.advance_units(60);
    let log = backend.log.lock().unwrap();
    assert_eq!(log.opened, 1);
    assert_eq!(log.plays, 1);
}

#[test]
fn test_toggle_twice_restores_playing() {
    let backend = MockBackend::default();
    let mut harness = Harness::start(&backend);
    let original = harness.sequencer.is_playing();

    harness.sequencer.toggle_audio();
    assert_ne!(harness.sequencer.is_playing(), original);
    harness.sequencer.toggle_audio();
    assert_eq!(harness.sequencer.is_playing(), original);
}

#[test]
fn test_toggle_without_audio_is_noop() {
    let mut harness = Harness::start(&FailingBackend);
    assert!(!harness.sequencer.has_audio());

    assert!(!harness.sequencer.toggle_audio());
    assert!(!harness.sequencer.toggle_audio());
}

#[test]
fn test_toggle_ignored_once_completed() {
    let backend = MockBackend::default();
    let mut harness = Harness::start(&backend);
    harness.advance_units(88);
    assert_eq!(harness.sequencer.state(), RunState::Completed);

    let before = harness.sequencer.is_playing();
    assert_eq!(harness.sequencer.toggle_audio(), before);
    assert_eq!(harness.sequencer.is_playing(), before);
}

#[test]
fn test_failed_audio_still_completes_without_fade() {
    let mut harness = Harness::start(&FailingBackend);
    harness.advance_units(200);

    assert_eq!(harness.states().len(), 6);
    assert_eq!(harness.count(&SequencerEvent::AudioFadeStarted), 0);
    assert_eq!(harness.count(&SequencerEvent::AudioReleased), 0);
    assert_eq!(
        harness.time_of(&SequencerEvent::Navigate(Route::Entry)),
        Some(units(90))
    );
    assert_eq!(harness.count(&SequencerEvent::SessionReset), 1);
}

#[test]
fn test_external_pause_is_observed() {
    let backend = MockBackend::default();
    let mut harness = Harness::start(&backend);

    {
        let mut log = backend.log.lock().unwrap();
        log.playing = false;
        log.pending.push(PlaybackEvent::Pause);
    }
    harness.advance_units(1);
    assert!(!harness.sequencer.is_playing());

    harness.sequencer.observe_playback(PlaybackEvent::Play);
    assert!(harness.sequencer.is_playing());
}

#[test]
fn test_start_twice_is_ignored() {
    let backend = MockBackend::default();
    let mut harness = Harness::start(&backend);
    let events = harness.sequencer.start(
        Duration::ZERO,
        &mut harness.session,
        &backend,
        &AudioAsset::default(),
    );
    assert!(events.is_empty());
    assert_eq!(backend.log.lock().unwrap().opened, 1);
}

#[test]
fn test_poll_before_start_does_nothing() {
    let mut sequencer = Sequencer::new();
    let mut session = Session::new();
    assert!(sequencer.poll(units(100), &mut session).is_empty());
    assert!(!sequencer.is_started());
}

#[test]
fn test_snapshot() {
    let backend = MockBackend::default();
    let mut harness = Harness::start(&backend);
    harness.advance_units(73);

    let snapshot = harness.sequencer.snapshot();
    assert_eq!(snapshot.state, RunState::Reflecting);
    assert_eq!(snapshot.final_message_index, Some(0));
    assert_eq!(snapshot.next_transition, Some(units(75)));
    assert!(snapshot.audio_available);
    assert!(snapshot.is_playing);
    assert!(!snapshot.finished);
}
