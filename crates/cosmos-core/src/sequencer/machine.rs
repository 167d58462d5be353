use std::time::Duration;

use uuid::Uuid;

use super::state::{RunSnapshot, RunState, SequencerEvent, SequencerTimer};
use crate::audio::{AudioAsset, AudioBackend, AudioHandle, PlaybackEvent};
use crate::navigation::Route;
use crate::reflection::FINAL_MESSAGES;
use crate::scale::Scale;
use crate::session::Session;
use crate::timer::{FiredTimer, TimerId, TimerQueue};
use crate::timing::{
    AUDIO_FADE_UNITS, COMPLETION_PAUSE_UNITS, FINAL_MESSAGE_UNITS, stage_duration, units,
};

/// Drives one meditation run from Earth to Completed.
///
/// The sequencer is a plain state machine: it never sleeps and never reads
/// the time on its own. The caller passes the current time to [`start`] and
/// [`poll`], and every due step is applied in schedule order, so a coarse or
/// late poll yields exactly the same transitions as a punctual one.
///
/// A run owns its timers and its audio handle. [`unmount`] (or dropping the
/// sequencer) cancels the former and releases the latter, so nothing from a
/// finished run can act on a later one.
///
/// [`start`]: Sequencer::start
/// [`poll`]: Sequencer::poll
/// [`unmount`]: Sequencer::unmount
pub struct Sequencer {
    run_id: Uuid,
    span: tracing::Span,
    state: RunState,
    timers: TimerQueue<SequencerTimer>,
    /// The single armed one-shot step (dwell, pause or fade).
    chain: Option<TimerId>,
    carousel: Option<TimerId>,
    final_message_index: Option<usize>,
    audio: Option<AudioHandle>,
    started: bool,
    finished: bool,
}

impl Sequencer {
    pub fn new() -> Self {
        let run_id = Uuid::new_v4();
        Self {
            run_id,
            span: tracing::info_span!("run", run_id = %run_id),
            state: RunState::Earth,
            timers: TimerQueue::new(),
            chain: None,
            carousel: None,
            final_message_index: None,
            audio: None,
            started: false,
            finished: false,
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Enters Earth, acquires the audio and starts playback.
    ///
    /// Audio failures are logged and otherwise ignored: the run continues
    /// silently. Calling `start` twice does nothing the second time.
    pub fn start(
        &mut self,
        now: Duration,
        session: &mut Session,
        backend: &dyn AudioBackend,
        asset: &AudioAsset,
    ) -> Vec<SequencerEvent> {
        let span = self.span.clone();
        let _entered = span.enter();

        if self.started {
            tracing::warn!("[Sequencer] start called on a run that already started");
            return Vec::new();
        }
        self.started = true;

        self.state = RunState::Earth;
        session.set_scale(Scale::Earth);
        tracing::info!("[Sequencer] Run started");

        self.audio = match AudioHandle::acquire(backend, asset) {
            Ok(mut handle) => {
                if let Err(e) = handle.play() {
                    tracing::warn!("[Sequencer] Audio playback failed, continuing silently: {}", e);
                }
                Some(handle)
            }
            Err(e) => {
                tracing::warn!("[Sequencer] Audio unavailable, continuing silently: {}", e);
                None
            }
        };

        self.arm_chain(now + stage_duration(Scale::Earth), SequencerTimer::Advance);

        vec![
            SequencerEvent::StateEntered(RunState::Earth),
            SequencerEvent::ScaleChanged(Scale::Earth),
        ]
    }

    /// Applies every step due at or before `now`.
    pub fn poll(&mut self, now: Duration, session: &mut Session) -> Vec<SequencerEvent> {
        let mut events = Vec::new();
        if !self.started || self.finished {
            return events;
        }

        let span = self.span.clone();
        let _entered = span.enter();

        if let Some(audio) = self.audio.as_mut() {
            audio.sync();
        }

        while let Some(fired) = self.timers.pop_due(now) {
            self.fire(fired, session, &mut events);
        }
        events
    }

    /// Pauses or resumes the music and returns whether it is now playing.
    ///
    /// Without audio, or once the run is completed, this is a no-op.
    pub fn toggle_audio(&mut self) -> bool {
        if !self.started || self.finished || !self.state.allows_audio_toggle() {
            return self.is_playing();
        }
        match self.audio.as_mut() {
            Some(audio) => match audio.toggle() {
                Ok(playing) => {
                    tracing::debug!("[Sequencer] Music toggled, playing={}", playing);
                    playing
                }
                Err(e) => {
                    tracing::warn!("[Sequencer] Music toggle failed: {}", e);
                    audio.is_playing()
                }
            },
            None => {
                tracing::debug!("[Sequencer] Music toggle ignored, no audio available");
                false
            }
        }
    }

    /// Records a state change reported by the audio player.
    pub fn observe_playback(&mut self, event: PlaybackEvent) {
        if let Some(audio) = self.audio.as_mut() {
            audio.observe(event);
        }
    }

    /// Tears the run down early: cancels every timer and releases the audio.
    ///
    /// The session is left as is. Returns `false` if the run was already over.
    pub fn unmount(&mut self) -> bool {
        if self.finished {
            return false;
        }
        let span = self.span.clone();
        let _entered = span.enter();

        self.finished = true;
        self.cancel_timers();
        if let Some(audio) = self.audio.take() {
            audio.release();
        }
        tracing::info!("[Sequencer] Run unmounted in state {}", self.state);
        true
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn final_message_index(&self) -> Option<usize> {
        self.final_message_index
    }

    /// Due time of the next scheduled step.
    pub fn next_transition(&self) -> Option<Duration> {
        self.timers.next_due()
    }

    pub fn is_playing(&self) -> bool {
        self.audio.as_ref().is_some_and(AudioHandle::is_playing)
    }

    pub fn has_audio(&self) -> bool {
        self.audio.is_some()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// True once the run completed or was unmounted.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn snapshot(&self) -> RunSnapshot {
        RunSnapshot {
            state: self.state,
            final_message_index: self.final_message_index,
            next_transition: self.next_transition(),
            audio_available: self.has_audio(),
            is_playing: self.is_playing(),
            finished: self.finished,
        }
    }

    // ============================================================================
    // Transitions
    // ============================================================================

    fn fire(
        &mut self,
        fired: FiredTimer<SequencerTimer>,
        session: &mut Session,
        events: &mut Vec<SequencerEvent>,
    ) {
        match fired.payload {
            SequencerTimer::Advance => self.advance(fired.due, session, events),
            SequencerTimer::FinalMessage => self.next_final_message(fired.due, events),
            SequencerTimer::BeginFadeOut => self.begin_fade_out(fired.due, session, events),
            SequencerTimer::FinishRun => self.finish(session, events),
        }
    }

    fn advance(&mut self, due: Duration, session: &mut Session, events: &mut Vec<SequencerEvent>) {
        let Some(current) = self.state.scale() else {
            tracing::debug!("[Sequencer] Ignoring advance outside a scale ({})", self.state);
            return;
        };

        match current.next() {
            Some(next) => {
                self.state = RunState::from_scale(next);
                session.set_scale(next);
                tracing::info!("[Sequencer] {} -> {}", current, next);
                events.push(SequencerEvent::StateEntered(self.state));
                events.push(SequencerEvent::ScaleChanged(next));
                self.arm_chain(due + stage_duration(next), SequencerTimer::Advance);
            }
            None => {
                self.chain = None;
                self.state = RunState::Reflecting;
                self.final_message_index = Some(0);
                tracing::info!("[Sequencer] {} -> reflecting", current);
                events.push(SequencerEvent::StateEntered(RunState::Reflecting));
                events.push(SequencerEvent::FinalMessage(0));

                let period = units(FINAL_MESSAGE_UNITS);
                self.carousel = Some(self.timers.schedule_repeating(
                    due + period,
                    period,
                    SequencerTimer::FinalMessage,
                ));
            }
        }
    }

    fn next_final_message(&mut self, due: Duration, events: &mut Vec<SequencerEvent>) {
        let index = self.final_message_index.unwrap_or(0);
        if index + 1 < FINAL_MESSAGES.len() {
            self.final_message_index = Some(index + 1);
            events.push(SequencerEvent::FinalMessage(index + 1));
            return;
        }

        // The last message has had its full dwell.
        if let Some(carousel) = self.carousel.take() {
            self.timers.cancel(carousel);
        }
        self.state = RunState::Completed;
        tracing::info!("[Sequencer] reflecting -> completed");
        events.push(SequencerEvent::StateEntered(RunState::Completed));
        self.arm_chain(
            due + units(COMPLETION_PAUSE_UNITS),
            SequencerTimer::BeginFadeOut,
        );
    }

    fn begin_fade_out(
        &mut self,
        due: Duration,
        session: &mut Session,
        events: &mut Vec<SequencerEvent>,
    ) {
        match self.audio.as_mut() {
            Some(audio) => {
                let fade = units(AUDIO_FADE_UNITS);
                audio.fade_out(fade);
                events.push(SequencerEvent::AudioFadeStarted);
                self.arm_chain(due + fade, SequencerTimer::FinishRun);
            }
            None => self.finish(session, events),
        }
    }

    fn finish(&mut self, session: &mut Session, events: &mut Vec<SequencerEvent>) {
        self.cancel_timers();
        if let Some(audio) = self.audio.take() {
            audio.release();
            events.push(SequencerEvent::AudioReleased);
        }

        session.reset();
        events.push(SequencerEvent::SessionReset);
        events.push(SequencerEvent::Navigate(Route::Entry));

        self.finished = true;
        tracing::info!("[Sequencer] Run finished, returning to {}", Route::Entry);
    }

    /// Schedules the next one-shot step, replacing the armed one.
    fn arm_chain(&mut self, at: Duration, timer: SequencerTimer) {
        if let Some(previous) = self.chain.take() {
            self.timers.cancel(previous);
        }
        self.chain = Some(self.timers.schedule_once(at, timer));
    }

    fn cancel_timers(&mut self) {
        self.timers.cancel_all();
        self.chain = None;
        self.carousel = None;
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Sequencer {
    fn drop(&mut self) {
        if self.started {
            self.unmount();
        }
    }
}

impl std::fmt::Debug for Sequencer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sequencer")
            .field("run_id", &self.run_id)
            .field("state", &self.state)
            .field("final_message_index", &self.final_message_index)
            .field("pending_timers", &self.timers.len())
            .field("audio", &self.audio)
            .field("finished", &self.finished)
            .finish()
    }
}
