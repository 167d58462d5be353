//! The meditation screen: sequencer, guide and camera on one clock.

use std::sync::Arc;
use std::time::Duration;

use cosmos_core::audio::{AudioAsset, AudioBackend};
use cosmos_core::clock::Clock;
use cosmos_core::guide::{GuidePresenter, GuideView};
use cosmos_core::reflection::ReflectionView;
use cosmos_core::scene::{CameraRig, SceneDirective, Vec3};
use cosmos_core::sequencer::{RunState, Sequencer, SequencerEvent};
use cosmos_core::timing::{guide_line_duration, stage_start, time_to_reflection};
use cosmos_core::{Route, Scale, Session};
use uuid::Uuid;

/// What one `tick` produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub events: Vec<SequencerEvent>,
    /// Reflections of the scales whose guide sequence ended during this tick.
    pub reflections: Vec<ScaleReflection>,
    /// Set when the run asks to leave the meditation screen.
    pub navigate: Option<Route>,
}

/// A finished scale's reflection on the worry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleReflection {
    pub scale: Scale,
    pub text: &'static str,
}

/// A reflection kept on screen for one guide line after its scale ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HeldReflection {
    reflection: ScaleReflection,
    until: Duration,
}

/// State of the music toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MusicIndicator {
    pub available: bool,
    pub playing: bool,
    /// False once the run has completed.
    pub enabled: bool,
}

/// The overlay panel.
#[derive(Debug, Clone, PartialEq)]
pub enum Panel<'a> {
    Guide(GuideView<'a>),
    Reflection(ReflectionView),
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct MeditationView<'a> {
    pub state: RunState,
    pub scene: SceneDirective,
    pub camera: Vec3,
    pub camera_distance: f32,
    pub panel: Panel<'a>,
    /// The previous scale's reflection, shown at the start of the next stage.
    pub scale_reflection: Option<ScaleReflection>,
    pub music: MusicIndicator,
}

/// A mounted meditation screen.
///
/// Stage changes are forwarded to the guide and the camera at the moment
/// the stage began according to the timing table, not when the tick noticed
/// it, so a slow frame does not shift the guide lines. A scale's guide
/// sequence completes exactly when its stage ends, so its reflection is
/// carried over into the following stage for one guide line. Dropping the
/// run unmounts it.
pub struct MeditationRun {
    clock: Arc<dyn Clock>,
    started_at: Duration,
    sequencer: Sequencer,
    guide: GuidePresenter,
    camera: CameraRig,
    pending: Vec<SequencerEvent>,
    held: Option<HeldReflection>,
}

impl MeditationRun {
    /// Mounts the screen and starts the sequence at Earth.
    pub fn mount(
        clock: Arc<dyn Clock>,
        session: &mut Session,
        backend: &dyn AudioBackend,
        asset: &AudioAsset,
    ) -> Self {
        let now = clock.now();
        let mut sequencer = Sequencer::new();
        let pending = sequencer.start(now, session, backend, asset);

        Self {
            clock,
            started_at: now,
            sequencer,
            guide: GuidePresenter::new(Scale::Earth, now),
            camera: CameraRig::new(Scale::Earth),
            pending,
            held: None,
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.sequencer.run_id()
    }

    pub fn state(&self) -> RunState {
        self.sequencer.state()
    }

    pub fn is_finished(&self) -> bool {
        self.sequencer.is_finished()
    }

    pub fn now(&self) -> Duration {
        self.clock.now().saturating_sub(self.started_at)
    }

    /// Applies everything due and reports it.
    pub fn tick(&mut self, session: &mut Session) -> TickOutcome {
        let mut events = std::mem::take(&mut self.pending);
        events.extend(self.sequencer.poll(self.clock.now(), session));

        let mut navigate = None;
        let mut reflections = Vec::new();
        for event in &events {
            match event {
                SequencerEvent::ScaleChanged(scale) => {
                    let began = self.started_at + stage_start(*scale);
                    if *scale != self.guide.scale() {
                        reflections.extend(self.close_stage(began, session));
                    }
                    self.guide.set_scale(*scale, began);
                    self.camera.retarget(*scale, began);
                }
                SequencerEvent::StateEntered(RunState::Reflecting) => {
                    let began = self.started_at + time_to_reflection();
                    reflections.extend(self.close_stage(began, session));
                }
                SequencerEvent::Navigate(route) => navigate = Some(*route),
                _ => {}
            }
        }

        TickOutcome {
            events,
            reflections,
            navigate,
        }
    }

    /// Captures the current scale's reflection as its stage ends at `ended`.
    fn close_stage(&mut self, ended: Duration, session: &Session) -> Option<ScaleReflection> {
        let text = self.guide.view(ended, session.worry()).reflection?;
        let reflection = ScaleReflection {
            scale: self.guide.scale(),
            text,
        };
        tracing::debug!("[Scene] {} reflection shown", reflection.scale);
        self.held = Some(HeldReflection {
            reflection,
            until: ended + guide_line_duration(),
        });
        Some(reflection)
    }

    pub fn view<'a>(&self, session: &'a Session) -> MeditationView<'a> {
        let now = self.clock.now();
        let state = self.sequencer.state();

        let panel = match (state, self.sequencer.final_message_index()) {
            (RunState::Reflecting | RunState::Completed, Some(index)) => Panel::Reflection(
                ReflectionView::new(index, session.worry(), state == RunState::Completed),
            ),
            _ => Panel::Guide(self.guide.view(now, session.worry())),
        };
        let scale_reflection = self
            .held
            .filter(|held| now < held.until)
            .map(|held| held.reflection);

        MeditationView {
            state,
            scene: SceneDirective::for_scale(session.scale(), self.camera.user_control()),
            camera: self.camera.position(now),
            camera_distance: self.camera.distance(now),
            panel,
            scale_reflection,
            music: MusicIndicator {
                available: self.sequencer.has_audio(),
                playing: self.sequencer.is_playing(),
                enabled: state.allows_audio_toggle() && !self.sequencer.is_finished(),
            },
        }
    }

    /// Returns whether music is playing afterwards.
    pub fn toggle_music(&mut self) -> bool {
        self.sequencer.toggle_audio()
    }

    /// Returns whether the user now has control of the camera.
    pub fn toggle_user_control(&mut self) -> bool {
        let enabled = !self.camera.user_control();
        self.camera.set_user_control(enabled, self.clock.now());
        tracing::debug!("[Scene] User control {}", if enabled { "on" } else { "off" });
        enabled
    }

    /// Zooms the camera by `factor` while the user has control.
    pub fn zoom(&mut self, factor: f32) {
        self.camera.apply_zoom(factor);
    }

    pub fn is_animating(&self) -> bool {
        self.camera.is_animating(self.clock.now())
    }

    /// Leaves the screen before completion.
    pub fn unmount(&mut self) -> bool {
        self.held = None;
        self.sequencer.unmount()
    }

    /// The next moment something on screen changes without input.
    pub fn next_wake(&self) -> Option<Duration> {
        if !self.pending.is_empty() {
            return Some(self.clock.now());
        }
        let now = self.clock.now();
        let transition = self.sequencer.next_transition();
        let guide = match self.sequencer.state().scale() {
            Some(_) if !self.sequencer.is_finished() => self.guide.next_change(now),
            _ => None,
        };
        let reflection_ends = self
            .held
            .map(|held| held.until)
            .filter(|until| *until > now && !self.sequencer.is_finished());
        [transition, guide, reflection_ends].into_iter().flatten().min()
    }
}

impl std::fmt::Debug for MeditationRun {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeditationRun")
            .field("started_at", &self.started_at)
            .field("sequencer", &self.sequencer)
            .field("guide", &self.guide)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmos_core::clock::ManualClock;
    use cosmos_core::guide::script;
    use cosmos_core::reflection::COMPLETION_NOTE;
    use cosmos_core::scene::{Layer, camera_preset};
    use cosmos_core::timing::units;
    use cosmos_infrastructure::SilentAudioBackend;

    fn mounted(backend: &SilentAudioBackend) -> (MeditationRun, ManualClock, Session) {
        let clock = ManualClock::new();
        let mut session = Session::new();
        session.set_worry("deadline stress");
        session.start();
        let run = MeditationRun::mount(
            Arc::new(clock.clone()),
            &mut session,
            backend,
            &AudioAsset::default(),
        );
        (run, clock, session)
    }

    #[test]
    fn test_earth_view_shows_worry_verbatim() {
        let (mut run, _clock, mut session) = mounted(&SilentAudioBackend::new());
        let outcome = run.tick(&mut session);
        assert_eq!(
            outcome.events,
            vec![
                SequencerEvent::StateEntered(RunState::Earth),
                SequencerEvent::ScaleChanged(Scale::Earth),
            ]
        );

        let view = run.view(&session);
        let Panel::Guide(guide) = view.panel else {
            panic!("expected the guide panel");
        };
        assert_eq!(guide.worry_banner, Some("deadline stress"));
        assert_eq!(guide.line, script::guide_lines(Scale::Earth)[0]);
        assert!(view.music.available);
        assert!(view.music.playing);
    }

    #[test]
    fn test_guide_follows_stage_start_even_when_ticked_late() {
        let (mut run, clock, mut session) = mounted(&SilentAudioBackend::new());
        run.tick(&mut session);

        // Solar began at 16; tick two units late
        clock.set(units(18));
        run.tick(&mut session);
        clock.set(units(20));

        let Panel::Guide(guide) = run.view(&session).panel else {
            panic!("expected the guide panel");
        };
        assert_eq!(guide.scale, Scale::Solar);
        assert_eq!(guide.line_index, 1);
        assert_eq!(guide.worry_banner, None);
    }

    #[test]
    fn test_reflection_panel_after_universe() {
        let (mut run, clock, mut session) = mounted(&SilentAudioBackend::new());
        clock.set(units(72));
        run.tick(&mut session);

        let view = run.view(&session);
        assert_eq!(view.state, RunState::Reflecting);
        assert_eq!(view.scene.scale, Scale::Universe);
        let Panel::Reflection(reflection) = view.panel else {
            panic!("expected the reflection panel");
        };
        assert_eq!(reflection.index, 0);
        assert!(reflection.worry_recall.is_some());
        assert!(!reflection.completed);
    }

    #[test]
    fn test_completed_view_disables_music_toggle() {
        let (mut run, clock, mut session) = mounted(&SilentAudioBackend::new());
        clock.set(units(88));
        run.tick(&mut session);

        let view = run.view(&session);
        assert_eq!(view.state, RunState::Completed);
        assert!(!view.music.enabled);
        let Panel::Reflection(reflection) = view.panel else {
            panic!("expected the reflection panel");
        };
        assert!(reflection.completed);
        assert_eq!(reflection.index, 4);
        assert!(!COMPLETION_NOTE.is_empty());
    }

    #[test]
    fn test_run_navigates_to_entry_once() {
        let (mut run, clock, mut session) = mounted(&SilentAudioBackend::new());
        let mut navigations = Vec::new();
        for second in 0..=120 {
            clock.set(units(second));
            if let Some(route) = run.tick(&mut session).navigate {
                navigations.push((second, route));
            }
        }
        assert_eq!(navigations, vec![(92, Route::Entry)]);
        assert!(run.is_finished());
        assert_eq!(session, Session::new());
        assert_eq!(run.next_wake(), None);
    }

    #[test]
    fn test_camera_moves_toward_new_scale() {
        let (mut run, clock, mut session) = mounted(&SilentAudioBackend::new());
        clock.set(units(16));
        run.tick(&mut session);
        assert!(run.is_animating());

        clock.set(units(22));
        let view = run.view(&session);
        assert_eq!(view.camera, camera_preset(Scale::Solar));
        assert!(view.scene.layer(Layer::SolarSystem).visible);
    }

    #[test]
    fn test_user_control_and_zoom() {
        let (mut run, _clock, session) = mounted(&SilentAudioBackend::new());
        let before = run.view(&session).camera_distance;

        run.zoom(2.0);
        assert_eq!(run.view(&session).camera_distance, before);

        assert!(run.toggle_user_control());
        run.zoom(2.0);
        let zoomed = run.view(&session);
        assert!(zoomed.scene.user_control);
        assert!(zoomed.camera_distance < before);

        assert!(!run.toggle_user_control());
    }

    #[test]
    fn test_music_toggle_and_failed_audio() {
        let (mut run, _clock, _session) = mounted(&SilentAudioBackend::new());
        assert!(!run.toggle_music());
        assert!(run.toggle_music());

        let (mut silent_run, _clock, session) = mounted(&SilentAudioBackend::failing());
        assert!(!silent_run.toggle_music());
        assert!(!silent_run.view(&session).music.available);
    }

    #[test]
    fn test_unmount_stops_everything() {
        let (mut run, clock, mut session) = mounted(&SilentAudioBackend::new());
        clock.set(units(40));
        run.tick(&mut session);
        assert_eq!(run.state(), RunState::Galaxy);

        assert!(run.unmount());
        clock.set(units(200));
        let outcome = run.tick(&mut session);
        assert!(outcome.events.is_empty());
        assert_eq!(outcome.navigate, None);
        assert_eq!(run.next_wake(), None);
    }

    #[test]
    fn test_each_scale_reflection_carries_into_next_stage() {
        let (mut run, clock, mut session) = mounted(&SilentAudioBackend::new());
        run.tick(&mut session);

        let mut reflections = Vec::new();
        for second in 1..=72 {
            clock.set(units(second));
            for reflection in run.tick(&mut session).reflections {
                reflections.push((second, reflection.scale));
                assert_eq!(reflection.text, script::worry_reflection(reflection.scale));
            }
        }
        assert_eq!(
            reflections,
            vec![
                (16, Scale::Earth),
                (32, Scale::Solar),
                (52, Scale::Galaxy),
                (72, Scale::Universe),
            ]
        );

        let view = run.view(&session);
        assert!(matches!(view.panel, Panel::Reflection(_)));
        assert_eq!(
            view.scale_reflection.map(|r| r.scale),
            Some(Scale::Universe)
        );
        assert_eq!(run.next_wake(), Some(units(75)));

        clock.set(units(76));
        assert_eq!(run.view(&session).scale_reflection, None);
    }

    #[test]
    fn test_late_tick_reports_every_reflection() {
        let (mut run, clock, mut session) = mounted(&SilentAudioBackend::new());
        clock.set(units(40));
        let scales: Vec<Scale> = run
            .tick(&mut session)
            .reflections
            .iter()
            .map(|r| r.scale)
            .collect();
        assert_eq!(scales, vec![Scale::Earth, Scale::Solar]);

        // Held only for the first guide line of Galaxy
        assert_eq!(run.view(&session).scale_reflection, None);
    }

    #[test]
    fn test_no_reflection_without_worry() {
        let clock = ManualClock::new();
        let mut session = Session::new();
        session.start();
        let mut run = MeditationRun::mount(
            Arc::new(clock.clone()),
            &mut session,
            &SilentAudioBackend::new(),
            &AudioAsset::default(),
        );
        clock.set(units(16));
        let outcome = run.tick(&mut session);
        assert!(outcome.reflections.is_empty());
        assert_eq!(run.view(&session).scale_reflection, None);
    }

    #[test]
    fn test_next_wake_includes_guide_lines() {
        let (mut run, clock, mut session) = mounted(&SilentAudioBackend::new());
        assert_eq!(run.next_wake(), Some(units(0)));
        run.tick(&mut session);
        assert_eq!(run.next_wake(), Some(units(4)));

        clock.set(units(13));
        run.tick(&mut session);
        assert_eq!(run.next_wake(), Some(units(16)));
    }
}
