//! A narrated meditation without a screen.

use std::sync::Arc;

use cosmos_core::audio::{AudioAsset, AudioBackend};
use cosmos_core::reflection::COMPLETION_NOTE;
use cosmos_core::sequencer::RunState;
use cosmos_core::{Route, Scale, Session};

use crate::clock::TokioClock;
use crate::meditation_run::{MeditationRun, Panel};

/// One thing the headless player says.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Narration {
    /// A new scale began.
    Stage { scale: Scale, label: &'static str },
    /// The worry, shown during the Earth scale.
    WorryBanner(String),
    GuideLine {
        scale: Scale,
        index: usize,
        text: &'static str,
    },
    /// A finished scale's reflection on the worry.
    GuideReflection { scale: Scale, text: &'static str },
    ClosingMessage {
        index: usize,
        text: &'static str,
        worry_recall: Option<String>,
    },
    Completed(&'static str),
    /// Audio could not be started; the run continues silently.
    Silent,
}

/// Receives narration as it happens.
pub trait Narrator: Send {
    fn narrate(&mut self, narration: Narration);
}

impl Narrator for Vec<Narration> {
    fn narrate(&mut self, narration: Narration) {
        self.push(narration);
    }
}

/// Plays a whole run in real time, reporting what a viewer would see.
pub struct HeadlessPlayer {
    clock: TokioClock,
    backend: Arc<dyn AudioBackend>,
    asset: AudioAsset,
}

#[derive(Default)]
struct Seen {
    scale: Option<Scale>,
    line: Option<(Scale, usize)>,
    closing: Option<usize>,
    completed: bool,
}

impl HeadlessPlayer {
    pub fn new(clock: TokioClock, backend: Arc<dyn AudioBackend>, asset: AudioAsset) -> Self {
        Self {
            clock,
            backend,
            asset,
        }
    }

    /// Runs until the sequence navigates away and returns the target route.
    pub async fn play(&self, session: &mut Session, narrator: &mut dyn Narrator) -> Route {
        let mut run = MeditationRun::mount(
            Arc::new(self.clock),
            session,
            self.backend.as_ref(),
            &self.asset,
        );
        tracing::info!("[Headless] Playing run {}", run.run_id());
        if !run.view(session).music.available {
            narrator.narrate(Narration::Silent);
        }

        let mut seen = Seen::default();
        loop {
            let outcome = run.tick(session);
            if let Some(route) = outcome.navigate {
                return route;
            }
            if run.is_finished() {
                return Route::Entry;
            }

            for reflection in outcome.reflections {
                narrator.narrate(Narration::GuideReflection {
                    scale: reflection.scale,
                    text: reflection.text,
                });
            }
            Self::narrate_view(&run, session, &mut seen, narrator);

            match run.next_wake() {
                Some(at) => tokio::time::sleep_until(self.clock.instant_at(at)).await,
                None => return Route::Entry,
            }
        }
    }

    fn narrate_view(
        run: &MeditationRun,
        session: &Session,
        seen: &mut Seen,
        narrator: &mut dyn Narrator,
    ) {
        let view = run.view(session);
        match view.panel {
            Panel::Guide(guide) => {
                if seen.scale != Some(guide.scale) {
                    seen.scale = Some(guide.scale);
                    narrator.narrate(Narration::Stage {
                        scale: guide.scale,
                        label: guide.label,
                    });
                    if let Some(worry) = guide.worry_banner {
                        narrator.narrate(Narration::WorryBanner(worry.to_string()));
                    }
                }
                if seen.line != Some((guide.scale, guide.line_index)) {
                    seen.line = Some((guide.scale, guide.line_index));
                    narrator.narrate(Narration::GuideLine {
                        scale: guide.scale,
                        index: guide.line_index,
                        text: guide.line,
                    });
                }
            }
            Panel::Reflection(reflection) => {
                if seen.closing != Some(reflection.index) {
                    seen.closing = Some(reflection.index);
                    narrator.narrate(Narration::ClosingMessage {
                        index: reflection.index,
                        text: reflection.message,
                        worry_recall: reflection.worry_recall,
                    });
                }
                if view.state == RunState::Completed && !seen.completed {
                    seen.completed = true;
                    narrator.narrate(Narration::Completed(COMPLETION_NOTE));
                }
            }
        }
    }
}
