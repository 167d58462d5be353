use std::sync::Arc;

use cosmos_application::{EntryUseCase, MeditationRun, Router};
use cosmos_core::audio::{AudioAsset, AudioBackend};
use cosmos_core::clock::Clock;
use cosmos_core::{CosmosError, Route, Session};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;

use super::entry::EntryScreen;
use super::meditation;
use super::starfield::Starfield;

/// Zoom step for `+` and `-`.
const ZOOM_STEP: f32 = 1.25;

/// The whole terminal application: one session, two screens.
pub struct App {
    session: Session,
    router: Router,
    entry: EntryScreen,
    run: Option<MeditationRun>,
    entry_usecase: EntryUseCase,
    backend: Arc<dyn AudioBackend>,
    asset: AudioAsset,
    clock: Arc<dyn Clock>,
    starfield: Starfield,
    should_quit: bool,
}

impl App {
    pub fn new(
        entry_usecase: EntryUseCase,
        backend: Arc<dyn AudioBackend>,
        asset: AudioAsset,
        clock: Arc<dyn Clock>,
        starfield: Starfield,
    ) -> Self {
        Self {
            session: Session::new(),
            router: Router::new(),
            entry: EntryScreen::new(),
            run: None,
            entry_usecase,
            backend,
            asset,
            clock,
            starfield,
            should_quit: false,
        }
    }

    pub fn route(&self) -> Route {
        self.router.current()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn run(&self) -> Option<&MeditationRun> {
        self.run.as_ref()
    }

    pub fn entry(&self) -> &EntryScreen {
        &self.entry
    }

    /// Marks the form as busy while the audio preloads.
    pub fn begin_submit(&mut self) {
        self.entry.set_preparing(true);
    }

    /// Submits `worry` and, if accepted, mounts a run.
    pub async fn submit_worry(&mut self, worry: &str) {
        match self.entry_usecase.submit(&mut self.session, worry).await {
            Ok(submission) => {
                self.entry.clear();
                self.run = Some(MeditationRun::mount(
                    self.clock.clone(),
                    &mut self.session,
                    self.backend.as_ref(),
                    &self.asset,
                ));
                self.router.navigate(submission.route);
            }
            Err(CosmosError::EmptyWorry) => {
                self.entry.set_preparing(false);
                self.entry.set_error("Please tell the cosmos what troubles you");
            }
            Err(e) => {
                self.entry.set_preparing(false);
                tracing::error!("[Entry] Submission failed: {}", e);
                self.entry.set_error(e.to_string());
            }
        }
    }

    /// Whether `key` submits the entry form.
    pub fn is_submit(&self, key: &KeyEvent) -> bool {
        self.route() == Route::Entry && key.code == KeyCode::Enter
    }

    /// Handles every key except entry submission.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.leave_run();
            self.should_quit = true;
            return;
        }

        match self.route() {
            Route::Entry => match key.code {
                KeyCode::Esc => self.should_quit = true,
                KeyCode::Backspace => self.entry.backspace(),
                KeyCode::Char(c) => self.entry.push(c),
                _ => {}
            },
            Route::Meditation => {
                let Some(run) = self.run.as_mut() else {
                    return;
                };
                match key.code {
                    KeyCode::Char('m') => {
                        run.toggle_music();
                    }
                    KeyCode::Char('c') => {
                        run.toggle_user_control();
                    }
                    KeyCode::Char('+') | KeyCode::Char('=') => run.zoom(ZOOM_STEP),
                    KeyCode::Char('-') => run.zoom(1.0 / ZOOM_STEP),
                    KeyCode::Char('q') | KeyCode::Esc => self.leave_run(),
                    _ => {}
                }
            }
        }
    }

    /// Advances the mounted run and follows its navigation.
    pub fn tick(&mut self) {
        let Some(run) = self.run.as_mut() else {
            return;
        };
        if let Some(route) = run.tick(&mut self.session).navigate {
            self.run = None;
            self.router.navigate(route);
        }
    }

    pub fn draw(&self, f: &mut Frame) {
        let area = f.size();
        match (self.route(), &self.run) {
            (Route::Meditation, Some(run)) => {
                let view = run.view(&self.session);
                meditation::render(f, area, &view, &self.starfield, run.now());
            }
            _ => self.entry.render(f, area),
        }
    }

    /// Unmounts the run, if any, and returns to the entry screen.
    fn leave_run(&mut self) {
        if let Some(mut run) = self.run.take() {
            run.unmount();
            tracing::info!("[App] Left run {} early", run.run_id());
        }
        self.router.navigate(Route::Entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmos_core::clock::ManualClock;
    use cosmos_core::sequencer::RunState;
    use cosmos_core::timing::units;
    use cosmos_infrastructure::{FileAudioPreloader, SilentAudioBackend};

    fn app(clock: &ManualClock) -> App {
        let asset = AudioAsset {
            path: "does/not/exist.mp3".into(),
            ..AudioAsset::default()
        };
        App::new(
            EntryUseCase::new(Arc::new(FileAudioPreloader::new()), asset.clone()),
            Arc::new(SilentAudioBackend::new()),
            asset,
            Arc::new(clock.clone()),
            Starfield::generate(1, 50),
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test]
    async fn test_submit_mounts_run() {
        let clock = ManualClock::new();
        let mut app = app(&clock);
        for c in "deadline stress".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        assert!(app.is_submit(&key(KeyCode::Enter)));

        let worry = app.entry().input().to_string();
        app.submit_worry(&worry).await;

        assert_eq!(app.route(), Route::Meditation);
        assert_eq!(app.session().worry(), "deadline stress");
        assert_eq!(app.run().map(MeditationRun::state), Some(RunState::Earth));
        assert_eq!(app.entry().input(), "");
    }

    #[tokio::test]
    async fn test_empty_submit_stays_on_entry() {
        let clock = ManualClock::new();
        let mut app = app(&clock);
        app.submit_worry("").await;

        assert_eq!(app.route(), Route::Entry);
        assert!(app.run().is_none());
        assert!(app.entry().error().is_some());
    }

    #[tokio::test]
    async fn test_leaving_returns_to_entry() {
        let clock = ManualClock::new();
        let mut app = app(&clock);
        app.submit_worry("exams").await;

        app.handle_key(key(KeyCode::Char('q')));
        assert_eq!(app.route(), Route::Entry);
        assert!(app.run().is_none());
        assert!(!app.should_quit());
    }

    #[tokio::test]
    async fn test_completed_run_navigates_home() {
        let clock = ManualClock::new();
        let mut app = app(&clock);
        app.submit_worry("exams").await;

        for second in 1..=95 {
            clock.set(units(second));
            app.tick();
        }
        assert_eq!(app.route(), Route::Entry);
        assert!(app.run().is_none());
        assert_eq!(app.session(), &Session::new());
    }

    #[tokio::test]
    async fn test_music_key_toggles() {
        let clock = ManualClock::new();
        let mut app = app(&clock);
        app.submit_worry("exams").await;

        let playing = |app: &App| app.run().map(|run| run.view(app.session()).music.playing);
        assert_eq!(playing(&app), Some(true));
        app.handle_key(key(KeyCode::Char('m')));
        assert_eq!(playing(&app), Some(false));
    }

    #[test]
    fn test_escape_quits_from_entry() {
        let clock = ManualClock::new();
        let mut app = app(&clock);
        app.handle_key(key(KeyCode::Esc));
        assert!(app.should_quit());
    }
}
