//! Full-screen terminal front-end.

mod app;
mod entry;
mod meditation;
mod starfield;

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use futures::StreamExt;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::time::MissedTickBehavior;

pub use app::App;
pub use starfield::Starfield;

/// Raw mode and the alternate screen, restored on drop.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            tracing::warn!("[Tui] Failed to disable raw mode: {}", e);
        }
        if let Err(e) = execute!(self.terminal.backend_mut(), LeaveAlternateScreen) {
            tracing::warn!("[Tui] Failed to leave alternate screen: {}", e);
        }
        let _ = self.terminal.show_cursor();
    }
}

/// Runs the interactive loop until the user quits.
///
/// `initial_worry` skips the entry form.
pub async fn run(mut app: App, frame_rate: u32, initial_worry: Option<String>) -> Result<()> {
    let mut guard = TerminalGuard::enter()?;
    let frame = Duration::from_millis((1000 / u64::from(frame_rate.max(1))).max(1));

    if let Some(worry) = initial_worry {
        app.begin_submit();
        guard.terminal.draw(|f| app.draw(f))?;
        app.submit_worry(&worry).await;
    }

    let mut events = EventStream::new();
    let mut ticker = tokio::time::interval(frame);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        app.tick();
        guard.terminal.draw(|f| app.draw(f))?;

        tokio::select! {
            _ = ticker.tick() => {}
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    if app.is_submit(&key) {
                        app.begin_submit();
                        guard.terminal.draw(|f| app.draw(f))?;
                        let worry = app.entry().input().to_string();
                        app.submit_worry(&worry).await;
                    } else {
                        app.handle_key(key);
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    return Err(anyhow::Error::new(e).context("Failed to read terminal event"));
                }
                None => break,
            },
        }

        if app.should_quit() {
            break;
        }
    }

    tracing::info!("[Tui] Exiting");
    Ok(())
}
