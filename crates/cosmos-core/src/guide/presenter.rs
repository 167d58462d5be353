//! Line-by-line presentation of the guide script.

use std::time::Duration;

use super::script;
use crate::scale::Scale;
use crate::timing::guide_line_duration;

/// What the guide panel shows at a given moment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuideView<'a> {
    pub scale: Scale,
    pub label: &'static str,
    pub line: &'static str,
    pub line_index: usize,
    pub line_count: usize,
    /// The worry, verbatim; only during the Earth scale.
    pub worry_banner: Option<&'a str>,
    /// The scale's reflection sentence once all its lines have been shown.
    pub reflection: Option<&'static str>,
}

/// Shows the lines of the current scale one at a time.
///
/// The presenter keeps its own time: every scale change restarts the line
/// sequence. It is aligned with the sequencer only through the shared
/// timing table, never by callbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuidePresenter {
    scale: Scale,
    stage_started: Duration,
}

impl GuidePresenter {
    pub fn new(scale: Scale, now: Duration) -> Self {
        Self {
            scale,
            stage_started: now,
        }
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    /// Switches to `scale` and restarts from its first line.
    pub fn set_scale(&mut self, scale: Scale, now: Duration) {
        self.scale = scale;
        self.stage_started = now;
    }

    /// Index of the line on screen at `now`.
    pub fn line_index(&self, now: Duration) -> usize {
        let last = script::line_count(self.scale).saturating_sub(1);
        self.ticks(now).min(last)
    }

    /// Whether every line has had its full display time.
    pub fn is_complete(&self, now: Duration) -> bool {
        self.ticks(now) >= script::line_count(self.scale)
    }

    /// Next moment the view changes, or `None` once the sequence is complete.
    pub fn next_change(&self, now: Duration) -> Option<Duration> {
        if self.is_complete(now) {
            return None;
        }
        let next_tick = self.ticks(now) as u32 + 1;
        Some(self.stage_started + guide_line_duration() * next_tick)
    }

    pub fn view<'a>(&self, now: Duration, worry: &'a str) -> GuideView<'a> {
        let lines = script::guide_lines(self.scale);
        let line_index = self.line_index(now);
        let has_worry = !worry.is_empty();

        GuideView {
            scale: self.scale,
            label: self.scale.label(),
            line: lines[line_index],
            line_index,
            line_count: lines.len(),
            worry_banner: (self.scale == Scale::Earth && has_worry).then_some(worry),
            reflection: (self.is_complete(now) && has_worry)
                .then(|| script::worry_reflection(self.scale)),
        }
    }

    fn ticks(&self, now: Duration) -> usize {
        let elapsed = now.saturating_sub(self.stage_started);
        (elapsed.as_millis() / guide_line_duration().as_millis()) as usize
    }
}
