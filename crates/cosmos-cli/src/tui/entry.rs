use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

const TITLE: &str = "COSMOS · Cosmic Meditation Space";
const PROMPT: &str = "What troubles you most right now?";
const PLACEHOLDER: &str = "Type your worry...";
const SUBMIT_HINT: &str = "Enter: begin the journey   Esc: quit";
const PREPARING: &str = "Preparing...";

/// The worry form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryScreen {
    input: String,
    error: Option<String>,
    preparing: bool,
}

impl EntryScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn push(&mut self, c: char) {
        self.error = None;
        self.input.push(c);
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    pub fn set_preparing(&mut self, preparing: bool) {
        self.preparing = preparing;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Clears the form after a successful submission.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(30),
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(2),
                Constraint::Min(0),
            ])
            .split(area);
        let column = |rect: Rect| centered(rect, 60);

        let title = Paragraph::new(TITLE)
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        f.render_widget(title, chunks[1]);

        let prompt = Paragraph::new(PROMPT)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(prompt, chunks[2]);

        let text = if self.input.is_empty() {
            Line::from(Span::styled(
                PLACEHOLDER,
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            Line::from(vec![
                Span::raw(self.input.as_str()),
                Span::styled("▏", Style::default().fg(Color::Yellow)),
            ])
        };
        let input = Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );
        f.render_widget(input, column(chunks[3]));

        let footer = match (&self.error, self.preparing) {
            (_, true) => Span::styled(PREPARING, Style::default().fg(Color::Yellow)),
            (Some(error), false) => Span::styled(error.as_str(), Style::default().fg(Color::Red)),
            (None, false) => Span::styled(SUBMIT_HINT, Style::default().fg(Color::DarkGray)),
        };
        f.render_widget(
            Paragraph::new(Line::from(footer)).alignment(Alignment::Center),
            chunks[4],
        );
    }
}

/// A horizontally centered slice of `area`, `percent` wide.
pub fn centered(area: Rect, percent: u16) -> Rect {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent) / 2),
            Constraint::Percentage(percent),
            Constraint::Percentage((100 - percent) / 2),
        ])
        .split(area)[1]
}
