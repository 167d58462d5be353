use std::time::Duration;

use cosmos_application::{MeditationView, MusicIndicator, Panel, ScaleReflection};
use cosmos_core::guide::GuideView;
use cosmos_core::guide::script::WORRY_BANNER_TITLE;
use cosmos_core::reflection::{COMPLETION_NOTE, ReflectionView};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Points};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::entry::centered;
use super::starfield::{ScreenPoint, Starfield};

const KEY_HINT: &str = "m music · c camera · +/- zoom · q leave";

pub fn render(
    f: &mut Frame,
    area: Rect,
    view: &MeditationView<'_>,
    starfield: &Starfield,
    elapsed: Duration,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(8),
            Constraint::Length(7),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(f, chunks[0], view);
    render_scene(f, chunks[1], view, starfield, elapsed);
    match &view.panel {
        Panel::Guide(guide) => render_guide(f, chunks[2], guide, view.scale_reflection),
        Panel::Reflection(reflection) => {
            render_reflection(f, chunks[2], reflection, view.scale_reflection)
        }
    }
    render_footer(f, chunks[3], view.music, view.scene.user_control);
}

fn render_header(f: &mut Frame, area: Rect, view: &MeditationView<'_>) {
    let label = view.scene.scale.label();
    let header = Line::from(vec![
        Span::styled(
            label,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("   distance {:.0}", view.camera_distance),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    f.render_widget(Paragraph::new(header).alignment(Alignment::Center), area);
}

fn render_scene(
    f: &mut Frame,
    area: Rect,
    view: &MeditationView<'_>,
    starfield: &Starfield,
    elapsed: Duration,
) {
    let points = starfield.project(&view.scene, view.camera, elapsed);
    let mut by_color: Vec<(Color, Vec<(f64, f64)>)> = Vec::new();
    for ScreenPoint { x, y, color } in points {
        match by_color.iter_mut().find(|(c, _)| *c == color) {
            Some((_, coords)) => coords.push((x, y)),
            None => by_color.push((color, vec![(x, y)])),
        }
    }

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-1.0, 1.0])
        .y_bounds([-1.0, 1.0])
        .paint(|ctx| {
            for (color, coords) in &by_color {
                ctx.draw(&Points {
                    coords,
                    color: *color,
                });
            }
        });
    f.render_widget(canvas, area);
}

fn reflection_line(reflection: ScaleReflection) -> Line<'static> {
    Line::from(Span::styled(
        reflection.text,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::ITALIC),
    ))
}

fn render_guide(
    f: &mut Frame,
    area: Rect,
    guide: &GuideView<'_>,
    previous: Option<ScaleReflection>,
) {
    let mut lines = Vec::new();
    if let Some(reflection) = previous {
        lines.push(reflection_line(reflection));
        lines.push(Line::default());
    }
    if let Some(worry) = guide.worry_banner {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{}: ", WORRY_BANNER_TITLE),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(worry, Style::default().fg(Color::Yellow)),
        ]));
        lines.push(Line::default());
    }
    lines.push(Line::from(Span::styled(
        guide.line,
        Style::default().fg(Color::White),
    )));

    let title = format!(" {} · {}/{} ", guide.label, guide.line_index + 1, guide.line_count);
    let panel = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(title),
        );
    f.render_widget(panel, centered(area, 80));
}

fn render_reflection(
    f: &mut Frame,
    area: Rect,
    reflection: &ReflectionView,
    previous: Option<ScaleReflection>,
) {
    let mut lines = Vec::new();
    if let Some(previous) = previous {
        lines.push(reflection_line(previous));
    }
    if let Some(recall) = &reflection.worry_recall {
        lines.push(Line::from(Span::styled(
            recall.as_str(),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::from(Span::styled(
        reflection.message,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )));

    let dots: Vec<Span> = reflection
        .progress()
        .into_iter()
        .map(|reached| {
            if reached {
                Span::styled("● ", Style::default().fg(Color::Yellow))
            } else {
                Span::styled("○ ", Style::default().fg(Color::DarkGray))
            }
        })
        .collect();
    lines.push(Line::default());
    lines.push(Line::from(dots));

    if reflection.completed {
        lines.push(Line::from(Span::styled(
            COMPLETION_NOTE,
            Style::default().fg(Color::Green),
        )));
    }

    let panel = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    f.render_widget(panel, centered(area, 80));
}

fn render_footer(f: &mut Frame, area: Rect, music: MusicIndicator, user_control: bool) {
    let music_label = match (music.available, music.playing) {
        (false, _) => Span::styled("♪ unavailable", Style::default().fg(Color::DarkGray)),
        (true, true) => Span::styled("♪ playing", Style::default().fg(Color::Green)),
        (true, false) => Span::styled("♪ paused", Style::default().fg(Color::Yellow)),
    };
    let camera_label = if user_control {
        Span::styled("  camera: manual", Style::default().fg(Color::Cyan))
    } else {
        Span::styled("  camera: auto", Style::default().fg(Color::DarkGray))
    };
    let footer = Line::from(vec![
        music_label,
        camera_label,
        Span::styled(format!("   {}", KEY_HINT), Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(Paragraph::new(footer).alignment(Alignment::Center), area);
}
