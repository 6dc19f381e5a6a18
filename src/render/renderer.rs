use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::autoplay::Decision;
use crate::game::{Cell, GameEngine, Position, Status};
use crate::metrics::GameMetrics;

/// Autoplayer details for the header in watch mode
pub struct AutoplayHud<'a> {
    pub speed: &'a str,
    pub last_decision: Option<Decision>,
    pub fallbacks: u64,
}

/// Mode-specific decoration around the board
pub struct Hud<'a> {
    pub title: &'a str,
    pub paused: bool,
    pub autoplay: Option<AutoplayHud<'a>>,
    /// (key, action) pairs for the footer
    pub controls: &'a [(&'a str, &'a str)],
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, engine: &GameEngine, metrics: &GameMetrics, hud: &Hud) {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(engine, metrics, hud), chunks[0]);

        let board_area = Layout::default()
            .direction(LayoutDirection::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        match engine.status() {
            Status::Continue => {
                frame.render_widget(self.render_grid(board_area, engine, hud), board_area)
            }
            status => frame.render_widget(self.render_game_over(engine, status), board_area),
        }

        frame.render_widget(self.render_controls(hud), chunks[2]);
    }

    fn render_grid(&self, _area: Rect, engine: &GameEngine, hud: &Hud) -> Paragraph<'_> {
        let size = engine.board_size() as i32;
        let lines: Vec<Line> = (0..size)
            .map(|row| {
                let spans: Vec<Span> = (0..size)
                    .map(|col| {
                        let (glyph, style) = cell_glyph(engine.cell(Position::new(row, col)));
                        Span::styled(glyph, style)
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        let title = if hud.paused {
            format!(" {} (paused) ", hud.title)
        } else {
            format!(" {} ", hud.title)
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, engine: &GameEngine, metrics: &GameMetrics, hud: &Hud) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let mut spans = vec![
            Span::styled("Score: ", label),
            Span::styled(engine.score().to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Steps: ", label),
            Span::styled(engine.steps().to_string(), value),
            Span::raw("    "),
            Span::styled("Left: ", label),
            Span::styled(engine.remaining_growth().to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
            Span::raw("    "),
            Span::styled("Wins: ", label),
            Span::styled(format!("{}/{}", metrics.wins, metrics.games_played), value),
        ];

        if let Some(autoplay) = &hud.autoplay {
            spans.push(Span::raw("    "));
            spans.push(Span::styled("Speed: ", label));
            spans.push(Span::styled(autoplay.speed.to_string(), value));
            if let Some(decision) = autoplay.last_decision {
                spans.push(Span::raw("    "));
                spans.push(decision_span(decision));
            }
            if autoplay.fallbacks > 0 {
                spans.push(Span::raw("    "));
                spans.push(Span::styled("Fallbacks: ", label));
                spans.push(Span::styled(
                    autoplay.fallbacks.to_string(),
                    Style::default().fg(Color::Red),
                ));
            }
        }

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }

    fn render_game_over(&self, engine: &GameEngine, status: Status) -> Paragraph<'_> {
        let (banner, color) = match status {
            Status::Win => ("BOARD FILLED", Color::Green),
            _ => ("GAME OVER", Color::Red),
        };

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                banner,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    engine.score().to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled("Steps: ", Style::default().fg(Color::Yellow)),
                Span::styled(engine.steps().to_string(), Style::default().fg(Color::White)),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
    }

    fn render_controls(&self, hud: &Hud) -> Paragraph<'_> {
        let mut spans = Vec::new();
        for (i, (key, action)) in hud.controls.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" | "));
            }
            spans.push(Span::styled(key.to_string(), Style::default().fg(Color::Cyan)));
            spans.push(Span::raw(format!(" {}", action)));
        }

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Two-column glyph for one square
fn cell_glyph(cell: Cell) -> (String, Style) {
    match cell {
        Cell::Head => (
            "■ ".to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Cell::Body(direction) => (
            format!("{} ", direction.arrow()),
            Style::default().fg(Color::Green),
        ),
        Cell::Apple => (
            "O ".to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Cell::Empty => (". ".to_string(), Style::default().fg(Color::DarkGray)),
    }
}

fn decision_span(decision: Decision) -> Span<'static> {
    match decision {
        Decision::Planned(direction) => Span::styled(
            format!("Move: {}", direction.arrow()),
            Style::default().fg(Color::Green),
        ),
        Decision::Fallback(direction) => Span::styled(
            format!("Fallback: {}", direction.arrow()),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Direction;

    #[test]
    fn test_body_glyph_shows_arrow() {
        let (glyph, _) = cell_glyph(Cell::Body(Direction::Left));
        assert_eq!(glyph, "← ");
        let (glyph, _) = cell_glyph(Cell::Empty);
        assert_eq!(glyph, ". ");
    }

    #[test]
    fn test_fallback_is_flagged() {
        let span = decision_span(Decision::Fallback(Direction::Up));
        assert_eq!(span.content, "Fallback: ↑");
        let span = decision_span(Decision::Planned(Direction::Down));
        assert_eq!(span.content, "Move: ↓");
    }
}
