use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::{Direction, GameState, Position};
use crate::input::pointer::{UNITS_PER_COLUMN, UNITS_PER_ROW};
use crate::input::{ControlLayout, Joystick};
use crate::metrics::GameMetrics;
use crate::session::SessionSummary;

const GRID_CELL_WIDTH: u16 = 2;
const SIDE_PANEL_WIDTH: u16 = 28;

/// Size of the joystick pad and the button cluster beside it
#[derive(Debug, Clone, Copy)]
struct PadMetrics {
    width: u16,
    height: u16,
    button_width: u16,
    gap: u16,
    /// First of the three button rows, counted from the top of the pad
    first_button_row: u16,
    glyphs: [&'static str; 4],
}

const WIDE_PAD: PadMetrics = PadMetrics {
    width: 11,
    height: 5,
    button_width: 5,
    gap: 4,
    first_button_row: 1,
    glyphs: ["[ ▲ ]", "[ ▼ ]", "[ ◀ ]", "[ ▶ ]"],
};

const COMPACT_PAD: PadMetrics = PadMetrics {
    width: 7,
    height: 3,
    button_width: 3,
    gap: 2,
    first_button_row: 0,
    glyphs: ["[▲]", "[▼]", "[◀]", "[▶]"],
};

/// Presentation-only signal derived from the terminal width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub compact: bool,
}

impl Viewport {
    pub fn from_width(width: u16, compact_width: u16) -> Self {
        Self {
            compact: width < compact_width,
        }
    }

    fn pad(&self) -> PadMetrics {
        if self.compact { COMPACT_PAD } else { WIDE_PAD }
    }
}

/// Everything a frame needs to draw
pub struct Scene<'a> {
    pub state: &'a GameState,
    pub high_score: u32,
    pub max_apples: u32,
    pub metrics: &'a GameMetrics,
    pub summary: Option<&'a SessionSummary>,
    pub joystick: &'a Joystick,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Draw one frame; returns where the pointer controls ended up, if shown
    pub fn render(&self, frame: &mut Frame, scene: &Scene, viewport: Viewport) -> Option<ControlLayout> {
        let show_pad = scene.state.is_running();
        let pad = viewport.pad();

        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(2), // Title
                Constraint::Length(3), // HUD
                Constraint::Min(0),    // Game area
                Constraint::Length(if show_pad { pad.height } else { 0 }),
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_title(scene), chunks[0]);
        frame.render_widget(self.render_hud(scene), chunks[1]);

        let (board_area, side_area) = if viewport.compact {
            (chunks[2], None)
        } else {
            let columns = Layout::default()
                .direction(LayoutDirection::Horizontal)
                .constraints([Constraint::Min(0), Constraint::Length(SIDE_PANEL_WIDTH)])
                .split(chunks[2]);
            (columns[0], Some(columns[1]))
        };

        let board = centered(board_area, self.board_width(scene.state), self.board_height(scene.state));

        if scene.state.game_started {
            frame.render_widget(self.render_grid(scene.state), board);

            if scene.state.game_over {
                let overlay = centered(board, 40, 10);
                frame.render_widget(Clear, overlay);
                frame.render_widget(self.render_game_over(scene), overlay);
            }
        } else {
            let card = centered(board_area, 40, 11);
            frame.render_widget(self.render_start_screen(scene), card);
        }

        if let Some(side) = side_area {
            let panels = Layout::default()
                .direction(LayoutDirection::Vertical)
                .constraints([Constraint::Length(7), Constraint::Min(0)])
                .split(side);
            frame.render_widget(self.render_stats(scene, viewport), panels[0]);
            frame.render_widget(self.render_legend(), panels[1]);
        }

        frame.render_widget(self.render_footer(scene, viewport), chunks[4]);

        if show_pad {
            Some(self.render_controls(frame, chunks[3], scene.joystick, pad))
        } else {
            None
        }
    }

    fn board_width(&self, state: &GameState) -> u16 {
        state.grid_size as u16 * GRID_CELL_WIDTH + 2
    }

    fn board_height(&self, state: &GameState) -> u16 {
        state.grid_size as u16 + 2
    }

    fn render_title(&self, scene: &Scene) -> Paragraph<'_> {
        let text = vec![
            Line::from(Span::styled(
                "SNAKE EVOLUTION",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!(
                    "Collect {} apples to complete your evolution!",
                    scene.max_apples
                ),
                Style::default().fg(Color::LightGreen),
            )),
        ];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_hud(&self, scene: &Scene) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(scene.state.score.to_string(), value),
            Span::raw("    "),
            Span::styled("High: ", label),
            Span::styled(scene.high_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Apples: ", label),
            Span::styled(
                format!("{}/{}", scene.state.apples_eaten, scene.max_apples),
                value,
            ),
        ])];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        )
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        let mut lines = Vec::new();

        for y in 0..state.grid_size {
            let mut spans = Vec::new();

            for x in 0..state.grid_size {
                let pos = Position::new(x as i32, y as i32);

                let cell = if pos == state.snake.head() {
                    // Snake head - distinct color
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::LightGreen)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if state.snake.occupies(pos) {
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else if pos == state.apple {
                    Span::styled(
                        "● ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::Green)),
        )
    }

    fn render_start_screen(&self, scene: &Scene) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Ready to Evolve?",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Use WASD to guide your snake and collect apples to grow!",
                Style::default().fg(Color::LightGreen),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "ENTER",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to start", Style::default().fg(Color::Gray)),
            ]),
            Line::from(Span::styled(
                format!("Best so far: {}", scene.high_score),
                Style::default().fg(Color::Yellow),
            )),
        ];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(ratatui::widgets::Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Green)),
            )
    }

    fn render_game_over(&self, scene: &Scene) -> Paragraph<'_> {
        let state = scene.state;
        let completed = state.outcome.is_some_and(|outcome| outcome.is_completed());
        let headline = state.outcome.map_or("GAME OVER", |outcome| outcome.headline());

        let mut text = vec![
            Line::from(Span::styled(
                headline,
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Apples Collected: ", Style::default().fg(Color::Yellow)),
                Span::styled(state.apples_eaten.to_string(), Style::default().fg(Color::White)),
            ]),
        ];

        if completed {
            text.push(Line::from(Span::styled(
                " SESSION COMPLETED! ",
                Style::default().fg(Color::White).bg(Color::Green),
            )));
        }

        if scene.summary.is_some_and(|summary| summary.new_high_score) {
            text.push(Line::from(Span::styled(
                "New high score!",
                Style::default().fg(Color::Yellow),
            )));
        }

        text.push(Line::from(""));
        text.push(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Gray)),
            Span::styled(
                "R",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to play again or ", Style::default().fg(Color::Gray)),
            Span::styled(
                "Q",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to quit", Style::default().fg(Color::Gray)),
        ]));

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_stats(&self, scene: &Scene, viewport: Viewport) -> Paragraph<'_> {
        let head = scene.state.snake.head();
        let label = Style::default().fg(Color::Gray);
        let value = Style::default().fg(Color::Green);

        let text = vec![
            Line::from(vec![
                Span::styled("TPS: ", label),
                Span::styled(scene.metrics.tick_rate.to_string(), value),
            ]),
            Line::from(vec![
                Span::styled("Pos: ", label),
                Span::styled(format!("{}, {}", head.x, head.y), value),
            ]),
            Line::from(vec![
                Span::styled("Time: ", label),
                Span::styled(scene.metrics.format_time(), value),
            ]),
            Line::from(vec![
                Span::styled("Games: ", label),
                Span::styled(scene.metrics.games_played.to_string(), value),
            ]),
            Line::from(vec![
                Span::styled("Layout: ", label),
                Span::styled(if viewport.compact { "compact" } else { "wide" }, value),
            ]),
        ];

        Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Stats "),
        )
    }

    fn render_legend(&self) -> Paragraph<'_> {
        let key = Style::default().fg(Color::Cyan);
        let text = vec![
            Line::from(vec![Span::styled("W/↑", key), Span::raw("  up")]),
            Line::from(vec![Span::styled("S/↓", key), Span::raw("  down")]),
            Line::from(vec![Span::styled("A/←", key), Span::raw("  left")]),
            Line::from(vec![Span::styled("D/→", key), Span::raw("  right")]),
            Line::from(vec![Span::styled("Mouse", key), Span::raw(" drag pad")]),
            Line::from(vec![Span::styled("Enter/R", key), Span::raw(" start")]),
            Line::from(vec![
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw("  quit"),
            ]),
        ];

        Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Controls "),
        )
    }

    fn render_footer(&self, scene: &Scene, viewport: Viewport) -> Paragraph<'_> {
        let line = if viewport.compact {
            let head = scene.state.snake.head();
            Line::from(vec![
                Span::styled(
                    format!("TPS {}  ", scene.metrics.tick_rate),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("({}, {})  ", head.x, head.y),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" quit"),
            ])
        } else {
            Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ])
        };

        Paragraph::new(vec![line]).alignment(Alignment::Center)
    }

    fn render_controls(
        &self,
        frame: &mut Frame,
        area: Rect,
        joystick: &Joystick,
        metrics: PadMetrics,
    ) -> ControlLayout {
        let total = metrics.width + metrics.gap + metrics.button_width * 3;
        let row = centered(area, total, metrics.height);

        let pad = Rect::new(row.x, row.y, metrics.width.min(row.width), row.height);
        let buttons_x = row.x + metrics.width + metrics.gap;

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Green))
            .title(" MOVE ");
        let inner = block.inner(pad);
        frame.render_widget(block, pad);

        // Knob offset is in pointer units; convert back to cells
        if inner.width > 0 && inner.height > 0 {
            let (kx, ky) = joystick.knob_offset();
            let center_x = inner.x as f32 + inner.width as f32 / 2.0;
            let center_y = inner.y as f32 + inner.height as f32 / 2.0;
            let knob_x = (center_x + kx / UNITS_PER_COLUMN)
                .clamp(inner.x as f32, (inner.right() - 1) as f32) as u16;
            let knob_y = (center_y + ky / UNITS_PER_ROW)
                .clamp(inner.y as f32, (inner.bottom() - 1) as f32) as u16;
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "●",
                    Style::default().fg(Color::LightGreen),
                )),
                Rect::new(knob_x, knob_y, 1, 1),
            );
        }

        let button = |col: u16, line: u16| {
            Rect::new(
                buttons_x + col * metrics.button_width,
                row.y + metrics.first_button_row + line,
                metrics.button_width,
                1,
            )
        };
        let buttons = [
            (Direction::Up, button(1, 0)),
            (Direction::Left, button(0, 1)),
            (Direction::Right, button(2, 1)),
            (Direction::Down, button(1, 2)),
        ];

        for (direction, rect) in buttons {
            let glyph = match direction {
                Direction::Up => metrics.glyphs[0],
                Direction::Down => metrics.glyphs[1],
                Direction::Left => metrics.glyphs[2],
                Direction::Right => metrics.glyphs[3],
            };
            let visible = rect.intersection(frame.area());
            if !visible.is_empty() {
                frame.render_widget(
                    Paragraph::new(Span::styled(glyph, Style::default().fg(Color::Red))),
                    visible,
                );
            }
        }

        ControlLayout { joystick: pad, buttons }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// A `width` x `height` rectangle centred in `area`, shrunk to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
