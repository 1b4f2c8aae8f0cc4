//! WheelPanel component: the wheel itself, drawn on a braille canvas, plus
//! the result banner underneath.
//!
//! Geometry follows the core: segment `i` covers `[i·seg, (i+1)·seg)` degrees
//! clockwise from the top, and the whole wheel is turned clockwise by the
//! current display angle. The pointer never moves.

use ratatui::crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Circle, Context, Line as CanvasLine},
        Paragraph,
    },
    Frame,
};
use wheel_proto::selection::{segment_angle, segment_center};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{
        segment_color, style_muted, style_secondary, style_winner, C_BADGE_READY,
        C_BADGE_SPINNING, C_BG, C_MUTED, C_PRIMARY, C_SECONDARY, C_WINNER,
    },
    widgets::{
        pane_chrome::{pane_chrome, Badge},
        truncate_to_width,
    },
};

const RADIUS: f64 = 0.88;
const LABEL_RADIUS: f64 = 0.6;
/// Degrees between fill spokes.
const FILL_STEP: f64 = 1.0;
/// Above this many segments labels would overlap; the list pane has them.
const MAX_LABELS: usize = 24;
const BANNER_HEIGHT: u16 = 3;

pub struct WheelPanel;

impl WheelPanel {
    pub fn new() -> Self {
        Self
    }

    fn badge(state: &AppState) -> Badge<'static> {
        if state.busy {
            Badge {
                text: "SPINNING",
                color: C_BADGE_SPINNING,
            }
        } else if state.awaiting_continue() {
            Badge {
                text: "WINNER",
                color: C_WINNER,
            }
        } else if state.pool.is_empty() {
            Badge {
                text: "EMPTY",
                color: C_MUTED,
            }
        } else {
            Badge {
                text: "READY",
                color: C_BADGE_READY,
            }
        }
    }

    fn draw_wheel(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        if area.width < 4 || area.height < 2 {
            return;
        }
        if state.pool.is_empty() {
            let msg = vec![
                Line::from(""),
                Line::from(Span::styled("the wheel is empty", style_secondary())),
                Line::from(Span::styled("a add a name · i import a file", style_muted())),
            ];
            frame.render_widget(Paragraph::new(msg).alignment(Alignment::Center), area);
            return;
        }

        let bounds = CanvasBounds::for_area(area);
        let rotation = state.display_angle();
        let pool = &state.pool;
        let highlight = state.highlight;

        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .background_color(C_BG)
            .x_bounds([-bounds.x, bounds.x])
            .y_bounds([-bounds.y, bounds.y])
            .paint(|ctx| {
                paint_segments(ctx, pool.len(), rotation, highlight);
                ctx.layer();
                paint_labels(ctx, pool, rotation, highlight, &bounds);
                // Pointer, just above the rim.
                ctx.print(
                    -bounds.cell_w / 2.0,
                    RADIUS + bounds.cell_h * 0.5,
                    Span::styled("▼", Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD)),
                );
            });
        frame.render_widget(canvas, area);
    }

    fn draw_banner(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let lines = if let Some(ref winner) = state.winner {
            let mut lines = vec![
                Line::from(Span::styled("★ winner ★", style_winner())),
                Line::from(Span::styled(
                    winner.clone(),
                    Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
                )),
            ];
            if state.awaiting_continue() {
                lines.push(Line::from(Span::styled("c or space to continue", style_muted())));
            }
            lines
        } else if state.busy {
            vec![
                Line::from(Span::styled("spinning…", Style::default().fg(C_BADGE_SPINNING))),
                Line::from(Span::styled(
                    state.name_under_pointer().unwrap_or("").to_string(),
                    style_secondary(),
                )),
            ]
        } else if state.pool.is_empty() {
            Vec::new()
        } else {
            vec![
                Line::from(""),
                Line::from(Span::styled("press space to spin", style_muted())),
            ]
        };
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
    }
}

impl Default for WheelPanel {
    fn default() -> Self {
        Self::new()
    }
}

/// Canvas extents chosen so the wheel stays round on ~1:2 terminal cells.
struct CanvasBounds {
    x: f64,
    y: f64,
    cell_w: f64,
    cell_h: f64,
}

impl CanvasBounds {
    fn for_area(area: Rect) -> Self {
        let w = f64::from(area.width.max(1));
        let h = f64::from(area.height.max(1));
        let aspect = w / (2.0 * h);
        let (x, y) = if aspect >= 1.0 {
            (aspect, 1.0)
        } else {
            (1.0, 1.0 / aspect)
        };
        Self {
            x,
            y,
            cell_w: 2.0 * x / w,
            cell_h: 2.0 * y / h,
        }
    }
}

/// Canvas point at `radius` along screen angle `deg` (clockwise from top).
fn polar(radius: f64, deg: f64) -> (f64, f64) {
    let rad = deg.to_radians();
    (radius * rad.sin(), radius * rad.cos())
}

fn paint_segments(ctx: &mut Context, len: usize, rotation: f64, highlight: Option<usize>) {
    let seg = segment_angle(len);
    for i in 0..len {
        let color = segment_color(i);
        let start = i as f64 * seg;
        let mut a = start;
        while a < start + seg {
            let (x, y) = polar(RADIUS, a + rotation);
            ctx.draw(&CanvasLine::new(0.0, 0.0, x, y, color));
            a += FILL_STEP;
        }
    }

    if len > 1 {
        for i in 0..len {
            let (x, y) = polar(RADIUS, i as f64 * seg + rotation);
            ctx.draw(&CanvasLine::new(0.0, 0.0, x, y, C_BG));
        }
    }

    if let Some(idx) = highlight {
        for edge in [idx as f64 * seg, (idx + 1) as f64 * seg] {
            let (x, y) = polar(RADIUS, edge + rotation);
            ctx.draw(&CanvasLine::new(0.0, 0.0, x, y, C_WINNER));
        }
    }

    ctx.draw(&Circle {
        x: 0.0,
        y: 0.0,
        radius: RADIUS,
        color: C_SECONDARY,
    });
}

fn paint_labels(
    ctx: &mut Context,
    pool: &[String],
    rotation: f64,
    highlight: Option<usize>,
    bounds: &CanvasBounds,
) {
    let seg = segment_angle(pool.len());
    // Columns available along the label radius.
    let max_cols = ((LABEL_RADIUS * 0.9) / bounds.cell_w).floor().max(3.0) as usize;

    for (i, label) in pool.iter().enumerate() {
        let is_highlight = highlight == Some(i);
        if pool.len() > MAX_LABELS && !is_highlight {
            continue;
        }
        let text = truncate_to_width(label, max_cols);
        let cols = unicode_width::UnicodeWidthStr::width(text.as_str()) as f64;
        let (x, y) = polar(LABEL_RADIUS, segment_center(i, seg) + rotation);
        let style = if is_highlight {
            style_winner()
        } else {
            Style::default().fg(Color::White)
        };
        ctx.print(x - cols * bounds.cell_w / 2.0, y, Span::styled(text, style));
    }
}

impl Component for WheelPanel {
    fn id(&self) -> ComponentId {
        ComponentId::Wheel
    }

    fn handle_key(&mut self, _key: KeyEvent, _state: &AppState) -> Vec<Action> {
        // Spin keys are global; nothing wheel-specific yet.
        Vec::new()
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => vec![Action::SpinOrContinue],
            _ => Vec::new(),
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let block = pane_chrome("wheel", Some('1'), focused, Some(Self::badge(state)), None);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(BANNER_HEIGHT)])
            .split(inner);

        self.draw_wheel(frame, rows[0], state);
        self.draw_banner(frame, rows[1], state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};
    use wheel_proto::config::Config;
    use wheel_proto::protocol::Surface;

    fn names(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    fn render(state: &AppState, w: u16, h: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(w, h)).unwrap();
        let mut panel = WheelPanel::new();
        terminal
            .draw(|f| panel.draw(f, f.area(), true, state))
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_bounds_keep_wheel_round() {
        let wide = CanvasBounds::for_area(Rect::new(0, 0, 80, 20));
        assert_eq!(wide.y, 1.0);
        assert!((wide.x - 2.0).abs() < 1e-9);
        let tall = CanvasBounds::for_area(Rect::new(0, 0, 20, 20));
        assert_eq!(tall.x, 1.0);
        assert!((tall.y - 2.0).abs() < 1e-9);
        // one cell is twice as tall as wide in canvas units
        assert!((wide.cell_h - 2.0 * wide.cell_w).abs() < 1e-9);
    }

    #[test]
    fn test_polar_is_clockwise_from_top() {
        let (x, y) = polar(1.0, 0.0);
        assert!(x.abs() < 1e-9 && (y - 1.0).abs() < 1e-9);
        let (x, y) = polar(1.0, 90.0);
        assert!((x - 1.0).abs() < 1e-9 && y.abs() < 1e-9);
    }

    #[test]
    fn test_empty_wheel_message() {
        let state = AppState::new(&Config::default());
        let screen = render(&state, 60, 20);
        assert!(screen.contains("the wheel is empty"));
        assert!(screen.contains("EMPTY"));
    }

    #[test]
    fn test_labels_pointer_and_winner_banner() {
        let mut state = AppState::new(&Config::default());
        state.render(&names(&["Ana", "Ben"]), None);
        let screen = render(&state, 60, 24);
        assert!(screen.contains("Ana"));
        assert!(screen.contains("Ben"));
        assert!(screen.contains("▼"));
        assert!(screen.contains("READY"));

        state.show_winner("Ana");
        let screen = render(&state, 60, 24);
        assert!(screen.contains("winner"));
    }

    #[test]
    fn test_spinning_badge() {
        let mut state = AppState::new(&Config::default());
        state.render(&names(&["Ana"]), None);
        state.set_busy_indicator(true);
        let screen = render(&state, 60, 24);
        assert!(screen.contains("SPINNING"));
        assert!(screen.contains("spinning…"));
    }
}
