//! Color palette and style constants for the wheel TUI.

use ratatui::style::{Color, Modifier, Style};

// ── Color palette ─────────────────────────────────────────────────────────────

pub const C_BG: Color = Color::Rgb(18, 18, 18);
pub const C_WINNER: Color = Color::Rgb(255, 210, 50);
pub const C_MUTED: Color = Color::Rgb(72, 72, 88);
pub const C_SECONDARY: Color = Color::Rgb(115, 115, 138);
pub const C_PRIMARY: Color = Color::Rgb(210, 210, 225);
pub const C_SELECTION_BG: Color = Color::Rgb(28, 28, 40);
pub const C_PANEL_BORDER: Color = Color::Rgb(40, 40, 52);
pub const C_PANEL_BORDER_FOCUSED: Color = Color::Rgb(120, 100, 200); // vibrant purple, clear focus indicator
pub const C_NUMBER_HINT: Color = Color::Rgb(90, 90, 115);
pub const C_OVERLAY_BG: Color = Color::Rgb(18, 18, 26);
pub const C_PROMPT_BG: Color = Color::Rgb(20, 20, 32);
pub const C_PROMPT_FG: Color = Color::Rgb(255, 200, 80);
pub const C_TOAST_INFO: Color = Color::Rgb(80, 160, 220);
pub const C_TOAST_SUCCESS: Color = Color::Rgb(80, 200, 120);
pub const C_TOAST_WARNING: Color = Color::Rgb(255, 184, 80);
pub const C_TOAST_ERROR: Color = Color::Rgb(255, 95, 95);
pub const C_BADGE_SPINNING: Color = Color::Rgb(255, 184, 80);
pub const C_BADGE_READY: Color = Color::Rgb(80, 200, 120);
pub const C_MODE_NORMAL: Color = Color::Rgb(115, 115, 138);
pub const C_MODE_INPUT: Color = Color::Rgb(255, 200, 80);

/// Segment fills, cycled by segment index.
pub const WHEEL_PALETTE: [Color; 9] = [
    Color::Rgb(0x5A, 0x00, 0x00),
    Color::Rgb(0x32, 0x00, 0x32),
    Color::Rgb(0x00, 0x4D, 0x00),
    Color::Rgb(0x80, 0x00, 0x00),
    Color::Rgb(0x4B, 0x00, 0x82),
    Color::Rgb(0x22, 0x00, 0x00),
    Color::Rgb(0x00, 0x33, 0x00),
    Color::Rgb(0x6A, 0x00, 0x6A),
    Color::Rgb(0x20, 0x00, 0x20),
];

pub fn segment_color(index: usize) -> Color {
    WHEEL_PALETTE[index % WHEEL_PALETTE.len()]
}

// ── Predefined styles ─────────────────────────────────────────────────────────

pub fn style_default() -> Style {
    Style::default().fg(C_PRIMARY)
}

pub fn style_secondary() -> Style {
    Style::default().fg(C_SECONDARY)
}

pub fn style_winner() -> Style {
    Style::default().fg(C_WINNER).add_modifier(Modifier::BOLD)
}

pub fn style_selected() -> Style {
    Style::default().bg(C_SELECTION_BG).fg(C_PRIMARY)
}

pub fn style_selected_focused() -> Style {
    Style::default()
        .bg(C_SELECTION_BG)
        .fg(C_PRIMARY)
        .add_modifier(Modifier::BOLD)
}

pub fn style_focused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER_FOCUSED)
}

pub fn style_unfocused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER)
}

pub fn style_muted() -> Style {
    Style::default().fg(C_MUTED)
}
