//! Status bar: bottom line with mode, pool summary and keybindings.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use wheel_proto::config::RemovalMode;

use crate::app_state::AppState;
use crate::theme::{C_MODE_INPUT, C_MODE_NORMAL, C_MUTED, C_PRIMARY, C_SECONDARY};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    Prompt,
}

impl InputMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "WHEEL",
            Self::Prompt => "INPUT",
        }
    }

    pub fn color(self) -> ratatui::style::Color {
        match self {
            Self::Normal => C_MODE_NORMAL,
            Self::Prompt => C_MODE_INPUT,
        }
    }
}

/// Draw the keybindings footer bar (one row).
pub fn draw_keys_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let mode = state.input_mode;
    let mut spans = vec![Span::styled(
        format!(" {} ", mode.label()),
        Style::default().fg(mode.color()).add_modifier(Modifier::BOLD),
    )];

    let removal = match state.removal {
        RemovalMode::Immediate => "",
        RemovalMode::Deferred => " · deferred",
    };
    spans.push(Span::styled(
        format!("{} left · {} drawn{} ", state.pool.len(), state.drawn.len(), removal),
        Style::default().fg(C_SECONDARY),
    ));

    match mode {
        InputMode::Prompt => {
            spans.push(Span::styled(
                " type · Enter submit · Esc cancel",
                Style::default().fg(C_MUTED),
            ));
        }
        InputMode::Normal => {
            // Spin hint lights up only when a spin would be accepted.
            let (spin_label, spin_style) = if state.awaiting_continue() {
                ("space continue", Style::default().fg(C_PRIMARY))
            } else if state.can_spin() {
                ("space spin", Style::default().fg(C_PRIMARY))
            } else {
                ("space spin", Style::default().fg(C_MUTED).add_modifier(Modifier::DIM))
            };
            spans.push(Span::raw(" "));
            spans.push(Span::styled(spin_label, spin_style));
            spans.push(Span::styled(
                "  a add  i import  d remove  R reset  Tab panes  ? help  q quit",
                Style::default().fg(C_MUTED),
            ));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
