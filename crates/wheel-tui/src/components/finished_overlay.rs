//! FinishedOverlay component: shown when a spin finds no names left.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::{
    action::{Action, ComponentId, PromptKind},
    app_state::AppState,
    component::Component,
    theme::{style_winner, C_MUTED, C_OVERLAY_BG, C_PANEL_BORDER_FOCUSED, C_PRIMARY, C_SECONDARY},
    widgets::centered_rect,
};

/// Most recent winners listed in the popup.
const RECENT: usize = 8;

pub struct FinishedOverlay;

impl FinishedOverlay {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FinishedOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for FinishedOverlay {
    fn id(&self) -> ComponentId {
        ComponentId::FinishedOverlay
    }

    /// Any key dismisses; a few also start the next round.
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release || !state.exhausted {
            return vec![];
        }
        let follow_up = match key.code {
            KeyCode::Char('a') => Some(Action::OpenPrompt(PromptKind::AddName)),
            KeyCode::Char('i') => Some(Action::OpenPrompt(PromptKind::ImportFile)),
            KeyCode::Char('R') => Some(Action::Reset),
            _ => None,
        };
        let mut actions = vec![Action::DismissOverlay];
        actions.extend(follow_up);
        actions
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        if !state.exhausted {
            return;
        }

        let title = if state.drawn.is_empty() {
            " the wheel is empty"
        } else {
            " all names drawn"
        };
        let mut lines = vec![
            Line::from(Span::styled(
                title,
                Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        if !state.drawn.is_empty() {
            lines.push(Line::from(Span::styled(
                format!(" {} drawn this session, latest first:", state.drawn.len()),
                Style::default().fg(C_SECONDARY),
            )));
            for (n, name) in state.drawn.iter().enumerate().rev().take(RECENT) {
                lines.push(Line::from(vec![
                    Span::styled(format!(" {:>3}. ", n + 1), Style::default().fg(C_MUTED)),
                    Span::styled(name.clone(), style_winner()),
                ]));
            }
            lines.push(Line::from(""));
        }

        lines.push(Line::from(Span::styled(
            " a add · i import · R reset · any other key closes",
            Style::default().fg(C_MUTED),
        )));

        let height = lines.len() as u16 + 2;
        let popup = centered_rect(50, height, area);
        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(C_PANEL_BORDER_FOCUSED))
                    .style(Style::default().bg(C_OVERLAY_BG)),
            ),
            popup,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyModifiers;
    use wheel_proto::config::Config;
    use wheel_proto::protocol::Surface;

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[test]
    fn test_hidden_until_exhausted() {
        let state = AppState::new(&Config::default());
        assert!(FinishedOverlay::new().handle_key(key('x'), &state).is_empty());
    }

    #[test]
    fn test_any_key_dismisses_and_some_follow_up() {
        let mut state = AppState::new(&Config::default());
        state.notify_pool_exhausted();
        let mut overlay = FinishedOverlay::new();

        let actions = overlay.handle_key(key('x'), &state);
        assert!(matches!(actions.as_slice(), [Action::DismissOverlay]));

        let actions = overlay.handle_key(key('i'), &state);
        assert!(matches!(
            actions.as_slice(),
            [Action::DismissOverlay, Action::OpenPrompt(PromptKind::ImportFile)]
        ));

        let actions = overlay.handle_key(key('R'), &state);
        assert!(matches!(actions.as_slice(), [Action::DismissOverlay, Action::Reset]));
    }
}
