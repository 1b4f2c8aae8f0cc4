//! NameInput: wraps tui-input for the one-line add/import prompt.

use ratatui::crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

use crate::action::PromptKind;
use crate::theme::{C_MUTED, C_PROMPT_BG, C_PROMPT_FG};

#[derive(Debug, PartialEq)]
pub enum PromptAction {
    Submitted(PromptKind, String),
    Cancelled,
    None,
}

pub struct NameInput {
    input: Input,
    kind: Option<PromptKind>,
}

impl NameInput {
    pub fn new() -> Self {
        Self {
            input: Input::default(),
            kind: None,
        }
    }

    pub fn open(&mut self, kind: PromptKind) {
        self.input = Input::default();
        self.kind = Some(kind);
    }

    pub fn close(&mut self) {
        self.kind = None;
        self.input = Input::default();
    }

    pub fn is_active(&self) -> bool {
        self.kind.is_some()
    }

    pub fn text(&self) -> &str {
        self.input.value()
    }

    /// Handle a key event while the prompt is open.
    ///
    /// Enter submits the trimmed text (an empty prompt just cancels), Esc
    /// cancels. Everything else edits the line.
    pub fn handle_key(&mut self, key: KeyEvent) -> PromptAction {
        let Some(kind) = self.kind else {
            return PromptAction::None;
        };
        match key.code {
            KeyCode::Esc => {
                self.close();
                PromptAction::Cancelled
            }
            KeyCode::Enter => {
                let text = self.input.value().trim().to_string();
                self.close();
                if text.is_empty() {
                    PromptAction::Cancelled
                } else {
                    PromptAction::Submitted(kind, text)
                }
            }
            _ => {
                self.input.handle_event(&Event::Key(key));
                PromptAction::None
            }
        }
    }

    /// Render the prompt bar into `area`.
    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        let Some(kind) = self.kind else {
            return;
        };
        let (prefix, placeholder) = match kind {
            PromptKind::AddName => ("+ ", "name to add"),
            PromptKind::ImportFile => ("⇣ ", "path to a .txt or .csv file"),
        };
        let scroll = self
            .input
            .visual_scroll(area.width.saturating_sub(4) as usize);
        let value = self.text();
        let display = if value.is_empty() {
            Span::styled(format!("{}{}", prefix, placeholder), Style::default().fg(C_MUTED))
        } else {
            let visible: String = value.chars().skip(scroll).collect();
            Span::styled(format!("{}{}", prefix, visible), Style::default().fg(C_PROMPT_FG))
        };

        let paragraph =
            Paragraph::new(Line::from(vec![display])).style(Style::default().bg(C_PROMPT_BG));
        frame.render_widget(paragraph, area);

        let cursor_x = area.x + 2 + self.input.visual_cursor().saturating_sub(scroll) as u16;
        frame.set_cursor_position((cursor_x.min(area.x + area.width.saturating_sub(1)), area.y));
    }
}

impl Default for NameInput {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(input: &mut NameInput, text: &str) {
        for c in text.chars() {
            assert_eq!(input.handle_key(key(KeyCode::Char(c))), PromptAction::None);
        }
    }

    #[test]
    fn test_submit_trims_and_closes() {
        let mut input = NameInput::new();
        input.open(PromptKind::AddName);
        type_text(&mut input, "  Ana ");
        assert_eq!(input.text(), "  Ana ");
        assert_eq!(
            input.handle_key(key(KeyCode::Enter)),
            PromptAction::Submitted(PromptKind::AddName, "Ana".into())
        );
        assert!(!input.is_active());
    }

    #[test]
    fn test_blank_submit_cancels() {
        let mut input = NameInput::new();
        input.open(PromptKind::ImportFile);
        type_text(&mut input, "   ");
        assert_eq!(input.handle_key(key(KeyCode::Enter)), PromptAction::Cancelled);
    }

    #[test]
    fn test_escape_discards_text() {
        let mut input = NameInput::new();
        input.open(PromptKind::AddName);
        type_text(&mut input, "Bo");
        assert_eq!(input.handle_key(key(KeyCode::Esc)), PromptAction::Cancelled);
        input.open(PromptKind::AddName);
        assert_eq!(input.text(), "");
    }

    #[test]
    fn test_closed_prompt_ignores_keys() {
        let mut input = NameInput::new();
        assert_eq!(input.handle_key(key(KeyCode::Enter)), PromptAction::None);
    }
}
