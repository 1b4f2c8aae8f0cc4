//! NameList component: numbered list of the names still on the wheel.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{
        style_default, style_muted, style_selected, style_selected_focused, style_winner,
        C_NUMBER_HINT, C_SECONDARY,
    },
    widgets::{
        pane_chrome::{pane_chrome, Badge},
        scrollable_list::ScrollableList,
        truncate_to_width,
    },
};

const PAGE: usize = 10;

pub struct NameList {
    list: ScrollableList<String>,
}

impl NameList {
    pub fn new() -> Self {
        Self {
            list: ScrollableList::new(),
        }
    }

    /// Pick up a new pool snapshot.
    pub fn sync(&mut self, state: &AppState) {
        self.list.set_items(state.pool.clone());
    }

    pub fn selected_name(&self) -> Option<&str> {
        self.list.selected_item().map(String::as_str)
    }
}

impl Default for NameList {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for NameList {
    fn id(&self) -> ComponentId {
        ComponentId::NameList
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => vec![Action::SelectUp(1)],
            KeyCode::Down | KeyCode::Char('j') => vec![Action::SelectDown(1)],
            KeyCode::PageUp => vec![Action::SelectUp(PAGE)],
            KeyCode::PageDown => vec![Action::SelectDown(PAGE)],
            KeyCode::Home | KeyCode::Char('g') => vec![Action::SelectFirst],
            KeyCode::End | KeyCode::Char('G') => vec![Action::SelectLast],
            KeyCode::Char('d') | KeyCode::Delete => match self.selected_name() {
                Some(name) => vec![Action::DeleteName(name.to_string())],
                None => vec![],
            },
            _ => vec![],
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, _state: &AppState) -> Vec<Action> {
        match event.kind {
            MouseEventKind::ScrollUp => vec![Action::SelectUp(1)],
            MouseEventKind::ScrollDown => vec![Action::SelectDown(1)],
            MouseEventKind::Down(MouseButton::Left) => {
                // First row sits under the top border.
                let row = event.row.saturating_sub(area.y + 1) as usize;
                self.list.handle_click(row);
                vec![]
            }
            _ => vec![],
        }
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        match action {
            Action::SelectUp(n) => self.list.select_up(*n),
            Action::SelectDown(n) => self.list.select_down(*n),
            Action::SelectFirst => self.list.select_first(),
            Action::SelectLast => self.list.select_last(),
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let count = self.list.len().to_string();
        let block = pane_chrome(
            "names",
            Some('2'),
            focused,
            Some(Badge {
                text: &count,
                color: C_SECONDARY,
            }),
            focused.then_some("d remove"),
        );
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.list.is_empty() {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(" no names yet", style_muted()))),
                inner,
            );
            return;
        }

        let height = inner.height as usize;
        self.list.ensure_visible(height);
        let number_width = self.list.len().to_string().len();
        let name_width = (inner.width as usize).saturating_sub(number_width + 4);

        let lines: Vec<Line> = self
            .list
            .visible_items(height)
            .into_iter()
            .map(|(i, name)| {
                let is_winner = state.highlight == Some(i);
                let row_style = if i == self.list.selected {
                    if focused {
                        style_selected_focused()
                    } else {
                        style_selected()
                    }
                } else {
                    Style::default()
                };
                let name_style = if is_winner {
                    style_winner()
                } else {
                    style_default()
                };
                Line::from(vec![
                    Span::styled(
                        format!(" {:>w$} ", i + 1, w = number_width),
                        Style::default().fg(C_NUMBER_HINT),
                    ),
                    Span::styled(if is_winner { "★" } else { " " }, style_winner()),
                    Span::styled(truncate_to_width(name, name_width), name_style),
                ])
                .style(row_style)
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyModifiers;
    use wheel_proto::config::Config;
    use wheel_proto::protocol::Surface;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn setup(names: &[&str]) -> (NameList, AppState) {
        let mut state = AppState::new(&Config::default());
        let pool: Vec<String> = names.iter().map(|s| s.to_string()).collect();
        state.render(&pool, None);
        let mut list = NameList::new();
        list.sync(&state);
        (list, state)
    }

    fn press(list: &mut NameList, state: &AppState, code: KeyCode) -> Vec<Action> {
        let actions = list.handle_key(key(code), state);
        for a in &actions {
            list.on_action(a, state);
        }
        actions
    }

    #[test]
    fn test_delete_targets_selected_name() {
        let (mut list, state) = setup(&["Ana", "Ben", "Cleo"]);
        press(&mut list, &state, KeyCode::Down);
        press(&mut list, &state, KeyCode::Char('j'));
        let actions = press(&mut list, &state, KeyCode::Char('d'));
        assert!(matches!(actions.as_slice(), [Action::DeleteName(n)] if n == "Cleo"));
    }

    #[test]
    fn test_delete_on_empty_list_does_nothing() {
        let (mut list, state) = setup(&[]);
        assert!(press(&mut list, &state, KeyCode::Delete).is_empty());
    }

    #[test]
    fn test_sync_after_removal_keeps_cursor_in_range() {
        let (mut list, mut state) = setup(&["Ana", "Ben", "Cleo"]);
        press(&mut list, &state, KeyCode::End);
        assert_eq!(list.selected_name(), Some("Cleo"));
        state.render(&["Ana".to_string(), "Ben".to_string()], None);
        list.sync(&state);
        assert_eq!(list.selected_name(), Some("Ben"));
        press(&mut list, &state, KeyCode::Home);
        assert_eq!(list.selected_name(), Some("Ana"));
    }
}
