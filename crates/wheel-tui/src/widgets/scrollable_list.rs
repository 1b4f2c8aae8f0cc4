//! Generic scrollable list state: selection plus a scroll window.

pub struct ScrollableList<T> {
    pub items: Vec<T>,
    pub selected: usize,
    pub scroll_offset: usize,
}

impl<T> ScrollableList<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            selected: 0,
            scroll_offset: 0,
        }
    }

    /// Replace the items, keeping the cursor on the same row where possible.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        if self.selected >= self.items.len() {
            self.selected = self.items.len().saturating_sub(1);
        }
        if self.scroll_offset > self.selected {
            self.scroll_offset = self.selected;
        }
    }

    pub fn select_up(&mut self, n: usize) {
        self.selected = self.selected.saturating_sub(n);
    }

    pub fn select_down(&mut self, n: usize) {
        if self.items.is_empty() {
            return;
        }
        self.selected = (self.selected + n).min(self.items.len() - 1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
        self.scroll_offset = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.items.len().saturating_sub(1);
    }

    pub fn selected_item(&self) -> Option<&T> {
        self.items.get(self.selected)
    }

    /// Returns (index, &item) pairs visible in `height` rows.
    /// Call ensure_visible first to update scroll_offset.
    pub fn visible_items(&self, height: usize) -> Vec<(usize, &T)> {
        if height == 0 || self.items.is_empty() {
            return Vec::new();
        }
        let end = (self.scroll_offset + height).min(self.items.len());
        self.items[self.scroll_offset..end]
            .iter()
            .enumerate()
            .map(|(i, item)| (self.scroll_offset + i, item))
            .collect()
    }

    pub fn ensure_visible(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + height {
            self.scroll_offset = self.selected.saturating_sub(height - 1);
        }
    }

    /// Handle a click at `row` within the rendered area.
    /// Returns true if selection changed.
    pub fn handle_click(&mut self, row: usize) -> bool {
        let target = self.scroll_offset + row;
        if target < self.items.len() && target != self.selected {
            self.selected = target;
            return true;
        }
        false
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for ScrollableList<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(n: usize) -> ScrollableList<usize> {
        let mut l = ScrollableList::new();
        l.set_items((0..n).collect());
        l
    }

    #[test]
    fn test_selection_is_clamped() {
        let mut l = list(3);
        l.select_down(10);
        assert_eq!(l.selected, 2);
        l.select_up(10);
        assert_eq!(l.selected, 0);
        l.select_last();
        assert_eq!(l.selected_item(), Some(&2));
    }

    #[test]
    fn test_shrinking_items_moves_cursor_back() {
        let mut l = list(5);
        l.select_last();
        l.set_items(vec![0, 1]);
        assert_eq!(l.selected, 1);
        l.set_items(Vec::new());
        assert_eq!(l.selected, 0);
        assert!(l.selected_item().is_none());
    }

    #[test]
    fn test_scroll_window_follows_selection() {
        let mut l = list(20);
        l.select_down(12);
        l.ensure_visible(5);
        assert_eq!(l.scroll_offset, 8);
        let rows = l.visible_items(5);
        assert_eq!(rows.first().map(|r| r.0), Some(8));
        assert_eq!(rows.last().map(|r| r.0), Some(12));
        l.select_first();
        l.ensure_visible(5);
        assert_eq!(l.scroll_offset, 0);
    }

    #[test]
    fn test_click_selects_visible_row() {
        let mut l = list(4);
        assert!(l.handle_click(2));
        assert_eq!(l.selected, 2);
        assert!(!l.handle_click(2));
        assert!(!l.handle_click(9));
    }
}
