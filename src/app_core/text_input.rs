//! Single-line text input with a character cursor, used by the search box.

use unicode_width::UnicodeWidthChar;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    text: String,
    /// Cursor position in characters, not bytes.
    cursor: usize,
}

impl TextInput {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.char_count();
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(idx, _)| idx)
            .unwrap_or(self.text.len())
    }

    pub fn insert(&mut self, c: char) {
        let byte_idx = self.byte_index(self.cursor);
        self.text.insert(byte_idx, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let byte_idx = self.byte_index(self.cursor);
        self.text.remove(byte_idx);
    }

    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let byte_idx = self.byte_index(self.cursor);
            self.text.remove(byte_idx);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_count());
    }

    pub fn move_to_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_to_end(&mut self) {
        self.cursor = self.char_count();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Deletes the word before the cursor together with trailing whitespace.
    pub fn delete_word(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let chars: Vec<char> = self.text.chars().collect();
        let mut start = self.cursor;
        while start > 0 && chars[start - 1].is_whitespace() {
            start -= 1;
        }
        while start > 0 && !chars[start - 1].is_whitespace() {
            start -= 1;
        }
        let range = self.byte_index(start)..self.byte_index(self.cursor);
        self.text.replace_range(range, "");
        self.cursor = start;
    }

    /// Display width of the text before the cursor.
    pub fn cursor_offset(&self) -> u16 {
        self.text
            .chars()
            .take(self.cursor)
            .filter_map(|c| c.width())
            .map(|w| w as u16)
            .sum()
    }

    /// Horizontal scroll that keeps the cursor inside `visible_width` cells.
    pub fn horizontal_scroll(&self, visible_width: u16) -> u16 {
        if visible_width == 0 {
            return 0;
        }
        self.cursor_offset()
            .saturating_sub(visible_width.saturating_sub(1))
    }

    /// Places the cursor at the character drawn under `column` (relative to
    /// the unscrolled text), clamping past the end.
    pub fn set_cursor_at_column(&mut self, column: u16) {
        let mut width = 0u16;
        for (idx, ch) in self.text.chars().enumerate() {
            let char_width = ch.width().unwrap_or(0) as u16;
            if width + char_width > column {
                self.cursor = idx;
                return;
            }
            width += char_width;
        }
        self.cursor = self.char_count();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(text: &str) -> TextInput {
        let mut input = TextInput::default();
        input.set_text(text);
        input
    }

    #[test]
    fn test_editing_at_cursor() {
        let mut input = input("mrio");
        input.move_to_start();
        input.move_right();
        input.insert('a');
        assert_eq!(input.text(), "mario");
        assert_eq!(input.cursor(), 2);

        input.backspace();
        assert_eq!(input.text(), "mrio");
        input.delete();
        assert_eq!(input.text(), "mio");
        input.move_to_end();
        input.delete();
        assert_eq!(input.text(), "mio");
    }

    #[test]
    fn test_multibyte_characters() {
        let mut input = input("Pokémon");
        input.move_left();
        input.move_left();
        input.move_left();
        input.backspace();
        assert_eq!(input.text(), "Pokmon");
        input.insert('é');
        assert_eq!(input.text(), "Pokémon");
    }

    #[test]
    fn test_delete_word() {
        let mut input = input("super mario  ");
        input.delete_word();
        assert_eq!(input.text(), "super ");
        assert_eq!(input.cursor(), 6);
        input.delete_word();
        assert_eq!(input.text(), "");

        let mut input = TextInput::default();
        input.delete_word();
        assert_eq!(input.text(), "");
    }

    #[test]
    fn test_blank_detection_and_clear() {
        assert!(input("   ").is_blank());
        assert!(!input(" link ").is_blank());
        let mut input = input("zelda");
        input.clear();
        assert_eq!(input.cursor(), 0);
        assert!(input.is_blank());
    }

    #[test]
    fn test_horizontal_scroll_keeps_cursor_visible() {
        let mut input = input("abcdefghijklmnopqrstuvwxyz");
        input.move_to_start();
        assert_eq!(input.horizontal_scroll(10), 0);
        for _ in 0..10 {
            input.move_right();
        }
        assert_eq!(input.horizontal_scroll(10), 1);
        assert_eq!(input.horizontal_scroll(0), 0);

        let wide = self::input("🦀rust");
        assert_eq!(wide.cursor_offset(), 6);
        assert_eq!(wide.horizontal_scroll(4), 3);
    }

    #[test]
    fn test_cursor_from_column() {
        let mut input = input("🦀a");
        input.set_cursor_at_column(0);
        assert_eq!(input.cursor(), 0);
        input.set_cursor_at_column(1);
        assert_eq!(input.cursor(), 0);
        input.set_cursor_at_column(2);
        assert_eq!(input.cursor(), 1);
        input.set_cursor_at_column(50);
        assert_eq!(input.cursor(), 2);
    }
}
