/// A single-line text buffer with a byte-offset cursor.
///
/// Provides insertion, deletion, and horizontal cursor movement for a form
/// input field. The cursor always sits on a character boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldBuffer {
    text: String,
    cursor: usize,
}

impl FieldBuffer {
    /// Create an empty field.
    pub const fn empty() -> Self {
        Self {
            text: String::new(),
            cursor: 0,
        }
    }

    /// Create a field from initial text, cursor at the end.
    pub fn from_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            cursor: text.len(),
        }
    }

    /// The field's current content.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The cursor's byte offset into the content.
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the field is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Insert a character at the cursor position.
    pub fn insert_char(&mut self, ch: char) {
        self.text.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    /// Replace the whole content, clamping the cursor to the new length.
    pub fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
        if self.cursor > self.text.len() {
            self.cursor = self.text.len();
        } else {
            self.snap_to_boundary();
        }
    }

    /// Delete the character before the cursor (Backspace).
    ///
    /// Returns `true` if a character was deleted.
    pub fn delete_back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let prev = self.prev_char_len();
        self.cursor -= prev;
        self.text.remove(self.cursor);
        true
    }

    /// Delete the character at the cursor (Delete key).
    ///
    /// Returns `true` if a character was deleted.
    pub fn delete_forward(&mut self) -> bool {
        if self.cursor >= self.text.len() {
            return false;
        }
        self.text.remove(self.cursor);
        true
    }

    /// Move the cursor one character left.
    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= self.prev_char_len();
        }
    }

    /// Move the cursor one character right.
    pub fn move_right(&mut self) {
        if let Some(ch) = self.text[self.cursor..].chars().next() {
            self.cursor += ch.len_utf8();
        }
    }

    /// Move the cursor to the start of the field (Home).
    pub const fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Move the cursor to the end of the field (End).
    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Move the cursor to a byte offset, clamped to the content.
    pub fn move_to(&mut self, offset: usize) {
        self.cursor = offset.min(self.text.len());
        self.snap_to_boundary();
    }

    // --- Private helpers ---

    /// Byte length of the character just before the cursor.
    fn prev_char_len(&self) -> usize {
        self.text[..self.cursor]
            .chars()
            .next_back()
            .map_or(0, char::len_utf8)
    }

    /// Pull the cursor back to the nearest character boundary.
    fn snap_to_boundary(&mut self) {
        while self.cursor > 0 && !self.text.is_char_boundary(self.cursor) {
            self.cursor -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Construction ---

    #[test]
    fn test_empty_field() {
        let field = FieldBuffer::empty();
        assert!(field.is_empty());
        assert_eq!(field.cursor(), 0);
    }

    #[test]
    fn test_from_text_puts_cursor_at_end() {
        let field = FieldBuffer::from_text("1 234");
        assert_eq!(field.text(), "1 234");
        assert_eq!(field.cursor(), 5);
    }

    // --- Insertion ---

    #[test]
    fn test_insert_at_end() {
        let mut field = FieldBuffer::from_text("12");
        field.insert_char('3');
        assert_eq!(field.text(), "123");
        assert_eq!(field.cursor(), 3);
    }

    #[test]
    fn test_insert_in_middle() {
        let mut field = FieldBuffer::from_text("13");
        field.move_left();
        field.insert_char('2');
        assert_eq!(field.text(), "123");
        assert_eq!(field.cursor(), 2);
    }

    #[test]
    fn test_insert_multibyte() {
        let mut field = FieldBuffer::empty();
        field.insert_char('é');
        assert_eq!(field.text(), "é");
        assert_eq!(field.cursor(), 2);
    }

    // --- Deletion ---

    #[test]
    fn test_delete_back_at_start_is_noop() {
        let mut field = FieldBuffer::from_text("12");
        field.move_home();
        assert!(!field.delete_back());
        assert_eq!(field.text(), "12");
    }

    #[test]
    fn test_delete_back_removes_char_before_cursor() {
        let mut field = FieldBuffer::from_text("123");
        assert!(field.delete_back());
        assert_eq!(field.text(), "12");
        assert_eq!(field.cursor(), 2);
    }

    #[test]
    fn test_delete_back_multibyte() {
        let mut field = FieldBuffer::from_text("café");
        assert!(field.delete_back());
        assert_eq!(field.text(), "caf");
        assert_eq!(field.cursor(), 3);
    }

    #[test]
    fn test_delete_forward_at_end_is_noop() {
        let mut field = FieldBuffer::from_text("12");
        assert!(!field.delete_forward());
    }

    #[test]
    fn test_delete_forward_removes_char_at_cursor() {
        let mut field = FieldBuffer::from_text("123");
        field.move_home();
        assert!(field.delete_forward());
        assert_eq!(field.text(), "23");
        assert_eq!(field.cursor(), 0);
    }

    // --- Movement ---

    #[test]
    fn test_move_left_right_clamp_at_edges() {
        let mut field = FieldBuffer::from_text("12");
        field.move_right();
        assert_eq!(field.cursor(), 2);
        field.move_home();
        field.move_left();
        assert_eq!(field.cursor(), 0);
    }

    #[test]
    fn test_move_to_clamps_to_length() {
        let mut field = FieldBuffer::from_text("12");
        field.move_to(100);
        assert_eq!(field.cursor(), 2);
    }

    #[test]
    fn test_move_to_snaps_to_char_boundary() {
        let mut field = FieldBuffer::from_text("é1");
        field.move_to(1); // inside 'é'
        assert_eq!(field.cursor(), 0);
    }

    // --- set_text ---

    #[test]
    fn test_set_text_clamps_cursor() {
        let mut field = FieldBuffer::from_text("123456");
        field.set_text("12");
        assert_eq!(field.text(), "12");
        assert_eq!(field.cursor(), 2);
    }

    #[test]
    fn test_set_text_keeps_cursor_inside_shorter_prefix() {
        let mut field = FieldBuffer::from_text("123456");
        field.move_to(2);
        field.set_text("999999");
        assert_eq!(field.cursor(), 2);
    }
}
