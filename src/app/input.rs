use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Single-line text field with a byte-offset cursor and a character limit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    cursor: usize,
    char_limit: Option<usize>,
    pub placeholder: &'static str,
}

impl TextInput {
    pub fn new(placeholder: &'static str, char_limit: usize) -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            char_limit: Some(char_limit),
            placeholder,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replaces the contents and moves the cursor to the end.
    pub fn set_value(&mut self, value: &str) {
        self.value = match self.char_limit {
            Some(limit) => value.chars().take(limit).collect(),
            None => value.to_string(),
        };
        self.cursor = self.value.len();
    }

    /// Like `set_value`, but raises the limit so existing data is never cut.
    pub fn prefill(&mut self, value: &str) {
        if let Some(limit) = self.char_limit.as_mut() {
            *limit = (*limit).max(value.chars().count());
        }
        self.set_value(value);
    }

    /// Returns the value split at the cursor: (before, after).
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.value.split_at(self.cursor)
    }

    pub fn insert(&mut self, ch: char) {
        if let Some(limit) = self.char_limit {
            if self.value.chars().count() >= limit {
                return;
            }
        }
        self.value.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some(start) = self.prev_boundary() {
            self.value.drain(start..self.cursor);
            self.cursor = start;
        }
    }

    pub fn delete(&mut self) {
        if let Some(end) = self.next_boundary() {
            self.value.drain(self.cursor..end);
        }
    }

    pub fn move_left(&mut self) {
        if let Some(pos) = self.prev_boundary() {
            self.cursor = pos;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(pos) = self.next_boundary() {
            self.cursor = pos;
        }
    }

    /// Applies an editing key. Returns `false` when the key means nothing to
    /// a text field.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(ch)
                if !ch.is_control()
                    && !key
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.insert(ch)
            }
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.value.len(),
            _ => return false,
        }
        true
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.value[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(index, _)| index)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.value[self.cursor..]
            .chars()
            .next()
            .map(|ch| self.cursor + ch.len_utf8())
    }
}
