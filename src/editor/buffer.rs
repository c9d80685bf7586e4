use ropey::Rope;

use crate::status::Point;

/// Caret position in the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based column (byte offset within the line).
    pub col: usize,
    /// Column to return to when moving vertically through short lines.
    sticky_col: usize,
}

impl Cursor {
    pub const fn new() -> Self {
        Self::at(0, 0)
    }

    pub const fn at(line: usize, col: usize) -> Self {
        Self {
            line,
            col,
            sticky_col: col,
        }
    }

    const fn set_col(&mut self, col: usize) {
        self.col = col;
        self.sticky_col = col;
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Rope-backed text with a single caret.
///
/// Columns are byte offsets; [`EditorBuffer::char_column`] converts to the
/// character columns shown to users.
pub struct EditorBuffer {
    rope: Rope,
    cursor: Cursor,
    dirty: bool,
}

impl EditorBuffer {
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: Cursor::new(),
            dirty: false,
        }
    }

    pub fn empty() -> Self {
        Self::from_text("")
    }

    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Whether the text changed since load or the last [`mark_clean`](Self::mark_clean).
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Line content without its line ending.
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let mut s = self.rope.line(line_idx).to_string();
        while s.ends_with('\n') || s.ends_with('\r') {
            s.pop();
        }
        Some(s)
    }

    /// Line length in bytes, without the line ending.
    pub fn line_len(&self, line_idx: usize) -> usize {
        self.line_at(line_idx).map_or(0, |s| s.len())
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Character column for a byte column on `line`.
    pub fn char_column(&self, line: usize, byte_col: usize) -> usize {
        let text = self.line_at(line).unwrap_or_default();
        let byte_col = floor_char_boundary(&text, byte_col);
        text[..byte_col].chars().count()
    }

    /// User-facing position of a cursor: row plus character column.
    pub fn point_of(&self, cursor: Cursor) -> Point {
        Point::new(cursor.line, self.char_column(cursor.line, cursor.col))
    }

    pub fn insert_char(&mut self, ch: char) {
        let idx = self.char_idx(self.cursor);
        self.rope.insert_char(idx, ch);
        self.cursor.set_col(self.cursor.col + ch.len_utf8());
        self.dirty = true;
    }

    /// Insert text at the cursor, leaving the cursor after it.
    pub fn insert_str(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        let idx = self.char_idx(self.cursor);
        self.rope.insert(idx, s);
        match s.rsplit_once('\n') {
            Some((head, tail)) => {
                self.cursor.line += head.matches('\n').count() + 1;
                self.cursor.set_col(tail.len());
            }
            None => self.cursor.set_col(self.cursor.col + s.len()),
        }
        self.dirty = true;
    }

    /// Break the line at the cursor (Enter).
    pub fn split_line(&mut self) {
        let idx = self.char_idx(self.cursor);
        self.rope.insert_char(idx, '\n');
        self.cursor.line += 1;
        self.cursor.set_col(0);
        self.dirty = true;
    }

    /// Backspace. Returns `true` if anything was removed.
    pub fn delete_back(&mut self) -> bool {
        let idx = self.char_idx(self.cursor);
        if idx == 0 {
            return false;
        }
        let prev = self.cursor_before(self.cursor);
        let start = if idx >= 2 && self.is_crlf_at(idx - 2) {
            idx - 2
        } else {
            idx - 1
        };
        self.rope.remove(start..idx);
        self.cursor = Cursor::at(prev.line, prev.col);
        self.dirty = true;
        true
    }

    /// Delete. Returns `true` if anything was removed.
    pub fn delete_forward(&mut self) -> bool {
        let idx = self.char_idx(self.cursor);
        if idx >= self.rope.len_chars() {
            return false;
        }
        let end = if self.is_crlf_at(idx) { idx + 2 } else { idx + 1 };
        self.rope.remove(idx..end);
        self.dirty = true;
        true
    }

    /// Whether a `\r\n` pair starts at char index `idx`.
    fn is_crlf_at(&self, idx: usize) -> bool {
        idx + 1 < self.rope.len_chars()
            && self.rope.char(idx) == '\r'
            && self.rope.char(idx + 1) == '\n'
    }

    /// Remove the text between two cursors (in any order) and leave the
    /// cursor at the start. Returns `true` if anything was removed.
    pub fn remove_range(&mut self, a: Cursor, b: Cursor) -> bool {
        let (start, end) = if (a.line, a.col) <= (b.line, b.col) {
            (a, b)
        } else {
            (b, a)
        };
        let from = self.char_idx(start);
        let to = self.char_idx(end);
        self.cursor = Cursor::at(start.line, start.col);
        if from == to {
            return false;
        }
        self.rope.remove(from..to);
        self.dirty = true;
        true
    }

    pub fn move_cursor(&mut self, direction: Direction) {
        match direction {
            Direction::Left => self.cursor = self.cursor_before(self.cursor),
            Direction::Right => self.cursor = self.cursor_after(self.cursor),
            Direction::Up if self.cursor.line > 0 => self.move_vertically(self.cursor.line - 1),
            Direction::Down if self.cursor.line + 1 < self.line_count() => {
                self.move_vertically(self.cursor.line + 1);
            }
            Direction::Up | Direction::Down => {}
        }
    }

    pub const fn move_home(&mut self) {
        self.cursor.set_col(0);
    }

    pub fn move_end(&mut self) {
        let len = self.line_len(self.cursor.line);
        self.cursor.set_col(len);
    }

    /// Jump to the start of the previous word, wrapping to the previous line.
    pub fn move_word_left(&mut self) {
        if self.cursor.col == 0 {
            if self.cursor.line > 0 {
                self.cursor.line -= 1;
                self.move_end();
            }
            return;
        }
        let line = self.line_at(self.cursor.line).unwrap_or_default();
        let before = line[..self.cursor.col].trim_end();
        let pos = before.rfind(|c: char| !is_word_char(c)).map_or(0, |i| {
            i + before[i..].chars().next().map_or(1, char::len_utf8)
        });
        self.cursor.set_col(pos);
    }

    /// Jump to the start of the next word, wrapping to the next line.
    pub fn move_word_right(&mut self) {
        let line = self.line_at(self.cursor.line).unwrap_or_default();
        if self.cursor.col >= line.len() {
            if self.cursor.line + 1 < self.line_count() {
                self.cursor = Cursor::at(self.cursor.line + 1, 0);
            }
            return;
        }
        let after = &line[self.cursor.col..];
        let word_end = after.find(|c: char| !is_word_char(c)).unwrap_or(after.len());
        let rest = &after[word_end..];
        let gap = rest.find(is_word_char).unwrap_or(rest.len());
        self.cursor.set_col(self.cursor.col + word_end + gap);
    }

    /// Move to a line and byte column, clamped to the buffer.
    pub fn move_to(&mut self, line: usize, col: usize) {
        let line = line.min(self.line_count().saturating_sub(1));
        let text = self.line_at(line).unwrap_or_default();
        self.cursor = Cursor::at(line, floor_char_boundary(&text, col));
    }

    fn move_vertically(&mut self, line: usize) {
        let text = self.line_at(line).unwrap_or_default();
        self.cursor.line = line;
        self.cursor.col = floor_char_boundary(&text, self.cursor.sticky_col);
    }

    fn cursor_before(&self, cursor: Cursor) -> Cursor {
        if cursor.col > 0 {
            let line = self.line_at(cursor.line).unwrap_or_default();
            let width = line[..cursor.col.min(line.len())]
                .chars()
                .next_back()
                .map_or(1, char::len_utf8);
            Cursor::at(cursor.line, cursor.col.saturating_sub(width))
        } else if cursor.line > 0 {
            Cursor::at(cursor.line - 1, self.line_len(cursor.line - 1))
        } else {
            cursor
        }
    }

    fn cursor_after(&self, cursor: Cursor) -> Cursor {
        let line = self.line_at(cursor.line).unwrap_or_default();
        if cursor.col < line.len() {
            let width = line[cursor.col..].chars().next().map_or(1, char::len_utf8);
            Cursor::at(cursor.line, cursor.col + width)
        } else if cursor.line + 1 < self.line_count() {
            Cursor::at(cursor.line + 1, 0)
        } else {
            cursor
        }
    }

    /// Rope char index for a cursor.
    fn char_idx(&self, cursor: Cursor) -> usize {
        let line = cursor.line.min(self.line_count().saturating_sub(1));
        self.rope.line_to_char(line) + self.char_column(line, cursor.col)
    }
}

impl std::fmt::Debug for EditorBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorBuffer")
            .field("rope", &format_args!("Rope({} lines)", self.rope.len_lines()))
            .field("cursor", &self.cursor)
            .field("dirty", &self.dirty)
            .finish()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn floor_char_boundary(s: &str, idx: usize) -> usize {
    let mut idx = idx.min(s.len());
    while !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}
