use ropey::Rope;

/// Columns between tab stops when tabs are expanded.
pub const TAB_WIDTH: usize = 4;

/// Bring outside text (a loaded file, a paste) into the buffer's line model:
/// `\r\n` and lone `\r` become `\n`, and tabs expand to spaces.
pub fn normalize_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut column = 0;
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push('\n');
                column = 0;
            }
            '\n' => {
                out.push('\n');
                column = 0;
            }
            '\t' => {
                let spaces = TAB_WIDTH - column % TAB_WIDTH;
                out.extend(std::iter::repeat_n(' ', spaces));
                column += spaces;
            }
            _ => {
                out.push(ch);
                column += 1;
            }
        }
    }
    out
}

/// A `(start, end)` range of character offsets into the buffer text.
///
/// `start <= end` always holds; a collapsed selection is a plain cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// Build a selection from two offsets in either order.
    pub const fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// A selection with no highlighted text.
    pub const fn collapsed(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    pub const fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, pos: usize) -> bool {
        (self.start..self.end).contains(&pos)
    }

    /// Clamp both ends to `max`.
    pub fn clamp(self, max: usize) -> Self {
        Self::new(self.start.min(max), self.end.min(max))
    }
}

/// Cursor position in line/column form (columns are character counts).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based column (characters from the line start).
    pub col: usize,
}

impl Cursor {
    pub const fn at(line: usize, col: usize) -> Self {
        Self { line, col }
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

/// The editable text behind the input pane.
///
/// Backed by a rope. The selection is an anchor/head pair of character
/// offsets: the head is where the cursor is drawn, the anchor is where a
/// shift-extended selection started.
pub struct EditorBuffer {
    rope: Rope,
    anchor: usize,
    head: usize,
    /// Remembered column for vertical movement (sticky column).
    col_memory: usize,
}

impl EditorBuffer {
    /// Create a new buffer from a string, cursor at the start.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            anchor: 0,
            head: 0,
            col_memory: 0,
        }
    }

    /// Create an empty buffer.
    pub fn empty() -> Self {
        Self::from_text("")
    }

    /// The full text content of the buffer.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Number of characters in the buffer.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Total number of lines in the buffer.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Get the content of a line (without trailing newline).
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let s = self.rope.line(line_idx).to_string();
        Some(s.trim_end_matches('\n').trim_end_matches('\r').to_string())
    }

    /// Length of a line in characters (without trailing newline).
    pub fn line_len(&self, line_idx: usize) -> usize {
        self.line_at(line_idx).map_or(0, |s| s.chars().count())
    }

    /// Character offset of the first character of `line_idx`.
    pub fn line_start(&self, line_idx: usize) -> usize {
        self.rope
            .line_to_char(line_idx.min(self.rope.len_lines()))
    }

    /// Line/column of the cursor (the selection head).
    pub fn cursor(&self) -> Cursor {
        self.cursor_for(self.head)
    }

    /// Line/column for an arbitrary character offset.
    pub fn cursor_for(&self, offset: usize) -> Cursor {
        let offset = offset.min(self.rope.len_chars());
        let line = self.rope.char_to_line(offset);
        Cursor::at(line, offset - self.rope.line_to_char(line))
    }

    /// Character offset of the cursor.
    pub const fn head(&self) -> usize {
        self.head
    }

    /// The current selection, normalised so `start <= end`.
    pub const fn selection(&self) -> Selection {
        Selection::new(self.anchor, self.head)
    }

    /// Replace the selection. The end of the range becomes the cursor.
    pub fn set_selection(&mut self, selection: Selection) {
        let selection = selection.clamp(self.rope.len_chars());
        self.anchor = selection.start;
        self.head = selection.end;
        self.col_memory = self.cursor().col;
    }

    /// Text covered by the selection.
    pub fn selected_text(&self) -> String {
        let sel = self.selection();
        self.rope.slice(sel.start..sel.end).to_string()
    }

    /// Select the whole buffer.
    pub fn select_all(&mut self) {
        self.anchor = 0;
        self.head = self.rope.len_chars();
        self.col_memory = self.cursor().col;
    }

    /// Swap in entirely new text, keeping the selection where it still fits.
    pub fn replace_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        let len = self.rope.len_chars();
        self.anchor = self.anchor.min(len);
        self.head = self.head.min(len);
        self.col_memory = self.cursor().col;
    }

    /// Insert a character at the cursor, replacing any selection.
    pub fn insert_char(&mut self, ch: char) {
        self.delete_selection();
        self.rope.insert_char(self.head, ch);
        self.set_head(self.head + 1, false);
    }

    /// Insert a string at the cursor, replacing any selection.
    pub fn insert_str(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        self.delete_selection();
        self.rope.insert(self.head, s);
        self.set_head(self.head + s.chars().count(), false);
    }

    /// Split the current line at the cursor (Enter key).
    pub fn split_line(&mut self) {
        self.insert_char('\n');
    }

    /// Delete the selection, or the character before the cursor (Backspace).
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_back(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        if self.head == 0 {
            return false;
        }
        let start = self.prev_boundary(self.head);
        self.rope.remove(start..self.head);
        self.set_head(start, false);
        true
    }

    /// Delete the selection, or the character at the cursor (Delete key).
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_forward(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        if self.head >= self.rope.len_chars() {
            return false;
        }
        let end = self.next_boundary(self.head);
        self.rope.remove(self.head..end);
        true
    }

    /// Move the cursor in the given direction.
    ///
    /// With `extend` the anchor stays put and the selection grows; without
    /// it a non-empty selection collapses first, like a text field does.
    pub fn move_cursor(&mut self, direction: Direction, extend: bool) {
        let sel = self.selection();
        if !extend && !sel.is_collapsed() {
            match direction {
                Direction::Left => return self.set_head(sel.start, false),
                Direction::Right => return self.set_head(sel.end, false),
                Direction::Up | Direction::Down => {}
            }
        }
        match direction {
            Direction::Left => self.set_head(self.head.saturating_sub(1), extend),
            Direction::Right => self.set_head((self.head + 1).min(self.rope.len_chars()), extend),
            Direction::Up => self.move_vertical(-1, extend),
            Direction::Down => self.move_vertical(1, extend),
        }
    }

    /// Move cursor to the beginning of the line (Home).
    pub fn move_home(&mut self, extend: bool) {
        let line = self.cursor().line;
        self.set_head(self.line_start(line), extend);
    }

    /// Move cursor to the end of the line (End).
    pub fn move_end(&mut self, extend: bool) {
        let line = self.cursor().line;
        self.set_head(self.line_start(line) + self.line_len(line), extend);
    }

    /// Move cursor one word to the left (Ctrl+Left).
    pub fn move_word_left(&mut self, extend: bool) {
        let Cursor { line, col } = self.cursor();
        if col == 0 {
            if line > 0 {
                self.set_head(self.line_start(line - 1) + self.line_len(line - 1), extend);
            }
            return;
        }

        let chars: Vec<char> = self.line_at(line).unwrap_or_default().chars().collect();
        let mut idx = col.min(chars.len());
        while idx > 0 && chars[idx - 1].is_whitespace() {
            idx -= 1;
        }
        if idx > 0 && !is_word_char(chars[idx - 1]) {
            idx -= 1;
        } else {
            while idx > 0 && is_word_char(chars[idx - 1]) {
                idx -= 1;
            }
        }
        self.set_head(self.line_start(line) + idx, extend);
    }

    /// Move cursor one word to the right (Ctrl+Right).
    pub fn move_word_right(&mut self, extend: bool) {
        let Cursor { line, col } = self.cursor();
        let line_len = self.line_len(line);
        if col >= line_len {
            if line + 1 < self.line_count() {
                self.set_head(self.line_start(line + 1), extend);
            }
            return;
        }

        let chars: Vec<char> = self.line_at(line).unwrap_or_default().chars().collect();
        let mut idx = col;
        // Skip current word characters
        while idx < chars.len() && is_word_char(chars[idx]) {
            idx += 1;
        }
        // Skip whitespace/punctuation after word
        while idx < chars.len() && !is_word_char(chars[idx]) {
            idx += 1;
        }
        self.set_head(self.line_start(line) + idx, extend);
    }

    /// Move cursor to a specific line and column, collapsing the selection.
    pub fn move_to(&mut self, line: usize, col: usize) {
        let max_line = self.line_count().saturating_sub(1);
        let line = line.min(max_line);
        let col = col.min(self.line_len(line));
        self.set_head(self.line_start(line) + col, false);
    }

    /// Move the head to a line and column, keeping the anchor (mouse drag).
    pub fn select_to(&mut self, line: usize, col: usize) {
        let max_line = self.line_count().saturating_sub(1);
        let line = line.min(max_line);
        let col = col.min(self.line_len(line));
        self.set_head(self.line_start(line) + col, true);
    }

    /// Move cursor to the start of the buffer (Ctrl+Home).
    pub fn move_to_start(&mut self, extend: bool) {
        self.set_head(0, extend);
    }

    /// Move cursor to the end of the buffer (Ctrl+End).
    pub fn move_to_end(&mut self, extend: bool) {
        self.set_head(self.rope.len_chars(), extend);
    }

    // --- Private helpers ---

    fn set_head(&mut self, pos: usize, extend: bool) {
        self.head = pos.min(self.rope.len_chars());
        if !extend {
            self.anchor = self.head;
        }
        self.col_memory = self.cursor().col;
    }

    fn delete_selection(&mut self) -> bool {
        let sel = self.selection();
        if sel.is_collapsed() {
            return false;
        }
        self.rope.remove(sel.start..sel.end);
        self.set_head(sel.start, false);
        true
    }

    /// Offset before `pos`, treating `\r\n` as one unit.
    fn prev_boundary(&self, pos: usize) -> usize {
        if pos >= 2 && self.rope.char(pos - 1) == '\n' && self.rope.char(pos - 2) == '\r' {
            pos - 2
        } else {
            pos - 1
        }
    }

    /// Offset after `pos`, treating `\r\n` as one unit.
    fn next_boundary(&self, pos: usize) -> usize {
        let len = self.rope.len_chars();
        if pos + 1 < len && self.rope.char(pos) == '\r' && self.rope.char(pos + 1) == '\n' {
            pos + 2
        } else {
            pos + 1
        }
    }

    fn move_vertical(&mut self, delta: isize, extend: bool) {
        let Cursor { line, .. } = self.cursor();
        let target = if delta < 0 {
            if line == 0 {
                return;
            }
            line - 1
        } else {
            if line + 1 >= self.line_count() {
                return;
            }
            line + 1
        };
        let memory = self.col_memory;
        let col = memory.min(self.line_len(target));
        self.head = self.line_start(target) + col;
        if !extend {
            self.anchor = self.head;
        }
        self.col_memory = memory;
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

impl std::fmt::Debug for EditorBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorBuffer")
            .field(
                "rope",
                &format_args!("Rope({} lines)", self.rope.len_lines()),
            )
            .field("selection", &self.selection())
            .finish()
    }
}
