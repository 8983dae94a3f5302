use std::path::PathBuf;
use std::time::{Duration, Instant};

use ratatui::layout::Rect;
use tracing::debug;
use unicode_width::UnicodeWidthChar;

use crate::config::{Appearance, ColorMode, EditorTheme, Preferences};
use crate::document::{DerivedView, Document};
use crate::editor::{EditHistory, EditorBuffer, Selection};
use crate::ui::layout::{ScreenLayout, SplitLayout, display_column};
use crate::ui::viewport::Viewport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// What the preview pane shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PreviewMode {
    /// Styled terminal rendition of the markdown
    #[default]
    Rendered,
    /// The generated HTML fragment as text
    Html,
}

impl PreviewMode {
    pub const fn toggle(self) -> Self {
        match self {
            Self::Rendered => Self::Html,
            Self::Html => Self::Rendered,
        }
    }
}

/// Whether a text replacement goes into the edit history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recording {
    Record,
    /// Used when replaying history itself (undo/redo)
    Skip,
}

/// A selection to restore once the text it was computed for is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingSelection {
    revision: u64,
    selection: Selection,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// The text being edited
    pub buffer: EditorBuffer,
    /// Snapshots for undo/redo
    pub history: EditHistory,
    /// Line count, word count and HTML of the current text
    pub derived: DerivedView,
    /// Preview rendition of the current text
    pub document: Document,
    /// `derived.html` wrapped to the preview width
    pub html_lines: Vec<String>,
    pub preview_mode: PreviewMode,
    pub preview_viewport: Viewport,
    pub editor_viewport: Viewport,
    /// First display column shown in the editor
    pub editor_scroll_col: usize,
    pub split: SplitLayout,
    pub editor_theme: EditorTheme,
    pub color_mode: ColorMode,
    /// Light/dark in effect after resolving `color_mode`
    pub appearance: Appearance,
    /// `COLORFGBG` as seen at startup, for resolving `ColorMode::System`
    pub terminal_hint: Option<String>,
    pub help_visible: bool,
    pub help_scroll_offset: usize,
    /// Name shown in the status row
    pub file_label: Option<String>,
    /// Preference file shown in help
    pub preferences_path: Option<PathBuf>,
    /// Set after first quit attempt with edits; allows second quit to proceed
    pub quit_confirmed: bool,
    pub should_quit: bool,
    terminal_size: (u16, u16),
    /// Text the session started from
    baseline: String,
    /// Bumped on every text change
    revision: u64,
    pending_selection: Option<PendingSelection>,
    toast: Option<Toast>,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("buffer", &self.buffer)
            .field("revision", &self.revision)
            .field("editor_theme", &self.editor_theme)
            .field("color_mode", &self.color_mode)
            .field("preview_mode", &self.preview_mode)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a model editing `text` in a terminal of `terminal_size`.
    pub fn new(text: &str, terminal_size: (u16, u16)) -> Self {
        let mut model = Self {
            buffer: EditorBuffer::from_text(text),
            history: EditHistory::new(text),
            derived: DerivedView::compute(text),
            document: Document::empty(),
            html_lines: Vec::new(),
            preview_mode: PreviewMode::default(),
            preview_viewport: Viewport::default(),
            editor_viewport: Viewport::default(),
            editor_scroll_col: 0,
            split: SplitLayout::default(),
            editor_theme: EditorTheme::default(),
            color_mode: ColorMode::default(),
            appearance: Appearance::default(),
            terminal_hint: None,
            help_visible: false,
            help_scroll_offset: 0,
            file_label: None,
            preferences_path: None,
            quit_confirmed: false,
            should_quit: false,
            terminal_size,
            baseline: text.to_string(),
            revision: 0,
            pending_selection: None,
            toast: None,
        };
        model.reflow();
        model
    }

    /// Apply stored (or overridden) theme and colour mode.
    #[must_use]
    pub fn with_preferences(mut self, preferences: Preferences) -> Self {
        self.editor_theme = preferences.editor_theme;
        self.set_color_mode(preferences.color_mode);
        self
    }

    /// Remember the terminal background hint and re-resolve the appearance.
    #[must_use]
    pub fn with_terminal_hint(mut self, hint: Option<String>) -> Self {
        self.terminal_hint = hint;
        self.set_color_mode(self.color_mode);
        self
    }

    pub const fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    /// Screen regions for the current terminal size and split.
    pub fn layout(&self) -> ScreenLayout {
        let (width, height) = self.terminal_size;
        ScreenLayout::compute(
            Rect::new(0, 0, width, height),
            &self.split,
            self.buffer.line_count(),
        )
    }

    /// Incremented whenever the text changes.
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether the text differs from what the session started with.
    pub fn is_modified(&self) -> bool {
        self.history.current() != self.baseline
    }

    /// Record the buffer's current text after an in-place edit.
    ///
    /// Returns `false` when the edit left the text unchanged; nothing is
    /// recorded then.
    pub fn commit_edit(&mut self) -> bool {
        let text = self.buffer.text();
        if !self.history.record(&text) {
            self.ensure_cursor_visible();
            return false;
        }
        debug!(
            revision = self.revision + 1,
            snapshots = self.history.len(),
            "recorded edit"
        );
        self.text_changed(&text);
        true
    }

    /// Replace the whole text.
    ///
    /// The buffer clamps its selection to the new text; callers that know
    /// where the selection belongs follow up with [`Self::schedule_selection`].
    pub fn apply_text(&mut self, text: &str, recording: Recording) {
        self.buffer.replace_text(text);
        if recording == Recording::Record && self.history.record(text) {
            debug!(snapshots = self.history.len(), "recorded replacement");
        }
        self.text_changed(text);
    }

    /// Queue `selection` to be applied after the next paint.
    ///
    /// Replaces any selection still waiting.
    pub fn schedule_selection(&mut self, selection: Selection) {
        self.pending_selection = Some(PendingSelection {
            revision: self.revision,
            selection,
        });
    }

    pub fn pending_selection(&self) -> Option<Selection> {
        self.pending_selection.map(|pending| pending.selection)
    }

    /// Apply the queued selection if the text has not changed since it was
    /// scheduled. Returns whether a selection was applied.
    pub fn apply_pending_selection(&mut self) -> bool {
        let Some(pending) = self.pending_selection.take() else {
            return false;
        };
        if pending.revision != self.revision {
            debug!(
                scheduled = pending.revision,
                current = self.revision,
                "discarding stale selection"
            );
            return false;
        }
        self.buffer.set_selection(pending.selection);
        self.ensure_cursor_visible();
        true
    }

    pub fn set_color_mode(&mut self, mode: ColorMode) {
        self.color_mode = mode;
        self.appearance = mode.resolve_with(self.terminal_hint.as_deref());
    }

    pub(super) fn resize(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
        self.reflow();
    }

    /// Lines available to the preview in its current mode.
    pub fn preview_line_count(&self) -> usize {
        match self.preview_mode {
            PreviewMode::Rendered => self.document.line_count(),
            PreviewMode::Html => self.html_lines.len(),
        }
    }

    /// Re-layout both panes for the current text, size and split.
    pub(super) fn reflow(&mut self) {
        let text = self.buffer.text();
        self.reflow_text(&text);
    }

    fn text_changed(&mut self, text: &str) {
        self.revision += 1;
        self.derived = DerivedView::compute(text);
        self.reflow_text(text);
    }

    fn reflow_text(&mut self, text: &str) {
        let layout = self.layout();
        let width = layout.preview_body.width.max(1);
        if !self.document.is_current(text, width) {
            self.document = Document::parse(text, width);
            self.html_lines = wrap_plain(&self.derived.html, usize::from(width));
        }
        self.sync_preview_viewport();

        self.editor_viewport.set_height(layout.editor_text.height);
        self.editor_viewport.set_total_lines(self.buffer.line_count());
        self.ensure_cursor_visible();
    }

    pub(super) fn sync_preview_viewport(&mut self) {
        let height = self.layout().preview_body.height;
        self.preview_viewport.set_height(height);
        self.preview_viewport
            .set_total_lines(self.preview_line_count());
    }

    /// Scroll the editor so the cursor is on screen in both directions.
    pub(super) fn ensure_cursor_visible(&mut self) {
        let cursor = self.buffer.cursor();
        self.editor_viewport.ensure_visible(cursor.line);

        let width = self.layout().editor_text.width as usize;
        let line = self.buffer.line_at(cursor.line).unwrap_or_default();
        let column = display_column(&line, cursor.col);
        if width == 0 || column < self.editor_scroll_col {
            self.editor_scroll_col = column;
        } else if column >= self.editor_scroll_col + width {
            self.editor_scroll_col = column + 1 - width;
        }
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

/// Hard-wrap `text` at `width` display columns, one entry per row.
fn wrap_plain(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    for line in text.lines() {
        let mut row = String::new();
        let mut row_width = 0;
        for ch in line.chars() {
            let w = ch.width().unwrap_or(0);
            if row_width + w > width && !row.is_empty() {
                rows.push(std::mem::take(&mut row));
                row_width = 0;
            }
            row.push(ch);
            row_width += w;
        }
        rows.push(row);
    }
    rows
}

// Implement Default for Model to allow std::mem::take
impl Default for Model {
    fn default() -> Self {
        Self::new("", (80, 24))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_plain_splits_long_lines() {
        assert_eq!(wrap_plain("abcdef\ngh", 4), vec!["abcd", "ef", "gh"]);
    }

    #[test]
    fn test_wrap_plain_keeps_empty_lines() {
        assert_eq!(wrap_plain("a\n\nb\n", 10), vec!["a", "", "b"]);
    }

    #[test]
    fn test_preview_mode_toggles() {
        assert_eq!(PreviewMode::Rendered.toggle(), PreviewMode::Html);
        assert_eq!(PreviewMode::Html.toggle(), PreviewMode::Rendered);
    }
}
