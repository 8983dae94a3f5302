use tracing::{debug, info};

use crate::app::Model;
use crate::app::model::Recording;
use crate::config::{ColorMode, EditorTheme};
use crate::editor::{Direction, FormatAction};

use super::ToastLevel;

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editing
    /// Insert a character at the cursor, replacing the selection
    InsertChar(char),
    /// Insert a string (paste, Tab), replacing the selection
    InsertText(String),
    /// Split line at cursor (Enter)
    SplitLine,
    /// Delete the selection or the character before the cursor (Backspace)
    DeleteBack,
    /// Delete the selection or the character at the cursor (Delete)
    DeleteForward,

    // Cursor; the flag extends the selection
    MoveCursor(Direction, bool),
    MoveHome(bool),
    MoveEnd(bool),
    MoveWordLeft(bool),
    MoveWordRight(bool),
    MoveToStart(bool),
    MoveToEnd(bool),
    /// Place the cursor at (line, col), e.g. from a mouse click
    MoveTo(usize, usize),
    /// Extend the selection to (line, col), e.g. from a mouse drag
    SelectTo(usize, usize),
    SelectAll,

    // Formatting and history
    /// Apply a toolbar action to the selection
    Format(FormatAction),
    Undo,
    Redo,

    // Scrolling
    EditorScrollUp(usize),
    EditorScrollDown(usize),
    PreviewScrollUp(usize),
    PreviewScrollDown(usize),
    PreviewPageUp,
    PreviewPageDown,
    /// Switch the preview between rendered markdown and HTML source
    TogglePreviewMode,

    // Appearance
    CycleEditorTheme,
    SetEditorTheme(EditorTheme),
    CycleColorMode,
    SetColorMode(ColorMode),

    // Layout
    /// Mouse pressed on the divider
    BeginDividerDrag,
    /// Divider dragged to a screen column
    DragDivider(u16),
    EndDividerDrag,
    /// Move the divider by percentage points
    NudgeDivider(i16),

    // Help
    ToggleHelp,
    HideHelp,
    HelpScrollUp(usize),
    HelpScrollDown(usize),

    // Window
    /// Terminal resized
    Resize(u16, u16),

    // Application
    Quit,
}

/// Pure state transition: apply `msg` to `model`.
///
/// Side effects (preference writes) run afterwards in the event loop.
pub fn update(mut model: Model, msg: Message) -> Model {
    if !matches!(msg, Message::Quit) {
        model.quit_confirmed = false;
    }

    match msg {
        // Editing
        Message::InsertChar(ch) => {
            model.buffer.insert_char(ch);
            model.commit_edit();
        }
        Message::InsertText(text) => {
            if !text.is_empty() {
                model.buffer.insert_str(&text);
                model.commit_edit();
            }
        }
        Message::SplitLine => {
            model.buffer.split_line();
            model.commit_edit();
        }
        Message::DeleteBack => {
            if model.buffer.delete_back() {
                model.commit_edit();
            }
        }
        Message::DeleteForward => {
            if model.buffer.delete_forward() {
                model.commit_edit();
            }
        }

        // Cursor
        Message::MoveCursor(direction, extend) => {
            model.buffer.move_cursor(direction, extend);
            model.ensure_cursor_visible();
        }
        Message::MoveHome(extend) => {
            model.buffer.move_home(extend);
            model.ensure_cursor_visible();
        }
        Message::MoveEnd(extend) => {
            model.buffer.move_end(extend);
            model.ensure_cursor_visible();
        }
        Message::MoveWordLeft(extend) => {
            model.buffer.move_word_left(extend);
            model.ensure_cursor_visible();
        }
        Message::MoveWordRight(extend) => {
            model.buffer.move_word_right(extend);
            model.ensure_cursor_visible();
        }
        Message::MoveToStart(extend) => {
            model.buffer.move_to_start(extend);
            model.ensure_cursor_visible();
        }
        Message::MoveToEnd(extend) => {
            model.buffer.move_to_end(extend);
            model.ensure_cursor_visible();
        }
        Message::MoveTo(line, col) => {
            model.buffer.move_to(line, col);
            model.ensure_cursor_visible();
        }
        Message::SelectTo(line, col) => {
            model.buffer.select_to(line, col);
            model.ensure_cursor_visible();
        }
        Message::SelectAll => {
            model.buffer.select_all();
            model.ensure_cursor_visible();
        }

        // Formatting and history
        Message::Format(action) => {
            let text = model.buffer.text();
            let edit = action.apply(&text, model.buffer.selection());
            debug!(action = action.label(), "format");
            model.apply_text(&edit.text, Recording::Record);
            model.schedule_selection(edit.selection);
        }
        Message::Undo => {
            if let Some(text) = model.history.undo().map(str::to_owned) {
                model.apply_text(&text, Recording::Skip);
            }
        }
        Message::Redo => {
            if let Some(text) = model.history.redo().map(str::to_owned) {
                model.apply_text(&text, Recording::Skip);
            }
        }

        // Scrolling
        Message::EditorScrollUp(n) => model.editor_viewport.scroll_up(n),
        Message::EditorScrollDown(n) => model.editor_viewport.scroll_down(n),
        Message::PreviewScrollUp(n) => model.preview_viewport.scroll_up(n),
        Message::PreviewScrollDown(n) => model.preview_viewport.scroll_down(n),
        Message::PreviewPageUp => model.preview_viewport.page_up(),
        Message::PreviewPageDown => model.preview_viewport.page_down(),
        Message::TogglePreviewMode => {
            model.preview_mode = model.preview_mode.toggle();
            model.preview_viewport.go_to_top();
            model.sync_preview_viewport();
        }

        // Appearance
        Message::CycleEditorTheme => {
            model.editor_theme = model.editor_theme.next();
            info!(theme = model.editor_theme.id(), "editor theme changed");
        }
        Message::SetEditorTheme(theme) => {
            model.editor_theme = theme;
            info!(theme = theme.id(), "editor theme changed");
        }
        Message::CycleColorMode => {
            model.set_color_mode(model.color_mode.next());
            info!(mode = model.color_mode.id(), "color mode changed");
        }
        Message::SetColorMode(mode) => {
            model.set_color_mode(mode);
            info!(mode = mode.id(), "color mode changed");
        }

        // Layout
        Message::BeginDividerDrag => model.split.begin_drag(),
        Message::DragDivider(column) => {
            if model.split.is_dragging() {
                let body = model.layout().body;
                model.split.drag_to(column, body);
                model.reflow();
            }
        }
        Message::EndDividerDrag => model.split.end_drag(),
        Message::NudgeDivider(delta) => {
            model.split.nudge(delta);
            model.reflow();
        }

        // Help
        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
            model.help_scroll_offset = 0;
        }
        Message::HideHelp => {
            model.help_visible = false;
            model.help_scroll_offset = 0;
        }
        Message::HelpScrollUp(n) => {
            model.help_scroll_offset = model.help_scroll_offset.saturating_sub(n);
        }
        Message::HelpScrollDown(n) => {
            let max = crate::ui::help_lines(&model).len().saturating_sub(1);
            model.help_scroll_offset = (model.help_scroll_offset + n).min(max);
        }

        // Window
        Message::Resize(width, height) => model.resize(width, height),

        // Application
        Message::Quit => {
            if model.is_modified() && !model.quit_confirmed {
                model.show_toast(
                    ToastLevel::Warning,
                    "Edits are not saved anywhere! Press Ctrl+Q again to quit",
                );
                model.quit_confirmed = true;
            } else {
                model.should_quit = true;
            }
        }
    }
    model
}
