use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Position;

use crate::app::{App, Message, Model};
use crate::editor::{Direction, FormatAction, normalize_text};
use crate::ui::layout::{SPLIT_STEP_PERCENT, ScreenLayout, char_at_column};

use super::event_loop::ResizeDebouncer;

/// Text inserted by the Tab key.
const TAB_TEXT: &str = "  ";
/// Lines moved per mouse wheel notch.
const WHEEL_LINES: usize = 3;

impl App {
    pub(super) fn handle_event(
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => Self::handle_key(*key, model),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Paste(text) => Some(Message::InsertText(normalize_text(text))),
            Event::Resize(w, h) => {
                tracing::trace!(width = w, height = h, "resize queued");
                resize_debouncer.queue(*w, *h, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return match key.code {
                KeyCode::Up => Some(Message::HelpScrollUp(1)),
                KeyCode::Down => Some(Message::HelpScrollDown(1)),
                KeyCode::PageUp => Some(Message::HelpScrollUp(10)),
                KeyCode::PageDown => Some(Message::HelpScrollDown(10)),
                KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    Some(Message::Quit)
                }
                _ => Some(Message::HideHelp),
            };
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);

        match key.code {
            // Commands
            KeyCode::Char(c) if ctrl => match c.to_ascii_lowercase() {
                'q' | 'c' => Some(Message::Quit),
                'a' => Some(Message::SelectAll),
                'z' if shift || c == 'Z' => Some(Message::Redo),
                'z' => Some(Message::Undo),
                'y' => Some(Message::Redo),
                't' => Some(Message::CycleEditorTheme),
                'l' => Some(Message::CycleColorMode),
                'p' => Some(Message::TogglePreviewMode),
                _ => None,
            },
            KeyCode::Char(c) if alt => FormatAction::from_shortcut(c).map(Message::Format),

            // Text
            KeyCode::Char(c) => Some(Message::InsertChar(c)),
            KeyCode::Enter => Some(Message::SplitLine),
            KeyCode::Tab => Some(Message::InsertText(TAB_TEXT.to_string())),
            KeyCode::Backspace => Some(Message::DeleteBack),
            KeyCode::Delete => Some(Message::DeleteForward),

            // Divider
            KeyCode::Left if alt => Some(Message::NudgeDivider(-step())),
            KeyCode::Right if alt => Some(Message::NudgeDivider(step())),

            // Cursor
            KeyCode::Left if ctrl => Some(Message::MoveWordLeft(shift)),
            KeyCode::Right if ctrl => Some(Message::MoveWordRight(shift)),
            KeyCode::Left => Some(Message::MoveCursor(Direction::Left, shift)),
            KeyCode::Right => Some(Message::MoveCursor(Direction::Right, shift)),
            KeyCode::Up => Some(Message::MoveCursor(Direction::Up, shift)),
            KeyCode::Down => Some(Message::MoveCursor(Direction::Down, shift)),
            KeyCode::Home if ctrl => Some(Message::MoveToStart(shift)),
            KeyCode::End if ctrl => Some(Message::MoveToEnd(shift)),
            KeyCode::Home => Some(Message::MoveHome(shift)),
            KeyCode::End => Some(Message::MoveEnd(shift)),

            // Preview
            KeyCode::PageUp => Some(Message::PreviewPageUp),
            KeyCode::PageDown => Some(Message::PreviewPageDown),

            KeyCode::F(1) => Some(Message::ToggleHelp),

            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return match mouse.kind {
                MouseEventKind::ScrollUp => Some(Message::HelpScrollUp(WHEEL_LINES)),
                MouseEventKind::ScrollDown => Some(Message::HelpScrollDown(WHEEL_LINES)),
                MouseEventKind::Up(MouseButton::Left) => Some(Message::HideHelp),
                _ => None,
            };
        }

        let layout = model.layout();
        let (column, row) = (mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if layout.on_divider(column, row) {
                    return Some(Message::BeginDividerDrag);
                }
                if let Some(action) = crate::ui::button_at(layout.toolbar, column, row) {
                    return Some(Message::Format(action));
                }
                if layout
                    .editor_text
                    .union(layout.gutter)
                    .contains(Position::new(column, row))
                {
                    let (line, col) = text_position(model, &layout, column, row);
                    return Some(Message::MoveTo(line, col));
                }
                None
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if model.split.is_dragging() {
                    return Some(Message::DragDivider(column));
                }
                if layout.in_editor(column, row) {
                    let (line, col) = text_position(model, &layout, column, row);
                    return Some(Message::SelectTo(line, col));
                }
                None
            }
            MouseEventKind::Up(MouseButton::Left) if model.split.is_dragging() => {
                Some(Message::EndDividerDrag)
            }
            MouseEventKind::ScrollDown if layout.in_preview(column, row) => {
                Some(Message::PreviewScrollDown(WHEEL_LINES))
            }
            MouseEventKind::ScrollUp if layout.in_preview(column, row) => {
                Some(Message::PreviewScrollUp(WHEEL_LINES))
            }
            MouseEventKind::ScrollDown if layout.in_editor(column, row) => {
                Some(Message::EditorScrollDown(WHEEL_LINES))
            }
            MouseEventKind::ScrollUp if layout.in_editor(column, row) => {
                Some(Message::EditorScrollUp(WHEEL_LINES))
            }
            _ => None,
        }
    }
}

#[allow(clippy::cast_possible_wrap)]
const fn step() -> i16 {
    SPLIT_STEP_PERCENT as i16
}

/// Buffer (line, column) under a screen cell of the editor, clamped to the
/// text area and to the buffer.
fn text_position(model: &Model, layout: &ScreenLayout, column: u16, row: u16) -> (usize, usize) {
    let text = layout.editor_text;
    let rel_row = row.clamp(text.y, (text.y + text.height).saturating_sub(1).max(text.y)) - text.y;
    let line = (model.editor_viewport.offset() + usize::from(rel_row))
        .min(model.buffer.line_count().saturating_sub(1));
    let rel_col = usize::from(column.saturating_sub(text.x));
    let line_text = model.buffer.line_at(line).unwrap_or_default();
    let col = char_at_column(&line_text, model.editor_scroll_col + rel_col);
    (line, col)
}
