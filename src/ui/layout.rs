//! Screen geometry shared by rendering and mouse hit-testing.

use ratatui::layout::{Constraint, Layout, Position, Rect};
use unicode_width::UnicodeWidthChar;

use super::DOCUMENT_LEFT_PADDING;

pub const MIN_SPLIT_PERCENT: u16 = 20;
pub const MAX_SPLIT_PERCENT: u16 = 80;
pub const DEFAULT_SPLIT_PERCENT: u16 = 50;
/// Keyboard nudge step for the divider.
pub const SPLIT_STEP_PERCENT: u16 = 5;

/// Share of the body given to the editor pane, plus divider drag state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitLayout {
    ratio_percent: u16,
    dragging: bool,
}

impl Default for SplitLayout {
    fn default() -> Self {
        Self::new(DEFAULT_SPLIT_PERCENT)
    }
}

impl SplitLayout {
    pub fn new(ratio_percent: u16) -> Self {
        Self {
            ratio_percent: ratio_percent.clamp(MIN_SPLIT_PERCENT, MAX_SPLIT_PERCENT),
            dragging: false,
        }
    }

    pub const fn ratio_percent(&self) -> u16 {
        self.ratio_percent
    }

    pub const fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn set_ratio(&mut self, ratio_percent: u16) {
        self.ratio_percent = ratio_percent.clamp(MIN_SPLIT_PERCENT, MAX_SPLIT_PERCENT);
    }

    /// Move the divider by `delta` percentage points.
    pub fn nudge(&mut self, delta: i16) {
        let next = i32::from(self.ratio_percent) + i32::from(delta);
        let clamped = next.clamp(
            i32::from(MIN_SPLIT_PERCENT),
            i32::from(MAX_SPLIT_PERCENT),
        );
        // Clamped into the u16 percent range above
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            self.ratio_percent = clamped as u16;
        }
    }

    pub const fn begin_drag(&mut self) {
        self.dragging = true;
    }

    pub const fn end_drag(&mut self) {
        self.dragging = false;
    }

    /// Place the divider under `column` of `body`.
    pub fn drag_to(&mut self, column: u16, body: Rect) {
        if body.width == 0 {
            return;
        }
        let offset = u32::from(column.saturating_sub(body.x));
        let percent = offset * 100 / u32::from(body.width);
        self.set_ratio(u16::try_from(percent).unwrap_or(MAX_SPLIT_PERCENT));
    }

    /// Split `body` into editor, divider and preview columns.
    pub fn columns(&self, body: Rect) -> [Rect; 3] {
        if body.width < 3 {
            return [body, Rect { width: 0, ..body }, Rect { width: 0, ..body }];
        }
        let usable = body.width - 1;
        let left = u16::try_from(u32::from(usable) * u32::from(self.ratio_percent) / 100)
            .unwrap_or(usable)
            .max(1);
        let right = usable - left;
        [
            Rect { width: left, ..body },
            Rect {
                x: body.x + left,
                width: 1,
                ..body
            },
            Rect {
                x: body.x + left + 1,
                width: right,
                ..body
            },
        ]
    }
}

/// Every region of the screen, computed once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreenLayout {
    pub header: Rect,
    /// Area between header and status row, split by the divider
    pub body: Rect,
    pub editor_title: Rect,
    pub toolbar: Rect,
    pub gutter: Rect,
    pub editor_text: Rect,
    pub editor_footer: Rect,
    pub divider: Rect,
    pub preview_title: Rect,
    /// Preview content, after the left padding
    pub preview_body: Rect,
    pub status: Rect,
}

impl ScreenLayout {
    pub fn compute(area: Rect, split: &SplitLayout, editor_line_count: usize) -> Self {
        let [header, body, status] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);

        let [editor, divider, preview] = split.columns(body);

        let [editor_title, toolbar, editor_main, editor_footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(editor);

        let gutter_width = (line_number_width(editor_line_count) + 2).min(editor_main.width);
        let gutter = Rect {
            width: gutter_width,
            ..editor_main
        };
        let editor_text = Rect {
            x: editor_main.x + gutter_width,
            width: editor_main.width - gutter_width,
            ..editor_main
        };

        let [preview_title, preview_main] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(preview);
        let padding = DOCUMENT_LEFT_PADDING.min(preview_main.width);
        let preview_body = Rect {
            x: preview_main.x + padding,
            width: preview_main.width - padding,
            ..preview_main
        };

        Self {
            header,
            body,
            editor_title,
            toolbar,
            gutter,
            editor_text,
            editor_footer,
            divider,
            preview_title,
            preview_body,
            status,
        }
    }

    /// Whether (`column`, `row`) falls on the divider.
    pub fn on_divider(&self, column: u16, row: u16) -> bool {
        self.divider.contains(Position::new(column, row))
    }

    /// Whether (`column`, `row`) is anywhere inside the editor pane.
    pub fn in_editor(&self, column: u16, row: u16) -> bool {
        let pane = self
            .editor_title
            .union(self.editor_footer)
            .union(self.gutter)
            .union(self.editor_text);
        pane.contains(Position::new(column, row))
    }

    pub fn in_preview(&self, column: u16, row: u16) -> bool {
        self.preview_title
            .union(self.preview_body)
            .contains(Position::new(column, row))
    }
}

/// Digits needed for the largest line number.
pub const fn line_number_width(total_lines: usize) -> u16 {
    if total_lines < 10 {
        1
    } else if total_lines < 100 {
        2
    } else if total_lines < 1_000 {
        3
    } else if total_lines < 10_000 {
        4
    } else if total_lines < 100_000 {
        5
    } else {
        6
    }
}

/// Display column at which character `char_idx` of `line` starts.
pub fn display_column(line: &str, char_idx: usize) -> usize {
    line.chars()
        .take(char_idx)
        .map(|ch| ch.width().unwrap_or(0))
        .sum()
}

/// Character index under display `column` of `line`, clamped to the line end.
pub fn char_at_column(line: &str, column: usize) -> usize {
    let mut width = 0;
    for (idx, ch) in line.chars().enumerate() {
        let w = ch.width().unwrap_or(0);
        if column < width + w.max(1) {
            return idx;
        }
        width += w;
    }
    line.chars().count()
}
