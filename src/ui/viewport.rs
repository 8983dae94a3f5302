//! Vertical scroll state for a pane.
//!
//! The preview pane scrolls freely through the rendered lines; the editor
//! pane follows the cursor with [`Viewport::ensure_visible`].

use std::ops::Range;

/// The visible window onto a list of lines.
///
/// # Example
///
/// ```
/// use splitmark::ui::viewport::Viewport;
///
/// let mut vp = Viewport::new(24, 100);
/// assert_eq!(vp.visible_range(), 0..24);
///
/// vp.scroll_down(10);
/// assert_eq!(vp.visible_range(), 10..34);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Viewport {
    height: u16,
    offset: usize,
    total_lines: usize,
}

impl Viewport {
    pub const fn new(height: u16, total_lines: usize) -> Self {
        Self {
            height,
            offset: 0,
            total_lines,
        }
    }

    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub const fn height(&self) -> u16 {
        self.height
    }

    pub const fn total_lines(&self) -> usize {
        self.total_lines
    }

    /// Lines currently on screen, clamped to the content.
    pub fn visible_range(&self) -> Range<usize> {
        let start = self.offset.min(self.total_lines);
        let end = (self.offset + self.height as usize).min(self.total_lines);
        start..end
    }

    /// Scroll position as a percentage (0-100).
    pub fn scroll_percent(&self) -> u8 {
        let max_offset = self.max_offset();
        if max_offset == 0 {
            return 100;
        }

        // Percentage value always 0-100
        #[allow(
            clippy::cast_precision_loss,
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss
        )]
        {
            ((self.offset as f64 / max_offset as f64) * 100.0).round() as u8
        }
    }

    pub const fn scroll_up(&mut self, n: usize) {
        self.offset = self.offset.saturating_sub(n);
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.offset = (self.offset + n).min(self.max_offset());
    }

    pub const fn page_up(&mut self) {
        self.scroll_up(self.height as usize);
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.height as usize);
    }

    pub const fn go_to_top(&mut self) {
        self.offset = 0;
    }

    pub const fn go_to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    /// Scroll the least amount needed for `line` to be on screen.
    pub fn ensure_visible(&mut self, line: usize) {
        let height = self.height as usize;
        if height == 0 {
            self.offset = line.min(self.max_offset());
            return;
        }
        if line < self.offset {
            self.offset = line;
        } else if line >= self.offset + height {
            self.offset = line + 1 - height;
        }
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn set_height(&mut self, height: u16) {
        self.height = height;
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn set_total_lines(&mut self, total: usize) {
        self.total_lines = total;
        self.offset = self.offset.min(self.max_offset());
    }

    const fn max_offset(&self) -> usize {
        self.total_lines.saturating_sub(self.height as usize)
    }
}
