use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::editor::FormatAction;

use super::style::EditorPalette;

/// Columns between neighbouring buttons.
const BUTTON_GAP: u16 = 1;

/// Button rectangles for every toolbar action that fits in `area`.
///
/// Each button is its glyph padded by one space on both sides.
pub fn toolbar_buttons(area: Rect) -> Vec<(FormatAction, Rect)> {
    let mut buttons = Vec::with_capacity(FormatAction::ALL.len());
    if area.height == 0 {
        return buttons;
    }
    let right = area.x + area.width;
    let mut x = area.x + 1;
    for action in FormatAction::ALL {
        let glyph_width = u16::try_from(action.glyph().width()).unwrap_or(u16::MAX);
        let width = glyph_width.saturating_add(2);
        if x.saturating_add(width) > right {
            break;
        }
        buttons.push((action, Rect::new(x, area.y, width, 1)));
        x += width + BUTTON_GAP;
    }
    buttons
}

/// The toolbar action under (`column`, `row`), if any.
pub fn button_at(area: Rect, column: u16, row: u16) -> Option<FormatAction> {
    toolbar_buttons(area)
        .into_iter()
        .find(|(_, rect)| rect.contains(Position::new(column, row)))
        .map(|(action, _)| action)
}

pub fn render_toolbar(palette: &EditorPalette, frame: &mut Frame, area: Rect) {
    let base = Style::default().bg(palette.header_bg).fg(palette.title);
    frame.render_widget(Paragraph::new("").style(base), area);

    let button_style = Style::default()
        .bg(palette.button_bg)
        .fg(palette.button_fg)
        .add_modifier(Modifier::BOLD);
    for (action, rect) in toolbar_buttons(area) {
        let label = format!(" {} ", action.glyph());
        frame.render_widget(Paragraph::new(label).style(button_style), rect);
    }
}
