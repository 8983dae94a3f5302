use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::Model;
use crate::editor::FormatAction;

/// Every line of the help text, before scrolling.
pub fn help_lines(model: &Model) -> Vec<Line<'static>> {
    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let prefs = model
        .preferences_path
        .as_ref()
        .map_or_else(|| "<not saved>".to_string(), |p| p.display().to_string());

    let mut lines: Vec<Line<'static>> = Vec::new();

    lines.push(Line::styled("Editing", section_style));
    lines.push(Line::raw("  Type / Enter / Tab  Insert text"));
    lines.push(Line::raw("  Backspace / Delete  Delete character or selection"));
    lines.push(Line::raw("  Arrows, Home/End    Move cursor (Shift extends)"));
    lines.push(Line::raw("  Ctrl+Left/Right     Word movement"));
    lines.push(Line::raw("  Ctrl+Home/End       Document start / end"));
    lines.push(Line::raw("  Ctrl+A              Select all"));
    lines.push(Line::raw("  Ctrl+Z              Undo"));
    lines.push(Line::raw("  Ctrl+Y / Ctrl+Sh+Z  Redo"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Formatting", section_style));
    for action in FormatAction::ALL {
        let key = format!("Alt+{}", action.shortcut().to_ascii_uppercase());
        lines.push(Line::raw(format!(
            "  {key:<7} {:<11} {}",
            action.glyph(),
            action.label()
        )));
    }
    lines.push(Line::raw("  Click a toolbar button to apply it"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Preview", section_style));
    lines.push(Line::raw("  PageUp/PageDown     Scroll preview"));
    lines.push(Line::raw("  Mouse wheel         Scroll pane under pointer"));
    lines.push(Line::raw("  Ctrl+P              Rendered / HTML"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Layout", section_style));
    lines.push(Line::raw("  Alt+Left/Right      Move divider"));
    lines.push(Line::raw("  Drag divider        Resize panes"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Appearance", section_style));
    lines.push(Line::raw("  Ctrl+T              Next editor theme"));
    lines.push(Line::raw("  Ctrl+L              Light / Dark / System"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Other", section_style));
    lines.push(Line::raw("  F1                  Toggle help"));
    lines.push(Line::raw("  Ctrl+Q              Quit"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Preferences", section_style));
    lines.push(Line::raw(format!("  {prefs}")));

    lines
}

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(6).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let dim_style = Style::default().fg(Color::Indexed(245));
    let all_lines = help_lines(model);

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));
    let inner = block.inner(popup);

    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    // Reserve 1 row at bottom for footer hint
    let content_height_u16 = inner.height.saturating_sub(1);
    let content_height = content_height_u16 as usize;
    let max_scroll = all_lines.len().saturating_sub(content_height);
    let scroll = model.help_scroll_offset.min(max_scroll);

    let end = (scroll + content_height).min(all_lines.len());
    let visible: Vec<Line> = all_lines[scroll..end].to_vec();

    let content_area = Rect::new(inner.x, inner.y, inner.width, content_height_u16);
    frame.render_widget(Paragraph::new(visible), content_area);

    let footer_area = Rect::new(inner.x, inner.y + content_height_u16, inner.width, 1);
    let footer = Line::styled("Up/Down scroll \u{2502} Esc or F1 closes", dim_style);
    frame.render_widget(Paragraph::new(footer), footer_area);
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
