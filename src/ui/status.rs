use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, ToastLevel};

use super::style::ChromePalette;

const KEY_HINTS: &str =
    "F1 help  Ctrl+Z/Y undo/redo  Ctrl+T theme  Ctrl+L mode  Ctrl+P html  Ctrl+Q quit ";

/// Bottom row: the active toast, or the document name and key hints.
pub fn render_status_row(model: &Model, chrome: &ChromePalette, frame: &mut Frame, area: Rect) {
    if model.active_toast().is_some() {
        render_toast_bar(model, frame, area);
        return;
    }

    let style = Style::default().bg(chrome.status_bg).fg(chrome.status_fg);
    let name = model.file_label.as_deref().unwrap_or("untitled");
    let modified = if model.is_modified() { " [modified]" } else { "" };
    let undo = format!(
        "  history {}/{}",
        model.history.index() + 1,
        model.history.len()
    );
    frame.render_widget(
        Paragraph::new(format!(" {name}{modified}{undo}")).style(style),
        area,
    );
    frame.render_widget(
        Paragraph::new(KEY_HINTS).alignment(Alignment::Right),
        area,
    );
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!(" {prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
