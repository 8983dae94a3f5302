use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};
use unicode_width::UnicodeWidthChar;

use crate::app::{Model, PreviewMode};
use crate::config::Appearance;
use crate::document::RenderedLine;
use crate::editor::Selection;

use super::layout::{ScreenLayout, line_number_width};
use super::style::{ChromePalette, EditorPalette, style_for_inline, style_for_line_type};
use super::{overlays, status, toolbar};

pub const APP_TITLE: &str = "Markdown Editor";
pub const SPLIT_BADGE: &str = "Split View";

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let layout = ScreenLayout::compute(area, &model.split, model.buffer.line_count());
    let chrome = ChromePalette::for_appearance(model.appearance);
    let palette = EditorPalette::for_theme(model.editor_theme);

    render_header(model, &chrome, frame, layout.header);
    render_editor(model, &palette, frame, &layout);
    render_divider(model, &chrome, frame, layout.divider);
    render_preview(model, &chrome, frame, &layout);
    status::render_status_row(model, &chrome, frame, layout.status);

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    }
}

fn render_header(model: &Model, chrome: &ChromePalette, frame: &mut Frame, area: Rect) {
    let base = chrome.base();
    let title = Line::from(vec![
        Span::styled(format!(" {APP_TITLE} "), base.add_modifier(Modifier::BOLD)),
        Span::styled(
            format!(" {SPLIT_BADGE} "),
            Style::default().bg(chrome.badge_bg).fg(chrome.fg),
        ),
    ]);
    frame.render_widget(Paragraph::new(title).style(base), area);

    let mode = match (model.color_mode, model.appearance) {
        (crate::config::ColorMode::System, Appearance::Light) => "System (light)".to_string(),
        (crate::config::ColorMode::System, Appearance::Dark) => "System (dark)".to_string(),
        (mode, _) => mode.label().to_string(),
    };
    let settings = Line::from(vec![
        Span::styled("Theme: ", Style::default().fg(chrome.muted)),
        Span::raw(model.editor_theme.label()),
        Span::styled("  Mode: ", Style::default().fg(chrome.muted)),
        Span::raw(mode),
        Span::raw(" "),
    ]);
    frame.render_widget(
        Paragraph::new(settings).alignment(Alignment::Right),
        area,
    );
}

fn render_editor(model: &Model, palette: &EditorPalette, frame: &mut Frame, layout: &ScreenLayout) {
    let header = Style::default().bg(palette.header_bg).fg(palette.title);

    // Title row
    let cursor = model.buffer.cursor();
    let modified = if model.is_modified() { " [modified]" } else { "" };
    frame.render_widget(
        Paragraph::new(" EDITOR").style(header.add_modifier(Modifier::BOLD)),
        layout.editor_title,
    );
    frame.render_widget(
        Paragraph::new(format!("Ln {}, Col {}{modified} ", cursor.line + 1, cursor.col + 1))
            .alignment(Alignment::Right),
        layout.editor_title,
    );

    toolbar::render_toolbar(palette, frame, layout.toolbar);

    // Gutter and text scroll together
    let total_lines = model.buffer.line_count();
    let digits = line_number_width(total_lines) as usize;
    let start = model.editor_viewport.offset();
    let end = (start + layout.editor_text.height as usize).min(total_lines);
    let selection = model.buffer.selection();
    let head = model.buffer.head();

    let mut gutter: Vec<Line> = Vec::with_capacity(end.saturating_sub(start));
    let mut text: Vec<Line> = Vec::with_capacity(end.saturating_sub(start));
    for line_idx in start..end {
        let gutter_style = if line_idx == cursor.line {
            Style::default().fg(palette.fg)
        } else {
            Style::default().fg(palette.gutter_fg)
        };
        gutter.push(Line::styled(
            format!(" {:>digits$} ", line_idx + 1),
            gutter_style,
        ));

        let line_text = model.buffer.line_at(line_idx).unwrap_or_default();
        let has_newline = line_idx + 1 < total_lines;
        text.push(editor_line(
            &line_text,
            EditorLineContext {
                line_start: model.buffer.line_start(line_idx),
                has_newline,
                selection,
                head,
                scroll_col: model.editor_scroll_col,
                width: layout.editor_text.width as usize,
            },
            palette,
        ));
    }

    frame.render_widget(Clear, layout.gutter);
    frame.render_widget(
        Paragraph::new(gutter).style(Style::default().bg(palette.gutter_bg)),
        layout.gutter,
    );
    frame.render_widget(Clear, layout.editor_text);
    frame.render_widget(
        Paragraph::new(text).style(palette.text()),
        layout.editor_text,
    );

    let footer = format!(
        " Lines: {}  Words: {}",
        model.derived.line_count, model.derived.word_count
    );
    frame.render_widget(Paragraph::new(footer).style(header), layout.editor_footer);
}

#[derive(Debug, Clone, Copy)]
struct EditorLineContext {
    /// Character offset of the line's first character
    line_start: usize,
    has_newline: bool,
    selection: Selection,
    head: usize,
    /// First display column shown
    scroll_col: usize,
    width: usize,
}

/// One editor row: the visible slice of `line_text` with cursor and
/// selection highlights.
fn editor_line(line_text: &str, ctx: EditorLineContext, palette: &EditorPalette) -> Line<'static> {
    let style_at = |offset: usize| {
        if offset == ctx.head {
            palette.cursor()
        } else if ctx.selection.contains(offset) {
            palette.selected()
        } else {
            palette.text()
        }
    };

    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();
    let mut run_style = palette.text();
    let mut push = |ch: char, style: Style, spans: &mut Vec<Span<'static>>| {
        if style != run_style && !run.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut run), run_style));
        }
        run_style = style;
        run.push(ch);
    };

    let view_end = ctx.scroll_col + ctx.width;
    let mut column = 0;
    let mut char_count = 0;
    for (idx, ch) in line_text.chars().enumerate() {
        char_count = idx + 1;
        let w = ch.width().unwrap_or(0);
        if column >= ctx.scroll_col && column + w <= view_end {
            // Control characters are shown as blanks
            let shown = if w == 0 && ch.is_control() { ' ' } else { ch };
            push(shown, style_at(ctx.line_start + idx), &mut spans);
        }
        column += w;
        if column >= view_end {
            break;
        }
    }

    // The line break itself: a cursor parked at the end of the line, or a
    // selected newline, is drawn as one blank cell.
    if char_count == line_text.chars().count() && column >= ctx.scroll_col && column < view_end {
        let end_offset = ctx.line_start + char_count;
        if end_offset == ctx.head {
            push(' ', palette.cursor(), &mut spans);
        } else if ctx.has_newline && ctx.selection.contains(end_offset) {
            push(' ', palette.selected(), &mut spans);
        }
    }

    if !run.is_empty() {
        spans.push(Span::styled(run, run_style));
    }
    Line::from(spans)
}

fn render_divider(model: &Model, chrome: &ChromePalette, frame: &mut Frame, area: Rect) {
    if area.width == 0 {
        return;
    }
    let style = if model.split.is_dragging() {
        Style::default().fg(Color::Yellow).bg(chrome.bg)
    } else {
        Style::default().fg(chrome.divider).bg(chrome.bg)
    };
    let lines: Vec<Line> = (0..area.height).map(|_| Line::raw("│")).collect();
    frame.render_widget(Paragraph::new(lines).style(style), area);
}

fn render_preview(model: &Model, chrome: &ChromePalette, frame: &mut Frame, layout: &ScreenLayout) {
    let base = chrome.base();
    let title = match model.preview_mode {
        PreviewMode::Rendered => " PREVIEW",
        PreviewMode::Html => " PREVIEW · HTML",
    };
    frame.render_widget(
        Paragraph::new(title).style(base.fg(chrome.muted).add_modifier(Modifier::BOLD)),
        layout.preview_title,
    );
    frame.render_widget(
        Paragraph::new(format!("{}% ", model.preview_viewport.scroll_percent()))
            .style(Style::default().fg(chrome.muted))
            .alignment(Alignment::Right),
        layout.preview_title,
    );

    // The left padding column shares the preview background
    let outer = Rect {
        x: layout.divider.x + layout.divider.width,
        width: (layout.preview_body.x + layout.preview_body.width)
            .saturating_sub(layout.divider.x + layout.divider.width),
        ..layout.preview_body
    };
    frame.render_widget(Clear, outer);
    frame.render_widget(Paragraph::new("").style(base), outer);

    let offset = model.preview_viewport.offset();
    let height = layout.preview_body.height as usize;
    let content: Vec<Line> = match model.preview_mode {
        PreviewMode::Rendered => model
            .document
            .visible_lines(offset, height)
            .into_iter()
            .map(|line| preview_line(line, model.appearance))
            .collect(),
        PreviewMode::Html => model
            .html_lines
            .iter()
            .skip(offset)
            .take(height)
            .map(|line| Line::raw(line.clone()))
            .collect(),
    };
    frame.render_widget(Paragraph::new(content).style(base), layout.preview_body);
}

fn preview_line(line: &RenderedLine, appearance: Appearance) -> Line<'static> {
    let line_style = style_for_line_type(line.line_type(), appearance);
    match line.spans() {
        Some(spans) => Line::from(
            spans
                .iter()
                .map(|span| {
                    Span::styled(
                        span.text().to_string(),
                        style_for_inline(line_style, span.style(), appearance),
                    )
                })
                .collect::<Vec<_>>(),
        ),
        None => Line::styled(line.content().to_string(), line_style),
    }
}
