use super::*;
use crate::app::{Message, Model, update};
use crate::editor::FormatAction;
use ratatui::Terminal;
use ratatui::backend::TestBackend;

fn create_test_terminal() -> Terminal<TestBackend> {
    let backend = TestBackend::new(100, 30);
    Terminal::new(backend).unwrap()
}

fn create_test_model(text: &str) -> Model {
    Model::new(text, (100, 30))
}

fn draw(model: &Model) -> Vec<String> {
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(model, frame)).unwrap();
    let buffer = terminal.backend().buffer();
    (0..buffer.area.height)
        .map(|y| {
            (0..buffer.area.width)
                .map(|x| buffer[(x, y)].symbol())
                .collect::<String>()
        })
        .collect()
}

fn screen_contains(rows: &[String], needle: &str) -> bool {
    rows.iter().any(|row| row.contains(needle))
}

#[test]
fn test_render_shows_header_and_pane_titles() {
    let rows = draw(&create_test_model("hello"));
    assert!(rows[0].contains(APP_TITLE));
    assert!(rows[0].contains(SPLIT_BADGE));
    assert!(rows[0].contains("Theme: GitHub Dark"));
    assert!(screen_contains(&rows, "EDITOR"));
    assert!(screen_contains(&rows, "PREVIEW"));
}

#[test]
fn test_render_footer_counts() {
    let rows = draw(&create_test_model("one two\nthree"));
    assert!(screen_contains(&rows, "Lines: 2"));
    assert!(screen_contains(&rows, "Words: 3"));
}

#[test]
fn test_render_toolbar_glyphs() {
    let model = create_test_model("");
    let rows = draw(&model);
    let toolbar_row = &rows[usize::from(model.layout().toolbar.y)];
    for action in FormatAction::ALL {
        assert!(toolbar_row.contains(action.glyph()), "missing {}", action.glyph());
    }
}

#[test]
fn test_render_line_numbers_and_text() {
    let rows = draw(&create_test_model("alpha\nbeta"));
    let first_text_row = &rows[3];
    assert!(first_text_row.contains(" 1 alpha"));
    assert!(rows[4].contains(" 2 beta"));
}

#[test]
fn test_render_preview_shows_heading_text() {
    let model = create_test_model("# Greetings\n\nSome body text.");
    let rows = draw(&model);
    let preview_x = usize::from(model.layout().preview_body.x);
    let preview: Vec<String> = rows
        .iter()
        .map(|row| row.chars().skip(preview_x).collect())
        .collect();
    assert!(screen_contains(&preview, "Greetings"));
    assert!(screen_contains(&preview, "Some body text."));
    assert!(!screen_contains(&preview, "# Greetings"));
}

#[test]
fn test_render_html_mode_shows_tags() {
    let model = update(create_test_model("# Title"), Message::TogglePreviewMode);
    let rows = draw(&model);
    assert!(screen_contains(&rows, "PREVIEW · HTML"));
    assert!(screen_contains(&rows, "<h1>Title</h1>"));
}

#[test]
fn test_render_modified_marker() {
    let model = create_test_model("");
    assert!(!screen_contains(&draw(&model), "[modified]"));
    let model = update(model, Message::InsertChar('x'));
    assert!(screen_contains(&draw(&model), "[modified]"));
}

#[test]
fn test_render_cursor_position_in_title() {
    let model = update(create_test_model("abc\ndef"), Message::MoveTo(1, 2));
    assert!(screen_contains(&draw(&model), "Ln 2, Col 3"));
}

#[test]
fn test_render_status_row_shows_file_label() {
    let mut model = create_test_model("");
    model.file_label = Some("notes.md".to_string());
    let rows = draw(&model);
    assert!(rows[29].contains("notes.md"));
    assert!(rows[29].contains("F1 help"));
}

#[test]
fn test_render_toast_replaces_status_row() {
    let model = update(create_test_model(""), Message::InsertChar('a'));
    let model = update(model, Message::Quit);
    let rows = draw(&model);
    assert!(rows[29].contains("[warn]"));
    assert!(rows[29].contains("Press Ctrl+Q again"));
}

#[test]
fn test_render_help_overlay() {
    let model = update(create_test_model(""), Message::ToggleHelp);
    let rows = draw(&model);
    assert!(screen_contains(&rows, "Help"));
    assert!(screen_contains(&rows, "Formatting"));
    assert!(screen_contains(&rows, "Alt+B"));
}

#[test]
fn test_help_lines_list_preferences_location() {
    let model = create_test_model("");
    let text: Vec<String> = help_lines(&model).iter().map(ToString::to_string).collect();
    assert!(text.iter().any(|line| line.contains("<not saved>")));
}

#[test]
fn test_render_divider_follows_split() {
    let model = update(create_test_model(""), Message::NudgeDivider(-20));
    let rows = draw(&model);
    let divider_x = usize::from(model.layout().divider.x);
    let cell: String = rows[5].chars().nth(divider_x).into_iter().collect();
    assert_eq!(cell, "│");
}

#[test]
fn test_render_tiny_terminal_does_not_panic() {
    let model = create_test_model("# Title\n\ntext");
    let mut terminal = Terminal::new(TestBackend::new(4, 3)).unwrap();
    terminal.draw(|frame| render(&model, frame)).unwrap();
}
