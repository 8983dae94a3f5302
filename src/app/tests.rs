use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use tempfile::tempdir;

use crate::config::{
    Appearance, ColorMode, EDITOR_THEME_KEY, EditorTheme, PreferenceStore, Preferences,
};
use crate::document::LineType;
use crate::editor::{Direction, FormatAction, Selection};
use crate::ui::layout::MIN_SPLIT_PERCENT;

use super::event_loop::ResizeDebouncer;
use super::{App, Message, Model, PreviewMode, Recording, STARTER_MARKDOWN, ToastLevel, update};

fn create_test_model(text: &str) -> Model {
    Model::new(text, (80, 24))
}

fn create_long_test_model() -> Model {
    let text: String = (1..=100).map(|i| format!("Line {i}\n")).collect();
    create_test_model(&text)
}

fn apply(model: Model, msgs: impl IntoIterator<Item = Message>) -> Model {
    msgs.into_iter().fold(model, update)
}

fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent::new(code, modifiers)
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

// --- Editing and history ---

#[test]
fn test_typing_records_one_snapshot_per_character() {
    let model = apply(
        create_test_model(""),
        [Message::InsertChar('h'), Message::InsertChar('i')],
    );
    assert_eq!(model.buffer.text(), "hi");
    assert_eq!(model.history.len(), 3);
    assert_eq!(model.history.current(), "hi");
}

#[test]
fn test_edit_recomputes_derived_view() {
    let model = create_test_model("one");
    assert_eq!(model.derived.word_count, 1);

    let model = apply(
        model,
        [
            Message::MoveToEnd(false),
            Message::SplitLine,
            Message::InsertText("two three".to_string()),
        ],
    );
    assert_eq!(model.derived.line_count, 2);
    assert_eq!(model.derived.word_count, 3);
    assert!(model.derived.html.contains("two three"));
}

#[test]
fn test_backspace_at_start_records_nothing() {
    let model = update(create_test_model("abc"), Message::DeleteBack);
    assert_eq!(model.buffer.text(), "abc");
    assert_eq!(model.history.len(), 1);
}

#[test]
fn test_undo_and_redo_never_grow_history() {
    let model = apply(
        create_test_model("a"),
        [
            Message::MoveToEnd(false),
            Message::InsertChar('b'),
            Message::InsertChar('c'),
        ],
    );
    assert_eq!(model.history.len(), 3);

    let model = update(model, Message::Undo);
    assert_eq!(model.buffer.text(), "ab");
    let model = update(model, Message::Undo);
    assert_eq!(model.buffer.text(), "a");
    let model = update(model, Message::Redo);
    assert_eq!(model.buffer.text(), "ab");
    assert_eq!(model.history.len(), 3);
    assert_eq!(model.history.index(), 1);
}

#[test]
fn test_undo_at_start_and_redo_at_end_are_noops() {
    let model = create_test_model("start");
    let revision = model.revision();
    let model = apply(model, [Message::Undo, Message::Redo]);
    assert_eq!(model.buffer.text(), "start");
    assert_eq!(model.revision(), revision);
}

#[test]
fn test_edit_after_undo_discards_redo() {
    let model = apply(
        create_test_model(""),
        [
            Message::InsertChar('a'),
            Message::InsertChar('b'),
            Message::Undo,
            Message::InsertChar('x'),
        ],
    );
    assert_eq!(model.buffer.text(), "ax");
    assert!(!model.history.can_redo());
    assert_eq!(model.history.len(), 3);
}

#[test]
fn test_undo_clamps_cursor_into_shorter_text() {
    let model = apply(
        create_test_model(""),
        [Message::InsertText("hello world".to_string()), Message::Undo],
    );
    assert_eq!(model.buffer.text(), "");
    assert_eq!(model.buffer.head(), 0);
}

#[test]
fn test_is_modified_tracks_baseline() {
    let model = create_test_model("base");
    assert!(!model.is_modified());
    let model = update(model, Message::InsertChar('x'));
    assert!(model.is_modified());
    let model = update(model, Message::Undo);
    assert!(!model.is_modified());
}

// --- Formatting and the pending selection ---

#[test]
fn test_bold_with_empty_selection_selects_placeholder_after_apply() {
    let mut model = apply(
        create_test_model("hello "),
        [Message::MoveToEnd(false), Message::Format(FormatAction::Bold)],
    );
    assert_eq!(model.buffer.text(), "hello **bold text**");
    assert_eq!(model.history.len(), 2);
    assert_eq!(model.pending_selection(), Some(Selection::new(8, 17)));

    assert!(model.apply_pending_selection());
    assert_eq!(model.buffer.selection(), Selection::new(8, 17));
    assert_eq!(model.buffer.selected_text(), "bold text");
    assert_eq!(model.pending_selection(), None);
}

#[test]
fn test_italic_wraps_selected_word() {
    let mut model = create_test_model("hello world");
    model.buffer.set_selection(Selection::new(6, 11));
    let mut model = update(model, Message::Format(FormatAction::Italic));
    model.apply_pending_selection();
    assert_eq!(model.buffer.text(), "hello *world*");
    assert_eq!(model.buffer.selected_text(), "world");
}

#[test]
fn test_heading_prefixes_current_line_and_keeps_cursor() {
    let mut model = apply(
        create_test_model("line one\nline two"),
        [
            Message::MoveTo(1, 4),
            Message::Format(FormatAction::Heading),
        ],
    );
    model.apply_pending_selection();
    assert_eq!(model.buffer.text(), "line one\n## line two");
    assert_eq!(model.buffer.selection(), Selection::collapsed(16));
}

#[test]
fn test_stale_pending_selection_is_discarded() {
    let mut model = apply(
        create_test_model(""),
        [
            Message::Format(FormatAction::Link),
            Message::InsertChar('!'),
        ],
    );
    assert!(!model.apply_pending_selection());
    assert_eq!(model.pending_selection(), None);
}

#[test]
fn test_newer_pending_selection_replaces_older() {
    let mut model = create_test_model("abcdef");
    model.schedule_selection(Selection::new(0, 1));
    model.schedule_selection(Selection::new(2, 4));
    assert!(model.apply_pending_selection());
    assert_eq!(model.buffer.selected_text(), "cd");
}

#[test]
fn test_format_then_undo_restores_text() {
    let model = apply(
        create_test_model("text"),
        [Message::Format(FormatAction::Quote), Message::Undo],
    );
    assert_eq!(model.buffer.text(), "text");
}

#[test]
fn test_apply_text_skip_leaves_history_alone() {
    let mut model = create_test_model("a");
    model.apply_text("b", Recording::Skip);
    assert_eq!(model.buffer.text(), "b");
    assert_eq!(model.history.len(), 1);
    model.apply_text("c", Recording::Record);
    assert_eq!(model.history.len(), 2);
}

// --- Preview ---

#[test]
fn test_preview_follows_text() {
    let model = update(create_test_model(""), Message::InsertText("# Title".to_string()));
    let first = model.document.visible_lines(0, 1)[0];
    assert_eq!(*first.line_type(), LineType::Heading(1));
    assert_eq!(first.content(), "Title");
}

#[test]
fn test_preview_width_follows_split() {
    let model = create_test_model("text");
    let before = model.document.width();
    let model = update(model, Message::NudgeDivider(-20));
    assert!(model.document.width() > before);
    assert_eq!(model.document.width(), model.layout().preview_body.width);
}

#[test]
fn test_toggle_preview_mode_switches_line_source() {
    let model = create_test_model("# Title\n\nbody");
    let rendered_lines = model.preview_viewport.total_lines();
    let model = update(model, Message::TogglePreviewMode);
    assert_eq!(model.preview_mode, PreviewMode::Html);
    assert!(model.html_lines.iter().any(|l| l.contains("<h1>Title</h1>")));
    assert_eq!(model.preview_viewport.total_lines(), model.html_lines.len());
    let model = update(model, Message::TogglePreviewMode);
    assert_eq!(model.preview_viewport.total_lines(), rendered_lines);
}

#[test]
fn test_preview_scroll_is_clamped() {
    let model = update(create_long_test_model(), Message::PreviewScrollDown(10_000));
    let max = model
        .preview_viewport
        .total_lines()
        .saturating_sub(usize::from(model.preview_viewport.height()));
    assert_eq!(model.preview_viewport.offset(), max);
}

#[test]
fn test_resize_reflows_preview() {
    let model = create_test_model("text");
    let model = update(model, Message::Resize(120, 40));
    assert_eq!(model.terminal_size(), (120, 40));
    assert_eq!(model.document.width(), model.layout().preview_body.width);
}

// --- Editor scrolling ---

#[test]
fn test_editor_scrolls_to_follow_cursor() {
    let model = update(create_long_test_model(), Message::MoveToEnd(false));
    let visible = model.editor_viewport.visible_range();
    assert!(visible.contains(&model.buffer.cursor().line));
    assert!(model.editor_viewport.offset() > 0);

    let model = update(model, Message::MoveToStart(false));
    assert_eq!(model.editor_viewport.offset(), 0);
}

#[test]
fn test_editor_scrolls_horizontally_on_long_lines() {
    let long = "x".repeat(200);
    let model = update(create_test_model(&long), Message::MoveEnd(false));
    let width = model.layout().editor_text.width as usize;
    assert!(model.editor_scroll_col > 0);
    assert!(200 < model.editor_scroll_col + width);
}

// --- Appearance ---

#[test]
fn test_cycle_editor_theme() {
    let model = create_test_model("");
    assert_eq!(model.editor_theme, EditorTheme::GithubDark);
    let model = update(model, Message::CycleEditorTheme);
    assert_eq!(model.editor_theme, EditorTheme::Dracula);
}

#[test]
fn test_color_mode_resolves_appearance() {
    let model = update(
        create_test_model(""),
        Message::SetColorMode(ColorMode::Light),
    );
    assert_eq!(model.appearance, Appearance::Light);
    let model = update(model, Message::CycleColorMode);
    assert_eq!(model.color_mode, ColorMode::Dark);
    assert_eq!(model.appearance, Appearance::Dark);
}

#[test]
fn test_system_mode_uses_terminal_hint() {
    let model = create_test_model("")
        .with_terminal_hint(Some("0;15".to_string()))
        .with_preferences(Preferences {
            editor_theme: EditorTheme::Monokai,
            color_mode: ColorMode::System,
        });
    assert_eq!(model.editor_theme, EditorTheme::Monokai);
    assert_eq!(model.appearance, Appearance::Light);
}

#[test]
fn test_theme_change_is_persisted() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("preferences.json");
    let mut app = App::new("").with_store(PreferenceStore::open(&path));
    let mut model = app.initial_model((80, 24));

    app.dispatch(&mut model, Message::SetEditorTheme(EditorTheme::SolarizedDark));
    app.dispatch(&mut model, Message::SetColorMode(ColorMode::Light));

    let reloaded = PreferenceStore::load(&path).unwrap();
    assert_eq!(reloaded.get(EDITOR_THEME_KEY), Some("solarized-dark"));
    assert_eq!(
        Preferences::from_store(&reloaded).color_mode,
        ColorMode::Light
    );
    assert!(model.active_toast().is_none());
}

#[test]
fn test_failed_preference_write_shows_toast() {
    let dir = tempdir().unwrap();
    // A directory where the file should be makes the write fail.
    let path = dir.path().join("preferences.json");
    std::fs::create_dir(&path).unwrap();
    let mut app = App::new("").with_store(PreferenceStore::open(&path));
    let mut model = app.initial_model((80, 24));

    app.dispatch(&mut model, Message::CycleEditorTheme);
    let (_, level) = model.active_toast().unwrap();
    assert_eq!(level, ToastLevel::Error);
}

#[test]
fn test_initial_model_carries_app_settings() {
    let app = App::new(STARTER_MARKDOWN)
        .with_file_label(Some("notes.md".to_string()))
        .with_preferences(Preferences {
            editor_theme: EditorTheme::Dracula,
            color_mode: ColorMode::Dark,
        });
    let model = app.initial_model((100, 30));
    assert_eq!(model.file_label.as_deref(), Some("notes.md"));
    assert_eq!(model.editor_theme, EditorTheme::Dracula);
    assert_eq!(model.buffer.text(), STARTER_MARKDOWN);
    assert!(!model.is_modified());
    assert!(model.preferences_path.is_none());
}

#[test]
fn test_gutter_and_footer_agree_on_line_count() {
    for text in ["a\rb\u{2028}c", "one\u{85}two\nthree", "x\r\ny"] {
        let model = create_test_model(text);
        assert_eq!(model.buffer.line_count(), model.derived.line_count, "{text:?}");
    }
}

#[test]
fn test_loaded_text_is_normalised() {
    let app = App::new("a\r\nb\rc\td");
    let model = app.initial_model((80, 24));
    assert_eq!(model.buffer.text(), "a\nb\nc   d");
    assert_eq!(model.buffer.line_count(), 3);
    assert_eq!(model.derived.line_count, 3);
    assert!(!model.is_modified());
}

#[test]
fn test_heading_lands_on_line_under_cursor_after_carriage_return() {
    let mut app = App::new("a\rb");
    let mut model = app.initial_model((80, 24));
    app.dispatch(&mut model, Message::MoveTo(1, 1));
    app.dispatch(&mut model, Message::Format(FormatAction::Heading));
    assert_eq!(model.buffer.text(), "a\n## b");
}

#[test]
fn test_tabs_expand_so_clicks_match_columns() {
    let app = App::new("\tx");
    let model = app.initial_model((80, 24));
    let text = model.layout().editor_text;
    let msg = App::handle_mouse(
        mouse(MouseEventKind::Down(MouseButton::Left), text.x + 4, text.y),
        &model,
    );
    assert_eq!(msg, Some(Message::MoveTo(0, 4)));
}

#[test]
fn test_dispatch_applies_waiting_selection_first() {
    let mut app = App::new("");
    let mut model = app.initial_model((80, 24));
    app.dispatch(&mut model, Message::Format(FormatAction::Bold));
    // The next keystroke types over the placeholder.
    app.dispatch(&mut model, Message::InsertChar('x'));
    assert_eq!(model.buffer.text(), "**x**");
}

// --- Layout ---

#[test]
fn test_nudge_divider_clamps() {
    let model = apply(
        create_test_model(""),
        [Message::NudgeDivider(-50), Message::NudgeDivider(-5)],
    );
    assert_eq!(model.split.ratio_percent(), MIN_SPLIT_PERCENT);
}

#[test]
fn test_divider_drag_only_while_dragging() {
    let model = update(create_test_model(""), Message::DragDivider(10));
    assert_eq!(model.split.ratio_percent(), 50);

    let model = apply(
        model,
        [
            Message::BeginDividerDrag,
            Message::DragDivider(60),
            Message::EndDividerDrag,
        ],
    );
    assert_eq!(model.split.ratio_percent(), 75);
    assert!(!model.split.is_dragging());
}

// --- Help and quit ---

#[test]
fn test_help_toggle_and_scroll() {
    let model = apply(
        create_test_model(""),
        [Message::ToggleHelp, Message::HelpScrollDown(3), Message::HelpScrollUp(1)],
    );
    assert!(model.help_visible);
    assert_eq!(model.help_scroll_offset, 2);
    let model = update(model, Message::HideHelp);
    assert!(!model.help_visible);
    assert_eq!(model.help_scroll_offset, 0);
}

#[test]
fn test_quit_unmodified_quits_immediately() {
    let model = update(create_test_model("text"), Message::Quit);
    assert!(model.should_quit);
}

#[test]
fn test_quit_with_edits_requires_confirmation() {
    let model = apply(
        create_test_model(""),
        [Message::InsertChar('a'), Message::Quit],
    );
    assert!(!model.should_quit);
    assert!(model.quit_confirmed);
    assert_eq!(model.active_toast().map(|(_, l)| l), Some(ToastLevel::Warning));

    let model = update(model, Message::Quit);
    assert!(model.should_quit);
}

#[test]
fn test_other_message_resets_quit_confirmation() {
    let model = apply(
        create_test_model(""),
        [
            Message::InsertChar('a'),
            Message::Quit,
            Message::MoveCursor(Direction::Left, false),
            Message::Quit,
        ],
    );
    assert!(!model.should_quit);
}

// --- Key mapping ---

#[test]
fn test_key_bindings() {
    let model = create_test_model("");
    let cases = [
        (key(KeyCode::Char('a'), KeyModifiers::NONE), Some(Message::InsertChar('a'))),
        (key(KeyCode::Char('A'), KeyModifiers::SHIFT), Some(Message::InsertChar('A'))),
        (key(KeyCode::Char('z'), KeyModifiers::CONTROL), Some(Message::Undo)),
        (
            key(KeyCode::Char('Z'), KeyModifiers::CONTROL | KeyModifiers::SHIFT),
            Some(Message::Redo),
        ),
        (key(KeyCode::Char('y'), KeyModifiers::CONTROL), Some(Message::Redo)),
        (key(KeyCode::Char('a'), KeyModifiers::CONTROL), Some(Message::SelectAll)),
        (key(KeyCode::Char('q'), KeyModifiers::CONTROL), Some(Message::Quit)),
        (key(KeyCode::Char('t'), KeyModifiers::CONTROL), Some(Message::CycleEditorTheme)),
        (key(KeyCode::Char('l'), KeyModifiers::CONTROL), Some(Message::CycleColorMode)),
        (key(KeyCode::Char('p'), KeyModifiers::CONTROL), Some(Message::TogglePreviewMode)),
        (
            key(KeyCode::Char('b'), KeyModifiers::ALT),
            Some(Message::Format(FormatAction::Bold)),
        ),
        (
            key(KeyCode::Char('o'), KeyModifiers::ALT),
            Some(Message::Format(FormatAction::OrderedList)),
        ),
        (key(KeyCode::Char('x'), KeyModifiers::ALT), None),
        (key(KeyCode::Enter, KeyModifiers::NONE), Some(Message::SplitLine)),
        (key(KeyCode::Tab, KeyModifiers::NONE), Some(Message::InsertText("  ".to_string()))),
        (
            key(KeyCode::Right, KeyModifiers::SHIFT),
            Some(Message::MoveCursor(Direction::Right, true)),
        ),
        (
            key(KeyCode::Left, KeyModifiers::CONTROL | KeyModifiers::SHIFT),
            Some(Message::MoveWordLeft(true)),
        ),
        (key(KeyCode::Left, KeyModifiers::ALT), Some(Message::NudgeDivider(-5))),
        (key(KeyCode::Home, KeyModifiers::CONTROL), Some(Message::MoveToStart(false))),
        (key(KeyCode::End, KeyModifiers::NONE), Some(Message::MoveEnd(false))),
        (key(KeyCode::PageDown, KeyModifiers::NONE), Some(Message::PreviewPageDown)),
        (key(KeyCode::F(1), KeyModifiers::NONE), Some(Message::ToggleHelp)),
    ];
    for (event, expected) in cases {
        assert_eq!(App::handle_key(event, &model), expected, "{event:?}");
    }
}

#[test]
fn test_any_key_closes_help() {
    let model = update(create_test_model(""), Message::ToggleHelp);
    assert_eq!(
        App::handle_key(key(KeyCode::Char('x'), KeyModifiers::NONE), &model),
        Some(Message::HideHelp)
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Down, KeyModifiers::NONE), &model),
        Some(Message::HelpScrollDown(1))
    );
}

#[test]
fn test_paste_normalises_line_endings() {
    let model = create_test_model("");
    let mut debouncer = ResizeDebouncer::new(100);
    let msg = App::handle_event(
        &Event::Paste("a\r\nb\rc\td".to_string()),
        &model,
        0,
        &mut debouncer,
    );
    assert_eq!(msg, Some(Message::InsertText("a\nb\nc   d".to_string())));
}

#[test]
fn test_resize_event_is_debounced() {
    let model = create_test_model("");
    let mut debouncer = ResizeDebouncer::new(100);
    let msg = App::handle_event(&Event::Resize(100, 30), &model, 0, &mut debouncer);
    assert_eq!(msg, None);
    assert_eq!(debouncer.take_ready(100), Some((100, 30)));
}

// --- Mouse mapping ---

#[test]
fn test_click_toolbar_button_formats() {
    let model = create_test_model("");
    let layout = model.layout();
    let (action, rect) = crate::ui::toolbar_buttons(layout.toolbar)[1];
    assert_eq!(action, FormatAction::Italic);
    let msg = App::handle_mouse(
        mouse(MouseEventKind::Down(MouseButton::Left), rect.x, rect.y),
        &model,
    );
    assert_eq!(msg, Some(Message::Format(FormatAction::Italic)));
}

#[test]
fn test_click_in_text_places_cursor() {
    let model = create_test_model("first\nsecond");
    let text = model.layout().editor_text;
    let msg = App::handle_mouse(
        mouse(MouseEventKind::Down(MouseButton::Left), text.x + 3, text.y + 1),
        &model,
    );
    assert_eq!(msg, Some(Message::MoveTo(1, 3)));

    let msg = App::handle_mouse(
        mouse(MouseEventKind::Down(MouseButton::Left), text.x + 20, text.y),
        &model,
    );
    assert_eq!(msg, Some(Message::MoveTo(0, 5)));
}

#[test]
fn test_drag_in_text_extends_selection() {
    let model = create_test_model("first\nsecond");
    let text = model.layout().editor_text;
    let msg = App::handle_mouse(
        mouse(MouseEventKind::Drag(MouseButton::Left), text.x + 2, text.y),
        &model,
    );
    assert_eq!(msg, Some(Message::SelectTo(0, 2)));
}

#[test]
fn test_divider_drag_sequence() {
    let model = create_test_model("");
    let divider = model.layout().divider;
    let msg = App::handle_mouse(
        mouse(MouseEventKind::Down(MouseButton::Left), divider.x, divider.y + 2),
        &model,
    );
    assert_eq!(msg, Some(Message::BeginDividerDrag));

    let model = update(model, Message::BeginDividerDrag);
    let msg = App::handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 30, 5), &model);
    assert_eq!(msg, Some(Message::DragDivider(30)));
    let msg = App::handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 30, 5), &model);
    assert_eq!(msg, Some(Message::EndDividerDrag));
}

#[test]
fn test_wheel_scrolls_pane_under_pointer() {
    let model = create_test_model("");
    let layout = model.layout();
    let over_preview = App::handle_mouse(
        mouse(MouseEventKind::ScrollDown, layout.preview_body.x, layout.preview_body.y),
        &model,
    );
    assert_eq!(over_preview, Some(Message::PreviewScrollDown(3)));
    let over_editor = App::handle_mouse(
        mouse(MouseEventKind::ScrollUp, layout.editor_text.x, layout.editor_text.y),
        &model,
    );
    assert_eq!(over_editor, Some(Message::EditorScrollUp(3)));
}
