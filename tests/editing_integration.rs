use splitmark::app::{Message, Model, update};
use splitmark::document::LineType;
use splitmark::editor::FormatAction;

fn run(text: &str, msgs: Vec<Message>) -> Model {
    msgs.into_iter()
        .fold(Model::new(text, (100, 30)), update)
}

#[test]
fn test_typing_a_document_then_undoing_everything() {
    let typed = "# Hi";
    let mut msgs: Vec<Message> = typed.chars().map(Message::InsertChar).collect();
    let model = run("", msgs.clone());
    assert_eq!(model.buffer.text(), typed);
    assert_eq!(model.history.len(), typed.chars().count() + 1);
    let heading = model.document.visible_lines(0, 1)[0];
    assert_eq!(*heading.line_type(), LineType::Heading(1));
    assert_eq!(heading.content(), "Hi");

    msgs.extend(typed.chars().map(|_| Message::Undo));
    let model = run("", msgs);
    assert_eq!(model.buffer.text(), "");
    assert_eq!(model.derived.word_count, 0);
    assert_eq!(model.history.len(), typed.chars().count() + 1);
}

#[test]
fn test_every_toolbar_action_changes_text_and_can_be_undone() {
    for action in FormatAction::ALL {
        let model = run("word", vec![Message::SelectAll, Message::Format(action)]);
        assert_ne!(model.buffer.text(), "word", "{action:?}");
        assert!(model.pending_selection().is_some(), "{action:?}");

        let model = update(model, Message::Undo);
        assert_eq!(model.buffer.text(), "word", "{action:?}");
    }
}

#[test]
fn test_formatted_selection_lands_on_content() {
    let mut model = run(
        "say hello",
        vec![
            Message::MoveTo(0, 4),
            Message::SelectTo(0, 9),
            Message::Format(FormatAction::InlineCode),
        ],
    );
    assert_eq!(model.buffer.text(), "say `hello`");
    assert!(model.apply_pending_selection());
    assert_eq!(model.buffer.selected_text(), "hello");
}

#[test]
fn test_html_tracks_each_edit() {
    let model = run(
        "",
        vec![
            Message::InsertText("- [x] done".to_string()),
            Message::SplitLine,
            Message::SplitLine,
            Message::InsertText("| a | b |\n| - | - |\n| 1 | 2 |".to_string()),
        ],
    );
    assert!(model.derived.html.contains("checkbox"));
    assert!(model.derived.html.contains("<table>"));
    assert_eq!(model.derived.line_count, 5);
}
