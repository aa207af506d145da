//! Full-screen rendering of the TUI against the in-memory backend

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use taskdeck::api::mock::MockApi;
use taskdeck::api::AssistantReply;
use taskdeck::client::TaskClient;
use taskdeck::config::Config;
use taskdeck::task::Task;
use taskdeck::tui::{Action, App};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

async fn started(tasks: Vec<Task>) -> App<MockApi> {
    let mut app = App::new(TaskClient::new(MockApi::with_tasks(tasks)), &Config::default());
    app.start().await;
    app
}

fn screen(app: &App<MockApi>) -> String {
    let mut terminal = Terminal::new(TestBackend::new(120, 32)).unwrap();
    terminal.draw(|f| app.render(f)).unwrap();
    let buffer = terminal.backend().buffer();
    let width = buffer.area.width as usize;
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[tokio::test]
async fn test_toggle_marks_row_and_counter() {
    let mut app = started(vec![
        Task::new(1, "Buy milk").with_reminder("2024-03-01T09:00"),
    ])
    .await;
    let before = screen(&app);
    assert!(before.contains("[ ] Buy milk"));
    assert!(before.contains("Completed: 0"));

    app.handle_key(key(KeyCode::Char(' '))).await;

    let after = screen(&app);
    assert!(after.contains("[x] Buy milk"));
    assert!(after.contains("Mar 1, 2024 09:00"));
    assert!(after.contains("Completed: 1"));
}

#[tokio::test]
async fn test_chat_transcript_is_rendered() {
    let mut app = started(vec![Task::new(1, "Buy milk"), Task::new(2, "Walk dog")]).await;
    app.client()
        .api()
        .push_chat_reply(AssistantReply::call("viewTasks", serde_json::json!({})));

    app.perform(Action::Chat("what do I have?".to_string())).await;

    let screen = screen(&app);
    assert!(screen.contains("you: what do I have?"));
    assert!(screen.contains("Here are your tasks:"));
    assert!(screen.contains("2. Walk dog"));
}

#[tokio::test]
async fn test_chat_add_updates_list() {
    let mut app = started(vec![]).await;
    app.client().api().push_chat_reply(AssistantReply::call(
        "addTask",
        serde_json::json!({"description": "Water plants"}),
    ));

    app.perform(Action::Chat("add water plants".to_string())).await;

    let screen = screen(&app);
    assert!(screen.contains("1. [ ] Water plants"));
    assert!(screen.contains("Total: 1"));
}

#[tokio::test]
async fn test_nothing_to_undo_toast() {
    let mut app = started(vec![Task::new(1, "Buy milk")]).await;

    app.handle_key(key(KeyCode::Char('u'))).await;

    assert_eq!(app.toast().unwrap().message, "Nothing to undo");
    assert!(screen(&app).contains("Nothing to undo"));
}
