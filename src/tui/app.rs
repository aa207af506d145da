//! Main TUI application

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use std::time::{Duration, Instant};

use super::home::HomeView;
use super::styles::Theme;
use crate::api::TaskApi;
use crate::chat::{ChatRelay, Followup};
use crate::client::view::Summary;
use crate::client::{Notice, Refresh, TaskClient};
use crate::config::Config;
use crate::task::TaskId;

struct Toast {
    notice: Notice,
    shown_at: Instant,
}

pub struct App<A> {
    client: TaskClient<A>,
    chat: ChatRelay,
    home: HomeView,
    theme: Theme,
    toast: Option<Toast>,
    toast_duration: Duration,
    should_quit: bool,
}

impl<A: TaskApi> App<A> {
    pub fn new(client: TaskClient<A>, config: &Config) -> Self {
        let today = chrono::Local::now().date_naive();
        Self {
            client,
            chat: ChatRelay::new(),
            home: HomeView::new(today, config.ui.week_starts_monday),
            theme: Theme::named(&config.theme.name),
            toast: None,
            toast_duration: Duration::from_secs(config.ui.notice_seconds),
            should_quit: false,
        }
    }

    pub fn client(&self) -> &TaskClient<A> {
        &self.client
    }

    pub fn home(&self) -> &HomeView {
        &self.home
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Initial load of the collection
    pub async fn start(&mut self) {
        self.perform(Action::Reload).await;
    }

    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    ) -> Result<()> {
        terminal.clear()?;
        terminal.draw(|f| self.render(f))?;

        self.start().await;
        terminal.draw(|f| self.render(f))?;

        loop {
            // Poll with short timeout for responsive input
            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key).await;
                        terminal.draw(|f| self.render(f))?;
                    }
                }
            }

            if self.should_quit {
                break;
            }

            if self.expire_toast(Instant::now()) {
                terminal.draw(|f| self.render(f))?;
            }
        }

        Ok(())
    }

    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        self.home.render(
            frame,
            area,
            &self.theme,
            Summary::of(self.client.tasks()),
            self.chat.transcript(),
            self.toast.as_ref().map(|t| &t.notice),
        );
    }

    pub async fn handle_key(&mut self, key: KeyEvent) {
        if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
            self.should_quit = true;
            return;
        }

        if let Some(action) = self.home.handle_key(key) {
            self.perform(action).await;
        }
    }

    /// Run one action to completion. Requests are awaited inline, so the
    /// view never interleaves two operations.
    pub async fn perform(&mut self, action: Action) {
        let refresh = match action {
            Action::Quit => {
                self.should_quit = true;
                Refresh::NONE
            }
            Action::Reload => self.client.load_all().await,
            Action::Create {
                description,
                reminder,
            } => self.client.create(&description, reminder).await,
            Action::Toggle(id) => self.client.toggle_completion(id).await,
            Action::BeginEdit(id) => {
                if let Some(task) = self.client.get(id) {
                    self.home.open_edit(task);
                }
                Refresh::NONE
            }
            Action::Edit {
                id,
                description,
                reminder,
            } => self.client.edit(id, &description, reminder).await,
            Action::Delete(id) => self.client.remove(id).await,
            Action::Undo => self.client.undo_delete().await,
            Action::Reset => self.client.reset_all().await,
            Action::AssistantReset(confirmed) => {
                let refresh = if confirmed {
                    self.client.reset_all().await
                } else {
                    Refresh::NONE
                };
                self.chat.record_reset(refresh.any());
                refresh
            }
            Action::Chat(message) => {
                let outcome = self.chat.send(&message, &mut self.client).await;
                if outcome.followup == Followup::ConfirmReset {
                    self.home.confirm_assistant_reset();
                }
                outcome.refresh
            }
        };

        self.home.apply(refresh, self.client.tasks());
        self.show_notices();
    }

    /// Surface the most severe pending notice
    fn show_notices(&mut self) {
        let notices = self.client.take_notices();
        if let Some(notice) = notices.into_iter().max_by_key(|n| n.level) {
            self.toast = Some(Toast {
                notice,
                shown_at: Instant::now(),
            });
        }
    }

    fn expire_toast(&mut self, now: Instant) -> bool {
        match &self.toast {
            Some(toast) if now.duration_since(toast.shown_at) >= self.toast_duration => {
                self.toast = None;
                true
            }
            _ => false,
        }
    }

    pub fn toast(&self) -> Option<&Notice> {
        self.toast.as_ref().map(|t| &t.notice)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    Reload,
    Create {
        description: String,
        reminder: Option<String>,
    },
    Toggle(TaskId),
    /// Open the edit form for a task
    BeginEdit(TaskId),
    Edit {
        id: TaskId,
        description: String,
        reminder: Option<String>,
    },
    Delete(TaskId),
    Undo,
    Reset,
    /// The user's answer to a reset the assistant asked for
    AssistantReset(bool),
    Chat(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockApi;
    use crate::client::NoticeLevel;
    use crate::task::Task;
    use ratatui::backend::TestBackend;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    async fn app_with(tasks: Vec<Task>) -> App<MockApi> {
        let mut app = App::new(
            TaskClient::new(MockApi::with_tasks(tasks)),
            &Config::default(),
        );
        app.start().await;
        app
    }

    fn screen(app: &App<MockApi>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[tokio::test]
    async fn test_toggle_shows_completed_counter() {
        let mut app = app_with(vec![
            Task::new(1, "Buy milk").with_reminder("2024-03-01T09:00")
        ])
        .await;

        app.handle_key(key(KeyCode::Char(' '))).await;

        assert!(app.client().tasks()[0].completed);
        let screen = screen(&app);
        assert!(screen.contains("[x] Buy milk"));
        assert!(screen.contains("Completed: 1"));
        assert!(screen.contains("Pending: 0"));
    }

    #[tokio::test]
    async fn test_delete_then_undo_restores_row() {
        let mut app = app_with(vec![Task::new(1, "Buy milk"), Task::new(2, "Walk dog")]).await;

        app.handle_key(key(KeyCode::Char('d'))).await;
        assert_eq!(app.home().rows().len(), 1);
        assert_eq!(app.toast().unwrap().message, "Task deleted");

        app.handle_key(key(KeyCode::Char('u'))).await;
        assert_eq!(app.home().rows().len(), 2);
        assert!(app
            .home()
            .rows()
            .iter()
            .any(|r| r.description == "Buy milk"));
    }

    #[tokio::test]
    async fn test_failed_load_shows_error_toast() {
        let api = MockApi::new();
        api.set_offline(true);
        let mut app = App::new(TaskClient::new(api), &Config::default());

        app.start().await;

        let toast = app.toast().unwrap();
        assert_eq!(toast.level, NoticeLevel::Error);
        assert!(screen(&app).contains("Is the server reachable?"));
    }

    #[tokio::test]
    async fn test_reset_requires_confirmation() {
        let mut app = app_with(vec![Task::new(1, "Buy milk")]).await;

        app.handle_key(key(KeyCode::Char('R'))).await;
        assert!(app.home().has_dialog());
        assert_eq!(app.client().tasks().len(), 1);

        app.handle_key(key(KeyCode::Char('y'))).await;
        assert!(app.client().tasks().is_empty());
        assert!(screen(&app).contains("Total: 0"));
    }

    #[tokio::test]
    async fn test_assistant_reset_declined_keeps_tasks() {
        let mut app = app_with(vec![Task::new(1, "Buy milk")]).await;
        app.client()
            .api()
            .push_chat_reply(crate::api::AssistantReply::call(
                "resetAll",
                serde_json::json!({}),
            ));

        app.perform(Action::Chat("clear everything".into())).await;
        assert!(app.home().has_dialog());

        app.handle_key(key(KeyCode::Char('n'))).await;
        assert_eq!(app.client().tasks().len(), 1);
        let last = app.chat.transcript().last().unwrap();
        assert_eq!(last.text, "Reset cancelled.");
    }

    #[tokio::test]
    async fn test_toast_expires() {
        let mut app = app_with(vec![]).await;
        app.client.notify(Notice::info("Task added"));
        app.show_notices();

        assert!(!app.expire_toast(Instant::now()));
        let later = Instant::now() + Duration::from_secs(Config::default().ui.notice_seconds);
        assert!(app.expire_toast(later));
        assert!(app.toast().is_none());
    }

    #[tokio::test]
    async fn test_ctrl_c_quits_while_typing() {
        let mut app = app_with(vec![]).await;
        app.handle_key(key(KeyCode::Tab)).await;
        app.handle_key(key(KeyCode::Tab)).await;

        app.handle_key(key(KeyCode::Char('q'))).await;
        assert!(!app.should_quit());

        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
            .await;
        assert!(app.should_quit());
    }
}
