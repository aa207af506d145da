//! Home view - task list, calendar and chat panels

mod render;

#[cfg(test)]
mod tests;

use chrono::NaiveDate;
use crossterm::event::{Event, KeyCode, KeyEvent};
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

use super::app::Action;
use super::calendar::CalendarPanel;
use super::dialogs::{ConfirmAction, ConfirmDialog, DialogResult, TaskFormDialog};
use crate::client::view::{list_rows, ListRow, RowAction, RowHandlers};
use crate::client::Refresh;
use crate::task::{Task, TaskId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Tasks,
    Calendar,
    Chat,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Tasks => Focus::Calendar,
            Focus::Calendar => Focus::Chat,
            Focus::Chat => Focus::Tasks,
        }
    }

    fn prev(self) -> Self {
        match self {
            Focus::Tasks => Focus::Chat,
            Focus::Calendar => Focus::Tasks,
            Focus::Chat => Focus::Calendar,
        }
    }
}

/// Row affordances bound to app actions
struct RowKeys;

impl RowHandlers for RowKeys {
    type Output = Action;

    fn toggle(&self, id: TaskId) -> Action {
        Action::Toggle(id)
    }

    fn edit(&self, id: TaskId) -> Action {
        Action::BeginEdit(id)
    }

    fn delete(&self, id: TaskId) -> Action {
        Action::Delete(id)
    }
}

pub struct HomeView {
    rows: Vec<ListRow>,
    calendar: CalendarPanel,

    // UI state
    cursor: usize,
    focus: Focus,
    chat_input: Input,

    // Dialogs
    show_help: bool,
    form_dialog: Option<TaskFormDialog>,
    confirm_dialog: Option<ConfirmDialog>,
}

impl HomeView {
    pub fn new(today: NaiveDate, week_starts_monday: bool) -> Self {
        Self {
            rows: Vec::new(),
            calendar: CalendarPanel::new(today, week_starts_monday),
            cursor: 0,
            focus: Focus::Tasks,
            chat_input: Input::default(),
            show_help: false,
            form_dialog: None,
            confirm_dialog: None,
        }
    }

    /// Rebuild the parts of the view an operation invalidated. Counters are
    /// not kept here; they are computed from the collection at render time.
    pub fn apply(&mut self, refresh: Refresh, tasks: &[Task]) {
        if refresh.list {
            self.rows = list_rows(tasks);
            if self.cursor >= self.rows.len() {
                self.cursor = self.rows.len().saturating_sub(1);
            }
        }
        if refresh.calendar {
            self.calendar.sync(tasks);
        }
    }

    pub fn has_dialog(&self) -> bool {
        self.show_help || self.form_dialog.is_some() || self.confirm_dialog.is_some()
    }

    #[cfg(test)]
    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn rows(&self) -> &[ListRow] {
        &self.rows
    }

    #[cfg(test)]
    pub fn calendar(&self) -> &CalendarPanel {
        &self.calendar
    }

    pub fn selected_row(&self) -> Option<&ListRow> {
        self.rows.get(self.cursor)
    }

    pub fn open_edit(&mut self, task: &Task) {
        self.form_dialog = Some(TaskFormDialog::edit(task));
    }

    /// Ask before the assistant's reset request is carried out
    pub fn confirm_assistant_reset(&mut self) {
        self.confirm_dialog = Some(ConfirmDialog::reset_all(
            self.rows.len(),
            ConfirmAction::AssistantReset,
        ));
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        // Handle dialog input first
        if self.show_help {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')
            ) {
                self.show_help = false;
            }
            return None;
        }

        if let Some(dialog) = &mut self.form_dialog {
            return match dialog.handle_key(key) {
                DialogResult::Continue => None,
                DialogResult::Cancel => {
                    self.form_dialog = None;
                    None
                }
                DialogResult::Submit(data) => {
                    self.form_dialog = None;
                    Some(match data.id {
                        Some(id) => Action::Edit {
                            id,
                            description: data.description,
                            reminder: data.reminder,
                        },
                        None => Action::Create {
                            description: data.description,
                            reminder: data.reminder,
                        },
                    })
                }
            };
        }

        if let Some(dialog) = &mut self.confirm_dialog {
            let action = dialog.action();
            return match dialog.handle_key(key) {
                DialogResult::Continue => None,
                DialogResult::Cancel => {
                    self.confirm_dialog = None;
                    (action == ConfirmAction::AssistantReset)
                        .then_some(Action::AssistantReset(false))
                }
                DialogResult::Submit(()) => {
                    self.confirm_dialog = None;
                    Some(match action {
                        ConfirmAction::ResetAll => Action::Reset,
                        ConfirmAction::AssistantReset => Action::AssistantReset(true),
                    })
                }
            };
        }

        match key.code {
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return None;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.prev();
                return None;
            }
            _ => {}
        }

        match self.focus {
            Focus::Tasks => self.handle_tasks_key(key),
            Focus::Calendar => self.handle_calendar_key(key),
            Focus::Chat => self.handle_chat_key(key),
        }
    }

    fn handle_tasks_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('q') => return Some(Action::Quit),
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('j') | KeyCode::Down => self.move_cursor(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_cursor(-1),
            KeyCode::Char('g') | KeyCode::Home => self.cursor = 0,
            KeyCode::Char('G') | KeyCode::End => {
                self.cursor = self.rows.len().saturating_sub(1);
            }
            KeyCode::Char('n') => self.form_dialog = Some(TaskFormDialog::new()),
            KeyCode::Char(' ') | KeyCode::Char('x') => return self.bind_selected(RowAction::Toggle),
            KeyCode::Char('e') | KeyCode::Enter => return self.bind_selected(RowAction::Edit),
            KeyCode::Char('d') | KeyCode::Delete => return self.bind_selected(RowAction::Delete),
            KeyCode::Char('u') => return Some(Action::Undo),
            KeyCode::Char('r') | KeyCode::F(5) => return Some(Action::Reload),
            KeyCode::Char('R') => {
                if self.rows.is_empty() {
                    return None;
                }
                self.confirm_dialog = Some(ConfirmDialog::reset_all(
                    self.rows.len(),
                    ConfirmAction::ResetAll,
                ));
            }
            _ => {}
        }
        None
    }

    fn handle_calendar_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('q') => return Some(Action::Quit),
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('h') | KeyCode::Left => self.calendar.move_days(-1),
            KeyCode::Char('l') | KeyCode::Right => self.calendar.move_days(1),
            KeyCode::Char('k') | KeyCode::Up => self.calendar.move_days(-7),
            KeyCode::Char('j') | KeyCode::Down => self.calendar.move_days(7),
            KeyCode::Char('[') | KeyCode::PageUp => self.calendar.move_months(-1),
            KeyCode::Char(']') | KeyCode::PageDown => self.calendar.move_months(1),
            KeyCode::Char('t') => self.calendar.jump_to_today(),
            KeyCode::Enter => self.calendar.select(),
            KeyCode::Char('n') => {
                self.form_dialog = Some(TaskFormDialog::on_day(self.calendar.cursor()));
            }
            KeyCode::Esc => self.focus = Focus::Tasks,
            _ => {}
        }
        None
    }

    fn handle_chat_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => self.focus = Focus::Tasks,
            KeyCode::Enter => {
                let message = self.chat_input.value().trim().to_string();
                if message.is_empty() {
                    return None;
                }
                self.chat_input.reset();
                return Some(Action::Chat(message));
            }
            _ => {
                self.chat_input.handle_event(&Event::Key(key));
            }
        }
        None
    }

    fn bind_selected(&self, action: RowAction) -> Option<Action> {
        self.selected_row().map(|row| row.bind(action, &RowKeys))
    }

    fn move_cursor(&mut self, delta: i32) {
        if self.rows.is_empty() {
            return;
        }

        self.cursor = if delta < 0 {
            self.cursor.saturating_sub(delta.unsigned_abs() as usize)
        } else {
            (self.cursor + delta as usize).min(self.rows.len() - 1)
        };
    }
}
