//! New/edit task dialog

use crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

use super::DialogResult;
use crate::task::{combine_reminder, split_reminder, Task, TaskId};
use crate::tui::components::render_text_field;
use crate::tui::styles::Theme;


const FIELD_COUNT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFormData {
    /// `None` for a new task
    pub id: Option<TaskId>,
    pub description: String,
    pub reminder: Option<String>,
}

pub struct TaskFormDialog {
    editing: Option<TaskId>,
    description: Input,
    date: Input,
    time: Input,
    focused_field: usize,
    error_message: Option<String>,
}

impl TaskFormDialog {
    pub fn new() -> Self {
        Self {
            editing: None,
            description: Input::default(),
            date: Input::default(),
            time: Input::default(),
            focused_field: 0,
            error_message: None,
        }
    }

    /// Form prefilled from an existing task
    pub fn edit(task: &Task) -> Self {
        let (date, time) = task
            .reminder
            .as_deref()
            .map(split_reminder)
            .unwrap_or_default();

        Self {
            editing: Some(task.id),
            description: Input::new(task.description.clone()),
            date: Input::new(date),
            time: Input::new(time),
            focused_field: 0,
            error_message: None,
        }
    }

    /// Form opened from the calendar with the date already chosen
    pub fn on_day(date: chrono::NaiveDate) -> Self {
        Self {
            date: Input::new(date.format("%Y-%m-%d").to_string()),
            ..Self::new()
        }
    }

    pub fn is_edit(&self) -> bool {
        self.editing.is_some()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> DialogResult<TaskFormData> {
        match key.code {
            KeyCode::Esc => DialogResult::Cancel,
            KeyCode::Enter => self.submit(),
            KeyCode::Tab | KeyCode::Down => {
                self.focused_field = (self.focused_field + 1) % FIELD_COUNT;
                DialogResult::Continue
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focused_field = (self.focused_field + FIELD_COUNT - 1) % FIELD_COUNT;
                DialogResult::Continue
            }
            _ => {
                self.current_input_mut().handle_event(&Event::Key(key));
                self.error_message = None;
                DialogResult::Continue
            }
        }
    }

    fn submit(&mut self) -> DialogResult<TaskFormData> {
        match combine_reminder(self.date.value(), self.time.value()) {
            Ok(reminder) => DialogResult::Submit(TaskFormData {
                id: self.editing,
                description: self.description.value().trim().to_string(),
                reminder,
            }),
            Err(e) => {
                self.error_message = Some(e.to_string());
                DialogResult::Continue
            }
        }
    }

    fn current_input_mut(&mut self) -> &mut Input {
        match self.focused_field {
            1 => &mut self.date,
            2 => &mut self.time,
            _ => &mut self.description,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let dialog_area = super::centered_rect(area, 60, 12);
        frame.render_widget(Clear, dialog_area);

        let title = if self.is_edit() {
            " Edit Task "
        } else {
            " New Task "
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .title(title)
            .title_style(Style::default().fg(theme.title).bold());

        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Min(1),
            ])
            .split(inner);

        let fields: [(&str, &Input, &str); FIELD_COUNT] = [
            ("Task:", &self.description, "What needs doing?"),
            ("Date:", &self.date, "YYYY-MM-DD (optional)"),
            ("Time:", &self.time, "HH:MM (optional)"),
        ];
        for (idx, (label, input, placeholder)) in fields.iter().enumerate() {
            render_text_field(
                frame,
                chunks[idx],
                label,
                input,
                idx == self.focused_field,
                Some(*placeholder),
                theme,
            );
        }

        if let Some(error) = &self.error_message {
            frame.render_widget(
                Paragraph::new(error.as_str()).style(Style::default().fg(theme.error)),
                chunks[3],
            );
        }

        let submit_label = if self.is_edit() { " save  " } else { " add  " };
        let hint = Line::from(vec![
            Span::styled("Tab", Style::default().fg(theme.hint)),
            Span::raw(" next field  "),
            Span::styled("Enter", Style::default().fg(theme.hint)),
            Span::raw(submit_label),
            Span::styled("Esc", Style::default().fg(theme.hint)),
            Span::raw(" cancel"),
        ]);
        frame.render_widget(Paragraph::new(hint), chunks[4]);
    }
}

impl Default for TaskFormDialog {
    fn default() -> Self {
        Self::new()
    }
}
