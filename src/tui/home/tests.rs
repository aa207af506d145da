//! Tests for HomeView

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::Terminal;

use super::{Focus, HomeView};
use crate::client::view::Summary;
use crate::client::Refresh;
use crate::task::{Task, TaskId};
use crate::tui::app::Action;
use crate::tui::styles::Theme;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

fn sample_tasks() -> Vec<Task> {
    vec![
        Task::new(3, "Buy milk").with_reminder("2024-03-01T09:00"),
        Task::new(8, "Walk dog"),
        Task::new(12, "Dentist").with_reminder("2024-03-04T14:30"),
    ]
}

fn view_with(tasks: &[Task]) -> HomeView {
    let mut view = HomeView::new(today(), true);
    view.apply(Refresh::ALL, tasks);
    view
}

fn type_text(view: &mut HomeView, text: &str) {
    for c in text.chars() {
        view.handle_key(key(KeyCode::Char(c)));
    }
}

fn screen(view: &HomeView, tasks: &[Task]) -> String {
    let mut terminal = Terminal::new(TestBackend::new(120, 32)).unwrap();
    terminal
        .draw(|f| {
            let area = f.area();
            view.render(f, area, &Theme::default(), Summary::of(tasks), &[], None)
        })
        .unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

#[test]
fn test_initial_cursor_position() {
    let view = view_with(&sample_tasks());
    assert_eq!(view.selected_row().unwrap().id, TaskId(3));
    assert_eq!(view.focus(), Focus::Tasks);
}

#[test]
fn test_q_returns_quit_action() {
    let mut view = view_with(&[]);
    assert_eq!(view.handle_key(key(KeyCode::Char('q'))), Some(Action::Quit));
}

#[test]
fn test_question_mark_toggles_help() {
    let mut view = view_with(&[]);
    view.handle_key(key(KeyCode::Char('?')));
    assert!(view.has_dialog());
    view.handle_key(key(KeyCode::Esc));
    assert!(!view.has_dialog());
}

#[test]
fn test_cursor_moves_and_clamps() {
    let mut view = view_with(&sample_tasks());
    view.handle_key(key(KeyCode::Char('k')));
    assert_eq!(view.selected_row().unwrap().position, 1);

    view.handle_key(key(KeyCode::Char('j')));
    view.handle_key(key(KeyCode::Down));
    view.handle_key(key(KeyCode::Down));
    assert_eq!(view.selected_row().unwrap().position, 3);

    view.handle_key(key(KeyCode::Char('g')));
    assert_eq!(view.selected_row().unwrap().position, 1);
    view.handle_key(key(KeyCode::Char('G')));
    assert_eq!(view.selected_row().unwrap().position, 3);
}

#[test]
fn test_row_actions_carry_real_ids() {
    let mut view = view_with(&sample_tasks());
    view.handle_key(key(KeyCode::Char('j')));

    assert_eq!(
        view.handle_key(key(KeyCode::Char(' '))),
        Some(Action::Toggle(TaskId(8)))
    );
    assert_eq!(
        view.handle_key(key(KeyCode::Char('e'))),
        Some(Action::BeginEdit(TaskId(8)))
    );
    assert_eq!(
        view.handle_key(key(KeyCode::Char('d'))),
        Some(Action::Delete(TaskId(8)))
    );
}

#[test]
fn test_row_actions_on_empty_list() {
    let mut view = view_with(&[]);
    assert_eq!(view.handle_key(key(KeyCode::Char(' '))), None);
    assert_eq!(view.handle_key(key(KeyCode::Char('d'))), None);
    assert_eq!(view.handle_key(key(KeyCode::Char('R'))), None);
    assert!(!view.has_dialog());
}

#[test]
fn test_cursor_clamped_after_rows_shrink() {
    let tasks = sample_tasks();
    let mut view = view_with(&tasks);
    view.handle_key(key(KeyCode::Char('G')));

    view.apply(Refresh::ALL, &tasks[..1]);
    assert_eq!(view.selected_row().unwrap().id, TaskId(3));
}

#[test]
fn test_new_task_form_submits_create() {
    let mut view = view_with(&[]);
    view.handle_key(key(KeyCode::Char('n')));
    assert!(view.has_dialog());

    type_text(&mut view, "Buy milk");
    view.handle_key(key(KeyCode::Tab));
    type_text(&mut view, "2024-03-01");
    view.handle_key(key(KeyCode::Tab));
    type_text(&mut view, "09:00");

    assert_eq!(
        view.handle_key(key(KeyCode::Enter)),
        Some(Action::Create {
            description: "Buy milk".to_string(),
            reminder: Some("2024-03-01T09:00".to_string()),
        })
    );
    assert!(!view.has_dialog());
}

#[test]
fn test_edit_form_submits_edit() {
    let tasks = sample_tasks();
    let mut view = view_with(&tasks);
    view.open_edit(&tasks[0]);

    assert_eq!(
        view.handle_key(key(KeyCode::Enter)),
        Some(Action::Edit {
            id: TaskId(3),
            description: "Buy milk".to_string(),
            reminder: Some("2024-03-01T09:00".to_string()),
        })
    );
}

#[test]
fn test_reset_confirm_flow() {
    let mut view = view_with(&sample_tasks());
    assert_eq!(view.handle_key(key(KeyCode::Char('R'))), None);
    assert!(view.has_dialog());
    assert_eq!(view.handle_key(key(KeyCode::Char('y'))), Some(Action::Reset));

    view.handle_key(key(KeyCode::Char('R')));
    assert_eq!(view.handle_key(key(KeyCode::Esc)), None);
    assert!(!view.has_dialog());
}

#[test]
fn test_assistant_reset_answer_is_reported() {
    let mut view = view_with(&sample_tasks());
    view.confirm_assistant_reset();
    assert_eq!(
        view.handle_key(key(KeyCode::Char('n'))),
        Some(Action::AssistantReset(false))
    );

    view.confirm_assistant_reset();
    assert_eq!(
        view.handle_key(key(KeyCode::Char('y'))),
        Some(Action::AssistantReset(true))
    );
}

#[test]
fn test_tab_cycles_focus() {
    let mut view = view_with(&[]);
    view.handle_key(key(KeyCode::Tab));
    assert_eq!(view.focus(), Focus::Calendar);
    view.handle_key(key(KeyCode::Tab));
    assert_eq!(view.focus(), Focus::Chat);
    view.handle_key(key(KeyCode::Tab));
    assert_eq!(view.focus(), Focus::Tasks);
    view.handle_key(key(KeyCode::BackTab));
    assert_eq!(view.focus(), Focus::Chat);
}

#[test]
fn test_chat_enter_sends_message() {
    let mut view = view_with(&[]);
    view.handle_key(key(KeyCode::BackTab));

    type_text(&mut view, "add buy milk");
    assert_eq!(
        view.handle_key(key(KeyCode::Enter)),
        Some(Action::Chat("add buy milk".to_string()))
    );
    // Input is cleared, so a second Enter sends nothing
    assert_eq!(view.handle_key(key(KeyCode::Enter)), None);

    view.handle_key(key(KeyCode::Esc));
    assert_eq!(view.focus(), Focus::Tasks);
}

#[test]
fn test_calendar_enter_selects_day() {
    let mut view = view_with(&sample_tasks());
    view.handle_key(key(KeyCode::Tab));
    view.handle_key(key(KeyCode::Char('l')));
    view.handle_key(key(KeyCode::Char('l')));
    view.handle_key(key(KeyCode::Char('l')));
    view.handle_key(key(KeyCode::Enter));

    let day = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
    assert_eq!(view.calendar().selected_day(), Some(day));
    let entries = view.calendar().day_entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].description, "Dentist");
}

#[test]
fn test_calendar_new_task_prefills_date() {
    let mut view = view_with(&[]);
    view.handle_key(key(KeyCode::Tab));
    view.handle_key(key(KeyCode::Char('n')));
    type_text(&mut view, "Dentist");

    assert_eq!(
        view.handle_key(key(KeyCode::Enter)),
        Some(Action::Create {
            description: "Dentist".to_string(),
            reminder: Some("2024-03-01T00:00".to_string()),
        })
    );
}

#[test]
fn test_toggle_refresh_leaves_calendar_alone() {
    let mut tasks = sample_tasks();
    let mut view = view_with(&tasks);

    tasks[0].completed = true;
    tasks[0].reminder = None;
    view.apply(Refresh::LIST_AND_COUNTERS, &tasks);

    assert!(view.rows()[0].completed);
    assert_eq!(view.calendar().marker_count(today()), 1);
}

#[test]
fn test_render_shows_rows_and_counters() {
    let tasks = sample_tasks();
    let screen = screen(&view_with(&tasks), &tasks);

    assert!(screen.contains("1. [ ] Buy milk"));
    assert!(screen.contains("Mar 1, 2024 09:00"));
    assert!(screen.contains("3. [ ] Dentist"));
    assert!(screen.contains("Total: 3"));
    assert!(screen.contains("Pending: 3"));
    assert!(screen.contains("March 2024"));
}

#[test]
fn test_render_empty_list_hint() {
    let screen = screen(&view_with(&[]), &[]);
    assert!(screen.contains("No tasks yet"));
    assert!(screen.contains("Total: 0"));
}
