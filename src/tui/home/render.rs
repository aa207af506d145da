//! Rendering for HomeView

use ratatui::prelude::*;
use ratatui::widgets::*;

use super::{Focus, HomeView};
use crate::chat::{ChatLine, Speaker};
use crate::client::view::{ListRow, Summary};
use crate::client::{Notice, NoticeLevel};
use crate::tui::components::{render_text_field, HelpOverlay};
use crate::tui::styles::Theme;

impl HomeView {
    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        theme: &Theme,
        summary: Summary,
        transcript: &[ChatLine],
        toast: Option<&Notice>,
    ) {
        // Layout: header + main area + status bar
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        // Layout: task list on the left, calendar above chat on the right
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(main_chunks[1]);
        let side = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[1]);

        render_header(frame, main_chunks[0], theme, summary);
        self.render_list(frame, chunks[0], theme);
        self.calendar
            .render(frame, side[0], theme, self.focus == Focus::Calendar);
        self.render_chat(frame, side[1], theme, transcript);

        match toast {
            Some(notice) => render_toast(frame, main_chunks[2], theme, notice),
            None => self.render_status_bar(frame, main_chunks[2], theme),
        }

        // Render dialogs on top
        if self.show_help {
            HelpOverlay::render(frame, area, theme);
        }

        if let Some(dialog) = &self.form_dialog {
            dialog.render(frame, area, theme);
        }

        if let Some(dialog) = &self.confirm_dialog {
            dialog.render(frame, area, theme);
        }
    }

    fn panel_block(&self, title: &str, panel: Focus, theme: &Theme) -> Block<'static> {
        let border = if self.focus == panel {
            theme.focused_border
        } else {
            theme.border
        };
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(format!(" {} ", title))
            .title_style(Style::default().fg(theme.title).bold())
    }

    fn render_list(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = self.panel_block("Tasks", Focus::Tasks, theme);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.rows.is_empty() {
            let empty_text = vec![
                Line::from(""),
                Line::from("No tasks yet").style(Style::default().fg(theme.dimmed)),
                Line::from(""),
                Line::from("Press 'n' to add one").style(Style::default().fg(theme.hint)),
                Line::from("or ask the assistant").style(Style::default().fg(theme.hint)),
            ];
            let para = Paragraph::new(empty_text).alignment(Alignment::Center);
            frame.render_widget(para, inner);
            return;
        }

        let list_items: Vec<ListItem> = self
            .rows
            .iter()
            .map(|row| render_row(row, theme))
            .collect();

        let list = List::new(list_items).highlight_style(Style::default().bg(theme.row_selection));
        let mut state = ListState::default().with_selected(Some(self.cursor));
        frame.render_stateful_widget(list, inner, &mut state);
    }

    fn render_chat(&self, frame: &mut Frame, area: Rect, theme: &Theme, transcript: &[ChatLine]) {
        let block = self.panel_block("Assistant", Focus::Chat, theme);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.height == 0 {
            return;
        }
        let history_height = inner.height.saturating_sub(1) as usize;
        let history = Rect {
            height: history_height as u16,
            ..inner
        };
        let input_area = Rect {
            y: inner.y + history_height as u16,
            height: 1,
            ..inner
        };

        let skip = transcript.len().saturating_sub(history_height);
        let lines: Vec<Line> = transcript
            .iter()
            .skip(skip)
            .map(|line| match line.speaker {
                Speaker::You => Line::from(Span::styled(
                    format!("you: {}", line.text),
                    Style::default().fg(theme.accent),
                )),
                Speaker::Assistant => Line::from(Span::styled(
                    line.text.as_str(),
                    Style::default().fg(theme.text),
                )),
                Speaker::Notice => Line::from(Span::styled(
                    line.text.as_str(),
                    Style::default().fg(theme.warning).italic(),
                )),
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), history);

        render_text_field(
            frame,
            input_area,
            ">",
            &self.chat_input,
            self.focus == Focus::Chat,
            Some("Tab here to talk to the assistant"),
            theme,
        );
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let key_style = Style::default().fg(theme.accent).bold();
        let desc_style = Style::default().fg(theme.dimmed);
        let sep_style = Style::default().fg(theme.border);

        let hints: &[(&str, &str)] = match self.focus {
            Focus::Tasks => &[
                ("j/k", "Navigate"),
                ("n", "New"),
                ("Space", "Done"),
                ("e", "Edit"),
                ("d", "Delete"),
                ("u", "Undo"),
                ("?", "Help"),
                ("q", "Quit"),
            ],
            Focus::Calendar => &[
                ("h/j/k/l", "Move"),
                ("[ ]", "Month"),
                ("Enter", "Show day"),
                ("n", "New on day"),
                ("Tab", "Next panel"),
            ],
            Focus::Chat => &[("Enter", "Send"), ("Esc", "Back to tasks")],
        };

        let mut spans = Vec::new();
        for (idx, (key, desc)) in hints.iter().enumerate() {
            if idx > 0 {
                spans.push(Span::styled("│", sep_style));
            }
            spans.push(Span::styled(format!(" {}", key), key_style));
            spans.push(Span::styled(format!(" {} ", desc), desc_style));
        }

        let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.selection));
        frame.render_widget(status, area);
    }
}

fn render_row<'a>(row: &'a ListRow, theme: &Theme) -> ListItem<'a> {
    let (mark, text_style) = if row.completed {
        ("[x]", Style::default().fg(theme.completed).crossed_out())
    } else {
        ("[ ]", Style::default().fg(theme.text))
    };

    let mut spans = vec![
        Span::styled(
            format!("{:>3}. ", row.position),
            Style::default().fg(theme.dimmed),
        ),
        Span::styled(format!("{} ", mark), Style::default().fg(theme.pending)),
        Span::styled(row.description.as_str(), text_style),
    ];
    if let Some(reminder) = &row.reminder {
        spans.push(Span::styled(
            format!("  {}", reminder),
            Style::default().fg(theme.reminder),
        ));
    }
    ListItem::new(Line::from(spans))
}

fn render_toast(frame: &mut Frame, area: Rect, theme: &Theme, notice: &Notice) {
    let color = match notice.level {
        NoticeLevel::Info => theme.accent,
        NoticeLevel::Warning => theme.warning,
        NoticeLevel::Error => theme.error,
    };
    let toast = Paragraph::new(format!(" {}", notice.message))
        .style(Style::default().fg(color).bg(theme.selection).bold());
    frame.render_widget(toast, area);
}

fn render_header(frame: &mut Frame, area: Rect, theme: &Theme, summary: Summary) {
    let label = Style::default().fg(theme.dimmed);
    let line = Line::from(vec![
        Span::styled(" taskdeck ", Style::default().fg(theme.title).bold()),
        Span::styled(" Total: ", label),
        Span::styled(summary.total.to_string(), Style::default().fg(theme.text)),
        Span::styled("  Completed: ", label),
        Span::styled(
            summary.completed.to_string(),
            Style::default().fg(theme.completed),
        ),
        Span::styled("  Pending: ", label),
        Span::styled(
            summary.pending.to_string(),
            Style::default().fg(theme.pending),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
