//! Month calendar panel with reminder markers

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::styles::Theme;
use crate::client::view::{calendar_markers, tasks_on_day, CalendarMarker, DayEntry};
use crate::task::Task;

const CELL_WIDTH: usize = 3;

pub struct CalendarPanel {
    today: NaiveDate,
    cursor: NaiveDate,
    selected_day: Option<NaiveDate>,
    week_starts_monday: bool,
    /// Marker count per day
    markers: BTreeMap<NaiveDate, usize>,
    /// Tasks that carry a reminder, for the day listing
    scheduled: Vec<Task>,
}

impl CalendarPanel {
    pub fn new(today: NaiveDate, week_starts_monday: bool) -> Self {
        Self {
            today,
            cursor: today,
            selected_day: None,
            week_starts_monday,
            markers: BTreeMap::new(),
            scheduled: Vec::new(),
        }
    }

    pub fn clear_markers(&mut self) {
        self.markers.clear();
        self.scheduled.clear();
    }

    pub fn add_marker(&mut self, marker: &CalendarMarker) {
        *self.markers.entry(marker.date).or_insert(0) += 1;
    }

    /// Rebuild every marker from the current collection
    pub fn sync(&mut self, tasks: &[Task]) {
        self.clear_markers();
        for marker in calendar_markers(tasks) {
            self.add_marker(&marker);
        }
        self.scheduled = tasks
            .iter()
            .filter(|t| t.reminder.is_some())
            .cloned()
            .collect();
    }

    pub fn marker_count(&self, date: NaiveDate) -> usize {
        self.markers.get(&date).copied().unwrap_or(0)
    }

    pub fn cursor(&self) -> NaiveDate {
        self.cursor
    }

    #[cfg(test)]
    pub fn selected_day(&self) -> Option<NaiveDate> {
        self.selected_day
    }

    pub fn move_days(&mut self, days: i64) {
        if let Some(date) = self.cursor.checked_add_signed(Duration::days(days)) {
            self.cursor = date;
        }
    }

    pub fn move_months(&mut self, months: i32) {
        let step = Months::new(months.unsigned_abs());
        let moved = if months < 0 {
            self.cursor.checked_sub_months(step)
        } else {
            self.cursor.checked_add_months(step)
        };
        if let Some(date) = moved {
            self.cursor = date;
        }
    }

    pub fn jump_to_today(&mut self) {
        self.cursor = self.today;
    }

    /// Show the tasks on the highlighted day
    pub fn select(&mut self) {
        self.selected_day = Some(self.cursor);
    }

    pub fn day_entries(&self) -> Vec<DayEntry> {
        match self.selected_day {
            Some(day) => tasks_on_day(&self.scheduled, day),
            None => Vec::new(),
        }
    }

    fn first_weekday(&self) -> Weekday {
        if self.week_starts_monday {
            Weekday::Mon
        } else {
            Weekday::Sun
        }
    }

    /// Rows of the month grid; `None` pads days outside the month
    fn weeks(&self) -> Vec<Vec<Option<NaiveDate>>> {
        let Some(first) = self.cursor.with_day(1) else {
            return Vec::new();
        };
        let offset = (first.weekday().num_days_from_monday() + 7
            - self.first_weekday().num_days_from_monday()) as usize
            % 7;

        let mut cells: Vec<Option<NaiveDate>> = vec![None; offset];
        cells.extend(
            first
                .iter_days()
                .take_while(|d| d.month() == first.month())
                .map(Some),
        );
        while cells.len() % 7 != 0 {
            cells.push(None);
        }
        cells.chunks(7).map(<[_]>::to_vec).collect()
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme, focused: bool) {
        let border = if focused {
            theme.focused_border
        } else {
            theme.border
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(format!(" {} ", self.cursor.format("%B %Y")))
            .title_style(Style::default().fg(theme.title).bold());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = vec![self.weekday_header(theme)];
        for week in self.weeks() {
            let spans: Vec<Span> = week
                .into_iter()
                .map(|day| self.day_cell(day, theme, focused))
                .collect();
            lines.push(Line::from(spans));
        }
        lines.push(Line::from(""));
        lines.extend(self.day_listing(theme));

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn weekday_header(&self, theme: &Theme) -> Line<'static> {
        let mut day = self.first_weekday();
        let mut spans = Vec::with_capacity(7);
        for _ in 0..7 {
            let label: String = day.to_string().chars().take(2).collect();
            spans.push(Span::styled(
                format!("{:<width$}", label, width = CELL_WIDTH),
                Style::default().fg(theme.dimmed),
            ));
            day = day.succ();
        }
        Line::from(spans)
    }

    fn day_cell(&self, day: Option<NaiveDate>, theme: &Theme, focused: bool) -> Span<'static> {
        let Some(day) = day else {
            return Span::raw(" ".repeat(CELL_WIDTH));
        };

        let marked = self.marker_count(day) > 0;
        let text = format!("{:>2}{}", day.day(), if marked { "•" } else { " " });

        let mut style = Style::default().fg(theme.text);
        if marked {
            style = style.fg(theme.marker).bold();
        }
        if day == self.today {
            style = style.fg(theme.today).underlined();
        }
        if day == self.cursor {
            style = if focused {
                style.fg(theme.background).bg(theme.accent)
            } else {
                style.bg(theme.selection)
            };
        }
        Span::styled(text, style)
    }

    fn day_listing(&self, theme: &Theme) -> Vec<Line<'static>> {
        let Some(day) = self.selected_day else {
            return vec![Line::from(Span::styled(
                "Enter shows the tasks on a day",
                Style::default().fg(theme.hint),
            ))];
        };

        let mut lines = vec![Line::from(Span::styled(
            format!("Tasks on {}", day.format("%a, %b %-d")),
            Style::default().fg(theme.title),
        ))];

        let entries = self.day_entries();
        if entries.is_empty() {
            lines.push(Line::from(Span::styled(
                "  Nothing scheduled",
                Style::default().fg(theme.dimmed),
            )));
        }
        for entry in entries {
            let style = if entry.completed {
                Style::default().fg(theme.completed).crossed_out()
            } else {
                Style::default().fg(theme.text)
            };
            lines.push(Line::from(vec![
                Span::styled(format!("  {} ", entry.time), Style::default().fg(theme.reminder)),
                Span::styled(entry.description, style),
            ]));
        }
        lines
    }
}
