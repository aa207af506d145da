//! Single-line text field rendering

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use tui_input::Input;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::styles::Theme;

/// Renders a labelled input with a block cursor when focused. Values wider
/// than the field scroll so the cursor stays visible.
pub fn render_text_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    input: &Input,
    is_focused: bool,
    placeholder: Option<&str>,
    theme: &Theme,
) {
    let label_style = if is_focused {
        Style::default().fg(theme.accent).underlined()
    } else {
        Style::default().fg(theme.text)
    };
    let value_style = if is_focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.text)
    };

    let value = input.value();
    let mut spans = vec![Span::styled(label, label_style), Span::raw(" ")];

    if value.is_empty() && !is_focused {
        if let Some(placeholder_text) = placeholder {
            spans.push(Span::styled(
                placeholder_text,
                Style::default().fg(theme.dimmed),
            ));
        }
    } else if is_focused {
        let field_width = (area.width as usize).saturating_sub(label.width() + 1);
        let scroll = input.visual_scroll(field_width.saturating_sub(1));
        let (before, at, after) = split_at_column(value, scroll, input.visual_cursor());
        let cursor_style = Style::default().fg(theme.background).bg(theme.accent);

        if !before.is_empty() {
            spans.push(Span::styled(before, value_style));
        }
        spans.push(Span::styled(at, cursor_style));
        if !after.is_empty() {
            spans.push(Span::styled(after, value_style));
        }
    } else {
        spans.push(Span::styled(value, value_style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Split the visible part of `value` (from column `scroll`) around the
/// character under column `cursor`. Past the end, the cursor sits on a space.
fn split_at_column(value: &str, scroll: usize, cursor: usize) -> (String, String, String) {
    let mut before = String::new();
    let mut at = String::new();
    let mut after = String::new();
    let mut column = 0;

    for c in value.chars() {
        let start = column;
        column += c.width().unwrap_or(0);
        if start < scroll {
            continue;
        }
        if start < cursor {
            before.push(c);
        } else if start == cursor && at.is_empty() {
            at.push(c);
        } else {
            after.push(c);
        }
    }

    if at.is_empty() {
        at.push(' ');
    }
    (before, at, after)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_cursor_in_middle() {
        assert_eq!(
            split_at_column("milk", 0, 2),
            ("mi".into(), "l".into(), "k".into())
        );
    }

    #[test]
    fn test_split_cursor_at_end() {
        assert_eq!(
            split_at_column("milk", 0, 4),
            ("milk".into(), " ".into(), String::new())
        );
    }

    #[test]
    fn test_split_wide_characters() {
        assert_eq!(
            split_at_column("牛乳", 0, 2),
            ("牛".into(), "乳".into(), String::new())
        );
    }

    #[test]
    fn test_split_skips_scrolled_prefix() {
        assert_eq!(
            split_at_column("buy oat milk", 4, 8),
            ("oat ".into(), "m".into(), "ilk".into())
        );
    }
}
