//! TUI theme and styling

use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct Theme {
    // Background and borders
    pub background: Color,
    pub border: Color,
    pub focused_border: Color,
    pub selection: Color,
    pub row_selection: Color,

    // Text colors
    pub title: Color,
    pub text: Color,
    pub dimmed: Color,
    pub hint: Color,

    // Task and notice colors
    pub completed: Color,
    pub pending: Color,
    pub reminder: Color,
    pub warning: Color,
    pub error: Color,

    // UI elements
    pub marker: Color,
    pub today: Color,
    pub accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::phosphor()
    }
}

impl Theme {
    /// Look up a theme by its config name, falling back to the default
    pub fn named(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "mono" => Self::mono(),
            "" | "phosphor" => Self::phosphor(),
            other => {
                tracing::warn!("Unknown theme '{}', using phosphor", other);
                Self::phosphor()
            }
        }
    }

    pub fn phosphor() -> Self {
        Self {
            background: Color::Rgb(16, 20, 18),
            border: Color::Rgb(45, 70, 55),
            focused_border: Color::Rgb(100, 220, 160),
            selection: Color::Rgb(30, 50, 40),
            row_selection: Color::Rgb(60, 60, 60),

            title: Color::Rgb(57, 255, 20),
            text: Color::Rgb(180, 255, 180),
            dimmed: Color::Rgb(80, 120, 90),
            hint: Color::Rgb(100, 160, 120),

            completed: Color::Rgb(60, 100, 70),
            pending: Color::Rgb(0, 255, 180),
            reminder: Color::Rgb(130, 170, 255),
            warning: Color::Rgb(255, 180, 60),
            error: Color::Rgb(255, 100, 80),

            marker: Color::Rgb(255, 180, 60),
            today: Color::Rgb(180, 255, 200),
            accent: Color::Rgb(57, 255, 20),
        }
    }

    pub fn mono() -> Self {
        Self {
            background: Color::Reset,
            border: Color::DarkGray,
            focused_border: Color::White,
            selection: Color::Black,
            row_selection: Color::DarkGray,

            title: Color::White,
            text: Color::Gray,
            dimmed: Color::DarkGray,
            hint: Color::Gray,

            completed: Color::DarkGray,
            pending: Color::White,
            reminder: Color::Gray,
            warning: Color::White,
            error: Color::White,

            marker: Color::White,
            today: Color::White,
            accent: Color::White,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_theme_lookup() {
        assert_eq!(Theme::named("mono").title, Color::White);
        assert_eq!(Theme::named(" Mono ").title, Color::White);
        assert_eq!(Theme::named("").title, Theme::phosphor().title);
        assert_eq!(Theme::named("sepia").title, Theme::phosphor().title);
    }
}
