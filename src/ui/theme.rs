use ratatui::style::{Color, Modifier, Style};

/// Unified color theme for the application
pub struct Theme;

impl Theme {
    /// Primary branding color
    pub fn primary() -> Color {
        Color::Magenta
    }

    /// Border color of unfocused panels
    pub fn secondary() -> Color {
        Color::Cyan
    }

    /// Running timer
    pub fn active() -> Color {
        Color::LightGreen
    }

    /// Status and validation messages
    pub fn warn() -> Color {
        Color::Yellow
    }

    pub fn error() -> Color {
        Color::LightRed
    }

    /// Focused panel border and selected row
    pub fn highlight() -> Color {
        Color::Cyan
    }

    pub fn selection_marker() -> Color {
        Color::Green
    }

    /// Dimmed/inactive text
    pub fn dim() -> Color {
        Color::DarkGray
    }

    /// Normal text
    pub fn text() -> Color {
        Color::White
    }

    /// Accent for totals and titles
    pub fn accent() -> Color {
        Color::LightBlue
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Self::accent())
            .add_modifier(Modifier::BOLD)
    }

    pub fn key() -> Style {
        Style::default()
            .fg(Self::selection_marker())
            .add_modifier(Modifier::BOLD)
    }
}
