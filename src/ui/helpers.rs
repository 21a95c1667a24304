use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, BorderType, Borders},
};

use super::theme::Theme;

pub fn clamp_name(value: &str, width: usize) -> String {
    let value_len = value.chars().count();
    if value_len <= width {
        return value.to_string();
    }
    let trimmed = value
        .chars()
        .take(width.saturating_sub(2))
        .collect::<String>();
    format!("{trimmed}..")
}

/// Rounded panel border, highlighted when the panel has focus. While Logs
/// has focus, the left panel that `h` returns to keeps a colored border.
pub fn panel_block(title: &str, focused: bool, return_target: bool) -> Block<'static> {
    let border_style = if focused {
        Style::default()
            .fg(Theme::highlight())
            .add_modifier(Modifier::BOLD)
    } else if return_target {
        Style::default().fg(Theme::secondary())
    } else {
        Style::default().fg(Theme::dim())
    };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style)
        .title(format!(" {title} "))
}

/// First row to show so that `cursor` stays inside a list of `height` rows.
pub fn scroll_offset(cursor: usize, height: u16) -> u16 {
    let height = usize::from(height.max(1));
    let offset = (cursor + 1).saturating_sub(height);
    u16::try_from(offset).unwrap_or(u16::MAX)
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_names_are_shortened() {
        assert_eq!(clamp_name("Alpha", 10), "Alpha");
        assert_eq!(clamp_name("A very long project", 8), "A very..");
    }

    #[test]
    fn scrolling_keeps_the_cursor_visible() {
        assert_eq!(scroll_offset(0, 5), 0);
        assert_eq!(scroll_offset(4, 5), 0);
        assert_eq!(scroll_offset(5, 5), 1);
        assert_eq!(scroll_offset(3, 0), 3);
    }
}
