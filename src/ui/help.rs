use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span, Text},
};

use super::theme::Theme;

pub fn build_help_text() -> Text<'static> {
    let mut lines = vec![
        Line::from(Span::styled("Key bindings", Theme::title())),
        Line::from(""),
    ];

    lines.push(section_title("Global"));
    lines.extend(section_lines(&[
        ("q / Ctrl+C", "Save and quit"),
        ("s", "Start/stop the timer on the selected project"),
        ("?", "Show this help"),
    ]));

    lines.push(Line::from(""));
    lines.push(section_title("Navigation"));
    lines.extend(section_lines(&[
        ("Tab / Shift+Tab", "Cycle Periods, Projects, Logs"),
        ("l / Right", "Jump to Logs"),
        ("h / Left", "Back to the previous left panel"),
        ("j k / Down Up", "Move the cursor"),
    ]));

    lines.push(Line::from(""));
    lines.push(section_title("Projects"));
    lines.extend(section_lines(&[
        ("Space", "Select or clear the project filter"),
        ("n", "New project"),
        ("d", "Delete project"),
    ]));

    lines.push(Line::from(""));
    lines.push(section_title("Logs"));
    lines.extend(section_lines(&[
        ("n", "New record"),
        ("e", "Edit record"),
        ("d", "Delete record"),
    ]));

    lines.push(Line::from(""));
    lines.push(section_title("Dialogs"));
    lines.extend(section_lines(&[
        ("Tab / Shift+Tab", "Next/previous field"),
        ("Enter", "Save"),
        ("Esc", "Cancel"),
    ]));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(Theme::dim()),
    )));
    Text::from(lines)
}

fn section_title(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        title,
        Style::default()
            .fg(Theme::highlight())
            .add_modifier(Modifier::BOLD),
    ))
}

fn section_lines(entries: &[(&'static str, &'static str)]) -> Vec<Line<'static>> {
    entries
        .iter()
        .map(|(keys, action)| {
            Line::from(vec![
                Span::styled(format!("  {keys:<16}"), Theme::key()),
                Span::styled(
                    *action,
                    Style::default().fg(Theme::text()),
                ),
            ])
        })
        .collect()
}
