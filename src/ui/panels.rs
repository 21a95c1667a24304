use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span, Text},
};

use super::helpers::clamp_name;
use super::theme::Theme;
use crate::app::App;
use crate::format::format_record_title;

const NAME_WIDTH: usize = 24;

pub fn build_periods_text(app: &App, focused: bool) -> Text<'_> {
    let lines = app
        .periods
        .items()
        .iter()
        .enumerate()
        .map(|(index, period)| {
            list_line(
                period.label().to_string(),
                focused && index == app.periods.cursor(),
                index == app.periods.cursor(),
            )
        })
        .collect::<Vec<_>>();
    Text::from(lines)
}

/// Projects with a `*` in front of the one used as the filter.
pub fn build_projects_text(app: &App, focused: bool) -> Text<'_> {
    if app.projects.is_empty() {
        return Text::from(Line::from(Span::styled(
            "No projects. Press 'n' to add one.",
            Style::default().fg(Theme::dim()),
        )));
    }
    let lines = app
        .projects
        .items()
        .iter()
        .enumerate()
        .map(|(index, project)| {
            let flag = if project.selected { "* " } else { "  " };
            list_line(
                format!("{flag}{}", clamp_name(&project.name, NAME_WIDTH)),
                focused && index == app.projects.cursor(),
                project.selected,
            )
        })
        .collect::<Vec<_>>();
    Text::from(lines)
}

pub fn build_logs_text(app: &App, focused: bool) -> Text<'_> {
    if app.logs.is_empty() {
        return Text::from(Line::from(Span::styled(
            "No records for this selection.",
            Style::default().fg(Theme::dim()),
        )));
    }
    let lines = app
        .logs
        .items()
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            list_line(
                format_record_title(&entry.record),
                focused && index == app.logs.cursor(),
                false,
            )
        })
        .collect::<Vec<_>>();
    Text::from(lines)
}

fn list_line(label: String, under_cursor: bool, emphasized: bool) -> Line<'static> {
    let marker_style = if under_cursor {
        Style::default()
            .fg(Theme::selection_marker())
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Theme::dim())
    };
    let mut label_style = if under_cursor {
        Style::default()
            .fg(Theme::highlight())
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Theme::text())
    };
    if emphasized {
        label_style = label_style.add_modifier(Modifier::BOLD);
    }
    Line::from(vec![
        Span::styled(if under_cursor { "> " } else { "  " }, marker_style),
        Span::styled(label, label_style),
    ])
}
