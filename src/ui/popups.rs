use ratatui::{
    Frame,
    prelude::Alignment,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use super::helpers::centered_rect;
use super::theme::Theme;
use crate::app::{Modal, RecordField, RecordPopup, TextInput};

pub fn render_modal(
    frame: &mut Frame,
    modal: &Modal,
    error_message: Option<&str>,
    width_percent: u16,
) {
    let mut lines = vec![
        Line::from(Span::styled(modal.title(), Theme::title())),
        Line::from(""),
    ];

    match modal {
        Modal::NewProject(popup) => {
            lines.push(field_line("Name", &popup.name, true));
        }
        Modal::NewRecord(popup) | Modal::EditRecord { popup, .. } => {
            lines.extend(record_lines(popup));
        }
    }

    lines.push(Line::from(""));
    if let Some(message) = error_message {
        lines.push(Line::from(Span::styled(
            message.to_string(),
            Style::default()
                .fg(Theme::error())
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
    }
    let hint = match modal {
        Modal::NewProject(_) => "Enter: save. Esc: cancel.",
        _ => "Tab: switch field. Enter: save. Esc: cancel.",
    };
    lines.push(Line::from(Span::styled(
        hint,
        Style::default().fg(Theme::dim()),
    )));

    let area = centered_rect(width_percent, 50, frame.area());
    frame.render_widget(Clear, area);
    let popup_widget = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Theme::secondary()))
                .title(format!(" {} ", modal.title())),
        );
    frame.render_widget(popup_widget, area);
}

fn record_lines(popup: &RecordPopup) -> Vec<Line<'static>> {
    vec![
        field_line("Project", &popup.project, popup.field == RecordField::Project),
        field_line("Start", &popup.start, popup.field == RecordField::Start),
        field_line(
            "Duration",
            &popup.duration,
            popup.field == RecordField::Duration,
        ),
    ]
}

/// One labelled input; the active one shows a block cursor.
fn field_line(label: &str, input: &TextInput, active: bool) -> Line<'static> {
    let arrow_style = Style::default()
        .fg(Theme::selection_marker())
        .add_modifier(Modifier::BOLD);
    let (label_style, value_style) = if active {
        let style = Style::default()
            .fg(Theme::highlight())
            .add_modifier(Modifier::BOLD);
        (style, style)
    } else {
        (
            Style::default().fg(Theme::dim()),
            Style::default().fg(Theme::text()),
        )
    };

    let mut spans = vec![
        Span::styled(if active { "> " } else { "  " }, arrow_style),
        Span::styled(format!("{label:<10}"), label_style),
    ];
    if input.value().is_empty() && !active {
        spans.push(Span::styled(
            input.placeholder,
            Style::default().fg(Theme::dim()),
        ));
    } else if active {
        let (before, after) = input.split_at_cursor();
        let mut rest = after.chars();
        let under_cursor = rest.next().map_or_else(|| " ".to_string(), String::from);
        spans.push(Span::styled(before.to_string(), value_style));
        spans.push(Span::styled(
            under_cursor,
            value_style.add_modifier(Modifier::REVERSED),
        ));
        spans.push(Span::styled(rest.as_str().to_string(), value_style));
    } else {
        spans.push(Span::styled(input.value().to_string(), value_style));
    }
    Line::from(spans)
}
