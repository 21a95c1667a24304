mod help;
mod helpers;
mod panels;
mod popups;
mod theme;

use chrono::Local;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    prelude::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::app::{App, Focus};
use crate::format::format_duration;
use helpers::{centered_rect, panel_block, scroll_offset};
use theme::Theme;

/// Renders the entire UI for a single frame.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(area);

    render_header(frame, layout[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(32), Constraint::Percentage(68)])
        .split(layout[1]);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(app.periods.len() as u16 + 2),
            Constraint::Min(3),
        ])
        .split(columns[0]);

    let focused = app.focused();
    let return_target = (focused == Focus::Logs).then(|| Focus::from(app.prev_left_focus()));
    render_list(
        frame,
        left[0],
        panel_block(
            "Periods",
            focused == Focus::Periods,
            return_target == Some(Focus::Periods),
        ),
        panels::build_periods_text(app, focused == Focus::Periods),
        app.periods.cursor(),
    );
    render_list(
        frame,
        left[1],
        panel_block(
            "Projects",
            focused == Focus::Projects,
            return_target == Some(Focus::Projects),
        ),
        panels::build_projects_text(app, focused == Focus::Projects),
        app.projects.cursor(),
    );
    render_logs(frame, columns[1], app, focused == Focus::Logs);
    render_status_bar(frame, layout[2], app);

    // Narrow terminals get wider overlays.
    let overlay_width = if app.terminal_size.0 < 80 { 90 } else { 60 };
    if let Some(modal) = &app.modal {
        popups::render_modal(frame, modal, app.error_message.as_deref(), overlay_width);
    } else if app.help_visible {
        render_help(frame, overlay_width + 10);
    }
}

fn render_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "  Tally  ",
            Style::default().fg(Color::Black).bg(Theme::primary()),
        ),
        Span::raw(" "),
        Span::styled(
            "project time tracker",
            Style::default()
                .fg(Theme::secondary())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("   ?: help  q: quit", Style::default().fg(Theme::dim())),
    ]))
    .alignment(Alignment::Left)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .style(Style::default().fg(Theme::secondary())),
    );
    frame.render_widget(header, area);
}

fn render_list(frame: &mut Frame, area: Rect, block: Block<'static>, text: Text<'_>, cursor: usize) {
    let offset = scroll_offset(cursor, block.inner(area).height);
    let list = Paragraph::new(text).scroll((offset, 0)).block(block);
    frame.render_widget(list, area);
}

/// Logs list with the running total underneath.
fn render_logs(frame: &mut Frame, area: Rect, app: &App, focused: bool) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);
    let title = format!("Logs {}/{}", app.logs.len(), app.records().len());
    render_list(
        frame,
        rows[0],
        panel_block(&title, focused, false),
        panels::build_logs_text(app, focused),
        app.logs.cursor(),
    );

    let total = Paragraph::new(Line::from(vec![
        Span::styled(" Total: ", Style::default().fg(Theme::dim())),
        Span::styled(
            format_duration(app.total_duration()),
            Theme::title(),
        ),
        Span::styled(
            format!("  ({})", app.selected_period().label()),
            Style::default().fg(Theme::dim()),
        ),
    ]));
    frame.render_widget(total, rows[1]);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let timer_style = if app.timer.is_running() {
        Style::default()
            .fg(Theme::active())
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Theme::dim())
    };
    let mut spans = vec![Span::styled(app.timer_display(Local::now()), timer_style)];
    if let Some(error) = &app.save_error {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            error.as_str(),
            Style::default()
                .fg(Theme::error())
                .add_modifier(Modifier::BOLD),
        ));
    }
    if let Some(status) = &app.status {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            status.as_str(),
            Style::default().fg(Theme::warn()),
        ));
    }

    let status_bar = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .style(Style::default().fg(Theme::secondary())),
    );
    frame.render_widget(status_bar, area);
}

fn render_help(frame: &mut Frame, width_percent: u16) {
    let area = centered_rect(width_percent.min(100), 80, frame.area());
    frame.render_widget(Clear, area);
    let help = Paragraph::new(help::build_help_text())
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Theme::secondary()))
                .title(" Help "),
        );
    frame.render_widget(help, area);
}
