use chrono::{DateTime, Local};

use crate::types::{Period, Project, Record};

/// A visible record together with its position in the full record list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    pub index: usize,
    pub record: Record,
}

/// The project used as a filter: the first one flagged as selected.
pub fn selected_project(projects: &[Project]) -> Option<&Project> {
    projects.iter().find(|project| project.selected)
}

/// Derives the records shown in the Logs panel, in insertion order.
///
/// A record is dropped when a project is selected and the record belongs to
/// another one, when its project name matches no current project, or when it
/// started longer ago than the period's window.
pub fn visible_records(
    projects: &[Project],
    records: &[Record],
    period: Period,
    now: DateTime<Local>,
) -> Vec<LogEntry> {
    let selected = selected_project(projects).map(|project| project.name.as_str());
    let window = period.window();

    records
        .iter()
        .enumerate()
        .filter(|(_, record)| selected.is_none_or(|name| record.project == name))
        .filter(|(_, record)| projects.iter().any(|project| project.name == record.project))
        .filter(|(_, record)| {
            window.is_none_or(|window| now.signed_duration_since(record.start_time) <= window)
        })
        .map(|(index, record)| LogEntry {
            index,
            record: record.clone(),
        })
        .collect()
}

pub fn total_duration(entries: &[LogEntry]) -> i64 {
    entries
        .iter()
        .map(|entry| entry.record.duration_seconds)
        .sum()
}
