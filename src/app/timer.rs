use chrono::{DateTime, Local};

use crate::format::format_duration;
use crate::types::{Project, Record, Timer};

/// What a timer toggle did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TimerTransition {
    Started,
    Stopped(Record),
    Unchanged,
}

/// The project the timer may start on: the only one flagged as selected.
fn sole_selected(projects: &[Project]) -> Option<&Project> {
    let mut selected = projects.iter().filter(|project| project.selected);
    match (selected.next(), selected.next()) {
        (Some(project), None) => Some(project),
        _ => None,
    }
}

impl Timer {
    pub fn is_running(&self) -> bool {
        matches!(self, Timer::Running { .. })
    }

    pub fn project(&self) -> Option<&str> {
        match self {
            Timer::Running { project, .. } => Some(project),
            Timer::Stopped => None,
        }
    }

    /// Starts on the selected project, or stops and returns the finished
    /// session. Durations are truncated to whole seconds.
    pub fn toggle(&mut self, projects: &[Project], now: DateTime<Local>) -> TimerTransition {
        match std::mem::take(self) {
            Timer::Stopped => match sole_selected(projects) {
                Some(project) => {
                    *self = Timer::Running {
                        start_time: now,
                        project: project.name.clone(),
                    };
                    TimerTransition::Started
                }
                None => TimerTransition::Unchanged,
            },
            Timer::Running {
                start_time,
                project,
            } => TimerTransition::Stopped(Record {
                project,
                duration_seconds: now.signed_duration_since(start_time).num_seconds().max(0),
                start_time,
            }),
        }
    }

    /// Seconds since the timer started, recomputed from the start time.
    pub fn elapsed(&self, now: DateTime<Local>) -> Option<i64> {
        match self {
            Timer::Running { start_time, .. } => {
                Some(now.signed_duration_since(*start_time).num_seconds().max(0))
            }
            Timer::Stopped => None,
        }
    }

    pub fn display(&self, now: DateTime<Local>) -> String {
        match (self.elapsed(now), self.project()) {
            (Some(elapsed), Some(project)) => {
                format!("Timer: {} ({project})", format_duration(elapsed))
            }
            _ => "Timer: Off".to_string(),
        }
    }
}
