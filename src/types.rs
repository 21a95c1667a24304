use chrono::{DateTime, Datelike, Local, TimeDelta};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub selected: bool,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            selected: false,
        }
    }
}

/// A finished session. `project` is a soft reference by name and may point
/// at a project that no longer exists.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub project: String,
    #[serde(rename = "duration")]
    pub duration_seconds: i64,
    pub start_time: DateTime<Local>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Timer {
    #[default]
    Stopped,
    Running {
        start_time: DateTime<Local>,
        project: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Period {
    All,
    Year,
    Month,
    Week,
    Day,
}

impl Period {
    pub const ALL: [Period; 5] = [
        Period::All,
        Period::Year,
        Period::Month,
        Period::Week,
        Period::Day,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Period::All => "All",
            Period::Year => "Year",
            Period::Month => "Month",
            Period::Week => "Week",
            Period::Day => "Day",
        }
    }

    /// Fixed-length look-back window; `None` means unbounded.
    pub fn window(self) -> Option<TimeDelta> {
        match self {
            Period::All => None,
            Period::Year => Some(TimeDelta::days(365)),
            Period::Month => Some(TimeDelta::days(30)),
            Period::Week => Some(TimeDelta::days(7)),
            Period::Day => Some(TimeDelta::days(1)),
        }
    }
}

/// Everything that is persisted between runs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SnapshotFile", into = "SnapshotFile")]
pub struct Snapshot {
    pub projects: Vec<Project>,
    pub records: Vec<Record>,
    pub timer: Timer,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            projects: vec![Project::new("Project A"), Project::new("Project B")],
            records: Vec::new(),
            timer: Timer::Stopped,
        }
    }
}

/// On-disk layout of the snapshot, with the timer flattened into
/// `timer_running` / `timer_start` / `timer_project`.
#[derive(Serialize, Deserialize)]
struct SnapshotFile {
    #[serde(default)]
    projects: Vec<Project>,
    #[serde(default)]
    records: Vec<Record>,
    #[serde(default)]
    timer_running: bool,
    #[serde(default)]
    timer_start: Option<DateTime<Local>>,
    #[serde(default)]
    timer_project: String,
}

impl From<SnapshotFile> for Snapshot {
    fn from(file: SnapshotFile) -> Self {
        let timer = match file.timer_start {
            Some(start_time)
                if file.timer_running
                    && !is_zero_time(&start_time)
                    && !file.timer_project.is_empty() =>
            {
                Timer::Running {
                    start_time,
                    project: file.timer_project,
                }
            }
            _ => Timer::Stopped,
        };
        // A session always has at least one project to track against.
        let projects = if file.projects.is_empty() {
            Snapshot::default().projects
        } else {
            file.projects
        };
        Self {
            projects,
            records: file.records,
            timer,
        }
    }
}

impl From<Snapshot> for SnapshotFile {
    fn from(snapshot: Snapshot) -> Self {
        let (timer_running, timer_start, timer_project) = match snapshot.timer {
            Timer::Stopped => (false, None, String::new()),
            Timer::Running {
                start_time,
                project,
            } => (true, Some(start_time), project),
        };
        Self {
            projects: snapshot.projects,
            records: snapshot.records,
            timer_running,
            timer_start,
            timer_project,
        }
    }
}

/// Older snapshot files write an unset start as `0001-01-01T00:00:00Z`.
fn is_zero_time(value: &DateTime<Local>) -> bool {
    value.naive_utc().year() <= 1
}
