/// CLI argument parsing and command handling.
use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Local};
use clap::{Parser, Subcommand, ValueEnum};

use crate::app::validate::{validate_project_name, validate_record};
use crate::app::{total_duration, visible_records};
use crate::format::{format_duration, format_record_title};
use crate::store::SnapshotStore;
use crate::types::{Period, Project};

#[derive(Parser, Debug)]
#[command(
    name = "tally",
    version,
    about = "Tally - A terminal-based project time tracker"
)]
pub struct Cli {
    /// Snapshot file to read and write.
    #[arg(long, global = true, value_name = "PATH")]
    pub data_file: Option<PathBuf>,

    /// Where log output goes (defaults to tally.log next to the data file).
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Refresh interval of the timer display in milliseconds.
    #[arg(long, value_name = "MS")]
    pub tick_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Project {
        #[command(subcommand)]
        command: ProjectCommand,
    },
    Record {
        #[command(subcommand)]
        command: RecordCommand,
    },
    /// Print the records of a period and their total duration.
    Summary {
        #[arg(short, long, value_enum, default_value_t = PeriodArg::All)]
        period: PeriodArg,
        #[arg(long)]
        project: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProjectCommand {
    Add { name: String },
}

#[derive(Subcommand, Debug)]
pub enum RecordCommand {
    /// Add a finished session, e.g. `record add Work "2024-01-01 10:00:00" 01:30:00`.
    Add {
        project: String,
        start: String,
        duration: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PeriodArg {
    All,
    Year,
    Month,
    Week,
    Day,
}

impl From<PeriodArg> for Period {
    fn from(arg: PeriodArg) -> Self {
        match arg {
            PeriodArg::All => Period::All,
            PeriodArg::Year => Period::Year,
            PeriodArg::Month => Period::Month,
            PeriodArg::Week => Period::Week,
            PeriodArg::Day => Period::Day,
        }
    }
}

/// Execute a CLI command against the snapshot store.
pub fn run<S: SnapshotStore>(command: Command, store: &S) -> Result<()> {
    let output = execute(command, store, Local::now())?;
    println!("{output}");
    Ok(())
}

fn execute<S: SnapshotStore>(command: Command, store: &S, now: DateTime<Local>) -> Result<String> {
    match command {
        Command::Project {
            command: ProjectCommand::Add { name },
        } => handle_project_add(&name, store),
        Command::Record {
            command:
                RecordCommand::Add {
                    project,
                    start,
                    duration,
                },
        } => handle_record_add(&project, &start, &duration, store),
        Command::Summary { period, project } => {
            Ok(handle_summary(period.into(), project.as_deref(), store, now))
        }
    }
}

fn handle_project_add<S: SnapshotStore>(name: &str, store: &S) -> Result<String> {
    let mut snapshot = store.load();
    let name = match validate_project_name(name, &snapshot.projects) {
        Ok(name) => name,
        Err(err) => return Ok(err.to_string()),
    };
    snapshot.projects.push(Project::new(name.clone()));
    store.save(&snapshot)?;
    log::info!("Created project '{name}' from the command line");
    Ok(format!("Added project '{name}'"))
}

fn handle_record_add<S: SnapshotStore>(
    project: &str,
    start: &str,
    duration: &str,
    store: &S,
) -> Result<String> {
    let mut snapshot = store.load();
    let record = match validate_record(project, start, duration, &snapshot.projects) {
        Ok(record) => record,
        Err(err) => return Ok(err.to_string()),
    };
    let title = format_record_title(&record);
    snapshot.records.push(record);
    store.save(&snapshot)?;
    Ok(format!("Added record {title}"))
}

/// Without `--project` every project's records are listed.
fn handle_summary<S: SnapshotStore>(
    period: Period,
    project: Option<&str>,
    store: &S,
    now: DateTime<Local>,
) -> String {
    let snapshot = store.load();
    if let Some(name) = project {
        if !snapshot.projects.iter().any(|p| p.name == name) {
            return format!("Project '{name}' not found");
        }
    }

    let projects: Vec<Project> = snapshot
        .projects
        .iter()
        .map(|p| Project {
            name: p.name.clone(),
            selected: project == Some(p.name.as_str()),
        })
        .collect();
    let entries = visible_records(&projects, &snapshot.records, period, now);

    let mut lines: Vec<String> = entries
        .iter()
        .map(|entry| format_record_title(&entry.record))
        .collect();
    if lines.is_empty() {
        lines.push(format!("No records for period '{}'", period.label()));
    }
    lines.push(format!("Total: {}", format_duration(total_duration(&entries))));
    lines.join("\n")
}
