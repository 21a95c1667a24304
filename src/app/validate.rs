use thiserror::Error;

use crate::format::{parse_duration, parse_start_time};
use crate::types::{Project, Record};

pub const PROJECT_NAME_LIMIT: usize = 30;

/// Operator-facing validation failures for the dialogs and CLI commands.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Project name cannot be empty")]
    EmptyProjectName,
    #[error("Project name already exists")]
    DuplicateProjectName,
    #[error("Project name is too long (max 30 characters)")]
    ProjectNameTooLong,
    #[error("Invalid start time format (use YYYY-MM-DD HH:MM:SS)")]
    InvalidStartTime,
    #[error("Invalid duration format (use hh:mm:ss, non-negative, minutes/seconds <= 59)")]
    InvalidDuration,
    #[error("Project does not exist")]
    UnknownProject,
}

/// Checks a new project name and returns it trimmed.
pub fn validate_project_name(name: &str, projects: &[Project]) -> Result<String, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyProjectName);
    }
    if name.chars().count() > PROJECT_NAME_LIMIT {
        return Err(ValidationError::ProjectNameTooLong);
    }
    if projects.iter().any(|project| project.name == name) {
        return Err(ValidationError::DuplicateProjectName);
    }
    Ok(name.to_string())
}

/// Builds a record from the three dialog fields. The first failing rule wins,
/// in the order: project name, start time, duration, project existence.
pub fn validate_record(
    project: &str,
    start: &str,
    duration: &str,
    projects: &[Project],
) -> Result<Record, ValidationError> {
    let project = project.trim();
    if project.is_empty() {
        return Err(ValidationError::EmptyProjectName);
    }
    let start_time = parse_start_time(start).ok_or(ValidationError::InvalidStartTime)?;
    let duration_seconds =
        parse_duration(duration).map_err(|_| ValidationError::InvalidDuration)?;
    if !projects.iter().any(|candidate| candidate.name == project) {
        return Err(ValidationError::UnknownProject);
    }
    Ok(Record {
        project: project.to_string(),
        duration_seconds,
        start_time,
    })
}
