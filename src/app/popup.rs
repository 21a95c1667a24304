use crossterm::event::{KeyCode, KeyEvent};

use crate::format::{format_duration, format_start_time};
use crate::types::Record;

use super::input::TextInput;
use super::validate::PROJECT_NAME_LIMIT;

const START_TIME_LIMIT: usize = 19;
const DURATION_LIMIT: usize = 8;

/// The active dialog. At most one is open at a time.
#[derive(Clone, Debug)]
pub enum Modal {
    NewProject(NewProjectPopup),
    NewRecord(RecordPopup),
    /// Edits the record at `index` in the full record list.
    EditRecord { index: usize, popup: RecordPopup },
}

impl Modal {
    pub fn title(&self) -> &'static str {
        match self {
            Modal::NewProject(_) => "New Project",
            Modal::NewRecord(_) => "New Record",
            Modal::EditRecord { .. } => "Edit Record",
        }
    }

    pub fn next_field(&mut self) {
        if let Some(popup) = self.record_popup_mut() {
            popup.field = popup.field.next();
        }
    }

    pub fn prev_field(&mut self) {
        if let Some(popup) = self.record_popup_mut() {
            popup.field = popup.field.prev();
        }
    }

    pub fn focused_input_mut(&mut self) -> &mut TextInput {
        match self {
            Modal::NewProject(popup) => &mut popup.name,
            Modal::NewRecord(popup) | Modal::EditRecord { popup, .. } => popup.focused_input_mut(),
        }
    }

    fn record_popup_mut(&mut self) -> Option<&mut RecordPopup> {
        match self {
            Modal::NewProject(_) => None,
            Modal::NewRecord(popup) | Modal::EditRecord { popup, .. } => Some(popup),
        }
    }
}

#[derive(Clone, Debug)]
pub struct NewProjectPopup {
    pub name: TextInput,
}

impl Default for NewProjectPopup {
    fn default() -> Self {
        Self {
            name: TextInput::new("Enter project name", PROJECT_NAME_LIMIT),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordField {
    Project,
    Start,
    Duration,
}

impl RecordField {
    pub fn next(self) -> Self {
        match self {
            RecordField::Project => RecordField::Start,
            RecordField::Start => RecordField::Duration,
            RecordField::Duration => RecordField::Project,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            RecordField::Project => RecordField::Duration,
            RecordField::Start => RecordField::Project,
            RecordField::Duration => RecordField::Start,
        }
    }
}

/// Fields shared by the New-Record and Edit-Record dialogs.
#[derive(Clone, Debug)]
pub struct RecordPopup {
    pub project: TextInput,
    pub start: TextInput,
    pub duration: TextInput,
    pub field: RecordField,
}

impl RecordPopup {
    pub fn new(project: Option<&str>) -> Self {
        let mut popup = Self {
            project: TextInput::new("Enter project name", PROJECT_NAME_LIMIT),
            start: TextInput::new("YYYY-MM-DD HH:MM:SS", START_TIME_LIMIT),
            duration: TextInput::new("hh:mm:ss", DURATION_LIMIT),
            field: RecordField::Project,
        };
        if let Some(project) = project {
            popup.project.prefill(project);
        }
        popup
    }

    pub fn from_record(record: &Record) -> Self {
        let mut popup = Self::new(Some(&record.project));
        popup.start.prefill(&format_start_time(&record.start_time));
        popup.duration.prefill(&format_duration(record.duration_seconds));
        popup
    }

    pub fn focused_input_mut(&mut self) -> &mut TextInput {
        match self.field {
            RecordField::Project => &mut self.project,
            RecordField::Start => &mut self.start,
            RecordField::Duration => &mut self.duration,
        }
    }
}

/// How a key press is interpreted while a dialog is open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PopupKey {
    Commit,
    Cancel,
    NextField,
    PrevField,
    Edit(KeyEvent),
}

pub fn classify_key(key: KeyEvent) -> PopupKey {
    match key.code {
        KeyCode::Enter => PopupKey::Commit,
        KeyCode::Esc => PopupKey::Cancel,
        KeyCode::Tab | KeyCode::Down => PopupKey::NextField,
        KeyCode::BackTab | KeyCode::Up => PopupKey::PrevField,
        _ => PopupKey::Edit(key),
    }
}
