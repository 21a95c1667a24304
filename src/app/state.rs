use std::time::Duration;

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::types::{Period, Project, Record, Snapshot, Timer};

use super::filter::{self, LogEntry};
use super::focus::{Focus, FocusState, LeftPanel};
use super::panel::Panel;
use super::popup::{self, Modal, NewProjectPopup, PopupKey, RecordPopup};
use super::timer::TimerTransition;
use super::validate::{validate_project_name, validate_record};
use super::{AppEvent, Effect};

/// The top-level application state.
///
/// All mutation goes through [`App::update`], which returns the side effects
/// the event loop has to carry out. The model itself never touches the
/// terminal or the file system.
pub struct App {
    pub periods: Panel<Period>,
    pub projects: Panel<Project>,
    /// Derived from `records`, never edited directly.
    pub logs: Panel<LogEntry>,
    focus: FocusState,
    pub timer: Timer,
    records: Vec<Record>,
    pub modal: Option<Modal>,
    pub help_visible: bool,
    /// Validation message shown inside the active dialog.
    pub error_message: Option<String>,
    /// One-shot notice shown in the status bar until the next handled key.
    pub status: Option<String>,
    pub save_error: Option<String>,
    pub terminal_size: (u16, u16),
    tick_rate: Duration,
}

impl App {
    pub fn new(snapshot: Snapshot, tick_rate: Duration, now: DateTime<Local>) -> Self {
        let Snapshot {
            projects,
            records,
            timer,
        } = snapshot;
        let mut app = Self {
            periods: Panel::new(Period::ALL.to_vec()),
            projects: Panel::new(projects),
            logs: Panel::new(Vec::new()),
            focus: FocusState::default(),
            timer,
            records,
            modal: None,
            help_visible: false,
            error_message: None,
            status: None,
            save_error: None,
            terminal_size: (80, 24),
            tick_rate,
        };
        app.refresh_logs(now);
        app
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            projects: self.projects.items().to_vec(),
            records: self.records.clone(),
            timer: self.timer.clone(),
        }
    }

    pub fn focused(&self) -> Focus {
        self.focus.focused()
    }

    pub fn prev_left_focus(&self) -> LeftPanel {
        self.focus.prev_left()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn selected_period(&self) -> Period {
        self.periods.selected().copied().unwrap_or(Period::All)
    }

    /// Sum of the durations currently shown in the Logs panel.
    pub fn total_duration(&self) -> i64 {
        filter::total_duration(self.logs.items())
    }

    pub fn timer_display(&self, now: DateTime<Local>) -> String {
        self.timer.display(now)
    }

    pub fn update(&mut self, event: AppEvent) -> Vec<Effect> {
        self.update_at(event, Local::now())
    }

    /// Central update function - process an event at the given wall-clock time.
    pub fn update_at(&mut self, event: AppEvent, now: DateTime<Local>) -> Vec<Effect> {
        match event {
            AppEvent::Tick => self.on_tick(now),
            AppEvent::Key(key) => self.handle_key(key, now),
            AppEvent::Resize(width, height) => {
                self.terminal_size = (width, height);
                vec![Effect::Redraw]
            }
            AppEvent::SaveFailed(cause) => {
                self.save_error = Some(format!("Failed to save: {cause}"));
                vec![Effect::Redraw]
            }
            AppEvent::Saved => {
                if self.save_error.take().is_some() {
                    vec![Effect::Redraw]
                } else {
                    Vec::new()
                }
            }
        }
    }

    fn on_tick(&mut self, now: DateTime<Local>) -> Vec<Effect> {
        let visible = self.visible_records(now);
        if visible.len() != self.logs.len() {
            log::debug!(
                "Logs resynced on tick: {} -> {} entries",
                self.logs.len(),
                visible.len()
            );
            self.logs.set_items(visible);
        }
        vec![Effect::ScheduleTick(self.tick_rate), Effect::Redraw]
    }

    fn handle_key(&mut self, key: KeyEvent, now: DateTime<Local>) -> Vec<Effect> {
        if key.kind != KeyEventKind::Press {
            return Vec::new();
        }
        if self.modal.is_some() {
            return self.handle_modal_key(key, now);
        }
        if self.help_visible {
            self.help_visible = false;
            return vec![Effect::Redraw];
        }

        let previous_status = self.status.take();
        let effects = self.handle_panel_key(key, now);
        if effects.is_empty() {
            self.status = previous_status;
        }
        effects
    }

    fn handle_panel_key(&mut self, key: KeyEvent, now: DateTime<Local>) -> Vec<Effect> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => self.quit(),
                _ => Vec::new(),
            };
        }
        if key.modifiers.contains(KeyModifiers::ALT) {
            return Vec::new();
        }

        match key.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Tab => {
                let entered = self.focus.advance();
                self.enter_panel(entered, now)
            }
            KeyCode::BackTab => {
                let entered = self.focus.retreat();
                self.enter_panel(entered, now)
            }
            KeyCode::Char('l') | KeyCode::Right => match self.focus.enter_logs() {
                Some(entered) => self.enter_panel(entered, now),
                None => Vec::new(),
            },
            KeyCode::Char('h') | KeyCode::Left => match self.focus.leave_logs() {
                Some(entered) => self.enter_panel(entered, now),
                None => Vec::new(),
            },
            KeyCode::Char('j') | KeyCode::Down => self.move_cursor(true, now),
            KeyCode::Char('k') | KeyCode::Up => self.move_cursor(false, now),
            KeyCode::Char(' ') => self.toggle_project_selection(now),
            KeyCode::Char('n') => self.open_new_popup(),
            KeyCode::Char('e') => self.open_edit_popup(),
            KeyCode::Char('d') => match self.focus.focused() {
                Focus::Projects => self.delete_project(now),
                Focus::Logs => self.delete_record(now),
                Focus::Periods => Vec::new(),
            },
            KeyCode::Char('s') => self.toggle_timer(now),
            KeyCode::Char('?') => {
                self.help_visible = true;
                vec![Effect::Redraw]
            }
            _ => Vec::new(),
        }
    }

    fn quit(&mut self) -> Vec<Effect> {
        log::info!("Quit requested");
        vec![Effect::Persist, Effect::Quit]
    }

    /// Entering a panel always starts its cursor at the first item.
    fn enter_panel(&mut self, panel: Focus, now: DateTime<Local>) -> Vec<Effect> {
        match panel {
            Focus::Periods => {
                let before = self.selected_period();
                self.periods.select_first();
                if self.selected_period() != before {
                    self.refresh_logs(now);
                }
            }
            Focus::Projects => self.projects.select_first(),
            Focus::Logs => self.logs.select_first(),
        }
        log::debug!("Focus moved to {panel:?}");
        vec![Effect::Redraw]
    }

    fn move_cursor(&mut self, forward: bool, now: DateTime<Local>) -> Vec<Effect> {
        match self.focus.focused() {
            Focus::Periods => {
                let before = self.periods.cursor();
                step(&mut self.periods, forward);
                if self.periods.cursor() != before {
                    self.refresh_logs(now);
                }
            }
            Focus::Projects => step(&mut self.projects, forward),
            Focus::Logs => step(&mut self.logs, forward),
        }
        vec![Effect::Redraw]
    }

    /// Space selects the project under the cursor and clears every other
    /// flag; on the already-selected project it clears the selection.
    fn toggle_project_selection(&mut self, now: DateTime<Local>) -> Vec<Effect> {
        if self.focus.focused() != Focus::Projects {
            return Vec::new();
        }
        let cursor = self.projects.cursor();
        let Some(was_selected) = self.projects.selected().map(|project| project.selected) else {
            return Vec::new();
        };
        for (index, project) in self.projects.items_mut().iter_mut().enumerate() {
            project.selected = index == cursor && !was_selected;
        }
        self.stop_timer_if_unselected();
        self.refresh_logs(now);
        vec![Effect::Persist, Effect::Redraw]
    }

    fn delete_project(&mut self, now: DateTime<Local>) -> Vec<Effect> {
        if self.projects.is_empty() {
            return Vec::new();
        }
        if self.projects.len() == 1 {
            self.status = Some("Cannot delete the last project".to_string());
            return vec![Effect::Redraw];
        }
        let cursor = self.projects.cursor();
        let was_last = cursor + 1 == self.projects.len();
        if let Some(removed) = self.projects.remove(cursor) {
            log::info!("Deleted project '{}'", removed.name);
        }
        if was_last {
            self.projects.select_first();
        }
        self.stop_timer_if_unselected();
        self.refresh_logs(now);
        vec![Effect::Persist, Effect::Redraw]
    }

    /// Removes the record under the Logs cursor from the full record list.
    fn delete_record(&mut self, now: DateTime<Local>) -> Vec<Effect> {
        let Some(index) = self.logs.selected().map(|entry| entry.index) else {
            return Vec::new();
        };
        if index >= self.records.len() {
            return Vec::new();
        }
        let removed = self.records.remove(index);
        log::debug!("Deleted record {index} for '{}'", removed.project);
        self.refresh_logs(now);
        vec![Effect::Persist, Effect::Redraw]
    }

    fn toggle_timer(&mut self, now: DateTime<Local>) -> Vec<Effect> {
        match self.timer.toggle(self.projects.items(), now) {
            TimerTransition::Started => {
                log::info!("Timer started for '{}'", self.timer.project().unwrap_or_default());
                vec![Effect::Persist, Effect::Redraw]
            }
            TimerTransition::Stopped(record) => {
                log::info!(
                    "Timer stopped for '{}' after {}s",
                    record.project,
                    record.duration_seconds
                );
                self.records.push(record);
                self.refresh_logs(now);
                vec![Effect::Persist, Effect::Redraw]
            }
            TimerTransition::Unchanged => Vec::new(),
        }
    }

    /// A running timer belongs to the selected project; once that project is
    /// deselected or deleted the timer is dropped without recording a session.
    fn stop_timer_if_unselected(&mut self) {
        let Some(timer_project) = self.timer.project() else {
            return;
        };
        let selected = filter::selected_project(self.projects.items());
        if selected.map(|project| project.name.as_str()) != Some(timer_project) {
            log::info!("Timer for '{timer_project}' stopped: project no longer selected");
            self.timer = Timer::Stopped;
        }
    }

    fn open_new_popup(&mut self) -> Vec<Effect> {
        match self.focus.focused() {
            Focus::Projects => self.open_modal(Modal::NewProject(NewProjectPopup::default())),
            Focus::Logs => {
                let prefill = filter::selected_project(self.projects.items())
                    .map(|project| project.name.clone());
                self.open_modal(Modal::NewRecord(RecordPopup::new(prefill.as_deref())))
            }
            Focus::Periods => Vec::new(),
        }
    }

    fn open_edit_popup(&mut self) -> Vec<Effect> {
        if self.focus.focused() != Focus::Logs {
            return Vec::new();
        }
        let Some(index) = self.logs.selected().map(|entry| entry.index) else {
            return Vec::new();
        };
        let Some(record) = self.records.get(index) else {
            return Vec::new();
        };
        let popup = RecordPopup::from_record(record);
        self.open_modal(Modal::EditRecord { index, popup })
    }

    fn open_modal(&mut self, modal: Modal) -> Vec<Effect> {
        log::debug!("Opened dialog '{}'", modal.title());
        self.error_message = None;
        self.modal = Some(modal);
        vec![Effect::Redraw]
    }

    fn close_modal(&mut self) {
        self.modal = None;
        self.error_message = None;
    }

    fn handle_modal_key(&mut self, key: KeyEvent, now: DateTime<Local>) -> Vec<Effect> {
        let Some(modal) = self.modal.as_mut() else {
            return Vec::new();
        };
        match popup::classify_key(key) {
            PopupKey::Cancel => {
                self.close_modal();
                vec![Effect::Redraw]
            }
            PopupKey::Commit => self.commit_modal(now),
            PopupKey::NextField => {
                modal.next_field();
                vec![Effect::Redraw]
            }
            PopupKey::PrevField => {
                modal.prev_field();
                vec![Effect::Redraw]
            }
            PopupKey::Edit(key) => {
                if modal.focused_input_mut().handle_key(key) {
                    vec![Effect::Redraw]
                } else {
                    Vec::new()
                }
            }
        }
    }

    fn commit_modal(&mut self, now: DateTime<Local>) -> Vec<Effect> {
        let Some(modal) = self.modal.take() else {
            return Vec::new();
        };

        let outcome = match &modal {
            Modal::NewProject(popup) => {
                validate_project_name(popup.name.value(), self.projects.items()).map(|name| {
                    log::info!("Created project '{name}'");
                    self.projects.push(Project::new(name));
                })
            }
            Modal::NewRecord(popup) => {
                validate_record(
                    popup.project.value(),
                    popup.start.value(),
                    popup.duration.value(),
                    self.projects.items(),
                )
                .map(|record| self.records.push(record))
            }
            Modal::EditRecord { index, popup } => validate_record(
                popup.project.value(),
                popup.start.value(),
                popup.duration.value(),
                self.projects.items(),
            )
            .map(|record| {
                if let Some(slot) = self.records.get_mut(*index) {
                    *slot = record;
                }
            }),
        };

        match outcome {
            Ok(()) => {
                self.close_modal();
                self.refresh_logs(now);
                vec![Effect::Persist, Effect::Redraw]
            }
            Err(err) => {
                self.error_message = Some(err.to_string());
                self.modal = Some(modal);
                vec![Effect::Redraw]
            }
        }
    }

    fn visible_records(&self, now: DateTime<Local>) -> Vec<LogEntry> {
        filter::visible_records(
            self.projects.items(),
            &self.records,
            self.selected_period(),
            now,
        )
    }

    fn refresh_logs(&mut self, now: DateTime<Local>) {
        let entries = self.visible_records(now);
        self.logs.set_items(entries);
    }
}

fn step<T>(panel: &mut Panel<T>, forward: bool) {
    if forward {
        panel.next();
    } else {
        panel.prev();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::parse_start_time;
    use chrono::{TimeDelta, TimeZone};

    const TICK: Duration = Duration::from_millis(100);

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn record(project: &str, start: &str, seconds: i64) -> Record {
        Record {
            project: project.to_string(),
            duration_seconds: seconds,
            start_time: parse_start_time(start).unwrap(),
        }
    }

    fn test_app() -> App {
        App::new(Snapshot::default(), TICK, now())
    }

    fn app_with_records(records: Vec<Record>) -> App {
        let snapshot = Snapshot {
            records,
            ..Snapshot::default()
        };
        App::new(snapshot, TICK, now())
    }

    fn key_event(code: KeyCode) -> AppEvent {
        AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn press(app: &mut App, code: KeyCode) -> Vec<Effect> {
        app.update_at(key_event(code), now())
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    fn clear_field(app: &mut App) {
        press(app, KeyCode::End);
        for _ in 0..40 {
            press(app, KeyCode::Backspace);
        }
    }

    fn selected_count(app: &App) -> usize {
        app.projects.items().iter().filter(|p| p.selected).count()
    }

    #[test]
    fn empty_project_name_keeps_dialog_open() {
        let mut app = test_app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('n'));
        let effects = press(&mut app, KeyCode::Enter);

        assert_eq!(effects, vec![Effect::Redraw]);
        assert_eq!(
            app.error_message.as_deref(),
            Some("Project name cannot be empty")
        );
        assert!(matches!(app.modal, Some(Modal::NewProject(_))));
        assert_eq!(app.projects.len(), 2);
    }

    #[test]
    fn new_project_is_appended_unselected() {
        let mut app = test_app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "Gamma");
        let effects = press(&mut app, KeyCode::Enter);

        assert_eq!(effects, vec![Effect::Persist, Effect::Redraw]);
        assert!(app.modal.is_none());
        let last = app.projects.items().last().unwrap();
        assert_eq!(last.name, "Gamma");
        assert!(!last.selected);
    }

    #[test]
    fn duplicate_project_name_is_rejected() {
        let mut app = test_app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "Project B");
        press(&mut app, KeyCode::Enter);

        assert_eq!(
            app.error_message.as_deref(),
            Some("Project name already exists")
        );
        assert_eq!(app.projects.len(), 2);
    }

    #[test]
    fn cancel_discards_dialog_input() {
        let mut app = test_app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('n'));
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "Draft");
        let effects = press(&mut app, KeyCode::Esc);

        assert_eq!(effects, vec![Effect::Redraw]);
        assert!(app.modal.is_none());
        assert!(app.error_message.is_none());
        assert_eq!(app.projects.len(), 2);

        press(&mut app, KeyCode::Char('n'));
        let Some(Modal::NewProject(popup)) = &app.modal else {
            panic!("expected the new project dialog");
        };
        assert_eq!(popup.name.value(), "");
    }

    #[test]
    fn record_for_unknown_project_is_rejected() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "Alpha");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "2024-01-01 10:00:00");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "01:30:00");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.error_message.as_deref(), Some("Project does not exist"));
        assert!(app.records().is_empty());
        assert!(matches!(app.modal, Some(Modal::NewRecord(_))));
    }

    #[test]
    fn new_record_is_appended_and_shown() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "Project A");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "2024-01-01 10:00:00");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "01:30:00");
        let effects = press(&mut app, KeyCode::Enter);

        assert_eq!(effects, vec![Effect::Persist, Effect::Redraw]);
        assert_eq!(
            app.records(),
            &[record("Project A", "2024-01-01 10:00:00", 5400)]
        );
        assert_eq!(app.logs.len(), 1);
        assert_eq!(app.total_duration(), 5400);
    }

    #[test]
    fn new_record_dialog_prefills_selected_project() {
        let mut app = test_app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Char('n'));

        let Some(Modal::NewRecord(popup)) = &app.modal else {
            panic!("expected the new record dialog");
        };
        assert_eq!(popup.project.value(), "Project B");
    }

    #[test]
    fn edit_replaces_record_in_place() {
        let mut app = app_with_records(vec![
            record("Project A", "2024-06-15 10:00:00", 600),
            record("Project B", "2024-06-15 11:00:00", 300),
        ]);
        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Char('e'));
        clear_field(&mut app);
        type_text(&mut app, "Project B");
        press(&mut app, KeyCode::Tab);
        clear_field(&mut app);
        type_text(&mut app, "2024-06-14 09:30:00");
        press(&mut app, KeyCode::Tab);
        clear_field(&mut app);
        type_text(&mut app, "02:00:00");
        press(&mut app, KeyCode::Enter);

        assert!(app.modal.is_none());
        assert_eq!(app.records().len(), 2);
        assert_eq!(
            app.records()[0],
            record("Project B", "2024-06-14 09:30:00", 7200)
        );
        assert_eq!(app.records()[1].duration_seconds, 300);
    }

    #[test]
    fn edit_with_bad_duration_leaves_record_untouched() {
        let original = record("Project A", "2024-06-15 10:00:00", 600);
        let mut app = app_with_records(vec![original.clone()]);
        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Char('e'));
        press(&mut app, KeyCode::BackTab);
        clear_field(&mut app);
        type_text(&mut app, "00:75:00");
        press(&mut app, KeyCode::Enter);

        assert_eq!(
            app.error_message.as_deref(),
            Some("Invalid duration format (use hh:mm:ss, non-negative, minutes/seconds <= 59)")
        );
        assert_eq!(app.records(), &[original]);
    }

    #[test]
    fn unchanged_edit_keeps_long_durations() {
        let original = record("Project A", "2024-06-10 10:00:00", 445_550);
        let mut app = app_with_records(vec![original.clone()]);
        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Char('e'));
        let effects = press(&mut app, KeyCode::Enter);

        assert_eq!(effects, vec![Effect::Persist, Effect::Redraw]);
        assert!(app.modal.is_none());
        assert!(app.error_message.is_none());
        assert_eq!(app.records(), &[original]);
    }

    #[test]
    fn selecting_another_project_stops_the_timer() {
        let mut app = test_app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.timer.project(), Some("Project A"));

        press(&mut app, KeyCode::Char('j'));
        let effects = press(&mut app, KeyCode::Char(' '));

        assert_eq!(effects, vec![Effect::Persist, Effect::Redraw]);
        assert!(app.projects.items()[1].selected);
        assert_eq!(app.timer, Timer::Stopped);
        assert!(app.records().is_empty());
    }

    #[test]
    fn clearing_the_timer_projects_selection_stops_the_timer() {
        let mut app = test_app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Char('s'));
        assert!(app.timer.is_running());

        press(&mut app, KeyCode::Char(' '));

        assert_eq!(selected_count(&app), 0);
        assert_eq!(app.timer, Timer::Stopped);
        assert!(app.records().is_empty());
    }

    #[test]
    fn selection_stays_single_across_toggles() {
        let mut app = test_app();
        press(&mut app, KeyCode::Tab);
        let keys = [
            KeyCode::Char(' '),
            KeyCode::Char('j'),
            KeyCode::Char(' '),
            KeyCode::Char('k'),
            KeyCode::Char(' '),
            KeyCode::Char(' '),
            KeyCode::Char('j'),
            KeyCode::Char(' '),
        ];
        for code in keys {
            press(&mut app, code);
            assert!(selected_count(&app) <= 1);
        }
        assert!(app.projects.items()[1].selected);
    }

    #[test]
    fn space_on_selected_project_clears_selection() {
        let mut app = test_app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(selected_count(&app), 1);
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(selected_count(&app), 0);
    }

    #[test]
    fn last_project_cannot_be_deleted() {
        let snapshot = Snapshot {
            projects: vec![Project::new("Solo")],
            ..Snapshot::default()
        };
        let mut app = App::new(snapshot, TICK, now());
        press(&mut app, KeyCode::Tab);
        let effects = press(&mut app, KeyCode::Char('d'));

        assert_eq!(effects, vec![Effect::Redraw]);
        assert_eq!(app.projects.len(), 1);
        assert!(app.status.is_some());
    }

    #[test]
    fn deleting_the_timer_project_stops_the_timer() {
        let mut app = test_app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Char('s'));
        assert!(app.timer.is_running());

        let effects = press(&mut app, KeyCode::Char('d'));
        assert_eq!(effects, vec![Effect::Persist, Effect::Redraw]);
        assert_eq!(app.projects.len(), 1);
        assert_eq!(app.timer, Timer::Stopped);
        assert!(app.records().is_empty());
    }

    #[test]
    fn deleting_another_project_keeps_the_timer() {
        let mut app = test_app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('d'));

        assert_eq!(app.projects.len(), 1);
        assert_eq!(app.projects.cursor(), 0);
        assert_eq!(app.timer.project(), Some("Project A"));
    }

    #[test]
    fn records_of_deleted_projects_are_hidden_not_removed() {
        let mut app = app_with_records(vec![
            record("Project A", "2024-06-15 10:00:00", 60),
            record("Project B", "2024-06-15 11:00:00", 120),
        ]);
        assert_eq!(app.logs.len(), 2);

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('d'));

        assert_eq!(app.records().len(), 2);
        assert_eq!(app.logs.len(), 1);
        assert_eq!(app.total_duration(), 60);
    }

    #[test]
    fn timer_round_trip_appends_one_record() {
        let mut app = test_app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char(' '));
        let effects = press(&mut app, KeyCode::Char('s'));
        assert_eq!(effects, vec![Effect::Persist, Effect::Redraw]);

        let later = now() + TimeDelta::seconds(90);
        app.update_at(key_event(KeyCode::Char('s')), later);

        assert_eq!(app.timer, Timer::Stopped);
        assert_eq!(app.records().len(), 1);
        let session = &app.records()[0];
        assert_eq!(session.project, "Project A");
        assert_eq!(session.duration_seconds, 90);
        assert_eq!(session.start_time, now());
        assert_eq!(app.logs.len(), 1);
    }

    #[test]
    fn timer_without_selection_is_a_no_op() {
        let mut app = test_app();
        let effects = press(&mut app, KeyCode::Char('s'));
        assert!(effects.is_empty());
        assert!(!app.timer.is_running());
    }

    #[test]
    fn tick_resyncs_logs_when_records_age_out() {
        let mut app = app_with_records(vec![record("Project A", "2024-06-14 13:00:00", 60)]);
        for _ in 0..4 {
            press(&mut app, KeyCode::Char('j'));
        }
        assert_eq!(app.selected_period(), Period::Day);
        assert_eq!(app.logs.len(), 1);

        let effects = app.update_at(AppEvent::Tick, now() + TimeDelta::hours(2));
        assert_eq!(effects, vec![Effect::ScheduleTick(TICK), Effect::Redraw]);
        assert!(app.logs.is_empty());
    }

    #[test]
    fn tick_keeps_logs_cursor_when_nothing_changed() {
        let mut app = app_with_records(vec![
            record("Project A", "2024-06-15 10:00:00", 60),
            record("Project A", "2024-06-15 11:00:00", 60),
        ]);
        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Char('j'));
        app.update_at(AppEvent::Tick, now());
        assert_eq!(app.logs.cursor(), 1);
    }

    #[test]
    fn re_entering_periods_resets_the_period_filter() {
        let mut app = app_with_records(vec![record("Project A", "2023-01-01 10:00:00", 60)]);
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.selected_period(), Period::Year);
        assert!(app.logs.is_empty());

        for _ in 0..3 {
            press(&mut app, KeyCode::Tab);
        }
        assert_eq!(app.focused(), Focus::Periods);
        assert_eq!(app.selected_period(), Period::All);
        assert_eq!(app.logs.len(), 1);
    }

    #[test]
    fn leaving_logs_returns_to_the_previous_panel() {
        let mut app = test_app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Right);
        assert_eq!(app.focused(), Focus::Logs);
        assert_eq!(app.prev_left_focus(), LeftPanel::Projects);

        press(&mut app, KeyCode::Left);
        assert_eq!(app.focused(), Focus::Projects);
        assert_eq!(app.projects.cursor(), 0);
    }

    #[test]
    fn deleting_through_a_filtered_view_targets_the_shown_record() {
        let mut app = app_with_records(vec![
            record("Project A", "2024-06-15 08:00:00", 10),
            record("Project B", "2024-06-15 09:00:00", 20),
            record("Project A", "2024-06-15 10:00:00", 30),
        ]);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.logs.selected().map(|entry| entry.index), Some(2));

        press(&mut app, KeyCode::Char('d'));
        let remaining: Vec<i64> = app.records().iter().map(|r| r.duration_seconds).collect();
        assert_eq!(remaining, vec![10, 20]);
        assert_eq!(app.logs.len(), 1);
    }

    #[test]
    fn quit_persists_before_exiting() {
        let mut app = test_app();
        assert_eq!(
            press(&mut app, KeyCode::Char('q')),
            vec![Effect::Persist, Effect::Quit]
        );
        let ctrl_c = AppEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(
            app.update_at(ctrl_c, now()),
            vec![Effect::Persist, Effect::Quit]
        );
    }

    #[test]
    fn unhandled_keys_change_nothing() {
        let mut app = test_app();
        app.status = Some("kept".to_string());
        assert!(press(&mut app, KeyCode::F(5)).is_empty());
        assert!(press(&mut app, KeyCode::Char('d')).is_empty());
        assert!(press(&mut app, KeyCode::Char('h')).is_empty());
        assert_eq!(app.focused(), Focus::Periods);
        assert_eq!(app.status.as_deref(), Some("kept"));
    }

    #[test]
    fn help_overlay_swallows_the_next_key() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.help_visible);
        assert_eq!(press(&mut app, KeyCode::Char('q')), vec![Effect::Redraw]);
        assert!(!app.help_visible);
    }

    #[test]
    fn save_failures_are_reported_until_the_next_save() {
        let mut app = test_app();
        app.update_at(AppEvent::SaveFailed("disk full".to_string()), now());
        assert_eq!(app.save_error.as_deref(), Some("Failed to save: disk full"));

        assert_eq!(app.update_at(AppEvent::Saved, now()), vec![Effect::Redraw]);
        assert!(app.save_error.is_none());
        assert!(app.update_at(AppEvent::Saved, now()).is_empty());
    }

    #[test]
    fn snapshot_reflects_current_state() {
        let mut app = test_app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Char('s'));

        let snapshot = app.snapshot();
        assert!(snapshot.projects[0].selected);
        assert_eq!(
            snapshot.timer,
            Timer::Running {
                start_time: now(),
                project: "Project A".to_string(),
            }
        );
    }
}
