use std::collections::VecDeque;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use crate::app::{App, AppEvent, Effect};
use crate::store::SnapshotStore;

/// Upper bound on a single poll when no tick is scheduled.
const IDLE_POLL: Duration = Duration::from_millis(500);

/// Pending events: results fed back by effects, then the next scheduled
/// tick, then terminal input.
pub struct EventQueue {
    pending: VecDeque<AppEvent>,
    next_tick: Option<Instant>,
}

impl EventQueue {
    /// Starts with a tick due immediately so the tick chain begins.
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
            next_tick: Some(Instant::now()),
        }
    }

    pub fn push(&mut self, event: AppEvent) {
        self.pending.push_back(event);
    }

    /// Only one tick is ever outstanding; a later request replaces it.
    pub fn schedule_tick(&mut self, delay: Duration) {
        self.next_tick = Some(Instant::now() + delay);
    }

    /// Blocks until the next event is available.
    pub fn next(&mut self) -> Result<AppEvent> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Ok(event);
            }

            let timeout = self
                .next_tick
                .map_or(IDLE_POLL, |deadline| {
                    deadline.saturating_duration_since(Instant::now())
                });
            if event::poll(timeout)? {
                if let Some(event) = map_event(event::read()?) {
                    return Ok(event);
                }
                continue;
            }

            if self.next_tick.is_some_and(|deadline| Instant::now() >= deadline) {
                self.next_tick = None;
                return Ok(AppEvent::Tick);
            }
        }
    }
}

/// Maps crossterm events to `AppEvent`s; everything else is dropped.
fn map_event(event: Event) -> Option<AppEvent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
        Event::Resize(width, height) => Some(AppEvent::Resize(width, height)),
        _ => None,
    }
}

/// What the loop should do after a batch of effects.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    pub redraw: bool,
    pub quit: bool,
}

/// Carries out the effects of one update, in order.
pub fn apply_effects<S: SnapshotStore>(
    app: &App,
    effects: Vec<Effect>,
    queue: &mut EventQueue,
    store: &S,
) -> Outcome {
    let mut outcome = Outcome::default();
    for effect in effects {
        match effect {
            Effect::Persist => match store.save(&app.snapshot()) {
                Ok(()) => queue.push(AppEvent::Saved),
                Err(err) => {
                    log::warn!("Failed to save: {err:#}");
                    queue.push(AppEvent::SaveFailed(format!("{err:#}")));
                }
            },
            Effect::ScheduleTick(delay) => queue.schedule_tick(delay),
            Effect::Redraw => outcome.redraw = true,
            Effect::Quit => outcome.quit = true,
        }
    }
    outcome
}

/// Runs the main event loop.
pub fn run<S: SnapshotStore>(
    app: &mut App,
    terminal: &mut crate::tui::Terminal,
    store: &S,
) -> Result<()> {
    let mut queue = EventQueue::new();
    terminal.draw(|frame| crate::ui::draw(frame, app))?;

    loop {
        let event = queue.next()?;
        let effects = app.update(event);
        let outcome = apply_effects(app, effects, &mut queue, store);
        if outcome.quit {
            break;
        }
        if outcome.redraw {
            terminal.draw(|frame| crate::ui::draw(frame, app))?;
        }
    }

    log::info!("Event loop finished");
    Ok(())
}
