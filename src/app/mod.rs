mod filter;
mod focus;
mod input;
mod panel;
mod popup;
mod state;
mod timer;
pub mod validate;

use std::time::Duration;

use crossterm::event::KeyEvent;

pub use filter::{total_duration, visible_records};
pub use focus::Focus;
pub use input::TextInput;
pub use popup::{Modal, RecordField, RecordPopup};
pub use state::App;

/// Possible input events the app reacts to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppEvent {
    Tick,
    Key(KeyEvent),
    Resize(u16, u16),
    /// The last snapshot write failed with the given cause.
    SaveFailed(String),
    /// The last snapshot write succeeded.
    Saved,
}

/// Side effects requested by `App::update`, carried out by the event loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Write the current snapshot through the store.
    Persist,
    /// Deliver the next `AppEvent::Tick` after the given delay.
    ScheduleTick(Duration),
    Redraw,
    Quit,
}
