/// The three selectable panels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    Periods,
    Projects,
    Logs,
}

/// The panels in the left column; Logs remembers which one it came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LeftPanel {
    Periods,
    Projects,
}

impl From<LeftPanel> for Focus {
    fn from(panel: LeftPanel) -> Self {
        match panel {
            LeftPanel::Periods => Focus::Periods,
            LeftPanel::Projects => Focus::Projects,
        }
    }
}

impl Focus {
    fn as_left(self) -> Option<LeftPanel> {
        match self {
            Focus::Periods => Some(LeftPanel::Periods),
            Focus::Projects => Some(LeftPanel::Projects),
            Focus::Logs => None,
        }
    }
}

/// Focus routing between panels.
///
/// Every transition that moves focus returns the panel that was entered, so
/// the caller can reset that panel's cursor. `prev_left` always holds the last
/// left-column panel that had focus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FocusState {
    focused: Focus,
    prev_left: LeftPanel,
}

impl Default for FocusState {
    fn default() -> Self {
        Self {
            focused: Focus::Periods,
            prev_left: LeftPanel::Periods,
        }
    }
}

impl FocusState {
    pub fn focused(&self) -> Focus {
        self.focused
    }

    pub fn prev_left(&self) -> LeftPanel {
        self.prev_left
    }

    /// Periods -> Projects -> Logs -> Periods.
    pub fn advance(&mut self) -> Focus {
        let target = match self.focused {
            Focus::Periods => Focus::Projects,
            Focus::Projects => Focus::Logs,
            Focus::Logs => Focus::Periods,
        };
        self.move_to(target)
    }

    /// Periods -> Logs -> Projects -> Periods.
    pub fn retreat(&mut self) -> Focus {
        let target = match self.focused {
            Focus::Periods => Focus::Logs,
            Focus::Projects => Focus::Periods,
            Focus::Logs => Focus::Projects,
        };
        self.move_to(target)
    }

    pub fn enter_logs(&mut self) -> Option<Focus> {
        if self.focused == Focus::Logs {
            return None;
        }
        Some(self.move_to(Focus::Logs))
    }

    pub fn leave_logs(&mut self) -> Option<Focus> {
        if self.focused != Focus::Logs {
            return None;
        }
        Some(self.move_to(self.prev_left.into()))
    }

    fn move_to(&mut self, target: Focus) -> Focus {
        if let Some(departed) = self.focused.as_left() {
            self.prev_left = departed;
        }
        if let Some(entered) = target.as_left() {
            self.prev_left = entered;
        }
        self.focused = target;
        target
    }
}
