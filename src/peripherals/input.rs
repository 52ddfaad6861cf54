//! Logical buttons sampled once per tick.

/// Level of each logical button for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Buttons {
    /// Take the first-mark role.
    pub claim: bool,
    /// Place a mark at the cursor.
    pub confirm: bool,
    /// Ask for a new match.
    pub restart: bool,
}

impl Buttons {
    /// Nothing pressed.
    pub const NONE: Self = Self {
        claim: false,
        confirm: false,
        restart: false,
    };

    /// Only the claim button.
    pub fn claim() -> Self {
        Self {
            claim: true,
            ..Self::NONE
        }
    }

    /// Only the confirm button.
    pub fn confirm() -> Self {
        Self {
            confirm: true,
            ..Self::NONE
        }
    }

    /// Only the restart button.
    pub fn restart() -> Self {
        Self {
            restart: true,
            ..Self::NONE
        }
    }

    /// Returns true if any button is down.
    pub fn any(&self) -> bool {
        self.claim || self.confirm || self.restart
    }
}

/// Polled, level-triggered input.
///
/// Debouncing belongs to the implementor; the coordinator reads the
/// returned levels once per tick, after the packet receive.
pub trait InputSource {
    /// Reads the current button levels.
    fn sample(&mut self) -> Buttons;
}

impl InputSource for Buttons {
    fn sample(&mut self) -> Buttons {
        *self
    }
}
