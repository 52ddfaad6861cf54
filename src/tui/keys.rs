//! Keyboard mapping for the terminal front end.

use crate::peripherals::{Buttons, Direction, InputSource};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Move the cursor one cell.
    Move(Direction),
    /// Press logical buttons for the next tick.
    Press(Buttons),
    /// Leave the game.
    Quit,
}

/// Maps a key event to an action; releases and unbound keys map to `None`.
pub fn action_for(key: KeyEvent) -> Option<KeyAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(KeyAction::Quit);
    }

    match key.code {
        KeyCode::Up => Some(KeyAction::Move(Direction::Up)),
        KeyCode::Down => Some(KeyAction::Move(Direction::Down)),
        KeyCode::Left => Some(KeyAction::Move(Direction::Left)),
        KeyCode::Right => Some(KeyAction::Move(Direction::Right)),
        // One physical "A" button both claims and confirms.
        KeyCode::Char('a') | KeyCode::Enter | KeyCode::Char(' ') => Some(KeyAction::Press(Buttons {
            claim: true,
            confirm: true,
            restart: false,
        })),
        KeyCode::Char('s') => Some(KeyAction::Press(Buttons::restart())),
        KeyCode::Char('q') | KeyCode::Esc => Some(KeyAction::Quit),
        _ => None,
    }
}

/// Holds presses seen between two ticks.
///
/// Terminals report key presses, not levels, so a press is held until the
/// next [`InputSource::sample`] and then released.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyLatch {
    held: Buttons,
}

impl KeyLatch {
    /// Creates a latch with nothing held.
    pub fn new() -> Self {
        Self::default()
    }

    /// Holds `buttons` until the next sample.
    pub fn press(&mut self, buttons: Buttons) {
        self.held.claim |= buttons.claim;
        self.held.confirm |= buttons.confirm;
        self.held.restart |= buttons.restart;
    }
}

impl InputSource for KeyLatch {
    fn sample(&mut self) -> Buttons {
        std::mem::take(&mut self.held)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrows_move() {
        assert_eq!(
            action_for(key(KeyCode::Left)),
            Some(KeyAction::Move(Direction::Left))
        );
        assert_eq!(
            action_for(key(KeyCode::Down)),
            Some(KeyAction::Move(Direction::Down))
        );
    }

    #[test]
    fn test_a_claims_and_confirms() {
        let Some(KeyAction::Press(buttons)) = action_for(key(KeyCode::Char('a'))) else {
            panic!("expected press");
        };
        assert!(buttons.claim && buttons.confirm && !buttons.restart);
        assert_eq!(action_for(key(KeyCode::Enter)), Some(KeyAction::Press(buttons)));
    }

    #[test]
    fn test_s_restarts() {
        assert_eq!(
            action_for(key(KeyCode::Char('s'))),
            Some(KeyAction::Press(Buttons::restart()))
        );
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(action_for(key(KeyCode::Char('q'))), Some(KeyAction::Quit));
        assert_eq!(action_for(key(KeyCode::Esc)), Some(KeyAction::Quit));
        assert_eq!(
            action_for(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(KeyAction::Quit)
        );
    }

    #[test]
    fn test_unbound_key_is_ignored() {
        assert_eq!(action_for(key(KeyCode::Char('z'))), None);
    }

    #[test]
    fn test_latch_releases_after_sample() {
        let mut latch = KeyLatch::new();
        latch.press(Buttons::restart());
        latch.press(Buttons::confirm());
        let sampled = latch.sample();
        assert!(sampled.restart && sampled.confirm);
        assert_eq!(latch.sample(), Buttons::NONE);
    }
}
