//! Coordinator state, role assignment and the restart barrier.

use serde::{Deserialize, Serialize};
use turnlink_board::Role;

/// Position in the turn-taking state machine.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
pub enum State {
    /// Opens the transport and draws the first screen.
    Init,
    /// Waiting for a local claim or the peer's claim.
    AwaitRole,
    /// Claimed first; waiting for the peer to accept second.
    AwaitAck,
    /// Resets board, turn and barrier for a fresh match.
    NewMatch,
    /// Announces whose turn it is.
    CheckTurn,
    /// Waiting for the local player to place a mark.
    MyTurn,
    /// Waiting for the peer's move.
    TheirTurn,
    /// Draws the placed mark and checks for the end of the match.
    Mark,
    /// Match over; waiting for both sides to ask for a restart.
    AwaitRestart,
}

impl State {
    /// True once roles are assigned (NewMatch and everything after it).
    pub fn is_negotiated(self) -> bool {
        !matches!(self, State::Init | State::AwaitRole | State::AwaitAck)
    }

    /// True while a match is being played.
    pub fn is_in_play(self) -> bool {
        matches!(
            self,
            State::CheckTurn | State::MyTurn | State::TheirTurn | State::Mark
        )
    }
}

/// Two-sided rendezvous that gates the next match.
///
/// Each flag only moves false→true until the barrier is crossed, at which
/// point the next `NewMatch` resets both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RestartBarrier {
    local_requested: bool,
    peer_requested: bool,
}

impl RestartBarrier {
    /// Local side asked for a restart.
    pub fn local_requested(&self) -> bool {
        self.local_requested
    }

    /// Peer asked for a restart.
    pub fn peer_requested(&self) -> bool {
        self.peer_requested
    }

    /// Records the local request. Returns false if it was already recorded.
    pub fn request_local(&mut self) -> bool {
        !std::mem::replace(&mut self.local_requested, true)
    }

    /// Records the peer's request.
    pub fn note_peer(&mut self) {
        self.peer_requested = true;
    }

    /// Both sides agree.
    pub fn is_crossed(&self) -> bool {
        self.local_requested && self.peer_requested
    }

    /// Returns true if neither side has asked.
    pub fn is_idle(&self) -> bool {
        !self.local_requested && !self.peer_requested
    }

    pub(super) fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Snapshot of everything the coordinator decides on between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Session {
    /// Current state.
    pub state: State,
    /// This participant's role, fixed once negotiated.
    pub my_role: Option<Role>,
    /// Role whose turn it is; set at the start of each match.
    pub active_role: Option<Role>,
    /// Restart barrier for the current match end.
    pub barrier: RestartBarrier,
}

impl Session {
    /// A session that has not started.
    pub fn new() -> Self {
        Self {
            state: State::Init,
            my_role: None,
            active_role: None,
            barrier: RestartBarrier::default(),
        }
    }

    /// True when the active role is this participant's role.
    pub fn is_my_turn(&self) -> bool {
        self.my_role.is_some() && self.my_role == self.active_role
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_negotiated_states() {
        let negotiated: Vec<State> = State::iter().filter(|s| s.is_negotiated()).collect();
        assert_eq!(negotiated.first(), Some(&State::NewMatch));
        assert_eq!(negotiated.len(), 6);
    }

    #[test]
    fn test_request_local_only_once() {
        let mut barrier = RestartBarrier::default();
        assert!(barrier.request_local());
        assert!(!barrier.request_local());
        assert!(!barrier.is_crossed());
        barrier.note_peer();
        assert!(barrier.is_crossed());
        barrier.reset();
        assert!(barrier.is_idle());
    }

    #[test]
    fn test_is_my_turn_requires_role() {
        let mut session = Session::new();
        assert!(!session.is_my_turn());
        session.my_role = Some(Role::SecondMark);
        session.active_role = Some(Role::FirstMark);
        assert!(!session.is_my_turn());
        session.active_role = Some(Role::SecondMark);
        assert!(session.is_my_turn());
    }
}
