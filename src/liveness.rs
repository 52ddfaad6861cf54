//! Optional stall detection that sits outside the state machine.
//!
//! The coordinator waits on its peer forever. A host that wants a bound
//! feeds each post-tick state into a [`Watchdog`] and decides what to do
//! when it reports [`Liveness::Stalled`].

use crate::coordinator::{Session, State};
use std::time::{Duration, Instant};
use tracing::{instrument, warn};

/// Watchdog verdict for the latest observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liveness {
    /// Not waiting on the peer, or waiting within the bound.
    Alive,
    /// Waited on the peer longer than the bound.
    Stalled {
        /// Time spent waiting so far.
        waited: Duration,
    },
}

/// Tracks how long the coordinator has been waiting on its peer.
#[derive(Debug, Clone)]
pub struct Watchdog {
    limit: Option<Duration>,
    waiting_since: Option<(State, Instant)>,
}

impl Watchdog {
    /// Creates a watchdog; `None` disables it.
    pub fn new(limit: Option<Duration>) -> Self {
        Self {
            limit,
            waiting_since: None,
        }
    }

    /// Returns true if only the peer can move this session forward.
    pub fn awaits_peer(session: &Session) -> bool {
        match session.state {
            State::AwaitAck | State::TheirTurn => true,
            State::AwaitRestart => session.barrier.local_requested(),
            _ => false,
        }
    }

    /// Records the session after a tick taken at `now`.
    #[instrument(skip(self, session), fields(state = %session.state))]
    pub fn observe(&mut self, session: &Session, now: Instant) -> Liveness {
        let Some(limit) = self.limit else {
            return Liveness::Alive;
        };

        if !Self::awaits_peer(session) {
            self.waiting_since = None;
            return Liveness::Alive;
        }

        let since = match self.waiting_since {
            Some((state, since)) if state == session.state => since,
            _ => {
                self.waiting_since = Some((session.state, now));
                now
            }
        };

        let waited = now.saturating_duration_since(since);
        if waited > limit {
            warn!(?waited, ?limit, "Peer unresponsive");
            Liveness::Stalled { waited }
        } else {
            Liveness::Alive
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use turnlink_board::Role;

    fn session(state: State) -> Session {
        Session {
            state,
            my_role: Some(Role::FirstMark),
            active_role: Some(Role::SecondMark),
            ..Session::new()
        }
    }

    #[test]
    fn test_disabled_never_stalls() {
        let mut dog = Watchdog::new(None);
        let start = Instant::now();
        dog.observe(&session(State::TheirTurn), start);
        let later = start + Duration::from_secs(3600);
        assert_eq!(dog.observe(&session(State::TheirTurn), later), Liveness::Alive);
    }

    #[test]
    fn test_stalls_after_limit() {
        let mut dog = Watchdog::new(Some(Duration::from_secs(5)));
        let start = Instant::now();
        assert_eq!(dog.observe(&session(State::TheirTurn), start), Liveness::Alive);
        let later = start + Duration::from_secs(6);
        assert_eq!(
            dog.observe(&session(State::TheirTurn), later),
            Liveness::Stalled {
                waited: Duration::from_secs(6)
            }
        );
    }

    #[test]
    fn test_leaving_wait_state_resets() {
        let mut dog = Watchdog::new(Some(Duration::from_secs(5)));
        let start = Instant::now();
        dog.observe(&session(State::TheirTurn), start);
        dog.observe(&session(State::MyTurn), start + Duration::from_secs(4));
        let later = start + Duration::from_secs(8);
        assert_eq!(dog.observe(&session(State::TheirTurn), later), Liveness::Alive);
    }

    #[test]
    fn test_local_turn_is_not_a_peer_wait() {
        assert!(!Watchdog::awaits_peer(&session(State::MyTurn)));
        assert!(!Watchdog::awaits_peer(&session(State::AwaitRestart)));

        let mut waiting = session(State::AwaitRestart);
        waiting.barrier.request_local();
        assert!(Watchdog::awaits_peer(&waiting));
    }
}
