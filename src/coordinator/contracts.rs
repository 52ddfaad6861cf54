//! Contract checked around every coordinator tick.
//!
//! Contracts formalize Hoare-style reasoning: `{P} tick {Q}`. A tick has
//! no precondition beyond a well-formed session, so the contract is the
//! postcondition relating the session before the tick to the one after.

use super::invariants::{InvariantSet, InvariantViolation, SessionInvariants, TickInvariants, TransitionInvariantSet};
use super::state::Session;
use tracing::{instrument, warn};

/// Postcondition for a state transition.
pub trait Contract<S> {
    /// Checks that the step from `before` to `after` kept every invariant.
    fn post(before: &S, after: &S) -> Result<(), Vec<InvariantViolation>>;
}

/// Contract for one coordinator tick.
pub struct TickContract;

impl Contract<Session> for TickContract {
    #[instrument(level = "trace")]
    fn post(before: &Session, after: &Session) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        if let Err(v) = SessionInvariants::check_all(after) {
            violations.extend(v);
        }
        if let Err(v) = TickInvariants::check_all(before, after) {
            violations.extend(v);
        }
        if violations.is_empty() {
            Ok(())
        } else {
            warn!(?before, ?after, count = violations.len(), "Tick contract violated");
            Err(violations)
        }
    }
}
