//! First-class invariants over coordinator sessions.
//!
//! Invariants are logical properties that must hold after every tick.
//! State invariants look at one snapshot; transition invariants compare
//! the snapshot before a tick with the one after it.

use super::state::{Session, State};

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// A property relating the state before a step to the state after it.
pub trait TransitionInvariant<S> {
    /// Checks if the invariant holds across the step.
    fn holds(before: &S, after: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of state invariants checked together.
pub trait InvariantSet<S> {
    /// Returns every violated invariant, or `Ok(())`.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

/// A set of transition invariants checked together.
pub trait TransitionInvariantSet<S> {
    /// Returns every violated invariant, or `Ok(())`.
    fn check_all(before: &S, after: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn collect(violations: Vec<InvariantViolation>) -> Result<(), Vec<InvariantViolation>> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }
        collect(violations)
    }
}

impl<S, I1, I2, I3> TransitionInvariantSet<S> for (I1, I2, I3)
where
    I1: TransitionInvariant<S>,
    I2: TransitionInvariant<S>,
    I3: TransitionInvariant<S>,
{
    fn check_all(before: &S, after: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        if !I1::holds(before, after) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(before, after) {
            violations.push(InvariantViolation::new(I2::description()));
        }
        if !I3::holds(before, after) {
            violations.push(InvariantViolation::new(I3::description()));
        }
        collect(violations)
    }
}

// ─────────────────────────────────────────────────────────────
//  State invariants
// ─────────────────────────────────────────────────────────────

/// Roles exist exactly where the state machine says they should.
///
/// - From NewMatch on, `my_role` is assigned.
/// - `active_role` is never set before negotiation, and always set in play.
pub struct RoleAssignedInvariant;

impl Invariant<Session> for RoleAssignedInvariant {
    fn holds(session: &Session) -> bool {
        let negotiated = session.state.is_negotiated();
        if negotiated && session.my_role.is_none() {
            return false;
        }
        if !negotiated && session.active_role.is_some() {
            return false;
        }
        !(session.state.is_in_play() || session.state == State::AwaitRestart)
            || session.active_role.is_some()
    }

    fn description() -> &'static str {
        "Roles are assigned once negotiated and active role is set during play"
    }
}

/// The restart barrier is idle during play and never left crossed in
/// AwaitRestart.
pub struct BarrierIdleInvariant;

impl Invariant<Session> for BarrierIdleInvariant {
    fn holds(session: &Session) -> bool {
        match session.state {
            s if s.is_in_play() => session.barrier.is_idle(),
            State::AwaitRestart => !session.barrier.is_crossed(),
            _ => true,
        }
    }

    fn description() -> &'static str {
        "Restart barrier is idle during play and crossed only on leaving AwaitRestart"
    }
}

// ─────────────────────────────────────────────────────────────
//  Transition invariants
// ─────────────────────────────────────────────────────────────

/// Once assigned, `my_role` never changes.
pub struct RoleStableInvariant;

impl TransitionInvariant<Session> for RoleStableInvariant {
    fn holds(before: &Session, after: &Session) -> bool {
        before.my_role.is_none() || before.my_role == after.my_role
    }

    fn description() -> &'static str {
        "Negotiated role never changes"
    }
}

/// `active_role` changes only when Mark hands the turn over, or when a
/// new match resets it to the first mark.
pub struct TurnAlternationInvariant;

impl TransitionInvariant<Session> for TurnAlternationInvariant {
    fn holds(before: &Session, after: &Session) -> bool {
        if before.active_role == after.active_role {
            return true;
        }
        let handover = before.state == State::Mark
            && after.state == State::CheckTurn
            && after.active_role == before.active_role.map(|r| r.opponent());
        let reset = before.state == State::NewMatch
            && after.active_role == Some(turnlink_board::Role::FirstMark);
        handover || reset
    }

    fn description() -> &'static str {
        "Active role toggles only on Mark -> CheckTurn"
    }
}

/// Restart flags only go false→true, except when NewMatch resets them.
pub struct BarrierMonotonicInvariant;

impl TransitionInvariant<Session> for BarrierMonotonicInvariant {
    fn holds(before: &Session, after: &Session) -> bool {
        if before.state == State::NewMatch {
            return true;
        }
        let local_kept = !before.barrier.local_requested() || after.barrier.local_requested();
        let peer_kept = !before.barrier.peer_requested() || after.barrier.peer_requested();
        local_kept && peer_kept
    }

    fn description() -> &'static str {
        "Restart flags are monotonic until the barrier is crossed"
    }
}

/// All single-snapshot invariants.
pub type SessionInvariants = (RoleAssignedInvariant, BarrierIdleInvariant);

/// All before/after invariants.
pub type TickInvariants = (
    RoleStableInvariant,
    TurnAlternationInvariant,
    BarrierMonotonicInvariant,
);
