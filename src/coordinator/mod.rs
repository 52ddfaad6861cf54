//! Peer-synchronized turn coordinator.
//!
//! A finite-state machine advanced once per tick. Role negotiation, turn
//! alternation, move exchange and the restart barrier all live here; the
//! transport, board, cursor, input and renderer are collaborators.

mod contracts;
mod invariants;
mod machine;
mod messages;
mod state;

pub use contracts::{Contract, TickContract};
pub use invariants::{
    BarrierIdleInvariant, BarrierMonotonicInvariant, Invariant, InvariantSet, InvariantViolation,
    RoleAssignedInvariant, RoleStableInvariant, SessionInvariants, TickInvariants,
    TransitionInvariant, TransitionInvariantSet, TurnAlternationInvariant,
};
pub use machine::{Coordinator, CoordinatorError, Inbound, Peripherals, Tick};
pub use messages::StatusMessage;
pub use state::{RestartBarrier, Session, State};
