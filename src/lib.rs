//! turnlink - peer-synchronized tic-tac-toe.
//!
//! Two participants, each running their own copy of this crate, play one
//! shared game over an unreliable datagram link. There is no server: the
//! peers negotiate who plays first, then each one keeps its own copy of the
//! board in lock-step by applying its own moves and the moves its peer
//! reports.
//!
//! # Architecture
//!
//! - **Coordinator**: the per-tick state machine (role negotiation, turns,
//!   restart barrier)
//! - **Packet**: fixed three-byte wire codec
//! - **Transport**: UDP and in-process channel links
//! - **Peripherals**: board, cursor, input and renderer seams
//! - **Liveness**: optional watchdog for an unresponsive peer
//! - **TUI**: ratatui front end
//!
//! # Example
//!
//! ```no_run
//! use turnlink::{
//!     Buttons, ChannelTransport, Coordinator, Navigator, Palette, Peripherals,
//!     TerminalRenderer,
//! };
//! use turnlink_board::Grid;
//!
//! # fn example() -> Result<(), turnlink::CoordinatorError> {
//! let (left, _right) = ChannelTransport::pair();
//! let grid = Grid::new();
//! let dims = grid.dims();
//! let peripherals = Peripherals::new(left, grid, Navigator::new(dims), TerminalRenderer::new(dims));
//! let mut coordinator = Coordinator::new(peripherals, 1234, Palette::default());
//!
//! coordinator.tick(&mut Buttons::default())?;
//! coordinator.tick(&mut Buttons::claim())?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod coordinator;
mod liveness;
mod packet;
mod peripherals;
mod transport;
mod tui;

// Crate-level exports - Configuration
pub use config::{BoardConfig, Config, ConfigError, NetworkConfig, TimingConfig};

// Crate-level exports - Turn coordinator
pub use coordinator::{
    BarrierIdleInvariant, BarrierMonotonicInvariant, Contract, Coordinator, CoordinatorError,
    Inbound, Invariant, InvariantSet, InvariantViolation, Peripherals, RestartBarrier,
    RoleAssignedInvariant, RoleStableInvariant, Session, SessionInvariants, State, StatusMessage,
    Tick, TickContract, TickInvariants, TransitionInvariant, TransitionInvariantSet,
    TurnAlternationInvariant,
};

// Crate-level exports - Liveness
pub use liveness::{Liveness, Watchdog};

// Crate-level exports - Wire codec
pub use packet::{PACKET_LEN, Packet, PacketError, PacketTag};

// Crate-level exports - Collaborator seams
pub use peripherals::{
    Board, Buttons, Cursor, Direction, InputSource, Navigator, Palette, Renderer,
};

// Crate-level exports - Transports
pub use transport::{ChannelTransport, GroupId, Transport, TransportError, UdpTransport};

// Crate-level exports - Terminal front end
pub use tui::{
    DrawnMark, KeyAction, KeyLatch, Screen, StatusLine, TerminalRenderer, action_for,
    run as run_tui,
};
