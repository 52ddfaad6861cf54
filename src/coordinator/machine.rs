//! The turn coordinator: one state machine step per tick.

use super::messages::StatusMessage;
use super::state::{RestartBarrier, Session, State};
use crate::packet::{PACKET_LEN, Packet, PacketError};
use crate::peripherals::{Board, Buttons, Cursor, InputSource, Palette, Renderer};
use crate::transport::{GroupId, Transport, TransportError};
use derive_new::new;
use tracing::{debug, info, instrument, warn};
use turnlink_board::Role;

#[cfg(debug_assertions)]
use super::contracts::{Contract, TickContract};

/// The collaborators a coordinator drives.
#[derive(Debug, new)]
pub struct Peripherals<T, B, C, R> {
    /// Packet channel to the peer.
    pub transport: T,
    /// Cell storage and rules.
    pub board: B,
    /// Local placement cursor.
    pub cursor: C,
    /// Screen output.
    pub renderer: R,
}

/// Errors that stop the coordinator.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum CoordinatorError {
    /// The transport could not be opened during Init.
    #[display("Transport failed to open: {}", _0)]
    #[from]
    Transport(TransportError),

    /// A tick broke a session invariant (debug builds only).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(#[error(not(source))] String),
}

/// What happened to the packet received during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inbound {
    /// No datagram was waiting.
    Nothing,
    /// The current state acted on the packet.
    Consumed(Packet),
    /// Well-formed, but not something the current state acts on.
    Ignored(Packet),
    /// Structurally invalid; discarded.
    Malformed(PacketError),
}

/// Summary of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// State the tick started in.
    pub from: State,
    /// State the tick ended in.
    pub to: State,
    /// Fate of the received packet.
    pub inbound: Inbound,
    /// Packet handed to the transport, if any.
    pub outbound: Option<Packet>,
}

impl Tick {
    /// True if the state changed.
    pub fn transitioned(&self) -> bool {
        self.from != self.to
    }
}

/// Result of evaluating one state.
struct Step {
    next: State,
    send: Option<Packet>,
    consumed: bool,
}

impl Step {
    fn to(next: State) -> Self {
        Self {
            next,
            send: None,
            consumed: false,
        }
    }

    fn sending(mut self, packet: Packet) -> Self {
        self.send = Some(packet);
        self
    }

    fn consuming(mut self) -> Self {
        self.consumed = true;
        self
    }
}

/// Peer-synchronized turn coordinator.
///
/// Owns the session state and drives its collaborators. Call
/// [`Coordinator::tick`] periodically; each call receives at most one
/// packet, samples input once, fires at most one transition and sends at
/// most one packet. It never blocks.
#[derive(Debug)]
pub struct Coordinator<T, B, C, R> {
    session: Session,
    group: GroupId,
    palette: Palette,
    transport: T,
    board: B,
    cursor: C,
    renderer: R,
}

impl<T, B, C, R> Coordinator<T, B, C, R>
where
    T: Transport,
    B: Board,
    C: Cursor,
    R: Renderer,
{
    /// Creates a coordinator in [`State::Init`]. Nothing happens until the
    /// first tick.
    pub fn new(peripherals: Peripherals<T, B, C, R>, group: GroupId, palette: Palette) -> Self {
        let Peripherals {
            transport,
            board,
            cursor,
            renderer,
        } = peripherals;
        Self {
            session: Session::new(),
            group,
            palette,
            transport,
            board,
            cursor,
            renderer,
        }
    }

    /// Advances the state machine by one step.
    ///
    /// Only the transport open in [`State::Init`] can fail; everything the
    /// peer sends is either acted on or discarded.
    #[instrument(skip_all, fields(state = %self.session.state))]
    pub fn tick<I: InputSource>(&mut self, input: &mut I) -> Result<Tick, CoordinatorError> {
        let before = self.session;
        let received = self.receive();
        let buttons = input.sample();
        let packet = match received {
            Ok(packet) => packet,
            Err(e) => {
                debug!(error = %e, "Discarding malformed packet");
                None
            }
        };

        let step = match self.session.state {
            State::Init => self.init()?,
            State::AwaitRole => self.await_role(packet, buttons),
            State::AwaitAck => self.await_ack(packet),
            State::NewMatch => self.new_match(),
            State::CheckTurn => self.check_turn(),
            State::MyTurn => self.my_turn(buttons),
            State::TheirTurn => self.their_turn(packet),
            State::Mark => self.mark(),
            State::AwaitRestart => self.await_restart(packet, buttons),
        };

        let inbound = match (received, packet) {
            (Err(e), _) => Inbound::Malformed(e),
            (Ok(_), None) => Inbound::Nothing,
            (Ok(_), Some(p)) if step.consumed => Inbound::Consumed(p),
            (Ok(_), Some(p)) => {
                debug!(packet = %p, "Ignoring packet not expected in this state");
                Inbound::Ignored(p)
            }
        };

        if let Some(packet) = step.send {
            self.send(packet);
        }

        let from = self.session.state;
        self.session.state = step.next;
        if from != step.next {
            info!(%from, to = %step.next, "State transition");
        }

        #[cfg(debug_assertions)]
        TickContract::post(&before, &self.session).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            CoordinatorError::InvariantViolation(descriptions)
        })?;
        #[cfg(not(debug_assertions))]
        let _ = before;

        Ok(Tick {
            from,
            to: step.next,
            inbound,
            outbound: step.send,
        })
    }

    /// Closes the transport. The coordinator should not be ticked again.
    #[instrument(skip(self))]
    pub fn shutdown(&mut self) {
        info!(state = %self.session.state, "Coordinator shutting down");
        self.transport.close();
    }

    // ─────────────────────────────────────────────────────────────
    //  Per-state evaluation
    // ─────────────────────────────────────────────────────────────

    fn init(&mut self) -> Result<Step, CoordinatorError> {
        self.transport.open(self.group)?;
        self.board.clear();
        self.redraw_grid();
        self.show(StatusMessage::ClaimPrompt);
        Ok(Step::to(State::AwaitRole))
    }

    fn await_role(&mut self, packet: Option<Packet>, buttons: Buttons) -> Step {
        // Local claim is checked first; a same-tick peer claim loses locally.
        if buttons.claim {
            if packet == Some(Packet::ClaimFirst) {
                warn!("Peer claimed X in the same tick as the local claim; keeping local claim");
            }
            self.session.my_role = Some(Role::FirstMark);
            info!(role = %Role::FirstMark, "Claimed role");
            self.show(StatusMessage::ClaimedFirst);
            return Step::to(State::AwaitAck).sending(Packet::ClaimFirst);
        }

        if packet == Some(Packet::ClaimFirst) {
            self.session.my_role = Some(Role::SecondMark);
            info!(role = %Role::SecondMark, "Peer claimed first; taking second role");
            self.show(StatusMessage::AssignedSecond);
            return Step::to(State::NewMatch)
                .sending(Packet::AcknowledgeSecond)
                .consuming();
        }

        Step::to(State::AwaitRole)
    }

    fn await_ack(&mut self, packet: Option<Packet>) -> Step {
        if packet == Some(Packet::AcknowledgeSecond) {
            self.show(StatusMessage::OpponentJoined);
            return Step::to(State::NewMatch).consuming();
        }
        Step::to(State::AwaitAck)
    }

    fn new_match(&mut self) -> Step {
        self.session.barrier.reset();
        self.board.clear();
        self.session.active_role = Some(Role::FirstMark);
        let (row, col) = self.board.dims().center();
        self.cursor.set_location(row, col);
        info!(my_role = ?self.session.my_role, "New match");
        Step::to(State::CheckTurn)
    }

    fn check_turn(&mut self) -> Step {
        if self.session.is_my_turn() {
            self.show(StatusMessage::YourTurn);
            Step::to(State::MyTurn)
        } else {
            self.show(StatusMessage::OpponentsTurn);
            Step::to(State::TheirTurn)
        }
    }

    fn my_turn(&mut self, buttons: Buttons) -> Step {
        if !buttons.confirm {
            return Step::to(State::MyTurn);
        }
        let (row, col) = self.cursor.location();
        if !self.board.set(row, col, self.turn_role()) {
            debug!(row, col, "Cell unavailable; confirm ignored");
            return Step::to(State::MyTurn);
        }
        Step::to(State::Mark).sending(Packet::Move { row, col })
    }

    fn their_turn(&mut self, packet: Option<Packet>) -> Step {
        let Some(Packet::Move { row, col }) = packet else {
            return Step::to(State::TheirTurn);
        };
        if !self.board.set(row, col, self.turn_role()) {
            warn!(row, col, "Protocol fault: peer move targets an unavailable cell");
            return Step::to(State::TheirTurn);
        }
        self.cursor.set_location(row, col);
        Step::to(State::Mark).consuming()
    }

    fn mark(&mut self) -> Step {
        let active = self.turn_role();
        let (row, col) = self.cursor.location();
        self.renderer
            .draw_mark(active, row, col, *self.palette.mark());

        if self.board.winner(active) {
            info!(winner = %active, "Match won");
            self.show(StatusMessage::Winner(active));
            Step::to(State::AwaitRestart)
        } else if self.board.mark_count() >= self.board.dims().spaces() {
            info!("Match drawn");
            self.show(StatusMessage::Draw);
            Step::to(State::AwaitRestart)
        } else {
            self.session.active_role = Some(active.opponent());
            Step::to(State::CheckTurn)
        }
    }

    fn await_restart(&mut self, packet: Option<Packet>, buttons: Buttons) -> Step {
        let mut step = Step::to(State::AwaitRestart);

        if buttons.restart && self.session.barrier.request_local() {
            self.show(StatusMessage::RestartRequested);
            step = step.sending(Packet::RestartRequest);
        }

        if packet == Some(Packet::RestartRequest) {
            self.session.barrier.note_peer();
            step = step.consuming();
        }

        if self.session.barrier.is_crossed() {
            self.redraw_grid();
            step.next = State::NewMatch;
        }
        step
    }

    // ─────────────────────────────────────────────────────────────
    //  Collaborator helpers
    // ─────────────────────────────────────────────────────────────

    fn receive(&mut self) -> Result<Option<Packet>, PacketError> {
        let mut buf = [0u8; PACKET_LEN + 1];
        let len = match self.transport.try_receive(&mut buf) {
            Ok(0) => return Ok(None),
            Ok(len) => len,
            Err(e) => {
                warn!(error = %e, "Receive failed; treating as no packet");
                return Ok(None);
            }
        };
        Packet::decode(&buf[..len]).map(Some)
    }

    fn send(&mut self, packet: Packet) {
        match self.transport.send(&packet.encode()) {
            Ok(()) => debug!(%packet, "Sent packet"),
            Err(e) => warn!(%packet, error = %e, "Send failed; packet lost"),
        }
    }

    fn turn_role(&self) -> Role {
        self.session.active_role.unwrap_or(Role::FirstMark)
    }

    fn show(&mut self, message: StatusMessage) {
        debug!(%message, "Status");
        self.renderer.draw_message(
            &message.to_string(),
            *self.palette.message(),
            *self.palette.background(),
        );
    }

    fn redraw_grid(&mut self) {
        self.renderer.clear_screen(*self.palette.background());
        self.renderer.draw_grid(*self.palette.grid());
    }

    // ─────────────────────────────────────────────────────────────
    //  Accessors
    // ─────────────────────────────────────────────────────────────

    /// Current state.
    pub fn state(&self) -> State {
        self.session.state
    }

    /// Full session snapshot.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// This participant's role, once claimed or assigned.
    pub fn my_role(&self) -> Option<Role> {
        self.session.my_role
    }

    /// Whose turn it is, once a match has started.
    pub fn active_role(&self) -> Option<Role> {
        self.session.active_role
    }

    /// Restart barrier flags.
    pub fn barrier(&self) -> &RestartBarrier {
        &self.session.barrier
    }

    /// Group the transport joins.
    pub fn group(&self) -> GroupId {
        self.group
    }

    /// The transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Mutable access to the transport.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// The board.
    pub fn board(&self) -> &B {
        &self.board
    }

    /// Mutable access to the board.
    pub fn board_mut(&mut self) -> &mut B {
        &mut self.board
    }

    /// The cursor.
    pub fn cursor(&self) -> &C {
        &self.cursor
    }

    /// Mutable access to the cursor, for navigation between ticks.
    pub fn cursor_mut(&mut self) -> &mut C {
        &mut self.cursor
    }

    /// The renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}
