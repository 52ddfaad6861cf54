//! Shared fakes and drivers for coordinator integration tests.

#![allow(dead_code)]

use ratatui::style::Color;
use turnlink::{
    Board, Buttons, ChannelTransport, Coordinator, Navigator, Packet, Palette, Peripherals,
    Renderer, State, Tick, Transport, TransportError, GroupId,
};
use turnlink_board::{BoardDims, Grid, Role};

pub const GROUP: GroupId = 1234;

/// One recorded render call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderCall {
    Clear(Color),
    Grid(Color),
    Mark { role: Role, row: u8, col: u8 },
    Message(String),
}

/// Renderer that remembers every call.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub calls: Vec<RenderCall>,
}

impl RecordingRenderer {
    pub fn last_message(&self) -> Option<&str> {
        self.calls.iter().rev().find_map(|c| match c {
            RenderCall::Message(text) => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn marks(&self) -> Vec<(Role, u8, u8)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                RenderCall::Mark { role, row, col } => Some((*role, *row, *col)),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    fn clear_screen(&mut self, background: Color) {
        self.calls.push(RenderCall::Clear(background));
    }

    fn draw_grid(&mut self, color: Color) {
        self.calls.push(RenderCall::Grid(color));
    }

    fn draw_mark(&mut self, role: Role, row: u8, col: u8, _color: Color) {
        self.calls.push(RenderCall::Mark { role, row, col });
    }

    fn draw_message(&mut self, text: &str, _foreground: Color, _background: Color) {
        self.calls.push(RenderCall::Message(text.to_string()));
    }
}

/// A real grid whose win query can be forced.
#[derive(Debug, Default)]
pub struct ScriptedBoard {
    pub grid: Grid,
    pub forced_winner: Option<Role>,
}

impl Board for ScriptedBoard {
    fn clear(&mut self) {
        self.grid.clear();
        self.forced_winner = None;
    }

    fn set(&mut self, row: u8, col: u8, role: Role) -> bool {
        Board::set(&mut self.grid, row, col, role)
    }

    fn winner(&self, role: Role) -> bool {
        self.forced_winner == Some(role) || Board::winner(&self.grid, role)
    }

    fn mark_count(&self) -> usize {
        self.grid.mark_count()
    }

    fn dims(&self) -> BoardDims {
        self.grid.dims()
    }
}

/// Transport whose open always fails.
#[derive(Debug, Default)]
pub struct FailingTransport;

impl Transport for FailingTransport {
    fn open(&mut self, _group: GroupId) -> Result<(), TransportError> {
        Err(TransportError::Io(std::io::Error::new(
            std::io::ErrorKind::AddrInUse,
            "address in use",
        )))
    }

    fn close(&mut self) {}

    fn send(&mut self, _bytes: &[u8]) -> Result<(), TransportError> {
        Err(TransportError::NotOpen)
    }

    fn try_receive(&mut self, _buf: &mut [u8]) -> Result<usize, TransportError> {
        Ok(0)
    }
}

pub type TestCoordinator = Coordinator<ChannelTransport, ScriptedBoard, Navigator, RecordingRenderer>;

/// Builds a coordinator on a 3x3 board over `transport`.
pub fn coordinator_on(transport: ChannelTransport) -> TestCoordinator {
    let board = ScriptedBoard::default();
    let dims = board.dims();
    let peripherals = Peripherals::new(
        transport,
        board,
        Navigator::new(dims),
        RecordingRenderer::default(),
    );
    Coordinator::new(peripherals, GROUP, Palette::default())
}

/// Builds a coordinator wired to the returned channel end.
pub fn coordinator_pair() -> (TestCoordinator, ChannelTransport) {
    let (local, peer) = ChannelTransport::pair();
    (coordinator_on(local), peer)
}

/// One coordinator driven against a hand-operated peer end.
pub struct Harness {
    pub coordinator: TestCoordinator,
    pub peer: ChannelTransport,
}

impl Harness {
    /// Coordinator after its Init tick, in AwaitRole.
    pub fn in_await_role() -> Self {
        let (coordinator, mut peer) = coordinator_pair();
        peer.open(GROUP).expect("open peer end");
        let mut harness = Self { coordinator, peer };
        harness.tick(Buttons::NONE);
        assert_eq!(harness.state(), State::AwaitRole);
        harness
    }

    /// Local side holds X and it is its turn.
    pub fn first_in_my_turn() -> Self {
        let mut harness = Self::in_await_role();
        harness.tick(Buttons::claim());
        harness.peer_send(Packet::AcknowledgeSecond);
        harness.tick(Buttons::NONE);
        harness.tick(Buttons::NONE);
        harness.tick(Buttons::NONE);
        assert_eq!(harness.state(), State::MyTurn);
        harness.peer_drain();
        harness
    }

    /// Local side holds O and waits for X's move.
    pub fn second_in_their_turn() -> Self {
        let mut harness = Self::in_await_role();
        harness.peer_send(Packet::ClaimFirst);
        harness.tick(Buttons::NONE);
        harness.tick(Buttons::NONE);
        harness.tick(Buttons::NONE);
        assert_eq!(harness.state(), State::TheirTurn);
        harness.peer_drain();
        harness
    }

    /// Local side won as X and sits in AwaitRestart.
    pub fn first_after_win() -> Self {
        let mut harness = Self::first_in_my_turn();
        harness.board_mut_force_win(Role::FirstMark);
        harness.tick(Buttons::confirm());
        harness.tick(Buttons::NONE);
        assert_eq!(harness.state(), State::AwaitRestart);
        harness.peer_drain();
        harness
    }

    pub fn tick(&mut self, buttons: Buttons) -> Tick {
        let mut input = buttons;
        self.coordinator.tick(&mut input).expect("tick")
    }

    pub fn state(&self) -> State {
        self.coordinator.state()
    }

    pub fn peer_send(&mut self, packet: Packet) {
        self.peer.send(&packet.encode()).expect("peer send");
    }

    pub fn peer_send_raw(&mut self, bytes: &[u8]) {
        self.peer.send(bytes).expect("peer send");
    }

    /// Every packet the coordinator has sent since the last drain.
    pub fn peer_drain(&mut self) -> Vec<Packet> {
        let mut packets = Vec::new();
        let mut buf = [0u8; 8];
        loop {
            let n = self.peer.try_receive(&mut buf).expect("peer receive");
            if n == 0 {
                return packets;
            }
            packets.push(Packet::decode(&buf[..n]).expect("coordinator sent a valid packet"));
        }
    }

    pub fn board_mut_force_win(&mut self, role: Role) {
        self.coordinator.board_mut().forced_winner = Some(role);
    }
}
