//! Terminal front end: keyboard in, ratatui out, UDP to the peer.

mod keys;
mod screen;
mod ui;

pub use keys::{KeyAction, KeyLatch, action_for};
pub use screen::{DrawnMark, Screen, StatusLine, TerminalRenderer};

use crate::config::Config;
use crate::coordinator::{Coordinator, Peripherals, State};
use crate::liveness::{Liveness, Watchdog};
use crate::peripherals::{Cursor, Navigator};
use crate::transport::UdpTransport;
use anyhow::{Result, anyhow};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, instrument};
use turnlink_board::Grid;

type TerminalCoordinator = Coordinator<UdpTransport, Grid, Navigator, TerminalRenderer>;

/// Runs the game in the terminal until the user quits.
pub async fn run(config: Config) -> Result<()> {
    // Log to a file so output does not tear the UI.
    let log_file = std::fs::File::create(config.log_file())?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(
        bind = %config.network().bind(),
        peer = %config.network().peer(),
        group = config.network().group_id(),
        "Starting turnlink"
    );

    let grid = Grid::with_size(*config.board().size())?;
    let dims = grid.dims();
    let transport = UdpTransport::new(*config.network().bind(), *config.network().peer());
    let peripherals = Peripherals::new(
        transport,
        grid,
        Navigator::new(dims),
        TerminalRenderer::new(dims),
    );
    let mut coordinator =
        Coordinator::new(peripherals, *config.network().group_id(), *config.palette());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_loop(&mut terminal, &mut coordinator, &config).await;

    coordinator.shutdown();
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}

/// Ticks the coordinator on a fixed interval, feeding it keyboard input.
#[instrument(skip_all, fields(group = coordinator.group()))]
async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    coordinator: &mut TerminalCoordinator,
    config: &Config,
) -> Result<()> {
    let mut interval = tokio::time::interval(config.timing().tick_interval());
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut latch = KeyLatch::new();
    let mut watchdog = Watchdog::new(config.timing().stall_timeout());

    loop {
        interval.tick().await;

        while event::poll(Duration::ZERO)? {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            match action_for(key) {
                Some(KeyAction::Quit) => {
                    info!("User quit");
                    return Ok(());
                }
                // The cursor marks the peer's move outside of MyTurn.
                Some(KeyAction::Move(direction)) if coordinator.state() == State::MyTurn => {
                    coordinator.cursor_mut().step(direction);
                }
                Some(KeyAction::Press(buttons)) => latch.press(buttons),
                Some(KeyAction::Move(_)) | None => {}
            }
        }

        let tick = coordinator.tick(&mut latch)?;
        if tick.transitioned() {
            debug!(from = %tick.from, to = %tick.to, "Tick transitioned");
        }

        if let Liveness::Stalled { waited } = watchdog.observe(coordinator.session(), Instant::now())
        {
            return Err(anyhow!(
                "Peer unresponsive for {}s in {}",
                waited.as_secs(),
                coordinator.state()
            ));
        }

        let role = coordinator
            .my_role()
            .map(|r| r.to_string())
            .unwrap_or_else(|| "?".to_string());
        let state = coordinator.state().to_string();
        let header = ui::Header {
            role: &role,
            state: &state,
            group: coordinator.group(),
        };
        terminal.draw(|f| {
            ui::draw(
                f,
                coordinator.renderer().screen(),
                coordinator.cursor().location(),
                header,
            )
        })?;
    }
}
