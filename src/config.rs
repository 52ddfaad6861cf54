//! Runtime configuration loaded from TOML.

use crate::peripherals::Palette;
use crate::transport::GroupId;
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};
use turnlink_board::Grid;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct Config {
    /// Peer link settings.
    #[serde(default)]
    network: NetworkConfig,

    /// Board settings.
    #[serde(default)]
    board: BoardConfig,

    /// Render colors.
    #[serde(default)]
    palette: Palette,

    /// Tick and watchdog timing.
    #[serde(default)]
    timing: TimingConfig,

    /// Where tracing output is written while the terminal UI runs.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,
}

/// Peer link settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct NetworkConfig {
    /// Group both peers join; datagrams for other groups are dropped.
    #[serde(default = "default_group_id")]
    group_id: GroupId,

    /// Local address to bind.
    #[serde(default = "default_bind")]
    bind: SocketAddr,

    /// Address of the other participant.
    #[serde(default = "default_peer")]
    peer: SocketAddr,
}

/// Board settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Side length of the square board.
    #[serde(default = "default_board_size")]
    size: u8,
}

/// Tick and watchdog timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Milliseconds between coordinator ticks.
    #[serde(default = "default_tick_ms")]
    tick_ms: u64,

    /// Give up after waiting this long on an unresponsive peer. Unset waits forever.
    #[serde(default)]
    stall_timeout_secs: Option<u64>,
}

fn default_group_id() -> GroupId {
    1234
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 4810))
}

fn default_peer() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 4811))
}

fn default_board_size() -> u8 {
    Grid::STANDARD_SIZE
}

fn default_tick_ms() -> u64 {
    50
}

fn default_log_file() -> PathBuf {
    PathBuf::from("turnlink.log")
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            group_id: default_group_id(),
            bind: default_bind(),
            peer: default_peer(),
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            size: default_board_size(),
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            stall_timeout_secs: None,
        }
    }
}

impl TimingConfig {
    /// Interval between ticks.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Watchdog bound, if enabled.
    pub fn stall_timeout(&self) -> Option<Duration> {
        self.stall_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: NetworkConfig::default(),
            board: BoardConfig::default(),
            palette: Palette::default(),
            timing: TimingConfig::default(),
            log_file: default_log_file(),
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(group = config.network.group_id, peer = %config.network.peer, "Config loaded");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise falls back to defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Parses and validates TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::new(format!("Failed to serialize config: {}", e)))
    }

    /// Rejects settings the game cannot run with.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        let size = self.board.size;
        if !(Grid::MIN_SIZE..=Grid::MAX_SIZE).contains(&size) {
            return Err(ConfigError::new(format!(
                "Board size {} outside {}..={}",
                size,
                Grid::MIN_SIZE,
                Grid::MAX_SIZE
            )));
        }
        if self.timing.tick_ms == 0 {
            return Err(ConfigError::new("tick_ms must be positive".to_string()));
        }
        if self.network.bind == self.network.peer {
            return Err(ConfigError::new(format!(
                "Peer address {} is the bind address",
                self.network.peer
            )));
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(*config.network().group_id(), 1234);
        assert_eq!(config.timing().tick_interval(), Duration::from_millis(50));
        assert_eq!(config.timing().stall_timeout(), None);
    }

    #[test]
    fn test_partial_sections() {
        let config = Config::from_toml(
            r#"
            [network]
            group_id = 77
            peer = "10.0.0.2:4810"

            [timing]
            stall_timeout_secs = 30
            "#,
        )
        .unwrap();
        assert_eq!(*config.network().group_id(), 77);
        assert_eq!(*config.network().bind(), default_bind());
        assert_eq!(config.timing().stall_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(*config.board().size(), 3);
    }

    #[test]
    fn test_rejects_bad_board_size() {
        let err = Config::from_toml("[board]\nsize = 12\n").unwrap_err();
        assert!(err.message.contains("Board size 12"));
    }

    #[test]
    fn test_rejects_zero_tick() {
        assert!(Config::from_toml("[timing]\ntick_ms = 0\n").is_err());
    }

    #[test]
    fn test_rejects_peer_equal_to_bind() {
        let toml = "[network]\nbind = \"127.0.0.1:5000\"\npeer = \"127.0.0.1:5000\"\n";
        assert!(Config::from_toml(toml).is_err());
    }

    #[test]
    fn test_setters_override_network() {
        let network = NetworkConfig::default()
            .with_group_id(9)
            .with_peer("192.168.1.5:4810".parse().unwrap());
        let config = Config::default().with_network(network);
        assert_eq!(*config.network().group_id(), 9);
        assert_eq!(config.network().peer().port(), 4810);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config::default();
        let text = config.to_toml().unwrap();
        assert_eq!(Config::from_toml(&text).unwrap(), config);
    }
}
