//! Configuration loading and typed config structures for a colony game.
//!
//! The canonical configuration lives in `colony-config.yaml` at the project
//! root. Every section and every field has a default matching the standard
//! game rules, so an empty file is a valid configuration.

use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use colony_market::MarketConfig;
use colony_world::MAX_DIMENSION;

/// Environment variable that overrides `game.seed`.
pub const SEED_ENV_VAR: &str = "COLONY_SEED";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The configuration parsed but describes an unplayable game.
    #[error("invalid config: {reason}")]
    Invalid {
        /// What is wrong.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level game configuration.
///
/// Mirrors the structure of `colony-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GameConfig {
    /// Seed and round limit.
    #[serde(default)]
    pub game: SessionConfig,

    /// Map size and layout.
    #[serde(default)]
    pub grid: GridConfig,

    /// Prices, fees and the ore-to-roboticon rate.
    #[serde(default)]
    pub market: MarketConfig,

    /// The market's stock at game start.
    #[serde(default)]
    pub market_stock: MarketStockConfig,

    /// Seats and starting ledgers.
    #[serde(default)]
    pub players: PlayersConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GameConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `COLONY_SEED` overrides `game.seed` when set to a valid integer.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        let seed = std::env::var(SEED_ENV_VAR).ok();
        self.game.apply_seed_override(seed.as_deref());
    }

    /// Reject configurations that cannot produce a playable game.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: &str| {
            Err(ConfigError::Invalid {
                reason: reason.to_owned(),
            })
        };
        if self.grid.rows == 0 || self.grid.cols == 0 {
            return invalid("grid dimensions must be positive");
        }
        if self.grid.rows > MAX_DIMENSION || self.grid.cols > MAX_DIMENSION {
            return invalid("grid dimensions exceed the supported maximum");
        }
        if self.market.validate().is_err() {
            return invalid("market.ore_to_roboticon_rate must be positive");
        }
        if self.game.max_rounds == 0 {
            return invalid("game.max_rounds must be positive");
        }
        if self.players.ai_players == 0 && self.players.human_players == 0 {
            return invalid("at least one player seat is required");
        }
        Ok(())
    }
}

/// Session-level settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SessionConfig {
    /// Random seed for the map layout.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Rounds played before the game ends regardless of land left.
    #[serde(default = "default_max_rounds")]
    pub max_rounds: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            max_rounds: default_max_rounds(),
        }
    }
}

impl SessionConfig {
    /// Replace the seed with `value` when it parses as an integer.
    pub fn apply_seed_override(&mut self, value: Option<&str>) {
        let Some(raw) = value else {
            return;
        };
        match raw.trim().parse::<u64>() {
            Ok(seed) => self.seed = seed,
            Err(_) => warn!(value = raw, "Ignoring non-numeric COLONY_SEED"),
        }
    }
}

/// How plot specialisms are laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridLayout {
    /// Alternating ore and energy plots.
    Checkerboard,
    /// Specialisms drawn from the game seed.
    #[default]
    Seeded,
}

/// Map configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GridConfig {
    /// Number of rows.
    #[serde(default = "default_grid_side")]
    pub rows: usize,

    /// Number of columns.
    #[serde(default = "default_grid_side")]
    pub cols: usize,

    /// Specialism layout.
    #[serde(default)]
    pub layout: GridLayout,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: default_grid_side(),
            cols: default_grid_side(),
            layout: GridLayout::default(),
        }
    }
}

/// Market stock at the start of a game.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MarketStockConfig {
    /// Ore in stock.
    #[serde(default = "default_market_resource")]
    pub ore: u32,

    /// Energy in stock.
    #[serde(default = "default_market_resource")]
    pub energy: u32,

    /// Uncustomised roboticons in stock.
    #[serde(default = "default_market_roboticons")]
    pub roboticons: u32,
}

impl Default for MarketStockConfig {
    fn default() -> Self {
        Self {
            ore: default_market_resource(),
            energy: default_market_resource(),
            roboticons: default_market_roboticons(),
        }
    }
}

/// Seats and starting ledgers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlayersConfig {
    /// Computer-controlled seats. They take their turns first.
    #[serde(default = "default_ai_players")]
    pub ai_players: u32,

    /// Human seats.
    #[serde(default = "default_human_players")]
    pub human_players: u32,

    /// Money each player starts with.
    #[serde(default = "default_starting_money")]
    pub starting_money: u32,

    /// Ore each player starts with.
    #[serde(default)]
    pub starting_ore: u32,

    /// Energy each player starts with.
    #[serde(default)]
    pub starting_energy: u32,
}

impl Default for PlayersConfig {
    fn default() -> Self {
        Self {
            ai_players: default_ai_players(),
            human_players: default_human_players(),
            starting_money: default_starting_money(),
            starting_ore: 0,
            starting_energy: 0,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

const fn default_seed() -> u64 {
    42
}

const fn default_max_rounds() -> u32 {
    30
}

const fn default_grid_side() -> usize {
    5
}

const fn default_market_resource() -> u32 {
    16
}

const fn default_market_roboticons() -> u32 {
    12
}

const fn default_ai_players() -> u32 {
    1
}

const fn default_human_players() -> u32 {
    1
}

const fn default_starting_money() -> u32 {
    100
}

fn default_log_level() -> String {
    "info".to_owned()
}
