//! Built-in payoff tables and solver limits
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;

use crate::payoff::PayoffTable;
use crate::strategy::{Coin, Hand};

const DEFAULT_GAMES_DATA: &str = include_str!("../assets/data/games.json");

/// Iteration caps standing in for the unbounded loops of a naive solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverLimits {
    /// Best-response rounds allowed before `solve` gives up.
    #[serde(default = "SolverLimits::default_max_rounds")]
    pub max_rounds: u32,
    /// Turns a playout may take before it is cut off.
    #[serde(default = "SolverLimits::default_max_turns")]
    pub max_turns: u32,
}

impl SolverLimits {
    const fn default_max_rounds() -> u32 {
        32
    }

    const fn default_max_turns() -> u32 {
        64
    }
}

impl Default for SolverLimits {
    fn default() -> Self {
        Self {
            max_rounds: Self::default_max_rounds(),
            max_turns: Self::default_max_turns(),
        }
    }
}

/// Errors raised when catalog invariants are violated.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be at least 1")]
    ZeroLimit { field: &'static str },
    #[error("{game} payoff table invalid: {reason}")]
    InvalidPayoffs { game: &'static str, reason: String },
    #[error("failed to parse game catalog: {0}")]
    Parse(String),
}

/// Payoff tables for every built-in game plus shared limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameCatalog {
    #[serde(default)]
    pub limits: SolverLimits,
    pub coin_toss: PayoffTable<Coin>,
    pub rps: PayoffTable<Hand>,
}

impl GameCatalog {
    /// Tables as shipped: heads pays 1 and tails 0, every hand pays 0.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            limits: SolverLimits::default(),
            coin_toss: PayoffTable::symmetric(&[(Coin::Heads, 1.0), (Coin::Tails, 0.0)]),
            rps: PayoffTable::symmetric(&[
                (Hand::Rock, 0.0),
                (Hand::Paper, 0.0),
                (Hand::Scissors, 0.0),
            ]),
        }
    }

    /// Parse and validate a catalog from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the catalog is invalid.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let catalog: Self =
            serde_json::from_str(json).map_err(|err| ConfigError::Parse(err.to_string()))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load the catalog compiled into the crate.
    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json(DEFAULT_GAMES_DATA).unwrap_or_else(|err| {
            log::warn!("falling back to built-in game catalog: {err}");
            Self::builtin()
        })
    }

    /// Shared copy of the compiled-in catalog, parsed once per process.
    #[must_use]
    pub fn default_catalog() -> &'static Self {
        static CATALOG: OnceLock<GameCatalog> = OnceLock::new();
        CATALOG.get_or_init(Self::load_from_static)
    }

    /// Check limits and payoff tables.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.limits.max_rounds == 0 {
            return Err(ConfigError::ZeroLimit {
                field: "max_rounds",
            });
        }
        if self.limits.max_turns == 0 {
            return Err(ConfigError::ZeroLimit { field: "max_turns" });
        }
        if let Some(defect) = self.coin_toss.defect() {
            return Err(ConfigError::InvalidPayoffs {
                game: "coin_toss",
                reason: defect.to_string(),
            });
        }
        if let Some(defect) = self.rps.defect() {
            return Err(ConfigError::InvalidPayoffs {
                game: "rps",
                reason: defect.to_string(),
            });
        }
        Ok(())
    }
}

impl Default for GameCatalog {
    fn default() -> Self {
        Self::default_catalog().clone()
    }
}
