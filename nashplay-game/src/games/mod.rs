//! Game definitions consumed by the solver
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::narration::NarrationEvent;
use crate::payoff::{Payoff, PayoffTable};
use crate::player::Player;
use crate::solver::Assignment;
use crate::strategy::Strategy;

pub mod coin_toss;
pub mod rps;

pub use coin_toss::CoinToss;
pub use rps::RockPaperScissors;

/// A fixed two-player game over one shared strategy set.
pub trait MatrixGame {
    type Strategy: Strategy;

    fn table(&self) -> &PayoffTable<Self::Strategy>;

    /// The strategy that earns the table payoff against `opponent_strategy`.
    fn response_target(&self, opponent_strategy: Self::Strategy) -> Self::Strategy;

    /// Reward for `player` choosing `strategy` while the opponent holds
    /// `opponent_strategy`: the table cell on a hit, nothing otherwise.
    fn payoff(
        &self,
        player: Player,
        strategy: Self::Strategy,
        opponent_strategy: Self::Strategy,
    ) -> Payoff {
        if strategy == self.response_target(opponent_strategy) {
            self.table().value(player, strategy)
        } else {
            0.0
        }
    }
}

/// Whether a playout continues after a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    Decided,
    Continue,
}

/// A game that can be played out from a solved assignment.
pub trait Playable: MatrixGame {
    /// Display name used in the welcome line.
    const TITLE: &'static str;

    /// Play one turn with both players holding `equilibrium`, appending one
    /// event per narration line.
    fn play_turn<R: Rng + ?Sized>(
        &self,
        equilibrium: &Assignment<Self::Strategy>,
        rng: &mut R,
        narration: &mut Vec<NarrationEvent>,
    ) -> TurnOutcome;
}

/// Built-in game selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameKind {
    CoinToss,
    Rps,
}

impl GameKind {
    pub const ALL: [Self; 2] = [Self::CoinToss, Self::Rps];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::CoinToss => "cointoss",
            Self::Rps => "rps",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::CoinToss => CoinToss::TITLE,
            Self::Rps => RockPaperScissors::TITLE,
        }
    }
}

impl std::fmt::Display for GameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown game '{0}' (expected cointoss or rps)")]
pub struct GameKindError(pub String);

impl FromStr for GameKind {
    type Err = GameKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cointoss" | "coin-toss" | "coin_toss" => Ok(Self::CoinToss),
            "rps" | "rock-paper-scissors" | "rock_paper_scissors" => Ok(Self::Rps),
            _ => Err(GameKindError(s.to_string())),
        }
    }
}
