//! Static payoff tables
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;

use crate::player::Player;
use crate::strategy::Strategy;

/// Numeric reward for a single (player, strategy) cell.
pub type Payoff = f32;

/// Starting point of a best-response scan; below every valid payoff.
pub const NO_PAYOFF: Payoff = -1.0;

/// Mapping from (player, strategy) to a non-negative payoff.
///
/// Tables are fixed at construction; nothing hands out mutable access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
#[serde(bound(
    serialize = "S: Serialize + Eq + Hash",
    deserialize = "S: Deserialize<'de> + Eq + Hash"
))]
pub struct PayoffTable<S: Eq + Hash> {
    cells: HashMap<Player, HashMap<S, Payoff>>,
}

impl<S: Strategy> PayoffTable<S> {
    /// Build a table where both players share the same row.
    #[must_use]
    pub fn symmetric(row: &[(S, Payoff)]) -> Self {
        let row: HashMap<S, Payoff> = row.iter().copied().collect();
        let cells = Player::ALL
            .into_iter()
            .map(|player| (player, row.clone()))
            .collect();
        Self { cells }
    }

    /// Payoff of `strategy` for `player`; absent cells are worth nothing.
    #[must_use]
    pub fn value(&self, player: Player, strategy: S) -> Payoff {
        self.cells
            .get(&player)
            .and_then(|row| row.get(&strategy))
            .copied()
            .unwrap_or(0.0)
    }

    /// First structural problem in the table, if any.
    #[must_use]
    pub fn defect(&self) -> Option<PayoffDefect<S>> {
        for player in Player::ALL {
            let Some(row) = self.cells.get(&player) else {
                return Some(PayoffDefect::MissingPlayer(player));
            };
            for &strategy in S::ALL {
                match row.get(&strategy) {
                    None => return Some(PayoffDefect::MissingCell { player, strategy }),
                    Some(value) if !value.is_finite() || *value < 0.0 => {
                        return Some(PayoffDefect::InvalidCell {
                            player,
                            strategy,
                            value: *value,
                        });
                    }
                    Some(_) => {}
                }
            }
        }
        None
    }
}

/// Structural problems a payoff table can have.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PayoffDefect<S> {
    MissingPlayer(Player),
    MissingCell { player: Player, strategy: S },
    InvalidCell { player: Player, strategy: S, value: Payoff },
}

impl<S: Strategy> std::fmt::Display for PayoffDefect<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingPlayer(player) => write!(f, "no payoff row for {player}"),
            Self::MissingCell { player, strategy } => {
                write!(f, "no payoff for {player} playing {strategy}")
            }
            Self::InvalidCell {
                player,
                strategy,
                value,
            } => write!(
                f,
                "payoff for {player} playing {strategy} must be a non-negative number (got {value})"
            ),
        }
    }
}
