//! Rock-Paper-Scissors
use rand::Rng;

use super::{MatrixGame, Playable, TurnOutcome};
use crate::config::GameCatalog;
use crate::narration::NarrationEvent;
use crate::payoff::PayoffTable;
use crate::player::Player;
use crate::solver::Assignment;
use crate::strategy::{Hand, Strategy};

/// A hand only pays when it is the beat strategy of the opponent's hand.
#[derive(Debug, Clone, PartialEq)]
pub struct RockPaperScissors {
    table: PayoffTable<Hand>,
}

impl RockPaperScissors {
    #[must_use]
    pub const fn new(table: PayoffTable<Hand>) -> Self {
        Self { table }
    }
}

impl Default for RockPaperScissors {
    fn default() -> Self {
        Self::new(GameCatalog::default_catalog().rps.clone())
    }
}

impl MatrixGame for RockPaperScissors {
    type Strategy = Hand;

    fn table(&self) -> &PayoffTable<Hand> {
        &self.table
    }

    fn response_target(&self, opponent_strategy: Hand) -> Hand {
        opponent_strategy.beat_strategy()
    }
}

impl Playable for RockPaperScissors {
    const TITLE: &'static str = "Rock-Paper-Scissors Game";

    fn play_turn<R: Rng + ?Sized>(
        &self,
        equilibrium: &Assignment<Hand>,
        rng: &mut R,
        narration: &mut Vec<NarrationEvent>,
    ) -> TurnOutcome {
        let current = Player::random(rng);
        let opponent = current.opponent();
        let (hand, opponent_hand) = (equilibrium[current], equilibrium[opponent]);

        narration.push(NarrationEvent::Turn(current));
        narration.push(NarrationEvent::Chooses {
            player: current,
            strategy: hand.label(),
        });
        narration.push(NarrationEvent::Chooses {
            player: opponent,
            strategy: opponent_hand.label(),
        });

        let verdict = if hand == opponent_hand {
            NarrationEvent::Tie
        } else if hand.beats(opponent_hand) {
            NarrationEvent::Wins(current)
        } else {
            NarrationEvent::Wins(opponent)
        };
        narration.push(verdict);
        TurnOutcome::Decided
    }
}
