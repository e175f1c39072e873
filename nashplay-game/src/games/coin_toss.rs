//! Coin Toss: both players call a face, heads pays
use rand::Rng;

use super::{MatrixGame, Playable, TurnOutcome};
use crate::config::GameCatalog;
use crate::narration::NarrationEvent;
use crate::payoff::PayoffTable;
use crate::player::Player;
use crate::solver::Assignment;
use crate::strategy::{Coin, Strategy};

/// A call only pays when it matches the opponent's face.
#[derive(Debug, Clone, PartialEq)]
pub struct CoinToss {
    table: PayoffTable<Coin>,
}

impl CoinToss {
    #[must_use]
    pub const fn new(table: PayoffTable<Coin>) -> Self {
        Self { table }
    }
}

impl Default for CoinToss {
    fn default() -> Self {
        Self::new(GameCatalog::default_catalog().coin_toss.clone())
    }
}

impl MatrixGame for CoinToss {
    type Strategy = Coin;

    fn table(&self) -> &PayoffTable<Coin> {
        &self.table
    }

    fn response_target(&self, opponent_strategy: Coin) -> Coin {
        opponent_strategy
    }
}

impl Playable for CoinToss {
    const TITLE: &'static str = "Coin Toss Game";

    /// A random player takes the turn and tosses; heads wins it for them,
    /// tails hands play back to a fresh draw.
    fn play_turn<R: Rng + ?Sized>(
        &self,
        equilibrium: &Assignment<Coin>,
        rng: &mut R,
        narration: &mut Vec<NarrationEvent>,
    ) -> TurnOutcome {
        let current = Player::random(rng);
        narration.push(NarrationEvent::Turn(current));
        narration.push(NarrationEvent::Chooses {
            player: current,
            strategy: equilibrium[current].label(),
        });

        let result = Coin::random(rng);
        narration.push(NarrationEvent::CoinResult(result));

        if result == Coin::Heads {
            narration.push(NarrationEvent::Wins(current));
            TurnOutcome::Decided
        } else {
            narration.push(NarrationEvent::NextTurn(current.opponent()));
            TurnOutcome::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn only_matching_calls_pay() {
        let game = CoinToss::default();
        assert!((game.payoff(Player::P1, Coin::Heads, Coin::Heads) - 1.0).abs() < f32::EPSILON);
        assert!(game.payoff(Player::P1, Coin::Heads, Coin::Tails).abs() < f32::EPSILON);
        assert!(game.payoff(Player::P2, Coin::Tails, Coin::Tails).abs() < f32::EPSILON);
        assert!(game.payoff(Player::P2, Coin::Tails, Coin::Heads).abs() < f32::EPSILON);
    }

    #[test]
    fn turn_narration_follows_toss_result() {
        let game = CoinToss::default();
        let equilibrium = Assignment::new(Coin::Heads, Coin::Heads);
        let mut rng = ChaCha20Rng::seed_from_u64(11);

        for _ in 0..32 {
            let mut narration = Vec::new();
            let outcome = game.play_turn(&equilibrium, &mut rng, &mut narration);
            assert_eq!(narration.len(), 4);
            let NarrationEvent::Turn(current) = narration[0] else {
                panic!("turn must open with the acting player: {narration:?}");
            };
            assert_eq!(
                narration[1],
                NarrationEvent::Chooses {
                    player: current,
                    strategy: "H"
                }
            );
            match (narration[2].clone(), outcome) {
                (NarrationEvent::CoinResult(Coin::Heads), TurnOutcome::Decided) => {
                    assert_eq!(narration[3], NarrationEvent::Wins(current));
                }
                (NarrationEvent::CoinResult(Coin::Tails), TurnOutcome::Continue) => {
                    assert_eq!(narration[3], NarrationEvent::NextTurn(current.opponent()));
                }
                other => panic!("unexpected toss outcome: {other:?}"),
            }
        }
    }
}
