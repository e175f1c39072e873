//! Playout narration
//!
//! A playout is a lazy sequence of events; each renders to exactly one line
//! of display text. Turns are only played when the consumer asks for more.
use rand_chacha::ChaCha20Rng;
use serde::Serialize;
use std::collections::VecDeque;
use std::iter::FusedIterator;
use thiserror::Error;

use crate::games::{Playable, TurnOutcome};
use crate::player::Player;
use crate::rng::CountingRng;
use crate::solver::{Assignment, SolveError};
use crate::strategy::Coin;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum NarrationEvent {
    Welcome { title: &'static str },
    Players { players: [Player; 2] },
    Turn(Player),
    Chooses {
        player: Player,
        strategy: &'static str,
    },
    CoinResult(Coin),
    NextTurn(Player),
    Wins(Player),
    Tie,
}

impl NarrationEvent {
    /// Winner announced by this event, if any.
    #[must_use]
    pub const fn winner(&self) -> Option<Player> {
        match self {
            Self::Wins(player) => Some(*player),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_verdict(&self) -> bool {
        matches!(self, Self::Wins(_) | Self::Tie)
    }
}

impl std::fmt::Display for NarrationEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Welcome { title } => write!(f, "Welcome to the {title}!"),
            Self::Players { players: [a, b] } => write!(f, "Players: {a}, {b}"),
            Self::Turn(player) => write!(f, "{player}'s turn."),
            Self::Chooses { player, strategy } => write!(f, "{player} chooses: {strategy}"),
            Self::CoinResult(coin) => write!(f, "Coin Toss Result: {coin}"),
            Self::NextTurn(player) => write!(f, "{player}'s turn next."),
            Self::Wins(player) => write!(f, "{player} wins!"),
            Self::Tie => write!(f, "It's a tie!"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlayoutError {
    #[error("playout stopped after {turns} turns without a winner")]
    TurnLimit { turns: u32 },
    #[error(transparent)]
    Solve(#[from] SolveError),
}

/// Lazy narration of one playout.
///
/// Yields the introduction, then each turn's events as the turn is played.
/// A failure is always the last item.
pub struct Playout<'a, G: Playable> {
    game: &'a G,
    equilibrium: Assignment<G::Strategy>,
    rng: &'a mut CountingRng<ChaCha20Rng>,
    pending: VecDeque<Result<NarrationEvent, PlayoutError>>,
    turns: u32,
    max_turns: u32,
    finished: bool,
}

impl<'a, G: Playable> Playout<'a, G> {
    pub(crate) fn new(
        game: &'a G,
        equilibrium: Assignment<G::Strategy>,
        rng: &'a mut CountingRng<ChaCha20Rng>,
        max_turns: u32,
        solved: Result<(), SolveError>,
    ) -> Self {
        let mut pending = VecDeque::from([
            Ok(NarrationEvent::Welcome { title: G::TITLE }),
            Ok(NarrationEvent::Players {
                players: Player::ALL,
            }),
        ]);
        let finished = match solved {
            Ok(()) => false,
            Err(err) => {
                pending.push_back(Err(err.into()));
                true
            }
        };
        Self {
            game,
            equilibrium,
            rng,
            pending,
            turns: 0,
            max_turns,
            finished,
        }
    }

    /// Turns played so far.
    #[must_use]
    pub const fn turns(&self) -> u32 {
        self.turns
    }

    fn advance(&mut self) {
        if self.turns >= self.max_turns {
            log::warn!(
                "{} playout cut off after {} turns",
                G::TITLE,
                self.turns
            );
            self.pending.push_back(Err(PlayoutError::TurnLimit { turns: self.turns }));
            self.finished = true;
            return;
        }

        self.turns += 1;
        let mut narration = Vec::new();
        let outcome = self
            .game
            .play_turn(&self.equilibrium, &mut *self.rng, &mut narration);
        self.pending.extend(narration.into_iter().map(Ok));

        if outcome == TurnOutcome::Decided {
            self.finished = true;
            log::debug!("{} decided after {} turn(s)", G::TITLE, self.turns);
        }
    }
}

impl<G: Playable> Iterator for Playout<'_, G> {
    type Item = Result<NarrationEvent, PlayoutError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.pending.pop_front() {
                return Some(item);
            }
            if self.finished {
                return None;
            }
            self.advance();
        }
    }
}

impl<G: Playable> FusedIterator for Playout<'_, G> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_render_one_line_each() {
        let lines: Vec<String> = [
            NarrationEvent::Welcome {
                title: "Coin Toss Game",
            },
            NarrationEvent::Players {
                players: Player::ALL,
            },
            NarrationEvent::Turn(Player::P2),
            NarrationEvent::Chooses {
                player: Player::P2,
                strategy: "H",
            },
            NarrationEvent::CoinResult(Coin::Tails),
            NarrationEvent::NextTurn(Player::P1),
            NarrationEvent::Wins(Player::P1),
            NarrationEvent::Tie,
        ]
        .iter()
        .map(ToString::to_string)
        .collect();

        assert_eq!(
            lines,
            [
                "Welcome to the Coin Toss Game!",
                "Players: Player 1, Player 2",
                "Player 2's turn.",
                "Player 2 chooses: H",
                "Coin Toss Result: T",
                "Player 1's turn next.",
                "Player 1 wins!",
                "It's a tie!",
            ]
        );
        assert!(lines.iter().all(|line| !line.contains('\n')));
    }

    #[test]
    fn verdicts_are_recognised() {
        assert_eq!(NarrationEvent::Wins(Player::P2).winner(), Some(Player::P2));
        assert!(NarrationEvent::Tie.is_verdict());
        assert!(NarrationEvent::Tie.winner().is_none());
        assert!(!NarrationEvent::Turn(Player::P1).is_verdict());
    }

    #[test]
    fn events_serialize_with_tag() {
        let json = serde_json::to_value(NarrationEvent::Chooses {
            player: Player::P1,
            strategy: "rock",
        })
        .unwrap();
        assert_eq!(json["event"], "chooses");
        assert_eq!(json["data"]["player"], "P1");
        assert_eq!(json["data"]["strategy"], "rock");
    }
}
