//! Iterated best-response solver
//!
//! Starting from a random pure-strategy assignment, every round lets each
//! player in seat order switch to its best response against the opponent's
//! current strategy. Solving stops at the first round that changes nothing.
//! There is no general convergence guarantee, so the number of rounds is
//! capped by [`SolverLimits::max_rounds`].
use std::ops::Index;
use thiserror::Error;

use crate::config::SolverLimits;
use crate::games::{MatrixGame, Playable};
use crate::narration::Playout;
use crate::payoff::NO_PAYOFF;
use crate::player::Player;
use crate::rng::RngBundle;
use crate::strategy::Strategy;

/// One pure strategy per player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Assignment<S> {
    strategies: [S; 2],
}

impl<S: Strategy> Assignment<S> {
    #[must_use]
    pub const fn new(p1: S, p2: S) -> Self {
        Self {
            strategies: [p1, p2],
        }
    }

    /// Uniform independent draw per player, P1 first.
    pub fn random<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let p1 = S::random(rng);
        let p2 = S::random(rng);
        Self::new(p1, p2)
    }

    #[must_use]
    pub const fn get(&self, player: Player) -> S {
        self.strategies[player.index()]
    }

    fn set(&mut self, player: Player, strategy: S) {
        self.strategies[player.index()] = strategy;
    }

    #[must_use]
    pub fn labels(&self) -> [&'static str; 2] {
        self.strategies.map(Strategy::label)
    }
}

impl<S: Strategy> Index<Player> for Assignment<S> {
    type Output = S;

    fn index(&self, player: Player) -> &S {
        &self.strategies[player.index()]
    }
}

impl<S: Strategy> std::fmt::Display for Assignment<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{{}: {}, {}: {}}}",
            Player::P1,
            self.get(Player::P1),
            Player::P2,
            self.get(Player::P2)
        )
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SolveError {
    #[error("best-response iteration did not converge within {rounds} rounds")]
    NotConverged { rounds: u32 },
}

/// Pure-strategy equilibrium search over a fixed two-player game.
#[derive(Debug, Clone)]
pub struct EquilibriumSolver<G: MatrixGame> {
    game: G,
    assignment: Assignment<G::Strategy>,
    limits: SolverLimits,
    rng: RngBundle,
    solved: bool,
}

impl<G: MatrixGame> EquilibriumSolver<G> {
    /// Create a solver whose initial assignment is drawn from `rng`.
    #[must_use]
    pub fn new(game: G, limits: SolverLimits, mut rng: RngBundle) -> Self {
        let assignment = Assignment::random(rng.assignment());
        Self {
            game,
            assignment,
            limits,
            rng,
            solved: false,
        }
    }

    /// Run best-response rounds until a fixed point, returning the number of
    /// rounds taken including the one that confirmed it.
    ///
    /// Calling this again once solved runs a single confirming round.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::NotConverged`] when the assignment still changes
    /// after `max_rounds` rounds; the solver then stays unsolved.
    pub fn solve(&mut self) -> Result<u32, SolveError> {
        for round in 1..=self.limits.max_rounds {
            let previous = self.assignment;
            for player in Player::ALL {
                let best = self.best_response(player);
                self.assignment.set(player, best);
            }
            if self.assignment == previous {
                self.solved = true;
                log::debug!(
                    "best response converged to {} after {round} round(s)",
                    self.assignment
                );
                return Ok(round);
            }
        }
        log::warn!(
            "best response still moving after {} rounds (at {})",
            self.limits.max_rounds,
            self.assignment
        );
        Err(SolveError::NotConverged {
            rounds: self.limits.max_rounds,
        })
    }

    /// Best response of `player` to the opponent's current strategy; the
    /// first strategy with a strictly greater payoff wins.
    fn best_response(&self, player: Player) -> G::Strategy {
        let opponent_strategy = self.assignment[player.opponent()];
        let mut best = self.assignment[player];
        let mut best_payoff = NO_PAYOFF;
        for &strategy in G::Strategy::ALL {
            let payoff = self.game.payoff(player, strategy, opponent_strategy);
            if payoff > best_payoff {
                best = strategy;
                best_payoff = payoff;
            }
        }
        best
    }

    /// Current strategy of `player`; the initial draw until solved.
    #[must_use]
    pub fn strategy(&self, player: Player) -> G::Strategy {
        self.assignment[player]
    }

    #[must_use]
    pub const fn assignment(&self) -> &Assignment<G::Strategy> {
        &self.assignment
    }

    #[must_use]
    pub const fn is_solved(&self) -> bool {
        self.solved
    }

    #[must_use]
    pub const fn game(&self) -> &G {
        &self.game
    }

    #[must_use]
    pub const fn limits(&self) -> SolverLimits {
        self.limits
    }
}

impl<G: Playable> EquilibriumSolver<G> {
    /// Narrate one playout with both players holding their solved strategy.
    ///
    /// Solves first when needed; a failed solve is reported as the first
    /// item after the introduction.
    pub fn playout(&mut self) -> Playout<'_, G> {
        let solved = if self.solved {
            Ok(())
        } else {
            self.solve().map(|_| ())
        };
        let Self {
            game,
            assignment,
            limits,
            rng,
            ..
        } = self;
        Playout::new(&*game, *assignment, rng.playout(), limits.max_turns, solved)
    }
}
