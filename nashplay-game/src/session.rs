//! Entry point used by front ends: pick a game, solve, play out
use crate::config::{ConfigError, GameCatalog, SolverLimits};
use crate::games::{CoinToss, GameKind, RockPaperScissors};
use crate::narration::{NarrationEvent, PlayoutError};
use crate::player::Player;
use crate::rng::RngBundle;
use crate::solver::{EquilibriumSolver, SolveError};

/// Boxed playout handed to callers that do not care which game runs.
pub type Narration<'a> = Box<dyn Iterator<Item = Result<NarrationEvent, PlayoutError>> + 'a>;

/// A solver for one of the built-in games.
#[derive(Debug, Clone)]
pub enum GameSession {
    CoinToss(EquilibriumSolver<CoinToss>),
    Rps(EquilibriumSolver<RockPaperScissors>),
}

/// Build the fixed configuration for `kind`, seeded from `seed`.
#[must_use]
pub fn create_solver(kind: GameKind, seed: u64) -> GameSession {
    GameSession::from_validated(kind, seed, GameCatalog::default_catalog())
}

impl GameSession {
    /// Build a session from a caller-supplied catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog has a zero limit or a malformed payoff table.
    pub fn new(kind: GameKind, seed: u64, catalog: &GameCatalog) -> Result<Self, ConfigError> {
        catalog.validate()?;
        Ok(Self::from_validated(kind, seed, catalog))
    }

    fn from_validated(kind: GameKind, seed: u64, catalog: &GameCatalog) -> Self {
        let rng = RngBundle::from_user_seed(seed);
        let limits: SolverLimits = catalog.limits;
        match kind {
            GameKind::CoinToss => Self::CoinToss(EquilibriumSolver::new(
                CoinToss::new(catalog.coin_toss.clone()),
                limits,
                rng,
            )),
            GameKind::Rps => Self::Rps(EquilibriumSolver::new(
                RockPaperScissors::new(catalog.rps.clone()),
                limits,
                rng,
            )),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> GameKind {
        match self {
            Self::CoinToss(_) => GameKind::CoinToss,
            Self::Rps(_) => GameKind::Rps,
        }
    }

    /// Run the best-response iteration.
    ///
    /// # Errors
    ///
    /// Returns an error if the iteration does not reach a fixed point.
    pub fn solve(&mut self) -> Result<u32, SolveError> {
        match self {
            Self::CoinToss(solver) => solver.solve(),
            Self::Rps(solver) => solver.solve(),
        }
    }

    #[must_use]
    pub const fn is_solved(&self) -> bool {
        match self {
            Self::CoinToss(solver) => solver.is_solved(),
            Self::Rps(solver) => solver.is_solved(),
        }
    }

    /// Strategy label currently assigned to `player`.
    #[must_use]
    pub fn strategy_label(&self, player: Player) -> &'static str {
        self.equilibrium()[player.index()]
    }

    /// Strategy labels of both players, P1 first.
    #[must_use]
    pub fn equilibrium(&self) -> [&'static str; 2] {
        match self {
            Self::CoinToss(solver) => solver.assignment().labels(),
            Self::Rps(solver) => solver.assignment().labels(),
        }
    }

    /// Narrate one playout, solving first if needed.
    pub fn playout(&mut self) -> Narration<'_> {
        match self {
            Self::CoinToss(solver) => Box::new(solver.playout()),
            Self::Rps(solver) => Box::new(solver.playout()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_solver_matches_kind() {
        for kind in GameKind::ALL {
            let session = create_solver(kind, 1);
            assert_eq!(session.kind(), kind);
            assert!(!session.is_solved());
        }
    }

    #[test]
    fn solved_sessions_report_textbook_equilibria() {
        let mut coin = create_solver(GameKind::CoinToss, 99);
        coin.solve().unwrap();
        assert_eq!(coin.equilibrium(), ["H", "H"]);

        let mut rps = create_solver(GameKind::Rps, 99);
        rps.solve().unwrap();
        assert_eq!(rps.equilibrium(), ["rock", "rock"]);
        assert_eq!(rps.strategy_label(Player::P2), "rock");
    }

    #[test]
    fn playout_solves_implicitly() {
        let mut session = create_solver(GameKind::Rps, 4);
        let events = session
            .playout()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(events.last(), Some(&NarrationEvent::Tie));
        assert!(session.is_solved());
    }

    #[test]
    fn new_rejects_zero_limits() {
        let mut catalog = GameCatalog::builtin();
        catalog.limits.max_rounds = 0;
        assert_eq!(
            GameSession::new(GameKind::CoinToss, 1, &catalog).err(),
            Some(ConfigError::ZeroLimit {
                field: "max_rounds"
            })
        );

        let mut catalog = GameCatalog::builtin();
        catalog.limits.max_turns = 0;
        assert_eq!(
            GameSession::new(GameKind::Rps, 1, &catalog).err(),
            Some(ConfigError::ZeroLimit { field: "max_turns" })
        );
    }

    #[test]
    fn new_accepts_builtin_catalog() {
        let mut session = GameSession::new(GameKind::CoinToss, 2, &GameCatalog::builtin()).unwrap();
        session.solve().unwrap();
        assert_eq!(session.equilibrium(), ["H", "H"]);
    }
}
