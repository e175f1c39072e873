//! Nashplay Game Engine
//!
//! Platform-agnostic core for two textbook two-player games, Coin Toss and
//! Rock-Paper-Scissors. A pure-strategy equilibrium candidate is found by
//! iterated best response and then narrated through a seeded random playout.
//! This crate has no UI or platform-specific dependencies; front ends call
//! [`create_solver`], [`GameSession::solve`] and [`GameSession::playout`].

pub mod config;
pub mod games;
pub mod narration;
pub mod payoff;
pub mod player;
pub mod rng;
pub mod session;
pub mod solver;
pub mod strategy;

// Re-export commonly used types
pub use config::{ConfigError, GameCatalog, SolverLimits};
pub use games::{
    CoinToss, GameKind, GameKindError, MatrixGame, Playable, RockPaperScissors, TurnOutcome,
};
pub use narration::{NarrationEvent, Playout, PlayoutError};
pub use payoff::{NO_PAYOFF, Payoff, PayoffDefect, PayoffTable};
pub use player::Player;
pub use rng::{CountingRng, RngBundle};
pub use session::{GameSession, Narration, create_solver};
pub use solver::{Assignment, EquilibriumSolver, SolveError};
pub use strategy::{Coin, Hand, Strategy};
