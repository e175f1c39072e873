use colored::Colorize;
use nashplay_game::{GameCatalog, GameKind, GameSession, NarrationEvent, Player};
use serde::Serialize;
use std::time::{Duration, Instant};

/// How a single playout ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Winner(Player),
    Tie,
    Unfinished,
}

/// Everything observed while solving and playing one seed.
#[derive(Debug, Clone, Serialize)]
pub struct RunRecord {
    pub game: GameKind,
    pub seed: u64,
    pub solve_rounds: Option<u32>,
    pub equilibrium: [&'static str; 2],
    pub turns: usize,
    pub outcome: Outcome,
    pub narration: Vec<String>,
    pub failures: Vec<String>,
    pub duration_us: u128,
}

impl RunRecord {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Aggregate over every run of one game.
#[derive(Debug, Clone, Serialize)]
pub struct GameResult {
    pub game: GameKind,
    pub passed: bool,
    pub runs: usize,
    pub successful_runs: usize,
    pub p1_wins: usize,
    pub p2_wins: usize,
    pub ties: usize,
    pub unfinished: usize,
    pub mean_turns: f64,
    pub failures: Vec<String>,
    pub average_duration_us: u128,
}

pub struct GameTester {
    catalog: GameCatalog,
    verbose: bool,
}

impl GameTester {
    pub const fn new(catalog: GameCatalog, verbose: bool) -> Self {
        Self { catalog, verbose }
    }

    /// Run `iterations` playouts per seed; iteration `i` uses `seed + i`.
    pub fn run_game(
        &self,
        game: GameKind,
        seeds: &[u64],
        iterations: usize,
    ) -> (GameResult, Vec<RunRecord>) {
        if self.verbose {
            println!(
                "🧪 Testing game: {} ({} seed(s) × {} iteration(s))",
                game.title().bright_white(),
                seeds.len(),
                iterations
            );
        }

        let mut records = Vec::with_capacity(record_capacity(seeds.len(), iterations));
        for &seed in seeds {
            for i in 0..iterations {
                let iteration_seed = seed.wrapping_add(u64::try_from(i).unwrap_or(u64::MAX));
                let record = self.run_once(game, iteration_seed);
                if self.verbose && !record.passed() {
                    println!(
                        "  ❌ Seed {} failed: {}",
                        record.seed,
                        record.failures.join("; ").red()
                    );
                }
                records.push(record);
            }
        }

        (summarize(game, &records), records)
    }

    /// Solve and play out a single seed, checking the expected equilibrium
    /// and verdict for the game.
    pub fn run_once(&self, game: GameKind, seed: u64) -> RunRecord {
        let start = Instant::now();
        let mut session = match GameSession::new(game, seed, &self.catalog) {
            Ok(session) => session,
            Err(err) => {
                return RunRecord {
                    game,
                    seed,
                    solve_rounds: None,
                    equilibrium: ["-", "-"],
                    turns: 0,
                    outcome: Outcome::Unfinished,
                    narration: Vec::new(),
                    failures: vec![format!("invalid catalog: {err}")],
                    duration_us: start.elapsed().as_micros(),
                };
            }
        };
        let mut failures = Vec::new();

        let solve_rounds = match session.solve() {
            Ok(rounds) => Some(rounds),
            Err(err) => {
                failures.push(format!("solve failed: {err}"));
                None
            }
        };
        let equilibrium = session.equilibrium();

        let mut events = Vec::new();
        let mut narration = Vec::new();
        if solve_rounds.is_some() {
            for item in session.playout() {
                match item {
                    Ok(event) => {
                        narration.push(event.to_string());
                        events.push(event);
                    }
                    Err(err) => failures.push(format!("playout failed: {err}")),
                }
            }
        }

        let turns = events
            .iter()
            .filter(|e| matches!(e, NarrationEvent::Turn(_)))
            .count();
        let outcome = match events.last() {
            Some(NarrationEvent::Wins(player)) => Outcome::Winner(*player),
            Some(NarrationEvent::Tie) => Outcome::Tie,
            _ => Outcome::Unfinished,
        };

        if solve_rounds.is_some() {
            failures.extend(check_expectations(game, equilibrium, &events, outcome));
        }
        log::debug!(
            "{game} seed {seed}: equilibrium {equilibrium:?}, {turns} turn(s), {outcome:?}"
        );

        RunRecord {
            game,
            seed,
            solve_rounds,
            equilibrium,
            turns,
            outcome,
            narration,
            failures,
            duration_us: start.elapsed().as_micros(),
        }
    }
}

/// Preallocation for a run; huge iteration counts grow the vector on demand.
fn record_capacity(seeds: usize, iterations: usize) -> usize {
    const MAX_PREALLOCATED_RUNS: usize = 4096;
    seeds.saturating_mul(iterations).min(MAX_PREALLOCATED_RUNS)
}

fn check_expectations(
    game: GameKind,
    equilibrium: [&'static str; 2],
    events: &[NarrationEvent],
    outcome: Outcome,
) -> Vec<String> {
    let mut failures = Vec::new();
    match game {
        GameKind::CoinToss => {
            if equilibrium != ["H", "H"] {
                failures.push(format!("expected equilibrium [H, H], got {equilibrium:?}"));
            }
            let last_turn = events.iter().rev().find_map(|e| match e {
                NarrationEvent::Turn(player) => Some(*player),
                _ => None,
            });
            match (outcome, last_turn) {
                (Outcome::Winner(winner), Some(on_turn)) if winner == on_turn => {}
                (Outcome::Winner(winner), _) => failures.push(format!(
                    "{winner} declared winner but {last_turn:?} held the last turn"
                )),
                (other, _) => failures.push(format!("expected a winner, got {other:?}")),
            }
            let heads = events
                .iter()
                .filter(|e| **e == NarrationEvent::CoinResult(nashplay_game::Coin::Heads))
                .count();
            if heads != 1 {
                failures.push(format!("expected exactly one heads result, saw {heads}"));
            }
        }
        GameKind::Rps => {
            if equilibrium != ["rock", "rock"] {
                failures.push(format!(
                    "expected equilibrium [rock, rock], got {equilibrium:?}"
                ));
            }
            if outcome != Outcome::Tie {
                failures.push(format!("expected a tie, got {outcome:?}"));
            }
        }
    }
    failures
}

fn summarize(game: GameKind, records: &[RunRecord]) -> GameResult {
    let runs = records.len();
    let successful_runs = records.iter().filter(|r| r.passed()).count();
    let count = |wanted: Outcome| records.iter().filter(|r| r.outcome == wanted).count();

    #[allow(clippy::cast_precision_loss)]
    let mean_turns = if runs == 0 {
        0.0
    } else {
        records.iter().map(|r| r.turns).sum::<usize>() as f64 / runs as f64
    };
    let average_duration_us = if runs == 0 {
        0
    } else {
        records.iter().map(|r| r.duration_us).sum::<u128>() / runs as u128
    };

    let failures = records
        .iter()
        .filter(|r| !r.passed())
        .map(|r| format!("seed {}: {}", r.seed, r.failures.join("; ")))
        .collect::<Vec<_>>();

    GameResult {
        game,
        passed: failures.is_empty(),
        runs,
        successful_runs,
        p1_wins: count(Outcome::Winner(Player::P1)),
        p2_wins: count(Outcome::Winner(Player::P2)),
        ties: count(Outcome::Tie),
        unfinished: count(Outcome::Unfinished),
        mean_turns,
        failures,
        average_duration_us,
    }
}

impl GameResult {
    #[must_use]
    pub fn average_duration(&self) -> Duration {
        Duration::from_micros(u64::try_from(self.average_duration_us).unwrap_or(u64::MAX))
    }
}
