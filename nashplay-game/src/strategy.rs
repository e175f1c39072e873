//! Pure strategies for the built-in games
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// A closed, ordered set of pure strategies.
///
/// The order of [`Strategy::ALL`] is significant: best-response selection
/// scans it front to back and keeps the first strictly better payoff, so the
/// earliest strategy wins every tie.
pub trait Strategy: Copy + Eq + Hash + Debug + Display + 'static {
    const ALL: &'static [Self];

    /// Short label used in narration and reports.
    fn label(self) -> &'static str;

    /// Uniform draw over [`Strategy::ALL`].
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// Coin faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Coin {
    #[serde(rename = "H")]
    Heads,
    #[serde(rename = "T")]
    Tails,
}

impl Strategy for Coin {
    const ALL: &'static [Self] = &[Self::Heads, Self::Tails];

    fn label(self) -> &'static str {
        match self {
            Self::Heads => "H",
            Self::Tails => "T",
        }
    }
}

impl Display for Coin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Rock-Paper-Scissors hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hand {
    Rock,
    Paper,
    Scissors,
}

impl Hand {
    /// The hand that beats `self`: rock < paper < scissors < rock.
    #[must_use]
    pub const fn beat_strategy(self) -> Self {
        match self {
            Self::Rock => Self::Paper,
            Self::Paper => Self::Scissors,
            Self::Scissors => Self::Rock,
        }
    }

    /// Round verdict rule: `self` beats `other` when `other` is the hand
    /// that `beat_strategy` names for `self`.
    #[must_use]
    pub fn beats(self, other: Self) -> bool {
        self.beat_strategy() == other
    }
}

impl Strategy for Hand {
    const ALL: &'static [Self] = &[Self::Rock, Self::Paper, Self::Scissors];

    fn label(self) -> &'static str {
        match self {
            Self::Rock => "rock",
            Self::Paper => "paper",
            Self::Scissors => "scissors",
        }
    }
}

impl Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
