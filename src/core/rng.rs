//! Deterministic dice.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical roll sequence
//! - **Serializable**: O(1) state capture and restore
//! - **Scriptable**: `ScriptedDice` replays fixed values for tests and demos
//!
//! ```
//! use ludo_engine::core::{Dice, GameRng};
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//! for _ in 0..20 {
//!     assert_eq!(a.roll(), b.roll());
//! }
//! ```

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// A single die face, always in `1..=6`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DieValue(u8);

impl DieValue {
    /// The face that releases pieces and grants an extra turn.
    pub const SIX: DieValue = DieValue(6);

    /// Create a die value, rejecting anything outside `1..=6`.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= 1 && value <= 6 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Get the raw face value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn is_six(self) -> bool {
        self.0 == 6
    }

    /// Every face in ascending order.
    pub fn all() -> impl Iterator<Item = DieValue> {
        (1..=6).map(DieValue)
    }
}

impl TryFrom<u8> for DieValue {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("die value {value} outside 1..=6"))
    }
}

impl From<DieValue> for u8 {
    fn from(value: DieValue) -> Self {
        value.0
    }
}

impl std::fmt::Display for DieValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Source of die rolls.
pub trait Dice: Send {
    /// Roll one die.
    fn roll(&mut self) -> DieValue;
}

/// Deterministic seeded RNG.
///
/// Uses ChaCha8 for speed while maintaining good statistical quality.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl Dice for GameRng {
    fn roll(&mut self) -> DieValue {
        DieValue(self.inner.gen_range(1..=6))
    }
}

/// Serializable RNG state.
///
/// Uses ChaCha8 word position for O(1) serialization regardless of
/// how many rolls have been made.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

/// Dice that replay a fixed script, then fall back to a seeded RNG.
///
/// ```
/// use ludo_engine::core::{Dice, ScriptedDice};
///
/// let mut dice = ScriptedDice::new([6, 3]);
/// assert_eq!(dice.roll().value(), 6);
/// assert_eq!(dice.roll().value(), 3);
/// assert_eq!(dice.remaining(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct ScriptedDice {
    script: VecDeque<DieValue>,
    fallback: GameRng,
}

impl ScriptedDice {
    /// Create scripted dice. Panics on a face outside `1..=6`.
    pub fn new(values: impl IntoIterator<Item = u8>) -> Self {
        let script = values
            .into_iter()
            .map(|v| {
                assert!((1..=6).contains(&v), "Scripted die value must be 1-6");
                DieValue(v)
            })
            .collect();
        Self {
            script,
            fallback: GameRng::new(0),
        }
    }

    /// Append more faces to the script.
    pub fn push(&mut self, value: DieValue) {
        self.script.push_back(value);
    }

    /// Scripted faces not yet rolled.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Dice for ScriptedDice {
    fn roll(&mut self) -> DieValue {
        self.script.pop_front().unwrap_or_else(|| self.fallback.roll())
    }
}
