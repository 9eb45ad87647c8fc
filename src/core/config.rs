//! Game configuration.
//!
//! A session is configured at startup by providing:
//! - which seats are human and which are agents
//! - the dice seed
//! - `Timings`: the artificial delays between scheduled steps
//! - the narration feed capacity
//!
//! Defaults reproduce the standard table: RED is the single human seat,
//! the other three are agents.

use std::time::Duration;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use super::color::{Color, ColorMap};
use super::player::Controller;

/// Default number of narration lines kept.
pub const DEFAULT_LOG_CAPACITY: usize = 5;

/// Artificial pacing delays. None of these affect gameplay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timings {
    /// From "roll requested" to "roll resolved".
    pub roll: Duration,
    /// From "no legal move" to the automatic turn advance.
    pub no_move_advance: Duration,
    /// Before an agent seat rolls or picks a piece.
    pub agent_decision: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            roll: Duration::from_millis(800),
            no_move_advance: Duration::from_millis(1000),
            agent_decision: Duration::from_millis(1000),
        }
    }
}

impl Timings {
    /// All delays zero: every scheduled step fires on the next advance.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            roll: Duration::ZERO,
            no_move_advance: Duration::ZERO,
            agent_decision: Duration::ZERO,
        }
    }
}

/// Complete session configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Controller per seat.
    pub controllers: ColorMap<Controller>,

    /// Seed for the default dice.
    pub seed: u64,

    /// Scheduling delays.
    pub timings: Timings,

    /// Narration lines kept (most recent first). Never zero.
    #[serde(deserialize_with = "nonzero_capacity")]
    pub log_capacity: usize,
}

fn nonzero_capacity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    let capacity = usize::deserialize(deserializer)?;
    if capacity == 0 {
        return Err(D::Error::custom("log_capacity must be at least 1"));
    }
    Ok(capacity)
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            controllers: ColorMap::new(|c| {
                if c == Color::Red {
                    Controller::Human
                } else {
                    Controller::Agent
                }
            }),
            seed: 0,
            timings: Timings::default(),
            log_capacity: DEFAULT_LOG_CAPACITY,
        }
    }
}

impl GameConfig {
    /// Create the default configuration (RED human, others agents).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every seat driven by an agent.
    #[must_use]
    pub fn all_agents() -> Self {
        Self {
            controllers: ColorMap::with_value(Controller::Agent),
            ..Self::default()
        }
    }

    /// Set one seat's controller.
    #[must_use]
    pub fn with_controller(mut self, color: Color, controller: Controller) -> Self {
        self.controllers[color] = controller;
        self
    }

    /// Set the dice seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the scheduling delays.
    #[must_use]
    pub fn with_timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }

    /// Set the narration capacity.
    #[must_use]
    pub fn with_log_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Log capacity must be at least 1");
        self.log_capacity = capacity;
        self
    }

    /// Seats that are human-controlled, in turn order.
    pub fn human_seats(&self) -> impl Iterator<Item = Color> + '_ {
        self.controllers
            .iter()
            .filter(|(_, c)| **c == Controller::Human)
            .map(|(color, _)| color)
    }
}
