//! # ludo-engine
//!
//! The turn engine for a four-player Ludo-style race game.
//!
//! ## Design Principles
//!
//! 1. **Single writer**: one `Session` owns one `GameState`. Every rule
//!    transition is a single atomic update; invalid requests change nothing.
//!
//! 2. **Private tracks**: each color advances along its own linear track
//!    `-1..=57`. Colors never interact on the board.
//!
//! 3. **Explicit time**: pacing delays are tasks on a virtual clock, each
//!    tied to the state token that scheduled it and dropped if stale.
//!
//! ## Modules
//!
//! - `core`: colors, pieces, players, dice, configuration, state
//! - `rules`: movability, move resolution, the turn state machine
//! - `agent`: policies and the driver for automated seats
//! - `schedule`: the virtual-clock timer queue
//! - `session`: the public surface (`request_roll`, `request_move`,
//!   `snapshot`)

pub mod core;
pub mod rules;
pub mod agent;
pub mod schedule;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Color, ColorMap, Controller, Player, Piece, PieceId, Position,
    Dice, DieValue, GameRng, ScriptedDice,
    GameConfig, Timings,
    LogFeed, ActionRecord, TurnEvent,
    GameState, Phase, StateToken,
};

pub use crate::rules::{MoveOutcome, RollOutcome, TurnError};

pub use crate::agent::{AgentPolicy, FirstEligible, RandomEligible};

pub use crate::session::{Session, Snapshot};
