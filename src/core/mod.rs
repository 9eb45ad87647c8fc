//! Core data model: colors, pieces, players, dice, configuration, state.
//!
//! Everything the turn engine reads and writes lives here. The rules in
//! `rules` operate on these types but never reach around them.

pub mod color;
pub mod piece;
pub mod track;
pub mod player;
pub mod rng;
pub mod config;
pub mod feed;
pub mod action;
pub mod state;

pub use color::{Color, ColorMap, SEAT_COUNT};
pub use piece::{Piece, PieceId, Position, PIECES_PER_PLAYER};
pub use track::{global_square, is_safe_square, TrackConfig, HOME_STRETCH_LEN, MAIN_TRACK_LEN, SAFE_SQUARES};
pub use player::{Controller, Player};
pub use rng::{Dice, DieValue, GameRng, GameRngState, ScriptedDice};
pub use config::{GameConfig, Timings, DEFAULT_LOG_CAPACITY};
pub use feed::LogFeed;
pub use action::{ActionRecord, TurnEvent};
pub use state::{GameState, Phase, StateToken};
