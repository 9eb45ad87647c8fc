//! Game rules: movability, move resolution and the turn state machine.
//!
//! - `movement`: pure per-piece predicates and resolution
//! - `engine`: atomic transitions over `GameState`
//!
//! Nothing here knows about time. Pacing and agent seats are layered on
//! top by `session`.

pub mod engine;
pub mod movement;

pub use engine::{
    advance_turn, apply_move, begin_roll, check_move, check_roll, current_movable, resolve_roll,
    roll, MoveOutcome, RollOutcome, TurnError,
};
pub use movement::{has_move, is_movable, movable_pieces, resolve_move, MovableSet, MoveResult};
