//! Movability and move resolution.
//!
//! Both functions are pure. Each color moves along its own linear track,
//! so neither consults other colors' pieces.

use smallvec::SmallVec;

use crate::core::{DieValue, Piece, PieceId, Player, Position, PIECES_PER_PLAYER};

/// Movable piece IDs for one roll. Never more than a player's pieces.
pub type MovableSet = SmallVec<[PieceId; PIECES_PER_PLAYER]>;

/// Result of resolving a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveResult {
    /// Where the piece ends up.
    pub new_position: Position,
    /// True when the piece reached home.
    pub completed: bool,
}

/// Whether `piece` may be moved with `roll`.
///
/// - Home pieces never move.
/// - Yard pieces need a six.
/// - Track pieces need `position + roll <= 57`.
#[must_use]
pub fn is_movable(piece: &Piece, roll: DieValue) -> bool {
    if piece.is_home() {
        return false;
    }
    if piece.position().is_in_yard() {
        return roll.is_six();
    }
    piece.position().advanced_by(roll.value()).is_some()
}

/// Where `piece` lands after moving with `roll`.
///
/// Yard pieces enter at `0` whatever the roll. Callers must only pass a
/// piece that [`is_movable`] accepted; a roll that would pass home
/// returns `None`.
#[must_use]
pub fn resolve_move(piece: &Piece, roll: DieValue) -> Option<MoveResult> {
    let new_position = if piece.position().is_in_yard() {
        Position::START
    } else {
        piece.position().advanced_by(roll.value())?
    };
    Some(MoveResult {
        new_position,
        completed: new_position.is_home(),
    })
}

/// IDs of `player`'s pieces movable with `roll`, in stored piece order.
#[must_use]
pub fn movable_pieces(player: &Player, roll: DieValue) -> MovableSet {
    player
        .pieces()
        .iter()
        .filter(|p| is_movable(p, roll))
        .map(Piece::id)
        .collect()
}

/// Whether `player` has at least one legal move for `roll`.
#[must_use]
pub fn has_move(player: &Player, roll: DieValue) -> bool {
    player.pieces().iter().any(|p| is_movable(p, roll))
}
