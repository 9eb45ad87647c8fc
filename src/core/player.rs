//! Seats: who controls a color and which pieces it owns.

use serde::{Deserialize, Serialize};

use super::color::Color;
use super::piece::{Piece, PieceId, PIECES_PER_PLAYER};
use super::track::TrackConfig;

/// Who drives a seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Controller {
    /// Acts only through `request_roll` / `request_move`.
    Human,
    /// Driven automatically by the session's agent scheduler.
    Agent,
}

impl Controller {
    #[must_use]
    pub fn is_agent(self) -> bool {
        matches!(self, Controller::Agent)
    }
}

/// A player: one color, its controller and its four pieces.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Player {
    color: Color,
    controller: Controller,
    pieces: [Piece; PIECES_PER_PLAYER],
    track: TrackConfig,
}

impl Player {
    /// Create a player with every piece in the yard.
    #[must_use]
    pub fn new(color: Color, controller: Controller) -> Self {
        Self {
            color,
            controller,
            pieces: std::array::from_fn(|slot| Piece::new(color, slot)),
            track: TrackConfig::for_color(color),
        }
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub fn controller(&self) -> Controller {
        self.controller
    }

    /// Track offsets for this color (not used by movement).
    #[must_use]
    pub fn track(&self) -> TrackConfig {
        self.track
    }

    /// Pieces in stored order.
    #[must_use]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Look up one of this player's pieces.
    #[must_use]
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id() == id)
    }

    pub(crate) fn piece_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.pieces.iter_mut().find(|p| p.id() == id)
    }

    /// Number of pieces that are fully home.
    #[must_use]
    pub fn home_count(&self) -> usize {
        self.pieces.iter().filter(|p| p.is_home()).count()
    }

    /// True once all four pieces are home.
    #[must_use]
    pub fn has_finished(&self) -> bool {
        self.pieces.iter().all(Piece::is_home)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::piece::Position;

    #[test]
    fn test_new_player_in_yard() {
        let player = Player::new(Color::Yellow, Controller::Agent);

        assert_eq!(player.pieces().len(), 4);
        for (slot, piece) in player.pieces().iter().enumerate() {
            assert_eq!(piece.color(), Color::Yellow);
            assert_eq!(piece.id(), PieceId::new(Color::Yellow, slot));
            assert_eq!(piece.position(), Position::YARD);
        }
        assert_eq!(player.track().start_pos, 26);
        assert!(player.controller().is_agent());
    }

    #[test]
    fn test_piece_lookup_is_per_color() {
        let player = Player::new(Color::Red, Controller::Human);

        assert!(player.piece(PieceId::new(Color::Red, 2)).is_some());
        assert!(player.piece(PieceId::new(Color::Blue, 2)).is_none());
    }

    #[test]
    fn test_has_finished() {
        let mut player = Player::new(Color::Green, Controller::Agent);
        assert!(!player.has_finished());

        for slot in 0..4 {
            let id = PieceId::new(Color::Green, slot);
            player.piece_mut(id).unwrap().set_position(Position::HOME);
        }

        assert_eq!(player.home_count(), 4);
        assert!(player.has_finished());
    }
}
