//! Piece-selection policies for agent seats.
//!
//! Policies are trait-based so a host can plug in smarter agents:
//! - `FirstEligible`: first movable piece in stored order (the default)
//! - `RandomEligible`: uniform over movable pieces

use crate::core::{GameRng, PieceId, Player};

/// Policy for choosing which movable piece an agent moves.
pub trait AgentPolicy: Send {
    /// Choose one of `movable` for `player`.
    ///
    /// `movable` is in stored piece order. Returns `None` only if it is
    /// empty.
    fn choose_piece(&mut self, player: &Player, movable: &[PieceId]) -> Option<PieceId>;
}

/// Always moves the first eligible piece.
#[derive(Clone, Debug, Default)]
pub struct FirstEligible;

impl AgentPolicy for FirstEligible {
    fn choose_piece(&mut self, _player: &Player, movable: &[PieceId]) -> Option<PieceId> {
        movable.first().copied()
    }
}

/// Moves a uniformly random eligible piece.
#[derive(Clone, Debug)]
pub struct RandomEligible {
    rng: GameRng,
}

impl RandomEligible {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }
}

impl AgentPolicy for RandomEligible {
    fn choose_piece(&mut self, _player: &Player, movable: &[PieceId]) -> Option<PieceId> {
        self.rng.choose(movable).copied()
    }
}
