//! Read-only view for renderers.

use serde::Serialize;

use crate::core::{Color, Controller, DieValue, GameState, Phase, PieceId, Position};
use crate::rules::{self, MovableSet};

/// One seat in the roster panel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SeatView {
    pub color: Color,
    pub controller: Controller,
    pub home_count: usize,
}

/// One piece on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PieceView {
    pub id: PieceId,
    pub color: Color,
    pub slot: usize,
    pub position: Position,
    pub is_home: bool,
}

/// Everything a renderer needs, detached from the live state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub current_turn: Color,
    pub dice_value: Option<DieValue>,
    pub is_rolling: bool,
    pub phase: Phase,
    pub winner: Option<Color>,
    /// Seats in turn order.
    pub seats: Vec<SeatView>,
    /// All sixteen pieces in turn order, then slot order.
    pub pieces: Vec<PieceView>,
    /// Pieces the current player may move with the pending roll.
    pub movable: MovableSet,
    /// True when a human seat may click the die right now.
    pub can_roll: bool,
    /// Narration, newest first.
    pub log: Vec<String>,
}

impl Snapshot {
    #[must_use]
    pub fn from_state(state: &GameState) -> Self {
        let seats = state
            .players()
            .values()
            .map(|p| SeatView {
                color: p.color(),
                controller: p.controller(),
                home_count: p.home_count(),
            })
            .collect();

        let pieces = state
            .pieces()
            .map(|p| PieceView {
                id: p.id(),
                color: p.color(),
                slot: p.id().slot(),
                position: p.position(),
                is_home: p.is_home(),
            })
            .collect();

        let can_roll = state.current_controller() == Controller::Human && rules::check_roll(state).is_ok();

        Self {
            current_turn: state.current_turn(),
            dice_value: state.dice_value(),
            is_rolling: state.is_rolling(),
            phase: state.phase(),
            winner: state.winner(),
            seats,
            pieces,
            movable: rules::current_movable(state),
            can_roll,
            log: state.log().to_vec(),
        }
    }

    /// Look up one piece.
    #[must_use]
    pub fn piece(&self, id: PieceId) -> Option<&PieceView> {
        self.pieces.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn is_movable(&self, id: PieceId) -> bool {
        self.movable.contains(&id)
    }
}
