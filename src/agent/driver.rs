//! Agent seat driver.
//!
//! Decides what an agent seat should do next and carries out the decision
//! against the state. The session wraps each decision in a delayed,
//! token-checked task; the driver itself is timeless.

use crate::core::{GameState, Phase};
use crate::rules::{self, MoveOutcome, TurnError};

use super::policy::AgentPolicy;

/// The next step an agent seat will take.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AgentStep {
    /// Roll the die, as a human clicking it would.
    Roll,
    /// Pick a piece for the pending roll.
    Move,
}

/// What an agent's move step did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AgentMove {
    Moved(MoveOutcome),
    /// Nothing was movable; the turn was advanced instead.
    Advanced,
}

/// The step the current seat's agent should schedule, if any.
///
/// `None` when the game is over, the seat is human, or the engine itself
/// has work pending (a roll in the air or a forfeited turn about to pass).
#[must_use]
pub fn next_step(state: &GameState) -> Option<AgentStep> {
    if state.is_over() || !state.current_controller().is_agent() || state.is_rolling() {
        return None;
    }
    match state.phase() {
        Phase::Idle if !state.forfeit_pending() => Some(AgentStep::Roll),
        Phase::Moving => Some(AgentStep::Move),
        _ => None,
    }
}

/// Recompute the movable set and move the policy's choice, or advance the
/// turn if nothing can move.
pub fn take_move(state: &mut GameState, policy: &mut dyn AgentPolicy) -> Result<AgentMove, TurnError> {
    if state.is_over() {
        return Err(TurnError::GameOver);
    }
    if state.phase() != Phase::Moving {
        return Err(TurnError::NotMoving);
    }

    let movable = rules::current_movable(state);
    match policy.choose_piece(state.current_player(), &movable) {
        Some(piece) => rules::apply_move(state, piece).map(AgentMove::Moved),
        None => rules::advance_turn(state).map(|_| AgentMove::Advanced),
    }
}
