//! Turn state machine.
//!
//! Each transition is one atomic update of a `GameState`: it checks every
//! precondition first and either applies all of its writes or returns a
//! `TurnError` having written nothing.
//!
//! ```text
//!            begin_roll              resolve_roll (has move)
//!   Idle ──────────────▶ rolling ─────────────────────────▶ Moving
//!    ▲                     │                                  │
//!    │   advance_turn      │ resolve_roll (no move)           │ apply_move
//!    └──── forfeit ◀───────┘                                  │
//!    └────────────────────────────────────────────────────────┘
//! ```
//!
//! A winner freezes the machine: every transition then returns
//! `TurnError::GameOver`.

use thiserror::Error;

use crate::core::{Color, DieValue, GameState, Phase, PieceId, TurnEvent};

use super::movement::{has_move, is_movable, movable_pieces, resolve_move, MovableSet};

/// Why a transition was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum TurnError {
    #[error("the game is over")]
    GameOver,

    #[error("a roll is already in progress")]
    AlreadyRolling,

    #[error("no roll is in progress")]
    NotRolling,

    #[error("the last roll had no legal move and the turn is about to pass")]
    ForfeitPending,

    #[error("cannot roll while a piece must be moved")]
    NotIdle,

    #[error("no roll is waiting for a move")]
    NotMoving,

    #[error("no die value is pending")]
    NoDice,

    #[error("{0} is not a human seat")]
    NotHumanTurn(Color),

    #[error("{0} does not exist")]
    UnknownPiece(PieceId),

    #[error("{piece} does not belong to {turn}")]
    NotCurrentPlayer { piece: PieceId, turn: Color },

    #[error("{piece} cannot move {roll}")]
    NotMovable { piece: PieceId, roll: DieValue },
}

/// What a resolved roll allows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RollOutcome {
    /// The listed pieces may move; phase is now `Moving`.
    CanMove(MovableSet),
    /// Nothing may move; the turn should be advanced.
    NoMove,
}

/// What happened after a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The mover brought its last piece home.
    Won(Color),
    /// A six was used; the same color rolls again.
    ExtraTurn(Color),
    /// The turn passed to the next color.
    Passed(Color),
}

/// Check that the current player may start a roll.
pub fn check_roll(state: &GameState) -> Result<(), TurnError> {
    if state.is_over() {
        return Err(TurnError::GameOver);
    }
    if state.is_rolling() {
        return Err(TurnError::AlreadyRolling);
    }
    if state.phase() != Phase::Idle {
        return Err(TurnError::NotIdle);
    }
    if state.forfeit_pending() {
        return Err(TurnError::ForfeitPending);
    }
    Ok(())
}

/// Start a roll: the die is in the air until [`resolve_roll`].
pub fn begin_roll(state: &mut GameState) -> Result<(), TurnError> {
    check_roll(state)?;
    state.set_rolling(true);
    state.touch();
    Ok(())
}

/// Land the die on `roll` and decide whether the player can move.
pub fn resolve_roll(state: &mut GameState, roll: DieValue) -> Result<RollOutcome, TurnError> {
    if state.is_over() {
        return Err(TurnError::GameOver);
    }
    if !state.is_rolling() {
        return Err(TurnError::NotRolling);
    }

    state.set_rolling(false);
    state.set_dice_value(Some(roll));
    state.record(TurnEvent::Rolled(roll));

    let outcome = if has_move(state.current_player(), roll) {
        state.set_phase(Phase::Moving);
        RollOutcome::CanMove(movable_pieces(state.current_player(), roll))
    } else {
        state.set_phase(Phase::Idle);
        RollOutcome::NoMove
    };
    state.touch();
    Ok(outcome)
}

/// Pieces the current player may move with the pending roll.
///
/// Empty unless the phase is `Moving` and the game is still running.
#[must_use]
pub fn current_movable(state: &GameState) -> MovableSet {
    match state.dice_value() {
        Some(roll) if state.phase() == Phase::Moving && !state.is_over() => {
            movable_pieces(state.current_player(), roll)
        }
        _ => MovableSet::new(),
    }
}

/// Check that `piece` may be moved with the pending roll, returning the roll.
pub fn check_move(state: &GameState, piece: PieceId) -> Result<DieValue, TurnError> {
    if state.is_over() {
        return Err(TurnError::GameOver);
    }
    if state.phase() != Phase::Moving {
        return Err(TurnError::NotMoving);
    }
    let roll = state.dice_value().ok_or(TurnError::NoDice)?;
    let found = state.piece(piece).ok_or(TurnError::UnknownPiece(piece))?;
    if found.color() != state.current_turn() {
        return Err(TurnError::NotCurrentPlayer {
            piece,
            turn: state.current_turn(),
        });
    }
    if !is_movable(found, roll) {
        return Err(TurnError::NotMovable { piece, roll });
    }
    Ok(roll)
}

/// Move `piece` with the pending roll, then check for a win and pass the
/// turn (keeping it on a six).
pub fn apply_move(state: &mut GameState, piece: PieceId) -> Result<MoveOutcome, TurnError> {
    let roll = check_move(state, piece)?;
    let (from, result) = {
        let found = state.piece(piece).ok_or(TurnError::UnknownPiece(piece))?;
        let result = resolve_move(found, roll).ok_or(TurnError::NotMovable { piece, roll })?;
        (found.position(), result)
    };

    if let Some(target) = state.piece_mut(piece) {
        target.set_position(result.new_position);
    }
    state.record(TurnEvent::Moved {
        piece,
        from,
        to: result.new_position,
    });

    let mover = state.current_turn();
    let outcome = if state.current_player().has_finished() {
        state.set_winner(mover);
        state.record(TurnEvent::Won);
        MoveOutcome::Won(mover)
    } else {
        state.set_dice_value(None);
        state.set_phase(Phase::Idle);
        if roll.is_six() {
            state.begin_turn(mover);
            MoveOutcome::ExtraTurn(mover)
        } else {
            let next = mover.next();
            state.begin_turn(next);
            MoveOutcome::Passed(next)
        }
    };
    state.touch();
    Ok(outcome)
}

/// Pass the turn without a move. A six does not keep the turn here.
pub fn advance_turn(state: &mut GameState) -> Result<Color, TurnError> {
    if state.is_over() {
        return Err(TurnError::GameOver);
    }
    if state.is_rolling() {
        return Err(TurnError::AlreadyRolling);
    }

    if let Some(roll) = state.dice_value() {
        state.record(TurnEvent::Forfeited(roll));
    }
    state.set_dice_value(None);
    state.set_phase(Phase::Idle);
    let next = state.current_turn().next();
    state.begin_turn(next);
    state.touch();
    Ok(next)
}

/// Roll and resolve in one step, without pacing delays.
pub fn roll(state: &mut GameState, value: DieValue) -> Result<RollOutcome, TurnError> {
    begin_roll(state)?;
    resolve_roll(state, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, Position};

    fn die(v: u8) -> DieValue {
        DieValue::new(v).unwrap()
    }

    fn red(slot: usize) -> PieceId {
        PieceId::new(Color::Red, slot)
    }

    fn fresh() -> GameState {
        GameState::new(&GameConfig::new())
    }

    fn position_of(state: &GameState, piece: PieceId) -> Option<Position> {
        state.piece(piece).map(|p| p.position())
    }

    #[test]
    fn test_begin_roll_sets_flag() {
        let mut state = fresh();
        begin_roll(&mut state).unwrap();

        assert!(state.is_rolling());
        assert_eq!(begin_roll(&mut state), Err(TurnError::AlreadyRolling));
    }

    #[test]
    fn test_resolve_requires_roll_in_progress() {
        let mut state = fresh();
        assert_eq!(resolve_roll(&mut state, die(6)), Err(TurnError::NotRolling));
    }

    #[test]
    fn test_six_from_yard_enters_moving() {
        let mut state = fresh();
        let outcome = roll(&mut state, die(6)).unwrap();

        assert_eq!(state.phase(), Phase::Moving);
        assert_eq!(state.dice_value(), Some(die(6)));
        assert!(!state.is_rolling());
        assert_eq!(state.log().latest(), Some("RED rolled a 6"));
        match outcome {
            RollOutcome::CanMove(ids) => assert_eq!(ids.len(), 4),
            RollOutcome::NoMove => panic!("expected movable pieces"),
        }
    }

    #[test]
    fn test_no_move_stays_idle_and_blocks_reroll() {
        let mut state = fresh();
        assert_eq!(roll(&mut state, die(3)).unwrap(), RollOutcome::NoMove);

        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.dice_value(), Some(die(3)));
        assert!(state.forfeit_pending());
        assert_eq!(begin_roll(&mut state), Err(TurnError::ForfeitPending));
    }

    #[test]
    fn test_advance_after_forfeit() {
        let mut state = fresh();
        roll(&mut state, die(3)).unwrap();

        assert_eq!(advance_turn(&mut state), Ok(Color::Blue));
        assert_eq!(state.current_turn(), Color::Blue);
        assert_eq!(state.dice_value(), None);
        assert_eq!(state.phase(), Phase::Idle);
        assert!(matches!(
            state.history().last().map(|r| &r.event),
            Some(TurnEvent::Forfeited(_))
        ));
    }

    #[test]
    fn test_move_with_six_keeps_turn() {
        let mut state = fresh();
        roll(&mut state, die(6)).unwrap();

        assert_eq!(apply_move(&mut state, red(0)), Ok(MoveOutcome::ExtraTurn(Color::Red)));
        assert_eq!(position_of(&state, red(0)), Some(Position::START));
        assert_eq!(state.current_turn(), Color::Red);
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.dice_value(), None);
    }

    #[test]
    fn test_move_without_six_passes() {
        let mut state = fresh();
        state.place_piece(red(1), Position::new(10).unwrap());
        roll(&mut state, die(4)).unwrap();

        assert_eq!(apply_move(&mut state, red(1)), Ok(MoveOutcome::Passed(Color::Blue)));
        assert_eq!(position_of(&state, red(1)), Some(Position::new(14).unwrap()));
    }

    #[test]
    fn test_move_rejections_do_not_mutate() {
        let mut state = fresh();
        assert_eq!(apply_move(&mut state, red(0)), Err(TurnError::NotMoving));

        state.place_piece(red(0), Position::new(55).unwrap());
        state.place_piece(red(1), Position::new(20).unwrap());
        roll(&mut state, die(3)).unwrap();
        let token = state.token();

        assert_eq!(
            apply_move(&mut state, red(0)),
            Err(TurnError::NotMovable { piece: red(0), roll: die(3) })
        );
        assert_eq!(
            apply_move(&mut state, PieceId::new(Color::Blue, 0)),
            Err(TurnError::NotCurrentPlayer {
                piece: PieceId::new(Color::Blue, 0),
                turn: Color::Red
            })
        );
        assert_eq!(
            apply_move(&mut state, PieceId(99)),
            Err(TurnError::UnknownPiece(PieceId(99)))
        );
        assert_eq!(state.token(), token);
        assert_eq!(position_of(&state, red(0)), Some(Position::new(55).unwrap()));
    }

    #[test]
    fn test_win_freezes() {
        let mut state = fresh();
        for slot in 0..3 {
            state.place_piece(red(slot), Position::HOME);
        }
        state.place_piece(red(3), Position::new(54).unwrap());
        roll(&mut state, die(3)).unwrap();

        assert_eq!(apply_move(&mut state, red(3)), Ok(MoveOutcome::Won(Color::Red)));
        assert_eq!(state.winner(), Some(Color::Red));
        assert_eq!(state.log().latest(), Some("RED wins!"));

        let token = state.token();
        assert_eq!(begin_roll(&mut state), Err(TurnError::GameOver));
        assert_eq!(advance_turn(&mut state), Err(TurnError::GameOver));
        assert_eq!(apply_move(&mut state, red(3)), Err(TurnError::GameOver));
        assert_eq!(state.token(), token);
        assert!(current_movable(&state).is_empty());
    }

    #[test]
    fn test_current_movable() {
        let mut state = fresh();
        assert!(current_movable(&state).is_empty());

        state.place_piece(red(2), Position::new(30).unwrap());
        roll(&mut state, die(2)).unwrap();

        assert_eq!(current_movable(&state).to_vec(), vec![red(2)]);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(TurnError::GameOver.to_string(), "the game is over");
        assert_eq!(
            TurnError::NotMovable { piece: red(0), roll: die(3) }.to_string(),
            "Piece(0) cannot move 3"
        );
        assert_eq!(TurnError::NotHumanTurn(Color::Blue).to_string(), "BLUE is not a human seat");
    }
}
