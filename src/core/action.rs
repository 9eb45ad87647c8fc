//! Turn events and the action history.
//!
//! Every accepted transition appends an `ActionRecord` to the game's
//! history. The history is for inspection and debugging only; it is never
//! read back by the rules.

use serde::{Deserialize, Serialize};

use super::color::Color;
use super::piece::{PieceId, Position};
use super::rng::DieValue;

/// Something that happened on a turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEvent {
    /// The die settled on a value.
    Rolled(DieValue),
    /// A piece moved.
    Moved {
        piece: PieceId,
        from: Position,
        to: Position,
    },
    /// The roll had no legal move and the turn passed.
    Forfeited(DieValue),
    /// The mover brought its last piece home.
    Won,
}

impl TurnEvent {
    /// Narration line for the display feed, if this event is narrated.
    #[must_use]
    pub fn narration(&self, color: Color) -> Option<String> {
        match self {
            TurnEvent::Rolled(value) => Some(format!("{color} rolled a {value}")),
            TurnEvent::Won => Some(format!("{color} wins!")),
            TurnEvent::Moved { .. } | TurnEvent::Forfeited(_) => None,
        }
    }
}

/// A recorded event with ordering metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The color whose turn it was.
    pub color: Color,

    /// What happened.
    pub event: TurnEvent,

    /// Turn number when the event occurred.
    pub turn: u32,

    /// Sequence number within the turn (for ordering).
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(color: Color, event: TurnEvent, turn: u32, sequence: u32) -> Self {
        Self {
            color,
            event,
            turn,
            sequence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roll_narration() {
        let event = TurnEvent::Rolled(DieValue::SIX);
        assert_eq!(event.narration(Color::Red).as_deref(), Some("RED rolled a 6"));
    }

    #[test]
    fn test_win_narration() {
        assert_eq!(TurnEvent::Won.narration(Color::Blue).as_deref(), Some("BLUE wins!"));
    }

    #[test]
    fn test_moves_are_not_narrated() {
        let event = TurnEvent::Moved {
            piece: PieceId(0),
            from: Position::YARD,
            to: Position::START,
        };
        assert!(event.narration(Color::Red).is_none());
        assert!(TurnEvent::Forfeited(DieValue::SIX).narration(Color::Red).is_none());
    }

    #[test]
    fn test_action_record_serialization() {
        let record = ActionRecord::new(Color::Green, TurnEvent::Rolled(DieValue::SIX), 3, 1);

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: ActionRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record, deserialized);
    }
}
