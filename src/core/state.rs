//! Game state: the single mutable root owned by a session.
//!
//! ## GameState
//!
//! - Players and their pieces, keyed by color in turn order
//! - Whose turn it is, the pending die value and the rolling flag
//! - `Phase`: what the current player may do next
//! - Winner (terminal once set)
//! - Narration feed and action history
//! - `StateToken`: an epoch bumped by every accepted transition, used to
//!   detect stale scheduled tasks
//!
//! Fields are private. Reads go through accessors; writes are crate-only
//! and made by the transitions in `rules::engine`, so stored derived data
//! (`Piece::is_home`) and the epoch cannot drift.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::{ActionRecord, TurnEvent};
use super::color::{Color, ColorMap};
use super::config::GameConfig;
use super::feed::LogFeed;
use super::piece::{Piece, PieceId, Position};
use super::player::{Controller, Player};
use super::rng::DieValue;

/// What the current player may do next.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for a roll.
    #[default]
    Idle,
    /// A roll is pending and at least one piece may move.
    Moving,
    /// Reserved. The engine tracks completion through the winner alone and
    /// never enters this phase.
    Finished,
}

/// Identifies one version of the game state.
///
/// Any accepted transition produces a new token; scheduled work holding an
/// older token is stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateToken(pub u64);

/// Full game state.
#[derive(Clone, Debug, Serialize)]
pub struct GameState {
    players: ColorMap<Player>,
    current_turn: Color,
    dice_value: Option<DieValue>,
    is_rolling: bool,
    phase: Phase,
    winner: Option<Color>,
    log: LogFeed,
    history: Vector<ActionRecord>,
    turn_number: u32,
    action_sequence: u32,
    epoch: u64,
}

impl GameState {
    /// Create a fresh game: every piece in the yard, RED to move, the feed
    /// seeded with a start message.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        let first = Color::Red;
        let mut log = LogFeed::new(config.log_capacity);
        log.push(format!("Game started. {}'s turn.", first.title()));

        Self {
            players: ColorMap::new(|c| Player::new(c, config.controllers[c])),
            current_turn: first,
            dice_value: None,
            is_rolling: false,
            phase: Phase::Idle,
            winner: None,
            log,
            history: Vector::new(),
            turn_number: 1,
            action_sequence: 0,
            epoch: 0,
        }
    }

    // === Reads ===

    #[must_use]
    pub fn players(&self) -> &ColorMap<Player> {
        &self.players
    }

    #[must_use]
    pub fn player(&self, color: Color) -> &Player {
        &self.players[color]
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> &Player {
        &self.players[self.current_turn]
    }

    #[must_use]
    pub fn current_turn(&self) -> Color {
        self.current_turn
    }

    /// Controller of the seat whose turn it is.
    #[must_use]
    pub fn current_controller(&self) -> Controller {
        self.current_player().controller()
    }

    #[must_use]
    pub fn dice_value(&self) -> Option<DieValue> {
        self.dice_value
    }

    #[must_use]
    pub fn is_rolling(&self) -> bool {
        self.is_rolling
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    /// True once a winner is set. Nothing mutates a finished game.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// A roll found no legal move and the turn is about to pass.
    #[must_use]
    pub fn forfeit_pending(&self) -> bool {
        self.phase == Phase::Idle && self.dice_value.is_some()
    }

    #[must_use]
    pub fn log(&self) -> &LogFeed {
        &self.log
    }

    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Token identifying this exact version of the state.
    #[must_use]
    pub fn token(&self) -> StateToken {
        StateToken(self.epoch)
    }

    /// Find any piece on the board.
    #[must_use]
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.players[id.color()?].piece(id)
    }

    /// Every piece in turn order, then slot order.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.players.values().flat_map(Player::pieces)
    }

    // === Setup ===

    /// Place a piece directly, bypassing the rules.
    ///
    /// Setup only (tests, puzzles): accepted just while the current seat
    /// is waiting to roll, so a pending roll or move can never be left
    /// without a legal continuation. Leaves the state token alone.
    /// Returns false if the placement was refused or `id` is unknown.
    pub fn place_piece(&mut self, id: PieceId, position: Position) -> bool {
        let waiting_to_roll = self.phase == Phase::Idle && !self.is_rolling && self.dice_value.is_none();
        if self.is_over() || !waiting_to_roll {
            return false;
        }
        match self.piece_mut(id) {
            Some(piece) => {
                piece.set_position(position);
                true
            }
            None => false,
        }
    }

    // === Transition support (crate-only) ===

    pub(crate) fn piece_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.players[id.color()?].piece_mut(id)
    }

    pub(crate) fn set_rolling(&mut self, rolling: bool) {
        self.is_rolling = rolling;
    }

    pub(crate) fn set_dice_value(&mut self, value: Option<DieValue>) {
        self.dice_value = value;
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub(crate) fn set_winner(&mut self, color: Color) {
        self.winner = Some(color);
    }

    /// Start the next turn, for `color`.
    pub(crate) fn begin_turn(&mut self, color: Color) {
        self.current_turn = color;
        self.turn_number += 1;
        self.action_sequence = 0;
    }

    /// Record an event for the current player and narrate it if needed.
    pub(crate) fn record(&mut self, event: TurnEvent) {
        let color = self.current_turn;
        if let Some(line) = event.narration(color) {
            self.log.push(line);
        }
        let sequence = self.action_sequence;
        self.action_sequence += 1;
        self.history
            .push_back(ActionRecord::new(color, event, self.turn_number, sequence));
    }

    /// Mark the state as changed, invalidating outstanding tokens.
    pub(crate) fn touch(&mut self) {
        self.epoch += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game() {
        let state = GameState::new(&GameConfig::new());

        assert_eq!(state.current_turn(), Color::Red);
        assert_eq!(state.current_controller(), Controller::Human);
        assert_eq!(state.dice_value(), None);
        assert!(!state.is_rolling());
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.winner(), None);
        assert_eq!(state.log().to_vec(), vec!["Game started. Red's turn."]);
        assert!(state.history().is_empty());
        assert_eq!(state.pieces().count(), 16);
        assert!(state.pieces().all(|p| p.position() == Position::YARD));
    }

    #[test]
    fn test_piece_lookup() {
        let state = GameState::new(&GameConfig::new());

        let id = PieceId::new(Color::Yellow, 3);
        assert_eq!(state.piece(id).map(Piece::color), Some(Color::Yellow));
        assert!(state.piece(PieceId(200)).is_none());
    }

    #[test]
    fn test_place_piece() {
        let mut state = GameState::new(&GameConfig::new());
        let before = state.token();

        assert!(state.place_piece(PieceId::new(Color::Red, 0), Position::HOME));

        assert_eq!(state.token(), before);
        assert!(state.piece(PieceId::new(Color::Red, 0)).unwrap().is_home());

        assert!(!state.place_piece(PieceId(77), Position::HOME));
        assert_eq!(state.pieces().filter(|p| p.is_home()).count(), 1);
    }

    #[test]
    fn test_place_piece_refused_mid_turn() {
        let mut state = GameState::new(&GameConfig::new());
        let red = PieceId::new(Color::Red, 0);

        state.set_rolling(true);
        assert!(!state.place_piece(red, Position::START));

        state.set_rolling(false);
        state.set_dice_value(Some(DieValue::SIX));
        state.set_phase(Phase::Moving);
        assert!(!state.place_piece(red, Position::HOME));
        assert_eq!(state.piece(red).unwrap().position(), Position::YARD);
    }

    #[test]
    fn test_record_narrates_and_sequences() {
        let mut state = GameState::new(&GameConfig::new());

        state.record(TurnEvent::Rolled(DieValue::SIX));
        state.record(TurnEvent::Moved {
            piece: PieceId(0),
            from: Position::YARD,
            to: Position::START,
        });

        assert_eq!(state.log().latest(), Some("RED rolled a 6"));
        assert_eq!(state.history().len(), 2);
        assert_eq!(state.history()[0].sequence, 0);
        assert_eq!(state.history()[1].sequence, 1);
    }

    #[test]
    fn test_begin_turn_resets_sequence() {
        let mut state = GameState::new(&GameConfig::new());
        state.record(TurnEvent::Rolled(DieValue::SIX));

        state.begin_turn(Color::Blue);
        state.record(TurnEvent::Rolled(DieValue::SIX));

        assert_eq!(state.current_turn(), Color::Blue);
        assert_eq!(state.turn_number(), 2);
        assert_eq!(state.history()[1].sequence, 0);
        assert_eq!(state.history()[1].turn, 2);
    }
}
