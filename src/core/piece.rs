//! Pieces and their track positions.
//!
//! ## ID Layout
//!
//! Piece IDs are unique across the whole board:
//! `color.index() * PIECES_PER_PLAYER + slot`, so RED owns `0..4`,
//! BLUE `4..8`, YELLOW `8..12` and GREEN `12..16`.
//!
//! ## Positions
//!
//! Each color progresses along its own private linear track:
//! - `-1`: in the yard (not yet released)
//! - `0..=51`: main track
//! - `52..=57`: home stretch, `57` being fully home

use serde::{Deserialize, Serialize};

use super::color::{Color, SEAT_COUNT};

/// Pieces owned by every player.
pub const PIECES_PER_PLAYER: usize = 4;

/// Unique identifier for a piece on the board.
///
/// ```
/// use ludo_engine::core::{Color, PieceId};
///
/// let id = PieceId::new(Color::Blue, 2);
/// assert_eq!(id.raw(), 6);
/// assert_eq!(id.color(), Some(Color::Blue));
/// assert_eq!(id.slot(), 2);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub u8);

impl PieceId {
    /// Create the ID of `color`'s piece in `slot` (0-based).
    #[must_use]
    pub fn new(color: Color, slot: usize) -> Self {
        assert!(slot < PIECES_PER_PLAYER, "Piece slot must be 0-3");
        Self((color.index() * PIECES_PER_PLAYER + slot) as u8)
    }

    /// Owning color, or `None` for an ID outside the board's range.
    #[must_use]
    pub fn color(self) -> Option<Color> {
        Color::from_index(self.0 as usize / PIECES_PER_PLAYER)
    }

    /// Index of this piece within its color group.
    #[must_use]
    pub const fn slot(self) -> usize {
        self.0 as usize % PIECES_PER_PLAYER
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Iterate over every piece ID on the board.
    pub fn all() -> impl Iterator<Item = PieceId> {
        (0..(SEAT_COUNT * PIECES_PER_PLAYER) as u8).map(PieceId)
    }
}

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Piece({})", self.0)
    }
}

/// A position on a color's private track.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub struct Position(i8);

impl Position {
    /// Not yet released from the start yard.
    pub const YARD: Position = Position(-1);

    /// First square of the main track.
    pub const START: Position = Position(0);

    /// First square of the home stretch.
    pub const HOME_STRETCH: Position = Position(52);

    /// Fully home.
    pub const HOME: Position = Position(57);

    /// Create a position, rejecting values outside `{-1} ∪ [0, 57]`.
    #[must_use]
    pub const fn new(value: i8) -> Option<Self> {
        if value >= Self::YARD.0 && value <= Self::HOME.0 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Get the raw value.
    #[must_use]
    pub const fn value(self) -> i8 {
        self.0
    }

    #[must_use]
    pub const fn is_in_yard(self) -> bool {
        self.0 == Self::YARD.0
    }

    #[must_use]
    pub const fn is_on_main_track(self) -> bool {
        self.0 >= Self::START.0 && self.0 < Self::HOME_STRETCH.0
    }

    #[must_use]
    pub const fn is_in_home_stretch(self) -> bool {
        self.0 >= Self::HOME_STRETCH.0
    }

    #[must_use]
    pub const fn is_home(self) -> bool {
        self.0 == Self::HOME.0
    }

    /// Advance by `steps` squares, or `None` if that would pass home.
    #[must_use]
    pub fn advanced_by(self, steps: u8) -> Option<Self> {
        let target = i16::from(self.0) + i16::from(steps);
        i8::try_from(target).ok().and_then(Self::new)
    }
}

impl TryFrom<i8> for Position {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("position {value} outside -1..=57"))
    }
}

impl From<Position> for i8 {
    fn from(position: Position) -> Self {
        position.0
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_in_yard() {
            f.write_str("yard")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// A single piece.
///
/// `is_home` is stored for readers but only ever written by
/// [`Piece::set_position`], so it always equals `position == HOME`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Piece {
    id: PieceId,
    color: Color,
    position: Position,
    is_home: bool,
}

impl Piece {
    /// Create a piece in the yard.
    #[must_use]
    pub fn new(color: Color, slot: usize) -> Self {
        Self {
            id: PieceId::new(color, slot),
            color,
            position: Position::YARD,
            is_home: false,
        }
    }

    #[must_use]
    pub fn id(&self) -> PieceId {
        self.id
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub fn is_home(&self) -> bool {
        self.is_home
    }

    /// Move the piece, recomputing `is_home`.
    pub fn set_position(&mut self, position: Position) {
        self.position = position;
        self.is_home = position.is_home();
    }
}
