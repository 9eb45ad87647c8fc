//! Per-color track constants.
//!
//! The board has a 52-square main ring followed by a 6-square private home
//! stretch for each color. Every color enters the ring at its own start
//! square and leaves it at its own home entrance.
//!
//! Movement never consults these offsets: each color advances along an
//! independent relative track `0..=57`, so there is no interaction between
//! colors. The constants are carried for renderers, which can project a
//! relative position onto the shared ring with [`global_square`].

use serde::{Deserialize, Serialize};

use super::color::Color;
use super::piece::Position;

/// Squares on the shared main ring.
pub const MAIN_TRACK_LEN: u8 = 52;

/// Squares in each color's home stretch (including the final home square).
pub const HOME_STRETCH_LEN: u8 = 6;

/// Ring squares where pieces are conventionally safe.
pub const SAFE_SQUARES: [u8; 8] = [0, 8, 13, 21, 26, 34, 39, 47];

/// Where a color enters and leaves the shared ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackConfig {
    /// Ring square a released piece starts on.
    pub start_pos: u8,
    /// Last ring square before the home stretch.
    pub home_entrance: u8,
}

impl TrackConfig {
    /// The fixed offsets for a color.
    #[must_use]
    pub const fn for_color(color: Color) -> Self {
        match color {
            Color::Red => Self { start_pos: 0, home_entrance: 50 },
            Color::Blue => Self { start_pos: 13, home_entrance: 11 },
            Color::Yellow => Self { start_pos: 26, home_entrance: 24 },
            Color::Green => Self { start_pos: 39, home_entrance: 37 },
        }
    }
}

/// Project a relative main-track position onto the shared ring.
///
/// Returns `None` for pieces in the yard or the home stretch, which are
/// not on the ring.
///
/// ```
/// use ludo_engine::core::{global_square, Color, Position};
///
/// assert_eq!(global_square(Color::Blue, Position::START), Some(13));
/// assert_eq!(global_square(Color::Green, Position::new(20).unwrap()), Some(7));
/// assert_eq!(global_square(Color::Red, Position::YARD), None);
/// ```
#[must_use]
pub fn global_square(color: Color, position: Position) -> Option<u8> {
    if !position.is_on_main_track() {
        return None;
    }
    let start = TrackConfig::for_color(color).start_pos;
    Some((start + position.value() as u8) % MAIN_TRACK_LEN)
}

/// Whether a ring square is one of the safe squares.
#[must_use]
pub fn is_safe_square(square: u8) -> bool {
    SAFE_SQUARES.contains(&square)
}
