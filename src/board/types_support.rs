//! Small shared helpers that don't belong to any one piece type.

use crate::board::types::{Color, Square};

/// The square a pawn lands on after a single forward push, from `sq`.
#[must_use]
pub fn pawn_push_target(sq: Square, color: Color) -> Option<Square> {
    match color {
        Color::White => sq.offset(-1, 0),
        Color::Black => sq.offset(1, 0),
    }
}

/// The square a pawn lands on after a double push from its home rank.
#[must_use]
pub fn pawn_double_push_target(sq: Square, color: Color) -> Option<Square> {
    match color {
        Color::White => sq.offset(-2, 0),
        Color::Black => sq.offset(2, 0),
    }
}

#[must_use]
pub fn pawn_home_row(color: Color) -> u8 {
    match color {
        Color::White => 6,
        Color::Black => 1,
    }
}

#[must_use]
pub fn pawn_promotion_row(color: Color) -> u8 {
    match color {
        Color::White => 0,
        Color::Black => 7,
    }
}
