//! Castling rights as a 4-bit flag set, matching the FEN `KQkq` field order.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

pub const WHITE_KINGSIDE: u8 = 1 << 0;
pub const WHITE_QUEENSIDE: u8 = 1 << 1;
pub const BLACK_KINGSIDE: u8 = 1 << 2;
pub const BLACK_QUEENSIDE: u8 = 1 << 3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CastlingRights(pub u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const ALL: CastlingRights = CastlingRights(
        WHITE_KINGSIDE | WHITE_QUEENSIDE | BLACK_KINGSIDE | BLACK_QUEENSIDE,
    );

    #[must_use]
    pub fn from_fen(field: &str) -> CastlingRights {
        if field == "-" {
            return CastlingRights::NONE;
        }
        let mut bits = 0u8;
        for c in field.chars() {
            bits |= match c {
                'K' => WHITE_KINGSIDE,
                'Q' => WHITE_QUEENSIDE,
                'k' => BLACK_KINGSIDE,
                'q' => BLACK_QUEENSIDE,
                _ => 0,
            };
        }
        CastlingRights(bits)
    }

    #[inline]
    #[must_use]
    pub const fn has(self, mask: u8) -> bool {
        self.0 & mask != 0
    }

    #[inline]
    pub fn remove(&mut self, mask: u8) {
        self.0 &= !mask;
    }
}

impl BitAnd<u8> for CastlingRights {
    type Output = u8;
    fn bitand(self, rhs: u8) -> u8 {
        self.0 & rhs
    }
}

impl BitOr for CastlingRights {
    type Output = CastlingRights;
    fn bitor(self, rhs: CastlingRights) -> CastlingRights {
        CastlingRights(self.0 | rhs.0)
    }
}

impl BitOrAssign for CastlingRights {
    fn bitor_assign(&mut self, rhs: CastlingRights) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return write!(f, "-");
        }
        if self.has(WHITE_KINGSIDE) {
            write!(f, "K")?;
        }
        if self.has(WHITE_QUEENSIDE) {
            write!(f, "Q")?;
        }
        if self.has(BLACK_KINGSIDE) {
            write!(f, "k")?;
        }
        if self.has(BLACK_QUEENSIDE) {
            write!(f, "q")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fen_round_trip() {
        for field in ["KQkq", "Kq", "-", "k"] {
            let rights = CastlingRights::from_fen(field);
            assert_eq!(rights.to_string(), field);
        }
    }
}
