//! Precomputed attack sets for the non-sliding pieces: pawns, knights and
//! kings. Each table is built once, lazily, from plain square-offset deltas.

use once_cell::sync::Lazy;

use crate::board::types::{Bitboard, Color, Square};

const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING_DELTAS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

fn build_leaper_table(deltas: &[(i8, i8)]) -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];
    for idx in 0..64u8 {
        let sq = Square::new(idx);
        let mut bb = Bitboard::EMPTY;
        for &(dr, df) in deltas {
            if let Some(target) = sq.offset(dr, df) {
                bb = bb.with(target);
            }
        }
        table[idx as usize] = bb;
    }
    table
}

pub static KNIGHT_ATTACKS: Lazy<[Bitboard; 64]> = Lazy::new(|| build_leaper_table(&KNIGHT_DELTAS));

pub static KING_ATTACKS: Lazy<[Bitboard; 64]> = Lazy::new(|| build_leaper_table(&KING_DELTAS));

/// `PAWN_ATTACKS[color][square]`: squares a pawn of `color` standing on
/// `square` attacks. White advances toward rank 8, i.e. toward decreasing
/// `row()`.
pub static PAWN_ATTACKS: Lazy<[[Bitboard; 64]; 2]> = Lazy::new(|| {
    let mut table = [[Bitboard::EMPTY; 64]; 2];
    for idx in 0..64u8 {
        let sq = Square::new(idx);
        let mut white = Bitboard::EMPTY;
        let mut black = Bitboard::EMPTY;
        for &df in &[-1i8, 1] {
            if let Some(t) = sq.offset(-1, df) {
                white = white.with(t);
            }
            if let Some(t) = sq.offset(1, df) {
                black = black.with(t);
            }
        }
        table[Color::White.index()][idx as usize] = white;
        table[Color::Black.index()][idx as usize] = black;
    }
    table
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knight_attacks_from_corner() {
        let attacks = KNIGHT_ATTACKS[Square::new(0).index()];
        assert_eq!(attacks.popcount(), 2);
    }

    #[test]
    fn king_attacks_from_center() {
        let attacks = KING_ATTACKS[Square::new(27).index()];
        assert_eq!(attacks.popcount(), 8);
    }

    #[test]
    fn white_pawn_attacks_toward_rank_eight() {
        let d2 = Square::from_coords("d2").unwrap();
        let attacks = PAWN_ATTACKS[Color::White.index()][d2.index()];
        assert!(attacks.contains(Square::from_coords("c3").unwrap()));
        assert!(attacks.contains(Square::from_coords("e3").unwrap()));
    }
}
