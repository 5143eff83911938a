//! Material values, piece-square tables and the phase weights used to blend
//! them. Tables are written top row first (rank 8) down to bottom row
//! (rank 1) — the same order `Square`'s own indexing uses — so a White
//! piece on `sq` reads `TABLE[sq.index()]` directly; a Black piece reads
//! the vertical mirror `TABLE[sq.index() ^ 56]`.

use crate::board::types::{Color, PieceKind, Square};

pub const MATERIAL_MG: [i32; 6] = [100, 320, 330, 500, 900, 0];
pub const MATERIAL_EG: [i32; 6] = [100, 320, 330, 500, 900, 0];

/// Phase points contributed by one piece of each kind; pawns and kings
/// contribute none. Total starting phase is `24`.
pub const PHASE_WEIGHTS: [i32; 6] = [0, 1, 1, 2, 4, 0];
pub const TOTAL_PHASE: i32 = 24;
pub const PHASE_THRESHOLD: i32 = 7;

#[rustfmt::skip]
const PAWN_MG: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    50, 50, 50, 50, 50, 50, 50, 50,
    10, 10, 20, 30, 30, 20, 10, 10,
     5,  5, 10, 25, 25, 10,  5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5, -5,-10,  0,  0,-10, -5,  5,
     5, 10, 10,-20,-20, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const PAWN_EG: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    80, 80, 80, 80, 80, 80, 80, 80,
    50, 50, 50, 50, 50, 50, 50, 50,
    30, 30, 30, 30, 30, 30, 30, 30,
    20, 20, 20, 20, 20, 20, 20, 20,
    10, 10, 10, 10, 10, 10, 10, 10,
    10, 10, 10, 10, 10, 10, 10, 10,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT_MG: [i32; 64] = [
    -50,-40,-30,-30,-30,-30,-40,-50,
    -40,-20,  0,  0,  0,  0,-20,-40,
    -30,  0, 10, 15, 15, 10,  0,-30,
    -30,  5, 15, 20, 20, 15,  5,-30,
    -30,  0, 15, 20, 20, 15,  0,-30,
    -30,  5, 10, 15, 15, 10,  5,-30,
    -40,-20,  0,  5,  5,  0,-20,-40,
    -50,-40,-30,-30,-30,-30,-40,-50,
];

const KNIGHT_EG: [i32; 64] = KNIGHT_MG;

#[rustfmt::skip]
const BISHOP_MG: [i32; 64] = [
    -20,-10,-10,-10,-10,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5, 10, 10,  5,  0,-10,
    -10,  5,  5, 10, 10,  5,  5,-10,
    -10,  0, 10, 10, 10, 10,  0,-10,
    -10, 10, 10, 10, 10, 10, 10,-10,
    -10,  5,  0,  0,  0,  0,  5,-10,
    -20,-10,-10,-10,-10,-10,-10,-20,
];

const BISHOP_EG: [i32; 64] = BISHOP_MG;

#[rustfmt::skip]
const ROOK_MG: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10, 10, 10, 10, 10,  5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     0,  0,  0,  5,  5,  0,  0,  0,
];

const ROOK_EG: [i32; 64] = [0; 64];

#[rustfmt::skip]
const QUEEN_MG: [i32; 64] = [
    -20,-10,-10, -5, -5,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5,  5,  5,  5,  0,-10,
     -5,  0,  5,  5,  5,  5,  0, -5,
      0,  0,  5,  5,  5,  5,  0, -5,
    -10,  5,  5,  5,  5,  5,  0,-10,
    -10,  0,  5,  0,  0,  0,  0,-10,
    -20,-10,-10, -5, -5,-10,-10,-20,
];

const QUEEN_EG: [i32; 64] = QUEEN_MG;

#[rustfmt::skip]
const KING_MG: [i32; 64] = [
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -20,-30,-30,-40,-40,-30,-30,-20,
    -10,-20,-20,-20,-20,-20,-20,-10,
     20, 20,  0,  0,  0,  0, 20, 20,
     20, 30, 10,  0,  0, 10, 30, 20,
];

#[rustfmt::skip]
const KING_EG: [i32; 64] = [
    -50,-40,-30,-20,-20,-30,-40,-50,
    -30,-20,-10,  0,  0,-10,-20,-30,
    -30,-10, 20, 30, 30, 20,-10,-30,
    -30,-10, 30, 40, 40, 30,-10,-30,
    -30,-10, 30, 40, 40, 30,-10,-30,
    -30,-10, 20, 30, 30, 20,-10,-30,
    -30,-30,  0,  0,  0,  0,-30,-30,
    -50,-30,-30,-30,-30,-30,-30,-50,
];

const PST_MG: [[i32; 64]; 6] = [PAWN_MG, KNIGHT_MG, BISHOP_MG, ROOK_MG, QUEEN_MG, KING_MG];
const PST_EG: [[i32; 64]; 6] = [PAWN_EG, KNIGHT_EG, BISHOP_EG, ROOK_EG, QUEEN_EG, KING_EG];

#[inline]
fn pst_index(sq: Square, color: Color) -> usize {
    match color {
        Color::White => sq.index(),
        Color::Black => sq.index() ^ 56,
    }
}

#[must_use]
pub fn pst_mg(kind: PieceKind, color: Color, sq: Square) -> i32 {
    PST_MG[kind.index()][pst_index(sq, color)]
}

#[must_use]
pub fn pst_eg(kind: PieceKind, color: Color, sq: Square) -> i32 {
    PST_EG[kind.index()][pst_index(sq, color)]
}

/// `isqrt_x20[n] = floor(20 * sqrt(n))`, a cheap integer mobility curve that
/// rewards the first few extra squares more than later ones.
pub static ISQRT_X20: [i32; 32] = {
    let mut table = [0i32; 32];
    let mut n = 0usize;
    while n < 32 {
        table[n] = isqrt20(n as u32);
        n += 1;
    }
    table
};

const fn isqrt20(n: u32) -> i32 {
    // Newton's method in integer arithmetic on `400 * n`, since we want
    // `floor(20 * sqrt(n)) = floor(sqrt(400 * n))`.
    let target = 400 * n as u64;
    if target == 0 {
        return 0;
    }
    let mut x = target;
    let mut y = (x + 1) / 2;
    while y < x {
        x = y;
        y = (x + target / x) / 2;
    }
    x as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn isqrt_matches_float_sqrt() {
        for n in 0..32u32 {
            let expected = (20.0 * (n as f64).sqrt()) as i32;
            assert_eq!(ISQRT_X20[n as usize], expected, "n = {n}");
        }
    }

    #[test]
    fn pawn_pst_mirrors_for_black() {
        let sq = Square::from_coords("e2").unwrap();
        let white = pst_mg(PieceKind::Pawn, Color::White, sq);
        let mirrored = Square::from_coords("e7").unwrap();
        let black = pst_mg(PieceKind::Pawn, Color::Black, mirrored);
        assert_eq!(white, black);
    }
}
