//! Piece mobility, scored through the `isqrt_x20` curve: each extra
//! reachable square is worth less than the last.

use crate::board::attack_tables::{bishop_attacks, rook_attacks, KNIGHT_ATTACKS, PAWN_ATTACKS};
use crate::board::pst::ISQRT_X20;
use crate::board::state::Board;
use crate::board::types::{Bitboard, Color, PieceKind, Square};

const OUTPOST_BONUS: i32 = 15;
const OUTPOST_DEFENDED_BONUS: i32 = 10;

fn mobility_bonus(count: u32) -> i32 {
    ISQRT_X20[(count as usize).min(31)]
}

/// A knight outpost: parked in the enemy half, where no enemy pawn can ever
/// chase it off. Worth more when one of our own pawns guards the square.
fn knight_outpost_bonus(sq: Square, color: Color, own_pawns: Bitboard, enemy_pawns: Bitboard) -> i32 {
    let in_enemy_half = match color {
        Color::White => sq.row() <= 3,
        Color::Black => sq.row() >= 4,
    };
    if !in_enemy_half {
        return 0;
    }
    let attacked_by_enemy_pawn = !(PAWN_ATTACKS[color.index()][sq.index()] & enemy_pawns).is_empty();
    if attacked_by_enemy_pawn {
        return 0;
    }
    let defended_by_own_pawn = !(PAWN_ATTACKS[color.opposite().index()][sq.index()] & own_pawns).is_empty();
    if defended_by_own_pawn {
        OUTPOST_BONUS + OUTPOST_DEFENDED_BONUS
    } else {
        OUTPOST_BONUS
    }
}

#[must_use]
pub fn mobility_score(board: &Board) -> (i32, i32) {
    let mut mg = 0i32;
    let mut eg = 0i32;
    let occupied = board.all_occupied();

    for &color in &[Color::White, Color::Black] {
        let own = board.occupied_by(color);
        let sign = if color == Color::White { 1 } else { -1 };
        let own_pawns = board.piece_bb(color, PieceKind::Pawn);
        let enemy_pawns = board.piece_bb(color.opposite(), PieceKind::Pawn);

        for sq in board.piece_bb(color, PieceKind::Knight) {
            let count = (KNIGHT_ATTACKS[sq.index()] & !own).popcount();
            let bonus = mobility_bonus(count);
            mg += sign * bonus;
            eg += sign * bonus;
            let outpost = knight_outpost_bonus(sq, color, own_pawns, enemy_pawns);
            mg += sign * outpost;
            eg += sign * outpost;
        }
        for sq in board.piece_bb(color, PieceKind::Bishop) {
            let count = (bishop_attacks(sq, occupied) & !own).popcount();
            let bonus = mobility_bonus(count);
            mg += sign * bonus;
            eg += sign * bonus;
        }
        for sq in board.piece_bb(color, PieceKind::Rook) {
            let count = (rook_attacks(sq, occupied) & !own).popcount();
            let bonus = mobility_bonus(count);
            mg += sign * bonus;
            eg += sign * bonus;
        }
        for sq in board.piece_bb(color, PieceKind::Queen) {
            let count = ((bishop_attacks(sq, occupied) | rook_attacks(sq, occupied)) & !own).popcount();
            let bonus = mobility_bonus(count);
            mg += sign * bonus;
            eg += sign * bonus;
        }
    }

    (mg, eg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knight_in_corner_has_lower_mobility_than_center() {
        let corner = Board::from_fen("4k3/8/8/8/8/8/8/N3K3 w - - 0 1").unwrap();
        let center = Board::from_fen("4k3/8/8/3N4/8/8/8/4K3 w - - 0 1").unwrap();
        let (corner_mg, _) = mobility_score(&corner);
        let (center_mg, _) = mobility_score(&center);
        assert!(center_mg > corner_mg);
    }
}
