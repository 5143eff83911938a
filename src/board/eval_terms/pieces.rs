//! Piece-specific positional bonuses: the bishop pair, "bad" bishops boxed
//! in by their own pawns, and rook placement (open/semi-open files, the
//! 7th rank, connected rooks, rooks behind passed pawns).

use crate::board::state::Board;
use crate::board::types::{Bitboard, Color, PieceKind, Square};

const BISHOP_PAIR_BONUS: i32 = 30;
const BAD_BISHOP_PENALTY_PER_PAWN: i32 = -5;
const ROOK_OPEN_FILE_MG: i32 = 20;
const ROOK_SEMI_OPEN_FILE_MG: i32 = 10;
const ROOK_7TH_RANK_MG: i32 = 15;
const ROOK_7TH_RANK_EG: i32 = 25;
const ROOK_BEHIND_PASSER_BONUS: i32 = 20;
const CONNECTED_ROOKS_BONUS: i32 = 15;

const LIGHT_SQUARES: u64 = 0x55AA_55AA_55AA_55AA;

fn file_mask(file: u8) -> Bitboard {
    Bitboard::FILE_A << (file as u32)
}

fn seventh_rank_row(color: Color) -> u8 {
    match color {
        Color::White => 1,
        Color::Black => 6,
    }
}

#[must_use]
pub fn piece_term_score(board: &Board) -> (i32, i32) {
    let mut mg = 0i32;
    let mut eg = 0i32;

    for &color in &[Color::White, Color::Black] {
        let sign = if color == Color::White { 1 } else { -1 };
        let own_pawns = board.piece_bb(color, PieceKind::Pawn);
        let enemy_pawns = board.piece_bb(color.opposite(), PieceKind::Pawn);

        let bishops = board.piece_bb(color, PieceKind::Bishop);
        if bishops.popcount() >= 2 {
            mg += sign * BISHOP_PAIR_BONUS;
            eg += sign * BISHOP_PAIR_BONUS;
        }
        for bishop_sq in bishops {
            let is_light = Bitboard::from_square(bishop_sq).0 & LIGHT_SQUARES != 0;
            let same_color_pawns = own_pawns
                .iter()
                .filter(|&sq| (Bitboard::from_square(sq).0 & LIGHT_SQUARES != 0) == is_light)
                .count() as i32;
            mg += sign * BAD_BISHOP_PENALTY_PER_PAWN * same_color_pawns;
            eg += sign * BAD_BISHOP_PENALTY_PER_PAWN * same_color_pawns;
        }

        let rooks: Vec<Square> = board.piece_bb(color, PieceKind::Rook).iter().collect();
        for &rook_sq in &rooks {
            let file = file_mask(rook_sq.file());
            let own_pawn_on_file = !(file & own_pawns).is_empty();
            let enemy_pawn_on_file = !(file & enemy_pawns).is_empty();
            if !own_pawn_on_file && !enemy_pawn_on_file {
                mg += sign * ROOK_OPEN_FILE_MG;
            } else if !own_pawn_on_file {
                mg += sign * ROOK_SEMI_OPEN_FILE_MG;
            }

            if rook_sq.row() == seventh_rank_row(color) {
                mg += sign * ROOK_7TH_RANK_MG;
                eg += sign * ROOK_7TH_RANK_EG;
            }

            for passer in own_pawns.iter().filter(|&sq| sq.file() == rook_sq.file()) {
                let rook_behind = match color {
                    Color::White => rook_sq.row() > passer.row(),
                    Color::Black => rook_sq.row() < passer.row(),
                };
                if rook_behind && (passed_pawn_span_clear(passer, color, enemy_pawns)) {
                    mg += sign * ROOK_BEHIND_PASSER_BONUS / 2;
                    eg += sign * ROOK_BEHIND_PASSER_BONUS;
                }
            }
        }

        if rooks.len() == 2 && rooks[0].row() == rooks[1].row() {
            let (lo, hi) = if rooks[0].file() < rooks[1].file() {
                (rooks[0], rooks[1])
            } else {
                (rooks[1], rooks[0])
            };
            let between_empty = (lo.file() + 1..hi.file())
                .all(|f| !board.all_occupied().contains(Square::from_row_file(lo.row(), f)));
            if between_empty {
                mg += sign * CONNECTED_ROOKS_BONUS;
                eg += sign * CONNECTED_ROOKS_BONUS;
            }
        }
    }

    (mg, eg)
}

fn passed_pawn_span_clear(sq: Square, color: Color, enemy_pawns: Bitboard) -> bool {
    let files = [sq.file() as i8 - 1, sq.file() as i8, sq.file() as i8 + 1];
    let rows: Vec<u8> = match color {
        Color::White => (0..sq.row()).collect(),
        Color::Black => (sq.row() + 1..8).collect(),
    };
    for &f in &files {
        if !(0..8).contains(&f) {
            continue;
        }
        for &row in &rows {
            if enemy_pawns.contains(Square::from_row_file(row, f as u8)) {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bishop_pair_is_rewarded() {
        let pair = Board::from_fen("4k3/8/8/8/8/8/8/2B1KB2 w - - 0 1").unwrap();
        let single = Board::from_fen("4k3/8/8/8/8/8/8/3BK3 w - - 0 1").unwrap();
        let (pair_mg, _) = piece_term_score(&pair);
        let (single_mg, _) = piece_term_score(&single);
        assert!(pair_mg > single_mg);
    }
}
