//! Pawn-structure scoring: isolated/doubled/backward pawns, pawn islands,
//! and passed pawns. Keyed and cached in the pawn hash table since the
//! result only depends on the two pawn bitboards and the game phase.

use crate::board::state::Board;
use crate::board::types::{Bitboard, Color, PieceKind, Square};
use crate::pawn_hash::{PawnEntry, PawnHashTable};

const ISOLATED_PENALTY: i32 = -20;
const DOUBLED_PENALTY: i32 = -30;
const BACKWARD_PENALTY: i32 = -10;
const ISLAND_PENALTY: i32 = -8;

/// Passed-pawn bonus, linear in rank advancement (0 on the start rank, 6 one
/// step from promotion): `50 * advancement / 6` midgame, `100 * advancement / 6`
/// endgame.
fn passed_bonus(advancement: u8, max_bonus: i32) -> i32 {
    max_bonus * advancement.min(6) as i32 / 6
}

fn file_mask(file: u8) -> Bitboard {
    Bitboard::FILE_A << (file as u32)
}

fn adjacent_files_mask(file: u8) -> Bitboard {
    let mut mask = Bitboard::EMPTY;
    if file > 0 {
        mask |= file_mask(file - 1);
    }
    if file < 7 {
        mask |= file_mask(file + 1);
    }
    mask
}

/// Squares in front of `sq` (toward promotion) on its own file and the two
/// adjacent files, for `color`. A pawn is passed if no enemy pawn occupies
/// any of these squares.
fn passed_pawn_span(sq: Square, color: Color) -> Bitboard {
    let mut mask = Bitboard::EMPTY;
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
            mask = mask.with(Square::from_row_file(row, f as u8));
        }
    }
    mask
}

fn pawn_hash_key(white_pawns: Bitboard, black_pawns: Bitboard, phase: i32) -> u64 {
    fn mix(x: u64) -> u64 {
        let mut h = x;
        h ^= h >> 33;
        h = h.wrapping_mul(0xff51_afd7_ed55_8ccd);
        h ^= h >> 33;
        h = h.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
        h ^= h >> 33;
        h
    }
    mix(white_pawns.0) ^ mix(black_pawns.0) ^ (phase as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

fn compute(board: &Board) -> (i32, i32, Bitboard, Bitboard) {
    let mut mg = 0i32;
    let mut eg = 0i32;
    let mut white_passed = Bitboard::EMPTY;
    let mut black_passed = Bitboard::EMPTY;

    for &color in &[Color::White, Color::Black] {
        let own_pawns = board.piece_bb(color, PieceKind::Pawn);
        let enemy_pawns = board.piece_bb(color.opposite(), PieceKind::Pawn);
        let sign = if color == Color::White { 1 } else { -1 };

        let mut files_occupied = [0u32; 8];
        for sq in own_pawns {
            files_occupied[sq.file() as usize] += 1;
        }

        let mut islands = 0;
        let mut in_island = false;
        for count in files_occupied {
            if count > 0 && !in_island {
                islands += 1;
                in_island = true;
            } else if count == 0 {
                in_island = false;
            }
        }
        if islands > 1 {
            mg += sign * ISLAND_PENALTY * (islands - 1);
            eg += sign * ISLAND_PENALTY * (islands - 1);
        }

        for &count in &files_occupied {
            if count > 1 {
                mg += sign * DOUBLED_PENALTY * (count as i32 - 1);
                eg += sign * DOUBLED_PENALTY * (count as i32 - 1);
            }
        }

        for sq in own_pawns {
            let file = sq.file();
            if (adjacent_files_mask(file) & own_pawns).is_empty() {
                mg += sign * ISOLATED_PENALTY;
                eg += sign * ISOLATED_PENALTY;
            } else {
                let behind_on_adjacent = {
                    let span = match color {
                        Color::White => (sq.row() + 1..8).collect::<Vec<_>>(),
                        Color::Black => (0..sq.row()).collect::<Vec<_>>(),
                    };
                    let mut mask = Bitboard::EMPTY;
                    for &r in &span {
                        mask |= adjacent_files_mask(file) & Bitboard(0xFFu64 << (r * 8));
                    }
                    mask
                };
                if (behind_on_adjacent & own_pawns).is_empty() {
                    let stop = match color {
                        Color::White => sq.offset(-1, 0),
                        Color::Black => sq.offset(1, 0),
                    };
                    if let Some(stop_sq) = stop {
                        let enemy_attacks = crate::board::attack_tables::PAWN_ATTACKS
                            [color.opposite().index()][stop_sq.index()];
                        if !(enemy_attacks & enemy_pawns).is_empty() {
                            mg += sign * BACKWARD_PENALTY;
                            eg += sign * BACKWARD_PENALTY;
                        }
                    }
                }
            }

            if (passed_pawn_span(sq, color) & enemy_pawns).is_empty() {
                let rank_from_start = match color {
                    Color::White => 7 - sq.row(),
                    Color::Black => sq.row(),
                };
                mg += sign * passed_bonus(rank_from_start, 50);
                eg += sign * passed_bonus(rank_from_start, 100);
                match color {
                    Color::White => white_passed = white_passed.with(sq),
                    Color::Black => black_passed = black_passed.with(sq),
                }
            }
        }
    }

    (mg, eg, white_passed, black_passed)
}

#[must_use]
pub fn pawn_structure_score(board: &Board, pawn_hash: &PawnHashTable) -> (i32, i32) {
    let white_pawns = board.piece_bb(Color::White, PieceKind::Pawn);
    let black_pawns = board.piece_bb(Color::Black, PieceKind::Pawn);
    let key = pawn_hash_key(white_pawns, black_pawns, board.game_phase());

    if let Some(entry) = pawn_hash.probe(key) {
        return (entry.mg, entry.eg);
    }

    let (mg, eg, white_passed, black_passed) = compute(board);
    pawn_hash.store(
        key,
        PawnEntry {
            mg,
            eg,
            white_passed,
            black_passed,
        },
    );
    (mg, eg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubled_pawns_are_penalized() {
        let board = Board::from_fen("4k3/8/8/8/8/4P3/4P3/4K3 w - - 0 1").unwrap();
        let table = PawnHashTable::new(64);
        let (mg, _) = pawn_structure_score(&board, &table);
        assert!(mg < 0);
    }

    #[test]
    fn passed_pawn_is_rewarded() {
        let board = Board::from_fen("4k3/8/8/8/4P3/8/8/4K3 w - - 0 1").unwrap();
        let table = PawnHashTable::new(64);
        let (mg, _) = pawn_structure_score(&board, &table);
        assert!(mg > 0);
    }
}
