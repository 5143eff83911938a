//! Invariant checks on the board representation itself: make/unmake must be
//! a perfect inverse, and the occupancy bitboards must always agree with
//! per-square piece lookup.

use corvid::board::movegen::generate_legal;
use corvid::board::Board;
use proptest::prelude::*;

fn play_random_line(board: &mut Board, rng_seed: u64, plies: usize) -> Vec<(corvid::board::Move, corvid::board::UnmakeInfo)> {
    let mut history = Vec::new();
    let mut state = rng_seed;
    for _ in 0..plies {
        let moves = generate_legal(board);
        if moves.is_empty() {
            break;
        }
        // xorshift64 so the test stays deterministic across proptest shrinking.
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        let choice = &moves[(state as usize) % moves.len()];
        let info = board.make_move(*choice);
        history.push((*choice, info));
    }
    history
}

fn occupancy_matches_piece_lookup(board: &Board) {
    let occupied = board.all_occupied();
    for sq_index in 0..64u8 {
        let sq = corvid::board::Square::from_row_file(sq_index / 8, sq_index % 8);
        let bit_set = (occupied.0 >> sq_index) & 1 == 1;
        let piece_present = board.piece_at(sq).is_some();
        assert_eq!(bit_set, piece_present, "occupancy/piece_at disagree at {sq}");
    }
}

#[test]
fn startpos_occupancy_matches_piece_lookup() {
    occupancy_matches_piece_lookup(&Board::startpos());
}

proptest! {
    #[test]
    fn make_unmake_is_a_perfect_inverse(seed in any::<u64>(), plies in 1usize..12) {
        let mut board = Board::startpos();
        let before_fen = board.to_fen();
        let before_hash = board.hash();

        let history = play_random_line(&mut board, seed, plies);
        occupancy_matches_piece_lookup(&board);

        for (mv, info) in history.into_iter().rev() {
            board.unmake_move(mv, info);
        }

        prop_assert_eq!(board.to_fen(), before_fen);
        prop_assert_eq!(board.hash(), before_hash);
    }

    #[test]
    fn occupancy_stays_coherent_along_random_lines(seed in any::<u64>(), plies in 1usize..16) {
        let mut board = Board::startpos();
        play_random_line(&mut board, seed, plies);
        occupancy_matches_piece_lookup(&board);
    }
}
