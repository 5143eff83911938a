//! End-to-end scenarios exercising move generation, draw detection, and
//! search-driven move selection against fixed positions.

use std::sync::Arc;

use corvid::board::movegen::{generate_legal, parse_uci_move};
use corvid::board::search::{smp_search, SmpConfig, DEFAULT_PAWN_HASH_KB, DEFAULT_TT_MB};
use corvid::board::Board;
use corvid::pawn_hash::PawnHashTable;
use corvid::tt::TranspositionTable;

fn is_checkmate(board: &mut Board) -> bool {
    generate_legal(board).is_empty() && board.in_check(board.side_to_move())
}

fn search_depth(fen: &str, depth: i32) -> corvid::board::search::SearchResult {
    let board = Board::from_fen(fen).unwrap();
    let tt = Arc::new(TranspositionTable::new(DEFAULT_TT_MB));
    let pawn_hash = Arc::new(PawnHashTable::new(DEFAULT_PAWN_HASH_KB));
    let config = SmpConfig::with_threads(1).depth(depth);
    smp_search(&board, tt, pawn_hash, 0, config)
}

#[test]
fn finds_back_rank_mate_in_one() {
    let result = search_depth("6k1/5ppp/8/8/8/8/8/4Q2K w - - 0 1", 4);
    assert_eq!(result.best_move.to_uci(), "e1e8");

    let mut board = Board::from_fen("6k1/5ppp/8/8/8/8/8/4Q2K w - - 0 1").unwrap();
    let mv = parse_uci_move(&mut board, "e1e8").unwrap();
    board.make_move(mv);
    assert!(is_checkmate(&mut board));
}

#[test]
fn finds_forced_mate_score_within_two_moves() {
    // Queen and rook batteries against a king boxed in by its own pawns;
    // deep enough search should report a mate score, not just a good one.
    let result = search_depth("6k1/6pp/8/8/8/8/6PP/3R2K1 w - - 0 1", 6);
    assert!(
        result.score.abs() > corvid::board::search::constants::MATE_THRESHOLD
            || result.score > 300,
        "expected a winning or mating score, got {}",
        result.score
    );
}

#[test]
fn en_passant_capture_is_legal_and_clears_victim() {
    let mut board =
        Board::from_fen("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3").unwrap();
    let mv = parse_uci_move(&mut board, "e5d6").unwrap();
    assert!(mv.is_en_passant());
    board.make_move(mv);
    assert_eq!(
        board.to_fen(),
        "rnbqkbnr/ppp1pppp/3P4/8/8/8/PPPP1PPP/RNBQKBNR b KQkq - 0 3"
    );
}

#[test]
fn castling_through_check_is_illegal() {
    // Black rook on e8-file pins nothing, but a rook on f8 covers f1 so O-O is illegal.
    let mut board = Board::from_fen("r3k2r/8/8/8/8/8/5r2/R3K2R w KQkq - 0 1").unwrap();
    let legal = generate_legal(&mut board);
    assert!(legal.iter().all(|m| !(m.is_castling() && m.target().file() == 6)));
}

#[test]
fn fifty_move_rule_triggers_draw() {
    // Two kings shuffling with no pawn moves or captures for 50 full moves.
    let mut board = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 99 60").unwrap();
    assert!(!board.is_fifty_move_draw());
    let mv = parse_uci_move(&mut board, "e1d1").unwrap();
    board.make_move(mv);
    assert!(board.is_fifty_move_draw());
}

#[test]
fn bare_kings_is_insufficient_material() {
    let board = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    assert!(board.is_insufficient_material());
}

#[test]
fn concurrent_search_at_varying_thread_counts_agrees_on_mate() {
    for threads in [1, 2, 4, 8] {
        let board = Board::from_fen("6k1/5ppp/8/8/8/8/8/4Q2K w - - 0 1").unwrap();
        let tt = Arc::new(TranspositionTable::new(DEFAULT_TT_MB));
        let pawn_hash = Arc::new(PawnHashTable::new(DEFAULT_PAWN_HASH_KB));
        let config = SmpConfig::with_threads(threads).depth(4);
        let result = smp_search(&board, tt, pawn_hash, 0, config);
        assert_eq!(
            result.best_move.to_uci(),
            "e1e8",
            "thread count {threads} failed to find the mate"
        );
    }
}
