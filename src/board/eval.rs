//! Static evaluation: tapered material + piece-square tables, maintained
//! incrementally on the board, plus the non-incremental terms (mobility,
//! pawn structure, king safety, rook/bishop bonuses, endgame king activity)
//! computed fresh at each leaf.

use crate::board::eval_terms::{king_safety, mobility, pawns as pawn_terms, pieces as piece_terms};
use crate::board::pst::{pst_eg, pst_mg, MATERIAL_EG, MATERIAL_MG, PHASE_WEIGHTS, TOTAL_PHASE};
use crate::board::state::Board;
use crate::board::types::{Color, Move, Piece, PieceKind, Square};
use crate::pawn_hash::PawnHashTable;

#[must_use]
pub fn material_and_pst(piece: Piece, sq: Square) -> (i32, i32) {
    let kind = piece.kind();
    let color = piece.color();
    (
        MATERIAL_MG[kind.index()] + pst_mg(kind, color, sq),
        MATERIAL_EG[kind.index()] + pst_eg(kind, color, sq),
    )
}

/// Full from-scratch material+PST+phase computation, used when loading a
/// FEN (there's no previous incremental state to diff against).
#[must_use]
pub fn recompute_incremental(board: &Board) -> ([i32; 2], [i32; 2], i32) {
    let mut mg = [0i32; 2];
    let mut eg = [0i32; 2];
    let mut phase = 0i32;
    for &color in &[Color::White, Color::Black] {
        for kind in crate::board::types::PIECE_KINDS {
            for sq in board.piece_bb(color, kind) {
                let (m, e) = material_and_pst(Piece::new(color, kind), sq);
                mg[color.index()] += m;
                eg[color.index()] += e;
                phase += PHASE_WEIGHTS[kind.index()];
            }
        }
    }
    (mg, eg, phase)
}

/// Per-move incremental delta: `(mover_mg, mover_eg, enemy_mg, enemy_eg, phase)`.
/// Must be computed from the move description alone (the board has already
/// been mutated by the time this matters for unmake's saved snapshot).
#[must_use]
pub fn piece_eval_delta(mv: Move, captured: Option<Piece>, mover: Color) -> MoveEvalDelta {
    let piece = mv.piece();
    let source = mv.source();
    let target = mv.target();

    let (before_mg, before_eg) = material_and_pst(piece, source);
    let placed_piece = match mv.promotion() {
        Some(kind) => Piece::new(mover, kind),
        None => piece,
    };
    let (after_mg, after_eg) = material_and_pst(placed_piece, target);

    let mut mover_mg = after_mg - before_mg;
    let mut mover_eg = after_eg - before_eg;
    let mut phase_delta = 0i32;
    if let Some(kind) = mv.promotion() {
        phase_delta += PHASE_WEIGHTS[kind.index()] - PHASE_WEIGHTS[PieceKind::Pawn.index()];
    }

    if mv.is_castling() {
        let (rook_from, rook_to) = crate::board::movegen::castling_rook_squares(target, mover);
        let rook = Piece::new(mover, PieceKind::Rook);
        let (rf_mg, rf_eg) = material_and_pst(rook, rook_from);
        let (rt_mg, rt_eg) = material_and_pst(rook, rook_to);
        mover_mg += rt_mg - rf_mg;
        mover_eg += rt_eg - rf_eg;
    }

    let mut enemy_mg = 0;
    let mut enemy_eg = 0;
    if let Some(victim) = captured {
        let victim_sq = if mv.is_en_passant() {
            crate::board::movegen::en_passant_victim_square(target, mover)
        } else {
            target
        };
        let (vm, ve) = material_and_pst(victim, victim_sq);
        enemy_mg -= vm;
        enemy_eg -= ve;
        phase_delta -= PHASE_WEIGHTS[victim.kind().index()];
    }

    MoveEvalDelta {
        mover_mg,
        mover_eg,
        enemy_mg,
        enemy_eg,
        phase_delta,
    }
}

pub struct MoveEvalDelta {
    pub mover_mg: i32,
    pub mover_eg: i32,
    pub enemy_mg: i32,
    pub enemy_eg: i32,
    pub phase_delta: i32,
}

/// Full static evaluation from the side-to-move's perspective.
#[must_use]
pub fn evaluate(board: &Board, pawn_hash: &PawnHashTable) -> i32 {
    let phase = board.game_phase().clamp(0, TOTAL_PHASE);
    let (white_mg, white_eg) = board.incremental_eval(Color::White);
    let (black_mg, black_eg) = board.incremental_eval(Color::Black);

    let mut mg = white_mg - black_mg;
    let mut eg = white_eg - black_eg;

    let (pawn_mg, pawn_eg) = pawn_terms::pawn_structure_score(board, pawn_hash);
    mg += pawn_mg;
    eg += pawn_eg;

    let (mob_mg, mob_eg) = mobility::mobility_score(board);
    mg += mob_mg;
    eg += mob_eg;

    let (piece_mg, piece_eg) = piece_terms::piece_term_score(board);
    mg += piece_mg;
    eg += piece_eg;

    let king_mg = king_safety::king_safety_score(board);
    mg += king_mg;
    eg += king_safety::endgame_king_activity(board);

    let tapered = (mg * phase + eg * (TOTAL_PHASE - phase)) / TOTAL_PHASE;

    if board.side_to_move() == Color::White {
        tapered
    } else {
        -tapered
    }
}

/// Cheap evaluation that skips mobility/king-safety/pawn-structure terms;
/// used as a first-pass guardrail before falling back to the full
/// evaluation inside quiescence search.
#[must_use]
pub fn evaluate_lazy(board: &Board) -> i32 {
    let phase = board.game_phase().clamp(0, TOTAL_PHASE);
    let (white_mg, white_eg) = board.incremental_eval(Color::White);
    let (black_mg, black_eg) = board.incremental_eval(Color::Black);
    let mg = white_mg - black_mg;
    let eg = white_eg - black_eg;
    let tapered = (mg * phase + eg * (TOTAL_PHASE - phase)) / TOTAL_PHASE;
    if board.side_to_move() == Color::White {
        tapered
    } else {
        -tapered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_is_balanced() {
        let board = Board::startpos();
        let table = PawnHashTable::new(64);
        assert_eq!(evaluate(&board, &table), 0);
    }

    #[test]
    fn color_swap_is_antisymmetric() {
        let white_up =
            Board::from_fen("4k3/8/8/8/8/8/4Q3/4K3 w - - 0 1").unwrap();
        let black_up =
            Board::from_fen("4k3/4q3/8/8/8/8/8/4K3 b - - 0 1").unwrap();
        let table = PawnHashTable::new(64);
        assert_eq!(evaluate(&white_up, &table), evaluate(&black_up, &table));
    }
}
