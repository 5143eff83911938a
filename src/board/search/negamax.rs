//! The negamax core: alpha-beta search over the legal move tree with PVS,
//! null-move/ProbCut/reverse-futility pruning, internal iterative
//! reduction, singular extensions, check extensions, late-move reductions,
//! and TT-backed move ordering.

use crate::board::movegen::{generate_legal, gives_check};
use crate::board::search::constants::*;
use crate::board::search::move_order::{order_score, update_quiet_move_heuristics};
use crate::board::search::pruning::{try_null_move, try_probcut, try_reverse_futility};
use crate::board::search::quiescence::quiesce;
use crate::board::search::SearchContext;
use crate::board::types::{Move, MAX_PLY, NULL_MOVE};
use crate::tt::{mate_folding, Bound, TtEntry};

#[derive(Clone, Copy, Debug, Default)]
pub struct SearchResult {
    pub best_move: Move,
    pub score: i32,
}

fn mate_distance_clamp(alpha: i32, beta: i32, ply: i32) -> (i32, i32, bool) {
    let alpha = alpha.max(-SCORE_INFINITE + ply);
    let beta = beta.min(SCORE_INFINITE - ply - 1);
    (alpha, beta, alpha >= beta)
}

fn lmr_reduction(depth: i32, move_index: i32) -> i32 {
    if depth <= 1 || move_index <= 0 {
        return 0;
    }
    let d = (depth as f64).ln();
    let m = (move_index as f64).ln();
    let reduction = (1.0 + d * m / 2.5).floor() as i32;
    reduction.clamp(0, depth - 2).max(0)
}

#[allow(clippy::too_many_arguments)]
pub fn negamax(
    ctx: &mut SearchContext,
    mut depth: i32,
    ply: i32,
    mut alpha: i32,
    mut beta: i32,
    is_pv: bool,
) -> i32 {
    ctx.stats.nodes += 1;
    ctx.shared.update_seldepth(ply);
    if ctx.stats.seldepth < ply {
        ctx.stats.seldepth = ply;
    }

    if depth <= 0 {
        return quiesce(ctx, alpha, beta, 0);
    }
    if ctx.should_stop() {
        return 0;
    }

    if ply as usize >= MAX_PLY - 1 {
        return crate::board::eval::evaluate(ctx.board, &ctx.shared.pawn_hash);
    }

    let excluded = ctx.board.excluded_move();
    if ply > 0 {
        if ctx.board.is_repetition() || ctx.board.is_fifty_move_draw() || ctx.board.is_insufficient_material() {
            return 0;
        }
        let (new_alpha, new_beta, cutoff) = mate_distance_clamp(alpha, beta, ply);
        alpha = new_alpha;
        beta = new_beta;
        if cutoff {
            return alpha;
        }
    }

    let hash = ctx.board.hash();
    let in_check = ctx.board.in_check(ctx.board.side_to_move());

    let tt_entry = if excluded.is_null() {
        ctx.shared.tt.probe(hash)
    } else {
        None
    };
    let mut tt_move = NULL_MOVE;
    if let Some(entry) = tt_entry {
        tt_move = entry.best_move;
        if entry.depth as i32 >= depth && ply > 0 {
            let score = mate_folding::retrieve(entry.score, ply);
            let usable = match entry.bound {
                Bound::Exact => true,
                Bound::Lower => score >= beta,
                Bound::Upper => score <= alpha,
            };
            if usable && !is_pv {
                return score;
            }
        }
    }

    let static_eval = if in_check {
        -SCORE_INFINITE
    } else {
        crate::board::eval::evaluate(ctx.board, &ctx.shared.pawn_hash)
    };
    ctx.static_eval[ply as usize] = static_eval;

    let pruning_allowed = !is_pv && !in_check && excluded.is_null();

    if pruning_allowed {
        if let Some(score) = try_reverse_futility(ctx, depth, beta, static_eval) {
            return score;
        }
        if let Some(score) = try_null_move(ctx, depth, ply, beta, static_eval) {
            return score;
        }
        if let Some(score) = try_probcut(ctx, depth, ply, beta) {
            return score;
        }
    }

    if tt_move.is_null() && depth >= IIR_MIN_DEPTH && excluded.is_null() {
        depth -= 1;
    }

    let singular_candidate = !is_pv
        && excluded.is_null()
        && depth >= SINGULAR_MIN_DEPTH
        && !tt_move.is_null()
        && tt_entry.map(|e| e.depth as i32 >= depth - 3 && e.bound != Bound::Upper).unwrap_or(false);

    let mut moves = generate_legal(ctx.board);
    if moves.is_empty() {
        return if in_check { -(SCORE_INFINITE - ply) } else { 0 };
    }

    let prev_move = if ply > 0 { ctx.prev_move[ply as usize - 1] } else { NULL_MOVE };
    {
        let board = &*ctx.board;
        let tables = &*ctx.tables;
        moves.sort_by_cached_key(|&mv| {
            if mv == excluded {
                return i32::MAX;
            }
            -order_score(board, tables, mv, ply as usize, tt_move, prev_move)
        });
    }
    if !excluded.is_null() {
        moves.retain(|&mv| mv != excluded);
    }

    let mut best_score = -SCORE_INFINITE;
    let mut best_move = NULL_MOVE;
    let mut alpha_raised = false;
    let mut failed_quiets: Vec<Move> = Vec::with_capacity(moves.len());
    let move_count = moves.len() as i32;

    for (idx, &mv) in moves.iter().enumerate() {
        let mut extension = 0;
        if in_check {
            extension = 1;
        } else if singular_candidate && mv == tt_move {
            let tt_score = tt_entry.map(|e| mate_folding::retrieve(e.score, ply)).unwrap_or(0);
            let singular_beta = tt_score - SINGULAR_MARGIN_PER_PLY * depth;
            let singular_depth = (depth - 1) / 2;
            let guard_move = mv;
            ctx.board.set_excluded_move(guard_move);
            let score = negamax(ctx, singular_depth, ply, singular_beta - 1, singular_beta, false);
            ctx.board.set_excluded_move(Move::default());
            if score < singular_beta {
                extension = 1;
            }
        }

        let gives_check_flag = !in_check && gives_check(ctx.board, mv);
        let is_quiet = mv.is_quiet();

        let mut reduction = 0;
        if is_quiet
            && !in_check
            && !gives_check_flag
            && !is_pv
            && depth > 2
            && idx as i32 > 1
            && order_score(ctx.board, ctx.tables, mv, ply as usize, tt_move, prev_move) < 0
        {
            reduction = lmr_reduction(depth, idx as i32);
        }

        let info = ctx.board.make_move(mv);
        ctx.prev_move[ply as usize] = mv;

        let score = if idx == 0 {
            -negamax(ctx, depth - 1 + extension, ply + 1, -beta, -alpha, is_pv)
        } else {
            let reduced_depth = (depth - 1 + extension - reduction).max(0);
            let mut s = -negamax(ctx, reduced_depth, ply + 1, -alpha - 1, -alpha, false);
            if s > alpha && (reduction > 0 || is_pv) {
                s = -negamax(ctx, depth - 1 + extension, ply + 1, -beta, -alpha, is_pv && s < beta);
            }
            s
        };

        ctx.board.unmake_move(mv, info);

        if ctx.shared.stopped() {
            return 0;
        }

        if score > best_score {
            best_score = score;
            best_move = mv;
        }
        if score > alpha {
            alpha = score;
            alpha_raised = true;
        }
        if alpha >= beta {
            if is_quiet {
                update_quiet_move_heuristics(
                    ctx.tables,
                    ply as usize,
                    mv,
                    prev_move,
                    &failed_quiets,
                    depth,
                );
            } else if let Some(victim) = ctx.board.piece_at(mv.target()) {
                ctx.tables
                    .update_capture_history(mv.piece().kind(), victim.kind(), depth * depth);
            }
            best_score = beta;
            break;
        }
        if is_quiet {
            failed_quiets.push(mv);
        }
    }

    if excluded.is_null() {
        let bound = if best_score >= beta {
            Bound::Lower
        } else if alpha_raised {
            Bound::Exact
        } else {
            Bound::Upper
        };
        ctx.shared.tt.store(
            hash,
            TtEntry {
                score: mate_folding::store(best_score, ply),
                depth: depth.max(0) as u8,
                bound,
                best_move,
                generation: ctx.shared.generation,
            },
        );
    }

    let _ = move_count;
    best_score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::search::{SearchParams, SearchTables, SharedSearchState};
    use crate::board::state::Board;
    use crate::pawn_hash::PawnHashTable;
    use crate::tt::TranspositionTable;
    use std::sync::Arc;

    fn shared_for_test() -> SharedSearchState {
        let mut s = SharedSearchState::new(
            Arc::new(TranspositionTable::new(1)),
            Arc::new(PawnHashTable::new(64)),
        );
        s.hard_stop_at = std::time::Instant::now() + std::time::Duration::from_secs(5);
        s.soft_stop_at = s.hard_stop_at;
        s
    }

    #[test]
    fn finds_mate_in_one() {
        let mut board = Board::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
        let shared = shared_for_test();
        let mut tables = SearchTables::new();
        let mut ctx = SearchContext::new(&mut board, &shared, &mut tables, 3);
        let score = negamax(&mut ctx, 3, 0, -SCORE_INFINITE, SCORE_INFINITE, true);
        assert!(score > MATE_THRESHOLD);
        let _ = SearchParams::default();
    }
}
