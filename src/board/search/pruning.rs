//! Pre-move-loop pruning: reverse futility, null-move, and ProbCut. Each
//! returns `Some(score)` when the node can be cut immediately.

use crate::board::movegen::generate_legal_tactical;
use crate::board::search::constants::*;
use crate::board::search::negamax::negamax;
use crate::board::search::move_order::order_score;
use crate::board::search::SearchContext;
use crate::board::see::see_ge;
use crate::board::types::NULL_MOVE;

pub fn try_reverse_futility(
    ctx: &mut SearchContext,
    depth: i32,
    beta: i32,
    static_eval: i32,
) -> Option<i32> {
    if depth > RFP_MAX_DEPTH || beta.abs() >= SCORE_NEAR_MATE {
        return None;
    }
    let margin = RFP_MARGIN_PER_PLY * depth;
    if static_eval - margin >= beta {
        Some(beta)
    } else {
        None
    }
}

pub fn try_null_move(
    ctx: &mut SearchContext,
    depth: i32,
    ply: i32,
    beta: i32,
    static_eval: i32,
) -> Option<i32> {
    if depth < NULL_MOVE_MIN_DEPTH || ctx.board.game_phase() == 0 || static_eval < beta {
        return None;
    }
    let reduction = NULL_MOVE_BASE_REDUCTION + depth / NULL_MOVE_DEPTH_DIVISOR;
    let info = ctx.board.make_null_move();
    ctx.prev_move[ply as usize] = NULL_MOVE;
    let score = -negamax(ctx, depth - 1 - reduction, ply + 1, -beta, -beta + 1, false);
    ctx.board.unmake_null_move(info);

    if ctx.shared.stopped() {
        return None;
    }
    if score >= beta {
        Some(beta)
    } else {
        None
    }
}

pub fn try_probcut(ctx: &mut SearchContext, depth: i32, ply: i32, beta: i32) -> Option<i32> {
    if depth < PROBCUT_MIN_DEPTH || beta.abs() >= SCORE_NEAR_MATE {
        return None;
    }
    let probcut_beta = beta + PROBCUT_MARGIN;
    let mut tacticals = generate_legal_tactical(ctx.board);
    if tacticals.is_empty() {
        return None;
    }
    let board = &*ctx.board;
    let tables = &*ctx.tables;
    tacticals.sort_by_cached_key(|&mv| -order_score(board, tables, mv, ply as usize, NULL_MOVE, NULL_MOVE));

    for mv in tacticals {
        if !see_ge(ctx.board, mv, 0) {
            continue;
        }
        let info = ctx.board.make_move(mv);
        let score = -negamax(
            ctx,
            depth - PROBCUT_DEPTH_REDUCTION,
            ply + 1,
            -probcut_beta,
            -probcut_beta + 1,
            false,
        );
        ctx.board.unmake_move(mv, info);
        if ctx.shared.stopped() {
            return None;
        }
        if score >= probcut_beta {
            return Some(score);
        }
    }
    None
}
