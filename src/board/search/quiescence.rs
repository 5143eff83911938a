//! Quiescence search: extends the main search past the horizon along
//! capture lines only, so the static evaluation is never taken in a
//! position where a piece is hanging.

use crate::board::eval::{evaluate, evaluate_lazy};
use crate::board::movegen::generate_legal;
use crate::board::search::constants::{
    DELTA_MARGIN, LAZY_EVAL_GUARDRAIL, MATE_THRESHOLD, MAX_QSEARCH_DEPTH, SCORE_INFINITE,
    SEE_MEDIUM_DEPTH, SEE_SHALLOW_DEPTH, SEE_THRESHOLD_DEEP, SEE_THRESHOLD_MEDIUM,
    SEE_THRESHOLD_SHALLOW,
};
use crate::board::search::SearchContext;
use crate::board::see::see;

fn see_threshold_for_depth(qdepth: i32) -> i32 {
    if qdepth <= SEE_SHALLOW_DEPTH {
        SEE_THRESHOLD_SHALLOW
    } else if qdepth <= SEE_MEDIUM_DEPTH {
        SEE_THRESHOLD_MEDIUM
    } else {
        SEE_THRESHOLD_DEEP
    }
}

pub fn quiesce(ctx: &mut SearchContext, mut alpha: i32, beta: i32, qdepth: i32) -> i32 {
    ctx.stats.nodes += 1;
    if ctx.should_stop() {
        return 0;
    }

    let in_check = ctx.board.in_check(ctx.board.side_to_move());

    if in_check {
        let mut moves = generate_legal(ctx.board);
        if moves.is_empty() {
            return -(MATE_THRESHOLD + MAX_QSEARCH_DEPTH - qdepth);
        }
        ctx.order_quiescence_moves(&mut moves);
        let mut best = -SCORE_INFINITE;
        for mv in moves {
            let info = ctx.board.make_move(mv);
            let score = -quiesce(ctx, -beta, -alpha, qdepth + 1);
            ctx.board.unmake_move(mv, info);
            if score > best {
                best = score;
                if score > alpha {
                    alpha = score;
                }
            }
            if alpha >= beta {
                break;
            }
        }
        return best;
    }

    let lazy = evaluate_lazy(ctx.board);
    let full_needed = lazy.abs_diff(0) < (MATE_THRESHOLD as u32)
        && (lazy - LAZY_EVAL_GUARDRAIL < beta && lazy + LAZY_EVAL_GUARDRAIL > alpha);
    let stand_pat = if full_needed {
        evaluate(ctx.board, &ctx.shared.pawn_hash)
    } else {
        lazy
    };

    if stand_pat >= beta {
        return stand_pat;
    }
    if stand_pat > alpha {
        alpha = stand_pat;
    }

    if qdepth >= MAX_QSEARCH_DEPTH {
        return stand_pat;
    }

    let mut moves = generate_legal(ctx.board);
    moves.retain(|mv| mv.is_tactical());
    ctx.order_quiescence_moves(&mut moves);

    let see_threshold = see_threshold_for_depth(qdepth);
    let mut best = stand_pat;

    for mv in moves {
        if mv.promotion().is_none() {
            let gain = crate::board::see::SEE_VALUES[ctx
                .board
                .piece_at(mv.target())
                .map(|p| p.kind())
                .unwrap_or(crate::board::types::PieceKind::Pawn)
                .index()];
            if stand_pat + gain + DELTA_MARGIN < alpha {
                continue;
            }
        }
        if see(ctx.board, mv) < see_threshold {
            continue;
        }

        let info = ctx.board.make_move(mv);
        let score = -quiesce(ctx, -beta, -alpha, qdepth + 1);
        ctx.board.unmake_move(mv, info);

        if score > best {
            best = score;
            if score > alpha {
                alpha = score;
            }
        }
        if alpha >= beta {
            break;
        }
    }

    best
}
