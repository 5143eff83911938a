//! Iterative deepening driver: aspiration windows around each iteration's
//! score, time-based stopping, and PV extraction for UCI `info` output.

use std::sync::Arc;
use std::time::Instant;

use crate::board::movegen::generate_legal;
use crate::board::pst::TOTAL_PHASE;
use crate::board::search::constants::{MATE_THRESHOLD, SCORE_INFINITE};
use crate::board::search::move_order::SearchTables;
use crate::board::search::negamax::negamax;
use crate::board::search::{SearchContext, SearchResult, SharedSearchState};
use crate::board::state::Board;
use crate::board::types::MoveList;
use std::time::Duration;

pub type SearchInfoCallback = Arc<dyn Fn(&SearchIterationInfo) + Send + Sync>;

#[derive(Clone, Debug)]
pub struct SearchIterationInfo {
    pub depth: i32,
    pub seldepth: i32,
    pub score: i32,
    pub mate_in: Option<i32>,
    pub nodes: u64,
    pub time_ms: u64,
    pub nps: u64,
    pub pv: MoveList,
    pub hashfull: u32,
}

fn extract_pv(board: &mut Board, shared: &SharedSearchState, max_len: usize) -> MoveList {
    let mut pv = Vec::with_capacity(max_len);
    let mut undo = Vec::with_capacity(max_len);
    for _ in 0..max_len {
        let Some(entry) = shared.tt.probe(board.hash()) else {
            break;
        };
        if entry.best_move.is_null() {
            break;
        }
        let legal = generate_legal(board);
        if !legal.contains(&entry.best_move) {
            break;
        }
        let info = board.make_move(entry.best_move);
        undo.push((entry.best_move, info));
        pv.push(entry.best_move);
    }
    for (mv, info) in undo.into_iter().rev() {
        board.unmake_move(mv, info);
    }
    pv
}

const ASPIRATION_WINDOW: i32 = 50;
const ASPIRATION_FULL_THRESHOLD: i32 = 900;
const EASY_MOVE_STABLE_DEPTHS: i32 = 3;
const EASY_MOVE_SCORE_SWING: i32 = 30;
const EASY_MOVE_BUDGET_FRACTION: f64 = 0.4;
const REWIDEN_BUDGET_FRACTION: f64 = 0.7;

const LATE_START_BUDGET_FRACTION: f64 = 0.55;
const SHORT_BUDGET_MS: u128 = 2_000;
const MEDIUM_BUDGET_MS: u128 = 10_000;
const MIN_DEPTH_SHORT_BUDGET: i32 = 3;
const MIN_DEPTH_MEDIUM_BUDGET: i32 = 4;
const MIN_DEPTH_LONG_BUDGET: i32 = 5;
const ENDGAME_PHASE_THRESHOLD: i32 = TOTAL_PHASE / 4;

/// `min_depth` below which a new iteration always starts regardless of
/// elapsed budget, scaled to how much time this move has to begin with.
fn min_depth_for_budget(total_budget: Duration) -> i32 {
    let ms = total_budget.as_millis();
    if ms < SHORT_BUDGET_MS {
        MIN_DEPTH_SHORT_BUDGET
    } else if ms < MEDIUM_BUDGET_MS {
        MIN_DEPTH_MEDIUM_BUDGET
    } else {
        MIN_DEPTH_LONG_BUDGET
    }
}

/// Re-searches at `depth` with a widening aspiration window around `guess`
/// until the score lands inside the window or the window goes full. Returns
/// `None` if the search was stopped mid-window.
fn aspiration_search(
    board: &mut Board,
    shared: &SharedSearchState,
    tables: &mut SearchTables,
    depth: i32,
    guess: i32,
    start_time: Instant,
    total_budget: std::time::Duration,
) -> Option<i32> {
    if depth <= 2 {
        let mut ctx = SearchContext::new(board, shared, tables, depth);
        let s = negamax(&mut ctx, depth, 0, -SCORE_INFINITE, SCORE_INFINITE, true);
        shared
            .total_nodes
            .fetch_add(ctx.stats.nodes, std::sync::atomic::Ordering::Relaxed);
        return if shared.stopped() { None } else { Some(s) };
    }

    let mut delta = ASPIRATION_WINDOW;
    let mut alpha = (guess - delta).max(-SCORE_INFINITE);
    let mut beta = (guess + delta).min(SCORE_INFINITE);

    loop {
        let mut ctx = SearchContext::new(board, shared, tables, depth);
        let s = negamax(&mut ctx, depth, 0, alpha, beta, true);
        shared
            .total_nodes
            .fetch_add(ctx.stats.nodes, std::sync::atomic::Ordering::Relaxed);
        if shared.stopped() {
            return None;
        }
        if s > alpha && s < beta {
            return Some(s);
        }

        if total_budget.as_millis() > 0
            && start_time.elapsed().as_secs_f64() / total_budget.as_secs_f64()
                >= REWIDEN_BUDGET_FRACTION
        {
            return Some(s);
        }

        if delta >= ASPIRATION_FULL_THRESHOLD {
            alpha = -SCORE_INFINITE;
            beta = SCORE_INFINITE;
            continue;
        }
        delta *= 3;
        if s <= alpha {
            alpha = (guess - delta).max(-SCORE_INFINITE);
        } else {
            beta = (guess + delta).min(SCORE_INFINITE);
        }
    }
}

/// Runs iterative deepening to `max_depth` (or until the shared deadline /
/// stop flag fires), returning the best move found at the deepest
/// completed iteration.
#[allow(clippy::too_many_arguments)]
pub fn search_single_thread(
    board: &mut Board,
    shared: &SharedSearchState,
    tables: &mut SearchTables,
    max_depth: i32,
    start_depth: i32,
    start_time: Instant,
    mut on_iteration: Option<impl FnMut(&SearchIterationInfo)>,
) -> SearchResult {
    let mut result = SearchResult::default();
    let legal = generate_legal(board);
    if legal.is_empty() {
        return result;
    }
    if legal.len() == 1 {
        result.best_move = legal[0];
        return result;
    }

    let total_budget = shared.soft_stop_at.saturating_duration_since(start_time);
    let mut score = 0;
    let mut depth = start_depth.max(1);
    let mut stable_depths = 0;
    let mut last_best = crate::board::types::NULL_MOVE;
    let mut prev_score = 0;

    while depth <= max_depth {
        if depth > min_depth_for_budget(total_budget) && total_budget.as_millis() > 0 {
            let budget_used = start_time.elapsed().as_secs_f64() / total_budget.as_secs_f64();
            if budget_used >= LATE_START_BUDGET_FRACTION {
                break;
            }
        }

        // Late endgames are sharper and shallower in branching, so a depth
        // that's cheap in the midgame still has budget to spare here.
        let search_depth = if board.game_phase() < ENDGAME_PHASE_THRESHOLD {
            depth + 1
        } else {
            depth
        };

        tables.age();
        let Some(iteration_score) = aspiration_search(
            board,
            shared,
            tables,
            search_depth,
            score,
            start_time,
            total_budget,
        ) else {
            break;
        };

        prev_score = score;
        score = iteration_score;
        let pv = extract_pv(board, shared, search_depth.max(1) as usize);
        if let Some(&mv) = pv.first() {
            if mv == last_best {
                stable_depths += 1;
            } else {
                stable_depths = 1;
                last_best = mv;
            }
            result.best_move = mv;
            result.score = score;
        }

        if let Some(cb) = on_iteration.as_mut() {
            let elapsed = start_time.elapsed();
            let nodes = shared.total_nodes.load(std::sync::atomic::Ordering::Relaxed);
            let info = SearchIterationInfo {
                depth: search_depth,
                seldepth: shared.seldepth(),
                score,
                mate_in: if score.abs() >= MATE_THRESHOLD {
                    Some(((SCORE_INFINITE - score.abs() + 1) / 2) * score.signum())
                } else {
                    None
                },
                nodes,
                time_ms: elapsed.as_millis() as u64,
                nps: if elapsed.as_millis() > 0 {
                    nodes * 1000 / elapsed.as_millis() as u64
                } else {
                    0
                },
                pv,
                hashfull: shared.tt.hashfull_per_mille(),
            };
            cb(&info);
        }

        if score.abs() >= MATE_THRESHOLD {
            break;
        }
        if Instant::now() >= shared.soft_stop_at {
            break;
        }
        if total_budget.as_millis() > 0 {
            let budget_used = start_time.elapsed().as_secs_f64() / total_budget.as_secs_f64();
            if stable_depths >= EASY_MOVE_STABLE_DEPTHS
                && score.abs() < MATE_THRESHOLD
                && (score - prev_score).abs() < EASY_MOVE_SCORE_SWING
                && budget_used >= EASY_MOVE_BUDGET_FRACTION
            {
                break;
            }
        }
        depth += 1;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pawn_hash::PawnHashTable;
    use crate::tt::TranspositionTable;
    use std::sync::Arc;
    use std::time::Duration;

    fn shared_for_test(budget: Duration) -> SharedSearchState {
        let mut s = SharedSearchState::new(
            Arc::new(TranspositionTable::new(1)),
            Arc::new(PawnHashTable::new(64)),
        );
        s.hard_stop_at = Instant::now() + budget;
        s.soft_stop_at = s.hard_stop_at;
        s
    }

    #[test]
    fn single_legal_move_returns_immediately() {
        let mut board = Board::from_fen("7k/8/8/8/8/8/8/K6R w - - 0 1").unwrap();
        let shared = shared_for_test(Duration::from_secs(2));
        let mut tables = SearchTables::new();
        let result = search_single_thread(
            &mut board,
            &shared,
            &mut tables,
            10,
            1,
            Instant::now(),
            None::<fn(&SearchIterationInfo)>,
        );
        assert!(!result.best_move.is_null());
    }

    #[test]
    fn finds_mate_in_one_via_iterative_deepening() {
        let mut board = Board::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
        let shared = shared_for_test(Duration::from_secs(5));
        let mut tables = SearchTables::new();
        let result = search_single_thread(
            &mut board,
            &shared,
            &mut tables,
            4,
            1,
            Instant::now(),
            None::<fn(&SearchIterationInfo)>,
        );
        assert!(result.score > crate::board::search::constants::MATE_THRESHOLD);
    }
}
