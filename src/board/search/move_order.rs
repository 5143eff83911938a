//! Move ordering: history/killer/counter-move heuristics and the scoring
//! function that turns them into a single sort key per move.
//!
//! History-family tables use gravity-scaled updates (`h += bonus -
//! h*bonus/HISTORY_MAX`) rather than a flat additive bonus, so a table
//! entry asymptotically approaches its bound instead of drifting off
//! without limit over a long search.

use crate::board::search::constants::{
    CAPTURE_HISTORY_MAX, COUNTER_SCORE, HISTORY_MAX, KILLER1_SCORE, KILLER2_SCORE, NUM_KILLERS,
    SEE_LOSING_CAPTURE_SCORE, SEE_WINNING_CAPTURE_SCORE, TT_MOVE_SCORE,
};
use crate::board::state::Board;
use crate::board::types::{Move, PieceKind, MAX_PLY, NULL_MOVE};

fn history_index(mv: Move) -> usize {
    mv.source().index() * 64 + mv.target().index()
}

fn gravity_update(current: i32, bonus: i32, max: i32) -> i32 {
    let decayed = bonus - current * bonus.abs() / max;
    (current + decayed).clamp(-max, max)
}

pub struct SearchTables {
    history: Box<[i32; 4096]>,
    capture_history: Box<[[i32; 6]; 6]>,
    killers: Box<[[Move; NUM_KILLERS]; MAX_PLY]>,
    counters: Box<[[Move; 64]; 12]>,
    continuation: Box<[[i32; 4096]; 12]>,
}

impl SearchTables {
    #[must_use]
    pub fn new() -> SearchTables {
        SearchTables {
            history: Box::new([0; 4096]),
            capture_history: Box::new([[0; 6]; 6]),
            killers: Box::new([[NULL_MOVE; NUM_KILLERS]; MAX_PLY]),
            counters: Box::new([[NULL_MOVE; 64]; 12]),
            continuation: Box::new([[0; 4096]; 12]),
        }
    }

    pub fn clear(&mut self) {
        self.history.fill(0);
        self.capture_history.iter_mut().for_each(|row| row.fill(0));
        self.killers.fill([NULL_MOVE; NUM_KILLERS]);
        self.counters.fill([NULL_MOVE; 64]);
        self.continuation.iter_mut().for_each(|row| row.fill(0));
    }

    /// Halve every history table between iterative-deepening iterations
    /// instead of wiping it: stale context from a shallower pass still has
    /// some signal.
    pub fn age(&mut self) {
        self.history.iter_mut().for_each(|v| *v /= 2);
        self.capture_history
            .iter_mut()
            .for_each(|row| row.iter_mut().for_each(|v| *v /= 2));
        self.continuation
            .iter_mut()
            .for_each(|row| row.iter_mut().for_each(|v| *v /= 2));
    }

    #[must_use]
    pub fn history_score(&self, mv: Move) -> i32 {
        self.history[history_index(mv)]
    }

    pub fn update_history(&mut self, mv: Move, bonus: i32) {
        let idx = history_index(mv);
        self.history[idx] = gravity_update(self.history[idx], bonus, HISTORY_MAX);
    }

    #[must_use]
    pub fn capture_history_score(&self, attacker: PieceKind, victim: PieceKind) -> i32 {
        self.capture_history[attacker.index()][victim.index()]
    }

    pub fn update_capture_history(&mut self, attacker: PieceKind, victim: PieceKind, bonus: i32) {
        let current = self.capture_history[attacker.index()][victim.index()];
        self.capture_history[attacker.index()][victim.index()] =
            gravity_update(current, bonus, CAPTURE_HISTORY_MAX);
    }

    #[must_use]
    pub fn killers(&self, ply: usize) -> [Move; NUM_KILLERS] {
        self.killers[ply]
    }

    pub fn add_killer(&mut self, ply: usize, mv: Move) {
        let slot = &mut self.killers[ply];
        if slot[0] == mv {
            return;
        }
        slot[1] = slot[0];
        slot[0] = mv;
    }

    #[must_use]
    pub fn counter_move(&self, prev: Move) -> Move {
        if prev.is_null() {
            return NULL_MOVE;
        }
        self.counters[prev.piece().index()][prev.target().index()]
    }

    pub fn set_counter_move(&mut self, prev: Move, mv: Move) {
        if prev.is_null() {
            return;
        }
        self.counters[prev.piece().index()][prev.target().index()] = mv;
    }

    #[must_use]
    pub fn continuation_score(&self, prev: Move, mv: Move) -> i32 {
        if prev.is_null() {
            return 0;
        }
        self.continuation[prev.piece().index()][history_index(mv)]
    }

    pub fn update_continuation(&mut self, prev: Move, mv: Move, bonus: i32) {
        if prev.is_null() {
            return;
        }
        let idx = history_index(mv);
        let row = &mut self.continuation[prev.piece().index()];
        row[idx] = gravity_update(row[idx], bonus, HISTORY_MAX);
    }
}

impl Default for SearchTables {
    fn default() -> Self {
        SearchTables::new()
    }
}

/// Applies the positive bonus for the move that caused a beta cutoff and
/// the matching penalty for every quiet move that was tried and failed
/// before it, following the standard "history gravity" pattern.
pub fn update_quiet_move_heuristics(
    tables: &mut SearchTables,
    ply: usize,
    best: Move,
    prev_move: Move,
    failed_quiets: &[Move],
    depth: i32,
) {
    let bonus = (depth * depth).min(64 * 64);
    tables.add_killer(ply, best);
    tables.set_counter_move(prev_move, best);
    tables.update_history(best, bonus);
    tables.update_continuation(prev_move, best, bonus);
    for &mv in failed_quiets {
        if mv == best {
            continue;
        }
        tables.update_history(mv, -bonus);
        tables.update_continuation(prev_move, mv, -bonus);
    }
}

#[must_use]
pub fn order_score(
    board: &Board,
    tables: &SearchTables,
    mv: Move,
    ply: usize,
    tt_move: Move,
    prev_move: Move,
) -> i32 {
    if mv == tt_move {
        return TT_MOVE_SCORE;
    }

    if mv.is_capture() {
        let victim_kind = if mv.is_en_passant() {
            PieceKind::Pawn
        } else {
            board
                .piece_at(mv.target())
                .map(|p| p.kind())
                .unwrap_or(PieceKind::Pawn)
        };
        let attacker_kind = mv.piece().kind();
        let mvv_lva = crate::board::see::SEE_VALUES[victim_kind.index()] * 16
            - crate::board::see::SEE_VALUES[attacker_kind.index()];
        let capture_hist = tables.capture_history_score(attacker_kind, victim_kind);
        let base = if crate::board::see::see_ge(board, mv, 0) {
            SEE_WINNING_CAPTURE_SCORE
        } else {
            SEE_LOSING_CAPTURE_SCORE
        };
        return base + mvv_lva + capture_hist;
    }

    let killers = tables.killers(ply);
    if mv == killers[0] {
        return KILLER1_SCORE;
    }
    if mv == killers[1] {
        return KILLER2_SCORE;
    }
    if mv == tables.counter_move(prev_move) {
        return COUNTER_SCORE;
    }

    tables.history_score(mv) + tables.continuation_score(prev_move, mv)
}
