//! The search stack: negamax with the full pruning/extension/ordering
//! toolkit, quiescence search, iterative deepening with aspiration
//! windows, and Lazy SMP coordination across worker threads.

pub mod constants;
mod iterative;
mod move_order;
mod negamax;
mod params;
mod pruning;
mod quiescence;
mod smp;

pub use iterative::{search_single_thread, SearchIterationInfo, SearchInfoCallback};
pub use move_order::SearchTables;
pub use params::{SearchParams, DEFAULT_PAWN_HASH_KB, DEFAULT_TT_MB, MAX_THREADS};
pub use smp::{smp_search, SmpConfig};

use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::board::state::Board;
use crate::board::types::{Move, MoveList, MAX_PLY, NULL_MOVE};
use crate::pawn_hash::PawnHashTable;
use crate::tt::TranspositionTable;

/// State shared, lock-free, across every Lazy SMP worker thread.
pub struct SharedSearchState {
    pub tt: Arc<TranspositionTable>,
    pub pawn_hash: Arc<PawnHashTable>,
    pub stop: Arc<AtomicBool>,
    pub total_nodes: Arc<AtomicU64>,
    pub max_seldepth: Arc<AtomicI64>,
    pub generation: u8,
    pub hard_stop_at: Instant,
    pub soft_stop_at: Instant,
    pub node_limit: Option<u64>,
}

impl SharedSearchState {
    #[must_use]
    pub fn new(tt: Arc<TranspositionTable>, pawn_hash: Arc<PawnHashTable>) -> SharedSearchState {
        SharedSearchState::with_stop(tt, pawn_hash, Arc::new(AtomicBool::new(false)))
    }

    #[must_use]
    pub fn with_stop(
        tt: Arc<TranspositionTable>,
        pawn_hash: Arc<PawnHashTable>,
        stop: Arc<AtomicBool>,
    ) -> SharedSearchState {
        let now = Instant::now();
        SharedSearchState {
            tt,
            pawn_hash,
            stop,
            total_nodes: Arc::new(AtomicU64::new(0)),
            max_seldepth: Arc::new(AtomicI64::new(0)),
            generation: 0,
            hard_stop_at: now,
            soft_stop_at: now,
            node_limit: None,
        }
    }

    pub fn update_seldepth(&self, ply: i32) {
        self.max_seldepth.fetch_max(ply as i64, Ordering::Relaxed);
    }

    #[must_use]
    pub fn seldepth(&self) -> i32 {
        self.max_seldepth.load(Ordering::Relaxed) as i32
    }

    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn stopped(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }
}

#[derive(Default)]
pub struct SearchStats {
    pub nodes: u64,
    pub tt_hits: u64,
    pub seldepth: i32,
}

/// Per-thread mutable search context passed down through every negamax and
/// quiescence call; `board` and `tables` are this worker's private replica,
/// `shared` is the cross-thread state.
pub struct SearchContext<'a> {
    pub board: &'a mut Board,
    pub shared: &'a SharedSearchState,
    pub tables: &'a mut SearchTables,
    pub stats: SearchStats,
    pub root_depth: i32,
    pub static_eval: [i32; MAX_PLY],
    pub prev_move: [Move; MAX_PLY],
    node_check_mask: u64,
}

impl<'a> SearchContext<'a> {
    #[must_use]
    pub fn new(
        board: &'a mut Board,
        shared: &'a SharedSearchState,
        tables: &'a mut SearchTables,
        root_depth: i32,
    ) -> SearchContext<'a> {
        SearchContext {
            board,
            shared,
            tables,
            stats: SearchStats::default(),
            root_depth,
            static_eval: [0; MAX_PLY],
            prev_move: [NULL_MOVE; MAX_PLY],
            node_check_mask: 1023,
        }
    }

    #[must_use]
    pub fn should_stop(&self) -> bool {
        if self.shared.stopped() {
            return true;
        }
        if self.stats.nodes & self.node_check_mask != 0 {
            return false;
        }
        if let Some(limit) = self.shared.node_limit {
            if self.shared.total_nodes.load(Ordering::Relaxed) + self.stats.nodes >= limit {
                self.shared.request_stop();
                return true;
            }
        }
        if Instant::now() >= self.shared.hard_stop_at {
            self.shared.request_stop();
            return true;
        }
        false
    }

    fn order_quiescence_moves(&self, moves: &mut MoveList) {
        let prev = if let Some(&p) = self.prev_move.first() {
            p
        } else {
            NULL_MOVE
        };
        let board = &*self.board;
        let tables = &*self.tables;
        moves.sort_by_cached_key(|&mv| {
            -move_order::order_score(board, tables, mv, 0, NULL_MOVE, prev)
        });
    }
}

pub use negamax::{negamax, SearchResult};
