//! Lazy SMP: every worker searches the same root position independently,
//! coordinating only through the shared transposition table. Workers start
//! their iterative deepening at a staggered depth so they don't all spend
//! their first iterations duplicating each other's cheap early work.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::board::search::iterative::{search_single_thread, SearchInfoCallback};
use crate::board::search::move_order::SearchTables;
use crate::board::search::{SearchResult, SharedSearchState};
use crate::board::state::Board;
use crate::pawn_hash::PawnHashTable;
use crate::tt::TranspositionTable;

const SEARCH_STACK_SIZE: usize = 32 * 1024 * 1024;

#[derive(Clone)]
pub struct SmpConfig {
    pub num_threads: usize,
    pub max_depth: i32,
    pub soft_time: Option<Duration>,
    pub hard_time: Option<Duration>,
    pub node_limit: Option<u64>,
    pub info_callback: Option<SearchInfoCallback>,
    pub stop: Option<Arc<AtomicBool>>,
}

impl Default for SmpConfig {
    fn default() -> Self {
        SmpConfig {
            num_threads: 1,
            max_depth: 64,
            soft_time: None,
            hard_time: None,
            node_limit: None,
            info_callback: None,
            stop: None,
        }
    }
}

impl SmpConfig {
    #[must_use]
    pub fn with_threads(num_threads: usize) -> Self {
        SmpConfig {
            num_threads: num_threads.max(1),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn depth(mut self, max_depth: i32) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn time(mut self, soft: Duration, hard: Duration) -> Self {
        self.soft_time = Some(soft);
        self.hard_time = Some(hard);
        self
    }

    #[must_use]
    pub fn nodes(mut self, node_limit: u64) -> Self {
        self.node_limit = Some(node_limit);
        self
    }

    #[must_use]
    pub fn with_callback(mut self, callback: SearchInfoCallback) -> Self {
        self.info_callback = Some(callback);
        self
    }

    #[must_use]
    pub fn with_stop(mut self, stop: Arc<AtomicBool>) -> Self {
        self.stop = Some(stop);
        self
    }
}

struct WorkerResult {
    worker_id: usize,
    depth_reached: i32,
    result: SearchResult,
}

/// Runs Lazy SMP and returns the aggregated best move. A single requested
/// thread skips the `Arc`/spawn machinery entirely and just runs the search
/// on the caller's stack.
pub fn smp_search(
    board: &Board,
    tt: Arc<TranspositionTable>,
    pawn_hash: Arc<PawnHashTable>,
    generation: u8,
    config: SmpConfig,
) -> SearchResult {
    let num_threads = config.num_threads.max(1);
    let start_time = Instant::now();

    let stop_flag = config.stop.clone().unwrap_or_else(|| Arc::new(AtomicBool::new(false)));
    let mut shared = SharedSearchState::with_stop(tt, pawn_hash, stop_flag);
    shared.generation = generation;
    shared.node_limit = config.node_limit;
    shared.hard_stop_at = start_time + config.hard_time.unwrap_or(Duration::from_secs(3600));
    shared.soft_stop_at = start_time + config.soft_time.unwrap_or(Duration::from_secs(3600));
    let shared = Arc::new(shared);

    if num_threads == 1 {
        let mut worker_board = board.clone();
        let mut tables = SearchTables::new();
        let cb = config.info_callback.clone();
        let result = search_single_thread(
            &mut worker_board,
            &shared,
            &mut tables,
            config.max_depth,
            1,
            start_time,
            cb.map(|f| move |info: &_| (*f)(info)),
        );
        return result;
    }

    let mut handles = Vec::with_capacity(num_threads);
    for worker_id in 0..num_threads {
        let mut worker_board = board.clone();
        let worker_shared = Arc::clone(&shared);
        let info_cb = if worker_id == 0 {
            config.info_callback.clone()
        } else {
            None
        };
        let max_depth = config.max_depth;
        let start_depth = 1 + worker_id as i32;

        #[cfg(feature = "logging")]
        log::trace!("spawning search worker {worker_id} at start depth {start_depth}");

        let handle = thread::Builder::new()
            .name(format!("search-{worker_id}"))
            .stack_size(SEARCH_STACK_SIZE)
            .spawn(move || {
                let mut tables = SearchTables::new();
                let result = search_single_thread(
                    &mut worker_board,
                    &worker_shared,
                    &mut tables,
                    max_depth,
                    start_depth,
                    start_time,
                    info_cb.map(|f| move |info: &_| (*f)(info)),
                );
                WorkerResult {
                    worker_id,
                    depth_reached: max_depth,
                    result,
                }
            })
            .expect("failed to spawn search worker");
        handles.push(handle);
    }

    let mut results = Vec::with_capacity(num_threads);
    for handle in handles {
        if let Ok(r) = handle.join() {
            results.push(r);
        }
    }

    let _ = shared.total_nodes.load(Ordering::Relaxed);

    let main = results
        .iter()
        .find(|r| r.worker_id == 0 && !r.result.best_move.is_null());
    let chosen = main.or_else(|| results.iter().filter(|r| !r.result.best_move.is_null()).max_by_key(|r| r.depth_reached));

    chosen.map(|r| r.result).unwrap_or_default()
}
