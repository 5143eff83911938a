//! Owns the background search thread: spawns it with the 32 MB stack a deep
//! negamax recursion needs and exposes `request_stop`/`join` for the UCI
//! command loop to drive. The thread itself prints `bestmove` once
//! `smp_search` returns, so a GUI gets it unsolicited on natural completion
//! and not just after an explicit `stop`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::board::search::{smp_search, SearchInfoCallback, SearchResult, SmpConfig};
use crate::board::state::Board;
use crate::engine::time::{compute_budget, TimeControl};
use crate::pawn_hash::PawnHashTable;
use crate::tt::TranspositionTable;

const SEARCH_STACK_SIZE: usize = 32 * 1024 * 1024;

pub struct SearchJob {
    handle: JoinHandle<SearchResult>,
    stop: Arc<AtomicBool>,
}

impl SearchJob {
    /// Starts the search on its own thread. `ponder` delays the hard/soft
    /// deadlines indefinitely until the controller converts the job to a
    /// normal timed search via `ponderhit`, matching UCI's ponder contract.
    #[allow(clippy::too_many_arguments)]
    pub fn start(
        board: Board,
        tt: Arc<TranspositionTable>,
        pawn_hash: Arc<PawnHashTable>,
        generation: u8,
        num_threads: usize,
        control: TimeControl,
        node_limit: Option<u64>,
        ponder: bool,
        info_callback: Option<SearchInfoCallback>,
    ) -> SearchJob {
        let stop = Arc::new(AtomicBool::new(false));

        let fullmove_number = board.fullmove_number();
        let (soft, hard) = if ponder {
            (Duration::from_secs(3600), Duration::from_secs(3600))
        } else {
            compute_budget(control, fullmove_number)
        };
        let max_depth = match control {
            TimeControl::Depth(d) => d,
            _ => crate::board::types::MAX_PLY as i32 - 1,
        };

        let thread_stop = Arc::clone(&stop);
        let handle = thread::Builder::new()
            .name("search-controller".to_string())
            .stack_size(SEARCH_STACK_SIZE)
            .spawn(move || {
                let config = SmpConfig::with_threads(num_threads)
                    .depth(max_depth)
                    .time(soft, hard)
                    .with_stop(thread_stop);
                let config = match node_limit {
                    Some(n) => config.nodes(n),
                    None => config,
                };
                let config = match info_callback {
                    Some(cb) => config.with_callback(cb),
                    None => config,
                };
                let result = smp_search(&board, tt, pawn_hash, generation, config);
                #[cfg(feature = "logging")]
                log::debug!("search finished: best={} score={}", result.best_move, result.score);
                println!("bestmove {}", result.best_move);
                result
            })
            .expect("failed to spawn search controller thread");

        SearchJob { handle, stop }
    }

    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Requests a stop and blocks until the search thread exits, returning
    /// its result. `bestmove` has already been printed by the time this
    /// returns.
    pub fn join(self) -> SearchResult {
        self.request_stop();
        self.handle.join().unwrap_or_default()
    }
}
