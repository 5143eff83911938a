//! Universal Chess Interface: reads commands from stdin, drives a
//! background [`SearchJob`](crate::engine::SearchJob), and writes `info`/
//! `bestmove` lines to stdout.

pub mod command;
pub mod options;

use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

use crate::board::parse_uci_move;
use crate::board::search::SearchParams;
use crate::board::state::Board;
use crate::engine::time::TimeControl;
use crate::engine::SearchJob;
use crate::pawn_hash::PawnHashTable;
use crate::perft::{perft, perft_divide};
use crate::tt::TranspositionTable;

use command::{parse_go_params, parse_uci_command, UciCommand};
use options::{parse_setoption, UciOptionAction, UciOptions};

/// Owns everything that survives across commands: the current position, the
/// shared hash tables, and whatever search is presently running.
pub struct Session {
    board: Board,
    tt: Arc<TranspositionTable>,
    pawn_hash: Arc<PawnHashTable>,
    generation: u8,
    options: UciOptions,
    params: SearchParams,
    job: Option<SearchJob>,
}

impl Default for Session {
    fn default() -> Self {
        let options = UciOptions::default();
        Session {
            board: Board::startpos(),
            tt: Arc::new(TranspositionTable::new(options.hash_mb)),
            pawn_hash: Arc::new(PawnHashTable::new(options.pawn_hash_kb)),
            generation: 0,
            params: SearchParams::default(),
            options,
            job: None,
        }
    }
}

impl Session {
    fn stop_running_search(&mut self) {
        if let Some(job) = self.job.take() {
            // The search thread itself prints `bestmove` as soon as it
            // returns; join() here just waits for that to happen.
            job.join();
        }
    }

    fn handle_position(&mut self, parts: &[String]) {
        let mut i = 1;
        if parts.get(i).map(String::as_str) == Some("startpos") {
            self.board = Board::startpos();
            i += 1;
        } else if parts.get(i).map(String::as_str) == Some("fen") {
            if i + 6 >= parts.len() {
                eprintln!("position: truncated fen field");
                return;
            }
            let fen = parts[i + 1..i + 7].join(" ");
            match Board::from_fen(&fen) {
                Ok(board) => self.board = board,
                Err(e) => {
                    eprintln!("position: {e}");
                    return;
                }
            }
            i += 7;
        } else {
            eprintln!("position: expected startpos or fen");
            return;
        }

        if parts.get(i).map(String::as_str) == Some("moves") {
            i += 1;
            while i < parts.len() {
                match parse_uci_move(&mut self.board, &parts[i]) {
                    Ok(mv) => {
                        self.board.make_move(mv);
                    }
                    Err(e) => eprintln!("position: illegal move {}: {e}", parts[i]),
                }
                i += 1;
            }
        }
    }

    fn handle_go(&mut self, parts: &[String]) {
        self.stop_running_search();
        let go = parse_go_params(parts);

        let control = if let Some(d) = go.depth {
            TimeControl::Depth(d)
        } else if let Some(ms) = go.movetime {
            TimeControl::MoveTime(Duration::from_millis(ms))
        } else if go.infinite {
            TimeControl::Infinite
        } else {
            let white = self.board.side_to_move() == crate::board::Color::White;
            let (my_time, my_inc) = if white {
                (go.wtime, go.winc)
            } else {
                (go.btime, go.binc)
            };
            match my_time {
                Some(t) => TimeControl::Incremental {
                    my_time: Duration::from_millis(t),
                    my_inc: Duration::from_millis(my_inc.unwrap_or(0)),
                    movestogo: go.movestogo,
                },
                None => TimeControl::Infinite,
            }
        };

        self.generation = self.generation.wrapping_add(1);
        let info_callback: crate::board::search::SearchInfoCallback = Arc::new(move |info| {
            let mut line = format!(
                "info depth {} seldepth {} nodes {} nps {} time {}",
                info.depth, info.seldepth, info.nodes, info.nps, info.time_ms
            );
            if let Some(mate) = info.mate_in {
                line.push_str(&format!(" score mate {mate}"));
            } else {
                line.push_str(&format!(" score cp {}", info.score));
            }
            line.push_str(&format!(" hashfull {}", info.hashfull));
            if !info.pv.is_empty() {
                line.push_str(" pv");
                for mv in &info.pv {
                    line.push(' ');
                    line.push_str(&mv.to_string());
                }
            }
            println!("{line}");
            let _ = io::stdout().flush();
        });

        self.job = Some(SearchJob::start(
            self.board.clone(),
            Arc::clone(&self.tt),
            Arc::clone(&self.pawn_hash),
            self.generation,
            self.params.num_threads,
            control,
            go.nodes,
            go.ponder,
            Some(info_callback),
        ));
    }

    fn handle_setoption(&mut self, parts: &[String]) {
        let Some((name, value)) = parse_setoption(parts) else {
            return;
        };
        match self.options.apply_setoption(&name, value.as_deref()) {
            Some(UciOptionAction::ReinitHash(mb)) => {
                #[cfg(feature = "logging")]
                log::debug!("resizing transposition table to {mb} MB");
                self.tt = Arc::new(TranspositionTable::new(mb));
            }
            Some(UciOptionAction::SetThreads(threads)) => {
                self.params.num_threads = threads;
            }
            None => {}
        }
    }

    fn handle_perft(&mut self, depth: u32) {
        let mut board = self.board.clone();
        let divided = perft_divide(&mut board, depth);
        let mut total = 0u64;
        for (mv, nodes) in divided {
            println!("{mv}: {nodes}");
            total += nodes;
        }
        println!("\nNodes searched: {total}");
        debug_assert_eq!(total, perft(&mut self.board.clone(), depth));
    }

    /// Processes a single line of input, returning `false` once `quit` has
    /// been seen so the caller's read loop can stop.
    pub fn handle_line(&mut self, line: &str) -> bool {
        let Some(cmd) = parse_uci_command(line) else {
            return true;
        };

        match cmd {
            UciCommand::Uci => {
                self.options.print(&self.params);
            }
            UciCommand::IsReady => {
                println!("readyok");
            }
            UciCommand::UciNewGame => {
                self.stop_running_search();
                self.board = Board::startpos();
                self.tt.clear();
                self.pawn_hash.clear();
            }
            UciCommand::Position(parts) => self.handle_position(&parts),
            UciCommand::Go(parts) => self.handle_go(&parts),
            UciCommand::Perft(depth) => self.handle_perft(depth),
            UciCommand::SetOption(parts) => self.handle_setoption(&parts),
            UciCommand::Stop => self.stop_running_search(),
            UciCommand::PonderHit => {
                // Ponder searches already run with an effectively infinite
                // budget; a real deadline would require re-deriving the
                // clock at hit time, which isn't modeled yet.
            }
            UciCommand::Quit => {
                self.stop_running_search();
                return false;
            }
            UciCommand::Unknown(s) => {
                eprintln!("unrecognized command: {s}");
            }
        }
        let _ = io::stdout().flush();
        true
    }
}

/// Drives the protocol loop over stdin until `quit` or EOF.
pub fn run() {
    let mut session = Session::default();
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        if !session.handle_line(&line) {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_startpos_with_moves_updates_board() {
        let mut session = Session::default();
        session.handle_line("position startpos moves e2e4 e7e5");
        assert_eq!(session.board.fullmove_number(), 2);
    }

    #[test]
    fn position_fen_sets_exact_position() {
        let mut session = Session::default();
        session.handle_line(
            "position fen r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        );
        assert_eq!(
            session.board.to_fen(),
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1"
        );
    }

    #[test]
    fn quit_stops_the_read_loop() {
        let mut session = Session::default();
        assert!(!session.handle_line("quit"));
    }
}
