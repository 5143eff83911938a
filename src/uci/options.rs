//! `setoption`/option-advertisement handling. Kept separate from the main
//! command loop so adding a new tunable doesn't mean touching the loop body.

use crate::board::search::{SearchParams, DEFAULT_PAWN_HASH_KB, DEFAULT_TT_MB, MAX_THREADS};

fn print_spin(name: &str, default: impl std::fmt::Display, min: impl std::fmt::Display, max: impl std::fmt::Display) {
    println!("option name {name} type spin default {default} min {min} max {max}");
}

pub enum UciOptionAction {
    ReinitHash(usize),
    SetThreads(usize),
}

pub struct UciOptions {
    pub hash_mb: usize,
    pub pawn_hash_kb: usize,
    pub threads: usize,
    pub move_overhead_ms: u64,
}

impl Default for UciOptions {
    fn default() -> Self {
        UciOptions {
            hash_mb: DEFAULT_TT_MB,
            pawn_hash_kb: DEFAULT_PAWN_HASH_KB,
            threads: 1,
            move_overhead_ms: 30,
        }
    }
}

impl UciOptions {
    pub fn print(&self, params: &SearchParams) {
        println!("id name corvid");
        println!("id author corvid contributors");
        print_spin("Hash", self.hash_mb, 1, 65536);
        print_spin("Threads", params.num_threads, 1, MAX_THREADS);
        print_spin("Move Overhead", self.move_overhead_ms, 0, 1000);
        println!("uciok");
    }

    /// Applies a parsed `name`/`value` pair, returning an action the caller
    /// must carry out (reallocating the TT is too heavy to do implicitly
    /// from here, since it needs `Arc` ownership the options struct lacks).
    pub fn apply_setoption(&mut self, name: &str, value: Option<&str>) -> Option<UciOptionAction> {
        let normalized = name.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "hash" => {
                let mb = value.and_then(|v| v.parse::<usize>().ok()).unwrap_or(DEFAULT_TT_MB).max(1);
                if mb != self.hash_mb {
                    self.hash_mb = mb;
                    return Some(UciOptionAction::ReinitHash(mb));
                }
            }
            "threads" => {
                let threads = value
                    .and_then(|v| v.parse::<usize>().ok())
                    .unwrap_or(1)
                    .clamp(1, MAX_THREADS);
                if threads != self.threads {
                    self.threads = threads;
                    return Some(UciOptionAction::SetThreads(threads));
                }
            }
            "move overhead" => {
                if let Some(v) = value.and_then(|v| v.parse::<u64>().ok()) {
                    self.move_overhead_ms = v;
                }
            }
            _ => {}
        }
        None
    }
}

/// Splits `setoption name <...> value <...>` into its name/value halves.
#[must_use]
pub fn parse_setoption(parts: &[String]) -> Option<(String, Option<String>)> {
    if parts.first().map(String::as_str) != Some("setoption") {
        return None;
    }

    let mut name_parts: Vec<&str> = Vec::new();
    let mut value_parts: Vec<&str> = Vec::new();
    let mut mode = "";

    for part in parts.iter().skip(1) {
        match part.as_str() {
            "name" => mode = "name",
            "value" => mode = "value",
            _ => match mode {
                "name" => name_parts.push(part),
                "value" => value_parts.push(part),
                _ => {}
            },
        }
    }

    if name_parts.is_empty() {
        return None;
    }

    let name = name_parts.join(" ");
    let value = if value_parts.is_empty() { None } else { Some(value_parts.join(" ")) };
    Some((name, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hash_setoption() {
        let parts: Vec<String> = "setoption name Hash value 256"
            .split_whitespace()
            .map(str::to_string)
            .collect();
        let (name, value) = parse_setoption(&parts).unwrap();
        assert_eq!(name, "Hash");
        assert_eq!(value.as_deref(), Some("256"));
    }

    #[test]
    fn apply_hash_change_requests_reinit() {
        let mut opts = UciOptions::default();
        let action = opts.apply_setoption("Hash", Some("128"));
        assert!(matches!(action, Some(UciOptionAction::ReinitHash(128))));
        assert_eq!(opts.hash_mb, 128);
    }

    #[test]
    fn unchanged_hash_value_is_a_no_op() {
        let mut opts = UciOptions::default();
        opts.hash_mb = 64;
        assert!(opts.apply_setoption("Hash", Some("64")).is_none());
    }
}
