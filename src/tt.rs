//! Transposition table: a clustered, cache-line aligned, lock-free hash
//! table shared by every Lazy SMP worker through an `Arc`, with no mutex on
//! the search hot path. Each slot packs its data into a single `u64` so one
//! `AtomicU64` write makes the new entry visible atomically; a second
//! `AtomicU32` carries the upper half of the position's Zobrist hash as a
//! cheap collision check that doesn't need the full 64-bit key stored.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

use crate::board::types::Move;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    Exact,
    Lower,
    Upper,
}

impl Bound {
    fn to_bits(self) -> u64 {
        match self {
            Bound::Exact => 0,
            Bound::Lower => 1,
            Bound::Upper => 2,
        }
    }

    fn from_bits(bits: u64) -> Bound {
        match bits & 0b11 {
            0 => Bound::Exact,
            1 => Bound::Lower,
            _ => Bound::Upper,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TtEntry {
    pub score: i32,
    pub depth: u8,
    pub bound: Bound,
    pub best_move: Move,
    pub generation: u8,
}

// data layout (low to high bit):
//   0..24   best move (raw u32, truncated to 24 bits actually used)
//   24..32  depth
//   32..56  score + 30000 bias, 24 bits
//   56..58  bound
//   58..64  generation
const MOVE_BITS: u32 = 24;
const DEPTH_SHIFT: u32 = MOVE_BITS;
const SCORE_SHIFT: u32 = DEPTH_SHIFT + 8;
const BOUND_SHIFT: u32 = SCORE_SHIFT + 24;
const GEN_SHIFT: u32 = BOUND_SHIFT + 2;
const SCORE_BIAS: i32 = 1 << 20;

fn pack(entry: &TtEntry) -> u64 {
    let mut bits = (entry.best_move.raw() as u64) & ((1 << MOVE_BITS) - 1);
    bits |= (entry.depth as u64) << DEPTH_SHIFT;
    let biased_score = (entry.score + SCORE_BIAS) as u32 as u64 & 0xFF_FFFF;
    bits |= biased_score << SCORE_SHIFT;
    bits |= entry.bound.to_bits() << BOUND_SHIFT;
    bits |= (entry.generation as u64 & 0x3F) << GEN_SHIFT;
    bits
}

fn unpack(bits: u64) -> TtEntry {
    let best_move = Move::from_raw((bits & ((1 << MOVE_BITS) - 1)) as u32);
    let depth = ((bits >> DEPTH_SHIFT) & 0xFF) as u8;
    let biased_score = ((bits >> SCORE_SHIFT) & 0xFF_FFFF) as i32;
    let score = biased_score - SCORE_BIAS;
    let bound = Bound::from_bits(bits >> BOUND_SHIFT);
    let generation = ((bits >> GEN_SHIFT) & 0x3F) as u8;
    TtEntry {
        score,
        depth,
        bound,
        best_move,
        generation,
    }
}

struct TtSlot {
    signature: AtomicU32,
    data: AtomicU64,
}

impl TtSlot {
    fn empty() -> TtSlot {
        TtSlot {
            signature: AtomicU32::new(0),
            data: AtomicU64::new(0),
        }
    }
}

/// Four slots per cluster, padded to a 64-byte cache line so one cluster
/// probe touches exactly one cache line.
#[repr(align(64))]
struct TtCluster {
    slots: [TtSlot; 4],
}

impl TtCluster {
    fn empty() -> TtCluster {
        TtCluster {
            slots: [
                TtSlot::empty(),
                TtSlot::empty(),
                TtSlot::empty(),
                TtSlot::empty(),
            ],
        }
    }
}

fn signature_of(hash: u64) -> u32 {
    (hash >> 32) as u32
}

pub struct TranspositionTable {
    clusters: Vec<TtCluster>,
    mask: usize,
}

// SAFETY: every cross-thread access goes through the slots' atomics; the
// `Vec` itself is never mutated (resized/reallocated) after construction.
unsafe impl Send for TranspositionTable {}
unsafe impl Sync for TranspositionTable {}

impl TranspositionTable {
    #[must_use]
    pub fn new(size_mb: usize) -> TranspositionTable {
        let cluster_bytes = std::mem::size_of::<TtCluster>();
        let requested = (size_mb * 1024 * 1024 / cluster_bytes).max(1);
        let capacity = requested.next_power_of_two();
        let mut clusters = Vec::with_capacity(capacity);
        clusters.resize_with(capacity, TtCluster::empty);
        TranspositionTable {
            clusters,
            mask: capacity - 1,
        }
    }

    #[inline]
    fn cluster_index(&self, hash: u64) -> usize {
        (hash as usize) & self.mask
    }

    /// Bypasses normal depth/generation replacement reasoning; used by the
    /// singular-extension verification search, which only wants to know
    /// what's already recorded for a move without disturbing it.
    #[must_use]
    pub fn peek(&self, hash: u64) -> Option<TtEntry> {
        self.probe(hash)
    }

    #[must_use]
    pub fn probe(&self, hash: u64) -> Option<TtEntry> {
        let cluster = &self.clusters[self.cluster_index(hash)];
        let sig = signature_of(hash);
        for slot in &cluster.slots {
            if slot.signature.load(Ordering::Relaxed) == sig {
                let bits = slot.data.load(Ordering::Relaxed);
                if slot.signature.load(Ordering::Acquire) == sig {
                    return Some(unpack(bits));
                }
            }
        }
        None
    }

    pub fn store(&self, hash: u64, entry: TtEntry) {
        let cluster = &self.clusters[self.cluster_index(hash)];
        let sig = signature_of(hash);

        let mut replace_idx = 0usize;
        let mut replace_score = i32::MAX;
        for (i, slot) in cluster.slots.iter().enumerate() {
            let slot_sig = slot.signature.load(Ordering::Relaxed);
            if slot_sig == sig {
                replace_idx = i;
                replace_score = i32::MIN;
                break;
            }
            if slot_sig == 0 {
                replace_idx = i;
                replace_score = i32::MIN + 1;
                continue;
            }
            let existing = unpack(slot.data.load(Ordering::Relaxed));
            let age_penalty = entry.generation.wrapping_sub(existing.generation) as i32;
            let priority = existing.depth as i32 - age_penalty * 2;
            if priority < replace_score {
                replace_score = priority;
                replace_idx = i;
            }
        }

        let slot = &cluster.slots[replace_idx];
        let bits = pack(&entry);
        slot.signature.store(0, Ordering::Relaxed);
        slot.data.store(bits, Ordering::Relaxed);
        slot.signature.store(sig, Ordering::Release);
    }

    pub fn clear(&self) {
        for cluster in &self.clusters {
            for slot in &cluster.slots {
                slot.signature.store(0, Ordering::Relaxed);
                slot.data.store(0, Ordering::Relaxed);
            }
        }
    }

    /// Per-mille occupancy over a representative sample, for the UCI
    /// `hashfull` info field.
    #[must_use]
    pub fn hashfull_per_mille(&self) -> u32 {
        let sample = self.clusters.len().min(1000);
        if sample == 0 {
            return 0;
        }
        let mut filled = 0u32;
        for cluster in self.clusters.iter().take(sample) {
            for slot in &cluster.slots {
                if slot.signature.load(Ordering::Relaxed) != 0 {
                    filled += 1;
                }
            }
        }
        filled * 1000 / (sample as u32 * 4)
    }
}

/// Folds a mate score found at `ply` into a ply-independent value before
/// storing it, and unfolds it back into a ply-relative value on retrieval,
/// so a mate found deep in one search doesn't get reported as the same
/// distance when replayed from a different root ply.
pub mod mate_folding {
    use crate::board::search::constants::MATE_THRESHOLD;

    #[must_use]
    pub fn store(score: i32, ply: i32) -> i32 {
        if score >= MATE_THRESHOLD {
            score + ply
        } else if score <= -MATE_THRESHOLD {
            score - ply
        } else {
            score
        }
    }

    #[must_use]
    pub fn retrieve(score: i32, ply: i32) -> i32 {
        if score >= MATE_THRESHOLD {
            score - ply
        } else if score <= -MATE_THRESHOLD {
            score + ply
        } else {
            score
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::types::NULL_MOVE;

    #[test]
    fn store_then_probe_round_trips() {
        let tt = TranspositionTable::new(1);
        let entry = TtEntry {
            score: 123,
            depth: 7,
            bound: Bound::Exact,
            best_move: NULL_MOVE,
            generation: 3,
        };
        tt.store(0xABCD_1234_0000_0001, entry);
        let found = tt.probe(0xABCD_1234_0000_0001).unwrap();
        assert_eq!(found.score, 123);
        assert_eq!(found.depth, 7);
        assert_eq!(found.bound, Bound::Exact);
    }

    #[test]
    fn negative_scores_round_trip() {
        let tt = TranspositionTable::new(1);
        let entry = TtEntry {
            score: -456,
            depth: 2,
            bound: Bound::Upper,
            best_move: NULL_MOVE,
            generation: 1,
        };
        tt.store(42, entry);
        assert_eq!(tt.probe(42).unwrap().score, -456);
    }

    #[test]
    fn mate_folding_round_trips() {
        let score = crate::board::search::constants::MATE_THRESHOLD + 3;
        let stored = mate_folding::store(score, 5);
        let retrieved = mate_folding::retrieve(stored, 5);
        assert_eq!(retrieved, score);
    }

    #[test]
    fn clear_empties_table() {
        let tt = TranspositionTable::new(1);
        tt.store(1, TtEntry { score: 1, depth: 1, bound: Bound::Exact, best_move: NULL_MOVE, generation: 0 });
        tt.clear();
        assert_eq!(tt.probe(1), None);
    }
}
