//! Sliding-piece attacks via magic bitboards.
//!
//! Unlike a table shipped with precomputed magic numbers, these are found by
//! randomized trial-and-error search the first time the tables are touched
//! (behind a `once_cell::sync::Lazy`, so the cost is paid once per process).
//! For each square we enumerate every occupancy subset of the relevant
//! blocker mask, compute the true attack set by ray-casting through it, and
//! keep drawing random odd 64-bit multipliers until one maps every subset to
//! its own slot with no two subsets colliding on different attack sets.

use once_cell::sync::Lazy;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::types::{Bitboard, Square};

const ROOK_DIRS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const BISHOP_DIRS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

struct MagicEntry {
    mask: Bitboard,
    magic: u64,
    shift: u32,
    offset: usize,
}

pub struct MagicTable {
    entries: [MagicEntry; 64],
    attacks: Vec<Bitboard>,
}

impl MagicTable {
    #[inline]
    #[must_use]
    pub fn attacks(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        let entry = &self.entries[sq.index()];
        let relevant = occupied & entry.mask;
        let index = (relevant.0.wrapping_mul(entry.magic)) >> entry.shift;
        self.attacks[entry.offset + index as usize]
    }
}

/// Rays from `sq` in each of `dirs`, stopping (inclusive) at the first
/// occupied square, for a single direction step repeated to the board edge.
fn ray_attacks(sq: Square, dirs: &[(i8, i8)], occupied: Bitboard) -> Bitboard {
    let mut bb = Bitboard::EMPTY;
    for &(dr, df) in dirs {
        let mut cur = sq;
        while let Some(next) = cur.offset(dr, df) {
            bb = bb.with(next);
            if occupied.contains(next) {
                break;
            }
            cur = next;
        }
    }
    bb
}

/// The blocker mask for a square: every square a slider could be blocked by,
/// excluding board-edge squares in each ray direction (the edge square
/// itself is always "occupied" from the board boundary, so it never needs
/// to appear as a variable bit).
fn relevant_mask(sq: Square, dirs: &[(i8, i8)]) -> Bitboard {
    let mut bb = Bitboard::EMPTY;
    for &(dr, df) in dirs {
        let mut cur = sq;
        loop {
            let Some(next) = cur.offset(dr, df) else {
                break;
            };
            let Some(beyond) = next.offset(dr, df) else {
                break;
            };
            let _ = beyond;
            bb = bb.with(next);
            cur = next;
        }
    }
    bb
}

fn subsets_of(mask: Bitboard) -> Vec<Bitboard> {
    let mut subsets = Vec::with_capacity(1 << mask.popcount());
    let mut subset = 0u64;
    loop {
        subsets.push(Bitboard(subset));
        if subset == mask.0 {
            break;
        }
        subset = subset.wrapping_sub(mask.0) & mask.0;
    }
    subsets
}

fn find_magic(
    sq: Square,
    dirs: &[(i8, i8)],
    mask: Bitboard,
    subsets: &[Bitboard],
    attack_sets: &[Bitboard],
    rng: &mut StdRng,
) -> (u64, u32) {
    let bits = mask.popcount();
    let shift = 64 - bits;
    let mut table = vec![None; 1usize << bits];
    loop {
        let magic: u64 = rng.gen::<u64>() & rng.gen::<u64>() & rng.gen::<u64>();
        if (mask.0.wrapping_mul(magic) >> 56).count_ones() < 6 {
            continue;
        }
        table.iter_mut().for_each(|slot| *slot = None);
        let mut ok = true;
        for (occ, &attacks) in subsets.iter().zip(attack_sets) {
            let index = (occ.0.wrapping_mul(magic) >> shift) as usize;
            match table[index] {
                None => table[index] = Some(attacks),
                Some(existing) if existing.0 == attacks.0 => {}
                Some(_) => {
                    ok = false;
                    break;
                }
            }
        }
        if ok {
            let _ = sq;
            return (magic, shift);
        }
    }
}

fn build(dirs: &[(i8, i8)]) -> MagicTable {
    let mut rng = StdRng::seed_from_u64(0x5eed_b17b_0a7d_1234);
    let mut entries: Vec<MagicEntry> = Vec::with_capacity(64);
    let mut attacks: Vec<Bitboard> = Vec::new();

    for idx in 0..64u8 {
        let sq = Square::new(idx);
        let mask = relevant_mask(sq, dirs);
        let subsets = subsets_of(mask);
        let attack_sets: Vec<Bitboard> = subsets
            .iter()
            .map(|&occ| ray_attacks(sq, dirs, occ))
            .collect();
        let (magic, shift) = find_magic(sq, dirs, mask, &subsets, &attack_sets, &mut rng);

        let offset = attacks.len();
        let table_size = 1usize << mask.popcount();
        attacks.resize(offset + table_size, Bitboard::EMPTY);
        for (occ, &attack) in subsets.iter().zip(&attack_sets) {
            let index = (occ.0.wrapping_mul(magic) >> shift) as usize;
            attacks[offset + index] = attack;
        }

        entries.push(MagicEntry {
            mask,
            magic,
            shift,
            offset,
        });
    }

    MagicTable {
        entries: entries.try_into().unwrap_or_else(|_| unreachable!()),
        attacks,
    }
}

pub static ROOK_MAGICS: Lazy<MagicTable> = Lazy::new(|| build(&ROOK_DIRS));
pub static BISHOP_MAGICS: Lazy<MagicTable> = Lazy::new(|| build(&BISHOP_DIRS));

#[inline]
#[must_use]
pub fn rook_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    ROOK_MAGICS.attacks(sq, occupied)
}

#[inline]
#[must_use]
pub fn bishop_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    BISHOP_MAGICS.attacks(sq, occupied)
}

#[inline]
#[must_use]
pub fn queen_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    rook_attacks(sq, occupied) | bishop_attacks(sq, occupied)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rook_on_empty_board_center() {
        let sq = Square::from_coords("d4").unwrap();
        let attacks = rook_attacks(sq, Bitboard::EMPTY);
        assert_eq!(attacks.popcount(), 14);
    }

    #[test]
    fn bishop_blocked_by_occupancy() {
        let sq = Square::from_coords("d4").unwrap();
        let blocker = Square::from_coords("f6").unwrap();
        let occ = Bitboard::EMPTY.with(blocker);
        let attacks = bishop_attacks(sq, occ);
        assert!(attacks.contains(blocker));
        assert!(!attacks.contains(Square::from_coords("g7").unwrap()));
    }

    #[test]
    fn rook_matches_brute_force_for_random_occupancy() {
        let sq = Square::from_coords("a1").unwrap();
        let occ = Bitboard(0x0000_1000_0020_0080);
        let expected = ray_attacks(sq, &ROOK_DIRS, occ);
        assert_eq!(rook_attacks(sq, occ).0, expected.0);
    }
}
