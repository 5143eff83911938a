//! Zobrist hash keys, generated once at process start from a fixed seed so
//! a given position always hashes the same way across runs (needed for
//! reproducible perft/search output and the proptest suite).

use once_cell::sync::Lazy;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::types::{Color, NUM_PIECES};

pub struct ZobristKeys {
    pub piece_square: [[u64; 64]; NUM_PIECES],
    pub castling: [u64; 16],
    pub en_passant_file: [u64; 8],
    pub side_to_move: u64,
}

pub static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(|| {
    let mut rng = StdRng::seed_from_u64(0xC0FF_EE15_BEEF_CAFE);
    let mut piece_square = [[0u64; 64]; NUM_PIECES];
    for piece in &mut piece_square {
        for sq in piece.iter_mut() {
            *sq = rng.gen();
        }
    }
    let mut castling = [0u64; 16];
    for key in &mut castling {
        *key = rng.gen();
    }
    let mut en_passant_file = [0u64; 8];
    for key in &mut en_passant_file {
        *key = rng.gen();
    }
    ZobristKeys {
        piece_square,
        castling,
        en_passant_file,
        side_to_move: rng.gen(),
    }
});

impl ZobristKeys {
    #[inline]
    #[must_use]
    pub fn piece(&self, piece_index: usize, square_index: usize) -> u64 {
        self.piece_square[piece_index][square_index]
    }

    #[inline]
    #[must_use]
    pub fn castling_rights(&self, rights: u8) -> u64 {
        self.castling[rights as usize & 0xF]
    }

    #[inline]
    #[must_use]
    pub fn en_passant(&self, file: u8) -> u64 {
        self.en_passant_file[file as usize & 7]
    }

    #[inline]
    #[must_use]
    pub fn side(&self, color: Color) -> u64 {
        if color == Color::Black {
            self.side_to_move
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_keys_are_distinct() {
        let a = ZOBRIST.piece(0, 0);
        let b = ZOBRIST.piece(0, 1);
        let c = ZOBRIST.piece(1, 0);
        assert_ne!(a, b);
        assert_ne!(a, c);
    }
}
