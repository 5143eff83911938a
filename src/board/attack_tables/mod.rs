mod attacks;
mod magic;
mod tables;

pub use attacks::{attackers_to, attacks_from, is_square_attacked};
pub use magic::{bishop_attacks, queen_attacks, rook_attacks};
pub use tables::{KING_ATTACKS, KNIGHT_ATTACKS, PAWN_ATTACKS};
