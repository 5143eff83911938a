//! Square-attacked-by queries built from the leaper tables and magic
//! sliders; shared by check detection, move legality and SEE.

use super::magic::{bishop_attacks, queen_attacks, rook_attacks};
use super::tables::{KING_ATTACKS, KNIGHT_ATTACKS, PAWN_ATTACKS};
use crate::board::types::{Bitboard, Color, PieceKind, Square};

pub use super::magic::{bishop_attacks as bishop_ray_attacks, rook_attacks as rook_ray_attacks};

/// Bitboard of every square attacked by `kind`-pieces of `by_color`
/// standing on `from`.
#[must_use]
pub fn attacks_from(kind: PieceKind, from: Square, by_color: Color, occupied: Bitboard) -> Bitboard {
    match kind {
        PieceKind::Pawn => PAWN_ATTACKS[by_color.index()][from.index()],
        PieceKind::Knight => KNIGHT_ATTACKS[from.index()],
        PieceKind::King => KING_ATTACKS[from.index()],
        PieceKind::Bishop => bishop_attacks(from, occupied),
        PieceKind::Rook => rook_attacks(from, occupied),
        PieceKind::Queen => queen_attacks(from, occupied),
    }
}

/// All squares from which a piece of `attacker_color` attacks `target`,
/// given the shared board occupancy and each color's pieces-by-kind
/// bitboards. `pieces[color][kind]` must hold that color's bitboard for
/// that kind.
#[must_use]
pub fn attackers_to(
    target: Square,
    occupied: Bitboard,
    pieces: &[[Bitboard; 6]; 2],
) -> Bitboard {
    let mut attackers = Bitboard::EMPTY;
    for &color in &[Color::White, Color::Black] {
        let c = color.index();
        attackers |= PAWN_ATTACKS[color.opposite().index()][target.index()] & pieces[c][PieceKind::Pawn.index()];
        attackers |= KNIGHT_ATTACKS[target.index()] & pieces[c][PieceKind::Knight.index()];
        attackers |= KING_ATTACKS[target.index()] & pieces[c][PieceKind::King.index()];
        attackers |= bishop_attacks(target, occupied)
            & (pieces[c][PieceKind::Bishop.index()] | pieces[c][PieceKind::Queen.index()]);
        attackers |= rook_attacks(target, occupied)
            & (pieces[c][PieceKind::Rook.index()] | pieces[c][PieceKind::Queen.index()]);
    }
    attackers
}

/// Whether `target` is attacked by any piece of `by_color`.
#[must_use]
pub fn is_square_attacked(
    target: Square,
    by_color: Color,
    occupied: Bitboard,
    pieces: &[[Bitboard; 6]; 2],
) -> bool {
    let c = by_color.index();
    if PAWN_ATTACKS[by_color.opposite().index()][target.index()] & pieces[c][PieceKind::Pawn.index()]
        != Bitboard::EMPTY
    {
        return true;
    }
    if KNIGHT_ATTACKS[target.index()] & pieces[c][PieceKind::Knight.index()] != Bitboard::EMPTY {
        return true;
    }
    if KING_ATTACKS[target.index()] & pieces[c][PieceKind::King.index()] != Bitboard::EMPTY {
        return true;
    }
    let bishop_queen = pieces[c][PieceKind::Bishop.index()] | pieces[c][PieceKind::Queen.index()];
    if bishop_attacks(target, occupied) & bishop_queen != Bitboard::EMPTY {
        return true;
    }
    let rook_queen = pieces[c][PieceKind::Rook.index()] | pieces[c][PieceKind::Queen.index()];
    if rook_attacks(target, occupied) & rook_queen != Bitboard::EMPTY {
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::state::Board;

    #[test]
    fn starting_position_king_not_attacked() {
        let board = Board::startpos();
        let white_king = board.king_square(Color::White);
        assert!(!is_square_attacked(
            white_king,
            Color::Black,
            board.all_occupied(),
            board.piece_bitboards(),
        ));
    }
}
