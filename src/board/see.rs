//! Static Exchange Evaluation.
//!
//! These piece values are deliberately distinct from the evaluator's own
//! material table (`board::pst::MATERIAL_MG`/`MATERIAL_EG`): SEE only cares
//! about the relative order of exchanges, and giving the king a huge finite
//! value here (instead of the "infinite" the evaluator uses for king
//! material, which stays at zero since kings can't be captured) keeps the
//! gain-array arithmetic simple without it ever being worth trading into.
use crate::board::attack_tables::attackers_to;
use crate::board::movegen::en_passant_victim_square;
use crate::board::state::Board;
use crate::board::types::{Color, Move, Piece, PieceKind};

pub const SEE_VALUES: [i32; 6] = [100, 300, 300, 500, 900, 20000];

fn least_valuable_attacker(
    attackers: crate::board::types::Bitboard,
    color: Color,
    pieces: &[[crate::board::types::Bitboard; 6]; 2],
) -> Option<(crate::board::types::Square, PieceKind)> {
    for kind in crate::board::types::PIECE_KINDS {
        let candidates = attackers & pieces[color.index()][kind.index()];
        if let Some(sq) = candidates.lsb() {
            return Some((sq, kind));
        }
    }
    None
}

/// Static exchange evaluation for `mv`: the net material gain for the side
/// making the move if both sides trade on the target square optimally.
#[must_use]
pub fn see(board: &Board, mv: Move) -> i32 {
    let target = mv.target();
    let mover = mv.piece().color();

    let mut pieces = *board.piece_bitboards();
    let mut occupied = board.all_occupied();

    let initial_victim_value = if mv.is_en_passant() {
        let victim_sq = en_passant_victim_square(target, mover);
        pieces[mover.opposite().index()][PieceKind::Pawn.index()] =
            pieces[mover.opposite().index()][PieceKind::Pawn.index()].without(victim_sq);
        occupied = occupied.without(victim_sq);
        SEE_VALUES[PieceKind::Pawn.index()]
    } else if let Some(victim) = board.piece_at(target) {
        SEE_VALUES[victim.kind().index()]
    } else {
        0
    };

    let mut attacker_kind = mv.piece().kind();
    let source = mv.source();
    pieces[mover.index()][attacker_kind.index()] =
        pieces[mover.index()][attacker_kind.index()].without(source);
    occupied = occupied.without(source);
    if let Some(promo) = mv.promotion() {
        attacker_kind = promo;
    }

    let mut gains = vec![initial_victim_value];
    let mut side = mover.opposite();

    loop {
        let attackers = attackers_to(target, occupied, &pieces) & occupied;
        let Some((attacker_sq, kind)) = least_valuable_attacker(attackers, side, &pieces) else {
            break;
        };
        gains.push(SEE_VALUES[attacker_kind.index()] - *gains.last().unwrap());
        pieces[side.index()][kind.index()] = pieces[side.index()][kind.index()].without(attacker_sq);
        occupied = occupied.without(attacker_sq);
        attacker_kind = kind;
        side = side.opposite();
    }

    for i in (1..gains.len()).rev() {
        gains[i - 1] = -(-gains[i - 1]).max(gains[i]);
    }

    gains[0]
}

#[must_use]
pub fn see_ge(board: &Board, mv: Move, threshold: i32) -> bool {
    see(board, mv) >= threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::movegen::generate_legal;

    fn find_move(board: &mut Board, uci: &str) -> Move {
        generate_legal(board)
            .into_iter()
            .find(|m| m.to_uci() == uci)
            .unwrap_or_else(|| panic!("move {uci} not found"))
    }

    #[test]
    fn queen_takes_defended_pawn_is_losing() {
        let mut board = Board::from_fen("4k3/8/8/3p4/8/8/8/3QK3 w - - 0 1").unwrap();
        // queen takes an undefended pawn: should be a clean material gain.
        let mv = find_move(&mut board, "d1d5");
        assert!(see(&board, mv) > 0);
    }

    #[test]
    fn pawn_takes_queen_is_winning() {
        let mut board = Board::from_fen("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1").unwrap();
        let mv = find_move(&mut board, "e4d5");
        assert!(see(&board, mv) > 0);
    }

    #[test]
    fn queen_takes_pawn_defended_by_pawn_loses_material() {
        let mut board = Board::from_fen("4k3/8/3p4/4p3/8/8/4Q3/4K3 w - - 0 1").unwrap();
        let mv = find_move(&mut board, "e2e5");
        assert!(see(&board, mv) < 0);
    }
}
