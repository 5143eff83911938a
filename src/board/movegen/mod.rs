mod leapers;
mod pawns;
mod sliders;

pub use leapers::castling_rook_squares;
pub use pawns::en_passant_victim_square;

use crate::board::error::MoveParseError;
use crate::board::state::Board;
use crate::board::types::{Color, Move, MoveList, PieceKind, Square};

#[must_use]
pub fn generate_pseudo_legal(board: &Board, color: Color) -> MoveList {
    let mut moves = Vec::with_capacity(48);
    pawns::generate(board, color, &mut moves);
    leapers::generate_knights(board, color, &mut moves);
    sliders::generate_bishops(board, color, &mut moves);
    sliders::generate_rooks(board, color, &mut moves);
    sliders::generate_queens(board, color, &mut moves);
    leapers::generate_king_steps(board, color, &mut moves);
    leapers::generate_castling(board, color, &mut moves);
    moves
}

/// Pseudo-legal moves filtered down to those that don't leave the mover's
/// own king in check (castling-through-check is already excluded during
/// generation).
#[must_use]
pub fn generate_legal(board: &mut Board) -> MoveList {
    let mover = board.side_to_move();
    let pseudo = generate_pseudo_legal(board, mover);
    let mut legal = Vec::with_capacity(pseudo.len());
    for mv in pseudo {
        let info = board.make_move(mv);
        if !board.in_check(mover) {
            legal.push(mv);
        }
        board.unmake_move(mv, info);
    }
    legal
}

/// Captures and promotions only, used by quiescence search and ProbCut.
#[must_use]
pub fn generate_legal_tactical(board: &mut Board) -> MoveList {
    generate_legal(board)
        .into_iter()
        .filter(|mv| mv.is_tactical())
        .collect()
}

#[must_use]
pub fn is_legal_in_check(board: &Board, mover: Color) -> bool {
    !board.in_check(mover)
}

/// Whether `mv` gives check to the side about to move (used to gate check
/// extensions and LMR exemptions without a full make/unmake round-trip at
/// every call site).
#[must_use]
pub fn gives_check(board: &mut Board, mv: Move) -> bool {
    let mover = board.side_to_move();
    let info = board.make_move(mv);
    let in_check = board.in_check(mover.opposite());
    board.unmake_move(mv, info);
    in_check
}

/// Parses a long-algebraic UCI move string (`e2e4`, `e7e8q`) against the
/// position's actual legal moves, so an illegal or malformed string is
/// rejected rather than silently packed into a `Move` nothing generates.
pub fn parse_uci_move(board: &mut Board, s: &str) -> Result<Move, MoveParseError> {
    if s.len() != 4 && s.len() != 5 {
        return Err(MoveParseError::BadLength(s.to_string()));
    }
    let source = Square::from_coords(&s[0..2])?;
    let target = Square::from_coords(&s[2..4])?;
    let promotion = if s.len() == 5 {
        let c = s.as_bytes()[4] as char;
        Some(match c {
            'q' => PieceKind::Queen,
            'r' => PieceKind::Rook,
            'b' => PieceKind::Bishop,
            'n' => PieceKind::Knight,
            other => return Err(MoveParseError::BadPromotion(other)),
        })
    } else {
        None
    };

    generate_legal(board)
        .into_iter()
        .find(|mv| mv.source() == source && mv.target() == target && mv.promotion() == promotion)
        .ok_or_else(|| MoveParseError::Illegal(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::state::Board;

    #[test]
    fn startpos_has_twenty_legal_moves() {
        let mut board = Board::startpos();
        assert_eq!(generate_legal(&mut board).len(), 20);
    }

    #[test]
    fn kiwipete_has_48_legal_moves() {
        let mut board =
            Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
                .unwrap();
        assert_eq!(generate_legal(&mut board).len(), 48);
    }

    #[test]
    fn parses_legal_uci_move() {
        let mut board = Board::startpos();
        let mv = parse_uci_move(&mut board, "e2e4").unwrap();
        assert!(mv.is_double_push());
    }

    #[test]
    fn rejects_illegal_uci_move() {
        let mut board = Board::startpos();
        assert!(parse_uci_move(&mut board, "e2e5").is_err());
    }

    #[test]
    fn pinned_piece_cannot_move_off_pin_line() {
        let mut board = Board::from_fen("4k3/8/8/8/8/4r3/4P3/4K3 w - - 0 1").unwrap();
        let moves = generate_legal(&mut board);
        assert!(moves.iter().all(|m| m.source().file() == 4 || m.piece().kind() != crate::board::types::PieceKind::Pawn));
    }
}
