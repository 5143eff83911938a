use crate::board::attack_tables::PAWN_ATTACKS;
use crate::board::state::Board;
use crate::board::types::{Color, Move, Piece, PieceKind, Square};
use crate::board::types_support::{pawn_double_push_target, pawn_home_row, pawn_promotion_row, pawn_push_target};

const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

pub fn generate(board: &Board, color: Color, moves: &mut Vec<Move>) {
    let piece = Piece::new(color, PieceKind::Pawn);
    let own = board.occupied_by(color);
    let enemy = board.occupied_by(color.opposite());
    let occupied = board.all_occupied();

    for source in board.piece_bb(color, PieceKind::Pawn) {
        let promo_row = pawn_promotion_row(color);

        if let Some(push) = pawn_push_target(source, color) {
            if !occupied.contains(push) {
                if push.row() == promo_row {
                    for kind in PROMOTION_KINDS {
                        moves.push(Move::new(source, push, piece).promotion(kind).build());
                    }
                } else {
                    moves.push(Move::new(source, push, piece).build());
                    if source.row() == pawn_home_row(color) {
                        if let Some(double) = pawn_double_push_target(source, color) {
                            if !occupied.contains(double) {
                                moves.push(Move::new(source, double, piece).double_push().build());
                            }
                        }
                    }
                }
            }
        }

        let attacks = PAWN_ATTACKS[color.index()][source.index()];
        for target in attacks & enemy {
            if target.row() == promo_row {
                for kind in PROMOTION_KINDS {
                    moves.push(Move::new(source, target, piece).capture().promotion(kind).build());
                }
            } else {
                moves.push(Move::new(source, target, piece).capture().build());
            }
        }

        let ep = board.en_passant_target();
        if !ep.is_none() && attacks.contains(ep) {
            moves.push(Move::new(source, ep, piece).en_passant().build());
        }
    }

    let _ = own;
}

/// The square of the pawn captured by an en-passant move with `target`
/// as its landing square.
#[must_use]
pub fn en_passant_victim_square(target: Square, mover: Color) -> Square {
    match mover {
        Color::White => target.offset(1, 0).expect("ep target always has a square behind it"),
        Color::Black => target.offset(-1, 0).expect("ep target always has a square behind it"),
    }
}
