use crate::board::attack_tables::{KING_ATTACKS, KNIGHT_ATTACKS};
use crate::board::state::Board;
use crate::board::types::{CastlingRights, Color, Move, Piece, PieceKind, Square, BLACK_KINGSIDE, BLACK_QUEENSIDE, WHITE_KINGSIDE, WHITE_QUEENSIDE};

pub fn generate_knights(board: &Board, color: Color, moves: &mut Vec<Move>) {
    let piece = Piece::new(color, PieceKind::Knight);
    let own = board.occupied_by(color);
    let enemy = board.occupied_by(color.opposite());
    for source in board.piece_bb(color, PieceKind::Knight) {
        let targets = KNIGHT_ATTACKS[source.index()] & !own;
        for target in targets {
            let mv = Move::new(source, target, piece);
            moves.push(if enemy.contains(target) { mv.capture().build() } else { mv.build() });
        }
    }
}

pub fn generate_king_steps(board: &Board, color: Color, moves: &mut Vec<Move>) {
    let piece = Piece::new(color, PieceKind::King);
    let own = board.occupied_by(color);
    let enemy = board.occupied_by(color.opposite());
    let source = board.king_square(color);
    let targets = KING_ATTACKS[source.index()] & !own;
    for target in targets {
        let mv = Move::new(source, target, piece);
        moves.push(if enemy.contains(target) { mv.capture().build() } else { mv.build() });
    }
}

pub fn generate_castling(board: &Board, color: Color, moves: &mut Vec<Move>) {
    use crate::board::attack_tables::is_square_attacked;

    let piece = Piece::new(color, PieceKind::King);
    let rights = board.castling_rights();
    let occupied = board.all_occupied();
    let enemy = color.opposite();

    let (king_side, queen_side, home_row) = match color {
        Color::White => (WHITE_KINGSIDE, WHITE_QUEENSIDE, 7u8),
        Color::Black => (BLACK_KINGSIDE, BLACK_QUEENSIDE, 0u8),
    };

    let king_sq = Square::from_row_file(home_row, 4);
    if board.king_square(color) != king_sq {
        return;
    }
    if board.in_check(color) {
        return;
    }

    if rights.has(king_side) {
        let f = Square::from_row_file(home_row, 5);
        let g = Square::from_row_file(home_row, 6);
        if !occupied.contains(f)
            && !occupied.contains(g)
            && !is_square_attacked(f, enemy, occupied, board.piece_bitboards())
            && !is_square_attacked(g, enemy, occupied, board.piece_bitboards())
        {
            moves.push(Move::new(king_sq, g, piece).castling().build());
        }
    }
    if rights.has(queen_side) {
        let d = Square::from_row_file(home_row, 3);
        let c = Square::from_row_file(home_row, 2);
        let b = Square::from_row_file(home_row, 1);
        if !occupied.contains(d)
            && !occupied.contains(c)
            && !occupied.contains(b)
            && !is_square_attacked(d, enemy, occupied, board.piece_bitboards())
            && !is_square_attacked(c, enemy, occupied, board.piece_bitboards())
        {
            moves.push(Move::new(king_sq, c, piece).castling().build());
        }
    }
    let _ = CastlingRights::NONE;
}

/// The rook's source and destination squares for a castling move, derived
/// purely from the king's destination (kingside vs. queenside, which side).
#[must_use]
pub fn castling_rook_squares(king_target: Square, color: Color) -> (Square, Square) {
    let home_row = match color {
        Color::White => 7,
        Color::Black => 0,
    };
    if king_target.file() == 6 {
        (Square::from_row_file(home_row, 7), Square::from_row_file(home_row, 5))
    } else {
        (Square::from_row_file(home_row, 0), Square::from_row_file(home_row, 3))
    }
}
