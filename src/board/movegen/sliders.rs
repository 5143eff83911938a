use crate::board::attack_tables::{bishop_attacks, rook_attacks};
use crate::board::state::Board;
use crate::board::types::{Color, Move, Piece, PieceKind};

fn generate_for(board: &Board, color: Color, kind: PieceKind, moves: &mut Vec<Move>) {
    let piece = Piece::new(color, kind);
    let own = board.occupied_by(color);
    let enemy = board.occupied_by(color.opposite());
    let occupied = board.all_occupied();

    for source in board.piece_bb(color, kind) {
        let attacks = match kind {
            PieceKind::Bishop => bishop_attacks(source, occupied),
            PieceKind::Rook => rook_attacks(source, occupied),
            PieceKind::Queen => bishop_attacks(source, occupied) | rook_attacks(source, occupied),
            _ => unreachable!("sliders module only handles bishop/rook/queen"),
        };
        for target in attacks & !own {
            let mv = Move::new(source, target, piece);
            moves.push(if enemy.contains(target) { mv.capture().build() } else { mv.build() });
        }
    }
}

pub fn generate_bishops(board: &Board, color: Color, moves: &mut Vec<Move>) {
    generate_for(board, color, PieceKind::Bishop, moves);
}

pub fn generate_rooks(board: &Board, color: Color, moves: &mut Vec<Move>) {
    generate_for(board, color, PieceKind::Rook, moves);
}

pub fn generate_queens(board: &Board, color: Color, moves: &mut Vec<Move>) {
    generate_for(board, color, PieceKind::Queen, moves);
}
