//! Applying and reverting moves on the board, keeping the incremental hash,
//! incremental material/PST eval, and repetition table all in lock-step.

use crate::board::eval::piece_eval_delta;
use crate::board::movegen::{castling_rook_squares, en_passant_victim_square};
use crate::board::state::{Board, NullMoveInfo, UnmakeInfo};
use crate::board::types::{
    CastlingRights, Color, Move, Piece, PieceKind, Square, BLACK_KINGSIDE, BLACK_QUEENSIDE,
    WHITE_KINGSIDE, WHITE_QUEENSIDE,
};

fn castling_mask_for_square(sq: Square) -> u8 {
    match sq.index() {
        0 => BLACK_QUEENSIDE,
        7 => BLACK_KINGSIDE,
        56 => WHITE_QUEENSIDE,
        63 => WHITE_KINGSIDE,
        _ => 0,
    }
}

impl Board {
    pub fn make_move(&mut self, mv: Move) -> UnmakeInfo {
        let mover = self.side_to_move();
        let piece = mv.piece();
        let source = mv.source();
        let target = mv.target();

        let previous_eval_mg = [self.incremental_eval(Color::White).0, self.incremental_eval(Color::Black).0];
        let previous_eval_eg = [self.incremental_eval(Color::White).1, self.incremental_eval(Color::Black).1];
        let previous_phase = self.game_phase();
        let previous_en_passant = self.en_passant_target();
        let previous_castling_rights = self.castling_rights();
        let previous_hash = self.hash();
        let previous_halfmove_clock = self.halfmove_clock();

        let captured = if mv.is_en_passant() {
            let victim_sq = en_passant_victim_square(target, mover);
            let victim = Piece::new(mover.opposite(), PieceKind::Pawn);
            self.remove_piece(victim_sq, victim);
            Some(victim)
        } else if mv.is_capture() {
            let victim = self.piece_at(target).expect("capture move must have a victim");
            self.remove_piece(target, victim);
            Some(victim)
        } else {
            None
        };

        self.remove_piece(source, piece);
        if let Some(promo_kind) = mv.promotion() {
            self.set_piece(target, Piece::new(mover, promo_kind));
        } else {
            self.set_piece(target, piece);
        }

        if mv.is_castling() {
            let (rook_from, rook_to) = castling_rook_squares(target, mover);
            let rook = Piece::new(mover, PieceKind::Rook);
            self.remove_piece(rook_from, rook);
            self.set_piece(rook_to, rook);
            self.mark_castled(mover);
        }

        let mut rights = self.castling_rights();
        rights.remove(castling_mask_for_square(source));
        rights.remove(castling_mask_for_square(target));
        if piece.kind() == PieceKind::King {
            rights.remove(match mover {
                Color::White => WHITE_KINGSIDE | WHITE_QUEENSIDE,
                Color::Black => BLACK_KINGSIDE | BLACK_QUEENSIDE,
            });
        }
        self.set_castling_rights(rights);

        if mv.is_double_push() {
            let ep_sq = match mover {
                Color::White => target.offset(1, 0).unwrap(),
                Color::Black => target.offset(-1, 0).unwrap(),
            };
            self.set_en_passant(ep_sq);
        } else {
            self.set_en_passant(Square::NONE);
        }

        if piece.kind() == PieceKind::Pawn || mv.is_capture() {
            self.set_halfmove_clock(0);
        } else {
            self.set_halfmove_clock(self.halfmove_clock() + 1);
        }
        if mover == Color::Black {
            self.set_fullmove_number(self.fullmove_number() + 1);
        }

        self.flip_side_hash();
        self.set_side_to_move(mover.opposite());

        let delta = piece_eval_delta(mv, captured, mover);
        let mut mg = previous_eval_mg;
        let mut eg = previous_eval_eg;
        mg[mover.index()] += delta.mover_mg;
        eg[mover.index()] += delta.mover_eg;
        mg[mover.opposite().index()] += delta.enemy_mg;
        eg[mover.opposite().index()] += delta.enemy_eg;
        self.set_incremental_eval(mg, eg, previous_phase + delta.phase_delta);

        self.push_repetition();

        UnmakeInfo {
            captured,
            previous_en_passant,
            previous_castling_rights,
            previous_hash,
            previous_halfmove_clock,
            previous_eval_mg,
            previous_eval_eg,
            previous_phase,
        }
    }

    pub fn unmake_move(&mut self, mv: Move, info: UnmakeInfo) {
        let hash_after = self.hash();
        self.pop_repetition(hash_after);

        let mover = self.side_to_move().opposite();
        let source = mv.source();
        let target = mv.target();
        let piece = mv.piece();

        if mv.is_castling() {
            let (rook_from, rook_to) = castling_rook_squares(target, mover);
            let rook = Piece::new(mover, PieceKind::Rook);
            self.remove_piece(rook_to, rook);
            self.set_piece(rook_from, rook);
        }

        if let Some(promo_kind) = mv.promotion() {
            self.remove_piece(target, Piece::new(mover, promo_kind));
        } else {
            self.remove_piece(target, piece);
        }
        self.set_piece(source, piece);

        if let Some(captured) = info.captured {
            if mv.is_en_passant() {
                let victim_sq = en_passant_victim_square(target, mover);
                self.set_piece(victim_sq, captured);
            } else {
                self.set_piece(target, captured);
            }
        }

        self.set_side_to_move(mover);
        self.force_state(
            info.previous_en_passant,
            info.previous_castling_rights,
            info.previous_hash,
            info.previous_halfmove_clock,
        );
        self.set_incremental_eval(info.previous_eval_mg, info.previous_eval_eg, info.previous_phase);
        if mover == Color::Black {
            self.set_fullmove_number(self.fullmove_number() - 1);
        }
    }

    pub fn make_null_move(&mut self) -> NullMoveInfo {
        let previous_en_passant = self.en_passant_target();
        let previous_hash = self.hash();
        self.set_en_passant(Square::NONE);
        self.flip_side_hash();
        let next = self.side_to_move().opposite();
        self.set_side_to_move(next);
        NullMoveInfo {
            previous_en_passant,
            previous_hash,
        }
    }

    pub fn unmake_null_move(&mut self, info: NullMoveInfo) {
        let mover = self.side_to_move().opposite();
        self.set_side_to_move(mover);
        self.force_state(info.previous_en_passant, self.castling_rights(), info.previous_hash, self.halfmove_clock());
    }

    /// Restores hash/castling/en-passant/halfmove fields directly, bypassing
    /// the incremental XOR bookkeeping `set_*` normally does — used only by
    /// unmake, which already knows the exact prior values.
    fn force_state(
        &mut self,
        en_passant: Square,
        castling_rights: CastlingRights,
        hash: u64,
        halfmove_clock: u32,
    ) {
        self.overwrite_hash(hash);
        self.overwrite_en_passant(en_passant);
        self.overwrite_castling_rights(castling_rights);
        self.overwrite_halfmove_clock(halfmove_clock);
    }
}
