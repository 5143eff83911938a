//! FEN parsing and formatting. Kept deliberately mechanical: this is the
//! board's "load/save" boundary, not part of the search-relevant core.

use std::fmt::Write as _;

use crate::board::error::FenError;
use crate::board::state::Board;
use crate::board::types::{CastlingRights, Color, Piece, Square};

pub const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Board {
    pub fn from_fen(fen: &str) -> Result<Board, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(FenError::WrongFieldCount(fields.len()));
        }

        let mut board = Board::empty();
        let mut row: u8 = 0;
        for rank_field in fields[0].split('/') {
            let mut file: u8 = 0;
            for c in rank_field.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as u8;
                } else {
                    let piece = Piece::from_char(c)
                        .ok_or_else(|| FenError::BadBoard(fields[0].to_string()))?;
                    if file >= 8 || row >= 8 {
                        return Err(FenError::BadBoard(fields[0].to_string()));
                    }
                    board.set_piece(Square::from_row_file(row, file), piece);
                    file += 1;
                }
            }
            if file != 8 {
                return Err(FenError::BadBoard(fields[0].to_string()));
            }
            row += 1;
        }
        if row != 8 {
            return Err(FenError::BadBoard(fields[0].to_string()));
        }

        let side = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::BadSideToMove(other.to_string())),
        };
        board.set_side_to_move(side);

        if fields[2].chars().any(|c| !"KQkq-".contains(c)) {
            return Err(FenError::BadCastling(fields[2].to_string()));
        }
        board.set_castling_rights(CastlingRights::from_fen(fields[2]));

        let ep = if fields[3] == "-" {
            Square::NONE
        } else {
            Square::from_coords(fields[3])?
        };
        board.set_en_passant(ep);

        let halfmove: u32 = fields[4]
            .parse()
            .map_err(|_| FenError::BadHalfmove(fields[4].to_string()))?;
        board.set_halfmove_clock(halfmove);

        let fullmove: u32 = fields[5]
            .parse()
            .map_err(|_| FenError::BadFullmove(fields[5].to_string()))?;
        board.set_fullmove_number(fullmove);

        let (mg, eg, phase) = crate::board::eval::recompute_incremental(&board);
        board.set_incremental_eval(mg, eg, phase);
        board.push_repetition();

        Ok(board)
    }

    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut s = String::new();
        for row in 0..8u8 {
            let mut empty_run = 0u8;
            for file in 0..8u8 {
                let sq = Square::from_row_file(row, file);
                match self.piece_at(sq) {
                    Some(piece) => {
                        if empty_run > 0 {
                            let _ = write!(s, "{empty_run}");
                            empty_run = 0;
                        }
                        s.push(piece.to_char());
                    }
                    None => empty_run += 1,
                }
            }
            if empty_run > 0 {
                let _ = write!(s, "{empty_run}");
            }
            if row != 7 {
                s.push('/');
            }
        }
        let _ = write!(
            s,
            " {} {} {} {} {}",
            if self.side_to_move() == Color::White { "w" } else { "b" },
            self.castling_rights(),
            self.en_passant_target(),
            self.halfmove_clock(),
            self.fullmove_number(),
        );
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_round_trips() {
        let board = Board::from_fen(STARTPOS_FEN).unwrap();
        assert_eq!(board.to_fen(), STARTPOS_FEN);
    }

    #[test]
    fn kiwipete_round_trips() {
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        let board = Board::from_fen(fen).unwrap();
        assert_eq!(board.to_fen(), fen);
    }

    #[test]
    fn rejects_malformed_fen() {
        assert!(Board::from_fen("not a fen").is_err());
        assert!(Board::from_fen("8/8/8/8/8/8/8/8 x KQkq - 0 1").is_err());
    }
}
