pub mod attack_tables;
pub mod error;
pub mod eval;
pub mod eval_terms;
pub mod fen;
mod make_unmake;
pub mod movegen;
pub mod pst;
pub mod search;
pub mod see;
pub mod state;
pub mod types;
mod types_support;

pub use error::{FenError, MoveParseError, SquareError};
pub use movegen::parse_uci_move;
pub use state::{Board, ExclusionGuard, NullMoveInfo, RepetitionTable, UnmakeInfo};
pub use types::{Bitboard, CastlingRights, Color, Move, MoveList, Piece, PieceKind, Square};
