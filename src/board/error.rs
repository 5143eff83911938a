//! Error types surfaced at the edges of the board crate: FEN parsing, square
//! parsing, and long-algebraic move parsing. Internal invariants (make/unmake
//! pairing, TT bookkeeping) panic instead, since violating them is a bug, not
//! recoverable user input.

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SquareError {
    BadLength(String),
    OutOfRange(String),
}

impl fmt::Display for SquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareError::BadLength(s) => write!(f, "square must be 2 characters: {s:?}"),
            SquareError::OutOfRange(s) => write!(f, "square out of range: {s:?}"),
        }
    }
}

impl std::error::Error for SquareError {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FenError {
    WrongFieldCount(usize),
    BadBoard(String),
    BadSideToMove(String),
    BadCastling(String),
    BadEnPassant(SquareError),
    BadHalfmove(String),
    BadFullmove(String),
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::WrongFieldCount(n) => write!(f, "FEN must have 6 fields, found {n}"),
            FenError::BadBoard(s) => write!(f, "bad piece placement field: {s:?}"),
            FenError::BadSideToMove(s) => write!(f, "bad side-to-move field: {s:?}"),
            FenError::BadCastling(s) => write!(f, "bad castling field: {s:?}"),
            FenError::BadEnPassant(e) => write!(f, "bad en-passant field: {e}"),
            FenError::BadHalfmove(s) => write!(f, "bad halfmove clock: {s:?}"),
            FenError::BadFullmove(s) => write!(f, "bad fullmove number: {s:?}"),
        }
    }
}

impl std::error::Error for FenError {}

impl From<SquareError> for FenError {
    fn from(e: SquareError) -> Self {
        FenError::BadEnPassant(e)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveParseError {
    BadLength(String),
    BadSquare(SquareError),
    BadPromotion(char),
    Illegal(String),
}

impl fmt::Display for MoveParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveParseError::BadLength(s) => write!(f, "move must be 4 or 5 characters: {s:?}"),
            MoveParseError::BadSquare(e) => write!(f, "{e}"),
            MoveParseError::BadPromotion(c) => write!(f, "unrecognized promotion piece: {c:?}"),
            MoveParseError::Illegal(s) => write!(f, "move is not legal in this position: {s}"),
        }
    }
}

impl std::error::Error for MoveParseError {}

impl From<SquareError> for MoveParseError {
    fn from(e: SquareError) -> Self {
        MoveParseError::BadSquare(e)
    }
}
