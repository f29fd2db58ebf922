/// This module contains the error definition for the Plakoto game.
use std::fmt;

/// Reasons why a move is refused by the rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// The player has no checker on the start field
    NoCheckerAtSource,
    /// The distance does not match an unused die, or the move goes backward
    WrongDistance,
    /// Two or more opposing checkers on the destination
    Blocked,
    /// The checker on the start field is pinned by the opponent
    PinnedSource,
    /// The opposing checker on the destination is already pinning one of ours
    PinnedDestination,
    /// Bearing off requires all checkers home and the furthest checker to move
    NotEligibleForBearingOff,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MoveError::NoCheckerAtSource => write!(f, "no checker at source"),
            MoveError::WrongDistance => write!(f, "wrong distance"),
            MoveError::Blocked => write!(f, "blocked"),
            MoveError::PinnedSource => write!(f, "pinned source"),
            MoveError::PinnedDestination => write!(f, "pinned destination"),
            MoveError::NotEligibleForBearingOff => write!(f, "not eligible for bearing off"),
        }
    }
}

/// Holds all possible errors that can occur during a Plakoto game.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Field index outside of the board
    OutOfRange(i8),
    /// Move refused by the rules
    IllegalMove(MoveError),
    /// No checker of the player left on the board
    NoCheckersOnBoard,
    /// Game has already ended
    GameEnded,
    /// Roll first
    RollFirst,
    /// Move first
    MoveFirst,
    /// Turn must be ended first
    EndTurnFirst,
    /// Dice Invalid
    DiceInvalid,
    /// Board position breaking the game invariants
    PositionInvalid,
    /// Saved game could not be encoded or decoded
    Encoding(String),
}

// implement Error trait
impl std::error::Error for Error {}

impl From<MoveError> for Error {
    fn from(err: MoveError) -> Self {
        Error::IllegalMove(err)
    }
}

// implement Display trait
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::OutOfRange(field) => write!(f, "Field {} out of range", field),
            Error::IllegalMove(reason) => write!(f, "Illegal move: {}", reason),
            Error::NoCheckersOnBoard => write!(f, "No checkers on board"),
            Error::GameEnded => write!(f, "Game has already ended"),
            Error::RollFirst => write!(f, "Roll first"),
            Error::MoveFirst => write!(f, "Move first"),
            Error::EndTurnFirst => write!(f, "End turn first"),
            Error::DiceInvalid => write!(f, "Invalid dice"),
            Error::PositionInvalid => write!(f, "Invalid position"),
            Error::Encoding(msg) => write!(f, "Encoding error: {}", msg),
        }
    }
}
