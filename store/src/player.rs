use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

use crate::board::Field;

/// Number of checkers each player starts with.
pub const CHECKERS_PER_PLAYER: u8 = 15;

/// Represents a player in the game.
///
/// Plakoto is played by exactly two players. Player one starts with all of its checkers on
/// field 23 and moves toward field 0, player two starts on field 0 and moves toward field 23.
#[derive(
    Debug, Clone, Copy, Eq, Ord, PartialEq, PartialOrd, Hash, Serialize, Deserialize, Default,
)]
pub enum Player {
    /// Player 1, plays first
    #[default]
    One,
    /// Player 2
    Two,
}

impl Player {
    /// Returns the other player
    pub fn opponent(&self) -> Self {
        match *self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Position of the player in per-player tuples and arrays
    pub fn index(&self) -> usize {
        match *self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    /// The starting stack of the player. Pinning the last checker there wins the game.
    pub fn mother_field(&self) -> Field {
        match *self {
            Player::One => 23,
            Player::Two => 0,
        }
    }

    /// The six fields next to the bear off edge of the player
    pub fn home_range(&self) -> Range<Field> {
        match *self {
            Player::One => 0..6,
            Player::Two => 18..24,
        }
    }

    pub fn is_home(&self, field: Field) -> bool {
        self.home_range().contains(&field)
    }

    /// Index reached by moving `distance` fields forward from `from`. May be off board.
    pub fn target(&self, from: Field, distance: u8) -> i8 {
        match *self {
            Player::One => from as i8 - distance as i8,
            Player::Two => from as i8 + distance as i8,
        }
    }

    /// Signed number of fields travelled from `start` to `end`, positive when moving forward.
    pub fn forward_distance(&self, start: i8, end: i8) -> i16 {
        let (start, end) = (i16::from(start), i16::from(end));
        match *self {
            Player::One => start - end,
            Player::Two => end - start,
        }
    }

    pub fn to_char(&self) -> char {
        match *self {
            Player::One => 'o',
            Player::Two => 'x',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Player::One => write!(f, "Player 1"),
            Player::Two => write!(f, "Player 2"),
        }
    }
}
