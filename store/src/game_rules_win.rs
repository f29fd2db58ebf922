use crate::board::Board;
use crate::player::{Player, CHECKERS_PER_PLAYER};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a game was won
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WinKind {
    /// All checkers borne off, the opponent has borne off some
    Simple,
    /// All checkers borne off before the opponent bore off any
    Double,
    /// The last checker on the opponent's mother field got pinned
    Triple,
}

impl WinKind {
    /// Points scored by the winner
    pub fn points(&self) -> u8 {
        match self {
            WinKind::Simple => 1,
            WinKind::Double => 2,
            WinKind::Triple => 3,
        }
    }
}

impl fmt::Display for WinKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WinKind::Simple => write!(f, "simple win"),
            WinKind::Double => write!(f, "double win"),
            WinKind::Triple => write!(f, "triple win"),
        }
    }
}

/// Winner of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub winner: Player,
    pub kind: WinKind,
}

/// Classify the position from the point of view of `player`, who just moved
///
/// Pinning the opponent's mother field wins at once, whatever the bear off race looks like.
pub fn check_win(board: &Board, borne_off: (u8, u8), player: Player) -> Option<WinKind> {
    let opponent = player.opponent();
    let mother = board.pinned_by(opponent.mother_field()).ok().flatten();
    if mother == Some(player) {
        return Some(WinKind::Triple);
    }

    let (own, other) = match player {
        Player::One => borne_off,
        Player::Two => (borne_off.1, borne_off.0),
    };
    if own < CHECKERS_PER_PLAYER {
        return None;
    }
    if other == 0 {
        Some(WinKind::Double)
    } else {
        Some(WinKind::Simple)
    }
}
