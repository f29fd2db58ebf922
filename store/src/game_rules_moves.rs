//! # Plakoto moves rules
use crate::board::{Board, CheckerMove, Destination};
use crate::error::MoveError;
use crate::player::Player;
use crate::Error;

/// Checks the moves of a player against the board and the remaining dice
///
/// The rules are a pure function of the position: checking the same move twice gives the same
/// answer and never modifies anything.
#[derive(Debug, Clone, Copy)]
pub struct MoveRules<'a> {
    pub player: Player,
    pub board: &'a Board,
    /// Checkers of `player` already borne off
    pub borne_off: u8,
    /// Distances not played yet this turn
    pub moves: &'a [u8],
}

impl<'a> MoveRules<'a> {
    pub fn new(player: Player, board: &'a Board, borne_off: u8, moves: &'a [u8]) -> Self {
        MoveRules {
            player,
            board,
            borne_off,
            moves,
        }
    }

    /// Whether the player may bear off with the checker on `from`: every checker home, and this
    /// one is the furthest from the edge.
    pub fn can_bear_off_from(&self, from: usize) -> bool {
        self.board.all_checkers_home(self.player, self.borne_off)
            && self.board.furthest_checker(self.player).ok() == Some(from)
    }

    /// Check a move, returning the first rule it breaks
    pub fn check_move(&self, cmove: &CheckerMove) -> Result<(), Error> {
        let opponent = self.player.opponent();
        let from = cmove.get_from();
        let source = self.board.get_point(from)?;

        if source.count(self.player) == 0 {
            return Err(MoveError::NoCheckerAtSource.into());
        }

        let forward = self
            .player
            .forward_distance(from as i8, cmove.get_to());
        if forward <= 0 || !self.moves.contains(&cmove.distance()) {
            return Err(MoveError::WrongDistance.into());
        }

        match cmove.destination() {
            Destination::BearOff => {
                if !self.can_bear_off_from(from) {
                    return Err(MoveError::NotEligibleForBearingOff.into());
                }
            }
            Destination::Point(to) => {
                let target = self.board.get_point(to)?;
                match target.count(opponent) {
                    0 => {}
                    1 => {
                        if target.pinned_by == Some(opponent) {
                            return Err(MoveError::PinnedDestination.into());
                        }
                    }
                    _ => return Err(MoveError::Blocked.into()),
                }
            }
        }

        if source.pinned_by == Some(opponent) {
            return Err(MoveError::PinnedSource.into());
        }
        Ok(())
    }

    pub fn is_legal(&self, cmove: &CheckerMove) -> bool {
        self.check_move(cmove).is_ok()
    }

    /// All legal moves, by ascending start field then in the order of the remaining dice
    pub fn get_possible_moves(&self) -> Vec<CheckerMove> {
        let mut distances: Vec<u8> = Vec::with_capacity(self.moves.len());
        for distance in self.moves {
            if !distances.contains(distance) {
                distances.push(*distance);
            }
        }

        let mut moves = Vec::new();
        for (from, _count) in self.board.fields_of(self.player) {
            for distance in distances.iter() {
                let cmove = CheckerMove::with_distance(self.player, from, *distance);
                if self.is_legal(&cmove) {
                    moves.push(cmove);
                }
            }
        }
        moves
    }
}
