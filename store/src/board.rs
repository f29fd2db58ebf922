use crate::player::{Player, CHECKERS_PER_PLAYER};
use crate::{Error, MoveError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a board field, from 0 to 23
pub type Field = usize;

pub const FIELDS_COUNT: usize = 24;

/// A field of the board: checkers of both players and pin status
///
/// Checkers of both players share a field only when one of them pins the lone checker of the
/// other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    /// Checkers count of player one and player two
    pub checkers: (u8, u8),
    /// Player pinning the lone opposing checker of this field, if any
    pub pinned_by: Option<Player>,
}

impl Point {
    pub fn new(player_one: u8, player_two: u8, pinned_by: Option<Player>) -> Self {
        Point {
            checkers: (player_one, player_two),
            pinned_by,
        }
    }

    pub fn count(&self, player: Player) -> u8 {
        match player {
            Player::One => self.checkers.0,
            Player::Two => self.checkers.1,
        }
    }

    fn count_mut(&mut self, player: Player) -> &mut u8 {
        match player {
            Player::One => &mut self.checkers.0,
            Player::Two => &mut self.checkers.1,
        }
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned_by.is_some()
    }
}

/// Where a checker lands: a field of the board, or out of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Destination {
    Point(Field),
    BearOff,
}

/// A checker move from a field to a raw target index
///
/// The target keeps the exact index reached with the die, including off board values (`-1`
/// for a player one exact bear off, `-3` for an overshoot), so the move can be reported as the
/// player entered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CheckerMove {
    from: Field,
    to: i8,
}

impl CheckerMove {
    pub fn new(from: i8, to: i8) -> Result<Self, Error> {
        if !(0..FIELDS_COUNT as i8).contains(&from) {
            return Err(Error::OutOfRange(from));
        }
        Ok(CheckerMove {
            from: from as Field,
            to,
        })
    }

    /// Move of `player` from `from`, `distance` fields forward
    pub fn with_distance(player: Player, from: Field, distance: u8) -> Self {
        CheckerMove {
            from,
            to: player.target(from, distance),
        }
    }

    pub fn get_from(&self) -> Field {
        self.from
    }

    pub fn get_to(&self) -> i8 {
        self.to
    }

    /// Number of fields between both ends
    pub fn distance(&self) -> u8 {
        let distance = (i16::from(self.to) - self.from as i16).unsigned_abs();
        u8::try_from(distance).unwrap_or(u8::MAX)
    }

    pub fn destination(&self) -> Destination {
        if (0..FIELDS_COUNT as i8).contains(&self.to) {
            Destination::Point(self.to as Field)
        } else {
            Destination::BearOff
        }
    }

    pub fn is_bear_off(&self) -> bool {
        self.destination() == Destination::BearOff
    }
}

impl fmt::Display for CheckerMove {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.destination() {
            Destination::Point(to) => write!(f, "{} -> {}", self.from, to),
            Destination::BearOff => write!(f, "{} -> off", self.from),
        }
    }
}

/// Side effects of a checker move on the board
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveEffect {
    /// A lone opposing checker got pinned on the destination
    pub pinned: bool,
    /// The start field lost its pin because the last pinning checker left it
    pub released: bool,
    /// The checker left the board
    pub borne_off: bool,
}

/// Represents the Plakoto board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    points: [Point; FIELDS_COUNT],
}

impl Default for Board {
    fn default() -> Self {
        let mut board = Board::empty();
        board.points[Player::One.mother_field()] = Point::new(CHECKERS_PER_PLAYER, 0, None);
        board.points[Player::Two.mother_field()] = Point::new(0, CHECKERS_PER_PLAYER, None);
        board
    }
}

// implement Display trait
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let fields: Vec<String> = self
            .points
            .iter()
            .map(|point| {
                let pin = match point.pinned_by {
                    Some(player) => format!("*{}", player.to_char()),
                    None => "".into(),
                };
                format!("{}/{}{}", point.checkers.0, point.checkers.1, pin)
            })
            .collect();
        write!(f, "[{}]", fields.join(", "))
    }
}

impl Board {
    /// Create a new board with the initial layout
    pub fn new() -> Self {
        Board::default()
    }

    /// A board without any checker
    pub fn empty() -> Self {
        Board {
            points: [Point::default(); FIELDS_COUNT],
        }
    }

    fn check_field(field: Field) -> Result<(), Error> {
        if field >= FIELDS_COUNT {
            return Err(Error::OutOfRange(field.min(i8::MAX as usize) as i8));
        }
        Ok(())
    }

    pub fn get_point(&self, field: Field) -> Result<Point, Error> {
        Board::check_field(field)?;
        Ok(self.points[field])
    }

    /// Replace the content of a field. No invariant is checked here, see `check_invariants`.
    pub fn set_point(&mut self, field: Field, point: Point) -> Result<(), Error> {
        Board::check_field(field)?;
        self.points[field] = point;
        Ok(())
    }

    pub fn points(&self) -> &[Point; FIELDS_COUNT] {
        &self.points
    }

    pub fn count_at(&self, field: Field, player: Player) -> Result<u8, Error> {
        Ok(self.get_point(field)?.count(player))
    }

    pub fn pinned_by(&self, field: Field) -> Result<Option<Player>, Error> {
        Ok(self.get_point(field)?.pinned_by)
    }

    pub fn checkers_on_board(&self, player: Player) -> u8 {
        self.points.iter().map(|point| point.count(player)).sum()
    }

    /// Fields holding checkers of the player, with their count, in ascending order
    pub fn fields_of(&self, player: Player) -> Vec<(Field, u8)> {
        self.points
            .iter()
            .enumerate()
            .filter(|(_field, point)| point.count(player) > 0)
            .map(|(field, point)| (field, point.count(player)))
            .collect()
    }

    /// True when every checker of the player is either in its home range or borne off
    pub fn all_checkers_home(&self, player: Player, borne_off: u8) -> bool {
        let home: u8 = self.points[player.home_range()]
            .iter()
            .map(|point| point.count(player))
            .sum();
        home + borne_off == CHECKERS_PER_PLAYER
    }

    /// Field of the checker furthest from the bear off edge of the player
    pub fn furthest_checker(&self, player: Player) -> Result<Field, Error> {
        let fields = self.fields_of(player);
        let furthest = match player {
            Player::One => fields.last(),
            Player::Two => fields.first(),
        };
        furthest
            .map(|(field, _count)| *field)
            .ok_or(Error::NoCheckersOnBoard)
    }

    /// Move a checker of `player`, pinning a lone opposing checker on the destination
    ///
    /// Only the physical constraints are checked here (a checker to move, a reachable
    /// destination), the dice and bear off rules belong to `MoveRules`. Nothing is modified
    /// when an error is returned.
    pub fn move_checker(
        &mut self,
        player: Player,
        cmove: &CheckerMove,
    ) -> Result<MoveEffect, Error> {
        let from = cmove.get_from();
        Board::check_field(from)?;
        if self.points[from].count(player) == 0 {
            return Err(Error::IllegalMove(MoveError::NoCheckerAtSource));
        }
        let opponent = player.opponent();
        if self.points[from].pinned_by == Some(opponent) {
            return Err(Error::IllegalMove(MoveError::PinnedSource));
        }
        if let Destination::Point(to) = cmove.destination() {
            let target = self.points[to];
            if target.count(opponent) > 1 {
                return Err(Error::IllegalMove(MoveError::Blocked));
            }
            if target.pinned_by == Some(opponent) {
                return Err(Error::IllegalMove(MoveError::PinnedDestination));
            }
        }

        let mut effect = MoveEffect::default();
        let source = &mut self.points[from];
        *source.count_mut(player) -= 1;
        if source.count(player) == 0 && source.pinned_by.take().is_some() {
            effect.released = true;
        }

        match cmove.destination() {
            Destination::BearOff => effect.borne_off = true,
            Destination::Point(to) => {
                let target = &mut self.points[to];
                *target.count_mut(player) += 1;
                if target.count(opponent) == 1 && target.pinned_by.is_none() {
                    target.pinned_by = Some(player);
                    effect.pinned = true;
                }
            }
        }
        Ok(effect)
    }

    /// Check the checkers conservation and pin consistency
    pub fn check_invariants(&self, borne_off: (u8, u8)) -> Result<(), Error> {
        for (player, off) in [(Player::One, borne_off.0), (Player::Two, borne_off.1)] {
            if self.checkers_on_board(player) as u16 + off as u16 != CHECKERS_PER_PLAYER as u16 {
                return Err(Error::PositionInvalid);
            }
        }
        for point in self.points.iter() {
            match point.pinned_by {
                Some(owner) => {
                    if point.count(owner) == 0 || point.count(owner.opponent()) != 1 {
                        return Err(Error::PositionInvalid);
                    }
                }
                None => {
                    if point.checkers.0 > 0 && point.checkers.1 > 0 {
                        return Err(Error::PositionInvalid);
                    }
                }
            }
        }
        Ok(())
    }
}
