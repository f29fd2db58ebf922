//! # Play a Plakoto Game
use crate::board::{Board, CheckerMove, Field, MoveEffect, FIELDS_COUNT};
use crate::dice::{Dice, DieSource};
use crate::game_rules_moves::MoveRules;
use crate::game_rules_win::{check_win, Outcome, WinKind};
use crate::player::Player;
use crate::Error;
use log::{debug, info, warn};

use serde::{Deserialize, Serialize};
use std::fmt;

use base64::{engine::general_purpose, Engine as _};

/// The different stages a game turn can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TurnStage {
    /// The active player must roll the dice
    #[default]
    AwaitingRoll,
    /// The active player must play one of the remaining distances
    AwaitingMove,
    /// Nothing left to play, the turn must be ended
    TurnComplete,
    /// The game is won, nothing can change anymore
    GameOver,
}

/// A checker move played by a player, as kept in the game history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub player: Player,
    pub cmove: CheckerMove,
}

impl MoveRecord {
    pub fn start(&self) -> Field {
        self.cmove.get_from()
    }

    pub fn end(&self) -> i8 {
        self.cmove.get_to()
    }
}

/// Something that happened during the game, in the order it happened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Rolled { player: Player, dice: Dice },
    /// The roll gave no legal move, the turn is void
    Passed { player: Player },
    Moved { player: Player, cmove: CheckerMove },
    Pinned { player: Player, field: Field },
    Released { player: Player, field: Field },
    BorneOff { player: Player, total: u8 },
    /// `forfeited` holds the distances which could not be played
    TurnEnded { player: Player, forfeited: Vec<u8> },
    GameWon { outcome: Outcome },
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GameEvent::Rolled { player, dice } => {
                write!(f, "{} rolled {}", player, dice.to_display_string())
            }
            GameEvent::Passed { player } => write!(f, "{} cannot move", player),
            GameEvent::Moved { player, cmove } => write!(f, "{} moved {}", player, cmove),
            GameEvent::Pinned { player, field } => write!(f, "{} pinned on {}", player, field),
            GameEvent::Released { player, field } => {
                write!(f, "{} released the pin on {}", player, field)
            }
            GameEvent::BorneOff { player, total } => {
                write!(f, "{} bore off ({} off)", player, total)
            }
            GameEvent::TurnEnded { player, forfeited } => {
                if forfeited.is_empty() {
                    write!(f, "{} ended the turn", player)
                } else {
                    write!(f, "{} ended the turn, {:?} lost", player, forfeited)
                }
            }
            GameEvent::GameWon { outcome } => {
                write!(f, "{} wins by {}", outcome.winner, outcome.kind)
            }
        }
    }
}

/// Represents a Plakoto game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    turn_stage: TurnStage,
    board: Board,
    active_player: Player,
    /// last dice pair rolled
    dice: Dice,
    /// distances not played yet this turn
    moves: Vec<u8>,
    /// checkers borne off by player one and player two
    borne_off: (u8, u8),
    move_history: Vec<MoveRecord>,
    history: Vec<GameEvent>,
    outcome: Option<Outcome>,
}

// implement Display trait
impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut s = String::new();
        s.push_str(&format!(
            "Stage: {:?} / {}\n",
            self.turn_stage, self.active_player
        ));
        s.push_str(&format!("Dice: {:?} moves: {:?}\n", self.dice, self.moves));
        s.push_str(&format!("Borne off: {:?}\n", self.borne_off));
        s.push_str(&format!("Board: {}\n", self.board));
        write!(f, "{}", s)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            turn_stage: TurnStage::AwaitingRoll,
            board: Board::default(),
            active_player: Player::One,
            dice: Dice::default(),
            moves: Vec::new(),
            borne_off: (0, 0),
            move_history: Vec::new(),
            history: Vec::new(),
            outcome: None,
        }
    }
}

impl GameState {
    /// Create a new game, player one to roll
    pub fn new() -> Self {
        GameState::default()
    }

    /// Start a game from an arbitrary position
    ///
    /// The position must respect the checkers conservation and the pin rules. If it is already
    /// won (the opponent of `active_player` is checked first), the game starts in `GameOver`.
    pub fn from_position(
        board: Board,
        active_player: Player,
        borne_off: (u8, u8),
    ) -> Result<Self, Error> {
        board.check_invariants(borne_off)?;
        let mut state = GameState {
            board,
            active_player,
            borne_off,
            ..GameState::default()
        };
        for player in [active_player.opponent(), active_player] {
            if let Some(kind) = state.check_winner(player) {
                state.win(player, kind);
                break;
            }
        }
        Ok(state)
    }

    // -------------------------------------------------------------------------
    //                        accessors
    // -------------------------------------------------------------------------

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn who_plays(&self) -> Player {
        self.active_player
    }

    pub fn turn_stage(&self) -> TurnStage {
        self.turn_stage
    }

    pub fn dice(&self) -> Dice {
        self.dice
    }

    /// Distances left to play this turn
    pub fn remaining_moves(&self) -> &[u8] {
        &self.moves
    }

    pub fn borne_off(&self, player: Player) -> u8 {
        match player {
            Player::One => self.borne_off.0,
            Player::Two => self.borne_off.1,
        }
    }

    pub fn move_history(&self) -> &[MoveRecord] {
        &self.move_history
    }

    /// Every event since the start of the game
    pub fn history(&self) -> &[GameEvent] {
        &self.history
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.turn_stage == TurnStage::GameOver
    }

    // ----------------------------------------------------------------------------------
    //                          Rules checks
    // ----------------------------------------------------------------------------------

    /// Move rules for the active player and the remaining distances
    pub fn rules(&self) -> MoveRules<'_> {
        MoveRules::new(
            self.active_player,
            &self.board,
            self.borne_off(self.active_player),
            &self.moves,
        )
    }

    /// Win classification of the current position for `player`
    pub fn check_winner(&self, player: Player) -> Option<WinKind> {
        check_win(&self.board, self.borne_off, player)
    }

    fn check_can_move(&self) -> Result<(), Error> {
        match self.turn_stage {
            TurnStage::AwaitingMove => Ok(()),
            TurnStage::AwaitingRoll => Err(Error::RollFirst),
            TurnStage::TurnComplete => Err(Error::EndTurnFirst),
            TurnStage::GameOver => Err(Error::GameEnded),
        }
    }

    fn check_can_roll(&self) -> Result<(), Error> {
        match self.turn_stage {
            TurnStage::AwaitingRoll => Ok(()),
            TurnStage::AwaitingMove => Err(Error::MoveFirst),
            TurnStage::TurnComplete => Err(Error::EndTurnFirst),
            TurnStage::GameOver => Err(Error::GameEnded),
        }
    }

    /// Check the move of the active player from `start` to `end`, reporting why it is refused
    pub fn check_move(&self, start: i8, end: i8) -> Result<CheckerMove, Error> {
        self.check_can_move()?;
        let cmove = CheckerMove::new(start, end)?;
        self.rules().check_move(&cmove)?;
        Ok(cmove)
    }

    pub fn is_legal(&self, start: i8, end: i8) -> bool {
        self.check_move(start, end).is_ok()
    }

    /// Legal moves of the active player, empty unless a move is expected
    pub fn legal_moves(&self) -> Vec<CheckerMove> {
        if self.turn_stage != TurnStage::AwaitingMove {
            return vec![];
        }
        self.rules().get_possible_moves()
    }

    // ----------------------------------------------------------------------------------
    //                   State updates
    // ----------------------------------------------------------------------------------

    /// Roll the dice for the active player, see `set_dice`
    pub fn roll<S: DieSource + ?Sized>(&mut self, source: &mut S) -> Result<Vec<CheckerMove>, Error> {
        self.check_can_roll()?;
        let dice = Dice::roll(source)?;
        self.set_dice(dice)
    }

    /// Start the turn of the active player with the given dice
    ///
    /// Returns the legal moves. When there is none the turn is void and the other player is
    /// expected to roll.
    pub fn set_dice(&mut self, dice: Dice) -> Result<Vec<CheckerMove>, Error> {
        self.check_can_roll()?;
        let player = self.active_player;
        self.dice = dice;
        self.moves = dice.moves();
        debug!("{} rolled {:?}", player, dice.values);
        self.history.push(GameEvent::Rolled { player, dice });

        self.turn_stage = TurnStage::AwaitingMove;
        let legal_moves = self.legal_moves();
        if legal_moves.is_empty() {
            info!("{} has no legal move with {:?}", player, dice.values);
            self.history.push(GameEvent::Passed { player });
            self.moves.clear();
            self.switch_active_player();
        }
        Ok(legal_moves)
    }

    /// Play a move of the active player from `start` to `end`
    ///
    /// Either the whole move is applied (board, borne off count, remaining distances, history)
    /// or, when an error is returned, nothing changes.
    pub fn play_move(&mut self, start: i8, end: i8) -> Result<MoveEffect, Error> {
        let cmove = match self.check_move(start, end) {
            Ok(cmove) => cmove,
            Err(err) => {
                warn!("{} move {} -> {} refused: {}", self.active_player, start, end, err);
                return Err(err);
            }
        };
        let player = self.active_player;
        let effect = self.board.move_checker(player, &cmove)?;

        if let Some(pos) = self.moves.iter().position(|d| *d == cmove.distance()) {
            self.moves.remove(pos);
        }
        self.move_history.push(MoveRecord { player, cmove });
        debug!("{} moved {}", player, cmove);
        self.history.push(GameEvent::Moved { player, cmove });

        if effect.released {
            self.history.push(GameEvent::Released {
                player,
                field: cmove.get_from(),
            });
        }
        if effect.borne_off {
            let total = match player {
                Player::One => {
                    self.borne_off.0 += 1;
                    self.borne_off.0
                }
                Player::Two => {
                    self.borne_off.1 += 1;
                    self.borne_off.1
                }
            };
            self.history.push(GameEvent::BorneOff { player, total });
        } else if effect.pinned {
            let field = cmove.get_to() as Field;
            info!("{} pinned a checker on {}", player, field);
            self.history.push(GameEvent::Pinned { player, field });
        }

        if let Some(kind) = self.check_winner(player) {
            self.win(player, kind);
        } else if self.moves.is_empty() {
            self.turn_stage = TurnStage::TurnComplete;
        } else if self.legal_moves().is_empty() {
            info!("{} cannot play {:?}", player, self.moves);
            self.turn_stage = TurnStage::TurnComplete;
        }
        Ok(effect)
    }

    /// Hand over to the other player once the turn is complete
    pub fn end_turn(&mut self) -> Result<(), Error> {
        match self.turn_stage {
            TurnStage::TurnComplete => {}
            TurnStage::GameOver => return Err(Error::GameEnded),
            TurnStage::AwaitingRoll => return Err(Error::RollFirst),
            TurnStage::AwaitingMove => return Err(Error::MoveFirst),
        }
        let player = self.active_player;
        if let Some(kind) = self.check_winner(player) {
            self.win(player, kind);
            return Ok(());
        }
        let forfeited = std::mem::take(&mut self.moves);
        self.history.push(GameEvent::TurnEnded { player, forfeited });
        self.switch_active_player();
        Ok(())
    }

    fn switch_active_player(&mut self) {
        self.active_player = self.active_player.opponent();
        self.turn_stage = TurnStage::AwaitingRoll;
        debug!("{} to roll", self.active_player);
    }

    fn win(&mut self, winner: Player, kind: WinKind) {
        let outcome = Outcome { winner, kind };
        info!("{} wins by {}", winner, kind);
        self.outcome = Some(outcome);
        self.turn_stage = TurnStage::GameOver;
        self.history.push(GameEvent::GameWon { outcome });
    }

    // ----------------------------------------------------------------------------------
    //                   Persistence
    // ----------------------------------------------------------------------------------

    /// Encode the whole game (position, turn, history) in a printable string
    pub fn to_string_id(&self) -> Result<String, Error> {
        let bytes = bincode::serialize(self).map_err(|e| Error::Encoding(e.to_string()))?;
        Ok(general_purpose::STANDARD.encode(bytes))
    }

    /// Restore a game saved with `to_string_id`
    pub fn from_string_id(id: &str) -> Result<Self, Error> {
        let bytes = general_purpose::STANDARD
            .decode(id.trim())
            .map_err(|e| Error::Encoding(e.to_string()))?;
        let state: GameState =
            bincode::deserialize(&bytes).map_err(|e| Error::Encoding(e.to_string()))?;
        state.check_consistency()?;
        Ok(state)
    }

    fn check_consistency(&self) -> Result<(), Error> {
        self.board.check_invariants(self.borne_off)?;
        if self.moves.len() > 4 || self.moves.iter().any(|d| !(1..=6).contains(d)) {
            return Err(Error::PositionInvalid);
        }
        if self.outcome.is_some() != (self.turn_stage == TurnStage::GameOver) {
            return Err(Error::PositionInvalid);
        }
        // the saved turn must be playable from its stage
        let playable = match self.turn_stage {
            TurnStage::AwaitingRoll => self.moves.is_empty(),
            TurnStage::AwaitingMove => !self.legal_moves().is_empty(),
            TurnStage::TurnComplete | TurnStage::GameOver => true,
        };
        if !playable {
            return Err(Error::PositionInvalid);
        }
        if self
            .move_history
            .iter()
            .any(|record| record.start() >= FIELDS_COUNT)
        {
            return Err(Error::PositionInvalid);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Point;
    use crate::dice::{DiceRoller, FixedDice};
    use crate::error::MoveError;
    use crate::player::CHECKERS_PER_PLAYER;
    use proptest::prelude::*;

    fn dice(d1: u8, d2: u8) -> Dice {
        Dice::new(d1, d2).unwrap()
    }

    fn mv(from: i8, to: i8) -> CheckerMove {
        CheckerMove::new(from, to).unwrap()
    }

    #[test]
    fn first_double() -> Result<(), Error> {
        let mut state = GameState::new();
        let legal = state.set_dice(dice(3, 3))?;
        assert_eq!(state.remaining_moves(), &[3, 3, 3, 3]);
        assert_eq!(legal, vec![mv(23, 20)]);
        assert!(state.is_legal(23, 20));

        state.play_move(23, 20)?;
        assert_eq!(state.board().get_point(23)?, Point::new(14, 0, None));
        assert_eq!(state.board().get_point(20)?, Point::new(1, 0, None));
        assert_eq!(state.remaining_moves(), &[3, 3, 3]);
        assert_eq!(state.turn_stage(), TurnStage::AwaitingMove);
        assert_eq!(
            state.move_history(),
            &[MoveRecord {
                player: Player::One,
                cmove: mv(23, 20)
            }]
        );
        Ok(())
    }

    #[test]
    fn pinning_move() -> Result<(), Error> {
        let mut board = Board::new();
        board.set_point(0, Point::new(0, 14, None))?;
        board.set_point(19, Point::new(0, 1, None))?;
        let mut state = GameState::from_position(board, Player::One, (0, 0))?;
        state.set_dice(dice(4, 1))?;
        let effect = state.play_move(23, 19)?;
        assert!(effect.pinned);
        assert_eq!(
            state.board().get_point(19)?,
            Point::new(1, 1, Some(Player::One))
        );
        assert!(state.history().contains(&GameEvent::Pinned {
            player: Player::One,
            field: 19
        }));
        Ok(())
    }

    #[test]
    fn pinned_source_refused() -> Result<(), Error> {
        let mut board = Board::new();
        board.set_point(0, Point::new(0, 14, None))?;
        board.set_point(23, Point::new(14, 0, None))?;
        board.set_point(12, Point::new(1, 1, Some(Player::Two)))?;
        let mut state = GameState::from_position(board, Player::One, (0, 0))?;
        state.set_dice(dice(3, 5))?;
        assert!(!state.is_legal(12, 9));
        assert_eq!(
            state.check_move(12, 9),
            Err(Error::IllegalMove(MoveError::PinnedSource))
        );
        let before = state.clone();
        assert_eq!(
            state.play_move(12, 9),
            Err(Error::IllegalMove(MoveError::PinnedSource))
        );
        assert_eq!(state, before);
        Ok(())
    }

    #[test]
    fn double_win() -> Result<(), Error> {
        let mut board = Board::empty();
        board.set_point(0, Point::new(0, 15, None))?;
        let state = GameState::from_position(board, Player::Two, (15, 0))?;
        assert_eq!(state.check_winner(Player::One), Some(WinKind::Double));
        assert_eq!(
            state.outcome(),
            Some(Outcome {
                winner: Player::One,
                kind: WinKind::Double
            })
        );
        assert!(state.is_over());

        // by playing the last checker
        let mut board = Board::empty();
        board.set_point(0, Point::new(1, 0, None))?;
        board.set_point(20, Point::new(0, 15, None))?;
        let mut state = GameState::from_position(board, Player::One, (14, 0))?;
        state.set_dice(dice(1, 2))?;
        state.play_move(0, -1)?;
        assert_eq!(
            state.outcome(),
            Some(Outcome {
                winner: Player::One,
                kind: WinKind::Double
            })
        );
        assert_eq!(state.turn_stage(), TurnStage::GameOver);
        Ok(())
    }

    #[test]
    fn simple_win() -> Result<(), Error> {
        let mut board = Board::empty();
        board.set_point(22, Point::new(0, 1, None))?;
        board.set_point(3, Point::new(12, 0, None))?;
        let mut state = GameState::from_position(board, Player::Two, (3, 14))?;
        state.set_dice(dice(2, 6))?;
        state.play_move(22, 24)?;
        assert_eq!(
            state.outcome(),
            Some(Outcome {
                winner: Player::Two,
                kind: WinKind::Simple
            })
        );
        Ok(())
    }

    #[test]
    fn triple_win() -> Result<(), Error> {
        let mut board = Board::empty();
        board.set_point(0, Point::new(0, 1, None))?;
        board.set_point(10, Point::new(0, 14, None))?;
        board.set_point(3, Point::new(1, 0, None))?;
        board.set_point(23, Point::new(14, 0, None))?;
        let mut state = GameState::from_position(board, Player::One, (0, 0))?;
        state.set_dice(dice(3, 5))?;
        state.play_move(3, 0)?;
        assert_eq!(
            state.board().get_point(0)?,
            Point::new(1, 1, Some(Player::One))
        );
        assert_eq!(
            state.outcome(),
            Some(Outcome {
                winner: Player::One,
                kind: WinKind::Triple
            })
        );
        // nothing is accepted anymore
        assert_eq!(state.remaining_moves(), &[5]);
        assert_eq!(state.play_move(23, 18), Err(Error::GameEnded));
        assert_eq!(state.end_turn(), Err(Error::GameEnded));
        assert_eq!(state.set_dice(dice(1, 1)), Err(Error::GameEnded));
        assert!(state.legal_moves().is_empty());
        Ok(())
    }

    #[test]
    fn turn_sequence() -> Result<(), Error> {
        let mut state = GameState::new();
        assert_eq!(state.play_move(23, 20), Err(Error::RollFirst));
        assert_eq!(state.end_turn(), Err(Error::RollFirst));

        let mut source = FixedDice::new(&[5, 2, 6, 1]);
        state.roll(&mut source)?;
        assert_eq!(state.roll(&mut source), Err(Error::MoveFirst));
        // the refused roll did not consume the dice
        assert_eq!(source.remaining(), 2);

        state.play_move(23, 18)?;
        assert_eq!(state.end_turn(), Err(Error::MoveFirst));
        state.play_move(18, 16)?;
        assert_eq!(state.turn_stage(), TurnStage::TurnComplete);
        assert_eq!(state.play_move(16, 14), Err(Error::EndTurnFirst));
        assert_eq!(state.roll(&mut source), Err(Error::EndTurnFirst));

        state.end_turn()?;
        assert_eq!(state.who_plays(), Player::Two);
        assert_eq!(state.turn_stage(), TurnStage::AwaitingRoll);
        assert!(state.remaining_moves().is_empty());

        let legal = state.roll(&mut source)?;
        assert_eq!(state.dice(), dice(6, 1));
        assert_eq!(legal, vec![mv(0, 6), mv(0, 1)]);
        Ok(())
    }

    #[test]
    fn void_turn() -> Result<(), Error> {
        // player one is stuck behind two blocks
        let mut board = Board::empty();
        board.set_point(23, Point::new(15, 0, None))?;
        board.set_point(21, Point::new(0, 2, None))?;
        board.set_point(20, Point::new(0, 13, None))?;
        let mut state = GameState::from_position(board, Player::One, (0, 0))?;
        let legal = state.set_dice(dice(2, 3))?;
        assert!(legal.is_empty());
        assert_eq!(state.who_plays(), Player::Two);
        assert_eq!(state.turn_stage(), TurnStage::AwaitingRoll);
        assert!(state.remaining_moves().is_empty());
        assert_eq!(
            state.history().last(),
            Some(&GameEvent::Passed {
                player: Player::One
            })
        );
        Ok(())
    }

    #[test]
    fn blocked_mid_turn() -> Result<(), Error> {
        // after the first move, the 2 only lands on blocks
        let mut board = Board::empty();
        board.set_point(23, Point::new(1, 0, None))?;
        board.set_point(8, Point::new(14, 0, None))?;
        board.set_point(21, Point::new(0, 2, None))?;
        board.set_point(15, Point::new(0, 2, None))?;
        board.set_point(6, Point::new(0, 2, None))?;
        board.set_point(2, Point::new(0, 9, None))?;
        let mut state = GameState::from_position(board, Player::One, (0, 0))?;
        let legal = state.set_dice(dice(6, 2))?;
        assert_eq!(legal, vec![mv(23, 17)]);

        state.play_move(23, 17)?;
        assert_eq!(state.turn_stage(), TurnStage::TurnComplete);
        assert_eq!(state.remaining_moves(), &[2]);
        state.end_turn()?;
        assert_eq!(
            state.history().last(),
            Some(&GameEvent::TurnEnded {
                player: Player::One,
                forfeited: vec![2]
            })
        );
        Ok(())
    }

    #[test]
    fn release_pin() -> Result<(), Error> {
        let mut board = Board::empty();
        board.set_point(15, Point::new(1, 1, Some(Player::One)))?;
        board.set_point(23, Point::new(14, 0, None))?;
        board.set_point(0, Point::new(0, 14, None))?;
        let mut state = GameState::from_position(board, Player::One, (0, 0))?;
        state.set_dice(dice(4, 2))?;
        let effect = state.play_move(15, 11)?;
        assert!(effect.released);
        assert_eq!(state.board().get_point(15)?, Point::new(0, 1, None));
        Ok(())
    }

    #[test]
    fn invalid_position() {
        let mut board = Board::new();
        board.set_point(5, Point::new(1, 0, None)).unwrap();
        assert_eq!(
            GameState::from_position(board, Player::One, (0, 0)),
            Err(Error::PositionInvalid)
        );
    }

    #[test]
    fn position_already_won() -> Result<(), Error> {
        let mut board = Board::empty();
        board.set_point(23, Point::new(14, 0, None))?;
        board.set_point(0, Point::new(1, 1, Some(Player::One)))?;
        board.set_point(5, Point::new(0, 14, None))?;
        let mut state = GameState::from_position(board, Player::Two, (0, 0))?;
        assert_eq!(state.turn_stage(), TurnStage::GameOver);
        assert_eq!(
            state.outcome(),
            Some(Outcome {
                winner: Player::One,
                kind: WinKind::Triple
            })
        );
        assert_eq!(state.roll(&mut FixedDice::new(&[1, 2])), Err(Error::GameEnded));
        Ok(())
    }

    #[test]
    fn string_id() -> Result<(), Error> {
        let mut state = GameState::new();
        state.set_dice(dice(4, 4))?;
        state.play_move(23, 19)?;
        let id = state.to_string_id()?;
        let restored = GameState::from_string_id(&id)?;
        assert_eq!(restored, state);
        assert_eq!(restored.remaining_moves(), &[4, 4, 4]);

        assert!(matches!(
            GameState::from_string_id("not base64 !"),
            Err(Error::Encoding(_))
        ));
        Ok(())
    }

    #[test]
    fn string_id_rejects_broken_position() -> Result<(), Error> {
        let mut state = GameState::new();
        state.board.set_point(12, Point::new(3, 0, None))?;
        let id = state.to_string_id()?;
        assert_eq!(GameState::from_string_id(&id), Err(Error::PositionInvalid));
        Ok(())
    }

    #[test]
    fn string_id_rejects_stuck_stage() -> Result<(), Error> {
        let mut state = GameState::new();
        state.turn_stage = TurnStage::AwaitingMove;
        let id = state.to_string_id()?;
        assert_eq!(GameState::from_string_id(&id), Err(Error::PositionInvalid));

        let mut state = GameState::new();
        state.moves = vec![2, 5];
        let id = state.to_string_id()?;
        assert_eq!(GameState::from_string_id(&id), Err(Error::PositionInvalid));

        // remaining distances but nothing to play
        let mut state = GameState::new();
        state.set_dice(dice(2, 5))?;
        state.board = Board::empty();
        state.board.set_point(23, Point::new(1, 0, None))?;
        state.board.set_point(21, Point::new(0, 2, None))?;
        state.board.set_point(18, Point::new(0, 13, None))?;
        state.board.set_point(0, Point::new(14, 0, None))?;
        assert!(state.legal_moves().is_empty());
        let id = state.to_string_id()?;
        assert_eq!(GameState::from_string_id(&id), Err(Error::PositionInvalid));

        let mut state = GameState::new();
        state.set_dice(dice(2, 5))?;
        state.play_move(23, 21)?;
        state.play_move(23, 18)?;
        assert_eq!(state.turn_stage(), TurnStage::TurnComplete);
        let id = state.to_string_id()?;
        assert_eq!(GameState::from_string_id(&id)?, state);
        Ok(())
    }

    #[test]
    fn far_off_board_end_refused() -> Result<(), Error> {
        let mut state = GameState::new();
        state.set_dice(dice(3, 3))?;
        assert!(!state.is_legal(23, i8::MIN));
        assert!(!state.is_legal(23, i8::MAX));
        assert!(!state.is_legal(0, i8::MAX));
        assert_eq!(
            state.play_move(23, -120),
            Err(Error::IllegalMove(MoveError::WrongDistance))
        );
        assert_eq!(state.remaining_moves(), &[3, 3, 3, 3]);
        Ok(())
    }

    fn check_conservation(state: &GameState) {
        for player in [Player::One, Player::Two] {
            assert_eq!(
                state.board().checkers_on_board(player) + state.borne_off(player),
                CHECKERS_PER_PLAYER
            );
        }
    }

    fn check_pins(state: &GameState) {
        for point in state.board().points() {
            if let Some(owner) = point.pinned_by {
                assert_eq!(point.count(owner.opponent()), 1);
                assert!(point.count(owner) >= 1);
            }
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn random_games_keep_invariants(
            seed in any::<u64>(),
            picks in proptest::collection::vec(any::<usize>(), 1..400),
        ) {
            let mut roller = DiceRoller::new(Some(seed));
            let mut state = GameState::new();
            for pick in picks {
                check_conservation(&state);
                check_pins(&state);
                match state.turn_stage() {
                    TurnStage::AwaitingRoll => {
                        state.roll(&mut roller).unwrap();
                    }
                    TurnStage::TurnComplete => state.end_turn().unwrap(),
                    TurnStage::GameOver => break,
                    TurnStage::AwaitingMove => {
                        let player = state.who_plays();
                        let legal = state.legal_moves();
                        prop_assert!(!legal.is_empty());
                        if !state
                            .board()
                            .all_checkers_home(player, state.borne_off(player))
                        {
                            prop_assert!(legal.iter().all(|cmove| !cmove.is_bear_off()));
                        }

                        // refused moves leave everything untouched
                        let empty_field = (0..24i8)
                            .find(|field| state.board().count_at(*field as Field, player) == Ok(0));
                        if let Some(field) = empty_field {
                            let end = player.target(field as Field, 1);
                            let before = state.clone();
                            let first = state.is_legal(field, end);
                            prop_assert_eq!(first, state.is_legal(field, end));
                            prop_assert!(state.play_move(field, end).is_err());
                            prop_assert_eq!(&state, &before);
                        }

                        let cmove = legal[pick % legal.len()];
                        let remaining = state.remaining_moves().len();
                        state
                            .play_move(cmove.get_from() as i8, cmove.get_to())
                            .unwrap();
                        prop_assert_eq!(state.remaining_moves().len(), remaining - 1);
                    }
                }
            }
            check_conservation(&state);
            check_pins(&state);
        }
    }
}
