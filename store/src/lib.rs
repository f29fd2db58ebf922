mod game;
mod game_rules_moves;
pub use game_rules_moves::MoveRules;
mod game_rules_win;
pub use game::{GameEvent, GameState, MoveRecord, TurnStage};
pub use game_rules_win::{check_win, Outcome, WinKind};

mod player;
pub use player::{Player, CHECKERS_PER_PLAYER};

mod error;
pub use error::{Error, MoveError};

mod board;
pub use board::{Board, CheckerMove, Destination, Field, MoveEffect, Point, FIELDS_COUNT};

mod dice;
pub use dice::{Dice, DiceRoller, DieSource, FixedDice};
