pub mod strategy;

use log::debug;
use plakoto_store::{CheckerMove, DieSource, Error, GameState, Player, TurnStage};
pub use strategy::{DefaultStrategy, RandomStrategy};

/// Chooses the moves of a bot
pub trait BotStrategy: std::fmt::Debug {
    /// Pick one of the legal moves of the active player, `None` when there is nothing to play
    fn choose_move(&mut self, game: &GameState) -> Option<CheckerMove>;
}

#[derive(Debug)]
pub struct Bot {
    pub player: Player,
    strategy: Box<dyn BotStrategy>,
}

impl Default for Bot {
    fn default() -> Bot {
        Bot {
            player: Player::Two,
            strategy: Box::<DefaultStrategy>::default(),
        }
    }
}

impl Bot {
    /// new initialize a bot
    /// # Examples
    /// ```
    /// use plakoto_bot::{Bot, RandomStrategy};
    /// use plakoto_store::Player;
    /// let bot = Bot::new(Box::new(RandomStrategy::new(Some(1))), Player::Two);
    /// assert_eq!(bot.player, Player::Two);
    /// ```
    pub fn new(strategy: Box<dyn BotStrategy>, player: Player) -> Self {
        Self { player, strategy }
    }

    pub fn choose_move(&mut self, game: &GameState) -> Option<CheckerMove> {
        if game.who_plays() != self.player {
            return None;
        }
        self.strategy.choose_move(game)
    }

    /// Play the whole turn of the bot: roll, move until nothing is left, then hand over.
    ///
    /// Returns the moves played, empty when it is not the bot's turn or when the roll gave
    /// nothing to play.
    pub fn play_turn<S: DieSource + ?Sized>(
        &mut self,
        game: &mut GameState,
        source: &mut S,
    ) -> Result<Vec<CheckerMove>, Error> {
        let mut played = Vec::new();
        if game.who_plays() != self.player {
            return Ok(played);
        }
        loop {
            match game.turn_stage() {
                TurnStage::AwaitingRoll => {
                    game.roll(source)?;
                    if game.who_plays() != self.player {
                        // void turn
                        break;
                    }
                }
                TurnStage::AwaitingMove => match self.strategy.choose_move(game) {
                    Some(cmove) => {
                        debug!("bot {} plays {}", self.player, cmove);
                        game.play_move(cmove.get_from() as i8, cmove.get_to())?;
                        played.push(cmove);
                    }
                    None => break,
                },
                TurnStage::TurnComplete => {
                    game.end_turn()?;
                    break;
                }
                TurnStage::GameOver => break,
            }
        }
        Ok(played)
    }
}
