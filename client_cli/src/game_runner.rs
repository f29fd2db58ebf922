use anyhow::Result;
use log::info;
use plakoto_bot::{Bot, BotStrategy, DefaultStrategy, RandomStrategy};
use plakoto_store::{DiceRoller, GameState, Outcome, Player};
use std::str::FromStr;

use crate::app::AppArgs;
use crate::render::board_grid;

/// Move choice of the bots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrategyKind {
    #[default]
    Default,
    Random,
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(StrategyKind::Default),
            "random" => Ok(StrategyKind::Random),
            _ => Err(format!("unknown strategy '{}'", s)),
        }
    }
}

impl StrategyKind {
    pub fn build(&self, seed: Option<u64>) -> Box<dyn BotStrategy> {
        match self {
            StrategyKind::Default => Box::<DefaultStrategy>::default(),
            StrategyKind::Random => Box::new(RandomStrategy::new(seed)),
        }
    }
}

// Bots game
#[derive(Debug)]
pub struct Game {
    pub state: GameState,
    pub dice_roller: DiceRoller,
    bots: [Bot; 2],
}

impl Game {
    pub fn new(args: &AppArgs, state: GameState) -> Self {
        // each bot gets its own seed derived from the game seed
        let bot_seed = |offset: u64| args.seed.map(|seed| seed.wrapping_add(offset));
        Self {
            state,
            dice_roller: DiceRoller::new(args.seed),
            bots: [
                Bot::new(args.strategy.build(bot_seed(1)), Player::One),
                Bot::new(args.strategy.build(bot_seed(2)), Player::Two),
            ],
        }
    }

    /// Play one turn of the active player. Returns false once the game is over.
    pub fn play_turn(&mut self) -> Result<bool> {
        if self.state.is_over() {
            return Ok(false);
        }
        let bot = &mut self.bots[self.state.who_plays().index()];
        let played = bot.play_turn(&mut self.state, &mut self.dice_roller)?;
        info!(
            "{} played {}",
            bot.player,
            played
                .iter()
                .map(|cmove| cmove.to_string())
                .collect::<Vec<String>>()
                .join(", ")
        );
        Ok(!self.state.is_over())
    }
}

/// Run a game between two bots, for at most `max_turns` turns
pub fn run(args: &AppArgs, state: GameState) -> Result<(Option<Outcome>, usize)> {
    let mut game = Game::new(args, state);
    let mut turns = 0;
    while turns < args.max_turns && game.play_turn()? {
        turns += 1;
        if !args.quiet {
            println!("turn {} :: {}", turns, game.state.dice().to_display_string());
            println!("{}", board_grid(game.state.board()));
        }
    }
    Ok((game.state.outcome(), turns))
}
