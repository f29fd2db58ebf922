use anyhow::Result;
use plakoto_bot::Bot;
use plakoto_store::{DiceRoller, Error, GameState, Player, TurnStage};

use crate::game_runner::StrategyKind;
use crate::render::board_grid;

#[derive(Debug, Default)]
pub struct AppArgs {
    pub help: bool,
    pub seed: Option<u64>,
    /// bot against bot
    pub auto: bool,
    pub strategy: StrategyKind,
    pub max_turns: usize,
    /// game to resume, as printed by the `save` command
    pub load: Option<String>,
    pub quiet: bool,
}

// Application Game
#[derive(Debug)]
pub struct Game {
    pub state: GameState,
    pub dice_roller: DiceRoller,
    pub player: Player,
    bot: Bot,
}

impl Game {
    // Constructs a new instance of [`Game`].
    pub fn new(args: &AppArgs, state: GameState) -> Self {
        let bot = Bot::new(
            args.strategy.build(args.seed.map(|s| s.wrapping_add(1))),
            Player::Two,
        );
        let mut game = Self {
            state,
            dice_roller: DiceRoller::new(args.seed),
            player: Player::One,
            bot,
        };
        game.run_bot();
        game
    }

    /// Let the bot play as long as it is its turn
    pub fn run_bot(&mut self) {
        while !self.state.is_over() && self.state.who_plays() == self.bot.player {
            match self.bot.play_turn(&mut self.state, &mut self.dice_roller) {
                Ok(played) => {
                    for cmove in played.iter() {
                        println!("bot played {}", cmove);
                    }
                    if played.is_empty() && self.state.who_plays() == self.bot.player {
                        break;
                    }
                }
                Err(err) => {
                    println!("bot error : {}", err);
                    break;
                }
            }
        }
    }
}

// Application.
#[derive(Debug)]
pub struct App {
    // should the application exit?
    pub should_quit: bool,
    pub game: Game,
}

impl App {
    // Constructs a new instance of [`App`].
    pub fn new(args: AppArgs) -> Result<Self> {
        let state = match &args.load {
            Some(id) => GameState::from_string_id(id)?,
            None => GameState::new(),
        };
        Ok(Self {
            game: Game::new(&args, state),
            should_quit: false,
        })
    }

    pub fn input(&mut self, input: &str) {
        match input {
            "state" => self.show_state(),
            "history" => self.show_history(),
            "moves" => self.show_moves(),
            "save" => self.save(),
            "quit" => self.quit(),
            "roll" => self.roll_dice(),
            "end" => self.end_turn(),
            _ => self.add_move(input),
        }
        println!("{}", self.display());
    }

    // Set running to false to quit the application.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn show_state(&self) {
        println!("{}", self.game.state)
    }

    pub fn show_history(&self) {
        for event in self.game.state.history().iter() {
            println!("{}", event);
        }
    }

    pub fn show_moves(&self) {
        let moves: Vec<String> = self
            .game
            .state
            .legal_moves()
            .iter()
            .map(|cmove| cmove.to_string())
            .collect();
        println!("legal moves : {}", moves.join(", "));
    }

    fn save(&self) {
        match self.game.state.to_string_id() {
            Ok(id) => println!("{}", id),
            Err(err) => println!("{}", err),
        }
    }

    fn check_my_turn(&self) -> bool {
        if self.game.state.who_plays() != self.game.player {
            println!("Not your turn");
            return false;
        }
        true
    }

    fn roll_dice(&mut self) {
        if !self.check_my_turn() {
            return;
        }
        match self.game.state.roll(&mut self.game.dice_roller) {
            Ok(moves) if moves.is_empty() => {
                println!("No legal move");
                self.game.run_bot();
            }
            Ok(_) => self.show_moves(),
            Err(err) => println!("{}", err),
        }
    }

    fn end_turn(&mut self) {
        if !self.check_my_turn() {
            return;
        }
        match self.game.state.end_turn() {
            Ok(()) => self.game.run_bot(),
            Err(err) => println!("{}", err),
        }
    }

    fn add_move(&mut self, input: &str) {
        if !self.check_my_turn() {
            return;
        }
        let positions: Vec<i8> = input
            .split_whitespace()
            .filter_map(|s| s.parse().ok())
            .collect();
        if positions.len() != 2 {
            println!("invalid move : {}", input);
            return;
        }
        match self.game.state.play_move(positions[0], positions[1]) {
            Ok(_) => {
                if self.game.state.turn_stage() == TurnStage::TurnComplete {
                    println!("Turn complete, type 'end'");
                }
            }
            Err(Error::IllegalMove(reason)) => println!("Move refused : {}", reason),
            Err(err) => println!("{}", err),
        }
    }

    pub fn display(&self) -> String {
        let state = &self.game.state;
        let mut output = "-------------------------------".to_owned();
        output += format!("\n{:?} > {}", state.turn_stage(), state.who_plays()).as_str();
        output = output + "\nRolled dice : " + &state.dice().to_display_string();
        output += format!(" {:?}", state.remaining_moves()).as_str();
        output += format!(
            "\nBorne off : o {} | x {}",
            state.borne_off(Player::One),
            state.borne_off(Player::Two)
        )
        .as_str();
        if let Some(outcome) = state.outcome() {
            output += format!("\n{} wins by {}", outcome.winner, outcome.kind).as_str();
        }
        output += "\n-------------------------------\n";
        output += &board_grid(state.board());
        output
    }
}
