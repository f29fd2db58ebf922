// Application.
pub mod app;
mod game_runner;
mod render;

use anyhow::Result;
use app::{App, AppArgs};
use plakoto_store::GameState;
use std::io;

const HELP: &str = "\
Plakoto

USAGE:
  plakoto-cli [OPTIONS]

OPTIONS:
  --seed SEED           Random generator seed for the dice and the bots
  --auto                Bot against bot
  --strategy NAME       Bots strategy : default or random
  --max-turns N         Turns limit with --auto [default: 1000]
  --load ID             Resume a game saved with the 'save' command
  --quiet               Only print the result with --auto
  -h, --help            Prints help information

COMMANDS:
  roll, moves, <start> <end>, end, state, history, save, quit
";

fn main() -> Result<()> {
    env_logger::init();
    let args = match parse_args() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error: {}.", e);
            std::process::exit(1);
        }
    };
    if args.help {
        print!("{}", HELP);
        return Ok(());
    }

    if args.auto {
        let state = match &args.load {
            Some(id) => GameState::from_string_id(id)?,
            None => GameState::new(),
        };
        let (outcome, turns) = game_runner::run(&args, state)?;
        match outcome {
            Some(outcome) => println!(
                "{} wins by {} ({} points) after {} turns",
                outcome.winner,
                outcome.kind,
                outcome.kind.points(),
                turns
            ),
            None => println!("No winner after {} turns", turns),
        }
        return Ok(());
    }

    // Create an application.
    let mut app = App::new(args)?;
    println!("{}", app.display());

    // Start the main loop.
    while !app.should_quit {
        println!("whot?>");
        let mut input = String::new();
        let bytecount = io::stdin().read_line(&mut input)?;
        if bytecount == 0 {
            break;
        }
        app.input(input.trim());
    }

    Ok(())
}

fn parse_args() -> Result<AppArgs, pico_args::Error> {
    let mut pargs = pico_args::Arguments::from_env();

    let args = AppArgs {
        help: pargs.contains(["-h", "--help"]),
        seed: pargs.opt_value_from_str("--seed")?,
        auto: pargs.contains("--auto"),
        strategy: pargs.opt_value_from_str("--strategy")?.unwrap_or_default(),
        max_turns: pargs.opt_value_from_str("--max-turns")?.unwrap_or(1000),
        load: pargs.opt_value_from_str("--load")?,
        quiet: pargs.contains("--quiet"),
    };

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        eprintln!("Warning: unused arguments left: {:?}.", remaining);
    }

    Ok(args)
}
