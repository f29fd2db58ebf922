use crate::BotStrategy;
use plakoto_store::{CheckerMove, Destination, GameState};

/// Bears off when possible, then pins, otherwise plays the first legal move
#[derive(Debug, Default)]
pub struct DefaultStrategy;

impl BotStrategy for DefaultStrategy {
    fn choose_move(&mut self, game: &GameState) -> Option<CheckerMove> {
        let possible_moves = game.legal_moves();
        let opponent = game.who_plays().opponent();

        let bear_off = possible_moves.iter().find(|cmove| cmove.is_bear_off());
        let pinning = possible_moves.iter().find(|cmove| match cmove.destination() {
            Destination::Point(to) => game
                .board()
                .get_point(to)
                .map(|point| point.count(opponent) == 1 && !point.is_pinned())
                .unwrap_or(false),
            Destination::BearOff => false,
        });
        bear_off.or(pinning).or(possible_moves.first()).copied()
    }
}
