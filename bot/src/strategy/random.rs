use crate::BotStrategy;
use plakoto_store::{CheckerMove, GameState};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Plays any legal move
#[derive(Debug)]
pub struct RandomStrategy {
    rng: StdRng,
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self::new(None)
    }
}

impl RandomStrategy {
    pub fn new(opt_seed: Option<u64>) -> Self {
        Self {
            rng: match opt_seed {
                None => StdRng::from_entropy(),
                Some(seed) => SeedableRng::seed_from_u64(seed),
            },
        }
    }
}

impl BotStrategy for RandomStrategy {
    fn choose_move(&mut self, game: &GameState) -> Option<CheckerMove> {
        let possible_moves = game.legal_moves();
        possible_moves.choose(&mut self.rng).copied()
    }
}
