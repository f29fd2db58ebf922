use crate::Error;
use rand::distributions::{Distribution, Uniform};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Source of single die faces.
///
/// The engine never draws random numbers itself: every roll goes through a `DieSource`, so a
/// fixed sequence can stand in for the random generator in tests.
pub trait DieSource {
    /// Next face, expected between 1 and 6
    fn next_die(&mut self) -> u8;
}

#[derive(Debug)]
pub struct DiceRoller {
    rng: StdRng,
}

impl Default for DiceRoller {
    fn default() -> Self {
        Self::new(None)
    }
}

impl DiceRoller {
    pub fn new(opt_seed: Option<u64>) -> Self {
        Self {
            rng: match opt_seed {
                None => StdRng::from_entropy(),
                Some(seed) => SeedableRng::seed_from_u64(seed),
            },
        }
    }
}

impl DieSource for DiceRoller {
    fn next_die(&mut self) -> u8 {
        let between = Uniform::new_inclusive(1, 6);
        between.sample(&mut self.rng)
    }
}

/// Replays a predefined sequence of faces. Yields 0 (an invalid face) once exhausted.
#[derive(Debug, Clone, Default)]
pub struct FixedDice {
    faces: VecDeque<u8>,
}

impl FixedDice {
    pub fn new(faces: &[u8]) -> Self {
        Self {
            faces: faces.iter().copied().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.faces.len()
    }
}

impl DieSource for FixedDice {
    fn next_die(&mut self) -> u8 {
        self.faces.pop_front().unwrap_or(0)
    }
}

/// Represents the two dice
///
/// Plakoto is always played with two dice.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Deserialize, Default)]
pub struct Dice {
    /// The two dice values
    pub values: (u8, u8),
}

impl Dice {
    pub fn new(die1: u8, die2: u8) -> Result<Self, Error> {
        if !(1..=6).contains(&die1) || !(1..=6).contains(&die2) {
            return Err(Error::DiceInvalid);
        }
        Ok(Dice {
            values: (die1, die2),
        })
    }

    /// Roll the dice: two faces drawn one after the other from `source`
    pub fn roll<S: DieSource + ?Sized>(source: &mut S) -> Result<Self, Error> {
        let die1 = source.next_die();
        let die2 = source.next_die();
        Dice::new(die1, die2)
    }

    pub fn is_double(&self) -> bool {
        self.values.0 == self.values.1
    }

    /// Distances playable with this roll: four times the value on a double, the two values
    /// otherwise.
    pub fn moves(&self) -> Vec<u8> {
        if self.is_double() {
            vec![self.values.0; 4]
        } else {
            vec![self.values.0, self.values.1]
        }
    }

    pub fn to_display_string(self) -> String {
        format!("{} & {}", self.values.0, self.values.1)
    }
}
