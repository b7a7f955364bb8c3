//! Dice rolling
//!
//! A six-sided die over a seedable RNG. Sessions use an entropy-seeded
//! roller; tests pin the seed or script the exact rolls.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Number of faces on the die
pub const DIE_FACES: u8 = 6;

/// A six-sided die
pub struct DiceRoller {
    source: Source,
}

enum Source {
    Rng(StdRng),
    #[cfg(test)]
    Scripted(std::collections::VecDeque<u8>),
}

impl DiceRoller {
    /// Create a roller seeded from OS entropy
    pub fn new() -> Self {
        Self {
            source: Source::Rng(StdRng::from_entropy()),
        }
    }

    /// Create a roller with a fixed seed (deterministic sequences)
    pub fn seeded(seed: u64) -> Self {
        Self {
            source: Source::Rng(StdRng::seed_from_u64(seed)),
        }
    }

    /// A die that produces exactly the given rolls, in order
    #[cfg(test)]
    pub(crate) fn scripted(rolls: &[u8]) -> Self {
        Self {
            source: Source::Scripted(rolls.iter().copied().collect()),
        }
    }

    /// Roll the die, returning a uniform value in [1, 6]
    pub fn roll(&mut self) -> u8 {
        let value = match &mut self.source {
            Source::Rng(rng) => rng.gen_range(1..=DIE_FACES),
            #[cfg(test)]
            Source::Scripted(rolls) => rolls.pop_front().expect("scripted dice ran out of rolls"),
        };
        // A value outside the die faces means the random source is corrupt.
        assert!(
            (1..=DIE_FACES).contains(&value),
            "die produced out-of-range value {}",
            value
        );
        value
    }
}

impl Default for DiceRoller {
    fn default() -> Self {
        Self::new()
    }
}
