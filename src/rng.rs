//! Seeded random number generation.
//!
//! Wraps a ChaCha8 stream so a whole run can be reproduced from one seed —
//! the simulation never touches a global RNG.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::domain::geometry::Direction;

#[derive(Debug, Clone)]
pub struct GameRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        GameRng {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_entropy() -> Self {
        GameRng::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform draw in `0..n`. Returns 0 when `n` is 0.
    pub fn rn2(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }

    /// Uniform draw in `1..=n`. Returns 0 when `n` is 0.
    pub fn rnd(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(1..=n)
    }

    /// One-in-`n` chance.
    pub fn one_in(&mut self, n: u32) -> bool {
        self.rnd(n) == 1
    }

    /// True `percent` times out of 100.
    pub fn percent(&mut self, percent: u32) -> bool {
        self.rn2(100) < percent
    }

    /// A uniformly random axis direction.
    pub fn direction(&mut self) -> Direction {
        Direction::ALL[self.rn2(4) as usize]
    }
}
