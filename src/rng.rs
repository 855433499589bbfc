//! Colour palette and the random colour source used for population and spawns.

use crate::error::EngineError;
use crate::token::Color;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Non-empty, duplicate-free set of colours a board draws from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    pub fn new(colors: &[Color]) -> Result<Self, EngineError> {
        let mut unique: Vec<Color> = Vec::with_capacity(colors.len());
        for &c in colors {
            if !unique.contains(&c) {
                unique.push(c);
            }
        }
        if unique.is_empty() {
            return Err(EngineError::EmptyPalette);
        }
        Ok(Self { colors: unique })
    }

    /// Red, Blue, Purple, Green, Yellow.
    pub fn classic() -> Self {
        Self {
            colors: Color::ALL[..5].to_vec(),
        }
    }

    /// The first `n` colours of [`Color::ALL`], `n` clamped to 1..=6.
    pub fn first(n: usize) -> Self {
        let n = n.clamp(1, Color::ALL.len());
        Self {
            colors: Color::ALL[..n].to_vec(),
        }
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::classic()
    }
}

/// Source of token colours. Injected so tests and replays are reproducible.
pub trait ColorSource {
    fn pick(&mut self, palette: &Palette) -> Color;
}

/// Seeded RNG that remembers its seed.
#[derive(Debug, Clone)]
pub struct SessionRng {
    rng: StdRng,
    seed: u64,
}

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_random() -> Self {
        let seed: u64 = rand::rng().random();
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn random_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distr::uniform::SampleUniform,
        R: rand::distr::uniform::SampleRange<T>,
    {
        self.rng.random_range(range)
    }

    pub fn random_bool(&mut self) -> bool {
        self.rng.random()
    }
}

impl ColorSource for SessionRng {
    fn pick(&mut self, palette: &Palette) -> Color {
        palette.colors[self.random_range(0..palette.colors.len())]
    }
}
