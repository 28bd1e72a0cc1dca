use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::Error;

/// Uniform draws from a fixed set of levels.
///
/// Typically used for covariates that take one of a few discrete values,
/// such as price levels.
#[derive(Debug, Clone)]
pub struct Choice {
    rng: StdRng,
    levels: Vec<f64>,
}

impl Choice {
    /// Creates a seeded source choosing among `levels`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyLevels`] if `levels` is empty.
    pub fn new(levels: Vec<f64>, seed: u64) -> Result<Self, Error> {
        if levels.is_empty() {
            return Err(Error::EmptyLevels);
        }

        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            levels,
        })
    }

    pub fn levels(&self) -> &[f64] {
        &self.levels
    }
}

impl Iterator for Choice {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        self.levels.choose(&mut self.rng).copied()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

/// Returns `n` evenly spaced values from `start` to `stop`, inclusive.
#[must_use]
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}
