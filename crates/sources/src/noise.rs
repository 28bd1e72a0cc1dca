use rand::{SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, LogNormal, Normal};

use crate::{
    Error,
    error::{finite, non_negative},
};

/// Normally distributed noise, `N(mu, std²)`.
///
/// An endless source: every call to `next` returns a sample.
#[derive(Debug, Clone)]
pub struct GaussianNoise {
    rng: StdRng,
    dist: Normal<f64>,
}

impl GaussianNoise {
    /// Creates a seeded Gaussian source.
    ///
    /// # Errors
    ///
    /// Returns an error if `mu` is not finite or `std` is negative or not finite.
    pub fn new(mu: f64, std: f64, seed: u64) -> Result<Self, Error> {
        let mu = finite("mu", mu)?;
        let std = non_negative("std", std)?;
        let dist = Normal::new(mu, std).map_err(|_| Error::Negative {
            name: "std",
            value: std,
        })?;

        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            dist,
        })
    }
}

impl Iterator for GaussianNoise {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.dist.sample(&mut self.rng))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

/// Log-normally distributed noise: `exp(X)` with `X ~ N(mu, std²)`.
///
/// Always positive, which makes it a natural background level or spike
/// height.
#[derive(Debug, Clone)]
pub struct LogNormalNoise {
    rng: StdRng,
    dist: LogNormal<f64>,
}

impl LogNormalNoise {
    /// Creates a seeded log-normal source.
    ///
    /// # Errors
    ///
    /// Returns an error if `mu` is not finite or `std` is negative or not finite.
    pub fn new(mu: f64, std: f64, seed: u64) -> Result<Self, Error> {
        let mu = finite("mu", mu)?;
        let std = non_negative("std", std)?;
        let dist = LogNormal::new(mu, std).map_err(|_| Error::Negative {
            name: "std",
            value: std,
        })?;

        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            dist,
        })
    }
}

impl Iterator for LogNormalNoise {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.dist.sample(&mut self.rng))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}
