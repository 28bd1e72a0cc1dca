use rand::{SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, Poisson};

use crate::{Error, error::positive};

/// Event indicator driven by a Poisson process.
///
/// Each step draws the number of arrivals in a unit interval at the given
/// `rate` and yields `1.0` if at least one arrived, `0.0` otherwise.
#[derive(Debug, Clone)]
pub struct PoissonEvent {
    rng: StdRng,
    dist: Poisson<f64>,
}

impl PoissonEvent {
    /// Creates a seeded event source.
    ///
    /// # Errors
    ///
    /// Returns an error if `rate` is not finite and positive.
    pub fn new(rate: f64, seed: u64) -> Result<Self, Error> {
        let rate = positive("rate", rate)?;
        let dist = Poisson::new(rate).map_err(|_| Error::NotPositive {
            name: "rate",
            value: rate,
        })?;

        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            dist,
        })
    }
}

impl Iterator for PoissonEvent {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let arrivals: f64 = self.dist.sample(&mut self.rng);
        Some(if arrivals > 0.0 { 1.0 } else { 0.0 })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn yields_indicators() {
        let events: Vec<f64> = PoissonEvent::new(0.5, 42).unwrap().take(1_000).collect();
        assert!(events.iter().all(|&e| e == 0.0 || e == 1.0));
    }

    #[test]
    fn fires_at_expected_frequency() {
        let rate = 0.1;
        let n = 20_000;
        let fired: f64 = PoissonEvent::new(rate, 42).unwrap().take(n).sum();

        let expected = 1.0 - (-rate).exp();
        assert_relative_eq!(fired / n as f64, expected, epsilon = 0.01);
    }

    #[test]
    fn rate_must_be_positive() {
        assert_eq!(
            PoissonEvent::new(0.0, 1).unwrap_err(),
            Error::NotPositive {
                name: "rate",
                value: 0.0
            }
        );
    }
}
