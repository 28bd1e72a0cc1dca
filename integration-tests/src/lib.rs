//! Seeded steppers shared by the integration tests.

use std::iter::{Repeat, repeat};

use eerily_core::ModelStepper;
use eerily_models::{Ar1, BrownianMotion, LinearElasticity, NoisyElasticity, SpikingEvent};
use eerily_sources::{Choice, GaussianNoise, LogNormalNoise, PoissonEvent, linspace};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error(transparent)]
    Core(#[from] eerily_core::Error),
    #[error(transparent)]
    Source(#[from] eerily_sources::Error),
}

pub type Spiking = ModelStepper<SpikingEvent<PoissonEvent, LogNormalNoise, LogNormalNoise>>;

/// Rare large spikes over a positive background.
pub fn spiking(length: usize, rate: f64, seed: u64) -> Result<Spiking, FixtureError> {
    let model = SpikingEvent::new(
        PoissonEvent::new(rate, seed)?,
        LogNormalNoise::new(1.0, 0.1, seed + 1)?,
        LogNormalNoise::new(0.0, 0.1, seed + 2)?,
        0.0,
    );
    Ok(ModelStepper::bounded(model, length)?)
}

pub type Walk = ModelStepper<Ar1<GaussianNoise>>;

/// A random walk driven by Gaussian noise.
pub fn walk(length: usize, seed: u64) -> Result<Walk, FixtureError> {
    let model = Ar1::new(0.0, 1.0, GaussianNoise::new(0.0, 1.0, seed)?, 0.0);
    Ok(ModelStepper::bounded(model, length)?)
}

pub type Particle = ModelStepper<BrownianMotion<GaussianNoise>>;

/// A damped particle kicked by Gaussian forces.
pub fn particle(length: usize, seed: u64) -> Result<Particle, FixtureError> {
    let model = BrownianMotion::new(0.1, 0.1, GaussianNoise::new(0.0, 1.0, seed)?, 0.0);
    Ok(ModelStepper::bounded(model, length)?)
}

pub type Demand = ModelStepper<LinearElasticity<Choice, NoisyElasticity<GaussianNoise>>>;

/// Demand responding to prices picked from eight evenly spaced levels.
pub fn demand(length: usize, elasticity: f64, seed: u64) -> Result<Demand, FixtureError> {
    let log_prices = Choice::new(linspace(0.0, 0.7, 8), seed)?;
    let noise = GaussianNoise::new(0.0, 0.1, seed + 1)?;
    let model = LinearElasticity::new(3.0, 0.5, log_prices, NoisyElasticity::new(elasticity, noise));
    Ok(ModelStepper::bounded(model, length)?)
}

pub type Constant = ModelStepper<Ar1<Repeat<f64>>>;

/// A walk that climbs by exactly `increment` each step.
pub fn climb(length: usize, increment: f64) -> Result<Constant, FixtureError> {
    Ok(ModelStepper::bounded(
        Ar1::new(0.0, 1.0, repeat(increment), 0.0),
        length,
    )?)
}
