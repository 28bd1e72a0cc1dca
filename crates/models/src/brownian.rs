//! Brownian motion of a particle under a random force.

use eerily_core::{Error, Model, State, pull};

use crate::error::var;

/// Velocity of a Brownian particle, integrated with a forward Euler step,
///
/// ```text
/// v(t+1) = v(t) + R(t) * delta_t - gamma * v(t) * delta_t
/// ```
///
/// where `R` is the force density pulled from the source and `gamma` the
/// damping coefficient. Each state records the applied `force_density`
/// alongside the velocity `v`.
#[derive(Debug, Clone)]
pub struct BrownianMotion<F> {
    gamma: f64,
    delta_t: f64,
    force_densities: F,
    initial_state: State,
    variable_names: Vec<String>,
}

impl<F: Iterator<Item = f64>> BrownianMotion<F> {
    /// Creates a particle starting at velocity `initial_velocity`.
    pub fn new(gamma: f64, delta_t: f64, force_densities: F, initial_velocity: f64) -> Self {
        Self {
            gamma,
            delta_t,
            force_densities,
            initial_state: State::from([("v", initial_velocity)]),
            variable_names: vec!["v".to_string(), "force_density".to_string()],
        }
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    pub fn delta_t(&self) -> f64 {
        self.delta_t
    }
}

impl<F: Iterator<Item = f64>> Model for BrownianMotion<F> {
    type State = State;

    fn initial_state(&self) -> &State {
        &self.initial_state
    }

    fn variable_names(&self) -> &[String] {
        &self.variable_names
    }

    fn step(&mut self, state: &mut State) -> Result<(), Error> {
        let force_density = pull(&mut self.force_densities, "force_densities")?;
        let v = var(state, "v")?;

        let next_v = v + force_density * self.delta_t - self.gamma * v * self.delta_t;

        state.insert("force_density", force_density);
        state.insert("v", next_v);
        Ok(())
    }
}
