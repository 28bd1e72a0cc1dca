//! First-order autoregressive model.

use eerily_core::{Error, Model, State, pull};

use crate::error::var;

/// An AR(1) process,
///
/// ```text
/// s(t+1) = phi0 + phi1 * s(t) + epsilon
/// ```
///
/// The state holds a single variable, `s`.
#[derive(Debug, Clone)]
pub struct Ar1<E> {
    phi0: f64,
    phi1: f64,
    epsilon: E,
    initial_state: State,
    variable_names: Vec<String>,
}

impl<E: Iterator<Item = f64>> Ar1<E> {
    /// Creates an AR(1) model starting at `s = initial`.
    pub fn new(phi0: f64, phi1: f64, epsilon: E, initial: f64) -> Self {
        Self {
            phi0,
            phi1,
            epsilon,
            initial_state: State::from([("s", initial)]),
            variable_names: vec!["s".to_string()],
        }
    }

    pub fn phi0(&self) -> f64 {
        self.phi0
    }

    pub fn phi1(&self) -> f64 {
        self.phi1
    }
}

impl<E: Iterator<Item = f64>> Model for Ar1<E> {
    type State = State;

    fn initial_state(&self) -> &State {
        &self.initial_state
    }

    fn variable_names(&self) -> &[String] {
        &self.variable_names
    }

    fn step(&mut self, state: &mut State) -> Result<(), Error> {
        let epsilon = pull(&mut self.epsilon, "epsilon")?;
        let s = var(state, "s")?;

        *state = State::from([("s", self.phi0 + self.phi1 * s + epsilon)]);
        Ok(())
    }
}
