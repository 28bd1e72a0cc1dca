//! First-order vector autoregressive model.

use eerily_core::{Error, Model, State, pull};

use crate::error::var;

/// A VAR(1) process over `N` variables,
///
/// ```text
/// s(t+1) = phi0 + phi1 · s(t) + epsilon
/// ```
///
/// where `phi0` and `epsilon` are vectors and `phi1` is an `N × N` matrix.
/// The state holds one entry per declared name.
#[derive(Debug, Clone)]
pub struct Var1<E, const N: usize> {
    names: [&'static str; N],
    phi0: [f64; N],
    phi1: [[f64; N]; N],
    epsilon: E,
    initial_state: State,
    variable_names: Vec<String>,
}

impl<E, const N: usize> Var1<E, N>
where
    E: Iterator<Item = [f64; N]>,
{
    /// Creates a VAR(1) model with variables `names` starting at `initial`.
    pub fn new(
        names: [&'static str; N],
        phi0: [f64; N],
        phi1: [[f64; N]; N],
        epsilon: E,
        initial: [f64; N],
    ) -> Self {
        Self {
            names,
            phi0,
            phi1,
            epsilon,
            initial_state: names.into_iter().zip(initial).collect(),
            variable_names: names.iter().map(ToString::to_string).collect(),
        }
    }
}

impl<E, const N: usize> Model for Var1<E, N>
where
    E: Iterator<Item = [f64; N]>,
{
    type State = State;

    fn initial_state(&self) -> &State {
        &self.initial_state
    }

    fn variable_names(&self) -> &[String] {
        &self.variable_names
    }

    fn step(&mut self, state: &mut State) -> Result<(), Error> {
        let epsilon = pull(&mut self.epsilon, "epsilon")?;

        let mut current = [0.0; N];
        for (value, name) in current.iter_mut().zip(self.names) {
            *value = var(state, name)?;
        }

        for (i, name) in self.names.into_iter().enumerate() {
            let coupling: f64 = self.phi1[i]
                .iter()
                .zip(&current)
                .map(|(phi, s)| phi * s)
                .sum();
            state.insert(name, self.phi0[i] + coupling + epsilon[i]);
        }
        Ok(())
    }
}
