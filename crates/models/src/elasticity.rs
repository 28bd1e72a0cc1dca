//! Price elasticity of demand.

use eerily_core::{Error, Model, State, pull};

use crate::error::var;

/// Log demand responding linearly to log price changes,
///
/// ```text
/// y(t+1) = y(t) + e(t) * (x(t+1) - x(t))
/// ```
///
/// with `y` the log demand, `x` the log price, and `e` the elasticity. Both
/// the next log price and the elasticity are pulled from sources each step.
/// States carry `log_demand`, `log_price`, and `elasticity`.
#[derive(Debug, Clone)]
pub struct LinearElasticity<P, E> {
    log_prices: P,
    elasticity: E,
    initial_state: State,
    variable_names: Vec<String>,
}

impl<P, E> LinearElasticity<P, E>
where
    P: Iterator<Item = f64>,
    E: Iterator<Item = f64>,
{
    /// Creates a model starting from the given log demand and log price.
    pub fn new(log_demand: f64, log_price: f64, log_prices: P, elasticity: E) -> Self {
        Self {
            log_prices,
            elasticity,
            initial_state: State::from([("log_demand", log_demand), ("log_price", log_price)]),
            variable_names: ["log_demand", "log_price", "elasticity"]
                .map(String::from)
                .to_vec(),
        }
    }
}

impl<P, E> Model for LinearElasticity<P, E>
where
    P: Iterator<Item = f64>,
    E: Iterator<Item = f64>,
{
    type State = State;

    fn initial_state(&self) -> &State {
        &self.initial_state
    }

    fn variable_names(&self) -> &[String] {
        &self.variable_names
    }

    fn step(&mut self, state: &mut State) -> Result<(), Error> {
        let next_log_price = pull(&mut self.log_prices, "log_prices")?;
        let elasticity = pull(&mut self.elasticity, "elasticity")?;

        let log_demand = var(state, "log_demand")?;
        let log_price = var(state, "log_price")?;

        state.insert(
            "log_demand",
            log_demand + elasticity * (next_log_price - log_price),
        );
        state.insert("log_price", next_log_price);
        state.insert("elasticity", elasticity);
        Ok(())
    }
}

/// An elasticity source scattered around a base value.
///
/// Yields `elasticity * (1 + noise)` for each value of the wrapped noise
/// source, ending when the noise does.
#[derive(Debug, Clone)]
pub struct NoisyElasticity<N> {
    elasticity: f64,
    noise: N,
}

impl<N: Iterator<Item = f64>> NoisyElasticity<N> {
    pub fn new(elasticity: f64, noise: N) -> Self {
        Self { elasticity, noise }
    }
}

impl<N: Iterator<Item = f64>> Iterator for NoisyElasticity<N> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        self.noise
            .next()
            .map(|noise| self.elasticity * (1.0 + noise))
    }
}
