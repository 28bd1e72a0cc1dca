//! Spiking events over a background signal.

use eerily_core::{Error, Model, pull};

/// A scalar signal that jumps whenever an event fires,
///
/// ```text
/// event(t) = background(t) + spike(t) * spike_level(t)
/// ```
///
/// where `spike` is an event indicator (usually `0.0` or `1.0`, see
/// `eerily_sources::PoissonEvent`), `spike_level` the size of a jump, and
/// `background` the signal between events. The output is a bare `f64`, so
/// spiking steppers can be concatenated but not merged.
#[derive(Debug, Clone)]
pub struct SpikingEvent<S, L, B> {
    spike: S,
    spike_level: L,
    background: B,
    initial_state: f64,
    variable_names: Vec<String>,
}

impl<S, L, B> SpikingEvent<S, L, B>
where
    S: Iterator<Item = f64>,
    L: Iterator<Item = f64>,
    B: Iterator<Item = f64>,
{
    pub fn new(spike: S, spike_level: L, background: B, initial: f64) -> Self {
        Self {
            spike,
            spike_level,
            background,
            initial_state: initial,
            variable_names: vec!["event".to_string()],
        }
    }
}

impl<S, L, B> Model for SpikingEvent<S, L, B>
where
    S: Iterator<Item = f64>,
    L: Iterator<Item = f64>,
    B: Iterator<Item = f64>,
{
    type State = f64;

    fn initial_state(&self) -> &f64 {
        &self.initial_state
    }

    fn variable_names(&self) -> &[String] {
        &self.variable_names
    }

    fn step(&mut self, state: &mut f64) -> Result<(), Error> {
        let spike = pull(&mut self.spike, "spike")?;
        let spike_level = pull(&mut self.spike_level, "spike_level")?;
        let background = pull(&mut self.background, "background")?;

        *state = background + spike * spike_level;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::iter::repeat;

    use eerily_core::{ModelStepper, Stepper};

    #[test]
    fn adds_spikes_to_background() {
        let spikes = [0.0, 1.0, 0.0, 1.0].into_iter();
        let model = SpikingEvent::new(spikes, repeat(2.0), repeat(1.0), 0.0);
        let mut stepper = ModelStepper::bounded(model, 4).unwrap();

        let events: Vec<f64> = stepper.by_ref().map(Result::unwrap).collect();

        assert_eq!(events, [1.0, 3.0, 1.0, 3.0]);
        assert_eq!(stepper.variable_names(), ["event"]);
    }

    #[test]
    fn fails_when_a_source_runs_out() {
        let model = SpikingEvent::new(repeat(1.0), repeat(2.0), [1.0].into_iter(), 0.0);
        let mut stepper = ModelStepper::bounded(model, 2).unwrap();

        assert_eq!(stepper.next_step().unwrap().unwrap(), 3.0);
        assert!(matches!(
            stepper.next_step(),
            Some(Err(Error::SourceExhausted {
                source_name: "background"
            }))
        ));
    }
}
