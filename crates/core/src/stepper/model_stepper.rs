use std::{
    fmt,
    ops::{Add, BitAnd},
};

use tracing::warn;

use crate::{Config, Error, IntoState, Merged, Model};

use super::{BoxedStepper, Composition, Sequential, Stepper};

/// A stepper that advances a single [`Model`].
///
/// A `ModelStepper` owns its model and the model's current state. It starts
/// from a copy of the model's initial state, and each pull advances that
/// state in place and hands back a copy of it.
///
/// With a length of `Some(n)` the stepper yields exactly `n` outputs before
/// it is exhausted. With `None` it never ends, and every pull emits a
/// "length is not set" warning unless disabled through [`Config`].
#[derive(Debug)]
pub struct ModelStepper<M: Model> {
    model: M,
    state: M::State,
    length: Option<usize>,
    counter: usize,
    config: Config,
}

impl<M: Model> ModelStepper<M> {
    /// Creates a stepper for `model` with an optional length.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateVariable`] if the model declares a variable
    /// name more than once.
    pub fn new(model: M, length: Option<usize>) -> Result<Self, Error> {
        let names = model.variable_names();
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(Error::DuplicateVariable { name: name.clone() });
            }
        }

        let state = model.initial_state().clone();

        Ok(Self {
            model,
            state,
            length,
            counter: 0,
            config: Config::default(),
        })
    }

    /// Creates a stepper that yields exactly `length` outputs.
    ///
    /// # Errors
    ///
    /// See [`ModelStepper::new`].
    pub fn bounded(model: M, length: usize) -> Result<Self, Error> {
        Self::new(model, Some(length))
    }

    /// Creates a stepper with no length.
    ///
    /// # Errors
    ///
    /// See [`ModelStepper::new`].
    pub fn unbounded(model: M) -> Result<Self, Error> {
        Self::new(model, None)
    }

    /// Replaces the stepper's configuration.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Returns the model being stepped.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Returns the current state.
    pub fn state(&self) -> &M::State {
        &self.state
    }

    /// Returns the number of pulls made so far.
    pub fn steps_taken(&self) -> usize {
        self.counter
    }

    fn advance(&mut self) -> Option<Result<M::State, Error>> {
        match self.length {
            Some(length) if self.counter >= length => return None,
            Some(_) => {}
            None => {
                if self.config.warn_on_unbounded_pull() {
                    warn!(step = self.counter, "length is not set");
                }
            }
        }

        self.counter += 1;
        Some(self.compute_step())
    }

    fn compute_step(&mut self) -> Result<M::State, Error> {
        self.model.step(&mut self.state)?;
        Ok(self.state.clone())
    }
}

impl<M: Model + 'static> Stepper for ModelStepper<M> {
    type Output = M::State;

    fn next_step(&mut self) -> Option<Result<M::State, Error>> {
        self.advance()
    }

    fn length(&self) -> Result<Option<usize>, Error> {
        Ok(self.length)
    }

    fn variable_names(&self) -> Vec<String> {
        self.model.variable_names().to_vec()
    }

    fn into_parts(self: Box<Self>, _composition: Composition) -> Vec<BoxedStepper<M::State>> {
        vec![self]
    }
}

impl<M: Model> Iterator for ModelStepper<M> {
    type Item = Result<M::State, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.length {
            Some(length) => {
                let remaining = length.saturating_sub(self.counter);
                (remaining, Some(remaining))
            }
            None => (usize::MAX, None),
        }
    }
}

impl<M: Model + fmt::Debug> fmt::Display for ModelStepper<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Model Parameters: {:?}", self.model)
    }
}

impl<M, S> Add<S> for ModelStepper<M>
where
    M: Model + 'static,
    S: Stepper<Output = M::State> + 'static,
{
    type Output = Sequential<M::State>;

    fn add(self, rhs: S) -> Sequential<M::State> {
        Stepper::then(self, rhs)
    }
}

impl<M, S> BitAnd<S> for ModelStepper<M>
where
    M: Model + 'static,
    M::State: IntoState,
    S: Stepper + 'static,
    S::Output: IntoState,
{
    type Output = Merged;

    fn bitand(self, rhs: S) -> Merged {
        Stepper::merge(self, rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{
        State,
        stepper::test_utils::{Counter, Replay, count_warnings},
    };

    /// AR(1) with constant noise, written against the model trait directly.
    struct RandomWalk {
        initial: State,
        names: Vec<String>,
        epsilon: std::vec::IntoIter<f64>,
    }

    impl Model for RandomWalk {
        type State = State;

        fn initial_state(&self) -> &State {
            &self.initial
        }

        fn variable_names(&self) -> &[String] {
            &self.names
        }

        fn step(&mut self, state: &mut State) -> Result<(), Error> {
            let epsilon = crate::pull(&mut self.epsilon, "epsilon")?;
            state.insert("s", state["s"] + epsilon);
            Ok(())
        }
    }

    fn random_walk(epsilon: Vec<f64>) -> RandomWalk {
        RandomWalk {
            initial: State::from([("s", 0.0)]),
            names: vec!["s".to_string()],
            epsilon: epsilon.into_iter(),
        }
    }

    #[test]
    fn yields_exactly_length_outputs() {
        let mut stepper = ModelStepper::bounded(random_walk(vec![1.0; 3]), 3).unwrap();

        let outputs: Vec<State> = stepper.by_ref().map(Result::unwrap).collect();

        assert_eq!(
            outputs,
            [
                State::from([("s", 1.0)]),
                State::from([("s", 2.0)]),
                State::from([("s", 3.0)]),
            ]
        );
        assert!(stepper.next_step().is_none());
        assert_eq!(stepper.steps_taken(), 3);
    }

    #[test]
    fn exhaustion_is_terminal() {
        let mut stepper = ModelStepper::bounded(random_walk(vec![1.0; 5]), 1).unwrap();

        assert!(stepper.next_step().is_some());
        assert!(stepper.next_step().is_none());
        assert!(stepper.next_step().is_none());
    }

    #[test]
    fn returned_states_are_copies() {
        let mut stepper = ModelStepper::bounded(random_walk(vec![1.0; 2]), 2).unwrap();

        let mut first = stepper.next_step().unwrap().unwrap();
        first.insert("s", 100.0);
        first.insert("extra", 1.0);

        let second = stepper.next_step().unwrap().unwrap();
        assert_eq!(second, State::from([("s", 2.0)]));
        assert_eq!(stepper.state(), &second);
    }

    #[test]
    fn starts_from_initial_state() {
        let stepper = ModelStepper::bounded(Replay::new("x", [1.0]), 1).unwrap();
        assert_eq!(stepper.state(), &State::from([("x", 0.0)]));
        assert_eq!(stepper.length().unwrap(), Some(1));
    }

    #[test]
    fn source_underrun_fails_the_step() {
        let mut stepper = ModelStepper::bounded(random_walk(vec![1.0]), 2).unwrap();

        assert!(stepper.next_step().unwrap().is_ok());
        assert!(matches!(
            stepper.next_step(),
            Some(Err(Error::SourceExhausted {
                source_name: "epsilon"
            }))
        ));
    }

    #[test]
    fn unbounded_stepper_keeps_going() {
        let config = Config::default().with_warn_on_unbounded_pull(false);
        let mut stepper = ModelStepper::unbounded(Counter::new())
            .unwrap()
            .with_config(config);

        assert_eq!(stepper.length().unwrap(), None);
        assert_eq!(stepper.size_hint(), (usize::MAX, None));

        let counts: Vec<f64> = stepper.by_ref().take(100).map(Result::unwrap).collect();
        assert_eq!(counts.len(), 100);
        assert_eq!(counts[99], 100.0);
        assert_eq!(stepper.steps_taken(), 100);
    }

    #[test]
    fn warns_on_every_unbounded_pull() {
        let warnings = count_warnings("length is not set", || {
            let mut stepper = ModelStepper::unbounded(Counter::new()).unwrap();
            for _ in 0..5 {
                assert!(stepper.next_step().unwrap().is_ok());
            }
        });

        assert_eq!(warnings, 5);
    }

    #[test]
    fn unbounded_warning_can_be_disabled() {
        let warnings = count_warnings("length is not set", || {
            let mut stepper = ModelStepper::unbounded(Counter::new())
                .unwrap()
                .with_config(Config::default().with_warn_on_unbounded_pull(false));
            for _ in 0..5 {
                assert!(stepper.next_step().unwrap().is_ok());
            }
        });

        assert_eq!(warnings, 0);
    }

    #[test]
    fn bounded_stepper_does_not_warn() {
        let warnings = count_warnings("length is not set", || {
            let mut stepper = ModelStepper::bounded(Counter::new(), 3).unwrap();
            while stepper.next_step().is_some() {}
        });

        assert_eq!(warnings, 0);
    }

    #[test]
    fn rejects_duplicate_variable_names() {
        let mut model = random_walk(vec![]);
        model.names = vec!["s".to_string(), "s".to_string()];

        assert!(matches!(
            ModelStepper::bounded(model, 1),
            Err(Error::DuplicateVariable { name }) if name == "s"
        ));
    }

    #[test]
    fn displays_model_parameters() {
        let stepper = ModelStepper::bounded(Counter::new(), 1).unwrap();
        assert!(stepper.to_string().starts_with("Model Parameters: Counter"));
    }
}
