use crate::Error;

/// A physical model advanced one step at a time by a
/// [`ModelStepper`](crate::ModelStepper).
///
/// A `Model` bundles the immutable parameters of a recurrence (its initial
/// state, declared variable names, and coefficients) with the sources it
/// consumes. The stepper owns the model and the mutable current state;
/// [`step`](Model::step) reads that state, pulls exactly one value from each
/// source, and writes the result back in place.
///
/// The step must not depend on anything outside the model and the state it
/// is handed, so that a stepper is reproducible given reproducible sources.
pub trait Model {
    /// The shape of the state produced at each step.
    ///
    /// Usually a [`State`](crate::State) mapping, but degenerate models may
    /// emit a scalar.
    type State: Clone;

    /// Returns the state the stepper starts from.
    fn initial_state(&self) -> &Self::State;

    /// Returns the variable names this model declares.
    fn variable_names(&self) -> &[String];

    /// Advances `state` by one step.
    ///
    /// New keys may be added alongside the primary variables, for example an
    /// intermediate noise value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SourceExhausted`] if a source runs out, or
    /// [`Error::Model`] for any other model failure.
    fn step(&mut self, state: &mut Self::State) -> Result<(), Error>;
}

/// Pulls the next value from `source`.
///
/// Models use this to turn an exhausted source into a step failure instead
/// of substituting a default value.
///
/// # Errors
///
/// Returns [`Error::SourceExhausted`] naming `source_name` if the source has
/// no more values.
pub fn pull<I: Iterator>(source: &mut I, source_name: &'static str) -> Result<I::Item, Error> {
    source.next().ok_or(Error::SourceExhausted { source_name })
}
