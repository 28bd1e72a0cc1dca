use crate::{Error, IntoState, State};

use super::{BoxedStepper, Composition, Stepper};

/// Adapts a stepper whose output is not a [`State`] for use in a merged
/// composite, converting each output with [`IntoState::into_state`].
pub(crate) struct Shaped<S> {
    inner: S,
}

impl<S> Shaped<S> {
    pub(crate) fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S> Stepper for Shaped<S>
where
    S: Stepper + 'static,
    S::Output: IntoState,
{
    type Output = State;

    fn next_step(&mut self) -> Option<Result<State, Error>> {
        self.inner
            .next_step()
            .map(|output| output.and_then(IntoState::into_state))
    }

    fn length(&self) -> Result<Option<usize>, Error> {
        self.inner.length()
    }

    fn variable_names(&self) -> Vec<String> {
        self.inner.variable_names()
    }

    /// Never spliced: only [`Merged`](super::Merged) is absorbed by a merged
    /// composite, and it already produces states.
    fn into_parts(self: Box<Self>, _composition: Composition) -> Vec<BoxedStepper<State>> {
        vec![self]
    }
}
