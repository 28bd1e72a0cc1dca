mod merged;
mod model_stepper;
mod sequential;
mod shaped;

pub use merged::Merged;
pub use model_stepper::ModelStepper;
pub use sequential::Sequential;

pub(crate) use shaped::Shaped;

use crate::{Error, IntoState};

/// A type-erased stepper producing `O` at each step.
pub type BoxedStepper<O> = Box<dyn Stepper<Output = O>>;

/// The kind of composite a stepper is being spliced into.
///
/// Passed to [`Stepper::into_parts`] so that a composite can hand over its
/// children when it is absorbed by a composite of the same kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Composition {
    /// End-to-end concatenation, see [`Sequential`].
    Sequential,

    /// Lock-step key union, see [`Merged`].
    Merged,
}

/// The core trait for resumable sequence producers.
///
/// A `Stepper` yields one output per call to [`next_step()`], either a value,
/// an error, or `None` once it is exhausted. Exhaustion is terminal: a
/// stepper is restarted only by building a new one.
///
/// ## Length
///
/// [`length()`] reports the declared bound on the number of steps. A
/// [`ModelStepper`] may be unbounded (`Ok(None)`). Composites require every
/// child to be bounded and report [`Error::MissingLength`] otherwise.
///
/// ## Composing Steppers
///
/// - [`Stepper::then()`] (or `+`) concatenates two steppers end-to-end.
/// - [`Stepper::merge()`] (or `&`) advances two steppers in lock-step and
///   joins their states.
///
/// Composition takes ownership of both operands. Composites of the same kind
/// are flattened, so `a + b + c` holds `[a, b, c]` rather than a nested tree.
///
/// ## Implementing `Stepper`
///
/// Implement [`next_step()`], [`length()`], [`variable_names()`], and
/// [`into_parts()`]. A stepper that is not itself a composite returns
/// `vec![self]` from `into_parts()`.
///
/// [`next_step()`]: Stepper::next_step
/// [`length()`]: Stepper::length
/// [`variable_names()`]: Stepper::variable_names
/// [`into_parts()`]: Stepper::into_parts
pub trait Stepper {
    type Output;

    /// Advances the stepper and returns its next output.
    ///
    /// Returns `None` once the stepper has produced its full length.
    fn next_step(&mut self) -> Option<Result<Self::Output, Error>>;

    /// Returns the declared number of steps, or `None` if unbounded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingLength`] if this is a composite with an
    /// unbounded child.
    fn length(&self) -> Result<Option<usize>, Error>;

    /// Returns the variable names this stepper declares, without duplicates.
    fn variable_names(&self) -> Vec<String>;

    /// Splits this stepper into the children a composite of kind
    /// `composition` should splice in.
    fn into_parts(self: Box<Self>, composition: Composition) -> Vec<BoxedStepper<Self::Output>>;

    /// Borrows this stepper as an [`Iterator`] over its outputs.
    fn steps(&mut self) -> Steps<'_, Self>
    where
        Self: Sized,
    {
        Steps { stepper: self }
    }

    /// Concatenates this stepper with another.
    ///
    /// The result yields every output of `self`, then every output of `next`.
    ///
    /// # Example
    ///
    /// ```
    /// use eerily_core::{Error, Model, ModelStepper, State, Stepper};
    ///
    /// struct Constant {
    ///     state: State,
    ///     names: Vec<String>,
    /// }
    ///
    /// impl Model for Constant {
    ///     type State = State;
    ///
    ///     fn initial_state(&self) -> &State {
    ///         &self.state
    ///     }
    ///
    ///     fn variable_names(&self) -> &[String] {
    ///         &self.names
    ///     }
    ///
    ///     fn step(&mut self, _state: &mut State) -> Result<(), Error> {
    ///         Ok(())
    ///     }
    /// }
    ///
    /// let constant = |x| Constant {
    ///     state: State::from([("x", x)]),
    ///     names: vec!["x".to_string()],
    /// };
    ///
    /// let a = ModelStepper::bounded(constant(1.0), 2).unwrap();
    /// let b = ModelStepper::bounded(constant(2.0), 1).unwrap();
    ///
    /// let mut ab = a.then(b);
    /// assert_eq!(ab.length().unwrap(), Some(3));
    ///
    /// let xs: Vec<f64> = ab.steps().map(|s| s.unwrap()["x"]).collect();
    /// assert_eq!(xs, [1.0, 1.0, 2.0]);
    /// ```
    fn then<S>(self, next: S) -> Sequential<Self::Output>
    where
        Self: Sized + 'static,
        S: Stepper<Output = Self::Output> + 'static,
    {
        Sequential::new([Box::new(self) as BoxedStepper<Self::Output>, Box::new(next)])
    }

    /// Merges this stepper with another.
    ///
    /// The result advances both steppers once per step and joins their states
    /// by key union, with the later stepper winning on shared keys. Use
    /// [`Merged::with_policy`] for a different collision policy.
    fn merge<S>(self, other: S) -> Merged
    where
        Self: Sized + 'static,
        Self::Output: IntoState,
        S: Stepper + 'static,
        S::Output: IntoState,
    {
        Merged::new([Merged::child(self), Merged::child(other)])
    }
}

impl<S: Stepper + ?Sized> Stepper for Box<S> {
    type Output = S::Output;

    fn next_step(&mut self) -> Option<Result<Self::Output, Error>> {
        (**self).next_step()
    }

    fn length(&self) -> Result<Option<usize>, Error> {
        (**self).length()
    }

    fn variable_names(&self) -> Vec<String> {
        (**self).variable_names()
    }

    fn into_parts(self: Box<Self>, composition: Composition) -> Vec<BoxedStepper<Self::Output>> {
        S::into_parts(*self, composition)
    }
}

/// An iterator over a borrowed stepper's outputs.
///
/// Created by [`Stepper::steps`]. Dropping it leaves the stepper where it
/// stopped, so iteration can resume later.
pub struct Steps<'a, S: ?Sized> {
    stepper: &'a mut S,
}

impl<S: Stepper + ?Sized> Iterator for Steps<'_, S> {
    type Item = Result<S::Output, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.stepper.next_step()
    }
}

/// Collects variable names in order, dropping repeats.
pub(crate) fn union_of_names(children: impl IntoIterator<Item = Vec<String>>) -> Vec<String> {
    let mut names = Vec::new();
    for name in children.into_iter().flatten() {
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}
