use std::ops::{Add, BitAnd};

use tracing::{debug, trace};

use crate::{Error, IntoState, Merged};

use super::{BoxedStepper, Composition, Stepper, union_of_names};

/// A stepper that concatenates its children end-to-end.
///
/// Pulls up to each child's declared length from the first child, then from
/// the second, and so on, yielding every output in arrival order. A child
/// that runs out before its declared length is passed over.
///
/// Nested sequential composites are flattened on construction, so the child
/// list never contains another `Sequential`. Every child must be bounded:
/// [`length()`](Stepper::length) and iteration report
/// [`Error::MissingLength`] when one is not.
///
/// Stopping partway leaves the remaining children untouched, and further
/// pulls resume where iteration stopped. After a pull fails, every later
/// pull returns `None`.
pub struct Sequential<O> {
    children: Vec<BoxedStepper<O>>,
    current: usize,
    taken: usize,
    failed: bool,
}

impl<O> Sequential<O> {
    /// Creates a sequential composite, splicing in the children of any
    /// sequential composite among `children`.
    pub fn new<I>(children: I) -> Self
    where
        I: IntoIterator<Item = BoxedStepper<O>>,
    {
        let children: Vec<_> = children
            .into_iter()
            .flat_map(|child| child.into_parts(Composition::Sequential))
            .collect();

        debug!(children = children.len(), "built sequential stepper");

        Self {
            children,
            current: 0,
            taken: 0,
            failed: false,
        }
    }

    /// Returns the flattened list of children.
    pub fn children(&self) -> &[BoxedStepper<O>] {
        &self.children
    }

    fn advance(&mut self) -> Option<Result<O, Error>> {
        if self.failed {
            return None;
        }

        let output = self.pull_next();
        if matches!(output, Some(Err(_))) {
            self.failed = true;
        }
        output
    }

    fn pull_next(&mut self) -> Option<Result<O, Error>> {
        while let Some(child) = self.children.get_mut(self.current) {
            let length = match child.length() {
                Ok(Some(length)) => length,
                Ok(None) => return Some(Err(Error::MissingLength)),
                Err(err) => return Some(Err(err)),
            };

            if self.taken < length {
                if let Some(output) = child.next_step() {
                    self.taken += 1;
                    return Some(output);
                }
            }

            self.current += 1;
            self.taken = 0;
            trace!(child = self.current, "advancing to next child");
        }

        None
    }
}

impl<O: 'static> Stepper for Sequential<O> {
    type Output = O;

    fn next_step(&mut self) -> Option<Result<O, Error>> {
        self.advance()
    }

    /// Returns the sum of the children's lengths.
    fn length(&self) -> Result<Option<usize>, Error> {
        let mut total: usize = 0;
        for child in &self.children {
            let length = child.length()?.ok_or(Error::MissingLength)?;
            total = total.checked_add(length).ok_or(Error::LengthOverflow)?;
        }
        Ok(Some(total))
    }

    fn variable_names(&self) -> Vec<String> {
        union_of_names(self.children.iter().map(|child| child.variable_names()))
    }

    fn into_parts(self: Box<Self>, composition: Composition) -> Vec<BoxedStepper<O>> {
        match composition {
            Composition::Sequential => self.children,
            Composition::Merged => vec![self],
        }
    }
}

impl<O> Iterator for Sequential<O> {
    type Item = Result<O, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance()
    }
}

impl<O, S> Add<S> for Sequential<O>
where
    O: 'static,
    S: Stepper<Output = O> + 'static,
{
    type Output = Sequential<O>;

    fn add(self, rhs: S) -> Sequential<O> {
        Stepper::then(self, rhs)
    }
}

impl<O, S> BitAnd<S> for Sequential<O>
where
    O: IntoState + 'static,
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
        Config, ModelStepper, State,
        stepper::test_utils::{Counter, Replay},
    };

    fn replay<const N: usize>(name: &str, values: [f64; N]) -> ModelStepper<Replay> {
        ModelStepper::bounded(Replay::new(name, values), N).unwrap()
    }

    fn collect<S: Stepper<Output = State>>(stepper: &mut S) -> Vec<State> {
        let mut outputs = Vec::new();
        while let Some(output) = stepper.next_step() {
            outputs.push(output.unwrap());
        }
        outputs
    }

    #[test]
    fn concatenates_children() {
        let a = ModelStepper::bounded(Replay::new("x", [1.0, 1.0]), 2).unwrap();
        let b = ModelStepper::bounded(Replay::new("x", [2.0]), 1).unwrap();

        let mut ab = a + b;

        assert_eq!(ab.length().unwrap(), Some(3));
        assert_eq!(
            collect(&mut ab),
            [
                State::from([("x", 1.0)]),
                State::from([("x", 1.0)]),
                State::from([("x", 2.0)]),
            ]
        );
        assert!(ab.next_step().is_none());
    }

    #[test]
    fn flattens_nested_composites() {
        let left = (replay("a", [1.0]) + replay("b", [2.0])) + replay("c", [3.0]);
        let right = replay("a", [1.0]) + (replay("b", [2.0]) + replay("c", [3.0]));
        let flat = replay("a", [1.0]) + replay("b", [2.0]) + replay("c", [3.0]);

        for mut composite in [left, right, flat] {
            let names: Vec<Vec<String>> = composite
                .children()
                .iter()
                .map(|child| child.variable_names())
                .collect();
            assert_eq!(names, [["a"], ["b"], ["c"]]);

            assert_eq!(
                collect(&mut composite),
                [
                    State::from([("a", 1.0)]),
                    State::from([("b", 2.0)]),
                    State::from([("c", 3.0)]),
                ]
            );
        }
    }

    #[test]
    fn matches_pulling_children_directly() {
        let mut first = replay("x", [1.0, 2.0, 3.0]);
        let mut second = replay("y", [4.0, 5.0]);
        let expected: Vec<State> = collect(&mut first)
            .into_iter()
            .chain(collect(&mut second))
            .collect();

        let mut composite = replay("x", [1.0, 2.0, 3.0]) + replay("y", [4.0, 5.0]);

        assert_eq!(composite.length().unwrap(), Some(5));
        assert_eq!(collect(&mut composite), expected);
    }

    #[test]
    fn resumes_after_partial_consumption() {
        let mut composite = replay("x", [1.0, 2.0]) + replay("y", [3.0]);

        let head: Vec<State> = composite.steps().take(1).map(Result::unwrap).collect();
        assert_eq!(head, [State::from([("x", 1.0)])]);

        let rest: Vec<State> = composite.steps().map(Result::unwrap).collect();
        assert_eq!(rest, [State::from([("x", 2.0)]), State::from([("y", 3.0)])]);
    }

    #[test]
    fn skips_a_child_that_ends_early() {
        let mut short = replay("x", [1.0, 2.0]);
        short.next_step();

        let mut composite = short + replay("y", [3.0]);

        assert_eq!(
            collect(&mut composite),
            [State::from([("x", 2.0)]), State::from([("y", 3.0)])]
        );
    }

    #[test]
    fn unbounded_child_has_no_length() {
        let unbounded = ModelStepper::unbounded(Counter::new())
            .unwrap()
            .with_config(Config::default().with_warn_on_unbounded_pull(false));
        let bounded = ModelStepper::bounded(Counter::new(), 2).unwrap();

        let mut composite = bounded + unbounded;

        assert!(matches!(composite.length(), Err(Error::MissingLength)));
        assert_eq!(composite.next_step().unwrap().unwrap(), 1.0);
        assert_eq!(composite.next_step().unwrap().unwrap(), 2.0);
        assert!(matches!(composite.next_step(), Some(Err(Error::MissingLength))));
        assert!(composite.next_step().is_none());
        assert_eq!(composite.by_ref().count(), 0);
    }

    #[test]
    fn stops_after_a_failed_step() {
        let underrun = ModelStepper::bounded(Replay::new("x", [1.0]), 2).unwrap();
        let mut composite = underrun + replay("y", [2.0]);

        assert_eq!(composite.next_step().unwrap().unwrap(), State::from([("x", 1.0)]));
        assert!(matches!(
            composite.next_step(),
            Some(Err(Error::SourceExhausted { .. }))
        ));
        assert!(composite.next_step().is_none());
        assert!(composite.next_step().is_none());
    }

    #[test]
    fn reports_length_overflow() {
        let huge = ModelStepper::bounded(Counter::new(), usize::MAX).unwrap();
        let one = ModelStepper::bounded(Counter::new(), 1).unwrap();

        let composite = huge + one;

        assert!(matches!(composite.length(), Err(Error::LengthOverflow)));
    }

    #[test]
    fn concatenates_scalar_outputs() {
        let first = ModelStepper::bounded(Counter::new(), 2).unwrap();
        let second = ModelStepper::bounded(Counter::new(), 1).unwrap();
        let mut composite = first + second;

        let counts: Vec<f64> = composite.by_ref().map(Result::unwrap).collect();
        assert_eq!(counts, [1.0, 2.0, 1.0]);
        assert_eq!(composite.variable_names(), ["count"]);
    }
}
