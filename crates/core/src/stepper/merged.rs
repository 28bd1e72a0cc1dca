use std::ops::{Add, BitAnd};

use tracing::{debug, warn};

use crate::{Error, IntoState, MergePolicy, State};

use super::{BoxedStepper, Composition, Sequential, Stepper, union_of_names};

/// A stepper that advances its children in lock-step and joins their states.
///
/// Each step pulls exactly one state from every child, in child order, and
/// combines them by key union. The composite's length is the shortest
/// child's length, so it stops after that many steps even if other children
/// could go on.
///
/// Shared keys are resolved by the composite's [`MergePolicy`]. The default,
/// [`MergePolicy::Overwrite`], keeps the value from the later child.
///
/// The composite is finished once it reaches its length, a child runs out
/// early, or a step fails. Every pull after that returns `None`, so the
/// children are never pulled out of lock-step.
///
/// Nested merged composites are flattened on construction. Children whose
/// output is not a [`State`] are wrapped so that each of their outputs fails
/// with [`Error::NotMergeable`] at the step it is produced.
pub struct Merged {
    children: Vec<BoxedStepper<State>>,
    policy: MergePolicy,
    counter: usize,
    finished: bool,
}

impl Merged {
    /// Creates a merged composite with [`MergePolicy::Overwrite`].
    ///
    /// Children declaring overlapping variables are accepted, with a warning.
    pub fn new<I>(children: I) -> Self
    where
        I: IntoIterator<Item = BoxedStepper<State>>,
    {
        let merged = Self::flatten(children, MergePolicy::Overwrite);
        merged.check_overlap_warn();
        merged
    }

    /// Creates a merged composite with the given collision policy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OverlappingVariables`] under [`MergePolicy::Reject`]
    /// if any two children declare the same variable.
    pub fn with_policy<I>(children: I, policy: MergePolicy) -> Result<Self, Error>
    where
        I: IntoIterator<Item = BoxedStepper<State>>,
    {
        let merged = Self::flatten(children, policy);
        match policy {
            MergePolicy::Reject => {
                let names = merged.overlapping_names();
                if !names.is_empty() {
                    return Err(Error::OverlappingVariables { names });
                }
            }
            MergePolicy::Overwrite => merged.check_overlap_warn(),
            MergePolicy::Rename => {}
        }
        Ok(merged)
    }

    /// Boxes any stepper with a mergeable output as a child.
    pub fn child<S>(stepper: S) -> BoxedStepper<State>
    where
        S: Stepper + 'static,
        S::Output: IntoState,
    {
        <S::Output as IntoState>::merge_child(stepper)
    }

    /// Returns the flattened list of children.
    pub fn children(&self) -> &[BoxedStepper<State>] {
        &self.children
    }

    /// Returns the collision policy.
    pub fn policy(&self) -> MergePolicy {
        self.policy
    }

    fn flatten<I>(children: I, policy: MergePolicy) -> Self
    where
        I: IntoIterator<Item = BoxedStepper<State>>,
    {
        let children: Vec<_> = children
            .into_iter()
            .flat_map(|child| child.into_parts(Composition::Merged))
            .collect();

        debug!(children = children.len(), ?policy, "built merged stepper");

        Self {
            children,
            policy,
            counter: 0,
            finished: false,
        }
    }

    /// Returns names declared by more than one child.
    fn overlapping_names(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        let mut shared = Vec::new();
        for child in &self.children {
            for name in child.variable_names() {
                if seen.contains(&name) {
                    if !shared.contains(&name) {
                        shared.push(name);
                    }
                } else {
                    seen.push(name);
                }
            }
        }
        shared
    }

    fn check_overlap_warn(&self) {
        let names = self.overlapping_names();
        if !names.is_empty() {
            warn!(?names, "merged steppers share variables, later children overwrite");
        }
    }

    fn bound(&self) -> Result<usize, Error> {
        let mut shortest: Option<usize> = None;
        for child in &self.children {
            let length = child.length()?.ok_or(Error::MissingLength)?;
            shortest = Some(shortest.map_or(length, |s| s.min(length)));
        }
        Ok(shortest.unwrap_or(0))
    }

    fn advance(&mut self) -> Option<Result<State, Error>> {
        if self.finished {
            return None;
        }

        let step = self.pull_all();
        if !matches!(step, Some(Ok(_))) {
            self.finished = true;
        }
        step
    }

    fn pull_all(&mut self) -> Option<Result<State, Error>> {
        let length = match self.bound() {
            Ok(length) => length,
            Err(err) => return Some(Err(err)),
        };
        if self.counter >= length {
            return None;
        }

        let policy = self.policy;
        let mut combined = State::new();
        for (index, child) in self.children.iter_mut().enumerate() {
            let state = match child.next_step()? {
                Ok(state) => state,
                Err(err) => return Some(Err(err)),
            };
            if let Err(err) = combine(&mut combined, state, index, policy) {
                return Some(Err(err));
            }
        }

        self.counter += 1;
        Some(Ok(combined))
    }
}

/// Folds `state` from child `index` into `combined`.
fn combine(
    combined: &mut State,
    state: State,
    index: usize,
    policy: MergePolicy,
) -> Result<(), Error> {
    for (name, value) in state {
        match (policy, combined.contains(&name)) {
            (_, false) | (MergePolicy::Overwrite, true) => {
                combined.insert(name, value);
            }
            (MergePolicy::Reject, true) => return Err(Error::Collision { name }),
            (MergePolicy::Rename, true) => {
                let renamed = renamed(&name, index, |key| combined.contains(key));
                combined.insert(renamed, value);
            }
        }
    }
    Ok(())
}

/// Suffixes `name` with `_{index}` until the result is not `taken`.
fn renamed(name: &str, index: usize, taken: impl Fn(&str) -> bool) -> String {
    let mut renamed = format!("{name}_{index}");
    while taken(&renamed) {
        renamed = format!("{renamed}_{index}");
    }
    renamed
}

impl Stepper for Merged {
    type Output = State;

    fn next_step(&mut self) -> Option<Result<State, Error>> {
        self.advance()
    }

    /// Returns the shortest of the children's lengths.
    fn length(&self) -> Result<Option<usize>, Error> {
        self.bound().map(Some)
    }

    /// Returns the keys a step produces from the children's declared names.
    ///
    /// Under [`MergePolicy::Rename`] these include the suffixed names given
    /// to shared variables.
    fn variable_names(&self) -> Vec<String> {
        let declared = self.children.iter().map(|child| child.variable_names());
        if self.policy != MergePolicy::Rename {
            return union_of_names(declared);
        }

        let mut names: Vec<String> = Vec::new();
        for (index, child_names) in declared.enumerate() {
            for name in child_names {
                let name = if names.contains(&name) {
                    renamed(&name, index, |key| names.iter().any(|n| n == key))
                } else {
                    name
                };
                names.push(name);
            }
        }
        names
    }

    fn into_parts(self: Box<Self>, composition: Composition) -> Vec<BoxedStepper<State>> {
        match composition {
            Composition::Merged => self.children,
            Composition::Sequential => vec![self],
        }
    }
}

impl Iterator for Merged {
    type Item = Result<State, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance()
    }
}

impl<S> Add<S> for Merged
where
    S: Stepper<Output = State> + 'static,
{
    type Output = Sequential<State>;

    fn add(self, rhs: S) -> Sequential<State> {
        Stepper::then(self, rhs)
    }
}

impl<S> BitAnd<S> for Merged
where
    S: Stepper + 'static,
    S::Output: IntoState,
{
    type Output = Merged;

    fn bitand(self, rhs: S) -> Merged {
        Stepper::merge(self, rhs)
    }
}
