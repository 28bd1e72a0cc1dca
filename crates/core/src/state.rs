use std::{any::type_name, fmt, ops::Index};

use indexmap::IndexMap;

use crate::{BoxedStepper, Error, Stepper, stepper::Shaped};

/// An ordered mapping from variable name to value at one time step.
///
/// Keys keep their insertion order, so a state prints and collects in the
/// order a model first wrote its variables. Overwriting an existing key
/// keeps its original position.
///
/// Steppers hand out states by value. Mutating a returned `State` never
/// affects the stepper that produced it.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-derive", serde(transparent))]
pub struct State(IndexMap<String, f64>);

impl State {
    /// Creates an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of `name`, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    /// Sets `name` to `value`, returning the previous value if there was one.
    pub fn insert(&mut self, name: impl Into<String>, value: f64) -> Option<f64> {
        self.0.insert(name.into(), value)
    }

    /// Returns `true` if the state holds a value for `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over variable names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

impl Index<&str> for State {
    type Output = f64;

    /// Returns the value of `name`.
    ///
    /// # Panics
    ///
    /// Panics if the state has no value for `name`.
    fn index(&self, name: &str) -> &f64 {
        &self.0[name]
    }
}

impl<K: Into<String>, const N: usize> From<[(K, f64); N]> for State {
    fn from(pairs: [(K, f64); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for State {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl<K: Into<String>> Extend<(K, f64)> for State {
    fn extend<I: IntoIterator<Item = (K, f64)>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(|(k, v)| (k.into(), v)));
    }
}

impl IntoIterator for State {
    type Item = (String, f64);
    type IntoIter = indexmap::map::IntoIter<String, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}: {value}")?;
        }
        write!(f, "}}")
    }
}

/// Conversion of a stepper output into a [`State`] mapping.
///
/// [`Merged`](crate::Merged) composites combine their children's outputs by
/// key union, so every child output must convert into a `State`. Scalar and
/// vector outputs have no variable names and fail with
/// [`Error::NotMergeable`] at the step where they are produced.
pub trait IntoState: Sized {
    /// Converts the output into a state mapping.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotMergeable`] if the output is not mapping-shaped.
    fn into_state(self) -> Result<State, Error>;

    /// Boxes a stepper producing `Self` as a child of a merged composite.
    ///
    /// The default converts each output with [`into_state`](Self::into_state).
    fn merge_child<S>(stepper: S) -> BoxedStepper<State>
    where
        S: Stepper<Output = Self> + 'static,
    {
        Box::new(Shaped::new(stepper))
    }
}

impl IntoState for State {
    fn into_state(self) -> Result<State, Error> {
        Ok(self)
    }

    fn merge_child<S>(stepper: S) -> BoxedStepper<State>
    where
        S: Stepper<Output = Self> + 'static,
    {
        Box::new(stepper)
    }
}

impl IntoState for f64 {
    fn into_state(self) -> Result<State, Error> {
        Err(Error::NotMergeable {
            output: type_name::<Self>(),
        })
    }
}

impl IntoState for Vec<f64> {
    fn into_state(self) -> Result<State, Error> {
        Err(Error::NotMergeable {
            output: type_name::<Self>(),
        })
    }
}
