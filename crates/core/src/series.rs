use indexmap::IndexMap;

use crate::{Error, IntoState, State, Stepper};

/// A columnar record of the states a stepper produced.
///
/// Each variable becomes a column with one entry per step. A variable that
/// is missing at some step holds `NaN` there, including steps recorded
/// before the variable first appeared.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize, serde::Deserialize))]
pub struct Series {
    columns: IndexMap<String, Vec<f64>>,
    len: usize,
}

impl Series {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains a bounded stepper into a series.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingLength`] if the stepper is unbounded, or the
    /// first error the stepper produces.
    pub fn collect<S>(stepper: &mut S) -> Result<Self, Error>
    where
        S: Stepper + ?Sized,
        S::Output: IntoState,
    {
        if stepper.length()?.is_none() {
            return Err(Error::MissingLength);
        }

        let mut series = Self::new();
        while let Some(output) = stepper.next_step() {
            series.push(output?.into_state()?);
        }
        Ok(series)
    }

    /// Appends one step.
    pub fn push(&mut self, state: State) {
        for (name, value) in state {
            self.columns
                .entry(name)
                .or_insert_with(|| vec![f64::NAN; self.len])
                .push(value);
        }

        self.len += 1;
        for column in self.columns.values_mut() {
            if column.len() < self.len {
                column.push(f64::NAN);
            }
        }
    }

    /// Returns the values recorded for `name`.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Iterates over the column names in first-seen order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Returns the number of steps recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl FromIterator<State> for Series {
    fn from_iter<I: IntoIterator<Item = State>>(iter: I) -> Self {
        let mut series = Self::new();
        for state in iter {
            series.push(state);
        }
        series
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{ModelStepper, stepper::test_utils::Replay};

    #[test]
    fn pads_missing_values() {
        let series: Series = [
            State::from([("log_demand", 3.0)]),
            State::from([("log_demand", 4.5), ("elasticity", -3.0)]),
            State::from([("elasticity", -3.0)]),
        ]
        .into_iter()
        .collect();

        assert_eq!(series.len(), 3);
        assert_eq!(series.names().collect::<Vec<_>>(), ["log_demand", "elasticity"]);

        let demand = series.column("log_demand").unwrap();
        assert_eq!(&demand[..2], [3.0, 4.5]);
        assert!(demand[2].is_nan());

        let elasticity = series.column("elasticity").unwrap();
        assert!(elasticity[0].is_nan());
        assert_eq!(&elasticity[1..], [-3.0, -3.0]);
    }

    #[test]
    fn collects_a_bounded_stepper() {
        let mut stepper = ModelStepper::bounded(Replay::new("x", [1.0, 2.0, 3.0]), 3).unwrap();

        let series = Series::collect(&mut stepper).unwrap();

        assert_eq!(series.column("x"), Some([1.0, 2.0, 3.0].as_slice()));
        assert!(series.column("y").is_none());
    }

    #[test]
    fn refuses_an_unbounded_stepper() {
        let mut stepper = ModelStepper::unbounded(Replay::new("x", [1.0])).unwrap();

        assert!(matches!(
            Series::collect(&mut stepper),
            Err(Error::MissingLength)
        ));
    }
}
