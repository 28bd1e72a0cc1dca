use std::error::Error as StdError;

use thiserror::Error;

/// Errors that can occur while building or advancing a stepper.
///
/// Exhaustion is not an error. A stepper that has produced its full length
/// returns `None` from [`Stepper::next_step`](crate::Stepper::next_step).
#[derive(Debug, Error)]
pub enum Error {
    #[error("length is not set for at least one child stepper")]
    MissingLength,

    #[error("total length of the child steppers overflows `usize`")]
    LengthOverflow,

    #[error("output of type `{output}` is not a state mapping and cannot be merged")]
    NotMergeable { output: &'static str },

    #[error("source `{source_name}` was exhausted before the stepper reached its length")]
    SourceExhausted { source_name: &'static str },

    #[error("variable `{name}` is declared more than once")]
    DuplicateVariable { name: String },

    #[error("merged steppers declare overlapping variables: {names:?}")]
    OverlappingVariables { names: Vec<String> },

    #[error("merged steppers both emitted variable `{name}`")]
    Collision { name: String },

    #[error("model step failed: {0}")]
    Model(#[source] Box<dyn StdError + Send + Sync>),
}

impl Error {
    /// Wraps a model-specific failure.
    pub fn model<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::Model(Box::new(err))
    }
}
