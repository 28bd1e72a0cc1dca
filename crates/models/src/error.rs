use eerily_core::State;
use thiserror::Error;

/// Errors raised by the models in this crate.
///
/// Surfaced to callers wrapped in [`eerily_core::Error::Model`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("state has no variable `{name}`")]
    MissingVariable { name: &'static str },
}

/// Reads `name` from `state`.
pub(crate) fn var(state: &State, name: &'static str) -> Result<f64, eerily_core::Error> {
    state
        .get(name)
        .ok_or_else(|| eerily_core::Error::model(Error::MissingVariable { name }))
}
