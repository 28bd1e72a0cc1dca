//! Seeded noise and event sources for eerily models.
//!
//! Every source is an endless [`Iterator`] over `f64`, so any iterator can
//! stand in for one: a constant via [`std::iter::repeat`], a recorded series
//! via `Vec::into_iter`, or a transformed source via [`Iterator::map`].
//!
//! - [`GaussianNoise`] and [`LogNormalNoise`] — continuous noise
//! - [`PoissonEvent`] — a `0.0`/`1.0` event indicator
//! - [`Choice`] and [`linspace`] — discrete covariate levels
//! - [`Stacked`] — several scalar sources pulled together as an array

mod choice;
mod error;
mod event;
mod noise;
mod stacked;

pub use choice::{Choice, linspace};
pub use error::Error;
pub use event::PoissonEvent;
pub use noise::{GaussianNoise, LogNormalNoise};
pub use stacked::Stacked;
