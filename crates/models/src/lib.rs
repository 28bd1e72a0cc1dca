//! Dynamical-system models for eerily.
//!
//! Each model implements [`eerily_core::Model`] and takes its randomness
//! from iterator sources, typically the ones in `eerily-sources`. Wrap a
//! model in a [`eerily_core::ModelStepper`] to generate a series, and
//! compose steppers with `+` and `&`.
//!
//! ```
//! use eerily_core::{ModelStepper, Stepper};
//! use eerily_models::{Ar1, BrownianMotion};
//!
//! let ar = ModelStepper::bounded(Ar1::new(0.0, 1.0, std::iter::repeat(1.0), 0.0), 3).unwrap();
//! let particle =
//!     ModelStepper::bounded(BrownianMotion::new(0.0, 1.0, std::iter::repeat(1.0), 0.0), 3).unwrap();
//!
//! let mut merged = ar & particle;
//! let last = merged.steps().last().unwrap().unwrap();
//! assert_eq!(last["s"], 3.0);
//! assert_eq!(last["v"], 3.0);
//! ```

mod ar;
mod brownian;
mod elasticity;
mod error;
mod spiking;
mod var;

pub use ar::Ar1;
pub use brownian::BrownianMotion;
pub use elasticity::{LinearElasticity, NoisyElasticity};
pub use error::Error;
pub use spiking::SpikingEvent;
pub use var::Var1;
