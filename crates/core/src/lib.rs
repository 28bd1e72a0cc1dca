//! Core traits and types for eerily's synthetic time-series generators.
//!
//! This crate defines the composition layer that physical models plug into:
//!
//! - [`Model`] — a recurrence that advances a state by one step, pulling
//!   from its own sources
//! - [`Stepper`] — a resumable, optionally bounded producer of states
//! - [`ModelStepper`] — a stepper driving a single [`Model`]
//! - [`Sequential`] and [`Merged`] — composites that concatenate steppers
//!   end-to-end or advance them in lock-step, and are steppers themselves
//! - [`State`] and [`Series`] — a single step's variables and a columnar
//!   record of many steps
//!
//! # Example
//!
//! ```
//! use eerily_core::{Error, Model, ModelStepper, State, Stepper, pull};
//!
//! struct Walk {
//!     initial: State,
//!     names: Vec<String>,
//!     noise: std::iter::Repeat<f64>,
//! }
//!
//! impl Model for Walk {
//!     type State = State;
//!
//!     fn initial_state(&self) -> &State {
//!         &self.initial
//!     }
//!
//!     fn variable_names(&self) -> &[String] {
//!         &self.names
//!     }
//!
//!     fn step(&mut self, state: &mut State) -> Result<(), Error> {
//!         let noise = pull(&mut self.noise, "noise")?;
//!         state.insert("s", state["s"] + noise);
//!         Ok(())
//!     }
//! }
//!
//! let walk = || Walk {
//!     initial: State::from([("s", 0.0)]),
//!     names: vec!["s".to_string()],
//!     noise: std::iter::repeat(1.0),
//! };
//!
//! let a = ModelStepper::bounded(walk(), 2).unwrap();
//! let b = ModelStepper::bounded(walk(), 3).unwrap();
//!
//! let sequence = a + b;
//! assert_eq!(sequence.length().unwrap(), Some(5));
//! ```

mod config;
mod error;
mod model;
mod series;
mod state;
mod stepper;

pub use config::{Config, MergePolicy};
pub use error::Error;
pub use model::{Model, pull};
pub use series::Series;
pub use state::{IntoState, State};
pub use stepper::{BoxedStepper, Composition, Merged, ModelStepper, Sequential, Stepper, Steps};
