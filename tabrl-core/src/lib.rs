#![warn(missing_docs)]
//! Tabular Q-learning over discretized toy environments.
//!
//! The crate keeps environments and learning apart:
//!
//! * [`Env`] is the only thing a toy world implements: `reset`, `step` and the size of its
//!   action set, together with the bounds of its discretized [`State`].
//! * [`QTable`], [`EpsilonGreedy`], [`Trainer`] and [`Evaluator`] know nothing about any
//!   concrete environment.
//! * [`Session`] ties one environment to one table for a presentation layer which keeps
//!   a handle across interactions.
//!
//! ```ignore
//! let config = TrainerConfig::default().episodes(500).alpha(0.5).gamma(0.9);
//! let mut session = Session::<Corridor>::build(&CorridorConfig::default(), config)?;
//! session.train(&mut NullRecorder {})?;
//! let trace = session.run_evaluation(State::from([0]))?;
//! ```
pub mod error;
pub mod record;

mod base;
pub use base::{Act, Env, State, Step};

mod discretizer;
pub use discretizer::{Axis, Discretizer};

mod q_table;
pub use q_table::QTable;

mod policy;
pub use policy::{argmax, EpsilonGreedy};

mod trainer;
pub use trainer::{q_update, Trainer, TrainerConfig};

mod evaluator;
pub use evaluator::{Evaluator, Trace, TraceStep};

mod session;
pub use session::Session;
