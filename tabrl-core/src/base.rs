//! Core abstractions shared by every environment.
mod env;
mod state;
mod step;
pub use env::Env;
pub use state::State;
pub use step::Step;

/// Index into the fixed action set of an environment.
pub type Act = usize;
