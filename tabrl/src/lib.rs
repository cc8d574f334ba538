//! Tabular reinforcement learning on toy worlds.
//!
//! Tabrl consists of the following crates:
//!
//! * [tabrl-core](tabrl_core) is the engine: state discretization, the Q-table, the
//!   epsilon-greedy policy, the Q-learning trainer and the greedy evaluator around a
//!   pluggable [`Env`](tabrl_core::Env).
//! * [tabrl-envs](tabrl_envs) has the toy environments: a corridor, a grid with traffic
//!   signals, a car approaching traffic lights, inventory control, a multi-armed bandit
//!   and word tracing on a letter grid.
//! * This crate re-exports both, adds [`util`] to export training records and rollouts
//!   as CSV, and hosts one runnable demo per environment under `examples/`.
pub use tabrl_core;
pub use tabrl_envs;

pub mod util;
