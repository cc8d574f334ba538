#![warn(missing_docs)]
//! Toy environments implementing [`tabrl_core::Env`].
//!
//! All of them share one reward shape: a large goal bonus, a large
//! penalty for the wrong action under a constraint (running a red light, stepping back
//! onto a visited cell, ordering past capacity), a small bonus for the right constrained
//! action and a slightly negative default step cost.
//!
//! [`word_grid`] is a standalone letter-grid generator used to set up [`WordTraceEnv`].
mod bandit;
mod car;
mod corridor;
mod grid;
mod inventory;
mod signal;
mod word_trace;
pub mod word_grid;

pub use bandit::{BanditEnv, BanditEnvConfig};
pub use car::{CarAct, CarEnv, CarEnvConfig, CarRewards};
pub use corridor::{Corridor, CorridorConfig};
pub use grid::{GridAct, GridRewards, GridStart, GridWorld, GridWorldConfig};
pub use inventory::{InventoryEnv, InventoryEnvConfig};
pub use signal::{Signal, SignalBootstrap};
pub use word_trace::{WordTraceEnv, WordTraceEnvConfig, WordTraceRewards, MOVES, NO_MOVE};
