//! Environment step.
use super::{Act, State};

/// Outcome of one transition `(s_t, a_t) -> (s_t+1, r_t, terminal)`.
///
/// An environment emits a [`Step`] at every interaction step. The trainer pairs it with
/// the state it acted from to form the transition used in the Q-learning update.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// Action which produced this step.
    pub act: Act,

    /// State after the transition.
    pub next_state: State,

    /// Reward.
    pub reward: f32,

    /// Flag denoting if the goal condition of the environment was reached.
    pub is_terminated: bool,
}

impl Step {
    /// Constructs a [`Step`] object.
    pub fn new(act: Act, next_state: State, reward: f32, is_terminated: bool) -> Self {
        Self {
            act,
            next_state,
            reward,
            is_terminated,
        }
    }
}
