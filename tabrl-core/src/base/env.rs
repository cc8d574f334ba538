//! Environment.
use super::{Act, State, Step};
use anyhow::Result;
use rand::Rng;

/// Represents a toy world with a discretized state space and a finite action set.
///
/// A transition is a function of `(state, action)` and of the random source handed in by
/// the caller. Exogenous variables such as a signal color are part of [`State`], never
/// hidden fields. The environment owns the parameters of their distributions.
pub trait Env {
    /// Configurations.
    type Config: Clone;

    /// Builds an environment, validating its configuration.
    fn build(config: &Self::Config) -> Result<Self>
    where
        Self: Sized;

    /// The number of actions. It never changes for a given instance.
    fn n_actions(&self) -> usize;

    /// The number of bins on each axis of [`State`].
    fn state_dims(&self) -> Vec<usize>;

    /// Returns the initial state of an episode.
    fn reset<R: Rng + ?Sized>(&self, rng: &mut R) -> State;

    /// Performs a transition from `state` with action `act`.
    ///
    /// A move which would leave the domain is a no-op on the position.
    fn step<R: Rng + ?Sized>(&self, state: &State, act: Act, rng: &mut R) -> Step;

    /// The state whose best action-value is bootstrapped after reaching `next_state`.
    ///
    /// The default is `next_state` itself. Environments with exogenous variables may
    /// resample them here when configured to.
    fn bootstrap_state<R: Rng + ?Sized>(&self, next_state: &State, _rng: &mut R) -> State {
        next_state.clone()
    }

    /// Rejects a state outside [`Env::state_dims`].
    fn check_state(&self, state: &State) -> Result<()> {
        Ok(state.check_within(&self.state_dims())?)
    }
}
