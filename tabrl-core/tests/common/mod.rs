//! Small environments used by the integration tests.
#![allow(dead_code)]
use anyhow::Result;
use rand::Rng;
use std::cell::Cell;
use tabrl_core::{Act, Env, State, Step};

/// One absorbing state. Action `good` yields `reward`, every other action yields 0.
pub struct Absorbing {
    pub n_actions: usize,
    pub good: Act,
    pub reward: f32,
}

impl Env for Absorbing {
    type Config = (usize, Act, f32);

    fn build(config: &Self::Config) -> Result<Self> {
        Ok(Self {
            n_actions: config.0,
            good: config.1,
            reward: config.2,
        })
    }

    fn n_actions(&self) -> usize {
        self.n_actions
    }

    fn state_dims(&self) -> Vec<usize> {
        vec![1]
    }

    fn reset<R: Rng + ?Sized>(&self, _rng: &mut R) -> State {
        State::from([0])
    }

    fn step<R: Rng + ?Sized>(&self, state: &State, act: Act, _rng: &mut R) -> Step {
        let reward = if act == self.good { self.reward } else { 0.0 };
        Step::new(act, state.clone(), reward, false)
    }
}

/// Walks right along a line and steps out of its declared bounds at `escape_at`.
pub struct Leaky {
    pub escape_at: usize,
}

impl Env for Leaky {
    type Config = usize;

    fn build(config: &Self::Config) -> Result<Self> {
        Ok(Self { escape_at: *config })
    }

    fn n_actions(&self) -> usize {
        1
    }

    fn state_dims(&self) -> Vec<usize> {
        vec![self.escape_at]
    }

    fn reset<R: Rng + ?Sized>(&self, _rng: &mut R) -> State {
        State::from([0])
    }

    fn step<R: Rng + ?Sized>(&self, state: &State, act: Act, _rng: &mut R) -> Step {
        Step::new(act, State::from([state.get(0) + 1]), 1.0, false)
    }
}

/// One state and one action, counting calls of `state_dims`.
pub struct DimsCounter {
    pub calls: Cell<usize>,
}

impl Env for DimsCounter {
    type Config = ();

    fn build(_config: &Self::Config) -> Result<Self> {
        Ok(Self {
            calls: Cell::new(0),
        })
    }

    fn n_actions(&self) -> usize {
        1
    }

    fn state_dims(&self) -> Vec<usize> {
        self.calls.set(self.calls.get() + 1);
        vec![1]
    }

    fn reset<R: Rng + ?Sized>(&self, _rng: &mut R) -> State {
        State::from([0])
    }

    fn step<R: Rng + ?Sized>(&self, state: &State, act: Act, _rng: &mut R) -> Step {
        Step::new(act, state.clone(), 0.0, false)
    }
}
