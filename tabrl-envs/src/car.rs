//! Continuous one-dimensional car approaching traffic signals.
use crate::{Signal, SignalBootstrap};
use anyhow::Result;
use log::{info, trace};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use tabrl_core::{error::TabrlError, Act, Axis, Discretizer, Env, State, Step};

/// Actions of [`CarEnv`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CarAct {
    /// Decelerate by `decel`.
    Brake,
    /// Keep the velocity.
    Coast,
    /// Accelerate by `accel`.
    Accelerate,
}

impl CarAct {
    /// All actions in index order.
    pub const ALL: [CarAct; 3] = [CarAct::Brake, CarAct::Coast, CarAct::Accelerate];

    /// Decodes an action index. Indices past the end read as [`CarAct::Coast`].
    pub fn from_index(act: Act) -> Self {
        Self::ALL.get(act).copied().unwrap_or(CarAct::Coast)
    }

    /// Index of the action.
    pub fn index(self) -> Act {
        self as Act
    }
}

/// Reward table of [`CarEnv`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarRewards {
    /// Reaching the last position bin.
    pub goal: f32,

    /// Crossing a signal while the light is red.
    pub red_violation: f32,

    /// Standing still inside the stop zone of a red signal.
    pub red_stop: f32,

    /// Any other step.
    pub step: f32,
}

impl Default for CarRewards {
    fn default() -> Self {
        Self {
            goal: 100.0,
            red_violation: -50.0,
            red_stop: 5.0,
            step: -1.0,
        }
    }
}

/// Configuration of [`CarEnv`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarEnvConfig {
    /// Length of the track. Position lies in `[0, track_length]`.
    pub track_length: f32,

    /// The number of position bins.
    pub n_position_bins: usize,

    /// Top speed. Velocity lies in `[0, v_max]`.
    pub v_max: f32,

    /// The number of velocity bins. Bin 0 counts as standing still.
    pub n_velocity_bins: usize,

    /// Velocity gained per step when accelerating.
    pub accel: f32,

    /// Velocity lost per step when braking.
    pub decel: f32,

    /// Standard deviation of the Gaussian noise added to the velocity at every step.
    pub noise_std: f32,

    /// Positions of the traffic signals.
    pub signals: Vec<f32>,

    /// Length of the zone before a signal where stopping earns `red_stop`.
    pub stop_zone: f32,

    /// Probability that the light is red at a step.
    pub p_red: f32,

    /// Reward table.
    pub rewards: CarRewards,

    /// Signal seen by the bootstrap.
    pub bootstrap: SignalBootstrap,
}

impl Default for CarEnvConfig {
    fn default() -> Self {
        Self {
            track_length: 20.0,
            n_position_bins: 20,
            v_max: 3.0,
            n_velocity_bins: 4,
            accel: 1.0,
            decel: 1.5,
            noise_std: 0.1,
            signals: vec![8.0, 14.0],
            stop_zone: 2.0,
            p_red: 0.3,
            rewards: CarRewards::default(),
            bootstrap: SignalBootstrap::Observed,
        }
    }
}

impl CarEnvConfig {
    /// Sets the noise of the velocity.
    pub fn noise_std(mut self, v: f32) -> Self {
        self.noise_std = v;
        self
    }

    /// Sets the positions of the signals.
    pub fn signals(mut self, v: Vec<f32>) -> Self {
        self.signals = v;
        self
    }

    /// Sets the probability of a red light.
    pub fn p_red(mut self, v: f32) -> Self {
        self.p_red = v;
        self
    }

    /// Sets the bootstrap rule.
    pub fn bootstrap(mut self, v: SignalBootstrap) -> Self {
        self.bootstrap = v;
        self
    }
}

/// A car on a straight track. State is `(position_bin, velocity_bin, signal)`.
///
/// A transition decodes the bins to their centers, applies the action and the velocity
/// noise, clamps velocity to `[0, v_max]` and position to `[0, track_length]`, then bins
/// the result again. All signals share one light which is redrawn at every step. The
/// episode ends in the last position bin.
pub struct CarEnv {
    config: CarEnvConfig,
    discretizer: Discretizer,
    noise: Option<Normal<f32>>,
}

impl CarEnv {
    fn position_axis(&self) -> &Axis {
        &self.discretizer.axes()[0]
    }

    fn velocity_axis(&self) -> &Axis {
        &self.discretizer.axes()[1]
    }

    /// Position at the center of the position bin of `state`.
    pub fn position(&self, state: &State) -> f32 {
        self.position_axis().center(state.get(0))
    }

    /// Velocity at the center of the velocity bin of `state`.
    pub fn velocity(&self, state: &State) -> f32 {
        self.velocity_axis().center(state.get(1))
    }

    /// Discretizes a continuous observation.
    pub fn observe(&self, position: f32, velocity: f32, signal: Signal) -> State {
        let bins = self.discretizer.discretize(&[position, velocity]);
        State::from([bins.get(0), bins.get(1), signal.coord()])
    }

    /// Continuous dynamics: returns the clamped `(position, velocity)` after one step.
    pub fn dynamics<R: Rng + ?Sized>(
        &self,
        position: f32,
        velocity: f32,
        act: CarAct,
        rng: &mut R,
    ) -> (f32, f32) {
        let dv = match act {
            CarAct::Brake => -self.config.decel,
            CarAct::Coast => 0.0,
            CarAct::Accelerate => self.config.accel,
        };
        let noise = match &self.noise {
            Some(normal) => normal.sample(rng),
            None => 0.0,
        };
        let velocity = self.velocity_axis().clamp(velocity + dv + noise);
        let position = self.position_axis().clamp(position + velocity);
        (position, velocity)
    }

    fn crosses_signal(&self, from: f32, to: f32) -> bool {
        self.config.signals.iter().any(|&s| from < s && s <= to)
    }

    fn in_stop_zone(&self, position: f32) -> bool {
        self.config
            .signals
            .iter()
            .any(|&s| s - self.config.stop_zone <= position && position < s)
    }
}

impl Env for CarEnv {
    type Config = CarEnvConfig;

    fn build(config: &Self::Config) -> Result<Self> {
        let position_axis = Axis::new(0.0, config.track_length, config.n_position_bins)?;
        let velocity_axis = Axis::new(0.0, config.v_max, config.n_velocity_bins)?;
        if config.n_position_bins < 2 {
            return Err(TabrlError::config("the track needs at least 2 position bins").into());
        }
        if !(config.accel >= 0.0 && config.decel >= 0.0) {
            return Err(TabrlError::config("accel and decel must be non-negative").into());
        }
        if !(config.stop_zone >= 0.0) {
            return Err(TabrlError::config("stop_zone must be non-negative").into());
        }
        if !(0.0..=1.0).contains(&config.p_red) {
            return Err(TabrlError::config(format!("p_red must be in [0, 1], got {}", config.p_red)).into());
        }
        if config
            .signals
            .iter()
            .any(|&s| !(0.0..=config.track_length).contains(&s))
        {
            return Err(TabrlError::config("signal lies outside the track").into());
        }
        let noise = if config.noise_std == 0.0 {
            None
        } else {
            let normal = Normal::new(0.0, config.noise_std)
                .map_err(|e| TabrlError::config(format!("noise_std: {}", e)))?;
            Some(normal)
        };
        info!(
            "Initialize CarEnv: track = {}, bins = {}x{}, signals = {:?}, p_red = {}",
            config.track_length,
            config.n_position_bins,
            config.n_velocity_bins,
            config.signals,
            config.p_red
        );

        Ok(Self {
            config: config.clone(),
            discretizer: Discretizer::new(vec![position_axis, velocity_axis]),
            noise,
        })
    }

    fn n_actions(&self) -> usize {
        CarAct::ALL.len()
    }

    fn state_dims(&self) -> Vec<usize> {
        let mut dims = self.discretizer.dims();
        dims.push(Signal::N);
        dims
    }

    fn reset<R: Rng + ?Sized>(&self, rng: &mut R) -> State {
        self.observe(0.0, 0.0, Signal::draw(self.config.p_red, rng))
    }

    fn step<R: Rng + ?Sized>(&self, state: &State, act: Act, rng: &mut R) -> Step {
        let red = Signal::from_coord(state.get(2)) == Signal::Red;
        let from = self.position(state);
        let (position, velocity) =
            self.dynamics(from, self.velocity(state), CarAct::from_index(act), rng);
        trace!("CarEnv::step(): x = {} -> {}, v = {}", from, position, velocity);
        let next_signal = Signal::draw(self.config.p_red, rng);
        let next_state = self.observe(position, velocity, next_signal);
        let is_goal = next_state.get(0) == self.config.n_position_bins - 1;
        let stopped = next_state.get(1) == 0;

        let rewards = &self.config.rewards;
        let reward = if red && self.crosses_signal(from, position) {
            rewards.red_violation
        } else if is_goal {
            rewards.goal
        } else if red && stopped && self.in_stop_zone(position) {
            rewards.red_stop
        } else {
            rewards.step
        };

        Step::new(act, next_state, reward, is_goal)
    }

    fn bootstrap_state<R: Rng + ?Sized>(&self, next_state: &State, rng: &mut R) -> State {
        match self.config.bootstrap {
            SignalBootstrap::Observed => next_state.clone(),
            SignalBootstrap::Resampled => {
                next_state.with(2, Signal::draw(self.config.p_red, rng).coord())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    fn noiseless() -> Result<CarEnv> {
        CarEnv::build(&CarEnvConfig::default().noise_std(0.0).signals(vec![8.0]))
    }

    #[test]
    fn test_reset_at_origin() -> Result<()> {
        let env = CarEnv::build(&CarEnvConfig::default())?;
        let mut rng = SmallRng::seed_from_u64(0);
        let s = env.reset(&mut rng);
        assert_eq!(&s.coords()[..2], &[0, 0]);
        Ok(())
    }

    #[test]
    fn test_dynamics_clamp() -> Result<()> {
        let env = CarEnv::build(&CarEnvConfig::default().noise_std(2.0))?;
        let mut rng = SmallRng::seed_from_u64(1);
        for i in 0..5000 {
            let act = CarAct::from_index(i % 3);
            let x = (i % 23) as f32 - 1.0;
            let v = (i % 5) as f32 - 1.0;
            let (x, v) = env.dynamics(x, v, act, &mut rng);
            assert!((0.0..=20.0).contains(&x), "position {}", x);
            assert!((0.0..=3.0).contains(&v), "velocity {}", v);
        }
        Ok(())
    }

    #[test]
    fn test_brake_to_standstill() -> Result<()> {
        let env = noiseless()?;
        let mut rng = SmallRng::seed_from_u64(2);
        let s = State::from([3, 1, 0]);
        let step = env.step(&s, CarAct::Brake.index(), &mut rng);
        assert_eq!(step.next_state.get(1), 0);
        assert_eq!(step.next_state.get(0), 3);
        Ok(())
    }

    #[test]
    fn test_running_red_light() -> Result<()> {
        let env = noiseless()?;
        let mut rng = SmallRng::seed_from_u64(3);
        // center 7.5, top speed bin center 2.625: crosses the signal at 8.0
        let red = State::from([7, 3, Signal::Red.coord()]);
        let green = State::from([7, 3, Signal::Green.coord()]);
        assert_eq!(env.step(&red, CarAct::Coast.index(), &mut rng).reward, -50.0);
        assert_eq!(env.step(&green, CarAct::Coast.index(), &mut rng).reward, -1.0);
        Ok(())
    }

    #[test]
    fn test_stopping_at_red_light() -> Result<()> {
        let env = noiseless()?;
        let mut rng = SmallRng::seed_from_u64(4);
        let red = State::from([6, 0, Signal::Red.coord()]);
        let step = env.step(&red, CarAct::Brake.index(), &mut rng);
        assert_eq!(step.reward, 5.0);
        assert_eq!(step.next_state.get(0), 6);
        Ok(())
    }

    #[test]
    fn test_goal() -> Result<()> {
        let env = noiseless()?;
        let mut rng = SmallRng::seed_from_u64(5);
        let s = State::from([18, 2, Signal::Green.coord()]);
        let step = env.step(&s, CarAct::Accelerate.index(), &mut rng);
        assert_eq!(step.next_state.get(0), 19);
        assert!(step.is_terminated);
        assert_eq!(step.reward, 100.0);
        Ok(())
    }

    #[test]
    fn test_bootstrap_rules() -> Result<()> {
        let mut rng = SmallRng::seed_from_u64(6);
        let s = State::from([5, 1, Signal::Red.coord()]);

        let observed = CarEnv::build(&CarEnvConfig::default().p_red(0.0))?;
        assert_eq!(observed.bootstrap_state(&s, &mut rng), s);

        let resampled = CarEnv::build(
            &CarEnvConfig::default()
                .bootstrap(SignalBootstrap::Resampled)
                .p_red(0.0),
        )?;
        for _ in 0..20 {
            assert_eq!(
                resampled.bootstrap_state(&s, &mut rng),
                State::from([5, 1, Signal::Green.coord()])
            );
        }
        Ok(())
    }

    #[test]
    fn test_invalid_config() {
        let base = CarEnvConfig::default();
        assert!(CarEnv::build(&base.clone().noise_std(-1.0)).is_err());
        assert!(CarEnv::build(&base.clone().signals(vec![25.0])).is_err());
        assert!(CarEnv::build(&base.clone().p_red(-0.1)).is_err());
        let mut zero_bins = base;
        zero_bins.n_velocity_bins = 0;
        assert!(CarEnv::build(&zero_bins).is_err());
    }
}
