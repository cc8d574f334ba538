//! Train a [`QTable`] on an [`Env`].
mod config;
use crate::{
    error::TabrlError,
    record::{Record, RecordValue::Scalar, Recorder},
    Act, Env, EpsilonGreedy, Evaluator, QTable, State,
};
use anyhow::Result;
pub use config::TrainerConfig;
use log::{debug, info, trace};
use rand::{rngs::SmallRng, SeedableRng};

/// Applies the Q-learning update to `(state, act)` and returns the written value.
///
/// `Q(s,a) <- Q(s,a) + alpha * (r + gamma * max_a' Q(s',a') - Q(s,a))`
///
/// The bootstrap is the best value of `next_state` under the current table, not the value
/// of the action taken next. Both `state` and `next_state` get an entry if missing.
pub fn q_update(
    q_table: &mut QTable,
    state: &State,
    act: Act,
    reward: f32,
    next_state: &State,
    alpha: f32,
    gamma: f32,
) -> f32 {
    let best_next = q_table.max(next_state);
    let old = q_table.get(state)[act];
    let new = old + alpha * (reward + gamma * best_next - old);
    q_table.update(state, act, new);
    new
}

/// Runs episodic Q-learning.
///
/// # Training loop
///
/// For each episode:
///
/// 1. Reset the [`Env`] and take its initial state.
/// 2. Choose an action with [`EpsilonGreedy`] at the epsilon of the current episode.
/// 3. Step the environment and check the next state against [`Env::state_dims`].
/// 4. Apply [`q_update`] with the state given by [`Env::bootstrap_state`].
/// 5. Stop at a terminal step or at `max_steps_per_episode`. Reaching the cap has no
///    penalty.
///
/// Every `eval_interval` episodes a greedy rollout is run with an internal [`Evaluator`]
/// and its return is added to the record of the episode as `"eval_return"`.
///
/// Episodes run strictly one after the other and share nothing but the table. The episode
/// counter persists across calls, so calling [`Trainer::train`] again continues the
/// exploration schedule where it stopped.
pub struct Trainer {
    config: TrainerConfig,
    rng: SmallRng,
    evaluator: Evaluator,
    episodes_done: usize,
}

impl Trainer {
    /// Constructs a trainer, validating the configuration.
    pub fn build(config: TrainerConfig) -> Result<Self> {
        config.validate()?;
        let rng = SmallRng::seed_from_u64(config.seed);
        let evaluator = Evaluator::new(config.max_steps_per_episode, config.seed.wrapping_add(1))?;
        Ok(Self {
            config,
            rng,
            evaluator,
            episodes_done: 0,
        })
    }

    /// The configuration.
    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// The number of episodes completed by this trainer.
    pub fn episodes_done(&self) -> usize {
        self.episodes_done
    }

    fn check_compatible<E: Env>(env: &E, q_table: &QTable) -> Result<()> {
        if env.n_actions() == 0 {
            return Err(TabrlError::config("environment has no actions").into());
        }
        if env.n_actions() != q_table.n_actions() {
            return Err(TabrlError::config(format!(
                "Q-table has {} actions, environment has {}",
                q_table.n_actions(),
                env.n_actions()
            ))
            .into());
        }
        Ok(())
    }

    /// Runs one episode and returns its record.
    ///
    /// On a domain error the episode is aborted. Updates made before the failing step
    /// stay in the table.
    pub fn train_episode<E: Env>(&mut self, env: &E, q_table: &mut QTable) -> Result<Record> {
        Self::check_compatible(env, q_table)?;
        let TrainerConfig {
            alpha,
            gamma,
            max_steps_per_episode,
            ..
        } = self.config;
        let epsilon = self.config.explorer.epsilon(self.episodes_done);

        let dims = env.state_dims();
        let mut state = env.reset(&mut self.rng);
        state.check_within(&dims)?;
        let mut episode_return = 0f32;
        let mut episode_length = 0usize;
        let mut terminated = false;

        for _ in 0..max_steps_per_episode {
            let act = EpsilonGreedy::choose(q_table, &state, epsilon, &mut self.rng);
            let step = env.step(&state, act, &mut self.rng);
            step.next_state.check_within(&dims)?;
            let bootstrap = env.bootstrap_state(&step.next_state, &mut self.rng);
            bootstrap.check_within(&dims)?;

            let q = q_update(q_table, &state, act, step.reward, &bootstrap, alpha, gamma);
            trace!(
                "{} -[{}]-> {}, r = {}, q = {}",
                state,
                act,
                step.next_state,
                step.reward,
                q
            );

            episode_return += step.reward;
            episode_length += 1;
            state = step.next_state;
            if step.is_terminated {
                terminated = true;
                break;
            }
        }

        let episode = self.episodes_done;
        self.episodes_done += 1;
        debug!(
            "Episode {}: return = {}, length = {}, terminated = {}",
            episode, episode_return, episode_length, terminated
        );

        Ok(Record::from_slice(&[
            ("episode", Scalar(episode as f32)),
            ("episode_return", Scalar(episode_return)),
            ("episode_length", Scalar(episode_length as f32)),
            ("epsilon", Scalar(epsilon)),
            ("terminated", Scalar(if terminated { 1.0 } else { 0.0 })),
            ("q_table_size", Scalar(q_table.len() as f32)),
        ]))
    }

    /// Runs `episodes` episodes.
    pub fn train<E, R>(&mut self, env: &E, q_table: &mut QTable, recorder: &mut R) -> Result<()>
    where
        E: Env,
        R: Recorder + ?Sized,
    {
        self.train_until(env, q_table, recorder, |_| false)
    }

    /// Runs up to `episodes` episodes, stopping early once `stop` returns `true`.
    ///
    /// `stop` sees the record of each completed episode, so the run can only end between
    /// episodes.
    pub fn train_until<E, R, F>(
        &mut self,
        env: &E,
        q_table: &mut QTable,
        recorder: &mut R,
        mut stop: F,
    ) -> Result<()>
    where
        E: Env,
        R: Recorder + ?Sized,
        F: FnMut(&Record) -> bool,
    {
        Self::check_compatible(env, q_table)?;
        info!(
            "Start training: {} episodes, alpha = {}, gamma = {}",
            self.config.episodes, self.config.alpha, self.config.gamma
        );

        for i in 1..=self.config.episodes {
            let mut record = self.train_episode(env, q_table)?;

            if self.config.eval_interval > 0 && self.episodes_done % self.config.eval_interval == 0 {
                let eval = self.evaluator.evaluate(env, q_table)?;
                info!(
                    "Episode {}: eval_return = {}",
                    self.episodes_done,
                    eval.get_scalar("eval_return")?
                );
                record.merge_inplace(eval);
            }

            let should_stop = stop(&record);
            recorder.store(record);

            if i % self.config.record_interval == 0 {
                recorder.flush(self.episodes_done as _);
            }
            if should_stop {
                info!("Stopped after episode {}", self.episodes_done);
                recorder.flush(self.episodes_done as _);
                return Ok(());
            }
        }

        if self.config.episodes % self.config.record_interval != 0 {
            recorder.flush(self.episodes_done as _);
        }
        info!(
            "Finished training: {} episodes in total, {} states visited",
            self.episodes_done,
            q_table.len()
        );
        Ok(())
    }
}
