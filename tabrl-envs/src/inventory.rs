//! Single-product inventory control.
use anyhow::Result;
use log::trace;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tabrl_core::{error::TabrlError, Act, Env, State, Step};

/// Configuration of [`InventoryEnv`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryEnvConfig {
    /// Storage capacity. Stock lies in `[0, capacity]`.
    pub capacity: usize,

    /// Largest order. Actions are order quantities `0..=max_order`.
    pub max_order: usize,

    /// Largest demand. Demand is uniform over `0..=max_demand`.
    pub max_demand: usize,

    /// Stock at the start of an episode.
    pub initial_stock: usize,

    /// Revenue per unit sold.
    pub price: f32,

    /// Cost per unit left in stock after the sale.
    pub holding_cost: f32,

    /// Penalty per unit of unmet demand.
    pub stockout_penalty: f32,

    /// Penalty per unit ordered beyond capacity.
    pub overflow_penalty: f32,

    /// Bonus for a step with neither unmet demand nor overflow.
    pub balanced_bonus: f32,
}

impl Default for InventoryEnvConfig {
    fn default() -> Self {
        Self {
            capacity: 20,
            max_order: 5,
            max_demand: 4,
            initial_stock: 10,
            price: 2.0,
            holding_cost: 0.1,
            stockout_penalty: 10.0,
            overflow_penalty: 5.0,
            balanced_bonus: 1.0,
        }
    }
}

impl InventoryEnvConfig {
    /// Sets the capacity.
    pub fn capacity(mut self, v: usize) -> Self {
        self.capacity = v;
        self
    }

    /// Sets the initial stock.
    pub fn initial_stock(mut self, v: usize) -> Self {
        self.initial_stock = v;
        self
    }

    /// Sets the largest demand.
    pub fn max_demand(mut self, v: usize) -> Self {
        self.max_demand = v;
        self
    }
}

/// Inventory control. State is `(stock)`.
///
/// At each step the order arrives at once, stock is clamped to capacity, a demand is drawn
/// and served from stock. There is no goal; the step cap of the trainer ends an episode.
pub struct InventoryEnv {
    config: InventoryEnvConfig,
}

impl InventoryEnv {
    /// Stock and reward after ordering `order` and facing `demand` with `stock` on hand.
    pub fn transition(&self, stock: usize, order: usize, demand: usize) -> (usize, f32) {
        let c = &self.config;
        let wanted = stock + order;
        let overflow = wanted.saturating_sub(c.capacity);
        let stocked = wanted.min(c.capacity);
        let sold = stocked.min(demand);
        let unmet = demand - sold;
        let left = stocked - sold;

        let mut reward = c.price * sold as f32
            - c.holding_cost * left as f32
            - c.stockout_penalty * unmet as f32
            - c.overflow_penalty * overflow as f32;
        if unmet == 0 && overflow == 0 {
            reward += c.balanced_bonus;
        }
        (left, reward)
    }
}

impl Env for InventoryEnv {
    type Config = InventoryEnvConfig;

    fn build(config: &Self::Config) -> Result<Self> {
        if config.capacity == 0 {
            return Err(TabrlError::config("capacity must be positive").into());
        }
        if config.initial_stock > config.capacity {
            return Err(TabrlError::config("initial_stock exceeds capacity").into());
        }
        Ok(Self {
            config: config.clone(),
        })
    }

    fn n_actions(&self) -> usize {
        self.config.max_order + 1
    }

    fn state_dims(&self) -> Vec<usize> {
        vec![self.config.capacity + 1]
    }

    fn reset<R: Rng + ?Sized>(&self, _rng: &mut R) -> State {
        State::from([self.config.initial_stock])
    }

    fn step<R: Rng + ?Sized>(&self, state: &State, act: Act, rng: &mut R) -> Step {
        let demand = rng.gen_range(0..=self.config.max_demand);
        trace!("InventoryEnv::step(): stock = {}, order = {}, demand = {}", state.get(0), act, demand);
        let (stock, reward) = self.transition(state.get(0), act, demand);
        Step::new(act, State::from([stock]), reward, false)
    }
}
