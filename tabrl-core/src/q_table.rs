//! Sparse table of action-values.
use crate::{Act, State};
use std::collections::{hash_map, HashMap};
use xxhash_rust::xxh3::Xxh3Builder;

/// Mapping from [`State`] to one action-value per action.
///
/// Entries are created lazily as zero vectors and are never removed. Every vector has
/// exactly [`QTable::n_actions`] elements.
#[derive(Debug, Clone)]
pub struct QTable {
    n_actions: usize,
    values: HashMap<State, Vec<f32>, Xxh3Builder>,
}

impl QTable {
    /// Constructs an empty table for an action set of the given size.
    pub fn new(n_actions: usize) -> Self {
        Self {
            n_actions,
            values: HashMap::default(),
        }
    }

    /// The number of actions.
    pub fn n_actions(&self) -> usize {
        self.n_actions
    }

    /// The number of stored states.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no state has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns `true` if `state` has an entry.
    pub fn contains(&self, state: &State) -> bool {
        self.values.contains_key(state)
    }

    /// Returns the action-values of `state`, storing a zero vector on first access.
    pub fn get(&mut self, state: &State) -> &[f32] {
        let n_actions = self.n_actions;
        self.values
            .entry(state.clone())
            .or_insert_with(|| vec![0.0; n_actions])
    }

    /// Returns the action-values of `state` without storing anything.
    ///
    /// Unseen states read as zeros.
    pub fn values(&self, state: &State) -> Vec<f32> {
        match self.values.get(state) {
            Some(v) => v.clone(),
            None => vec![0.0; self.n_actions],
        }
    }

    /// Writes a single action-value. No other entry changes.
    ///
    /// Panics if `act` is not smaller than [`QTable::n_actions`].
    pub fn update(&mut self, state: &State, act: Act, value: f32) {
        assert!(act < self.n_actions, "action {} out of range", act);
        let n_actions = self.n_actions;
        self.values
            .entry(state.clone())
            .or_insert_with(|| vec![0.0; n_actions])[act] = value;
    }

    /// The largest action-value of `state`, storing a zero vector on first access.
    pub fn max(&mut self, state: &State) -> f32 {
        self.get(state)
            .iter()
            .copied()
            .fold(f32::NEG_INFINITY, f32::max)
    }

    /// Iterates over the stored entries in arbitrary order.
    pub fn iter(&self) -> hash_map::Iter<'_, State, Vec<f32>> {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_creates_zero_vector() {
        let mut q = QTable::new(3);
        let s = State::from([1, 2]);
        assert!(!q.contains(&s));
        assert_eq!(q.get(&s), &[0.0, 0.0, 0.0]);
        assert!(q.contains(&s));
        assert_eq!(q.len(), 1);

        // a second read does not re-zero or duplicate
        assert_eq!(q.get(&s), &[0.0, 0.0, 0.0]);
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn test_get_returns_updated_vector() {
        let mut q = QTable::new(2);
        let s = State::from([0]);
        q.get(&s);
        q.update(&s, 1, 2.5);
        assert_eq!(q.get(&s), &[0.0, 2.5]);
    }

    #[test]
    fn test_update_touches_a_single_entry() {
        let mut q = QTable::new(4);
        let s1 = State::from([0, 0]);
        let s2 = State::from([0, 1]);
        q.update(&s1, 0, 1.0);
        q.update(&s2, 3, -1.0);
        q.update(&s1, 2, 5.0);
        assert_eq!(q.values(&s1), vec![1.0, 0.0, 5.0, 0.0]);
        assert_eq!(q.values(&s2), vec![0.0, 0.0, 0.0, -1.0]);
    }

    #[test]
    fn test_values_does_not_store() {
        let q = QTable::new(5);
        let s = State::from([7]);
        assert_eq!(q.values(&s), vec![0.0; 5]);
        assert!(q.is_empty());
    }

    #[test]
    fn test_max() {
        let mut q = QTable::new(3);
        let s = State::from([2]);
        assert_eq!(q.max(&s), 0.0);
        q.update(&s, 0, -3.0);
        q.update(&s, 1, -1.0);
        q.update(&s, 2, -2.0);
        assert_eq!(q.max(&s), -1.0);
    }

    #[test]
    #[should_panic]
    fn test_update_rejects_out_of_range_action() {
        let mut q = QTable::new(2);
        q.update(&State::from([0]), 2, 1.0);
    }
}
