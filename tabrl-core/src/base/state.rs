//! Discrete state.
use crate::error::TabrlError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordered tuple of discretized coordinates, such as `(row, col)` or
/// `(position_bin, velocity_bin, signal)`.
///
/// Identity is structural equality of the tuple. The axis order is part of the contract
/// between an environment and the [`QTable`](crate::QTable) and must not change during a run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct State(Vec<usize>);

impl State {
    /// Constructs a state from its coordinates.
    pub fn new(coords: Vec<usize>) -> Self {
        Self(coords)
    }

    /// Coordinates of the state.
    pub fn coords(&self) -> &[usize] {
        &self.0
    }

    /// Coordinate on the given axis.
    ///
    /// Panics if `axis` is not smaller than [`State::len`].
    pub fn get(&self, axis: usize) -> usize {
        self.0[axis]
    }

    /// The number of axes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` for the zero-axis state.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns a copy of the state with one coordinate replaced.
    pub fn with(&self, axis: usize, value: usize) -> Self {
        let mut coords = self.0.clone();
        coords[axis] = value;
        Self(coords)
    }

    /// Returns `true` if the state has one coordinate per entry of `dims` and each
    /// coordinate is smaller than its entry.
    pub fn is_within(&self, dims: &[usize]) -> bool {
        self.0.len() == dims.len() && self.0.iter().zip(dims).all(|(c, d)| c < d)
    }

    /// Like [`State::is_within`], but returns a [`TabrlError::Domain`] for a state outside
    /// `dims`.
    pub fn check_within(&self, dims: &[usize]) -> Result<(), TabrlError> {
        if self.is_within(dims) {
            Ok(())
        } else {
            Err(TabrlError::Domain {
                state: self.clone(),
                dims: dims.to_vec(),
            })
        }
    }
}

impl From<Vec<usize>> for State {
    fn from(coords: Vec<usize>) -> Self {
        Self(coords)
    }
}

impl<const N: usize> From<[usize; N]> for State {
    fn from(coords: [usize; N]) -> Self {
        Self(coords.to_vec())
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", c)?;
        }
        write!(f, ")")
    }
}
