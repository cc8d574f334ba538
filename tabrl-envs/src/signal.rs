//! Traffic signal shared by [`GridWorld`](crate::GridWorld) and [`CarEnv`](crate::CarEnv).
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Color of the light, stored in a state coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    /// Coordinate value 0.
    Green,

    /// Coordinate value 1.
    Red,
}

impl Signal {
    /// Number of values of the signal coordinate.
    pub const N: usize = 2;

    /// Decodes a state coordinate. Anything but 1 reads as green.
    pub fn from_coord(c: usize) -> Self {
        if c == 1 {
            Signal::Red
        } else {
            Signal::Green
        }
    }

    /// Encodes the signal as a state coordinate.
    pub fn coord(self) -> usize {
        match self {
            Signal::Green => 0,
            Signal::Red => 1,
        }
    }

    /// Draws a signal which is red with probability `p_red`.
    pub fn draw<R: Rng + ?Sized>(p_red: f32, rng: &mut R) -> Self {
        if rng.gen::<f32>() < p_red {
            Signal::Red
        } else {
            Signal::Green
        }
    }
}

/// Which signal the Q-learning bootstrap sees after a transition.
///
/// `Observed` bootstraps from the color seen at the next state. `Resampled` re-rolls the
/// light first, which averages the target over both colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalBootstrap {
    /// Bootstrap from the next state as observed.
    Observed,

    /// Bootstrap from the next state with a freshly drawn signal.
    Resampled,
}

impl Default for SignalBootstrap {
    fn default() -> Self {
        SignalBootstrap::Observed
    }
}
