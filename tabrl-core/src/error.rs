//! Errors in the library.
use crate::State;
use thiserror::Error;

/// Errors in the library.
#[derive(Error, Debug, PartialEq)]
pub enum TabrlError {
    /// Invalid hyperparameter or environment parameter, reported before any episode runs.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A state outside the discretization bounds declared by the environment.
    #[error("State {state} is outside the declared bounds {dims:?}")]
    Domain {
        /// The offending state.
        state: State,

        /// Number of bins on each axis, as declared by the environment.
        dims: Vec<usize>,
    },

    /// Record key error.
    #[error("Record key error: {0}")]
    RecordKey(String),

    /// Record value type error.
    #[error("Record value type error: {0}")]
    RecordValueType(String),
}

impl TabrlError {
    /// Shorthand for [`TabrlError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
