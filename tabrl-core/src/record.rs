//! Records of training and evaluation.
//!
//! The [`Trainer`](crate::Trainer) emits one [`Record`] per episode and hands it to a
//! [`Recorder`]. A presentation layer keeps the records with [`BufferedRecorder`] to draw
//! reward curves. [`LogRecorder`] aggregates them with [`RecordStorage`] and writes the
//! result to the log.
//!
//! ```rust
//! use tabrl_core::record::{Record, RecordValue};
//!
//! let mut record = Record::empty();
//! record.insert("episode", RecordValue::Scalar(3.0));
//! record.insert("episode_return", RecordValue::Scalar(-12.0));
//! assert_eq!(record.get_scalar("episode_return").unwrap(), -12.0);
//! ```
mod base;
mod buffered_recorder;
mod log_recorder;
mod null_recorder;
mod recorder;
mod storage;

pub use base::{Record, RecordValue};
pub use buffered_recorder::BufferedRecorder;
pub use log_recorder::LogRecorder;
pub use null_recorder::NullRecorder;
pub use recorder::Recorder;
pub use storage::RecordStorage;
