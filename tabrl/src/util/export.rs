//! CSV export of episode records and rollouts.
use anyhow::Result;
use csv::WriterBuilder;
use log::info;
use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fs::File, path::Path};
use tabrl_core::{
    error::TabrlError,
    record::{Record, RecordValue},
    Act, Trace,
};

/// A row of the episode CSV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeRow {
    pub episode: usize,
    pub episode_return: f32,
    pub episode_length: usize,
    pub epsilon: f32,
    pub terminated: bool,
    pub q_table_size: usize,
    /// Empty on episodes without evaluation.
    pub eval_return: Option<f32>,
}

impl TryFrom<&Record> for EpisodeRow {
    type Error = anyhow::Error;

    fn try_from(record: &Record) -> Result<Self> {
        let eval_return = match record.get("eval_return") {
            Some(RecordValue::Scalar(v)) => Some(*v),
            Some(_) => return Err(TabrlError::RecordValueType("Scalar".to_string()).into()),
            None => None,
        };
        Ok(Self {
            episode: record.get_scalar("episode")? as _,
            episode_return: record.get_scalar("episode_return")?,
            episode_length: record.get_scalar("episode_length")? as _,
            epsilon: record.get_scalar("epsilon")?,
            terminated: record.get_scalar("terminated")? > 0.5,
            q_table_size: record.get_scalar("q_table_size")? as _,
            eval_return,
        })
    }
}

/// A row of the trace CSV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceRow {
    pub step: usize,
    /// State before the action, as `(c0, c1, ...)`.
    pub state: String,
    pub act: Act,
    pub reward: f32,
}

/// Writes one [`EpisodeRow`] per record to `path`, with a header.
pub fn write_records<'a, P, I>(path: P, records: I) -> Result<()>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = &'a Record>,
{
    let mut wtr = WriterBuilder::new().from_writer(File::create(path.as_ref())?);
    let mut n = 0;
    for record in records {
        wtr.serialize(EpisodeRow::try_from(record)?)?;
        n += 1;
    }
    wtr.flush()?;
    info!("Wrote {} episodes to {:?}", n, path.as_ref());
    Ok(())
}

/// Writes the steps of `trace` to `path`, with a header.
pub fn write_trace<P: AsRef<Path>>(path: P, trace: &Trace) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_writer(File::create(path.as_ref())?);
    for (step, s) in trace.steps.iter().enumerate() {
        wtr.serialize(TraceRow {
            step,
            state: s.state.to_string(),
            act: s.act,
            reward: s.reward,
        })?;
    }
    wtr.flush()?;
    info!("Wrote a trace of {} steps to {:?}", trace.len(), path.as_ref());
    Ok(())
}
