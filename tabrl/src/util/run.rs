//! Train-and-show steps shared by the demos.
use super::{write_records, write_trace};
use anyhow::Result;
use log::info;
use std::{fs, path::Path};
use tabrl_core::{
    record::{BufferedRecorder, LogRecorder},
    Env, Session, State, Trace,
};

/// Trains `session` once.
///
/// With `out_dir`, every episode record is kept and written to `episodes.csv` in that
/// directory. Otherwise records are aggregated into the log.
pub fn train<E: Env>(session: &mut Session<E>, out_dir: Option<&Path>) -> Result<()> {
    match out_dir {
        Some(dir) => {
            let mut recorder = BufferedRecorder::new();
            session.train(&mut recorder)?;
            fs::create_dir_all(dir)?;
            write_records(dir.join("episodes.csv"), recorder.iter())
        }
        None => session.train(&mut LogRecorder::new()),
    }
}

/// Greedy rollout from `start`, logged step by step and written to `trace.csv` in
/// `out_dir` if given.
pub fn show_rollout<E: Env>(
    session: &mut Session<E>,
    start: State,
    out_dir: Option<&Path>,
) -> Result<Trace> {
    let trace = session.run_evaluation(start)?;
    for (i, step) in trace.steps.iter().enumerate() {
        info!("{:>3}: {} -[{}]-> r = {}", i, step.state, step.act, step.reward);
    }
    info!(
        "Final state {}, terminated = {}, return = {}",
        trace.final_state,
        trace.terminated,
        trace.total_reward()
    );
    if let Some(dir) = out_dir {
        fs::create_dir_all(dir)?;
        write_trace(dir.join("trace.csv"), &trace)?;
    }
    Ok(trace)
}
