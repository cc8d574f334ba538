use anyhow::Result;
use clap::Parser;
use std::path::Path;
use tabrl::{
    tabrl_core::{Session, State, Trace, TrainerConfig},
    tabrl_envs::{Corridor, CorridorConfig},
    util::{self, DemoConfig},
};

fn default_config() -> DemoConfig<CorridorConfig> {
    DemoConfig {
        env: CorridorConfig::default(),
        trainer: TrainerConfig::default()
            .episodes(500)
            .alpha(0.5)
            .gamma(0.9)
            .epsilon(0.1),
    }
}

/// Train a Q-learning agent to walk down a corridor
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// YAML file holding `env` and `trainer` configurations
    #[arg(short, long)]
    config: Option<String>,

    /// Directory to write episodes.csv and trace.csv into
    #[arg(short, long)]
    out_dir: Option<String>,
}

fn run(args: &Args) -> Result<Trace> {
    let config = match &args.config {
        Some(path) => DemoConfig::load(path)?,
        None => default_config(),
    };
    let out_dir = args.out_dir.as_ref().map(Path::new);
    let start = config.env.start;

    let mut session = Session::<Corridor>::build(&config.env, config.trainer)?;
    util::train(&mut session, out_dir)?;

    for cell in 0..config.env.n_cells {
        let s = State::from([cell]);
        println!("cell {}: Q = {:?}", cell, session.trained_value(&s));
    }
    util::show_rollout(&mut session, State::from([start]), out_dir)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    run(&args)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn test_corridor() -> Result<()> {
        let tmp_dir = TempDir::new("corridor")?;
        let dir = tmp_dir.path().to_str().map(String::from);

        let config_path = tmp_dir.path().join("corridor.yaml");
        default_config().save(&config_path)?;

        let args = Args {
            config: config_path.to_str().map(String::from),
            out_dir: dir,
        };
        let trace = run(&args)?;
        assert!(trace.terminated);
        assert_eq!(trace.len(), 4);
        assert!(tmp_dir.path().join("episodes.csv").exists());
        assert!(tmp_dir.path().join("trace.csv").exists());
        Ok(())
    }
}
