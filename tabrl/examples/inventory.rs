use anyhow::Result;
use clap::Parser;
use std::path::Path;
use tabrl::{
    tabrl_core::{Session, State, Trace, TrainerConfig},
    tabrl_envs::{InventoryEnv, InventoryEnvConfig},
    util::{self, DemoConfig},
};

fn default_config() -> DemoConfig<InventoryEnvConfig> {
    DemoConfig {
        env: InventoryEnvConfig::default(),
        trainer: TrainerConfig::default()
            .episodes(2000)
            .max_steps_per_episode(30)
            .alpha(0.1)
            .gamma(0.9)
            .epsilon(0.1)
            .record_interval(500),
    }
}

/// Train a Q-learning agent to order stock
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// YAML file holding `env` and `trainer` configurations
    #[arg(short, long)]
    config: Option<String>,

    /// Directory to write episodes.csv and trace.csv into
    #[arg(short, long)]
    out_dir: Option<String>,

    /// Number of training episodes, overriding the configuration
    #[arg(short, long)]
    episodes: Option<usize>,
}

fn run(args: &Args) -> Result<Trace> {
    let mut config = match &args.config {
        Some(path) => DemoConfig::load(path)?,
        None => default_config(),
    };
    if let Some(episodes) = args.episodes {
        config.trainer = config.trainer.episodes(episodes);
    }
    let out_dir = args.out_dir.as_ref().map(Path::new);
    let initial_stock = config.env.initial_stock;

    let mut session = Session::<InventoryEnv>::build(&config.env, config.trainer)?;
    util::train(&mut session, out_dir)?;

    println!("stock -> order");
    for stock in 0..=config.env.capacity {
        let order = session.greedy_action(&State::from([stock]));
        println!("{:>5} -> {}", stock, order);
    }
    util::show_rollout(&mut session, State::from([initial_stock]), out_dir)
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

    #[test]
    fn test_inventory() -> Result<()> {
        let args = Args {
            config: None,
            out_dir: None,
            episodes: Some(100),
        };
        let trace = run(&args)?;
        assert_eq!(trace.len(), 30);
        assert!(!trace.terminated);
        Ok(())
    }
}
