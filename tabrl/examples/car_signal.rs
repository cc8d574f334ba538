use anyhow::Result;
use clap::Parser;
use std::path::Path;
use tabrl::{
    tabrl_core::{EpsilonGreedy, Session, Trace, TrainerConfig},
    tabrl_envs::{CarAct, CarEnv, CarEnvConfig, Signal},
    util::{self, DemoConfig},
};

fn default_config() -> DemoConfig<CarEnvConfig> {
    DemoConfig {
        env: CarEnvConfig::default(),
        trainer: TrainerConfig::default()
            .episodes(5000)
            .max_steps_per_episode(200)
            .alpha(0.1)
            .gamma(0.95)
            .explorer(EpsilonGreedy::linear(1.0, 0.05, 4000))
            .eval_interval(1000)
            .record_interval(1000),
    }
}

/// Train a Q-learning agent to drive past traffic lights
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

    /// Seed of the run, overriding the configuration
    #[arg(short, long)]
    seed: Option<u64>,
}

fn run(args: &Args) -> Result<Trace> {
    let mut config = match &args.config {
        Some(path) => DemoConfig::load(path)?,
        None => default_config(),
    };
    if let Some(episodes) = args.episodes {
        config.trainer = config.trainer.episodes(episodes);
    }
    if let Some(seed) = args.seed {
        config.trainer = config.trainer.seed(seed);
    }
    let out_dir = args.out_dir.as_ref().map(Path::new);

    let mut session = Session::<CarEnv>::build(&config.env, config.trainer)?;
    util::train(&mut session, out_dir)?;

    let start = session.env().observe(0.0, 0.0, Signal::Green);
    let trace = util::show_rollout(&mut session, start, out_dir)?;
    let acts: Vec<_> = trace
        .steps
        .iter()
        .map(|s| CarAct::from_index(s.act))
        .collect();
    println!("{:?}", acts);
    Ok(trace)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    run(&args)?;
    Ok(())
}
