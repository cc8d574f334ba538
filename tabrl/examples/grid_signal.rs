use anyhow::Result;
use clap::Parser;
use std::path::Path;
use tabrl::{
    tabrl_core::{EpsilonGreedy, Session, State, Trace, TrainerConfig},
    tabrl_envs::{GridAct, GridStart, GridWorld, GridWorldConfig, Signal},
    util::{self, DemoConfig},
};

fn default_config() -> DemoConfig<GridWorldConfig> {
    DemoConfig {
        env: GridWorldConfig::default().signals(vec![(2, 2), (3, 1)]),
        trainer: TrainerConfig::default()
            .episodes(3000)
            .max_steps_per_episode(100)
            .alpha(0.1)
            .gamma(0.9)
            .explorer(EpsilonGreedy::linear(0.5, 0.05, 2000))
            .eval_interval(500)
            .record_interval(500),
    }
}

/// Train a Q-learning agent to cross a grid with traffic signals
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

fn print_policy(session: &Session<GridWorld>, config: &GridWorldConfig, signal: Signal) {
    println!("greedy policy, {:?} light:", signal);
    for row in 0..config.rows {
        let line: String = (0..config.cols)
            .map(|col| {
                if (row, col) == config.goal {
                    return 'G';
                }
                let s = State::from([row, col, signal.coord()]);
                match GridAct::from_index(session.greedy_action(&s)) {
                    GridAct::Up => '^',
                    GridAct::Down => 'v',
                    GridAct::Left => '<',
                    GridAct::Right => '>',
                    GridAct::Wait => '.',
                }
            })
            .collect();
        println!("  {}", line);
    }
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

    let mut session = Session::<GridWorld>::build(&config.env, config.trainer.clone())?;
    util::train(&mut session, out_dir)?;
    print_policy(&session, &config.env, Signal::Green);
    print_policy(&session, &config.env, Signal::Red);

    let (row, col) = match config.env.start {
        GridStart::Fixed(row, col) => (row, col),
        GridStart::Random => (0, 0),
    };
    util::show_rollout(
        &mut session,
        State::from([row, col, Signal::Green.coord()]),
        out_dir,
    )
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
    use tabrl::tabrl_envs::GridRewards;
    use tempdir::TempDir;

    #[test]
    fn test_grid_signal() -> Result<()> {
        let tmp_dir = TempDir::new("grid_signal")?;
        let args = Args {
            config: None,
            out_dir: tmp_dir.path().to_str().map(String::from),
            episodes: None,
            seed: None,
        };
        let trace = run(&args)?;
        assert!(trace.terminated);
        let red_violation = GridRewards::default().red_violation;
        assert!(trace.steps.iter().all(|s| s.reward != red_violation));
        assert!(tmp_dir.path().join("episodes.csv").exists());
        Ok(())
    }
}
