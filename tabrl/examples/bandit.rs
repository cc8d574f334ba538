use anyhow::Result;
use clap::Parser;
use std::path::Path;
use tabrl::{
    tabrl_core::{Act, Session, TrainerConfig},
    tabrl_envs::{BanditEnv, BanditEnvConfig},
    util::{self, DemoConfig},
};

fn default_config() -> DemoConfig<BanditEnvConfig> {
    DemoConfig {
        env: BanditEnvConfig::default(),
        trainer: TrainerConfig::default()
            .episodes(1000)
            .max_steps_per_episode(1)
            .alpha(0.1)
            .epsilon(0.1),
    }
}

/// Train an epsilon-greedy agent on a multi-armed bandit
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// YAML file holding `env` and `trainer` configurations
    #[arg(short, long)]
    config: Option<String>,

    /// Directory to write episodes.csv into
    #[arg(short, long)]
    out_dir: Option<String>,

    /// Number of pulls, overriding the configuration
    #[arg(short, long)]
    episodes: Option<usize>,
}

/// Returns the greedy arm and the best arm.
fn run(args: &Args) -> Result<(Act, Act)> {
    let mut config = match &args.config {
        Some(path) => DemoConfig::load(path)?,
        None => default_config(),
    };
    if let Some(episodes) = args.episodes {
        config.trainer = config.trainer.episodes(episodes);
    }
    let out_dir = args.out_dir.as_ref().map(Path::new);

    let mut session = Session::<BanditEnv>::build(&config.env, config.trainer)?;
    util::train(&mut session, out_dir)?;

    let ready = BanditEnv::ready();
    let values = session.trained_value(&ready);
    for (arm, (v, mean)) in values.iter().zip(config.env.arm_means.iter()).enumerate() {
        println!("arm {}: estimate {:.3}, mean {:.3}", arm, v, mean);
    }
    Ok((session.greedy_action(&ready), session.env().best_arm()))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let (greedy, best) = run(&args)?;
    println!("greedy arm {}, best arm {}", greedy, best);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn test_bandit() -> Result<()> {
        let tmp_dir = TempDir::new("bandit")?;
        let args = Args {
            config: None,
            out_dir: tmp_dir.path().to_str().map(String::from),
            episodes: None,
        };
        let (greedy, best) = run(&args)?;
        assert_eq!(greedy, best);

        let mut rdr = csv::Reader::from_path(tmp_dir.path().join("episodes.csv"))?;
        assert_eq!(rdr.records().count(), 1000);
        Ok(())
    }
}
