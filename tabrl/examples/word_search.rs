use anyhow::Result;
use clap::{Parser, ValueEnum};
use rand::{rngs::SmallRng, seq::SliceRandom, SeedableRng};
use std::path::Path;
use tabrl::{
    tabrl_core::{EpsilonGreedy, Session, State, Trace, TrainerConfig},
    tabrl_envs::{
        word_grid::{LetterGrid, Level, Placement},
        WordTraceEnv, WordTraceEnvConfig, MOVES, NO_MOVE,
    },
    util::{self, DemoConfig},
};

const WORDS: [&str; 6] = ["DATA", "AI", "MODEL", "RL", "TRAIN", "AGENT"];

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LevelArg {
    Easy,
    Hard,
    Advance,
}

impl From<LevelArg> for Level {
    fn from(l: LevelArg) -> Self {
        match l {
            LevelArg::Easy => Level::Easy,
            LevelArg::Hard => Level::Hard,
            LevelArg::Advance => Level::Advance,
        }
    }
}

/// Hide words in a letter grid and train a Q-learning agent to trace one of them
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Grid size and allowed word directions
    #[arg(short, long, value_enum, default_value_t = LevelArg::Easy)]
    level: LevelArg,

    /// Seed of the grid generator
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// YAML file holding the `trainer` configuration; `env` is generated
    #[arg(short, long)]
    config: Option<String>,

    /// Directory to write episodes.csv and trace.csv into
    #[arg(short, long)]
    out_dir: Option<String>,

    /// Number of training episodes, overriding the configuration
    #[arg(short, long)]
    episodes: Option<usize>,
}

fn default_trainer_config() -> TrainerConfig {
    TrainerConfig::default()
        .episodes(3000)
        .max_steps_per_episode(200)
        .alpha(0.1)
        .gamma(0.9)
        .explorer(EpsilonGreedy::linear(0.5, 0.05, 2000))
        .record_interval(500)
}

/// Generates the grid and picks the word to trace.
fn setup(level: Level, seed: u64) -> Result<(LetterGrid, &'static str, Placement)> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut grid = LetterGrid::random(level.size(), &mut rng);
    let mut placements = vec![];
    for word in WORDS.iter() {
        placements.push((*word, grid.hide_word(word, level.directions(), &mut rng)?));
    }

    // later words may overwrite earlier ones
    let intact: Vec<_> = placements
        .into_iter()
        .filter(|(word, p)| grid.spells(word, p))
        .collect();
    let &(word, placement) = intact
        .choose(&mut rng)
        .ok_or_else(|| anyhow::Error::msg("every hidden word was overwritten"))?;
    Ok((grid, word, placement))
}

/// Start of the displayed rollout: a cell next to the first letter, the one before it
/// in the writing direction if that lies in the grid. Like training episodes, it starts
/// with `matched = 0` and no previous move.
fn rollout_start(size: usize, placement: &Placement) -> State {
    let (dr, dc) = placement.direction.offset();
    let n = size as isize;
    for (dr, dc) in std::iter::once((-dr, -dc)).chain(MOVES.iter().copied()) {
        let row = placement.row as isize + dr;
        let col = placement.col as isize + dc;
        if (0..n).contains(&row) && (0..n).contains(&col) {
            return State::from([row as usize, col as usize, 0, NO_MOVE]);
        }
    }
    State::from([placement.row, placement.col, 0, NO_MOVE])
}

fn run(args: &Args) -> Result<Trace> {
    let (grid, word, placement) = setup(args.level.into(), args.seed)?;
    for row in grid.rows() {
        println!("{}", row);
    }
    println!("word: {} at ({}, {}) {:?}", word, placement.row, placement.col, placement.direction);

    let mut trainer = match &args.config {
        Some(path) => DemoConfig::<WordTraceEnvConfig>::load(path)?.trainer,
        None => default_trainer_config(),
    };
    if let Some(episodes) = args.episodes {
        trainer = trainer.episodes(episodes);
    }
    let env = WordTraceEnvConfig::default().grid(&grid).word(word);
    let out_dir = args.out_dir.as_ref().map(Path::new);

    let mut session = Session::<WordTraceEnv>::build(&env, trainer)?;
    util::train(&mut session, out_dir)?;

    let start = rollout_start(grid.size(), &placement);
    util::show_rollout(&mut session, start, out_dir)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    run(&args)?;
    Ok(())
}
