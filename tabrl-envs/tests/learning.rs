use anyhow::Result;
use tabrl_core::{record::NullRecorder, Env, Session, State, TrainerConfig};
use tabrl_envs::{
    BanditEnv, BanditEnvConfig, Corridor, CorridorConfig, GridAct, GridStart, GridWorld,
    GridWorldConfig, InventoryEnv, InventoryEnvConfig, Signal, WordTraceEnv, WordTraceEnvConfig,
};

#[test]
fn test_corridor_learns_to_walk_right() -> Result<()> {
    let config = TrainerConfig::default()
        .episodes(500)
        .alpha(0.5)
        .gamma(0.9)
        .epsilon(0.1);
    let mut session = Session::<Corridor>::build(&CorridorConfig::default(), config)?;
    session.train(&mut NullRecorder {})?;

    let trace = session.run_evaluation(State::from([0]))?;
    assert!(trace.terminated);
    assert_eq!(trace.len(), 4);
    assert!(trace.steps.iter().all(|s| s.act == Corridor::RIGHT));
    assert_eq!(trace.final_state, State::from([4]));
    assert_eq!(trace.total_reward(), 97.0);
    Ok(())
}

#[test]
fn test_grid_finds_shortest_path() -> Result<()> {
    let env_config = GridWorldConfig::default()
        .start(GridStart::Random)
        .p_red(0.0);
    let config = TrainerConfig::default()
        .episodes(3000)
        .alpha(0.5)
        .gamma(0.9)
        .epsilon(0.1)
        .seed(7);
    let mut session = Session::<GridWorld>::build(&env_config, config)?;
    session.train(&mut NullRecorder {})?;

    let trace = session.run_evaluation(State::from([0, 0, 0]))?;
    assert!(trace.terminated);
    assert_eq!(trace.len(), 8);
    Ok(())
}

#[test]
fn test_grid_waits_at_red_signal() -> Result<()> {
    // every path to the goal crosses the signal at (0, 1)
    let env_config = GridWorldConfig::default()
        .size(1, 4)
        .goal(0, 3)
        .start(GridStart::Fixed(0, 0))
        .signals(vec![(0, 1)])
        .p_red(0.8);
    let config = TrainerConfig::default()
        .episodes(2000)
        .alpha(0.2)
        .gamma(0.9)
        .epsilon(0.1)
        .seed(13);
    let mut session = Session::<GridWorld>::build(&env_config, config)?;
    session.train(&mut NullRecorder {})?;

    let red = State::from([0, 1, Signal::Red.coord()]);
    let green = State::from([0, 1, Signal::Green.coord()]);
    assert_eq!(
        GridAct::from_index(session.greedy_action(&red)),
        GridAct::Wait,
        "q = {:?}",
        session.trained_value(&red)
    );
    assert_eq!(
        GridAct::from_index(session.greedy_action(&green)),
        GridAct::Right,
        "q = {:?}",
        session.trained_value(&green)
    );
    Ok(())
}

#[test]
fn test_bandit_value_tracks_best_arm() -> Result<()> {
    let config = TrainerConfig::default()
        .episodes(2000)
        .alpha(0.1)
        .epsilon(0.2)
        .seed(11);
    let mut session = Session::<BanditEnv>::build(&BanditEnvConfig::default(), config)?;
    session.train(&mut NullRecorder {})?;

    let ready = BanditEnv::ready();
    let best = session.env().best_arm();
    assert_eq!(session.greedy_action(&ready), best);
    let q = session.trained_value(&ready);
    assert!((q[best] - 0.8).abs() < 0.1, "q = {:?}", q);
    Ok(())
}

#[test]
fn test_states_stay_within_dims_during_training() -> Result<()> {
    // Trainer checks every next state against the dims and fails otherwise.
    let config = TrainerConfig::default().episodes(50).seed(5);

    let mut inventory = Session::<InventoryEnv>::build(&InventoryEnvConfig::default(), config.clone())?;
    inventory.train(&mut NullRecorder {})?;
    let dims = inventory.env().state_dims();
    assert!(inventory.q_table().iter().all(|(s, _)| s.is_within(&dims)));

    let mut word = Session::<WordTraceEnv>::build(&WordTraceEnvConfig::default(), config)?;
    word.train(&mut NullRecorder {})?;
    let dims = word.env().state_dims();
    assert!(word.q_table().iter().all(|(s, _)| s.is_within(&dims)));
    Ok(())
}

#[test]
fn test_configs_from_yaml() -> Result<()> {
    let grid: GridWorldConfig = serde_yaml::from_str(
        r#"
rows: 3
cols: 4
goal: [2, 3]
start:
  Fixed: [0, 0]
signals:
  - [1, 1]
  - [1, 2]
p_red: 0.5
rewards:
  goal: 100.0
  red_violation: -50.0
  red_wait: 5.0
  step: -1.0
bootstrap: Resampled
"#,
    )?;
    assert_eq!(grid.goal, (2, 3));
    assert_eq!(grid.start, GridStart::Fixed(0, 0));
    assert_eq!(grid.signals.len(), 2);
    GridWorld::build(&grid)?;

    let word = WordTraceEnvConfig::default();
    let yaml = serde_yaml::to_string(&word)?;
    let loaded: WordTraceEnvConfig = serde_yaml::from_str(&yaml)?;
    assert_eq!(word, loaded);
    Ok(())
}
