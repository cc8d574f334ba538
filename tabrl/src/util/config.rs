//! Configuration files of demos.
use anyhow::Result;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};
use tabrl_core::TrainerConfig;

/// Environment and trainer configuration of a demo, stored as one YAML file:
///
/// ```yaml
/// env:
///   n_cells: 5
///   ...
/// trainer:
///   episodes: 500
///   ...
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoConfig<C> {
    /// Configuration of the environment.
    pub env: C,

    /// Configuration of the trainer.
    pub trainer: TrainerConfig,
}

impl<C: Serialize + DeserializeOwned> DemoConfig<C> {
    /// Constructs [`DemoConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`DemoConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabrl_envs::{GridStart, GridWorldConfig, SignalBootstrap};
    use tempdir::TempDir;

    #[test]
    fn test_serde_demo_config() -> Result<()> {
        let config = DemoConfig {
            env: GridWorldConfig::default()
                .start(GridStart::Fixed(0, 0))
                .signals(vec![(2, 2)])
                .bootstrap(SignalBootstrap::Resampled),
            trainer: TrainerConfig::default().episodes(200).seed(9),
        };

        let dir = TempDir::new("demo_config")?;
        let path = dir.path().join("grid.yaml");
        config.save(&path)?;
        let config_ = DemoConfig::<GridWorldConfig>::load(&path)?;
        assert_eq!(config, config_);
        Ok(())
    }
}
