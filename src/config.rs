//! Configuration for the engines. Every knob the engines take is an explicit
//! field here; nothing is read from the environment. The structs double as
//! the TOML format read by the `learner` binary.

use crate::error::{Error, Result};
use crate::game_tree::GameTreeStrategyName;
use crate::worlds::BuiltinGrid;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Offline value iteration over a known MDP.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ValueIterationConfig {
    /// Weight of future value, γ.
    pub discount_rate: f64,
    /// Number of synchronous sweeps.
    pub iterations: usize,
    /// Stop early once a sweep changes no value by more than this.
    pub tolerance: Option<f64>,
}

impl Default for ValueIterationConfig {
    fn default() -> Self {
        Self {
            discount_rate: 0.9,
            iterations: 100,
            tolerance: None,
        }
    }
}

impl ValueIterationConfig {
    pub fn with_discount_rate(self, discount_rate: f64) -> Self {
        Self {
            discount_rate,
            ..self
        }
    }

    pub fn with_iterations(self, iterations: usize) -> Self {
        Self { iterations, ..self }
    }

    pub fn with_tolerance(self, tolerance: f64) -> Self {
        Self {
            tolerance: Some(tolerance),
            ..self
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_unit_interval("discount-rate", self.discount_rate)?;
        if let Some(tolerance) = self.tolerance {
            if tolerance.is_nan() || tolerance < 0. {
                return Err(Error::invalid_config(format!(
                    "tolerance must be non-negative, got {tolerance}"
                )));
            }
        }
        Ok(())
    }
}

/// Online model-free learning, shared by the tabular and linear agents.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ReinforcementConfig {
    /// Learning rate, α.
    pub alpha: f64,
    /// Exploration probability, ε.
    pub epsilon: f64,
    /// Weight of future value, γ.
    pub discount_rate: f64,
    /// Number of episodes after which learning and exploration are switched
    /// off.
    pub num_training: usize,
    /// Seed for the exploration RNG. Unseeded agents draw from the OS.
    pub seed: Option<u64>,
}

impl Default for ReinforcementConfig {
    fn default() -> Self {
        Self {
            alpha: 0.5,
            epsilon: 0.5,
            discount_rate: 1.0,
            num_training: 100,
            seed: None,
        }
    }
}

impl ReinforcementConfig {
    /// The parameters used for agents playing on the pacman board.
    pub fn pacman() -> Self {
        Self {
            alpha: 0.2,
            epsilon: 0.05,
            discount_rate: 0.8,
            num_training: 0,
            seed: None,
        }
    }

    pub fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }

    pub fn with_epsilon(self, epsilon: f64) -> Self {
        Self { epsilon, ..self }
    }

    pub fn with_discount_rate(self, discount_rate: f64) -> Self {
        Self {
            discount_rate,
            ..self
        }
    }

    pub fn with_num_training(self, num_training: usize) -> Self {
        Self {
            num_training,
            ..self
        }
    }

    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_unit_interval("alpha", self.alpha)?;
        check_unit_interval("epsilon", self.epsilon)?;
        check_unit_interval("discount-rate", self.discount_rate)
    }
}

/// Depth-limited adversarial search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct GameTreeConfig {
    pub strategy: GameTreeStrategyName,
    /// Number of full rounds (every agent moves once) searched before the
    /// evaluation function is applied.
    pub tree_depth: usize,
}

impl Default for GameTreeConfig {
    fn default() -> Self {
        Self {
            strategy: GameTreeStrategyName::Minimax,
            tree_depth: 2,
        }
    }
}

impl GameTreeConfig {
    pub fn with_tree_depth(self, tree_depth: usize) -> Self {
        Self { tree_depth, ..self }
    }
}

/// The grid world the `learner` binary runs on.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct GridWorldConfig {
    pub grid: BuiltinGrid,
    /// A custom layout file, overrides `grid` when present. Relative paths
    /// are read from the directory of the config file.
    pub layout: Option<PathBuf>,
    /// Probability that a move slips to a perpendicular direction.
    pub noise: f64,
    /// Reward for every non-exit transition.
    pub living_reward: f64,
}

impl Default for GridWorldConfig {
    fn default() -> Self {
        Self {
            grid: BuiltinGrid::Book,
            layout: None,
            noise: 0.2,
            living_reward: 0.,
        }
    }
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[clap(rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum LearnerKind {
    ValueIteration,
    QLearning,
    ApproximateQLearning,
}

/// Top level document read by the `learner` binary.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct LearnerConfig {
    pub agent: LearnerKind,
    #[serde(default)]
    pub world: GridWorldConfig,
    #[serde(default)]
    pub value_iteration: ValueIterationConfig,
    #[serde(default)]
    pub reinforcement: ReinforcementConfig,
    /// Episodes to run for the online learners.
    #[serde(default = "default_episodes")]
    pub episodes: usize,
    /// Episodes are cut off after this many steps.
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
}

fn default_episodes() -> usize {
    100
}

fn default_max_steps() -> usize {
    1000
}

impl LearnerConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_text(&text)?;
        // relative layouts live next to the config file
        config.world.layout = config
            .world
            .layout
            .take()
            .map(|layout| match path.parent() {
                Some(dir) => dir.join(layout),
                None => layout,
            });
        Ok(config)
    }

    pub fn from_text(text: &str) -> Result<Self> {
        let config: LearnerConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        check_unit_interval("noise", self.world.noise)?;
        self.value_iteration.validate()?;
        self.reinforcement.validate()
    }
}

fn check_unit_interval(name: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::invalid_config(format!(
            "{name} must be within [0, 1], got {value}"
        )))
    }
}
