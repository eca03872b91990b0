//! Configuration types for agent creation.
//!
//! Every struct deserializes with defaults for missing fields, so a JSON file
//! only needs to name the values it overrides:
//!
//! ```
//! use tictactoe_mdp::config::AgentConfig;
//!
//! let config = AgentConfig::from_json_str(r#"{ "planning": { "discount": 0.5 } }"#)?;
//! assert_eq!(config.planning.discount, 0.5);
//! assert_eq!(config.planning.sweeps, 10);
//! # Ok::<(), tictactoe_mdp::Error>(())
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

fn invalid(message: impl Into<String>) -> Error {
    Error::InvalidConfiguration {
        message: message.into(),
    }
}

fn check_unit_interval(name: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be within [0, 1], got {value}")))
    }
}

/// Reward parameters of the Tic-Tac-Toe MDP, from the agent's point of view
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rewards {
    pub win: f64,
    pub lose: f64,
    /// Reward of a round after which the game goes on
    pub living: f64,
    pub draw: f64,
}

impl Rewards {
    pub fn new(win: f64, lose: f64, living: f64, draw: f64) -> Self {
        Self {
            win,
            lose,
            living,
            draw,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let all = [self.win, self.lose, self.living, self.draw];
        if all.iter().all(|r| r.is_finite()) {
            Ok(())
        } else {
            Err(invalid(format!("rewards must be finite, got {self:?}")))
        }
    }
}

impl Default for Rewards {
    fn default() -> Self {
        Self::new(10.0, -10.0, 0.0, 0.0)
    }
}

/// Configuration shared by policy iteration and value iteration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanningConfig {
    /// Discount factor γ
    pub discount: f64,
    /// Per-state convergence threshold of policy evaluation
    pub delta: f64,
    /// Number of value iteration sweeps
    pub sweeps: usize,
    /// Backups allowed per state in one evaluation pass before it is
    /// reported as diverging (undiscounted cycles never settle)
    pub max_backups: usize,
    /// Seed for the random initial policy
    pub seed: Option<u64>,
}

impl PlanningConfig {
    pub fn with_discount(mut self, discount: f64) -> Self {
        self.discount = discount;
        self
    }

    pub fn with_delta(mut self, delta: f64) -> Self {
        self.delta = delta;
        self
    }

    pub fn with_sweeps(mut self, sweeps: usize) -> Self {
        self.sweeps = sweeps;
        self
    }

    pub fn with_max_backups(mut self, max_backups: usize) -> Self {
        self.max_backups = max_backups;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        check_unit_interval("discount", self.discount)?;
        if !(self.delta > 0.0 && self.delta.is_finite()) {
            return Err(invalid(format!(
                "delta must be positive and finite, got {}",
                self.delta
            )));
        }
        if self.max_backups == 0 {
            return Err(invalid("max_backups must be at least 1"));
        }
        Ok(())
    }
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            discount: 0.9,
            delta: 0.1,
            sweeps: 10,
            max_backups: 100_000,
            seed: None,
        }
    }
}

/// Configuration of the Q-learning agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QLearningConfig {
    /// Learning rate α
    pub learning_rate: f64,
    /// Discount factor γ
    pub discount: f64,
    /// Initial exploration rate ε
    pub epsilon: f64,
    /// Multiplicative decay applied after every action taken
    pub epsilon_decay: f64,
    /// Floor for the decayed exploration rate
    pub min_epsilon: f64,
    /// Number of training episodes
    pub episodes: usize,
    /// Seed for exploration
    pub seed: Option<u64>,
}

impl QLearningConfig {
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_discount(mut self, discount: f64) -> Self {
        self.discount = discount;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_epsilon_decay(mut self, epsilon_decay: f64) -> Self {
        self.epsilon_decay = epsilon_decay;
        self
    }

    pub fn with_min_epsilon(mut self, min_epsilon: f64) -> Self {
        self.min_epsilon = min_epsilon;
        self
    }

    pub fn with_episodes(mut self, episodes: usize) -> Self {
        self.episodes = episodes;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(invalid(format!(
                "learning_rate must be within (0, 1], got {}",
                self.learning_rate
            )));
        }
        check_unit_interval("discount", self.discount)?;
        check_unit_interval("epsilon", self.epsilon)?;
        check_unit_interval("epsilon_decay", self.epsilon_decay)?;
        check_unit_interval("min_epsilon", self.min_epsilon)?;
        if self.min_epsilon > self.epsilon {
            return Err(invalid(format!(
                "min_epsilon ({}) exceeds epsilon ({})",
                self.min_epsilon, self.epsilon
            )));
        }
        Ok(())
    }
}

impl Default for QLearningConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.5,
            discount: 0.9,
            epsilon: 0.1,
            epsilon_decay: 0.9999,
            min_epsilon: 0.0,
            episodes: 50_000,
            seed: None,
        }
    }
}

/// Top-level configuration, loadable from JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub rewards: Rewards,
    pub planning: PlanningConfig,
    pub q_learning: QLearningConfig,
}

impl AgentConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: AgentConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            operation: format!("read config file {}", path.display()),
            source,
        })?;
        Self::from_json_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        self.rewards.validate()?;
        self.planning.validate()?;
        self.q_learning.validate()
    }
}
