//! Observer port - abstraction for training observation
//!
//! This port defines the interface for observing training events,
//! allowing progress reporting without coupling the training loops
//! to a specific output.

use crate::Result;

/// Summary of one planning iteration (a value iteration sweep or one
/// evaluation + improvement round of policy iteration)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationSummary {
    /// Largest absolute value change during the iteration
    pub max_change: f64,
    /// Number of states whose policy action changed, if the step improves a policy
    pub policy_changes: Option<usize>,
}

/// Summary of one Q-learning episode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeSummary {
    /// Rounds played (agent move plus opponent reply)
    pub steps: usize,
    /// Undiscounted sum of round rewards
    pub total_reward: f64,
    /// Exploration rate after the episode
    pub epsilon: f64,
}

/// Observer trait for monitoring training
///
/// # Event Sequence
///
/// 1. `on_training_start(algorithm, budget)` - Once at the beginning
/// 2. `on_iteration(...)` for planners, `on_episode_end(...)` for Q-learning
/// 3. `on_training_end(completed)` - Once at the end
///
/// # Examples
///
/// ```no_run
/// use tictactoe_mdp::ports::{EpisodeSummary, Observer};
///
/// struct RewardTotal(f64);
///
/// impl Observer for RewardTotal {
///     fn on_episode_end(
///         &mut self,
///         _episode: usize,
///         summary: &EpisodeSummary,
///     ) -> tictactoe_mdp::Result<()> {
///         self.0 += summary.total_reward;
///         Ok(())
///     }
/// }
/// ```
pub trait Observer {
    /// Called when training starts.
    ///
    /// `budget` is the fixed number of sweeps or episodes, or `None` when the
    /// procedure stops on convergence.
    fn on_training_start(&mut self, _algorithm: &str, _budget: Option<usize>) -> Result<()> {
        Ok(())
    }

    /// Called after each planning iteration (0-based).
    fn on_iteration(&mut self, _iteration: usize, _summary: &IterationSummary) -> Result<()> {
        Ok(())
    }

    /// Called after each Q-learning episode (0-based).
    fn on_episode_end(&mut self, _episode: usize, _summary: &EpisodeSummary) -> Result<()> {
        Ok(())
    }

    /// Called when training ends with the number of completed iterations or episodes.
    fn on_training_end(&mut self, _completed: usize) -> Result<()> {
        Ok(())
    }
}
