//! Observer adapters for training progress
//!
//! [`LogObserver`] is what the agents use by default; [`ProgressObserver`]
//! draws a terminal progress bar for interactive runs.

use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};

use crate::{
    Result,
    ports::{EpisodeSummary, IterationSummary, Observer},
};

/// Forwards training events to the `log` facade
#[derive(Debug, Clone)]
pub struct LogObserver {
    algorithm: String,
    /// Log every n-th episode at debug level
    episode_interval: usize,
    reward_window: f64,
    /// What `completed` counts, learned from the events seen so far
    unit: &'static str,
}

impl LogObserver {
    pub fn new() -> Self {
        Self {
            algorithm: String::new(),
            episode_interval: 1_000,
            reward_window: 0.0,
            unit: "steps",
        }
    }

    pub fn with_episode_interval(mut self, interval: usize) -> Self {
        self.episode_interval = interval.max(1);
        self
    }

    fn completion_message(&self, completed: usize) -> String {
        format!(
            "{}: training finished after {completed} {}",
            self.algorithm, self.unit
        )
    }
}

impl Default for LogObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for LogObserver {
    fn on_training_start(&mut self, algorithm: &str, budget: Option<usize>) -> Result<()> {
        self.algorithm = algorithm.to_string();
        self.unit = "steps";
        match budget {
            Some(n) => info!("{algorithm}: training started (budget {n})"),
            None => info!("{algorithm}: training started (until convergence)"),
        }
        Ok(())
    }

    fn on_iteration(&mut self, iteration: usize, summary: &IterationSummary) -> Result<()> {
        self.unit = if summary.policy_changes.is_some() {
            "iterations"
        } else {
            "sweeps"
        };
        match summary.policy_changes {
            Some(changes) => debug!(
                "{}: iteration {iteration} max change {:.6}, {changes} policy changes",
                self.algorithm, summary.max_change
            ),
            None => debug!(
                "{}: sweep {iteration} max change {:.6}",
                self.algorithm, summary.max_change
            ),
        }
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, summary: &EpisodeSummary) -> Result<()> {
        self.unit = "episodes";
        self.reward_window += summary.total_reward;
        if (episode + 1).is_multiple_of(self.episode_interval) {
            debug!(
                "{}: episode {} mean reward {:.4}, epsilon {:.5}",
                self.algorithm,
                episode + 1,
                self.reward_window / self.episode_interval as f64,
                summary.epsilon
            );
            self.reward_window = 0.0;
        }
        Ok(())
    }

    fn on_training_end(&mut self, completed: usize) -> Result<()> {
        info!("{}", self.completion_message(completed));
        Ok(())
    }
}

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    total_reward: f64,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            total_reward: 0.0,
        }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, algorithm: &str, budget: Option<usize>) -> Result<()> {
        let pb = match budget {
            Some(n) => ProgressBar::new(n as u64),
            None => ProgressBar::new_spinner(),
        };
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {prefix} {bar:40.cyan/blue} {pos}/{len} ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        pb.set_prefix(algorithm.to_string());
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_iteration(&mut self, iteration: usize, summary: &IterationSummary) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.set_position(iteration as u64 + 1);
            pb.set_message(format!("max change {:.4}", summary.max_change));
        }
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, summary: &EpisodeSummary) -> Result<()> {
        self.total_reward += summary.total_reward;
        if let Some(pb) = &self.progress_bar {
            pb.set_position(episode as u64 + 1);
            pb.set_message(format!(
                "mean reward {:.3}, eps {:.4}",
                self.total_reward / (episode + 1) as f64,
                summary.epsilon
            ));
        }
        Ok(())
    }

    fn on_training_end(&mut self, completed: usize) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(format!("done after {completed}"));
        }
        Ok(())
    }
}
