//! Policy iteration agent
//!
//! Alternates policy evaluation and one-step greedy improvement until an
//! improvement pass leaves the policy unchanged.
//!
//! Evaluation updates the value store in place, in enumeration order: a state
//! is backed up repeatedly until its own value moves by at most `delta`, then
//! the sweep moves on, so later states read values already refreshed earlier
//! in the same pass.

use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{
    Error, Result,
    config::PlanningConfig,
    mdp::{GameModel, Policy, TransitionModel, ValueStore, expected_return, first_maximum},
    observers::LogObserver,
    ports::{Agent, IterationSummary, Observer},
};

const ALGORITHM: &str = "policy iteration";

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Policy iteration over a [`TransitionModel`]
#[derive(Debug, Clone)]
pub struct PolicyIterationAgent<G: TransitionModel> {
    game: G,
    config: PlanningConfig,
    values: ValueStore<G::State>,
    policy: Policy<G::State, G::Action>,
    rng: StdRng,
    iterations: usize,
}

impl<G: TransitionModel> PolicyIterationAgent<G> {
    /// Initialise and train to a stable policy.
    pub fn new(game: G, config: PlanningConfig) -> Result<Self> {
        let mut agent = Self::untrained(game, config)?;
        agent.train()?;
        Ok(agent)
    }

    /// Values at 0.0 and a uniformly random legal action per non-terminal state.
    pub fn untrained(game: G, config: PlanningConfig) -> Result<Self> {
        config.validate()?;
        let values = ValueStore::new(&game);
        let mut agent = Self {
            rng: build_rng(config.seed),
            game,
            config,
            values,
            policy: Policy::new(),
            iterations: 0,
        };
        agent.init_random_policy()?;
        Ok(agent)
    }

    fn init_random_policy(&mut self) -> Result<()> {
        for i in 0..self.values.len() {
            if self.values.is_terminal_at(i) {
                continue;
            }
            let state = self.values.states()[i].clone();
            let action = *self
                .game
                .legal_actions(&state)
                .choose(&mut self.rng)
                .ok_or_else(|| Error::NoLegalActions {
                    state: format!("{state:?}"),
                })?;
            self.policy.assign(&self.game, state, action)?;
        }
        Ok(())
    }

    /// Evaluate the current policy in place; returns the largest value change.
    ///
    /// # Errors
    ///
    /// [`Error::EvaluationDiverged`] if a state is still moving by more than
    /// `delta` after `config.max_backups` backups, e.g. a rewarding self-loop
    /// with discount 1.
    pub fn evaluate_policy(&mut self, delta: f64) -> Result<f64> {
        let discount = self.config.discount;
        let mut max_change: f64 = 0.0;

        for i in 0..self.values.len() {
            if self.values.is_terminal_at(i) {
                continue;
            }
            let state = self.values.states()[i].clone();
            let action = self.policy.select(&state)?;
            let start = self.values.get_at(i);

            let mut backups = 0;
            loop {
                let backup = expected_return(&self.game, &self.values, discount, &state, action)?;
                let previous = self.values.set_at(i, backup);
                if (backup - previous).abs() <= delta {
                    break;
                }
                backups += 1;
                if backups >= self.config.max_backups {
                    return Err(Error::EvaluationDiverged {
                        state: format!("{state:?}"),
                        backups,
                    });
                }
            }

            max_change = max_change.max((self.values.get_at(i) - start).abs());
        }

        Ok(max_change)
    }

    /// One-step lookahead improvement; returns whether any action changed.
    ///
    /// The baseline of each state is its current value, so the old action is
    /// kept unless another action is strictly better.
    pub fn improve_policy(&mut self) -> Result<bool> {
        Ok(self.improve_policy_counted()? > 0)
    }

    fn improve_policy_counted(&mut self) -> Result<usize> {
        let discount = self.config.discount;
        let mut changes = 0;

        for i in 0..self.values.len() {
            if self.values.is_terminal_at(i) {
                continue;
            }
            let state = self.values.states()[i].clone();
            let baseline = self.values.get_at(i);

            let mut candidates = Vec::new();
            for action in self.game.legal_actions(&state) {
                let q = expected_return(&self.game, &self.values, discount, &state, action)?;
                candidates.push((action, q));
            }

            if let Some((action, _)) = first_maximum(candidates, baseline) {
                let previous = self.policy.assign(&self.game, state, action)?;
                if previous != Some(action) {
                    changes += 1;
                }
            }
        }

        Ok(changes)
    }

    /// Alternate evaluation and improvement until the policy is stable.
    pub fn train(&mut self) -> Result<()> {
        self.train_observed(&mut LogObserver::new())
    }

    pub fn train_observed(&mut self, observer: &mut dyn Observer) -> Result<()> {
        observer.on_training_start(ALGORITHM, None)?;
        loop {
            let max_change = self.evaluate_policy(self.config.delta)?;
            let changes = self.improve_policy_counted()?;
            observer.on_iteration(
                self.iterations,
                &IterationSummary {
                    max_change,
                    policy_changes: Some(changes),
                },
            )?;
            self.iterations += 1;
            if changes == 0 {
                break;
            }
        }
        observer.on_training_end(self.iterations)?;
        Ok(())
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn config(&self) -> &PlanningConfig {
        &self.config
    }

    /// Values under the current policy
    pub fn values(&self) -> &ValueStore<G::State> {
        &self.values
    }

    /// Completed evaluation + improvement rounds
    pub fn iterations(&self) -> usize {
        self.iterations
    }
}

impl<G: TransitionModel> Agent for PolicyIterationAgent<G> {
    type Game = G;

    fn name(&self) -> &str {
        ALGORITHM
    }

    fn policy(&self) -> &Policy<<G as GameModel>::State, <G as GameModel>::Action> {
        &self.policy
    }
}
