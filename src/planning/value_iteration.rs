//! Value iteration agent
//!
//! Runs a fixed number of in-place Bellman optimality sweeps, then extracts a
//! greedy policy. The sweep budget is not a convergence test.

use crate::{
    Error, Result,
    config::PlanningConfig,
    mdp::{GameModel, Policy, TransitionModel, ValueStore, expected_return, first_maximum},
    observers::LogObserver,
    ports::{Agent, IterationSummary, Observer},
};

const ALGORITHM: &str = "value iteration";

/// Value iteration over a [`TransitionModel`]
#[derive(Debug, Clone)]
pub struct ValueIterationAgent<G: TransitionModel> {
    game: G,
    config: PlanningConfig,
    values: ValueStore<G::State>,
    policy: Policy<G::State, G::Action>,
    sweeps_done: usize,
}

impl<G: TransitionModel> ValueIterationAgent<G> {
    /// Initialise, sweep `config.sweeps` times and install the greedy policy.
    pub fn new(game: G, config: PlanningConfig) -> Result<Self> {
        let mut agent = Self::untrained(game, config)?;
        agent.train()?;
        Ok(agent)
    }

    /// Values at 0.0 and an empty policy
    pub fn untrained(game: G, config: PlanningConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            values: ValueStore::new(&game),
            game,
            config,
            policy: Policy::new(),
            sweeps_done: 0,
        })
    }

    /// Best one-step lookahead value of a non-terminal state, seeded from -inf.
    fn best_action(&self, state: &G::State) -> Result<(G::Action, f64)> {
        let actions = self.game.legal_actions(state);
        if actions.is_empty() {
            return Err(Error::NoLegalActions {
                state: format!("{state:?}"),
            });
        }
        let mut candidates = Vec::with_capacity(actions.len());
        for action in actions {
            let q = expected_return(&self.game, &self.values, self.config.discount, state, action)?;
            candidates.push((action, q));
        }
        first_maximum(candidates, f64::NEG_INFINITY).ok_or_else(|| Error::NoGreedyAction {
            state: format!("{state:?}"),
        })
    }

    /// One in-place optimality sweep; returns the largest value change.
    pub fn sweep(&mut self) -> Result<f64> {
        let mut max_change: f64 = 0.0;
        for i in 0..self.values.len() {
            if self.values.is_terminal_at(i) {
                continue;
            }
            let state = self.values.states()[i].clone();
            let (_, best) = self.best_action(&state)?;
            let previous = self.values.set_at(i, best);
            max_change = max_change.max((best - previous).abs());
        }
        self.sweeps_done += 1;
        Ok(max_change)
    }

    /// Run the configured number of sweeps.
    pub fn iterate(&mut self) -> Result<()> {
        self.iterate_observed(&mut LogObserver::new())
    }

    fn iterate_observed(&mut self, observer: &mut dyn Observer) -> Result<()> {
        for sweep in 0..self.config.sweeps {
            let max_change = self.sweep()?;
            observer.on_iteration(
                sweep,
                &IterationSummary {
                    max_change,
                    policy_changes: None,
                },
            )?;
        }
        Ok(())
    }

    /// Greedy policy from the current values, first strict maximum per state.
    ///
    /// # Errors
    ///
    /// [`Error::NoGreedyAction`] if every action of a state evaluates to NaN
    /// or -inf.
    pub fn extract_policy(&self) -> Result<Policy<G::State, G::Action>> {
        let mut policy = Policy::new();
        for (state, _) in self.values.iter() {
            if self.game.is_terminal(state) {
                continue;
            }
            let (action, _) = self.best_action(state)?;
            policy.assign(&self.game, state.clone(), action)?;
        }
        Ok(policy)
    }

    pub fn train(&mut self) -> Result<()> {
        self.train_observed(&mut LogObserver::new())
    }

    pub fn train_observed(&mut self, observer: &mut dyn Observer) -> Result<()> {
        observer.on_training_start(ALGORITHM, Some(self.config.sweeps))?;
        self.iterate_observed(observer)?;
        self.policy = self.extract_policy()?;
        observer.on_training_end(self.config.sweeps)?;
        Ok(())
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn config(&self) -> &PlanningConfig {
        &self.config
    }

    pub fn values(&self) -> &ValueStore<G::State> {
        &self.values
    }

    /// Total sweeps performed so far
    pub fn sweeps_done(&self) -> usize {
        self.sweeps_done
    }
}

impl<G: TransitionModel> Agent for ValueIterationAgent<G> {
    type Game = G;

    fn name(&self) -> &str {
        ALGORITHM
    }

    fn policy(&self) -> &Policy<<G as GameModel>::State, <G as GameModel>::Action> {
        &self.policy
    }
}
