//! Q-learning agent
//!
//! Learns a Q-table from episodes played against an [`Environment`], using
//! ε-greedy exploration, and deploys the greedy policy of the final table.

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{
    Error, Result,
    config::QLearningConfig,
    mdp::{Environment, GameModel, Policy},
    observers::LogObserver,
    ports::{Agent, EpisodeSummary, Observer},
    q_learning::q_table::QTable,
};

const ALGORITHM: &str = "q-learning";

type StateOf<E> = <<E as Environment>::Game as GameModel>::State;
type ActionOf<E> = <<E as Environment>::Game as GameModel>::Action;

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Q-learning agent (off-policy TD control)
///
/// Learns optimal Q* function by always updating toward the maximum
/// next-state value, regardless of the action actually taken.
pub struct QLearningAgent<E: Environment> {
    env: E,
    q_table: QTable<StateOf<E>, ActionOf<E>>,
    config: QLearningConfig,
    epsilon: f64,
    rng: StdRng,
    policy: Policy<StateOf<E>, ActionOf<E>>,
    episodes_done: usize,
}

impl<E: Environment> QLearningAgent<E> {
    /// Create an agent and train it for `config.episodes` episodes.
    pub fn new(env: E, config: QLearningConfig) -> Result<Self> {
        let mut agent = Self::untrained(env, config)?;
        agent.train()?;
        Ok(agent)
    }

    /// Zero-initialised Q-table and an empty policy
    pub fn untrained(env: E, config: QLearningConfig) -> Result<Self> {
        config.validate()?;
        let q_table = QTable::new(env.game(), config.learning_rate, config.discount)?;
        Ok(Self {
            epsilon: config.epsilon,
            rng: build_rng(config.seed),
            env,
            q_table,
            config,
            policy: Policy::new(),
            episodes_done: 0,
        })
    }

    /// ε-greedy action selection
    fn select_action_epsilon_greedy(&mut self, state: &StateOf<E>) -> Result<ActionOf<E>> {
        if self.rng.random::<f64>() < self.epsilon {
            // Explore: random action
            self.q_table
                .row(state)?
                .choose(&mut self.rng)
                .map(|&(action, _)| action)
                .ok_or_else(|| Error::NoLegalActions {
                    state: format!("{state:?}"),
                })
        } else {
            // Exploit: greedy action based on Q-values
            self.q_table.greedy_action(state)
        }
    }

    /// Decay epsilon after every action taken
    fn decay_epsilon(&mut self) {
        self.epsilon = (self.epsilon * self.config.epsilon_decay).max(self.config.min_epsilon);
    }

    /// Play one episode to a terminal state, updating the table after every round.
    pub fn run_episode(&mut self) -> Result<EpisodeSummary> {
        let mut state = self.env.reset()?;
        let mut steps = 0;
        let mut total_reward = 0.0;

        while !self.env.game().is_terminal(&state) {
            let action = self.select_action_epsilon_greedy(&state)?;
            self.decay_epsilon();

            let outcome = self.env.step(action)?;
            let next_is_terminal = self.env.game().is_terminal(&outcome.next_state);
            self.q_table.q_learning_update(
                &state,
                action,
                outcome.reward,
                &outcome.next_state,
                next_is_terminal,
            )?;

            steps += 1;
            total_reward += outcome.reward;
            state = outcome.next_state;
        }

        self.episodes_done += 1;
        Ok(EpisodeSummary {
            steps,
            total_reward,
            epsilon: self.epsilon,
        })
    }

    /// Greedy policy of the current Q-table
    pub fn extract_policy(&self) -> Result<Policy<StateOf<E>, ActionOf<E>>> {
        let mut policy = Policy::new();
        for state in self.q_table.states() {
            let action = self.q_table.greedy_action(state)?;
            policy.assign(self.env.game(), state.clone(), action)?;
        }
        Ok(policy)
    }

    pub fn train(&mut self) -> Result<()> {
        self.train_observed(&mut LogObserver::new())
    }

    pub fn train_observed(&mut self, observer: &mut dyn Observer) -> Result<()> {
        observer.on_training_start(ALGORITHM, Some(self.config.episodes))?;
        for episode in 0..self.config.episodes {
            let summary = self.run_episode()?;
            observer.on_episode_end(episode, &summary)?;
        }
        self.policy = self.extract_policy()?;
        observer.on_training_end(self.config.episodes)?;
        Ok(())
    }

    pub fn q_table(&self) -> &QTable<StateOf<E>, ActionOf<E>> {
        &self.q_table
    }

    /// Current exploration rate
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn episodes_done(&self) -> usize {
        self.episodes_done
    }

    pub fn config(&self) -> &QLearningConfig {
        &self.config
    }

    pub fn environment(&self) -> &E {
        &self.env
    }
}

impl<E: Environment> Agent for QLearningAgent<E> {
    type Game = E::Game;

    fn name(&self) -> &str {
        ALGORITHM
    }

    fn policy(&self) -> &Policy<StateOf<E>, ActionOf<E>> {
        &self.policy
    }
}
