//! Game, transition and environment traits

use std::{fmt::Debug, hash::Hash};

use serde::{Deserialize, Serialize};

use crate::Result;

/// Immediate reward and resulting state of one round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome<S> {
    pub reward: f64,
    pub next_state: S,
}

/// One possible outcome of a (state, action) pair together with its probability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition<S> {
    pub probability: f64,
    pub outcome: Outcome<S>,
}

impl<S> Transition<S> {
    pub fn new(probability: f64, reward: f64, next_state: S) -> Self {
        Self {
            probability,
            outcome: Outcome { reward, next_state },
        }
    }

    /// Deterministic transition (probability 1.0)
    pub fn certain(reward: f64, next_state: S) -> Self {
        Self::new(1.0, reward, next_state)
    }
}

/// Sum of the probabilities over a transition set.
///
/// A well-formed [`TransitionModel`] returns sets summing to 1.0.
pub fn total_probability<S>(transitions: &[Transition<S>]) -> f64 {
    transitions.iter().map(|t| t.probability).sum()
}

/// Finite, fully observable game seen from the agent's side.
///
/// `legal_actions` must be deterministic: its order decides ties between
/// equally valued actions in every greedy step.
pub trait GameModel {
    type State: Clone + Eq + Hash + Debug;
    type Action: Copy + Eq + Hash + Debug;

    /// Whether the game is over in this state
    fn is_terminal(&self, state: &Self::State) -> bool;

    /// Ordered legal actions; empty iff the state is terminal
    fn legal_actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// Every state in which the agent is to move, plus every terminal state.
    ///
    /// The order is deterministic and is the sweep order of the planners.
    fn enumerate_states(&self) -> Vec<Self::State>;
}

/// Transition/reward model consumed by policy and value iteration
pub trait TransitionModel: GameModel {
    /// All outcomes of taking `action` in `state`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::IllegalAction`] if `action` is not legal in `state`.
    fn transitions(
        &self,
        state: &Self::State,
        action: Self::Action,
    ) -> Result<Vec<Transition<Self::State>>>;
}

/// Episodic simulator consumed by Q-learning.
///
/// One `step` is a full round: the agent's move and, if the game goes on,
/// the opponent's reply. The reported reward already accounts for both.
pub trait Environment {
    type Game: GameModel;

    fn game(&self) -> &Self::Game;

    /// Restart the episode and return the first state the agent acts in
    fn reset(&mut self) -> Result<<Self::Game as GameModel>::State>;

    fn current_state(&self) -> &<Self::Game as GameModel>::State;

    /// # Errors
    ///
    /// Returns [`crate::Error::IllegalAction`] if `action` is not legal in the
    /// current state.
    fn step(
        &mut self,
        action: <Self::Game as GameModel>::Action,
    ) -> Result<Outcome<<Self::Game as GameModel>::State>>;
}
