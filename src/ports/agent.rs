//! Agent port - a trained, deployable decision policy

use crate::{
    Result,
    mdp::{GameModel, Policy},
};

/// Agent trait - Unified interface for the trained agents
///
/// Every agent trains to completion in its constructor, so by the time a
/// caller holds one, [`Agent::policy`] is final and read-only.
///
/// # Examples
///
/// ```no_run
/// use tictactoe_mdp::{
///     ports::Agent,
///     tictactoe::{BoardState, TicTacToe},
/// };
///
/// fn opening_move<A: Agent<Game = TicTacToe>>(agent: &A) -> tictactoe_mdp::Result<usize> {
///     agent.select_move(&BoardState::new())
/// }
/// ```
pub trait Agent {
    type Game: GameModel;

    /// Get the agent's name.
    ///
    /// Used for identification in logging.
    fn name(&self) -> &str;

    /// The deployed policy.
    fn policy(&self) -> &Policy<<Self::Game as GameModel>::State, <Self::Game as GameModel>::Action>;

    /// Select the policy's action for `state`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnknownState`] for terminal states and states
    /// outside the enumeration the agent was trained on.
    fn select_move(
        &self,
        state: &<Self::Game as GameModel>::State,
    ) -> Result<<Self::Game as GameModel>::Action> {
        self.policy().select(state)
    }
}
