//! Tic-Tac-Toe as a finite MDP seen from one player's side

use super::{
    board::{BoardState, Player},
    game_tree::enumerate_states,
};
use crate::{
    Error, Result,
    config::Rewards,
    mdp::{GameModel, Transition, TransitionModel},
};

/// Tic-Tac-Toe game model for an agent playing `agent`.
///
/// X always opens. Actions are cell indices 0-8 in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicTacToe {
    agent: Player,
}

impl TicTacToe {
    pub fn new(agent: Player) -> Self {
        Self { agent }
    }

    /// The side the agent plays
    pub fn agent(&self) -> Player {
        self.agent
    }

    /// Reward of the round that ended in `state`, from the agent's point of view
    pub fn round_reward(&self, rewards: &Rewards, state: &BoardState) -> f64 {
        match state.winner() {
            Some(winner) if winner == self.agent => rewards.win,
            Some(_) => rewards.lose,
            None if state.is_draw() => rewards.draw,
            None => rewards.living,
        }
    }
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new(Player::X)
    }
}

impl GameModel for TicTacToe {
    type State = BoardState;
    type Action = usize;

    fn is_terminal(&self, state: &BoardState) -> bool {
        state.is_terminal()
    }

    fn legal_actions(&self, state: &BoardState) -> Vec<usize> {
        state.legal_moves()
    }

    fn enumerate_states(&self) -> Vec<BoardState> {
        enumerate_states(self.agent)
    }
}

/// Transition model against an opponent replying uniformly at random.
///
/// A round is the agent's move followed, if the game goes on, by the
/// opponent's reply; each reply is one transition with probability `1/n`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TttMdp {
    game: TicTacToe,
    rewards: Rewards,
}

impl TttMdp {
    pub fn new(agent: Player, rewards: Rewards) -> Self {
        Self {
            game: TicTacToe::new(agent),
            rewards,
        }
    }

    pub fn game(&self) -> &TicTacToe {
        &self.game
    }

    pub fn rewards(&self) -> &Rewards {
        &self.rewards
    }
}

impl Default for TttMdp {
    fn default() -> Self {
        Self::new(Player::X, Rewards::default())
    }
}

impl GameModel for TttMdp {
    type State = BoardState;
    type Action = usize;

    fn is_terminal(&self, state: &BoardState) -> bool {
        self.game.is_terminal(state)
    }

    fn legal_actions(&self, state: &BoardState) -> Vec<usize> {
        self.game.legal_actions(state)
    }

    fn enumerate_states(&self) -> Vec<BoardState> {
        self.game.enumerate_states()
    }
}

impl TransitionModel for TttMdp {
    fn transitions(&self, state: &BoardState, action: usize) -> Result<Vec<Transition<BoardState>>> {
        if state.to_move != self.game.agent() {
            return Err(Error::illegal_action(action, state.encode()));
        }
        let after_agent = state
            .make_move(action)
            .map_err(|_| Error::illegal_action(action, state.encode()))?;

        if after_agent.is_terminal() {
            let reward = self.game.round_reward(&self.rewards, &after_agent);
            return Ok(vec![Transition::certain(reward, after_agent)]);
        }

        let replies = after_agent.legal_moves();
        let probability = 1.0 / replies.len() as f64;
        replies
            .into_iter()
            .map(|reply| {
                let next = after_agent
                    .make_move(reply)
                    .map_err(|_| Error::illegal_action(reply, after_agent.encode()))?;
                let reward = self.game.round_reward(&self.rewards, &next);
                Ok(Transition::new(probability, reward, next))
            })
            .collect()
    }
}
