//! Episodic Tic-Tac-Toe environment with an injected opponent

use log::trace;

use super::{
    board::BoardState,
    model::TicTacToe,
};
use crate::{
    Error, Result,
    config::Rewards,
    mdp::{Environment, GameModel, Outcome},
    opponents::RandomOpponent,
    ports::Opponent,
};

/// Live game against an opponent, advanced one round per [`Environment::step`].
pub struct TttEnvironment {
    game: TicTacToe,
    rewards: Rewards,
    opponent: Box<dyn Opponent<TicTacToe>>,
    state: BoardState,
}

impl TttEnvironment {
    /// Create an environment; the agent's first state is reached by [`Environment::reset`].
    pub fn new(game: TicTacToe, rewards: Rewards, opponent: Box<dyn Opponent<TicTacToe>>) -> Self {
        Self {
            game,
            rewards,
            opponent,
            state: BoardState::new(),
        }
    }

    /// Agent plays X against a uniformly random opponent
    pub fn against_random(rewards: Rewards, seed: Option<u64>) -> Self {
        let opponent = match seed {
            Some(seed) => RandomOpponent::with_seed(seed),
            None => RandomOpponent::new(),
        };
        Self::new(TicTacToe::default(), rewards, Box::new(opponent))
    }

    pub fn opponent_name(&self) -> &str {
        self.opponent.name()
    }

    fn opponent_reply(&mut self, state: BoardState) -> Result<BoardState> {
        let reply = self.opponent.choose(&self.game, &state)?;
        trace!("{} replies {reply} in {}", self.opponent.name(), state.encode());
        state
            .make_move(reply)
            .map_err(|_| Error::illegal_action(reply, state.encode()))
    }
}

impl Environment for TttEnvironment {
    type Game = TicTacToe;

    fn game(&self) -> &TicTacToe {
        &self.game
    }

    fn reset(&mut self) -> Result<BoardState> {
        let mut state = BoardState::new();
        if state.to_move != self.game.agent() {
            state = self.opponent_reply(state)?;
        }
        self.state = state;
        Ok(state)
    }

    fn current_state(&self) -> &BoardState {
        &self.state
    }

    fn step(&mut self, action: usize) -> Result<Outcome<BoardState>> {
        let current = self.state;
        if current.to_move != self.game.agent()
            || !self.game.legal_actions(&current).contains(&action)
        {
            return Err(Error::illegal_action(action, current.encode()));
        }
        let mut next = current
            .make_move(action)
            .map_err(|_| Error::illegal_action(action, current.encode()))?;
        if !next.is_terminal() {
            next = self.opponent_reply(next)?;
        }
        self.state = next;
        Ok(Outcome {
            reward: self.game.round_reward(&self.rewards, &next),
            next_state: next,
        })
    }
}
