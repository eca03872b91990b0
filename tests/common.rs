//! Toy MDPs shared by the integration tests.
//!
//! - [`Bandit`]: one decision from `Start`, each arm ends the episode with a
//!   fixed reward. Also available as a live [`BanditEnv`].
//! - [`Chain`]: a single non-terminal state that can stay (reward 1), quit
//!   (reward 0) or gamble. With discount γ the optimum is `V* = 1 / (1 - γ)`.
//! - [`Stuck`]: a malformed game whose only non-terminal state has no legal
//!   actions, with [`StuckEnv`] as its environment.
//! - [`winning_moves`]: cells that win on the spot for the side to move.

#![allow(dead_code)]

use std::collections::BTreeSet;

use tictactoe_mdp::{
    Error, Result,
    mdp::{Environment, GameModel, Outcome, Transition, TransitionModel},
    tictactoe::BoardState,
};

/// Moves that end the game with a win for the side to move
pub fn winning_moves(state: &BoardState) -> BTreeSet<usize> {
    state
        .legal_moves()
        .into_iter()
        .filter(|&pos| {
            state
                .make_move(pos)
                .is_ok_and(|next| next.winner() == Some(state.to_move))
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Spot {
    Start,
    Won,
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arm {
    Lose,
    Win,
}

/// Single-decision game; the arms are offered in the order given.
#[derive(Debug, Clone)]
pub struct Bandit {
    pub arms: Vec<Arm>,
    pub win_reward: f64,
    pub lose_reward: f64,
}

impl Bandit {
    pub fn new(arms: Vec<Arm>, win_reward: f64, lose_reward: f64) -> Self {
        Self {
            arms,
            win_reward,
            lose_reward,
        }
    }

    /// Both arms, losing arm first, rewards +1 / -1
    pub fn two_armed() -> Self {
        Self::new(vec![Arm::Lose, Arm::Win], 1.0, -1.0)
    }

    fn pull(&self, state: &Spot, arm: Arm) -> Result<Outcome<Spot>> {
        if !self.legal_actions(state).contains(&arm) {
            return Err(Error::IllegalAction {
                action: format!("{arm:?}"),
                state: format!("{state:?}"),
            });
        }
        Ok(match arm {
            Arm::Win => Outcome {
                reward: self.win_reward,
                next_state: Spot::Won,
            },
            Arm::Lose => Outcome {
                reward: self.lose_reward,
                next_state: Spot::Lost,
            },
        })
    }
}

impl GameModel for Bandit {
    type State = Spot;
    type Action = Arm;

    fn is_terminal(&self, state: &Spot) -> bool {
        *state != Spot::Start
    }

    fn legal_actions(&self, state: &Spot) -> Vec<Arm> {
        if self.is_terminal(state) {
            Vec::new()
        } else {
            self.arms.clone()
        }
    }

    fn enumerate_states(&self) -> Vec<Spot> {
        vec![Spot::Start, Spot::Won, Spot::Lost]
    }
}

impl TransitionModel for Bandit {
    fn transitions(&self, state: &Spot, arm: Arm) -> Result<Vec<Transition<Spot>>> {
        let outcome = self.pull(state, arm)?;
        Ok(vec![Transition::certain(outcome.reward, outcome.next_state)])
    }
}

/// Episodic wrapper around [`Bandit`]
pub struct BanditEnv {
    game: Bandit,
    state: Spot,
}

impl BanditEnv {
    pub fn new(game: Bandit) -> Self {
        Self {
            game,
            state: Spot::Start,
        }
    }
}

impl Environment for BanditEnv {
    type Game = Bandit;

    fn game(&self) -> &Bandit {
        &self.game
    }

    fn reset(&mut self) -> Result<Spot> {
        self.state = Spot::Start;
        Ok(self.state)
    }

    fn current_state(&self) -> &Spot {
        &self.state
    }

    fn step(&mut self, arm: Arm) -> Result<Outcome<Spot>> {
        let outcome = self.game.pull(&self.state, arm)?;
        self.state = outcome.next_state;
        Ok(outcome)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Link {
    Alive,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Stay,
    Quit,
    Gamble,
}

/// Self-loop chain; `Gamble` returns to `Alive` with reward 2 half the time
/// and ends the episode with reward 0 otherwise.
#[derive(Debug, Clone, Copy)]
pub struct Chain;

impl Chain {
    /// Optimal value of `Alive` for discount `gamma`
    pub fn optimum(gamma: f64) -> f64 {
        1.0 / (1.0 - gamma)
    }
}

impl GameModel for Chain {
    type State = Link;
    type Action = Move;

    fn is_terminal(&self, state: &Link) -> bool {
        *state == Link::Done
    }

    fn legal_actions(&self, state: &Link) -> Vec<Move> {
        match state {
            Link::Alive => vec![Move::Stay, Move::Quit, Move::Gamble],
            Link::Done => Vec::new(),
        }
    }

    fn enumerate_states(&self) -> Vec<Link> {
        vec![Link::Alive, Link::Done]
    }
}

impl TransitionModel for Chain {
    fn transitions(&self, state: &Link, action: Move) -> Result<Vec<Transition<Link>>> {
        if *state == Link::Done {
            return Err(Error::IllegalAction {
                action: format!("{action:?}"),
                state: format!("{state:?}"),
            });
        }
        Ok(match action {
            Move::Stay => vec![Transition::certain(1.0, Link::Alive)],
            Move::Quit => vec![Transition::certain(0.0, Link::Done)],
            Move::Gamble => vec![
                Transition::new(0.5, 2.0, Link::Alive),
                Transition::new(0.5, 0.0, Link::Done),
            ],
        })
    }
}

/// State 0 is non-terminal yet offers no action; state 1 is terminal.
#[derive(Debug, Clone, Copy)]
pub struct Stuck;

impl GameModel for Stuck {
    type State = u8;
    type Action = u8;

    fn is_terminal(&self, state: &u8) -> bool {
        *state == 1
    }

    fn legal_actions(&self, _state: &u8) -> Vec<u8> {
        Vec::new()
    }

    fn enumerate_states(&self) -> Vec<u8> {
        vec![0, 1]
    }
}

impl TransitionModel for Stuck {
    fn transitions(&self, state: &u8, action: u8) -> Result<Vec<Transition<u8>>> {
        Err(Error::IllegalAction {
            action: format!("{action:?}"),
            state: format!("{state:?}"),
        })
    }
}

/// Episodic wrapper around [`Stuck`]
pub struct StuckEnv {
    state: u8,
}

impl StuckEnv {
    pub fn new() -> Self {
        Self { state: 0 }
    }
}

impl Environment for StuckEnv {
    type Game = Stuck;

    fn game(&self) -> &Stuck {
        &Stuck
    }

    fn reset(&mut self) -> Result<u8> {
        self.state = 0;
        Ok(self.state)
    }

    fn current_state(&self) -> &u8 {
        &self.state
    }

    fn step(&mut self, action: u8) -> Result<Outcome<u8>> {
        Stuck.transitions(&self.state, action)?;
        Ok(Outcome {
            reward: 0.0,
            next_state: 1,
        })
    }
}
