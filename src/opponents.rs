//! Opponent implementations injected into environments
//!
//! - [`RandomOpponent`]: uniform over legal actions
//! - [`PolicyOpponent`]: replays a fixed policy
//! - [`HumanOpponent`]: reads Tic-Tac-Toe moves from a text stream

use std::{
    fmt::Debug,
    hash::Hash,
    io::{BufRead, Write},
};

use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{
    Error, Result,
    mdp::{GameModel, Policy},
    ports::Opponent,
    tictactoe::{BoardState, TicTacToe},
};

/// Opponent that plays uniformly at random
#[derive(Debug, Clone)]
pub struct RandomOpponent {
    rng: StdRng,
}

impl RandomOpponent {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Create a new random opponent with a deterministic seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomOpponent {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: GameModel> Opponent<G> for RandomOpponent {
    fn name(&self) -> &str {
        "random"
    }

    fn choose(&mut self, game: &G, state: &G::State) -> Result<G::Action> {
        game.legal_actions(state)
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(|| Error::NoLegalActions {
                state: format!("{state:?}"),
            })
    }
}

/// Opponent that follows a fixed policy, e.g. one trained for the other side
#[derive(Debug, Clone)]
pub struct PolicyOpponent<S, A>
where
    S: Eq + Hash,
{
    policy: Policy<S, A>,
}

impl<S, A> PolicyOpponent<S, A>
where
    S: Clone + Eq + Hash + Debug,
    A: Copy + Eq + Hash + Debug,
{
    pub fn new(policy: Policy<S, A>) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &Policy<S, A> {
        &self.policy
    }
}

impl<G> Opponent<G> for PolicyOpponent<G::State, G::Action>
where
    G: GameModel,
{
    fn name(&self) -> &str {
        "policy"
    }

    fn choose(&mut self, _game: &G, state: &G::State) -> Result<G::Action> {
        self.policy.select(state)
    }
}

/// Human-in-the-loop opponent for Tic-Tac-Toe.
///
/// Prints the board to `output` and reads a cell index (0-8) per line from
/// `input`, asking again until the answer is a legal move.
pub struct HumanOpponent<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> HumanOpponent<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn prompt(&mut self, state: &BoardState) -> Result<()> {
        writeln!(self.output, "{state}")?;
        write!(self.output, "your move (0-8): ")?;
        self.output.flush()?;
        Ok(())
    }
}

impl<R: BufRead, W: Write> Opponent<TicTacToe> for HumanOpponent<R, W> {
    fn name(&self) -> &str {
        "human"
    }

    fn choose(&mut self, game: &TicTacToe, state: &BoardState) -> Result<usize> {
        let legal = game.legal_actions(state);
        loop {
            self.prompt(state)?;
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(Error::InputClosed);
            }
            match line.trim().parse::<usize>() {
                Ok(pos) if legal.contains(&pos) => return Ok(pos),
                _ => writeln!(self.output, "'{}' is not a legal move", line.trim())?,
            }
        }
    }
}
