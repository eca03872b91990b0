//! Opponent port - the other side of the board inside an environment

use crate::{Result, mdp::GameModel};

/// Trait for opponent behavior
///
/// An environment owns a boxed opponent and asks it for a reply whenever the
/// agent's move leaves the game running.
pub trait Opponent<G: GameModel> {
    /// Get the opponent's name.
    fn name(&self) -> &str;

    /// Choose an action for `state`, in which this opponent is to move.
    ///
    /// # Errors
    ///
    /// Implementations fail when they cannot produce an action (no policy
    /// entry, closed input). Environments reject illegal choices themselves.
    fn choose(&mut self, game: &G, state: &G::State) -> Result<G::Action>;
}
