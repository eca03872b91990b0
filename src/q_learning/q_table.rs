//! Q-table implementation for temporal difference learning

use std::{collections::HashMap, fmt::Debug, hash::Hash};

use crate::{
    Error, Result,
    mdp::{GameModel, first_maximum},
};

/// Q-table mapping (state, action) pairs to Q-values
///
/// Holds one row per non-terminal enumerated state, with one entry per legal
/// action in the game's action order. All entries start at 0.0.
#[derive(Debug, Clone)]
pub struct QTable<S, A> {
    /// Non-terminal states in enumeration order
    states: Vec<S>,
    rows: HashMap<S, Vec<(A, f64)>>,
    /// Learning rate α
    learning_rate: f64,
    /// Discount factor γ
    discount_factor: f64,
}

impl<S, A> QTable<S, A>
where
    S: Clone + Eq + Hash + Debug,
    A: Copy + Eq + Hash + Debug,
{
    /// Create a zero-initialised Q-table over the game's state space
    ///
    /// # Errors
    ///
    /// [`Error::NoLegalActions`] if a non-terminal state offers no action.
    pub fn new<G>(game: &G, learning_rate: f64, discount_factor: f64) -> Result<Self>
    where
        G: GameModel<State = S, Action = A>,
    {
        let mut states = Vec::new();
        let mut rows = HashMap::new();
        for state in game.enumerate_states() {
            if game.is_terminal(&state) {
                continue;
            }
            let row: Vec<(A, f64)> = game
                .legal_actions(&state)
                .into_iter()
                .map(|action| (action, 0.0))
                .collect();
            if row.is_empty() {
                return Err(Error::NoLegalActions {
                    state: format!("{state:?}"),
                });
            }
            rows.insert(state.clone(), row);
            states.push(state);
        }
        Ok(Self {
            states,
            rows,
            learning_rate,
            discount_factor,
        })
    }

    /// Non-terminal states in enumeration order
    pub fn states(&self) -> &[S] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn contains(&self, state: &S) -> bool {
        self.rows.contains_key(state)
    }

    /// `(action, Q-value)` entries of a state in legal-action order
    pub fn row(&self, state: &S) -> Result<&[(A, f64)]> {
        self.rows
            .get(state)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::unknown_state(state))
    }

    fn entry_mut(&mut self, state: &S, action: A) -> Result<&mut f64> {
        let row = self
            .rows
            .get_mut(state)
            .ok_or_else(|| Error::unknown_state(state))?;
        row.iter_mut()
            .find(|(a, _)| *a == action)
            .map(|(_, q)| q)
            .ok_or_else(|| Error::illegal_action(action, state))
    }

    /// Get Q-value for a state-action pair
    pub fn get(&self, state: &S, action: A) -> Result<f64> {
        self.row(state)?
            .iter()
            .find(|(a, _)| *a == action)
            .map(|&(_, q)| q)
            .ok_or_else(|| Error::illegal_action(action, state))
    }

    /// Set Q-value for a state-action pair
    pub fn set(&mut self, state: &S, action: A, value: f64) -> Result<()> {
        *self.entry_mut(state, action)? = value;
        Ok(())
    }

    /// Get maximum Q-value over the state's legal actions
    pub fn max_value(&self, state: &S) -> Result<f64> {
        Ok(self
            .row(state)?
            .iter()
            .map(|&(_, q)| q)
            .fold(f64::NEG_INFINITY, f64::max))
    }

    /// Select greedy action; the first action reaching the maximum wins ties.
    pub fn greedy_action(&self, state: &S) -> Result<A> {
        first_maximum(self.row(state)?.iter().copied(), f64::NEG_INFINITY)
            .map(|(action, _)| action)
            .ok_or_else(|| Error::NoGreedyAction {
                state: format!("{state:?}"),
            })
    }

    /// Q-learning update: off-policy TD control
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)], with the max term
    /// replaced by 0 when `s'` is terminal. Returns the new value.
    pub fn q_learning_update(
        &mut self,
        state: &S,
        action: A,
        reward: f64,
        next_state: &S,
        next_is_terminal: bool,
    ) -> Result<f64> {
        let max_next_q = if next_is_terminal {
            0.0
        } else {
            self.max_value(next_state)?
        };
        let td_target = reward + self.discount_factor * max_next_q;
        let learning_rate = self.learning_rate;
        let entry = self.entry_mut(state, action)?;
        let td_error = td_target - *entry;
        *entry += learning_rate * td_error;
        Ok(*entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::{BoardState, TicTacToe};

    fn table() -> QTable<BoardState, usize> {
        QTable::new(&TicTacToe::default(), 0.5, 0.99).unwrap()
    }

    #[test]
    fn test_qtable_initialization() {
        let qtable = table();
        // 2423 non-terminal positions with X to move
        assert_eq!(qtable.len(), 2423);
        assert_eq!(qtable.get(&BoardState::new(), 0).unwrap(), 0.0);
        assert_eq!(qtable.row(&BoardState::new()).unwrap().len(), 9);
    }

    #[test]
    fn test_qtable_set_get() {
        let mut qtable = table();
        let state = BoardState::new();
        qtable.set(&state, 4, 1.5).unwrap();
        assert_eq!(qtable.get(&state, 4).unwrap(), 1.5);
    }

    #[test]
    fn test_unknown_entries_fail() {
        let mut qtable = table();
        let o_to_move = BoardState::new().make_move(0).unwrap();
        assert!(matches!(
            qtable.get(&o_to_move, 1),
            Err(Error::UnknownState { .. })
        ));
        let occupied = BoardState::new().make_move(0).unwrap().make_move(1).unwrap();
        assert!(matches!(
            qtable.set(&occupied, 0, 1.0),
            Err(Error::IllegalAction { .. })
        ));
    }

    #[test]
    fn test_max_value_and_greedy_action() {
        let mut qtable = table();
        let state = BoardState::new();
        qtable.set(&state, 0, 0.5).unwrap();
        qtable.set(&state, 1, 1.5).unwrap();
        qtable.set(&state, 2, 0.8).unwrap();

        assert_eq!(qtable.max_value(&state).unwrap(), 1.5);
        assert_eq!(qtable.greedy_action(&state).unwrap(), 1);
    }

    #[test]
    fn test_greedy_action_ties_keep_first() {
        let mut qtable = table();
        let state = BoardState::new();
        qtable.set(&state, 3, 2.0).unwrap();
        qtable.set(&state, 7, 2.0).unwrap();
        assert_eq!(qtable.greedy_action(&state).unwrap(), 3);
        assert_eq!(table().greedy_action(&state).unwrap(), 0);
    }

    #[test]
    fn test_greedy_action_without_a_finite_candidate_fails() {
        let mut qtable = table();
        let state = BoardState::new();
        for action in state.legal_moves() {
            qtable.set(&state, action, f64::NAN).unwrap();
        }
        assert_eq!(qtable.max_value(&state).unwrap(), f64::NEG_INFINITY);
        assert!(matches!(
            qtable.greedy_action(&state),
            Err(Error::NoGreedyAction { .. })
        ));
    }

    #[test]
    fn test_q_learning_update() {
        let mut qtable = table();
        let state = BoardState::new();
        let next_state = state.make_move(4).unwrap().make_move(0).unwrap();

        qtable.set(&next_state, 1, 1.0).unwrap();
        qtable.set(&next_state, 2, 2.0).unwrap();

        let updated = qtable
            .q_learning_update(&state, 4, 0.0, &next_state, false)
            .unwrap();

        // Q(s,4) = 0.0 + 0.5 * (0.0 + 0.99 * 2.0 - 0.0) = 0.99
        assert!((updated - 0.99).abs() < 1e-12);
        assert_eq!(qtable.get(&state, 4).unwrap(), updated);
    }

    #[test]
    fn test_terminal_successor_bootstraps_zero() {
        let mut qtable = table();
        let state = BoardState::from_string("XX. OO. ...").unwrap();
        let won = state.make_move(2).unwrap();
        let updated = qtable
            .q_learning_update(&state, 2, 10.0, &won, true)
            .unwrap();
        assert_eq!(updated, 5.0);
    }
}
