//! State-value table shared by the planning agents

use std::{collections::HashMap, fmt::Debug, hash::Hash};

use crate::{Error, Result, mdp::GameModel};

/// Mapping from every enumerated state to a value estimate.
///
/// Entries keep the enumeration order of [`GameModel::enumerate_states`],
/// which is also the in-place sweep order. Terminal states always read 0.0.
#[derive(Debug, Clone)]
pub struct ValueStore<S> {
    states: Vec<S>,
    terminal: Vec<bool>,
    values: Vec<f64>,
    index: HashMap<S, usize>,
}

impl<S> ValueStore<S>
where
    S: Clone + Eq + Hash + Debug,
{
    /// Build a zero-initialised store over the game's enumerated states
    pub fn new<G>(game: &G) -> Self
    where
        G: GameModel<State = S>,
    {
        let states = game.enumerate_states();
        let terminal = states.iter().map(|s| game.is_terminal(s)).collect();
        let index = states
            .iter()
            .enumerate()
            .map(|(i, s)| (s.clone(), i))
            .collect();
        Self {
            values: vec![0.0; states.len()],
            states,
            terminal,
            index,
        }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// States in sweep order
    pub fn states(&self) -> &[S] {
        &self.states
    }

    pub fn contains(&self, state: &S) -> bool {
        self.index.contains_key(state)
    }

    fn position(&self, state: &S) -> Result<usize> {
        self.index
            .get(state)
            .copied()
            .ok_or_else(|| Error::unknown_state(state))
    }

    /// Value of `state`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownState`] for states outside the enumeration.
    pub fn get(&self, state: &S) -> Result<f64> {
        let i = self.position(state)?;
        Ok(self.get_at(i))
    }

    /// Store `value` for `state`; terminal states stay pinned at 0.0.
    ///
    /// Returns the previous value.
    pub fn set(&mut self, state: &S, value: f64) -> Result<f64> {
        let i = self.position(state)?;
        Ok(self.set_at(i, value))
    }

    pub(crate) fn get_at(&self, i: usize) -> f64 {
        if self.terminal[i] { 0.0 } else { self.values[i] }
    }

    pub(crate) fn set_at(&mut self, i: usize, value: f64) -> f64 {
        let previous = self.get_at(i);
        self.values[i] = if self.terminal[i] { 0.0 } else { value };
        previous
    }

    pub(crate) fn is_terminal_at(&self, i: usize) -> bool {
        self.terminal[i]
    }

    /// Iterate `(state, value)` pairs in sweep order
    pub fn iter(&self) -> impl Iterator<Item = (&S, f64)> + '_ {
        self.states
            .iter()
            .enumerate()
            .map(|(i, s)| (s, self.get_at(i)))
    }

    /// Largest absolute difference to another store over the same states
    pub fn max_abs_difference(&self, other: &ValueStore<S>) -> Result<f64> {
        let mut largest: f64 = 0.0;
        for (state, value) in self.iter() {
            largest = largest.max((value - other.get(state)?).abs());
        }
        Ok(largest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Three states, the last one terminal
    struct Line;

    impl GameModel for Line {
        type State = u8;
        type Action = u8;

        fn is_terminal(&self, state: &u8) -> bool {
            *state == 2
        }

        fn legal_actions(&self, state: &u8) -> Vec<u8> {
            if self.is_terminal(state) { vec![] } else { vec![0] }
        }

        fn enumerate_states(&self) -> Vec<u8> {
            vec![0, 1, 2]
        }
    }

    #[test]
    fn starts_at_zero_in_enumeration_order() {
        let store = ValueStore::new(&Line);
        assert_eq!(store.len(), 3);
        assert_eq!(store.states(), &[0, 1, 2]);
        assert!(store.iter().all(|(_, v)| v == 0.0));
    }

    #[test]
    fn terminal_states_stay_pinned_at_zero() {
        let mut store = ValueStore::new(&Line);
        store.set(&2, 5.0).unwrap();
        assert_eq!(store.get(&2).unwrap(), 0.0);

        store.set(&1, 3.5).unwrap();
        assert_eq!(store.get(&1).unwrap(), 3.5);
    }

    #[test]
    fn unknown_state_lookup_fails() {
        let mut store = ValueStore::new(&Line);
        assert!(matches!(store.get(&9), Err(Error::UnknownState { .. })));
        assert!(matches!(store.set(&9, 1.0), Err(Error::UnknownState { .. })));
    }
}
