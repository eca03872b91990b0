//! Deterministic state -> action policy

use std::{collections::HashMap, fmt::Debug, hash::Hash};

use crate::{Error, Result, mdp::GameModel};

/// Trained artifact of every agent: one legal action per non-terminal state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy<S, A>
where
    S: Eq + Hash,
{
    actions: HashMap<S, A>,
}

impl<S, A> Policy<S, A>
where
    S: Clone + Eq + Hash + Debug,
    A: Copy + Eq + Hash + Debug,
{
    pub fn new() -> Self {
        Self {
            actions: HashMap::new(),
        }
    }

    /// Assign `action` to `state`, returning the previous assignment.
    ///
    /// # Errors
    ///
    /// - [`Error::TerminalState`] if `state` is terminal
    /// - [`Error::IllegalAction`] if `action` is not in `legal_actions(state)`
    pub fn assign<G>(&mut self, game: &G, state: S, action: A) -> Result<Option<A>>
    where
        G: GameModel<State = S, Action = A>,
    {
        if game.is_terminal(&state) {
            return Err(Error::TerminalState {
                state: format!("{state:?}"),
            });
        }
        if !game.legal_actions(&state).contains(&action) {
            return Err(Error::illegal_action(action, &state));
        }
        Ok(self.actions.insert(state, action))
    }

    /// Action chosen in `state`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownState`] if the policy has no entry for `state`.
    pub fn select(&self, state: &S) -> Result<A> {
        self.actions
            .get(state)
            .copied()
            .ok_or_else(|| Error::unknown_state(state))
    }

    pub fn get(&self, state: &S) -> Option<A> {
        self.actions.get(state).copied()
    }

    pub fn contains(&self, state: &S) -> bool {
        self.actions.contains_key(state)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&S, &A)> + '_ {
        self.actions.iter()
    }

    /// Check every non-terminal enumerated state has a legal entry
    pub fn is_total_for<G>(&self, game: &G) -> bool
    where
        G: GameModel<State = S, Action = A>,
    {
        game.enumerate_states()
            .iter()
            .filter(|s| !game.is_terminal(s))
            .all(|s| {
                self.get(s)
                    .is_some_and(|a| game.legal_actions(s).contains(&a))
            })
    }
}

impl<S, A> Default for Policy<S, A>
where
    S: Clone + Eq + Hash + Debug,
    A: Copy + Eq + Hash + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fork;

    impl GameModel for Fork {
        type State = &'static str;
        type Action = char;

        fn is_terminal(&self, state: &&'static str) -> bool {
            *state != "root"
        }

        fn legal_actions(&self, state: &&'static str) -> Vec<char> {
            if self.is_terminal(state) {
                vec![]
            } else {
                vec!['l', 'r']
            }
        }

        fn enumerate_states(&self) -> Vec<&'static str> {
            vec!["root", "left", "right"]
        }
    }

    #[test]
    fn assign_rejects_illegal_and_terminal() {
        let mut policy = Policy::new();
        assert!(matches!(
            policy.assign(&Fork, "root", 'x'),
            Err(Error::IllegalAction { .. })
        ));
        assert!(matches!(
            policy.assign(&Fork, "left", 'l'),
            Err(Error::TerminalState { .. })
        ));
        assert_eq!(policy.assign(&Fork, "root", 'l').unwrap(), None);
        assert_eq!(policy.assign(&Fork, "root", 'r').unwrap(), Some('l'));
        assert_eq!(policy.select(&"root").unwrap(), 'r');
        assert!(policy.is_total_for(&Fork));
    }

    #[test]
    fn select_unknown_state_fails() {
        let policy: Policy<&'static str, char> = Policy::new();
        assert!(matches!(
            policy.select(&"root"),
            Err(Error::UnknownState { .. })
        ));
        assert!(!policy.is_total_for(&Fork));
    }
}
