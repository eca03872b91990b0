//! One-step lookahead and tie-breaking helpers

use crate::{
    Result,
    mdp::{TransitionModel, ValueStore},
};

/// Expected one-step return of `action` in `state`:
/// `Σ p · (r + γ · V(s'))`.
///
/// # Errors
///
/// Propagates illegal actions from the model and unknown successor states
/// from the value store.
pub fn expected_return<G>(
    game: &G,
    values: &ValueStore<G::State>,
    discount: f64,
    state: &G::State,
    action: G::Action,
) -> Result<f64>
where
    G: TransitionModel,
{
    let mut total = 0.0;
    for transition in game.transitions(state, action)? {
        let successor = values.get(&transition.outcome.next_state)?;
        total += transition.probability * (transition.outcome.reward + discount * successor);
    }
    Ok(total)
}

/// Scan `(action, value)` candidates in order, keeping the first one that
/// strictly exceeds the running best (seeded with `floor`).
///
/// Returns `None` when no candidate beats `floor`.
pub fn first_maximum<A, I>(candidates: I, floor: f64) -> Option<(A, f64)>
where
    I: IntoIterator<Item = (A, f64)>,
{
    let mut best = None;
    let mut best_value = floor;
    for (action, value) in candidates {
        if value > best_value {
            best_value = value;
            best = Some((action, value));
        }
    }
    best
}
