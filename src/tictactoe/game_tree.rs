//! State-space enumeration over the full Tic-Tac-Toe game tree

use std::collections::{HashSet, VecDeque};

use super::{Player, board::BoardState};

/// Enumerate every reachable state in which `turn` is to move, plus every
/// reachable terminal state.
///
/// The walk is breadth-first from the empty board with X to move, visiting
/// moves in ascending cell order, so the result order is deterministic:
/// shallower positions come before deeper ones.
pub fn enumerate_states(turn: Player) -> Vec<BoardState> {
    let root = BoardState::new();
    let mut visited = HashSet::from([root]);
    let mut queue = VecDeque::from([root]);
    let mut states = Vec::new();

    while let Some(state) = queue.pop_front() {
        if state.is_terminal() || state.to_move == turn {
            states.push(state);
        }

        for pos in state.legal_moves() {
            let Ok(next) = state.make_move(pos) else {
                continue;
            };
            if visited.insert(next) {
                queue.push_back(next);
            }
        }
    }

    states
}

/// Number of distinct positions reachable from the empty board (both turns)
pub fn reachable_state_count() -> usize {
    let x_states = enumerate_states(Player::X);
    let o_states = enumerate_states(Player::O);
    let terminal = x_states.iter().filter(|s| s.is_terminal()).count();
    x_states.len() + o_states.len() - terminal
}
