//! Tic-Tac-Toe game model, transition model and environment

pub mod board;
pub mod environment;
pub mod game_tree;
pub mod lines;
pub mod model;

pub use board::{BoardState, Cell, Player};
pub use environment::TttEnvironment;
pub use game_tree::{enumerate_states, reachable_state_count};
pub use lines::{LineAnalyzer, WINNING_LINES};
pub use model::{TicTacToe, TttMdp};
