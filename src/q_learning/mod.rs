//! Tabular Q-learning
//!
//! Model-free temporal difference control: the agent never sees transition
//! probabilities, only the rewards and successor states an [`Environment`]
//! reports for each round it plays.
//!
//! ## Update rule
//!
//! | Successor | TD target |
//! |-----------|-----------|
//! | terminal | `r` |
//! | non-terminal | `r + γ · max_a' Q(s', a')` |
//!
//! Exploration is ε-greedy, with ε multiplied by the decay factor after every
//! action taken rather than once per episode.
//!
//! ## Usage Example
//!
//! ```no_run
//! use tictactoe_mdp::{
//!     config::{QLearningConfig, Rewards},
//!     ports::Agent,
//!     q_learning::QLearningAgent,
//!     tictactoe::{BoardState, TttEnvironment},
//! };
//!
//! let env = TttEnvironment::against_random(Rewards::default(), Some(7));
//! let config = QLearningConfig::default().with_episodes(10_000).with_seed(7);
//! let agent = QLearningAgent::new(env, config)?;
//! let opening = agent.select_move(&BoardState::new())?;
//! # Ok::<(), tictactoe_mdp::Error>(())
//! ```
//!
//! [`Environment`]: crate::mdp::Environment

pub mod agent;
pub mod q_table;

pub use agent::QLearningAgent;
pub use q_table::QTable;
