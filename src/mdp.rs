//! Finite MDP abstractions shared by the planning and learning agents
//!
//! The game itself is supplied through [`GameModel`]. Planning agents need a
//! [`TransitionModel`] on top of it, while Q-learning only interacts with an
//! [`Environment`] that resolves the opponent internally.

pub mod greedy;
pub mod model;
pub mod policy;
pub mod value_store;

pub use greedy::{expected_return, first_maximum};
pub use model::{Environment, GameModel, Outcome, Transition, TransitionModel, total_probability};
pub use policy::Policy;
pub use value_store::ValueStore;
