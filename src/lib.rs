//! Tabular MDP agents for Tic-Tac-Toe
//!
//! This crate provides:
//! - Generic finite-MDP traits ([`mdp::GameModel`], [`mdp::TransitionModel`],
//!   [`mdp::Environment`]) with value, policy and Q tables
//! - Policy iteration and value iteration planners
//! - Tabular Q-learning against a live environment
//! - A Tic-Tac-Toe game model, transition model and environment with
//!   pluggable opponents
//!
//! Every agent trains to completion in its constructor and then serves a
//! fixed [`mdp::Policy`] through the [`ports::Agent`] trait.

pub mod config;
pub mod error;
pub mod mdp;
pub mod observers;
pub mod opponents;
pub mod planning;
pub mod ports;
pub mod q_learning;
pub mod tictactoe;

pub use config::{AgentConfig, PlanningConfig, QLearningConfig, Rewards};
pub use error::{Error, Result};
pub use mdp::Policy;
pub use planning::{PolicyIterationAgent, ValueIterationAgent};
pub use ports::Agent;
pub use q_learning::QLearningAgent;
