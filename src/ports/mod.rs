//! Ports (trait boundaries) between the agents and their collaborators.
//!
//! The training engines only depend on these traits: a deployed [`Agent`]
//! exposes its finished policy, an [`Opponent`] plays the other side inside an
//! environment, and an [`Observer`] receives training progress events.

pub mod agent;
pub mod observer;
pub mod opponent;

pub use agent::Agent;
pub use observer::{EpisodeSummary, IterationSummary, Observer};
pub use opponent::Opponent;
