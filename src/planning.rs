//! Model-based planning agents
//!
//! Both agents read a [`TransitionModel`](crate::mdp::TransitionModel) and
//! sweep a [`ValueStore`](crate::mdp::ValueStore) in place, in enumeration
//! order, so a sweep sees values already updated earlier in the same pass.

pub mod policy_iteration;
pub mod value_iteration;

pub use policy_iteration::PolicyIterationAgent;
pub use value_iteration::ValueIterationAgent;
