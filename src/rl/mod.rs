//! Reinforcement-learning decision subsystem.
//!
//! - Candidate handover enumeration over the graph state
//! - GNN scorer mapping a graph snapshot to a desirability value
//! - DQN agent: exploration, experience replay, target-network sync
//! - Environment coupling consecutive snapshots into transitions

pub mod actions;
pub mod dqn;
pub mod env;
pub mod gnn;

pub use actions::{enumerate, Action};
pub use dqn::{DqnAgent, DqnConfig};
pub use env::{Environment, RewardFn, ServingQuality, Transition};
pub use gnn::Gnn;
