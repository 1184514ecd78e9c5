//! # xapp-mho — mobility handover decision agent
//!
//! A handover decision agent for RAN intelligent controllers:
//! - **state**: live cell/UE graph with derived model tensors
//! - **rl**: GNN scorer + DQN agent with experience replay
//! - **e2**: subscription/control boundary toward E2 nodes
//! - **runtime**: node discovery and the sequential decision loop
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use xapp_mho::config::AppConfig;
//!
//! # async fn example(e2: Arc<dyn xapp_mho::e2::E2Client>, topo: Arc<dyn xapp_mho::e2::TopologyClient>) {
//! // clients are provided by the embedding process
//! xapp_mho::runtime::run(AppConfig::default(), e2, topo).await.unwrap();
//! # }
//! ```

pub mod config;
pub mod core;
pub mod e2;
pub mod rl;
pub mod runtime;
pub mod state;

pub use crate::core::error::{Error, Result};
