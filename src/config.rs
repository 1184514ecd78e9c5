//! Configuration surface of the handover agent.
//!
//! Everything the embedding process needs to wire the agent: application
//! identity, endpoint addresses, credential material paths, graph capacity
//! and the learning hyperparameters.

use serde::{Deserialize, Serialize};

/// Configuration for the handover agent process.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application identity registered with the RIC
    pub app_id: String,
    /// E2 termination endpoint
    pub e2t_endpoint: String,
    /// Topology service endpoint
    pub topo_endpoint: String,
    /// CA certificate path
    pub ca_path: String,
    /// TLS certificate path
    pub cert_path: String,
    /// TLS key path
    pub key_path: String,
    /// Maximum number of tracked cells (high-water mark)
    pub max_cells: usize,
    /// Maximum number of tracked UEs (high-water mark)
    pub max_ues: usize,
    /// Exploration rate for action selection
    pub epsilon: f64,
    /// Hidden width of the GNN scorer
    pub gnn_dimension: usize,
    /// SGD learning rate
    pub learning_rate: f64,
    /// Learn steps between target-network syncs
    pub learning_frequency: u64,
    /// Capacity of the experience replay ring
    pub replay_capacity: usize,
    /// Discount factor for the one-step learning target
    pub discount: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_id: "xapp-mho".to_string(),
            e2t_endpoint: "onos-e2t:5150".to_string(),
            topo_endpoint: "onos-topo:5150".to_string(),
            ca_path: "/etc/xapp-mho/pki/ca.crt".to_string(),
            cert_path: "/etc/xapp-mho/pki/tls.crt".to_string(),
            key_path: "/etc/xapp-mho/pki/tls.key".to_string(),
            max_cells: 6,
            max_ues: 10,
            epsilon: 0.1,
            gnn_dimension: 8,
            learning_rate: 0.001,
            learning_frequency: 10,
            replay_capacity: 256,
            discount: 0.9,
        }
    }
}
