//! Client trait seams for the wire-level collaborators.
//!
//! The E2 subscription/control client and the topology watcher are external
//! black boxes; the agent only depends on these traits.

use crate::core::{NodeId, Result};
use crate::e2::control::{ControlHeader, ControlMessage};
use crate::e2::indication::{IndicationHeader, IndicationMessage};
use crate::e2::subscription::EventTrigger;
use async_trait::async_trait;
use futures::stream::BoxStream;

/// Stream of structured indication records for one subscription.
pub type IndicationStream = BoxStream<'static, (IndicationHeader, IndicationMessage)>;

/// Stream of discovered node identifiers.
pub type NodeStream = BoxStream<'static, NodeId>;

/// Subscription and control plane toward E2 nodes.
#[async_trait]
pub trait E2Client: Send + Sync {
    /// Open a subscription on a node for one event trigger; yields decoded
    /// header/message record pairs until the subscription ends.
    async fn subscribe(&self, node_id: &str, trigger: EventTrigger) -> Result<IndicationStream>;

    /// Issue a control request to a node.
    async fn control(
        &self,
        node_id: &str,
        header: ControlHeader,
        message: ControlMessage,
    ) -> Result<()>;
}

/// Topology discovery toward the RIC.
#[async_trait]
pub trait TopologyClient: Send + Sync {
    /// Watch for E2 node connections; yields each discovered node id.
    async fn watch_connections(&self) -> Result<NodeStream>;
}
