//! Subscription setup and the decode-and-forward task.
//!
//! Every node gets one independent subscription per trigger type; each
//! subscription runs as its own task that decodes incoming records and
//! forwards them into the shared indication queue consumed by the decision
//! loop.

use crate::core::{Error, NodeId, Result, TriggerType};
use crate::e2::client::E2Client;
use crate::e2::indication::Indication;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// All trigger types the agent subscribes to on every node.
pub const MHO_TRIGGER_TYPES: [TriggerType; 3] = [
    TriggerType::Periodic,
    TriggerType::UponRcvMeasReport,
    TriggerType::UponChangeRrcStatus,
];

/// Default reporting period for periodic triggers, in milliseconds.
pub const REPORTING_PERIOD_MS: u32 = 1000;

/// Event trigger definition sent with a subscription request.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct EventTrigger {
    pub trigger_type: TriggerType,
    pub reporting_period_ms: u32,
}

impl EventTrigger {
    /// Trigger definition with the default reporting period.
    pub fn new(trigger_type: TriggerType) -> Self {
        Self {
            trigger_type,
            reporting_period_ms: REPORTING_PERIOD_MS,
        }
    }
}

/// Run one subscription: decode every record pair and forward it.
///
/// Malformed records are dropped with a warning; the stream continues on
/// the next message. Returns when the stream ends or the queue closes.
pub async fn subscribe_trigger(
    client: Arc<dyn E2Client>,
    node_id: NodeId,
    trigger_type: TriggerType,
    queue: mpsc::Sender<Indication>,
) -> Result<()> {
    info!(node = %node_id, trigger = %trigger_type, "subscribing");

    let mut stream = client
        .subscribe(&node_id, EventTrigger::new(trigger_type))
        .await?;

    while let Some((header, message)) = stream.next().await {
        match Indication::decode(node_id.clone(), trigger_type, header, message) {
            Ok(indication) => {
                if queue.send(indication).await.is_err() {
                    return Err(Error::QueueClosed);
                }
            }
            Err(e) => {
                warn!(node = %node_id, trigger = %trigger_type, error = %e, "dropping malformed indication");
            }
        }
    }
    Ok(())
}

/// Set up all trigger subscriptions for one node and drive them to
/// completion, logging each failure.
pub async fn init_subscriptions(
    client: Arc<dyn E2Client>,
    node_id: NodeId,
    queue: mpsc::Sender<Indication>,
) {
    let subscriptions = MHO_TRIGGER_TYPES.map(|trigger_type| {
        subscribe_trigger(client.clone(), node_id.clone(), trigger_type, queue.clone())
    });

    for (trigger_type, result) in MHO_TRIGGER_TYPES
        .iter()
        .zip(futures::future::join_all(subscriptions).await)
    {
        if let Err(e) = result {
            warn!(node = %node_id, trigger = %trigger_type, error = %e, "subscription ended with error");
        }
    }
}
