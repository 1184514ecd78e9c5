//! Agent runtime: node discovery, indication fan-in and the decision loop.
//!
//! Indications from every subscription are fanned into one queue consumed
//! by a single sequential task; that task is the only writer of the graph
//! state, so the graph needs no locking. Control commands are issued
//! fire-and-forget: a failed command is logged and the loop moves on.

use crate::config::AppConfig;
use crate::core::{Result, RrcStatus, TriggerType};
use crate::e2::client::{E2Client, TopologyClient};
use crate::e2::control;
use crate::e2::indication::Indication;
use crate::e2::subscription::init_subscriptions;
use crate::rl::{Action, DqnAgent, DqnConfig, Environment};
use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

/// Depth of the shared indication queue.
const INDICATION_QUEUE_DEPTH: usize = 1024;

/// Run the agent until the topology stream ends.
///
/// Spawns the decision loop, then watches for E2 node connections and sets
/// up subscriptions for each discovered node. Under normal operation the
/// topology stream never terminates; process shutdown is the only teardown
/// path.
pub async fn run(
    config: AppConfig,
    e2: Arc<dyn E2Client>,
    topo: Arc<dyn TopologyClient>,
) -> Result<()> {
    info!(app_id = %config.app_id, "starting handover agent");

    let (tx, rx) = mpsc::channel(INDICATION_QUEUE_DEPTH);
    let environment = Environment::new(config.max_cells, config.max_ues);
    let agent = DqnAgent::new(DqnConfig::from(&config));
    tokio::spawn(process_indications(rx, environment, agent, e2.clone()));

    let mut nodes = topo.watch_connections().await?;
    while let Some(node_id) = nodes.next().await {
        info!(node = %node_id, "discovered e2 node");
        tokio::spawn(init_subscriptions(e2.clone(), node_id, tx.clone()));
    }
    Ok(())
}

/// The sequential decision loop: sole writer of the graph state.
///
/// Consumes indications until the queue closes, then returns the final
/// environment and agent (which makes the loop directly testable).
pub async fn process_indications(
    mut queue: mpsc::Receiver<Indication>,
    mut environment: Environment,
    mut agent: DqnAgent,
    e2: Arc<dyn E2Client>,
) -> (Environment, DqnAgent) {
    while let Some(indication) = queue.recv().await {
        apply_indication(&indication, &mut environment);

        let action = agent.select_action(environment.state());
        let (_, reward) = environment.step(&action);
        agent.cache(environment.transition(reward));
        agent.learn();

        if let Action::Handover {
            ue_id,
            serving_cell_id,
            target_cell_id,
        } = action
        {
            info!(ue = %ue_id, from = %serving_cell_id, to = %target_cell_id, "initiating handover");
            let (header, message) =
                control::handover_request(&serving_cell_id, &ue_id, &target_cell_id);
            let e2 = e2.clone();
            let node_id = indication.node_id.clone();
            tokio::spawn(async move {
                if let Err(e) = e2.control(&node_id, header, message).await {
                    error!(node = %node_id, ue = %ue_id, error = %e, "control request failed");
                }
            });
        }
    }
    (environment, agent)
}

/// Mutate the graph state for one indication.
fn apply_indication(indication: &Indication, environment: &mut Environment) {
    match indication.trigger_type {
        TriggerType::Periodic | TriggerType::UponRcvMeasReport => {
            environment.state_mut().attach(
                &indication.ue_id,
                &indication.serving_cell_id,
                &indication.neighbors,
            );
        }
        TriggerType::UponChangeRrcStatus => match indication.rrc_status {
            Some(RrcStatus::Idle) => environment.state_mut().detach(&indication.ue_id),
            status => {
                debug!(ue = %indication.ue_id, status = ?status, "rrc status change ignored");
            }
        },
    }
}
