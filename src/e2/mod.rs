//! E2 protocol boundary.
//!
//! The wire-level subscription/control client and the service-model codec
//! are external collaborators; this module holds their trait seams, the
//! structured records they exchange, and the decode step that turns raw
//! indication records into the agent's own representation.

pub mod client;
pub mod control;
pub mod indication;
pub mod subscription;

pub use client::{E2Client, TopologyClient};
pub use control::{ControlHeader, ControlMessage, MhoCommand};
pub use indication::{Indication, IndicationHeader, IndicationMessage};
pub use subscription::{init_subscriptions, EventTrigger, MHO_TRIGGER_TYPES};

/// Service model implemented by the subscribed nodes.
pub const SERVICE_MODEL_NAME: &str = "oran-e2sm-mho";

/// Service model version.
pub const SERVICE_MODEL_VERSION: &str = "v2";
