//! Control records for handover commands.

use crate::core::{CellId, UeId};
use serde::{Deserialize, Serialize};

/// Control priority carried by every handover request.
pub const HANDOVER_PRIORITY: u32 = 10;

/// Commands understood by the service model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MhoCommand {
    InitiateHandover,
}

impl std::fmt::Display for MhoCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MhoCommand::InitiateHandover => write!(f, "initiate_handover"),
        }
    }
}

/// Control header record (format 1): command and priority.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ControlHeader {
    pub command: MhoCommand,
    pub priority: u32,
}

impl ControlHeader {
    /// The fixed header template for initiating a handover.
    pub fn initiate_handover() -> Self {
        Self {
            command: MhoCommand::InitiateHandover,
            priority: HANDOVER_PRIORITY,
        }
    }
}

/// Control message record (format 1): the handover triple.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ControlMessage {
    pub serving_cell_id: CellId,
    pub ue_id: UeId,
    pub target_cell_id: CellId,
}

/// Build the header/message pair commanding one handover.
pub fn handover_request(
    serving_cell_id: &str,
    ue_id: &str,
    target_cell_id: &str,
) -> (ControlHeader, ControlMessage) {
    (
        ControlHeader::initiate_handover(),
        ControlMessage {
            serving_cell_id: serving_cell_id.to_string(),
            ue_id: ue_id.to_string(),
            target_cell_id: target_cell_id.to_string(),
        },
    )
}
