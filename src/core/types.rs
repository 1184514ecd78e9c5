//! Common types used across agent modules.

use serde::{Deserialize, Serialize};

/// Identifier of a radio cell (NR cell global identity, opaque token).
pub type CellId = String;

/// Identifier of a user equipment.
pub type UeId = String;

/// Identifier of an E2 node.
pub type NodeId = String;

/// Condition class that produced an indication.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriggerType {
    /// Periodic measurement report
    Periodic,
    /// Report sent upon receiving a measurement
    UponRcvMeasReport,
    /// Report sent upon an RRC status change
    UponChangeRrcStatus,
}

impl std::fmt::Display for TriggerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TriggerType::Periodic => write!(f, "periodic"),
            TriggerType::UponRcvMeasReport => write!(f, "upon_rcv_meas_report"),
            TriggerType::UponChangeRrcStatus => write!(f, "upon_change_rrc_status"),
        }
    }
}

/// RRC connection status of a UE, as carried by status-change indications.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RrcStatus {
    Connected,
    Inactive,
    Idle,
}

impl std::fmt::Display for RrcStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RrcStatus::Connected => write!(f, "connected"),
            RrcStatus::Inactive => write!(f, "inactive"),
            RrcStatus::Idle => write!(f, "idle"),
        }
    }
}

/// Timestamp wrapper for consistent serialization.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Get current UTC timestamp.
pub fn now() -> Timestamp {
    chrono::Utc::now()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_type_display() {
        assert_eq!(TriggerType::Periodic.to_string(), "periodic");
        assert_eq!(
            TriggerType::UponChangeRrcStatus.to_string(),
            "upon_change_rrc_status"
        );
    }

    #[test]
    fn test_rrc_status_roundtrip() {
        let json = serde_json::to_string(&RrcStatus::Idle).unwrap();
        let parsed: RrcStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, RrcStatus::Idle);
    }
}
