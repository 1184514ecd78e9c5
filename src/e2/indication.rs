//! Indication records and their decode step.
//!
//! The service-model codec delivers structured header/message records; they
//! are decoded exactly once, at the subscription boundary, into the flat
//! [`Indication`] the decision core consumes. No nested-schema traversal
//! happens past this point.

use crate::core::{now, CellId, Error, NodeId, Result, RrcStatus, Timestamp, TriggerType, UeId};
use serde::{Deserialize, Serialize};

/// Indication header record (format 1): the serving cell identity.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IndicationHeader {
    pub serving_cell_id: CellId,
}

/// One entry of a measurement report.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MeasReportItem {
    pub cell_id: CellId,
    pub rsrp: f64,
}

/// Message format 1: a measurement report for one UE.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MeasReportFormat {
    pub ue_id: UeId,
    pub meas_reports: Vec<MeasReportItem>,
}

/// Message format 2: an RRC status change for one UE.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RrcStatusFormat {
    pub ue_id: UeId,
    pub rrc_status: RrcStatus,
}

/// Indication message record as produced by the codec.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum IndicationMessage {
    MeasReport(MeasReportFormat),
    RrcStatus(RrcStatusFormat),
}

/// A decoded indication: one report from one node about one UE.
#[derive(Clone, Debug)]
pub struct Indication {
    /// Node that produced the report
    pub node_id: NodeId,
    /// Condition class that produced it
    pub trigger_type: TriggerType,
    /// Serving cell at report time
    pub serving_cell_id: CellId,
    /// Subject UE
    pub ue_id: UeId,
    /// Measured neighbors and their signal metric (empty for RRC reports)
    pub neighbors: Vec<(CellId, f64)>,
    /// RRC status, for status-change reports only
    pub rrc_status: Option<RrcStatus>,
    /// Local receive time
    pub received_at: Timestamp,
}

impl Indication {
    /// Decode one header/message record pair.
    ///
    /// Fails when the message format does not match the trigger type or
    /// mandatory identifiers are empty; the caller drops the message and
    /// continues.
    pub fn decode(
        node_id: NodeId,
        trigger_type: TriggerType,
        header: IndicationHeader,
        message: IndicationMessage,
    ) -> Result<Self> {
        let (ue_id, neighbors, rrc_status) = match (trigger_type, message) {
            (
                TriggerType::Periodic | TriggerType::UponRcvMeasReport,
                IndicationMessage::MeasReport(format1),
            ) => {
                let neighbors = format1
                    .meas_reports
                    .into_iter()
                    .map(|item| (item.cell_id, item.rsrp))
                    .collect();
                (format1.ue_id, neighbors, None)
            }
            (
                TriggerType::UponChangeRrcStatus,
                IndicationMessage::RrcStatus(format2),
            ) => (format2.ue_id, Vec::new(), Some(format2.rrc_status)),
            (trigger, _) => {
                return Err(Error::MalformedIndication(format!(
                    "message format does not match trigger {}",
                    trigger
                )));
            }
        };

        if ue_id.is_empty() {
            return Err(Error::MalformedIndication("empty ue id".to_string()));
        }
        if header.serving_cell_id.is_empty() {
            return Err(Error::MalformedIndication(
                "empty serving cell id".to_string(),
            ));
        }

        Ok(Self {
            node_id,
            trigger_type,
            serving_cell_id: header.serving_cell_id,
            ue_id,
            neighbors,
            rrc_status,
            received_at: now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(cell: &str) -> IndicationHeader {
        IndicationHeader {
            serving_cell_id: cell.to_string(),
        }
    }

    fn meas_message(ue: &str, reports: &[(&str, f64)]) -> IndicationMessage {
        IndicationMessage::MeasReport(MeasReportFormat {
            ue_id: ue.to_string(),
            meas_reports: reports
                .iter()
                .map(|(c, rsrp)| MeasReportItem {
                    cell_id: c.to_string(),
                    rsrp: *rsrp,
                })
                .collect(),
        })
    }

    #[test]
    fn test_decode_meas_report() {
        let ind = Indication::decode(
            "node-1".to_string(),
            TriggerType::Periodic,
            header("A"),
            meas_message("u1", &[("A", -90.0), ("B", -85.0)]),
        )
        .unwrap();

        assert_eq!(ind.serving_cell_id, "A");
        assert_eq!(ind.ue_id, "u1");
        assert_eq!(ind.neighbors.len(), 2);
        assert_eq!(ind.rrc_status, None);
    }

    #[test]
    fn test_decode_rrc_status() {
        let ind = Indication::decode(
            "node-1".to_string(),
            TriggerType::UponChangeRrcStatus,
            header("A"),
            IndicationMessage::RrcStatus(RrcStatusFormat {
                ue_id: "u1".to_string(),
                rrc_status: RrcStatus::Idle,
            }),
        )
        .unwrap();

        assert_eq!(ind.rrc_status, Some(RrcStatus::Idle));
        assert!(ind.neighbors.is_empty());
    }

    #[test]
    fn test_decode_rejects_format_mismatch() {
        let result = Indication::decode(
            "node-1".to_string(),
            TriggerType::UponChangeRrcStatus,
            header("A"),
            meas_message("u1", &[("A", -90.0)]),
        );
        assert!(matches!(result, Err(Error::MalformedIndication(_))));
    }

    #[test]
    fn test_decode_rejects_empty_identifiers() {
        let result = Indication::decode(
            "node-1".to_string(),
            TriggerType::Periodic,
            header(""),
            meas_message("u1", &[("A", -90.0)]),
        );
        assert!(matches!(result, Err(Error::MalformedIndication(_))));

        let result = Indication::decode(
            "node-1".to_string(),
            TriggerType::Periodic,
            header("A"),
            meas_message("", &[("A", -90.0)]),
        );
        assert!(matches!(result, Err(Error::MalformedIndication(_))));
    }
}
