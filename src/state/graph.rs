//! Graph state of the radio network.
//!
//! Cells and UEs are assigned stable integer indices on first appearance;
//! identifier-to-index lookup maps sit next to dense matrices preallocated
//! at the configured capacity. Capacity is a high-water mark over
//! identifiers seen: detach zeroes a UE out but does not free its slot.

use crate::core::{CellId, UeId};
use ndarray::Array2;
use std::collections::HashMap;
use tracing::debug;

/// Bipartite cell/UE graph with per-edge signal quality.
///
/// Mutation is single-writer by construction: only the indication
/// processing loop calls [`attach`](Self::attach) and
/// [`detach`](Self::detach). All derived tensors are pure functions of the
/// matrices and the connection map (see `state::inputs`).
#[derive(Clone, Debug)]
pub struct GraphState {
    /// Maximum number of tracked cells
    pub(crate) max_cells: usize,
    /// Maximum number of tracked UEs
    pub(crate) max_ues: usize,
    /// Cell identifiers in insertion order; position is the cell index
    pub(crate) cell_ids: Vec<CellId>,
    /// Cell identifier to index
    pub(crate) cell_index: HashMap<CellId, usize>,
    /// UE identifiers in insertion order; position is the UE index
    pub(crate) ue_ids: Vec<UeId>,
    /// UE identifier to index
    pub(crate) ue_index: HashMap<UeId, usize>,
    /// Cell-to-cell adjacency, `max_cells x max_cells`, 0/1 entries
    pub(crate) adjacency: Array2<f64>,
    /// UE-to-cell signal quality, `max_ues x max_cells`, 0 where unreported
    pub(crate) quality: Array2<f64>,
    /// Serving cell per UE; absent entry means unattached
    pub(crate) connections: HashMap<UeId, CellId>,
}

impl GraphState {
    /// Create an empty graph with the given capacity caps.
    pub fn new(max_cells: usize, max_ues: usize) -> Self {
        Self {
            max_cells,
            max_ues,
            cell_ids: Vec::new(),
            cell_index: HashMap::new(),
            ue_ids: Vec::new(),
            ue_index: HashMap::new(),
            adjacency: Array2::zeros((max_cells, max_cells)),
            quality: Array2::zeros((max_ues, max_cells)),
            connections: HashMap::new(),
        }
    }

    /// Number of tracked cells.
    pub fn cell_count(&self) -> usize {
        self.cell_ids.len()
    }

    /// Number of tracked UEs.
    pub fn ue_count(&self) -> usize {
        self.ue_ids.len()
    }

    /// Tracked cell identifiers in index order.
    pub fn cell_ids(&self) -> &[CellId] {
        &self.cell_ids
    }

    /// Tracked UE identifiers in index order.
    pub fn ue_ids(&self) -> &[UeId] {
        &self.ue_ids
    }

    /// The serving cell of a UE, if attached.
    pub fn serving_cell(&self, ue_id: &str) -> Option<&CellId> {
        self.connections.get(ue_id)
    }

    /// Latest reported metric from a UE toward a cell; 0 where unreported.
    pub fn metric(&self, ue_id: &str, cell_id: &str) -> f64 {
        match (self.ue_index.get(ue_id), self.cell_index.get(cell_id)) {
            (Some(&u), Some(&c)) => self.quality[[u, c]],
            _ => 0.0,
        }
    }

    /// Cells the UE has reported a nonzero metric toward, in cell index order.
    pub fn reported_neighbors(&self, ue_id: &str) -> Vec<CellId> {
        let Some(&u) = self.ue_index.get(ue_id) else {
            return Vec::new();
        };
        self.cell_ids
            .iter()
            .enumerate()
            .filter(|(c, _)| self.quality[[u, *c]] != 0.0)
            .map(|(_, id)| id.clone())
            .collect()
    }

    /// Record a measurement report for a UE.
    ///
    /// New cells in `metrics` are admitted up to the cell cap; adjacency
    /// edges are recorded from the serving cell to every tracked cell in
    /// the report. The UE's quality row is overwritten entirely and its
    /// connection-map entry is set to the serving cell.
    ///
    /// The whole call is a no-op when the serving cell is absent from its
    /// own measurement set, when the serving cell could not be admitted, or
    /// when the UE is new and the UE cap is reached.
    pub fn attach(&mut self, ue_id: &str, serving_cell_id: &str, metrics: &[(CellId, f64)]) {
        if !metrics.iter().any(|(cell, _)| cell == serving_cell_id) {
            debug!(ue = %ue_id, cell = %serving_cell_id, "serving cell missing from its own report, ignoring");
            return;
        }

        for (cell_id, _) in metrics {
            if !self.cell_index.contains_key(cell_id) && self.cell_count() < self.max_cells {
                self.cell_index.insert(cell_id.clone(), self.cell_ids.len());
                self.cell_ids.push(cell_id.clone());
            }
        }

        // The connection map may only reference tracked cells.
        let Some(&serving) = self.cell_index.get(serving_cell_id) else {
            debug!(ue = %ue_id, cell = %serving_cell_id, "serving cell not admitted (cell cap reached), ignoring");
            return;
        };
        for (cell_id, _) in metrics {
            if let Some(&c) = self.cell_index.get(cell_id.as_str()) {
                self.adjacency[[serving, c]] = 1.0;
            }
        }

        let u = match self.ue_index.get(ue_id) {
            Some(&u) => u,
            None => {
                if self.ue_count() == self.max_ues {
                    debug!(ue = %ue_id, "ue cap reached, ignoring new ue");
                    return;
                }
                let u = self.ue_ids.len();
                self.ue_index.insert(ue_id.to_string(), u);
                self.ue_ids.push(ue_id.to_string());
                u
            }
        };

        self.quality.row_mut(u).fill(0.0);
        for (cell_id, metric) in metrics {
            if let Some(&c) = self.cell_index.get(cell_id.as_str()) {
                self.quality[[u, c]] = *metric;
            }
        }
        self.connections
            .insert(ue_id.to_string(), serving_cell_id.to_string());
    }

    /// Detach a UE: zero its quality row and clear its connection entry.
    ///
    /// The UE keeps its index (capacity accounting is a high-water mark).
    /// Unknown UEs are a no-op.
    pub fn detach(&mut self, ue_id: &str) {
        let Some(&u) = self.ue_index.get(ue_id) else {
            debug!(ue = %ue_id, "detach for unknown ue, ignoring");
            return;
        };
        self.quality.row_mut(u).fill(0.0);
        self.connections.remove(ue_id);
    }

    /// Reassign a UE's serving cell in the connection map.
    ///
    /// Both the UE and the target cell must already be tracked; otherwise
    /// nothing changes. Returns whether the reassignment took effect.
    pub fn set_serving(&mut self, ue_id: &str, cell_id: &str) -> bool {
        if !self.ue_index.contains_key(ue_id) || !self.cell_index.contains_key(cell_id) {
            return false;
        }
        self.connections
            .insert(ue_id.to_string(), cell_id.to_string());
        true
    }
}
