//! Derived tensors fed to the scorer.
//!
//! All accessors here are pure functions of the adjacency matrix, the
//! quality matrix and the connection map; they are recomputed on demand and
//! never independently mutated.
//!
//! Notation follows the underlying model: `N` cells, `M` UEs, `A_cl` the
//! cell adjacency, `A_ue` the cell-major attachment indicator, `C` the
//! cell-major quality matrix and `R` the per-cell normalized load.

use crate::state::GraphState;
use ndarray::{Array1, Array2, Axis};

/// The five derived arrays consumed by the GNN scorer.
#[derive(Clone, Debug)]
pub struct ModelInputs {
    /// Cell feature block 1: `[A_cl R 1 | R 1]`, shape N x 2
    pub x_cl_1: Array2<f64>,
    /// Cell feature block 2: `[A_ue Rᵀ 1 | C 1]`, shape N x 2
    pub x_cl_2: Array2<f64>,
    /// UE feature block: `[Cᵀ 1 | Rᵀ 1]`, shape M x 2
    pub x_ue: Array2<f64>,
    /// Cell adjacency, shape N x N
    pub a_cl: Array2<f64>,
    /// Cell-major attachment indicator, shape N x M
    pub a_ue: Array2<f64>,
}

fn hstack2(a: Array1<f64>, b: Array1<f64>) -> Array2<f64> {
    Array2::from_shape_fn((a.len(), 2), |(i, j)| if j == 0 { a[i] } else { b[i] })
}

impl GraphState {
    /// Cell-to-cell 0/1 adjacency over the tracked cells.
    pub fn cell_adjacency(&self) -> Array2<f64> {
        let n = self.cell_count();
        self.adjacency.slice(ndarray::s![..n, ..n]).to_owned()
    }

    /// Cell-major attachment indicator: entry `[c][u]` is 1 iff UE `u` is
    /// currently served by cell `c`.
    pub fn ue_cell_adjacency(&self) -> Array2<f64> {
        let (n, m) = (self.cell_count(), self.ue_count());
        let mut a_ue = Array2::zeros((n, m));
        for (u, ue_id) in self.ue_ids.iter().enumerate() {
            if let Some(cell_id) = self.connections.get(ue_id) {
                if let Some(&c) = self.cell_index.get(cell_id) {
                    a_ue[[c, u]] = 1.0;
                }
            }
        }
        a_ue
    }

    /// Transpose of the UE-to-cell quality matrix (cell-major).
    pub fn quality_transposed(&self) -> Array2<f64> {
        let (n, m) = (self.cell_count(), self.ue_count());
        self.quality.slice(ndarray::s![..m, ..n]).t().to_owned()
    }

    /// Per-(cell, UE) quality divided by the number of UEs attached to the
    /// cell. Cells with no attached UEs yield zero, not NaN.
    pub fn normalized_load(&self) -> Array2<f64> {
        let counts = self.ue_cell_adjacency().sum_axis(Axis(1));
        let mut r = self.quality_transposed();
        for (c, mut row) in r.axis_iter_mut(Axis(0)).enumerate() {
            if counts[c] > 0.0 {
                row.mapv_inplace(|v| v / counts[c]);
            } else {
                row.fill(0.0);
            }
        }
        r
    }

    /// Assemble the model input bundle for the scorer.
    pub fn model_inputs(&self) -> ModelInputs {
        let a_cl = self.cell_adjacency();
        let a_ue = self.ue_cell_adjacency();
        let c = self.quality_transposed();
        let r = self.normalized_load();

        let r_row_sums = r.sum_axis(Axis(1)); // R 1, length N
        let r_col_sums = r.sum_axis(Axis(0)); // Rᵀ 1, length M
        let c_row_sums = c.sum_axis(Axis(1)); // C 1, length N
        let c_col_sums = c.sum_axis(Axis(0)); // Cᵀ 1, length M

        ModelInputs {
            x_cl_1: hstack2(a_cl.dot(&r_row_sums), r_row_sums),
            x_cl_2: hstack2(a_ue.dot(&r_col_sums), c_row_sums),
            x_ue: hstack2(c_col_sums, r_col_sums),
            a_cl,
            a_ue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CellId;

    fn metrics(pairs: &[(&str, f64)]) -> Vec<(CellId, f64)> {
        pairs.iter().map(|(c, m)| (c.to_string(), *m)).collect()
    }

    fn two_cell_state() -> GraphState {
        let mut state = GraphState::new(6, 10);
        state.attach("u1", "A", &metrics(&[("A", -90.0), ("B", -85.0)]));
        state
    }

    #[test]
    fn test_ue_cell_adjacency_marks_serving_cell() {
        let state = two_cell_state();
        let a_ue = state.ue_cell_adjacency();
        assert_eq!(a_ue.shape(), &[2, 1]);
        assert_eq!(a_ue[[0, 0]], 1.0); // u1 under A
        assert_eq!(a_ue[[1, 0]], 0.0);
    }

    #[test]
    fn test_quality_transposed_is_cell_major() {
        let state = two_cell_state();
        let c = state.quality_transposed();
        assert_eq!(c.shape(), &[2, 1]);
        assert_eq!(c[[0, 0]], -90.0);
        assert_eq!(c[[1, 0]], -85.0);
    }

    #[test]
    fn test_normalized_load_divides_by_attached_count() {
        let mut state = two_cell_state();
        state.attach("u2", "A", &metrics(&[("A", -70.0), ("B", -75.0)]));

        let r = state.normalized_load();
        // cell A serves two UEs
        assert_eq!(r[[0, 0]], -45.0);
        assert_eq!(r[[0, 1]], -35.0);
        // cell B serves none: defined as zero, not NaN
        assert_eq!(r[[1, 0]], 0.0);
        assert_eq!(r[[1, 1]], 0.0);
        assert!(r.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_attached_count_matches_column_sums() {
        let mut state = two_cell_state();
        state.attach("u2", "A", &metrics(&[("A", -70.0)]));
        state.attach("u3", "B", &metrics(&[("B", -80.0), ("A", -99.0)]));

        let counts = state.ue_cell_adjacency().sum_axis(Axis(1));
        assert_eq!(counts[0], 2.0); // A
        assert_eq!(counts[1], 1.0); // B
    }

    #[test]
    fn test_model_inputs_shapes() {
        let mut state = two_cell_state();
        state.attach("u2", "B", &metrics(&[("B", -70.0), ("C", -75.0)]));

        let inputs = state.model_inputs();
        let (n, m) = (state.cell_count(), state.ue_count());
        assert_eq!(inputs.x_cl_1.shape(), &[n, 2]);
        assert_eq!(inputs.x_cl_2.shape(), &[n, 2]);
        assert_eq!(inputs.x_ue.shape(), &[m, 2]);
        assert_eq!(inputs.a_cl.shape(), &[n, n]);
        assert_eq!(inputs.a_ue.shape(), &[n, m]);
    }

    #[test]
    fn test_model_inputs_formulas_single_ue() {
        // One UE on A, metrics A: -90, B: -85. R row for A is the raw
        // quality (one attached UE), row for B is zero (unloaded), so
        // R = [[-90], [0]] and C = [[-90], [-85]].
        let state = two_cell_state();
        let inputs = state.model_inputs();

        // R 1 = [-90, 0]; A_cl = [[1,1],[0,0]], so A_cl R 1 = [-90, 0]
        assert_eq!(inputs.x_cl_1[[0, 0]], -90.0);
        assert_eq!(inputs.x_cl_1[[0, 1]], -90.0);
        assert_eq!(inputs.x_cl_1[[1, 0]], 0.0);
        assert_eq!(inputs.x_cl_1[[1, 1]], 0.0);

        // Rᵀ 1 = [-90]; A_ue = [[1],[0]], so A_ue Rᵀ 1 = [-90, 0];
        // C 1 = [-90, -85]
        assert_eq!(inputs.x_cl_2[[0, 0]], -90.0);
        assert_eq!(inputs.x_cl_2[[0, 1]], -90.0);
        assert_eq!(inputs.x_cl_2[[1, 0]], 0.0);
        assert_eq!(inputs.x_cl_2[[1, 1]], -85.0);

        // Cᵀ 1 = [-175]; Rᵀ 1 = [-90]
        assert_eq!(inputs.x_ue[[0, 0]], -175.0);
        assert_eq!(inputs.x_ue[[0, 1]], -90.0);
    }

    #[test]
    fn test_empty_state_yields_empty_tensors() {
        let state = GraphState::new(6, 10);
        let inputs = state.model_inputs();
        assert_eq!(inputs.x_cl_1.shape(), &[0, 2]);
        assert_eq!(inputs.x_ue.shape(), &[0, 2]);
        assert_eq!(inputs.a_cl.shape(), &[0, 0]);
    }
}
