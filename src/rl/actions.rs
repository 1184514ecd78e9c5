//! Candidate handover actions.

use crate::core::{CellId, UeId};
use crate::state::GraphState;
use serde::{Deserialize, Serialize};

/// A decision the agent can take for one indication.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Keep every UE on its current serving cell.
    Hold,
    /// Move a UE from its serving cell to a reported neighbor.
    Handover {
        ue_id: UeId,
        serving_cell_id: CellId,
        target_cell_id: CellId,
    },
}

impl Action {
    /// Apply the action to a graph state. `Hold` is the identity; a
    /// handover reassigns the connection map only.
    pub fn apply(&self, state: &mut GraphState) {
        if let Action::Handover {
            ue_id,
            target_cell_id,
            ..
        } = self
        {
            state.set_serving(ue_id, target_cell_id);
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Hold => write!(f, "hold"),
            Action::Handover {
                ue_id,
                serving_cell_id,
                target_cell_id,
            } => write!(f, "handover {} from {} to {}", ue_id, serving_cell_id, target_cell_id),
        }
    }
}

/// Enumerate the legal actions for a graph snapshot.
///
/// `Hold` comes first, then one handover per (UE, reported neighbor) pair
/// excluding the current serving cell. Ordering is UE index order, then
/// cell index order, so the output is stable for a fixed snapshot.
pub fn enumerate(state: &GraphState) -> Vec<Action> {
    let mut actions = vec![Action::Hold];
    for ue_id in state.ue_ids() {
        let Some(serving) = state.serving_cell(ue_id) else {
            continue;
        };
        let serving = serving.clone();
        for cell_id in state.reported_neighbors(ue_id) {
            if cell_id != serving {
                actions.push(Action::Handover {
                    ue_id: ue_id.clone(),
                    serving_cell_id: serving.clone(),
                    target_cell_id: cell_id,
                });
            }
        }
    }
    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CellId;

    fn metrics(pairs: &[(&str, f64)]) -> Vec<(CellId, f64)> {
        pairs.iter().map(|(c, m)| (c.to_string(), *m)).collect()
    }

    #[test]
    fn test_empty_state_yields_hold_only() {
        let state = GraphState::new(6, 10);
        assert_eq!(enumerate(&state), vec![Action::Hold]);
    }

    #[test]
    fn test_single_ue_two_cells() {
        let mut state = GraphState::new(6, 10);
        state.attach("u1", "A", &metrics(&[("A", -90.0), ("B", -85.0)]));

        let actions = enumerate(&state);
        assert_eq!(
            actions,
            vec![
                Action::Hold,
                Action::Handover {
                    ue_id: "u1".to_string(),
                    serving_cell_id: "A".to_string(),
                    target_cell_id: "B".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_size_matches_neighbor_count() {
        let mut state = GraphState::new(6, 10);
        state.attach("u1", "A", &metrics(&[("A", -90.0), ("B", -85.0), ("C", -80.0)]));
        state.attach("u2", "B", &metrics(&[("B", -88.0), ("C", -84.0)]));

        // 1 + (2 non-serving neighbors of u1) + (1 of u2)
        assert_eq!(enumerate(&state).len(), 4);
    }

    #[test]
    fn test_enumeration_is_deterministic() {
        let mut state = GraphState::new(6, 10);
        state.attach("u1", "A", &metrics(&[("A", -90.0), ("B", -85.0), ("C", -80.0)]));
        state.attach("u2", "C", &metrics(&[("C", -88.0), ("A", -84.0)]));

        assert_eq!(enumerate(&state), enumerate(&state));
    }

    #[test]
    fn test_detached_ue_contributes_no_actions() {
        let mut state = GraphState::new(6, 10);
        state.attach("u1", "A", &metrics(&[("A", -90.0), ("B", -85.0)]));
        state.detach("u1");
        assert_eq!(enumerate(&state), vec![Action::Hold]);
    }

    #[test]
    fn test_apply_handover_moves_connection() {
        let mut state = GraphState::new(6, 10);
        state.attach("u1", "A", &metrics(&[("A", -90.0), ("B", -85.0)]));

        let action = Action::Handover {
            ue_id: "u1".to_string(),
            serving_cell_id: "A".to_string(),
            target_cell_id: "B".to_string(),
        };
        action.apply(&mut state);
        assert_eq!(state.serving_cell("u1"), Some(&"B".to_string()));

        Action::Hold.apply(&mut state);
        assert_eq!(state.serving_cell("u1"), Some(&"B".to_string()));
    }
}
