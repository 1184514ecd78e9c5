//! Environment coupling consecutive graph snapshots into transitions.

use crate::rl::actions::Action;
use crate::state::{GraphState, ModelInputs};

/// Reward policy evaluated on the posterior state after an action.
///
/// The formula is domain policy, kept pluggable behind this seam.
pub trait RewardFn: Send + Sync {
    fn reward(&self, state: &GraphState) -> f64;
}

/// Default reward: aggregate signal quality of every attached UE toward
/// its serving cell.
pub struct ServingQuality;

impl RewardFn for ServingQuality {
    fn reward(&self, state: &GraphState) -> f64 {
        state
            .ue_ids()
            .iter()
            .filter_map(|ue| {
                state
                    .serving_cell(ue)
                    .map(|cell| state.metric(ue, cell))
            })
            .sum()
    }
}

/// An experience record: prior and posterior tensor snapshots plus the
/// observed reward. Owned by the replay buffer until overwritten.
#[derive(Clone, Debug)]
pub struct Transition {
    pub prev: ModelInputs,
    pub next: ModelInputs,
    pub reward: f64,
}

/// Two consecutive graph snapshots plus a pluggable reward policy.
pub struct Environment {
    max_cells: usize,
    max_ues: usize,
    prev: GraphState,
    curr: GraphState,
    reward_fn: Box<dyn RewardFn>,
}

impl Environment {
    /// Create an environment over empty states with the default reward.
    pub fn new(max_cells: usize, max_ues: usize) -> Self {
        Self::with_reward(max_cells, max_ues, Box::new(ServingQuality))
    }

    /// Create an environment with a custom reward policy.
    pub fn with_reward(max_cells: usize, max_ues: usize, reward_fn: Box<dyn RewardFn>) -> Self {
        Self {
            max_cells,
            max_ues,
            prev: GraphState::new(max_cells, max_ues),
            curr: GraphState::new(max_cells, max_ues),
            reward_fn,
        }
    }

    /// The current graph snapshot.
    pub fn state(&self) -> &GraphState {
        &self.curr
    }

    /// Mutable access for the indication processing loop (single writer).
    pub fn state_mut(&mut self) -> &mut GraphState {
        &mut self.curr
    }

    /// Advance the environment: snapshot the current state as the prior,
    /// apply the action, and evaluate the reward on the posterior.
    pub fn step(&mut self, action: &Action) -> (ModelInputs, f64) {
        self.prev = self.curr.clone();
        action.apply(&mut self.curr);
        let reward = self.reward_fn.reward(&self.curr);
        (self.curr.model_inputs(), reward)
    }

    /// Package the prior/posterior snapshot pair into a transition.
    pub fn transition(&self, reward: f64) -> Transition {
        Transition {
            prev: self.prev.model_inputs(),
            next: self.curr.model_inputs(),
            reward,
        }
    }

    /// Restore both snapshots to empty states with zero entities.
    pub fn reset(&mut self) {
        self.prev = GraphState::new(self.max_cells, self.max_ues);
        self.curr = GraphState::new(self.max_cells, self.max_ues);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CellId;

    fn metrics(pairs: &[(&str, f64)]) -> Vec<(CellId, f64)> {
        pairs.iter().map(|(c, m)| (c.to_string(), *m)).collect()
    }

    #[test]
    fn test_step_applies_handover_and_rewards() {
        let mut env = Environment::new(6, 10);
        env.state_mut()
            .attach("u1", "A", &metrics(&[("A", -90.0), ("B", -85.0)]));

        let action = Action::Handover {
            ue_id: "u1".to_string(),
            serving_cell_id: "A".to_string(),
            target_cell_id: "B".to_string(),
        };
        let (_, reward) = env.step(&action);

        assert_eq!(env.state().serving_cell("u1"), Some(&"B".to_string()));
        assert_eq!(reward, -85.0); // u1's metric toward its new serving cell
    }

    #[test]
    fn test_hold_keeps_connection_map() {
        let mut env = Environment::new(6, 10);
        env.state_mut()
            .attach("u1", "A", &metrics(&[("A", -90.0), ("B", -85.0)]));

        let (_, reward) = env.step(&Action::Hold);
        assert_eq!(env.state().serving_cell("u1"), Some(&"A".to_string()));
        assert_eq!(reward, -90.0);
    }

    #[test]
    fn test_transition_pairs_prior_and_posterior() {
        let mut env = Environment::new(6, 10);
        env.state_mut()
            .attach("u1", "A", &metrics(&[("A", -90.0), ("B", -85.0)]));

        let action = Action::Handover {
            ue_id: "u1".to_string(),
            serving_cell_id: "A".to_string(),
            target_cell_id: "B".to_string(),
        };
        let (_, reward) = env.step(&action);
        let transition = env.transition(reward);

        assert_eq!(transition.reward, -85.0);
        // prior has u1 on A, posterior on B
        assert_eq!(transition.prev.a_ue[[0, 0]], 1.0);
        assert_eq!(transition.next.a_ue[[0, 0]], 0.0);
        assert_eq!(transition.next.a_ue[[1, 0]], 1.0);
    }

    #[test]
    fn test_reset_empties_both_snapshots() {
        let mut env = Environment::new(6, 10);
        env.state_mut()
            .attach("u1", "A", &metrics(&[("A", -90.0)]));
        env.step(&Action::Hold);
        env.reset();

        assert_eq!(env.state().cell_count(), 0);
        assert_eq!(env.state().ue_count(), 0);
        assert_eq!(env.transition(0.0).prev.a_cl.shape(), &[0, 0]);
    }

    #[test]
    fn test_custom_reward_policy() {
        struct Constant;
        impl RewardFn for Constant {
            fn reward(&self, _: &GraphState) -> f64 {
                42.0
            }
        }

        let mut env = Environment::with_reward(6, 10, Box::new(Constant));
        env.state_mut()
            .attach("u1", "A", &metrics(&[("A", -90.0)]));
        let (_, reward) = env.step(&Action::Hold);
        assert_eq!(reward, 42.0);
    }
}
