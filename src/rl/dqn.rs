//! DQN agent: exploration, experience replay and target-network sync.

use crate::config::AppConfig;
use crate::rl::actions::{self, Action};
use crate::rl::env::Transition;
use crate::rl::gnn::Gnn;
use crate::state::GraphState;
use rand::Rng;

/// Configuration for the DQN agent.
#[derive(Clone, Debug)]
pub struct DqnConfig {
    /// Exploration rate
    pub epsilon: f64,
    /// Hidden width of the scorer
    pub dimension: usize,
    /// SGD learning rate
    pub learning_rate: f64,
    /// Learn steps between target-network syncs
    pub learning_frequency: u64,
    /// Capacity of the replay ring
    pub replay_capacity: usize,
    /// Discount factor of the one-step target
    pub discount: f64,
    /// Transitions sampled per learn step
    pub batch_size: usize,
}

impl Default for DqnConfig {
    fn default() -> Self {
        Self {
            epsilon: 0.1,
            dimension: 8,
            learning_rate: 0.001,
            learning_frequency: 10,
            replay_capacity: 256,
            discount: 0.9,
            batch_size: 16,
        }
    }
}

impl From<&AppConfig> for DqnConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            epsilon: config.epsilon,
            dimension: config.gnn_dimension,
            learning_rate: config.learning_rate,
            learning_frequency: config.learning_frequency,
            replay_capacity: config.replay_capacity,
            discount: config.discount,
            ..Self::default()
        }
    }
}

/// Q-learning agent over graph snapshots.
///
/// Keeps an online scorer for action selection and gradient updates, and a
/// target scorer refreshed by hard parameter sync every
/// `learning_frequency` learn steps.
pub struct DqnAgent {
    config: DqnConfig,
    online: Gnn,
    target: Gnn,
    learning_count: u64,
    memory: Vec<Transition>,
    memory_count: usize,
}

impl DqnAgent {
    /// Create an agent; the target network starts as a copy of the online
    /// network.
    pub fn new(config: DqnConfig) -> Self {
        let online = Gnn::new(config.dimension);
        let mut target = Gnn::new(config.dimension);
        target.sync_from(&online);
        Self {
            config,
            online,
            target,
            learning_count: 0,
            memory: Vec::new(),
            memory_count: 0,
        }
    }

    /// Pick an action for the current snapshot.
    ///
    /// With probability `1 - epsilon`, every candidate's resulting state is
    /// scored by the online network and the arg-max wins (ties go to the
    /// first-seen candidate); otherwise a uniformly random candidate.
    pub fn select_action(&self, state: &GraphState) -> Action {
        let candidates = actions::enumerate(state);
        let mut rng = rand::thread_rng();

        if rng.gen::<f64>() < self.config.epsilon {
            return candidates[rng.gen_range(0..candidates.len())].clone();
        }

        let mut best: Option<(f64, &Action)> = None;
        for action in &candidates {
            let mut outcome = state.clone();
            action.apply(&mut outcome);
            let q = self.online.score(&outcome.model_inputs());
            if best.map_or(true, |(best_q, _)| q > best_q) {
                best = Some((q, action));
            }
        }
        // candidates always contains at least Hold
        best.map(|(_, action)| action.clone()).unwrap_or(Action::Hold)
    }

    /// Insert a transition at `count % capacity` (overwrite-oldest ring).
    pub fn cache(&mut self, transition: Transition) {
        let slot = self.memory_count % self.config.replay_capacity;
        if slot == self.memory.len() {
            self.memory.push(transition);
        } else {
            self.memory[slot] = transition;
        }
        self.memory_count += 1;
    }

    /// One learning step: a minibatch SGD update of the online network
    /// against the target network's one-step value estimate, plus the
    /// periodic hard target sync.
    ///
    /// An empty replay buffer means "not yet ready to learn": the gradient
    /// update is skipped, only the counters advance.
    pub fn learn(&mut self) {
        self.learning_count += 1;

        if !self.memory.is_empty() {
            let batch = self.config.batch_size.min(self.memory.len());
            let indices =
                rand::seq::index::sample(&mut rand::thread_rng(), self.memory.len(), batch);
            let scale = 1.0 / batch as f64;

            self.online.zero_grad();
            for idx in indices {
                let transition = &self.memory[idx];
                let target_q = transition.reward
                    + self.config.discount * self.target.score(&transition.next);
                self.online
                    .accumulate_loss(&transition.prev, target_q, scale);
            }
            self.online.apply_gradients(self.config.learning_rate);
        }

        if self.learning_count % self.config.learning_frequency == 0 {
            self.target.sync_from(&self.online);
        }
    }

    /// Transitions currently retained in the replay ring.
    pub fn memory(&self) -> &[Transition] {
        &self.memory
    }

    /// Number of learn steps taken.
    pub fn learning_count(&self) -> u64 {
        self.learning_count
    }

    /// The online scorer.
    pub fn online(&self) -> &Gnn {
        &self.online
    }

    /// The target scorer.
    pub fn target(&self) -> &Gnn {
        &self.target
    }
}
