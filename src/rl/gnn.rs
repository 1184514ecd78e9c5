//! Message-passing scorer over the cell/UE graph.
//!
//! Four rounds of bipartite message passing followed by a two-layer value
//! head. Each round rectifies two independent projections of the cell
//! feature blocks and one of the UE block, then propagates the cell
//! representation along the cell adjacency, the UE attachment matrix and
//! its transpose:
//!
//! ```text
//! H_cl = relu(W1 X_cl_1) + relu(W2 X_cl_2)
//! H_ue = relu(W3 X_ue)
//! X_cl_1 <- A_cl H_cl ;  X_cl_2 <- A_ue H_ue ;  X_ue <- A_ueᵀ H_cl
//! ```
//!
//! The head column-sums the final cell representation and projects it to a
//! single scalar. Gradients are tracked per layer and applied with plain
//! SGD; the target-network copy is a hard parameter sync.

use crate::state::ModelInputs;
use ndarray::{Array1, Array2, Axis};

/// Number of message-passing rounds.
const ROUNDS: usize = 4;

/// Width of the raw feature blocks.
const INPUT_WIDTH: usize = 2;

/// A dense layer with explicit gradient slots.
#[derive(Clone, Debug)]
pub struct Dense {
    /// Weights, input x output
    pub w: Array2<f64>,
    /// Bias, length output
    pub b: Array1<f64>,
    grad_w: Option<Array2<f64>>,
    grad_b: Option<Array1<f64>>,
}

impl Dense {
    /// Create a layer with uniform random weights scaled by fan-in/out.
    fn new(input_dim: usize, output_dim: usize) -> Self {
        use rand::Rng;
        let mut rng = rand::thread_rng();
        let scale = (2.0 / (input_dim + output_dim) as f64).sqrt();

        let w = Array2::from_shape_fn((input_dim, output_dim), |_| {
            rng.gen::<f64>() * scale - scale / 2.0
        });

        Self {
            w,
            b: Array1::zeros(output_dim),
            grad_w: None,
            grad_b: None,
        }
    }

    fn forward(&self, x: &Array2<f64>) -> Array2<f64> {
        x.dot(&self.w) + &self.b
    }

    /// Accumulate gradients for this layer given the cached input and the
    /// gradient at the pre-activation output; returns the input gradient.
    fn accumulate(&mut self, x: &Array2<f64>, dz: &Array2<f64>) -> Array2<f64> {
        let gw = x.t().dot(dz);
        let gb = dz.sum_axis(Axis(0));
        match &mut self.grad_w {
            Some(g) => *g += &gw,
            None => self.grad_w = Some(gw),
        }
        match &mut self.grad_b {
            Some(g) => *g += &gb,
            None => self.grad_b = Some(gb),
        }
        dz.dot(&self.w.t())
    }

    fn zero_grad(&mut self) {
        self.grad_w = None;
        self.grad_b = None;
    }

    fn apply_gradients(&mut self, lr: f64) {
        if let Some(g) = self.grad_w.take() {
            self.w = &self.w - &(g * lr);
        }
        if let Some(g) = self.grad_b.take() {
            self.b = &self.b - &(g * lr);
        }
    }

    fn copy_from(&mut self, other: &Dense) {
        self.w.assign(&other.w);
        self.b.assign(&other.b);
    }
}

fn relu(z: &Array2<f64>) -> Array2<f64> {
    z.mapv(|v| v.max(0.0))
}

fn relu_mask(z: &Array2<f64>) -> Array2<f64> {
    z.mapv(|v| if v > 0.0 { 1.0 } else { 0.0 })
}

/// Forward-pass caches kept for backpropagation.
struct Forward {
    x1: Vec<Array2<f64>>,
    x2: Vec<Array2<f64>>,
    xu: Vec<Array2<f64>>,
    z1: Vec<Array2<f64>>,
    z2: Vec<Array2<f64>>,
    z3: Vec<Array2<f64>>,
    h_cl: Array2<f64>,
    pooled: Array2<f64>,
    zq: Array2<f64>,
    q: f64,
}

/// The GNN scorer: maps a graph snapshot to a scalar desirability value.
pub struct Gnn {
    dimension: usize,
    w1: Vec<Dense>,
    w2: Vec<Dense>,
    w3: Vec<Dense>,
    q_hidden: Dense,
    q_out: Dense,
}

impl Gnn {
    /// Create a scorer with the given hidden width.
    pub fn new(dimension: usize) -> Self {
        let block = || {
            (0..ROUNDS)
                .map(|l| {
                    let input = if l == 0 { INPUT_WIDTH } else { dimension };
                    Dense::new(input, dimension)
                })
                .collect::<Vec<_>>()
        };
        Self {
            dimension,
            w1: block(),
            w2: block(),
            w3: block(),
            q_hidden: Dense::new(dimension, dimension),
            q_out: Dense::new(dimension, 1),
        }
    }

    /// Hidden width of the scorer.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Score a graph snapshot.
    pub fn score(&self, inputs: &ModelInputs) -> f64 {
        self.forward(inputs).q
    }

    fn forward(&self, inputs: &ModelInputs) -> Forward {
        let mut x1 = inputs.x_cl_1.clone();
        let mut x2 = inputs.x_cl_2.clone();
        let mut xu = inputs.x_ue.clone();

        let mut cache = Forward {
            x1: Vec::with_capacity(ROUNDS),
            x2: Vec::with_capacity(ROUNDS),
            xu: Vec::with_capacity(ROUNDS),
            z1: Vec::with_capacity(ROUNDS),
            z2: Vec::with_capacity(ROUNDS),
            z3: Vec::with_capacity(ROUNDS),
            h_cl: Array2::zeros((0, self.dimension)),
            pooled: Array2::zeros((1, self.dimension)),
            zq: Array2::zeros((1, self.dimension)),
            q: 0.0,
        };

        for l in 0..ROUNDS {
            let z1 = self.w1[l].forward(&x1);
            let z2 = self.w2[l].forward(&x2);
            let z3 = self.w3[l].forward(&xu);
            let h_cl = relu(&z1) + relu(&z2);
            let h_ue = relu(&z3);

            cache.x1.push(x1);
            cache.x2.push(x2);
            cache.xu.push(xu);

            x1 = inputs.a_cl.dot(&h_cl);
            x2 = inputs.a_ue.dot(&h_ue);
            xu = inputs.a_ue.t().dot(&h_cl);

            cache.z1.push(z1);
            cache.z2.push(z2);
            cache.z3.push(z3);
            cache.h_cl = h_cl;
        }

        cache.pooled = cache.h_cl.sum_axis(Axis(0)).insert_axis(Axis(0));
        cache.zq = self.q_hidden.forward(&cache.pooled);
        cache.q = self.q_out.forward(&relu(&cache.zq))[[0, 0]];
        cache
    }

    /// Clear accumulated gradients on every layer.
    pub fn zero_grad(&mut self) {
        for l in 0..ROUNDS {
            self.w1[l].zero_grad();
            self.w2[l].zero_grad();
            self.w3[l].zero_grad();
        }
        self.q_hidden.zero_grad();
        self.q_out.zero_grad();
    }

    /// Accumulate gradients of the scaled squared error against `target`
    /// and return the (unscaled) squared error.
    pub fn accumulate_loss(&mut self, inputs: &ModelInputs, target: f64, scale: f64) -> f64 {
        let fwd = self.forward(inputs);
        let err = fwd.q - target;
        self.backward(inputs, &fwd, 2.0 * err * scale);
        err * err
    }

    /// Apply accumulated gradients with one SGD step.
    pub fn apply_gradients(&mut self, lr: f64) {
        for l in 0..ROUNDS {
            self.w1[l].apply_gradients(lr);
            self.w2[l].apply_gradients(lr);
            self.w3[l].apply_gradients(lr);
        }
        self.q_hidden.apply_gradients(lr);
        self.q_out.apply_gradients(lr);
    }

    /// Hard-copy every parameter from another scorer of the same
    /// architecture (target-network sync).
    pub fn sync_from(&mut self, other: &Gnn) {
        for l in 0..ROUNDS {
            self.w1[l].copy_from(&other.w1[l]);
            self.w2[l].copy_from(&other.w2[l]);
            self.w3[l].copy_from(&other.w3[l]);
        }
        self.q_hidden.copy_from(&other.q_hidden);
        self.q_out.copy_from(&other.q_out);
    }

    /// Enumerate the trainable layers.
    pub fn parameters(&self) -> Vec<&Dense> {
        let mut layers = Vec::with_capacity(3 * ROUNDS + 2);
        for l in 0..ROUNDS {
            layers.push(&self.w1[l]);
            layers.push(&self.w2[l]);
            layers.push(&self.w3[l]);
        }
        layers.push(&self.q_hidden);
        layers.push(&self.q_out);
        layers
    }

    fn backward(&mut self, inputs: &ModelInputs, fwd: &Forward, dq: f64) {
        let n = fwd.h_cl.nrows();
        let d = self.dimension;

        // Value head
        let dqv = Array2::from_elem((1, 1), dq);
        let hq = relu(&fwd.zq);
        let dhq = self.q_out.accumulate(&hq, &dqv);
        let dzq = &dhq * &relu_mask(&fwd.zq);
        let dpooled = self.q_hidden.accumulate(&fwd.pooled, &dzq);

        // pooled = 1ᵀ H_cl: the pooled gradient broadcasts over every cell
        let mut dh_cl = Array2::from_shape_fn((n, d), |(_, j)| dpooled[[0, j]]);
        // the final round's UE representation feeds nothing downstream
        let mut dh_ue = Array2::zeros((fwd.xu[ROUNDS - 1].nrows(), d));

        for l in (0..ROUNDS).rev() {
            let dz1 = &dh_cl * &relu_mask(&fwd.z1[l]);
            let dx1 = self.w1[l].accumulate(&fwd.x1[l], &dz1);
            let dz2 = &dh_cl * &relu_mask(&fwd.z2[l]);
            let dx2 = self.w2[l].accumulate(&fwd.x2[l], &dz2);
            let dz3 = &dh_ue * &relu_mask(&fwd.z3[l]);
            let dxu = self.w3[l].accumulate(&fwd.xu[l], &dz3);

            if l > 0 {
                // invert the propagation of round l-1:
                // x1 = A_cl H_cl, xu = A_ueᵀ H_cl, x2 = A_ue H_ue
                dh_cl = inputs.a_cl.t().dot(&dx1) + inputs.a_ue.dot(&dxu);
                dh_ue = inputs.a_ue.t().dot(&dx2);
            }
        }
    }
}
