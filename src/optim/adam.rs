//! Adam optimizer

use super::Optimizer;
use ndarray::{ArrayD, ArrayViewD, ArrayViewMutD, Zip};

/// Adam optimizer
///
/// m_t = β1 * m_{t-1} + (1 - β1) * g
/// v_t = β2 * v_{t-1} + (1 - β2) * g²
/// θ_t = θ_{t-1} - lr_t * m_t / (√v_t + ε), lr_t = lr * √(1 - β2^t) / (1 - β1^t)
#[derive(Debug, Clone)]
pub struct Adam {
    lr: f32,
    beta1: f32,
    beta2: f32,
    epsilon: f32,
    t: u64,
    m: Vec<Option<ArrayD<f32>>>, // First moment
    v: Vec<Option<ArrayD<f32>>>, // Second moment
}

impl Adam {
    /// Create a new Adam optimizer
    pub fn new(lr: f32, beta1: f32, beta2: f32, epsilon: f32) -> Self {
        Self { lr, beta1, beta2, epsilon, t: 0, m: Vec::new(), v: Vec::new() }
    }

    /// Adam with the usual defaults (β1 = 0.9, β2 = 0.999, ε = 1e-7)
    pub fn default_params(lr: f32) -> Self {
        Self::new(lr, 0.9, 0.999, 1e-7)
    }

    /// Get optimizer step counter.
    #[must_use]
    pub fn step_count(&self) -> u64 {
        self.t
    }

    fn ensure_slot(&mut self, slot: usize) {
        if self.m.len() <= slot {
            self.m.resize(slot + 1, None);
            self.v.resize(slot + 1, None);
        }
    }
}

impl Optimizer for Adam {
    fn begin_step(&mut self) {
        self.t += 1;
    }

    fn update(&mut self, slot: usize, param: ArrayViewMutD<'_, f32>, grad: ArrayViewD<'_, f32>) {
        self.ensure_slot(slot);
        let t = self.t.max(1) as i32;
        let (beta1, beta2, epsilon) = (self.beta1, self.beta2, self.epsilon);

        // Bias correction factors
        let lr_t = self.lr * ((1.0 - beta2.powi(t)).sqrt() / (1.0 - beta1.powi(t)));

        let m = self.m[slot].get_or_insert_with(|| ArrayD::zeros(grad.raw_dim()));
        let v = self.v[slot].get_or_insert_with(|| ArrayD::zeros(grad.raw_dim()));
        if m.shape() != grad.shape() {
            *m = ArrayD::zeros(grad.raw_dim());
            *v = ArrayD::zeros(grad.raw_dim());
        }

        Zip::from(param).and(&grad).and(m).and(v).for_each(|p, &g, m, v| {
            *m = beta1 * *m + (1.0 - beta1) * g;
            *v = beta2 * *v + (1.0 - beta2) * g * g;
            *p -= lr_t * *m / (v.sqrt() + epsilon);
        });
    }

    fn lr(&self) -> f32 {
        self.lr
    }

    fn name(&self) -> &'static str {
        "adam"
    }
}
