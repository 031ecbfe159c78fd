//! Stochastic Gradient Descent optimizer

use super::Optimizer;
use ndarray::{ArrayD, ArrayViewD, ArrayViewMutD, Zip};

/// SGD optimizer with optional momentum
#[derive(Debug, Clone)]
pub struct SGD {
    lr: f32,
    momentum: f32,
    velocities: Vec<Option<ArrayD<f32>>>,
}

impl SGD {
    /// Create a new SGD optimizer
    pub fn new(lr: f32, momentum: f32) -> Self {
        Self { lr, momentum, velocities: Vec::new() }
    }

    /// Momentum coefficient
    pub fn momentum(&self) -> f32 {
        self.momentum
    }
}

impl Optimizer for SGD {
    fn update(&mut self, slot: usize, param: ArrayViewMutD<'_, f32>, grad: ArrayViewD<'_, f32>) {
        let lr = self.lr;
        if self.momentum <= 0.0 {
            // Simple SGD: param -= lr * grad
            Zip::from(param).and(&grad).for_each(|p, &g| *p -= lr * g);
            return;
        }

        if self.velocities.len() <= slot {
            self.velocities.resize(slot + 1, None);
        }
        let momentum = self.momentum;
        let velocity = self.velocities[slot].get_or_insert_with(|| ArrayD::zeros(grad.raw_dim()));
        if velocity.shape() != grad.shape() {
            *velocity = ArrayD::zeros(grad.raw_dim());
        }

        // v = momentum * v - lr * grad; param += v
        Zip::from(param).and(&grad).and(velocity).for_each(|p, &g, v| {
            *v = momentum * *v - lr * g;
            *p += *v;
        });
    }

    fn lr(&self) -> f32 {
        self.lr
    }

    fn name(&self) -> &'static str {
        "sgd"
    }
}
