//! Optimizer trait

use ndarray::{ArrayViewD, ArrayViewMutD};

/// Trait for optimization algorithms
///
/// Parameters are addressed by a stable `slot` so stateful optimizers can keep
/// per-parameter moments across steps.
pub trait Optimizer: Send {
    /// Start a new optimization step (advances bias-correction counters)
    fn begin_step(&mut self) {}

    /// Update one parameter in place from its gradient
    fn update(&mut self, slot: usize, param: ArrayViewMutD<'_, f32>, grad: ArrayViewD<'_, f32>);

    /// Get learning rate
    fn lr(&self) -> f32;

    /// Optimizer name for logging
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, Zip};

    /// Minimal optimizer implementation for testing default trait methods
    struct TestOptimizer {
        learning_rate: f32,
    }

    impl Optimizer for TestOptimizer {
        fn update(&mut self, _slot: usize, param: ArrayViewMutD<'_, f32>, grad: ArrayViewD<'_, f32>) {
            let lr = self.learning_rate;
            Zip::from(param).and(grad).for_each(|p, &g| *p -= lr * g);
        }

        fn lr(&self) -> f32 {
            self.learning_rate
        }

        fn name(&self) -> &'static str {
            "test"
        }
    }

    #[test]
    fn test_optimizer_update_and_lr() {
        let mut opt = TestOptimizer { learning_rate: 0.1 };
        let mut param = arr1(&[1.0_f32, 2.0, 3.0]).into_dyn();
        let grad = arr1(&[0.5_f32, 1.0, 1.5]).into_dyn();

        opt.begin_step();
        opt.update(0, param.view_mut(), grad.view());

        assert!((param[[0]] - 0.95).abs() < 1e-6);
        assert!((param[[2]] - 2.85).abs() < 1e-6);
        assert_eq!(opt.lr(), 0.1);
    }
}
