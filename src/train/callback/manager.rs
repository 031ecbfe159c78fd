//! Callback manager for dispatching events to multiple callbacks

use super::traits::{OccamCallback, RunContext};
use crate::error::Degeneracy;
use crate::prune::{EpochRecord, TrainReport};

/// Manages multiple callbacks and dispatches events in insertion order
#[derive(Default)]
pub struct CallbackManager {
    callbacks: Vec<Box<dyn OccamCallback>>,
}

impl CallbackManager {
    /// Create new callback manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a callback
    pub fn add<C: OccamCallback + 'static>(&mut self, callback: C) {
        self.callbacks.push(Box::new(callback));
    }

    /// Add an already boxed callback
    pub fn add_boxed(&mut self, callback: Box<dyn OccamCallback>) {
        self.callbacks.push(callback);
    }

    /// Check if no callbacks are registered
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Get number of callbacks
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    /// Names of the registered callbacks
    pub fn names(&self) -> Vec<&'static str> {
        self.callbacks.iter().map(|cb| cb.name()).collect()
    }

    /// Fire train begin event
    pub fn on_train_begin(&mut self, ctx: &RunContext) {
        for cb in &mut self.callbacks {
            cb.on_train_begin(ctx);
        }
    }

    /// Fire epoch end event
    pub fn on_epoch_end(&mut self, record: &EpochRecord) {
        for cb in &mut self.callbacks {
            cb.on_epoch_end(record);
        }
    }

    /// Fire degeneracy event
    pub fn on_degeneracy(&mut self, epoch: usize, event: &Degeneracy) {
        for cb in &mut self.callbacks {
            cb.on_degeneracy(epoch, event);
        }
    }

    /// Fire train end event
    pub fn on_train_end(&mut self, report: &TrainReport) {
        for cb in &mut self.callbacks {
            cb.on_train_end(report);
        }
    }
}

impl std::fmt::Debug for CallbackManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackManager").field("callbacks", &self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::train::callback::ProgressCallback;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    struct CountingCallback {
        degeneracies: Arc<AtomicUsize>,
    }

    impl OccamCallback for CountingCallback {
        fn on_degeneracy(&mut self, _epoch: usize, _event: &Degeneracy) {
            self.degeneracies.fetch_add(1, Ordering::SeqCst);
        }

        fn name(&self) -> &'static str {
            "CountingCallback"
        }
    }

    #[test]
    fn test_callback_manager_len_and_empty() {
        let mut manager = CallbackManager::new();
        assert!(manager.is_empty());
        assert_eq!(manager.len(), 0);

        manager.add(ProgressCallback::new(false));
        assert!(!manager.is_empty());
        assert_eq!(manager.names(), vec!["ProgressCallback"]);
    }

    #[test]
    fn test_callback_manager_dispatches_to_all() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut manager = CallbackManager::new();
        manager.add(CountingCallback { degeneracies: count.clone() });
        manager.add(CountingCallback { degeneracies: count.clone() });

        manager.on_degeneracy(3, &Degeneracy::EmptyMagnitudeSet { index: 1 });
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }
}
