//! End-to-end runs of the adaptive masking loop on synthetic data

use occam::config::{train_from_spec, DataSource, OccamSpec};
use occam::data::SyntheticConfig;
use occam::prune::{select_best, RATE_FLOOR_RATIO};

fn small_spec() -> OccamSpec {
    let mut spec = OccamSpec::default();
    spec.model.hidden_units = 32;
    spec.data.source = DataSource::Synthetic(SyntheticConfig {
        classes: 4,
        features: 16,
        train_samples: 512,
        test_samples: 128,
        spread: 0.5,
    });
    spec.optimizer.lr = 0.01;
    spec.output.plot = false;
    spec
}

// 16*32 + 32*4 weights plus 32 + 4 biases
const UPPER_BOUND: usize = 676;

#[test]
fn test_occam_run_reports_sparse_best_epoch() {
    let spec = small_spec();
    let report = train_from_spec(&spec, None).expect("run should succeed");

    assert_eq!(report.strategy, "occam");
    assert_eq!(report.upper_bound, UPPER_BOUND);
    assert_eq!(report.records.len(), 12);
    for (i, record) in report.records.iter().enumerate() {
        assert_eq!(record.epoch, i);
        assert_eq!(record.upper_bound, UPPER_BOUND);
        assert!(record.test.loss.is_finite());
    }
    // The first epoch trains the dense network; masking starts after it
    assert_eq!(report.records[0].active, UPPER_BOUND);
    assert!(report.records[1..].iter().all(|r| r.active < UPPER_BOUND));
    assert!(report.best_fraction() > 0.0);
    assert!(report.best_fraction() < 1.0);
    assert_eq!(select_best(&report.records), Some(&report.best));
}

#[test]
fn test_occam_keep_fraction_stays_within_bounds() {
    let spec = small_spec();
    let report = train_from_spec(&spec, None).expect("run should succeed");

    let floor = spec.occam.keep_fraction * RATE_FLOOR_RATIO;
    for record in &report.records {
        let keep = record.keep_fraction.expect("occam records carry a keep fraction");
        assert!(keep <= spec.occam.keep_fraction + 1e-12);
        assert!(keep >= floor - 1e-12);
    }
    // No curvature ratio before the window is full
    assert!(report.records[0].zeta.is_none());
    assert!(report.records[1].zeta.is_none());
}

#[test]
fn test_dense_run_keeps_every_parameter() {
    let mut spec = small_spec();
    spec.occam.enabled = false;
    spec.training.epochs = 3;
    spec.data.holdback = 0.25;

    let report = train_from_spec(&spec, None).expect("run should succeed");
    assert_eq!(report.strategy, "dense");
    assert_eq!(report.records.len(), 3);
    for record in &report.records {
        assert_eq!(record.active, UPPER_BOUND);
        assert!(record.keep_fraction.is_none());
        assert!(record.zeta.is_none());
        // Holdback is ignored without masking
        assert_eq!(record.heldback, record.train);
    }
    assert_eq!(report.best_active(), UPPER_BOUND);
}

#[test]
fn test_holdback_split_evaluated_separately() {
    let mut spec = small_spec();
    spec.training.epochs = 3;
    spec.data.holdback = 0.25;

    let report = train_from_spec(&spec, None).expect("run should succeed");
    for record in &report.records {
        assert!(record.heldback.loss.is_finite());
        assert!((0.0..=1.0).contains(&record.heldback.accuracy));
    }
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let mut spec = small_spec();
    spec.training.epochs = 4;

    let first = train_from_spec(&spec, None).expect("run should succeed");
    let second = train_from_spec(&spec, None).expect("run should succeed");
    assert_eq!(first, second);
}

#[test]
fn test_invalid_spec_is_rejected_before_training() {
    let mut spec = small_spec();
    spec.occam.keep_fraction = 0.0;
    let err = train_from_spec(&spec, None).unwrap_err();
    assert!(err.to_string().contains("keep fraction"));
}
