//! Property-based tests for configuration validation

use super::error::ValidationError;
use super::validator::validate_config;
use crate::config::schema::*;
use proptest::prelude::*;

fn arb_valid_spec() -> impl Strategy<Value = OccamSpec> {
    (
        1usize..2048,  // hidden_units
        1usize..100,   // epochs
        1usize..256,   // batch_size
        0.01f64..0.99, // keep_fraction
        0.0f64..0.9,   // holdback
        1e-6f32..1.0,  // lr
    )
        .prop_map(|(hidden_units, epochs, batch_size, keep_fraction, holdback, lr)| {
            let mut spec = OccamSpec::default();
            spec.model.hidden_units = hidden_units;
            spec.training.epochs = epochs;
            spec.data.batch_size = batch_size;
            spec.data.holdback = holdback;
            spec.occam.keep_fraction = keep_fraction;
            spec.optimizer.lr = lr;
            spec
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_valid_spec_passes(spec in arb_valid_spec()) {
        prop_assert!(validate_config(&spec).is_ok());
    }

    #[test]
    fn prop_keep_fraction_above_one_fails(spec in arb_valid_spec(), keep in 1.0f64..10.0) {
        let mut spec = spec;
        spec.occam.keep_fraction = keep;
        prop_assert!(matches!(
            validate_config(&spec),
            Err(ValidationError::InvalidKeepFraction(_))
        ));
    }

    #[test]
    fn prop_holdback_at_or_above_one_fails(spec in arb_valid_spec(), holdback in 1.0f64..5.0) {
        let mut spec = spec;
        spec.data.holdback = holdback;
        prop_assert!(matches!(
            validate_config(&spec),
            Err(ValidationError::InvalidHoldback(_))
        ));
    }

    #[test]
    fn prop_zero_epochs_fails(spec in arb_valid_spec()) {
        let mut spec = spec;
        spec.training.epochs = 0;
        prop_assert_eq!(validate_config(&spec), Err(ValidationError::InvalidEpochs(0)));
    }
}
