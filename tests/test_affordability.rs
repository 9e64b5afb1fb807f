//! DSR computation, classification bands and the affordable repayment cap.

mod common;

use common::assert_close;
use dsr_sdk::engine::{
    AffordabilityEngine, DsrThresholds, HEALTHY_RATIO_CEILING, MODERATE_DSR_THRESHOLD,
    RISKY_DSR_THRESHOLD, SATURATED_DSR_PERCENTAGE,
};
use dsr_sdk::{Commitments, DsrStatus};

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

#[test]
fn classify_bands() {
    let thresholds = DsrThresholds::default();
    assert_eq!(thresholds.classify(0.0), DsrStatus::Healthy);
    assert_eq!(thresholds.classify(59.99), DsrStatus::Healthy);
    assert_eq!(thresholds.classify(65.0), DsrStatus::Moderate);
    assert_eq!(thresholds.classify(69.99), DsrStatus::Moderate);
    assert_eq!(thresholds.classify(120.0), DsrStatus::Risky);
}

#[test]
fn thresholds_are_inclusive_in_the_higher_band() {
    let thresholds = DsrThresholds::default();
    assert_eq!(thresholds.classify(MODERATE_DSR_THRESHOLD), DsrStatus::Moderate);
    assert_eq!(thresholds.classify(RISKY_DSR_THRESHOLD), DsrStatus::Risky);
}

#[test]
fn default_thresholds_match_named_constants() {
    let thresholds = DsrThresholds::default();
    assert_eq!(thresholds.moderate, MODERATE_DSR_THRESHOLD);
    assert_eq!(thresholds.risky, RISKY_DSR_THRESHOLD);
    assert_eq!(
        AffordabilityEngine::default().healthy_ratio_ceiling(),
        HEALTHY_RATIO_CEILING
    );
}

#[test]
fn thresholds_validate_ordering() {
    assert!(DsrThresholds::default().validate().is_ok());
    let inverted = DsrThresholds {
        moderate: 70.0,
        risky: 60.0,
    };
    assert!(inverted.validate().is_err());
}

// ---------------------------------------------------------------------------
// assess
// ---------------------------------------------------------------------------

#[test]
fn assess_typical_applicant() {
    let engine = AffordabilityEngine::default();
    let a = engine.assess(4_785.0, &Commitments::new(800.0, 1_200.0));
    assert_close(a.total_commitments, 2_000.0);
    assert_close(a.dsr_percentage, 41.8);
    assert_close(a.max_affordable_repayment, 2_549.5);
    assert_eq!(a.status, DsrStatus::Healthy);
}

#[test]
fn assess_moderate_and_risky() {
    let engine = AffordabilityEngine::default();
    let moderate = engine.assess(1_000.0, &Commitments::new(300.0, 350.0));
    assert_close(moderate.dsr_percentage, 65.0);
    assert_eq!(moderate.status, DsrStatus::Moderate);

    let risky = engine.assess(1_000.0, &Commitments::new(300.0, 400.0));
    assert_close(risky.dsr_percentage, 70.0);
    assert_eq!(risky.status, DsrStatus::Risky);
}

#[test]
fn zero_net_income_saturates() {
    let engine = AffordabilityEngine::default();
    let a = engine.assess(0.0, &Commitments::new(500.0, 1_000.0));
    assert_eq!(a.dsr_percentage, SATURATED_DSR_PERCENTAGE);
    assert!(a.dsr_percentage.is_finite());
    assert_eq!(a.status, DsrStatus::Risky);
    assert_eq!(a.max_affordable_repayment, 0.0);
    assert_close(a.total_commitments, 1_500.0);
}

#[test]
fn negative_net_income_saturates() {
    let a = AffordabilityEngine::default().assess(-10.0, &Commitments::new(0.0, 100.0));
    assert_eq!(a.dsr_percentage, SATURATED_DSR_PERCENTAGE);
    assert_eq!(a.status, DsrStatus::Risky);
}

#[test]
fn tiny_net_income_is_capped_at_saturation() {
    let a = AffordabilityEngine::default().assess(0.01, &Commitments::new(0.0, 1_000_000.0));
    assert_eq!(a.dsr_percentage, SATURATED_DSR_PERCENTAGE);
    assert_eq!(a.status, DsrStatus::Risky);
}

#[test]
fn max_repayment_floored_when_existing_loans_exceed_ceiling() {
    let a = AffordabilityEngine::default().assess(1_000.0, &Commitments::new(800.0, 0.0));
    assert_eq!(a.max_affordable_repayment, 0.0);
    assert_close(a.dsr_percentage, 80.0);
}

#[test]
fn max_repayment_never_exceeds_ceiling_share_of_net() {
    let engine = AffordabilityEngine::default();
    for step in 1..=100 {
        let net = step as f64 * 123.45;
        for existing in [0.0, 50.0, net * 0.3, net] {
            let a = engine.assess(net, &Commitments::new(existing, 0.0));
            assert!(a.max_affordable_repayment <= net * HEALTHY_RATIO_CEILING);
            assert!(a.max_affordable_repayment >= 0.0);
        }
    }
}

#[test]
fn dsr_monotonic_in_commitments_and_net_income() {
    let engine = AffordabilityEngine::default();

    let mut previous = 0.0;
    for step in 0..50 {
        let a = engine.assess(5_000.0, &Commitments::new(0.0, step as f64 * 100.0));
        assert!(a.dsr_percentage >= previous);
        previous = a.dsr_percentage;
    }

    let mut previous = f64::INFINITY;
    for step in 1..50 {
        let a = engine.assess(step as f64 * 500.0, &Commitments::new(1_000.0, 1_000.0));
        assert!(a.dsr_percentage <= previous);
        previous = a.dsr_percentage;
    }
}

#[test]
fn custom_ceiling_and_thresholds() {
    let engine = AffordabilityEngine::new(
        0.5,
        DsrThresholds {
            moderate: 30.0,
            risky: 50.0,
        },
    );
    let a = engine.assess(2_000.0, &Commitments::new(200.0, 500.0));
    assert_close(a.dsr_percentage, 35.0);
    assert_eq!(a.status, DsrStatus::Moderate);
    assert_close(a.max_affordable_repayment, 800.0);
}

#[test]
fn assess_is_deterministic() {
    let engine = AffordabilityEngine::default();
    let commitments = Commitments::new(1_234.56, 2_345.67);
    assert_eq!(
        engine.assess(7_654.32, &commitments),
        engine.assess(7_654.32, &commitments)
    );
}
