//! Shared fixtures for the DSR SDK integration tests.
//!
//! Provides stub rate providers that count their calls, typical income
//! profiles, and a float comparison helper.

#![allow(dead_code)]

use dsr_sdk::{
    CurrencyPair, DsrError, ExchangeRateProvider, IncomeProfile, Jurisdiction, Result,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Assert two amounts agree to within a tenth of a cent.
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-3,
        "expected {expected}, got {actual}"
    );
}

/// A rate provider returning a fixed rate (or failing) and counting calls.
///
/// Cloning shares the counter, so a test can hand one clone to the SDK and
/// keep another to inspect.
#[derive(Clone)]
pub struct CountingProvider {
    rate: Option<f64>,
    calls: Arc<AtomicUsize>,
}

impl CountingProvider {
    pub fn returning(rate: f64) -> Self {
        Self {
            rate: Some(rate),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing() -> Self {
        Self {
            rate: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ExchangeRateProvider for CountingProvider {
    fn fetch_rate(&self, pair: &CurrencyPair) -> Result<f64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.rate
            .ok_or_else(|| DsrError::RateUnavailable(format!("{pair}: stub failure")))
    }
}

pub fn malaysian(basic: f64, allowance: f64) -> IncomeProfile {
    IncomeProfile::new(basic, allowance, 0.0, Jurisdiction::Malaysia)
}

pub fn singaporean(basic: f64, allowance: f64) -> IncomeProfile {
    IncomeProfile::new(basic, allowance, 0.0, Jurisdiction::Singapore)
}

pub fn sgd_myr() -> CurrencyPair {
    CurrencyPair::new("SGD", "MYR")
}
