//! Purchase-cost scales: solicitor fees and stamp duties.

use crate::engine::brackets::{round_cents, Bracket, ProgressiveSchedule};

pub const MIN_LEGAL_FEE: f64 = 500.0;
pub const LOAN_STAMP_DUTY_RATE: f64 = 0.005;
pub const DISBURSEMENT_ESTIMATE: f64 = 2_500.0;

/// Solicitors' remuneration scale, applied to a price or a loan amount.
pub fn legal_fee_schedule() -> ProgressiveSchedule {
    ProgressiveSchedule::new(vec![
        Bracket::upto(500_000.0, 0.0125),
        Bracket::upto(7_500_000.0, 0.01),
        Bracket::above(0.009),
    ])
}

/// Memorandum-of-transfer stamp duty tiers on the purchase price.
pub fn spa_stamp_duty_schedule() -> ProgressiveSchedule {
    ProgressiveSchedule::new(vec![
        Bracket::upto(100_000.0, 0.01),
        Bracket::upto(500_000.0, 0.02),
        Bracket::upto(1_000_000.0, 0.03),
        Bracket::above(0.04),
    ])
}

pub fn legal_fee(amount: f64) -> f64 {
    round_cents(legal_fee_schedule().apply(amount)).max(MIN_LEGAL_FEE)
}

pub fn stamp_duty_spa(price: f64) -> f64 {
    round_cents(spa_stamp_duty_schedule().apply(price))
}

pub fn stamp_duty_loan(loan: f64) -> f64 {
    round_cents(loan * LOAN_STAMP_DUTY_RATE)
}
