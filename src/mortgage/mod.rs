//! Mortgage arithmetic: eligibility, instalments, schedules and up-front costs.
//!
//! Complements the DSR result: its `max_affordable_repayment` feeds
//! [`MortgageCalculator::max_loan`] to estimate how large a loan the
//! applicant could carry.

pub mod fees;
pub mod schedule;

pub use fees::{legal_fee, stamp_duty_loan, stamp_duty_spa, DISBURSEMENT_ESTIMATE};
pub use schedule::amortization_schedule;

use crate::config::MortgageDefaults;
use crate::engine::brackets::round_cents;
use crate::error::Result;
use crate::models::{AmortizationRow, LoanParameters, LoanSummary};

/// Present value of `tenure_years` of monthly `instalment`s, floored to the
/// nearest hundred. Non-positive instalments are worth nothing.
pub fn max_loan(instalment: f64, tenure_years: u32, annual_rate_percent: f64) -> f64 {
    if instalment <= 0.0 || tenure_years == 0 {
        return 0.0;
    }
    let r = annual_rate_percent / 100.0 / 12.0;
    let n = f64::from(tenure_years) * 12.0;
    let pv = if r > 0.0 {
        instalment * (1.0 - (1.0 + r).powf(-n)) / r
    } else {
        instalment * n
    };
    (pv / 100.0).floor() * 100.0
}

/// Level monthly payment amortizing `principal` over `tenure_years`.
pub fn monthly_instalment(principal: f64, annual_rate_percent: f64, tenure_years: u32) -> f64 {
    let total_months = f64::from(tenure_years) * 12.0;
    if total_months == 0.0 {
        return principal;
    }
    let r = annual_rate_percent / 100.0 / 12.0;
    if r > 0.0 {
        principal * r / (1.0 - (1.0 + r).powf(-total_months))
    } else {
        principal / total_months
    }
}

// ---------------------------------------------------------------------------
// MortgageCalculator
// ---------------------------------------------------------------------------

/// Mortgage helpers bound to a default tenure and interest rate.
#[derive(Debug, Clone, PartialEq)]
pub struct MortgageCalculator {
    defaults: MortgageDefaults,
}

impl Default for MortgageCalculator {
    fn default() -> Self {
        Self::new(MortgageDefaults::default())
    }
}

impl MortgageCalculator {
    pub fn new(defaults: MortgageDefaults) -> Self {
        Self { defaults }
    }

    pub fn defaults(&self) -> &MortgageDefaults {
        &self.defaults
    }

    /// Largest loan an `instalment` supports at the default tenure and rate.
    pub fn max_loan(&self, instalment: f64) -> f64 {
        max_loan(
            instalment,
            self.defaults.tenure_years,
            self.defaults.interest_rate_percent,
        )
    }

    /// Amortization schedule for validated loan parameters.
    pub fn schedule(&self, params: &LoanParameters) -> Result<Vec<AmortizationRow>> {
        params.validate()?;
        Ok(amortization_schedule(
            params.loan_amount(),
            params.interest_rate_percent,
            params.tenure_years,
        ))
    }

    /// Instalment, totals and cash needed to complete a purchase.
    ///
    /// Fees the developer absorbs are reported as zero. Cash required never
    /// drops below zero, however large the rebate. Parameters are validated
    /// first.
    pub fn summary(&self, params: &LoanParameters) -> Result<LoanSummary> {
        params.validate()?;
        let down_payment = params.down_payment();
        let loan_amount = params.loan_amount();
        let total_months = params.total_months();

        let instalment =
            monthly_instalment(loan_amount, params.interest_rate_percent, params.tenure_years);
        let total_payment = instalment * f64::from(total_months);
        let total_interest = total_payment - loan_amount;

        let discounts = &params.developer_discounts;
        let waived = |absorbed: bool, fee: f64| if absorbed { 0.0 } else { fee };
        let spa_legal_fee = waived(discounts.spa_legal_fee, legal_fee(params.spa_price));
        let loan_legal_fee = waived(discounts.loan_legal_fee, legal_fee(loan_amount));
        let spa_stamp_duty = waived(discounts.spa_stamp_duty, stamp_duty_spa(params.spa_price));
        let loan_stamp_duty = waived(discounts.loan_stamp_duty, stamp_duty_loan(loan_amount));

        let cash_required = down_payment
            + spa_legal_fee
            + loan_legal_fee
            + spa_stamp_duty
            + loan_stamp_duty
            + DISBURSEMENT_ESTIMATE
            - params.rebate;

        Ok(LoanSummary {
            loan_amount: round_cents(loan_amount),
            down_payment: round_cents(down_payment),
            monthly_instalment: round_cents(instalment),
            total_payment: round_cents(total_payment),
            total_interest: round_cents(total_interest),
            spa_legal_fee,
            loan_legal_fee,
            spa_stamp_duty,
            loan_stamp_duty,
            disbursement_estimate: DISBURSEMENT_ESTIMATE,
            cash_required: round_cents(cash_required.max(0.0)),
            monthly_sinking_fund: round_cents(params.monthly_sinking_fund()),
            total_months,
        })
    }
}
