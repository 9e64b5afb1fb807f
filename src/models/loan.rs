use serde::{Deserialize, Serialize};

use super::income::check_amount;
use crate::config::MAX_TENURE_YEARS;
use crate::error::{DsrError, Result};

// ---------------------------------------------------------------------------
// DeveloperDiscounts: Fees absorbed by the developer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeveloperDiscounts {
    pub spa_legal_fee: bool,
    pub spa_stamp_duty: bool,
    pub loan_legal_fee: bool,
    pub loan_stamp_duty: bool,
}

// ---------------------------------------------------------------------------
// LoanParameters: Purchase and financing inputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanParameters {
    /// Sale and purchase agreement price.
    pub spa_price: f64,
    pub down_payment_percent: f64,
    pub interest_rate_percent: f64,
    pub tenure_years: u32,
    #[serde(default)]
    pub rebate: f64,
    #[serde(default)]
    pub developer_discounts: DeveloperDiscounts,
    /// Built-up area in square feet.
    #[serde(default)]
    pub sqft: f64,
    /// Monthly sinking fund and maintenance charge per square foot.
    #[serde(default)]
    pub sinking_fund_rate: f64,
}

impl LoanParameters {
    pub fn new(
        spa_price: f64,
        down_payment_percent: f64,
        interest_rate_percent: f64,
        tenure_years: u32,
    ) -> Self {
        Self {
            spa_price,
            down_payment_percent,
            interest_rate_percent,
            tenure_years,
            rebate: 0.0,
            developer_discounts: DeveloperDiscounts::default(),
            sqft: 0.0,
            sinking_fund_rate: 0.0,
        }
    }

    pub fn with_rebate(mut self, rebate: f64) -> Self {
        self.rebate = rebate;
        self
    }

    pub fn with_discounts(mut self, discounts: DeveloperDiscounts) -> Self {
        self.developer_discounts = discounts;
        self
    }

    pub fn with_sinking_fund(mut self, sqft: f64, rate_per_sqft: f64) -> Self {
        self.sqft = sqft;
        self.sinking_fund_rate = rate_per_sqft;
        self
    }

    pub fn down_payment(&self) -> f64 {
        self.spa_price * self.down_payment_percent / 100.0
    }

    pub fn loan_amount(&self) -> f64 {
        self.spa_price - self.down_payment()
    }

    pub fn total_months(&self) -> u32 {
        self.tenure_years.saturating_mul(12)
    }

    pub fn monthly_sinking_fund(&self) -> f64 {
        self.sqft * self.sinking_fund_rate
    }

    /// Reject non-finite or negative amounts, a down payment outside
    /// `0..=100` percent and a tenure outside `1..=MAX_TENURE_YEARS`.
    pub fn validate(&self) -> Result<()> {
        check_amount("spaPrice", self.spa_price)?;
        check_amount("interestRatePercent", self.interest_rate_percent)?;
        check_amount("rebate", self.rebate)?;
        check_amount("sqft", self.sqft)?;
        check_amount("sinkingFundRate", self.sinking_fund_rate)?;
        if !(0.0..=100.0).contains(&self.down_payment_percent) {
            return Err(DsrError::InvalidArgument(format!(
                "downPaymentPercent must be between 0 and 100, got {}",
                self.down_payment_percent
            )));
        }
        if !(1..=MAX_TENURE_YEARS).contains(&self.tenure_years) {
            return Err(DsrError::InvalidArgument(format!(
                "tenureYears must be between 1 and {}, got {}",
                MAX_TENURE_YEARS, self.tenure_years
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// LoanSummary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanSummary {
    pub loan_amount: f64,
    pub down_payment: f64,
    pub monthly_instalment: f64,
    pub total_payment: f64,
    pub total_interest: f64,
    pub spa_legal_fee: f64,
    pub loan_legal_fee: f64,
    pub spa_stamp_duty: f64,
    pub loan_stamp_duty: f64,
    pub disbursement_estimate: f64,
    pub cash_required: f64,
    /// Recurring charge, not part of `cash_required`.
    pub monthly_sinking_fund: f64,
    pub total_months: u32,
}

// ---------------------------------------------------------------------------
// AmortizationRow
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationRow {
    /// 1-based loan year.
    pub year: u32,
    /// 1-based month within the loan year.
    pub month: u32,
    pub principal: f64,
    pub interest: f64,
    pub total: f64,
    pub balance: f64,
}
