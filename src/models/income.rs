use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DsrError, Result};

/// Share of an outstanding credit-card balance counted as a monthly commitment.
pub const CREDIT_CARD_COMMITMENT_RATE: f64 = 0.05;

// ---------------------------------------------------------------------------
// Jurisdiction
// ---------------------------------------------------------------------------

/// Regulatory region whose deduction rules and currency apply to an income.
///
/// Malaysia is the local jurisdiction: results are reported in MYR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Jurisdiction {
    Malaysia,
    Singapore,
}

impl Jurisdiction {
    /// The jurisdiction whose currency results are reported in.
    pub const LOCAL: Jurisdiction = Jurisdiction::Malaysia;

    /// ISO 4217 code of the jurisdiction's currency.
    pub fn currency(self) -> &'static str {
        match self {
            Jurisdiction::Malaysia => "MYR",
            Jurisdiction::Singapore => "SGD",
        }
    }

    pub fn is_local(self) -> bool {
        self == Self::LOCAL
    }
}

impl fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Jurisdiction::Malaysia => write!(f, "Malaysia"),
            Jurisdiction::Singapore => write!(f, "Singapore"),
        }
    }
}

// ---------------------------------------------------------------------------
// IncomeProfile
// ---------------------------------------------------------------------------

/// Monthly income of an applicant, in the currency of `jurisdiction`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeProfile {
    pub basic_salary: f64,
    pub fixed_allowance: f64,
    /// Commission, overtime and bonus, as a monthly equivalent.
    pub non_fixed_income: f64,
    pub jurisdiction: Jurisdiction,
}

impl IncomeProfile {
    pub fn new(
        basic_salary: f64,
        fixed_allowance: f64,
        non_fixed_income: f64,
        jurisdiction: Jurisdiction,
    ) -> Self {
        Self {
            basic_salary,
            fixed_allowance,
            non_fixed_income,
            jurisdiction,
        }
    }

    /// Sum of all income components in the profile's own currency.
    pub fn total(&self) -> f64 {
        self.basic_salary + self.fixed_allowance + self.non_fixed_income
    }

    /// Reject negative or non-finite amounts.
    ///
    /// The calculator itself never calls this; inputs are expected to be
    /// validated where they are collected.
    pub fn validate(&self) -> Result<()> {
        check_amount("basicSalary", self.basic_salary)?;
        check_amount("fixedAllowance", self.fixed_allowance)?;
        check_amount("nonFixedIncome", self.non_fixed_income)
    }
}

/// Monthly equivalent of an annual bonus, commission or overtime figure.
pub fn non_fixed_from_annual(annual: f64) -> f64 {
    annual / 12.0
}

/// Portion of variable income a lender recognises, given as a percentage
/// (e.g. `80.0` for 80%). Percentages outside `0..=100` are clamped.
pub fn recognized_variable_income(amount: f64, recognition_percent: f64) -> f64 {
    amount * recognition_percent.clamp(0.0, 100.0) / 100.0
}

// ---------------------------------------------------------------------------
// Commitments
// ---------------------------------------------------------------------------

/// Monthly debt obligations in the local currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commitments {
    /// Car, personal, study and existing housing loans.
    pub existing_loans: f64,
    /// Estimated instalment of the loan being applied for.
    pub new_loan_repayment: f64,
}

impl Commitments {
    pub fn new(existing_loans: f64, new_loan_repayment: f64) -> Self {
        Self {
            existing_loans,
            new_loan_repayment,
        }
    }

    pub fn total(&self) -> f64 {
        self.existing_loans + self.new_loan_repayment
    }

    pub fn validate(&self) -> Result<()> {
        check_amount("existingLoans", self.existing_loans)?;
        check_amount("newLoanRepayment", self.new_loan_repayment)
    }
}

/// Monthly commitment attributed to an outstanding credit-card balance.
pub fn credit_card_commitment(balance: f64) -> f64 {
    balance * CREDIT_CARD_COMMITMENT_RATE
}

pub(crate) fn check_amount(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(DsrError::InvalidArgument(format!(
            "{} must be a finite, non-negative amount, got {}",
            field, value
        )));
    }
    Ok(())
}
