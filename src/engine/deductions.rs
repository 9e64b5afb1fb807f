//! Statutory deduction estimates: retirement fund, social security, withholding tax.

use serde::{Deserialize, Serialize};

use super::brackets::round_cents;
use super::rules::JurisdictionRules;
use crate::models::Jurisdiction;

/// Deductions and resulting net income, in the currency the gross was given in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deductions {
    pub retirement: f64,
    pub social_security: f64,
    pub tax: f64,
    pub net_income: f64,
}

impl Deductions {
    pub fn total(&self) -> f64 {
        self.retirement + self.social_security + self.tax
    }
}

/// Applies one jurisdiction's rules per profile; rules of the other
/// jurisdiction never contribute.
#[derive(Debug, Clone, PartialEq)]
pub struct StatutoryDeductionEstimator {
    malaysia: JurisdictionRules,
    singapore: JurisdictionRules,
}

impl Default for StatutoryDeductionEstimator {
    fn default() -> Self {
        Self::new(JurisdictionRules::malaysia(), JurisdictionRules::singapore())
    }
}

impl StatutoryDeductionEstimator {
    pub fn new(malaysia: JurisdictionRules, singapore: JurisdictionRules) -> Self {
        Self {
            malaysia,
            singapore,
        }
    }

    pub fn rules(&self, jurisdiction: Jurisdiction) -> &JurisdictionRules {
        match jurisdiction {
            Jurisdiction::Malaysia => &self.malaysia,
            Jurisdiction::Singapore => &self.singapore,
        }
    }

    /// Estimate deductions on a monthly `gross` in `jurisdiction`'s currency.
    ///
    /// Each component is rounded to cents before net income is derived, and
    /// net income never drops below zero.
    pub fn estimate(&self, gross: f64, jurisdiction: Jurisdiction) -> Deductions {
        let rules = self.rules(jurisdiction);

        let retirement_raw = rules.retirement.contribution(gross);
        let social_security = round_cents(rules.social_security(gross));

        let taxable = if rules.tax.relieve_retirement {
            (gross - retirement_raw).max(0.0)
        } else {
            gross
        };
        let tax = round_cents(rules.tax.schedule.apply(taxable));
        let retirement = round_cents(retirement_raw);

        let net_income = round_cents((gross - retirement - social_security - tax).max(0.0));

        Deductions {
            retirement,
            social_security,
            tax,
            net_income,
        }
    }
}
