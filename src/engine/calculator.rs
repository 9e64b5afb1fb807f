//! The full affordability pipeline: normalize, deduct, assess.

use super::affordability::AffordabilityEngine;
use super::brackets::round_cents;
use super::deductions::StatutoryDeductionEstimator;
use super::normalizer::IncomeNormalizer;
use crate::config::CalculatorConfig;
use crate::models::{Commitments, DeductionBreakdown, DsrResult, IncomeProfile};
use crate::rates::ExchangeRateProvider;

/// Stateless DSR calculator; a result depends only on the inputs of the call
/// and the rate the provider returns.
#[derive(Debug, Clone, PartialEq)]
pub struct DsrCalculator {
    deductions: StatutoryDeductionEstimator,
    affordability: AffordabilityEngine,
    fallback_rate: f64,
}

impl Default for DsrCalculator {
    fn default() -> Self {
        Self::from_config(&CalculatorConfig::default())
    }
}

impl DsrCalculator {
    pub fn new(
        deductions: StatutoryDeductionEstimator,
        affordability: AffordabilityEngine,
        fallback_rate: f64,
    ) -> Self {
        Self {
            deductions,
            affordability,
            fallback_rate,
        }
    }

    pub fn from_config(config: &CalculatorConfig) -> Self {
        Self::new(
            StatutoryDeductionEstimator::new(config.malaysia.clone(), config.singapore.clone()),
            AffordabilityEngine::new(config.healthy_ratio_ceiling, config.thresholds),
            config.fallback_exchange_rate,
        )
    }

    pub fn deductions(&self) -> &StatutoryDeductionEstimator {
        &self.deductions
    }

    pub fn affordability(&self) -> &AffordabilityEngine {
        &self.affordability
    }

    pub fn fallback_rate(&self) -> f64 {
        self.fallback_rate
    }

    /// Compute the DSR result for one applicant.
    ///
    /// Deductions are estimated in the profile's own currency and converted
    /// with the same rate as the gross, so foreign tables stay in their
    /// native units.
    pub fn calculate(
        &self,
        rates: &dyn ExchangeRateProvider,
        income: &IncomeProfile,
        commitments: &Commitments,
    ) -> DsrResult {
        let normalized = IncomeNormalizer::new(rates, self.fallback_rate).normalize(income);
        let native = self
            .deductions
            .estimate(normalized.gross_native, income.jurisdiction);

        let rate = normalized.exchange_rate.map_or(1.0, |applied| applied.rate);
        let breakdown = DeductionBreakdown {
            retirement: round_cents(native.retirement * rate),
            social_security: round_cents(native.social_security * rate),
            tax: round_cents(native.tax * rate),
            exchange_rate_used: normalized.exchange_rate.map(|applied| applied.rate),
            rate_source: normalized.exchange_rate.map(|applied| applied.source),
        };
        let net_income = round_cents((normalized.gross - breakdown.total()).max(0.0));

        let assessment = self.affordability.assess(net_income, commitments);

        DsrResult {
            gross_income: normalized.gross,
            net_income,
            total_commitments: assessment.total_commitments,
            dsr_percentage: assessment.dsr_percentage,
            max_affordable_repayment: assessment.max_affordable_repayment,
            status: assessment.status,
            breakdown,
        }
    }
}
