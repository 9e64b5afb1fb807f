//! Affordability calculation components.
//!
//! [`DsrCalculator`] chains the three stages; each stage is usable on its own:
//! [`IncomeNormalizer`] (currency), [`StatutoryDeductionEstimator`]
//! (deductions and net income) and [`AffordabilityEngine`] (DSR and status).

pub mod affordability;
pub mod brackets;
pub mod calculator;
pub mod deductions;
pub mod normalizer;
pub mod rules;

pub use affordability::{
    Affordability, AffordabilityEngine, DsrThresholds, HEALTHY_RATIO_CEILING,
    MODERATE_DSR_THRESHOLD, RISKY_DSR_THRESHOLD, SATURATED_DSR_PERCENTAGE,
};
pub use brackets::{round_cents, Bracket, ProgressiveSchedule};
pub use calculator::DsrCalculator;
pub use deductions::{Deductions, StatutoryDeductionEstimator};
pub use normalizer::{IncomeNormalizer, NormalizedIncome};
pub use rules::{Contribution, JurisdictionRules, RetirementRule, SocialSecurityBracket, TaxRule};
