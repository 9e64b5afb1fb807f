//! Debt-service-ratio computation and risk classification.

use serde::{Deserialize, Serialize};

use super::brackets::round_cents;
use crate::error::{DsrError, Result};
use crate::models::{Commitments, DsrStatus};

/// DSR at or above which a profile is `Moderate`.
pub const MODERATE_DSR_THRESHOLD: f64 = 60.0;
/// DSR at or above which a profile is `Risky`.
pub const RISKY_DSR_THRESHOLD: f64 = 70.0;
/// Fraction of net income that commitments may take up and remain healthy.
pub const HEALTHY_RATIO_CEILING: f64 = 0.70;
/// Reported DSR when there is no net income to service debt, and the cap for
/// every other DSR figure.
pub const SATURATED_DSR_PERCENTAGE: f64 = 999.99;

// ---------------------------------------------------------------------------
// DsrThresholds
// ---------------------------------------------------------------------------

/// Band boundaries, each inclusive in the higher band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DsrThresholds {
    pub moderate: f64,
    pub risky: f64,
}

impl Default for DsrThresholds {
    fn default() -> Self {
        Self {
            moderate: MODERATE_DSR_THRESHOLD,
            risky: RISKY_DSR_THRESHOLD,
        }
    }
}

impl DsrThresholds {
    pub fn classify(&self, dsr_percentage: f64) -> DsrStatus {
        if dsr_percentage >= self.risky {
            DsrStatus::Risky
        } else if dsr_percentage >= self.moderate {
            DsrStatus::Moderate
        } else {
            DsrStatus::Healthy
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.moderate.is_finite() && self.risky.is_finite())
            || self.moderate <= 0.0
            || self.moderate >= self.risky
        {
            return Err(DsrError::InvalidArgument(format!(
                "thresholds must satisfy 0 < moderate < risky, got {} / {}",
                self.moderate, self.risky
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// AffordabilityEngine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Affordability {
    pub total_commitments: f64,
    pub dsr_percentage: f64,
    pub max_affordable_repayment: f64,
    pub status: DsrStatus,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffordabilityEngine {
    healthy_ratio_ceiling: f64,
    thresholds: DsrThresholds,
}

impl Default for AffordabilityEngine {
    fn default() -> Self {
        Self::new(HEALTHY_RATIO_CEILING, DsrThresholds::default())
    }
}

impl AffordabilityEngine {
    pub fn new(healthy_ratio_ceiling: f64, thresholds: DsrThresholds) -> Self {
        Self {
            healthy_ratio_ceiling,
            thresholds,
        }
    }

    pub fn thresholds(&self) -> DsrThresholds {
        self.thresholds
    }

    pub fn healthy_ratio_ceiling(&self) -> f64 {
        self.healthy_ratio_ceiling
    }

    /// Assess `commitments` against a monthly `net_income`.
    ///
    /// A non-positive net income yields a saturated, `Risky` result.
    pub fn assess(&self, net_income: f64, commitments: &Commitments) -> Affordability {
        let total_commitments = round_cents(commitments.total());

        if net_income <= 0.0 {
            return Affordability {
                total_commitments,
                dsr_percentage: SATURATED_DSR_PERCENTAGE,
                max_affordable_repayment: 0.0,
                status: DsrStatus::Risky,
            };
        }

        let dsr_percentage =
            round_cents(total_commitments / net_income * 100.0).min(SATURATED_DSR_PERCENTAGE);
        let ceiling = net_income * self.healthy_ratio_ceiling;
        let max_affordable_repayment =
            round_cents((ceiling - commitments.existing_loans).max(0.0)).min(ceiling);

        Affordability {
            total_commitments,
            dsr_percentage,
            max_affordable_repayment,
            status: self.thresholds.classify(dsr_percentage),
        }
    }
}
