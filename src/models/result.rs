use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DsrStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DsrStatus {
    Healthy,
    Moderate,
    Risky,
}

impl fmt::Display for DsrStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DsrStatus::Healthy => write!(f, "Healthy"),
            DsrStatus::Moderate => write!(f, "Moderate"),
            DsrStatus::Risky => write!(f, "Risky"),
        }
    }
}

// ---------------------------------------------------------------------------
// AppliedRate: Exchange rate used to convert a foreign income
// ---------------------------------------------------------------------------

/// Where an applied exchange rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RateSource {
    /// Returned by the rate provider, or from its cache within the refresh
    /// interval.
    Live,
    /// A cached rate older than the refresh interval, served while offline.
    Stale,
    /// The provider failed and the configured fallback constant was used.
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedRate {
    pub rate: f64,
    pub source: RateSource,
}

impl AppliedRate {
    pub fn is_fallback(&self) -> bool {
        self.source == RateSource::Fallback
    }
}

// ---------------------------------------------------------------------------
// DeductionBreakdown
// ---------------------------------------------------------------------------

/// Statutory deductions in the local currency.
///
/// `exchange_rate_used` and `rate_source` are only present for profiles from
/// the foreign jurisdiction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeductionBreakdown {
    pub retirement: f64,
    pub social_security: f64,
    pub tax: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub exchange_rate_used: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub rate_source: Option<RateSource>,
}

impl DeductionBreakdown {
    pub fn total(&self) -> f64 {
        self.retirement + self.social_security + self.tax
    }
}

// ---------------------------------------------------------------------------
// DsrResult
// ---------------------------------------------------------------------------

/// Outcome of one affordability calculation. Currency figures are in the
/// local currency, rounded to cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DsrResult {
    pub gross_income: f64,
    pub net_income: f64,
    pub total_commitments: f64,
    pub dsr_percentage: f64,
    /// Largest new instalment that keeps commitments within the healthy ceiling.
    pub max_affordable_repayment: f64,
    pub status: DsrStatus,
    pub breakdown: DeductionBreakdown,
}
