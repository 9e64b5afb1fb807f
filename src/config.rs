use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::engine::affordability::{
    DsrThresholds, HEALTHY_RATIO_CEILING, MODERATE_DSR_THRESHOLD, RISKY_DSR_THRESHOLD,
};
use crate::engine::rules::JurisdictionRules;
use crate::error::{DsrError, Result};
use crate::models::Jurisdiction;

pub const RATE_API_BASE: &str = "https://open.er-api.com/v6/latest";
pub const RATE_CACHE_FILE: &str = "exchange_rates.json";

/// Local-currency units per one foreign unit, used whenever no live rate is available.
pub const DEFAULT_FOREIGN_EXCHANGE_RATE: f64 = 3.5;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(3600);

pub const DEFAULT_LOAN_TENURE_YEARS: u32 = 35;
pub const DEFAULT_INTEREST_RATE_PERCENT: f64 = 4.4;
/// Longest loan tenure accepted by validation.
pub const MAX_TENURE_YEARS: u32 = 100;

pub fn default_cache_dir() -> PathBuf {
    if let Some(cache) = dirs::cache_dir() {
        cache.join("dsr-sdk")
    } else {
        PathBuf::from(".dsr-sdk-cache")
    }
}

// ---------------------------------------------------------------------------
// MortgageDefaults
// ---------------------------------------------------------------------------

/// Tenure and interest assumed when turning an affordable instalment into a
/// maximum loan amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MortgageDefaults {
    pub tenure_years: u32,
    pub interest_rate_percent: f64,
}

impl Default for MortgageDefaults {
    fn default() -> Self {
        Self {
            tenure_years: DEFAULT_LOAN_TENURE_YEARS,
            interest_rate_percent: DEFAULT_INTEREST_RATE_PERCENT,
        }
    }
}

// ---------------------------------------------------------------------------
// CalculatorConfig
// ---------------------------------------------------------------------------

/// Tunable constants of the affordability calculation.
///
/// Every field has a default, so a stored configuration only needs to name
/// the values it overrides:
///
/// ```
/// use dsr_sdk::config::CalculatorConfig;
///
/// let config = CalculatorConfig::from_json_str(r#"{ "fallbackExchangeRate": 3.42 }"#).unwrap();
/// assert_eq!(config.fallback_exchange_rate, 3.42);
/// assert_eq!(config.healthy_ratio_ceiling, 0.70);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalculatorConfig {
    pub healthy_ratio_ceiling: f64,
    pub thresholds: DsrThresholds,
    pub fallback_exchange_rate: f64,
    pub malaysia: JurisdictionRules,
    pub singapore: JurisdictionRules,
    pub mortgage: MortgageDefaults,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            healthy_ratio_ceiling: HEALTHY_RATIO_CEILING,
            thresholds: DsrThresholds {
                moderate: MODERATE_DSR_THRESHOLD,
                risky: RISKY_DSR_THRESHOLD,
            },
            fallback_exchange_rate: DEFAULT_FOREIGN_EXCHANGE_RATE,
            malaysia: JurisdictionRules::malaysia(),
            singapore: JurisdictionRules::singapore(),
            mortgage: MortgageDefaults::default(),
        }
    }
}

impl CalculatorConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: CalculatorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&contents)
    }

    /// Deduction rules for a jurisdiction.
    pub fn rules(&self, jurisdiction: Jurisdiction) -> &JurisdictionRules {
        match jurisdiction {
            Jurisdiction::Malaysia => &self.malaysia,
            Jurisdiction::Singapore => &self.singapore,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.healthy_ratio_ceiling > 0.0 && self.healthy_ratio_ceiling <= 1.0) {
            return Err(DsrError::InvalidArgument(format!(
                "healthyRatioCeiling must be in (0, 1], got {}",
                self.healthy_ratio_ceiling
            )));
        }
        if !(self.fallback_exchange_rate.is_finite() && self.fallback_exchange_rate > 0.0) {
            return Err(DsrError::InvalidArgument(format!(
                "fallbackExchangeRate must be a positive number, got {}",
                self.fallback_exchange_rate
            )));
        }
        if !(1..=MAX_TENURE_YEARS).contains(&self.mortgage.tenure_years) {
            return Err(DsrError::InvalidArgument(format!(
                "mortgage.tenureYears must be between 1 and {}, got {}",
                MAX_TENURE_YEARS, self.mortgage.tenure_years
            )));
        }
        if !(self.mortgage.interest_rate_percent.is_finite()
            && self.mortgage.interest_rate_percent >= 0.0)
        {
            return Err(DsrError::InvalidArgument(format!(
                "mortgage.interestRatePercent must be non-negative, got {}",
                self.mortgage.interest_rate_percent
            )));
        }
        self.thresholds.validate()?;
        self.malaysia.validate("malaysia")?;
        self.singapore.validate("singapore")?;
        Ok(())
    }
}
