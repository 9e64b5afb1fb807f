//! DSR SDK for Rust.
//!
//! Estimates whether a home buyer can afford a new loan. An income profile is
//! normalized into the local currency (converting foreign income through a
//! cached live exchange rate), statutory deductions are estimated for its
//! jurisdiction, and the resulting net income is compared against monthly
//! debt commitments to give a debt-service ratio (DSR), a risk status and the
//! largest repayment that keeps the ratio healthy.
//!
//! # Quick start
//!
//! ```no_run
//! use dsr_sdk::{Commitments, DsrSdk, IncomeProfile, Jurisdiction};
//!
//! let sdk = DsrSdk::builder().build().unwrap();
//!
//! let income = IncomeProfile::new(5000.0, 500.0, 0.0, Jurisdiction::Malaysia);
//! let commitments = Commitments::new(800.0, 1200.0);
//! let result = sdk.calculate(&income, &commitments);
//! println!("{} at {:.2}%", result.status, result.dsr_percentage);
//!
//! // How large a loan the affordable instalment supports
//! let max_loan = sdk.max_loan(&result);
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod mortgage;
pub mod rates;

#[cfg(feature = "async")]
pub use async_client::AsyncDsrSdk;
pub use cache::RateCache;
pub use config::CalculatorConfig;
pub use engine::DsrCalculator;
pub use error::{DsrError, Result};
pub use models::{
    AppliedRate, Commitments, DeductionBreakdown, DsrResult, DsrStatus, IncomeProfile,
    Jurisdiction, RateSource,
};
pub use mortgage::MortgageCalculator;
pub use rates::{
    CachedRateProvider, CurrencyPair, ExchangeRateProvider, HttpRateProvider, StaticRateProvider,
    UnavailableRateProvider,
};

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use engine::IncomeNormalizer;

// ---------------------------------------------------------------------------
// DsrSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`DsrSdk`] instance.
///
/// Use [`DsrSdk::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](DsrSdkBuilder::build) to create the SDK.
pub struct DsrSdkBuilder {
    cache_dir: Option<PathBuf>,
    persist_cache: bool,
    offline: bool,
    timeout: Duration,
    refresh_interval: Duration,
    rate_api_url: String,
    config: CalculatorConfig,
    rate_provider: Option<Box<dyn ExchangeRateProvider>>,
}

impl Default for DsrSdkBuilder {
    fn default() -> Self {
        Self {
            cache_dir: None,
            persist_cache: true,
            offline: false,
            timeout: config::DEFAULT_TIMEOUT,
            refresh_interval: config::DEFAULT_REFRESH_INTERVAL,
            rate_api_url: config::RATE_API_BASE.to_string(),
            config: CalculatorConfig::default(),
            rate_provider: None,
        }
    }
}

impl DsrSdkBuilder {
    /// Set a custom directory for the persisted exchange-rate cache.
    ///
    /// If not set, the platform-appropriate default cache directory is used
    /// (e.g. `~/.cache/dsr-sdk` on Linux).
    pub fn cache_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.cache_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Keep exchange rates in memory only. Defaults to persisting them.
    pub fn in_memory_cache(mut self) -> Self {
        self.persist_cache = false;
        self
    }

    /// Enable or disable offline mode.
    ///
    /// When offline, the SDK never contacts the rate source and serves
    /// previously cached rates regardless of age; without one, foreign
    /// incomes are converted at the fallback rate. Defaults to `false`.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Set the HTTP request timeout for rate fetches.
    ///
    /// Defaults to 10 seconds. A timed-out fetch falls back like any other failure.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// How long a fetched rate is reused before refetching. Defaults to one hour.
    pub fn refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    /// Point the built-in HTTP provider at another latest-rates endpoint.
    pub fn rate_api_url(mut self, url: &str) -> Self {
        self.rate_api_url = url.to_string();
        self
    }

    /// Replace the calculator constants and deduction tables.
    pub fn config(mut self, config: CalculatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Use `provider` as the rate source instead of HTTP.
    ///
    /// The provider is still fronted by the SDK's rate cache.
    pub fn rate_provider<P: ExchangeRateProvider + 'static>(mut self, provider: P) -> Self {
        self.rate_provider = Some(Box::new(provider));
        self
    }

    /// Build the SDK, validating the configuration and opening the rate cache.
    ///
    /// No network request is made here; rates are fetched lazily on the first
    /// foreign-currency calculation.
    pub fn build(self) -> Result<DsrSdk> {
        self.config.validate()?;

        let cache = if self.persist_cache {
            RateCache::new(self.cache_dir, self.refresh_interval)?
        } else {
            RateCache::in_memory(self.refresh_interval)
        };
        let source = match self.rate_provider {
            Some(provider) => provider,
            None => Box::new(HttpRateProvider::with_base_url(
                &self.rate_api_url,
                self.timeout,
            )),
        };
        let rates = CachedRateProvider::new(source, cache).offline(self.offline);

        Ok(DsrSdk {
            calculator: DsrCalculator::from_config(&self.config),
            mortgage: MortgageCalculator::new(self.config.mortgage.clone()),
            config: self.config,
            rates: Box::new(rates),
        })
    }
}

// ---------------------------------------------------------------------------
// DsrSdk
// ---------------------------------------------------------------------------

/// The main entry point for the DSR SDK.
///
/// Owns the calculator configuration and the cached rate provider. Every
/// calculation is independent; the SDK can be shared across threads.
///
/// Created via [`DsrSdk::builder()`].
pub struct DsrSdk {
    config: CalculatorConfig,
    calculator: DsrCalculator,
    mortgage: MortgageCalculator,
    rates: Box<dyn ExchangeRateProvider>,
}

impl DsrSdk {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> DsrSdkBuilder {
        DsrSdkBuilder::default()
    }

    /// Compute the DSR result for one applicant.
    ///
    /// Never fails: an unavailable exchange rate degrades to the fallback
    /// (see `breakdown.rate_source`) and a zero net income to a saturated,
    /// `Risky` result.
    pub fn calculate(&self, income: &IncomeProfile, commitments: &Commitments) -> DsrResult {
        self.calculator
            .calculate(self.rates.as_ref(), income, commitments)
    }

    /// Rate currently applied to `jurisdiction`'s income, or `None` for the
    /// local jurisdiction.
    pub fn exchange_rate(&self, jurisdiction: Jurisdiction) -> Option<AppliedRate> {
        IncomeNormalizer::new(self.rates.as_ref(), self.config.fallback_exchange_rate)
            .resolve_rate(jurisdiction)
    }

    /// Largest loan the result's affordable repayment supports, using the
    /// configured tenure and interest rate.
    pub fn max_loan(&self, result: &DsrResult) -> f64 {
        self.mortgage.max_loan(result.max_affordable_repayment)
    }

    pub fn calculator(&self) -> &DsrCalculator {
        &self.calculator
    }

    pub fn mortgage(&self) -> &MortgageCalculator {
        &self.mortgage
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    pub fn rates(&self) -> &dyn ExchangeRateProvider {
        self.rates.as_ref()
    }

    /// Discard cached exchange rates so the next conversion refetches.
    pub fn refresh(&self) -> Result<()> {
        self.rates.invalidate()
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for DsrSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DsrSdk(healthy_ratio_ceiling={}, thresholds={}/{}, fallback_rate={})",
            self.config.healthy_ratio_ceiling,
            self.config.thresholds.moderate,
            self.config.thresholds.risky,
            self.config.fallback_exchange_rate
        )
    }
}
