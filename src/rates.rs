//! Exchange-rate providers.
//!
//! A provider answers one question: how many units of the quote currency buy
//! one unit of the base currency right now. Failures are ordinary `Err`
//! values; the income normalizer decides what to substitute.

use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;

use crate::cache::RateCache;
use crate::config;
use crate::error::{DsrError, Result};
use crate::models::{Jurisdiction, RateSource};

// ---------------------------------------------------------------------------
// CurrencyPair
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CurrencyPair {
    pub base: String,
    pub quote: String,
}

impl CurrencyPair {
    pub fn new(base: &str, quote: &str) -> Self {
        Self {
            base: base.to_uppercase(),
            quote: quote.to_uppercase(),
        }
    }

    /// Foreign-to-local pair for `jurisdiction`, or `None` for the local one.
    pub fn for_jurisdiction(jurisdiction: Jurisdiction) -> Option<Self> {
        if jurisdiction.is_local() {
            None
        } else {
            Some(Self::new(
                jurisdiction.currency(),
                Jurisdiction::LOCAL.currency(),
            ))
        }
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

// ---------------------------------------------------------------------------
// ExchangeRateProvider
// ---------------------------------------------------------------------------

pub trait ExchangeRateProvider: Send + Sync {
    /// Current rate for `pair`: quote-currency units per one base unit.
    fn fetch_rate(&self, pair: &CurrencyPair) -> Result<f64>;

    /// Rate for `pair` together with how current it is.
    ///
    /// Providers that always ask their source report [`RateSource::Live`].
    fn quote(&self, pair: &CurrencyPair) -> Result<(f64, RateSource)> {
        self.fetch_rate(pair).map(|rate| (rate, RateSource::Live))
    }

    /// Drop any cached state so the next fetch goes to the source.
    fn invalidate(&self) -> Result<()> {
        Ok(())
    }
}

impl<P: ExchangeRateProvider + ?Sized> ExchangeRateProvider for Box<P> {
    fn fetch_rate(&self, pair: &CurrencyPair) -> Result<f64> {
        (**self).fetch_rate(pair)
    }

    fn quote(&self, pair: &CurrencyPair) -> Result<(f64, RateSource)> {
        (**self).quote(pair)
    }

    fn invalidate(&self) -> Result<()> {
        (**self).invalidate()
    }
}

impl<P: ExchangeRateProvider + ?Sized> ExchangeRateProvider for Arc<P> {
    fn fetch_rate(&self, pair: &CurrencyPair) -> Result<f64> {
        (**self).fetch_rate(pair)
    }

    fn quote(&self, pair: &CurrencyPair) -> Result<(f64, RateSource)> {
        (**self).quote(pair)
    }

    fn invalidate(&self) -> Result<()> {
        (**self).invalidate()
    }
}

// ---------------------------------------------------------------------------
// HttpRateProvider
// ---------------------------------------------------------------------------

/// Fetches rates from an open.er-api.com style endpoint:
/// `GET {base_url}/{BASE}` returning `{"result": "success", "rates": {"MYR": 3.45, ...}}`.
pub struct HttpRateProvider {
    base_url: String,
    timeout: Duration,
    client: Mutex<Option<Client>>,
}

impl HttpRateProvider {
    pub fn new(timeout: Duration) -> Self {
        Self::with_base_url(config::RATE_API_BASE, timeout)
    }

    pub fn with_base_url(base_url: &str, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            client: Mutex::new(None),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Lazy HTTP client, created on first use.
    fn client(&self) -> Result<Client> {
        let mut slot = self.client.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(client) = slot.as_ref() {
            return Ok(client.clone());
        }
        let client = Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        *slot = Some(client.clone());
        Ok(client)
    }
}

impl ExchangeRateProvider for HttpRateProvider {
    fn fetch_rate(&self, pair: &CurrencyPair) -> Result<f64> {
        let url = format!("{}/{}", self.base_url, pair.base);
        debug!(%url, "fetching exchange rate");
        let client = self.client()?;
        let data: serde_json::Value = client.get(&url).send()?.error_for_status()?.json()?;
        parse_latest_rates(&data, pair)
    }
}

/// Extract `rates.{quote}` from a latest-rates response body.
pub fn parse_latest_rates(data: &serde_json::Value, pair: &CurrencyPair) -> Result<f64> {
    if let Some(result) = data.get("result").and_then(|v| v.as_str()) {
        if result != "success" {
            let reason = data
                .get("error-type")
                .and_then(|v| v.as_str())
                .unwrap_or(result);
            return Err(DsrError::RateUnavailable(format!("{}: {}", pair, reason)));
        }
    }
    let rate = data
        .get("rates")
        .and_then(|r| r.get(&pair.quote))
        .and_then(|v| v.as_f64())
        .ok_or_else(|| DsrError::NotFound(format!("No {} rate in response for {}", pair.quote, pair)))?;
    check_rate(pair, rate)
}

pub(crate) fn check_rate(pair: &CurrencyPair, rate: f64) -> Result<f64> {
    if rate.is_finite() && rate > 0.0 {
        Ok(rate)
    } else {
        Err(DsrError::RateUnavailable(format!(
            "{}: implausible rate {}",
            pair, rate
        )))
    }
}

// ---------------------------------------------------------------------------
// CachedRateProvider
// ---------------------------------------------------------------------------

/// Serves rates from a [`RateCache`] while they are younger than its refresh
/// interval, and asks `inner` otherwise.
///
/// Concurrent callers hitting a cold cache may each fetch; the fetch has no
/// side effects, so the last write simply wins.
pub struct CachedRateProvider<P> {
    inner: P,
    cache: RateCache,
    offline: bool,
}

impl<P: ExchangeRateProvider> CachedRateProvider<P> {
    pub fn new(inner: P, cache: RateCache) -> Self {
        Self {
            inner,
            cache,
            offline: false,
        }
    }

    /// When offline, cached entries are served regardless of age and the
    /// inner provider is never consulted.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    pub fn is_offline(&self) -> bool {
        self.offline
    }

    pub fn cache(&self) -> &RateCache {
        &self.cache
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P: ExchangeRateProvider> ExchangeRateProvider for CachedRateProvider<P> {
    fn fetch_rate(&self, pair: &CurrencyPair) -> Result<f64> {
        self.quote(pair).map(|(rate, _)| rate)
    }

    fn quote(&self, pair: &CurrencyPair) -> Result<(f64, RateSource)> {
        if let Some(entry) = self.cache.get(pair) {
            if self.cache.is_fresh(&entry) {
                debug!(%pair, rate = entry.rate, "exchange rate served from cache");
                return Ok((entry.rate, RateSource::Live));
            }
            if self.offline {
                debug!(%pair, rate = entry.rate, "offline, serving stale exchange rate");
                return Ok((entry.rate, RateSource::Stale));
            }
        }
        if self.offline {
            return Err(DsrError::Offline(pair.to_string()));
        }
        let rate = check_rate(pair, self.inner.fetch_rate(pair)?)?;
        self.cache.store(pair, rate);
        Ok((rate, RateSource::Live))
    }

    fn invalidate(&self) -> Result<()> {
        self.cache.clear()?;
        self.inner.invalidate()
    }
}

// ---------------------------------------------------------------------------
// Fixed providers
// ---------------------------------------------------------------------------

/// Always returns the same rate, for deployments that pin the conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticRateProvider {
    pub rate: f64,
}

impl StaticRateProvider {
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }
}

impl ExchangeRateProvider for StaticRateProvider {
    fn fetch_rate(&self, pair: &CurrencyPair) -> Result<f64> {
        check_rate(pair, self.rate)
    }
}

/// Never has a rate; every foreign conversion falls back.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableRateProvider;

impl ExchangeRateProvider for UnavailableRateProvider {
    fn fetch_rate(&self, pair: &CurrencyPair) -> Result<f64> {
        Err(DsrError::RateUnavailable(format!(
            "{}: no rate source configured",
            pair
        )))
    }
}
