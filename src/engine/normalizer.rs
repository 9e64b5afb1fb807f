//! Income normalization into the local reporting currency.

use tracing::warn;

use super::brackets::round_cents;
use crate::models::{AppliedRate, IncomeProfile, Jurisdiction, RateSource};
use crate::rates::{check_rate, CurrencyPair, ExchangeRateProvider};

/// Gross monthly income in both the profile's and the local currency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedIncome {
    pub gross_native: f64,
    pub gross: f64,
    /// Present only when the profile was in a foreign currency.
    pub exchange_rate: Option<AppliedRate>,
}

pub struct IncomeNormalizer<'a> {
    rates: &'a dyn ExchangeRateProvider,
    fallback_rate: f64,
}

impl<'a> IncomeNormalizer<'a> {
    pub fn new(rates: &'a dyn ExchangeRateProvider, fallback_rate: f64) -> Self {
        Self {
            rates,
            fallback_rate,
        }
    }

    pub fn normalize(&self, profile: &IncomeProfile) -> NormalizedIncome {
        let gross_native = profile.total();
        match self.resolve_rate(profile.jurisdiction) {
            None => NormalizedIncome {
                gross_native,
                gross: round_cents(gross_native),
                exchange_rate: None,
            },
            Some(applied) => NormalizedIncome {
                gross_native,
                gross: round_cents(gross_native * applied.rate),
                exchange_rate: Some(applied),
            },
        }
    }

    /// Rate converting `jurisdiction`'s currency to the local one.
    ///
    /// Never fails: if the provider errors or returns an implausible value the
    /// fallback constant is applied and tagged as such.
    pub fn resolve_rate(&self, jurisdiction: Jurisdiction) -> Option<AppliedRate> {
        let pair = CurrencyPair::for_jurisdiction(jurisdiction)?;
        let applied = match self
            .rates
            .quote(&pair)
            .and_then(|(rate, source)| Ok((check_rate(&pair, rate)?, source)))
        {
            Ok((rate, source)) => AppliedRate { rate, source },
            Err(e) => {
                warn!(%pair, error = %e, fallback = self.fallback_rate, "using fallback exchange rate");
                AppliedRate {
                    rate: self.fallback_rate,
                    source: RateSource::Fallback,
                }
            }
        };
        Some(applied)
    }
}
