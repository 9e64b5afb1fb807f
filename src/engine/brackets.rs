//! Ordered `(upper bound, marginal rate)` tables and their progressive reduction.
//!
//! Used for withholding-tax estimates as well as the tiered legal-fee and
//! stamp-duty scales of the mortgage calculator.

use serde::{Deserialize, Serialize};

use crate::error::{DsrError, Result};

/// One band of a progressive schedule. `upper_bound: None` marks the open-ended top band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bracket {
    pub upper_bound: Option<f64>,
    pub rate: f64,
}

impl Bracket {
    pub const fn upto(upper_bound: f64, rate: f64) -> Self {
        Self {
            upper_bound: Some(upper_bound),
            rate,
        }
    }

    pub const fn above(rate: f64) -> Self {
        Self {
            upper_bound: None,
            rate,
        }
    }
}

/// Ascending list of brackets; each amount slice is charged at the rate of
/// the band it falls in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressiveSchedule {
    brackets: Vec<Bracket>,
}

impl ProgressiveSchedule {
    pub fn new(brackets: Vec<Bracket>) -> Self {
        Self { brackets }
    }

    pub fn brackets(&self) -> &[Bracket] {
        &self.brackets
    }

    /// Sum of every band's slice of `amount` times its marginal rate.
    ///
    /// Stops at the band containing `amount`. Non-positive amounts yield zero.
    /// An amount above a bounded last band is charged only up to that bound.
    pub fn apply(&self, amount: f64) -> f64 {
        let mut lower = 0.0;
        let mut charged = 0.0;
        for bracket in &self.brackets {
            if amount <= lower {
                break;
            }
            let upper = bracket.upper_bound.unwrap_or(f64::INFINITY);
            charged += (amount.min(upper) - lower) * bracket.rate;
            lower = upper;
        }
        charged
    }

    /// Check that rates are fractions, bounds strictly ascend, and only the
    /// last band is open-ended.
    pub fn validate(&self, name: &str) -> Result<()> {
        if self.brackets.is_empty() {
            return Err(DsrError::InvalidArgument(format!(
                "{}: schedule has no brackets",
                name
            )));
        }
        let mut previous = 0.0;
        let last = self.brackets.len() - 1;
        for (i, bracket) in self.brackets.iter().enumerate() {
            check_rate(name, bracket.rate)?;
            match bracket.upper_bound {
                Some(upper) if upper.is_finite() && upper > previous => previous = upper,
                Some(upper) => {
                    return Err(DsrError::InvalidArgument(format!(
                        "{}: bracket {} upper bound {} does not ascend past {}",
                        name, i, upper, previous
                    )))
                }
                None if i == last => {}
                None => {
                    return Err(DsrError::InvalidArgument(format!(
                        "{}: only the last bracket may be open-ended (bracket {})",
                        name, i
                    )))
                }
            }
        }
        if self.brackets[last].upper_bound.is_some() {
            return Err(DsrError::InvalidArgument(format!(
                "{}: last bracket must be open-ended",
                name
            )));
        }
        Ok(())
    }
}

pub(crate) fn check_rate(name: &str, rate: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&rate) {
        return Err(DsrError::InvalidArgument(format!(
            "{}: rate {} is outside [0, 1]",
            name, rate
        )));
    }
    Ok(())
}

/// Round half away from zero to two decimal places.
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
