//! Per-jurisdiction statutory deduction tables.
//!
//! The figures are simplified estimates for an affordability calculator, not
//! a payroll-grade computation. They are plain data so a deployment can load
//! current values from configuration.

use serde::{Deserialize, Serialize};

use super::brackets::{check_rate, Bracket, ProgressiveSchedule};
use crate::error::{DsrError, Result};
use crate::models::Jurisdiction;

/// Employee EPF share.
pub const MY_EPF_RATE: f64 = 0.11;
/// Combined employee SOCSO (0.5%) and EIS (0.2%) share.
pub const MY_SOCSO_EIS_RATE: f64 = 0.007;
pub const MY_SOCSO_WAGE_CEILING: f64 = 5_000.0;
/// Monthly gross below which no PCB is estimated.
pub const MY_PCB_THRESHOLD: f64 = 4_000.0;
pub const MY_PCB_RATE: f64 = 0.05;

/// Employee CPF share.
pub const SG_CPF_RATE: f64 = 0.20;
/// Ordinary-wage ceiling for CPF contributions.
pub const SG_CPF_WAGE_CEILING: f64 = 6_800.0;

// ---------------------------------------------------------------------------
// Rule types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementRule {
    pub rate: f64,
    #[serde(default)]
    pub wage_ceiling: Option<f64>,
}

impl RetirementRule {
    pub fn contribution(&self, gross: f64) -> f64 {
        capped(gross, self.wage_ceiling) * self.rate
    }
}

/// What a social-security bracket charges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Contribution {
    Flat {
        amount: f64,
    },
    #[serde(rename_all = "camelCase")]
    Rate {
        rate: f64,
        #[serde(default)]
        wage_ceiling: Option<f64>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialSecurityBracket {
    pub upper_bound: Option<f64>,
    pub contribution: Contribution,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxRule {
    /// Subtract the retirement contribution from gross before applying the schedule.
    #[serde(default)]
    pub relieve_retirement: bool,
    pub schedule: ProgressiveSchedule,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JurisdictionRules {
    pub retirement: RetirementRule,
    pub social_security: Vec<SocialSecurityBracket>,
    pub tax: TaxRule,
}

// ---------------------------------------------------------------------------
// Built-in tables
// ---------------------------------------------------------------------------

impl JurisdictionRules {
    /// EPF, SOCSO+EIS and a flat-rate PCB estimate above a threshold.
    pub fn malaysia() -> Self {
        Self {
            retirement: RetirementRule {
                rate: MY_EPF_RATE,
                wage_ceiling: None,
            },
            social_security: vec![SocialSecurityBracket {
                upper_bound: None,
                contribution: Contribution::Rate {
                    rate: MY_SOCSO_EIS_RATE,
                    wage_ceiling: Some(MY_SOCSO_WAGE_CEILING),
                },
            }],
            tax: TaxRule {
                relieve_retirement: false,
                schedule: ProgressiveSchedule::new(vec![
                    Bracket::upto(MY_PCB_THRESHOLD, 0.0),
                    Bracket::above(MY_PCB_RATE),
                ]),
            },
        }
    }

    /// CPF, the flat self-help-group fund, and resident income tax bands
    /// expressed per month.
    pub fn singapore() -> Self {
        let flat = |upper_bound: Option<f64>, amount: f64| SocialSecurityBracket {
            upper_bound,
            contribution: Contribution::Flat { amount },
        };
        Self {
            retirement: RetirementRule {
                rate: SG_CPF_RATE,
                wage_ceiling: Some(SG_CPF_WAGE_CEILING),
            },
            social_security: vec![
                flat(Some(2_000.0), 0.50),
                flat(Some(3_500.0), 1.00),
                flat(Some(5_000.0), 1.50),
                flat(Some(7_500.0), 2.00),
                flat(None, 3.00),
            ],
            tax: TaxRule {
                relieve_retirement: true,
                schedule: ProgressiveSchedule::new(vec![
                    Bracket::upto(20_000.0 / 12.0, 0.0),
                    Bracket::upto(30_000.0 / 12.0, 0.02),
                    Bracket::upto(40_000.0 / 12.0, 0.035),
                    Bracket::upto(80_000.0 / 12.0, 0.07),
                    Bracket::upto(120_000.0 / 12.0, 0.115),
                    Bracket::upto(160_000.0 / 12.0, 0.15),
                    Bracket::upto(200_000.0 / 12.0, 0.18),
                    Bracket::upto(240_000.0 / 12.0, 0.19),
                    Bracket::upto(280_000.0 / 12.0, 0.195),
                    Bracket::upto(320_000.0 / 12.0, 0.20),
                    Bracket::upto(500_000.0 / 12.0, 0.22),
                    Bracket::upto(1_000_000.0 / 12.0, 0.23),
                    Bracket::above(0.24),
                ]),
            },
        }
    }

    pub fn for_jurisdiction(jurisdiction: Jurisdiction) -> Self {
        match jurisdiction {
            Jurisdiction::Malaysia => Self::malaysia(),
            Jurisdiction::Singapore => Self::singapore(),
        }
    }

    /// Social-security contribution of the first bracket covering `gross`.
    pub fn social_security(&self, gross: f64) -> f64 {
        let bracket = self
            .social_security
            .iter()
            .find(|b| b.upper_bound.map_or(true, |upper| gross <= upper));
        match bracket.map(|b| &b.contribution) {
            Some(Contribution::Flat { amount }) => *amount,
            Some(Contribution::Rate { rate, wage_ceiling }) => capped(gross, *wage_ceiling) * rate,
            None => 0.0,
        }
    }

    pub fn validate(&self, name: &str) -> Result<()> {
        check_rate(&format!("{}.retirement", name), self.retirement.rate)?;
        check_ceiling(&format!("{}.retirement", name), self.retirement.wage_ceiling)?;

        let section = format!("{}.socialSecurity", name);
        if self.social_security.is_empty() {
            return Err(DsrError::InvalidArgument(format!(
                "{}: table has no brackets",
                section
            )));
        }
        let mut previous = 0.0;
        let last = self.social_security.len() - 1;
        for (i, bracket) in self.social_security.iter().enumerate() {
            match bracket.upper_bound {
                Some(upper) if upper.is_finite() && upper > previous => previous = upper,
                None if i == last => {}
                _ => {
                    return Err(DsrError::InvalidArgument(format!(
                        "{}: bracket {} breaks the ascending, open-ended-last order",
                        section, i
                    )))
                }
            }
            match bracket.contribution {
                Contribution::Flat { amount } if !(amount.is_finite() && amount >= 0.0) => {
                    return Err(DsrError::InvalidArgument(format!(
                        "{}: bracket {} has invalid flat amount {}",
                        section, i, amount
                    )))
                }
                Contribution::Flat { .. } => {}
                Contribution::Rate { rate, wage_ceiling } => {
                    check_rate(&section, rate)?;
                    check_ceiling(&section, wage_ceiling)?;
                }
            }
        }
        if self.social_security[last].upper_bound.is_some() {
            return Err(DsrError::InvalidArgument(format!(
                "{}: last bracket must be open-ended",
                section
            )));
        }

        self.tax.schedule.validate(&format!("{}.tax", name))
    }
}

fn capped(gross: f64, ceiling: Option<f64>) -> f64 {
    ceiling.map_or(gross, |c| gross.min(c))
}

fn check_ceiling(name: &str, ceiling: Option<f64>) -> Result<()> {
    match ceiling {
        Some(c) if !(c.is_finite() && c > 0.0) => Err(DsrError::InvalidArgument(format!(
            "{}: wage ceiling must be positive, got {}",
            name, c
        ))),
        _ => Ok(()),
    }
}
