use crate::config::MAX_TENURE_YEARS;
use crate::engine::brackets::round_cents;
use crate::models::AmortizationRow;

use super::monthly_instalment;

/// Month-by-month split of each instalment into interest and principal.
///
/// Figures are rounded to cents per row; the running balance is carried
/// unrounded and reported floored at zero.
pub fn amortization_schedule(
    principal: f64,
    annual_rate_percent: f64,
    tenure_years: u32,
) -> Vec<AmortizationRow> {
    let monthly_rate = annual_rate_percent / 100.0 / 12.0;
    let total_months = u64::from(tenure_years) * 12;
    let instalment = monthly_instalment(principal, annual_rate_percent, tenure_years);

    let mut balance = principal;
    let mut rows = Vec::with_capacity(total_months.min(u64::from(MAX_TENURE_YEARS) * 12) as usize);
    for m in 1..=total_months {
        let interest = balance * monthly_rate;
        let principal_paid = instalment - interest;
        balance -= principal_paid;

        rows.push(AmortizationRow {
            // Bounded by tenure_years and 12, both within u32.
            year: ((m - 1) / 12 + 1) as u32,
            month: ((m - 1) % 12 + 1) as u32,
            principal: round_cents(principal_paid),
            interest: round_cents(interest),
            total: round_cents(instalment),
            balance: round_cents(balance.max(0.0)),
        });
    }
    rows
}
