use log::{debug, trace, warn};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::annuity::fixed_payment;
use crate::error::{check_rate, check_term, Result};
use crate::rate::{is_unpayable, monthly_interest, monthly_rate};
use crate::Money;

/// Iteration cap for revolving projections (30 years of monthly payments).
pub const DEFAULT_MAX_MONTHS: u32 = 360;

/// One projected month. Derived only, never persisted.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AmortizationRow {
    pub month: u32,
    pub payment: Money,
    pub principal: Money,
    pub interest: Money,
    pub balance: Money,
}

impl AmortizationRow {
    pub fn new(
        month: u32,
        payment: Money,
        principal: Money,
        interest: Money,
        balance: Money,
    ) -> Self {
        Self {
            month,
            payment,
            principal,
            interest,
            balance,
        }
    }
}

impl fmt::Display for AmortizationRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "month {}, payment {}, principal {}, interest {}, ending balance {}",
            self.month, self.payment, self.principal, self.interest, self.balance
        )
    }
}

/// How a projected schedule ended.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case", tag = "outcome"))]
pub enum ScheduleOutcome {
    /// No rows: the payment never covers interest, or nothing is owed.
    Empty,
    PaidOff { months: u32 },
    /// Stopped at the month cap with a balance still outstanding.
    Capped { months: u32, remaining: Money },
}

impl ScheduleOutcome {
    pub fn of(rows: &[AmortizationRow]) -> Self {
        match rows.last() {
            None => ScheduleOutcome::Empty,
            Some(last) if last.balance == 0 => ScheduleOutcome::PaidOff { months: last.month },
            Some(last) => ScheduleOutcome::Capped {
                months: last.month,
                remaining: last.balance,
            },
        }
    }

    pub fn is_paid_off(&self) -> bool {
        matches!(self, ScheduleOutcome::PaidOff { .. })
    }
}

pub fn total_interest(rows: &[AmortizationRow]) -> Money {
    rows.iter().map(|row| row.interest).sum()
}

pub fn total_paid(rows: &[AmortizationRow]) -> Money {
    rows.iter().map(|row| row.payment).sum()
}

/// Amortizes a revolving balance under a fixed monthly payment.
///
/// Interest accrues on the remaining balance each month and the last payment is
/// capped so it never overshoots. An unpayable combination (see
/// [`is_unpayable`]) yields an empty schedule. Projection stops after
/// `max_months` rows; use [`ScheduleOutcome::of`] to tell a payoff from a cap.
pub fn project_compound_payoff(
    balance: Money,
    annual_rate: f64,
    monthly_payment: Money,
    max_months: u32,
) -> Vec<AmortizationRow> {
    let mut rows: Vec<AmortizationRow> = Vec::new();
    let mut remaining = balance;

    if annual_rate == 0. {
        if monthly_payment <= 0 {
            debug!("zero-rate balance {} with payment {} never clears", balance, monthly_payment);
            return rows;
        }
        let mut month = 1;
        while month <= max_months && remaining > 0 {
            let payment = monthly_payment.min(remaining);
            remaining -= payment;
            trace!("month {}, payment {}, end bal {}", month, payment, remaining);
            rows.push(AmortizationRow::new(month, payment, payment, 0, remaining));
            month += 1;
        }
        return rows;
    }

    if is_unpayable(balance, annual_rate, monthly_payment) {
        debug!(
            "payment {} never covers interest on {} at {}% EA",
            monthly_payment, balance, annual_rate
        );
        return rows;
    }

    let mut month = 1;
    while month <= max_months && remaining > 0 {
        let interest = monthly_interest(remaining, annual_rate);
        let payment = monthly_payment.min(remaining + interest);
        let principal = payment - interest;
        remaining = (remaining - principal).max(0);
        trace!(
            "month {}, interest {}, principal {}, end bal {}",
            month,
            interest,
            principal,
            remaining
        );
        rows.push(AmortizationRow::new(month, payment, principal, interest, remaining));
        month += 1;
    }

    if remaining > 0 {
        warn!(
            "projection of {} at {}% EA stopped after {} months with {} outstanding",
            balance, annual_rate, max_months, remaining
        );
    }
    rows
}

/// Full schedule for a fixed-installment loan.
///
/// Interest is rounded per row and each row's payment is `principal + interest`,
/// so rows drift slightly around the nominal installment. The final month takes
/// whatever principal is left, so the last balance is always zero.
///
/// # Errors
///
/// Returns an error if `total_months` is zero or the rate is negative.
pub fn project_french_amortization(
    principal: Money,
    annual_rate: f64,
    total_months: u32,
) -> Result<Vec<AmortizationRow>> {
    check_term(total_months)?;
    check_rate(annual_rate)?;

    let installment = fixed_payment(principal, annual_rate, total_months)?;
    let r = monthly_rate(annual_rate);
    let mut rows: Vec<AmortizationRow> = Vec::with_capacity(total_months as usize);
    let mut remaining = principal;

    let mut month = 1;
    while month <= total_months && remaining > 0 {
        let interest = (remaining as f64 * r).round() as Money;
        let amortization = if month == total_months {
            remaining
        } else {
            (installment - interest).min(remaining)
        };
        remaining -= amortization;
        trace!(
            "month {}, interest {}, principal {}, end bal {}",
            month,
            interest,
            amortization,
            remaining
        );
        rows.push(AmortizationRow::new(
            month,
            amortization + interest,
            amortization,
            interest,
            remaining,
        ));
        month += 1;
    }
    Ok(rows)
}
