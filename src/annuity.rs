//! Fixed-installment (French / annuity) solvers.

use log::debug;

use crate::error::{check_rate, check_term, Result};
use crate::rate::{is_unpayable, monthly_rate};
use crate::Money;

/// Constant monthly installment that clears `principal` in `total_months`.
///
/// `C = P * r(1+r)^n / ((1+r)^n - 1)`, rounded to the nearest unit. With a zero
/// rate this is plain division.
///
/// # Errors
///
/// Returns an error if `total_months` is zero or above `i32::MAX`, or the rate
/// is negative.
pub fn fixed_payment(principal: Money, annual_rate: f64, total_months: u32) -> Result<Money> {
    let exponent = check_term(total_months)?;
    check_rate(annual_rate)?;

    let r = monthly_rate(annual_rate);
    if r == 0. {
        return Ok((principal as f64 / total_months as f64).round() as Money);
    }
    let factor = (1. + r).powi(exponent);
    Ok((principal as f64 * (r * factor) / (factor - 1.)).round() as Money)
}

/// Installments of `monthly_payment` still needed to clear `balance`.
///
/// Inverse of [`fixed_payment`]: `n = ln(C / (C - B*r)) / ln(1+r)`, rounded up.
/// When the installment is the rounded annuity for `floor(n)` months, `floor(n)`
/// is returned instead, so that a payment produced by [`fixed_payment`] maps back
/// to its own term.
///
/// Returns `None` for a non-positive balance or payment, and when the payment
/// does not cover one month of interest on the current balance.
pub fn remaining_installments(
    balance: Money,
    annual_rate: f64,
    monthly_payment: Money,
) -> Option<u32> {
    if balance <= 0 || monthly_payment <= 0 {
        return None;
    }
    if is_unpayable(balance, annual_rate, monthly_payment) {
        debug!(
            "payment {} does not cover interest on {} at {}% EA",
            monthly_payment, balance, annual_rate
        );
        return None;
    }

    let r = monthly_rate(annual_rate);
    let payment = monthly_payment as f64;
    let n = if r == 0. {
        balance as f64 / payment
    } else {
        (payment / (payment - balance as f64 * r)).ln() / (1. + r).ln()
    };
    if !n.is_finite() {
        return None;
    }

    let lower = n.floor();
    if lower >= 1. {
        let term = lower as u32;
        if fixed_payment(balance, annual_rate, term).ok() == Some(monthly_payment) {
            return Some(term);
        }
    }
    Some(n.ceil() as u32)
}
