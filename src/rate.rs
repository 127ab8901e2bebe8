//! Rate conversion and single-period interest accrual.
//!
//! Rates are effective percentages (28.5 means 28.5% EA). Money is always the
//! host's smallest currency unit.

use log::trace;

use crate::Money;

/// Equivalent effective monthly rate, as a fraction, for an effective annual
/// percentage: `(1 + annual/100)^(1/12) - 1`.
pub fn monthly_rate(annual_rate: f64) -> f64 {
    if annual_rate == 0. {
        return 0.;
    }
    (1. + annual_rate / 100.).powf(1. / 12.) - 1.
}

/// Effective annual percentage for a rate quoted as effective monthly (EM).
///
/// Non-positive input is treated as "no rate" and returns 0.
pub fn annual_rate_from_monthly(monthly_rate_pct: f64) -> f64 {
    if !monthly_rate_pct.is_finite() || monthly_rate_pct <= 0. {
        return 0.;
    }
    ((1. + monthly_rate_pct / 100.).powi(12) - 1.) * 100.
}

/// One month of interest on `balance`, rounded to the nearest unit.
pub fn monthly_interest(balance: Money, annual_rate: f64) -> Money {
    if balance <= 0 || annual_rate == 0. {
        return 0;
    }
    let interest = (balance as f64 * monthly_rate(annual_rate)).round() as Money;
    trace!("interest on {} at {}% EA: {}", balance, annual_rate, interest);
    interest
}

/// True when `monthly_payment` can never reduce the principal, i.e. it does not
/// exceed one month of interest. A zero rate is never unpayable.
pub fn is_unpayable(balance: Money, annual_rate: f64, monthly_payment: Money) -> bool {
    if annual_rate == 0. {
        return false;
    }
    monthly_payment <= monthly_interest(balance, annual_rate)
}
