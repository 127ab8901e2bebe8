use thiserror::Error;

use crate::Money;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DebtError {
    #[error("invalid input: {field} ({reason})")]
    InvalidInput { field: &'static str, reason: String },

    #[error("payment amount must be positive, got {0}")]
    NonPositiveAmount(Money),
}

pub type Result<T> = std::result::Result<T, DebtError>;

/// Validates a loan term and returns it as an exponent for `powi`.
pub(crate) fn check_term(total_months: u32) -> Result<i32> {
    if total_months == 0 {
        return Err(DebtError::InvalidInput {
            field: "total_months",
            reason: "term must be at least one month".into(),
        });
    }
    i32::try_from(total_months).map_err(|_| DebtError::InvalidInput {
        field: "total_months",
        reason: format!("term of {} months is out of range", total_months),
    })
}

pub(crate) fn check_rate(annual_rate: f64) -> Result<()> {
    if !annual_rate.is_finite() || annual_rate < 0. {
        return Err(DebtError::InvalidInput {
            field: "annual_rate",
            reason: format!("expected a finite, non-negative percentage, got {}", annual_rate),
        });
    }
    Ok(())
}
