//! Debt amortization and payoff projection for a personal budgeting app.
//!
//! Two debt models are supported: revolving balances that accrue compound
//! interest under a fixed payment, and fixed-installment (French) loans. All
//! functions are pure; amounts are integer units of the host currency and rates
//! are effective annual percentages.

pub mod annuity;
pub mod debt;
pub mod error;
pub mod progress;
pub mod rate;
pub mod schedule;

/// Smallest currency unit tracked by the host application.
pub type Money = i64;

pub use annuity::{fixed_payment, remaining_installments};
pub use debt::{
    settle, split_payment, unsettle, Debt, DebtKind, DebtStatus, ExtraStrategy, InterestType,
    Payment, PaymentSplit,
};
pub use error::{DebtError, Result};
pub use progress::{
    debt_progress, debt_summary, estimate_payoff_date, estimate_payoff_date_with, payoff_months,
    project_debt_schedule, DebtProgress, DebtSummary, InstallmentSource,
};
pub use rate::{annual_rate_from_monthly, is_unpayable, monthly_interest, monthly_rate};
pub use schedule::{
    project_compound_payoff, project_french_amortization, AmortizationRow, ScheduleOutcome,
    DEFAULT_MAX_MONTHS,
};
