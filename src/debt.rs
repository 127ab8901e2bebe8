//! Debt and payment records as the host application stores them, plus the pure
//! helpers used when a payment is recorded.

use chrono::NaiveDate;
use log::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::annuity::{fixed_payment, remaining_installments};
use crate::error::{DebtError, Result};
use crate::rate::{is_unpayable, monthly_interest};
use crate::Money;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DebtKind {
    CreditCard,
    PersonalLoan,
    Installment,
    Other,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum InterestType {
    /// Revolving balance, fixed payment that does not adjust.
    Compound,
    /// Fixed installment for the life of the loan.
    FrenchAmortization,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DebtStatus {
    Active,
    PaidOff,
}

/// What to do with the part of a french installment above the minimum.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ExtraStrategy {
    ReduceTerm,
    ReduceInstallment,
}

#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Debt {
    pub id: String,
    pub name: String,
    pub kind: DebtKind,
    pub interest_type: InterestType,
    pub original_balance: Money,
    pub current_balance: Money,
    /// Effective annual rate, percent.
    pub annual_interest_rate: f64,
    pub minimum_payment: Money,
    pub total_installments: Option<u32>,
    pub remaining_installments: Option<u32>,
    pub due_day: Option<u8>,
    pub notes: Option<String>,
    pub status: DebtStatus,
    pub paid_off_date: Option<NaiveDate>,
}

impl Debt {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: DebtKind,
        interest_type: InterestType,
        balance: Money,
        annual_interest_rate: f64,
        minimum_payment: Money,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            interest_type,
            original_balance: balance,
            current_balance: balance,
            annual_interest_rate,
            minimum_payment,
            total_installments: None,
            remaining_installments: None,
            due_day: None,
            notes: None,
            status: DebtStatus::Active,
            paid_off_date: None,
        }
    }

    /// Sets both installment counts, as done for a freshly created loan.
    pub fn with_installments(mut self, total: u32) -> Self {
        self.total_installments = Some(total);
        self.remaining_installments = Some(total);
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == DebtStatus::Active
    }

    pub fn is_french(&self) -> bool {
        self.interest_type == InterestType::FrenchAmortization
    }

    /// Stored installment count, ignoring an unset or zero value.
    pub fn stored_installments(&self) -> Option<u32> {
        self.remaining_installments.filter(|&n| n > 0)
    }

    /// Whether the current minimum payment can never clear the balance.
    pub fn is_unpayable(&self) -> bool {
        is_unpayable(self.current_balance, self.annual_interest_rate, self.minimum_payment)
    }
}

#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Payment {
    pub id: String,
    pub debt_id: String,
    pub amount: Money,
    pub date: NaiveDate,
    pub principal_portion: Money,
    pub interest_portion: Money,
    pub extra_strategy: Option<ExtraStrategy>,
    pub notes: Option<String>,
}

impl Payment {
    /// Builds a payment against `debt`, splitting `amount` into interest and
    /// principal for the current period.
    ///
    /// `strategy` is kept only for french debts paid above their minimum.
    pub fn record(
        id: impl Into<String>,
        debt: &Debt,
        amount: Money,
        date: NaiveDate,
        strategy: Option<ExtraStrategy>,
        notes: Option<String>,
    ) -> Result<Self> {
        if amount <= 0 {
            return Err(DebtError::NonPositiveAmount(amount));
        }
        let split = split_payment(debt, amount);
        let extra_strategy = if debt.is_french() && amount > debt.minimum_payment {
            strategy
        } else {
            None
        };

        Ok(Self {
            id: id.into(),
            debt_id: debt.id.clone(),
            amount,
            date,
            principal_portion: split.principal,
            interest_portion: split.interest,
            extra_strategy,
            notes: notes.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()),
        })
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PaymentSplit {
    pub principal: Money,
    pub interest: Money,
}

/// Divides a payment into principal and interest for one period.
///
/// Interest is one month on the current balance; principal is what remains,
/// clamped to `[0, current_balance]`. Any excess beyond what clears the balance
/// is reported as interest, so `principal + interest == amount` at every rate.
/// With a zero rate interest is 0 unless the amount overshoots the balance.
pub fn split_payment(debt: &Debt, amount: Money) -> PaymentSplit {
    let principal = if debt.annual_interest_rate == 0. {
        amount.min(debt.current_balance).max(0)
    } else {
        let interest = monthly_interest(debt.current_balance, debt.annual_interest_rate);
        (amount - interest).min(debt.current_balance).max(0)
    };
    PaymentSplit {
        principal,
        interest: amount - principal,
    }
}

/// Returns `debt` as it stands after `payment`, for the store to persist.
///
/// The balance drops by the principal portion. Stored installment counts follow
/// the payment's strategy: `ReduceTerm` keeps the installment and re-solves the
/// count, `ReduceInstallment` keeps the schedule and re-solves the installment,
/// and a plain payment just consumes one installment. A stored count of zero is
/// cleared. Reaching zero marks the debt paid off on the payment date.
pub fn settle(debt: &Debt, payment: &Payment) -> Debt {
    let mut updated = debt.clone();
    let new_balance = (debt.current_balance - payment.principal_portion).max(0);
    updated.current_balance = new_balance;

    match (payment.extra_strategy, debt.stored_installments()) {
        (Some(ExtraStrategy::ReduceTerm), Some(_)) => {
            let remaining = if new_balance > 0 {
                remaining_installments(new_balance, debt.annual_interest_rate, debt.minimum_payment)
            } else {
                Some(0)
            };
            updated.remaining_installments = Some(remaining.unwrap_or(0));
        }
        (Some(ExtraStrategy::ReduceInstallment), Some(stored)) => {
            let remaining = stored - 1;
            updated.remaining_installments = Some(remaining);
            updated.minimum_payment = if new_balance > 0 && remaining > 0 {
                fixed_payment(new_balance, debt.annual_interest_rate, remaining).unwrap_or(0)
            } else {
                0
            };
        }
        (_, Some(stored)) => updated.remaining_installments = Some(stored - 1),
        (_, None) => updated.remaining_installments = None,
    }

    if new_balance == 0 {
        updated.status = DebtStatus::PaidOff;
        updated.paid_off_date = Some(payment.date);
    }
    debug!(
        "debt {} settled: balance {} -> {}, installments {:?} -> {:?}",
        debt.id,
        debt.current_balance,
        updated.current_balance,
        debt.remaining_installments,
        updated.remaining_installments
    );
    updated
}

/// Reverses [`settle`] for a deleted payment.
///
/// The principal portion goes back on the balance and the debt is active again.
/// `ReduceTerm` re-solves the count from the restored balance, falling back to
/// one more installment when that fails. `ReduceInstallment` restores the
/// consumed installment and re-solves the installment amount. A plain payment
/// gives back one installment.
pub fn unsettle(debt: &Debt, payment: &Payment) -> Debt {
    let mut restored = debt.clone();
    let balance = debt.current_balance + payment.principal_portion;
    restored.current_balance = balance;
    restored.status = DebtStatus::Active;
    restored.paid_off_date = None;

    match (payment.extra_strategy, debt.remaining_installments) {
        (Some(ExtraStrategy::ReduceTerm), Some(stored)) => {
            restored.remaining_installments = Some(
                remaining_installments(balance, debt.annual_interest_rate, debt.minimum_payment)
                    .unwrap_or(stored + 1),
            );
        }
        (Some(ExtraStrategy::ReduceInstallment), Some(stored)) => {
            let remaining = stored + 1;
            restored.remaining_installments = Some(remaining);
            restored.minimum_payment = fixed_payment(balance, debt.annual_interest_rate, remaining)
                .unwrap_or(debt.minimum_payment);
        }
        (_, stored) => restored.remaining_installments = stored.map(|n| n + 1),
    }

    debug!(
        "debt {} unsettled: balance {} -> {}, installments {:?} -> {:?}",
        debt.id,
        debt.current_balance,
        restored.current_balance,
        debt.remaining_installments,
        restored.remaining_installments
    );
    restored
}
