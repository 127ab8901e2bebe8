//! Payment history aggregation, payoff estimation and the portfolio summary.

use chrono::{Local, Months, NaiveDate};
use log::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::annuity::remaining_installments;
use crate::debt::{Debt, DebtStatus, Payment};
use crate::schedule::{
    project_compound_payoff, project_french_amortization, AmortizationRow, DEFAULT_MAX_MONTHS,
};
use crate::Money;

#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DebtProgress {
    pub total_paid: Money,
    pub total_interest_paid: Money,
    pub total_principal_paid: Money,
    /// 0..=100, from the balance rather than the payment history.
    pub percentage_paid: f64,
    pub payments_count: usize,
}

#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DebtSummary {
    pub total_debt: Money,
    pub total_original_debt: Money,
    pub active_debts: usize,
    pub paid_off_debts: usize,
    pub total_paid: Money,
    pub total_interest_paid: Money,
    pub estimated_debt_free_date: Option<NaiveDate>,
}

/// Where a french debt's month count comes from when estimating its payoff.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum InstallmentSource {
    /// Trust `remaining_installments` as stored on the debt.
    #[default]
    Stored,
    /// Re-solve the count from the current balance, rate and payment.
    Recomputed,
}

/// Sums `debt`'s payment history. The sums are historical and need not
/// reconcile with the current balance.
pub fn debt_progress(debt: &Debt, payments: &[Payment]) -> DebtProgress {
    let mut progress = DebtProgress {
        total_paid: 0,
        total_interest_paid: 0,
        total_principal_paid: 0,
        percentage_paid: 0.,
        payments_count: 0,
    };
    for payment in payments.iter().filter(|p| p.debt_id == debt.id) {
        progress.total_paid += payment.amount;
        progress.total_interest_paid += payment.interest_portion;
        progress.total_principal_paid += payment.principal_portion;
        progress.payments_count += 1;
    }

    if debt.original_balance > 0 {
        let paid = (debt.original_balance - debt.current_balance) as f64;
        progress.percentage_paid = (paid / debt.original_balance as f64 * 100.).clamp(0., 100.);
    }
    progress
}

/// Projected schedule for a debt under its current terms.
///
/// Paid-off debts have none. French debts with a stored installment count are
/// projected over that count; everything else is projected as a revolving
/// balance at the minimum payment.
pub fn project_debt_schedule(debt: &Debt) -> Vec<AmortizationRow> {
    if debt.status == DebtStatus::PaidOff {
        return Vec::new();
    }
    if let Some(installments) = debt.stored_installments().filter(|_| debt.is_french()) {
        let balance = debt.current_balance;
        match project_french_amortization(balance, debt.annual_interest_rate, installments) {
            Ok(rows) => return rows,
            Err(e) => debug!("debt {}: {}, falling back to revolving projection", debt.id, e),
        }
    }
    project_compound_payoff(
        debt.current_balance,
        debt.annual_interest_rate,
        debt.minimum_payment,
        DEFAULT_MAX_MONTHS,
    )
}

/// Months left until `debt` is cleared, or `None` when it cannot be resolved.
pub fn payoff_months(debt: &Debt, source: InstallmentSource) -> Option<u32> {
    if debt.current_balance <= 0 || debt.minimum_payment <= 0 {
        return None;
    }

    if debt.is_french() {
        match source {
            InstallmentSource::Stored => {
                if let Some(stored) = debt.stored_installments() {
                    debug!("debt {}: using {} stored installments", debt.id, stored);
                    return Some(stored);
                }
            }
            InstallmentSource::Recomputed => {
                let solved = remaining_installments(
                    debt.current_balance,
                    debt.annual_interest_rate,
                    debt.minimum_payment,
                );
                debug!(
                    "debt {}: solved {:?} installments (stored {:?})",
                    debt.id, solved, debt.remaining_installments
                );
                return solved;
            }
        }
    }

    let rows = project_compound_payoff(
        debt.current_balance,
        debt.annual_interest_rate,
        debt.minimum_payment,
        DEFAULT_MAX_MONTHS,
    );
    if rows.is_empty() {
        return None;
    }
    Some(rows.len() as u32)
}

/// Estimated date `debt` reaches zero, counting months from `today` and using
/// the stored installment count for french debts.
pub fn estimate_payoff_date(debt: &Debt, today: NaiveDate) -> Option<NaiveDate> {
    estimate_payoff_date_with(debt, today, InstallmentSource::Stored)
}

pub fn estimate_payoff_date_with(
    debt: &Debt,
    today: NaiveDate,
    source: InstallmentSource,
) -> Option<NaiveDate> {
    let months = payoff_months(debt, source)?;
    today.checked_add_months(Months::new(months))
}

pub fn estimate_payoff_date_today(debt: &Debt) -> Option<NaiveDate> {
    estimate_payoff_date(debt, Local::now().date_naive())
}

/// Portfolio totals. The debt-free date is the latest payoff date among active
/// debts whose payoff can be estimated.
pub fn debt_summary(debts: &[Debt], payments: &[Payment], today: NaiveDate) -> DebtSummary {
    let active: Vec<&Debt> = debts.iter().filter(|d| d.is_active()).collect();

    DebtSummary {
        total_debt: active.iter().map(|d| d.current_balance).sum(),
        total_original_debt: debts.iter().map(|d| d.original_balance).sum(),
        active_debts: active.len(),
        paid_off_debts: debts.iter().filter(|d| d.status == DebtStatus::PaidOff).count(),
        total_paid: payments.iter().map(|p| p.amount).sum(),
        total_interest_paid: payments.iter().map(|p| p.interest_portion).sum(),
        estimated_debt_free_date: active
            .iter()
            .filter_map(|d| estimate_payoff_date(d, today))
            .max(),
    }
}

pub fn debt_summary_today(debts: &[Debt], payments: &[Payment]) -> DebtSummary {
    debt_summary(debts, payments, Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annuity::fixed_payment;
    use crate::debt::{DebtKind, InterestType};
    use test_log::test;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 31).unwrap()
    }

    fn card(balance: Money, payment: Money) -> Debt {
        Debt::new(
            "card",
            "Visa",
            DebtKind::CreditCard,
            InterestType::Compound,
            balance,
            28.,
            payment,
        )
    }

    fn loan() -> Debt {
        let payment = fixed_payment(10_000_000, 18., 36).unwrap();
        Debt::new(
            "loan",
            "Car loan",
            DebtKind::PersonalLoan,
            InterestType::FrenchAmortization,
            10_000_000,
            18.,
            payment,
        )
        .with_installments(36)
    }

    fn paid(debt: &Debt, id: &str, amount: Money, interest: Money) -> Payment {
        Payment {
            id: id.into(),
            debt_id: debt.id.clone(),
            amount,
            date: today(),
            principal_portion: amount - interest,
            interest_portion: interest,
            extra_strategy: None,
            notes: None,
        }
    }

    #[test]
    fn test_debt_progress() {
        let mut debt = card(1_000_000, 100_000);
        let other = loan();
        let payments = vec![
            paid(&debt, "p1", 100_000, 20_000),
            paid(&other, "p2", 400_000, 150_000),
            paid(&debt, "p3", 100_000, 18_000),
        ];
        debt.current_balance = 750_000;

        let progress = debt_progress(&debt, &payments);
        assert_eq!(progress.payments_count, 2);
        assert_eq!(progress.total_paid, 200_000);
        assert_eq!(progress.total_interest_paid, 38_000);
        assert_eq!(progress.total_principal_paid, 162_000);
        // from the balance, not the history
        assert_eq!(progress.percentage_paid, 25.);
    }

    #[test]
    fn test_debt_progress_clamps_percentage() {
        let mut debt = card(1_000_000, 100_000);
        debt.current_balance = -5_000;
        assert_eq!(debt_progress(&debt, &[]).percentage_paid, 100.);

        debt.current_balance = 1_200_000;
        assert_eq!(debt_progress(&debt, &[]).percentage_paid, 0.);

        debt.original_balance = 0;
        assert_eq!(debt_progress(&debt, &[]).percentage_paid, 0.);
    }

    #[test]
    fn test_payoff_date_compound() {
        let debt = card(1_200_000, 100_000);
        let mut zero = debt.clone();
        zero.annual_interest_rate = 0.;
        // 12 months from Jan 31 clamps to the end of the month
        assert_eq!(
            estimate_payoff_date(&zero, today()),
            NaiveDate::from_ymd_opt(2027, 1, 31)
        );

        let rows = project_compound_payoff(1_200_000, 28., 100_000, DEFAULT_MAX_MONTHS);
        assert_eq!(payoff_months(&debt, InstallmentSource::Stored), Some(rows.len() as u32));

        let mut one_month = zero.clone();
        one_month.current_balance = 100_000;
        assert_eq!(
            estimate_payoff_date(&one_month, today()),
            NaiveDate::from_ymd_opt(2026, 2, 28)
        );
    }

    #[test]
    fn test_payoff_date_unresolvable() {
        assert_eq!(estimate_payoff_date(&card(5_000_000, 50_000), today()), None);
        assert_eq!(estimate_payoff_date(&card(5_000_000, 0), today()), None);

        let mut cleared = card(5_000_000, 150_000);
        cleared.current_balance = 0;
        assert_eq!(estimate_payoff_date(&cleared, today()), None);
    }

    #[test]
    fn test_payoff_date_french_trusts_stored_count() {
        let mut debt = loan();
        debt.remaining_installments = Some(10);
        assert_eq!(payoff_months(&debt, InstallmentSource::Stored), Some(10));
        assert_eq!(payoff_months(&debt, InstallmentSource::Recomputed), Some(36));
        assert_eq!(
            estimate_payoff_date(&debt, today()),
            NaiveDate::from_ymd_opt(2026, 11, 30)
        );
        assert_eq!(
            estimate_payoff_date_with(&debt, today(), InstallmentSource::Recomputed),
            NaiveDate::from_ymd_opt(2029, 1, 31)
        );

        // a zero count falls back to the revolving projection
        debt.remaining_installments = Some(0);
        let payment = debt.minimum_payment;
        let rows = project_compound_payoff(debt.current_balance, 18., payment, DEFAULT_MAX_MONTHS);
        assert_eq!(payoff_months(&debt, InstallmentSource::Stored), Some(rows.len() as u32));
    }

    #[test]
    fn test_project_debt_schedule() {
        let debt = loan();
        let rows = project_debt_schedule(&debt);
        assert_eq!(rows.len(), 36);
        assert_eq!(rows.last().unwrap().balance, 0);

        let card = card(5_000_000, 150_000);
        assert_eq!(
            project_debt_schedule(&card),
            project_compound_payoff(5_000_000, 28., 150_000, DEFAULT_MAX_MONTHS)
        );

        let mut done = card.clone();
        done.status = DebtStatus::PaidOff;
        assert!(project_debt_schedule(&done).is_empty());
    }

    #[test]
    fn test_debt_summary() {
        let fast = Debt::new(
            "a",
            "Store card",
            DebtKind::CreditCard,
            InterestType::Compound,
            300_000,
            0.,
            100_000,
        );
        let slow = loan();
        let stuck = card(5_000_000, 50_000);
        let mut done = Debt::new(
            "d",
            "Phone",
            DebtKind::Installment,
            InterestType::Compound,
            800_000,
            0.,
            100_000,
        );
        done.current_balance = 0;
        done.status = DebtStatus::PaidOff;

        let payments = vec![
            paid(&done, "p1", 800_000, 0),
            paid(&slow, "p2", 354_000, 138_000),
        ];
        let debts = vec![fast, slow, stuck, done];
        let summary = debt_summary(&debts, &payments, today());

        assert_eq!(summary.total_debt, 300_000 + 10_000_000 + 5_000_000);
        assert_eq!(summary.total_original_debt, 300_000 + 10_000_000 + 5_000_000 + 800_000);
        assert_eq!(summary.active_debts, 3);
        assert_eq!(summary.paid_off_debts, 1);
        assert_eq!(summary.total_paid, 1_154_000);
        assert_eq!(summary.total_interest_paid, 138_000);
        // the 36 month loan gates the date, the unpayable card is skipped
        assert_eq!(summary.estimated_debt_free_date, NaiveDate::from_ymd_opt(2029, 1, 31));
    }

    #[test]
    fn test_debt_summary_without_estimates() {
        let summary = debt_summary(&[card(5_000_000, 50_000)], &[], today());
        assert_eq!(summary.estimated_debt_free_date, None);
        assert_eq!(summary.active_debts, 1);
        assert_eq!(summary.total_paid, 0);

        assert_eq!(debt_summary(&[], &[], today()).total_debt, 0);
        assert_eq!(debt_summary_today(&[], &[]).estimated_debt_free_date, None);
    }
}
