use chrono::Local;
use debt_engine::progress::estimate_payoff_date_today;
use debt_engine::schedule::{total_interest, ScheduleOutcome};
use debt_engine::*;
use log::{info, warn};
use simple_logger::SimpleLogger;

fn main() {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .env()
        .init()
        .unwrap();

    let card = Debt::new(
        "card",
        "Visa",
        DebtKind::CreditCard,
        InterestType::Compound,
        5_000_000,
        28.,
        150_000,
    );
    let loan = match fixed_payment(10_000_000, 18., 36) {
        Ok(installment) => Debt::new(
            "loan",
            "Car loan",
            DebtKind::PersonalLoan,
            InterestType::FrenchAmortization,
            10_000_000,
            18.,
            installment,
        )
        .with_installments(36),
        Err(e) => {
            warn!("cannot price loan: {}", e);
            return;
        }
    };

    for debt in [&card, &loan] {
        show_amortization(debt);
    }

    let today = Local::now().date_naive();
    let mut debts = vec![card, loan];
    let mut payments = Vec::new();
    for debt in debts.iter_mut() {
        let id = format!("{}-1", debt.id);
        match Payment::record(id, debt, debt.minimum_payment, today, None, None) {
            Ok(payment) => {
                *debt = settle(debt, &payment);
                payments.push(payment);
            }
            Err(e) => warn!("{}: {}", debt.name, e),
        }
    }

    for debt in &debts {
        let progress = debt_progress(debt, &payments);
        info!(
            "{}: paid {} ({} interest), {:.1}% done, payoff {:?}",
            debt.name,
            progress.total_paid,
            progress.total_interest_paid,
            progress.percentage_paid,
            estimate_payoff_date_today(debt)
        );
    }

    let summary = debt_summary(&debts, &payments, today);
    info!(
        "total debt {} of {}, debt free by {:?}",
        summary.total_debt, summary.total_original_debt, summary.estimated_debt_free_date
    );
}

fn show_amortization(debt: &Debt) {
    let rows = project_debt_schedule(debt);
    println!("{} ({:?})", debt.name, ScheduleOutcome::of(&rows));
    for row in &rows {
        println!("{}", row);
    }
    println!("total interest {}", total_interest(&rows));
}
