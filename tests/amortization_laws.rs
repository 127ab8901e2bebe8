use debt_engine::*;
use rstest::rstest;

#[rstest]
#[case(10_000_000, 18., 36)]
#[case(10_000_000, 18., 1)]
#[case(552_125, 10.69, 6)]
#[case(360_000_000, 10.5, 240)]
#[case(25_000_000, 32.4, 48)]
#[case(1_200_000, 0., 12)]
#[case(1_000_000, 0., 7)]
#[case(7_500_000, 0.5, 60)]
fn remaining_installments_inverts_fixed_payment(
    #[case] principal: Money,
    #[case] rate: f64,
    #[case] months: u32,
) {
    let payment = fixed_payment(principal, rate, months).unwrap();
    assert_eq!(remaining_installments(principal, rate, payment), Some(months));
}

#[rstest]
#[case(5_000_000, 28., 150_000)]
#[case(5_000_000, 28., 104_500)]
#[case(800_000, 45., 40_000)]
#[case(3_333_333, 12.7, 99_999)]
fn payable_compound_projection_ends_at_zero(
    #[case] balance: Money,
    #[case] rate: f64,
    #[case] payment: Money,
) {
    assert!(payment > monthly_interest(balance, rate));
    let rows = project_compound_payoff(balance, rate, payment, 10_000);
    assert_eq!(rows.last().unwrap().balance, 0);
    assert!(ScheduleOutcome::of(&rows).is_paid_off());
}

#[rstest]
#[case(5_000_000, 28., 50_000)]
#[case(5_000_000, 28., 0)]
#[case(1_000_000, 60., 20_000)]
fn unpayable_compound_projection_is_empty(
    #[case] balance: Money,
    #[case] rate: f64,
    #[case] payment: Money,
) {
    assert!(is_unpayable(balance, rate, payment));
    assert!(project_compound_payoff(balance, rate, payment, DEFAULT_MAX_MONTHS).is_empty());
}

#[rstest]
#[case(10_000_000, 18., 36)]
#[case(360_000_000, 10.5, 420)]
#[case(552_125, 10.69, 6)]
#[case(1_000, 0., 3)]
fn french_principal_sums_to_loan(
    #[case] principal: Money,
    #[case] rate: f64,
    #[case] months: u32,
) {
    let rows = project_french_amortization(principal, rate, months).unwrap();
    let total: Money = rows.iter().map(|row| row.principal).sum();
    assert!((total - principal).abs() <= rows.len() as Money);
    assert_eq!(rows.last().unwrap().balance, 0);
}

#[rstest]
#[case(1_200_000, 100_000, 12)]
#[case(1_000_000, 300_000, 4)]
#[case(99, 10, 10)]
fn zero_rate_schedules_divide_the_balance(
    #[case] balance: Money,
    #[case] payment: Money,
    #[case] months: usize,
) {
    let rows = project_compound_payoff(balance, 0., payment, DEFAULT_MAX_MONTHS);
    assert_eq!(rows.len(), months);
    assert!(rows.iter().all(|row| row.interest == 0));
    assert!(rows[..months - 1].iter().all(|row| row.principal == payment));
    assert_eq!(rows[months - 1].principal, balance - payment * (months as Money - 1));
    assert_eq!(rows[months - 1].balance, 0);
}

#[rstest]
#[case(28., 1)]
#[case(28., 50_000)]
#[case(28., 103_925)]
#[case(28., 150_000)]
#[case(28., 9_000_000)]
#[case(0., 150_000)]
#[case(0., 5_000_000)]
#[case(0., 9_000_000)]
fn split_payment_conserves_amount(#[case] rate: f64, #[case] amount: Money) {
    let debt = Debt::new(
        "card",
        "Visa",
        DebtKind::CreditCard,
        InterestType::Compound,
        5_000_000,
        rate,
        150_000,
    );
    let split = split_payment(&debt, amount);
    assert_eq!(split.principal + split.interest, amount);
    assert!(split.principal >= 0 && split.principal <= debt.current_balance);
}
