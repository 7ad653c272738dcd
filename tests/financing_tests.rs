mod common;

use common::date;
use fincontrol_frontend::errors::CalcError;
use fincontrol_frontend::financing::{AmortizationSystem, AmortizationTable, FinancingTerms};
use fincontrol_frontend::format::to_cents;

fn terms(principal: f64, rate: f64, months: u32, system: AmortizationSystem) -> FinancingTerms {
    FinancingTerms {
        principal,
        monthly_rate_pct: rate,
        term_months: months,
        system,
        first_due: date(2027, 1, 31),
    }
}

fn assert_consistent(table: &AmortizationTable, principal: f64) {
    let last = table.rows.last().expect("at least one row");
    assert_eq!(last.balance, 0.0);

    let repaid: i64 = table
        .rows
        .iter()
        .map(|r| to_cents(r.amortization) + to_cents(r.extra))
        .sum();
    assert_eq!(repaid, to_cents(principal));

    let paid: i64 = table
        .rows
        .iter()
        .map(|r| to_cents(r.payment) + to_cents(r.extra))
        .sum();
    assert_eq!(paid, to_cents(table.total_paid));
    assert_eq!(
        to_cents(table.total_paid),
        to_cents(principal) + to_cents(table.total_interest)
    );
}

#[test]
fn price_keeps_payments_constant() {
    let table = terms(10_000.0, 2.0, 12, AmortizationSystem::Price)
        .amortization_table()
        .expect("valid terms");

    assert_eq!(table.rows.len(), 12);
    assert!(table.rows[..11].iter().all(|r| r.payment == 945.60));
    assert_eq!(table.last_payment(), Some(945.55));
    assert_eq!(table.total_interest, 1347.15);
    assert_consistent(&table, 10_000.0);

    let interests: Vec<f64> = table.rows.iter().map(|r| r.interest).collect();
    assert!(interests.windows(2).all(|w| w[0] > w[1]));
}

#[test]
fn sac_keeps_amortization_constant() {
    let table = terms(12_000.0, 1.0, 12, AmortizationSystem::Sac)
        .amortization_table()
        .expect("valid terms");

    assert!(table.rows.iter().all(|r| r.amortization == 1000.0));
    assert_eq!(table.first_payment(), Some(1120.0));
    assert_eq!(table.last_payment(), Some(1010.0));
    assert_eq!(table.total_interest, 780.0);
    assert_consistent(&table, 12_000.0);
}

#[test]
fn due_dates_are_monthly_from_the_first_due() {
    let table = terms(1200.0, 0.0, 3, AmortizationSystem::Price)
        .amortization_table()
        .expect("valid terms");
    let dates: Vec<_> = table.rows.iter().map(|r| r.due_date).collect();
    assert_eq!(dates, vec![date(2027, 1, 31), date(2027, 2, 28), date(2027, 3, 31)]);
    assert!(table.rows.iter().all(|r| r.payment == 400.0 && r.interest == 0.0));
}

#[test]
fn prepayment_shortens_the_term() {
    let terms = terms(10_000.0, 2.0, 12, AmortizationSystem::Price);
    let baseline = terms.amortization_table().expect("valid terms");
    let table = terms.with_prepayment(3, 3000.0).expect("valid prepayment");

    assert_eq!(table.rows.len(), 9);
    assert_eq!(table.rows[2].extra, 3000.0);
    assert_eq!(table.rows[2].payment, 945.60);
    assert_eq!(table.total_interest, 858.86);
    assert!(table.total_interest < baseline.total_interest);
    assert_consistent(&table, 10_000.0);
}

#[test]
fn oversized_prepayment_settles_the_loan() {
    let table = terms(12_000.0, 1.0, 12, AmortizationSystem::Sac)
        .with_prepayment(2, 50_000.0)
        .expect("valid prepayment");
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[1].extra, 10_000.0);
    assert_consistent(&table, 12_000.0);
}

#[test]
fn invalid_terms_are_rejected() {
    assert_eq!(
        terms(10_000.0, 1.0, 0, AmortizationSystem::Price).amortization_table(),
        Err(CalcError::ZeroTerm)
    );
    assert!(terms(0.0, 1.0, 12, AmortizationSystem::Sac)
        .amortization_table()
        .is_err());
    assert!(terms(10_000.0, -1.0, 12, AmortizationSystem::Price)
        .amortization_table()
        .is_err());
    assert!(terms(10_000.0, 1.0, 12, AmortizationSystem::Price)
        .with_prepayment(3, 0.0)
        .is_err());
}

#[test]
fn prepayment_outside_the_term_is_rejected() {
    let terms = terms(10_000.0, 2.0, 12, AmortizationSystem::Price);
    assert_eq!(
        terms.with_prepayment(0, 1000.0),
        Err(CalcError::PrepaymentOutOfRange(0))
    );
    assert_eq!(
        terms.with_prepayment(12, 1000.0),
        Err(CalcError::PrepaymentOutOfRange(12))
    );
    assert_eq!(
        terms.with_prepayment(40, 1000.0),
        Err(CalcError::PrepaymentOutOfRange(40))
    );
    let table = terms.with_prepayment(11, 500.0).expect("last row left to shorten");
    assert_eq!(table.rows[10].extra, 500.0);
    assert_consistent(&table, 10_000.0);
}
