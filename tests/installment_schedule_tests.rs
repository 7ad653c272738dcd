mod common;

use common::date;
use fincontrol_frontend::errors::CalcError;
use fincontrol_frontend::format::to_cents;
use fincontrol_frontend::schedule::{
    invoice_label, open_installments, project_installments, split_amount, CardCycle,
};

#[test]
fn split_always_adds_up() {
    assert_eq!(split_amount(100.0, 3), Ok(vec![33.34, 33.33, 33.33]));
    for (total, count) in [(1999.99, 7), (0.05, 3), (1234.56, 12)] {
        let parts = split_amount(total, count).expect("valid split");
        assert_eq!(parts.len(), count as usize);
        let cents: i64 = parts.iter().map(|p| to_cents(*p)).sum();
        assert_eq!(cents, to_cents(total));
        assert!(parts[0] >= parts[count as usize - 1]);
    }
    assert_eq!(split_amount(100.0, 0), Err(CalcError::ZeroInstallments));
    assert!(split_amount(0.0, 2).is_err());
}

#[test]
fn purchase_on_closing_day_goes_to_next_invoice() {
    let cycle = CardCycle::new(10, 20).expect("valid cycle");
    assert_eq!(cycle.first_due(date(2026, 10, 9)), Some(date(2026, 10, 20)));
    assert_eq!(cycle.first_due(date(2026, 10, 10)), Some(date(2026, 11, 20)));
    assert_eq!(
        invoice_label(&cycle, date(2026, 10, 10)).as_deref(),
        Some("Fatura 11/2026")
    );
}

#[test]
fn due_day_before_closing_day_falls_in_following_month() {
    let cycle = CardCycle::new(25, 5).expect("valid cycle");
    assert_eq!(cycle.first_due(date(2026, 10, 24)), Some(date(2026, 11, 5)));
    assert_eq!(cycle.first_due(date(2026, 10, 26)), Some(date(2026, 12, 5)));
}

#[test]
fn card_installments_land_on_consecutive_invoices() {
    let cycle = CardCycle::new(20, 31).expect("valid cycle");
    let schedule =
        project_installments(date(2027, 1, 25), 900.0, 3, Some(cycle)).expect("valid schedule");
    let dates: Vec<_> = schedule.iter().map(|i| i.due_date).collect();
    assert_eq!(
        dates,
        vec![date(2027, 2, 28), date(2027, 3, 31), date(2027, 4, 30)]
    );
    assert!(schedule.iter().all(|i| i.amount == 300.0));
    assert_eq!(
        schedule.iter().map(|i| i.number).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
}

#[test]
fn installments_without_card_repeat_the_first_due_day() {
    let schedule = project_installments(date(2026, 1, 31), 100.0, 3, None).expect("valid schedule");
    let dates: Vec<_> = schedule.iter().map(|i| i.due_date).collect();
    assert_eq!(
        dates,
        vec![date(2026, 1, 31), date(2026, 2, 28), date(2026, 3, 31)]
    );
    assert_eq!(schedule[0].amount, 33.34);

    let open = open_installments(&schedule, date(2026, 2, 28));
    assert_eq!(open.len(), 2);
    assert_eq!(open[0].number, 2);
}

#[test]
fn invalid_card_days_are_rejected() {
    assert_eq!(CardCycle::new(0, 10), Err(CalcError::DayOutOfRange(0)));
    assert_eq!(CardCycle::new(10, 32), Err(CalcError::DayOutOfRange(32)));
}
