mod common;

use common::{card, categories, expenses, incomes};
use fincontrol_frontend::calendar::MonthRef;
use fincontrol_frontend::filters::{
    card_usage, expense_totals, income_totals, month_summary, totals_by_category, ExpenseFilter,
    IncomeFilter, StatusFilter,
};
use fincontrol_frontend::models::category::UNCATEGORIZED;
use fincontrol_frontend::models::ExpenseKind;

fn october() -> MonthRef {
    MonthRef::new(2026, 10).expect("valid month")
}

fn descriptions<T>(items: &[T], describe: impl Fn(&T) -> &str) -> Vec<String> {
    items.iter().map(|i| describe(i).to_string()).collect()
}

#[test]
fn month_filter_sorts_newest_first() {
    let filter = ExpenseFilter {
        month: Some(october()),
        ..ExpenseFilter::default()
    };
    let visible = filter.apply(&expenses());
    assert_eq!(
        descriptions(&visible, |e| e.description.as_str()),
        vec!["Mercado", "Combustível posto", "Aluguel"]
    );

    let totals = expense_totals(&visible);
    assert_eq!(totals.count, 3);
    assert_eq!(totals.total, 2230.75);
    assert_eq!(totals.settled, 1500.0);
    assert_eq!(totals.pending, 730.75);
}

#[test]
fn card_and_status_filters_combine() {
    let filter = ExpenseFilter {
        card_id: Some(20),
        status: StatusFilter::Pending,
        ..ExpenseFilter::default()
    };
    let visible = filter.apply(&expenses());
    assert_eq!(
        descriptions(&visible, |e| e.description.as_str()),
        vec!["Mercado", "Combustível posto", "Notebook"]
    );

    let paid_only = ExpenseFilter {
        status: StatusFilter::Settled,
        ..ExpenseFilter::default()
    };
    assert_eq!(paid_only.apply(&expenses()).len(), 1);
}

#[test]
fn search_ignores_case_and_kind_narrows() {
    let search = ExpenseFilter {
        search: "  MERC ".to_string(),
        ..ExpenseFilter::default()
    };
    assert_eq!(
        descriptions(&search.apply(&expenses()), |e| e.description.as_str()),
        vec!["Mercado"]
    );

    let recurring = ExpenseFilter {
        kind: Some(ExpenseKind::Recorrente),
        ..ExpenseFilter::default()
    };
    assert_eq!(
        descriptions(&recurring.apply(&expenses()), |e| e.description.as_str()),
        vec!["Academia"]
    );
}

#[test]
fn category_totals_group_unknown_ids_as_uncategorized() {
    let filter = ExpenseFilter {
        month: Some(october()),
        ..ExpenseFilter::default()
    };
    let by_category = totals_by_category(&filter.apply(&expenses()), &categories());
    let rows: Vec<(&str, f64, f64)> = by_category
        .iter()
        .map(|c| (c.name.as_str(), c.total, c.share_pct))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("Moradia", 1500.0, 67.24),
            (UNCATEGORIZED, 480.25, 21.53),
            ("Transporte", 250.5, 11.23),
        ]
    );

    let everything = totals_by_category(&expenses(), &categories());
    let uncategorized = everything
        .iter()
        .find(|c| c.category_id.is_none())
        .expect("uncategorized bucket");
    assert_eq!(uncategorized.total, 580.25);
    assert!(totals_by_category(&[], &categories()).is_empty());
}

#[test]
fn income_filter_and_totals() {
    let filter = IncomeFilter {
        month: Some(october()),
        ..IncomeFilter::default()
    };
    let october_incomes = filter.apply(&incomes());
    let totals = income_totals(&october_incomes);
    assert_eq!(totals.count, 2);
    assert_eq!(totals.total, 5800.0);
    assert_eq!(totals.settled, 5000.0);
    assert_eq!(totals.pending, 800.0);

    let pending = IncomeFilter {
        month: Some(october()),
        status: StatusFilter::Pending,
        ..IncomeFilter::default()
    };
    assert_eq!(
        descriptions(&pending.apply(&incomes()), |i| i.description.as_str()),
        vec!["Freela"]
    );
}

#[test]
fn month_summary_counts_commitments_per_installment() {
    let summary = month_summary(&expenses(), &incomes(), october());
    assert_eq!(summary.income, 5800.0);
    assert_eq!(summary.expenses, 2230.75);
    assert_eq!(summary.balance, 3569.25);
    // Gym fee plus the third notebook installment.
    assert_eq!(summary.committed, 1100.0);

    let november = month_summary(&expenses(), &incomes(), october().next());
    assert_eq!(november.income, 0.0);
    assert_eq!(november.committed, 100.0);
}

#[test]
fn card_usage_counts_pending_purchases_on_active_cards() {
    let cards = [card(20, 4000.0, true), card(21, 1000.0, false), card(22, 0.0, true)];
    let usage = card_usage(&cards, &expenses());
    assert_eq!(usage.len(), 2);

    assert_eq!(usage[0].card.id, Some(20));
    assert_eq!(usage[0].used, 3730.75);
    assert_eq!(usage[0].available, 269.25);
    assert_eq!(usage[0].usage_pct, 93.27);

    assert_eq!(usage[1].used, 0.0);
    assert_eq!(usage[1].usage_pct, 0.0);
}
