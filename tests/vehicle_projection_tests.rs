mod common;

use common::{date, vehicle, vehicle_expense};
use fincontrol_frontend::models::VehicleExpenseKind;
use fincontrol_frontend::vehicle::{consolidate, KindSummary, VehicleProjection};

fn group(projection: &VehicleProjection, kind: VehicleExpenseKind) -> &KindSummary {
    projection
        .groups
        .iter()
        .find(|g| g.kind == kind)
        .unwrap_or_else(|| panic!("missing group {:?}", kind))
}

fn records() -> Vec<fincontrol_frontend::models::VehicleExpense> {
    let mut washing = vehicle_expense(VehicleExpenseKind::Lavagem, 50.0, date(2026, 10, 1), "semanal");
    washing.active = false;
    let mut other_car = vehicle_expense(VehicleExpenseKind::Seguro, 999.0, date(2026, 1, 1), "mensal");
    other_car.vehicle_id = Some(2);

    vec![
        vehicle_expense(VehicleExpenseKind::Seguro, 200.0, date(2026, 1, 15), "mensal"),
        vehicle_expense(VehicleExpenseKind::Ipva, 2400.0, date(2026, 2, 10), "anual"),
        vehicle_expense(VehicleExpenseKind::Manutencao, 500.0, date(2026, 10, 1), "mensal:6"),
        vehicle_expense(VehicleExpenseKind::Financiamento, 1000.0, date(2026, 10, 5), "parcela:7/10"),
        washing,
        other_car,
    ]
}

#[test]
fn twelve_month_projection_consolidates_every_group() {
    let projection = consolidate(&vehicle(), &records(), date(2026, 10, 19), 12);

    assert_eq!(projection.horizon_months, 12);
    assert_eq!(projection.months.len(), 12);
    assert!(projection.fuel_estimated);

    assert_eq!(group(&projection, VehicleExpenseKind::Combustivel).horizon_total, 7200.0);
    assert!(group(&projection, VehicleExpenseKind::Combustivel).estimated);
    assert_eq!(group(&projection, VehicleExpenseKind::Depreciacao).horizon_total, 7200.0);
    assert_eq!(group(&projection, VehicleExpenseKind::Seguro).horizon_total, 2400.0);
    assert_eq!(group(&projection, VehicleExpenseKind::Ipva).horizon_total, 2400.0);
    assert_eq!(group(&projection, VehicleExpenseKind::Manutencao).horizon_total, 1000.0);
    let financing = group(&projection, VehicleExpenseKind::Financiamento);
    assert_eq!(financing.horizon_total, 4000.0);
    assert_eq!(financing.entries, 1);

    assert!(projection
        .groups
        .iter()
        .all(|g| g.kind != VehicleExpenseKind::Lavagem));
    assert_eq!(projection.horizon_total, 24_200.0);
    assert_eq!(projection.monthly_estimate, 2016.67);
    assert_eq!(projection.annual_estimate, 24_200.04);
    assert_eq!(projection.cost_per_km, Some(2.02));
}

#[test]
fn groups_sum_to_summary_and_sort_by_total() {
    let projection = consolidate(&vehicle(), &records(), date(2026, 10, 19), 12);

    let group_sum: f64 = projection.groups.iter().map(|g| g.horizon_total).sum();
    let month_sum: f64 = projection.months.iter().map(|m| m.total).sum();
    assert!((group_sum - projection.horizon_total).abs() < 0.005);
    assert!((month_sum - projection.horizon_total).abs() < 0.005);

    let totals: Vec<f64> = projection.groups.iter().map(|g| g.horizon_total).collect();
    let mut sorted = totals.clone();
    sorted.sort_by(|a, b| b.total_cmp(a));
    assert_eq!(totals, sorted);
    assert_eq!(projection.groups[0].kind, VehicleExpenseKind::Combustivel);
}

#[test]
fn month_table_follows_each_recurrence() {
    let projection = consolidate(&vehicle(), &records(), date(2026, 10, 19), 12);
    let month = |i: usize| &projection.months[i];

    assert_eq!(month(0).month.to_string(), "2026-10");
    // Fuel, depreciation, insurance, maintenance and installment 7 of 10.
    assert_eq!(month(0).total, 600.0 + 600.0 + 200.0 + 500.0 + 1000.0);
    // February 2027 carries the yearly tax; the financing ended in January.
    assert_eq!(
        month(4).by_kind.get(&VehicleExpenseKind::Ipva).copied(),
        Some(2400.0)
    );
    assert_eq!(
        month(4).by_kind.get(&VehicleExpenseKind::Financiamento),
        None
    );
    assert_eq!(
        month(6).by_kind.get(&VehicleExpenseKind::Manutencao).copied(),
        Some(500.0)
    );
}

#[test]
fn weekly_fuel_record_disables_the_estimate() {
    let records = [vehicle_expense(
        VehicleExpenseKind::Combustivel,
        150.0,
        date(2026, 10, 5),
        "semanal:1:1",
    )];
    let projection = consolidate(&vehicle(), &records, date(2026, 10, 1), 1);

    assert!(!projection.fuel_estimated);
    let fuel = group(&projection, VehicleExpenseKind::Combustivel);
    assert!(!fuel.estimated);
    // Mondays 5, 12, 19 and 26.
    assert_eq!(fuel.horizon_total, 600.0);
    assert_eq!(fuel.long_run_monthly, 652.23);
}

#[test]
fn zero_horizon_is_one_month() {
    let projection = consolidate(&vehicle(), &[], date(2026, 10, 19), 0);
    assert_eq!(projection.horizon_months, 1);
    assert_eq!(projection.months.len(), 1);
    assert_eq!(projection.monthly_estimate, 1200.0);
}

#[test]
fn fractional_monthly_costs_keep_groups_and_summary_equal() {
    let mut car = vehicle();
    car.market_value = 80_000.0;
    car.annual_depreciation_pct = Some(7.0);
    car.km_per_liter = 13.0;
    car.fuel_price = 5.89;

    let projection = consolidate(&car, &[], date(2026, 10, 19), 12);

    // 80.000 × 7% / 12 = 466,666... and 1000 / 13 × 5,89 = 453,0769...
    assert_eq!(group(&projection, VehicleExpenseKind::Depreciacao).horizon_total, 5600.04);
    assert_eq!(group(&projection, VehicleExpenseKind::Combustivel).horizon_total, 5436.96);
    assert_eq!(projection.months[0].total, 919.75);
    assert_eq!(projection.horizon_total, 11_037.0);

    let group_cents: i64 = projection
        .groups
        .iter()
        .map(|g| (g.horizon_total * 100.0).round() as i64)
        .sum();
    assert_eq!(group_cents, (projection.horizon_total * 100.0).round() as i64);
}
