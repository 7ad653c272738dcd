//! Monthly cost consolidation for a vehicle.
//!
//! Predicted-expense records arrive with heterogeneous recurrences (monthly
//! insurance, yearly tax, fuel every other week, financing installment 7 of
//! 48, ...). Each record is expanded month by month over a horizon, then the
//! results are grouped by expense type and averaged into a rolling monthly
//! estimate.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::calendar::MonthRef;
use crate::format::{from_cents, round_cents, to_cents};
use crate::models::{Vehicle, VehicleExpense, VehicleExpenseKind};

pub const DEFAULT_HORIZON_MONTHS: u32 = 12;

#[derive(Debug, Clone, PartialEq)]
pub struct MonthProjection {
    pub month: MonthRef,
    pub total: f64,
    pub by_kind: BTreeMap<VehicleExpenseKind, f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KindSummary {
    pub kind: VehicleExpenseKind,
    /// Records behind this group; zero for synthesized costs.
    pub entries: usize,
    pub horizon_total: f64,
    /// Horizon total spread evenly over the horizon.
    pub monthly_estimate: f64,
    /// Amount × long-run occurrences per month, ignoring the horizon.
    pub long_run_monthly: f64,
    /// Derived from vehicle data rather than from records.
    pub estimated: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VehicleProjection {
    pub start: MonthRef,
    pub horizon_months: u32,
    pub months: Vec<MonthProjection>,
    pub groups: Vec<KindSummary>,
    pub monthly_estimate: f64,
    pub horizon_total: f64,
    pub annual_estimate: f64,
    pub cost_per_km: Option<f64>,
    pub fuel_estimated: bool,
}

#[derive(Default)]
struct GroupAcc {
    entries: usize,
    total_cents: i64,
    long_run: f64,
    estimated: bool,
}

fn belongs_to(vehicle: &Vehicle, record: &VehicleExpense) -> bool {
    match (record.vehicle_id, vehicle.id) {
        (Some(owner), Some(id)) => owner == id,
        _ => true,
    }
}

/// Consolidates `records` for `vehicle` over `horizon_months` months starting
/// at the month of `reference`. A zero horizon is treated as one month.
pub fn consolidate(
    vehicle: &Vehicle,
    records: &[VehicleExpense],
    reference: NaiveDate,
    horizon_months: u32,
) -> VehicleProjection {
    let horizon = horizon_months.max(1);
    let start = MonthRef::containing(reference);
    let calendar: Vec<MonthRef> = (0..horizon).map(|i| start.offset(i as i32)).collect();

    let active: Vec<&VehicleExpense> = records
        .iter()
        .filter(|r| r.active && belongs_to(vehicle, r))
        .collect();

    let mut months: Vec<MonthProjection> = calendar
        .iter()
        .map(|month| MonthProjection {
            month: *month,
            total: 0.0,
            by_kind: BTreeMap::new(),
        })
        .collect();
    let mut groups: BTreeMap<VehicleExpenseKind, GroupAcc> = BTreeMap::new();

    for record in &active {
        let group = groups.entry(record.kind).or_default();
        group.entries += 1;
        group.long_run += record.amount * record.recurrence.average_per_month();

        for projection in months.iter_mut() {
            let count = record
                .recurrence
                .occurrences_in_month(record.start, projection.month);
            if count == 0 {
                continue;
            }
            *projection.by_kind.entry(record.kind).or_insert(0.0) += record.amount * count as f64;
        }
    }

    let has_fuel_record = active
        .iter()
        .any(|r| r.kind == VehicleExpenseKind::Combustivel);
    let synthesized_fuel = if has_fuel_record {
        None
    } else {
        vehicle.estimated_monthly_fuel()
    };

    let synthesized = [
        (VehicleExpenseKind::Combustivel, synthesized_fuel),
        (
            VehicleExpenseKind::Depreciacao,
            vehicle.monthly_depreciation(),
        ),
    ];
    for (kind, monthly) in synthesized {
        let Some(monthly) = monthly else { continue };
        let group = groups.entry(kind).or_default();
        group.estimated = true;
        group.long_run += monthly;
        for projection in months.iter_mut() {
            *projection.by_kind.entry(kind).or_insert(0.0) += monthly;
        }
    }

    // Group and overall totals are sums of the rounded month cells, in cents.
    let mut horizon_cents = 0i64;
    for projection in months.iter_mut() {
        let mut month_cents = 0i64;
        for (kind, value) in projection.by_kind.iter_mut() {
            let cents = to_cents(*value);
            *value = from_cents(cents);
            month_cents += cents;
            if let Some(group) = groups.get_mut(kind) {
                group.total_cents += cents;
            }
        }
        projection.total = from_cents(month_cents);
        horizon_cents += month_cents;
    }

    let mut groups: Vec<KindSummary> = groups
        .into_iter()
        .map(|(kind, acc)| KindSummary {
            kind,
            entries: acc.entries,
            horizon_total: from_cents(acc.total_cents),
            monthly_estimate: round_cents(from_cents(acc.total_cents) / horizon as f64),
            long_run_monthly: round_cents(acc.long_run),
            estimated: acc.estimated,
        })
        .collect();
    groups.sort_by(|a, b| {
        b.horizon_total
            .total_cmp(&a.horizon_total)
            .then(a.kind.cmp(&b.kind))
    });

    let horizon_total = from_cents(horizon_cents);
    let monthly_estimate = round_cents(horizon_total / horizon as f64);
    let cost_per_km =
        (vehicle.monthly_km > 0.0).then(|| round_cents(monthly_estimate / vehicle.monthly_km));

    tracing::info!(
        vehicle = %vehicle.name,
        records = active.len(),
        horizon,
        monthly_estimate,
        "vehicle projection consolidated"
    );

    VehicleProjection {
        start,
        horizon_months: horizon,
        months,
        groups,
        monthly_estimate,
        horizon_total,
        annual_estimate: round_cents(monthly_estimate * 12.0),
        cost_per_km,
        fuel_estimated: synthesized_fuel.is_some(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recurrence::Recurrence;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn car() -> Vehicle {
        Vehicle {
            id: Some(1),
            name: "Onix".to_string(),
            plate: None,
            year: None,
            monthly_km: 1000.0,
            km_per_liter: 10.0,
            fuel_price: 6.0,
            market_value: 0.0,
            annual_depreciation_pct: None,
        }
    }

    fn record(kind: VehicleExpenseKind, amount: f64, start: NaiveDate, rule: &str) -> VehicleExpense {
        VehicleExpense {
            id: None,
            vehicle_id: Some(1),
            kind,
            description: String::new(),
            amount,
            start,
            recurrence: rule.parse().unwrap(),
            active: true,
        }
    }

    #[test]
    fn fuel_is_synthesized_without_a_fuel_record() {
        let projection = consolidate(&car(), &[], date(2026, 10, 19), 3);
        assert!(projection.fuel_estimated);
        assert_eq!(projection.monthly_estimate, 600.0);
        assert_eq!(projection.horizon_total, 1800.0);
        assert_eq!(projection.cost_per_km, Some(0.6));
    }

    #[test]
    fn explicit_fuel_record_replaces_the_estimate() {
        let records = [record(
            VehicleExpenseKind::Combustivel,
            250.0,
            date(2026, 10, 1),
            "quinzenal",
        )];
        let projection = consolidate(&car(), &records, date(2026, 10, 19), 1);
        assert!(!projection.fuel_estimated);
        // Thursdays every two weeks from 10-01: 1, 15, 29.
        assert_eq!(projection.months[0].total, 750.0);
        assert_eq!(projection.groups[0].entries, 1);
    }

    #[test]
    fn records_of_other_vehicles_are_ignored() {
        let mut other = record(VehicleExpenseKind::Seguro, 100.0, date(2026, 1, 1), "mensal");
        other.vehicle_id = Some(2);
        let projection = consolidate(&car(), &[other], date(2026, 10, 1), 1);
        assert!(projection
            .groups
            .iter()
            .all(|g| g.kind != VehicleExpenseKind::Seguro));
    }

    #[test]
    fn long_run_uses_average_rate() {
        let records = [record(
            VehicleExpenseKind::Ipva,
            1200.0,
            date(2026, 1, 15),
            "anual",
        )];
        let projection = consolidate(&car(), &records, date(2026, 10, 1), 12);
        let ipva = projection
            .groups
            .iter()
            .find(|g| g.kind == VehicleExpenseKind::Ipva)
            .unwrap();
        assert_eq!(ipva.long_run_monthly, 100.0);
        assert_eq!(ipva.horizon_total, 1200.0);
        assert_eq!(ipva.monthly_estimate, 100.0);
        assert_eq!(
            Recurrence::Yearly.occurrences_in_month(date(2026, 1, 15), MonthRef::new(2027, 1).unwrap()),
            1
        );
    }
}
