#![allow(dead_code)]

use chrono::NaiveDate;
use fincontrol_frontend::models::{
    Category, CategoryKind, CreditCard, Expense, ExpenseKind, Income, Vehicle, VehicleExpense,
    VehicleExpenseKind,
};
use fincontrol_frontend::recurrence::Recurrence;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn category(id: i64, name: &str, kind: CategoryKind) -> Category {
    Category {
        id: Some(id),
        name: name.to_string(),
        kind,
        color: None,
    }
}

pub fn categories() -> Vec<Category> {
    vec![
        category(1, "Moradia", CategoryKind::Despesa),
        category(2, "Transporte", CategoryKind::Despesa),
        category(3, "Salário", CategoryKind::Receita),
    ]
}

pub fn expense(description: &str, amount: f64, on: NaiveDate) -> Expense {
    Expense {
        id: None,
        description: description.to_string(),
        amount,
        date: on,
        category_id: None,
        account_id: None,
        card_id: None,
        paid: false,
        kind: ExpenseKind::Avulsa,
        recurrence: None,
        installments: None,
        consortium: None,
        notes: None,
    }
}

/// Three October purchases, a recurring gym fee from September and a
/// three-installment notebook bought in August.
pub fn expenses() -> Vec<Expense> {
    let mut rent = expense("Aluguel", 1500.0, date(2026, 10, 5));
    rent.category_id = Some(1);
    rent.account_id = Some(10);
    rent.paid = true;

    let mut fuel = expense("Combustível posto", 250.50, date(2026, 10, 12));
    fuel.category_id = Some(2);
    fuel.card_id = Some(20);

    let mut market = expense("Mercado", 480.25, date(2026, 10, 20));
    market.card_id = Some(20);

    let mut gym = expense("Academia", 100.0, date(2026, 9, 10));
    gym.category_id = Some(99);
    gym.kind = ExpenseKind::Recorrente;
    gym.recurrence = Some(Recurrence::Monthly { every: 1 });

    let mut notebook = expense("Notebook", 3000.0, date(2026, 8, 15));
    notebook.card_id = Some(20);
    notebook.kind = ExpenseKind::Parcelada;
    notebook.installments = Some(3);
    notebook.recurrence = Some(Recurrence::Installment {
        current: 1,
        total: 3,
    });

    vec![rent, fuel, market, gym, notebook]
}

pub fn incomes() -> Vec<Income> {
    let income = |description: &str, amount: f64, on: NaiveDate, received: bool| Income {
        id: None,
        description: description.to_string(),
        amount,
        date: on,
        category_id: Some(3),
        account_id: Some(10),
        received,
        recurring: false,
    };
    vec![
        income("Salário", 5000.0, date(2026, 10, 5), true),
        income("Freela", 800.0, date(2026, 10, 25), false),
        income("Bônus", 1000.0, date(2026, 9, 30), true),
    ]
}

pub fn card(id: i64, limit: f64, active: bool) -> CreditCard {
    CreditCard {
        id: Some(id),
        name: format!("Cartão {}", id),
        brand: None,
        limit,
        closing_day: 5,
        due_day: 12,
        account_id: None,
        active,
    }
}

/// 1000 km a month at 10 km/l and R$ 6,00 a litre, FIPE 60.000 losing 12% a year.
pub fn vehicle() -> Vehicle {
    Vehicle {
        id: Some(1),
        name: "Onix".to_string(),
        plate: Some("ABC1D23".to_string()),
        year: Some(2022),
        monthly_km: 1000.0,
        km_per_liter: 10.0,
        fuel_price: 6.0,
        market_value: 60_000.0,
        annual_depreciation_pct: Some(12.0),
    }
}

pub fn vehicle_expense(
    kind: VehicleExpenseKind,
    amount: f64,
    start: NaiveDate,
    rule: &str,
) -> VehicleExpense {
    VehicleExpense {
        id: None,
        vehicle_id: Some(1),
        kind,
        description: kind.label().to_string(),
        amount,
        start,
        recurrence: rule.parse().expect("valid recurrence"),
        active: true,
    }
}
