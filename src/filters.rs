//! Client-side filtering and aggregation over lists already fetched from the
//! backend.

use std::collections::HashMap;

use crate::calendar::MonthRef;
use crate::format::round_cents;
use crate::models::category::{category_name, UNCATEGORIZED};
use crate::models::{Category, CreditCard, Expense, ExpenseKind, Income};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    /// Paid expenses / received income.
    Settled,
    Pending,
}

impl StatusFilter {
    fn accepts(&self, settled: bool) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Settled => settled,
            StatusFilter::Pending => !settled,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            StatusFilter::All => "todos",
            StatusFilter::Settled => "quitados",
            StatusFilter::Pending => "pendentes",
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code {
            "quitados" => StatusFilter::Settled,
            "pendentes" => StatusFilter::Pending,
            _ => StatusFilter::All,
        }
    }
}

fn matches_search(text: &str, needle: &str) -> bool {
    let needle = needle.trim();
    needle.is_empty() || text.to_lowercase().contains(&needle.to_lowercase())
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExpenseFilter {
    pub month: Option<MonthRef>,
    pub category_id: Option<i64>,
    pub account_id: Option<i64>,
    pub card_id: Option<i64>,
    pub status: StatusFilter,
    pub kind: Option<ExpenseKind>,
    pub search: String,
}

impl ExpenseFilter {
    pub fn matches(&self, expense: &Expense) -> bool {
        self.month.map_or(true, |m| m.contains(expense.date))
            && self
                .category_id
                .map_or(true, |id| expense.category_id == Some(id))
            && self
                .account_id
                .map_or(true, |id| expense.account_id == Some(id))
            && self.card_id.map_or(true, |id| expense.card_id == Some(id))
            && self.kind.map_or(true, |k| expense.kind == k)
            && self.status.accepts(expense.paid)
            && matches_search(&expense.description, &self.search)
    }

    /// Matching expenses, newest first.
    pub fn apply(&self, expenses: &[Expense]) -> Vec<Expense> {
        let mut out: Vec<Expense> = expenses
            .iter()
            .filter(|e| self.matches(e))
            .cloned()
            .collect();
        out.sort_by(|a, b| b.date.cmp(&a.date));
        out
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct IncomeFilter {
    pub month: Option<MonthRef>,
    pub category_id: Option<i64>,
    pub account_id: Option<i64>,
    pub status: StatusFilter,
    pub search: String,
}

impl IncomeFilter {
    pub fn matches(&self, income: &Income) -> bool {
        self.month.map_or(true, |m| m.contains(income.date))
            && self
                .category_id
                .map_or(true, |id| income.category_id == Some(id))
            && self
                .account_id
                .map_or(true, |id| income.account_id == Some(id))
            && self.status.accepts(income.received)
            && matches_search(&income.description, &self.search)
    }

    pub fn apply(&self, incomes: &[Income]) -> Vec<Income> {
        let mut out: Vec<Income> = incomes
            .iter()
            .filter(|i| self.matches(i))
            .cloned()
            .collect();
        out.sort_by(|a, b| b.date.cmp(&a.date));
        out
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Totals {
    pub count: usize,
    pub total: f64,
    pub settled: f64,
    pub pending: f64,
}

fn totals_of(items: impl Iterator<Item = (f64, bool)>) -> Totals {
    let mut totals = Totals::default();
    for (amount, settled) in items {
        totals.count += 1;
        totals.total += amount;
        if settled {
            totals.settled += amount;
        } else {
            totals.pending += amount;
        }
    }
    totals.total = round_cents(totals.total);
    totals.settled = round_cents(totals.settled);
    totals.pending = round_cents(totals.pending);
    totals
}

pub fn expense_totals(expenses: &[Expense]) -> Totals {
    totals_of(expenses.iter().map(|e| (e.amount, e.paid)))
}

pub fn income_totals(incomes: &[Income]) -> Totals {
    totals_of(incomes.iter().map(|i| (i.amount, i.received)))
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category_id: Option<i64>,
    pub name: String,
    pub total: f64,
    pub share_pct: f64,
}

/// Expenses grouped by category, largest first. Ids missing from
/// `categories` land in the uncategorized bucket.
pub fn totals_by_category(expenses: &[Expense], categories: &[Category]) -> Vec<CategoryTotal> {
    let known = |id: Option<i64>| id.filter(|id| categories.iter().any(|c| c.id == Some(*id)));

    let mut sums: HashMap<Option<i64>, f64> = HashMap::new();
    for expense in expenses {
        *sums.entry(known(expense.category_id)).or_insert(0.0) += expense.amount;
    }

    let grand_total: f64 = sums.values().sum();
    let mut out: Vec<CategoryTotal> = sums
        .into_iter()
        .map(|(category_id, total)| CategoryTotal {
            category_id,
            name: match category_id {
                Some(_) => category_name(categories, category_id),
                None => UNCATEGORIZED.to_string(),
            },
            total: round_cents(total),
            share_pct: if grand_total > 0.0 {
                round_cents(total / grand_total * 100.0)
            } else {
                0.0
            },
        })
        .collect();
    out.sort_by(|a, b| b.total.total_cmp(&a.total).then(a.name.cmp(&b.name)));
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MonthSummary {
    pub income: f64,
    pub expenses: f64,
    pub balance: f64,
    /// Recurring/installment commitments expected this month.
    pub committed: f64,
}

pub fn month_summary(expenses: &[Expense], incomes: &[Income], month: MonthRef) -> MonthSummary {
    let income: f64 = incomes
        .iter()
        .filter(|i| month.contains(i.date))
        .map(|i| i.amount)
        .sum();
    let spent: f64 = expenses
        .iter()
        .filter(|e| month.contains(e.date))
        .map(|e| e.amount)
        .sum();
    let committed: f64 = expenses
        .iter()
        .filter(|e| e.kind != ExpenseKind::Avulsa)
        .map(|e| e.amount_in(month))
        .sum();

    MonthSummary {
        income: round_cents(income),
        expenses: round_cents(spent),
        balance: round_cents(income - spent),
        committed: round_cents(committed),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardUsage {
    pub card: CreditCard,
    pub used: f64,
    pub available: f64,
    pub usage_pct: f64,
}

/// Limit used by unpaid expenses on each active card.
pub fn card_usage(cards: &[CreditCard], expenses: &[Expense]) -> Vec<CardUsage> {
    cards
        .iter()
        .filter(|c| c.active)
        .map(|card| {
            let used: f64 = expenses
                .iter()
                .filter(|e| !e.paid && e.card_id.is_some() && e.card_id == card.id)
                .map(|e| e.amount)
                .sum();
            CardUsage {
                card: card.clone(),
                used: round_cents(used),
                available: round_cents(card.limit - used),
                usage_pct: if card.limit > 0.0 {
                    round_cents(used / card.limit * 100.0)
                } else {
                    0.0
                },
            }
        })
        .collect()
}
