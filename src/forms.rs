//! Form state for every modal. Fields hold the raw text typed by the user;
//! `to_record` parses and validates it into the record that gets posted.

use crate::consortium::{ConsortiumEstimate, ConsortiumTerms};
use crate::errors::{AppError, ValidationError};
use crate::financing::{monthly_rate_from_annual, AmortizationSystem};
use crate::format::input_date;
use crate::models::{
    Account, AccountKind, Category, CategoryKind, CreditCard, Expense, ExpenseKind, Financing,
    Income, Vehicle, VehicleExpense, VehicleExpenseKind,
};
use crate::recurrence::{weekday_from_number, Recurrence};
use crate::schedule::{project_installments, CardCycle, Installment};
use crate::validation::{
    parse_count, parse_optional_amount, parse_optional_id, parse_required_amount,
    parse_required_date, required,
};

fn amount_text(value: f64) -> String {
    if value == 0.0 {
        String::new()
    } else {
        format!("{:.2}", value)
    }
}

fn id_text(id: Option<i64>) -> String {
    id.map(|id| id.to_string()).unwrap_or_default()
}

fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn today_text() -> String {
    input_date(chrono::Local::now().date_naive())
}

/// Recurrence chosen through the frequency/interval/weekday controls.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecurrenceFields {
    /// `mensal`, `anual`, `semanal`, `unica`, `parcela` or a raw encoding.
    pub frequency: String,
    pub interval: String,
    /// 0 = Sunday … 6 = Saturday; blank follows the start date.
    pub weekday: String,
    /// Installment number on the start date, for `parcela`.
    pub current: String,
    pub total: String,
}

impl RecurrenceFields {
    pub fn from_recurrence(rule: &Recurrence) -> Self {
        match *rule {
            Recurrence::Monthly { every } => Self {
                frequency: "mensal".into(),
                interval: every.to_string(),
                ..Self::default()
            },
            Recurrence::Weekly { every, weekday } => Self {
                frequency: "semanal".into(),
                interval: every.to_string(),
                weekday: weekday
                    .map(|d| d.num_days_from_sunday().to_string())
                    .unwrap_or_default(),
                ..Self::default()
            },
            Recurrence::Yearly => Self {
                frequency: "anual".into(),
                ..Self::default()
            },
            Recurrence::Once => Self {
                frequency: "unica".into(),
                ..Self::default()
            },
            Recurrence::Installment { current, total } => Self {
                frequency: "parcela".into(),
                current: current.to_string(),
                total: total.to_string(),
                ..Self::default()
            },
        }
    }

    fn interval(&self) -> Result<u32, ValidationError> {
        if self.interval.trim().is_empty() {
            return Ok(1);
        }
        match parse_count(&self.interval, "intervalo")? {
            0 => Err(ValidationError::Invalid {
                field: "intervalo",
                reason: "deve ser pelo menos 1".to_string(),
            }),
            n => Ok(n),
        }
    }

    pub fn to_recurrence(&self) -> Result<Recurrence, ValidationError> {
        match self.frequency.trim() {
            "" => Err(ValidationError::Required("recorrência")),
            "mensal" => Ok(Recurrence::Monthly {
                every: self.interval()?,
            }),
            "anual" => Ok(Recurrence::Yearly),
            "unica" => Ok(Recurrence::Once),
            "parcela" => {
                let total = parse_count(&self.total, "total de parcelas")?;
                let current = if self.current.trim().is_empty() {
                    1
                } else {
                    parse_count(&self.current, "parcela atual")?
                };
                if total == 0 || current == 0 || current > total {
                    return Err(ValidationError::Invalid {
                        field: "parcela atual",
                        reason: format!("use um número de 1 a {}", total.max(1)),
                    });
                }
                Ok(Recurrence::Installment { current, total })
            }
            "semanal" => {
                let weekday = if self.weekday.trim().is_empty() {
                    None
                } else {
                    let day = self.weekday.trim().parse::<u32>().ok().and_then(weekday_from_number);
                    Some(day.ok_or_else(|| ValidationError::Invalid {
                        field: "dia da semana",
                        reason: "use 0 (domingo) a 6 (sábado)".to_string(),
                    })?)
                };
                Ok(Recurrence::Weekly {
                    every: self.interval()?,
                    weekday,
                })
            }
            raw => raw.parse::<Recurrence>().map_err(|e| ValidationError::Invalid {
                field: "recorrência",
                reason: e.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AccountForm {
    pub name: String,
    pub bank: String,
    pub kind: String,
    pub opening_balance: String,
}

impl AccountForm {
    pub fn from_record(account: &Account) -> Self {
        Self {
            name: account.name.clone(),
            bank: account.bank.clone().unwrap_or_default(),
            kind: account.kind.code().to_string(),
            opening_balance: amount_text(account.opening_balance),
        }
    }

    pub fn to_record(&self, id: Option<i64>) -> Result<Account, ValidationError> {
        let account = Account {
            id,
            name: self.name.trim().to_string(),
            bank: optional_text(&self.bank),
            kind: AccountKind::from_code(&self.kind),
            opening_balance: parse_optional_amount(&self.opening_balance, "saldo inicial")?,
            current_balance: None,
            active: true,
        };
        account.validate()?;
        Ok(account)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CardForm {
    pub name: String,
    pub brand: String,
    pub limit: String,
    pub closing_day: String,
    pub due_day: String,
    pub account_id: String,
}

impl CardForm {
    pub fn from_record(card: &CreditCard) -> Self {
        Self {
            name: card.name.clone(),
            brand: card.brand.clone().unwrap_or_default(),
            limit: amount_text(card.limit),
            closing_day: card.closing_day.to_string(),
            due_day: card.due_day.to_string(),
            account_id: id_text(card.account_id),
        }
    }

    pub fn to_record(&self, id: Option<i64>) -> Result<CreditCard, ValidationError> {
        required(&self.name, "nome")?;
        let card = CreditCard {
            id,
            name: self.name.trim().to_string(),
            brand: optional_text(&self.brand),
            limit: parse_optional_amount(&self.limit, "limite")?,
            closing_day: parse_count(&self.closing_day, "dia de fechamento")?,
            due_day: parse_count(&self.due_day, "dia de vencimento")?,
            account_id: parse_optional_id(&self.account_id),
            active: true,
        };
        card.validate()?;
        Ok(card)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategoryForm {
    pub name: String,
    pub kind: String,
    pub color: String,
}

impl CategoryForm {
    pub fn from_record(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            kind: match category.kind {
                CategoryKind::Despesa => "despesa".into(),
                CategoryKind::Receita => "receita".into(),
            },
            color: category.color.clone().unwrap_or_default(),
        }
    }

    pub fn to_record(&self, id: Option<i64>) -> Result<Category, ValidationError> {
        let category = Category {
            id,
            name: self.name.trim().to_string(),
            kind: if self.kind == "receita" {
                CategoryKind::Receita
            } else {
                CategoryKind::Despesa
            },
            color: optional_text(&self.color),
        };
        category.validate()?;
        Ok(category)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseForm {
    pub description: String,
    pub amount: String,
    pub date: String,
    pub category_id: String,
    pub account_id: String,
    pub card_id: String,
    pub paid: bool,
    pub kind: String,
    pub recurrence: RecurrenceFields,
    pub installments: String,
    pub credit_value: String,
    pub term_months: String,
    pub admin_fee_pct: String,
    pub reserve_fund_pct: String,
    pub insurance_pct: String,
    pub bid_pct: String,
    pub notes: String,
}

impl Default for ExpenseForm {
    fn default() -> Self {
        Self {
            description: String::new(),
            amount: String::new(),
            date: today_text(),
            category_id: String::new(),
            account_id: String::new(),
            card_id: String::new(),
            paid: false,
            kind: ExpenseKind::Avulsa.code().to_string(),
            recurrence: RecurrenceFields {
                frequency: "mensal".into(),
                ..RecurrenceFields::default()
            },
            installments: String::new(),
            credit_value: String::new(),
            term_months: String::new(),
            admin_fee_pct: String::new(),
            reserve_fund_pct: String::new(),
            insurance_pct: String::new(),
            bid_pct: String::new(),
            notes: String::new(),
        }
    }
}

impl ExpenseForm {
    pub fn from_record(expense: &Expense) -> Self {
        let mut form = Self {
            description: expense.description.clone(),
            amount: amount_text(expense.amount),
            date: input_date(expense.date),
            category_id: id_text(expense.category_id),
            account_id: id_text(expense.account_id),
            card_id: id_text(expense.card_id),
            paid: expense.paid,
            kind: expense.kind.code().to_string(),
            installments: expense
                .installments
                .map(|n| n.to_string())
                .unwrap_or_default(),
            notes: expense.notes.clone().unwrap_or_default(),
            ..Self::default()
        };
        if let Some(rule) = &expense.recurrence {
            form.recurrence = RecurrenceFields::from_recurrence(rule);
        }
        if let Some(terms) = &expense.consortium {
            form.credit_value = amount_text(terms.credit_value);
            form.term_months = terms.term_months.to_string();
            form.admin_fee_pct = terms.admin_fee_pct.to_string();
            form.reserve_fund_pct = terms.reserve_fund_pct.to_string();
            form.insurance_pct = terms.insurance_monthly_pct.to_string();
            form.bid_pct = terms.bid_pct.map(|b| b.to_string()).unwrap_or_default();
        }
        form
    }

    pub fn kind(&self) -> ExpenseKind {
        ExpenseKind::from_code(&self.kind)
    }

    pub fn consortium_terms(&self) -> Result<ConsortiumTerms, ValidationError> {
        let bid = parse_optional_amount(&self.bid_pct, "lance")?;
        Ok(ConsortiumTerms {
            credit_value: parse_required_amount(&self.credit_value, "valor da carta")?,
            term_months: parse_count(&self.term_months, "prazo")?,
            admin_fee_pct: parse_optional_amount(&self.admin_fee_pct, "taxa de administração")?,
            reserve_fund_pct: parse_optional_amount(&self.reserve_fund_pct, "fundo de reserva")?,
            insurance_monthly_pct: parse_optional_amount(&self.insurance_pct, "seguro")?,
            bid_pct: (bid > 0.0).then_some(bid),
        })
    }

    pub fn consortium_estimate(&self) -> Result<ConsortiumEstimate, AppError> {
        Ok(self.consortium_terms()?.estimate()?)
    }

    /// Due dates of a split purchase, using the selected card's cycle.
    pub fn installment_preview(&self, cards: &[CreditCard]) -> Result<Vec<Installment>, AppError> {
        let total = parse_required_amount(&self.amount, "valor")?;
        let count = parse_count(&self.installments, "número de parcelas")?;
        let date = parse_required_date(&self.date, "data")?;
        let cycle: Option<CardCycle> = match parse_optional_id(&self.card_id) {
            Some(id) => cards
                .iter()
                .find(|c| c.id == Some(id))
                .map(|c| c.cycle())
                .transpose()?,
            None => None,
        };
        Ok(project_installments(date, total, count, cycle)?)
    }

    pub fn to_record(&self, id: Option<i64>) -> Result<Expense, ValidationError> {
        required(&self.description, "descrição")?;
        let kind = self.kind();
        let date = parse_required_date(&self.date, "data")?;

        let mut expense = Expense {
            id,
            description: self.description.trim().to_string(),
            amount: 0.0,
            date,
            category_id: parse_optional_id(&self.category_id),
            account_id: parse_optional_id(&self.account_id),
            card_id: parse_optional_id(&self.card_id),
            paid: self.paid,
            kind,
            recurrence: None,
            installments: None,
            consortium: None,
            notes: optional_text(&self.notes),
        };

        match kind {
            ExpenseKind::Avulsa => {
                expense.amount = parse_required_amount(&self.amount, "valor")?;
            }
            ExpenseKind::Recorrente => {
                expense.amount = parse_required_amount(&self.amount, "valor")?;
                expense.recurrence = Some(self.recurrence.to_recurrence()?);
            }
            ExpenseKind::Parcelada => {
                expense.amount = parse_required_amount(&self.amount, "valor")?;
                let total = parse_count(&self.installments, "número de parcelas")?;
                expense.installments = Some(total);
                if total >= 1 {
                    expense.recurrence = Some(Recurrence::Installment { current: 1, total });
                }
            }
            ExpenseKind::Consorcio => {
                let terms = self.consortium_terms()?;
                expense.amount = if self.amount.trim().is_empty() {
                    terms
                        .estimate()
                        .map(|e| e.monthly_premium)
                        .map_err(|e| ValidationError::Invalid {
                            field: "consórcio",
                            reason: e.to_string(),
                        })?
                } else {
                    parse_required_amount(&self.amount, "valor")?
                };
                expense.recurrence = Some(Recurrence::Installment {
                    current: 1,
                    total: terms.term_months.max(1),
                });
                expense.consortium = Some(terms);
            }
        }

        expense.validate()?;
        Ok(expense)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IncomeForm {
    pub description: String,
    pub amount: String,
    pub date: String,
    pub category_id: String,
    pub account_id: String,
    pub received: bool,
    pub recurring: bool,
}

impl Default for IncomeForm {
    fn default() -> Self {
        Self {
            description: String::new(),
            amount: String::new(),
            date: today_text(),
            category_id: String::new(),
            account_id: String::new(),
            received: false,
            recurring: false,
        }
    }
}

impl IncomeForm {
    pub fn from_record(income: &Income) -> Self {
        Self {
            description: income.description.clone(),
            amount: amount_text(income.amount),
            date: input_date(income.date),
            category_id: id_text(income.category_id),
            account_id: id_text(income.account_id),
            received: income.received,
            recurring: income.recurring,
        }
    }

    pub fn to_record(&self, id: Option<i64>) -> Result<Income, ValidationError> {
        required(&self.description, "descrição")?;
        let income = Income {
            id,
            description: self.description.trim().to_string(),
            amount: parse_required_amount(&self.amount, "valor")?,
            date: parse_required_date(&self.date, "data")?,
            category_id: parse_optional_id(&self.category_id),
            account_id: parse_optional_id(&self.account_id),
            received: self.received,
            recurring: self.recurring,
        };
        income.validate()?;
        Ok(income)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct VehicleForm {
    pub name: String,
    pub plate: String,
    pub year: String,
    pub monthly_km: String,
    pub km_per_liter: String,
    pub fuel_price: String,
    pub market_value: String,
    pub annual_depreciation_pct: String,
}

impl VehicleForm {
    pub fn from_record(vehicle: &Vehicle) -> Self {
        Self {
            name: vehicle.name.clone(),
            plate: vehicle.plate.clone().unwrap_or_default(),
            year: vehicle.year.map(|y| y.to_string()).unwrap_or_default(),
            monthly_km: amount_text(vehicle.monthly_km),
            km_per_liter: amount_text(vehicle.km_per_liter),
            fuel_price: amount_text(vehicle.fuel_price),
            market_value: amount_text(vehicle.market_value),
            annual_depreciation_pct: vehicle
                .annual_depreciation_pct
                .map(|p| p.to_string())
                .unwrap_or_default(),
        }
    }

    pub fn to_record(&self, id: Option<i64>) -> Result<Vehicle, ValidationError> {
        required(&self.name, "nome")?;
        let year = match self.year.trim() {
            "" => None,
            raw => Some(raw.parse::<i32>().map_err(|_| ValidationError::Invalid {
                field: "ano",
                reason: "ano inválido".to_string(),
            })?),
        };
        let depreciation = parse_optional_amount(&self.annual_depreciation_pct, "depreciação anual")?;
        let vehicle = Vehicle {
            id,
            name: self.name.trim().to_string(),
            plate: optional_text(&self.plate).map(|p| p.to_uppercase()),
            year,
            monthly_km: parse_optional_amount(&self.monthly_km, "km por mês")?,
            km_per_liter: parse_optional_amount(&self.km_per_liter, "consumo")?,
            fuel_price: parse_optional_amount(&self.fuel_price, "preço do combustível")?,
            market_value: parse_optional_amount(&self.market_value, "valor FIPE")?,
            annual_depreciation_pct: (depreciation != 0.0).then_some(depreciation),
        };
        vehicle.validate()?;
        Ok(vehicle)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VehicleExpenseForm {
    pub kind: String,
    pub description: String,
    pub amount: String,
    pub start: String,
    pub recurrence: RecurrenceFields,
    pub active: bool,
}

impl Default for VehicleExpenseForm {
    fn default() -> Self {
        Self {
            kind: VehicleExpenseKind::Combustivel.code().to_string(),
            description: String::new(),
            amount: String::new(),
            start: today_text(),
            recurrence: RecurrenceFields {
                frequency: "mensal".into(),
                ..RecurrenceFields::default()
            },
            active: true,
        }
    }
}

impl VehicleExpenseForm {
    pub fn from_record(record: &VehicleExpense) -> Self {
        Self {
            kind: record.kind.code().to_string(),
            description: record.description.clone(),
            amount: amount_text(record.amount),
            start: input_date(record.start),
            recurrence: RecurrenceFields::from_recurrence(&record.recurrence),
            active: record.active,
        }
    }

    pub fn to_record(
        &self,
        id: Option<i64>,
        vehicle_id: Option<i64>,
    ) -> Result<VehicleExpense, ValidationError> {
        let record = VehicleExpense {
            id,
            vehicle_id,
            kind: VehicleExpenseKind::from_code(&self.kind),
            description: self.description.trim().to_string(),
            amount: parse_required_amount(&self.amount, "valor")?,
            start: parse_required_date(&self.start, "início")?,
            recurrence: self.recurrence.to_recurrence()?,
            active: self.active,
        };
        record.validate()?;
        Ok(record)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FinancingForm {
    pub description: String,
    pub asset_value: String,
    pub down_payment: String,
    pub rate_pct: String,
    /// Rate typed as yearly and converted to the equivalent monthly rate.
    pub rate_is_annual: bool,
    pub term_months: String,
    pub system: String,
    pub first_due: String,
}

impl Default for FinancingForm {
    fn default() -> Self {
        let today = chrono::Local::now().date_naive();
        let next_month = crate::calendar::add_months(today, 1).unwrap_or(today);
        Self {
            description: String::new(),
            asset_value: String::new(),
            down_payment: String::new(),
            rate_pct: String::new(),
            rate_is_annual: false,
            term_months: String::new(),
            system: "price".into(),
            first_due: input_date(next_month),
        }
    }
}

impl FinancingForm {
    pub fn from_record(financing: &Financing) -> Self {
        Self {
            description: financing.description.clone(),
            asset_value: amount_text(financing.asset_value),
            down_payment: amount_text(financing.down_payment),
            rate_pct: financing.monthly_rate_pct.to_string(),
            rate_is_annual: false,
            term_months: financing.term_months.to_string(),
            system: match financing.system {
                AmortizationSystem::Price => "price".into(),
                AmortizationSystem::Sac => "sac".into(),
            },
            first_due: input_date(financing.first_due),
        }
    }

    pub fn to_record(&self, id: Option<i64>) -> Result<Financing, ValidationError> {
        required(&self.description, "descrição")?;
        let rate = parse_required_amount(&self.rate_pct, "taxa de juros")?;
        let financing = Financing {
            id,
            description: self.description.trim().to_string(),
            asset_value: parse_required_amount(&self.asset_value, "valor do bem")?,
            down_payment: parse_optional_amount(&self.down_payment, "entrada")?,
            monthly_rate_pct: if self.rate_is_annual {
                (monthly_rate_from_annual(rate) * 10_000.0).round() / 10_000.0
            } else {
                rate
            },
            term_months: parse_count(&self.term_months, "prazo")?,
            system: if self.system == "sac" {
                AmortizationSystem::Sac
            } else {
                AmortizationSystem::Price
            },
            first_due: parse_required_date(&self.first_due, "primeira parcela")?,
        };
        financing.validate()?;
        Ok(financing)
    }
}
