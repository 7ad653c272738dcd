use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::MonthRef;
use crate::consortium::ConsortiumTerms;
use crate::errors::ValidationError;
use crate::recurrence::{lenient, Recurrence};
use crate::schedule::split_amount;
use crate::validation::{positive, positive_count, required};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseKind {
    Recorrente,
    Parcelada,
    Consorcio,
    #[default]
    #[serde(other)]
    Avulsa,
}

impl ExpenseKind {
    pub const ALL: [ExpenseKind; 4] = [
        ExpenseKind::Avulsa,
        ExpenseKind::Recorrente,
        ExpenseKind::Parcelada,
        ExpenseKind::Consorcio,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ExpenseKind::Avulsa => "Avulsa",
            ExpenseKind::Recorrente => "Recorrente",
            ExpenseKind::Parcelada => "Parcelada",
            ExpenseKind::Consorcio => "Consórcio",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ExpenseKind::Avulsa => "avulsa",
            ExpenseKind::Recorrente => "recorrente",
            ExpenseKind::Parcelada => "parcelada",
            ExpenseKind::Consorcio => "consorcio",
        }
    }

    pub fn from_code(code: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|k| k.code() == code)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "valor")]
    pub amount: f64,
    #[serde(rename = "data")]
    pub date: NaiveDate,
    #[serde(rename = "categoria_id", default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(rename = "conta_id", default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<i64>,
    #[serde(rename = "cartao_id", default, skip_serializing_if = "Option::is_none")]
    pub card_id: Option<i64>,
    #[serde(rename = "pago", default)]
    pub paid: bool,
    #[serde(rename = "tipo", default)]
    pub kind: ExpenseKind,
    #[serde(
        rename = "recorrencia",
        default,
        deserialize_with = "lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub recurrence: Option<Recurrence>,
    #[serde(rename = "total_parcelas", default, skip_serializing_if = "Option::is_none")]
    pub installments: Option<u32>,
    #[serde(rename = "consorcio", default, skip_serializing_if = "Option::is_none")]
    pub consortium: Option<ConsortiumTerms>,
    #[serde(rename = "observacoes", default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Expense {
    pub fn validate(&self) -> Result<(), ValidationError> {
        required(&self.description, "descrição")?;
        positive(self.amount, "valor")?;

        match self.kind {
            ExpenseKind::Avulsa => Ok(()),
            ExpenseKind::Recorrente => match self.recurrence {
                Some(rule) if rule.is_recurring() => Ok(()),
                Some(_) => Err(ValidationError::Invalid {
                    field: "recorrência",
                    reason: "despesa recorrente não pode ser única".to_string(),
                }),
                None => Err(ValidationError::Required("recorrência")),
            },
            ExpenseKind::Parcelada => {
                let count = self
                    .installments
                    .ok_or(ValidationError::Required("número de parcelas"))?;
                positive_count(count, "número de parcelas")
            }
            ExpenseKind::Consorcio => {
                let terms = self
                    .consortium
                    .as_ref()
                    .ok_or(ValidationError::Required("dados do consórcio"))?;
                terms
                    .estimate()
                    .map(|_| ())
                    .map_err(|e| ValidationError::Invalid {
                        field: "consórcio",
                        reason: e.to_string(),
                    })
            }
        }
    }

    /// Recurrence implied by the kind when the record carries none.
    pub fn effective_recurrence(&self) -> Recurrence {
        match self.kind {
            ExpenseKind::Avulsa => Recurrence::Once,
            ExpenseKind::Recorrente => self.recurrence.unwrap_or_default(),
            ExpenseKind::Parcelada => match self.recurrence {
                Some(rule @ Recurrence::Installment { .. }) => rule,
                _ => Recurrence::Installment {
                    current: 1,
                    total: self.installments.unwrap_or(1).max(1),
                },
            },
            ExpenseKind::Consorcio => match self.recurrence {
                Some(rule @ Recurrence::Installment { .. }) => rule,
                _ => Recurrence::Installment {
                    current: 1,
                    total: self
                        .consortium
                        .as_ref()
                        .map(|t| t.term_months)
                        .unwrap_or(1)
                        .max(1),
                },
            },
        }
    }

    /// Value charged by occurrence `number` (1-based). Split purchases store
    /// the purchase total, shared out like the installment schedule: the
    /// first installment carries the remainder cents.
    pub fn installment_amount(&self, number: u32) -> f64 {
        match (self.kind, self.effective_recurrence()) {
            (ExpenseKind::Parcelada, Recurrence::Installment { total, .. }) => {
                split_amount(self.amount, total)
                    .ok()
                    .and_then(|shares| shares.get(number.saturating_sub(1) as usize).copied())
                    .unwrap_or(0.0)
            }
            _ => self.amount,
        }
    }

    /// Amount this record is expected to cost in `month`.
    pub fn amount_in(&self, month: MonthRef) -> f64 {
        let rule = self.effective_recurrence();
        let occurrences = rule.occurrences_in_month(self.date, month);
        if occurrences == 0 {
            return 0.0;
        }
        let number = match rule {
            Recurrence::Installment { current, .. } => {
                let elapsed = MonthRef::containing(self.date).months_until(month).max(0);
                current + elapsed as u32
            }
            _ => 1,
        };
        self.installment_amount(number) * occurrences as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(kind: ExpenseKind) -> Expense {
        Expense {
            id: None,
            description: "Academia".to_string(),
            amount: 120.0,
            date: NaiveDate::from_ymd_opt(2026, 9, 10).unwrap(),
            category_id: Some(1),
            account_id: None,
            card_id: None,
            paid: false,
            kind,
            recurrence: None,
            installments: None,
            consortium: None,
            notes: None,
        }
    }

    #[test]
    fn recurring_requires_a_repeating_rule() {
        let mut e = expense(ExpenseKind::Recorrente);
        assert_eq!(e.validate(), Err(ValidationError::Required("recorrência")));
        e.recurrence = Some(Recurrence::Once);
        assert!(e.validate().is_err());
        e.recurrence = Some(Recurrence::Monthly { every: 1 });
        assert!(e.validate().is_ok());
    }

    #[test]
    fn installment_kind_defaults_to_first_of_total() {
        let mut e = expense(ExpenseKind::Parcelada);
        assert_eq!(
            e.validate(),
            Err(ValidationError::Required("número de parcelas"))
        );
        e.installments = Some(3);
        assert!(e.validate().is_ok());
        assert_eq!(
            e.effective_recurrence(),
            Recurrence::Installment {
                current: 1,
                total: 3
            }
        );
        assert_eq!(e.installment_amount(1), 40.0);
        assert_eq!(e.amount_in(MonthRef::new(2026, 11).unwrap()), 40.0);
        assert_eq!(e.amount_in(MonthRef::new(2026, 12).unwrap()), 0.0);
    }

    #[test]
    fn uneven_split_matches_the_schedule() {
        let mut e = expense(ExpenseKind::Parcelada);
        e.amount = 100.0;
        e.date = NaiveDate::from_ymd_opt(2026, 10, 3).unwrap();
        e.installments = Some(3);
        let months: Vec<f64> = (10..=12)
            .map(|m| e.amount_in(MonthRef::new(2026, m).unwrap()))
            .collect();
        assert_eq!(months, vec![33.34, 33.33, 33.33]);
        assert_eq!(months.iter().map(|v| (v * 100.0).round() as i64).sum::<i64>(), 10_000);
        assert_eq!(e.amount_in(MonthRef::new(2027, 1).unwrap()), 0.0);
    }

    #[test]
    fn later_installment_takes_its_own_share() {
        let mut e = expense(ExpenseKind::Parcelada);
        e.amount = 100.0;
        e.installments = Some(3);
        e.recurrence = Some(Recurrence::Installment {
            current: 2,
            total: 3,
        });
        // Starts at installment 2 in September: 2 then 3, no remainder cents.
        assert_eq!(e.amount_in(MonthRef::new(2026, 9).unwrap()), 33.33);
        assert_eq!(e.amount_in(MonthRef::new(2026, 10).unwrap()), 33.33);
        assert_eq!(e.amount_in(MonthRef::new(2026, 11).unwrap()), 0.0);
    }

    #[test]
    fn consortium_terms_are_checked() {
        let mut e = expense(ExpenseKind::Consorcio);
        assert!(e.validate().is_err());
        e.consortium = Some(ConsortiumTerms {
            credit_value: 50_000.0,
            term_months: 0,
            admin_fee_pct: 10.0,
            reserve_fund_pct: 0.0,
            insurance_monthly_pct: 0.0,
            bid_pct: None,
        });
        assert!(matches!(
            e.validate(),
            Err(ValidationError::Invalid { field: "consórcio", .. })
        ));
    }

    #[test]
    fn decodes_minimal_record() {
        let json = r#"{"id": 9, "descricao": "Luz", "valor": 210.4, "data": "2026-10-05",
                      "tipo": "recorrente", "recorrencia": "mensal", "pago": true}"#;
        let e: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(e.kind, ExpenseKind::Recorrente);
        assert_eq!(e.recurrence, Some(Recurrence::Monthly { every: 1 }));
        assert!(e.paid);
    }

    #[test]
    fn unknown_values_do_not_fail_the_list() {
        let json = r#"[
            {"descricao": "Doação", "valor": 50, "data": "2026-10-01", "tipo": "doacao"},
            {"descricao": "Jornal", "valor": 30, "data": "2026-10-02", "tipo": "recorrente", "recorrencia": "diaria"},
            {"descricao": "Luz", "valor": 210.4, "data": "2026-10-05", "tipo": "recorrente", "recorrencia": null}
        ]"#;
        let list: Vec<Expense> = serde_json::from_str(json).unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list[0].kind, ExpenseKind::Avulsa);
        assert_eq!(list[1].recurrence, None);
        assert_eq!(list[1].effective_recurrence(), Recurrence::Monthly { every: 1 });
        assert_eq!(list[2].recurrence, None);
    }
}
