use serde::{Deserialize, Serialize};

use super::default_true;
use crate::errors::{CalcError, ValidationError};
use crate::schedule::CardCycle;
use crate::validation::{day_of_month, non_negative, required};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditCard {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "bandeira", default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(rename = "limite", default)]
    pub limit: f64,
    #[serde(rename = "dia_fechamento")]
    pub closing_day: u32,
    #[serde(rename = "dia_vencimento")]
    pub due_day: u32,
    #[serde(rename = "conta_id", default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<i64>,
    #[serde(rename = "ativo", default = "default_true")]
    pub active: bool,
}

impl CreditCard {
    pub fn cycle(&self) -> Result<CardCycle, CalcError> {
        CardCycle::new(self.closing_day, self.due_day)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        required(&self.name, "nome")?;
        non_negative(self.limit, "limite")?;
        day_of_month(self.closing_day, "dia de fechamento")?;
        day_of_month(self.due_day, "dia de vencimento")
    }
}
