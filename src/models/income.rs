use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::validation::{positive, required};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Income {
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
    #[serde(rename = "recebida", default)]
    pub received: bool,
    #[serde(rename = "recorrente", default)]
    pub recurring: bool,
}

impl Income {
    pub fn validate(&self) -> Result<(), ValidationError> {
        required(&self.description, "descrição")?;
        positive(self.amount, "valor")
    }
}
