use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::financing::{AmortizationSystem, FinancingTerms};
use crate::validation::{non_negative, positive, positive_count, required};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Financing {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "valor_bem")]
    pub asset_value: f64,
    #[serde(rename = "entrada", default)]
    pub down_payment: f64,
    #[serde(rename = "taxa_juros_mensal")]
    pub monthly_rate_pct: f64,
    #[serde(rename = "prazo_meses")]
    pub term_months: u32,
    #[serde(rename = "sistema", default)]
    pub system: AmortizationSystem,
    #[serde(rename = "data_primeira_parcela")]
    pub first_due: NaiveDate,
}

impl Financing {
    pub fn principal(&self) -> f64 {
        self.asset_value - self.down_payment
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        required(&self.description, "descrição")?;
        positive(self.asset_value, "valor do bem")?;
        non_negative(self.down_payment, "entrada")?;
        positive(self.principal(), "valor financiado")?;
        non_negative(self.monthly_rate_pct, "taxa de juros")?;
        positive_count(self.term_months, "prazo")
    }

    pub fn terms(&self) -> FinancingTerms {
        FinancingTerms {
            principal: self.principal(),
            monthly_rate_pct: self.monthly_rate_pct,
            term_months: self.term_months,
            system: self.system,
            first_due: self.first_due,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn down_payment_reduces_principal() {
        let json = r#"{"descricao": "Carro", "valor_bem": 90000, "entrada": 30000,
                      "taxa_juros_mensal": 1.5, "prazo_meses": 48, "sistema": "sac",
                      "data_primeira_parcela": "2026-11-15"}"#;
        let financing: Financing = serde_json::from_str(json).unwrap();
        assert_eq!(financing.principal(), 60_000.0);
        assert_eq!(financing.terms().system, AmortizationSystem::Sac);
        assert!(financing.validate().is_ok());

        let mut too_much = financing.clone();
        too_much.down_payment = 90_000.0;
        assert!(too_much.validate().is_err());
    }
}
