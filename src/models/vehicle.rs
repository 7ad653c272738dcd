use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::default_true;
use crate::errors::ValidationError;
use crate::recurrence::{lenient, Recurrence};
use crate::validation::{non_negative, positive, required};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "placa", default, skip_serializing_if = "Option::is_none")]
    pub plate: Option<String>,
    #[serde(rename = "ano", default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(rename = "km_mensal", default)]
    pub monthly_km: f64,
    #[serde(rename = "consumo_km_l", default)]
    pub km_per_liter: f64,
    #[serde(rename = "preco_combustivel", default)]
    pub fuel_price: f64,
    #[serde(rename = "valor_fipe", default)]
    pub market_value: f64,
    #[serde(rename = "depreciacao_anual", default, skip_serializing_if = "Option::is_none")]
    pub annual_depreciation_pct: Option<f64>,
}

impl Vehicle {
    pub fn validate(&self) -> Result<(), ValidationError> {
        required(&self.name, "nome")?;
        non_negative(self.monthly_km, "km por mês")?;
        non_negative(self.km_per_liter, "consumo")?;
        non_negative(self.fuel_price, "preço do combustível")?;
        non_negative(self.market_value, "valor FIPE")?;
        if let Some(rate) = self.annual_depreciation_pct {
            non_negative(rate, "depreciação anual")?;
        }
        Ok(())
    }

    /// `km / (km/l) × price`, when all three inputs are known.
    pub fn estimated_monthly_fuel(&self) -> Option<f64> {
        (self.monthly_km > 0.0 && self.km_per_liter > 0.0 && self.fuel_price > 0.0)
            .then(|| self.monthly_km / self.km_per_liter * self.fuel_price)
    }

    pub fn monthly_depreciation(&self) -> Option<f64> {
        self.annual_depreciation_pct
            .filter(|rate| *rate > 0.0 && self.market_value > 0.0)
            .map(|rate| self.market_value * rate / 100.0 / 12.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleExpenseKind {
    Combustivel,
    Seguro,
    Ipva,
    Licenciamento,
    Manutencao,
    Financiamento,
    Estacionamento,
    Pedagio,
    Lavagem,
    Depreciacao,
    #[serde(other)]
    Outros,
}

impl VehicleExpenseKind {
    pub const ALL: [VehicleExpenseKind; 11] = [
        VehicleExpenseKind::Combustivel,
        VehicleExpenseKind::Seguro,
        VehicleExpenseKind::Ipva,
        VehicleExpenseKind::Licenciamento,
        VehicleExpenseKind::Manutencao,
        VehicleExpenseKind::Financiamento,
        VehicleExpenseKind::Estacionamento,
        VehicleExpenseKind::Pedagio,
        VehicleExpenseKind::Lavagem,
        VehicleExpenseKind::Depreciacao,
        VehicleExpenseKind::Outros,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            VehicleExpenseKind::Combustivel => "Combustível",
            VehicleExpenseKind::Seguro => "Seguro",
            VehicleExpenseKind::Ipva => "IPVA",
            VehicleExpenseKind::Licenciamento => "Licenciamento",
            VehicleExpenseKind::Manutencao => "Manutenção",
            VehicleExpenseKind::Financiamento => "Financiamento",
            VehicleExpenseKind::Estacionamento => "Estacionamento",
            VehicleExpenseKind::Pedagio => "Pedágio",
            VehicleExpenseKind::Lavagem => "Lavagem",
            VehicleExpenseKind::Depreciacao => "Depreciação",
            VehicleExpenseKind::Outros => "Outros",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            VehicleExpenseKind::Combustivel => "combustivel",
            VehicleExpenseKind::Seguro => "seguro",
            VehicleExpenseKind::Ipva => "ipva",
            VehicleExpenseKind::Licenciamento => "licenciamento",
            VehicleExpenseKind::Manutencao => "manutencao",
            VehicleExpenseKind::Financiamento => "financiamento",
            VehicleExpenseKind::Estacionamento => "estacionamento",
            VehicleExpenseKind::Pedagio => "pedagio",
            VehicleExpenseKind::Lavagem => "lavagem",
            VehicleExpenseKind::Depreciacao => "depreciacao",
            VehicleExpenseKind::Outros => "outros",
        }
    }

    pub fn from_code(code: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|k| k.code() == code)
            .unwrap_or(VehicleExpenseKind::Outros)
    }
}

/// A predicted cost of owning a vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleExpense {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "veiculo_id", default, skip_serializing_if = "Option::is_none")]
    pub vehicle_id: Option<i64>,
    #[serde(rename = "tipo")]
    pub kind: VehicleExpenseKind,
    #[serde(rename = "descricao", default)]
    pub description: String,
    #[serde(rename = "valor")]
    pub amount: f64,
    #[serde(rename = "data_inicio")]
    pub start: NaiveDate,
    #[serde(rename = "recorrencia", default, deserialize_with = "lenient::or_once")]
    pub recurrence: Recurrence,
    #[serde(rename = "ativo", default = "default_true")]
    pub active: bool,
}

impl VehicleExpense {
    pub fn validate(&self) -> Result<(), ValidationError> {
        positive(self.amount, "valor")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_kind_decodes_as_other() {
        let json = r#"{"tipo": "multa", "valor": 195.23, "data_inicio": "2026-10-01", "recorrencia": "unica"}"#;
        let record: VehicleExpense = serde_json::from_str(json).unwrap();
        assert_eq!(record.kind, VehicleExpenseKind::Outros);
        assert!(record.active);
    }

    #[test]
    fn unreadable_recurrence_counts_once() {
        let json = r#"{"tipo": "seguro", "valor": 90, "data_inicio": "2026-10-01", "recorrencia": "diaria"}"#;
        let record: VehicleExpense = serde_json::from_str(json).unwrap();
        assert_eq!(record.recurrence, Recurrence::Once);
        let json = r#"{"tipo": "seguro", "valor": 90, "data_inicio": "2026-10-01"}"#;
        let record: VehicleExpense = serde_json::from_str(json).unwrap();
        assert_eq!(record.recurrence, Recurrence::Monthly { every: 1 });
    }

    #[test]
    fn fuel_estimate_needs_every_input() {
        let mut car = Vehicle {
            id: Some(1),
            name: "Onix".to_string(),
            plate: None,
            year: Some(2022),
            monthly_km: 1200.0,
            km_per_liter: 12.0,
            fuel_price: 6.0,
            market_value: 80_000.0,
            annual_depreciation_pct: Some(12.0),
        };
        assert_eq!(car.estimated_monthly_fuel(), Some(600.0));
        assert_eq!(car.monthly_depreciation(), Some(800.0));
        car.km_per_liter = 0.0;
        assert_eq!(car.estimated_monthly_fuel(), None);
    }
}
