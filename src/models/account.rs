use serde::{Deserialize, Serialize};

use super::default_true;
use crate::errors::ValidationError;
use crate::validation::required;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    #[default]
    Corrente,
    Poupanca,
    Investimento,
    Carteira,
}

impl AccountKind {
    pub const ALL: [AccountKind; 4] = [
        AccountKind::Corrente,
        AccountKind::Poupanca,
        AccountKind::Investimento,
        AccountKind::Carteira,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AccountKind::Corrente => "Conta corrente",
            AccountKind::Poupanca => "Poupança",
            AccountKind::Investimento => "Investimento",
            AccountKind::Carteira => "Carteira",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AccountKind::Corrente => "corrente",
            AccountKind::Poupanca => "poupanca",
            AccountKind::Investimento => "investimento",
            AccountKind::Carteira => "carteira",
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
pub struct Account {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "banco", default, skip_serializing_if = "Option::is_none")]
    pub bank: Option<String>,
    #[serde(rename = "tipo", default)]
    pub kind: AccountKind,
    #[serde(rename = "saldo_inicial", default)]
    pub opening_balance: f64,
    /// Computed by the server; never posted back.
    #[serde(rename = "saldo_atual", default, skip_serializing)]
    pub current_balance: Option<f64>,
    #[serde(rename = "ativa", default = "default_true")]
    pub active: bool,
}

impl Account {
    pub fn balance(&self) -> f64 {
        self.current_balance.unwrap_or(self.opening_balance)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        required(&self.name, "nome")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_server_record_and_skips_computed_balance() {
        let json = r#"{"id": 3, "nome": "Nubank", "tipo": "corrente", "saldo_inicial": 100.5, "saldo_atual": 250}"#;
        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account.balance(), 250.0);
        assert!(account.active);

        let posted = serde_json::to_value(&account).unwrap();
        assert!(posted.get("saldo_atual").is_none());
        assert_eq!(posted["tipo"], "corrente");
    }

    #[test]
    fn kind_codes_round_trip() {
        for kind in AccountKind::ALL {
            assert_eq!(AccountKind::from_code(kind.code()), kind);
        }
        assert_eq!(AccountKind::from_code("???"), AccountKind::Corrente);
    }
}
