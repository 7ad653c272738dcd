use serde::{Deserialize, Serialize};

use crate::errors::CalcError;
use crate::format::round_cents;

/// Terms of a consortium plan (`consorcio`), percentages as 0..=100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsortiumTerms {
    #[serde(rename = "valor_carta")]
    pub credit_value: f64,
    #[serde(rename = "prazo_meses")]
    pub term_months: u32,
    #[serde(rename = "taxa_administracao", default)]
    pub admin_fee_pct: f64,
    #[serde(rename = "fundo_reserva", default)]
    pub reserve_fund_pct: f64,
    #[serde(rename = "seguro_mensal", default)]
    pub insurance_monthly_pct: f64,
    #[serde(rename = "lance", default, skip_serializing_if = "Option::is_none")]
    pub bid_pct: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConsortiumEstimate {
    pub common_fund_share: f64,
    pub admin_share: f64,
    pub reserve_share: f64,
    pub insurance: f64,
    pub monthly_premium: f64,
    pub total_cost: f64,
    pub effective_cost_pct: f64,
    pub bid_value: f64,
    pub premium_after_bid: f64,
}

impl ConsortiumTerms {
    fn check(&self) -> Result<(), CalcError> {
        if !(self.credit_value > 0.0) {
            return Err(CalcError::NonPositiveAmount("valor da carta"));
        }
        if self.term_months == 0 {
            return Err(CalcError::ZeroTerm);
        }
        let percents = [
            (self.admin_fee_pct, "taxa de administração"),
            (self.reserve_fund_pct, "fundo de reserva"),
            (self.insurance_monthly_pct, "seguro"),
        ];
        for (value, name) in percents {
            if value < 0.0 || !value.is_finite() {
                return Err(CalcError::InvalidPercent(name));
            }
        }
        if let Some(bid) = self.bid_pct {
            if !(0.0..=100.0).contains(&bid) {
                return Err(CalcError::InvalidPercent("lance"));
            }
        }
        Ok(())
    }

    pub fn estimate(&self) -> Result<ConsortiumEstimate, CalcError> {
        self.check()?;

        let term = self.term_months as f64;
        let credit = self.credit_value;
        let common_fund_share = credit / term;
        let admin_share = credit * self.admin_fee_pct / 100.0 / term;
        let reserve_share = credit * self.reserve_fund_pct / 100.0 / term;
        let insurance = credit * self.insurance_monthly_pct / 100.0;
        let monthly_premium = common_fund_share + admin_share + reserve_share + insurance;
        let total_cost = monthly_premium * term;
        let bid_value = credit * self.bid_pct.unwrap_or(0.0) / 100.0;

        tracing::debug!(credit, term, monthly_premium, "consortium estimate");

        Ok(ConsortiumEstimate {
            common_fund_share: round_cents(common_fund_share),
            admin_share: round_cents(admin_share),
            reserve_share: round_cents(reserve_share),
            insurance: round_cents(insurance),
            monthly_premium: round_cents(monthly_premium),
            total_cost: round_cents(total_cost),
            effective_cost_pct: round_cents((total_cost - credit) / credit * 100.0),
            bid_value: round_cents(bid_value),
            premium_after_bid: round_cents(monthly_premium - bid_value / term),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms() -> ConsortiumTerms {
        ConsortiumTerms {
            credit_value: 60_000.0,
            term_months: 60,
            admin_fee_pct: 15.0,
            reserve_fund_pct: 2.0,
            insurance_monthly_pct: 0.05,
            bid_pct: Some(20.0),
        }
    }

    #[test]
    fn premium_adds_every_share() {
        let estimate = terms().estimate().unwrap();
        assert_eq!(estimate.common_fund_share, 1000.0);
        assert_eq!(estimate.admin_share, 150.0);
        assert_eq!(estimate.reserve_share, 20.0);
        assert_eq!(estimate.insurance, 30.0);
        assert_eq!(estimate.monthly_premium, 1200.0);
        assert_eq!(estimate.total_cost, 72_000.0);
        assert_eq!(estimate.effective_cost_pct, 20.0);
        assert_eq!(estimate.bid_value, 12_000.0);
        assert_eq!(estimate.premium_after_bid, 1000.0);
    }

    #[test]
    fn rejects_bad_terms() {
        let mut bad = terms();
        bad.term_months = 0;
        assert_eq!(bad.estimate(), Err(CalcError::ZeroTerm));

        let mut bad = terms();
        bad.bid_pct = Some(120.0);
        assert_eq!(bad.estimate(), Err(CalcError::InvalidPercent("lance")));

        let mut bad = terms();
        bad.credit_value = 0.0;
        assert!(bad.estimate().is_err());
    }

    #[test]
    fn decodes_backend_field_names() {
        let json = r#"{"valor_carta": 100000, "prazo_meses": 100, "taxa_administracao": 18}"#;
        let terms: ConsortiumTerms = serde_json::from_str(json).unwrap();
        assert_eq!(terms.admin_fee_pct, 18.0);
        assert_eq!(terms.bid_pct, None);
        assert_eq!(terms.estimate().unwrap().monthly_premium, 1180.0);
    }
}
