//! Amortization tables for the Price (constant payment) and SAC (constant
//! amortization) systems. Amounts are computed in cents; the last row absorbs
//! rounding so the balance always ends at zero.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::add_months;
use crate::errors::CalcError;
use crate::format::{from_cents, to_cents};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmortizationSystem {
    #[default]
    Price,
    Sac,
}

impl AmortizationSystem {
    pub fn label(&self) -> &'static str {
        match self {
            AmortizationSystem::Price => "Price (parcelas fixas)",
            AmortizationSystem::Sac => "SAC (amortização constante)",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FinancingTerms {
    pub principal: f64,
    pub monthly_rate_pct: f64,
    pub term_months: u32,
    pub system: AmortizationSystem,
    pub first_due: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AmortizationRow {
    pub number: u32,
    pub due_date: NaiveDate,
    pub payment: f64,
    pub interest: f64,
    pub amortization: f64,
    /// Prepayment made together with this installment.
    pub extra: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AmortizationTable {
    pub rows: Vec<AmortizationRow>,
    pub total_paid: f64,
    pub total_interest: f64,
}

impl AmortizationTable {
    pub fn first_payment(&self) -> Option<f64> {
        self.rows.first().map(|r| r.payment)
    }

    pub fn last_payment(&self) -> Option<f64> {
        self.rows.last().map(|r| r.payment)
    }
}

/// Constant Price payment; `principal / n` when the rate is zero.
pub fn price_payment(principal: f64, monthly_rate_pct: f64, term_months: u32) -> f64 {
    let n = term_months as f64;
    let i = monthly_rate_pct / 100.0;
    if i == 0.0 {
        return principal / n;
    }
    principal * i / (1.0 - (1.0 + i).powf(-n))
}

/// Equivalent monthly rate (percent) of an annual rate (percent).
pub fn monthly_rate_from_annual(annual_pct: f64) -> f64 {
    ((1.0 + annual_pct / 100.0).powf(1.0 / 12.0) - 1.0) * 100.0
}

impl FinancingTerms {
    fn check(&self) -> Result<(), CalcError> {
        if !(self.principal > 0.0) {
            return Err(CalcError::NonPositiveAmount("valor financiado"));
        }
        if self.term_months == 0 {
            return Err(CalcError::ZeroTerm);
        }
        if self.monthly_rate_pct < 0.0 || !self.monthly_rate_pct.is_finite() {
            return Err(CalcError::InvalidPercent("taxa de juros"));
        }
        Ok(())
    }

    pub fn amortization_table(&self) -> Result<AmortizationTable, CalcError> {
        self.build(None)
    }

    /// Table with an extra amortization paid together with installment
    /// `after`, which must leave at least one installment to shorten. The
    /// payment (Price) or amortization (SAC) is kept, so the term gets
    /// shorter.
    pub fn with_prepayment(&self, after: u32, amount: f64) -> Result<AmortizationTable, CalcError> {
        if !(amount > 0.0) {
            return Err(CalcError::NonPositiveAmount("amortização extra"));
        }
        self.check()?;
        if after == 0 || after >= self.term_months {
            return Err(CalcError::PrepaymentOutOfRange(after));
        }
        self.build(Some((after, to_cents(amount))))
    }

    fn build(&self, prepayment: Option<(u32, i64)>) -> Result<AmortizationTable, CalcError> {
        self.check()?;

        let rate = self.monthly_rate_pct / 100.0;
        let mut balance = to_cents(self.principal);
        let fixed_payment = to_cents(price_payment(
            self.principal,
            self.monthly_rate_pct,
            self.term_months,
        ));
        let fixed_amortization = to_cents(self.principal / self.term_months as f64);

        let mut rows = Vec::with_capacity(self.term_months as usize);
        let mut total_paid = 0i64;
        let mut total_interest = 0i64;

        for number in 1..=self.term_months {
            if balance <= 0 {
                break;
            }
            let interest = (balance as f64 * rate).round() as i64;
            let mut amortization = match self.system {
                AmortizationSystem::Price => fixed_payment - interest,
                AmortizationSystem::Sac => fixed_amortization,
            };
            if number == self.term_months || amortization > balance {
                amortization = balance;
            }
            balance -= amortization;

            let mut extra = 0;
            if let Some((after, amount)) = prepayment {
                if after == number {
                    extra = amount.min(balance);
                    balance -= extra;
                }
            }

            let payment = amortization + interest;
            total_paid += payment + extra;
            total_interest += interest;

            let due_date = add_months(self.first_due, number as i32 - 1)
                .ok_or(CalcError::DateOverflow)?;
            rows.push(AmortizationRow {
                number,
                due_date,
                payment: from_cents(payment),
                interest: from_cents(interest),
                amortization: from_cents(amortization),
                extra: from_cents(extra),
                balance: from_cents(balance),
            });
        }

        tracing::debug!(
            system = ?self.system,
            rows = rows.len(),
            total_interest,
            "amortization table built"
        );

        Ok(AmortizationTable {
            rows,
            total_paid: from_cents(total_paid),
            total_interest: from_cents(total_interest),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(system: AmortizationSystem) -> FinancingTerms {
        FinancingTerms {
            principal: 12_000.0,
            monthly_rate_pct: 1.0,
            term_months: 12,
            system,
            first_due: NaiveDate::from_ymd_opt(2026, 11, 10).unwrap(),
        }
    }

    #[test]
    fn zero_rate_price_is_plain_division() {
        assert_eq!(price_payment(1200.0, 0.0, 12), 100.0);
    }

    #[test]
    fn annual_to_monthly_rate() {
        let monthly = monthly_rate_from_annual(12.682503);
        assert!((monthly - 1.0).abs() < 1e-4);
    }

    #[test]
    fn sac_interest_falls_linearly() {
        let table = terms(AmortizationSystem::Sac).amortization_table().unwrap();
        assert_eq!(table.rows.len(), 12);
        assert_eq!(table.first_payment(), Some(1120.0));
        assert_eq!(table.last_payment(), Some(1010.0));
        assert_eq!(table.total_interest, 780.0);
        assert_eq!(table.rows.last().unwrap().balance, 0.0);
    }

    #[test]
    fn rejects_invalid_terms() {
        let mut bad = terms(AmortizationSystem::Price);
        bad.principal = -1.0;
        assert!(bad.amortization_table().is_err());
        let mut bad = terms(AmortizationSystem::Price);
        bad.monthly_rate_pct = -0.5;
        assert_eq!(
            bad.amortization_table(),
            Err(CalcError::InvalidPercent("taxa de juros"))
        );
    }
}
