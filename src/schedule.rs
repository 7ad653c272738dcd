//! Installment due-date projection for split purchases, with or without a
//! credit-card billing cycle.

use chrono::{Datelike, NaiveDate};

use crate::calendar::{add_months, with_day_clamped, MonthRef};
use crate::errors::CalcError;
use crate::format::{from_cents, to_cents};

/// Billing cycle of a credit card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardCycle {
    pub closing_day: u32,
    pub due_day: u32,
}

impl CardCycle {
    pub fn new(closing_day: u32, due_day: u32) -> Result<Self, CalcError> {
        for day in [closing_day, due_day] {
            if !(1..=31).contains(&day) {
                return Err(CalcError::DayOutOfRange(day));
            }
        }
        Ok(Self {
            closing_day,
            due_day,
        })
    }

    /// Closing date of the invoice a purchase lands on. Purchases made on the
    /// closing day already belong to the next invoice.
    pub fn closing_for(&self, purchase: NaiveDate) -> Option<NaiveDate> {
        let month = MonthRef::containing(purchase);
        let closing = with_day_clamped(month.year(), month.month(), self.closing_day)?;
        if purchase < closing {
            Some(closing)
        } else {
            let next = month.next();
            with_day_clamped(next.year(), next.month(), self.closing_day)
        }
    }

    pub fn due_after(&self, closing: NaiveDate) -> Option<NaiveDate> {
        let month = if self.due_day > self.closing_day {
            MonthRef::containing(closing)
        } else {
            MonthRef::containing(closing).next()
        };
        with_day_clamped(month.year(), month.month(), self.due_day)
    }

    pub fn first_due(&self, purchase: NaiveDate) -> Option<NaiveDate> {
        self.closing_for(purchase)
            .and_then(|closing| self.due_after(closing))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Installment {
    pub number: u32,
    pub due_date: NaiveDate,
    pub amount: f64,
}

/// Splits `total` into `count` parts in cents; the first part carries the
/// remainder so the parts always add up to the total.
pub fn split_amount(total: f64, count: u32) -> Result<Vec<f64>, CalcError> {
    if count == 0 {
        return Err(CalcError::ZeroInstallments);
    }
    let cents = to_cents(total);
    if cents <= 0 {
        return Err(CalcError::NonPositiveAmount("valor total"));
    }

    let base = cents / count as i64;
    let remainder = cents % count as i64;
    Ok((0..count)
        .map(|i| {
            if i == 0 {
                from_cents(base + remainder)
            } else {
                from_cents(base)
            }
        })
        .collect())
}

/// Projects every installment of a split purchase.
///
/// Without a card, `first` is the first due date and the rest follow monthly
/// on the same day. With a card, `first` is the purchase date and each
/// installment is due on a consecutive invoice.
pub fn project_installments(
    first: NaiveDate,
    total: f64,
    count: u32,
    cycle: Option<CardCycle>,
) -> Result<Vec<Installment>, CalcError> {
    let amounts = split_amount(total, count)?;

    let first_due = match cycle {
        Some(cycle) => cycle.first_due(first).ok_or(CalcError::DateOverflow)?,
        None => first,
    };

    amounts
        .into_iter()
        .enumerate()
        .map(|(i, amount)| {
            let due_date = match cycle {
                Some(cycle) => {
                    let month = MonthRef::containing(first_due).offset(i as i32);
                    with_day_clamped(month.year(), month.month(), cycle.due_day)
                }
                None => add_months(first_due, i as i32),
            }
            .ok_or(CalcError::DateOverflow)?;
            Ok(Installment {
                number: i as u32 + 1,
                due_date,
                amount,
            })
        })
        .collect()
}

/// Installments not yet due on `today` (due today counts as open).
pub fn open_installments(schedule: &[Installment], today: NaiveDate) -> Vec<&Installment> {
    schedule.iter().filter(|i| i.due_date >= today).collect()
}

/// Label of the invoice a purchase lands on, e.g. `Fatura 11/2026`.
pub fn invoice_label(cycle: &CardCycle, purchase: NaiveDate) -> Option<String> {
    let closing = cycle.closing_for(purchase)?;
    Some(format!(
        "Fatura {:02}/{}",
        closing.month(),
        closing.year()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn split_puts_remainder_on_first() {
        let parts = split_amount(100.0, 3).unwrap();
        assert_eq!(parts, vec![33.34, 33.33, 33.33]);
        assert_eq!(split_amount(10.0, 0), Err(CalcError::ZeroInstallments));
        assert!(split_amount(0.0, 2).is_err());
    }

    #[test]
    fn purchase_on_closing_day_goes_to_next_invoice() {
        let cycle = CardCycle::new(5, 12).unwrap();
        assert_eq!(cycle.first_due(date(2026, 10, 4)), Some(date(2026, 10, 12)));
        assert_eq!(cycle.first_due(date(2026, 10, 5)), Some(date(2026, 11, 12)));
    }

    #[test]
    fn due_day_before_closing_day_rolls_into_next_month() {
        let cycle = CardCycle::new(28, 5).unwrap();
        assert_eq!(cycle.first_due(date(2026, 10, 20)), Some(date(2026, 11, 5)));
        assert_eq!(cycle.first_due(date(2026, 10, 28)), Some(date(2026, 12, 5)));
    }

    #[test]
    fn invalid_days_are_rejected() {
        assert_eq!(CardCycle::new(0, 10), Err(CalcError::DayOutOfRange(0)));
        assert_eq!(CardCycle::new(10, 32), Err(CalcError::DayOutOfRange(32)));
    }

    #[test]
    fn invoice_label_names_the_closing_month() {
        let cycle = CardCycle::new(5, 12).unwrap();
        assert_eq!(
            invoice_label(&cycle, date(2026, 12, 20)).as_deref(),
            Some("Fatura 01/2027")
        );
    }
}
