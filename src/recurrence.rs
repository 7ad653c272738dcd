//! Recurrence encodings stored by the backend in the `recorrencia` field.
//!
//! | text            | meaning                                          |
//! |-----------------|--------------------------------------------------|
//! | `unica`         | once, on the start date                          |
//! | `mensal[:N]`    | every N months (`bimestral`, `trimestral`, `semestral`) |
//! | `anual`         | every year                                       |
//! | `semanal[:N[:D]]` | every N weeks on weekday D, 0 = Sunday (`quinzenal`) |
//! | `parcela:K/M`   | installment K of M, start date is K's due date   |

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize};

use crate::calendar::MonthRef;
use crate::errors::RecurrenceError;

const DAYS_PER_YEAR: f64 = 365.25;
const WEEKDAY_ABBREVIATIONS: [&str; 7] = ["dom", "seg", "ter", "qua", "qui", "sex", "sáb"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Recurrence {
    Once,
    Monthly { every: u32 },
    Yearly,
    /// `weekday: None` follows the weekday of the start date.
    Weekly { every: u32, weekday: Option<Weekday> },
    Installment { current: u32, total: u32 },
}

impl Default for Recurrence {
    fn default() -> Self {
        Recurrence::Monthly { every: 1 }
    }
}

pub fn weekday_from_number(n: u32) -> Option<Weekday> {
    match n {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

pub fn weekday_label(weekday: Weekday) -> &'static str {
    WEEKDAY_ABBREVIATIONS[weekday.num_days_from_sunday() as usize]
}

fn parse_interval(raw: &str, text: &str) -> Result<u32, RecurrenceError> {
    match raw.trim().parse::<u32>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(RecurrenceError::InvalidInterval(text.to_string())),
    }
}

impl FromStr for Recurrence {
    type Err = RecurrenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim().to_lowercase();
        let mut parts = text.split(':');
        let head = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();

        match (head, args.as_slice()) {
            ("unica", []) => Ok(Recurrence::Once),
            ("mensal", []) => Ok(Recurrence::Monthly { every: 1 }),
            ("bimestral", []) => Ok(Recurrence::Monthly { every: 2 }),
            ("trimestral", []) => Ok(Recurrence::Monthly { every: 3 }),
            ("semestral", []) => Ok(Recurrence::Monthly { every: 6 }),
            ("mensal", [n]) => Ok(Recurrence::Monthly {
                every: parse_interval(n, &text)?,
            }),
            ("anual", []) => Ok(Recurrence::Yearly),
            ("semanal", []) => Ok(Recurrence::Weekly {
                every: 1,
                weekday: None,
            }),
            ("quinzenal", []) => Ok(Recurrence::Weekly {
                every: 2,
                weekday: None,
            }),
            ("semanal", [n]) => Ok(Recurrence::Weekly {
                every: parse_interval(n, &text)?,
                weekday: None,
            }),
            ("semanal", [n, d]) => {
                let every = parse_interval(n, &text)?;
                let weekday = d
                    .trim()
                    .parse::<u32>()
                    .ok()
                    .and_then(weekday_from_number)
                    .ok_or_else(|| RecurrenceError::InvalidWeekday(text.clone()))?;
                Ok(Recurrence::Weekly {
                    every,
                    weekday: Some(weekday),
                })
            }
            ("parcela", [fraction]) => {
                let invalid = || RecurrenceError::InvalidInstallment(text.clone());
                let (k, m) = fraction.split_once('/').ok_or_else(invalid)?;
                let current = k.trim().parse::<u32>().map_err(|_| invalid())?;
                let total = m.trim().parse::<u32>().map_err(|_| invalid())?;
                if current == 0 || current > total {
                    return Err(invalid());
                }
                Ok(Recurrence::Installment { current, total })
            }
            _ => Err(RecurrenceError::Unknown(s.trim().to_string())),
        }
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recurrence::Once => write!(f, "unica"),
            Recurrence::Monthly { every: 1 } => write!(f, "mensal"),
            Recurrence::Monthly { every } => write!(f, "mensal:{}", every),
            Recurrence::Yearly => write!(f, "anual"),
            Recurrence::Weekly {
                every: 1,
                weekday: None,
            } => write!(f, "semanal"),
            Recurrence::Weekly {
                every,
                weekday: None,
            } => write!(f, "semanal:{}", every),
            Recurrence::Weekly {
                every,
                weekday: Some(day),
            } => write!(f, "semanal:{}:{}", every, day.num_days_from_sunday()),
            Recurrence::Installment { current, total } => {
                write!(f, "parcela:{}/{}", current, total)
            }
        }
    }
}

impl TryFrom<String> for Recurrence {
    type Error = RecurrenceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Recurrence> for String {
    fn from(value: Recurrence) -> Self {
        value.to_string()
    }
}

impl Recurrence {
    pub fn is_recurring(&self) -> bool {
        !matches!(self, Recurrence::Once)
    }

    /// Installments still due, counting the current one.
    pub fn remaining_installments(&self) -> Option<u32> {
        match self {
            Recurrence::Installment { current, total } => Some(total.saturating_sub(*current) + 1),
            _ => None,
        }
    }

    /// Long-run number of occurrences per month.
    pub fn average_per_month(&self) -> f64 {
        match self {
            Recurrence::Once => 0.0,
            Recurrence::Monthly { every } => 1.0 / (*every).max(1) as f64,
            Recurrence::Yearly => 1.0 / 12.0,
            Recurrence::Weekly { every, .. } => DAYS_PER_YEAR / 7.0 / 12.0 / (*every).max(1) as f64,
            Recurrence::Installment { .. } => 1.0,
        }
    }

    /// Exact count of occurrences inside `month`, never before `start`.
    pub fn occurrences_in_month(&self, start: NaiveDate, month: MonthRef) -> u32 {
        let elapsed = MonthRef::containing(start).months_until(month);
        if elapsed < 0 {
            return 0;
        }

        match *self {
            Recurrence::Once => u32::from(elapsed == 0),
            Recurrence::Monthly { every } => u32::from(elapsed % every.max(1) as i32 == 0),
            Recurrence::Yearly => u32::from(elapsed % 12 == 0),
            Recurrence::Installment { current, total } => {
                u32::from(elapsed <= total.saturating_sub(current) as i32)
            }
            Recurrence::Weekly { every, weekday } => {
                weekly_occurrences(start, every, weekday.unwrap_or(start.weekday()), month)
            }
        }
    }

    pub fn label(&self) -> String {
        match *self {
            Recurrence::Once => "Única".to_string(),
            Recurrence::Monthly { every: 1 } => "Mensal".to_string(),
            Recurrence::Monthly { every } => format!("A cada {} meses", every),
            Recurrence::Yearly => "Anual".to_string(),
            Recurrence::Weekly { every, weekday } => {
                let day = weekday.map(weekday_label).unwrap_or("mesmo dia");
                if every == 1 {
                    format!("Semanal ({})", day)
                } else {
                    format!("A cada {} semanas ({})", every, day)
                }
            }
            Recurrence::Installment { current, total } => format!("Parcela {}/{}", current, total),
        }
    }
}

/// Field decoders for records: an unreadable `recorrencia` is logged and
/// dropped so one bad row does not fail a whole list.
pub mod lenient {
    use super::*;

    pub fn optional<'de, D>(deserializer: D) -> Result<Option<Recurrence>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.and_then(|text| match text.parse::<Recurrence>() {
            Ok(rule) => Some(rule),
            Err(err) => {
                tracing::warn!(error = %err, "ignoring unreadable recurrence");
                None
            }
        }))
    }

    /// Unreadable values count as a single occurrence.
    pub fn or_once<'de, D>(deserializer: D) -> Result<Recurrence, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(optional(deserializer)?.unwrap_or(Recurrence::Once))
    }
}

fn weekly_occurrences(start: NaiveDate, every: u32, weekday: Weekday, month: MonthRef) -> u32 {
    let shift = (weekday.num_days_from_sunday() + 7 - start.weekday().num_days_from_sunday()) % 7;
    let anchor = start + Duration::days(shift as i64);
    let last = month.last_day();
    if anchor > last {
        return 0;
    }

    let stride = 7 * every.max(1) as i64;
    let from = anchor.max(month.first_day());
    let offset = (from - anchor).num_days();
    let steps = (offset + stride - 1) / stride;
    let mut day = anchor + Duration::days(steps * stride);
    let mut count = 0;
    while day <= last {
        count += 1;
        day += Duration::days(stride);
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn month(y: i32, m: u32) -> MonthRef {
        MonthRef::new(y, m).unwrap()
    }

    #[test]
    fn parses_every_encoding() {
        assert_eq!("unica".parse::<Recurrence>(), Ok(Recurrence::Once));
        assert_eq!(" Mensal ".parse::<Recurrence>(), Ok(Recurrence::Monthly { every: 1 }));
        assert_eq!("trimestral".parse::<Recurrence>(), Ok(Recurrence::Monthly { every: 3 }));
        assert_eq!("anual".parse::<Recurrence>(), Ok(Recurrence::Yearly));
        assert_eq!(
            "quinzenal".parse::<Recurrence>(),
            Ok(Recurrence::Weekly {
                every: 2,
                weekday: None
            })
        );
        assert_eq!(
            "semanal:3:5".parse::<Recurrence>(),
            Ok(Recurrence::Weekly {
                every: 3,
                weekday: Some(Weekday::Fri)
            })
        );
        assert_eq!(
            "parcela:4/12".parse::<Recurrence>(),
            Ok(Recurrence::Installment {
                current: 4,
                total: 12
            })
        );
    }

    #[test]
    fn rejects_malformed_encodings() {
        assert!(matches!(
            "semanal:0:1".parse::<Recurrence>(),
            Err(RecurrenceError::InvalidInterval(_))
        ));
        assert!(matches!(
            "semanal:1:7".parse::<Recurrence>(),
            Err(RecurrenceError::InvalidWeekday(_))
        ));
        assert!(matches!(
            "parcela:13/12".parse::<Recurrence>(),
            Err(RecurrenceError::InvalidInstallment(_))
        ));
        assert!(matches!(
            "diaria".parse::<Recurrence>(),
            Err(RecurrenceError::Unknown(_))
        ));
    }

    #[test]
    fn display_is_canonical() {
        let bimonthly: Recurrence = "bimestral".parse().unwrap();
        assert_eq!(bimonthly.to_string(), "mensal:2");
        let weekly: Recurrence = "semanal:2:0".parse().unwrap();
        assert_eq!(weekly.to_string(), "semanal:2:0");
        assert_eq!(Recurrence::Once.to_string(), "unica");
    }

    #[test]
    fn biweekly_wednesdays_follow_their_stride() {
        // 2026-10-01 is a Thursday; first Wednesday on or after is 10-07.
        let rule: Recurrence = "semanal:2:3".parse().unwrap();
        let start = date(2026, 10, 1);
        assert_eq!(rule.occurrences_in_month(start, month(2026, 10)), 2); // 7, 21
        assert_eq!(rule.occurrences_in_month(start, month(2026, 11)), 2); // 4, 18
        assert_eq!(rule.occurrences_in_month(start, month(2026, 12)), 3); // 2, 16, 30
        assert_eq!(rule.occurrences_in_month(start, month(2026, 9)), 0);
    }

    #[test]
    fn weekly_without_weekday_uses_start_day() {
        let rule = Recurrence::Weekly {
            every: 1,
            weekday: None,
        };
        // Mondays in October 2026 from the 12th: 12, 19, 26.
        assert_eq!(
            rule.occurrences_in_month(date(2026, 10, 12), month(2026, 10)),
            3
        );
    }

    #[test]
    fn installments_stop_after_the_last_one() {
        let rule = Recurrence::Installment {
            current: 10,
            total: 12,
        };
        let start = date(2026, 10, 5);
        assert_eq!(rule.remaining_installments(), Some(3));
        assert_eq!(rule.occurrences_in_month(start, month(2026, 12)), 1);
        assert_eq!(rule.occurrences_in_month(start, month(2027, 1)), 0);
    }

    #[test]
    fn monthly_stride_and_yearly_month() {
        let quarterly = Recurrence::Monthly { every: 3 };
        let start = date(2026, 1, 31);
        assert_eq!(quarterly.occurrences_in_month(start, month(2026, 4)), 1);
        assert_eq!(quarterly.occurrences_in_month(start, month(2026, 5)), 0);
        assert_eq!(
            Recurrence::Yearly.occurrences_in_month(start, month(2027, 1)),
            1
        );
        assert_eq!(
            Recurrence::Yearly.occurrences_in_month(start, month(2027, 2)),
            0
        );
    }

    #[test]
    fn serde_uses_the_text_encoding() {
        let rule: Recurrence = serde_json::from_str("\"semanal:1:1\"").unwrap();
        assert_eq!(serde_json::to_string(&rule).unwrap(), "\"semanal:1:1\"");
        assert!(serde_json::from_str::<Recurrence>("\"sempre\"").is_err());
    }
}
