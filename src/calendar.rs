use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .map(|first_next| (first_next - Duration::days(1)).day())
        .unwrap_or(28)
}

/// Builds a date, pulling `day` back to the last day of the month when needed.
pub fn with_day_clamped(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day.min(days_in_month(year, month)))
}

/// Shifts by whole months keeping the anchor day (clamped, never accumulated).
pub fn add_months(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let index = date.year() * 12 + date.month0() as i32 + months;
    let year = index.div_euclid(12);
    let month = index.rem_euclid(12) as u32 + 1;
    with_day_clamped(year, month, date.day())
}

/// Calendar months from `from` to `to`, ignoring the day of month.
pub fn months_between(from: NaiveDate, to: NaiveDate) -> i32 {
    MonthRef::containing(from).months_until(MonthRef::containing(to))
}

/// A calendar month, used as the unit for filters and projections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthRef {
    year: i32,
    month: u32,
}

impl MonthRef {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// 1 = January.
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn today() -> Self {
        Self::containing(chrono::Local::now().date_naive())
    }

    fn index(&self) -> i32 {
        self.year * 12 + self.month as i32 - 1
    }

    fn from_index(index: i32) -> Self {
        Self {
            year: index.div_euclid(12),
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn offset(&self, months: i32) -> Self {
        Self::from_index(self.index() + months)
    }

    pub fn next(&self) -> Self {
        self.offset(1)
    }

    pub fn previous(&self) -> Self {
        self.offset(-1)
    }

    pub fn months_until(&self, other: MonthRef) -> i32 {
        other.index() - self.index()
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(&self) -> NaiveDate {
        with_day_clamped(self.year, self.month, 31).unwrap_or(NaiveDate::MAX)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Short label such as `out/2026`.
    pub fn label(&self) -> String {
        let name = MONTH_ABBREVIATIONS
            .get(self.month0())
            .copied()
            .unwrap_or("?");
        format!("{}/{}", name, self.year)
    }

    fn month0(&self) -> usize {
        self.month.saturating_sub(1) as usize
    }
}

impl fmt::Display for MonthRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| format!("mês inválido: {}", s))?;
        let year = year
            .parse::<i32>()
            .map_err(|_| format!("ano inválido: {}", s))?;
        let month = month
            .parse::<u32>()
            .map_err(|_| format!("mês inválido: {}", s))?;
        MonthRef::new(year, month).ok_or_else(|| format!("mês inválido: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn add_months_clamps_without_drifting() {
        let anchor = date(2026, 1, 31);
        assert_eq!(add_months(anchor, 1), Some(date(2026, 2, 28)));
        assert_eq!(add_months(anchor, 2), Some(date(2026, 3, 31)));
        assert_eq!(add_months(anchor, -2), Some(date(2025, 11, 30)));
        assert_eq!(add_months(date(2027, 12, 15), 1), Some(date(2028, 1, 15)));
    }

    #[test]
    fn leap_february_has_29_days() {
        assert_eq!(days_in_month(2028, 2), 29);
        assert_eq!(days_in_month(2026, 2), 28);
        assert_eq!(days_in_month(2026, 12), 31);
    }

    #[test]
    fn month_ref_navigation_and_parsing() {
        let month: MonthRef = "2026-12".parse().unwrap();
        assert_eq!(month.next(), MonthRef::new(2027, 1).unwrap());
        assert_eq!(month.offset(-12).to_string(), "2025-12");
        assert_eq!(month.label(), "dez/2026");
        assert_eq!(month.last_day(), date(2026, 12, 31));
        assert!("2026-13".parse::<MonthRef>().is_err());
        assert_eq!(months_between(date(2025, 11, 30), date(2026, 2, 1)), 3);
    }

    #[test]
    fn accessors_expose_validated_parts() {
        let month = MonthRef::containing(date(2027, 1, 9));
        assert_eq!((month.year(), month.month()), (2027, 1));
        assert_eq!(month.label(), "jan/2027");
        assert_eq!(MonthRef::new(2027, 0), None);
        assert_eq!(MonthRef::new(2027, 13), None);
    }
}
