use chrono::NaiveDate;

pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn to_cents(value: f64) -> i64 {
    (value * 100.0).round() as i64
}

pub fn from_cents(cents: i64) -> f64 {
    cents as f64 / 100.0
}

fn format_with_dots(value: u64) -> String {
    let digits = value.to_string().chars().rev().collect::<Vec<char>>();
    let mut out = Vec::new();
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push('.');
        }
        out.push(*ch);
    }
    out.into_iter().rev().collect()
}

/// Brazilian real, e.g. `R$ 1.234,56` / `-R$ 0,50`.
pub fn format_currency(amount: f64) -> String {
    let cents = to_cents(amount);
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}R$ {},{:02}", sign, format_with_dots(abs / 100), abs % 100)
}

pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value).replace('.', ",")
}

/// Accepts `1.234,56`, `1234,56`, `1234.56` and an optional `R$` prefix.
/// A single dot followed by exactly three digits is read as a thousands mark.
pub fn parse_amount(input: &str) -> Option<f64> {
    let cleaned: String = input
        .trim()
        .trim_start_matches("R$")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let normalized = if cleaned.contains(',') {
        cleaned.replace('.', "").replace(',', ".")
    } else if cleaned.matches('.').count() > 1 {
        cleaned.replace('.', "")
    } else if let Some((_, decimals)) = cleaned.split_once('.') {
        if decimals.len() == 3 {
            cleaned.replace('.', "")
        } else {
            cleaned
        }
    } else {
        cleaned
    };

    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Value for `<input type="date">`.
pub fn input_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%d/%m/%Y"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_uses_brazilian_separators() {
        assert_eq!(format_currency(1234.5), "R$ 1.234,50");
        assert_eq!(format_currency(0.0), "R$ 0,00");
        assert_eq!(format_currency(-0.5), "-R$ 0,50");
        assert_eq!(format_currency(1_000_000.0), "R$ 1.000.000,00");
    }

    #[test]
    fn amounts_parse_in_both_notations() {
        assert_eq!(parse_amount("1.234,56"), Some(1234.56));
        assert_eq!(parse_amount("R$ 10"), Some(10.0));
        assert_eq!(parse_amount("1234.56"), Some(1234.56));
        assert_eq!(parse_amount("1.234"), Some(1234.0));
        assert_eq!(parse_amount("1.234.567"), Some(1234567.0));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("abc"), None);
    }

    #[test]
    fn dates_round_trip_through_inputs() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        assert_eq!(format_date(date), "09/03/2026");
        assert_eq!(parse_date(&input_date(date)), Some(date));
        assert_eq!(parse_date("09/03/2026"), Some(date));
        assert_eq!(parse_date("2026-02-30"), None);
    }

    #[test]
    fn percent_uses_comma() {
        assert_eq!(format_percent(1.25), "1,25%");
    }
}
