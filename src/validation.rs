//! Required-field checks applied to forms before anything is posted. The
//! backend remains the authority; these only catch obvious omissions.

use chrono::NaiveDate;

use crate::errors::ValidationError;
use crate::format::{parse_amount, parse_date};

pub fn required(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Required(field))
    } else {
        Ok(())
    }
}

pub fn positive(value: f64, field: &'static str) -> Result<(), ValidationError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::Invalid {
            field,
            reason: "deve ser maior que zero".to_string(),
        })
    }
}

pub fn non_negative(value: f64, field: &'static str) -> Result<(), ValidationError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::Invalid {
            field,
            reason: "não pode ser negativo".to_string(),
        })
    }
}

pub fn day_of_month(day: u32, field: &'static str) -> Result<(), ValidationError> {
    if (1..=31).contains(&day) {
        Ok(())
    } else {
        Err(ValidationError::Invalid {
            field,
            reason: "deve estar entre 1 e 31".to_string(),
        })
    }
}

pub fn positive_count(count: u32, field: &'static str) -> Result<(), ValidationError> {
    if count >= 1 {
        Ok(())
    } else {
        Err(ValidationError::Invalid {
            field,
            reason: "deve ser pelo menos 1".to_string(),
        })
    }
}

/// Reads a mandatory amount typed by the user.
pub fn parse_required_amount(input: &str, field: &'static str) -> Result<f64, ValidationError> {
    required(input, field)?;
    parse_amount(input).ok_or_else(|| ValidationError::Invalid {
        field,
        reason: "valor numérico inválido".to_string(),
    })
}

/// Reads an optional amount; blank means zero.
pub fn parse_optional_amount(input: &str, field: &'static str) -> Result<f64, ValidationError> {
    if input.trim().is_empty() {
        return Ok(0.0);
    }
    parse_required_amount(input, field)
}

pub fn parse_required_date(input: &str, field: &'static str) -> Result<NaiveDate, ValidationError> {
    required(input, field)?;
    parse_date(input).ok_or_else(|| ValidationError::Invalid {
        field,
        reason: "data inválida".to_string(),
    })
}

pub fn parse_count(input: &str, field: &'static str) -> Result<u32, ValidationError> {
    required(input, field)?;
    input
        .trim()
        .parse::<u32>()
        .map_err(|_| ValidationError::Invalid {
            field,
            reason: "número inteiro inválido".to_string(),
        })
}

/// Select boxes carry ids as text; an empty option means "none".
pub fn parse_optional_id(input: &str) -> Option<i64> {
    input.trim().parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_required_fields_name_the_field() {
        assert_eq!(
            required("   ", "descrição"),
            Err(ValidationError::Required("descrição"))
        );
        assert_eq!(
            ValidationError::Required("descrição").to_string(),
            "Preencha o campo obrigatório: descrição"
        );
    }

    #[test]
    fn amounts_and_counts_are_parsed() {
        assert_eq!(parse_required_amount("1.500,00", "valor"), Ok(1500.0));
        assert!(parse_required_amount("x", "valor").is_err());
        assert_eq!(parse_optional_amount("", "entrada"), Ok(0.0));
        assert_eq!(parse_count("12", "parcelas"), Ok(12));
        assert!(parse_count("-1", "parcelas").is_err());
        assert_eq!(parse_optional_id(""), None);
        assert_eq!(parse_optional_id("7"), Some(7));
    }

    #[test]
    fn range_checks() {
        assert!(day_of_month(31, "dia").is_ok());
        assert!(day_of_month(0, "dia").is_err());
        assert!(positive(0.0, "valor").is_err());
        assert!(non_negative(0.0, "saldo").is_ok());
        assert!(positive_count(0, "prazo").is_err());
    }
}
