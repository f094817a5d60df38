//! Utilidades de validación
//!
//! Validadores custom usados por los DTOs con `#[validate(custom = ...)]`
//! y por los controllers.

use chrono::NaiveDate;
use chrono_tz::Tz;
use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Hora de envío en formato 24h `HH:MM`
    pub static ref SEND_TIME_RE: Regex = Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").unwrap();
}

/// Validar que la zona horaria sea un nombre IANA conocido
pub fn validate_timezone(value: &str) -> Result<(), ValidationError> {
    value.parse::<Tz>().map(|_| ()).map_err(|_| {
        let mut error = ValidationError::new("timezone");
        error.add_param("value".into(), &value.to_string());
        error
    })
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que el rango de fechas esté ordenado
pub fn validate_date_order(start: NaiveDate, end: NaiveDate) -> Result<(), ValidationError> {
    if start > end {
        let mut error = ValidationError::new("date_range");
        error.add_param("start".into(), &start.to_string());
        error.add_param("end".into(), &end.to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_time_regex() {
        assert!(SEND_TIME_RE.is_match("09:00"));
        assert!(SEND_TIME_RE.is_match("23:59"));
        assert!(!SEND_TIME_RE.is_match("24:00"));
        assert!(!SEND_TIME_RE.is_match("9:00"));
        assert!(!SEND_TIME_RE.is_match("09:00:00"));
    }

    #[test]
    fn test_validate_timezone() {
        assert!(validate_timezone("Australia/Melbourne").is_ok());
        assert!(validate_timezone("UTC").is_ok());
        assert!(validate_timezone("Mars/Olympus").is_err());
    }

    #[test]
    fn test_validate_date_order() {
        let a = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let b = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
        assert!(validate_date_order(a, b).is_ok());
        assert!(validate_date_order(b, a).is_err());
    }

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("  ").is_err());
        assert!(validate_not_empty("fleet@example.com").is_ok());
    }
}
