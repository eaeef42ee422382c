//! Input validation
//!
//! Checks run before any I/O. Each returns `AppError::Validation` with a
//! message suitable for showing to the user.

use crate::config::{MAX_SHORT_TEXT_LENGTH, MAX_TRIP_DAYS, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, Result};
use chrono::NaiveDate;

/// Require a non-blank value; returns it trimmed
pub fn require_text(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{} is required", field)));
    }

    if trimmed.chars().count() > MAX_SHORT_TEXT_LENGTH {
        return Err(AppError::validation(format!(
            "{} must be at most {} characters",
            field, MAX_SHORT_TEXT_LENGTH
        )));
    }

    Ok(trimmed.to_string())
}

/// Require non-blank long-form text (no length cap); returns it unchanged
pub fn require_body(field: &str, value: &str) -> Result<String> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{} is required", field)));
    }

    Ok(value.to_string())
}

/// Trim an optional value, mapping blank to `None`
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Minimal structural email check: one `@`, non-empty local part and a dotted domain
pub fn require_email(value: &str) -> Result<String> {
    let email = value.trim();

    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if !valid {
        return Err(AppError::validation(format!(
            "Invalid email address: {}",
            value
        )));
    }

    Ok(email.to_string())
}

pub fn require_password(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }

    Ok(())
}

/// Trip dates must not run backwards and may span at most `MAX_TRIP_DAYS`
pub fn require_date_range(start: NaiveDate, end: NaiveDate) -> Result<()> {
    if start > end {
        return Err(AppError::validation(format!(
            "Start date {} is after end date {}",
            start, end
        )));
    }

    let days = (end - start).num_days() + 1;
    if days > MAX_TRIP_DAYS {
        return Err(AppError::validation(format!(
            "Trips can last at most {} days, got {}",
            MAX_TRIP_DAYS, days
        )));
    }

    Ok(())
}

/// Budgets may be zero but not negative
pub fn require_budget(budget: f64) -> Result<()> {
    if !budget.is_finite() || budget < 0.0 {
        return Err(AppError::validation("Budget must be a non-negative amount"));
    }

    Ok(())
}

/// Expense amounts must be strictly positive
pub fn require_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(AppError::validation("Amount must be greater than zero"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text() {
        assert_eq!(require_text("Destination", "  Paris ").unwrap(), "Paris");
        assert!(require_text("Destination", "   ").is_err());
        assert!(require_text("Title", &"x".repeat(MAX_SHORT_TEXT_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text(Some(" Louvre ")), Some("Louvre".to_string()));
        assert_eq!(optional_text(Some("  ")), None);
        assert_eq!(optional_text(None), None);
    }

    #[test]
    fn test_require_email() {
        assert_eq!(
            require_email(" user@example.com ").unwrap(),
            "user@example.com"
        );
        assert!(require_email("user@").is_err());
        assert!(require_email("@example.com").is_err());
        assert!(require_email("user@localhost").is_err());
        assert!(require_email("a@b@c.com").is_err());
        assert!(require_email("us er@example.com").is_err());
    }

    #[test]
    fn test_require_password() {
        assert!(require_password("12345").is_err());
        assert!(require_password("123456").is_ok());
    }

    #[test]
    fn test_dates_and_amounts() {
        let d1 = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();

        assert!(require_date_range(d1, d2).is_ok());
        assert!(require_date_range(d1, d1).is_ok());
        assert!(require_date_range(d2, d1).is_err());

        let year_end = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        assert!(require_date_range(d1, year_end).is_ok());
        let next_year = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert!(require_date_range(d1, next_year).is_err());

        let first = NaiveDate::from_ymd_opt(1, 1, 1).unwrap();
        let last = NaiveDate::from_ymd_opt(9999, 12, 31).unwrap();
        assert!(require_date_range(first, last).is_err());

        assert!(require_budget(0.0).is_ok());
        assert!(require_budget(-1.0).is_err());
        assert!(require_budget(f64::NAN).is_err());

        assert!(require_amount(0.01).is_ok());
        assert!(require_amount(0.0).is_err());
        assert!(require_amount(f64::INFINITY).is_err());
    }
}
