//! Form input validation.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use thiserror::Error;

use crate::models::UnknownChoice;

/// Identity-document number: 5 digits, dash, 7 digits, dash, 1 digit.
static CNIC_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5}-[0-9]{7}-[0-9]$").expect("CNIC pattern compiles"));

pub const MIN_AGE: i64 = 1;
pub const MAX_AGE: i64 = 120;

/// Validation errors, one per rejected form field.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid CNIC {0:?}, expected xxxxx-xxxxxxx-x")]
    InvalidCnic(String),

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid time {0:?}, expected HH:MM or HH:MM:SS")]
    InvalidTime(String),

    #[error("Invalid amount {0}, expected a non-negative number")]
    InvalidAmount(f64),

    #[error("Invalid age {0}, expected 1 to 120")]
    InvalidAge(i64),

    #[error(transparent)]
    InvalidChoice(#[from] UnknownChoice),

    #[error("Nothing to update")]
    NothingToUpdate,
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Whether `cnic` is exactly a well-formed identity-document number.
pub fn valid_cnic(cnic: &str) -> bool {
    CNIC_PATTERN.is_match(cnic)
}

pub fn check_cnic(cnic: &str) -> ValidationResult<()> {
    if valid_cnic(cnic) {
        Ok(())
    } else {
        Err(ValidationError::InvalidCnic(cnic.to_string()))
    }
}

/// Reject missing or whitespace-only values.
pub fn require(field: &'static str, value: Option<&str>) -> ValidationResult<()> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(ValidationError::MissingField(field)),
    }
}

/// Parse a calendar date and return it as `YYYY-MM-DD`.
pub fn normalize_date(date: &str) -> ValidationResult<String> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map(|d| d.format("%Y-%m-%d").to_string())
        .map_err(|_| ValidationError::InvalidDate(date.to_string()))
}

/// Parse a time of day and return it as `HH:MM:SS`.
pub fn normalize_time(time: &str) -> ValidationResult<String> {
    let trimmed = time.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .map(|t| t.format("%H:%M:%S").to_string())
        .map_err(|_| ValidationError::InvalidTime(time.to_string()))
}

pub fn check_amount(amount: f64) -> ValidationResult<()> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidAmount(amount))
    }
}

pub fn check_age(age: i64) -> ValidationResult<()> {
    if (MIN_AGE..=MAX_AGE).contains(&age) {
        Ok(())
    } else {
        Err(ValidationError::InvalidAge(age))
    }
}
