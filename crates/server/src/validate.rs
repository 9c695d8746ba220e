//! Field-level request checks. Every function trims its input first and
//! returns the cleaned value.

use chrono::NaiveDate;
use engine::{CategoryType, TransactionKind};

use crate::ServerError;

type Checked<T> = Result<T, ServerError>;

/// `shape` uses `9` for "any ASCII digit"; every other char must match as is.
fn has_shape(value: &str, shape: &str) -> bool {
    value.len() == shape.len()
        && value.bytes().zip(shape.bytes()).all(|(v, s)| match s {
            b'9' => v.is_ascii_digit(),
            other => v == other,
        })
}

/// Non-empty after trimming.
pub(crate) fn required(field: &str, raw: &str) -> Checked<String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(ServerError::validation(format!("{field} is required")));
    }
    Ok(value.to_string())
}

pub(crate) fn optional(raw: &str) -> String {
    raw.trim().to_string()
}

/// `YYYY-MM` naming a real calendar month.
pub(crate) fn month_key(raw: &str) -> Checked<String> {
    let value = raw.trim();
    if !has_shape(value, "9999-99")
        || NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d").is_err()
    {
        return Err(ServerError::validation(format!("invalid month: {value}")));
    }
    Ok(value.to_string())
}

/// `YYYY-MM-DD` naming a real calendar date.
pub(crate) fn date_key(raw: &str) -> Checked<String> {
    let value = raw.trim();
    if !has_shape(value, "9999-99-99") || NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
        return Err(ServerError::validation(format!("invalid date: {value}")));
    }
    Ok(value.to_string())
}

pub(crate) fn category_type(raw: &str) -> Checked<CategoryType> {
    Ok(CategoryType::try_from(raw.trim())?)
}

pub(crate) fn transaction_kind(raw: &str) -> Checked<TransactionKind> {
    Ok(TransactionKind::try_from(raw.trim())?)
}

pub(crate) fn budget_amount(amount_cents: i64) -> Checked<i64> {
    if amount_cents < 0 {
        return Err(ServerError::validation("amountCents must be >= 0"));
    }
    Ok(amount_cents)
}

pub(crate) fn transaction_amount(amount_cents: i64) -> Checked<i64> {
    if amount_cents <= 0 {
        return Err(ServerError::validation("amountCents must be > 0"));
    }
    Ok(amount_cents)
}
