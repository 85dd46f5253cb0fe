//! Internal helpers for model validation and conversion.
//!
//! These utilities are **not** part of the public API. They centralize
//! validation and mapping logic so the engine enforces consistent invariants.

use uuid::Uuid;

use crate::{EngineError, ResultEngine};

/// Parse a UUID from storage and return a labeled error on failure.
pub(crate) fn parse_uuid(value: &str, label: &str) -> ResultEngine<Uuid> {
    Uuid::parse_str(value).map_err(|_| EngineError::InvalidId(format!("invalid {label} id")))
}

/// Trim a required text field, rejecting empty values.
pub(crate) fn normalize_required_text(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidName(format!("{label} must not be empty")));
    }
    Ok(trimmed.to_string())
}

/// Largest amount, limit or target accepted from a caller.
///
/// Sums over many records stay far from `i64::MAX`; aggregations still
/// saturate instead of overflowing.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000_000;

fn ensure_below_max(value: i64, label: &str) -> ResultEngine<()> {
    if value > MAX_AMOUNT {
        return Err(EngineError::InvalidAmount(format!(
            "{label} must be <= {MAX_AMOUNT}"
        )));
    }
    Ok(())
}

pub(crate) fn ensure_non_negative(value: i64, label: &str) -> ResultEngine<()> {
    if value < 0 {
        return Err(EngineError::InvalidAmount(format!("{label} must be >= 0")));
    }
    ensure_below_max(value, label)
}

pub(crate) fn ensure_positive(value: i64, label: &str) -> ResultEngine<()> {
    if value <= 0 {
        return Err(EngineError::InvalidAmount(format!("{label} must be > 0")));
    }
    ensure_below_max(value, label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_is_trimmed() {
        assert_eq!(normalize_required_text("  Food ", "category").unwrap(), "Food");
        assert_eq!(
            normalize_required_text("   ", "category"),
            Err(EngineError::InvalidName("category must not be empty".to_string()))
        );
    }

    #[test]
    fn amount_rules() {
        assert!(ensure_non_negative(0, "amount").is_ok());
        assert!(ensure_non_negative(-1, "amount").is_err());
        assert!(ensure_positive(0, "limit").is_err());
        assert!(ensure_positive(1, "limit").is_ok());
    }

    #[test]
    fn amounts_above_the_cap_are_rejected() {
        assert!(ensure_non_negative(MAX_AMOUNT, "amount").is_ok());
        assert_eq!(
            ensure_non_negative(MAX_AMOUNT + 1, "amount"),
            Err(EngineError::InvalidAmount(format!(
                "amount must be <= {MAX_AMOUNT}"
            )))
        );
        assert!(ensure_positive(i64::MAX, "limit").is_err());
    }
}
