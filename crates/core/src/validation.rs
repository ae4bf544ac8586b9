//! Input validation applied before any query runs.
//!
//! Length limits mirror the column widths created by the schema bootstrap.

use rust_decimal::Decimal;

use crate::error::CoreError;

/// Maximum length of `users.username`.
pub const MAX_USERNAME_LEN: usize = 50;

/// Maximum length of `categories.name` and `products.name`.
pub const MAX_NAME_LEN: usize = 100;

/// Maximum length of `main_content.title`.
pub const MAX_TITLE_LEN: usize = 200;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Largest value representable by `NUMERIC(10,2)`.
pub fn max_price() -> Decimal {
    Decimal::new(99_999_999_99, 2)
}

/// Trim `value` and ensure it is non-empty and at most `max_len` characters.
///
/// Returns the trimmed string.
pub fn require_text(field: &str, value: &str, max_len: usize) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("'{field}' is required")));
    }
    if trimmed.chars().count() > max_len {
        return Err(CoreError::Validation(format!(
            "'{field}' must be at most {max_len} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional free-text field, mapping blank values to `None`.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Ensure a price is non-negative and fits the column.
pub fn validate_price(price: Decimal) -> Result<(), CoreError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(CoreError::Validation("'precio' must not be negative".into()));
    }
    if price > max_price() {
        return Err(CoreError::Validation(format!(
            "'precio' must be at most {}",
            max_price()
        )));
    }
    if price.scale() > 2 && price.round_dp(2) != price {
        return Err(CoreError::Validation(
            "'precio' must have at most two decimal places".into(),
        ));
    }
    Ok(())
}

/// Enforce the minimum password length.
pub fn validate_password(password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn require_text_trims() {
        assert_eq!(require_text("nombre", "  Laptops ", 100).unwrap(), "Laptops");
    }

    #[test]
    fn require_text_rejects_blank() {
        assert_matches!(require_text("nombre", "   ", 100), Err(CoreError::Validation(msg)) if msg.contains("nombre"));
    }

    #[test]
    fn require_text_counts_characters_not_bytes() {
        let name = "ñ".repeat(50);
        assert!(require_text("usuario", &name, MAX_USERNAME_LEN).is_ok());
        assert!(require_text("usuario", &format!("{name}a"), MAX_USERNAME_LEN).is_err());
    }

    #[test]
    fn optional_text_maps_blank_to_none() {
        assert_eq!(optional_text(Some("  ".into())), None);
        assert_eq!(optional_text(Some(" a ".into())), Some("a".into()));
        assert_eq!(optional_text(None), None);
    }

    #[test]
    fn price_bounds() {
        assert!(validate_price(Decimal::ZERO).is_ok());
        assert!(validate_price(Decimal::new(1999, 2)).is_ok());
        assert!(validate_price(max_price()).is_ok());
        assert!(validate_price(Decimal::new(-1, 2)).is_err());
        assert!(validate_price(max_price() + Decimal::ONE).is_err());
        assert!(validate_price(Decimal::new(10001, 3)).is_err());
        assert!(validate_price(Decimal::new(10000, 3)).is_ok());
    }

    #[test]
    fn password_minimum_length() {
        assert!(validate_password("secret").is_ok());
        assert_matches!(validate_password("short"), Err(CoreError::Validation(_)));
    }
}
