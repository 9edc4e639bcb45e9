//! Menu prices using decimal arithmetic.
//!
//! Prices are plain [`Decimal`] amounts in the restaurant's currency unit
//! (Indonesian rupiah in the default menu). A valid price is strictly positive
//! and at most [`MAX_PRICE`].

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::validation::ValidationError;

/// Largest price accepted for a menu item (inclusive).
pub const MAX_PRICE: Decimal = Decimal::from_parts(10_000_000, 0, 0, false, 0);

/// Check that a price is within `(0, MAX_PRICE]`.
///
/// # Errors
///
/// Returns [`ValidationError::PriceNotPositive`] for zero or negative amounts
/// and [`ValidationError::PriceTooHigh`] above [`MAX_PRICE`].
pub fn validate_price(price: Decimal) -> Result<Decimal, ValidationError> {
    if price <= Decimal::ZERO {
        return Err(ValidationError::PriceNotPositive);
    }
    if price > MAX_PRICE {
        return Err(ValidationError::PriceTooHigh { max: MAX_PRICE });
    }
    Ok(price)
}

/// Parse a price typed into a form or passed on the command line.
///
/// Surrounding whitespace is ignored. The parsed amount is range-checked with
/// [`validate_price`].
///
/// # Errors
///
/// Returns [`ValidationError::PriceRequired`] for blank input,
/// [`ValidationError::PriceNotANumber`] when the input does not parse, and the
/// range errors of [`validate_price`].
pub fn parse_price(input: &str) -> Result<Decimal, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::PriceRequired);
    }
    let price = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| ValidationError::PriceNotANumber(trimmed.to_string()))?;
    validate_price(price)
}

/// Format an amount the way the menu shows it, e.g. `Rp 50.000`.
///
/// Thousands are grouped with `.`; fractional amounts keep up to two decimals
/// after a `,`.
#[must_use]
pub fn format_rupiah(amount: Decimal) -> String {
    let rounded = amount.round_dp(2).normalize();
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = rounded.abs().to_string();
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    if fraction.is_empty() {
        format!("{sign}Rp {grouped}")
    } else {
        format!("{sign}Rp {grouped},{fraction}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_max_price_constant() {
        assert_eq!(MAX_PRICE, Decimal::from(10_000_000));
    }

    #[test]
    fn test_validate_price_bounds() {
        assert!(matches!(
            validate_price(Decimal::ZERO),
            Err(ValidationError::PriceNotPositive)
        ));
        assert!(matches!(
            validate_price(Decimal::from(-5)),
            Err(ValidationError::PriceNotPositive)
        ));
        assert!(matches!(
            validate_price(Decimal::from(10_000_001)),
            Err(ValidationError::PriceTooHigh { .. })
        ));
        assert!(validate_price(Decimal::from(10_000_000)).is_ok());
        assert!(validate_price(Decimal::new(1, 2)).is_ok());
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price(" 45000 ").unwrap(), Decimal::from(45_000));
        assert_eq!(parse_price("12.50").unwrap(), Decimal::new(1250, 2));
        assert!(matches!(parse_price(""), Err(ValidationError::PriceRequired)));
        assert!(matches!(
            parse_price("abc"),
            Err(ValidationError::PriceNotANumber(_))
        ));
        assert!(matches!(
            parse_price("NaN"),
            Err(ValidationError::PriceNotANumber(_))
        ));
        assert!(matches!(
            parse_price("0"),
            Err(ValidationError::PriceNotPositive)
        ));
        assert!(matches!(
            parse_price("10000000.01"),
            Err(ValidationError::PriceTooHigh { .. })
        ));
    }

    #[test]
    fn test_format_rupiah() {
        assert_eq!(format_rupiah(Decimal::from(0)), "Rp 0");
        assert_eq!(format_rupiah(Decimal::from(500)), "Rp 500");
        assert_eq!(format_rupiah(Decimal::from(50_000)), "Rp 50.000");
        assert_eq!(format_rupiah(Decimal::from(1_250_000)), "Rp 1.250.000");
        assert_eq!(format_rupiah(Decimal::new(1_050, 1)), "Rp 105");
        assert_eq!(format_rupiah(Decimal::new(10_525, 2)), "Rp 105,25");
    }
}
