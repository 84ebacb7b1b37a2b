//! Validation and money math for the Inventory Management Platform
//!
//! Pure functions only; the stock engine and reporting layer call these so
//! the arithmetic has a single definition.

use rust_decimal::Decimal;

// ============================================================================
// SKU code handling
// ============================================================================

/// Canonical form of a SKU code: trimmed and uppercased. Uniqueness is
/// enforced over this form, so `abc-1` and `ABC-1` collide.
pub fn normalize_sku_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Validate a SKU code after normalization: non-empty, at most 64 chars,
/// ASCII alphanumeric plus `-` and `_`.
pub fn validate_sku_code(code: &str) -> Result<(), &'static str> {
    let code = code.trim();
    if code.is_empty() {
        return Err("SKU code must not be empty");
    }
    if code.len() > 64 {
        return Err("SKU code must be at most 64 characters");
    }
    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err("SKU code may only contain letters, digits, '-' and '_'");
    }
    Ok(())
}

/// Case-insensitive SKU code equality.
pub fn sku_codes_collide(a: &str, b: &str) -> bool {
    normalize_sku_code(a) == normalize_sku_code(b)
}

// ============================================================================
// Quantities and money
// ============================================================================

/// Line-item quantities must be strictly positive integers.
pub fn validate_quantity(quantity: i64) -> Result<(), &'static str> {
    if quantity <= 0 {
        return Err("Quantity must be a positive integer");
    }
    Ok(())
}

/// Prices and costs must be non-negative.
pub fn validate_unit_amount(amount: Decimal) -> Result<(), &'static str> {
    if amount < Decimal::ZERO {
        return Err("Amount must not be negative");
    }
    Ok(())
}

/// Platform fee percentages are whole-number percents in [0, 100].
pub fn validate_fee_percentage(fee: Decimal) -> Result<(), &'static str> {
    if fee < Decimal::ZERO || fee > Decimal::ONE_HUNDRED {
        return Err("Fee percentage must be between 0 and 100");
    }
    Ok(())
}

/// Total for one line item: quantity times unit price (OUT) or unit cost (IN).
pub fn line_total(quantity: i64, unit_amount: Decimal) -> Decimal {
    Decimal::from(quantity) * unit_amount
}

/// Platform fee on a gross amount. `fee_percentage` is a whole number,
/// so `5` means 5%.
pub fn platform_fee(gross: Decimal, fee_percentage: Decimal) -> Decimal {
    gross * fee_percentage / Decimal::ONE_HUNDRED
}

/// Net revenue after the platform fee.
pub fn net_amount(gross: Decimal, fee: Decimal) -> Decimal {
    gross - fee
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_normalize_sku_code() {
        assert_eq!(normalize_sku_code("  abc-1 "), "ABC-1");
        assert_eq!(normalize_sku_code("ABC-1"), "ABC-1");
    }

    #[test]
    fn test_sku_codes_collide_case_insensitive() {
        assert!(sku_codes_collide("ABC-1", "abc-1"));
        assert!(sku_codes_collide(" abc-1", "Abc-1 "));
        assert!(!sku_codes_collide("ABC-1", "ABC-2"));
    }

    #[test]
    fn test_validate_sku_code() {
        assert!(validate_sku_code("TSHIRT-RED-M").is_ok());
        assert!(validate_sku_code("A_1").is_ok());
        assert!(validate_sku_code("").is_err());
        assert!(validate_sku_code("   ").is_err());
        assert!(validate_sku_code("BAD CODE").is_err());
        assert!(validate_sku_code(&"X".repeat(65)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-5).is_err());
    }

    #[test]
    fn test_validate_unit_amount() {
        assert!(validate_unit_amount(Decimal::ZERO).is_ok());
        assert!(validate_unit_amount(dec("19.99")).is_ok());
        assert!(validate_unit_amount(dec("-0.01")).is_err());
    }

    #[test]
    fn test_fee_math_five_percent() {
        let gross = dec("1000");
        let fee = platform_fee(gross, dec("5"));
        assert_eq!(fee, dec("50"));
        assert_eq!(net_amount(gross, fee), dec("950"));
    }

    #[test]
    fn test_fee_math_no_platform() {
        let gross = dec("1000");
        assert_eq!(net_amount(gross, Decimal::ZERO), gross);
    }

    #[test]
    fn test_line_total() {
        assert_eq!(line_total(15, dec("100")), dec("1500"));
        assert_eq!(line_total(3, dec("19.99")), dec("59.97"));
    }

    proptest! {
        /// Fee is never negative and never exceeds gross for percentages
        /// in the valid range.
        #[test]
        fn prop_fee_bounded(gross_cents in 0i64..10_000_000, pct in 0i64..=100) {
            let gross = Decimal::new(gross_cents, 2);
            let fee = platform_fee(gross, Decimal::from(pct));
            prop_assert!(fee >= Decimal::ZERO);
            prop_assert!(fee <= gross);
            prop_assert_eq!(net_amount(gross, fee) + fee, gross);
        }

        /// Line totals scale linearly with quantity.
        #[test]
        fn prop_line_total_linear(qty in 1i64..10_000, unit_cents in 0i64..1_000_000) {
            let unit = Decimal::new(unit_cents, 2);
            prop_assert_eq!(line_total(qty, unit), Decimal::from(qty) * unit);
        }

        /// Normalization is idempotent.
        #[test]
        fn prop_normalize_idempotent(code in "[a-zA-Z0-9_-]{1,32}") {
            let once = normalize_sku_code(&code);
            prop_assert_eq!(normalize_sku_code(&once), once);
        }
    }
}
