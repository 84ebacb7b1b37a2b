//! Catalog management tests
//!
//! Covers SKU code normalization and case-insensitive uniqueness, the
//! money validations on the SKU form, and the product delete guard.

use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::{
    normalize_sku_code, sku_codes_collide, validate_sku_code, validate_unit_amount,
    SystemSettings,
};
use std::str::FromStr;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Codes are stored trimmed and uppercased
    #[test]
    fn test_code_normalization() {
        assert_eq!(normalize_sku_code(" tshirt-red-m "), "TSHIRT-RED-M");
        assert_eq!(normalize_sku_code("ABC-1"), "ABC-1");
    }

    /// Creating "ABC-1" when "abc-1" exists must collide, regardless of
    /// case
    #[test]
    fn test_uniqueness_is_case_insensitive() {
        assert!(sku_codes_collide("ABC-1", "abc-1"));
        assert!(sku_codes_collide("abc-1", "Abc-1"));
        assert!(!sku_codes_collide("ABC-1", "ABC-10"));
    }

    /// Code format rules
    #[test]
    fn test_code_format() {
        assert!(validate_sku_code("TSHIRT-RED-M").is_ok());
        assert!(validate_sku_code("A1_B2").is_ok());
        assert!(validate_sku_code("").is_err());
        assert!(validate_sku_code("  ").is_err());
        assert!(validate_sku_code("HAS SPACE").is_err());
        assert!(validate_sku_code("BAD/CODE").is_err());
    }

    /// Prices and costs must not be negative; zero is allowed
    #[test]
    fn test_money_validation() {
        assert!(validate_unit_amount(Decimal::ZERO).is_ok());
        assert!(validate_unit_amount(dec("199.99")).is_ok());
        assert!(validate_unit_amount(dec("-1")).is_err());
    }

    /// New SKUs inherit the default reorder point from settings when the
    /// form leaves it blank
    #[test]
    fn test_reorder_point_default() {
        let settings = SystemSettings::default();
        let provided: Option<i64> = None;
        assert_eq!(provided.unwrap_or(settings.default_reorder_point), 10);

        let explicit = Some(25i64);
        assert_eq!(explicit.unwrap_or(settings.default_reorder_point), 25);
    }

    /// A product with SKUs cannot be deleted; one without can
    #[test]
    fn test_product_delete_guard() {
        assert!(super::helpers::can_delete_product(3).is_err());
        assert!(super::helpers::can_delete_product(0).is_ok());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Any code collides with its own case variants
        #[test]
        fn prop_case_variants_collide(code in "[a-z0-9-]{1,20}") {
            prop_assert!(sku_codes_collide(&code, &code.to_uppercase()));
        }

        /// Normalized codes always pass the collision check against
        /// themselves and survive re-normalization unchanged
        #[test]
        fn prop_normalization_stable(code in "[a-zA-Z0-9_-]{1,32}") {
            let normalized = normalize_sku_code(&code);
            prop_assert_eq!(normalize_sku_code(&normalized), normalized.clone());
            prop_assert!(sku_codes_collide(&code, &normalized));
        }

        /// Valid characters always validate after trimming
        #[test]
        fn prop_valid_codes_accepted(code in "[A-Z0-9][A-Z0-9_-]{0,30}") {
            prop_assert!(validate_sku_code(&code).is_ok());
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

#[cfg(test)]
mod helpers {
    /// Mirror of the product delete precondition
    pub fn can_delete_product(sku_count: usize) -> Result<(), &'static str> {
        if sku_count > 0 {
            Err("Product has SKUs. Delete SKUs first.")
        } else {
            Ok(())
        }
    }
}
