//! Stock movement engine tests
//!
//! Covers the rules the engine enforces:
//! - Stock conservation across IN/OUT/ADJUSTMENT sequences
//! - The no-oversell invariant when negative stock is disallowed
//! - Platform fee math on OUT transactions
//! - Reason/direction consistency

use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::{
    line_total, net_amount, platform_fee, stock_status, validate_quantity, StockStatus,
    TransactionDirection,
};
use std::str::FromStr;

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Stock conservation: the resulting stock is the starting value plus
    /// signed quantities, nothing else
    #[test]
    fn test_stock_conservation() {
        let movements: Vec<(TransactionDirection, i64)> = vec![
            (TransactionDirection::In, 50),
            (TransactionDirection::Out, 20),
            (TransactionDirection::In, 10),
            (TransactionDirection::Out, 15),
        ];

        let final_stock = movements.iter().fold(100i64, |stock, (direction, qty)| {
            match direction {
                TransactionDirection::In => stock + qty,
                _ => stock - qty,
            }
        });

        // 100 + 50 - 20 + 10 - 15 = 125
        assert_eq!(final_stock, 125);
    }

    /// Fee math: gross 1000 at 5% -> fee 50, net 950
    #[test]
    fn test_fee_math_with_platform() {
        let gross = dec("1000");
        let fee = platform_fee(gross, dec("5"));
        assert_eq!(fee, dec("50"));
        assert_eq!(net_amount(gross, fee), dec("950"));
    }

    /// Without a platform the fee is zero and net equals gross
    #[test]
    fn test_fee_math_without_platform() {
        let gross = dec("1000");
        assert_eq!(net_amount(gross, Decimal::ZERO), gross);
    }

    /// OUT line totals use the unit price
    #[test]
    fn test_out_line_total() {
        assert_eq!(line_total(15, dec("100")), dec("1500"));
    }

    /// IN line totals use the unit cost
    #[test]
    fn test_in_line_total() {
        assert_eq!(line_total(8, dec("42.50")), dec("340.00"));
    }

    /// Quantities must be strictly positive
    #[test]
    fn test_quantity_validation() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
    }

    /// A reason configured for IN rejects an OUT submission
    #[test]
    fn test_reason_direction_mismatch_rejected() {
        let reason_direction = TransactionDirection::In;
        let submitted = TransactionDirection::Out;
        assert!(super::integration_helpers::check_reason_direction(
            reason_direction,
            submitted
        )
        .is_err());
    }

    /// Matching directions pass
    #[test]
    fn test_reason_direction_match_accepted() {
        for d in [TransactionDirection::In, TransactionDirection::Out] {
            assert!(super::integration_helpers::check_reason_direction(d, d).is_ok());
        }
    }

    /// An adjustment borrows the reason's direction for arithmetic
    #[test]
    fn test_adjustment_effective_direction() {
        let effective = super::integration_helpers::effective_direction(
            TransactionDirection::Adjustment,
            TransactionDirection::Out,
        );
        assert_eq!(effective, TransactionDirection::Out);
    }

    /// End-to-end scenario: stock 20, reorder point 5.
    /// Stock Out 15 @ 100 succeeds, stock 5, status IN_STOCK -> LOW_STOCK,
    /// amounts 1500/1500. A second Stock Out of 10 is rejected and stock
    /// stays at 5.
    #[test]
    fn test_end_to_end_sale_then_oversell() {
        let reorder_point = 5;
        let mut stock = 20i64;
        assert_eq!(stock_status(stock, reorder_point), StockStatus::InStock);

        // First sale
        let qty = 15;
        let unit_price = dec("100");
        stock = super::integration_helpers::apply_movement(
            stock,
            TransactionDirection::Out,
            qty,
            false,
        )
        .unwrap();
        assert_eq!(stock, 5);
        assert_eq!(stock_status(stock, reorder_point), StockStatus::LowStock);

        let gross = line_total(qty, unit_price);
        assert_eq!(gross, dec("1500"));
        // No platform: net equals gross
        assert_eq!(net_amount(gross, Decimal::ZERO), dec("1500"));

        // Second sale would drive stock to -5
        let rejected = super::integration_helpers::apply_movement(
            stock,
            TransactionDirection::Out,
            10,
            false,
        );
        assert!(rejected.is_err());
        assert_eq!(stock, 5);
    }

    /// With negative stock enabled the same submission is allowed
    #[test]
    fn test_oversell_allowed_when_negative_stock_enabled() {
        let stock = super::integration_helpers::apply_movement(
            5,
            TransactionDirection::Out,
            10,
            true,
        )
        .unwrap();
        assert_eq!(stock, -5);
        assert_eq!(stock_status(stock, 5), StockStatus::Critical);
    }

    /// The oversell gate applies to adjustments exactly as to Stock Out
    #[test]
    fn test_adjustment_subject_to_oversell_gate() {
        let result = super::integration_helpers::apply_movement(
            3,
            TransactionDirection::Out,
            4,
            false,
        );
        assert!(result.is_err());
    }

    /// Duplicate lines for one SKU accumulate against the same balance
    #[test]
    fn test_duplicate_lines_accumulate() {
        let mut remaining = 10i64;
        let lines = [6i64, 5];

        let mut rejected = false;
        for qty in lines {
            if remaining - qty < 0 {
                rejected = true;
                break;
            }
            remaining -= qty;
        }

        // 6 fits, but 6 + 5 exceeds 10
        assert!(rejected);
    }

    /// Stock In updates the stored cost to the latest received cost:
    /// last-cost-wins, not a weighted average
    #[test]
    fn test_last_cost_wins() {
        let receipts = [dec("10.00"), dec("12.50"), dec("11.75")];

        let stored_cost = receipts.iter().fold(dec("9.00"), |_, cost| *cost);
        assert_eq!(stored_cost, dec("11.75"));

        let average = receipts.iter().sum::<Decimal>() / Decimal::from(receipts.len() as i64);
        assert_ne!(stored_cost, average);
    }

    /// Aggregate totals sum over line items
    #[test]
    fn test_aggregate_totals() {
        let lines = [(3i64, dec("100")), (2, dec("50.50")), (1, dec("9.99"))];

        let total_quantity: i64 = lines.iter().map(|(q, _)| q).sum();
        let total_amount: Decimal = lines.iter().map(|(q, p)| line_total(*q, *p)).sum();

        assert_eq!(total_quantity, 6);
        assert_eq!(total_amount, dec("410.99"));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn direction_strategy() -> impl Strategy<Value = TransactionDirection> {
        prop_oneof![
            Just(TransactionDirection::In),
            Just(TransactionDirection::Out),
        ]
    }

    fn quantity_strategy() -> impl Strategy<Value = i64> {
        1i64..=1_000
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Stock conservation: final stock equals s0 + sum(IN) - sum(OUT)
        #[test]
        fn prop_stock_conservation(
            s0 in 0i64..10_000,
            movements in prop::collection::vec((direction_strategy(), quantity_strategy()), 0..30)
        ) {
            let mut total_in = 0i64;
            let mut total_out = 0i64;
            let mut stock = s0;

            for (direction, qty) in &movements {
                match direction {
                    TransactionDirection::In => {
                        stock += qty;
                        total_in += qty;
                    }
                    _ => {
                        stock -= qty;
                        total_out += qty;
                    }
                }
            }

            prop_assert_eq!(stock, s0 + total_in - total_out);
        }

        /// With negative stock disallowed, committed movements never leave
        /// stock below zero; rejected movements leave it unchanged
        #[test]
        fn prop_no_oversell_invariant(
            s0 in 0i64..500,
            movements in prop::collection::vec((direction_strategy(), quantity_strategy()), 0..30)
        ) {
            let mut stock = s0;

            for (direction, qty) in movements {
                match super::integration_helpers::apply_movement(stock, direction, qty, false) {
                    Ok(next) => stock = next,
                    Err(_) => { /* rejected, stock unchanged */ }
                }
                prop_assert!(stock >= 0);
            }
        }

        /// Fee never exceeds gross and net + fee reassembles gross
        #[test]
        fn prop_fee_decomposition(
            gross_cents in 0i64..100_000_000,
            pct in 0i64..=100
        ) {
            let gross = Decimal::new(gross_cents, 2);
            let fee = platform_fee(gross, Decimal::from(pct));

            prop_assert!(fee >= Decimal::ZERO);
            prop_assert!(fee <= gross);
            prop_assert_eq!(net_amount(gross, fee) + fee, gross);
        }

        /// Total amount is invariant under line ordering
        #[test]
        fn prop_total_order_independent(
            mut lines in prop::collection::vec(
                (quantity_strategy(), 0i64..100_000),
                1..10
            )
        ) {
            let total = |ls: &[(i64, i64)]| -> Decimal {
                ls.iter().map(|(q, cents)| line_total(*q, Decimal::new(*cents, 2))).sum()
            };

            let forward = total(&lines);
            lines.reverse();
            let backward = total(&lines);

            prop_assert_eq!(forward, backward);
        }
    }
}

// ============================================================================
// Integration Test Helpers
// ============================================================================

#[cfg(test)]
mod integration_helpers {
    use super::*;

    /// Mirror of the engine's per-SKU stock arithmetic and oversell gate
    pub fn apply_movement(
        current_stock: i64,
        direction: TransactionDirection,
        quantity: i64,
        allow_negative: bool,
    ) -> Result<i64, &'static str> {
        if quantity <= 0 {
            return Err("Quantity must be a positive integer");
        }

        match direction {
            TransactionDirection::In => Ok(current_stock + quantity),
            _ => {
                if !allow_negative && current_stock - quantity < 0 {
                    Err("Insufficient stock")
                } else {
                    Ok(current_stock - quantity)
                }
            }
        }
    }

    /// Mirror of the reason/direction precondition
    pub fn check_reason_direction(
        reason: TransactionDirection,
        submitted: TransactionDirection,
    ) -> Result<(), &'static str> {
        if reason == submitted {
            Ok(())
        } else {
            Err("Reason category direction does not match")
        }
    }

    /// Mirror of the adjustment direction resolution: the ledger tag stays
    /// ADJUSTMENT but arithmetic follows the reason
    pub fn effective_direction(
        submitted: TransactionDirection,
        reason: TransactionDirection,
    ) -> TransactionDirection {
        match submitted {
            TransactionDirection::Adjustment => reason,
            other => other,
        }
    }

    #[test]
    fn test_apply_movement_in() {
        assert_eq!(
            apply_movement(100, TransactionDirection::In, 50, false).unwrap(),
            150
        );
    }

    #[test]
    fn test_apply_movement_out() {
        assert_eq!(
            apply_movement(100, TransactionDirection::Out, 30, false).unwrap(),
            70
        );
    }

    #[test]
    fn test_apply_movement_exact_depletion() {
        assert_eq!(
            apply_movement(30, TransactionDirection::Out, 30, false).unwrap(),
            0
        );
    }

    #[test]
    fn test_apply_movement_insufficient() {
        assert!(apply_movement(50, TransactionDirection::Out, 60, false).is_err());
    }

    #[test]
    fn test_apply_movement_invalid_quantity() {
        assert!(apply_movement(100, TransactionDirection::In, 0, false).is_err());
        assert!(apply_movement(100, TransactionDirection::In, -10, false).is_err());
    }
}
