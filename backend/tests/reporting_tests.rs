//! Reporting and aggregation tests
//!
//! Covers the derived computations:
//! - Stock status classification (a total function over the integers)
//! - Low-stock alert selection, ordering, and cap
//! - 7-day revenue bucketing by weekday label
//! - The category/platform movement fold

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::{stock_status, StockStatus};
use std::collections::BTreeMap;
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

    /// The four classification boundaries
    #[test]
    fn test_stock_status_classification() {
        assert_eq!(stock_status(-1, 10), StockStatus::Critical);
        assert_eq!(stock_status(0, 10), StockStatus::OutOfStock);
        assert_eq!(stock_status(10, 10), StockStatus::LowStock);
        assert_eq!(stock_status(11, 10), StockStatus::InStock);
    }

    /// Low-stock alerts: active SKUs at or below the reorder point,
    /// ascending by stock, top 10
    #[test]
    fn test_low_stock_selection_and_cap() {
        // (stock, reorder_point, is_active)
        let mut skus: Vec<(i64, i64, bool)> = (0..15).map(|i| (i, 20, true)).collect();
        skus.push((3, 20, false)); // inactive, excluded
        skus.push((50, 20, true)); // healthy, excluded

        let mut alerts: Vec<(i64, i64)> = skus
            .iter()
            .filter(|(stock, rp, active)| *active && stock <= rp)
            .map(|(stock, rp, _)| (*stock, *rp))
            .collect();
        alerts.sort_by_key(|(stock, _)| *stock);
        alerts.truncate(10);

        assert_eq!(alerts.len(), 10);
        assert_eq!(alerts.first().map(|(s, _)| *s), Some(0));
        assert_eq!(alerts.last().map(|(s, _)| *s), Some(9));
    }

    /// Alerts are sorted ascending by stock, so the most depleted SKUs
    /// surface first
    #[test]
    fn test_low_stock_ordering() {
        let mut stocks = vec![4i64, -2, 0, 3, 1];
        stocks.sort();
        assert_eq!(stocks, vec![-2, 0, 1, 3, 4]);
    }

    /// Weekday labels over a known week
    #[test]
    fn test_weekday_labels() {
        // 2024-12-16 was a Monday
        let monday = NaiveDate::from_ymd_opt(2024, 12, 16).unwrap();
        let labels: Vec<String> = (0..7)
            .map(|offset| (monday + Duration::days(offset)).format("%a").to_string())
            .collect();

        assert_eq!(labels, vec!["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]);
    }

    /// The trailing 7-day window is inclusive of today
    #[test]
    fn test_seven_day_window_bounds() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let week_start = today - Duration::days(6);

        let days: Vec<NaiveDate> = (0..7).map(|o| week_start + Duration::days(o)).collect();
        assert_eq!(days.len(), 7);
        assert_eq!(days.first().copied(), Some(NaiveDate::from_ymd_opt(2025, 6, 9).unwrap()));
        assert_eq!(days.last().copied(), Some(today));
    }

    /// Revenue buckets: days without sales stay at zero
    #[test]
    fn test_revenue_bucket_fold() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let week_start = today - Duration::days(6);

        // (date, revenue)
        let sales = [
            (week_start, dec("100")),
            (week_start + Duration::days(2), dec("250")),
            (today, dec("75.50")),
        ];

        let buckets: Vec<Decimal> = (0..7)
            .map(|offset| {
                let date = week_start + Duration::days(offset);
                sales
                    .iter()
                    .filter(|(d, _)| *d == date)
                    .map(|(_, r)| *r)
                    .sum()
            })
            .collect();

        assert_eq!(buckets[0], dec("100"));
        assert_eq!(buckets[1], Decimal::ZERO);
        assert_eq!(buckets[2], dec("250"));
        assert_eq!(buckets[6], dec("75.50"));
        assert_eq!(buckets.iter().copied().sum::<Decimal>(), dec("425.50"));
    }

    /// Inventory value at cost sums stock x cost over active SKUs
    #[test]
    fn test_inventory_value_rollup() {
        // (stock, cost, is_active)
        let skus = [
            (10i64, dec("5.00"), true),
            (3, dec("20.00"), true),
            (100, dec("1.00"), false),
        ];

        let total_value: Decimal = skus
            .iter()
            .filter(|(_, _, active)| *active)
            .map(|(stock, cost, _)| Decimal::from(*stock) * cost)
            .sum();

        assert_eq!(total_value, dec("110.00"));
    }

    /// Dashboard counts: low stock excludes zero/negative, out-of-stock
    /// includes them
    #[test]
    fn test_dashboard_status_counts() {
        // (stock, reorder_point)
        let skus = [(5i64, 10i64), (0, 10), (-2, 10), (15, 10), (10, 10)];

        let low = skus
            .iter()
            .filter(|(s, rp)| *s > 0 && s <= rp)
            .count();
        let out = skus.iter().filter(|(s, _)| *s <= 0).count();

        assert_eq!(low, 2); // 5 and 10
        assert_eq!(out, 2); // 0 and -2
    }

    /// The movement fold routes quantities into (sku, platform) cells by
    /// transaction direction, with a synthetic bucket for no platform
    #[test]
    fn test_platform_breakdown_fold() {
        let shopee = "platform-a";
        let lazada = "platform-b";

        // (direction, platform, sku, quantity)
        let movements = [
            ("IN", None, "sku-1", 50i64),
            ("OUT", Some(shopee), "sku-1", 10),
            ("OUT", Some(shopee), "sku-1", 5),
            ("OUT", Some(lazada), "sku-1", 3),
            ("OUT", None, "sku-1", 2),
            ("ADJUSTMENT", None, "sku-1", 99), // excluded from the matrix
        ];

        let mut total_in = 0i64;
        let mut total_out = 0i64;
        let mut matrix: BTreeMap<&str, (i64, i64)> = BTreeMap::new();
        for key in [shopee, lazada, "none"] {
            matrix.insert(key, (0, 0));
        }

        for (direction, platform, _sku, qty) in movements {
            let key = platform.unwrap_or("none");
            match direction {
                "IN" => {
                    total_in += qty;
                    if let Some(cell) = matrix.get_mut(key) {
                        cell.0 += qty;
                    }
                }
                "OUT" => {
                    total_out += qty;
                    if let Some(cell) = matrix.get_mut(key) {
                        cell.1 += qty;
                    }
                }
                _ => {}
            }
        }

        assert_eq!(total_in, 50);
        assert_eq!(total_out, 20);
        assert_eq!(matrix["none"], (50, 2));
        assert_eq!(matrix[shopee], (0, 15));
        assert_eq!(matrix[lazada], (0, 3));
    }

    /// Rows group by category name in sorted order
    #[test]
    fn test_category_grouping() {
        let rows = [
            ("Shirts", "SKU-3"),
            ("Accessories", "SKU-1"),
            ("Shirts", "SKU-2"),
        ];

        let mut groups: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for (category, sku) in rows {
            groups.entry(category).or_default().push(sku);
        }

        let names: Vec<&str> = groups.keys().copied().collect();
        assert_eq!(names, vec!["Accessories", "Shirts"]);
        assert_eq!(groups["Shirts"].len(), 2);
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

        /// The four statuses partition the integers with no gaps or
        /// overlaps
        #[test]
        fn prop_status_partition(stock in -100_000i64..100_000, rp in 0i64..10_000) {
            let status = stock_status(stock, rp);

            let expected = match stock {
                s if s < 0 => StockStatus::Critical,
                0 => StockStatus::OutOfStock,
                s if s <= rp => StockStatus::LowStock,
                _ => StockStatus::InStock,
            };

            prop_assert_eq!(status, expected);
        }

        /// Classification is a pure function
        #[test]
        fn prop_status_idempotent(stock in -1_000i64..1_000, rp in 0i64..100) {
            prop_assert_eq!(stock_status(stock, rp), stock_status(stock, rp));
        }

        /// The low-stock cap never yields more than 10 rows and keeps
        /// ascending order
        #[test]
        fn prop_low_stock_cap(stocks in prop::collection::vec(-50i64..200, 0..40)) {
            let reorder_point = 20i64;

            let mut alerts: Vec<i64> = stocks
                .iter()
                .copied()
                .filter(|s| *s <= reorder_point)
                .collect();
            alerts.sort();
            alerts.truncate(10);

            prop_assert!(alerts.len() <= 10);
            prop_assert!(alerts.windows(2).all(|w| w[0] <= w[1]));
        }

        /// In/out totals in the fold equal the sums of routed quantities
        #[test]
        fn prop_breakdown_totals_consistent(
            movements in prop::collection::vec(
                (prop_oneof![Just("IN"), Just("OUT")], prop::option::of(0usize..3), 1i64..100),
                0..50
            )
        ) {
            let platforms = ["p0", "p1", "p2"];

            let mut total_in = 0i64;
            let mut total_out = 0i64;
            let mut matrix: BTreeMap<&str, (i64, i64)> = BTreeMap::new();
            for key in platforms.iter().copied().chain(std::iter::once("none")) {
                matrix.insert(key, (0, 0));
            }

            for (direction, platform_idx, qty) in &movements {
                let key = platform_idx.map(|i| platforms[i]).unwrap_or("none");
                let cell = matrix.get_mut(key).unwrap();
                if *direction == "IN" {
                    total_in += qty;
                    cell.0 += qty;
                } else {
                    total_out += qty;
                    cell.1 += qty;
                }
            }

            let routed_in: i64 = matrix.values().map(|(i, _)| i).sum();
            let routed_out: i64 = matrix.values().map(|(_, o)| o).sum();

            prop_assert_eq!(total_in, routed_in);
            prop_assert_eq!(total_out, routed_out);
        }
    }
}
