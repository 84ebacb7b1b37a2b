//! Stock status classification

use serde::{Deserialize, Serialize};

/// Stock level classification for a SKU
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockStatus {
    Critical,
    OutOfStock,
    LowStock,
    InStock,
}

impl StockStatus {
    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::Critical => "Critical",
            StockStatus::OutOfStock => "Out of Stock",
            StockStatus::LowStock => "Low Stock",
            StockStatus::InStock => "In Stock",
        }
    }
}

/// Classify a stock level against its reorder point.
///
/// The four statuses partition the integers: negative stock is critical,
/// zero is out of stock, anything up to the reorder point is low, and
/// everything above it is in stock.
pub fn stock_status(stock: i64, reorder_point: i64) -> StockStatus {
    if stock < 0 {
        StockStatus::Critical
    } else if stock == 0 {
        StockStatus::OutOfStock
    } else if stock <= reorder_point {
        StockStatus::LowStock
    } else {
        StockStatus::InStock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_status_boundaries() {
        assert_eq!(stock_status(-1, 10), StockStatus::Critical);
        assert_eq!(stock_status(0, 10), StockStatus::OutOfStock);
        assert_eq!(stock_status(1, 10), StockStatus::LowStock);
        assert_eq!(stock_status(10, 10), StockStatus::LowStock);
        assert_eq!(stock_status(11, 10), StockStatus::InStock);
    }

    #[test]
    fn test_status_with_zero_reorder_point() {
        assert_eq!(stock_status(0, 0), StockStatus::OutOfStock);
        assert_eq!(stock_status(1, 0), StockStatus::InStock);
    }

    #[test]
    fn test_labels() {
        assert_eq!(StockStatus::Critical.label(), "Critical");
        assert_eq!(StockStatus::InStock.label(), "In Stock");
    }

    proptest! {
        /// Every (stock, reorder point) pair maps to exactly one status,
        /// and the mapping is consistent with the boundary definitions.
        #[test]
        fn prop_status_partitions_integers(stock in -10_000i64..10_000, rp in 0i64..1_000) {
            let status = stock_status(stock, rp);
            let expected = if stock < 0 {
                StockStatus::Critical
            } else if stock == 0 {
                StockStatus::OutOfStock
            } else if stock <= rp {
                StockStatus::LowStock
            } else {
                StockStatus::InStock
            };
            prop_assert_eq!(status, expected);
        }

        /// Same inputs always classify the same way.
        #[test]
        fn prop_status_deterministic(stock in -1_000i64..1_000, rp in 0i64..100) {
            prop_assert_eq!(stock_status(stock, rp), stock_status(stock, rp));
        }
    }
}
