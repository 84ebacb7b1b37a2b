//! System-wide settings singleton

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Process-wide configuration, loaded once per session and passed to the
/// stock engine and reporting layer as a read-only snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemSettings {
    pub business_name: String,
    pub currency: String,
    pub currency_symbol: String,
    pub default_reorder_point: i64,
    pub enable_low_stock_alerts: bool,
    pub enable_negative_stock: bool,
    pub low_stock_threshold: i64,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            business_name: "My Inventory".to_string(),
            currency: "PHP".to_string(),
            currency_symbol: "₱".to_string(),
            default_reorder_point: 10,
            enable_low_stock_alerts: true,
            enable_negative_stock: false,
            low_stock_threshold: 5,
        }
    }
}

impl SystemSettings {
    /// Format a monetary amount with the configured currency symbol,
    /// always showing two decimal places.
    pub fn format_currency(&self, amount: Decimal) -> String {
        format!("{}{:.2}", self.currency_symbol, amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_defaults() {
        let s = SystemSettings::default();
        assert_eq!(s.default_reorder_point, 10);
        assert_eq!(s.low_stock_threshold, 5);
        assert!(s.enable_low_stock_alerts);
        assert!(!s.enable_negative_stock);
    }

    #[test]
    fn test_format_currency() {
        let s = SystemSettings::default();
        assert_eq!(s.format_currency(Decimal::from_str("950").unwrap()), "₱950.00");
        assert_eq!(s.format_currency(Decimal::from_str("1262.5").unwrap()), "₱1262.50");
    }
}
