//! Transaction vocabulary: directions, stock-in sources, audit actions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of an inventory transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionDirection {
    In,
    Out,
    Adjustment,
}

impl TransactionDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionDirection::In => "IN",
            TransactionDirection::Out => "OUT",
            TransactionDirection::Adjustment => "ADJUSTMENT",
        }
    }
}

impl fmt::Display for TransactionDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IN" => Ok(TransactionDirection::In),
            "OUT" => Ok(TransactionDirection::Out),
            "ADJUSTMENT" => Ok(TransactionDirection::Adjustment),
            other => Err(format!("unknown transaction direction: {}", other)),
        }
    }
}

/// Where stock-in units came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SourceType {
    Supplier,
    Rts,
    Manual,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Supplier => "SUPPLIER",
            SourceType::Rts => "RTS",
            SourceType::Manual => "MANUAL",
        }
    }
}

impl FromStr for SourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SUPPLIER" => Ok(SourceType::Supplier),
            "RTS" => Ok(SourceType::Rts),
            "MANUAL" => Ok(SourceType::Manual),
            other => Err(format!("unknown source type: {}", other)),
        }
    }
}

/// Actions recorded by the audit sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
    StockIn,
    StockOut,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Create => "CREATE",
            AuditAction::Update => "UPDATE",
            AuditAction::Delete => "DELETE",
            AuditAction::StockIn => "STOCK_IN",
            AuditAction::StockOut => "STOCK_OUT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_round_trip() {
        for d in [
            TransactionDirection::In,
            TransactionDirection::Out,
            TransactionDirection::Adjustment,
        ] {
            assert_eq!(d.as_str().parse::<TransactionDirection>().unwrap(), d);
        }
    }

    #[test]
    fn test_direction_rejects_unknown() {
        assert!("SIDEWAYS".parse::<TransactionDirection>().is_err());
        assert!("in".parse::<TransactionDirection>().is_err());
    }

    #[test]
    fn test_source_type_round_trip() {
        for s in [SourceType::Supplier, SourceType::Rts, SourceType::Manual] {
            assert_eq!(s.as_str().parse::<SourceType>().unwrap(), s);
        }
    }
}
