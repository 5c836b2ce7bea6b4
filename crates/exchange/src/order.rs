//! Order types and structures

use chrono::{DateTime, Utc};
use ecubank_core::{Address, Amount};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Sequential order identifier, unique within one share's book.
///
/// Ids start at 0, are never reused and never decremented; the book's
/// length is the next-id source.
pub type OrderId = u64;

/// Order side (buy or sell)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

/// An immutable record of intent to trade a fixed amount at a fixed limit
/// price. Orders are never modified or removed once placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Sequential id within the share's book
    pub id: OrderId,
    /// Account that submitted the order
    pub submitter: Address,
    /// Buy or Sell
    pub side: OrderSide,
    /// Quantity of share units
    pub amount: Amount,
    /// The only price this order will ever execute at
    pub limit_price: Amount,
    /// Placement timestamp
    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn is_buy(&self) -> bool {
        self.side == OrderSide::Buy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_parses_lowercase() {
        assert_eq!("buy".parse::<OrderSide>().unwrap(), OrderSide::Buy);
        assert_eq!("sell".parse::<OrderSide>().unwrap(), OrderSide::Sell);
        assert!("hold".parse::<OrderSide>().is_err());
    }

    #[test]
    fn test_side_display() {
        assert_eq!(OrderSide::Buy.to_string(), "buy");
        assert_eq!(OrderSide::Sell.to_string(), "sell");
    }
}
