//! Ecubank Exchange - Tradable shares
//!
//! Each share is a fixed-maximum-supply asset with a private unit reserve,
//! a quoted price, and an append-only order book. Orders execute only at
//! the exact price they were placed at; price discovery requotes to the
//! midpoint of the tracked bid/ask extremes.

pub mod error;
pub mod order;
pub mod share;

pub use error::ExchangeError;
pub use order::{Order, OrderId, OrderSide};
pub use share::Share;
