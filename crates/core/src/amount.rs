//! Amount - Unsigned fixed-point wrapper for money amounts
//!
//! Every balance in Ecubank is an unsigned integer scaled by 10^18
//! (18 implied decimal places). Arithmetic is checked and division
//! floors; fractional dust below one base unit is discarded.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// One whole unit (ECU or share unit) in base units.
pub const UNIT: u128 = 1_000_000_000_000_000_000;

/// Number of implied decimal places.
pub const DECIMALS: u32 = 18;

/// Errors that can occur when working with amounts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("amount cannot be negative: {0}")]
    Negative(Decimal),

    #[error("amount {0} has more than 18 fractional digits")]
    PrecisionLoss(Decimal),

    #[error("amount arithmetic overflowed")]
    Overflow,

    #[error("invalid amount literal: {0}")]
    InvalidLiteral(String),
}

/// An unsigned fixed-point amount with 18 implied decimal places.
///
/// The inner value counts base units, i.e. `1 ECU == 10^18` base units.
/// Serialized as the base-unit integer in decimal string form, so journal
/// records survive values beyond what a JSON number can carry.
///
/// # Example
/// ```
/// use ecubank_core::Amount;
/// use rust_decimal::Decimal;
///
/// let amount = Amount::from_decimal(Decimal::new(15, 1)).unwrap(); // 1.5
/// assert_eq!(amount.base_units(), 1_500_000_000_000_000_000);
/// assert_eq!(amount.to_string(), "1.5");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Amount(u128);

impl Amount {
    /// Zero amount constant
    pub const ZERO: Self = Self(0);

    /// One whole unit
    pub const ONE: Self = Self(UNIT);

    /// Amount from raw base units (already scaled by 10^18).
    #[inline]
    pub const fn from_base_units(units: u128) -> Self {
        Self(units)
    }

    /// Amount from a whole number of units.
    #[inline]
    pub const fn from_units(units: u32) -> Self {
        Self(units as u128 * UNIT)
    }

    /// Get the raw base-unit count
    #[inline]
    pub const fn base_units(&self) -> u128 {
        self.0
    }

    /// Check if the amount is zero
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition - returns None on overflow
    pub fn checked_add(&self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    /// Checked subtraction - returns None if the result would be negative
    pub fn checked_sub(&self, other: Amount) -> Option<Amount> {
        self.0.checked_sub(other.0).map(Amount)
    }

    /// Total cost of `self` units at a per-unit `price`: `self * price / UNIT`,
    /// flooring.
    ///
    /// The product is computed term-by-term on the whole/fractional split of
    /// both operands, so the only way to overflow is for the true result to
    /// exceed `u128`.
    pub fn mul_price(&self, price: Amount) -> Result<Amount, AmountError> {
        let (aw, af) = (self.0 / UNIT, self.0 % UNIT);
        let (pw, pf) = (price.0 / UNIT, price.0 % UNIT);

        // a * p / U  ==  aw*pw*U + aw*pf + af*pw + af*pf/U, each term exact.
        let mut total = aw
            .checked_mul(pw)
            .and_then(|v| v.checked_mul(UNIT))
            .ok_or(AmountError::Overflow)?;
        total = total
            .checked_add(aw.checked_mul(pf).ok_or(AmountError::Overflow)?)
            .ok_or(AmountError::Overflow)?;
        total = total
            .checked_add(af.checked_mul(pw).ok_or(AmountError::Overflow)?)
            .ok_or(AmountError::Overflow)?;
        total = total
            .checked_add(af * pf / UNIT)
            .ok_or(AmountError::Overflow)?;

        Ok(Amount(total))
    }

    /// Convert a human decimal value into base units.
    ///
    /// Rejects negative values, values with more than 18 fractional digits,
    /// and values that do not fit in `u128`.
    pub fn from_decimal(value: Decimal) -> Result<Self, AmountError> {
        if value.is_sign_negative() {
            if value.is_zero() {
                return Ok(Self::ZERO);
            }
            return Err(AmountError::Negative(value));
        }

        let mantissa = value.mantissa() as u128;
        let scale = value.scale();
        if scale <= DECIMALS {
            let factor = 10u128.pow(DECIMALS - scale);
            mantissa
                .checked_mul(factor)
                .map(Amount)
                .ok_or(AmountError::Overflow)
        } else {
            let factor = 10u128.pow(scale - DECIMALS);
            if mantissa % factor != 0 {
                return Err(AmountError::PrecisionLoss(value));
            }
            Ok(Amount(mantissa / factor))
        }
    }

    /// Exact decimal rendering, or `None` when the value exceeds what a
    /// `Decimal` mantissa can carry.
    pub fn to_decimal(&self) -> Option<Decimal> {
        let mantissa = i128::try_from(self.0).ok()?;
        Decimal::try_from_i128_with_scale(mantissa, DECIMALS)
            .ok()
            .map(|d| d.normalize())
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / UNIT;
        let frac = self.0 % UNIT;
        if frac == 0 {
            write!(f, "{whole}")
        } else {
            let digits = format!("{frac:018}");
            write!(f, "{whole}.{}", digits.trim_end_matches('0'))
        }
    }
}

impl TryFrom<String> for Amount {
    type Error = AmountError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value
            .parse::<u128>()
            .map(Amount)
            .map_err(|_| AmountError::InvalidLiteral(value))
    }
}

impl From<Amount> for String {
    fn from(amount: Amount) -> Self {
        amount.0.to_string()
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::ZERO
    }
}
