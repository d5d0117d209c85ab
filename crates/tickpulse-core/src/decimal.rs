//! Precision-safe price type.
//!
//! Quotes are kept as `rust_decimal::Decimal` so that digit extraction and
//! barrier comparisons operate on the quoted value, not on its nearest
//! binary float. On the wire a `Price` is a plain JSON number.

use crate::digit::Digit;
use crate::error::{CoreError, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Price with exact decimal precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(pub Decimal);

impl Price {
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Largest accepted quote magnitude (1e15). Leaves headroom so barrier
    /// offsets never approach `Decimal::MAX`.
    pub const MAX_QUOTE: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

    #[inline]
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    #[inline]
    pub fn inner(&self) -> Decimal {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Build a price from a float using its shortest round-trip text,
    /// so `10.11_f64` becomes exactly `10.11`.
    pub fn from_f64(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(CoreError::InvalidPrice(format!("non-finite quote {value}")));
        }
        Self::parse_quote(&value.to_string())
    }

    /// Parse a quote as sent by the feed. Accepts plain and scientific
    /// notation (`"1234.56"`, `"1e-7"`).
    /// Quotes beyond [`Price::MAX_QUOTE`] are rejected.
    pub fn parse_quote(text: &str) -> Result<Self> {
        let text = text.trim();
        let value = Decimal::from_str(text)
            .or_else(|_| Decimal::from_scientific(text))
            .map_err(|e| CoreError::InvalidPrice(format!("{text:?}: {e}")))?;
        if value.abs() > Self::MAX_QUOTE {
            return Err(CoreError::InvalidPrice(format!(
                "{text:?}: magnitude exceeds {}",
                Self::MAX_QUOTE
            )));
        }
        Ok(Self(value))
    }

    /// `self + offset`, clamped at `Decimal::MAX`.
    #[inline]
    pub fn saturating_add(self, offset: Decimal) -> Self {
        Self(self.0.saturating_add(offset))
    }

    /// `self - offset`, clamped at `Decimal::MIN`.
    #[inline]
    pub fn saturating_sub(self, offset: Decimal) -> Self {
        Self(self.0.saturating_sub(offset))
    }

    /// Lossy conversion for the wire format.
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(f64::NAN)
    }

    /// Hundredths digit after rounding to two decimal places.
    ///
    /// Rounding is half-away-from-zero on the exact decimal value:
    /// `12.345 -> 12.35 -> 5`, `0.125 -> 0.13 -> 3`, `10.1 -> 10.10 -> 0`.
    pub fn last_digit(&self) -> Digit {
        let rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        // rem by 0.1 keeps only the hundredths, so the multiply cannot overflow
        let hundredths = (rounded % Decimal::new(1, 1)).abs() * Decimal::ONE_HUNDRED;
        let value = hundredths.trunc().to_u8().unwrap_or(0) % 10;
        Digit::from_u8_lossy(value)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Price {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_quote(s)
    }
}

impl From<Decimal> for Price {
    fn from(d: Decimal) -> Self {
        Self(d)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_f64())
    }
}
