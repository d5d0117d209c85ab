//! Barrier band evaluation.

use rust_decimal::Decimal;
use tickpulse_core::{Price, TradeOutcome};

/// Inclusive price band around a trade's start price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Barriers {
    pub upper: Price,
    pub lower: Price,
}

impl Barriers {
    /// Saturates at the `Decimal` range instead of overflowing.
    pub fn around(start: Price, upper_offset: Decimal, lower_offset: Decimal) -> Self {
        Self {
            upper: start.saturating_add(upper_offset),
            lower: start.saturating_sub(lower_offset),
        }
    }

    pub fn contains(&self, price: Price) -> bool {
        self.lower <= price && price <= self.upper
    }

    /// WIN iff every price is inside the band. An empty window is a WIN.
    pub fn evaluate(&self, prices: &[Price]) -> TradeOutcome {
        if prices.iter().all(|p| self.contains(*p)) {
            TradeOutcome::Win
        } else {
            TradeOutcome::Loss
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn band() -> Barriers {
        Barriers::around(Price::new(dec!(10.00)), dec!(2.0), dec!(0.9))
    }

    #[test]
    fn test_band_offsets() {
        let b = band();
        assert_eq!(b.upper.inner(), dec!(12.00));
        assert_eq!(b.lower.inner(), dec!(9.10));
    }

    #[test]
    fn test_boundaries_are_inside() {
        let b = band();
        let prices = [Price::new(dec!(12.00)), Price::new(dec!(9.10))];
        assert_eq!(b.evaluate(&prices), TradeOutcome::Win);
    }

    #[test]
    fn test_any_breach_is_loss() {
        let b = band();
        let above = [Price::new(dec!(10.50)), Price::new(dec!(12.01))];
        let below = [Price::new(dec!(9.09)), Price::new(dec!(10.00))];
        assert_eq!(b.evaluate(&above), TradeOutcome::Loss);
        assert_eq!(b.evaluate(&below), TradeOutcome::Loss);
    }

    #[test]
    fn test_band_saturates_at_decimal_range() {
        let b = Barriers::around(Price::new(Decimal::MAX), dec!(2.0), dec!(0.9));
        assert_eq!(b.upper.inner(), Decimal::MAX);
        assert_eq!(b.evaluate(&[Price::new(Decimal::MAX)]), TradeOutcome::Win);
    }
}
