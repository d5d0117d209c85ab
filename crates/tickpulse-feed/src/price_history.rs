//! Bounded price and last-digit history.

use std::collections::VecDeque;
use tickpulse_core::{Digit, Pattern, Price};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    price: Price,
    digit: Digit,
}

/// Most recent ticks, oldest first.
///
/// Price and digit are stored together, so both views always have the
/// same length. The oldest entry is evicted once `capacity` is exceeded.
#[derive(Debug, Clone)]
pub struct PriceHistory {
    entries: VecDeque<Entry>,
    capacity: usize,
}

impl PriceHistory {
    /// Pattern detection needs two digits, so capacity is at least 2.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(2);
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Append a tick and return its last digit.
    pub fn update(&mut self, price: Price) -> Digit {
        let digit = price.last_digit();
        self.entries.push_back(Entry { price, digit });
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
        digit
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn prices(&self) -> impl DoubleEndedIterator<Item = Price> + ExactSizeIterator + '_ {
        self.entries.iter().map(|e| e.price)
    }

    pub fn last_digits(&self) -> impl DoubleEndedIterator<Item = Digit> + ExactSizeIterator + '_ {
        self.entries.iter().map(|e| e.digit)
    }

    pub fn latest(&self) -> Option<Price> {
        self.entries.back().map(|e| e.price)
    }

    /// `(second-last, last)` digits, once two ticks have been seen.
    pub fn last_pair(&self) -> Option<Pattern> {
        let n = self.entries.len();
        if n < 2 {
            return None;
        }
        Some(Pattern::new(self.entries[n - 2].digit, self.entries[n - 1].digit))
    }
}

impl Default for PriceHistory {
    fn default() -> Self {
        Self::new(1000)
    }
}
