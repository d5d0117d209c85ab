//! Last-digit bookkeeping.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Single decimal digit (0-9).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Digit(u8);

impl Digit {
    #[inline]
    pub fn new(value: u8) -> Option<Self> {
        (value < 10).then_some(Self(value))
    }

    /// Reduce modulo 10, for values already known to be a digit.
    #[inline]
    pub(crate) fn from_u8_lossy(value: u8) -> Self {
        Self(value % 10)
    }

    #[inline]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Digit {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(CoreError::InvalidDigit(value))
    }
}

impl From<Digit> for u8 {
    fn from(d: Digit) -> Self {
        d.0
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Two consecutive last digits, oldest first. Serialized as `[d, d]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pattern([Digit; 2]);

impl Pattern {
    pub fn new(previous: Digit, last: Digit) -> Self {
        Self([previous, last])
    }

    pub fn previous(&self) -> Digit {
        self.0[0]
    }

    pub fn last(&self) -> Digit {
        self.0[1]
    }

    /// Both digits equal ("double digit").
    pub fn is_repeat(&self) -> bool {
        self.0[0] == self.0[1]
    }

    pub fn digits(&self) -> [Digit; 2] {
        self.0
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.0[0], self.0[1])
    }
}
