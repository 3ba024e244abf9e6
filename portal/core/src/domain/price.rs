// Copyright (c) 2026 Laissez
// SPDX-License-Identifier: AGPL-3.0
//! # Per-query Agent Price
//!
//! Prices are quoted in USD with a floor and step of one thousandth
//! ($0.001). [`Price`] stores the amount as an integer count of thousandths,
//! so stepping never drifts and every representable value sits on the grid.
//!
//! On the wire the price is a plain JSON number (`0.002`), which is what the
//! portal API expects in `POST /api/agents`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Thousandths per dollar.
const SCALE: f64 = 1000.0;

/// Per-query price in thousandths of a dollar. Never below `Price::MIN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price {
    millis: u64,
}

impl Price {
    /// $0.001, the floor and the default.
    pub const MIN: Price = Price { millis: 1 };

    /// One stepper increment ($0.001).
    pub const STEP_MILLIS: u64 = 1;

    /// Build a price from a count of thousandths. Zero is rejected.
    pub fn from_millis(millis: u64) -> Option<Self> {
        (millis >= Self::MIN.millis).then_some(Self { millis })
    }

    /// Convert a dollar amount, rounding to three decimals.
    ///
    /// Returns `None` for NaN, infinities and anything that rounds below
    /// the $0.001 floor.
    pub fn from_dollars(value: f64) -> Option<Self> {
        if !value.is_finite() || value < Self::MIN.as_dollars() {
            return None;
        }
        let scaled = (value * SCALE).round();
        if scaled > u64::MAX as f64 {
            return None;
        }
        Self::from_millis(scaled as u64)
    }

    /// Parse direct numeric entry. Whitespace is ignored; anything that is
    /// not a number at or above the floor yields `None`.
    pub fn parse(input: &str) -> Option<Self> {
        input
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(Self::from_dollars)
    }

    pub fn millis(&self) -> u64 {
        self.millis
    }

    pub fn as_dollars(&self) -> f64 {
        self.millis as f64 / SCALE
    }

    /// Price after one increment.
    pub fn incremented(self) -> Self {
        Self {
            millis: self.millis.saturating_add(Self::STEP_MILLIS),
        }
    }

    /// Price after one decrement, or `None` at the floor.
    pub fn decremented(self) -> Option<Self> {
        self.millis
            .checked_sub(Self::STEP_MILLIS)
            .and_then(Self::from_millis)
    }

    /// Whether the decrement control is enabled.
    pub fn can_decrement(&self) -> bool {
        self.millis > Self::MIN.millis
    }
}

impl Default for Price {
    fn default() -> Self {
        Self::MIN
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:03}", self.millis / 1000, self.millis % 1000)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_dollars())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Price::from_dollars(value).ok_or_else(|| {
            serde::de::Error::custom(format!("price must be at least $0.001, got {}", value))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stepper_example() {
        let mut price = Price::default();
        for _ in 0..3 {
            price = price.incremented();
        }
        assert_eq!(price.millis(), 4);
        assert!((price.as_dollars() - 0.004).abs() < f64::EPSILON);

        let price = price.decremented().unwrap();
        assert_eq!(price.millis(), 3);
        assert!((price.as_dollars() - 0.003).abs() < f64::EPSILON);
    }

    #[test]
    fn test_floor_blocks_decrement() {
        let floor = Price::MIN;
        assert!(!floor.can_decrement());
        assert_eq!(floor.decremented(), None);

        let above = floor.incremented();
        assert!(above.can_decrement());
        assert_eq!(above.decremented(), Some(Price::MIN));
    }

    #[test]
    fn test_many_increments_stay_on_grid() {
        let mut price = Price::MIN;
        for _ in 0..999 {
            price = price.incremented();
        }
        assert_eq!(price.as_dollars(), 1.0);
        assert_eq!(price.to_string(), "$1.000");
    }

    #[test]
    fn test_parse_direct_entry() {
        assert_eq!(Price::parse("0.25").map(|p| p.millis()), Some(250));
        assert_eq!(Price::parse(" 0.001 ").map(|p| p.millis()), Some(1));
        assert_eq!(Price::parse("0.0016").map(|p| p.millis()), Some(2));
        assert_eq!(Price::parse("0.0005"), None);
        assert_eq!(Price::parse("0"), None);
        assert_eq!(Price::parse("-1"), None);
        assert_eq!(Price::parse("abc"), None);
        assert_eq!(Price::parse(""), None);
        assert_eq!(Price::parse("NaN"), None);
        assert_eq!(Price::parse("inf"), None);
    }

    #[test]
    fn test_json_number_representation() {
        let price = Price::from_millis(2).unwrap();
        assert_eq!(serde_json::to_string(&price).unwrap(), "0.002");

        let parsed: Price = serde_json::from_str("0.125").unwrap();
        assert_eq!(parsed.millis(), 125);

        assert!(serde_json::from_str::<Price>("0").is_err());
    }
}
