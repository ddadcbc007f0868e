//! Fixed-point currency amount with two fractional digits.

use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Largest order total accepted: 999,999,999.99
pub const MAX_ORDER_TOTAL: Money = Money(99_999_999_999);

/// Amount in minor units (cents). Serialized as a JSON number such as `15000.5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub fn cents(&self) -> i64 {
        self.0
    }

    /// Parse a decimal amount, rejecting more than two fractional digits.
    #[track_caller]
    pub fn from_decimal(value: f64) -> CoreErrorResult<Self> {
        if !value.is_finite() {
            return Err(CoreError::InvalidAmount {
                message: format!("{} is not a finite number", value),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let scaled = value * 100.0;
        let rounded = scaled.round();
        if (scaled - rounded).abs() > 1e-6 {
            return Err(CoreError::InvalidAmount {
                message: format!("{} has more than two decimal places", value),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if rounded.abs() > i64::MAX as f64 {
            return Err(CoreError::InvalidAmount {
                message: format!("{} is out of range", value),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Self(rounded as i64))
    }

    /// `self * quantity`, or `None` on overflow.
    pub fn checked_mul(self, quantity: i64) -> Option<Money> {
        self.0.checked_mul(quantity).map(Money)
    }

    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        Money::from_decimal(value).map_err(serde::de::Error::custom)
    }
}
