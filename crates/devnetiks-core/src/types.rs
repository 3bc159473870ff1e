//! # Shared Types
//!
//! Small value types used across the money and workflow modules.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Shared Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐            ┌──────────────────────────────┐       │
//! │  │    TaxRate      │            │      StoredTimestamp         │       │
//! │  │  ─────────────  │            │  ──────────────────────────  │       │
//! │  │  Decimal pct    │            │  Instant(DateTime<Utc>)      │       │
//! │  │  8.875 = 8.875% │            │  Parts { seconds, nanos }    │       │
//! │  └─────────────────┘            └──────────────────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate as an exact decimal percentage (`8.875` = 8.875%).
///
/// ## Why Decimal?
/// Sales tax rates such as 8.875% carry three fractional digits. Whole basis
/// points would store that as 8.88% and every tax amount would drift, so the
/// percentage is kept exactly and the only rounding is the final one to a
/// whole cent (see [`crate::money::Money::calculate_tax`]).
///
/// Serializes as a JSON/TOML number. Negative rates are representable so
/// that [`crate::validation::validate_tax_rate`] can reject them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaxRate(Decimal);

impl TaxRate {
    /// Creates a tax rate from an exact percentage.
    #[inline]
    pub const fn from_percent(pct: Decimal) -> Self {
        TaxRate(pct)
    }

    /// Creates a tax rate from basis points (825 -> 8.25%).
    pub fn from_bps(bps: u32) -> Self {
        TaxRate(Decimal::new(i64::from(bps), 2))
    }

    /// Creates a tax rate from a form percentage (`8.875` -> 8.875%).
    ///
    /// Negative and non-finite inputs become a zero rate.
    pub fn from_percentage(pct: f64) -> Self {
        if !pct.is_finite() || pct <= 0.0 {
            return TaxRate::zero();
        }
        Decimal::from_f64(pct).map(TaxRate).unwrap_or_default()
    }

    /// Returns the exact percentage.
    #[inline]
    pub const fn percent(&self) -> Decimal {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    pub fn percentage(&self) -> f64 {
        self.0.to_f64().unwrap_or_default()
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(Decimal::ZERO)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0.normalize())
    }
}

/// Parses `8.875` or `8.875%`.
impl FromStr for TaxRate {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
        Decimal::from_str(number)
            .map(TaxRate)
            .map_err(|_| ValidationError::InvalidFormat {
                field: "tax_rate".to_string(),
                reason: format!("'{}' is not a percentage", s),
            })
    }
}

impl Serialize for TaxRate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.percentage())
    }
}

impl<'de> Deserialize<'de> for TaxRate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <Decimal as Deserialize>::deserialize(deserializer).map(TaxRate)
    }
}

// =============================================================================
// Stored Timestamp
// =============================================================================

/// A timestamp as it arrives from the document store.
///
/// Records written by the hosted store carry `{ seconds, nanoseconds }`;
/// records written by this code carry RFC 3339 strings. Both shapes are
/// accepted on deserialization, and [`StoredTimestamp::to_datetime`] is the
/// one place they are turned into a `DateTime<Utc>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredTimestamp {
    /// Already a calendar instant.
    Instant(DateTime<Utc>),
    /// Seconds since the Unix epoch plus a nanosecond remainder.
    Parts { seconds: i64, nanoseconds: u32 },
}

impl StoredTimestamp {
    /// Converts to a UTC instant.
    ///
    /// Fails when the parts are outside chrono's representable range or the
    /// nanosecond remainder is not below one second.
    pub fn to_datetime(&self) -> Result<DateTime<Utc>, ValidationError> {
        match *self {
            StoredTimestamp::Instant(at) => Ok(at),
            StoredTimestamp::Parts {
                seconds,
                nanoseconds,
            } => {
                if nanoseconds >= 1_000_000_000 {
                    return Err(ValidationError::InvalidFormat {
                        field: "timestamp".to_string(),
                        reason: format!("nanoseconds {} is not below one second", nanoseconds),
                    });
                }
                DateTime::from_timestamp(seconds, nanoseconds).ok_or_else(|| {
                    ValidationError::InvalidFormat {
                        field: "timestamp".to_string(),
                        reason: format!("{} seconds is out of range", seconds),
                    }
                })
            }
        }
    }
}

impl From<DateTime<Utc>> for StoredTimestamp {
    fn from(at: DateTime<Utc>) -> Self {
        StoredTimestamp::Instant(at)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
