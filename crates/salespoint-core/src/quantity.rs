//! # Quantity Module
//!
//! The [`Quantity`] value object: an amount of something, measured in a
//! [`Metric`] and rounded by a [`RoundingPolicy`].
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   raw input ──► Decimal ──► policy.round() ──► Quantity (immutable)     │
//! │   (int, float,                                    │                     │
//! │    text, Decimal)                                 │ add / subtract      │
//! │                                                   │ multiply / divide   │
//! │                                                   ▼                     │
//! │                                   new Quantity with the RECEIVER's      │
//! │                                   metric and rounding policy            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Permissive Arithmetic
//! Arithmetic never checks that both operands use the same metric. Adding
//! kilograms to liters yields kilograms. Callers that mix metrics own that
//! decision.
//!
//! ## Usage
//! ```rust
//! use salespoint_core::metric::Metric;
//! use salespoint_core::quantity::Quantity;
//! use salespoint_core::rounding::MONETARY_ROUNDING;
//!
//! let price = Quantity::from_f64(1.23456, Metric::EURO, MONETARY_ROUNDING).unwrap();
//! assert_eq!(price.to_string(), "1.2346€");
//!
//! let ten = Quantity::of(10);
//! let twenty = ten.add(&ten).unwrap();
//! assert_eq!(twenty.to_string(), "20");
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::metric::Metric;
use crate::rounding::{RoundingPolicy, RoundingStrategy, ROUND_ONE};

// =============================================================================
// Quantity Type
// =============================================================================

/// An immutable amount, tagged with a metric and rounded by a policy.
///
/// ## Invariants
/// - `amount` is always the output of `rounding.round(raw)` for the raw
///   value it was built from (deserialization re-applies the policy)
/// - instances are never mutated; arithmetic returns new quantities
///
/// ## Equality and Ordering
/// Equal quantities share rounding policy, amount and metric. Ordering looks
/// at the amount only; quantities with equal amounts but different metrics
/// are unordered under `PartialOrd`. Use [`Quantity::compare_amount`] for a
/// total order by amount.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawQuantity")]
pub struct Quantity {
    amount: Decimal,
    metric: Metric,
    rounding: RoundingPolicy,
}

impl Quantity {
    /// Creates a quantity, rounding `amount` with `rounding`.
    ///
    /// Accepts anything convertible into a `Decimal` losslessly (all integer
    /// types and `Decimal` itself).
    pub fn new(amount: impl Into<Decimal>, metric: Metric, rounding: RoundingPolicy) -> Self {
        Quantity {
            amount: rounding.round(amount.into()),
            metric,
            rounding,
        }
    }

    /// Convenience constructor for counted items: integral rounding,
    /// [`Metric::UNIT`].
    pub fn of(amount: i64) -> Self {
        Quantity::new(amount, Metric::UNIT, ROUND_ONE)
    }

    /// Creates a quantity from a double.
    ///
    /// ## Errors
    /// `CoreError::InvalidAmount` for NaN and infinities.
    pub fn from_f64(amount: f64, metric: Metric, rounding: RoundingPolicy) -> CoreResult<Self> {
        let decimal = Decimal::try_from(amount).map_err(|_| CoreError::InvalidAmount {
            value: amount.to_string(),
        })?;
        Ok(Quantity::new(decimal, metric, rounding))
    }

    /// Creates a quantity from a float.
    ///
    /// ## Errors
    /// `CoreError::InvalidAmount` for NaN and infinities.
    pub fn from_f32(amount: f32, metric: Metric, rounding: RoundingPolicy) -> CoreResult<Self> {
        let decimal = Decimal::try_from(amount).map_err(|_| CoreError::InvalidAmount {
            value: amount.to_string(),
        })?;
        Ok(Quantity::new(decimal, metric, rounding))
    }

    /// Parses text such as `"12.50"` or `"1.5e3"` into a quantity.
    ///
    /// ## Errors
    /// `CoreError::Parse` carrying the decimal parser's error unchanged.
    pub fn parse(text: &str, metric: Metric, rounding: RoundingPolicy) -> CoreResult<Self> {
        Ok(Quantity::new(parse_decimal(text)?, metric, rounding))
    }

    /// Creates a zero quantity.
    pub fn zero(metric: Metric, rounding: RoundingPolicy) -> Self {
        Quantity::new(Decimal::ZERO, metric, rounding)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    #[inline]
    pub fn metric(&self) -> &Metric {
        &self.metric
    }

    #[inline]
    pub fn rounding(&self) -> RoundingPolicy {
        self.rounding
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.amount.is_sign_positive() && !self.amount.is_zero()
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    // =========================================================================
    // Arithmetic
    // =========================================================================

    /// Sums two quantities. The result keeps this quantity's metric and
    /// rounding policy.
    ///
    /// ## Errors
    /// `CoreError::Overflow` if the sum leaves the decimal range.
    pub fn add(&self, other: &Quantity) -> CoreResult<Quantity> {
        let sum = self
            .amount
            .checked_add(other.amount)
            .ok_or(CoreError::Overflow { operation: "add" })?;
        Ok(self.with_raw_amount(sum))
    }

    /// Subtracts `other` from this quantity.
    ///
    /// ## Errors
    /// `CoreError::Overflow` if the difference leaves the decimal range.
    pub fn subtract(&self, other: &Quantity) -> CoreResult<Quantity> {
        let difference = self
            .amount
            .checked_sub(other.amount)
            .ok_or(CoreError::Overflow {
                operation: "subtract",
            })?;
        Ok(self.with_raw_amount(difference))
    }

    /// Multiplies two quantities.
    ///
    /// ## Errors
    /// `CoreError::Overflow` if the product leaves the decimal range.
    pub fn multiply(&self, other: &Quantity) -> CoreResult<Quantity> {
        let product = self
            .amount
            .checked_mul(other.amount)
            .ok_or(CoreError::Overflow {
                operation: "multiply",
            })?;
        Ok(self.with_raw_amount(product))
    }

    /// Divides this quantity by `other`.
    ///
    /// ## Errors
    /// - `CoreError::DivisionByZero` if `other` has a zero amount
    /// - `CoreError::Overflow` if the quotient leaves the decimal range
    pub fn divide(&self, other: &Quantity) -> CoreResult<Quantity> {
        if other.amount.is_zero() {
            return Err(CoreError::DivisionByZero);
        }
        let quotient = self
            .amount
            .checked_div(other.amount)
            .ok_or(CoreError::Overflow { operation: "divide" })?;
        Ok(self.with_raw_amount(quotient))
    }

    /// Negates the amount.
    pub fn negate(&self) -> Quantity {
        self.with_raw_amount(-self.amount)
    }

    /// Orders two quantities by amount alone, ignoring metric and policy.
    pub fn compare_amount(&self, other: &Quantity) -> Ordering {
        self.amount.cmp(&other.amount)
    }

    fn with_raw_amount(&self, raw: Decimal) -> Quantity {
        Quantity::new(raw, self.metric.clone(), self.rounding)
    }
}

impl PartialOrd for Quantity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.compare_amount(other) {
            Ordering::Equal if self != other => None,
            ordering => Some(ordering),
        }
    }
}

/// Displays the amount followed by the metric's symbol: `1.2346€`, `10kg`.
impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.metric.symbol())
    }
}

/// Parses counted items (`"10"` → 10 pieces, integral rounding).
impl FromStr for Quantity {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Quantity::parse(s, Metric::UNIT, ROUND_ONE)
    }
}

/// Parses plain (`"12.5"`) or scientific (`"1.25e1"`) decimal notation.
pub(crate) fn parse_decimal(text: &str) -> CoreResult<Decimal> {
    let text = text.trim();
    let decimal = if text.contains(['e', 'E']) {
        Decimal::from_scientific(text)?
    } else {
        Decimal::from_str(text)?
    };
    Ok(decimal)
}

// =============================================================================
// Serde
// =============================================================================

/// Wire form of a quantity; converted back through the rounding policy.
#[derive(Deserialize)]
struct RawQuantity {
    amount: Decimal,
    #[serde(default)]
    metric: Metric,
    #[serde(default)]
    rounding: RoundingPolicy,
}

impl From<RawQuantity> for Quantity {
    fn from(raw: RawQuantity) -> Self {
        Quantity::new(raw.amount, raw.metric, raw.rounding)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
