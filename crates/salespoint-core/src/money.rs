//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Rounded Decimal Quantities                               │
//! │    Money is a Quantity whose metric is the currency and whose           │
//! │    rounding policy is MONETARY_ROUNDING (4 digits, half-up).            │
//! │    0.1 + 0.2 = 0.3000 exactly                                           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use salespoint_core::money::Money;
//! use salespoint_core::quantity::Quantity;
//!
//! let price: Money = "2.99".parse().unwrap();
//! let line_total = price.times(&Quantity::of(3)).unwrap();
//! assert_eq!(line_total.to_string(), "8.9700€");
//! ```

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::metric::Metric;
use crate::quantity::{parse_decimal, Quantity};
use crate::rounding::{RoundingPolicy, MONETARY_ROUNDING};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount: a [`Quantity`] measured in a currency.
///
/// ## Design Decisions
/// - **Currency as metric**: the currency symbol is the quantity's symbol,
///   so `Display` yields `12.5000€`
/// - **Same-currency arithmetic**: unlike bare quantities, adding euros to
///   dollars is refused with `CoreError::CurrencyMismatch`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Quantity);

impl Money {
    /// Creates money in `currency` with monetary rounding.
    pub fn of(amount: impl Into<Decimal>, currency: Metric) -> Self {
        Money(Quantity::new(amount, currency, MONETARY_ROUNDING))
    }

    /// Creates money with a non-default rounding policy (e.g. from config).
    pub fn with_rounding(
        amount: impl Into<Decimal>,
        currency: Metric,
        rounding: RoundingPolicy,
    ) -> Self {
        Money(Quantity::new(amount, currency, rounding))
    }

    /// Creates an amount in euros.
    ///
    /// ## Example
    /// ```rust
    /// use salespoint_core::money::Money;
    ///
    /// assert_eq!(Money::euros(5).to_string(), "5.0000€");
    /// ```
    pub fn euros(amount: impl Into<Decimal>) -> Self {
        Money::of(amount, Metric::EURO)
    }

    /// Returns zero in `currency`.
    pub fn zero(currency: Metric) -> Self {
        Money::of(Decimal::ZERO, currency)
    }

    #[inline]
    pub fn amount(&self) -> Decimal {
        self.0.amount()
    }

    #[inline]
    pub fn currency(&self) -> &Metric {
        self.0.metric()
    }

    /// Borrows the underlying quantity.
    #[inline]
    pub fn as_quantity(&self) -> &Quantity {
        &self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    /// Adds two amounts of the same currency.
    pub fn add(&self, other: &Money) -> CoreResult<Money> {
        self.check_currency(other)?;
        Ok(Money(self.0.add(&other.0)?))
    }

    /// Subtracts an amount of the same currency.
    pub fn subtract(&self, other: &Money) -> CoreResult<Money> {
        self.check_currency(other)?;
        Ok(Money(self.0.subtract(&other.0)?))
    }

    /// Prices a quantity of goods: this unit price times `quantity`'s amount.
    ///
    /// The quantity's metric is irrelevant; the result stays in this currency.
    pub fn times(&self, quantity: &Quantity) -> CoreResult<Money> {
        Ok(Money(self.0.multiply(quantity)?))
    }

    /// Sums `amounts` in `currency`.
    ///
    /// The total keeps the rounding policy of the first amount; an empty
    /// input yields zero rounded by `rounding`.
    ///
    /// ## Errors
    /// `CoreError::CurrencyMismatch` if any amount is not in `currency`.
    pub fn sum<'a>(
        currency: Metric,
        rounding: RoundingPolicy,
        amounts: impl IntoIterator<Item = &'a Money>,
    ) -> CoreResult<Money> {
        let zero = Money::with_rounding(Decimal::ZERO, currency, rounding);
        let mut amounts = amounts.into_iter();
        match amounts.next() {
            None => Ok(zero),
            Some(first) => {
                zero.check_currency(first)?;
                amounts.try_fold(first.clone(), |total, money| total.add(money))
            }
        }
    }

    fn check_currency(&self, other: &Money) -> CoreResult<()> {
        if self.currency() != other.currency() {
            return Err(CoreError::CurrencyMismatch {
                expected: self.currency().name().to_string(),
                found: other.currency().name().to_string(),
            });
        }
        Ok(())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows amount and currency symbol.
///
/// ## Note
/// Locale-aware formatting belongs to the presentation layer.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Parses text into euros. Parse failures propagate unchanged.
impl FromStr for Money {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Money::euros(parse_decimal(s)?))
    }
}

impl From<Money> for Quantity {
    fn from(money: Money) -> Self {
        money.0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
