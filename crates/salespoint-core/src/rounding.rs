//! # Rounding Module
//!
//! Rounding policies applied to every [`Quantity`](crate::quantity::Quantity)
//! at construction time.
//!
//! ## Value Sets
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Not every decimal is a meaningful amount:                              │
//! │                                                                         │
//! │    0.00001 €       → no coin exists for it                              │
//! │    2.5 pieces      → nobody sells half a bottle                         │
//! │                                                                         │
//! │  A RoundingPolicy maps the raw value onto the value set of its metric:  │
//! │                                                                         │
//! │    MONETARY_ROUNDING  4 digits, half-up     1.23456 → 1.2346            │
//! │    ROUND_ONE          0 digits, half-down   2.5     → 2                 │
//! │    Custom             any scale, any mode   half_even:2                 │
//! │                                                                         │
//! │  Every Quantity therefore always holds an already-rounded amount.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rust_decimal::Decimal;
//! use salespoint_core::rounding::{RoundingStrategy, MONETARY_ROUNDING, ROUND_ONE};
//!
//! let raw: Decimal = "1.23456".parse().unwrap();
//! assert_eq!(MONETARY_ROUNDING.round(raw).to_string(), "1.2346");
//!
//! let tie: Decimal = "2.5".parse().unwrap();
//! assert_eq!(ROUND_ONE.round(tie).to_string(), "2");
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, ValidationError};

/// Largest number of fractional digits a decimal can carry.
pub const MAX_SCALE: u32 = 28;

/// Monetary rounding: 4 fractional digits, ties rounded half-up.
pub const MONETARY_ROUNDING: RoundingPolicy = RoundingPolicy::Monetary;

/// Rounding for integral amounts: 0 fractional digits, ties rounded half-down.
pub const ROUND_ONE: RoundingPolicy = RoundingPolicy::Integral;

// =============================================================================
// Rounding Strategy
// =============================================================================

/// Maps a raw decimal onto a precision-reduced decimal.
///
/// Implementations must be pure: the same input always yields the same
/// output and no state is touched.
pub trait RoundingStrategy {
    /// Rounds `amount` and returns the rounded value.
    fn round(&self, amount: Decimal) -> Decimal;
}

// =============================================================================
// Rounding Mode
// =============================================================================

/// Tie-breaking and direction rule used when discarding digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Away from zero.
    Up,
    /// Towards zero (truncation).
    Down,
    /// Towards positive infinity.
    Ceiling,
    /// Towards negative infinity.
    Floor,
    /// Nearest neighbour, ties away from zero.
    HalfUp,
    /// Nearest neighbour, ties towards zero.
    HalfDown,
    /// Nearest neighbour, ties to the even neighbour (bankers rounding).
    HalfEven,
}

impl RoundingMode {
    const ALL: [RoundingMode; 7] = [
        RoundingMode::Up,
        RoundingMode::Down,
        RoundingMode::Ceiling,
        RoundingMode::Floor,
        RoundingMode::HalfUp,
        RoundingMode::HalfDown,
        RoundingMode::HalfEven,
    ];

    /// Returns the equivalent `rust_decimal` strategy.
    pub const fn decimal_strategy(self) -> rust_decimal::RoundingStrategy {
        use rust_decimal::RoundingStrategy as Strategy;

        match self {
            RoundingMode::Up => Strategy::AwayFromZero,
            RoundingMode::Down => Strategy::ToZero,
            RoundingMode::Ceiling => Strategy::ToPositiveInfinity,
            RoundingMode::Floor => Strategy::ToNegativeInfinity,
            RoundingMode::HalfUp => Strategy::MidpointAwayFromZero,
            RoundingMode::HalfDown => Strategy::MidpointTowardZero,
            RoundingMode::HalfEven => Strategy::MidpointNearestEven,
        }
    }

    /// Name used in configuration files and `Display`.
    pub const fn as_str(self) -> &'static str {
        match self {
            RoundingMode::Up => "up",
            RoundingMode::Down => "down",
            RoundingMode::Ceiling => "ceiling",
            RoundingMode::Floor => "floor",
            RoundingMode::HalfUp => "half_up",
            RoundingMode::HalfDown => "half_down",
            RoundingMode::HalfEven => "half_even",
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoundingMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        RoundingMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == wanted)
            .ok_or_else(|| {
                ValidationError::InvalidFormat {
                    field: "rounding_mode".to_string(),
                    reason: format!(
                        "unknown mode '{}', expected one of up, down, ceiling, floor, half_up, half_down, half_even",
                        s
                    ),
                }
                .into()
            })
    }
}

// =============================================================================
// Rounding Policy
// =============================================================================

/// The rounding policy carried by a quantity.
///
/// Policies are tiny `Copy` values, so every quantity holds the same shared,
/// immutable behaviour without any allocation or locking.
///
/// ## Equality
/// Two policies are equal when they round identically: `Monetary` equals
/// `Custom { scale: 4, mode: HalfUp }`.
///
/// ## Text Form
/// `monetary`, `integral`, or `<mode>:<scale>` such as `half_even:2`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RoundingPolicy {
    /// 4 fractional digits, half-up.
    Monetary,
    /// 0 fractional digits, half-down.
    Integral,
    /// Arbitrary scale and mode.
    Custom { scale: u32, mode: RoundingMode },
}

impl RoundingPolicy {
    /// Creates a custom policy.
    ///
    /// ## Errors
    /// Returns a validation error if `scale` exceeds [`MAX_SCALE`].
    pub fn custom(scale: u32, mode: RoundingMode) -> Result<Self, CoreError> {
        crate::validation::validate_scale(scale)?;
        Ok(RoundingPolicy::Custom { scale, mode })
    }

    /// Number of fractional digits kept.
    #[inline]
    pub const fn scale(&self) -> u32 {
        match self {
            RoundingPolicy::Monetary => 4,
            RoundingPolicy::Integral => 0,
            RoundingPolicy::Custom { scale, .. } => *scale,
        }
    }

    /// Rule applied to the discarded digits.
    #[inline]
    pub const fn mode(&self) -> RoundingMode {
        match self {
            RoundingPolicy::Monetary => RoundingMode::HalfUp,
            RoundingPolicy::Integral => RoundingMode::HalfDown,
            RoundingPolicy::Custom { mode, .. } => *mode,
        }
    }

    /// Smallest step between two amounts this policy can produce.
    pub fn tolerance(&self) -> Decimal {
        Decimal::new(1, self.scale().min(MAX_SCALE))
    }
}

impl RoundingStrategy for RoundingPolicy {
    fn round(&self, amount: Decimal) -> Decimal {
        let scale = self.scale().min(MAX_SCALE);
        let mut rounded = amount.round_dp_with_strategy(scale, self.mode().decimal_strategy());
        // Pad to exactly `scale` digits so "2" displays as "2.0000" under monetary rounding.
        rounded.rescale(scale);
        if rounded.is_zero() {
            rounded.set_sign_positive(true);
        }
        rounded
    }
}

impl Default for RoundingPolicy {
    fn default() -> Self {
        MONETARY_ROUNDING
    }
}

impl PartialEq for RoundingPolicy {
    fn eq(&self, other: &Self) -> bool {
        self.scale() == other.scale() && self.mode() == other.mode()
    }
}

impl Eq for RoundingPolicy {}

impl Hash for RoundingPolicy {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.scale().hash(state);
        self.mode().hash(state);
    }
}

impl fmt::Display for RoundingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundingPolicy::Monetary => f.write_str("monetary"),
            RoundingPolicy::Integral => f.write_str("integral"),
            RoundingPolicy::Custom { scale, mode } => write!(f, "{}:{}", mode, scale),
        }
    }
}

impl FromStr for RoundingPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_lowercase().as_str() {
            "monetary" => return Ok(RoundingPolicy::Monetary),
            "integral" | "round_one" => return Ok(RoundingPolicy::Integral),
            _ => {}
        }

        let (mode, scale) = s.split_once(':').ok_or_else(|| ValidationError::InvalidFormat {
            field: "rounding".to_string(),
            reason: format!("expected 'monetary', 'integral' or '<mode>:<scale>', got '{}'", s),
        })?;
        let scale = scale
            .trim()
            .parse::<u32>()
            .map_err(|e| ValidationError::InvalidFormat {
                field: "rounding".to_string(),
                reason: format!("invalid scale '{}': {}", scale, e),
            })?;

        RoundingPolicy::custom(scale, mode.parse()?)
    }
}

impl TryFrom<String> for RoundingPolicy {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RoundingPolicy> for String {
    fn from(policy: RoundingPolicy) -> Self {
        policy.to_string()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
