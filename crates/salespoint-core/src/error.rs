//! # Error Types
//!
//! Domain-specific error types for salespoint-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  CoreError                                                              │
//! │  ├── Arithmetic   DivisionByZero, Overflow, InvalidAmount, Parse        │
//! │  ├── Money        CurrencyMismatch                                      │
//! │  ├── Cart/Order   CartTooLarge, InvalidOrderStatus, EmptyOrder          │
//! │  ├── Config       ConfigLoadFailed, Io                                  │
//! │  └── Validation   wraps ValidationError                                 │
//! │                                                                         │
//! │  ValidationError  - Input validation failures                           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → caller (web/persistence layer)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (ids, symbols, operations)
//! 3. Decimal parse failures are wrapped, not re-described

use thiserror::Error;

use crate::order::OrderStatus;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A quantity was divided by a quantity whose amount is zero.
    #[error("Division by zero")]
    DivisionByZero,

    /// The result of an arithmetic operation does not fit the decimal range.
    #[error("Arithmetic overflow during {operation}")]
    Overflow { operation: &'static str },

    /// A raw numeric value cannot be represented as a decimal (NaN, infinity).
    #[error("Invalid amount: {value}")]
    InvalidAmount { value: String },

    /// Text could not be parsed as a decimal number.
    ///
    /// The underlying decimal parser error is propagated unchanged.
    #[error("Failed to parse amount: {0}")]
    Parse(#[from] rust_decimal::Error),

    /// Two monetary amounts in different currencies were combined.
    #[error("Currency mismatch: expected {expected}, found {found}")]
    CurrencyMismatch { expected: String, found: String },

    /// Cart has exceeded maximum allowed distinct items.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Order is not in a state that allows the requested operation.
    ///
    /// ## When This Occurs
    /// - Adding lines to an order that has been paid
    /// - Paying an order twice
    /// - Cancelling a completed order
    #[error("Order {order_id} is {current_status}, cannot perform operation")]
    InvalidOrderStatus {
        order_id: String,
        current_status: OrderStatus,
    },

    /// An order without lines cannot be paid.
    #[error("Order {0} has no order lines")]
    EmptyOrder(String),

    /// Configuration file could not be parsed.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Reading the configuration file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl From<toml::de::Error> for CoreError {
    fn from(err: toml::de::Error) -> Self {
        CoreError::ConfigLoadFailed(err.to_string())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., unknown rounding mode).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
