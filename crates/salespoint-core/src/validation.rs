//! # Validation Module
//!
//! Input validation utilities for salespoint-core.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Web layer (external)                                          │
//! │  ├── Text → number conversion                                           │
//! │  └── Form feedback                                                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Domain constructors                                           │
//! │  └── THIS MODULE: names, scales, cart quantities                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Persistence (external)                                        │
//! │  └── Schema constraints                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use salespoint_core::quantity::Quantity;
//! use salespoint_core::validation::{validate_product_name, validate_cart_quantity};
//!
//! validate_product_name("Espresso Beans 1kg").unwrap();
//! validate_cart_quantity(&Quantity::of(5)).unwrap();
//! assert!(validate_cart_quantity(&Quantity::of(0)).is_err());
//! ```

use crate::error::ValidationError;
use crate::quantity::Quantity;
use crate::rounding::MAX_SCALE;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_PRODUCT_NAME_LEN: usize = 200;
const MAX_METRIC_NAME_LEN: usize = 50;
const MAX_CATEGORY_LEN: usize = 50;

// =============================================================================
// String Validators
// =============================================================================

fn validate_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - Must be between 1 and 200 characters
///
/// ## Example
/// ```rust
/// use salespoint_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Coca-Cola 330ml").is_ok());
/// assert!(validate_product_name("").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_text("name", name, MAX_PRODUCT_NAME_LEN)
}

/// Validates a metric name (1 to 50 characters).
pub fn validate_metric_name(name: &str) -> ValidationResult<()> {
    validate_text("metric", name, MAX_METRIC_NAME_LEN)
}

/// Validates a catalog category (1 to 50 characters).
pub fn validate_category(category: &str) -> ValidationResult<()> {
    validate_text("category", category, MAX_CATEGORY_LEN)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity placed into a cart or order.
///
/// ## Rules
/// - Must be positive (> 0)
///
/// ## User Workflow
/// ```text
/// Cart: add_or_update_item(product, quantity)
///      │
///      ▼
/// validate_cart_quantity ← THIS FUNCTION
///      │
///      ├── amount <= 0? → Error: "quantity must be positive"
///      │
///      └── OK → item added / merged
/// ```
pub fn validate_cart_quantity(quantity: &Quantity) -> ValidationResult<()> {
    if !quantity.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a rounding scale (number of fractional digits).
pub fn validate_scale(scale: u32) -> ValidationResult<()> {
    if scale > MAX_SCALE {
        return Err(ValidationError::OutOfRange {
            field: "scale".to_string(),
            min: 0,
            max: i64::from(MAX_SCALE),
        });
    }

    Ok(())
}

/// Validates a limit that must be at least one (e.g. `cart.max_items`).
pub fn validate_limit(field: &str, value: usize) -> ValidationResult<()> {
    if value == 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
